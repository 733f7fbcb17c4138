//! geojson-route: road graph from GeoJSON, routes back out as GeoJSON.
//!
//! Usage:
//!   geojson-route roads.geojson --from 73.05,33.60 --to 73.10,33.70
//!   geojson-route roads.geojson --from 73.05,33.60 --to 73.10,33.70 \
//!       --strategy k_shortest -k 3 --config engine.json
//!
//! `RUST_LOG=debug` shows per-feature build diagnostics.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

use rg_core::{Coord, EngineConfig, Profile};
use rg_graph::LogObserver;
use rg_graph::geojson::features_from_geojson;
use rg_query::{RoutePath, RouteService, Strategy};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GeoJSON file with LineString / MultiLineString / Polygon features.
    input: PathBuf,

    /// Start point as `lon,lat`.
    #[arg(long, value_parser = parse_coord)]
    from: Coord,

    /// End point as `lon,lat`.
    #[arg(long, value_parser = parse_coord)]
    to: Coord,

    /// shortest | astar | k_shortest | diverse | randomized
    #[arg(long, default_value = "shortest")]
    strategy: Strategy,

    /// Number of paths for multi-path strategies.
    #[arg(short, long, default_value_t = 1)]
    k: usize,

    /// JSON file with an engine config (`{"build": {...}, "search": {...}}`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the config's travel profile: any | car | bike | foot.
    #[arg(long)]
    profile: Option<Profile>,
}

fn parse_coord(s: &str) -> Result<Coord, String> {
    let (lon, lat) = s.split_once(',').ok_or_else(|| format!("expected `lon,lat`, got `{s}`"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude `{lon}`: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude `{lat}`: {e}"))?;
    Ok(Coord::new(lon, lat))
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn to_feature(rank: usize, strategy: Strategy, path: &RoutePath) -> Feature {
    let positions: Vec<Vec<f64>> = path.coords.iter().map(|c| vec![c.lon, c.lat]).collect();
    let mut properties = JsonObject::new();
    properties.insert("rank".into(), JsonValue::from(rank));
    properties.insert("cost".into(), JsonValue::from(path.cost));
    properties.insert("strategy".into(), JsonValue::from(strategy.as_str()));
    Feature {
        bbox:            None,
        geometry:        Some(Geometry::new(Value::LineString(positions))),
        id:              None,
        properties:      Some(properties),
        foreign_members: None,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = load_config(args.config.as_ref())?;
    if let Some(profile) = args.profile {
        config.build.profile = profile;
    }

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let doc: GeoJson = text.parse().with_context(|| format!("parsing {}", args.input.display()))?;
    let import = features_from_geojson(&doc);
    for skipped in &import.skipped {
        log::warn!("input feature {} skipped: {}", skipped.index, skipped.reason);
    }
    if !import.issues.is_empty() {
        log::warn!("{} propert(ies) fell back to defaults", import.issues.len());
    }
    if import.features.is_empty() {
        bail!("{} contains no line features", args.input.display());
    }

    let service = RouteService::new(config)?;
    let snapshot = service.ingest(&import.features, &mut LogObserver)?;
    log::info!(
        "graph ready: {} nodes, {} edges",
        snapshot.graph().node_count(),
        snapshot.graph().edge_count()
    );

    let paths = service.route(args.from, args.to, args.strategy, args.k)?;
    let collection = FeatureCollection {
        bbox:            None,
        features:        paths.iter().enumerate().map(|(i, p)| to_feature(i, args.strategy, p)).collect(),
        foreign_members: None,
    };
    println!("{}", GeoJson::FeatureCollection(collection));
    Ok(())
}
