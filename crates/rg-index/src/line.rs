//! Bounding-box index over line geometries.
//!
//! Each line is stored as its bounding box padded by the coordinate
//! tolerance.  Queries return every line whose padded box meets the query
//! line's padded box: false positives are expected, false negatives are not
//! possible because any common point lies inside both boxes.

use rstar::{AABB, RTree, RTreeObject};

use rg_core::Coord;

use crate::{IndexError, IndexResult};

#[derive(Clone)]
struct LineEntry {
    min:  [f64; 2],
    max:  [f64; 2],
    slot: usize,
}

impl RTreeObject for LineEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Static R-tree over line envelopes, keyed by the line's position (slot)
/// in the input sequence.
pub struct LineIndex {
    tree:  RTree<LineEntry>,
    boxes: Vec<([f64; 2], [f64; 2])>,
    pad:   f64,
}

impl LineIndex {
    /// Bulk-load the index.  `pad` widens every box on both axes (use the
    /// coordinate tolerance).
    ///
    /// Fails on empty input: an empty index means an empty graph, which the
    /// builder must report rather than silently produce.
    pub fn build<'a, I>(lines: I, pad: f64) -> IndexResult<Self>
    where
        I: IntoIterator<Item = &'a [Coord]>,
    {
        let mut boxes = Vec::new();
        for (slot, coords) in lines.into_iter().enumerate() {
            let (min, max) = padded_box(coords, pad);
            if !(min.iter().chain(max.iter()).all(|v| v.is_finite())) {
                return Err(IndexError::NonFiniteEnvelope { slot });
            }
            boxes.push((min, max));
        }
        if boxes.is_empty() {
            return Err(IndexError::Empty("line"));
        }

        let entries: Vec<LineEntry> = boxes
            .iter()
            .enumerate()
            .map(|(slot, &(min, max))| LineEntry { min, max, slot })
            .collect();

        Ok(Self { tree: RTree::bulk_load(entries), boxes, pad })
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Slots of all other indexed lines whose boxes meet the box of `slot`,
    /// in ascending order.  Unknown slots yield an empty list.
    pub fn candidates(&self, slot: usize) -> Vec<usize> {
        let Some(&(min, max)) = self.boxes.get(slot) else {
            return Vec::new();
        };
        let mut out: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&AABB::from_corners(min, max))
            .map(|e| e.slot)
            .filter(|&s| s != slot)
            .collect();
        out.sort_unstable();
        out
    }

    /// Slots of all indexed lines whose boxes meet the box of an arbitrary
    /// line, in ascending order.
    pub fn query(&self, coords: &[Coord]) -> Vec<usize> {
        let (min, max) = padded_box(coords, self.pad);
        let mut out: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&AABB::from_corners(min, max))
            .map(|e| e.slot)
            .collect();
        out.sort_unstable();
        out
    }
}

fn padded_box(coords: &[Coord], pad: f64) -> ([f64; 2], [f64; 2]) {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for c in coords {
        min[0] = min[0].min(c.lon);
        min[1] = min[1].min(c.lat);
        max[0] = max[0].max(c.lon);
        max[1] = max[1].max(c.lat);
    }
    ([min[0] - pad, min[1] - pad], [max[0] + pad, max[1] + pad])
}
