//! Quad-tree spatial index over elements.
//!
//! DESIGN
//! ======
//! A node is either a leaf holding up to `max_elements` entries, or an
//! internal node with exactly four children and no entries of its own. A leaf
//! splits once it exceeds `max_elements` while `depth < max_depth`; a split
//! node only becomes a leaf again through `clear`/`rebuild`.
//!
//! An element is stored in every child its world bounds touch, so queries can
//! return the same element more than once. Callers that need uniqueness
//! dedupe by id ([`dedup_by_id`]) or stop at the first match.
//!
//! Elements that extend past the root bounds are parked in an overflow list
//! that every query scans. Everything in the tree proper lies fully inside
//! the root, so a query region can only reach it through the leaves.
//!
//! Every entry carries an insertion sequence number and query results come
//! back in insertion order, whether an entry sits in a leaf or in overflow.
//!
//! Depth is capped at [`MAX_INDEX_DEPTH`] and a node whose halves would be
//! empty never splits, so coincident elements cannot recurse without bound.

#[cfg(test)]
#[path = "spatial_test.rs"]
mod spatial_test;

use std::collections::HashSet;

use crate::camera::{Point, Rect, distance};
use crate::consts::{DEFAULT_INDEX_EXTENT, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ELEMENTS, MAX_INDEX_DEPTH};
use crate::doc::Element;

/// Shape of the quad-tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexConfig {
    /// Region covered by the root node.
    pub bounds: Rect,
    /// Leaf capacity before subdividing.
    pub max_elements: usize,
    /// Deepest level at which nodes may still subdivide. Clamped to
    /// [`MAX_INDEX_DEPTH`] by [`SpatialIndex::new`].
    pub max_depth: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(
                -DEFAULT_INDEX_EXTENT,
                -DEFAULT_INDEX_EXTENT,
                2.0 * DEFAULT_INDEX_EXTENT,
                2.0 * DEFAULT_INDEX_EXTENT,
            ),
            max_elements: DEFAULT_MAX_ELEMENTS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Diagnostics from a full traversal. For tuning and tests only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexStats {
    pub total_nodes: usize,
    /// Stored entries, counting every duplicate across quadrants and the overflow list.
    pub total_elements: usize,
    pub max_depth_reached: usize,
    pub avg_elements_per_leaf: f64,
    pub overflow_elements: usize,
}

/// An element copy plus its cached world bounds and insertion sequence.
#[derive(Debug, Clone)]
struct Entry {
    bounds: Rect,
    seq: u64,
    element: Element,
}

impl Entry {
    fn new(element: &Element, seq: u64) -> Self {
        Self { bounds: element.world_bounds(), seq, element: element.clone() }
    }
}

#[derive(Debug)]
struct SpatialNode {
    bounds: Rect,
    entries: Vec<Entry>,
    children: Option<Box<[SpatialNode; 4]>>,
    depth: usize,
}

impl SpatialNode {
    fn leaf(bounds: Rect, depth: usize) -> Self {
        Self { bounds, entries: Vec::new(), children: None, depth }
    }

    /// Store `entry` in every reachable leaf it touches. Returns false if it
    /// touched none.
    fn insert(&mut self, entry: &Entry, config: &IndexConfig) -> bool {
        if !self.bounds.intersects(&entry.bounds) {
            return false;
        }
        if let Some(children) = self.children.as_mut() {
            let mut placed = false;
            for child in children.iter_mut() {
                placed |= child.insert(entry, config);
            }
            return placed;
        }
        self.entries.push(entry.clone());
        if self.entries.len() > config.max_elements && self.depth < config.max_depth && self.can_split() {
            self.subdivide(config);
        }
        true
    }

    /// False once halving would produce empty or non-finite quadrants.
    fn can_split(&self) -> bool {
        let (hw, hh) = (self.bounds.width / 2.0, self.bounds.height / 2.0);
        hw > 0.0 && hh > 0.0 && hw.is_finite() && hh.is_finite()
    }

    fn subdivide(&mut self, config: &IndexConfig) {
        let Rect { x, y, width, height } = self.bounds;
        let (hw, hh) = (width / 2.0, height / 2.0);
        let depth = self.depth + 1;
        let mut children = Box::new([
            Self::leaf(Rect::new(x, y, hw, hh), depth),
            Self::leaf(Rect::new(x + hw, y, hw, hh), depth),
            Self::leaf(Rect::new(x, y + hh, hw, hh), depth),
            Self::leaf(Rect::new(x + hw, y + hh, hw, hh), depth),
        ]);
        let entries = std::mem::take(&mut self.entries);
        tracing::debug!(depth = self.depth, entries = entries.len(), "subdividing quad-tree node");
        for entry in &entries {
            for child in children.iter_mut() {
                child.insert(entry, config);
            }
        }
        self.children = Some(children);
    }

    /// Drop every entry with `id`. Returns true if any was removed.
    fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.element.id != id);
        let mut removed = self.entries.len() != before;
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                removed |= child.remove(id);
            }
        }
        removed
    }

    fn collect<'a>(&'a self, region: &Rect, out: &mut Vec<&'a Entry>) {
        if !self.bounds.intersects(region) {
            return;
        }
        out.extend(self.entries.iter().filter(|e| e.bounds.intersects(region)));
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.collect(region, out);
            }
        }
    }

    fn for_each_entry<'a>(&'a self, f: &mut impl FnMut(&'a Entry)) {
        self.entries.iter().for_each(&mut *f);
        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.for_each_entry(f);
            }
        }
    }

    fn accumulate_stats(&self, stats: &mut IndexStats, leaves: &mut usize) {
        stats.total_nodes += 1;
        stats.max_depth_reached = stats.max_depth_reached.max(self.depth);
        match self.children.as_ref() {
            Some(children) => {
                for child in children.iter() {
                    child.accumulate_stats(stats, leaves);
                }
            }
            None => {
                *leaves += 1;
                stats.total_elements += self.entries.len();
            }
        }
    }
}

/// Quad-tree over element world bounds.
///
/// The index keeps its own copies of inserted elements; call
/// [`SpatialIndex::update`] after an element moves or changes shape.
#[derive(Debug)]
pub struct SpatialIndex {
    config: IndexConfig,
    root: SpatialNode,
    overflow: Vec<Entry>,
    next_seq: u64,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

impl SpatialIndex {
    #[must_use]
    pub fn new(mut config: IndexConfig) -> Self {
        if config.max_depth > MAX_INDEX_DEPTH {
            tracing::warn!(requested = config.max_depth, max = MAX_INDEX_DEPTH, "clamping quad-tree depth");
            config.max_depth = MAX_INDEX_DEPTH;
        }
        Self { root: SpatialNode::leaf(config.bounds.normalized(), 0), overflow: Vec::new(), next_seq: 0, config }
    }

    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Insert an element into every quadrant its rotated footprint touches.
    pub fn insert(&mut self, element: &Element) {
        let entry = Entry::new(element, self.next_seq);
        self.next_seq += 1;
        if !self.root.bounds.contains_rect(&entry.bounds) || !self.root.insert(&entry, &self.config) {
            tracing::warn!(id = %element.id, "element extends past index bounds; keeping in overflow");
            self.overflow.push(entry);
        }
    }

    /// Remove all stored copies of the element with `id`. Returns false if
    /// the index held none.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.overflow.len();
        self.overflow.retain(|e| e.element.id != id);
        let from_overflow = self.overflow.len() != before;
        self.root.remove(id) | from_overflow
    }

    /// Re-index an element after it changed: remove, then insert.
    pub fn update(&mut self, element: &Element) {
        self.remove(&element.id);
        self.insert(element);
    }

    /// Elements whose world bounds intersect `region`, oldest insertion
    /// first. May contain duplicates; copies of one element are adjacent.
    #[must_use]
    pub fn query(&self, region: &Rect) -> Vec<&Element> {
        let region = region.normalized();
        let mut found = Vec::new();
        self.root.collect(&region, &mut found);
        found.extend(self.overflow.iter().filter(|e| e.bounds.intersects(&region)));
        found.sort_by_key(|e| e.seq);
        tracing::trace!(candidates = found.len(), "spatial query");
        found.into_iter().map(|e| &e.element).collect()
    }

    /// Elements whose world bounds contain `point`. May contain duplicates.
    #[must_use]
    pub fn query_point(&self, point: Point) -> Vec<&Element> {
        self.query(&Rect::new(point.x, point.y, 0.0, 0.0))
    }

    /// Elements whose center lies within `radius` of `center`. May contain duplicates.
    #[must_use]
    pub fn query_circle(&self, center: Point, radius: f64) -> Vec<&Element> {
        let square = Rect::new(center.x - radius, center.y - radius, 2.0 * radius, 2.0 * radius);
        let mut found = self.query(&square);
        found.retain(|e| distance(e.center(), center) <= radius);
        found
    }

    /// Drop everything and reset the root to an empty leaf.
    pub fn clear(&mut self) {
        self.root = SpatialNode::leaf(self.config.bounds.normalized(), 0);
        self.overflow.clear();
        self.next_seq = 0;
    }

    /// Clear, then insert every element.
    pub fn rebuild<'a, I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = &'a Element>,
    {
        self.clear();
        let mut count = 0_usize;
        for element in elements {
            self.insert(element);
            count += 1;
        }
        tracing::debug!(count, "rebuilt spatial index");
    }

    /// Number of distinct element ids stored.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut ids: HashSet<&str> = HashSet::new();
        self.root.for_each_entry(&mut |e| {
            ids.insert(e.element.id.as_str());
        });
        ids.extend(self.overflow.iter().map(|e| e.element.id.as_str()));
        ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walk the whole tree and summarize its shape.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            total_nodes: 0,
            total_elements: 0,
            max_depth_reached: 0,
            avg_elements_per_leaf: 0.0,
            overflow_elements: self.overflow.len(),
        };
        let mut leaves = 0_usize;
        self.root.accumulate_stats(&mut stats, &mut leaves);
        if leaves > 0 {
            #[allow(clippy::cast_precision_loss)]
            let avg = stats.total_elements as f64 / leaves as f64;
            stats.avg_elements_per_leaf = avg;
        }
        stats.total_elements += self.overflow.len();
        stats
    }
}

/// Drop repeated ids, keeping the first occurrence of each.
#[must_use]
pub fn dedup_by_id(elements: Vec<&Element>) -> Vec<&Element> {
    let mut seen: HashSet<&str> = HashSet::new();
    elements.into_iter().filter(|e| seen.insert(e.id.as_str())).collect()
}
