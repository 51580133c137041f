//! Quadtree spatial partitioning structure
//!
//! Divides a 2D playfield into hierarchical regions for fast broad-phase
//! queries. Each node subdivides into 4 quadrants once the number of objects
//! it holds reaches its capacity.
//!
//! The tree borrows the objects it indexes. It is meant to be built, queried
//! and dropped within a single simulation tick.

use crate::debug::draw::DebugSurface;
use crate::foundation::math::Vec4;
use crate::spatial::bounds::{Bounds, Collidable};
use log::trace;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where an object that overlaps several quadrants ends up once a node is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StraddlePolicy {
    /// Descend into the first quadrant (NE, NW, SE, SW order) whose bounds
    /// intersect the object.
    ///
    /// A query restricted to a sibling quadrant will miss the object even
    /// though its bounds overlap that sibling.
    #[default]
    FirstChild,

    /// Descend only into a quadrant that fully contains the object, otherwise
    /// keep it at the current node. Queries never miss an object stored this
    /// way as long as it lies inside the root bounds.
    KeepAtParent,
}

/// Reasons a [`QuadtreeConfig`] is rejected
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum QuadtreeConfigError {
    /// A node must be able to hold at least one object
    #[error("capacity must be at least 1")]
    ZeroCapacity,

    /// Minimum node size was negative, NaN or infinite
    #[error("min_node_size must be a non-negative number, got {0}")]
    InvalidMinNodeSize(f32),
}

/// Configuration for quadtree behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadtreeConfig {
    /// Maximum objects held directly by a node before it subdivides
    pub capacity: usize,

    /// Maximum subdivision depth (root is depth 0)
    pub max_depth: u32,

    /// Minimum quadrant size; a node whose quadrants would be smaller stops subdividing
    pub min_node_size: f32,

    /// Placement of objects overlapping several quadrants
    pub straddle_policy: StraddlePolicy,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            max_depth: 8,
            min_node_size: 0.0,
            straddle_policy: StraddlePolicy::FirstChild,
        }
    }
}

impl QuadtreeConfig {
    /// Default configuration with a different node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Set the maximum subdivision depth
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the straddling-object policy
    #[must_use]
    pub const fn with_straddle_policy(mut self, policy: StraddlePolicy) -> Self {
        self.straddle_policy = policy;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first [`QuadtreeConfigError`] found.
    pub fn validate(&self) -> Result<(), QuadtreeConfigError> {
        if self.capacity == 0 {
            return Err(QuadtreeConfigError::ZeroCapacity);
        }
        if !self.min_node_size.is_finite() || self.min_node_size < 0.0 {
            return Err(QuadtreeConfigError::InvalidMinNodeSize(self.min_node_size));
        }
        Ok(())
    }
}

/// One of the four children of a subdivided node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Right half, top half
    NorthEast = 0,
    /// Left half, top half
    NorthWest = 1,
    /// Right half, bottom half
    SouthEast = 2,
    /// Left half, bottom half
    SouthWest = 3,
}

impl Quadrant {
    /// All quadrants in insertion and traversal order
    pub const ALL: [Self; 4] = [Self::NorthEast, Self::NorthWest, Self::SouthEast, Self::SouthWest];

    /// Bounds of this quadrant within a parent region
    pub fn bounds_within(self, parent: &Bounds) -> Bounds {
        let half_w = parent.width() * 0.5;
        let half_h = parent.height() * 0.5;
        let (x, y) = match self {
            Self::NorthEast => (parent.x() + half_w, parent.y()),
            Self::NorthWest => (parent.x(), parent.y()),
            Self::SouthEast => (parent.x() + half_w, parent.y() + half_h),
            Self::SouthWest => (parent.x(), parent.y() + half_h),
        };
        Bounds::new_unchecked(x, y, half_w, half_h)
    }
}

/// Single node in the quadtree hierarchy
///
/// A node is a leaf until its first overflow, after which it owns exactly
/// four children. It may still hold objects of its own after subdividing
/// (objects inserted before the split, straddlers and depth-cap overflow).
#[derive(Debug)]
pub struct QuadtreeNode<'a, T: ?Sized> {
    /// World-space bounds of this node
    bounds: Bounds,

    config: QuadtreeConfig,

    /// Depth in the tree (0 = root)
    depth: u32,

    /// Objects held directly by this node, in insertion order
    objects: Vec<&'a T>,

    /// Child nodes in [`Quadrant::ALL`] order, None if this is a leaf
    children: Option<Box<[QuadtreeNode<'a, T>; 4]>>,
}

impl<'a, T: Collidable + ?Sized> QuadtreeNode<'a, T> {
    /// Create a new root leaf node
    pub fn new(bounds: Bounds, config: QuadtreeConfig) -> Self {
        Self::at_depth(bounds, config, 0)
    }

    /// Create a root leaf node with default settings and the given capacity
    pub fn with_capacity(bounds: Bounds, capacity: usize) -> Self {
        Self::new(bounds, QuadtreeConfig::with_capacity(capacity))
    }

    fn at_depth(bounds: Bounds, config: QuadtreeConfig, depth: u32) -> Self {
        Self {
            bounds,
            config,
            depth,
            objects: Vec::new(),
            children: None,
        }
    }

    /// Region covered by this node
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Node capacity before subdivision
    pub const fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Depth in the tree (0 = root)
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether this node has been split into quadrants
    pub const fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// Objects held directly by this node
    pub fn objects(&self) -> &[&'a T] {
        &self.objects
    }

    /// Child node for a quadrant, None while this node is a leaf
    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children.as_ref().map(|children| &children[quadrant as usize])
    }

    /// Quadrants must stay strictly larger than `min_node_size`, so a
    /// zero-area node never splits
    fn can_subdivide(&self) -> bool {
        self.depth < self.config.max_depth
            && self.bounds.width() * 0.5 > self.config.min_node_size
            && self.bounds.height() * 0.5 > self.config.min_node_size
    }

    /// Subdivide this node into 4 children
    fn subdivide(&mut self) {
        if self.children.is_some() {
            return; // Already subdivided
        }

        let parent = self.bounds;
        let config = self.config;
        let depth = self.depth + 1;
        self.children = Some(Box::new(
            Quadrant::ALL.map(|quadrant| Self::at_depth(quadrant.bounds_within(&parent), config, depth)),
        ));
    }

    /// Insert an object into this node or one of its descendants
    ///
    /// Returns false, leaving the node untouched, when the object's bounds do
    /// not intersect this node. Otherwise the object is stored somewhere in
    /// this subtree and true is returned.
    pub fn insert(&mut self, object: &'a T) -> bool {
        let object_bounds = object.bounds();
        self.insert_with_bounds(object, &object_bounds)
    }

    fn insert_with_bounds(&mut self, object: &'a T, object_bounds: &Bounds) -> bool {
        if !self.bounds.intersects(object_bounds) {
            return false;
        }

        if self.objects.len() < self.config.capacity {
            self.objects.push(object);
            return true;
        }

        if self.children.is_none() {
            if !self.can_subdivide() {
                trace!(
                    "Quadtree node at depth {} cannot subdivide, holding {} objects",
                    self.depth,
                    self.objects.len() + 1
                );
                self.objects.push(object);
                return true;
            }
            self.subdivide();
        }

        let policy = self.config.straddle_policy;
        if let Some(children) = self.children.as_mut() {
            match policy {
                StraddlePolicy::FirstChild => {
                    for child in children.iter_mut() {
                        if child.insert_with_bounds(object, object_bounds) {
                            return true;
                        }
                    }
                }
                StraddlePolicy::KeepAtParent => {
                    if let Some(child) = children
                        .iter_mut()
                        .find(|child| child.bounds.contains(object_bounds))
                    {
                        if child.insert_with_bounds(object, object_bounds) {
                            return true;
                        }
                    }
                }
            }
        }

        // No quadrant took it
        self.objects.push(object);
        true
    }

    /// Collect every object in this subtree whose bounds intersect `range`
    ///
    /// Results are appended to `results` without sorting or de-duplication.
    pub fn query(&self, range: &Bounds, results: &mut Vec<&'a T>) {
        if !self.bounds.intersects(range) {
            return;
        }

        results.extend(
            self.objects
                .iter()
                .copied()
                .filter(|object| object.bounds().intersects(range)),
        );

        if let Some(ref children) = self.children {
            for child in children.iter() {
                child.query(range, results);
            }
        }
    }

    /// Collect every object whose bounds contain the point, edges included
    ///
    /// A NaN or infinite coordinate matches nothing.
    pub fn query_point(&self, x: f32, y: f32, results: &mut Vec<&'a T>) {
        if let Ok(point) = Bounds::point(x, y) {
            self.query(&point, results);
        }
    }

    /// Drop all objects and children, turning this node back into an empty leaf
    pub fn clear(&mut self) {
        self.objects.clear();
        self.children = None;
    }

    /// Count objects in this node and all children
    pub fn len(&self) -> usize {
        let mut count = self.objects.len();

        if let Some(ref children) = self.children {
            for child in children.iter() {
                count += child.len();
            }
        }

        count
    }

    /// True when no object is stored anywhere in this subtree
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pre-order flattening: this node's objects, then each child's in quadrant order
    pub fn all_objects(&self, results: &mut Vec<&'a T>) {
        results.extend_from_slice(&self.objects);

        if let Some(ref children) = self.children {
            for child in children.iter() {
                child.all_objects(results);
            }
        }
    }

    /// Number of nodes in this subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(Self::node_count).sum())
    }

    /// Deepest node depth in this subtree
    pub fn max_depth_reached(&self) -> u32 {
        self.children.as_ref().map_or(self.depth, |children| {
            children
                .iter()
                .map(Self::max_depth_reached)
                .max()
                .unwrap_or(self.depth)
        })
    }

    /// Stroke the rectangle of every node in this subtree, pre-order
    pub fn draw(&self, surface: &mut dyn DebugSurface, color: Vec4) {
        surface.stroke_rect(&self.bounds, color);

        if let Some(ref children) = self.children {
            for child in children.iter() {
                child.draw(surface, color);
            }
        }
    }
}

/// Quadtree spatial partitioning structure
///
/// Thin owner of the root node, rebuilt from scratch every tick.
#[derive(Debug)]
pub struct Quadtree<'a, T: ?Sized> {
    /// Root node containing the entire playfield
    root: QuadtreeNode<'a, T>,
}

impl<'a, T: Collidable + ?Sized> Quadtree<'a, T> {
    /// Create a new quadtree covering the given bounds
    pub fn new(bounds: Bounds, config: QuadtreeConfig) -> Self {
        Self {
            root: QuadtreeNode::new(bounds, config),
        }
    }

    /// Root node (for inspection and visualization)
    pub const fn root(&self) -> &QuadtreeNode<'a, T> {
        &self.root
    }

    /// Bounds covered by the tree
    pub const fn bounds(&self) -> &Bounds {
        self.root.bounds()
    }

    /// Configuration the tree was built with
    pub const fn config(&self) -> &QuadtreeConfig {
        &self.root.config
    }

    /// Insert an object into the quadtree
    pub fn insert(&mut self, object: &'a T) -> bool {
        self.root.insert(object)
    }

    /// Insert every object from an iterator, returning how many were accepted
    pub fn insert_all<I>(&mut self, objects: I) -> usize
    where
        I: IntoIterator<Item = &'a T>,
    {
        objects.into_iter().filter(|&object| self.root.insert(object)).count()
    }

    /// Query all objects whose bounds intersect a range
    pub fn query(&self, range: &Bounds) -> Vec<&'a T> {
        let mut results = Vec::new();
        self.root.query(range, &mut results);
        results
    }

    /// Query all objects touching a point
    pub fn query_point(&self, x: f32, y: f32) -> Vec<&'a T> {
        let mut results = Vec::new();
        self.root.query_point(x, y, &mut results);
        results
    }

    /// Every stored object in pre-order
    pub fn all_objects(&self) -> Vec<&'a T> {
        let mut results = Vec::with_capacity(self.root.len());
        self.root.all_objects(&mut results);
        results
    }

    /// Get total object count
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// True when nothing has been inserted since construction or the last clear
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Deepest subdivision level currently in use
    pub fn max_depth_reached(&self) -> u32 {
        self.root.max_depth_reached()
    }

    /// Draw every node rectangle
    pub fn draw(&self, surface: &mut dyn DebugSurface, color: Vec4) {
        self.root.draw(surface, color);
    }

    /// Clear the quadtree
    pub fn clear(&mut self) {
        self.root.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::draw::DebugDrawList;

    fn root_bounds() -> Bounds {
        Bounds::new(0.0, 0.0, 100.0, 100.0).unwrap()
    }

    fn points(coords: &[(f32, f32)]) -> Vec<Bounds> {
        coords.iter().map(|&(x, y)| Bounds::point(x, y).unwrap()).collect()
    }

    #[test]
    fn test_quadrant_split() {
        let parent = root_bounds();
        let split: Vec<Bounds> = Quadrant::ALL.iter().map(|q| q.bounds_within(&parent)).collect();
        assert_eq!(split[0], Bounds::new(50.0, 0.0, 50.0, 50.0).unwrap());
        assert_eq!(split[1], Bounds::new(0.0, 0.0, 50.0, 50.0).unwrap());
        assert_eq!(split[2], Bounds::new(50.0, 50.0, 50.0, 50.0).unwrap());
        assert_eq!(split[3], Bounds::new(0.0, 50.0, 50.0, 50.0).unwrap());
    }

    #[test]
    fn test_quadtree_basic_insertion() {
        let objects = points(&[(10.0, 10.0)]);
        let mut tree = Quadtree::new(root_bounds(), QuadtreeConfig::default());
        assert!(tree.insert(&objects[0]));
        assert_eq!(tree.len(), 1);
        assert!(!tree.root().is_divided());
    }

    #[test]
    fn test_insert_outside_is_rejected() {
        let outside = Bounds::new(150.0, 150.0, 5.0, 5.0).unwrap();
        let mut node = QuadtreeNode::with_capacity(root_bounds(), 4);
        assert!(!node.insert(&outside));
        assert!(node.is_empty());
    }

    #[test]
    fn test_subdivides_once_on_overflow() {
        let objects = points(&[(10.0, 10.0), (60.0, 10.0), (10.0, 60.0), (60.0, 60.0), (70.0, 20.0)]);
        let mut node = QuadtreeNode::with_capacity(root_bounds(), 4);
        for object in &objects[..4] {
            assert!(node.insert(object));
        }
        assert!(!node.is_divided());

        assert!(node.insert(&objects[4]));
        assert!(node.is_divided());
        assert_eq!(node.objects().len(), 4);
        let ne = node.child(Quadrant::NorthEast).unwrap();
        assert_eq!(ne.objects().len(), 1);
        assert_eq!(ne.depth(), 1);
        assert_eq!(node.node_count(), 5);
    }

    #[test]
    fn test_first_child_policy_prefers_northeast() {
        // Touches all four quadrants at the center point
        let objects = points(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0), (50.0, 50.0)]);
        let mut node = QuadtreeNode::with_capacity(root_bounds(), 4);
        for object in &objects {
            assert!(node.insert(object));
        }
        assert_eq!(node.child(Quadrant::NorthEast).unwrap().objects().len(), 1);
        assert!(node.child(Quadrant::SouthWest).unwrap().is_empty());
    }

    #[test]
    fn test_keep_at_parent_policy() {
        let config = QuadtreeConfig::with_capacity(1).with_straddle_policy(StraddlePolicy::KeepAtParent);
        let objects = vec![
            Bounds::new(10.0, 10.0, 5.0, 5.0).unwrap(),
            Bounds::new(45.0, 45.0, 10.0, 10.0).unwrap(),
            Bounds::new(70.0, 70.0, 5.0, 5.0).unwrap(),
        ];
        let mut node = QuadtreeNode::new(root_bounds(), config);
        for object in &objects {
            assert!(node.insert(object));
        }
        assert_eq!(node.objects().len(), 2);
        assert_eq!(node.child(Quadrant::SouthEast).unwrap().objects().len(), 1);
    }

    #[test]
    fn test_depth_cap_keeps_overflow_in_leaf() {
        let objects: Vec<Bounds> = (0..100).map(|_| Bounds::point(33.0, 33.0).unwrap()).collect();
        let config = QuadtreeConfig::with_capacity(2).with_max_depth(3);
        let mut tree = Quadtree::new(root_bounds(), config);
        assert_eq!(tree.insert_all(&objects), 100);
        assert_eq!(tree.len(), 100);
        assert_eq!(tree.max_depth_reached(), 3);
        assert_eq!(tree.query_point(33.0, 33.0).len(), 100);
    }

    #[test]
    fn test_zero_depth_never_subdivides() {
        let objects = points(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let mut node = QuadtreeNode::new(root_bounds(), QuadtreeConfig::with_capacity(1).with_max_depth(0));
        for object in &objects {
            assert!(node.insert(object));
        }
        assert!(!node.is_divided());
        assert_eq!(node.objects().len(), 3);
    }

    #[test]
    fn test_min_node_size_stops_subdivision() {
        let config = QuadtreeConfig {
            capacity: 1,
            max_depth: 16,
            min_node_size: 30.0,
            straddle_policy: StraddlePolicy::FirstChild,
        };
        let objects: Vec<Bounds> = (0..10).map(|_| Bounds::point(5.0, 5.0).unwrap()).collect();
        let mut tree = Quadtree::new(root_bounds(), config);
        tree.insert_all(&objects);
        // 100 -> 50 is allowed, 50 -> 25 is below the minimum
        assert_eq!(tree.max_depth_reached(), 1);
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn test_query_prunes_and_filters() {
        let objects = points(&[(10.0, 10.0), (20.0, 20.0), (80.0, 80.0), (90.0, 10.0), (15.0, 85.0)]);
        let mut tree = Quadtree::new(root_bounds(), QuadtreeConfig::with_capacity(2));
        tree.insert_all(&objects);

        let found = tree.query(&Bounds::new(0.0, 0.0, 25.0, 25.0).unwrap());
        assert_eq!(found.len(), 2);
        assert!(tree.query(&Bounds::new(200.0, 200.0, 10.0, 10.0).unwrap()).is_empty());
    }

    #[test]
    fn test_query_point_on_edge() {
        let objects = vec![Bounds::new(10.0, 10.0, 10.0, 10.0).unwrap()];
        let mut tree = Quadtree::new(root_bounds(), QuadtreeConfig::default());
        tree.insert_all(&objects);
        assert_eq!(tree.query_point(20.0, 15.0).len(), 1);
        assert!(tree.query_point(20.5, 15.0).is_empty());
        assert!(tree.query_point(f32::NAN, 15.0).is_empty());
    }

    #[test]
    fn test_all_objects_pre_order() {
        let objects = points(&[(1.0, 1.0), (2.0, 2.0), (90.0, 90.0), (90.0, 5.0)]);
        let mut tree = Quadtree::new(root_bounds(), QuadtreeConfig::with_capacity(2));
        tree.insert_all(&objects);

        // Root keeps the first two, then NE (90,5) before SE (90,90)
        let all = tree.all_objects();
        assert_eq!(all, vec![&objects[0], &objects[1], &objects[3], &objects[2]]);
    }

    #[test]
    fn test_clear_resets_to_leaf() {
        let objects = points(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let mut tree = Quadtree::new(root_bounds(), QuadtreeConfig::with_capacity(1));
        tree.insert_all(&objects);
        assert!(tree.root().is_divided());

        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.root().is_divided());
        assert_eq!(tree.node_count(), 1);
        assert!(tree.all_objects().is_empty());
    }

    #[test]
    fn test_draw_visits_every_node() {
        let objects = points(&[(1.0, 1.0), (2.0, 2.0)]);
        let mut tree = Quadtree::new(root_bounds(), QuadtreeConfig::with_capacity(1));
        tree.insert_all(&objects);

        let mut surface = DebugDrawList::new();
        tree.draw(&mut surface, Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(surface.len(), tree.node_count());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_config_validation() {
        assert!(QuadtreeConfig::default().validate().is_ok());
        assert_eq!(QuadtreeConfig::with_capacity(0).validate(), Err(QuadtreeConfigError::ZeroCapacity));
        let config = QuadtreeConfig {
            min_node_size: -1.0,
            ..QuadtreeConfig::default()
        };
        assert_eq!(config.validate(), Err(QuadtreeConfigError::InvalidMinNodeSize(-1.0)));
    }

    #[test]
    fn test_degenerate_node_never_subdivides() {
        // Zero-width strip: halving it would produce zero-area quadrants
        let strip = Bounds::new(10.0, 0.0, 0.0, 100.0).unwrap();
        let objects = points(&[(10.0, 5.0), (10.0, 20.0), (10.0, 40.0), (10.0, 80.0)]);
        let mut node = QuadtreeNode::new(strip, QuadtreeConfig::with_capacity(1));
        for object in &objects {
            assert!(node.insert(object));
        }
        assert!(!node.is_divided());
        assert_eq!(node.node_count(), 1);
        assert_eq!(node.objects().len(), 4);

        // Same for a single point
        let mut dot = QuadtreeNode::new(Bounds::point(10.0, 5.0).unwrap(), QuadtreeConfig::with_capacity(1));
        assert!(dot.insert(&objects[0]));
        assert!(dot.insert(&objects[0]));
        assert_eq!(dot.max_depth_reached(), 0);
    }
}
