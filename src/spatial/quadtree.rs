use std::ptr;

use bumpalo::Bump;
use log::trace;

use crate::collections::PersistentList;
use crate::models::BoundingBox;
use crate::utils::DEFAULT_QUADTREE_LIMITS;

/// Anything that can be placed in a [`QuadTree`].
pub trait Bounded {
    fn bounding_box(&self) -> BoundingBox;
}

/// Controls when quadtree leaves split.
///
/// A leaf holding `capacity` items splits on the next insertion, unless it
/// already sits at `max_depth`, in which case it keeps growing. The depth
/// bound stops the recursion when more than `capacity` boxes overlap a single
/// point and no amount of splitting can separate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadTreeLimits {
    pub capacity: usize,
    pub max_depth: usize,
}

impl Default for QuadTreeLimits {
    fn default() -> Self {
        DEFAULT_QUADTREE_LIMITS
    }
}

/// Quadtree node, using arena allocation.
///
/// Items are stored by reference in every leaf whose region their bounding box
/// intersects, so an item lying across a midline appears in several leaves.
/// Nodes are never modified: inserting returns a new node and shares every
/// untouched subtree with the old one.
///
/// The lifetime parameter `'a` is tied to the arena allocator's lifetime.
#[derive(Debug)]
pub enum QuadTree<'a, T> {
    /// A region holding its items directly.
    Leaf {
        bounds: BoundingBox,
        items: PersistentList<'a, T>,
    },
    /// A region split in four, children ordered like [`crate::models::Quadrant::ALL`].
    Internal {
        bounds: BoundingBox,
        children: [&'a QuadTree<'a, T>; 4],
    },
}

impl<T> Clone for QuadTree<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for QuadTree<'_, T> {}

impl<'a, T: Bounded> QuadTree<'a, T> {
    /// Creates an empty leaf covering `bounds`.
    pub fn leaf(bounds: BoundingBox) -> Self {
        QuadTree::Leaf {
            bounds,
            items: PersistentList::empty(),
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        match self {
            QuadTree::Leaf { bounds, .. } => *bounds,
            QuadTree::Internal { bounds, .. } => *bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, QuadTree::Leaf { .. })
    }

    /// Returns a tree containing `object` in addition to everything in `self`,
    /// treating `self` as a root.
    ///
    /// An object whose box misses this node's region is not stored.
    pub fn add(&self, arena: &'a Bump, limits: QuadTreeLimits, object: &'a T) -> QuadTree<'a, T> {
        self.add_at(arena, limits, object, 0)
    }

    fn add_at(
        &self,
        arena: &'a Bump,
        limits: QuadTreeLimits,
        object: &'a T,
        depth: usize,
    ) -> QuadTree<'a, T> {
        let object_box = object.bounding_box();
        if !object_box.intersects(&self.bounds()) {
            return *self;
        }
        match self {
            QuadTree::Leaf { bounds, items } => {
                if items.size() < limits.capacity || depth >= limits.max_depth {
                    return QuadTree::Leaf {
                        bounds: *bounds,
                        items: items.prepend(arena, object),
                    };
                }
                trace!("splitting leaf {:?} holding {} items at depth {}", bounds, items.size(), depth);
                let mut node = QuadTree::split(arena, *bounds);
                for o in items.prepend(arena, object) {
                    node = node.add_at(arena, limits, o, depth);
                }
                node
            }
            QuadTree::Internal { bounds, children } => {
                let mut updated = *children;
                for (slot, child) in updated.iter_mut().zip(children.iter()) {
                    if object_box.intersects(&child.bounds()) {
                        *slot = &*arena.alloc(child.add_at(arena, limits, object, depth + 1));
                    }
                }
                QuadTree::Internal {
                    bounds: *bounds,
                    children: updated,
                }
            }
        }
    }

    /// An internal node over `bounds` with four empty leaves.
    fn split(arena: &'a Bump, bounds: BoundingBox) -> QuadTree<'a, T> {
        let children = bounds
            .quadrants()
            .map(|quarter| &*arena.alloc(QuadTree::leaf(quarter)));
        QuadTree::Internal { bounds, children }
    }

    /// Prepends to `acc` every stored item whose box overlaps `object`'s box,
    /// skipping `object` itself and items `acc` already holds.
    pub fn intersecting(
        &self,
        arena: &'a Bump,
        object: &T,
        acc: PersistentList<'a, T>,
    ) -> PersistentList<'a, T> {
        let object_box = object.bounding_box();
        self.collect(arena, object, &object_box, acc)
    }

    fn collect(
        &self,
        arena: &'a Bump,
        object: &T,
        object_box: &BoundingBox,
        mut acc: PersistentList<'a, T>,
    ) -> PersistentList<'a, T> {
        match self {
            QuadTree::Leaf { bounds, items } => {
                if object_box.intersects(bounds) {
                    for o in items.iter() {
                        if !ptr::eq(o, object)
                            && o.bounding_box().intersects(object_box)
                            && !acc.contains(o)
                        {
                            acc = acc.prepend(arena, o);
                        }
                    }
                }
                acc
            }
            QuadTree::Internal { children, .. } => {
                for child in children.iter() {
                    if object_box.intersects(&child.bounds()) {
                        acc = child.collect(arena, object, object_box, acc);
                    }
                }
                acc
            }
        }
    }

    /// Number of stored entries, counting an item once per leaf holding it.
    pub fn stored_count(&self) -> usize {
        match self {
            QuadTree::Leaf { items, .. } => items.size(),
            QuadTree::Internal { children, .. } => children.iter().map(|c| c.stored_count()).sum(),
        }
    }

    /// Number of internal levels above the deepest leaf. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            QuadTree::Leaf { .. } => 0,
            QuadTree::Internal { children, .. } => {
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }

    /// Calls `visit` with the region of every leaf, depth first.
    pub fn visit_leaf_regions<F: FnMut(BoundingBox)>(&self, visit: &mut F) {
        match self {
            QuadTree::Leaf { bounds, .. } => visit(*bounds),
            QuadTree::Internal { children, .. } => {
                for child in children.iter() {
                    child.visit_leaf_regions(visit);
                }
            }
        }
    }
}

/// A quadtree together with the arena its nodes are allocated in.
///
/// # Examples
///
/// ```
/// use rs_asteroids::models::{BoundingBox, Vector2D};
/// use rs_asteroids::spatial::{Bounded, SpatialIndex};
/// use bumpalo::Bump;
///
/// struct Dot(Vector2D);
///
/// impl Bounded for Dot {
///     fn bounding_box(&self) -> BoundingBox {
///         BoundingBox::around(self.0, 0.5).unwrap()
///     }
/// }
///
/// let dots = [Dot(Vector2D::new(1.0, 1.0)), Dot(Vector2D::new(1.4, 1.2)), Dot(Vector2D::new(8.0, 8.0))];
/// let domain = BoundingBox::new(0.0, 10.0, 10.0, 0.0).unwrap();
///
/// let arena = Bump::new();
/// let index = SpatialIndex::build(&arena, domain, Default::default(), dots.iter());
///
/// let near_first = index.neighbours(&dots[0]);
/// assert_eq!(near_first.size(), 1);
/// assert!(near_first.contains(&dots[1]));
/// assert!(index.neighbours(&dots[2]).is_empty());
/// ```
pub struct SpatialIndex<'a, T> {
    arena: &'a Bump,
    limits: QuadTreeLimits,
    root: QuadTree<'a, T>,
}

impl<'a, T: Bounded> SpatialIndex<'a, T> {
    /// Creates an index over `bounds` whose root is a single empty leaf.
    pub fn new(arena: &'a Bump, bounds: BoundingBox) -> Self {
        SpatialIndex::with_limits(arena, bounds, QuadTreeLimits::default())
    }

    pub fn with_limits(arena: &'a Bump, bounds: BoundingBox, limits: QuadTreeLimits) -> Self {
        SpatialIndex {
            arena,
            limits,
            root: QuadTree::leaf(bounds),
        }
    }

    /// Builds an index over `bounds` by inserting every object in turn.
    pub fn build<I>(arena: &'a Bump, bounds: BoundingBox, limits: QuadTreeLimits, objects: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
    {
        let mut index = SpatialIndex::with_limits(arena, bounds, limits);
        for object in objects {
            index.insert(object);
        }
        index
    }

    pub fn insert(&mut self, object: &'a T) {
        self.root = self.root.add(self.arena, self.limits, object);
    }

    /// Every stored object whose box overlaps `object`'s box, minus `object`
    /// itself and anything already in `acc`, prepended to `acc`.
    pub fn intersecting(&self, object: &T, acc: PersistentList<'a, T>) -> PersistentList<'a, T> {
        self.root.intersecting(self.arena, object, acc)
    }

    /// Shorthand for [`SpatialIndex::intersecting`] with an empty accumulator.
    pub fn neighbours(&self, object: &T) -> PersistentList<'a, T> {
        self.intersecting(object, PersistentList::empty())
    }

    pub fn root(&self) -> &QuadTree<'a, T> {
        &self.root
    }

    pub fn bounds(&self) -> BoundingBox {
        self.root.bounds()
    }

    pub fn limits(&self) -> QuadTreeLimits {
        self.limits
    }

    pub fn stored_count(&self) -> usize {
        self.root.stored_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Region boundaries of every leaf, for drawing the partition.
    pub fn leaf_regions(&self) -> Vec<BoundingBox> {
        let mut regions = Vec::new();
        self.root.visit_leaf_regions(&mut |bounds| regions.push(bounds));
        regions
    }
}
