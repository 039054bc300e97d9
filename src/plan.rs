//! Shared-vertex town plan
//!
//! Parcels in the plan do not own their corners. Every corner lives once in
//! a [`VertexArena`] and parcels reference it by [`VertexId`], so moving a
//! vertex (junction merging, wall smoothing, street smoothing) updates every
//! parcel that touches it with a single `set`. Identity questions ("is this
//! corner a gate?") are id comparisons, immune to float drift.
//!
//! [`PlanPolygon`] is the id-based ring used for parcels, walls and street
//! topology; the value-semantics [`Polygon`] is produced on demand for
//! metric work and building generation.

use glam::DVec2;

use crate::geometry::Polygon;
use crate::wards::Ward;

/// Stable handle to a shared plan vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

/// Storage for all shared plan vertices
#[derive(Debug, Clone, Default)]
pub struct VertexArena {
    positions: Vec<DVec2>,
}

impl VertexArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and get its handle
    pub fn insert(&mut self, p: DVec2) -> VertexId {
        self.positions.push(p);
        VertexId(self.positions.len() - 1)
    }

    /// Current position of a vertex
    #[inline]
    pub fn pos(&self, id: VertexId) -> DVec2 {
        self.positions[id.0]
    }

    /// Move a vertex; every parcel referencing it sees the new position
    #[inline]
    pub fn set(&mut self, id: VertexId, p: DVec2) {
        self.positions[id.0] = p;
    }

    /// Number of stored vertices
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A closed ring of shared vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanPolygon {
    /// Vertex handles in ring order
    pub ids: Vec<VertexId>,
}

impl PlanPolygon {
    pub fn new(ids: Vec<VertexId>) -> Self {
        Self { ids }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether the ring references this vertex
    #[inline]
    pub fn contains(&self, id: VertexId) -> bool {
        self.ids.contains(&id)
    }

    /// Ring index of a vertex
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.ids.iter().position(|&v| v == id)
    }

    /// Successor of a vertex in the ring
    pub fn next(&self, id: VertexId) -> Option<VertexId> {
        self.index_of(id).map(|i| self.ids[(i + 1) % self.len()])
    }

    /// Predecessor of a vertex in the ring
    pub fn prev(&self, id: VertexId) -> Option<VertexId> {
        self.index_of(id)
            .map(|i| self.ids[(i + self.len() - 1) % self.len()])
    }

    /// Index of the directed edge `a -> b`, if present
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<usize> {
        let i = self.index_of(a)?;
        if self.ids[(i + 1) % self.len()] == b {
            Some(i)
        } else {
            None
        }
    }

    /// Whether two rings share an edge in either direction
    pub fn borders(&self, other: &PlanPolygon) -> bool {
        let len2 = other.len();
        if len2 == 0 {
            return false;
        }
        for (i, &v) in self.ids.iter().enumerate() {
            if let Some(j) = other.index_of(v) {
                let next = self.ids[(i + 1) % self.len()];
                if next == other.ids[(j + 1) % len2] || next == other.ids[(j + len2 - 1) % len2] {
                    return true;
                }
            }
        }
        false
    }

    /// Split the ring into two arcs at two member vertices
    ///
    /// Both arcs include the split vertices; no vertices are created.
    /// Returns a single-element clone when either vertex is missing.
    pub fn split(&self, a: VertexId, b: VertexId) -> Vec<PlanPolygon> {
        let (i1, i2) = match (self.index_of(a), self.index_of(b)) {
            (Some(i1), Some(i2)) => (i1, i2),
            _ => return vec![self.clone()],
        };
        let (i1, i2) = if i1 > i2 { (i2, i1) } else { (i1, i2) };
        let mut wrap = self.ids[i2..].to_vec();
        wrap.extend_from_slice(&self.ids[..=i1]);
        vec![PlanPolygon::new(self.ids[i1..=i2].to_vec()), PlanPolygon::new(wrap)]
    }

    /// Drop consecutive duplicate handles (including the wrap-around pair)
    pub fn dedupe(&mut self) {
        let mut i = 0;
        while self.ids.len() > 1 && i < self.ids.len() {
            if self.ids[i] == self.ids[(i + 1) % self.ids.len()] {
                self.ids.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Replace every occurrence of one handle with another
    pub fn replace(&mut self, old: VertexId, new: VertexId) {
        for id in &mut self.ids {
            if *id == old {
                *id = new;
            }
        }
    }

    /// Materialize the ring as a value polygon
    pub fn to_polygon(&self, arena: &VertexArena) -> Polygon {
        Polygon::new(self.ids.iter().map(|&id| arena.pos(id)).collect())
    }

    /// Smoothed position of one vertex (weighted average with ring neighbors)
    pub fn smooth_vertex(&self, arena: &VertexArena, id: VertexId, f: f64) -> DVec2 {
        match (self.prev(id), self.next(id)) {
            (Some(p), Some(n)) => {
                (arena.pos(p) + arena.pos(id) * f + arena.pos(n)) / (2.0 + f)
            }
            _ => arena.pos(id),
        }
    }

    /// Member vertex minimizing a key over positions
    pub fn min_by_key<F: Fn(DVec2) -> f64>(&self, arena: &VertexArena, key: F) -> Option<VertexId> {
        self.ids
            .iter()
            .copied()
            .min_by(|&a, &b| key(arena.pos(a)).total_cmp(&key(arena.pos(b))))
    }

    /// Member vertex maximizing a key over positions
    pub fn max_by_key<F: Fn(DVec2) -> f64>(&self, arena: &VertexArena, key: F) -> Option<VertexId> {
        self.ids
            .iter()
            .copied()
            .max_by(|&a, &b| key(arena.pos(a)).total_cmp(&key(arena.pos(b))))
    }
}

/// One parcel of the town plan
#[derive(Debug, Clone)]
pub struct Patch {
    /// Parcel boundary, sharing corners with its neighbors
    pub shape: PlanPolygon,
    /// Inside the town proper (as opposed to countryside)
    pub within_city: bool,
    /// Inside the curtain wall
    pub within_walls: bool,
    /// Assigned district, filled in late in the pipeline
    pub ward: Option<Ward>,
}

impl Patch {
    pub fn new(shape: PlanPolygon) -> Self {
        Self {
            shape,
            within_city: false,
            within_walls: false,
            ward: None,
        }
    }

    /// Parcel area
    pub fn area(&self, arena: &VertexArena) -> f64 {
        self.shape.to_polygon(arena).area()
    }
}
