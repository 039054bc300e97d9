//! Curtain wall synthesis
//!
//! The wall ring is the circumference of the walled parcels: every parcel
//! edge whose reverse does not belong to another walled parcel, chained
//! into the longest closed cycle. Gates are picked from vertices where at
//! least two walled parcels meet, consuming neighboring candidates so two
//! gates never sit on adjacent wall vertices. For a real (visible) wall
//! each gate also carves an approach road through the outer parcel behind
//! it by splitting that parcel in two.
//!
//! A non-real wall still runs the same synthesis: the ring and its gates
//! define the city boundary and street entry points even when no wall is
//! drawn.

use glam::DVec2;

use crate::error::{Result, TownError};
use crate::plan::{Patch, PlanPolygon, VertexArena, VertexId};
use crate::rng::TownRng;

/// A city or castle wall with its gates and towers
#[derive(Debug, Clone)]
pub struct CurtainWall {
    /// Whether the wall physically exists (affects smoothing, gate
    /// carving, towers and building insets)
    pub real: bool,
    /// Indices of the enclosed parcels
    pub patch_indices: Vec<usize>,
    /// The wall ring
    pub shape: PlanPolygon,
    /// Per-edge flag: true where the wall actually stands
    pub segments: Vec<bool>,
    /// Gate vertices, shared with the adjoining parcels
    pub gates: Vec<VertexId>,
    /// Tower vertices, filled by [`CurtainWall::build_towers`]
    pub towers: Vec<VertexId>,
}

impl CurtainWall {
    /// Synthesize a wall around the given parcels
    ///
    /// `reserved` vertices (a citadel's corners) are exempt from smoothing
    /// and can never become gates. Gate carving may split outer parcels,
    /// which appends to and rewrites entries of `patches` past the walled
    /// ones.
    pub fn new(
        real: bool,
        arena: &mut VertexArena,
        patches: &mut Vec<Patch>,
        patch_indices: Vec<usize>,
        reserved: &[VertexId],
        rng: &mut TownRng,
    ) -> Result<CurtainWall> {
        let shape = if patch_indices.len() == 1 {
            patches[patch_indices[0]].shape.clone()
        } else {
            let ring = find_circumference(patches, &patch_indices);
            if real {
                // Sequential in-place smoothing: later vertices see their
                // already-moved neighbors
                let f = (40.0 / patch_indices.len() as f64).min(1.0);
                for &id in &ring.ids {
                    if !reserved.contains(&id) {
                        let p = ring.smooth_vertex(arena, id, f);
                        arena.set(id, p);
                    }
                }
            }
            ring
        };

        let mut wall = CurtainWall {
            real,
            patch_indices,
            segments: vec![true; shape.len()],
            shape,
            gates: Vec::new(),
            towers: Vec::new(),
        };
        wall.build_gates(arena, patches, reserved, rng)?;
        Ok(wall)
    }

    fn build_gates(
        &mut self,
        arena: &mut VertexArena,
        patches: &mut Vec<Patch>,
        reserved: &[VertexId],
        rng: &mut TownRng,
    ) -> Result<()> {
        let mut entrances: Vec<VertexId> = if self.patch_indices.len() > 1 {
            self.shape
                .ids
                .iter()
                .copied()
                .filter(|&v| {
                    !reserved.contains(&v)
                        && self
                            .patch_indices
                            .iter()
                            .filter(|&&pi| patches[pi].shape.contains(v))
                            .count()
                            > 1
                })
                .collect()
        } else {
            self.shape
                .ids
                .iter()
                .copied()
                .filter(|v| !reserved.contains(v))
                .collect()
        };

        if entrances.is_empty() {
            return Err(TownError::BadWalledShape);
        }

        // Too few candidates to space gates out: take them all
        if entrances.len() < 3 {
            self.gates = entrances;
            self.smooth_gates(arena);
            return Ok(());
        }

        while entrances.len() >= 3 {
            let index = rng.next_index(entrances.len());
            let gate = entrances[index];
            self.gates.push(gate);

            if self.real {
                self.carve_gate_road(gate, arena, patches, reserved);
            }

            // Consume the gate and its neighbors so gates stay spaced
            if index == 0 {
                entrances.drain(0..2);
                entrances.pop();
            } else if index == entrances.len() - 1 {
                entrances.drain(index - 1..=index);
                if !entrances.is_empty() {
                    entrances.remove(0);
                }
            } else {
                entrances.drain(index - 1..=index + 1);
            }
        }

        if self.gates.is_empty() {
            match entrances.first() {
                Some(&v) => self.gates.push(v),
                None => return Err(TownError::BadWalledShape),
            }
        }

        self.smooth_gates(arena);
        Ok(())
    }

    /// Split the single outer parcel behind a gate so a road can leave it
    fn carve_gate_road(
        &self,
        gate: VertexId,
        arena: &VertexArena,
        patches: &mut Vec<Patch>,
        reserved: &[VertexId],
    ) {
        let outer: Vec<usize> = (0..patches.len())
            .filter(|&i| !self.patch_indices.contains(&i) && patches[i].shape.contains(gate))
            .collect();
        if outer.len() != 1 {
            return;
        }
        let oi = outer[0];
        // Castle gates can face city parcels; only countryside is carved
        if patches[oi].within_city || patches[oi].shape.len() <= 3 {
            return;
        }
        let (next, prev) = match (self.shape.next(gate), self.shape.prev(gate)) {
            (Some(n), Some(p)) => (n, p),
            _ => return,
        };
        let wall = arena.pos(next) - arena.pos(prev);
        let out = DVec2::new(wall.y, -wall.x);
        let gate_pos = arena.pos(gate);

        // The outer vertex most aligned with the outward direction, ignoring
        // wall and citadel vertices
        let mut farthest: Option<(VertexId, f64)> = None;
        for &v in &patches[oi].shape.ids {
            if self.shape.contains(v) || reserved.contains(&v) {
                continue;
            }
            let d = arena.pos(v) - gate_pos;
            let len = d.length();
            if len <= 0.0 {
                continue;
            }
            let score = d.dot(out) / len;
            if farthest.map_or(true, |(_, s)| score > s) {
                farthest = Some((v, score));
            }
        }
        let farthest = match farthest {
            Some((v, _)) => v,
            None => return,
        };

        let halves = patches[oi].shape.split(gate, farthest);
        if halves.len() != 2 {
            return;
        }
        // Outer parcels always sit past the walled ones in the patch list,
        // so this rewrite cannot shift walled indices
        debug_assert!(self.patch_indices.iter().all(|&pi| pi < oi));
        patches[oi] = Patch::new(halves[0].clone());
        patches.insert(oi + 1, Patch::new(halves[1].clone()));
    }

    fn smooth_gates(&self, arena: &mut VertexArena) {
        if !self.real {
            return;
        }
        for &gate in &self.gates {
            if self.shape.contains(gate) {
                let p = self.shape.smooth_vertex(arena, gate, 1.0);
                arena.set(gate, p);
            }
        }
    }

    /// Place towers on every non-gate vertex with a standing wall segment
    pub fn build_towers(&mut self) {
        self.towers.clear();
        if !self.real {
            return;
        }
        let n = self.shape.len();
        for (i, &v) in self.shape.ids.iter().enumerate() {
            if !self.gates.contains(&v) && (self.segments[(i + n - 1) % n] || self.segments[i]) {
                self.towers.push(v);
            }
        }
    }

    /// Farthest wall vertex from the origin
    pub fn radius(&self, arena: &VertexArena) -> f64 {
        self.shape
            .ids
            .iter()
            .map(|&v| arena.pos(v).length())
            .fold(0.0, f64::max)
    }

    /// Whether a standing wall segment runs along the parcel edge `v0 -> v1`
    ///
    /// Walled parcels traverse the ring forwards, outer parcels backwards.
    pub fn borders_by(&self, patch_index: usize, v0: VertexId, v1: VertexId) -> bool {
        let index = if self.patch_indices.contains(&patch_index) {
            self.shape.find_edge(v0, v1)
        } else {
            self.shape.find_edge(v1, v0)
        };
        matches!(index, Some(i) if self.segments[i])
    }

    /// Whether any standing wall segment touches the parcel
    pub fn borders(&self, patch: &Patch, patch_index: usize) -> bool {
        let within = self.patch_indices.contains(&patch_index);
        let n = self.shape.len();
        for i in 0..n {
            if !self.segments[i] {
                continue;
            }
            let v0 = self.shape.ids[i];
            let v1 = self.shape.ids[(i + 1) % n];
            let hit = if within {
                patch.shape.find_edge(v0, v1)
            } else {
                patch.shape.find_edge(v1, v0)
            };
            if hit.is_some() {
                return true;
            }
        }
        false
    }
}

/// Outer boundary of a set of parcels as one closed ring
///
/// Collects every directed parcel edge whose reverse belongs to no other
/// parcel in the set, then chains edges end to start and keeps the longest
/// closed cycle. A single parcel's ring is its own shape.
pub fn find_circumference(patches: &[Patch], indices: &[usize]) -> PlanPolygon {
    match indices {
        [] => return PlanPolygon::default(),
        [single] => return patches[*single].shape.clone(),
        _ => {}
    }

    let mut heads: Vec<VertexId> = Vec::new();
    let mut tails: Vec<VertexId> = Vec::new();
    for &pi in indices {
        let shape = &patches[pi].shape;
        let n = shape.len();
        for i in 0..n {
            let a = shape.ids[i];
            let b = shape.ids[(i + 1) % n];
            let interior = indices
                .iter()
                .any(|&pj| pj != pi && patches[pj].shape.find_edge(b, a).is_some());
            if !interior {
                heads.push(a);
                tails.push(b);
            }
        }
    }
    if heads.is_empty() {
        return PlanPolygon::default();
    }

    let n = heads.len();
    let mut visited = vec![false; n];
    let mut best: Vec<VertexId> = Vec::new();
    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut cycle: Vec<VertexId> = Vec::new();
        let mut cur = start;
        loop {
            if visited[cur] {
                break;
            }
            visited[cur] = true;
            cycle.push(heads[cur]);
            match (0..n).find(|&i| heads[i] == tails[cur] && !visited[i]) {
                Some(next) => cur = next,
                None => break,
            }
            if cur == start || heads[cur] == heads[start] {
                break;
            }
        }
        if cycle.len() > best.len() {
            best = cycle;
        }
    }
    PlanPolygon::new(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_patch(shape: PlanPolygon) -> Patch {
        let mut p = Patch::new(shape);
        p.within_city = true;
        p
    }

    /// Two unit squares side by side
    fn twin_squares() -> (VertexArena, Vec<Patch>) {
        let mut arena = VertexArena::new();
        let v: Vec<VertexId> = [
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (2.0, 0.0),
            (2.0, 1.0),
        ]
        .iter()
        .map(|&(x, y)| arena.insert(DVec2::new(x, y)))
        .collect();
        let left = city_patch(PlanPolygon::new(vec![v[0], v[1], v[2], v[3]]));
        let right = city_patch(PlanPolygon::new(vec![v[1], v[4], v[5], v[2]]));
        (arena, vec![left, right])
    }

    #[test]
    fn test_circumference_of_two_squares() {
        let (_, patches) = twin_squares();
        let ring = find_circumference(&patches, &[0, 1]);
        // The shared edge disappears: 6 boundary vertices remain
        assert_eq!(ring.len(), 6);
        // The shared corners are still on the ring
        assert!(ring.contains(patches[0].shape.ids[1]));
        assert!(ring.contains(patches[0].shape.ids[2]));
    }

    #[test]
    fn test_circumference_single_patch_copies_shape() {
        let (_, patches) = twin_squares();
        let ring = find_circumference(&patches, &[0]);
        assert_eq!(ring, patches[0].shape);
    }

    #[test]
    fn test_gates_on_shared_corners() {
        let (mut arena, mut patches) = twin_squares();
        let shared = [patches[0].shape.ids[1], patches[0].shape.ids[2]];
        let mut rng = TownRng::new(5);
        let wall = CurtainWall::new(false, &mut arena, &mut patches, vec![0, 1], &[], &mut rng)
            .unwrap();
        // Only vertices on both parcels qualify as entrances
        assert!(!wall.gates.is_empty());
        for g in &wall.gates {
            assert!(shared.contains(g));
        }
    }

    #[test]
    fn test_single_patch_wall() {
        let (mut arena, mut patches) = twin_squares();
        let mut rng = TownRng::new(1);
        let wall =
            CurtainWall::new(true, &mut arena, &mut patches, vec![0], &[], &mut rng).unwrap();
        assert_eq!(wall.shape.len(), 4);
        assert!(!wall.gates.is_empty());
        for g in &wall.gates {
            assert!(wall.shape.contains(*g));
        }
    }

    #[test]
    fn test_reserved_vertices_never_gates() {
        let (mut arena, mut patches) = twin_squares();
        let reserved: Vec<VertexId> = patches[0].shape.ids.clone();
        let mut rng = TownRng::new(2);
        // Single-parcel wall with the first three corners reserved
        let wall = CurtainWall::new(
            false,
            &mut arena,
            &mut patches,
            vec![0],
            &reserved[..3],
            &mut rng,
        )
        .unwrap();
        for g in &wall.gates {
            assert!(!reserved[..3].contains(g));
        }
    }

    #[test]
    fn test_all_reserved_fails() {
        let (mut arena, mut patches) = twin_squares();
        let reserved: Vec<VertexId> = patches[0].shape.ids.clone();
        let mut rng = TownRng::new(3);
        let result = CurtainWall::new(
            false,
            &mut arena,
            &mut patches,
            vec![0],
            &reserved,
            &mut rng,
        );
        assert_eq!(result.unwrap_err(), TownError::BadWalledShape);
    }

    #[test]
    fn test_towers_skip_gates() {
        let (mut arena, mut patches) = twin_squares();
        let mut rng = TownRng::new(4);
        let mut wall =
            CurtainWall::new(true, &mut arena, &mut patches, vec![0], &[], &mut rng).unwrap();
        wall.build_towers();
        assert_eq!(wall.towers.len() + wall.gates.len(), wall.shape.len());
        for t in &wall.towers {
            assert!(!wall.gates.contains(t));
        }
    }

    #[test]
    fn test_fake_wall_has_no_towers() {
        let (mut arena, mut patches) = twin_squares();
        let mut rng = TownRng::new(4);
        let mut wall =
            CurtainWall::new(false, &mut arena, &mut patches, vec![0], &[], &mut rng).unwrap();
        wall.build_towers();
        assert!(wall.towers.is_empty());
    }

    #[test]
    fn test_radius() {
        let (mut arena, mut patches) = twin_squares();
        let mut rng = TownRng::new(6);
        let wall = CurtainWall::new(false, &mut arena, &mut patches, vec![0, 1], &[], &mut rng)
            .unwrap();
        // Farthest ring vertex is (2, 1)
        assert!((wall.radius(&arena) - 5.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_borders_by_direction() {
        let (mut arena, mut patches) = twin_squares();
        let ids = patches[0].shape.ids.clone();
        let mut rng = TownRng::new(7);
        let wall =
            CurtainWall::new(false, &mut arena, &mut patches, vec![0], &[], &mut rng).unwrap();
        // Member parcel matches the ring forwards
        assert!(wall.borders_by(0, ids[0], ids[1]));
        // Outer parcel sees the same edge reversed
        assert!(wall.borders_by(1, ids[2], ids[1]));
        assert!(!wall.borders_by(1, ids[1], ids[2]));
    }
}
