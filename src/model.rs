//! Town generation pipeline
//!
//! [`Model::generate`] runs the whole pipeline for a configuration:
//! tessellate parcels, merge close junctions, raise the wall and citadel,
//! route streets and roads, assign districts and generate buildings. Any
//! stage can reject an unlucky layout; the retry loop then derives a fresh
//! seed and starts the attempt over from scratch, so a returned model is
//! always complete and internally consistent.

use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use glam::DVec2;

use crate::config::TownConfig;
use crate::error::{Result, TownError};
use crate::geometry::with_length;
use crate::plan::{Patch, PlanPolygon, VertexArena, VertexId};
use crate::rng::TownRng;
use crate::topology::Topology;
use crate::voronoi::Voronoi;
use crate::wall::CurtainWall;
use crate::wards::{self, Ward, WardKind};

/// Junction closer than this is merged into a single vertex
const MIN_JUNCTION_DISTANCE: f64 = 8.0;

/// Citadel parcels less compact than this are rejected
const MIN_CITADEL_COMPACTNESS: f64 = 0.75;

/// District archetype queue, drained in order during assignment
///
/// Roughly two thirds craftsmen with civic and special districts mixed in;
/// a town bigger than the list falls back to slums.
const WARD_ARCHETYPES: [WardKind; 36] = [
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Merchant,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Cathedral,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Administration,
    WardKind::Craftsmen,
    WardKind::Slum,
    WardKind::Craftsmen,
    WardKind::Slum,
    WardKind::Patriciate,
    WardKind::Market,
    WardKind::Slum,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Slum,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Craftsmen,
    WardKind::Military,
    WardKind::Slum,
    WardKind::Craftsmen,
    WardKind::Park,
    WardKind::Patriciate,
    WardKind::Market,
    WardKind::Merchant,
];

/// A fully generated town
#[derive(Debug, Clone)]
pub struct Model {
    /// Number of urban parcels requested
    pub n_patches: usize,
    /// Seed of the successful attempt
    pub seed: u64,

    /// Whether this town has a market plaza
    pub plaza_needed: bool,
    /// Whether this town has a citadel
    pub citadel_needed: bool,
    /// Whether this town has a curtain wall
    pub walls_needed: bool,

    /// Shared vertex storage for the whole plan
    pub arena: VertexArena,
    /// All parcels, walled ones first
    pub patches: Vec<Patch>,
    /// Indices of the urban parcels
    pub inner: Vec<usize>,
    /// Citadel parcel, if any
    pub citadel: Option<usize>,
    /// Plaza parcel, if any
    pub plaza: Option<usize>,
    /// Vertex of the first parcel closest to the origin
    pub center: VertexId,

    /// City circumference; a standing wall only when `walls_needed`
    pub border: CurtainWall,
    /// Castle wall around the citadel
    pub citadel_wall: Option<CurtainWall>,
    /// All gates: city wall gates plus castle gates
    pub gates: Vec<VertexId>,

    /// Street routing graph, kept for queries after generation
    pub topology: Option<Topology>,
    /// Gate-to-plaza routes inside the city
    pub streets: Vec<Vec<VertexId>>,
    /// Countryside approach routes to the wall gates
    pub roads: Vec<Vec<VertexId>>,
    /// Deduplicated street/road segments chained into longer ways
    pub arteries: Vec<Vec<VertexId>>,

    /// Farthest urban vertex from the origin
    pub city_radius: f64,
}

impl Model {
    /// Generate a town, retrying failed attempts with derived seeds
    ///
    /// # Errors
    ///
    /// Returns `RetriesExhausted` when every attempt within the configured
    /// budget failed. Non-retryable errors are returned immediately.
    ///
    /// # Example
    ///
    /// ```rust
    /// use medieval_town::*;
    ///
    /// let config = TownConfigBuilder::new()
    ///     .seed(42)
    ///     .size(TownSize::SmallTown)
    ///     .max_retries(30)
    ///     .build()
    ///     .unwrap();
    /// let town = Model::generate(&config).unwrap();
    /// assert!(!town.patches.is_empty());
    /// ```
    pub fn generate(config: &TownConfig) -> Result<Model> {
        let mut seed = config.seed;
        for _ in 0..config.max_retries {
            match Self::attempt(config, seed) {
                Ok(model) => return Ok(model),
                Err(e) if e.is_retryable() => {
                    seed = TownRng::derive_seed(seed);
                }
                Err(e) => return Err(e),
            }
        }
        Err(TownError::RetriesExhausted {
            attempts: config.max_retries,
        })
    }

    /// One all-or-nothing generation attempt
    fn attempt(config: &TownConfig, seed: u64) -> Result<Model> {
        let mut rng = TownRng::new(seed);
        let n_patches = config.patch_count();

        let plaza_needed = rng.next_bool(0.5);
        let citadel_needed = rng.next_bool(0.5);
        let walls_needed = rng.next_bool(0.5);

        let mut arena = VertexArena::new();
        let mut patches: Vec<Patch> = Vec::new();
        let mut inner: Vec<usize> = Vec::new();
        let mut citadel: Option<usize> = None;
        let mut plaza: Option<usize> = None;

        // Parcels: an oversampled spiral of seeds so the countryside
        // reaches well past the future wall
        let sa = rng.next_float() * TAU;
        let mut seeds = Vec::with_capacity(n_patches * 8);
        for i in 0..n_patches * 8 {
            let a = sa + (i as f64).sqrt() * 5.0;
            let r = if i == 0 {
                0.0
            } else {
                10.0 + i as f64 * (2.0 + rng.next_float())
            };
            seeds.push(DVec2::new(a.cos() * r, a.sin() * r));
        }

        let mut voronoi = Voronoi::build(&seeds);
        // Relax the central seeds so the core parcels are evenly shaped
        for _ in 0..3 {
            voronoi = voronoi.relax(&[0, 1, 2, n_patches]);
        }

        let mut regions = voronoi.partitioning();
        regions.sort_by(|a, b| {
            voronoi.points[a.seed]
                .length()
                .total_cmp(&voronoi.points[b.seed].length())
        });
        if regions.len() <= n_patches {
            return Err(TownError::DegenerateGeometry("too few bounded parcels"));
        }

        // Triangle indices are stable after all insertions, so two adjacent
        // cells map their shared corner to the same vertex handle
        let mut tri2id: HashMap<usize, VertexId> = HashMap::new();
        let mut center: Option<VertexId> = None;
        for (count, r) in regions.iter().enumerate() {
            let ids: Vec<VertexId> = r
                .triangles
                .iter()
                .map(|&t| {
                    *tri2id
                        .entry(t)
                        .or_insert_with(|| arena.insert(voronoi.triangles[t].center))
                })
                .collect();
            let mut patch = Patch::new(PlanPolygon::new(ids));

            if count == 0 {
                center = patch.shape.min_by_key(&arena, |p| p.length());
                if plaza_needed {
                    plaza = Some(0);
                }
            } else if count == n_patches && citadel_needed {
                citadel = Some(count);
                patch.within_city = true;
            }
            if count < n_patches {
                patch.within_city = true;
                patch.within_walls = walls_needed;
                inner.push(count);
            }
            patches.push(patch);
        }
        let center = center.ok_or(TownError::DegenerateGeometry("empty central parcel"))?;

        optimize_junctions(&mut arena, &mut patches, &inner, citadel);

        // Walls and culling
        let reserved: Vec<VertexId> = citadel
            .map(|ci| patches[ci].shape.ids.clone())
            .unwrap_or_default();
        let mut border = CurtainWall::new(
            walls_needed,
            &mut arena,
            &mut patches,
            inner.clone(),
            &reserved,
            &mut rng,
        )?;
        border.build_towers();
        let mut gates = border.gates.clone();

        // Drop countryside parcels far beyond the wall
        let radius = border.radius(&arena);
        let center_pos = arena.pos(center);
        let keep: Vec<bool> = patches
            .iter()
            .map(|p| {
                p.shape.to_polygon(&arena).distance_to_point(center_pos) < radius * 3.0
            })
            .collect();
        let mut remap = vec![usize::MAX; patches.len()];
        let mut next = 0;
        for (i, &k) in keep.iter().enumerate() {
            if k {
                remap[i] = next;
                next += 1;
            }
        }
        let mut kept = Vec::with_capacity(next);
        for (i, p) in patches.into_iter().enumerate() {
            if keep[i] {
                kept.push(p);
            }
        }
        patches = kept;
        debug_assert!(inner.iter().all(|&i| remap[i] != usize::MAX));
        inner = inner.iter().map(|&i| remap[i]).collect();
        citadel = citadel.map(|i| remap[i]);
        plaza = plaza.map(|i| remap[i]);
        border.patch_indices = border.patch_indices.iter().map(|&i| remap[i]).collect();

        // Castle
        let citadel_wall = match citadel {
            Some(ci) => {
                let reserved: Vec<VertexId> = patches[ci]
                    .shape
                    .ids
                    .iter()
                    .copied()
                    .filter(|&v| {
                        patches
                            .iter()
                            .any(|p| p.shape.contains(v) && !p.within_city)
                    })
                    .collect();
                let mut castle_wall = CurtainWall::new(
                    true,
                    &mut arena,
                    &mut patches,
                    vec![ci],
                    &reserved,
                    &mut rng,
                )?;
                castle_wall.build_towers();

                let compactness = patches[ci].shape.to_polygon(&arena).compactness();
                if compactness < MIN_CITADEL_COMPACTNESS {
                    return Err(TownError::BadCitadelShape { compactness });
                }
                patches[ci].ward = Some(Ward::new(WardKind::Castle));
                gates.extend(castle_wall.gates.iter().copied());
                Some(castle_wall)
            }
            None => None,
        };

        let mut model = Model {
            n_patches,
            seed,
            plaza_needed,
            citadel_needed,
            walls_needed,
            arena,
            patches,
            inner,
            citadel,
            plaza,
            center,
            border,
            citadel_wall,
            gates,
            topology: None,
            streets: Vec::new(),
            roads: Vec::new(),
            arteries: Vec::new(),
            city_radius: 0.0,
        };
        model.build_streets()?;
        model.create_wards(&mut rng);
        model.build_geometry(&mut rng);
        Ok(model)
    }

    /// The curtain wall, when this town has one
    pub fn wall(&self) -> Option<&CurtainWall> {
        if self.walls_needed {
            Some(&self.border)
        } else {
            None
        }
    }

    /// Position of the town center vertex
    #[inline]
    pub fn center_pos(&self) -> DVec2 {
        self.arena.pos(self.center)
    }

    /// Indices of all parcels touching a vertex
    pub fn patches_by_vertex(&self, v: VertexId) -> Vec<usize> {
        (0..self.patches.len())
            .filter(|&i| self.patches[i].shape.contains(v))
            .collect()
    }

    /// The parcel across the edge starting at `v` of the given parcel
    pub fn neighbour_at(&self, patch_idx: usize, v: VertexId) -> Option<usize> {
        let next = self.patches[patch_idx].shape.next(v)?;
        (0..self.patches.len()).find(|&i| {
            i != patch_idx && self.patches[i].shape.find_edge(next, v).is_some()
        })
    }

    /// Indices of all parcels sharing an edge with the given parcel
    pub fn neighbours(&self, patch_idx: usize) -> Vec<usize> {
        (0..self.patches.len())
            .filter(|&i| {
                i != patch_idx && self.patches[i].shape.borders(&self.patches[patch_idx].shape)
            })
            .collect()
    }

    /// Whether a parcel is surrounded by the city (walled, or all its
    /// neighbors urban)
    pub fn is_enclosed(&self, patch_idx: usize) -> bool {
        let patch = &self.patches[patch_idx];
        if !patch.within_city {
            return false;
        }
        if patch.within_walls {
            return true;
        }
        self.neighbours(patch_idx)
            .iter()
            .all(|&i| self.patches[i].within_city)
    }

    /// Route a street from every gate to the plaza (or center) and a road
    /// from the countryside to every wall gate
    fn build_streets(&mut self) -> Result<()> {
        let mut blocked: HashSet<VertexId> = HashSet::new();
        if let Some(ci) = self.citadel {
            blocked.extend(self.patches[ci].shape.ids.iter().copied());
        }
        if let Some(wall) = self.wall() {
            blocked.extend(wall.shape.ids.iter().copied());
        }
        for g in &self.gates {
            blocked.remove(g);
        }

        let topology = Topology::new(&self.arena, &self.patches, &self.border.shape, &blocked);

        for &gate in &self.gates {
            let end = match self.plaza {
                Some(pi) => self.patches[pi]
                    .shape
                    .min_by_key(&self.arena, |p| p.distance(self.arena.pos(gate)))
                    .unwrap_or(self.center),
                None => self.center,
            };

            // A gate that cannot reach the center makes the whole layout
            // unusable
            let street = topology
                .build_path(gate, end, &topology.outer)
                .ok_or(TownError::UnroutableStreet)?;
            self.streets.push(street);

            if self.border.gates.contains(&gate) {
                let dir = with_length(self.arena.pos(gate), 1000.0);
                if let Some(start) = topology.nearest_node(&self.arena, dir) {
                    let start_v = topology.vertex(start);
                    // A missing approach road is tolerable; the gate still
                    // works from the inside
                    if let Some(road) = topology.build_path(start_v, gate, &topology.inner) {
                        self.roads.push(road);
                    }
                }
            }
        }

        self.tidy_up_roads();
        self.smooth_arteries();
        self.topology = Some(topology);
        Ok(())
    }

    /// Deduplicate street/road segments and chain them into arteries
    fn tidy_up_roads(&mut self) {
        let plaza_ids: Vec<VertexId> = self
            .plaza
            .map(|pi| self.patches[pi].shape.ids.clone())
            .unwrap_or_default();

        let mut segments: Vec<(VertexId, VertexId)> = Vec::new();
        for way in self.streets.iter().chain(self.roads.iter()) {
            if way.len() < 2 {
                continue;
            }
            let mut v0 = way[0];
            for &v1 in &way[1..] {
                // The plaza itself is open ground, not a street
                if plaza_ids.contains(&v0) && plaza_ids.contains(&v1) {
                    v0 = v1;
                    continue;
                }
                if !segments.contains(&(v0, v1)) {
                    segments.push((v0, v1));
                }
                v0 = v1;
            }
        }

        self.arteries.clear();
        while let Some(seg) = segments.pop() {
            let mut attached = false;
            for artery in &mut self.arteries {
                if artery[0] == seg.1 {
                    artery.insert(0, seg.0);
                    attached = true;
                    break;
                } else if *artery.last().unwrap() == seg.0 {
                    artery.push(seg.1);
                    attached = true;
                    break;
                }
            }
            if !attached {
                self.arteries.push(vec![seg.0, seg.1]);
            }
        }
    }

    /// Pull artery interiors toward straight lines; endpoints stay put
    fn smooth_arteries(&mut self) {
        for artery in &self.arteries {
            let n = artery.len();
            if n < 3 {
                continue;
            }
            let smoothed: Vec<DVec2> = (0..n)
                .map(|i| {
                    let prev = self.arena.pos(artery[(i + n - 1) % n]);
                    let cur = self.arena.pos(artery[i]);
                    let next = self.arena.pos(artery[(i + 1) % n]);
                    (prev + cur * 3.0 + next) / 5.0
                })
                .collect();
            for i in 1..n - 1 {
                self.arena.set(artery[i], smoothed[i]);
            }
        }
    }

    /// Assign a district to every parcel
    fn create_wards(&mut self, rng: &mut TownRng) {
        let mut unassigned: Vec<usize> = self
            .inner
            .iter()
            .copied()
            .filter(|&i| self.patches[i].ward.is_none())
            .collect();

        if let Some(pi) = self.plaza {
            self.patches[pi].ward = Some(Ward::new(WardKind::Market));
            unassigned.retain(|&i| i != pi);
        }

        // Urban parcels at wall gates tend to become gate districts
        for gate in self.border.gates.clone() {
            for pi in self.patches_by_vertex(gate) {
                if self.patches[pi].within_city && self.patches[pi].ward.is_none() {
                    let chance = if self.wall().is_some() { 0.5 } else { 0.2 };
                    if rng.next_bool(chance) {
                        self.patches[pi].ward = Some(Ward::new(WardKind::Gate));
                        unassigned.retain(|&i| i != pi);
                    }
                }
            }
        }

        // The archetype queue with a few local swaps for variety
        let mut archetypes = WARD_ARCHETYPES.to_vec();
        for _ in 0..archetypes.len() / 10 {
            let index = rng.next_int(0, archetypes.len() as i64 - 1) as usize;
            if index < archetypes.len() - 1 {
                archetypes.swap(index, index + 1);
            }
        }
        let mut queue = archetypes.into_iter();

        while !unassigned.is_empty() {
            let kind = queue.next().unwrap_or(WardKind::Slum);
            let best = match wards::rate_location(kind, self, unassigned[0]) {
                None => unassigned[rng.next_index(unassigned.len())],
                Some(_) => unassigned
                    .iter()
                    .copied()
                    .min_by(|&a, &b| {
                        let ra = wards::rate_location(kind, self, a).unwrap_or(f64::INFINITY);
                        let rb = wards::rate_location(kind, self, b).unwrap_or(f64::INFINITY);
                        ra.total_cmp(&rb)
                    })
                    .unwrap_or(unassigned[0]),
            };
            self.patches[best].ward = Some(Ward::new(kind));
            unassigned.retain(|&i| i != best);
        }

        // Most wall gates grow an outskirts district outside the wall
        if self.walls_needed {
            let spare_chance = 1.0 / (self.n_patches as f64 - 5.0);
            for gate in self.border.gates.clone() {
                if !rng.next_bool(spare_chance) {
                    for pi in self.patches_by_vertex(gate) {
                        if self.patches[pi].ward.is_none() {
                            self.patches[pi].within_city = true;
                            self.patches[pi].ward = Some(Ward::new(WardKind::Gate));
                        }
                    }
                }
            }
        }

        // Countryside: farms on compact parcels, plain fields elsewhere
        self.city_radius = 0.0;
        for pi in 0..self.patches.len() {
            if self.patches[pi].within_city {
                for &v in &self.patches[pi].shape.ids {
                    self.city_radius = self.city_radius.max(self.arena.pos(v).length());
                }
            } else if self.patches[pi].ward.is_none() {
                let compact = self.patches[pi].shape.to_polygon(&self.arena).compactness();
                let kind = if rng.next_bool(0.2) && compact >= 0.7 {
                    WardKind::Farm
                } else {
                    WardKind::Countryside
                };
                self.patches[pi].ward = Some(Ward::new(kind));
            }
        }
    }

    /// Generate the building footprints of every assigned district
    fn build_geometry(&mut self, rng: &mut TownRng) {
        for i in 0..self.patches.len() {
            if let Some(kind) = self.patches[i].ward.as_ref().map(|w| w.kind) {
                let geometry = wards::create_geometry(kind, self, rng, i);
                if let Some(w) = self.patches[i].ward.as_mut() {
                    w.geometry = geometry;
                }
            }
        }
    }
}

/// Merge parcel corners that ended up closer than [`MIN_JUNCTION_DISTANCE`]
///
/// The surviving vertex moves to the midpoint and every parcel referencing
/// the dropped handle is redirected to it, then purged of duplicates.
fn optimize_junctions(
    arena: &mut VertexArena,
    patches: &mut [Patch],
    inner: &[usize],
    citadel: Option<usize>,
) {
    let mut targets: Vec<usize> = inner.to_vec();
    if let Some(ci) = citadel {
        targets.push(ci);
    }

    let mut to_clean: Vec<usize> = Vec::new();
    for &w in &targets {
        let mut index = 0;
        while index < patches[w].shape.len() {
            let len = patches[w].shape.len();
            let v0 = patches[w].shape.ids[index];
            let v1 = patches[w].shape.ids[(index + 1) % len];

            if v0 != v1 && arena.pos(v0).distance(arena.pos(v1)) < MIN_JUNCTION_DISTANCE {
                for w1 in 0..patches.len() {
                    if w1 != w && patches[w1].shape.contains(v1) {
                        patches[w1].shape.replace(v1, v0);
                        if !to_clean.contains(&w1) {
                            to_clean.push(w1);
                        }
                    }
                }
                let mid = (arena.pos(v0) + arena.pos(v1)) / 2.0;
                arena.set(v0, mid);
                if let Some(j) = patches[w].shape.index_of(v1) {
                    patches[w].shape.ids.remove(j);
                }
            } else {
                index += 1;
            }
        }
    }

    // Redirections can leave repeated handles anywhere in a ring
    for &w1 in &to_clean {
        let ids = &mut patches[w1].shape.ids;
        let mut i = 0;
        while i < ids.len() {
            let v = ids[i];
            match (i + 1..ids.len()).find(|&j| ids[j] == v) {
                Some(j) => {
                    ids.remove(j);
                }
                None => i += 1,
            }
        }
    }
}
