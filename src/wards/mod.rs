//! District wards and building generation
//!
//! A ward is a district kind assigned to a parcel plus the building
//! footprints generated for it. Housing wards carve their parcel into
//! blocks with recursive bisection; special wards (market, park, temple,
//! castle, farm) have bespoke layouts. All randomness flows through the
//! caller's [`TownRng`], so ward geometry is as reproducible as the plan.

pub mod cutter;

use std::f64::consts::PI;

use glam::DVec2;

use crate::geometry::{distance_to_segment, lerp, rotate90, Polygon};
use crate::model::Model;
use crate::rng::TownRng;

/// Width of arterial streets and wall-side roads
pub const MAIN_STREET: f64 = 2.0;
/// Width of ordinary streets between city parcels
pub const REGULAR_STREET: f64 = 1.0;
/// Width of alleys between buildings and around rural parcels
pub const ALLEY: f64 = 0.6;

/// District kinds a parcel can be assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WardKind {
    Craftsmen,
    Merchant,
    Slum,
    Market,
    Castle,
    Gate,
    Administration,
    Military,
    Patriciate,
    Park,
    Cathedral,
    Farm,
    /// Rural parcel with no buildings
    Countryside,
}

impl WardKind {
    /// Display label; plain countryside is unlabeled
    pub fn label(self) -> Option<&'static str> {
        match self {
            WardKind::Craftsmen => Some("Craftsmen"),
            WardKind::Merchant => Some("Merchant"),
            WardKind::Slum => Some("Slum"),
            WardKind::Market => Some("Market"),
            WardKind::Castle => Some("Castle"),
            WardKind::Gate => Some("Gate"),
            WardKind::Administration => Some("Administration"),
            WardKind::Military => Some("Military"),
            WardKind::Patriciate => Some("Patriciate"),
            WardKind::Park => Some("Park"),
            WardKind::Cathedral => Some("Temple"),
            WardKind::Farm => Some("Farm"),
            WardKind::Countryside => None,
        }
    }
}

/// A district assigned to a parcel
#[derive(Debug, Clone)]
pub struct Ward {
    pub kind: WardKind,
    /// Building footprints (or grove sectors for parks), filled by
    /// [`create_geometry`]
    pub geometry: Vec<Polygon>,
}

impl Ward {
    pub fn new(kind: WardKind) -> Self {
        Self {
            kind,
            geometry: Vec::new(),
        }
    }
}

/// How well a parcel suits a ward kind (lower is better)
///
/// `None` means the kind has no placement preference and gets a random
/// parcel. Infinity marks a parcel the kind must never take.
pub fn rate_location(kind: WardKind, model: &Model, patch_idx: usize) -> Option<f64> {
    let shape = model.patches[patch_idx].shape.to_polygon(&model.arena);
    match kind {
        WardKind::Merchant => Some(shape.distance_to_point(town_focus(model))),
        WardKind::Slum => Some(-shape.distance_to_point(town_focus(model))),
        WardKind::Market => {
            // Two markets must not touch
            for &i in &model.inner {
                if i == patch_idx {
                    continue;
                }
                let p = &model.patches[i];
                if matches!(&p.ward, Some(w) if w.kind == WardKind::Market)
                    && p.shape.borders(&model.patches[patch_idx].shape)
                {
                    return Some(f64::INFINITY);
                }
            }
            // Not much bigger than the plaza, or else central
            match model.plaza {
                Some(pi) => Some(shape.area() / model.patches[pi].area(&model.arena)),
                None => Some(shape.distance_to_point(model.center_pos())),
            }
        }
        WardKind::Administration => match model.plaza {
            Some(pi) => {
                if model.patches[patch_idx]
                    .shape
                    .borders(&model.patches[pi].shape)
                {
                    Some(0.0)
                } else {
                    let plaza = model.patches[pi].shape.to_polygon(&model.arena);
                    Some(shape.distance_to_point(plaza.center()))
                }
            }
            None => Some(shape.distance_to_point(model.center_pos())),
        },
        WardKind::Military => {
            let borders_citadel = model.citadel.map_or(false, |ci| {
                model.patches[ci]
                    .shape
                    .borders(&model.patches[patch_idx].shape)
            });
            if borders_citadel {
                Some(0.0)
            } else if model
                .wall()
                .map_or(false, |w| w.borders(&model.patches[patch_idx], patch_idx))
            {
                Some(1.0)
            } else if model.citadel.is_none() && model.wall().is_none() {
                Some(0.0)
            } else {
                Some(f64::INFINITY)
            }
        }
        WardKind::Patriciate => {
            // Prefers parks next door, avoids slums
            let mut rate = 0.0;
            for (i, p) in model.patches.iter().enumerate() {
                if i == patch_idx {
                    continue;
                }
                if let Some(w) = &p.ward {
                    if p.shape.borders(&model.patches[patch_idx].shape) {
                        match w.kind {
                            WardKind::Park => rate -= 1.0,
                            WardKind::Slum => rate += 1.0,
                            _ => {}
                        }
                    }
                }
            }
            Some(rate)
        }
        WardKind::Cathedral => match model.plaza {
            Some(pi)
                if model.patches[patch_idx]
                    .shape
                    .borders(&model.patches[pi].shape) =>
            {
                Some(-1.0 / shape.area())
            }
            _ => Some(shape.distance_to_point(town_focus(model)) * shape.area()),
        },
        _ => None,
    }
}

/// Plaza center when there is one, town center otherwise
fn town_focus(model: &Model) -> DVec2 {
    match model.plaza {
        Some(pi) => model.patches[pi].shape.to_polygon(&model.arena).center(),
        None => model.center_pos(),
    }
}

/// Generate the building footprints for a parcel's assigned ward
pub fn create_geometry(
    kind: WardKind,
    model: &Model,
    rng: &mut TownRng,
    patch_idx: usize,
) -> Vec<Polygon> {
    match kind {
        WardKind::Craftsmen => {
            let min_sq = 10.0 + 80.0 * rng.next_float() * rng.next_float();
            let grid_chaos = 0.5 + rng.next_float() * 0.2;
            common_geometry(model, rng, patch_idx, min_sq, grid_chaos, 0.6, 0.04)
        }
        WardKind::Merchant => {
            let min_sq = 50.0 + 60.0 * rng.next_float() * rng.next_float();
            let grid_chaos = 0.5 + rng.next_float() * 0.3;
            common_geometry(model, rng, patch_idx, min_sq, grid_chaos, 0.7, 0.15)
        }
        WardKind::Gate => {
            let min_sq = 10.0 + 50.0 * rng.next_float() * rng.next_float();
            let grid_chaos = 0.5 + rng.next_float() * 0.3;
            common_geometry(model, rng, patch_idx, min_sq, grid_chaos, 0.7, 0.04)
        }
        WardKind::Slum => {
            let min_sq = 10.0 + 30.0 * rng.next_float() * rng.next_float();
            let grid_chaos = 0.6 + rng.next_float() * 0.4;
            common_geometry(model, rng, patch_idx, min_sq, grid_chaos, 0.8, 0.03)
        }
        WardKind::Administration => {
            let min_sq = 80.0 + 30.0 * rng.next_float() * rng.next_float();
            let grid_chaos = 0.1 + rng.next_float() * 0.3;
            common_geometry(model, rng, patch_idx, min_sq, grid_chaos, 0.3, 0.04)
        }
        WardKind::Patriciate => {
            let min_sq = 80.0 + 30.0 * rng.next_float() * rng.next_float();
            let grid_chaos = 0.5 + rng.next_float() * 0.3;
            common_geometry(model, rng, patch_idx, min_sq, grid_chaos, 0.8, 0.2)
        }
        WardKind::Military => {
            // Regular grid of barracks and squares, no outskirts thinning
            let block = city_block(model, patch_idx);
            let min_sq = block.area().sqrt() * (1.0 + rng.next_float());
            let grid_chaos = 0.1 + rng.next_float() * 0.3;
            create_alleys(&block, min_sq, grid_chaos, 0.3, 0.25, true, 0, rng)
        }
        WardKind::Market => market_geometry(model, rng, patch_idx),
        WardKind::Castle => {
            let shape = model.patches[patch_idx].shape.to_polygon(&model.arena);
            let block = shape.shrink_eq(MAIN_STREET * 2.0);
            create_ortho_building(&block, block.area().sqrt() * 4.0, 0.6, rng)
        }
        WardKind::Park => {
            let block = city_block(model, patch_idx);
            if block.compactness() >= 0.7 {
                cutter::radial(&block, None, ALLEY)
            } else {
                cutter::semi_radial(&block, None, ALLEY)
            }
        }
        WardKind::Cathedral => {
            let block = city_block(model, patch_idx);
            if rng.next_bool(0.4) {
                cutter::ring(&block, 2.0 + rng.next_float() * 4.0)
            } else {
                create_ortho_building(&block, 50.0, 0.8, rng)
            }
        }
        WardKind::Farm => farm_geometry(model, rng, patch_idx),
        WardKind::Countryside => Vec::new(),
    }
}

fn common_geometry(
    model: &Model,
    rng: &mut TownRng,
    patch_idx: usize,
    min_sq: f64,
    grid_chaos: f64,
    size_chaos: f64,
    empty_prob: f64,
) -> Vec<Polygon> {
    let block = city_block(model, patch_idx);
    let geometry = create_alleys(&block, min_sq, grid_chaos, size_chaos, empty_prob, true, 0, rng);
    if model.is_enclosed(patch_idx) {
        geometry
    } else {
        filter_outskirts(model, rng, patch_idx, geometry)
    }
}

/// The buildable part of a parcel: its shape inset by half a street width
/// on every edge
///
/// Wall-side and arterial edges get main-street insets, plaza-facing edges
/// too; everything else gets a regular street inside the walls and an
/// alley outside. Convex parcels shrink exactly; concave ones fall back to
/// the buffering offset.
pub fn city_block(model: &Model, patch_idx: usize) -> Polygon {
    let patch = &model.patches[patch_idx];
    let inner_patch = model.wall().is_none() || patch.within_walls;
    let plaza_shape = model.plaza.map(|pi| &model.patches[pi].shape);

    let n = patch.shape.len();
    let mut inset = Vec::with_capacity(n);
    for i in 0..n {
        let v0 = patch.shape.ids[i];
        let v1 = patch.shape.ids[(i + 1) % n];
        let width = if model
            .wall()
            .map_or(false, |w| w.borders_by(patch_idx, v0, v1))
        {
            MAIN_STREET
        } else {
            let mut on_street = inner_patch
                && plaza_shape.map_or(false, |p| p.find_edge(v1, v0).is_some());
            if !on_street {
                on_street = model
                    .arteries
                    .iter()
                    .any(|a| a.contains(&v0) && a.contains(&v1));
            }
            if on_street {
                MAIN_STREET
            } else if inner_patch {
                REGULAR_STREET
            } else {
                ALLEY
            }
        };
        inset.push(width / 2.0);
    }

    let poly = patch.shape.to_polygon(&model.arena);
    if poly.is_convex() {
        poly.shrink(&inset)
    } else {
        poly.buffer(&inset)
    }
}

/// Recursively bisect a block into building footprints
///
/// Cuts run roughly perpendicular to the longest edge, with position and
/// tilt jitter scaled by `grid_chaos`. A piece smaller than the (fuzzed)
/// `min_sq` threshold becomes a building, or stays empty with probability
/// `empty_prob`. `split` leaves an alley gap at this level's cut.
pub fn create_alleys(
    poly: &Polygon,
    min_sq: f64,
    grid_chaos: f64,
    size_chaos: f64,
    empty_prob: f64,
    split: bool,
    depth: usize,
    rng: &mut TownRng,
) -> Vec<Polygon> {
    let fallback = |poly: &Polygon| {
        if poly.area() >= min_sq {
            vec![poly.clone()]
        } else {
            Vec::new()
        }
    };
    if depth > 20 || poly.len() < 3 {
        return fallback(poly);
    }
    let edge = match poly.longest_edge_start() {
        Some(e) => e,
        None => return fallback(poly),
    };

    let spread = 0.8 * grid_chaos;
    let ratio = (1.0 - spread) / 2.0 + rng.next_float() * spread;
    // Nearly-minimal blocks are cut straight so they stay usable
    let angle_spread = PI / 6.0 * grid_chaos * if poly.area() < min_sq * 4.0 { 0.0 } else { 1.0 };
    let b = (rng.next_float() - 0.5) * angle_spread;

    let halves = cutter::bisect(poly, edge, ratio, b, if split { ALLEY } else { 0.0 });

    let mut buildings = Vec::new();
    for half in &halves {
        if half.len() < 3 {
            continue;
        }
        let area = half.area();
        if area < min_sq * 2.0_f64.powf(4.0 * size_chaos * (rng.next_float() - 0.5)) {
            if !rng.next_bool(empty_prob) {
                buildings.push(half.clone());
            }
        } else {
            let should_split = area > min_sq / (rng.next_float() * rng.next_float());
            buildings.extend(create_alleys(
                half,
                min_sq,
                grid_chaos,
                size_chaos,
                empty_prob,
                should_split,
                depth + 1,
                rng,
            ));
        }
    }
    if buildings.is_empty() {
        fallback(poly)
    } else {
        buildings
    }
}

/// Subdivide a block along two fixed orthogonal axes
///
/// Every cut is parallel to one of the axes (whichever is more
/// perpendicular to the piece's longest edge), producing the rectangular
/// building clusters of castles and temples. `fill` is the probability a
/// finished piece is actually built on; an all-empty outcome is redrawn.
pub fn create_ortho_building(
    poly: &Polygon,
    min_block_sq: f64,
    fill: f64,
    rng: &mut TownRng,
) -> Vec<Polygon> {
    if poly.area() < min_block_sq {
        return vec![poly.clone()];
    }
    let edge = match poly.longest_edge_start() {
        Some(e) => e,
        None => return vec![poly.clone()],
    };
    let c1 = poly.vertices[(edge + 1) % poly.len()] - poly.vertices[edge];
    let c2 = rotate90(c1);

    for _ in 0..100 {
        let blocks = ortho_slice(poly, c1, c2, min_block_sq, fill, 0, rng);
        if !blocks.is_empty() {
            return blocks;
        }
    }
    vec![poly.clone()]
}

fn ortho_slice(
    poly: &Polygon,
    c1: DVec2,
    c2: DVec2,
    min_block_sq: f64,
    fill: f64,
    depth: usize,
    rng: &mut TownRng,
) -> Vec<Polygon> {
    if depth > 50 || poly.len() < 3 {
        return Vec::new();
    }
    let edge = match poly.longest_edge_start() {
        Some(e) => e,
        None => return Vec::new(),
    };
    let v0 = poly.vertices[edge];
    let v1 = poly.vertices[(edge + 1) % poly.len()];
    let v = v1 - v0;

    let ratio = 0.4 + rng.next_float() * 0.2;
    let p1 = lerp(v0, v1, ratio);
    let c = if v.dot(c1).abs() < v.dot(c2).abs() {
        c1
    } else {
        c2
    };

    let halves = poly.cut(p1, p1 + c, 0.0);
    let mut buildings = Vec::new();
    for half in &halves {
        if half.area() < min_block_sq * 2.0_f64.powf(rng.normal() * 2.0 - 1.0) {
            if rng.next_bool(fill) {
                buildings.push(half.clone());
            }
        } else {
            buildings.extend(ortho_slice(half, c1, c2, min_block_sq, fill, depth + 1, rng));
        }
    }
    buildings
}

/// A market square: a statue or fountain, possibly pulled toward the
/// square's main street
fn market_geometry(model: &Model, rng: &mut TownRng, patch_idx: usize) -> Vec<Polygon> {
    let shape = model.patches[patch_idx].shape.to_polygon(&model.arena);
    let statue = rng.next_bool(0.6);
    let offset = statue || rng.next_bool(0.3);

    let longest = if statue || offset {
        shape.longest_edge_start().map(|i| {
            (
                shape.vertices[i],
                shape.vertices[(i + 1) % shape.len()],
            )
        })
    } else {
        None
    };

    let mut obj = if statue {
        let mut r = Polygon::rect(1.0 + rng.next_float(), 1.0 + rng.next_float());
        if let Some((v0, v1)) = longest {
            r.rotate((v1.y - v0.y).atan2(v1.x - v0.x));
        }
        r
    } else {
        Polygon::circle(1.0 + rng.next_float())
    };

    let pos = match (offset, longest) {
        (true, Some((v0, v1))) => {
            let gravity = lerp(v0, v1, 0.5);
            lerp(shape.centroid(), gravity, 0.2 + rng.next_float() * 0.4)
        }
        _ => shape.centroid(),
    };
    obj.translate(pos);
    vec![obj]
}

/// A farmhouse cluster placed off-center in the field
fn farm_geometry(model: &Model, rng: &mut TownRng, patch_idx: usize) -> Vec<Polygon> {
    let shape = model.patches[patch_idx].shape.to_polygon(&model.arena);
    let mut housing = Polygon::rect(4.0, 4.0);
    if shape.is_empty() {
        return vec![housing];
    }
    let corner = shape.vertices[rng.next_index(shape.len())];
    let pos = lerp(corner, shape.centroid(), 0.3 + rng.next_float() * 0.4);
    housing.rotate(rng.next_float() * PI);
    housing.translate(pos);
    create_ortho_building(&housing, 8.0, 0.5, rng)
}

/// Thin out buildings on parcels at the city fringe
///
/// Buildings survive in proportion to their closeness to "populated"
/// edges: arteries at full pull, edges shared with enclosed city parcels
/// at full pull, edges toward unenclosed city parcels weakened. Vertex
/// density (gates count fully, all-city corners randomly, rural corners
/// not at all) scales the result through inverse-distance interpolation.
pub fn filter_outskirts(
    model: &Model,
    rng: &mut TownRng,
    patch_idx: usize,
    geometry: Vec<Polygon>,
) -> Vec<Polygon> {
    struct PopulatedEdge {
        a: DVec2,
        d: DVec2,
        weight: f64,
    }

    let patch = &model.patches[patch_idx];
    let shape = &patch.shape;
    let n = shape.len();

    let mut edges: Vec<PopulatedEdge> = Vec::new();
    for i in 0..n {
        let e0 = shape.ids[i];
        let e1 = shape.ids[(i + 1) % n];
        let on_road = model
            .arteries
            .iter()
            .any(|a| a.contains(&e0) && a.contains(&e1));
        let factor = if on_road {
            Some(1.0)
        } else {
            match model.neighbour_at(patch_idx, e0) {
                Some(ni) if model.patches[ni].within_city => {
                    Some(if model.is_enclosed(ni) { 1.0 } else { 0.4 })
                }
                _ => None,
            }
        };
        if let Some(factor) = factor {
            let a = model.arena.pos(e0);
            let d = model.arena.pos(e1) - a;
            let weight = shape
                .ids
                .iter()
                .map(|&v| {
                    if v == e0 || v == e1 {
                        0.0
                    } else {
                        distance_to_segment(a, d, model.arena.pos(v)) * factor
                    }
                })
                .fold(0.0, f64::max);
            edges.push(PopulatedEdge { a, d, weight });
        }
    }

    let density: Vec<f64> = shape
        .ids
        .iter()
        .map(|&v| {
            if model.gates.contains(&v) {
                1.0
            } else if model
                .patches_by_vertex(v)
                .iter()
                .all(|&pi| model.patches[pi].within_city)
            {
                2.0 * rng.next_float()
            } else {
                0.0
            }
        })
        .collect();

    let shape_poly = shape.to_polygon(&model.arena);
    geometry
        .into_iter()
        .filter(|building| {
            let mut min_dist: f64 = 1.0;
            for edge in &edges {
                for &v in &building.vertices {
                    let d = distance_to_segment(edge.a, edge.d, v);
                    let dist = if edge.weight > 0.0 {
                        d / edge.weight
                    } else {
                        f64::INFINITY
                    };
                    min_dist = min_dist.min(dist);
                }
            }
            let weights = shape_poly.interpolate(building.center());
            let p: f64 = density.iter().zip(&weights).map(|(d, w)| d * w).sum();
            let min_dist = min_dist / if p > 0.0 { p } else { 1.0 };
            rng.fuzzy(1.0) > min_dist
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(WardKind::Cathedral.label(), Some("Temple"));
        assert_eq!(WardKind::Countryside.label(), None);
        assert_eq!(WardKind::Craftsmen.label(), Some("Craftsmen"));
    }

    #[test]
    fn test_create_alleys_fills_block() {
        let block = Polygon::rect(40.0, 30.0);
        let mut rng = TownRng::new(11);
        let buildings = create_alleys(&block, 20.0, 0.5, 0.6, 0.0, true, 0, &mut rng);
        assert!(!buildings.is_empty());
        // Buildings stay inside the block's bounding box
        for b in &buildings {
            assert!(b.len() >= 3);
            for v in &b.vertices {
                assert!(v.x >= -20.1 && v.x <= 20.1);
                assert!(v.y >= -15.1 && v.y <= 15.1);
            }
        }
        // Alley gaps mean the buildings never cover the whole block
        let total: f64 = buildings.iter().map(|b| b.area()).sum();
        assert!(total < block.area());
    }

    #[test]
    fn test_create_alleys_tiny_block() {
        // Too small to meet the area floor: no buildings at all
        let block = Polygon::rect(2.0, 2.0);
        let mut rng = TownRng::new(12);
        let buildings = create_alleys(&block, 100.0, 0.5, 0.6, 0.04, true, 0, &mut rng);
        assert!(buildings.is_empty());
    }

    #[test]
    fn test_create_alleys_deterministic() {
        let block = Polygon::rect(40.0, 30.0);
        let a = create_alleys(&block, 20.0, 0.5, 0.6, 0.04, true, 0, &mut TownRng::new(7));
        let b = create_alleys(&block, 20.0, 0.5, 0.6, 0.04, true, 0, &mut TownRng::new(7));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.vertices, y.vertices);
        }
    }

    #[test]
    fn test_filter_outskirts_keeps_subset() {
        use crate::plan::{Patch, PlanPolygon, VertexArena};
        use crate::wall::CurtainWall;

        // One city parcel bordering one countryside parcel, with an artery
        // along the shared edge
        let mut arena = VertexArena::new();
        let v: Vec<_> = [
            (0.0, 0.0),
            (20.0, 0.0),
            (20.0, 20.0),
            (0.0, 20.0),
            (40.0, 0.0),
            (40.0, 20.0),
        ]
        .iter()
        .map(|&(x, y)| arena.insert(DVec2::new(x, y)))
        .collect();
        let mut left = Patch::new(PlanPolygon::new(vec![v[0], v[1], v[2], v[3]]));
        left.within_city = true;
        let right = Patch::new(PlanPolygon::new(vec![v[1], v[4], v[5], v[2]]));
        let mut patches = vec![left, right];

        let mut rng = TownRng::new(21);
        let border =
            CurtainWall::new(false, &mut arena, &mut patches, vec![0], &[], &mut rng).unwrap();
        let gates = border.gates.clone();
        let model = Model {
            n_patches: 1,
            seed: 21,
            plaza_needed: false,
            citadel_needed: false,
            walls_needed: false,
            arena,
            patches,
            inner: vec![0],
            citadel: None,
            plaza: None,
            center: v[0],
            border,
            citadel_wall: None,
            gates,
            topology: None,
            streets: Vec::new(),
            roads: Vec::new(),
            arteries: vec![vec![v[1], v[2]]],
            city_radius: 20.0,
        };

        let mut houses = Vec::new();
        for &(x, y) in &[(18.0, 10.0), (10.0, 10.0), (2.0, 2.0), (5.0, 17.0)] {
            let mut h = Polygon::rect(2.0, 2.0);
            h.translate(DVec2::new(x, y));
            houses.push(h);
        }
        let kept = filter_outskirts(&model, &mut rng, 0, houses.clone());
        // Thinning only ever drops buildings
        assert!(kept.len() <= houses.len());
        for b in &kept {
            assert!(houses.contains(b));
        }
    }

    #[test]
    fn test_ortho_building_small_returns_whole() {
        let block = Polygon::rect(2.0, 2.0);
        let mut rng = TownRng::new(13);
        let blocks = create_ortho_building(&block, 100.0, 0.5, &mut rng);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0], block);
    }

    #[test]
    fn test_ortho_building_subdivides() {
        let block = Polygon::rect(30.0, 20.0);
        let mut rng = TownRng::new(14);
        let blocks = create_ortho_building(&block, 40.0, 1.0, &mut rng);
        assert!(blocks.len() > 1);
        for b in &blocks {
            assert!(b.area() <= block.area());
        }
    }

    #[test]
    fn test_ortho_building_axis_aligned_cuts() {
        // With fill = 1 every piece is kept, and all cuts follow the two
        // axes of the longest edge, so every piece stays rectangular
        let block = Polygon::rect(32.0, 16.0);
        let mut rng = TownRng::new(15);
        let blocks = create_ortho_building(&block, 60.0, 1.0, &mut rng);
        let total: f64 = blocks.iter().map(|b| b.area()).sum();
        assert!((total - block.area()).abs() < 1e-6);
    }
}
