//! Block slicing helpers
//!
//! The recursive subdividers in the ward generators all bottom out in a
//! handful of cut patterns: a bisection through a point on an edge, radial
//! fans around a center, and ring peeling along the boundary.

use glam::DVec2;

use crate::geometry::{lerp, rotate90, with_length, Polygon};

/// Cut a polygon across the edge starting at vertex index `edge`
///
/// The cut passes through the point at `ratio` along that edge,
/// perpendicular to it, tilted by `angle` radians. `gap` leaves a street
/// between the halves. Falls back to a single-element clone when the cut
/// does not produce two parts.
pub fn bisect(poly: &Polygon, edge: usize, ratio: f64, angle: f64, gap: f64) -> Vec<Polygon> {
    if poly.len() < 3 {
        return vec![poly.clone()];
    }
    let v0 = poly.vertices[edge];
    let v1 = poly.vertices[(edge + 1) % poly.len()];
    let p1 = lerp(v0, v1, ratio);
    let d = v1 - v0;

    let (sin_b, cos_b) = angle.sin_cos();
    let rotated = DVec2::new(d.x * cos_b - d.y * sin_b, d.y * cos_b + d.x * sin_b);
    let p2 = p1 + rotate90(rotated);

    poly.cut(p1, p2, gap)
}

/// Fan a polygon into triangular sectors around a center point
///
/// One sector per edge; `gap` shrinks each sector away from its radial
/// sides, leaving paths between the sectors.
pub fn radial(poly: &Polygon, center: Option<DVec2>, gap: f64) -> Vec<Polygon> {
    let center = center.unwrap_or_else(|| poly.centroid());
    let n = poly.len();
    let mut sectors = Vec::with_capacity(n);
    for i in 0..n {
        let sector = Polygon::new(vec![center, poly.vertices[i], poly.vertices[(i + 1) % n]]);
        sectors.push(if gap > 0.0 {
            sector.shrink(&[gap / 2.0, 0.0, gap / 2.0])
        } else {
            sector
        });
    }
    sectors
}

/// Fan sectors around one of the polygon's own vertices
///
/// Defaults to the vertex nearest the centroid. Edges touching the center
/// produce no sector, and sector sides that lie on the polygon boundary
/// are not shrunk.
pub fn semi_radial(poly: &Polygon, center: Option<DVec2>, gap: f64) -> Vec<Polygon> {
    let center = match center {
        Some(c) => c,
        None => {
            let centroid = poly.centroid();
            match poly.min_vertex(|v| v.distance(centroid)) {
                Some(c) => c,
                None => return Vec::new(),
            }
        }
    };

    let n = poly.len();
    let half_gap = gap / 2.0;
    let mut sectors = Vec::new();
    for i in 0..n {
        let v0 = poly.vertices[i];
        let v1 = poly.vertices[(i + 1) % n];
        if v0 == center || v1 == center {
            continue;
        }
        let mut sector = Polygon::new(vec![center, v0, v1]);
        if gap > 0.0 {
            let d = [
                if poly.find_edge(center, v0).is_some() {
                    0.0
                } else {
                    half_gap
                },
                0.0,
                if poly.find_edge(v1, center).is_some() {
                    0.0
                } else {
                    half_gap
                },
            ];
            sector = sector.shrink(&d);
        }
        sectors.push(sector);
    }
    sectors
}

/// Peel boundary strips of the given thickness off a polygon
///
/// Each edge yields one cut parallel to it, offset inward by `thickness`;
/// shorter edges are peeled first. The returned pieces are the strips, not
/// the remaining core.
pub fn ring(poly: &Polygon, thickness: f64) -> Vec<Polygon> {
    let n = poly.len();
    let mut slices: Vec<(DVec2, DVec2, f64)> = Vec::with_capacity(n);
    for i in 0..n {
        let v0 = poly.vertices[i];
        let v1 = poly.vertices[(i + 1) % n];
        let v = v1 - v0;
        let norm = with_length(rotate90(v), thickness);
        slices.push((v0 + norm, v1 + norm, v.length()));
    }
    slices.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut peel = Vec::new();
    let mut p = poly.clone();
    for (p1, p2, _) in slices {
        let mut halves = p.cut(p1, p2, 0.0);
        if halves.len() == 2 {
            peel.push(halves.pop().unwrap());
        }
        p = halves.pop().unwrap();
    }
    peel
}
