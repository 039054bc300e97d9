//! Incremental Delaunay/Voronoi tessellation
//!
//! A small purpose-built tessellator: points are inserted one at a time into
//! a triangulation seeded with a bounding frame, splitting every triangle
//! whose circumcircle the new point violates. Voronoi cells are read off as
//! the circumcenters of the triangles around each seed, sorted by angle.
//!
//! Triangles and points are stored by index. Cells are only extracted after
//! all insertions, so triangle indices taken from [`Voronoi::partitioning`]
//! are stable and two adjacent cells refer to a shared corner by the same
//! triangle index.

use glam::DVec2;

/// Number of frame corners prepended to the point list
const FRAME_POINTS: usize = 4;

/// A triangle of the Delaunay triangulation, storing point indices
/// counterclockwise plus its circumcircle
#[derive(Debug, Clone)]
pub struct Triangle {
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
    /// Circumcenter, a Voronoi cell corner
    pub center: DVec2,
    /// Circumradius
    pub radius: f64,
}

impl Triangle {
    fn new(points: &[DVec2], i1: usize, i2: usize, i3: usize) -> Self {
        let a = points[i1];
        let b = points[i2];
        let c = points[i3];
        let s = (b.x - a.x) * (b.y + a.y) + (c.x - b.x) * (c.y + b.y) + (a.x - c.x) * (a.y + c.y);
        let (p2, p3) = if s > 0.0 { (i2, i3) } else { (i3, i2) };
        let (b, c) = (points[p2], points[p3]);

        // Circumcenter as the intersection of two edge bisectors; the
        // near-vertical branch avoids a blown-up slope
        let x1 = (a.x + b.x) / 2.0;
        let y1 = (a.y + b.y) / 2.0;
        let x2 = (b.x + c.x) / 2.0;
        let y2 = (b.y + c.y) / 2.0;

        let dx1 = a.y - b.y;
        let dy1 = b.x - a.x;
        let dx2 = b.y - c.y;
        let dy2 = c.x - b.x;

        let t2 = if dx1.abs() < 1e-10 {
            if dx2.abs() > 1e-10 {
                (x1 - x2) / dx2
            } else {
                0.0
            }
        } else {
            let tg1 = dy1 / dx1;
            let denom = dy2 - dx2 * tg1;
            if denom.abs() > 1e-10 {
                ((y1 - y2) - (x1 - x2) * tg1) / denom
            } else {
                0.0
            }
        };

        let center = DVec2::new(x2 + dx2 * t2, y2 + dy2 * t2);
        Self {
            p1: i1,
            p2,
            p3,
            center,
            radius: center.distance(a),
        }
    }

    /// Whether the triangle contains the directed edge `a -> b`
    fn has_edge(&self, a: usize, b: usize) -> bool {
        (self.p1 == a && self.p2 == b)
            || (self.p2 == a && self.p3 == b)
            || (self.p3 == a && self.p1 == b)
    }

    fn has_point(&self, p: usize) -> bool {
        self.p1 == p || self.p2 == p || self.p3 == p
    }
}

/// A Voronoi cell: a seed point plus the triangles around it, sorted by
/// angle so consecutive circumcenters trace the cell boundary
#[derive(Debug, Clone)]
pub struct Region {
    /// Index of the seed into [`Voronoi::points`]
    pub seed: usize,
    /// Triangle indices ordered counterclockwise around the seed
    pub triangles: Vec<usize>,
}

/// Incremental tessellation over a rectangular frame
#[derive(Debug, Clone)]
pub struct Voronoi {
    /// All points; the first [`FRAME_POINTS`] are the bounding frame
    pub points: Vec<DVec2>,
    /// Current triangulation
    pub triangles: Vec<Triangle>,
}

impl Voronoi {
    /// Create an empty tessellation over the given bounds
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        let points = vec![
            DVec2::new(minx, miny),
            DVec2::new(minx, maxy),
            DVec2::new(maxx, miny),
            DVec2::new(maxx, maxy),
        ];
        let mut v = Self {
            points,
            triangles: Vec::new(),
        };
        v.triangles.push(Triangle::new(&v.points, 0, 1, 2));
        v.triangles.push(Triangle::new(&v.points, 1, 2, 3));
        v
    }

    /// Build a tessellation containing all given seed points
    ///
    /// The frame is the bounding box of the seeds, padded by a quarter of
    /// each extent, so every seed cell is properly bounded.
    pub fn build(seeds: &[DVec2]) -> Self {
        if seeds.is_empty() {
            return Self::new(-100.0, -100.0, 100.0, 100.0);
        }
        let minx = seeds.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let miny = seeds.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let maxx = seeds.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let maxy = seeds.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        let dx = (maxx - minx) * 0.5;
        let dy = (maxy - miny) * 0.5;

        let mut v = Self::new(
            minx - dx / 2.0,
            miny - dy / 2.0,
            maxx + dx / 2.0,
            maxy + dy / 2.0,
        );
        for &p in seeds {
            v.add_point(p);
        }
        v
    }

    /// Seed points excluding the frame, in insertion order
    pub fn seed_points(&self) -> &[DVec2] {
        &self.points[FRAME_POINTS..]
    }

    /// Whether a triangle touches no frame corner
    fn is_real(&self, tr: &Triangle) -> bool {
        tr.p1 >= FRAME_POINTS && tr.p2 >= FRAME_POINTS && tr.p3 >= FRAME_POINTS
    }

    /// Insert a point, re-triangulating every circumcircle it violates
    ///
    /// Points falling in no circumcircle (outside the frame) are dropped.
    pub fn add_point(&mut self, p: DVec2) {
        let to_split: Vec<usize> = self
            .triangles
            .iter()
            .enumerate()
            .filter(|(_, tr)| p.distance(tr.center) < tr.radius)
            .map(|(i, _)| i)
            .collect();

        if to_split.is_empty() {
            return;
        }

        let pi = self.points.len();
        self.points.push(p);

        // Boundary edges of the hole: edges of split triangles whose
        // reverse is not present in any other split triangle
        let mut a: Vec<usize> = Vec::new();
        let mut b: Vec<usize> = Vec::new();
        for &t1 in &to_split {
            let tr1 = &self.triangles[t1];
            let mut e1 = true;
            let mut e2 = true;
            let mut e3 = true;
            for &t2 in &to_split {
                if t2 == t1 {
                    continue;
                }
                let tr2 = &self.triangles[t2];
                if e1 && tr2.has_edge(tr1.p2, tr1.p1) {
                    e1 = false;
                }
                if e2 && tr2.has_edge(tr1.p3, tr1.p2) {
                    e2 = false;
                }
                if e3 && tr2.has_edge(tr1.p1, tr1.p3) {
                    e3 = false;
                }
                if !(e1 || e2 || e3) {
                    break;
                }
            }
            if e1 {
                a.push(tr1.p1);
                b.push(tr1.p2);
            }
            if e2 {
                a.push(tr1.p2);
                b.push(tr1.p3);
            }
            if e3 {
                a.push(tr1.p3);
                b.push(tr1.p1);
            }
        }

        // Fan the hole from the new point, chaining boundary edges so
        // consecutive new triangles share an edge
        if !a.is_empty() {
            let mut index = 0;
            loop {
                let tri = Triangle::new(&self.points, pi, a[index], b[index]);
                self.triangles.push(tri);
                match a.iter().position(|&x| x == b[index]) {
                    Some(next) if next != 0 => index = next,
                    _ => break,
                }
            }
        }

        let mut i = 0;
        self.triangles.retain(|_| {
            let keep = !to_split.contains(&i);
            i += 1;
            keep
        });
    }

    /// The cell around a point, triangles sorted by angle around the seed
    pub fn region(&self, seed: usize) -> Region {
        let seed_pt = self.points[seed];
        let mut triangles: Vec<usize> = self
            .triangles
            .iter()
            .enumerate()
            .filter(|(_, tr)| tr.has_point(seed))
            .map(|(i, _)| i)
            .collect();
        triangles.sort_by(|&t1, &t2| {
            let k1 = self.angle_key(t1, seed_pt);
            let k2 = self.angle_key(t2, seed_pt);
            k1.0.total_cmp(&k2.0).then(k1.1.total_cmp(&k2.1))
        });
        Region { seed, triangles }
    }

    fn angle_key(&self, tri: usize, seed: DVec2) -> (f64, f64) {
        let c = self.triangles[tri].center;
        let d = c - seed;
        (d.y.atan2(d.x), c.distance(seed))
    }

    /// Average of a cell's corners; the seed itself for empty cells
    pub fn region_center(&self, r: &Region) -> DVec2 {
        if r.triangles.is_empty() {
            return self.points[r.seed];
        }
        r.triangles
            .iter()
            .map(|&t| self.triangles[t].center)
            .sum::<DVec2>()
            / r.triangles.len() as f64
    }

    /// All properly bounded cells: those touching no frame triangle,
    /// in seed insertion order
    pub fn partitioning(&self) -> Vec<Region> {
        (0..self.points.len())
            .map(|p| self.region(p))
            .filter(|r| {
                !r.triangles.is_empty()
                    && r.triangles.iter().all(|&t| self.is_real(&self.triangles[t]))
            })
            .collect()
    }

    /// Triangles touching no frame corner, by index
    pub fn triangulation(&self) -> Vec<usize> {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, tr)| self.is_real(tr))
            .map(|(i, _)| i)
            .collect()
    }

    /// Lloyd relaxation of a subset of seeds
    ///
    /// `to_relax` holds indices into [`Voronoi::seed_points`]. Each listed
    /// seed with a bounded cell is replaced in place by its cell's center,
    /// so seed order is stable across passes; everything is then rebuilt.
    pub fn relax(&self, to_relax: &[usize]) -> Voronoi {
        let regions = self.partitioning();
        let mut seeds: Vec<DVec2> = self.seed_points().to_vec();

        for r in &regions {
            if r.seed < FRAME_POINTS {
                continue;
            }
            let seed_index = r.seed - FRAME_POINTS;
            if to_relax.contains(&seed_index) {
                seeds[seed_index] = self.region_center(r);
            }
        }

        Voronoi::build(&seeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_seeds(n: usize, step: f64) -> Vec<DVec2> {
        let mut seeds = Vec::new();
        for i in 0..n {
            for j in 0..n {
                // Slight offset keeps the triangulation out of degenerate
                // cocircular configurations
                let jitter = ((i * 7 + j * 13) % 5) as f64 * 0.01;
                seeds.push(DVec2::new(i as f64 * step + jitter, j as f64 * step));
            }
        }
        seeds
    }

    #[test]
    fn test_frame_setup() {
        let v = Voronoi::new(-10.0, -10.0, 10.0, 10.0);
        assert_eq!(v.points.len(), 4);
        assert_eq!(v.triangles.len(), 2);
        assert!(v.seed_points().is_empty());
    }

    #[test]
    fn test_single_point_splits_frame() {
        let mut v = Voronoi::new(-10.0, -10.0, 10.0, 10.0);
        v.add_point(DVec2::new(0.0, 1.0));
        assert_eq!(v.seed_points().len(), 1);
        assert!(v.triangles.len() > 2);
        // Every triangle now references the new point or a frame corner
        for tr in &v.triangles {
            assert!(tr.p1 < v.points.len() && tr.p2 < v.points.len() && tr.p3 < v.points.len());
        }
    }

    #[test]
    fn test_circumcircle_of_right_triangle() {
        // Right triangle: circumcenter is the hypotenuse midpoint
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(0.0, 3.0),
        ];
        let tr = Triangle::new(&points, 0, 1, 2);
        assert!((tr.center - DVec2::new(2.0, 1.5)).length() < 1e-9);
        assert!((tr.radius - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_partitioning_excludes_frame_touchers() {
        let v = Voronoi::build(&grid_seeds(5, 10.0));
        let regions = v.partitioning();
        // Only interior cells are bounded; a 5x5 grid has a 3x3 interior
        assert_eq!(regions.len(), 9);
        for r in &regions {
            assert!(r.seed >= 4);
            assert!(r.triangles.len() >= 3);
        }
        // Every bounded cell draws its corners from the frame-free set
        let real = v.triangulation();
        for r in &regions {
            for t in &r.triangles {
                assert!(real.contains(t));
            }
        }
    }

    #[test]
    fn test_cell_corners_shared_between_neighbors() {
        let v = Voronoi::build(&grid_seeds(5, 10.0));
        let regions = v.partitioning();
        // Adjacent interior cells share at least two triangle indices
        // (the corners of their common edge)
        let mut shared_any = false;
        for (i, r1) in regions.iter().enumerate() {
            for r2 in &regions[i + 1..] {
                let common = r1
                    .triangles
                    .iter()
                    .filter(|t| r2.triangles.contains(t))
                    .count();
                if common >= 2 {
                    shared_any = true;
                }
            }
        }
        assert!(shared_any);
    }

    #[test]
    fn test_angular_order_traces_convex_cell() {
        let v = Voronoi::build(&grid_seeds(5, 10.0));
        let regions = v.partitioning();
        for r in &regions {
            let seed = v.points[r.seed];
            let angles: Vec<f64> = r
                .triangles
                .iter()
                .map(|&t| {
                    let d = v.triangles[t].center - seed;
                    d.y.atan2(d.x)
                })
                .collect();
            // Sorted ascending
            for w in angles.windows(2) {
                assert!(w[0] <= w[1]);
            }
        }
    }

    #[test]
    fn test_relax_moves_toward_centroid() {
        let seeds = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(20.0, 1.0),
            DVec2::new(10.0, 18.0),
            DVec2::new(9.0, 7.0),
            DVec2::new(12.0, 9.0),
        ];
        let v = Voronoi::build(&seeds);
        let before = v.partitioning().len();
        let relaxed = v.relax(&[3, 4]);
        assert_eq!(relaxed.seed_points().len(), seeds.len());
        // Relaxation must not lose bounded cells
        assert!(relaxed.partitioning().len() >= before.min(1));
    }

    #[test]
    fn test_relax_preserves_seed_order() {
        let seeds = grid_seeds(4, 10.0);
        let v = Voronoi::build(&seeds);
        // Index 5 is an interior seed with a bounded cell
        let relaxed = v.relax(&[5]);
        let pts = relaxed.seed_points();
        assert_eq!(pts.len(), seeds.len());
        assert_ne!(pts[5], seeds[5]);
        // Every untouched seed keeps its slot, so repeated passes with the
        // same indices keep hitting the same seeds
        for (i, &s) in seeds.iter().enumerate() {
            if i != 5 {
                assert_eq!(pts[i], s);
            }
        }
    }

    #[test]
    fn test_outside_point_dropped() {
        let mut v = Voronoi::new(-1.0, -1.0, 1.0, 1.0);
        v.add_point(DVec2::new(500.0, 500.0));
        assert!(v.seed_points().is_empty());
    }
}
