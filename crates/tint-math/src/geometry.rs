//! Ray geometry used by the ray-trace gamut fitters.
//!
//! - [`raytrace_box`] - slab intersection of a ray with an axis-aligned box
//! - [`raytrace_cube`] - closed-form segment/cube-face intersection that also
//!   reports which face was struck
//! - [`project_onto`] - clamped projection onto a segment
//!
//! Points are plain `[f64; 3]` at the API; the math runs on [`glam::DVec3`].
//!
//! ```text
//!           +---------+ bmax
//!           |         |
//!  start *--|----->   |      the hit is the first slab crossing
//!           |         |      (or the exit when start is inside)
//!      bmin +---------+
//! ```

use glam::DVec3;

/// Tolerance on the face extents when validating a cube hit.
const FACE_EPSILON: f64 = 1e-12;

/// Intersects the ray `start -> end` with the box `[bmin, bmax]`.
///
/// Returns the entry point, or the exit point when `start` is already inside.
/// `None` when the ray misses, points away, or has zero length.
pub fn raytrace_box(start: [f64; 3], end: [f64; 3], bmin: [f64; 3], bmax: [f64; 3]) -> Option<[f64; 3]> {
    let a = DVec3::from_array(start);
    let d = DVec3::from_array(end) - a;

    let mut tnear = f64::NEG_INFINITY;
    let mut tfar = f64::INFINITY;
    for i in 0..3 {
        if d[i] != 0.0 {
            let t1 = (bmin[i] - a[i]) / d[i];
            let t2 = (bmax[i] - a[i]) / d[i];
            tnear = tnear.max(t1.min(t2));
            tfar = tfar.min(t1.max(t2));
        } else if a[i] < bmin[i] || a[i] > bmax[i] {
            // parallel to this slab and outside it
            return None;
        }
    }

    if tnear > tfar || tfar < 0.0 {
        return None;
    }
    if tnear < 0.0 {
        tnear = tfar;
    }
    if tnear.is_infinite() {
        return None;
    }
    Some((a + d * tnear).to_array())
}

/// [`raytrace_box`] against the unit cube.
pub fn raytrace_unit_box(start: [f64; 3], end: [f64; 3]) -> Option<[f64; 3]> {
    raytrace_box(start, end, [0.0; 3], [1.0; 3])
}

/// A face of the cube `[0, size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CubeFace {
    /// `x = 0`
    MinX = 1,
    /// `x = size.x`
    MaxX = 2,
    /// `y = 0`
    MinY = 3,
    /// `y = size.y`
    MaxY = 4,
    /// `z = 0`
    MinZ = 5,
    /// `z = size.z`
    MaxZ = 6,
}

impl CubeFace {
    const ALL: [CubeFace; 6] = [
        CubeFace::MinX,
        CubeFace::MaxX,
        CubeFace::MinY,
        CubeFace::MaxY,
        CubeFace::MinZ,
        CubeFace::MaxZ,
    ];

    /// Face number, 1 through 6.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Axis index the face is perpendicular to.
    pub fn axis(self) -> usize {
        (self.id() as usize - 1) / 2
    }

    fn is_max(self) -> bool {
        self.id() % 2 == 0
    }
}

/// Result of [`raytrace_cube`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeHit {
    /// Face that was struck.
    pub face: CubeFace,
    /// Intersection point, snapped onto the face plane.
    pub point: [f64; 3],
}

impl CubeHit {
    /// Face id of an optional hit, `0` for none.
    pub fn face_id_or_zero(hit: Option<&CubeHit>) -> u8 {
        hit.map_or(0, |h| h.face.id())
    }
}

/// Finds the first cube face crossed by the segment `start -> end`.
///
/// The cube spans `[0, size]` on each axis. Every face plane is solved in
/// closed form; a candidate counts when its segment parameter lies in
/// `[0, 1]` and the point lies within the face. The smallest parameter wins,
/// ties going to the lower face id. A segment with both ends inside crosses
/// nothing.
pub fn raytrace_cube(size: [f64; 3], start: [f64; 3], end: [f64; 3]) -> Option<CubeHit> {
    let a = DVec3::from_array(start);
    let d = DVec3::from_array(end) - a;
    let extent = DVec3::from_array(size);

    let mut best: Option<(f64, CubeFace, DVec3)> = None;
    for face in CubeFace::ALL {
        let axis = face.axis();
        if d[axis] == 0.0 {
            continue;
        }
        let plane = if face.is_max() { extent[axis] } else { 0.0 };
        let t = (plane - a[axis]) / d[axis];
        if !(0.0..=1.0).contains(&t) {
            continue;
        }
        let mut p = a + d * t;
        p[axis] = plane;
        let on_face = (0..3)
            .filter(|&o| o != axis)
            .all(|o| p[o] >= -FACE_EPSILON && p[o] <= extent[o] + FACE_EPSILON);
        if on_face && best.is_none_or(|(bt, _, _)| t < bt) {
            best = Some((t, face, p));
        }
    }

    best.map(|(_, face, p)| CubeHit {
        face,
        point: p.to_array(),
    })
}

/// Projects `o -> a` onto `o -> b`, clamping the parameter to `[0, 1]`.
///
/// A zero-length `o -> b` returns `o`.
pub fn project_onto(a: [f64; 3], b: [f64; 3], o: [f64; 3]) -> [f64; 3] {
    let origin = DVec3::from_array(o);
    let va = DVec3::from_array(a) - origin;
    let vb = DVec3::from_array(b) - origin;
    let denom = vb.dot(vb);
    if denom == 0.0 {
        return o;
    }
    let r = (va.dot(vb) / denom).clamp(0.0, 1.0);
    (origin + vb * r).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_box_hit_from_inside() {
        let hit = raytrace_unit_box([0.5, 0.5, 0.5], [2.0, 0.5, 0.5]).unwrap();
        assert_relative_eq!(hit[0], 1.0);
        assert_relative_eq!(hit[1], 0.5);
    }

    #[test]
    fn test_box_hit_from_outside() {
        let hit = raytrace_unit_box([-1.0, 0.5, 0.5], [2.0, 0.5, 0.5]).unwrap();
        assert_relative_eq!(hit[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_box_miss() {
        // parallel to x, outside in y
        assert!(raytrace_unit_box([-1.0, 2.0, 0.5], [2.0, 2.0, 0.5]).is_none());
        // pointing away
        assert!(raytrace_unit_box([2.0, 0.5, 0.5], [3.0, 0.5, 0.5]).is_none());
        // diagonal miss
        assert!(raytrace_unit_box([2.0, -1.0, 0.5], [3.0, 0.0, 0.5]).is_none());
        // zero length
        assert!(raytrace_unit_box([0.5; 3], [0.5; 3]).is_none());
    }

    #[test]
    fn test_box_containment_random() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let start: [f64; 3] = std::array::from_fn(|_| rng.gen_range(0.01..0.99));
            let mut end: [f64; 3] = std::array::from_fn(|_| rng.gen_range(-1.0..2.0));
            end[rng.gen_range(0..3)] = if rng.gen_bool(0.5) { 1.5 } else { -0.5 };

            let hit = raytrace_unit_box(start, end).unwrap();
            let on_boundary = hit
                .iter()
                .any(|&c| c.abs() < 1e-9 || (c - 1.0).abs() < 1e-9);
            assert!(on_boundary, "{hit:?}");

            // collinear with start -> end and between them
            let s = DVec3::from_array(start);
            let e = DVec3::from_array(end);
            let h = DVec3::from_array(hit);
            let seg = e - s;
            let t = (h - s).dot(seg) / seg.dot(seg);
            assert!((0.0..=1.0 + 1e-9).contains(&t));
            assert!((s + seg * t - h).length() < 1e-9);
        }
    }

    #[test]
    fn test_cube_face_selection() {
        let hit = raytrace_cube([1.0; 3], [1.5, 0.5, 0.5], [0.5, 0.5, 0.5]).unwrap();
        assert_eq!(hit.face, CubeFace::MaxX);
        assert_eq!(hit.point, [1.0, 0.5, 0.5]);

        let hit = raytrace_cube([1.0; 3], [0.5, -1.0, 0.5], [0.5, 0.5, 0.5]).unwrap();
        assert_eq!(hit.face, CubeFace::MinY);
        assert_eq!(hit.face.id(), 3);
    }

    #[test]
    fn test_cube_closest_face_wins() {
        // passes through: enters at x = 1 (t = 0.25), leaves at x = 0 (t = 0.75)
        let hit = raytrace_cube([1.0; 3], [1.5, 0.5, 0.5], [-0.5, 0.5, 0.5]).unwrap();
        assert_eq!(hit.face, CubeFace::MaxX);
        let hit = raytrace_cube([1.0; 3], [-0.5, 0.5, 0.5], [1.5, 0.5, 0.5]).unwrap();
        assert_eq!(hit.face, CubeFace::MinX);
        // x = 1 is crossed outside the face, z = 1 is the real entry
        let hit = raytrace_cube([1.0; 3], [1.25, 0.5, 1.5], [0.25, 0.5, 0.5]).unwrap();
        assert_eq!(hit.face, CubeFace::MaxZ);
        // corner: both faces at the same parameter, lower id wins
        let hit = raytrace_cube([1.0; 3], [1.5, 1.5, 0.5], [0.5, 0.5, 0.5]).unwrap();
        assert_eq!(hit.face, CubeFace::MaxX);
    }

    #[test]
    fn test_cube_no_hit() {
        let inside = raytrace_cube([1.0; 3], [0.2, 0.2, 0.2], [0.5, 0.5, 0.5]);
        assert!(inside.is_none());
        assert_eq!(CubeHit::face_id_or_zero(inside.as_ref()), 0);
        assert!(raytrace_cube([1.0; 3], [2.0, 2.0, 2.0], [3.0, 2.0, 2.0]).is_none());
    }

    #[test]
    fn test_cube_sized() {
        let hit = raytrace_cube([2.0, 1.0, 1.0], [3.0, 0.5, 0.5], [1.0, 0.5, 0.5]).unwrap();
        assert_eq!(hit.face, CubeFace::MaxX);
        assert_eq!(hit.point[0], 2.0);
    }

    #[test]
    fn test_project_onto_clamps() {
        let o = [0.0, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        assert_eq!(project_onto([0.5, 1.0, 0.0], b, o), [0.5, 0.0, 0.0]);
        assert_eq!(project_onto([2.0, 1.0, 0.0], b, o), [1.0, 0.0, 0.0]);
        assert_eq!(project_onto([-2.0, 1.0, 0.0], b, o), [0.0, 0.0, 0.0]);
        assert_eq!(project_onto([1.0, 1.0, 1.0], o, o), o);
    }
}
