use glam::Vec3;

/// Barycentric coordinates `(u, v, w)` of `p` with respect to the triangle
/// `(a, b, c)`, such that `p = u * a + v * b + w * c` when `p` lies in the
/// plane of the triangle.
///
/// Points off the plane are projected onto it. The coordinates sum to one but
/// are not clamped, so points outside the triangle have negative components.
/// Degenerate triangles produce non-finite coordinates.
pub fn barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    // Ratios of sub-triangle areas, signed along the normal. Unlike the dot
    // product form this does not cancel for thin triangles.
    let n = v0.cross(v1);
    let nn = n.length_squared();
    let v = v2.cross(v1).dot(n) / nn;
    let w = v0.cross(v2).dot(n) / nn;
    glam::vec3(1.0 - v - w, v, w)
}

/// Determinant of the quadratic form [`closest_point_on_triangle`] divides by.
/// It can round to zero for very thin triangles whose area does not.
pub fn gram_determinant(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    let v0 = b - a;
    let v1 = c - a;
    let d01 = v0.dot(v1);
    v0.dot(v0) * v1.dot(v1) - d01 * d01
}

/// The point on the triangle `(a, b, c)` closest to `p`.
///
/// The triangle is parameterized as `a + s * (b - a) + t * (c - a)`. The
/// unconstrained minimizer `(s, t)` of the squared distance is found from the
/// quadratic form of the two edge vectors, and then clamped into whichever of
/// the seven regions around the triangle it falls in.
pub fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let edge0 = b - a;
    let edge1 = c - a;
    let v0 = a - p;

    let a00 = edge0.dot(edge0);
    let a01 = edge0.dot(edge1);
    let a11 = edge1.dot(edge1);
    let b0 = edge0.dot(v0);
    let b1 = edge1.dot(v0);

    let det = a00 * a11 - a01 * a01;
    let mut s = a01 * b1 - a11 * b0;
    let mut t = a01 * b0 - a00 * b1;

    if s + t < det {
        if s < 0.0 {
            if t < 0.0 {
                if b0 < 0.0 {
                    s = (-b0 / a00).clamp(0.0, 1.0);
                    t = 0.0;
                } else {
                    s = 0.0;
                    t = (-b1 / a11).clamp(0.0, 1.0);
                }
            } else {
                s = 0.0;
                t = (-b1 / a11).clamp(0.0, 1.0);
            }
        } else if t < 0.0 {
            s = (-b0 / a00).clamp(0.0, 1.0);
            t = 0.0;
        } else {
            let inv_det = 1.0 / det;
            s *= inv_det;
            t *= inv_det;
        }
    } else if s < 0.0 {
        let tmp0 = a01 + b0;
        let tmp1 = a11 + b1;
        if tmp1 > tmp0 {
            s = ((tmp1 - tmp0) / (a00 - 2.0 * a01 + a11)).clamp(0.0, 1.0);
            t = 1.0 - s;
        } else {
            s = 0.0;
            t = (-b1 / a11).clamp(0.0, 1.0);
        }
    } else if t < 0.0 {
        if a00 + b0 > a01 + b1 {
            s = ((a11 + b1 - a01 - b0) / (a00 - 2.0 * a01 + a11)).clamp(0.0, 1.0);
            t = 1.0 - s;
        } else {
            s = (-b0 / a00).clamp(0.0, 1.0);
            t = 0.0;
        }
    } else {
        s = ((a11 + b1 - a01 - b0) / (a00 - 2.0 * a01 + a11)).clamp(0.0, 1.0);
        t = 1.0 - s;
    }

    a + s * edge0 + t * edge1
}

/// Unit normal of the triangle following the counter-clockwise winding.
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Twice the area of the triangle, as the length of the edge cross product.
pub fn double_area(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    (b - a).cross(c - a).length()
}

#[cfg(test)]
mod test {
    use glam::{Vec3, vec3};

    use super::{
        barycentric, closest_point_on_triangle, double_area, gram_determinant, triangle_normal,
    };
    use crate::macros::{assert_f32_eq, assert_vec3_eq};

    const A: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    const B: Vec3 = Vec3::new(2.0, 0.0, 0.0);
    const C: Vec3 = Vec3::new(0.0, 2.0, 0.0);

    #[test]
    fn t_barycentric_vertices() {
        assert_vec3_eq!(barycentric(A, A, B, C), Vec3::X);
        assert_vec3_eq!(barycentric(B, A, B, C), Vec3::Y);
        assert_vec3_eq!(barycentric(C, A, B, C), Vec3::Z);
    }

    #[test]
    fn t_barycentric_outside() {
        let w = barycentric(vec3(3.0, 0.5, 0.0), A, B, C);
        assert_f32_eq!(w.x + w.y + w.z, 1.0, 1e-6);
        assert!(w.x < 0.0);
        assert!(w.y > 0.0 && w.z > 0.0);
        // Reconstructs the point.
        assert_vec3_eq!(w.x * A + w.y * B + w.z * C, vec3(3.0, 0.5, 0.0));
    }

    #[test]
    fn t_barycentric_projects_off_plane_points() {
        let w = barycentric(vec3(0.5, 0.5, 4.0), A, B, C);
        assert_vec3_eq!(w.x * A + w.y * B + w.z * C, vec3(0.5, 0.5, 0.0));
    }

    #[test]
    fn t_barycentric_degenerate() {
        let w = barycentric(vec3(0.5, 0.0, 0.0), A, B, vec3(1.0, 0.0, 0.0));
        assert!(!w.is_finite());
    }

    #[test]
    fn t_barycentric_thin_triangle() {
        // One millimeter wide and one meter tall.
        let (a, b, c) = (Vec3::ZERO, vec3(1e-3, 1.0, 0.0), Vec3::Y);
        let p = vec3(3e-4, 0.8, 0.0);
        let w = barycentric(p, a, b, c);
        assert_vec3_eq!(w, vec3(0.2, 0.3, 0.5), 1e-4);
        assert_vec3_eq!(w.x * a + w.y * b + w.z * c, p, 1e-6);
    }

    #[test]
    fn t_gram_determinant() {
        assert_f32_eq!(gram_determinant(A, B, C), 16.0);
        // Rounds to zero although the area does not.
        let thin = vec3(1.0, 1e-4, 0.0);
        assert!(double_area(A, Vec3::X, thin) > 0.0);
        assert!(gram_determinant(A, Vec3::X, thin) <= 0.0);
    }

    #[test]
    fn t_closest_point_regions() {
        // Interior, above the plane.
        assert_vec3_eq!(
            closest_point_on_triangle(vec3(0.5, 0.5, 3.0), A, B, C),
            vec3(0.5, 0.5, 0.0)
        );
        // Vertex regions.
        assert_vec3_eq!(closest_point_on_triangle(vec3(-1.0, -1.0, 1.0), A, B, C), A);
        assert_vec3_eq!(closest_point_on_triangle(vec3(5.0, -1.0, 0.0), A, B, C), B);
        assert_vec3_eq!(closest_point_on_triangle(vec3(-1.0, 5.0, 0.0), A, B, C), C);
        // Edge regions.
        assert_vec3_eq!(
            closest_point_on_triangle(vec3(1.0, -3.0, 0.0), A, B, C),
            vec3(1.0, 0.0, 0.0)
        );
        assert_vec3_eq!(
            closest_point_on_triangle(vec3(-3.0, 1.0, 0.0), A, B, C),
            vec3(0.0, 1.0, 0.0)
        );
        assert_vec3_eq!(
            closest_point_on_triangle(vec3(2.0, 2.0, 0.0), A, B, C),
            vec3(1.0, 1.0, 0.0)
        );
    }

    #[test]
    fn t_closest_point_brute_force() {
        let (a, b, c) = (
            vec3(0.3, -0.2, 0.1),
            vec3(1.7, 0.4, -0.5),
            vec3(-0.4, 1.1, 0.9),
        );
        let mut samples = Vec::new();
        let n = 200;
        for i in 0..=n {
            for j in 0..=(n - i) {
                let s = i as f32 / n as f32;
                let t = j as f32 / n as f32;
                samples.push(a + s * (b - a) + t * (c - a));
            }
        }
        for p in [
            vec3(2.0, 2.0, 2.0),
            vec3(-1.0, 0.0, 0.5),
            vec3(0.5, 0.5, -3.0),
            vec3(1.0, -2.0, 0.0),
            vec3(0.4, 0.4, 0.2),
        ] {
            let q = closest_point_on_triangle(p, a, b, c);
            let best = samples
                .iter()
                .map(|s| s.distance(p))
                .fold(f32::MAX, f32::min);
            assert!(q.distance(p) <= best + 1e-5);
            assert!(best - q.distance(p) < 0.02);
        }
    }

    #[test]
    fn t_triangle_normal_and_area() {
        assert_vec3_eq!(triangle_normal(A, B, C), Vec3::Z);
        assert_vec3_eq!(triangle_normal(A, C, B), -Vec3::Z);
        assert_f32_eq!(double_area(A, B, C), 4.0);
        assert_eq!(triangle_normal(A, B, B), Vec3::ZERO);
    }
}
