use glam::Vec3;

use crate::{
    error::Error,
    math::{barycentric, closest_point_on_triangle},
    mesh::WalkMesh,
    walk::WalkPoint,
};

/// Closest point on the surface of the mesh to some query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Index of the triangle containing the closest point.
    pub triangle: usize,
    pub point: Vec3,
    pub distance: f32,
}

impl WalkMesh {
    /// Find the point on the surface closest to `query` by checking every
    /// triangle. Ties go to the triangle that comes first. Returns `None` if
    /// the mesh has no triangles.
    pub fn closest_point(&self, query: Vec3) -> Option<SurfaceHit> {
        let mut best: Option<SurfaceHit> = None;
        for (ti, &tri) in self.triangles().iter().enumerate() {
            let [a, b, c] = self.triangle_points(tri);
            let point = closest_point_on_triangle(query, a, b, c);
            let distance = point.distance(query);
            if best.is_none_or(|hit| distance < hit.distance) {
                best = Some(SurfaceHit {
                    triangle: ti,
                    point,
                    distance,
                });
            }
        }
        best
    }

    /// Place a walk point on the surface, at the point closest to `query`.
    ///
    /// This visits every triangle, so it is meant to be called once when an
    /// agent is placed on the mesh. Use [`WalkMesh::walk`] to move it after.
    pub fn start(&self, query: Vec3) -> Result<WalkPoint, Error> {
        let hit = self.closest_point(query).ok_or(Error::EmptyMesh)?;
        let triangle = self.triangle(hit.triangle);
        let weights = surface_weights(hit.point, self.triangle_points(triangle));
        log::debug!(
            "Starting walk on triangle {} at {} ({} from {})",
            hit.triangle,
            hit.point,
            hit.distance,
            query
        );
        Ok(WalkPoint { triangle, weights })
    }
}

/// Barycentric weights of a point on the triangle. If they cannot be computed
/// the nearest corner takes all the weight, so a walk point is never NaN.
fn surface_weights(point: Vec3, [a, b, c]: [Vec3; 3]) -> Vec3 {
    let weights = barycentric(point, a, b, c);
    if weights.is_finite() {
        return weights;
    }
    [(a, Vec3::X), (b, Vec3::Y), (c, Vec3::Z)]
        .into_iter()
        .min_by(|(p, _), (q, _)| point.distance(*p).total_cmp(&point.distance(*q)))
        .map_or(Vec3::X, |(_, w)| w)
}
