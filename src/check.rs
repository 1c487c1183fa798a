use glam::Vec3;

use crate::{error::Error, math};

/// Check that every triangle references three distinct, valid vertices.
pub(crate) fn check_triangles(nverts: usize, triangles: &[[u32; 3]]) -> Result<(), Error> {
    for (ti, tri) in triangles.iter().enumerate() {
        if let Some(&vertex) = tri.iter().find(|&&v| v as usize >= nverts) {
            return Err(Error::VertexIndexOutOfRange {
                triangle: ti,
                vertex,
            });
        }
        let [i, j, k] = *tri;
        if i == j || j == k || k == i {
            return Err(Error::DegenerateTriangle(ti));
        }
    }
    Ok(())
}

/// Check the arrays a walk mesh is made of. The manifold check happens while
/// building the adjacency.
pub(crate) fn check_mesh(
    vertices: &[Vec3],
    normals: &[Vec3],
    triangles: &[[u32; 3]],
) -> Result<(), Error> {
    if vertices.len() != normals.len() {
        return Err(Error::MismatchedArrayLengths(vertices.len(), normals.len()));
    }
    check_triangles(vertices.len(), triangles)?;
    for (ti, tri) in triangles.iter().enumerate() {
        let [a, b, c] = tri.map(|v| vertices[v as usize]);
        // Zero area triangles have no barycentric coordinates. Closest points
        // also need the edge dot products to be independent in f32.
        let area = math::double_area(a, b, c);
        let denom = math::gram_determinant(a, b, c);
        if area.is_nan() || area <= 0.0 || !denom.is_finite() || denom <= 0.0 {
            return Err(Error::DegenerateTriangle(ti));
        }
    }
    Ok(())
}
