use std::path::Path;

use glam::Vec3;

use crate::{error::Error, mesh::WalkMesh};

fn to_points(coords: &[f32]) -> Result<Vec<Vec3>, Error> {
    if coords.len() % 3 != 0 {
        return Err(Error::IncorrectNumberOfCoordinates(coords.len()));
    }
    Ok(coords
        .chunks_exact(3)
        .map(|triplet| Vec3::new(triplet[0], triplet[1], triplet[2]))
        .collect())
}

/// Vertex count as an index offset, if it fits in a `u32`.
fn vertex_offset(nverts: usize) -> Result<u32, Error> {
    u32::try_from(nverts)
        .map_err(|_| Error::ObjLoadFailed(format!("Too many vertices: {}", nverts)))
}

impl WalkMesh {
    /// Load a walk mesh from an OBJ file. Polygons are triangulated and all
    /// models in the file are merged into one mesh. The vertex normals are
    /// taken from the file if every model has them, and computed otherwise.
    pub fn load_obj(path: &Path) -> Result<Self, Error> {
        let options = tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        };
        let (models, _) =
            tobj::load_obj(path, &options).map_err(|e| Error::ObjLoadFailed(format!("{}", e)))?;
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut triangles = Vec::new();
        let mut has_normals = true;
        for model in models {
            let mesh = model.mesh;
            let voffset = vertex_offset(vertices.len())?;
            let positions = to_points(&mesh.positions)?;
            if mesh.normals.len() == mesh.positions.len() {
                normals.extend(to_points(&mesh.normals)?);
            } else {
                has_normals = false;
            }
            vertices.extend(positions);
            vertex_offset(vertices.len())?;
            if mesh.indices.len() % 3 != 0 {
                return Err(Error::ObjLoadFailed(format!(
                    "Model '{}' has {} indices, which is not a multiple of 3",
                    model.name,
                    mesh.indices.len()
                )));
            }
            triangles.extend(
                mesh.indices
                    .chunks_exact(3)
                    .map(|t| [t[0] + voffset, t[1] + voffset, t[2] + voffset]),
            );
        }
        log::debug!(
            "Loaded {} vertices and {} triangles from {}",
            vertices.len(),
            triangles.len(),
            path.display()
        );
        if has_normals {
            Self::new(
                vertices,
                normals.into_iter().map(Vec3::normalize_or_zero).collect(),
                triangles,
            )
        } else {
            Self::with_computed_normals(vertices, triangles)
        }
    }
}
