use glam::{Vec3, vec3};

use crate::{error::Error, mesh::WalkMesh};

/// Open meshes.
impl WalkMesh {
    /// The unit square in the XY plane, split along its diagonal into the
    /// triangles `(0, 1, 2)` and `(0, 2, 3)`.
    ///
    ///  ```text
    ///    3-----------2
    ///    |         / |
    ///    |       /   |
    ///    |     /     |
    ///    |   /       |
    ///    | /         |
    ///    0-----------1
    ///  ```
    pub fn unit_square() -> Result<Self, Error> {
        Self::new(
            vec![
                vec3(0.0, 0.0, 0.0),
                vec3(1.0, 0.0, 0.0),
                vec3(1.0, 1.0, 0.0),
                vec3(0.0, 1.0, 0.0),
            ],
            vec![Vec3::Z; 4],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    /// A flat grid in the XY plane with `nx` by `ny` square cells of the given
    /// size, with one corner at the origin. Every cell is split like
    /// [`WalkMesh::unit_square`]. Vertex `(i, j)` has index `j * (nx + 1) + i`.
    pub fn grid(nx: u32, ny: u32, size: f32) -> Result<Self, Error> {
        let stride = nx + 1;
        let mut vertices = Vec::with_capacity(((nx + 1) * (ny + 1)) as usize);
        for j in 0..=ny {
            for i in 0..=nx {
                vertices.push(vec3(i as f32 * size, j as f32 * size, 0.0));
            }
        }
        let mut triangles = Vec::with_capacity((nx * ny * 2) as usize);
        for j in 0..ny {
            for i in 0..nx {
                let v00 = j * stride + i;
                let v10 = v00 + 1;
                let v01 = v00 + stride;
                let v11 = v01 + 1;
                triangles.push([v00, v10, v11]);
                triangles.push([v00, v11, v01]);
            }
        }
        let normals = vec![Vec3::Z; vertices.len()];
        Self::new(vertices, normals, triangles)
    }
}

/// Closed meshes.
impl WalkMesh {
    /// Create a tetrahedron centered at the origin, with the given
    /// circumradius.
    pub fn tetrahedron(radius: f32) -> Result<Self, Error> {
        let a = radius / 3.0;
        let b = radius * (8.0f32 / 9.0).sqrt();
        let c = radius * (2.0f32 / 9.0).sqrt();
        let d = radius * (2.0f32 / 3.0).sqrt();
        Self::with_computed_normals(
            vec![
                vec3(0.0, 0.0, radius),
                vec3(-c, d, -a),
                vec3(-c, -d, -a),
                vec3(b, 0.0, -a),
            ],
            vec![[0, 1, 2], [0, 2, 3], [0, 3, 1], [3, 2, 1]],
        )
    }

    /// Create an octahedron centered at the origin, with the given
    /// circumradius.
    pub fn octahedron(radius: f32) -> Result<Self, Error> {
        Self::with_computed_normals(
            vec![
                vec3(radius, 0.0, 0.0),
                vec3(0.0, radius, 0.0),
                vec3(-radius, 0.0, 0.0),
                vec3(0.0, -radius, 0.0),
                vec3(0.0, 0.0, radius),
                vec3(0.0, 0.0, -radius),
            ],
            vec![
                [0, 4, 3],
                [1, 4, 0],
                [2, 4, 1],
                [3, 4, 2],
                [3, 5, 0],
                [0, 5, 1],
                [1, 5, 2],
                [2, 5, 3],
            ],
        )
    }

    /// Makes a box spanning from the min point to the max point, with every
    /// side split into two triangles.
    ///
    ///  ```text
    ///       7-----------6
    ///      /|          /|
    ///     / |         / |
    ///    4-----------5  |
    ///    |  |        |  |
    ///    |  3--------|--2
    ///    | /         | /
    ///    |/          |/
    ///    0-----------1
    ///  ```
    pub fn quad_box(min: Vec3, max: Vec3) -> Result<Self, Error> {
        const BOX_POS: [(bool, bool, bool); 8] = [
            (false, false, false),
            (true, false, false),
            (true, true, false),
            (false, true, false),
            (false, false, true),
            (true, false, true),
            (true, true, true),
            (false, true, true),
        ];
        const BOX_IDX: [[u32; 4]; 6] = [
            [0, 3, 2, 1],
            [0, 1, 5, 4],
            [1, 2, 6, 5],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
            [4, 5, 6, 7],
        ];
        let vertices = BOX_POS
            .iter()
            .map(|&(xf, yf, zf)| {
                vec3(
                    if xf { max.x } else { min.x },
                    if yf { max.y } else { min.y },
                    if zf { max.z } else { min.z },
                )
            })
            .collect();
        let triangles = BOX_IDX
            .iter()
            .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
            .collect();
        Self::with_computed_normals(vertices, triangles)
    }
}
