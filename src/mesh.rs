use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use glam::Vec3;

use crate::{
    adjacency::Adjacency,
    check,
    chunk::{self, NORMAL_TAG, TRIANGLE_TAG, VERTEX_TAG},
    error::Error,
    math,
};

/// An immutable triangulated surface that walk points move across.
///
/// The triangles must be wound counter-clockwise when viewed from the side the
/// vertex normals point towards, and every directed edge may belong to at most
/// one triangle. These invariants are checked on construction.
#[derive(Debug, Clone)]
pub struct WalkMesh {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    adjacency: Adjacency,
}

impl WalkMesh {
    /// Create a walk mesh from the vertex positions, vertex normals and
    /// triangles, and build the edge adjacency.
    pub fn new(
        vertices: Vec<Vec3>,
        normals: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, Error> {
        check::check_mesh(&vertices, &normals, &triangles)?;
        let adjacency = Adjacency::new(&triangles)?;
        let mesh = WalkMesh {
            vertices,
            normals,
            triangles,
            adjacency,
        };
        log::info!(
            "Walk mesh with {} vertices, {} triangles and {} boundary edges",
            mesh.num_vertices(),
            mesh.num_triangles(),
            mesh.adjacency.boundary_edges().count()
        );
        Ok(mesh)
    }

    /// Create a walk mesh from positions and triangles, computing the vertex
    /// normals as the area weighted average of the adjacent face normals.
    pub fn with_computed_normals(
        vertices: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, Error> {
        // Validate before indexing into the vertices.
        check::check_triangles(vertices.len(), &triangles)?;
        let normals = compute_vertex_normals(&vertices, &triangles);
        Self::new(vertices, normals, triangles)
    }

    /// Load a walk mesh from a chunk blob on disk.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read(&mut reader)
    }

    /// Read a walk mesh from a chunk blob containing the `vtx0`, `tri0` and
    /// `nom0` chunks. Other chunks are ignored.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, Error> {
        let chunks = chunk::read_chunks(reader)?;
        let vertices = chunk::points(&chunks, VERTEX_TAG)?;
        let triangles = chunk::triples(&chunks, TRIANGLE_TAG)?;
        let normals = chunk::points(&chunks, NORMAL_TAG)?;
        Self::new(vertices, normals, triangles)
    }

    /// Write the walk mesh as a chunk blob to a file on disk.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        chunk::write_points(writer, VERTEX_TAG, &self.vertices)?;
        chunk::write_triples(writer, TRIANGLE_TAG, &self.triangles)?;
        chunk::write_points(writer, NORMAL_TAG, &self.normals)?;
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn vertex(&self, v: u32) -> Vec3 {
        self.vertices[v as usize]
    }

    pub fn normal(&self, v: u32) -> Vec3 {
        self.normals[v as usize]
    }

    pub fn triangle(&self, t: usize) -> [u32; 3] {
        self.triangles[t]
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Positions of the three corners of the triangle.
    pub fn triangle_points(&self, tri: [u32; 3]) -> [Vec3; 3] {
        tri.map(|v| self.vertex(v))
    }
}

/// Area weighted vertex normals. Vertices not referenced by any triangle get a
/// zero normal.
pub(crate) fn compute_vertex_normals(vertices: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];
    for tri in triangles {
        let [a, b, c] = tri.map(|v| vertices[v as usize]);
        // Intentionally not normalizing to account for the face area.
        let n = (b - a).cross(c - a);
        for v in tri {
            normals[*v as usize] += n;
        }
    }
    for n in normals.iter_mut() {
        *n = n.normalize_or_zero();
    }
    normals
}

impl WalkMesh {
    /// Total surface area of the mesh.
    pub fn area(&self) -> f32 {
        self.triangles
            .iter()
            .map(|&tri| {
                let [a, b, c] = self.triangle_points(tri);
                math::double_area(a, b, c)
            })
            .sum::<f32>()
            * 0.5
    }
}

#[cfg(test)]
mod test {
    use glam::{Vec3, vec3};

    use super::WalkMesh;
    use crate::{
        chunk::{self, NORMAL_TAG, TRIANGLE_TAG, VERTEX_TAG},
        error::Error,
        macros::{assert_f32_eq, assert_vec3_eq},
    };

    #[test]
    fn t_unit_square() {
        let mesh = WalkMesh::unit_square().expect("Cannot create square");
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.triangles(), &[[0, 1, 2], [0, 2, 3]]);
        assert_f32_eq!(mesh.area(), 1.0);
        for n in mesh.normals() {
            assert_vec3_eq!(*n, Vec3::Z);
        }
    }

    #[test]
    fn t_blob_round_trip() {
        let mesh = WalkMesh::octahedron(2.0).expect("Cannot create octahedron");
        let mut blob = Vec::new();
        mesh.write(&mut blob).expect("Cannot write mesh");
        let loaded = WalkMesh::read(&mut blob.as_slice()).expect("Cannot read mesh");
        assert_eq!(loaded.vertices(), mesh.vertices());
        assert_eq!(loaded.normals(), mesh.normals());
        assert_eq!(loaded.triangles(), mesh.triangles());
    }

    #[test]
    fn t_save_and_load() {
        let mesh = WalkMesh::grid(3, 2, 1.0).expect("Cannot create grid");
        let dir = tempfile::tempdir().expect("Cannot create temp dir");
        let path = dir.path().join("grid.walk");
        mesh.save(&path).expect("Cannot save mesh");
        let loaded = WalkMesh::load(&path).expect("Cannot load mesh");
        assert_eq!(loaded.num_vertices(), 12);
        assert_eq!(loaded.num_triangles(), 12);
        assert_eq!(loaded.triangles(), mesh.triangles());
    }

    #[test]
    fn t_load_missing_file() {
        let dir = tempfile::tempdir().expect("Cannot create temp dir");
        let err = WalkMesh::load(&dir.path().join("missing.walk"))
            .expect_err("Loading a missing file must fail");
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_load_error());
    }

    #[test]
    fn t_read_chunks_in_any_order() {
        let mut blob = Vec::new();
        chunk::write_points(&mut blob, NORMAL_TAG, &[Vec3::Z; 3]).expect("Cannot write normals");
        chunk::write_triples(&mut blob, TRIANGLE_TAG, &[[0, 1, 2]])
            .expect("Cannot write triangles");
        chunk::write_triples(&mut blob, *b"xtra", &[[7, 7, 7]]).expect("Cannot write extra");
        chunk::write_points(
            &mut blob,
            VERTEX_TAG,
            &[Vec3::ZERO, Vec3::X, Vec3::Y],
        )
        .expect("Cannot write vertices");
        let mesh = WalkMesh::read(&mut blob.as_slice()).expect("Cannot read mesh");
        assert_eq!(mesh.num_triangles(), 1);
        assert_eq!(mesh.vertex(1), Vec3::X);
    }

    #[test]
    fn t_read_missing_normals() {
        let mut blob = Vec::new();
        chunk::write_points(&mut blob, VERTEX_TAG, &[Vec3::ZERO, Vec3::X, Vec3::Y])
            .expect("Cannot write vertices");
        chunk::write_triples(&mut blob, TRIANGLE_TAG, &[[0, 1, 2]])
            .expect("Cannot write triangles");
        assert!(matches!(
            WalkMesh::read(&mut blob.as_slice()),
            Err(Error::MissingChunk(tag)) if tag == NORMAL_TAG
        ));
    }

    #[test]
    fn t_computed_normals() {
        // A roof with two slopes meeting along the x axis.
        let mesh = WalkMesh::with_computed_normals(
            vec![
                vec3(0.0, -1.0, 0.0),
                vec3(1.0, -1.0, 0.0),
                vec3(1.0, 0.0, 1.0),
                vec3(0.0, 0.0, 1.0),
                vec3(1.0, 1.0, 0.0),
                vec3(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3], [3, 2, 4], [3, 4, 5]],
        )
        .expect("Cannot create roof");
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert_vec3_eq!(mesh.normal(0), vec3(0.0, -s, s));
        assert_vec3_eq!(mesh.normal(5), vec3(0.0, s, s));
        // Two faces on one slope and one on the other, all of equal area.
        assert_vec3_eq!(mesh.normal(2), vec3(0.0, -1.0, 3.0).normalize());
        assert_vec3_eq!(mesh.normal(3), vec3(0.0, 1.0, 3.0).normalize());
    }

    #[test]
    fn t_computed_normals_out_of_range() {
        assert!(matches!(
            WalkMesh::with_computed_normals(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 3]]),
            Err(Error::VertexIndexOutOfRange {
                triangle: 0,
                vertex: 3
            })
        ));
    }
}
