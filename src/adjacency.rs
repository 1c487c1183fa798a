use std::collections::HashMap;

use crate::error::Error;

/// Directed edge lookup for a triangle soup.
///
/// Every triangle `(i, j, k)` contributes the directed edges `(i, j)`,
/// `(j, k)` and `(k, i)`. Two consistently wound triangles sharing an edge
/// traverse it in opposite directions, so the triangle across edge `(a, b)` is
/// the one that owns the directed edge `(b, a)`.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    /// `(a, b) -> c` for every triangle `(a, b, c)` and its rotations.
    next_vertex: HashMap<(u32, u32), u32>,
    /// `(a, b) -> t` where `t` is the index of the triangle owning the edge.
    edge_triangle: HashMap<(u32, u32), usize>,
}

impl Adjacency {
    /// Build the adjacency from the triangles. Fails if a directed edge is
    /// shared by two triangles.
    pub fn new(triangles: &[[u32; 3]]) -> Result<Self, Error> {
        let nedges = triangles.len() * 3;
        let mut adj = Adjacency {
            next_vertex: HashMap::with_capacity(nedges),
            edge_triangle: HashMap::with_capacity(nedges),
        };
        for (ti, &[i, j, k]) in triangles.iter().enumerate() {
            for (a, b, c) in [(i, j, k), (j, k, i), (k, i, j)] {
                if adj.next_vertex.insert((a, b), c).is_some() {
                    return Err(Error::NonManifoldEdge(a, b));
                }
                adj.edge_triangle.insert((a, b), ti);
            }
        }
        Ok(adj)
    }

    /// The third vertex of the triangle that owns the directed edge `(a, b)`.
    pub fn next_vertex(&self, a: u32, b: u32) -> Option<u32> {
        self.next_vertex.get(&(a, b)).copied()
    }

    /// The third vertex of the triangle on the other side of the edge `(a, b)`,
    /// or `None` if the edge is on the boundary of the mesh.
    pub fn neighbor_across(&self, a: u32, b: u32) -> Option<u32> {
        self.next_vertex(b, a)
    }

    /// Index of the triangle on the other side of the edge `(a, b)`.
    pub fn triangle_across(&self, a: u32, b: u32) -> Option<usize> {
        self.edge_triangle.get(&(b, a)).copied()
    }

    /// Index of the triangle that owns the directed edge `(a, b)`.
    pub fn edge_triangle(&self, a: u32, b: u32) -> Option<usize> {
        self.edge_triangle.get(&(a, b)).copied()
    }

    pub fn is_boundary_edge(&self, a: u32, b: u32) -> bool {
        self.next_vertex.contains_key(&(a, b)) != self.next_vertex.contains_key(&(b, a))
    }

    /// Directed edges with no triangle on the other side, oriented the way
    /// their own triangle winds them.
    pub fn boundary_edges(&self) -> impl Iterator<Item = (u32, u32)> + use<'_> {
        self.next_vertex
            .keys()
            .filter(|(a, b)| !self.next_vertex.contains_key(&(*b, *a)))
            .copied()
    }

    pub fn num_directed_edges(&self) -> usize {
        self.next_vertex.len()
    }
}

#[cfg(test)]
mod test {
    use super::Adjacency;
    use crate::{error::Error, mesh::WalkMesh};

    #[test]
    fn t_square_adjacency() {
        let adj = Adjacency::new(&[[0, 1, 2], [0, 2, 3]]).expect("Cannot build adjacency");
        assert_eq!(adj.num_directed_edges(), 6);
        assert_eq!(adj.next_vertex(0, 1), Some(2));
        assert_eq!(adj.next_vertex(1, 2), Some(0));
        assert_eq!(adj.next_vertex(2, 0), Some(1));
        // The diagonal is shared.
        assert_eq!(adj.neighbor_across(0, 2), Some(1));
        assert_eq!(adj.neighbor_across(2, 0), Some(3));
        assert_eq!(adj.triangle_across(2, 0), Some(1));
        assert_eq!(adj.triangle_across(0, 2), Some(0));
        // Outer edges are not.
        assert_eq!(adj.neighbor_across(1, 2), None);
        assert_eq!(adj.triangle_across(1, 2), None);
        assert!(adj.is_boundary_edge(1, 2));
        assert!(!adj.is_boundary_edge(0, 2));
        let mut boundary: Vec<_> = adj.boundary_edges().collect();
        boundary.sort();
        assert_eq!(boundary, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    }

    #[test]
    fn t_duplicate_directed_edge() {
        // Second triangle is wound the wrong way.
        assert!(matches!(
            Adjacency::new(&[[0, 1, 2], [0, 1, 3]]),
            Err(Error::NonManifoldEdge(0, 1))
        ));
    }

    #[test]
    fn t_closed_mesh_neighbors() {
        for mesh in [
            WalkMesh::tetrahedron(1.0).expect("Cannot create tetrahedron"),
            WalkMesh::octahedron(1.0).expect("Cannot create octahedron"),
            WalkMesh::quad_box(glam::Vec3::ZERO, glam::Vec3::ONE).expect("Cannot create box"),
        ] {
            let adj = mesh.adjacency();
            assert_eq!(adj.boundary_edges().count(), 0);
            for &[i, j, k] in mesh.triangles() {
                assert_eq!(adj.next_vertex(i, j), Some(k));
                assert_eq!(adj.next_vertex(j, k), Some(i));
                assert_eq!(adj.next_vertex(k, i), Some(j));
                for (a, b) in [(i, j), (j, k), (k, i)] {
                    let c = adj.neighbor_across(a, b).expect("Closed mesh has no boundary");
                    let t = adj.triangle_across(a, b).expect("Closed mesh has no boundary");
                    let other = mesh.triangle(t);
                    assert!(other.contains(&a));
                    assert!(other.contains(&b));
                    assert!(other.contains(&c));
                    assert_ne!(other, [i, j, k]);
                }
            }
        }
    }
}
