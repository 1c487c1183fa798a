/*!
Walk agents across the surface of a triangulated mesh.

A [`WalkMesh`] is an immutable triangle mesh made for moving points along its
surface, the way characters move across the walkable geometry of a level. A
position on the surface is a [`WalkPoint`]: a triangle and the barycentric
weights of the position inside it. Walk points stay on the surface by
construction, and moving one is cheap because only the triangles along the path
are visited.

# Overview

+ Build a [`WalkMesh`] from vertex positions, vertex normals and triangles, or
  with [`WalkMesh::with_computed_normals`]. Some simple shapes such as
  [`WalkMesh::grid`] and [`WalkMesh::quad_box`] are provided. A mesh is
  validated on construction: every triangle must have a nonzero area, and every
  directed edge may belong to at most one triangle.

+ Meshes can be stored as chunk blobs with [`WalkMesh::save`] and
  [`WalkMesh::load`]. A blob is a sequence of chunks, each of which is a 4 byte
  tag, a little endian `u32` payload length and the payload. The `vtx0` and
  `nom0` chunks hold the vertex positions and normals as 3 `f32` each, and the
  `tri0` chunk holds the triangles as 3 `u32` vertex indices each. With the
  `obj` feature, meshes can also be loaded from OBJ files.

+ [`WalkMesh::start`] places a walk point at the point on the surface closest
  to some position in space. [`WalkMesh::walk`] moves a walk point by a step,
  crossing into neighboring triangles as needed. The connectivity of the
  triangles is precomputed into an [`Adjacency`] when the mesh is built.

+ How a walk treats the boundary of an open mesh, and how many edges it may
  cross, is controlled by a [`WalkConfig`] passed to [`WalkMesh::walk_with`].
  Every walk returns a [`WalkReport`] saying how it ended.

```
use glam::vec3;
use walkmesh::{WalkMesh, WalkOutcome};

let mesh = WalkMesh::grid(4, 4, 1.0).unwrap();
let mut wp = mesh.start(vec3(0.5, 0.5, 2.0)).unwrap();
let report = mesh.walk(&mut wp, vec3(2.0, 0.0, 0.0));
assert_eq!(report.outcome, WalkOutcome::Arrived);
assert!(mesh.world_point(&wp).distance(vec3(2.5, 0.5, 0.0)) < 1e-5);
```
*/

mod adjacency;
mod check;
pub mod chunk;
mod error;
mod locate;
mod macros;
pub mod math;
mod mesh;
#[cfg(feature = "obj")]
mod obj;
mod primitive;
mod walk;

pub use adjacency::Adjacency;
pub use error::Error;
pub use locate::SurfaceHit;
pub use mesh::WalkMesh;
pub use walk::{
    BoundaryPolicy, DEFAULT_MAX_DEPTH, WEIGHT_EPSILON, WalkConfig, WalkOutcome, WalkPoint,
    WalkReport,
};
