use std::fmt;

#[derive(Debug)]
pub enum Error {
    // Chunk blob.
    Io(std::io::Error),
    TruncatedChunk([u8; 4]),
    MissingChunk([u8; 4]),
    DuplicateChunk([u8; 4]),
    /// The payload length of the chunk is not a multiple of its record size.
    InvalidChunkLength([u8; 4], usize),
    // Mesh validation.
    MismatchedArrayLengths(usize, usize),
    VertexIndexOutOfRange {
        triangle: usize,
        vertex: u32,
    },
    DegenerateTriangle(usize),
    /// The directed edge is shared by more than one triangle. Either the mesh
    /// is non-manifold, or the triangles are not wound consistently.
    NonManifoldEdge(u32, u32),
    // Obj.
    ObjLoadFailed(String),
    IncorrectNumberOfCoordinates(usize),
    // Walking.
    EmptyMesh,
}

impl Error {
    /// Whether this error was raised while constructing a mesh.
    pub fn is_load_error(&self) -> bool {
        !matches!(self, Error::EmptyMesh)
    }
}

fn magic_str(magic: &[u8; 4]) -> String {
    String::from_utf8_lossy(magic).into_owned()
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::TruncatedChunk(m) => write!(f, "chunk '{}' is truncated", magic_str(m)),
            Error::MissingChunk(m) => write!(f, "chunk '{}' is missing", magic_str(m)),
            Error::DuplicateChunk(m) => {
                write!(f, "chunk '{}' appears more than once", magic_str(m))
            }
            Error::InvalidChunkLength(m, len) => write!(
                f,
                "chunk '{}' has length {len}, which is not a whole number of records",
                magic_str(m)
            ),
            Error::MismatchedArrayLengths(a, b) => {
                write!(f, "mismatched array lengths: {a} and {b}")
            }
            Error::VertexIndexOutOfRange { triangle, vertex } => write!(
                f,
                "triangle {triangle} references out of range vertex {vertex}"
            ),
            Error::DegenerateTriangle(t) => write!(f, "triangle {t} is degenerate"),
            Error::NonManifoldEdge(a, b) => {
                write!(f, "directed edge ({a}, {b}) belongs to more than one triangle")
            }
            Error::ObjLoadFailed(msg) => write!(f, "failed to load obj file: {msg}"),
            Error::IncorrectNumberOfCoordinates(n) => {
                write!(f, "{n} coordinates is not a whole number of 3d points")
            }
            Error::EmptyMesh => write!(f, "the walk mesh has no triangles"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
