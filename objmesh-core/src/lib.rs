/// objmesh Core Library - Wavefront OBJ loading and in-place mesh geometry
///
/// This library parses the vertex, texture coordinate, normal and face
/// records of OBJ text into an indexed mesh, computes per-vertex normals
/// and applies rotations, translations and scaling to vertex positions.

pub mod builder;
pub mod debug;
pub mod error;
pub mod geometry;
pub mod normals;
pub mod parser;
pub mod polygon;
mod tokens;
pub mod transform;

// Re-export commonly used types
pub use builder::{
    count_records, decode_text, load, load_from_text, load_from_text_with, load_with, ParseMode, ParseOptions,
    RecordCounts,
};
pub use error::{ObjError, ObjResult};
pub use geometry::Mesh;
pub use normals::DegenerateFaces;
pub use parser::RecordKind;
pub use polygon::{IndexTriplet, Polygon};
pub use transform::EulerAngles;
