/// Error types for OBJ loading and mesh editing.
use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::RecordKind;

/// Result type for OBJ operations.
pub type ObjResult<T> = Result<T, ObjError>;

/// Errors that can occur while loading or editing a mesh.
#[derive(Debug, Error)]
pub enum ObjError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input holds no bytes at all.
    #[error("input is empty")]
    EmptyInput,

    /// The input is not valid UTF-8 (strict mode only).
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The input declares no vertex records.
    #[error("input declares no vertices")]
    NoVertices,

    /// Storage for a record kind could not be reserved.
    #[error("failed to allocate storage for {count} {kind} records")]
    AllocationFailure {
        /// Kind of record being allocated.
        kind: RecordKind,
        /// Number of records requested.
        count: usize,
        /// Allocator error.
        #[source]
        source: TryReserveError,
    },

    /// A record could not be parsed (strict mode only).
    #[error("line {line}: malformed {kind} record: {message}")]
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// Kind of record on that line.
        kind: RecordKind,
        /// What was wrong with it.
        message: String,
    },

    /// A face index resolved outside of its array (strict mode only).
    #[error("line {line}: {kind} index {index} is out of range 1..={count}")]
    IndexOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Which array the index points into.
        kind: RecordKind,
        /// The resolved index.
        index: i64,
        /// Number of records of that kind in the file.
        count: usize,
    },

    /// A face has too few points to triangulate.
    #[error("face {face} has {points} points, at least 3 are required")]
    DegeneratePolygon {
        /// 0-based face index.
        face: usize,
        /// Number of points in the face.
        points: usize,
    },

    /// A vertex index is outside of the mesh.
    #[error("vertex index {index} is out of range for a mesh with {count} vertices")]
    VertexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of vertices in the mesh.
        count: usize,
    },
}

impl ObjError {
    /// Create a `MalformedRecord` error.
    #[must_use]
    pub fn malformed(line: usize, kind: RecordKind, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            kind,
            message: message.into(),
        }
    }
}
