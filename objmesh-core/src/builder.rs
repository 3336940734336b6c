/// Two-pass OBJ loader.
///
/// The first pass counts records of every kind. The second pass reserves
/// exactly that much storage and fills it, so no array ever grows while
/// parsing. The input is scanned twice in exchange.
use std::borrow::Cow;
use std::convert::Infallible;
use std::path::Path;

use nalgebra::{Vector3, Vector4};
use tracing::{debug, error, info, warn};

use crate::error::{ObjError, ObjResult};
use crate::geometry::Mesh;
use crate::parser::{scan, Record, RecordHandler, RecordKind};
use crate::polygon::{IndexTriplet, Polygon};
use crate::tokens::{float_token, index_token, TokenError};

/// How malformed content is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Bad numbers read as zero, missing fields take defaults and
    /// out-of-range face indices are dropped.
    #[default]
    Lenient,
    /// Any malformed record fails the load.
    Strict,
}

/// Options for loading OBJ data.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    pub mode: ParseMode,
}

impl ParseOptions {
    pub fn lenient() -> Self {
        Self {
            mode: ParseMode::Lenient,
        }
    }

    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
        }
    }
}

/// Number of records of each kind in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordCounts {
    pub vertices: usize,
    pub texcoords: usize,
    pub normals: usize,
    pub faces: usize,
    pub comments: usize,
}

impl RecordCounts {
    pub fn get(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Vertex => self.vertices,
            RecordKind::TexCoord => self.texcoords,
            RecordKind::Normal => self.normals,
            RecordKind::Face => self.faces,
            RecordKind::Comment => self.comments,
        }
    }

    fn bump(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::Vertex => self.vertices += 1,
            RecordKind::TexCoord => self.texcoords += 1,
            RecordKind::Normal => self.normals += 1,
            RecordKind::Face => self.faces += 1,
            RecordKind::Comment => self.comments += 1,
        }
    }
}

/// First pass: count only.
#[derive(Debug, Default)]
struct Counter {
    counts: RecordCounts,
}

impl RecordHandler for Counter {
    type Error = Infallible;

    fn handle(&mut self, record: Record<'_>) -> Result<(), Infallible> {
        self.counts.bump(record.kind);
        Ok(())
    }
}

/// Count the records in `text` without building anything.
pub fn count_records(text: &str) -> RecordCounts {
    let mut counter = Counter::default();
    match scan(text, &mut counter) {
        Ok(()) => counter.counts,
        Err(never) => match never {},
    }
}

fn reserve<T>(kind: RecordKind, count: usize) -> ObjResult<Vec<T>> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(count)
        .map_err(|source| ObjError::AllocationFailure {
            kind,
            count,
            source,
        })?;
    Ok(storage)
}

/// Second pass: parse each record into pre-sized storage.
struct Filler<'o> {
    options: &'o ParseOptions,
    totals: RecordCounts,
    vertices: Vec<Vector4<f32>>,
    texcoords: Vec<Vector3<f32>>,
    normals: Vec<Vector3<f32>>,
    faces: Vec<Polygon>,
}

impl<'o> Filler<'o> {
    fn with_counts(totals: RecordCounts, options: &'o ParseOptions) -> ObjResult<Self> {
        Ok(Self {
            options,
            totals,
            vertices: reserve(RecordKind::Vertex, totals.vertices)?,
            texcoords: reserve(RecordKind::TexCoord, totals.texcoords)?,
            normals: reserve(RecordKind::Normal, totals.normals)?,
            faces: reserve(RecordKind::Face, totals.faces)?,
        })
    }

    fn mode(&self) -> ParseMode {
        self.options.mode
    }

    fn malformed(record: &Record<'_>, err: TokenError) -> ObjError {
        ObjError::malformed(record.line, record.kind, err.describe())
    }

    /// Parse up to `N` floats. Strict mode requires between `min` and `N`
    /// of them.
    fn floats<const N: usize>(&self, record: &Record<'_>, min: usize) -> ObjResult<([f32; N], usize)> {
        let mut values = [0.0f32; N];
        let mut supplied = 0;

        for field in record.fields() {
            if supplied == N {
                if self.mode() == ParseMode::Strict {
                    return Err(ObjError::malformed(
                        record.line,
                        record.kind,
                        format!("expected at most {} values", N),
                    ));
                }
                break;
            }
            values[supplied] =
                float_token(field, self.mode()).map_err(|e| Self::malformed(record, e))?;
            supplied += 1;
        }

        if supplied < min {
            if self.mode() == ParseMode::Strict {
                return Err(ObjError::malformed(
                    record.line,
                    record.kind,
                    format!("expected at least {min} values, found {supplied}"),
                ));
            }
            debug!(line = record.line, kind = %record.kind, supplied, "Missing values read as zero");
        }

        Ok((values, supplied))
    }

    fn add_vertex(&mut self, record: &Record<'_>) -> ObjResult<()> {
        let ([x, y, z, w], supplied) = self.floats::<4>(record, 3)?;
        let w = if supplied < 4 { 1.0 } else { w };
        self.vertices.push(Vector4::new(x, y, z, w));
        Ok(())
    }

    fn add_texcoord(&mut self, record: &Record<'_>) -> ObjResult<()> {
        // w stays 0.0 when only u and v are given
        let ([u, v, w], _) = self.floats::<3>(record, 2)?;
        self.texcoords.push(Vector3::new(u, v, w));
        Ok(())
    }

    fn add_normal(&mut self, record: &Record<'_>) -> ObjResult<()> {
        let ([x, y, z], _) = self.floats::<3>(record, 3)?;
        self.normals.push(Vector3::new(x, y, z));
        Ok(())
    }

    /// Resolve one subfield of a face token into a 1-based index or 0.
    ///
    /// Negative values count back from the records parsed so far. A result
    /// past the end of the file's records is an error in strict mode and
    /// reads as absent in lenient mode.
    fn resolve_index(&self, record: &Record<'_>, kind: RecordKind, field: &str) -> ObjResult<u32> {
        let raw = index_token(field, self.mode()).map_err(|e| Self::malformed(record, e))?;
        let parsed_so_far = match kind {
            RecordKind::Vertex => self.vertices.len(),
            RecordKind::TexCoord => self.texcoords.len(),
            _ => self.normals.len(),
        };
        let resolved = if raw < 0 {
            parsed_so_far as i64 + raw + 1
        } else {
            raw
        };
        if resolved == 0 {
            return Ok(0);
        }

        let total = self.totals.get(kind);
        match u32::try_from(resolved) {
            Ok(index) if resolved <= total as i64 => Ok(index),
            _ if self.mode() == ParseMode::Strict => Err(ObjError::IndexOutOfRange {
                line: record.line,
                kind,
                index: resolved,
                count: total,
            }),
            _ => {
                warn!(line = record.line, kind = %kind, index = resolved, count = total, "Dropping out-of-range index");
                Ok(0)
            }
        }
    }

    fn add_face(&mut self, record: &Record<'_>) -> ObjResult<()> {
        let mut polygon = Polygon::with_capacity(record.fields().count());

        for token in record.fields() {
            let mut subfields = token.splitn(3, '/');
            let vertex = self.resolve_index(record, RecordKind::Vertex, subfields.next().unwrap_or(""))?;
            let texture = self.resolve_index(record, RecordKind::TexCoord, subfields.next().unwrap_or(""))?;
            let normal = self.resolve_index(record, RecordKind::Normal, subfields.next().unwrap_or(""))?;

            if vertex == 0 {
                debug!(line = record.line, token, "Dropping face point without a vertex");
                continue;
            }
            polygon.push_front(IndexTriplet::new(vertex, texture, normal));
        }

        self.faces.push(polygon);
        Ok(())
    }

    fn finish(self) -> Mesh {
        Mesh::new(self.vertices, self.texcoords, self.normals, self.faces)
    }
}

impl RecordHandler for Filler<'_> {
    type Error = ObjError;

    fn handle(&mut self, record: Record<'_>) -> ObjResult<()> {
        match record.kind {
            RecordKind::Vertex => self.add_vertex(&record),
            RecordKind::TexCoord => self.add_texcoord(&record),
            RecordKind::Normal => self.add_normal(&record),
            RecordKind::Face => self.add_face(&record),
            RecordKind::Comment => Ok(()),
        }
    }
}

fn build(text: &str, options: &ParseOptions) -> ObjResult<Mesh> {
    if text.is_empty() {
        return Err(ObjError::EmptyInput);
    }

    let counts = count_records(text);
    debug!(?counts, "Counted records");
    if counts.vertices == 0 {
        return Err(ObjError::NoVertices);
    }

    let mut filler = Filler::with_counts(counts, options)?;
    scan(text, &mut filler)?;
    let mesh = filler.finish();

    info!(
        vertices = mesh.vertex_count(),
        texcoords = mesh.texcoord_count(),
        normals = mesh.normal_count(),
        faces = mesh.face_count(),
        "Loaded OBJ mesh"
    );
    Ok(mesh)
}

/// Parse OBJ text with default (lenient) options.
pub fn load_from_text(text: &str) -> ObjResult<Mesh> {
    load_from_text_with(text, &ParseOptions::default())
}

/// Parse OBJ text.
pub fn load_from_text_with(text: &str, options: &ParseOptions) -> ObjResult<Mesh> {
    build(text, options).inspect_err(|e| error!("Failed to load OBJ text: {e}"))
}

/// Load an OBJ file with default (lenient) options.
pub fn load<P: AsRef<Path>>(path: P) -> ObjResult<Mesh> {
    load_with(path, &ParseOptions::default())
}

/// Load an OBJ file. The whole file is read before parsing.
pub fn load_with<P: AsRef<Path>>(path: P, options: &ParseOptions) -> ObjResult<Mesh> {
    let path = path.as_ref();
    read_and_build(path, options).inspect_err(|e| error!(path = %path.display(), "Failed to load OBJ file: {e}"))
}

fn read_and_build(path: &Path, options: &ParseOptions) -> ObjResult<Mesh> {
    let bytes = std::fs::read(path).map_err(|source| ObjError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    build(&decode_text(&bytes, options.mode)?, options)
}

/// Decode raw file contents as OBJ text.
///
/// Strict mode requires valid UTF-8. Lenient mode replaces invalid
/// sequences with U+FFFD.
pub fn decode_text(bytes: &[u8], mode: ParseMode) -> ObjResult<Cow<'_, str>> {
    if bytes.is_empty() {
        return Err(ObjError::EmptyInput);
    }
    match mode {
        ParseMode::Strict => Ok(Cow::Borrowed(std::str::from_utf8(bytes)?)),
        ParseMode::Lenient => Ok(String::from_utf8_lossy(bytes)),
    }
}
