/// Per-vertex normals accumulated from face fans.
use nalgebra::{Vector3, Vector4};
use tracing::{debug, warn};

use crate::error::{ObjError, ObjResult};
use crate::geometry::Mesh;
use crate::polygon::Polygon;

/// What to do with faces that have fewer than three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegenerateFaces {
    /// Fail before touching the mesh.
    #[default]
    Reject,
    /// Leave them out of the accumulation.
    Skip,
}

impl Mesh {
    /// Recompute vertex normals, rejecting faces with fewer than three points.
    pub fn compute_normals(&mut self) -> ObjResult<()> {
        self.compute_normals_with(DegenerateFaces::Reject).map(|_| ())
    }

    /// Recompute vertex normals from the face geometry.
    ///
    /// Any parsed normals are discarded and replaced by one normal per
    /// vertex, and every face point's normal index is set to its vertex
    /// index. Each face is walked as a fan anchored at its first stored
    /// point `A`; every consecutive pair `(P, C)` of the remaining points
    /// contributes `-((P - A) x (C - A))` to `A`, `P` and `C`. The sums are
    /// then normalized, except that a zero sum stays exactly zero.
    ///
    /// Returns the number of faces that were skipped.
    pub fn compute_normals_with(&mut self, degenerate: DegenerateFaces) -> ObjResult<usize> {
        let vertex_count = self.vertices.len();
        let mut skipped = 0;

        // Validate everything first so a failure leaves the mesh untouched.
        for (face, polygon) in self.faces.iter().enumerate() {
            if let Some(point) = polygon
                .iter()
                .find(|p| p.vertex == 0 || p.vertex as usize > vertex_count)
            {
                return Err(ObjError::VertexOutOfRange {
                    index: point.vertex as usize,
                    count: vertex_count,
                });
            }
            if polygon.len() < 3 {
                match degenerate {
                    DegenerateFaces::Reject => {
                        return Err(ObjError::DegeneratePolygon {
                            face,
                            points: polygon.len(),
                        })
                    }
                    DegenerateFaces::Skip => {
                        warn!(face, points = polygon.len(), "Skipping degenerate face");
                        skipped += 1;
                    }
                }
            }
        }

        // Every point, skipped faces included, now uses its vertex's normal.
        for point in self.faces.iter_mut().flat_map(|polygon| polygon.iter_mut()) {
            point.normal = point.vertex;
        }

        let mut accumulated = vec![Vector3::<f32>::zeros(); vertex_count];
        for polygon in self.faces.iter().filter(|p| p.len() >= 3) {
            accumulate_fan(&self.vertices, polygon, &mut accumulated);
        }

        for normal in &mut accumulated {
            *normal = normal.try_normalize(0.0).unwrap_or_else(Vector3::zeros);
        }
        self.normals = accumulated;

        debug!(normals = self.normals.len(), skipped, "Computed vertex normals");
        Ok(skipped)
    }
}

fn accumulate_fan(vertices: &[Vector4<f32>], polygon: &Polygon, accumulated: &mut [Vector3<f32>]) {
    let slot = |vertex: u32| vertex as usize - 1;
    let position = |vertex: u32| vertices[slot(vertex)].xyz();

    let mut points = polygon.iter().map(|p| p.vertex);
    let (Some(anchor), Some(mut previous)) = (points.next(), points.next()) else {
        return;
    };
    let a = position(anchor);

    for current in points {
        let n = (position(previous) - a).cross(&(position(current) - a));
        accumulated[slot(anchor)] -= n;
        accumulated[slot(previous)] -= n;
        accumulated[slot(current)] -= n;
        previous = current;
    }
}
