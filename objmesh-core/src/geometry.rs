/// Indexed mesh produced by the OBJ loader
use nalgebra::{Point3, Vector3, Vector4};

use crate::error::{ObjError, ObjResult};
use crate::polygon::{IndexTriplet, Polygon};

/// An indexed polygon mesh.
///
/// Arrays are 0-based; the indices stored in faces are 1-based, with 0
/// meaning "absent".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vector4<f32>>,
    pub(crate) texcoords: Vec<Vector3<f32>>,
    pub(crate) normals: Vec<Vector3<f32>>,
    pub(crate) faces: Vec<Polygon>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<Vector4<f32>>,
        texcoords: Vec<Vector3<f32>>,
        normals: Vec<Vector3<f32>>,
        faces: Vec<Polygon>,
    ) -> Self {
        Self {
            vertices,
            texcoords,
            normals,
            faces,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn texcoord_count(&self) -> usize {
        self.texcoords.len()
    }

    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn vertices(&self) -> &[Vector4<f32>] {
        &self.vertices
    }

    pub fn texcoords(&self) -> &[Vector3<f32>] {
        &self.texcoords
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn faces(&self) -> &[Polygon] {
        &self.faces
    }

    /// Read a vertex by 0-based index.
    pub fn vertex(&self, index: usize) -> ObjResult<Vector4<f32>> {
        self.vertices
            .get(index)
            .copied()
            .ok_or(ObjError::VertexOutOfRange {
                index,
                count: self.vertices.len(),
            })
    }

    pub fn texcoord(&self, index: usize) -> Option<&Vector3<f32>> {
        self.texcoords.get(index)
    }

    pub fn normal(&self, index: usize) -> Option<&Vector3<f32>> {
        self.normals.get(index)
    }

    pub fn face(&self, index: usize) -> Option<&Polygon> {
        self.faces.get(index)
    }

    /// Mutable access to a face for list edits.
    pub fn face_mut(&mut self, index: usize) -> Option<&mut Polygon> {
        self.faces.get_mut(index)
    }

    /// Resolve the position a face point refers to.
    pub fn position_of(&self, point: &IndexTriplet) -> Option<Point3<f32>> {
        let v = resolve(&self.vertices, point.vertex)?;
        Some(Point3::new(v.x, v.y, v.z))
    }

    pub fn texcoord_of(&self, point: &IndexTriplet) -> Option<&Vector3<f32>> {
        resolve(&self.texcoords, point.texture)
    }

    pub fn normal_of(&self, point: &IndexTriplet) -> Option<&Vector3<f32>> {
        resolve(&self.normals, point.normal)
    }

    /// An axis-aligned cube of quads centred on the origin, wound
    /// counter-clockwise when seen from outside.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Vector4::new(-half, -half, -half, 1.0),
            Vector4::new(half, -half, -half, 1.0),
            Vector4::new(half, half, -half, 1.0),
            Vector4::new(-half, half, -half, 1.0),
            Vector4::new(-half, -half, half, 1.0),
            Vector4::new(half, -half, half, 1.0),
            Vector4::new(half, half, half, 1.0),
            Vector4::new(-half, half, half, 1.0),
        ];

        let quads: [[u32; 4]; 6] = [
            [5, 6, 7, 8], // front
            [1, 4, 3, 2], // back
            [2, 3, 7, 6], // right
            [1, 5, 8, 4], // left
            [4, 8, 7, 3], // top
            [1, 2, 6, 5], // bottom
        ];
        let faces = quads
            .iter()
            .map(|quad| Polygon::from_file_order(quad.iter().copied().map(IndexTriplet::vertex)))
            .collect();

        Self::new(vertices, Vec::new(), Vec::new(), faces)
    }
}

/// Look up a 1-based index; 0 and out-of-range indices resolve to nothing.
fn resolve<T>(items: &[T], index: u32) -> Option<&T> {
    let slot = (index as usize).checked_sub(1)?;
    items.get(slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_shape() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 6);
        assert!(cube.faces().iter().all(|f| f.len() == 4));
        assert!(!cube.has_normals());
        assert!(!cube.has_texcoords());
    }

    #[test]
    fn test_vertex_out_of_range() {
        let cube = Mesh::cube(1.0);
        assert!(cube.vertex(7).is_ok());
        assert!(matches!(
            cube.vertex(8),
            Err(ObjError::VertexOutOfRange { index: 8, count: 8 })
        ));
    }

    #[test]
    fn test_resolve_one_based() {
        let cube = Mesh::cube(2.0);
        let point = IndexTriplet::vertex(1);
        assert_eq!(cube.position_of(&point), Some(Point3::new(-1.0, -1.0, -1.0)));
        assert_eq!(cube.position_of(&IndexTriplet::vertex(0)), None);
        assert_eq!(cube.texcoord_of(&point), None);
        assert_eq!(cube.normal_of(&point), None);
    }

    #[test]
    fn test_indexed_accessors() {
        let mesh = crate::load_from_text("v 0 0 0\nvt 0.5 1\nvn 0 1 0\nf 1/1/1\n").unwrap();
        assert_eq!(mesh.texcoord(0), Some(&Vector3::new(0.5, 1.0, 0.0)));
        assert_eq!(mesh.normal(0), Some(&Vector3::new(0.0, 1.0, 0.0)));
        assert_eq!(mesh.normal(1), None);
        assert_eq!(mesh.face(0).map(Polygon::len), Some(1));
        assert!(mesh.face(1).is_none());
    }
}
