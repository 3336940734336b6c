/// In-place rigid and affine transforms of mesh positions
use nalgebra::Matrix3;

use crate::error::{ObjError, ObjResult};
use crate::geometry::Mesh;

/// Euler angles in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl EulerAngles {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self { alpha, beta, gamma }
    }

    pub fn zero() -> Self {
        Self {
            alpha: 0.0,
            beta: 0.0,
            gamma: 0.0,
        }
    }

    /// Rotation matrix for these angles. Row `i` produces component `i` of
    /// the rotated point.
    pub fn rotation_matrix(&self) -> Matrix3<f32> {
        let (sa, ca) = self.alpha.sin_cos();
        let (sb, cb) = self.beta.sin_cos();
        let (sg, cg) = self.gamma.sin_cos();

        Matrix3::new(
            cb * cg,
            -sg * cb,
            sb,
            sa * sb * cg + sg * ca,
            -sa * sb * sg + ca * cg,
            -sa * cb,
            sa * sg - sb * ca * cg,
            sa * cg + sb * sg * ca,
            ca * cb,
        )
    }
}

impl Default for EulerAngles {
    fn default() -> Self {
        Self::zero()
    }
}

impl Mesh {
    /// Rotate every vertex by the given Euler angles. `w` is untouched.
    pub fn rotate(&mut self, alpha: f32, beta: f32, gamma: f32) {
        self.rotate_by(&EulerAngles::new(alpha, beta, gamma));
    }

    pub fn rotate_by(&mut self, angles: &EulerAngles) {
        let m = angles.rotation_matrix();
        for v in &mut self.vertices {
            let (x, y, z) = (v.x, v.y, v.z);
            v.x = x * m[(0, 0)] + y * m[(0, 1)] + z * m[(0, 2)];
            v.y = x * m[(1, 0)] + y * m[(1, 1)] + z * m[(1, 2)];
            v.z = x * m[(2, 0)] + y * m[(2, 1)] + z * m[(2, 2)];
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        for v in &mut self.vertices {
            v.x += dx;
            v.y += dy;
            v.z += dz;
        }
    }

    /// Uniformly scale every vertex about the origin.
    pub fn scale(&mut self, factor: f32) {
        for v in &mut self.vertices {
            v.x *= factor;
            v.y *= factor;
            v.z *= factor;
        }
    }

    /// Overwrite the position of a vertex (0-based).
    pub fn set_vertex(&mut self, index: usize, x: f32, y: f32, z: f32) -> ObjResult<()> {
        let count = self.vertices.len();
        let v = self
            .vertices
            .get_mut(index)
            .ok_or(ObjError::VertexOutOfRange { index, count })?;
        v.x = x;
        v.y = y;
        v.z = z;
        Ok(())
    }

    /// Offset the position of a vertex (0-based).
    pub fn move_vertex(&mut self, index: usize, dx: f32, dy: f32, dz: f32) -> ObjResult<()> {
        let count = self.vertices.len();
        let v = self
            .vertices
            .get_mut(index)
            .ok_or(ObjError::VertexOutOfRange { index, count })?;
        v.x += dx;
        v.y += dy;
        v.z += dz;
        Ok(())
    }
}
