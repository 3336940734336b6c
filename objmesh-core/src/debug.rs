/// Human-readable listing of faces and their resolved attributes
use std::fmt::{self, Write};

use nalgebra::Vector3;

use crate::geometry::Mesh;

fn write_attribute(
    out: &mut String,
    label: &str,
    index: u32,
    value: Option<Vector3<f32>>,
) -> fmt::Result {
    match value {
        Some(v) => writeln!(out, " {label}\t({index}):\t{:.6},\t{:.6},\t{:.6}", v.x, v.y, v.z),
        None => writeln!(out, " {label}\t({index}):\tabsent"),
    }
}

fn write_dump(mesh: &Mesh, out: &mut String) -> fmt::Result {
    for (i, face) in mesh.faces().iter().enumerate() {
        writeln!(out, "FACE #{i}")?;
        for point in face {
            let position = mesh.position_of(point).map(|p| p.coords);
            write_attribute(out, "vertex", point.vertex, position)?;
            if mesh.has_texcoords() {
                write_attribute(out, "texture", point.texture, mesh.texcoord_of(point).copied())?;
            }
            if mesh.has_normals() {
                write_attribute(out, "normal", point.normal, mesh.normal_of(point).copied())?;
            }
        }
        out.push_str("\n\n");
    }
    Ok(())
}

impl Mesh {
    /// List every face with the vertex, texture coordinate and normal each
    /// of its points resolves to, in stored order.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_dump(self, &mut out);
        out
    }
}
