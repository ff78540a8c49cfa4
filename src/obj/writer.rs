//! Compacted mesh -> OBJ text
//!
//! Emits one self-contained OBJ per part: local indices restored to 1-based,
//! absent uv/normal components omitted (`i`, `i/t`, `i//n`, `i/t/n`), and one
//! `s` directive per contiguous run of faces sharing a smoothing tag.

use super::types::{CompactedMesh, Face};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a compacted mesh as an OBJ file.
pub fn write_obj(mesh: &CompactedMesh, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_obj_to(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_obj_to(mesh: &CompactedMesh, writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "g {}", mesh.name)?;
    writeln!(writer, "usemtl {}", mesh.material)?;

    for position in &mesh.positions {
        writeln!(writer, "v{}", join_floats(position))?;
    }
    for texcoord in &mesh.texcoords {
        writeln!(writer, "vt{}", join_floats(texcoord))?;
    }
    for normal in &mesh.normals {
        writeln!(writer, "vn{}", join_floats(normal))?;
    }

    // One smoothing directive per run, never one per face.
    let mut current_tag: Option<&str> = None;
    for face in &mesh.faces {
        if current_tag != Some(face.smoothing.as_str()) {
            writeln!(writer, "s {}", face.smoothing)?;
            current_tag = Some(face.smoothing.as_str());
        }
        writeln!(writer, "f{}", format_face(face))?;
    }

    Ok(())
}

fn join_floats(values: &[f32]) -> String {
    let mut out = String::new();
    for value in values {
        out.push(' ');
        out.push_str(&value.to_string());
    }
    out
}

fn format_face(face: &Face) -> String {
    let mut out = String::new();
    for vref in &face.refs {
        out.push(' ');
        match (vref.uv, vref.normal) {
            (None, None) => out.push_str(&format!("{}", vref.position + 1)),
            (Some(uv), None) => out.push_str(&format!("{}/{}", vref.position + 1, uv + 1)),
            (None, Some(n)) => out.push_str(&format!("{}//{}", vref.position + 1, n + 1)),
            (Some(uv), Some(n)) => {
                out.push_str(&format!("{}/{}/{}", vref.position + 1, uv + 1, n + 1))
            }
        }
    }
    out
}
