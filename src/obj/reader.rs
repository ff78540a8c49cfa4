//! OBJ reading: attribute pools, coordinate bounds, per-material face lists
//!
//! Reading is two-phase over the buffered line stream: pool records
//! (`v`/`vt`/`vn`/`mtllib`) are collected first, then the retained
//! `usemtl`/`s`/`f` records are replayed in order with explicit material and
//! smoothing state. Pools are therefore complete before any face is
//! resolved, and attribute ranges can be checked at parse time.

use super::mtl;
use super::types::{CoordBounds, Face, GeometryPools, MaterialGroup, ObjScene, VertexRef};
use crate::error::ExportError;
use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Default smoothing tag for faces declared before any `s` record.
pub const SMOOTHING_OFF: &str = "off";

/// Read an OBJ file into pools, bounds, and material groups.
///
/// `texture_dir` is joined with texture basenames resolved from the
/// referenced material libraries. A missing library file aborts the read.
pub fn read_obj(path: &Path, texture_dir: &Path) -> Result<ObjScene, ExportError> {
    let file = File::open(path).map_err(|e| {
        ExportError::Configuration(format!("failed to open OBJ {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let mut pools = GeometryPools::default();
    let mut bounds = CoordBounds::default();
    let mut mtllibs: Vec<String> = Vec::new();

    // (line number, record) pairs retained for the face pass
    let mut deferred: Vec<(usize, String)> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let coords = parse_floats(parts, line_no, "v", 3)?;
                bounds.update(&coords);
                pools.positions.push(coords);
            }
            Some("vt") => {
                let coords = parse_floats(parts, line_no, "vt", 1)?;
                pools.texcoords.push(coords);
            }
            Some("vn") => {
                let coords = parse_floats(parts, line_no, "vn", 3)?;
                pools.normals.push([coords[0], coords[1], coords[2]]);
            }
            Some("mtllib") => match line.split_once(char::is_whitespace) {
                Some((_, name)) if !name.trim().is_empty() => {
                    mtllibs.push(name.trim().to_string());
                }
                _ => {
                    return Err(ExportError::malformed(line_no, "mtllib without a file name"));
                }
            },
            Some("usemtl") | Some("s") | Some("f") => {
                deferred.push((line_no, line.to_string()));
            }
            // Object/group names, lines, parameter-space records: nothing
            // downstream consumes them.
            _ => {}
        }
    }

    let mut materials: Vec<MaterialGroup> = Vec::new();
    let mut material_index: HashMap<String, usize> = HashMap::new();
    let mut current_material: Option<usize> = None;
    let mut current_smoothing = SMOOTHING_OFF.to_string();

    for (line_no, line) in &deferred {
        let line_no = *line_no;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("usemtl") => {
                let name = match line.split_once(char::is_whitespace) {
                    Some((_, name)) if !name.trim().is_empty() => name.trim(),
                    _ => {
                        return Err(ExportError::malformed(
                            line_no,
                            "usemtl without a material name",
                        ));
                    }
                };
                let index = *material_index.entry(name.to_string()).or_insert_with(|| {
                    materials.push(MaterialGroup {
                        name: name.to_string(),
                        texture: None,
                        faces: Vec::new(),
                    });
                    materials.len() - 1
                });
                current_material = Some(index);
            }
            Some("s") => match parts.next() {
                Some(tag) => current_smoothing = tag.to_string(),
                None => {
                    return Err(ExportError::malformed(line_no, "s without a smoothing tag"));
                }
            },
            Some("f") => {
                let Some(material) = current_material else {
                    return Err(ExportError::malformed(
                        line_no,
                        "face declared before any usemtl",
                    ));
                };

                let refs = parts
                    .map(|corner| parse_vertex_ref(corner, line_no, &pools))
                    .collect::<Result<Vec<_>, _>>()?;
                if refs.len() < 3 {
                    return Err(ExportError::malformed(
                        line_no,
                        format!("face with {} corners (need at least 3)", refs.len()),
                    ));
                }

                materials[material].faces.push(Face {
                    refs,
                    smoothing: current_smoothing.clone(),
                });
            }
            _ => unreachable!("only usemtl/s/f records are deferred"),
        }
    }

    // Material libraries resolve after the main pass.
    let obj_dir = path.parent().unwrap_or_else(|| Path::new("."));
    mtl::resolve_material_libraries(obj_dir, &mtllibs, texture_dir, &mut materials)?;

    tracing::info!(
        "Read OBJ {}: {} positions, {} texcoords, {} normals, {} materials",
        path.display(),
        pools.positions.len(),
        pools.texcoords.len(),
        pools.normals.len(),
        materials.len()
    );

    Ok(ObjScene {
        pools,
        bounds,
        materials,
    })
}

/// Parse the remaining tokens of a `v`/`vt`/`vn` record as floats.
fn parse_floats<'a>(
    parts: impl Iterator<Item = &'a str>,
    line_no: usize,
    record: &str,
    min_count: usize,
) -> Result<Vec<f32>, ExportError> {
    let mut values = Vec::new();
    for token in parts {
        let value = token.parse::<f32>().map_err(|_| {
            ExportError::malformed(line_no, format!("{record} component '{token}' is not a number"))
        })?;
        values.push(value);
    }
    if values.len() < min_count {
        return Err(ExportError::malformed(
            line_no,
            format!(
                "{record} record has {} components (need at least {min_count})",
                values.len()
            ),
        ));
    }
    Ok(values)
}

/// Parse one face corner: `i`, `i/t`, `i//n`, or `i/t/n` (1-based source
/// indices), validating every index against its pool.
fn parse_vertex_ref(
    corner: &str,
    line_no: usize,
    pools: &GeometryPools,
) -> Result<VertexRef, ExportError> {
    let mut parts = corner.splitn(3, '/');

    let position = parse_index(parts.next().unwrap_or(""), line_no, corner)?;
    let uv = match parts.next() {
        Some("") | None => None,
        Some(token) => Some(parse_index(token, line_no, corner)?),
    };
    let normal = match parts.next() {
        Some("") | None => None,
        Some(token) => Some(parse_index(token, line_no, corner)?),
    };

    if position >= pools.positions.len() {
        return Err(ExportError::malformed(
            line_no,
            format!(
                "position index {} out of range (pool has {})",
                position + 1,
                pools.positions.len()
            ),
        ));
    }
    if let Some(uv) = uv {
        if uv >= pools.texcoords.len() {
            return Err(ExportError::malformed(
                line_no,
                format!(
                    "texcoord index {} out of range (pool has {})",
                    uv + 1,
                    pools.texcoords.len()
                ),
            ));
        }
    }
    if let Some(normal) = normal {
        if normal >= pools.normals.len() {
            return Err(ExportError::malformed(
                line_no,
                format!(
                    "normal index {} out of range (pool has {})",
                    normal + 1,
                    pools.normals.len()
                ),
            ));
        }
    }

    Ok(VertexRef {
        position,
        uv,
        normal,
    })
}

/// Parse a 1-based OBJ index into a 0-based pool index.
fn parse_index(token: &str, line_no: usize, corner: &str) -> Result<usize, ExportError> {
    token
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .ok_or_else(|| {
            ExportError::malformed(line_no, format!("bad face corner '{corner}'"))
        })
}
