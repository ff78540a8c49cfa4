//! Material library (.mtl) resolution
//!
//! Only `newmtl`/`map_Kd` pairs matter here: the engine material script
//! carries everything else, so the library is just a texture lookup table.

use super::types::MaterialGroup;
use crate::error::ExportError;
use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Resolve every referenced material library and bind texture paths onto the
/// matching material groups.
///
/// Texture values are reduced to their basename (both separator conventions
/// stripped) and joined with `texture_dir`. A missing library file is fatal.
pub fn resolve_material_libraries(
    obj_dir: &Path,
    mtllibs: &[String],
    texture_dir: &Path,
    materials: &mut [MaterialGroup],
) -> Result<(), ExportError> {
    for lib in mtllibs {
        let path = obj_dir.join(lib);
        let textures = read_material_library(&path)?;

        for group in materials.iter_mut() {
            if let Some(texture) = textures.get(&group.name) {
                group.texture = Some(texture_dir.join(texture_basename(texture)));
            }
        }
    }
    Ok(())
}

/// Read one .mtl file into a material name -> texture value map.
fn read_material_library(path: &Path) -> Result<HashMap<String, String>, ExportError> {
    let file = File::open(path).map_err(|_| {
        ExportError::Configuration(format!(
            "referenced material library not found: {}",
            path.display()
        ))
    })?;
    let reader = BufReader::new(file);

    let mut textures = HashMap::new();
    let mut current: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if let Some((record, value)) = line.split_once(char::is_whitespace) {
            let value = value.trim();
            match record {
                "newmtl" => current = Some(value.to_string()),
                "map_Kd" => {
                    if let Some(name) = &current {
                        textures.insert(name.clone(), value.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    tracing::debug!(
        "Material library {}: {} textured materials",
        path.display(),
        textures.len()
    );
    Ok(textures)
}

/// Strip any leading path (either separator convention) from a texture value.
fn texture_basename(value: &str) -> &str {
    value.rsplit(['/', '\\']).next().unwrap_or(value)
}
