//! Course conversion pipeline
//!
//! Ties the core together: read the OBJ, partition every material group
//! within the vertex budget, inspect textures, then write one model OBJ per
//! part plus the course manifest the engine loads. Everything that can fail
//! is checked before the first output file is created.

use crate::error::ExportError;
use crate::obj::{partition_group, read_obj, write_obj, CompactedMesh, ObjScene};
use crate::texture::texture_has_alpha;
use anyhow::{bail, Context, Result};
use hashbrown::{HashMap, HashSet};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Extension of the engine's material definition script.
pub const MATERIAL_SCRIPT_EXTENSION: &str = "mat";

/// Vertical margin below the lowest vertex for the fall-out trigger plane.
const FALLOUT_MARGIN: f32 = 10.0;

/// Course manifest written alongside the model files (course.toml).
#[derive(Debug, Serialize)]
pub struct CourseManifest {
    pub course: CourseSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsSection>,
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Serialize)]
pub struct CourseSection {
    pub name: String,
    pub source: String,
}

/// World bounds for the engine's out-of-bounds trigger volume.
#[derive(Debug, Serialize)]
pub struct BoundsSection {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub fallout_y: f32,
}

#[derive(Debug, Serialize)]
pub struct ModelEntry {
    pub name: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    pub alpha: bool,
    pub faces: usize,
}

/// Convert an OBJ export into a course directory: one model OBJ per
/// material partition plus `course.toml`.
pub fn convert_course(input: &Path, output_dir: &Path, texture_dir: &Path) -> Result<()> {
    let scene = read_obj(input, texture_dir)?;
    if scene.materials.is_empty() {
        bail!("OBJ contains no material groups: {}", input.display());
    }

    // Partition every material and inspect every texture before any output
    // exists, so a failure leaves nothing behind.
    let mut meshes: Vec<CompactedMesh> = Vec::new();
    for group in &scene.materials {
        meshes.extend(partition_group(group, &scene.pools)?);
    }
    let alpha = inspect_textures(&meshes)?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

    let course_name = file_stem(input);
    let mut used_files: HashSet<String> = HashSet::new();
    let mut models = Vec::with_capacity(meshes.len());
    for mesh in &meshes {
        // Distinct material names may sanitize to the same stem; every model
        // still gets its own file.
        let stem = sanitize_name(&mesh.name);
        let mut file = format!("{stem}.obj");
        let mut suffix = 2;
        while !used_files.insert(file.clone()) {
            file = format!("{stem}_{suffix}.obj");
            suffix += 1;
        }
        write_obj(mesh, &output_dir.join(&file))?;

        models.push(ModelEntry {
            name: mesh.name.clone(),
            file,
            texture: mesh
                .texture
                .as_deref()
                .map(|t| file_stem_with_ext(t)),
            alpha: mesh
                .texture
                .as_ref()
                .is_some_and(|t| alpha.get(t).copied().unwrap_or(false)),
            faces: mesh.face_count(),
        });
    }

    let manifest = CourseManifest {
        course: CourseSection {
            name: course_name.clone(),
            source: input.display().to_string(),
        },
        bounds: scene.bounds.min().zip(scene.bounds.max()).map(|(min, max)| {
            BoundsSection {
                min,
                max,
                fallout_y: min[1] - FALLOUT_MARGIN,
            }
        }),
        models,
    };

    let manifest_path = output_dir.join("course.toml");
    let text = toml::to_string_pretty(&manifest).context("Failed to serialize course manifest")?;
    fs::write(&manifest_path, text)
        .with_context(|| format!("Failed to write manifest: {}", manifest_path.display()))?;

    tracing::info!(
        "Course '{}': {} materials -> {} models in {}",
        course_name,
        scene.materials.len(),
        meshes.len(),
        output_dir.display()
    );
    Ok(())
}

/// Parse and partition without writing anything, logging a summary.
pub fn check_course(input: &Path, texture_dir: &Path) -> Result<()> {
    let scene = read_obj(input, texture_dir)?;

    let mut total_parts = 0;
    for group in &scene.materials {
        let parts = partition_group(group, &scene.pools)?;
        total_parts += parts.len();
        tracing::info!(
            "  {}: {} faces, {} part(s), texture: {}",
            group.name,
            group.faces.len(),
            parts.len(),
            group
                .texture
                .as_deref()
                .map(|t| t.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        );
    }

    if let (Some(min), Some(max)) = (scene.bounds.min(), scene.bounds.max()) {
        tracing::info!("  bounds: {:?} .. {:?}", min, max);
    }
    tracing::info!(
        "{} material(s), {} model(s) after partitioning",
        scene.materials.len(),
        total_parts
    );
    Ok(())
}

/// Generate the engine material script (.mat) for hand-editing: one block
/// per material with its texture basename and detected alpha flag.
pub fn write_material_script(scene: &ObjScene, path: &Path) -> Result<()> {
    let mut out = String::new();
    out.push_str("# Shinten material definitions\n");

    for group in &scene.materials {
        out.push_str(&format!("\nmaterial {}\n", group.name));
        match group.texture.as_deref() {
            Some(texture) => {
                let alpha = texture_has_alpha(texture)?;
                out.push_str(&format!("    texture {}\n", file_stem_with_ext(texture)));
                out.push_str(&format!(
                    "    alpha {}\n",
                    if alpha { "on" } else { "off" }
                ));
            }
            None => {
                out.push_str("    texture none\n    alpha off\n");
            }
        }
    }

    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create material script: {}", path.display()))?;
    file.write_all(out.as_bytes())?;
    tracing::info!("Wrote material script: {}", path.display());
    Ok(())
}

/// Inspect each distinct texture once.
fn inspect_textures(meshes: &[CompactedMesh]) -> Result<HashMap<PathBuf, bool>, ExportError> {
    let mut alpha = HashMap::new();
    for mesh in meshes {
        if let Some(texture) = &mesh.texture {
            if !alpha.contains_key(texture) {
                alpha.insert(texture.clone(), texture_has_alpha(texture)?);
            }
        }
    }
    Ok(alpha)
}

/// Turn a material name into a safe file stem.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("course")
        .to_string()
}

fn file_stem_with_ext(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
