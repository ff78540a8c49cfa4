//! Texture inspection
//!
//! The engine renders materials with transparent textures on a separate
//! pass, so the course manifest carries an alpha flag per material.

use crate::error::ExportError;
use std::path::Path;

/// Whether a texture contains any transparency.
///
/// True iff the image's color type carries an alpha channel and at least one
/// pixel is not fully opaque. A missing or unreadable file is fatal.
pub fn texture_has_alpha(path: &Path) -> Result<bool, ExportError> {
    if !path.exists() {
        return Err(ExportError::Configuration(format!(
            "referenced texture not found: {}",
            path.display()
        )));
    }

    let img = image::open(path).map_err(|e| {
        ExportError::Configuration(format!("failed to read texture {}: {}", path.display(), e))
    })?;

    if !img.color().has_alpha() {
        return Ok(false);
    }
    Ok(img.to_rgba8().pixels().any(|p| p.0[3] < u8::MAX))
}
