//! Path helpers for Shapefile destinations
//!
//! A Shapefile is a set of sidecar files sharing one stem. These helpers
//! derive the `.shp` path from the user's base name and manage the
//! sidecars as a unit.

use crate::constants::{SHAPEFILE_EXTENSION, SHAPEFILE_SIDECAR_EXTENSIONS};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build the destination path by appending the `.shp` extension
///
/// A base that already ends in `.shp` is returned unchanged, any other
/// suffix is kept as part of the name (`wind.2024` becomes `wind.2024.shp`).
pub fn destination_path(base: &Path) -> PathBuf {
    let has_shp = base
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SHAPEFILE_EXTENSION));
    if has_shp {
        return base.to_path_buf();
    }

    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(SHAPEFILE_EXTENSION);
    PathBuf::from(name)
}

/// Layer name derived from the destination file stem
pub fn layer_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wind".to_string())
}

/// All sidecar paths belonging to a Shapefile
pub fn sidecar_paths(shp_path: &Path) -> Vec<PathBuf> {
    SHAPEFILE_SIDECAR_EXTENSIONS
        .iter()
        .map(|ext| shp_path.with_extension(ext))
        .collect()
}

/// Remove every existing sidecar of a Shapefile, returning how many were removed
pub fn remove_shapefile(shp_path: &Path) -> Result<usize> {
    let mut removed = 0;
    for path in sidecar_paths(shp_path) {
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| Error::io(format!("Failed to remove {}", path.display()), e))?;
            debug!("Removed existing {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}

/// Total on-disk size of a Shapefile and its sidecars
pub fn shapefile_size_bytes(shp_path: &Path) -> u64 {
    sidecar_paths(shp_path)
        .iter()
        .filter_map(|path| std::fs::metadata(path).ok())
        .map(|meta| meta.len())
        .sum()
}

/// Format bytes in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
