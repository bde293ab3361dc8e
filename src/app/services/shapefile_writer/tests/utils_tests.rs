//! Tests for destination path helpers

use super::super::utils::{
    destination_path, format_bytes, layer_name_for, remove_shapefile, shapefile_size_bytes,
    sidecar_paths,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_destination_path_appends_extension() {
    assert_eq!(
        destination_path(Path::new("out/s1a_wind")),
        PathBuf::from("out/s1a_wind.shp")
    );
}

#[test]
fn test_destination_path_keeps_existing_shp() {
    assert_eq!(
        destination_path(Path::new("wind.shp")),
        PathBuf::from("wind.shp")
    );
    assert_eq!(
        destination_path(Path::new("wind.SHP")),
        PathBuf::from("wind.SHP")
    );
}

#[test]
fn test_destination_path_keeps_other_suffixes() {
    assert_eq!(
        destination_path(Path::new("wind.20240101")),
        PathBuf::from("wind.20240101.shp")
    );
}

#[test]
fn test_layer_name_from_stem() {
    assert_eq!(layer_name_for(Path::new("/tmp/s1a_wind.shp")), "s1a_wind");
}

#[test]
fn test_sidecar_paths() {
    let sidecars = sidecar_paths(Path::new("dir/wind.shp"));
    assert_eq!(sidecars.len(), 5);
    assert!(sidecars.contains(&PathBuf::from("dir/wind.dbf")));
    assert!(sidecars.contains(&PathBuf::from("dir/wind.prj")));
}

#[test]
fn test_remove_shapefile_removes_only_existing_sidecars() {
    let dir = TempDir::new().unwrap();
    let shp = dir.path().join("wind.shp");
    std::fs::write(&shp, b"shp").unwrap();
    std::fs::write(dir.path().join("wind.dbf"), b"dbf!").unwrap();
    std::fs::write(dir.path().join("other.dbf"), b"keep").unwrap();

    assert_eq!(shapefile_size_bytes(&shp), 7);
    assert_eq!(remove_shapefile(&shp).unwrap(), 2);
    assert!(!shp.exists());
    assert!(dir.path().join("other.dbf").exists());
    assert_eq!(shapefile_size_bytes(&shp), 0);
}

#[test]
fn test_format_bytes() {
    assert_eq!(format_bytes(512), "512 B");
    assert_eq!(format_bytes(2048), "2.0 KB");
    assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
}
