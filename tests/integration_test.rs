//! Integration tests for shinten-export
//!
//! Tests the full pipeline: generate a test scene -> convert -> verify the
//! course directory, driving the real binary.


use std::path::Path;
use tempfile::tempdir;

/// Full conversion of a two-material scene
#[test]
fn test_convert_course() {
    let dir = tempdir().expect("Failed to create temp dir");
    let textures = dir.path().join("textures");
    std::fs::create_dir(&textures).unwrap();

    generate_test_assets::generate_course_obj(dir.path()).expect("Failed to generate scene");
    generate_test_assets::generate_opaque_png(&textures.join("grass.png"))
        .expect("Failed to generate grass.png");
    generate_test_assets::generate_transparent_png(&textures.join("glass.png"))
        .expect("Failed to generate glass.png");

    let output = dir.path().join("Course");
    let status = run_export(&[
        "convert",
        dir.path().join("scene.obj").to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-t",
        textures.to_str().unwrap(),
    ]);
    assert!(status.success(), "convert command failed");

    // One model per material (neither exceeds the budget), plus the manifest.
    let grass = std::fs::read_to_string(output.join("Grass.obj")).expect("Grass.obj missing");
    let glass = std::fs::read_to_string(output.join("Glass.obj")).expect("Glass.obj missing");
    let manifest =
        std::fs::read_to_string(output.join("course.toml")).expect("course.toml missing");

    // Grass: 4 referenced positions compacted from the 5-entry pool, faces
    // rewritten to 1-based local indices, one `s` directive per run.
    assert_eq!(grass.lines().filter(|l| l.starts_with("v ")).count(), 4);
    assert!(grass.contains("f 1/1/1 2/2/1 3/3/1"));
    let smoothing: Vec<&str> = grass.lines().filter(|l| l.starts_with("s ")).collect();
    assert_eq!(smoothing, vec!["s 1", "s off"]);

    // Glass: no texcoords; the uv slot must be omitted, not padded.
    assert!(glass.contains("f 1//1 2//1 3//1"));
    assert_eq!(glass.lines().filter(|l| l.starts_with("vt ")).count(), 0);

    // Manifest: material order, resolved texture basenames, alpha flags,
    // bounds from every position (the peak vertex included).
    let grass_idx = manifest.find("name = \"Grass\"").expect("Grass entry");
    let glass_idx = manifest.find("name = \"Glass\"").expect("Glass entry");
    assert!(grass_idx < glass_idx, "first-encounter order violated");
    assert!(manifest.contains("texture = \"grass.png\""));
    assert!(manifest.contains("texture = \"glass.png\""));
    assert!(manifest.contains("max = [1.0, 2.0, 1.0]"));

    let grass_entry = &manifest[grass_idx..glass_idx];
    assert!(grass_entry.contains("alpha = false"));
    let glass_entry = &manifest[glass_idx..];
    assert!(glass_entry.contains("alpha = true"));
}

/// A missing material library aborts with no partial output
#[test]
fn test_missing_mtllib_aborts() {
    let dir = tempdir().expect("Failed to create temp dir");
    generate_test_assets::generate_missing_mtllib_obj(dir.path())
        .expect("Failed to generate scene");

    let output = dir.path().join("Course");
    let status = run_export(&[
        "convert",
        dir.path().join("broken.obj").to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);

    assert!(!status.success(), "convert should fail");
    assert!(!output.exists(), "no output directory may exist after abort");
}

/// `check` succeeds without writing anything
#[test]
fn test_check_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let textures = dir.path().join("textures");
    std::fs::create_dir(&textures).unwrap();
    generate_test_assets::generate_course_obj(dir.path()).expect("Failed to generate scene");

    let entries_before = count_entries(dir.path());
    let status = run_export(&[
        "check",
        dir.path().join("scene.obj").to_str().unwrap(),
        "-t",
        textures.to_str().unwrap(),
    ]);

    assert!(status.success(), "check command failed");
    assert_eq!(count_entries(dir.path()), entries_before);
}

/// Material script generation
#[test]
fn test_materials_script() {
    let dir = tempdir().expect("Failed to create temp dir");
    let textures = dir.path().join("textures");
    std::fs::create_dir(&textures).unwrap();

    generate_test_assets::generate_course_obj(dir.path()).expect("Failed to generate scene");
    generate_test_assets::generate_opaque_png(&textures.join("grass.png")).unwrap();
    generate_test_assets::generate_transparent_png(&textures.join("glass.png")).unwrap();

    let mat_path = dir.path().join("scene.mat");
    let status = run_export(&[
        "materials",
        dir.path().join("scene.obj").to_str().unwrap(),
        "-o",
        mat_path.to_str().unwrap(),
        "-t",
        textures.to_str().unwrap(),
    ]);
    assert!(status.success(), "materials command failed");

    let script = std::fs::read_to_string(&mat_path).expect("material script missing");
    assert!(script.contains("material Grass"));
    assert!(script.contains("texture grass.png"));
    assert!(script.contains("material Glass"));
    assert!(script.contains("alpha on"));
}

// Helper to run the shinten-export binary
fn run_export(args: &[&str]) -> std::process::ExitStatus {
    std::process::Command::new(env!("CARGO_BIN_EXE_shinten-export"))
        .args(args)
        .status()
        .expect("Failed to run shinten-export")
}

fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
