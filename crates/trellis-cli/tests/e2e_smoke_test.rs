use std::{fs, path::PathBuf};

use tempfile::tempdir;

use trellis_cli::{Args, Emit, run};

/// Collects all .dsl files from a directory
fn collect_dsl_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("dsl")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

#[test]
fn e2e_smoke_test_demo_urls() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let demos = collect_dsl_files(demos_dir());
    assert!(!demos.is_empty(), "No demo files found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &demos {
        let output_filename = format!(
            "{}.url",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = Args {
            input: demo_path.to_string_lossy().to_string(),
            emit: Emit::Url,
            output: Some(output_path.to_string_lossy().to_string()),
            config: None,
            log_level: "off".to_string(),
        };

        match run(&args) {
            Ok(()) => {
                let url = fs::read_to_string(&output_path).expect("output file should exist");
                if !url.starts_with("http://www.plantuml.com/plantuml/png/") {
                    failed_demos.push((demo_path.clone(), format!("unexpected url: {url}")));
                }
            }
            Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[test]
fn e2e_smoke_test_every_emit_mode() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demo = demos_dir().join("shop.dsl");

    for (emit, extension) in [
        (Emit::Url, "url"),
        (Emit::Token, "token"),
        (Emit::Markup, "puml"),
        (Emit::Model, "json"),
    ] {
        let output_path = temp_dir.path().join(format!("shop.{extension}"));

        let args = Args {
            input: demo.to_string_lossy().to_string(),
            emit,
            output: Some(output_path.to_string_lossy().to_string()),
            config: None,
            log_level: "off".to_string(),
        };

        run(&args).unwrap_or_else(|e| panic!("emit mode {emit:?} failed: {e}"));

        let output = fs::read_to_string(&output_path).expect("output file should exist");
        assert!(!output.is_empty(), "emit mode {emit:?} produced no output");
    }
}

#[test]
fn e2e_smoke_test_markup_matches_demo() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("relations_only.puml");

    let args = Args {
        input: demos_dir()
            .join("relations_only.dsl")
            .to_string_lossy()
            .to_string(),
        emit: Emit::Markup,
        output: Some(output_path.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    };

    run(&args).expect("markup emission should succeed");

    let markup = fs::read_to_string(&output_path).unwrap();
    assert_eq!(
        markup,
        "@startuml\n\
         Billing::invoice_id --> Invoice::id\n\
         Invoice::customer_id --> Customer::id\n\
         @enduml"
    );
}

#[test]
fn e2e_missing_input_fails() {
    let args = Args {
        input: "no/such/file.dsl".to_string(),
        emit: Emit::Url,
        output: None,
        config: None,
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err());
}

#[test]
fn e2e_missing_explicit_config_fails() {
    let args = Args {
        input: demos_dir().join("shop.dsl").to_string_lossy().to_string(),
        emit: Emit::Url,
        output: None,
        config: Some("no/such/config.toml".to_string()),
        log_level: "off".to_string(),
    };

    assert!(run(&args).is_err());
}
