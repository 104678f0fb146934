//! Layering guardrails to keep the library crates free of binary-only dependencies.
//!
//! `minic_syntax` is reusable by other tooling, so it may log through `tracing` but must never pick a
//! subscriber or parse command lines itself. `minic_core` is pure vocabulary data and has no dependencies.
//! These tests scan the crate manifests and fail if a forbidden crate appears in `[dependencies]`.

/// Names listed in the `[dependencies]` table of a manifest.
fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn syntax_crate_does_not_depend_on_binary_crates() {
    let names = dependency_names(include_str!("../crates/minic_syntax/Cargo.toml"));
    assert!(names.iter().any(|n| n == "minic_core"), "minic_syntax must use the shared vocabulary");
    for forbidden in ["clap", "tracing-subscriber", "minic"] {
        assert!(
            !names.iter().any(|n| n == forbidden),
            "`{forbidden}` must not appear in minic_syntax [dependencies]"
        );
    }
}

#[test]
fn core_crate_has_no_dependencies() {
    let names = dependency_names(include_str!("../crates/minic_core/Cargo.toml"));
    assert!(names.is_empty(), "minic_core must stay dependency-free, found {names:?}");
}

#[test]
fn manifest_scan_reads_only_the_dependencies_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\na = \"1\" # note\nb = { path = \"../b\" }\n\n[dev-dependencies]\nc = \"1\"\n";
    assert_eq!(dependency_names(manifest), vec!["a".to_string(), "b".to_string()]);
}
