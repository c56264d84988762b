use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use hopscotch_lint::config::Config;
use hopscotch_lint::profile::{Profile, ProfileRegistry, DEFAULT_PROFILE};
use hopscotch_lint::report::Report;
use hopscotch_lint::validation::validate_document;

fn main() -> ExitCode {
    let config = match Config::from_args_and_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            return ExitCode::from(2);
        }
    };

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    let profile = match load_profile(&config) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            return ExitCode::from(2);
        }
    };

    let content = match std::fs::read_to_string(&config.path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("ERROR: Could not read {}: {}", config.path.display(), e);
            return ExitCode::from(2);
        }
    };

    let report = validate_document(&content, &profile);

    if config.json {
        print_json(&report);
    } else {
        print_summary(&report);
        print_diagnostics(&report);
    }

    if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Resolve the active profile: built-in first, then user directories, then
/// the explicit selection from the command line.
fn load_profile(config: &Config) -> Result<Profile> {
    let mut registry = ProfileRegistry::with_builtin()?;

    for dir in &config.profile_dirs {
        match registry.load_from_directory(dir) {
            Ok(0) => {}
            Ok(n) => log::debug!("loaded {} profile(s) from {}", n, dir.display()),
            Err(e) => log::warn!(
                "could not scan profile directory {}: {:#}",
                dir.display(),
                e
            ),
        }
    }

    let name = config.profile.as_deref().unwrap_or(DEFAULT_PROFILE);
    if !registry.set_active_profile(name) {
        bail!(
            "unknown profile '{}' (available: {})",
            name,
            registry.list_profiles().join(", ")
        );
    }
    registry
        .active_profile()
        .cloned()
        .context("no active profile")
}

/// Structural summary on stdout: hierarchy, entity counts, orphans.
fn print_summary(report: &Report) {
    println!("Summary:");
    for row in &report.hierarchy {
        println!("{}{}", "\t".repeat(row.depth), row.label);
    }
    println!("\tentities:");
    for (kind, count) in &report.counts {
        println!("\t\t{}: {}", kind, count);
    }
    if !report.orphans.is_empty() {
        println!("\torphaned nodes:");
        for label in report.orphan_labels() {
            println!("\t\t{}", label);
        }
    }
}

/// Errors then warnings on stderr; `Validation OK` on stdout when clean.
fn print_diagnostics(report: &Report) {
    if !report.errors.is_empty() {
        eprintln!("\nValidation errors:");
        for diagnostic in &report.errors {
            eprintln!("- Line {}: {}", diagnostic.line, diagnostic.message);
        }
    }
    if !report.warnings.is_empty() {
        eprintln!("\nSchema warnings:");
        for diagnostic in &report.warnings {
            eprintln!("- Line {}: {}", diagnostic.line, diagnostic.message);
        }
    }
    if report.is_valid() {
        println!("\nValidation OK");
    }
}

fn print_json(report: &Report) {
    let payload = serde_json::json!({
        "status": if report.is_valid() { "ok" } else { "error" },
        "errors": report.errors,
        "warnings": report.warnings,
        "counts": report.counts,
        "hierarchy": report.hierarchy,
        "orphans": report.orphan_labels(),
    });
    println!("{payload:#}");
}
