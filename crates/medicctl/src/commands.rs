//! Command implementations for medicctl.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use medic_core::inspector::{run_checks, solution_view};
use medic_core::problem::catalog;
use medic_core::Site;

use crate::display;

/// Exit code when the site is healthy
pub const EXIT_CLEAN: i32 = 0;
/// Exit code when at least one critical problem was found
pub const EXIT_CRITICAL: i32 = 1;
/// Exit code when only non-critical problems or check failures were found
pub const EXIT_ISSUES: i32 = 2;
/// Exit code for an unknown check id
pub const EXIT_UNKNOWN_CHECK: i32 = 64;

/// Run the full catalog and print the report.
pub fn execute_check_command(config: &Path, json: bool) -> Result<i32> {
    let site = Site::open(config)
        .with_context(|| format!("failed to load site from {}", config.display()))?;
    let checks = catalog();
    let report = run_checks(&site, &checks);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", display::render_health_report(&report));
    }

    if report.has_critical() {
        Ok(EXIT_CRITICAL)
    } else if report.is_clean() {
        Ok(EXIT_CLEAN)
    } else {
        Ok(EXIT_ISSUES)
    }
}

/// Show the drill-down view for one check.
pub fn execute_solution_command(config: &Path, id: &str, json: bool) -> Result<i32> {
    let site = Site::open(config)
        .with_context(|| format!("failed to load site from {}", config.display()))?;
    let checks = catalog();

    match solution_view(&site, &checks, id)? {
        Some(view) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", display::render_solution_view(&view));
            }
            Ok(EXIT_CLEAN)
        }
        None => {
            eprintln!("{} unknown check id '{id}'", style("error:").red().bold());
            eprintln!("Run `medicctl list` to see every registered check.");
            Ok(EXIT_UNKNOWN_CHECK)
        }
    }
}

/// List every registered check.
pub fn execute_list_command(json: bool) -> Result<i32> {
    let checks = catalog();

    if json {
        let entries: Vec<serde_json::Value> = checks
            .iter()
            .map(|check| {
                serde_json::json!({
                    "id": check.id(),
                    "severity": check.severity().as_str(),
                    "title": check.title(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", display::render_catalog(&checks));
    }
    Ok(EXIT_CLEAN)
}
