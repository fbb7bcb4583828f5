//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::Table;
use tracing::{info, info_span};

use cruise_ingest::{profiles_from_dir, profiles_from_list};
use cruise_model::Dataset;
use cruise_nc3::write_nc3;
use cruise_standards::{
    GLOBAL_ATTRS_ORDERED, GLOBAL_ATTRS_REQUIRED, VARIABLE_ATTRS_NECESSARY, VARIABLE_ATTRS_ORDERED,
    global_attr_options, is_required_global,
};
use cruise_transform::{PublishOptions, join_cruise, make_publishing_ready, prepare_export};
use cruise_validate::{audit_dataset, check_file};

use crate::cli::{AuditArgs, ProcessArgs};
use crate::summary::apply_table_style;

/// Result of a `process` run, for the summary table.
pub struct ProcessResult {
    pub dataset: Dataset,
    pub output_path: PathBuf,
    pub profile_count: usize,
    pub violation_count: usize,
    pub audit_finding_count: usize,
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let span = info_span!("process");
    let _guard = span.enter();

    let profiles = match &args.cast_dir {
        Some(dir) => {
            profiles_from_dir(dir).with_context(|| format!("load casts from {}", dir.display()))?
        }
        None => profiles_from_list(&args.files).context("load cast files")?,
    };
    let profile_count = profiles.len();

    let joined = join_cruise(profiles).context("join profiles")?;

    let options = PublishOptions {
        retain_vars: args.retain.clone(),
        override_vocab: args.override_vocab,
        calibration: match (&args.calibrate_a, &args.calibrate_b, &args.calibrate_input) {
            (Some(a), Some(b), Some(input)) => Some((*a, *b, input.clone())),
            _ => None,
        },
        remove_uncalibrated: args.remove_uncalibrated,
    };
    let outcome = make_publishing_ready(joined, &options).context("conventionalize")?;
    let violation_count = outcome.vocabulary_violations.len();

    // Advisory pass: findings print to stdout and never block the export.
    let report = audit_dataset(&outcome.dataset);
    let audit_finding_count = report.render_lines().len();
    report.print();

    let now = Utc::now();
    let (dataset, name) = prepare_export(
        outcome.dataset,
        &now,
        args.file_name.as_deref(),
        !args.no_history,
    );

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let output_path = output_dir.join(format!("{name}.nc"));
    write_nc3(&output_path, &dataset)
        .with_context(|| format!("write {}", output_path.display()))?;
    info!(path = %output_path.display(), "exported dataset");

    if args.convention_check {
        run_convention_check(&output_path)?;
    }

    Ok(ProcessResult {
        dataset,
        output_path,
        profile_count,
        violation_count,
        audit_finding_count,
    })
}

fn run_convention_check(path: &Path) -> Result<()> {
    let report =
        check_file(path).with_context(|| format!("convention check on {}", path.display()))?;
    if report.is_clean() {
        println!("convention check: OK");
    } else {
        println!("convention check findings:");
        for line in report.render_lines() {
            println!("  {line}");
        }
    }
    Ok(())
}

pub fn run_audit(args: &AuditArgs) -> Result<()> {
    let report = check_file(&args.file)
        .with_context(|| format!("audit {}", args.file.display()))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
        if report.is_clean() {
            println!("OK");
        }
    }
    Ok(())
}

pub fn run_schema() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Global attribute", "Required", "Vocabulary"]);
    apply_table_style(&mut table);
    for &name in GLOBAL_ATTRS_ORDERED {
        let required = if is_required_global(name) { "yes" } else { "" };
        let vocabulary = global_attr_options(name)
            .map(|options| options.join("\n"))
            .unwrap_or_default();
        table.add_row(vec![name.to_string(), required.to_string(), vocabulary]);
    }
    println!("{table}");
    println!(
        "{} global attributes, {} required",
        GLOBAL_ATTRS_ORDERED.len(),
        GLOBAL_ATTRS_REQUIRED.len()
    );

    let mut table = Table::new();
    table.set_header(vec!["Variable attribute", "Baseline required"]);
    apply_table_style(&mut table);
    for &name in VARIABLE_ATTRS_ORDERED {
        let required = if VARIABLE_ATTRS_NECESSARY.contains(&name) {
            "yes"
        } else {
            ""
        };
        table.add_row(vec![name.to_string(), required.to_string()]);
    }
    println!("{table}");
    Ok(())
}
