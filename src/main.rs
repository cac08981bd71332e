mod aggregate;
mod cli;
mod config;
mod error;
mod report;
mod score;
mod source;
mod types;

use crate::error::YapError;
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const PENALTIES: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_validated_config() -> Result<types::config::YapConfig, YapError> {
    let cfg = config::load_config(Path::new("."))?.unwrap_or_default();
    cfg.validate()?;
    Ok(cfg)
}

fn output_format(format: &cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32, YapError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            let text = match (&cmd.text, &cmd.file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => {
                    if !path.exists() {
                        return Err(YapError::PathNotFound(path.display().to_string()));
                    }
                    std::fs::read_to_string(path)?
                }
                (None, None) => return Err(YapError::EmptyContent),
            };
            if text.trim().is_empty() {
                return Err(YapError::EmptyContent);
            }

            let cfg = load_validated_config()?;
            let breakdown = score::score(&text, &cfg.scoring_config());
            let rendered = report::render_score(&breakdown, output_format(&cmd.format))?;
            println!("{rendered}");

            if !breakdown.penalties.is_empty() {
                Ok(exit_code::PENALTIES)
            } else if !breakdown.well_optimized {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Aggregate(cmd) => {
            let cfg = load_validated_config()?;
            let (records, inputs) = source::load_attestations(&cmd.input)?;
            let aggregation = aggregate::aggregate(&records, &cfg.aggregate_config());

            let aggregate_report = types::attestation::AggregateReport {
                generated_at: Utc::now().to_rfc3339(),
                schema_uid: cmd.schema,
                record_count: aggregation.record_count,
                skipped_records: aggregation.skipped_records,
                inputs,
                fields: aggregation.fields,
            };
            let rendered =
                report::render_aggregate(&aggregate_report, output_format(&cmd.format))?;
            println!("{rendered}");

            if aggregate_report.skipped_records > 0 {
                eprintln!(
                    "warning: skipped {} record(s) with malformed decoded payloads",
                    aggregate_report.skipped_records
                );
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Lookup(cmd) => {
            let (records, _inputs) = source::load_attestations(&cmd.input)?;
            let hit = aggregate::lookup::lookup_user(&records, &cmd.user_id)
                .ok_or_else(|| YapError::NoMatch(cmd.user_id.clone()))?;

            let created = hit
                .created_at
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_else(|| hit.time_created.to_string());
            println!("# Attestation for user {}", cmd.user_id);
            println!();
            println!(
                "Matches in batch: {} (showing latest, created {})",
                hit.total_matches, created
            );
            println!("Revoked: {}", hit.revoked);
            println!();
            for field in &hit.fields {
                println!("- {} ({}): {}", field.name, field.field_type, field.unwrapped());
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Schemas(cmd) => {
            let (schemas, _inputs) = source::load_schemas(&cmd.input)?;
            let keywords = if cmd.keyword.is_empty() {
                source::DEFAULT_SCHEMA_KEYWORDS
                    .iter()
                    .map(|keyword| keyword.to_string())
                    .collect()
            } else {
                cmd.keyword
            };
            let candidates = source::scan_schema_candidates(&schemas, &keywords);

            if candidates.is_empty() {
                println!("schemas: no candidates among {} declarations", schemas.len());
                return Ok(exit_code::WARNINGS);
            }
            println!(
                "# Schema candidates ({} of {})",
                candidates.len(),
                schemas.len()
            );
            println!();
            for schema in candidates {
                println!("- {}", schema.id);
                println!("  {}", schema.schema);
                if let Some(creator) = &schema.creator {
                    println!("  creator: {creator}");
                }
                if let Some(index) = &schema.index {
                    println!("  index: {index}");
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Projects(cmd) => {
            let projects = source::projects::catalog_or_fallback(cmd.snapshot.as_deref());
            println!("# Trending pre-TGE projects");
            println!();
            for project in &projects {
                println!(
                    "- {} [{}] mindshare: {}",
                    project.name, project.category, project.mindshare
                );
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
