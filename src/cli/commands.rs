//! Command implementation for the s1l2-to-shp CLI
//!
//! Wires argument parsing, logging setup, the converter and the final
//! summary report together.

use crate::app::services::converter::{ConversionStats, GridToPointConverter};
use crate::app::services::shapefile_writer::utils::format_bytes;
use crate::cli::args::{Args, OutputFormat};
use crate::constants::LOG_TARGET;
use crate::{Error, Result};
use anyhow::Context;
use colored::*;
use indicatif::HumanDuration;
use tracing::{debug, info};

/// Main command runner
///
/// 1. Set up logging
/// 2. Validate arguments and build the converter configuration
/// 3. Convert the grid and print the summary
pub fn run(args: Args) -> anyhow::Result<ConversionStats> {
    setup_logging(&args)?;
    args.validate()?;

    let destination = args.destination_path();
    let converter = GridToPointConverter::new(args.to_config())?;
    debug!("Configuration: {:?}", converter.config());
    let stats = converter
        .convert(&args.source, &destination)
        .with_context(|| {
            format!(
                "Failed to convert {} to {}",
                args.source.display(),
                destination.display()
            )
        })?;

    generate_final_report(&args, &stats)?;
    Ok(stats)
}

/// Set up structured logging to stderr
///
/// `RUST_LOG` takes precedence over the `-v`/`-q` flags.
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // A subscriber installed earlier in the process (embedding, repeated runs) wins
    if result.is_err() {
        debug!("Global subscriber already set, keeping it");
        return Ok(());
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Print the final conversion report
fn generate_final_report(args: &Args, stats: &ConversionStats) -> Result<()> {
    info!("Generating final report");

    match args.output_format {
        OutputFormat::Human => {
            if !args.quiet {
                println!("{}", human_report(stats));
            }
        }
        OutputFormat::Json => {
            let report = serde_json::to_string_pretty(&json_report(stats))
                .map_err(|e| Error::configuration(format!("Failed to encode report: {}", e)))?;
            println!("{}", report);
        }
    }
    Ok(())
}

/// Human-readable summary
pub fn human_report(stats: &ConversionStats) -> String {
    let mut lines = vec![
        format!("\n{}", "Conversion Complete".bright_green().bold()),
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".to_string(),
        format!("   • Source: {}", stats.source_path.display()),
        format!("   • Shapefile: {}", stats.destination_path.display()),
        format!("   • Grid: {} x {}", stats.rows, stats.cols),
        format!(
            "   • Points written: {}",
            stats.features_written.to_string().bright_white().bold()
        ),
        format!("   • Output size: {}", format_bytes(stats.bytes_written)),
        format!("   • Throughput: {:.0} points/s", stats.throughput()),
        format!(
            "   • Processing time: {}",
            HumanDuration(stats.processing_time)
        ),
    ];

    if stats.masked_cells > 0 {
        lines.push(format!(
            "   • Masked cells written as null: {}",
            stats.masked_cells.to_string().yellow()
        ));
    }

    lines.join("\n")
}

/// JSON summary for machine consumption
pub fn json_report(stats: &ConversionStats) -> serde_json::Value {
    serde_json::json!({
        "source": stats.source_path.display().to_string(),
        "destination": stats.destination_path.display().to_string(),
        "rows": stats.rows,
        "cols": stats.cols,
        "features_written": stats.features_written,
        "masked_cells": stats.masked_cells,
        "output_size_bytes": stats.bytes_written,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "points_per_second": stats.throughput(),
    })
}
