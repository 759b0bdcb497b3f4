use std::path::{Path, PathBuf};

use bf_app::{
    AppError, AppResult, FlowOptions, compute_flows, layout_service, list_parts, load_layout,
};
use bf_parts::Registry;
use bf_solver::{ErrorPolicy, FlowMap, SolveOptions};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(about = "BrewFlow CLI - liquid flow calculation for brewery layouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate layout file syntax, structure and part types
    Validate {
        /// Path to the layout file (YAML, or JSON by extension)
        layout_path: PathBuf,
    },
    /// List the parts of a layout
    Parts {
        /// Path to the layout file
        layout_path: PathBuf,
    },
    /// Calculate and print liquid flows
    Flows {
        /// Path to the layout file
        layout_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
        /// Key flows relative to each part's anchor
        #[arg(long)]
        local: bool,
        /// Fail on the first source that cannot be solved
        #[arg(long)]
        strict: bool,
    },
    /// Report skipped sources and parts whose flows do not balance
    Check {
        /// Path to the layout file
        layout_path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> AppResult<()> {
    // Logs go to stderr so flow output on stdout stays machine readable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { layout_path } => cmd_validate(&layout_path),
        Commands::Parts { layout_path } => cmd_parts(&layout_path),
        Commands::Flows {
            layout_path,
            format,
            local,
            strict,
        } => cmd_flows(&layout_path, format, local, strict),
        Commands::Check { layout_path } => cmd_check(&layout_path),
    }
}

fn cmd_validate(layout_path: &Path) -> AppResult<()> {
    println!("Validating layout: {}", layout_path.display());
    let layout = load_layout(layout_path)?;
    layout_service::validate_layout(&layout, &Registry::standard())?;
    println!("✓ Layout '{}' is valid ({} parts)", layout.name, layout.parts.len());
    Ok(())
}

fn cmd_parts(layout_path: &Path) -> AppResult<()> {
    let layout = load_layout(layout_path)?;
    let parts = list_parts(&layout);

    if parts.is_empty() {
        println!("No parts in layout");
        return Ok(());
    }
    println!("Parts in layout '{}':", layout.name);
    for part in parts {
        println!(
            "  {} - {} at ({}, {}) rotate {}{}{}",
            part.id,
            part.kind,
            part.x,
            part.y,
            part.rotate,
            if part.flipped { ", flipped" } else { "" },
            if part.is_source { " [source]" } else { "" },
        );
    }
    Ok(())
}

fn cmd_flows(layout_path: &Path, format: Format, local: bool, strict: bool) -> AppResult<()> {
    let layout = load_layout(layout_path)?;
    let registry = Registry::standard();
    let policy = if strict {
        ErrorPolicy::Abort
    } else {
        ErrorPolicy::SkipSource
    };
    let options = FlowOptions {
        solve: SolveOptions::default().with_error_policy(policy),
        local,
    };
    let response = compute_flows(&layout, &registry, &options)?;

    // Parts without any flow only add noise to the output.
    let flows: FlowMap = response
        .flows
        .into_iter()
        .filter(|(_, part_flows)| !part_flows.is_empty())
        .collect();
    let rendered = match format {
        Format::Yaml => serde_yaml::to_string(&flows).map_err(output_error)?,
        Format::Json => serde_json::to_string_pretty(&flows).map_err(output_error)?,
    };
    println!("{rendered}");

    if !response.failures.is_empty() {
        eprintln!("{} source(s) skipped, run `check` for details", response.failures.len());
    }
    Ok(())
}

fn cmd_check(layout_path: &Path) -> AppResult<()> {
    let layout = load_layout(layout_path)?;
    let response = compute_flows(&layout, &Registry::standard(), &FlowOptions::default())?;

    println!(
        "Sources: {} solved, {} skipped",
        response.perf.sources - response.perf.failed_sources,
        response.perf.failed_sources
    );
    for failure in &response.failures {
        println!("  ✗ {} at {}: {}", failure.part, failure.entry, failure.error);
    }

    if response.unbalanced.is_empty() {
        println!("✓ All parts balance");
    } else {
        println!("Unbalanced parts:");
        for (part, net) in &response.unbalanced {
            println!("  {part}: net {net:+.6}");
        }
    }
    Ok(())
}

fn output_error(err: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::Io(std::io::Error::other(err))
}
