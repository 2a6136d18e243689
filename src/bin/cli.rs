// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hullmesh CLI

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use hullmesh::analytics::analyze;
use hullmesh::cli::Reporter;
use hullmesh::{io, MeshConfig, MeshFactory};
use std::path::Path;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "hullmesh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hullmesh - surface meshes of floating bodies", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Configuration file (defaults to hullmesh.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statistics of a mesh
    Inspect {
        /// Input JSON mesh
        input: String,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the healing pipeline on a mesh
    Heal {
        /// Input JSON mesh
        input: String,

        /// Output JSON mesh
        #[arg(short, long)]
        output: String,
    },

    /// Extract the immersed part of a mesh
    Immerse {
        /// Input JSON mesh
        input: String,

        /// Free surface elevation
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        free_surface: f64,

        /// Sea bottom elevation
        #[arg(long, allow_hyphen_values = true)]
        sea_bottom: Option<f64>,

        /// Output JSON mesh
        #[arg(short, long)]
        output: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => bail!("Unknown log level: {other}"),
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => MeshConfig::from_file(path)?,
        None => MeshConfig::load()?,
    };

    let result = match &cli.command {
        Commands::Inspect { input, json } => inspect_command(input, *json),
        Commands::Heal { input, output } => heal_command(input, output, &config),
        Commands::Immerse {
            input,
            free_surface,
            sea_bottom,
            output,
        } => immerse_command(input, *free_surface, *sea_bottom, output, &config),
        Commands::Version => {
            println!("Hullmesh v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(err) = &result {
        Reporter::report_error(&format!("{err:#}"));
    }
    result
}

fn check_input(input: &str) -> Result<()> {
    if !Path::new(input).exists() {
        bail!("Input file not found: {input}");
    }
    Ok(())
}

fn inspect_command(input: &str, json: bool) -> Result<()> {
    check_input(input)?;
    let mesh = io::read_json(input, &mut MeshFactory::default())?;
    let stats = analyze(&mesh);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    stats.print();
    if let Err(err) = mesh.boundaries() {
        Reporter::report_warning(&format!("Boundary loops unavailable: {err}"));
    }
    Ok(())
}

fn heal_command(input: &str, output: &str, config: &MeshConfig) -> Result<()> {
    check_input(input)?;
    let mut mesh = io::read_json(input, &mut MeshFactory::default())?;
    let before = (mesh.nb_vertices(), mesh.nb_faces());

    let start = Instant::now();
    let report = mesh.heal_mesh_with(&config.healing)?;
    Reporter::report_healing(input, before, &mesh, &report, start.elapsed());

    io::write_json(&mesh, output)?;
    Reporter::success(&format!("Wrote {output}"));
    Ok(())
}

fn immerse_command(
    input: &str,
    free_surface: f64,
    sea_bottom: Option<f64>,
    output: &str,
    config: &MeshConfig,
) -> Result<()> {
    check_input(input)?;
    let mesh = io::read_json(input, &mut MeshFactory::default())?;

    let start = Instant::now();
    let immersed = mesh.get_immersed_part_with(free_surface, sea_bottom, &config.clipping);
    Reporter::report_immersion(input, free_surface, immersed.as_ref(), start.elapsed());

    match immersed {
        Some(immersed) => {
            io::write_json(&immersed, output)?;
            Reporter::success(&format!("Wrote {output}"));
        }
        None => Reporter::report_info("Nothing written"),
    }
    Ok(())
}
