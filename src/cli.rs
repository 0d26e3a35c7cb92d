//! # CLI Module
//!
//! This module provides the command-line interface for chronostream:
//! - Argument parsing with clap
//! - Dataset configuration loading (JSON/YAML)
//! - NetCDF file inspection
//! - Axis dumps and query-time resolution for validation and debugging

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::calendar::{datestring_to_julian, julian_to_datestring};
use crate::info::{get_netcdf_info, print_file_info_human, print_file_info_json};
use crate::input::DatasetConfig;
use crate::resolve::resolve;

/// Temporal stream indexing for multi-file NetCDF and CSV climate datasets
#[derive(Parser, Debug)]
#[command(name = "chronostream")]
#[command(about = "Inspect and query the time axis of multi-file datasets")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show dimensions, variables and attributes of a NetCDF file
    Info {
        /// NetCDF file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Restrict output to one variable
        #[arg(short = 'n', long)]
        variable: Option<String>,

        /// Include global attributes
        #[arg(long)]
        detailed: bool,

        /// Emit JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Build the global time axis of a dataset and print it
    Times {
        /// Dataset configuration file (JSON or YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Resolve a query date to a sample location within a dataset
    Resolve {
        /// Dataset configuration file (JSON or YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// Query date, `yyyy-mm-dd` or `yyyy-mm-dd hh:mm:ss`
        #[arg(short, long)]
        date: String,

        /// Override the config's periodic flag
        #[arg(long)]
        periodic: Option<bool>,

        /// Override the config's centered flag
        #[arg(long)]
        centered: Option<bool>,
    },
}

/// Dispatches a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info {
            file,
            variable,
            detailed,
            json,
        } => run_info(&file, variable.as_deref(), detailed, json),
        Commands::Times { config, json } => run_times(&config, json),
        Commands::Resolve {
            config,
            date,
            periodic,
            centered,
        } => run_resolve(&config, &date, periodic, centered),
    }
}

fn run_info(file: &str, variable: Option<&str>, detailed: bool, json: bool) -> Result<()> {
    let info = get_netcdf_info(file, variable, detailed)
        .with_context(|| format!("failed to inspect {}", file))?;
    if json {
        print_file_info_json(&info)?;
    } else {
        print_file_info_human(&info);
    }
    Ok(())
}

fn run_times(config_path: &PathBuf, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let axis = config.build_axis().context("failed to build time axis")?;

    let rows = axis.dump();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "Axis: {} samples over {} files, step = {:.4} days, span = {:.4} days",
        axis.len(),
        config.files.len(),
        axis.step(),
        axis.span()
    );
    println!("{:>10}  {:>5}  {:>5}  {:>12}  date", "idx", "f_idx", "t_idx", "days");
    for row in rows {
        println!(
            "{:>10}  {:>5}  {:>5}  {:>12.4}  {}",
            row.global_idx, row.file_idx, row.local_idx, row.days, row.date
        );
    }
    Ok(())
}

fn run_resolve(
    config_path: &PathBuf,
    date: &str,
    periodic: Option<bool>,
    centered: Option<bool>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let axis = config.build_axis().context("failed to build time axis")?;

    let julian_day = datestring_to_julian(date)?;
    let periodic = periodic.unwrap_or(config.periodic);
    let centered = centered.unwrap_or(config.centered);

    let idx = resolve(&axis, julian_day, periodic, centered)?;
    println!(
        "{} (julian {:.4}) -> idx {} (file {}, local {}) at {}",
        date,
        julian_day,
        idx.global_idx,
        idx.file_idx,
        idx.local_idx,
        julian_to_datestring(axis.base_julian() + axis.time_at(idx.global_idx))
    );
    Ok(())
}

fn load_config(path: &PathBuf) -> Result<DatasetConfig> {
    DatasetConfig::from_file(path)
        .with_context(|| format!("failed to load dataset config {}", path.display()))
}
