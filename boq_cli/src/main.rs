//! # BOQ Toolkit CLI
//!
//! Terminal front end for the BOQ calculators and the material estimator.
//! Every command prints a human-readable report, or JSON with `--json`
//! (for LLM/API use).
//!
//! ```text
//! boq flooring --area 50 --tile-length 0.6 --tile-width 0.6
//! boq brickwork --wall-length 10 --wall-height 3
//! boq estimate --boq-file boq.txt --site "G+2, black cotton soil"
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boq_core::calculations::brickwork::{
    self, BrickworkForm, DEFAULT_BRICK_HEIGHT, DEFAULT_BRICK_LENGTH, DEFAULT_BRICK_WIDTH,
    DEFAULT_MORTAR_THICKNESS,
};
use boq_core::calculations::concrete::{self, ConcreteForm, DEFAULT_GRADE};
use boq_core::calculations::flooring::{self, FlooringForm, DEFAULT_WASTAGE_PERCENT};
use boq_core::calculations::CalculatorResult;
use boq_core::estimation::{create_generator, EstimationRequest, MaterialEstimator};
use boq_core::{CalcError, Config};

const RULE: &str = "═══════════════════════════════════════";

/// Message shown for any text-generation failure
const ESTIMATION_FAILED: &str = "Could not estimate material quantities. Please try again.";

#[derive(Parser)]
#[command(name = "boq", version, about = "BOQ calculators and AI material estimation")]
struct Cli {
    /// Print JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./boq.toml when present)
    #[arg(long, global = true, env = "BOQ_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Concrete volume for a slab, footing or beam (meters)
    Concrete {
        #[arg(long, allow_hyphen_values = true)]
        length: String,
        #[arg(long, allow_hyphen_values = true)]
        width: String,
        #[arg(long, allow_hyphen_values = true)]
        thickness: String,
        /// Concrete grade label, echoed in the result
        #[arg(long, default_value = DEFAULT_GRADE)]
        grade: String,
    },

    /// Floor tiles needed, including wastage
    Flooring {
        /// Floor area (m²)
        #[arg(long, allow_hyphen_values = true)]
        area: String,
        /// Tile length (m)
        #[arg(long, allow_hyphen_values = true)]
        tile_length: String,
        /// Tile width (m)
        #[arg(long, allow_hyphen_values = true)]
        tile_width: String,
        /// Wastage allowance (%)
        #[arg(long, allow_hyphen_values = true, default_value = DEFAULT_WASTAGE_PERCENT)]
        wastage: String,
    },

    /// Bricks needed for a wall face
    Brickwork {
        #[arg(long, allow_hyphen_values = true)]
        wall_length: String,
        #[arg(long, allow_hyphen_values = true)]
        wall_height: String,
        #[arg(long, allow_hyphen_values = true, default_value = DEFAULT_BRICK_LENGTH)]
        brick_length: String,
        #[arg(long, allow_hyphen_values = true, default_value = DEFAULT_BRICK_HEIGHT)]
        brick_height: String,
        /// Not used by the face-area method
        #[arg(long, allow_hyphen_values = true, default_value = DEFAULT_BRICK_WIDTH)]
        brick_width: String,
        /// Mortar joint thickness (m)
        #[arg(long, allow_hyphen_values = true, default_value = DEFAULT_MORTAR_THICKNESS)]
        mortar: String,
    },

    /// Ask the configured text-generation provider for material quantities
    Estimate {
        /// BOQ items as text
        #[arg(long, conflicts_with = "boq_file", required_unless_present = "boq_file")]
        boq: Option<String>,
        /// Read BOQ items from a file
        #[arg(long)]
        boq_file: Option<PathBuf>,
        /// Site parameters as text
        #[arg(long, conflicts_with = "site_file", required_unless_present = "site_file")]
        site: Option<String>,
        /// Read site parameters from a file
        #[arg(long)]
        site_file: Option<PathBuf>,
        /// Override generator.provider
        #[arg(long)]
        provider: Option<String>,
        /// Override generator.model
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Concrete {
            length,
            width,
            thickness,
            grade,
        } => {
            let form = ConcreteForm {
                length,
                width,
                thickness,
                grade,
            };
            let outcome = form.parse().and_then(|input| concrete::calculate(&input));
            let details = match &outcome {
                Ok(r) => vec![("Volume (exact)", format!("{:.4} m³", r.volume_m3.0))],
                Err(_) => Vec::new(),
            };
            print_calculation(
                "CONCRETE VOLUME",
                CalculatorResult::from_outcome(outcome),
                &details,
                cli.json,
            )
        }

        Commands::Flooring {
            area,
            tile_length,
            tile_width,
            wastage,
        } => {
            let form = FlooringForm {
                area,
                tile_length,
                tile_width,
                wastage_percent: wastage,
            };
            let outcome = form.parse().and_then(|input| flooring::calculate(&input));
            let details = match &outcome {
                Ok(r) => vec![
                    ("Tile area", format!("{:.4} m²", r.tile_area_m2.0)),
                    ("Tiles before wastage", r.raw_tile_count.to_string()),
                    ("Tiles to order", r.total_tiles.to_string()),
                ],
                Err(_) => Vec::new(),
            };
            print_calculation(
                "FLOORING (TILES)",
                CalculatorResult::from_outcome(outcome),
                &details,
                cli.json,
            )
        }

        Commands::Brickwork {
            wall_length,
            wall_height,
            brick_length,
            brick_height,
            brick_width,
            mortar,
        } => {
            let form = BrickworkForm {
                wall_length,
                wall_height,
                brick_length,
                brick_height,
                brick_width,
                mortar_thickness: mortar,
            };
            let outcome = form.parse().and_then(|input| brickwork::calculate(&input));
            let details = match &outcome {
                Ok(r) => vec![
                    (
                        "Brick + joint footprint",
                        format!("{:.4} m²", r.brick_footprint_m2.0),
                    ),
                    ("Wall face area", format!("{:.2} m²", r.wall_face_area_m2.0)),
                    ("Bricks", r.brick_count.to_string()),
                ],
                Err(_) => Vec::new(),
            };
            print_calculation(
                "BRICKWORK",
                CalculatorResult::from_outcome(outcome),
                &details,
                cli.json,
            )
        }

        Commands::Estimate {
            boq,
            boq_file,
            site,
            site_file,
            provider,
            model,
        } => {
            let boq_items = read_text(boq, boq_file, "BOQ items")?;
            let site_parameters = read_text(site, site_file, "site parameters")?;

            let mut config = Config::load(cli.config.as_deref())?;
            if let Some(provider) = provider {
                config.generator.provider = provider;
            }
            if model.is_some() {
                config.generator.model = model;
            }
            debug!(generator = ?config.generator, "Resolved generator config");

            let request = match EstimationRequest::new(boq_items, site_parameters) {
                Ok(request) => request,
                Err(err) => return print_error(&err, &err.to_string(), cli.json),
            };

            let estimator = MaterialEstimator::new(create_generator(&config.generator)?);
            match estimator.estimate(&request).await {
                Ok(result) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        println!("{}", result.material_estimations);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(err @ CalcError::GenerationFailed { .. }) => {
                    print_error(&err, ESTIMATION_FAILED, cli.json)
                }
                Err(err) => print_error(&err, &err.to_string(), cli.json),
            }
        }
    }
}

/// Inline text wins; otherwise read the file. Clap guarantees one of them.
fn read_text(inline: Option<String>, file: Option<PathBuf>, what: &str) -> Result<String> {
    match (inline, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("reading {} from {}", what, path.display())),
        (None, None) => anyhow::bail!("{} are required", what),
    }
}

fn print_calculation(
    title: &str,
    result: CalculatorResult,
    details: &[(&str, String)],
    json: bool,
) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", RULE);
        println!("  {}", title);
        println!("{}", RULE);
        println!();
        for (label, value) in details {
            println!("  {:<24} {}", format!("{}:", label), value);
        }
        if !details.is_empty() {
            println!();
        }
        println!("{} {}", status_icon(result.ok), result.message);
    }

    Ok(if result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_error(err: &CalcError, message: &str, json: bool) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(err)?);
    } else {
        eprintln!("{}", message);
    }
    Ok(ExitCode::FAILURE)
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_numbers_reach_the_validator() {
        let cli = Cli::try_parse_from([
            "boq", "concrete", "--length", "-2", "--width", "1", "--thickness", "1",
        ])
        .unwrap();
        match cli.command {
            Commands::Concrete { length, grade, .. } => {
                assert_eq!(length, "-2");
                assert_eq!(grade, "M20");
            }
            _ => panic!("expected concrete command"),
        }
    }

    #[test]
    fn test_brickwork_defaults() {
        let cli =
            Cli::try_parse_from(["boq", "brickwork", "--wall-length", "10", "--wall-height", "3"])
                .unwrap();
        match cli.command {
            Commands::Brickwork {
                brick_length,
                brick_height,
                brick_width,
                mortar,
                ..
            } => {
                assert_eq!(brick_length, "0.23");
                assert_eq!(brick_height, "0.075");
                assert_eq!(brick_width, "0.115");
                assert_eq!(mortar, "0.01");
            }
            _ => panic!("expected brickwork command"),
        }
    }

    #[test]
    fn test_estimate_needs_both_inputs() {
        assert!(Cli::try_parse_from(["boq", "estimate", "--boq", "RCC M25: 100 m3"]).is_err());
        assert!(Cli::try_parse_from([
            "boq",
            "estimate",
            "--boq",
            "RCC M25: 100 m3",
            "--boq-file",
            "x.txt",
            "--site",
            "G+2 floors",
        ])
        .is_err());
    }

    #[test]
    fn test_read_text_prefers_inline() {
        let text = read_text(
            Some("inline".to_string()),
            Some(PathBuf::from("/nonexistent")),
            "BOQ items",
        )
        .unwrap();
        assert_eq!(text, "inline");
        assert!(read_text(None, Some(PathBuf::from("/nonexistent/boq.txt")), "BOQ items").is_err());
    }
}
