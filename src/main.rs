//! Painplan CLI
//!
//! Usage:
//!   painplan plan <request.json|-> [--format json|text]
//!   painplan rules
//!   painplan procedure <type> [--request <request.json>] [--format json|text]
//!
//! Set PAINPLAN_RULES to a JSON rule file to replace the built-in catalog.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use painplan_lib::config;
use painplan_lib::ids::UuidIds;
use painplan_lib::models::enums::ProcedureType;
use painplan_lib::models::PatientInfo;
use painplan_lib::pipeline::{DefaultPlanEngine, PlanEngine, PlanError, PlanRequest};
use painplan_lib::report;

#[derive(Parser)]
#[command(name = "painplan")]
#[command(version)]
#[command(about = "Analgesic, monitoring and red-flag plans from a pain assessment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a full plan from a JSON request
    Plan {
        /// Request file, or `-` for stdin
        request: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the active rule catalog as JSON
    Rules,

    /// Build a procedural pain plan
    Procedure {
        /// Procedure type (e.g. burn_dressing); unknown types map to `other`
        procedure: String,

        /// Request file supplying patient and comorbidities
        #[arg(short, long)]
        request: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

fn main() -> ExitCode {
    painplan_lib::init_tracing();

    let cli = Cli::parse();
    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "painplan failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let engine = build_engine()?;
    let ids = UuidIds;

    match cli.command {
        Commands::Plan { request, format } => {
            let request = read_request(&request)?;
            let plan = engine.generate(&request, &ids)?;
            Ok(match format {
                OutputFormat::Json => serde_json::to_string_pretty(&plan)?,
                OutputFormat::Text => report::render_text(&plan),
            })
        }
        Commands::Rules => Ok(engine
            .catalog()
            .to_json_pretty()
            .map_err(PlanError::from)?),
        Commands::Procedure {
            procedure,
            request,
            format,
        } => {
            let procedure = ProcedureType::parse_lenient(&procedure);
            let (patient, comorbidities) = match request {
                Some(path) => {
                    let req = read_request(&path.to_string_lossy())?;
                    (req.patient, req.comorbidities)
                }
                None => (anonymous_adult(), Vec::new()),
            };
            let plan = engine.procedural(procedure, &patient, &comorbidities, &ids)?;
            Ok(match format {
                OutputFormat::Json => serde_json::to_string_pretty(&plan)?,
                OutputFormat::Text => report::render_procedural_text(&plan),
            })
        }
    }
}

fn build_engine() -> Result<DefaultPlanEngine, CliError> {
    match config::rules_override_path() {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using rule catalog override");
            Ok(DefaultPlanEngine::from_path(&path)?)
        }
        None => Ok(DefaultPlanEngine::default()),
    }
}

fn read_request(source: &str) -> Result<PlanRequest, CliError> {
    let json = if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(Path::new(source))?
    };
    Ok(serde_json::from_str(&json)?)
}

/// Stand-in patient when no request is given: adult, no comorbidities.
fn anonymous_adult() -> PatientInfo {
    PatientInfo::new(
        "anonymous",
        "",
        40.0,
        Default::default(),
        Default::default(),
    )
}
