use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use habitat_cli::logging::init_tracing;
use habitat_cli::output::{render_catalog, render_layout, render_metrics, OutputFormat};
use habitat_cli::{BackendKind, EngineConfig};
use habitat_logic::catalog::catalog_entries;
use habitat_logic::metrics::{check_volume, compute_metrics};
use habitat_logic::params::WRAPPER_KEY;
use habitat_logic::{LayoutResponse, MissionParameters};

#[derive(Parser, Debug)]
#[command(author, version, about = "Conceptual space habitat layout generator")]
struct Cli {
    /// Engine configuration file (JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where generation runs. Overrides the configuration file.
    #[arg(long, global = true, value_enum)]
    backend: Option<BackendKind>,

    /// Engine executable for the external backend.
    #[arg(long, global = true)]
    native_program: Option<PathBuf>,

    /// Parameter schema to validate against instead of the bundled one.
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a habitat layout.
    Generate {
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
        /// Skip schema validation.
        #[arg(long)]
        no_validate: bool,
    },
    /// Check mission parameters against the schema.
    Validate {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Generate a layout and report its metrics and rule violations.
    Metrics {
        #[command(flatten)]
        params: ParamArgs,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List the module catalog.
    Catalog {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

/// Mission parameters: a JSON file, the form defaults, or either with
/// individual fields overridden.
#[derive(Args, Debug)]
struct ParamArgs {
    /// JSON parameter file, bare or wrapped under "habitat".
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    crew_size: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    mission_days: Option<i64>,
    #[arg(long)]
    mission_type: Option<String>,
    #[arg(long)]
    deployment_vehicle: Option<String>,
    #[arg(long)]
    habitat_material: Option<String>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing("info", cli.verbose);

    let config = load_config(&cli)?;
    debug!(?config, "effective configuration");

    match cli.command {
        Command::Generate {
            params,
            format,
            no_validate,
        } => handle_generate(&config, &params, format, config.validate && !no_validate),
        Command::Validate { params } => handle_validate(&config, &params),
        Command::Metrics { params, format } => handle_metrics(&config, &params, format),
        Command::Catalog { format } => handle_catalog(format),
    }
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(program) = &cli.native_program {
        config.native_program = program.clone();
    }
    if let Some(schema) = &cli.schema {
        config.schema_path = Some(schema.clone());
    }
    Ok(config)
}

fn handle_generate(
    config: &EngineConfig,
    args: &ParamArgs,
    format: OutputFormat,
    validate: bool,
) -> Result<ExitCode> {
    let raw = raw_parameters(args)?;
    if validate {
        if let Err(err) = config.schema()?.validate_parameters(&raw) {
            return report_failure(format, err.to_string());
        }
    }

    let params = match MissionParameters::from_raw(&raw) {
        Ok(params) => params,
        Err(err) => return report_failure(format, err.to_string()),
    };

    let backend = config.build_backend();
    info!(backend = backend.name(), "generating layout");
    match backend.respond(&params) {
        LayoutResponse::Success(layout) => {
            match format {
                OutputFormat::Json => {
                    let response = LayoutResponse::Success(layout);
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                OutputFormat::Text => print!("{}", render_layout(&layout)),
            }
            Ok(ExitCode::SUCCESS)
        }
        LayoutResponse::Error { message } => report_failure(format, message),
    }
}

fn handle_validate(config: &EngineConfig, args: &ParamArgs) -> Result<ExitCode> {
    let raw = raw_parameters(args)?;
    match config.schema()?.validate_parameters(&raw) {
        Ok(()) => {
            println!("Parameters are valid.");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_metrics(config: &EngineConfig, args: &ParamArgs, format: OutputFormat) -> Result<ExitCode> {
    let raw = raw_parameters(args)?;
    let params = MissionParameters::from_raw(&raw).context("failed to read mission parameters")?;
    let layout = match config.build_backend().respond(&params) {
        LayoutResponse::Success(layout) => layout,
        LayoutResponse::Error { message } => return report_failure(format, message),
    };

    let metrics = compute_metrics(&layout);
    let volume = check_volume(params.crew_size, metrics.total_volume_m3);
    match format {
        OutputFormat::Json => {
            let report = json!({ "metrics": metrics, "volume_check": volume });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print!("{}", render_metrics(&metrics, &volume)),
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_catalog(format: OutputFormat) -> Result<ExitCode> {
    let entries = catalog_entries();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => print!("{}", render_catalog(&entries)),
    }
    Ok(ExitCode::SUCCESS)
}

/// Print a failure the way the chosen format expects and exit non-zero.
fn report_failure(format: OutputFormat, message: String) -> Result<ExitCode> {
    match format {
        OutputFormat::Json => {
            let response = LayoutResponse::error(message);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => eprintln!("error: {message}"),
    }
    Ok(ExitCode::FAILURE)
}

/// Assemble the raw parameter document, leaving any wrapping as found.
fn raw_parameters(args: &ParamArgs) -> Result<Value> {
    let mut raw = match &args.input {
        Some(path) => read_json(path)?,
        None => serde_json::to_value(MissionParameters::form_default())?,
    };

    let overrides = [
        ("location", args.location.clone().map(Value::from)),
        ("crew_size", args.crew_size.map(Value::from)),
        ("mission_days", args.mission_days.map(Value::from)),
        ("mission_type", args.mission_type.clone().map(Value::from)),
        (
            "deployment_vehicle",
            args.deployment_vehicle.clone().map(Value::from),
        ),
        ("habitat_material", args.habitat_material.clone().map(Value::from)),
    ];
    if overrides.iter().all(|(_, value)| value.is_none()) {
        return Ok(raw);
    }

    let fields = parameter_fields(&mut raw)?;
    for (key, value) in overrides {
        if let Some(value) = value {
            fields.insert(key.to_string(), value);
        }
    }
    Ok(raw)
}

fn parameter_fields(raw: &mut Value) -> Result<&mut Map<String, Value>> {
    if raw.is_null() {
        *raw = Value::Object(Map::new());
    }
    let wrapped = raw.get(WRAPPER_KEY).is_some_and(Value::is_object);
    let target = if wrapped {
        &mut raw[WRAPPER_KEY]
    } else {
        raw
    };
    target
        .as_object_mut()
        .context("mission parameters must be a JSON object")
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
