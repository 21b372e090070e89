use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use openapi_wizard::browse::FsReferenceResolver;
use openapi_wizard::builder::{ApiBuilder, ModelBuilder, SchemaBuilder};
use openapi_wizard::config::{API_PATH_VAR, MODEL_PATH_VAR, SCHEMA_PATH_VAR};
use openapi_wizard::prompt::TerminalPrompter;
use openapi_wizard::{Config, Mode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oaw", version)]
#[command(about = "Interactively generate OpenAPI models, schemas and path files")]
struct Cli {
    /// Root directory for model files
    #[arg(long, global = true, env = MODEL_PATH_VAR)]
    model_path: Option<PathBuf>,

    /// Root directory for request/response schema files
    #[arg(long, global = true, env = SCHEMA_PATH_VAR)]
    schema_path: Option<PathBuf>,

    /// Root directory for API path files
    #[arg(long, global = true, env = API_PATH_VAR)]
    api_path: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a model file
    Model,

    /// Generate a request/response schema file
    Schema,

    /// Generate an API path file
    Path {
        /// Add a method to an existing path file
        #[arg(long)]
        add: bool,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "openapi_wizard=info,warn",
        _ => "openapi_wizard=debug,info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Prompts own stdout; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::new(cli.model_path, cli.schema_path, cli.api_path);
    let mut prompter = TerminalPrompter::new();

    match cli.command {
        Commands::Model => {
            config
                .ensure(&[Mode::Model])
                .context("environment validation")?;
            let path = ModelBuilder::new(&config, &mut prompter)
                .run()
                .context("generating model")?;
            println!("[INFO] Model written to {}", path.display());
        }
        Commands::Schema => {
            config
                .ensure(&[Mode::Schema, Mode::Model])
                .context("environment validation")?;
            let mut resolver = FsReferenceResolver::new(&config)?;
            let path = SchemaBuilder::new(&config, &mut prompter, &mut resolver)
                .run()
                .context("generating schema")?;
            println!("[INFO] Schema written to {}", path.display());
        }
        Commands::Path { add } => {
            config
                .ensure(&[Mode::Api, Mode::Schema, Mode::Model])
                .context("environment validation")?;
            let mut resolver = FsReferenceResolver::new(&config)?;
            let path = ApiBuilder::new(&config, &mut prompter, &mut resolver, add)
                .run()
                .with_context(|| if add { "adding to API" } else { "generating API" })?;
            println!("[INFO] API written to {}", path.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // A missing .env is fine; the variables may come from the shell.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            ExitCode::FAILURE
        }
    }
}
