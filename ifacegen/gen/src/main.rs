//! ifacegen
//!
//! Generates exchange structs and OpenAPI schemas from an interface model.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use ifacegen_gen::config::{
    DEFAULT_CONTEXT_TYPE, DEFAULT_ERROR_TYPE, DEFAULT_REQUEST_SUFFIX, DEFAULT_RESPONSE_SUFFIX,
    SynthConfig,
};
use ifacegen_gen::errors::GeneratorError;
use ifacegen_gen::model::load_model;
use ifacegen_gen::output::{GeneratedFile, OutputOptions, OutputTarget, generate_and_write};

/// ifacegen - synthesizes exchange structs and schemas from an interface model
#[derive(Parser, Debug)]
#[command(name = "ifacegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Interface model (JSON) produced by the extractor
    #[arg(short, long)]
    model: PathBuf,

    /// Output directory for generated files
    #[arg(short, long, default_value = "generated")]
    output: PathBuf,

    /// Artifacts to generate: exchange, schema or all
    #[arg(long, default_value = "all")]
    only: OutputTarget,

    /// Type identifier of a leading call-context argument
    #[arg(long, default_value = DEFAULT_CONTEXT_TYPE)]
    context_type: String,

    /// Type identifier of a trailing error result
    #[arg(long, default_value = DEFAULT_ERROR_TYPE)]
    error_type: String,

    /// Suffix of request exchange types
    #[arg(long, default_value = DEFAULT_REQUEST_SUFFIX)]
    request_suffix: String,

    /// Suffix of response exchange types
    #[arg(long, default_value = DEFAULT_RESPONSE_SUFFIX)]
    response_suffix: String,

    /// Do not register schemas for exchange types
    #[arg(long)]
    no_exchange_schemas: bool,

    /// Title of the schema document
    #[arg(long, default_value = "ifacegen")]
    title: String,

    /// Version of the schema document
    #[arg(long, default_value = "1.0.0")]
    api_version: String,

    /// Print generated output without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn synth_config(&self) -> SynthConfig {
        SynthConfig {
            context_type: self.context_type.clone(),
            error_type: self.error_type.clone(),
            request_suffix: self.request_suffix.clone(),
            response_suffix: self.response_suffix.clone(),
            exchange_schemas: !self.no_exchange_schemas,
        }
    }

    fn output_options(&self) -> OutputOptions {
        OutputOptions {
            output_dir: self.output.clone(),
            target: self.only,
            title: self.title.clone(),
            api_version: self.api_version.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_summary(files: &[GeneratedFile], dry_run: bool) {
    let verb = if dry_run { "Rendered" } else { "Wrote" };
    for file in files {
        eprintln!("  {} {}", "✓".green(), file.path.display().to_string().dimmed());
    }
    eprintln!(
        "{} {} file(s)",
        verb.bold(),
        files.len().to_string().green()
    );
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!(model = %cli.model.display(), output = %cli.output.display(), "generating");

    let node = load_model(&cli.model)?;
    let files = generate_and_write(&node, &cli.synth_config(), &cli.output_options())?;

    print_summary(&files, cli.dry_run);
    Ok(())
}
