mod commands;
mod output;

use beautyboostr_core::model::{Ecology, FunctionRule, Nature, Origin};
use beautyboostr_core::{SchemaVariant, DEFAULT_CATALOG_PATH};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "beautyboostr",
    version,
    about = "Browse the BeautyBoostr ingredient catalog and draft new records"
)]
struct Cli {
    /// Path to the ingredient catalog (JSON array)
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Catalog layout: inci (current) or inci-name (legacy, browse only)
    #[arg(long, global = true, value_name = "SCHEMA", default_value = "inci")]
    schema: SchemaVariant,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse & search existing ingredients by name
    Browse {
        /// Case-insensitive part of the ingredient name (empty shows all)
        #[arg(default_value = "")]
        search: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Add a new ingredient: print a JSON record to paste into the catalog
    Add(AddArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// INCI name
    #[arg(long, default_value = "")]
    pub inci: String,

    /// Localized (Ukrainian) name
    #[arg(long = "name-ua", default_value = "")]
    pub name_ua: String,

    /// Natural or Synthetic
    #[arg(long, default_value = "Natural")]
    pub origin: Origin,

    /// Organic or Inorganic
    #[arg(long, default_value = "Organic")]
    pub nature: Nature,

    /// Ecological or "Not ecological"
    #[arg(long, default_value = "Ecological")]
    pub ecology: Ecology,

    #[arg(long = "physical-form", default_value = "")]
    pub physical_form: String,

    #[arg(long, default_value = "")]
    pub restrictions: String,

    /// Usage % in cleansing gel
    #[arg(long = "usage-gel", default_value = "")]
    pub usage_gel: String,

    /// Usage % in cream
    #[arg(long = "usage-cream", default_value = "")]
    pub usage_cream: String,

    /// Usage % in tonic
    #[arg(long = "usage-tonic", default_value = "")]
    pub usage_tonic: String,

    /// A function rule as "IF_Percent|IF_pH|Target|Function" (repeatable)
    #[arg(
        short,
        long = "function",
        value_name = "RULE",
        value_parser = commands::add::parse_function_spec
    )]
    pub functions: Vec<FunctionRule>,

    /// Keep editing in an interactive session before submitting
    #[arg(short, long)]
    pub interactive: bool,
}

/// `RUST_LOG` (when set) or warn-level defaults for our targets, with
/// `--verbose` raising both targets to debug on top of either.
fn log_filter(
    verbose: bool,
    env: Option<&str>,
) -> Result<EnvFilter, Box<dyn std::error::Error>> {
    let mut filter = match env {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::new("beautyboostr_core=warn,beautyboostr=warn"),
    };
    if verbose {
        filter = filter
            .add_directive("beautyboostr_core=debug".parse()?)
            .add_directive("beautyboostr=debug".parse()?);
    }
    Ok(filter)
}

fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(verbose, env.as_deref())?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::debug!(catalog = %cli.catalog.display(), schema = %cli.schema, "starting");

    let result = match cli.command {
        Commands::Browse { search, output } => {
            commands::browse::run(&cli.catalog, cli.schema, &search, &output)
        }
        Commands::Add(args) => commands::add::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
