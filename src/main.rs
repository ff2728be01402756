use clap::Parser;
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use unusedsym::{Checker, Config, FileModelProvider, Mode, ReportFormat, Reporter};

/// unusedsym - Unused-symbol detection for type-checked Go packages
#[derive(Parser, Debug)]
#[command(name = "unusedsym")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Packages to analyze (canonical import paths or ./relative paths)
    packages: Vec<String>,

    /// Directory scanned for front-end fact exports (*.facts.json)
    #[arg(short = 'r', long, value_name = "DIR")]
    fact_root: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Check constants (if no kind flag is given, all kinds are checked)
    #[arg(long)]
    constants: bool,

    /// Check struct fields
    #[arg(long)]
    fields: bool,

    /// Check functions and methods
    #[arg(long)]
    functions: bool,

    /// Check type names
    #[arg(long)]
    types: bool,

    /// Check variables
    #[arg(long)]
    variables: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output; surfaces front-end diagnostics
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("unusedsym v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    let packages = if cli.packages.is_empty() {
        config.packages.clone()
    } else {
        cli.packages.clone()
    };
    if packages.is_empty() {
        return Err(miette::miette!(
            "no packages to analyze; pass package identifiers or set `packages` in the config"
        ));
    }

    let start_time = Instant::now();

    let mut provider = FileModelProvider::new(&config.fact_root);
    let checker = Checker::new(cli_mode(&cli, &config)).with_verbose(config.verbose);
    let unused = checker.check(&mut provider, &packages).into_diagnostic()?;

    let reporter = Reporter::new(cli.format.clone().into(), cli.output.clone());
    reporter.report(&unused)?;

    let elapsed = start_time.elapsed();
    if !cli.quiet {
        println!(
            "{}",
            format!(
                "Analyzed {} packages in {:.2}s",
                packages.len(),
                elapsed.as_secs_f64()
            )
            .dimmed()
        );
    }

    if !unused.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&PathBuf::from("."))?
    };

    // Override with CLI arguments
    if let Some(root) = &cli.fact_root {
        config.fact_root = root.clone();
    }
    if cli.verbose {
        config.verbose = true;
    }

    Ok(config)
}

/// Kind flags on the command line replace the configured mask entirely;
/// with none given, the config (default: everything) applies.
fn cli_mode(cli: &Cli, config: &Config) -> Mode {
    let mut mode = Mode::empty();
    if cli.constants {
        mode |= Mode::CONSTANTS;
    }
    if cli.fields {
        mode |= Mode::FIELDS;
    }
    if cli.functions {
        mode |= Mode::FUNCTIONS;
    }
    if cli.types {
        mode |= Mode::TYPES;
    }
    if cli.variables {
        mode |= Mode::VARIABLES;
    }

    if mode.is_empty() {
        config.mode()
    } else {
        mode
    }
}
