use anyhow::Result;
use clap::Parser;
use fractional::calc::evaluate;
use fractional::config::{open_config_or_default, OutputFormat};
use fractional::util::log_timed;
use itertools::Itertools;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fractional")]
#[command(about = "Exact fraction calculator, e.g. fractional 1/2 + \"1 1/3\" x 3")]
struct Args {
    /// Path to a YAML config file, defaults to ./fractional.yaml or ./fractional.yml
    #[arg(short, long)]
    config: Option<String>,

    /// Output format, overrides the config: mixed, improper or decimal
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Print every intermediate step
    #[arg(short, long)]
    steps: bool,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,

    /// Operands and operators, evaluated left to right
    #[arg(required = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("err: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = open_config_or_default(args.config.as_deref())?;
    if let Some(format) = args.format {
        config.format = format;
    }
    config.show_steps |= args.steps;

    let evaluation = log_timed(format!("evaluate {}", args.tokens.iter().join(" ")), || {
        evaluate(&args.tokens)
    })?;

    if config.show_steps && !evaluation.steps.is_empty() {
        println!(
            "{}",
            evaluation
                .steps
                .iter()
                .map(|step| config.render_step(step))
                .join("\n")
        );
    }

    println!("{}", config.render_value(evaluation.value));
    Ok(())
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fractional=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fractional=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
