use clap::Parser;
use eyre::Result;
use std::io;
use std::path::PathBuf;
use tasktrack::{Config, OutputFormat, Renderer, Repl};

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(about = "tasktrack - Interactive task tracker with tags, priorities and due dates")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/tasktrack/tasktrack.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format for task listings
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        config.output = output;
    }
    if cli.no_color {
        config.color = false;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Setup tracing; stdout belongs to the menu
    tracing_subscriber::fmt()
        .with_max_level(config.log_level()?)
        .with_writer(io::stderr)
        .init();

    let renderer = Renderer::new(config.output, config.color);
    let today = chrono::Local::now().date_naive();

    let mut repl = Repl::new(io::stdin().lock(), io::stdout().lock(), renderer, today);
    repl.run()
}
