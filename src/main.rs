use anyhow::{Context, Result};
use clap::Parser;
use portfolioiq::{
    config::EngineConfig,
    engine::RuleEngine,
    grid::workbook,
    output::timestamped_path,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Grant Financial Summary Action Engine
#[derive(Parser)]
#[command(name = "portfolioiq", version)]
struct Cli {
    /// Financial Summary workbook (.xlsx)
    input: PathBuf,

    /// YAML file overriding the default rate and sheet layout
    #[arg(long)]
    config: Option<PathBuf>,
}

fn banner() {
    let rule = "=".repeat(60);
    println!("{}", rule);
    println!("PortfolioIQ v1.0");
    println!("Grant Financial Summary Action Engine");
    println!("{}", rule);
}

fn main() {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    banner();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // ─── 2) settings ─────────────────────────────────────────────────
    let config = match &cli.config {
        Some(path) => EngineConfig::from_yaml_file(path)?,
        None => EngineConfig::default(),
    };
    info!(
        default_fa_rate = config.default_fa_rate,
        subaward_first_cap = config.subaward_first_cap,
        "settings"
    );
    let engine = RuleEngine::new(config)?;

    // ─── 3) load + apply ─────────────────────────────────────────────
    println!("Loading workbook: {}", cli.input.display());
    let mut book = workbook::load(&cli.input)?;

    println!("Applying PortfolioIQ rules...");
    let updated = engine
        .apply(workbook::active_sheet(&mut book))
        .with_context(|| format!("applying rules to {:?}", cli.input))?;

    // ─── 4) save next to the input ───────────────────────────────────
    let output = timestamped_path(&cli.input, chrono::Local::now().naive_local());
    workbook::save(&book, &output)?;

    println!("PortfolioIQ completed successfully.");
    println!("   Rows updated: {}", updated);
    println!("   Saved file: {}", output.display());
    Ok(())
}
