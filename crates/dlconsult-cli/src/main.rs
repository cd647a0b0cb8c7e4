//! dlconsult main entry point

use anyhow::Result;
use clap::Parser;
use dlconsult_cli::{Cli, ConsultConfig, Driver};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the consultation report
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConsultConfig::from_env()?;

    let driver = Driver::new(config);
    let status = driver.run(&cli.arguments(), &mut std::io::stdout().lock());

    if status != 0 {
        std::process::exit(status);
    }
    Ok(())
}
