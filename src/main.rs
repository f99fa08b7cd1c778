use anyhow::Context;
use clap::Parser;

use footalert::adapter::inbound::cli::command::{CheckCommand, Cli, Commands};
use footalert::adapter::inbound::cli::output::{self, OutputConfig};
use footalert::adapter::inbound::cli::{catalog, check, run, stats};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        output::color_enabled(cli.color),
    ));

    if let Err(e) = dispatch(cli.command).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => run::execute(&args)
            .await
            .with_context(|| format!("run failed ({})", args.config.display()))?,
        Commands::Stats(args) => stats::execute(&args)
            .await
            .with_context(|| format!("stats failed ({})", args.config.display()))?,
        Commands::Metrics => catalog::metrics()?,
        Commands::Outcomes => catalog::outcomes()?,
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config)
            .with_context(|| format!("invalid configuration {}", args.config.display()))?,
    }
    Ok(())
}
