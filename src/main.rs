use clap::Parser;
use dispatch_forecast::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::ValidateModel { name, version } => cli::validate::run(name, version).await,
    }
}
