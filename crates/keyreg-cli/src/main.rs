//! # keyreg CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// keyreg — accepted-key registry reconciliation toolchain.
///
/// Watches JWKS endpoints, derives canonical key identifiers, and keeps
/// a remote accepted-key registry converged with the published key sets.
#[derive(Parser, Debug)]
#[command(name = "keyreg", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP surface and the periodic reconciliation scheduler.
    Serve(keyreg_cli::serve::ServeArgs),
    /// Derive a canonical identifier from a raw RSA public key.
    Derive(keyreg_cli::derive::DeriveArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => keyreg_cli::serve::run(args).await,
        Commands::Derive(args) => keyreg_cli::derive::run(&args),
    }
}
