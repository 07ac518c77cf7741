//! `protodto` command-line interface.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "protodto", version, about = "Flatten compiled protobuf schemas into DTO models")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate DTO models from a compiled schema request
    Generate(commands::generate::GenerateArgs),
    /// List available emitters
    Emitters,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let code = match cli.command {
        Command::Generate(args) => commands::generate::run(args),
        Command::Emitters => commands::emitters::run(),
    };
    std::process::exit(code);
}
