use std::error::Error;

use clap::{Parser, Subcommand};
use pole_cli::commands::{
    associate::{self, AssociateArgs},
    batch::{self, BatchArgs},
    number::{self, NumberArgs},
};

#[derive(Parser, Debug)]
#[command(name = "polenum", about = "Pole numbering and label association")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Order the poles of a drawing and write the numbering report.
    Number(NumberArgs),
    /// Match anchor blocks to the nearest labels of other layers.
    Associate(AssociateArgs),
    /// Run a YAML plan of numbering jobs.
    Batch(BatchArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Number(args) => number::run(args),
        Command::Associate(args) => associate::run(args),
        Command::Batch(args) => batch::run(args),
    }
}
