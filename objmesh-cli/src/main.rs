/// objmesh - Wavefront OBJ inspection tool
///
/// Usage:
///   objmesh info <FILE>
///   objmesh dump <FILE> [--normals] [--rotate A,B,G] [--translate X,Y,Z] [--scale F]

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    cli::initialize_tracing(&cli.log_filter);

    let result = match &cli.command {
        Command::Info(args) => commands::info(args),
        Command::Dump(args) => commands::dump(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
