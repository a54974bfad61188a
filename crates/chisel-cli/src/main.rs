//! Chisel CLI entry point: argument parsing, logging setup, dispatch.

use clap::Parser;
use miette::Result;

use chisel_cli::{cli, commands, logger};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    match args.command {
        cli::Command::Run(run_args) => commands::run_execute(run_args),
        cli::Command::List => commands::list_execute(),
    }
}
