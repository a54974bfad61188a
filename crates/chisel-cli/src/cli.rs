//! Command-line interface definition for the chisel codemod runner.
//!
//! Defines the CLI structure with clap v4 derive macros:
//!
//! - `chisel run <transform>` - apply one transform across a project
//! - `chisel list` - list the available transforms

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// chisel - syntax-tree codemods for fluent query-builder code
#[derive(Parser, Debug)]
#[command(
    name = "chisel",
    version,
    about = "Syntax-tree codemods for fluent query-builder code",
    long_about = "Chisel rewrites TypeScript sources through parsed syntax trees.\n\
                  Its main transform unrolls conditional-combinator builder chains\n\
                  into imperative if blocks; companion transforms clean up import\n\
                  paths, identifier casing, and error-constructor shapes."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a transform to every matching file in the project
    Run(RunArgs),
    /// List the available transforms
    List,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Name of the transform to apply (see `chisel list`)
    pub transform: String,

    /// Path to a chisel.toml configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project root the file globs are resolved against
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// File glob, relative to the project root; repeatable, `!` negates
    #[arg(long = "glob")]
    pub globs: Vec<String>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_arguments_parse() {
        let cli = Cli::parse_from([
            "chisel",
            "run",
            "unroll-if-chains",
            "--project-root",
            "/repo",
            "--glob",
            "src/**/*.ts",
            "--glob",
            "!**/__generated__/*",
            "--dry-run",
        ]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.transform, "unroll-if-chains");
                assert_eq!(args.project_root.as_deref(), Some(std::path::Path::new("/repo")));
                assert_eq!(args.globs, ["src/**/*.ts", "!**/__generated__/*"]);
                assert!(args.dry_run);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["chisel", "-v", "-q", "list"]);
        assert!(result.is_err());
    }
}
