//! Pantry CLI - track what's on the shelf, one item at a time
//!
//! This is the command-line interface for Pantry. It drives the core
//! ledger: adding and removing units, attaching photos, and searching the
//! inventory list.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod output;

use clap::Parser;
use pantry_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(err) = run(&ctx, &cli) {
        eprintln!("Error: {:#}", err);
        if let Some(hint) = errors::hint_for(&err) {
            eprintln!("{}", hint);
        }
        std::process::exit(errors::exit_code(&err));
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => commands::handle_init(ctx, args),
        Some(Commands::Add(args)) => commands::handle_add(ctx, args),
        Some(Commands::Remove(args)) => commands::handle_remove(ctx, args),
        Some(Commands::List(args)) => commands::handle_list(ctx, args),
        Some(Commands::Show(args)) => commands::handle_show(ctx, args),
        Some(Commands::Completions { shell }) => commands::handle_completions(*shell),
        None => {
            println!("Pantry v{}", VERSION);
            println!("\nRun `pantry --help` for usage information.");
            Ok(())
        }
    }
}
