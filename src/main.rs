//! Maquette - a file-backed site assembly engine.
//!
//! Resolves markdown content pages, applies a swappable visual
//! decoration, and manages a static output tree, exposed as a set of
//! independently invocable operations plus a small preview server.

mod cli;
mod content;
mod decoration;
mod frontmatter;
mod generator;
mod init;
mod ops;
mod output;
mod serve;
mod site;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use init::new_workspace;
use serde_json::Value;
use site::Site;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Invoke { operation, args } => invoke(&cli, operation, args),
        Commands::Serve { port } => {
            let site = Site::new(&cli.root);
            serve::serve_blocking(&site.dist_dir(), port.unwrap_or(serve::DEFAULT_PORT))
        }
        Commands::Init { name } => {
            let root = match name {
                Some(name) => cli.root.join(name),
                None => cli.root.clone(),
            };
            new_workspace(&root, name.is_some())
        }
    }
}

/// Parse the argument bag, dispatch the operation, and print its result.
fn invoke(cli: &Cli, operation: &str, args: &str) -> Result<()> {
    let args: Value =
        serde_json::from_str(args).context("operation arguments must be a JSON object")?;

    let site = Site::new(&cli.root);
    let result = ops::dispatch(&site, operation, &args);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
