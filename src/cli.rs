//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Maquette site assembly engine CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Workspace root directory
    #[arg(short, long, default_value = "./")]
    pub root: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Invoke a named operation with a JSON argument bag and print the
    /// JSON result
    Invoke {
        /// Operation name (e.g. list_pages, save_html, xml_sitemap)
        operation: String,

        /// JSON object with the operation arguments
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Serve the dist tree in the foreground until Ctrl+C
    Serve {
        /// The port to bind
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Scaffold a new workspace
    Init {
        /// the name(path) of the workspace directory, relative to `root`
        name: Option<PathBuf>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_invoke(&self) -> bool {
        matches!(self.command, Commands::Invoke { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}
