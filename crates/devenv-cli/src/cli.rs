use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "devenv")]
#[command(bin_name = "devenv")]
#[command(version)]
#[command(about = "Interactive Odoo development environment setup")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Write a diagnostics log for this run under ~/.config/devenv/diagnostics"
    )]
    pub diagnostics: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Run environment and configuration checks")]
    Doctor,
}
