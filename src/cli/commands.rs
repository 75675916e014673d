use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pin", about = concat!("[#] pinboard v", env!("CARGO_PKG_VERSION"), " - your board, in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different config file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store the tracker URL and bearer token
    Login(LoginArgs),
    /// List projects and their columns
    Projects,
    /// Show dashboard statistics for a project
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Tracker API base URL
    #[arg(long)]
    pub url: String,
    /// Bearer token
    #[arg(long)]
    pub token: String,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Project id
    pub project: String,
}
