use std::path::PathBuf;

use chrono::Local;

use crate::board::{Board, dashboard_stats};
use crate::cli::commands::*;
use crate::cli::output::{self, ProjectJson, StatsJson};
use crate::io::config_io::{self, default_config_path};
use crate::model::Config;
use crate::remote::HttpRemote;

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let config_path = config_path(&cli);

    match cli.command {
        Some(Commands::Login(args)) => cmd_login(&config_path, args),
        Some(Commands::Projects) => cmd_projects(&config_path, json),
        Some(Commands::Stats(args)) => cmd_stats(&config_path, args, json),
        // No subcommand launches the TUI; main.rs handles that before us.
        None => Ok(()),
    }
}

pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

fn cmd_login(path: &PathBuf, args: LoginArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config {
        api_url: args.url,
        token: args.token,
    };
    config_io::write_config(path, &config)?;
    println!("config written to {}", path.display());
    Ok(())
}

fn cmd_projects(path: &PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let remote = connect(path)?;
    let mut board = Board::new();
    board.load_projects(&remote)?;

    if json {
        let out: Vec<ProjectJson> = board.projects.iter().map(ProjectJson::from).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        output::print_projects(&board.projects);
    }
    Ok(())
}

fn cmd_stats(path: &PathBuf, args: StatsArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let remote = connect(path)?;
    let mut board = Board::new();
    board.load_projects(&remote)?;
    let name = board
        .project(&args.project)
        .map(|p| p.name.clone())
        .ok_or_else(|| format!("no such project: {}", args.project))?;
    board.select_project(&remote, &args.project)?;

    let registry = board.registry(&args.project).unwrap_or(&[]);
    let today = Local::now().date_naive();
    let stats = dashboard_stats(&board.store, registry, &args.project, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&StatsJson::from(&stats))?);
    } else {
        output::print_stats(&name, &stats);
    }
    Ok(())
}

fn connect(path: &PathBuf) -> Result<HttpRemote, Box<dyn std::error::Error>> {
    let config = config_io::read_config(path)?;
    Ok(HttpRemote::new(config.api_url, config.token))
}
