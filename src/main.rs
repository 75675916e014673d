use clap::Parser;
use pinboard::cli::commands::Cli;
use pinboard::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let config_path = handlers::config_path(&cli);
            if let Err(e) = pinboard::tui::run(&config_path) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
