//! `hints` - CLI for the checklist image overlay
//!
//! This binary inspects an aircraft's hint deck, manages the saved overlay
//! window position, and lists the command identifiers the host integration
//! registers.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use hints::cli::{Cli, Command, ConfigCommand, DeckCommand, WindowCommand};
use hints::commands::HostCommand;
use hints::deck::{scan_hint_files, Deck, Hint};
use hints::window::{ScreenBounds, WindowRect, WindowStore};
use hints::{init_logging, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Deck(deck_cmd) => handle_deck(&config, &deck_cmd),
        Command::Window(window_cmd) => handle_window(&config, &window_cmd),
        Command::Commands { json } => handle_commands(json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_deck(config: &Config, cmd: &DeckCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        DeckCommand::List { aircraft_dir, json } => {
            let hints_dir = aircraft_dir.join(&config.deck.dir_name);
            let deck = Deck::load(hints_dir, config.deck.max_dimension)?;

            if *json {
                let hints: Vec<_> = deck
                    .hints()
                    .iter()
                    .enumerate()
                    .map(|(index, hint)| {
                        let (width, height) = hint.dimensions();
                        serde_json::json!({
                            "index": index,
                            "name": hint.name(),
                            "path": hint.path().display().to_string(),
                            "width": width,
                            "height": height,
                            "fingerprint": hint.fingerprint(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&hints)?);
            } else if deck.is_empty() {
                println!("No hints found in {}", deck.dir().display());
            } else {
                println!("Hints in {} ({}):", deck.dir().display(), deck.len());
                for (index, hint) in deck.hints().iter().enumerate() {
                    let (width, height) = hint.dimensions();
                    println!(
                        "  {:>3}. {:<32} {:>5}x{:<5} {}",
                        index + 1,
                        hint.name(),
                        width,
                        height,
                        &hint.fingerprint()[..8],
                    );
                }
            }
            Ok(())
        }
        DeckCommand::Check { aircraft_dir } => {
            let hints_dir = aircraft_dir.join(&config.deck.dir_name);
            if !hints_dir.is_dir() {
                return Err(format!("no hints directory at {}", hints_dir.display()).into());
            }

            let paths = scan_hint_files(&hints_dir)?;
            let mut failures = 0;
            for path in &paths {
                match Hint::load(path, config.deck.max_dimension) {
                    Ok(hint) => {
                        let (width, height) = hint.dimensions();
                        println!("ok    {} ({width}x{height})", hint.name());
                    }
                    Err(e) => {
                        failures += 1;
                        println!("FAIL  {}: {e}", path.display());
                    }
                }
            }

            println!();
            println!("{} checked, {} failed", paths.len(), failures);
            if failures > 0 {
                return Err(format!("{failures} of {} hints failed to load", paths.len()).into());
            }
            Ok(())
        }
    }
}

fn handle_window(config: &Config, cmd: &WindowCommand) -> Result<(), Box<dyn std::error::Error>> {
    let store = WindowStore::new(config.position_file_path());

    match cmd {
        WindowCommand::Show { json } => match store.load()? {
            Some(rect) => {
                if *json {
                    println!("{}", serde_json::to_string_pretty(&rect)?);
                } else {
                    print_rect(&rect);
                }
            }
            None => println!("No saved window position."),
        },
        WindowCommand::Save(save) => {
            let rect = WindowRect {
                left: save.left,
                top: save.top,
                width: save.width,
                height: save.height,
            };
            store.save(&rect)?;
            println!("Saved window position to {}", store.path().display());
        }
        WindowCommand::Reset {
            screen_width,
            screen_height,
        } => {
            let screen = ScreenBounds {
                width: *screen_width,
                height: *screen_height,
            };
            let rect = store.reset(screen, &config.window)?;
            println!("Window position reset. Default placement:");
            print_rect(&rect);
        }
    }
    Ok(())
}

fn print_rect(rect: &WindowRect) {
    println!("  Left:   {}", rect.left);
    println!("  Top:    {}", rect.top);
    println!("  Width:  {}", rect.width);
    println!("  Height: {}", rect.height);
}

fn handle_commands(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let commands: Vec<_> = HostCommand::all()
            .into_iter()
            .map(|command| {
                serde_json::json!({
                    "identifier": command.identifier(),
                    "description": command.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&commands)?);
    } else {
        println!("Host command identifiers");
        println!("------------------------");
        for command in HostCommand::all() {
            println!("  {:<28} {}", command.identifier(), command.description());
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Deck]");
                println!("  Directory name:     {}", config.deck.dir_name);
                println!("  Max dimension:      {}", config.deck.max_dimension);
                println!();
                println!("[Window]");
                println!("  Size:               {}x{}", config.window.width, config.window.height);
                println!("  Edge proportion:    {}", config.window.from_edge_proportion);
                println!("  Edge offset cap:    {}", config.window.from_edge_min);
                println!(
                    "  Position file:      {}",
                    config.position_file_path().display()
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
