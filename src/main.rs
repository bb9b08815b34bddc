//! Rover Explorer - Random Mars rover photo discovery with ban lists
//!
//! Console front end over the session core.
//!
//! # Overview
//!
//! This binary wires up the library crate:
//! - Logging infrastructure (rotating file logs, console in debug mode)
//! - Configuration loading ([`ConfigManager`] + `NASA_API_KEY` environment)
//! - State management ([`StateManager`])
//! - The discover workflow ([`Explorer`] over the live HTTP transport)
//!
//! and exposes the four user intents as line commands: `discover`,
//! `ban`, `unban`, and `view`, plus read-only views of the status line,
//! ban list, and session gallery.
//!
//! # Execution Flow
//!
//! 1. Initialize logging → logs/rover-explorer.<date>
//! 2. Load Explorer Config.yaml from `Explorer Data/` (defaults if absent)
//! 3. Resolve the API key (environment first, config file second)
//! 4. Create StateManager and seed it from the config
//! 5. Run the command loop until `quit`/EOF
//! 6. Log session and metrics summaries
//!
//! # Configuration
//!
//! Expected in `Explorer Data/` (all optional):
//! - `Explorer Config.yaml`: rover, API base URL, sol range, API key
//!
//! The `NASA_API_KEY` environment variable overrides the file key.

use anyhow::Result;
use rover_explorer::config::API_KEY_ENV;
use rover_explorer::models::{AppState, BanAttribute};
use rover_explorer::services::photo_source::{HttpTransport, PhotoSourceService};
use rover_explorer::{APP_NAME, ConfigManager, Explorer, Metrics, StateManager, VERSION};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Main entry point for the console front end
///
/// # Errors
///
/// This function can fail if:
/// - Logging initialization fails (disk space, permissions)
/// - The configuration file exists but is invalid YAML
#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so Debug Mode can raise the level
    let config_manager = ConfigManager::new("Explorer Data")?;
    let user_config = config_manager.load_user_config()?;
    let settings = user_config.explorer_settings.clone();

    let _guard = rover_explorer::logging::setup_logging(
        "logs",
        "rover-explorer",
        settings.debug_mode,
        settings.debug_mode,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let api_key = config_manager.resolve_api_key(&user_config);
    if api_key.is_empty() {
        eprintln!(
            "warning: no API key found; set {} or put one in {}/Explorer Config.yaml",
            API_KEY_ENV,
            config_manager.config_dir()
        );
    }

    let state_manager = StateManager::new();
    state_manager.load_from_user_config(&user_config, !api_key.is_empty());

    let metrics = Arc::new(Metrics::new());
    let source = PhotoSourceService::<HttpTransport>::from_settings(&settings, api_key);
    let explorer = Explorer::new(state_manager.clone(), source, metrics.clone());

    println!("{} v{} — type 'help' for commands", APP_NAME, VERSION);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.splitn(3, char::is_whitespace);
        let command = parts.next().unwrap_or_default();

        match command {
            "discover" | "d" => {
                explorer.discover().await;
                print_current(&explorer.snapshot());
            }
            "ban" | "unban" => {
                let attribute = parts.next().unwrap_or_default();
                let value = parts.next().unwrap_or_default().trim();
                match attribute.parse::<BanAttribute>() {
                    Ok(attribute) if !value.is_empty() => {
                        if command == "ban" {
                            explorer.ban(attribute, value);
                        } else {
                            explorer.unban(attribute, value);
                        }
                        print_bans(&explorer.snapshot());
                    }
                    Ok(_) => println!("usage: {} <attribute> <value>", command),
                    Err(e) => println!("{} (try camera, launch_date, earth_date)", e),
                }
            }
            "bans" | "b" => print_bans(&explorer.snapshot()),
            "gallery" | "g" => print_gallery(&explorer.snapshot()),
            "view" | "v" => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
                Some(index) => {
                    explorer.view_gallery_entry(index);
                    print_current(&explorer.snapshot());
                }
                None => println!("usage: view <index>  (0 = most recent)"),
            },
            "status" | "s" => print_current(&explorer.snapshot()),
            "reset" => {
                explorer.reset_session();
                println!("session reset");
            }
            "help" | "h" | "?" => print_help(),
            "quit" | "q" | "exit" => break,
            other => println!("unknown command '{}' — type 'help'", other),
        }
    }

    let state = state_manager.snapshot();
    tracing::info!("Session finished: {}", state.session_summary());
    metrics.log_summary();

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  discover                 fetch a random sol and pick a photo");
    println!("  ban <attribute> <value>  exclude a value (camera, launch_date, earth_date)");
    println!("  unban <attribute> <value>");
    println!("  bans                     show the ban list");
    println!("  gallery                  list photos seen this session (newest first)");
    println!("  view <index>             re-open a gallery entry");
    println!("  status                   show the current photo or status message");
    println!("  reset                    wipe the session");
    println!("  quit");
}

fn print_current(state: &AppState) {
    if let Some(message) = &state.status_message {
        println!("! {}", message);
    }
    match &state.current_photo {
        Some(photo) => {
            println!("photo #{} (sol {})", photo.id, photo.sol);
            println!("  image:       {}", photo.img_src);
            println!("  earth date:  {}", photo.earth_date);
            if photo.camera.full_name.is_empty() {
                println!("  camera:      {}", photo.camera.name);
            } else {
                println!("  camera:      {} ({})", photo.camera.full_name, photo.camera.name);
            }
            println!("  launch date: {}", photo.rover.launch_date);
        }
        None => {
            if state.is_ok() {
                println!("no photo yet — try 'discover'");
            }
        }
    }
}

fn print_bans(state: &AppState) {
    for attribute in BanAttribute::ALL {
        let values: Vec<&str> = state.ban_list.values(attribute).collect();
        if values.is_empty() {
            println!("{}: none", attribute);
        } else {
            println!("{}: {}", attribute, values.join(", "));
        }
    }
}

fn print_gallery(state: &AppState) {
    if state.gallery.is_empty() {
        println!("gallery is empty");
        return;
    }
    for (index, photo) in state.gallery.iter().enumerate() {
        println!("  [{}] {}", index, photo.describe());
    }
}
