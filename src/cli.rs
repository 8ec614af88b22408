// CLI module - command-line argument parsing and handlers
//
// With no subcommand the TUI runs. Subcommands:
// - login / list / logout: headless use of the same controller the TUI drives
// - config --show | --reset | --edit | --path: configuration management

use crate::api::Credentials;
use crate::config::{Config, VERSION};
use crate::controller::{Controller, Outcome};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// Environment variable consulted when `login` gets no `--password`
pub const PASSWORD_ENV: &str = "QUIRE_PASSWORD";

/// quire - terminal client for the articles API
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(version = VERSION)]
#[command(about = "Terminal client for the articles API", long_about = None)]
pub struct Cli {
    /// Base URL of the articles API (overrides config and QUIRE_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Keep the session in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,

        /// Falls back to $QUIRE_PASSWORD, then a prompt
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List articles
    List,

    /// Forget the stored session token
    Logout,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Session commands
// ─────────────────────────────────────────────────────────────────────────────

/// Run a headless session command against the controller
pub async fn run_command(command: Commands, controller: &Controller) -> Result<()> {
    match command {
        Commands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => resolve_password(std::env::var(PASSWORD_ENV).ok())?,
            };
            run_login(controller, Credentials::new(username, password)).await
        }
        Commands::List => run_list(controller).await,
        Commands::Logout => {
            controller.logout();
            println!("{}", controller.snapshot().message);
            Ok(())
        }
        Commands::Config { .. } => {
            handle_config(command);
            Ok(())
        }
    }
}

async fn run_login(controller: &Controller, credentials: Credentials) -> Result<()> {
    let outcome = controller.login(credentials).await;

    let state = controller.snapshot();
    if outcome != Outcome::Done {
        bail!("{}", state.message);
    }
    println!("{}", state.message);
    Ok(())
}

async fn run_list(controller: &Controller) -> Result<()> {
    if !controller.has_session() {
        bail!("Not logged in. Run `quire login -u <username>` first.");
    }

    let outcome = controller.get_articles().await;

    let state = controller.snapshot();
    match outcome {
        Outcome::Done => {}
        Outcome::Failed => bail!("{}", state.message),
        // The server rejected the token and the session was dropped
        Outcome::LoggedOut => bail!("{} (session expired)", state.message),
    }

    println!("{}", state.message);
    for article in &state.articles {
        println!(
            "{:>6}  [{}]  {}",
            article.article_id.to_string(),
            article.topic,
            article.title
        );
    }
    Ok(())
}

fn resolve_password(from_env: Option<String>) -> Result<String> {
    if let Some(password) = from_env {
        return Ok(password);
    }

    eprint!("Password: ");
    std::io::stderr().flush().context("Failed to flush prompt")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .context("Failed to read password")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Config commands
// ─────────────────────────────────────────────────────────────────────────────

/// Handle `quire config ...`
pub fn handle_config(command: Commands) {
    let Commands::Config {
        show,
        reset,
        edit,
        path,
    } = command
    else {
        return;
    };

    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else if edit {
        handle_config_edit();
    } else {
        // No flag provided, show help
        println!("Usage: quire config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}
