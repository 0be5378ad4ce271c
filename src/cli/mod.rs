//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments, resolving the
//! session settings, and dispatching to the chat view or a subcommand.

pub mod say;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::core::app::{App, SessionContext, UiState};
use crate::core::config::data::path_display;
use crate::core::config::{Config, ConfigKey};
use crate::core::constants::SUGGESTION_COUNT;
use crate::core::suggestions::pick_suggestions;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_logging;
use crate::utils::url::normalize_base_url;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

#[derive(Parser)]
#[command(name = "cutie", version)]
#[command(about = "A full-screen terminal chat with a curt assistant")]
#[command(
    long_about = "Cutie is a full-screen terminal chat that sends each turn to an \
OpenAI-compatible chat completion endpoint and types the reply back into the view.\n\n\
Environment Variables:\n\
  OPENAI_API_KEY    Your API key (required)\n\
  OPENAI_BASE_URL   Custom API base URL (optional, defaults to https://api.openai.com/v1)\n\
  CUTIE_LOG         Log filter (optional, defaults to cutie=info)\n\n\
Controls:\n\
  Type / Tab        Focus the compose box and type (max 100 characters)\n\
  Enter             Send the message\n\
  1 2 3             Copy a starter suggestion into the compose box\n\
  Esc               Leave the compose box, or close the model sheet\n\
  Ctrl+O            Open the model sheet (drag it down with the mouse to close)\n\
  Ctrl+T            Toggle light/dark theme\n\
  PgUp/PgDn/Mouse   Scroll the transcript\n\
  Ctrl+C            Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for chat
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write diagnostics to this file instead of the default log location
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Start with the light palette
    #[arg(long, global = true)]
    pub light: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send a single prompt and type the reply to stdout
    Say {
        /// Prompt text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set configuration values (model, base-url, theme), or print them all
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

/// Connection and presentation settings after applying precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingApiKey;

impl std::fmt::Display for MissingApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "❌ Error: {API_KEY_ENV} environment variable not set\n\n\
Please set your API key:\n\
export {API_KEY_ENV}=\"your-api-key-here\"\n\n\
Optionally, you can also set a custom base URL:\n\
export {BASE_URL_ENV}=\"https://api.openai.com/v1\""
        )
    }
}

impl Error for MissingApiKey {}

/// Resolve settings with precedence flag > environment > config > default.
///
/// `env` looks up environment variables; empty values count as unset.
pub fn resolve_settings(
    args: &Args,
    config: &Config,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedSettings, MissingApiKey> {
    let lookup = |name: &str| env(name).filter(|value| !value.trim().is_empty());

    let api_key = lookup(API_KEY_ENV).ok_or(MissingApiKey)?;
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| config.model_or_default().to_string());
    let base_url = args
        .base_url
        .clone()
        .or_else(|| lookup(BASE_URL_ENV))
        .unwrap_or_else(|| config.base_url_or_default().to_string());

    Ok(ResolvedSettings {
        model,
        base_url: normalize_base_url(&base_url),
        api_key: api_key.trim().to_string(),
        dark_mode: !args.light && config.prefers_dark(),
    })
}

fn load_settings(args: &Args) -> Result<ResolvedSettings, Box<dyn Error>> {
    let config = Config::load()?;
    match resolve_settings(args, &config, |name| std::env::var(name).ok()) {
        Ok(settings) => Ok(settings),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

fn start_logging(args: &Args) {
    if let Err(err) = init_logging(args.log.as_deref()) {
        eprintln!("⚠️  Logging disabled: {err}");
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command {
        Some(Commands::Set { ref key, ref value }) => run_set(key.as_deref(), value),
        Some(Commands::Unset { ref key }) => run_unset(key),
        Some(Commands::Say { ref prompt }) => {
            let settings = load_settings(&args)?;
            start_logging(&args);
            say::run_say(prompt, &settings).await
        }
        Some(Commands::Chat) | None => {
            let settings = load_settings(&args)?;
            start_logging(&args);
            let session = SessionContext::new(settings.model, settings.api_key, settings.base_url);
            let ui = UiState::new(settings.dark_mode, pick_suggestions(SUGGESTION_COUNT));
            run_chat(App::new(session, ui)).await
        }
    }
}

fn parse_key(key: &str) -> ConfigKey {
    match ConfigKey::parse(key) {
        Some(key) => key,
        None => {
            let known: Vec<&str> = ConfigKey::ALL.iter().map(|key| key.as_str()).collect();
            eprintln!("❌ Unknown config key: {key}");
            eprintln!("Known keys: {}", known.join(", "));
            std::process::exit(1);
        }
    }
}

fn print_config(config: &Config) {
    match Config::get_config_path() {
        Ok(path) => println!("Configuration ({}):", path_display(&path)),
        Err(_) => println!("Configuration:"),
    }
    for key in ConfigKey::ALL {
        println!("  {}: {}", key.as_str(), config.get(key).unwrap_or("(unset)"));
    }
}

fn run_set(key: Option<&str>, value: &[String]) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    let Some(key) = key else {
        print_config(&config);
        return Ok(());
    };
    let key = parse_key(key);

    if value.is_empty() {
        print_config(&config);
        return Ok(());
    }

    let value = value.join(" ");
    if let Err(err) = config.set(key, &value) {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
    config.save()?;
    println!("✅ Set {} to: {}", key.as_str(), config.get(key).unwrap_or_default());
    Ok(())
}

fn run_unset(key: &str) -> Result<(), Box<dyn Error>> {
    let key = parse_key(key);
    let mut config = Config::load()?;
    if config.get(key).is_none() {
        warn!(key = key.as_str(), "unset on a key that was not set");
    }
    config.unset(key);
    config.save()?;
    println!("✅ Unset {}", key.as_str());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("valid arguments")
    }

    fn env_with(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let args = parse(&["cutie"]);
        let result = resolve_settings(&args, &Config::default(), env_with(&[]));
        assert_eq!(result, Err(MissingApiKey));

        let blank = resolve_settings(&args, &Config::default(), env_with(&[(API_KEY_ENV, "  ")]));
        assert_eq!(blank, Err(MissingApiKey));
    }

    #[test]
    fn defaults_apply_without_flags_or_config() {
        let args = parse(&["cutie"]);
        let settings = resolve_settings(&args, &Config::default(), env_with(&[(API_KEY_ENV, "sk")]))
            .expect("settings");
        assert_eq!(settings.model, crate::core::constants::DEFAULT_MODEL);
        assert_eq!(settings.base_url, crate::core::constants::DEFAULT_BASE_URL);
        assert_eq!(settings.api_key, "sk");
        assert!(settings.dark_mode);
    }

    #[test]
    fn flags_beat_environment_beat_config() {
        let config = Config {
            model: Some("config-model".into()),
            base_url: Some("https://config.example/v1".into()),
            theme: Some("dark".into()),
        };
        let env = env_with(&[(API_KEY_ENV, "sk"), (BASE_URL_ENV, "https://env.example/v1/")]);

        let from_env = resolve_settings(&parse(&["cutie"]), &config, &env).expect("settings");
        assert_eq!(from_env.model, "config-model");
        assert_eq!(from_env.base_url, "https://env.example/v1");

        let from_flags = resolve_settings(
            &parse(&["cutie", "-m", "flag-model", "--base-url", "http://localhost:8080/v1"]),
            &config,
            &env,
        )
        .expect("settings");
        assert_eq!(from_flags.model, "flag-model");
        assert_eq!(from_flags.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn theme_comes_from_flag_or_config() {
        let env = env_with(&[(API_KEY_ENV, "sk")]);
        let light_config = Config {
            theme: Some("light".into()),
            ..Config::default()
        };
        assert!(!resolve_settings(&parse(&["cutie"]), &light_config, &env)
            .expect("settings")
            .dark_mode);
        assert!(!resolve_settings(&parse(&["cutie", "--light"]), &Config::default(), &env)
            .expect("settings")
            .dark_mode);
    }

    #[test]
    fn subcommands_parse() {
        let args = parse(&["cutie", "say", "why", "so", "curt?"]);
        assert!(matches!(
            args.command,
            Some(Commands::Say { ref prompt }) if prompt.join(" ") == "why so curt?"
        ));

        let args = parse(&["cutie", "set", "model", "gpt-4o"]);
        assert!(matches!(
            args.command,
            Some(Commands::Set { key: Some(ref key), ref value }) if key == "model" && value == &["gpt-4o"]
        ));

        let args = parse(&["cutie", "unset", "theme"]);
        assert!(matches!(args.command, Some(Commands::Unset { ref key }) if key == "theme"));
    }

    #[test]
    fn missing_key_message_names_the_variable() {
        assert!(MissingApiKey.to_string().contains(API_KEY_ENV));
    }
}
