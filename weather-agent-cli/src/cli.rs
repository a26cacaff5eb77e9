use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_agent_core::{Agent, Config, UserStore, services_from_config};

use crate::chat;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-agent", version, about = "Chat with a weather assistant")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive chat session.
    Chat {
        /// Register this email before the session starts.
        #[arg(long)]
        email: Option<String>,
    },

    /// Answer a single message and exit.
    Ask {
        /// The message, e.g. "weather in Chennai tomorrow".
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Register an email address.
    Register {
        email: String,
    },

    /// Configure the language model key, model and default city.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Chat { email } => {
                if let Some(email) = email {
                    register(&config, &email)?;
                }
                let agent = build_agent(&config)?;
                chat::run(&agent).await?;
            }
            Command::Ask { message } => {
                let agent = build_agent(&config)?;
                let reply = agent.handle(&message.join(" ")).await;
                println!("{reply}");
            }
            Command::Register { email } => {
                register(&config, &email)?;
            }
            Command::Configure => configure(config)?,
        }

        Ok(())
    }
}

fn build_agent(config: &Config) -> anyhow::Result<Agent> {
    let services = services_from_config(config)?;
    Ok(Agent::new(services, config.default_city.clone()))
}

fn register(config: &Config, email: &str) -> anyhow::Result<()> {
    let store = UserStore::open(config.users_file_path()?)?;
    debug!(path = %store.path().display(), "Opened user store");

    if store.register(email)? {
        println!("Welcome {}! You can now chat with the agent.", email.trim());
    } else {
        println!("{} is already registered.", email.trim());
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("Language model API key (leave empty to keep current):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_llm_api_key(api_key.trim().to_string());
    }

    let model = Text::new("Model:")
        .with_default(&config.llm.model)
        .prompt()
        .context("Failed to read model name")?;
    if !model.trim().is_empty() {
        config.llm.model = model.trim().to_string();
    }

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
