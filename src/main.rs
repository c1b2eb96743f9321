use clap::Parser;
use std::path::Path;
use std::sync::Arc;

use dxbot::application::errors::BotError;
use dxbot::application::messaging::{CommandDispatcher, CommandParser, CorrelationState, EventCorrelator};
use dxbot::application::services::{MessageService, QuoteService};
use dxbot::domain::entities::UserDirectory;
use dxbot::domain::traits::{Bot, QuoteStore};
use dxbot::infrastructure::adapters::{ConsoleAdapter, SlackAdapter};
use dxbot::infrastructure::config::Config;
use dxbot::infrastructure::database::SqliteQuoteStore;

#[derive(Parser)]
#[command(name = "dxbot")]
#[command(version, about = "A chat-room quote bot", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Slack bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,

    /// Print the default config and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print_config();
        return;
    }

    if let Err(e) = run_bot(cli.config, cli.token) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if Path::new(config_path).exists() {
        let mut config = Config::load(config_path)?;
        config.apply_env();
        config
    } else {
        tracing::info!("No config at {}, using defaults and environment", config_path);
        Config::load_env()
    };

    if let Some(token) = token_override {
        config.set_slack_token(token);
    }
    config.validate()?;
    Ok(config)
}

fn run_bot(config_path: String, token_override: Option<String>) -> Result<(), BotError> {
    let config = load_config(&config_path, token_override)?;
    tracing::info!("Starting {} with prefix {:?}", config.bot.name, config.bot.prefix);

    // The quotes table must exist before serving anything
    let store = SqliteQuoteStore::new(&config.quotes.database)?;
    tracing::info!(
        "Quote store ready at {} ({} quotes)",
        config.quotes.database.display(),
        store.count()?
    );
    let store: Arc<dyn QuoteStore> = Arc::new(store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    if let Some(slack) = config.slack() {
        let token = slack.token.clone().unwrap_or_default();
        if slack.channels.is_empty() {
            tracing::warn!("No Slack channels configured, nothing will be read");
        }
        let bot = SlackAdapter::new(token, slack.channels.clone());
        rt.block_on(serve(bot, &config, store))
    } else {
        // Run console bot (dev mode)
        let bot = ConsoleAdapter::new(config.console_user_name());
        rt.block_on(serve(bot, &config, store))
    }
}

async fn serve<B: Bot>(mut bot: B, config: &Config, store: Arc<dyn QuoteStore>) -> Result<(), BotError> {
    bot.connect().await?;
    let info = bot.bot_info();
    tracing::info!("Bot started: {} ({})", info.name, info.id);

    let members = bot.list_members().await?;
    let users = UserDirectory::from_members(members, &config.users.exclude);
    tracing::info!("Loaded {} users", users.len());

    let parser = CommandParser::new(config.bot.prefix.clone())?;
    let quotes = QuoteService::new(store).with_name_policy(config.name_policy());
    let dispatcher = CommandDispatcher::new(quotes, users);
    let state = CorrelationState::new(config.bot.tracking);

    let mut service = MessageService::new(bot, EventCorrelator::new(parser), dispatcher, state)
        .with_poll_delay(config.poll_delay());
    service.run().await;
    Ok(())
}

fn print_config() {
    match serde_yaml::to_string(&Config::default()) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("Failed to render config: {}", e),
    }
}
