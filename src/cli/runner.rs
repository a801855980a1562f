//! CLI runner - executes commands

use crate::bot::Bot;
use crate::cli::commands::{Cli, Commands};
use crate::config::BotConfig;
use crate::error::{Error, Result};
use crate::pagination::{created_after, PaginatedFeed};
use crate::providers::Searchable;
use crate::types::JsonValue;
use futures::StreamExt;
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let default_limit = config.feed.limit;
        let bot = Bot::new(config)?;

        if self.cli.command.requires_login() && !bot.login().await? {
            return Err(Error::auth("login rejected, check your credentials"));
        }

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });

        let limit = |limit: &Option<usize>| limit.unwrap_or(default_limit);

        match &self.cli.command {
            Commands::Feed { limit: n, since } => {
                let pins = bot.pins();
                let mut feed = pins.feed(limit(n))?;
                if let Some(since) = since {
                    feed = feed.take_while(created_after(*since));
                }
                print_feed(feed.cancel_on(cancel)).await
            }
            Commands::Pin { id } => print_object(bot.pins().info(id).await?),
            Commands::Related { id, limit: n } => {
                let pins = bot.pins();
                print_feed(pins.related(id, limit(n)).cancel_on(cancel)).await
            }
            Commands::Source { domain, limit: n } => {
                let pins = bot.pins();
                print_feed(pins.from_source(domain, limit(n)).cancel_on(cancel)).await
            }
            Commands::Search {
                query,
                boards,
                limit: n,
            } => {
                if *boards {
                    let boards = bot.boards();
                    print_feed(boards.search(query, limit(n)).cancel_on(cancel)).await
                } else {
                    let pins = bot.pins();
                    print_feed(pins.search(query, limit(n)).cancel_on(cancel)).await
                }
            }
            Commands::Profile => print_object(bot.user().profile().await?),
            Commands::ResetLink { user } => {
                let sent = bot.password().send_reset_link(user).await?;
                print_line(&serde_json::json!({ "sent": sent }))
            }
        }
    }

    fn load_config(&self) -> Result<BotConfig> {
        let config = match &self.cli.config {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                BotConfig::load(path)?
            }
            None => BotConfig::default(),
        };
        Ok(config.apply_env())
    }
}

/// Print every item as one JSON line
async fn print_feed(feed: PaginatedFeed<'_>) -> Result<()> {
    let mut stream = feed.into_stream();
    let mut printed = 0usize;

    while let Some(item) = stream.next().await {
        match item {
            Ok(item) => {
                print_line(&item)?;
                printed += 1;
            }
            Err(Error::Cancelled) => {
                warn!(printed, "interrupted");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }

    info!(printed, "feed finished");
    Ok(())
}

fn print_object(object: Option<JsonValue>) -> Result<()> {
    match object {
        Some(object) => print_line(&object),
        None => {
            warn!("nothing found");
            Ok(())
        }
    }
}

fn print_line(value: &JsonValue) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
