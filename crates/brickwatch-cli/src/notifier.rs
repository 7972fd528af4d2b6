use brickwatch_core::{AppConfig, Category, ProductRecord};
use brickwatch_notify::{DiscordNotifier, LogNotifier, Notifier, NotifyError};

/// The notifier a poll run delivers through, chosen at startup.
pub(crate) enum ActiveNotifier {
    Discord(DiscordNotifier),
    Log(LogNotifier),
}

impl ActiveNotifier {
    /// Discord when a bot token is configured and this is not a dry run,
    /// otherwise log-only.
    pub(crate) fn from_config(config: &AppConfig, dry_run: bool) -> anyhow::Result<Self> {
        if dry_run {
            tracing::info!("dry run: notifications are logged, not delivered");
            return Ok(Self::Log(LogNotifier));
        }
        if config.discord_token.is_none() {
            tracing::warn!("DISCORD_TOKEN is not set; notifications are logged, not delivered");
            return Ok(Self::Log(LogNotifier));
        }
        Ok(Self::Discord(DiscordNotifier::from_config(config)?))
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Discord(_) => "discord",
            Self::Log(_) => "log",
        }
    }
}

impl Notifier for ActiveNotifier {
    async fn notify(&self, category: Category, product: &ProductRecord) -> Result<(), NotifyError> {
        match self {
            Self::Discord(discord) => discord.notify(category, product).await,
            Self::Log(log) => log.notify(category, product).await,
        }
    }
}
