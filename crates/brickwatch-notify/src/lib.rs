//! Republishing of newly seen products.
//!
//! [`Notifier`] is the seam the poll cycle talks to. [`DiscordNotifier`]
//! posts rich embeds over the Discord REST API; [`LogNotifier`] only logs,
//! for dry runs and setups without a bot token.

mod discord;
mod error;
mod log;
pub mod render;

use std::future::Future;

use brickwatch_core::{Category, ProductRecord};

pub use discord::DiscordNotifier;
pub use error::NotifyError;
pub use log::LogNotifier;

/// Announces one new product in one category.
pub trait Notifier {
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the announcement could not be delivered.
    fn notify(
        &self,
        category: Category,
        product: &ProductRecord,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}
