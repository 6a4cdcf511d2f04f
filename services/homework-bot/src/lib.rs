//! Homework bot - review status notifier
//!
//! Polls the Practicum homework status API and forwards every change of the
//! latest homework's review status to a Telegram chat.

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod poller;
pub mod state;
pub mod status_client;
pub mod telegram;
pub mod translator;
pub mod validator;

pub use config::{load_config, Config};
pub use error::{BotError, ErrorKind, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::poller::Poller;
use crate::status_client::{PracticumClient, StatusClient};
use crate::telegram::TelegramNotifier;

/// Run the homework bot with the given configuration.
///
/// Fails only if the configuration is incomplete; otherwise polls forever.
pub async fn run(config: Config) -> Result<()> {
    let credentials = config.validate()?;
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::default());

    let client: Arc<dyn StatusClient> = Arc::new(PracticumClient::new(
        &config.endpoint,
        &credentials.practicum_token,
        Arc::clone(&http),
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config.telegram.api_base,
        &credentials.telegram_token,
        &credentials.telegram_chat_id,
        Arc::clone(&http),
    ));

    // Never cancelled: the loop ends with the process
    let poller = Poller::new(client, notifier, &config, CancellationToken::new());

    tracing::info!("Homework bot started");
    poller.run().await;

    Ok(())
}
