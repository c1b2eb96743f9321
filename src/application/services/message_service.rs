use std::time::Duration;
use crate::application::errors::BotError;
use crate::application::messaging::{CommandDispatcher, CorrelationState, EventCorrelator, Reply};
use crate::domain::traits::Bot;

/// Back-off after a failed read
const READ_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Service for the read, correlate, dispatch, send cycle
pub struct MessageService<B: Bot> {
    bot: B,
    correlator: EventCorrelator,
    dispatcher: CommandDispatcher,
    state: CorrelationState,
    poll_delay: Duration,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B, correlator: EventCorrelator, dispatcher: CommandDispatcher, state: CorrelationState) -> Self {
        Self {
            bot,
            correlator,
            dispatcher,
            state,
            poll_delay: Duration::from_secs(1),
        }
    }

    pub fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    /// Read one batch and answer at most one command from it.
    ///
    /// Send failures are logged, not returned; only a failed read is an error.
    pub async fn poll_once(&mut self) -> Result<Option<Reply>, BotError> {
        let events = self.bot.read_events().await?;
        if events.is_empty() {
            return Ok(None);
        }
        tracing::debug!("Received {} events", events.len());

        let Some(correlated) = self.correlator.correlate(&events, &mut self.state) else {
            return Ok(None);
        };

        let reply = self.dispatcher.dispatch(&correlated);
        tracing::info!(
            "Sending response to {}: {}",
            reply.channel_id,
            reply.text.chars().take(100).collect::<String>()
        );
        if let Err(e) = self.bot.send_message(&reply.channel_id, &reply.text).await {
            tracing::error!("Failed to send message: {}", e);
        }
        Ok(Some(reply))
    }

    /// Poll until the event source closes or the process is stopped
    pub async fn run(&mut self) {
        tracing::info!("Starting message loop...");
        loop {
            match self.poll_once().await {
                Ok(_) => tokio::time::sleep(self.poll_delay).await,
                Err(BotError::Closed) => {
                    tracing::info!("Event stream closed, stopping");
                    return;
                }
                Err(e) => {
                    tracing::error!("Failed to read events: {}", e);
                    tokio::time::sleep(READ_RETRY_DELAY).await;
                }
            }
        }
    }
}
