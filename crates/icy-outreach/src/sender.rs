use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use icy_clients::Email;
use icy_db::Database;
use icy_types::MessageStatus;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{OutreachError, Result};
use crate::providers::MailDelivery;
use crate::store::blocking;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub sent_to: String,
    /// The message had already left draft; nothing was delivered this time.
    pub already_sent: bool,
}

/// Delivers stored drafts and moves them from `draft` to `sent`.
///
/// Sends of the same message are serialised, so concurrent requests deliver
/// at most once.
pub struct OutreachSender {
    mail: Option<Arc<dyn MailDelivery>>,
    db: Arc<Database>,
    default_from: String,
    in_flight: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl OutreachSender {
    /// `mail` is `None` when no delivery credentials are configured; every
    /// send then fails with a delivery error.
    pub fn new(mail: Option<Arc<dyn MailDelivery>>, db: Arc<Database>, default_from: impl Into<String>) -> Self {
        Self {
            mail,
            db,
            default_from: default_from.into(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Per-message lock. Entries nobody else holds are dropped on the way.
    async fn lock_message(&self, message_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            in_flight.retain(|id, lock| *id == message_id || Arc::strong_count(lock) > 1);
            in_flight.entry(message_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Idempotent per message id: a message that already left `draft` is
    /// reported back without contacting the provider again.
    pub async fn send(&self, message_id: Uuid, to_email: &str, from_email: Option<&str>) -> Result<SendReceipt> {
        let _guard = self.lock_message(message_id).await;

        let row = blocking(&self.db, move |db| db.get_message(&message_id))
            .await?
            .ok_or(OutreachError::NotFound("Message"))?;
        let message = row.into_model()?;

        if message.status != MessageStatus::Draft {
            info!(message_id = %message_id, status = %message.status, "Message already sent, skipping delivery");
            return Ok(SendReceipt {
                sent_to: message.email_used.unwrap_or_else(|| to_email.to_string()),
                already_sent: true,
            });
        }

        let Some(mail) = &self.mail else {
            return Err(OutreachError::Delivery("email delivery is not configured".into()));
        };

        let email = Email {
            to: to_email.to_string(),
            from: from_email.unwrap_or(&self.default_from).to_string(),
            subject: message.subject.clone(),
            html: to_html(&message.content),
            text: message.content,
        };

        if let Err(e) = mail.deliver(&email).await {
            warn!(message_id = %message_id, to = %email.to, error = %e, "Email delivery failed");
            return Err(OutreachError::Delivery(e.to_string()));
        }

        let to = email.to.clone();
        let marked = blocking(&self.db, move |db| db.mark_message_sent(&message_id, &to, Utc::now())).await?;
        if marked.is_none() {
            // Moved out of draft elsewhere while delivering
            warn!(message_id = %message_id, "Delivered message was no longer a draft");
        }

        info!(message_id = %message_id, to = %email.to, "Outreach email sent");
        Ok(SendReceipt {
            sent_to: email.to,
            already_sent: false,
        })
    }

    /// Provider delivery webhooks (`delivered`, `opened`, `replied`) are not
    /// consumed yet; the message must still exist.
    pub async fn record_delivery_event(&self, message_id: Uuid, status: MessageStatus) -> Result<()> {
        blocking(&self.db, move |db| db.get_message(&message_id))
            .await?
            .ok_or(OutreachError::NotFound("Message"))?;
        warn!(message_id = %message_id, status = %status, "Dropping delivery event");
        Err(OutreachError::NotWired("Delivery event tracking"))
    }
}

/// Newlines become `<br>` tags; nothing else is escaped or rewritten.
pub fn to_html(text: &str) -> String {
    text.replace('\n', "<br>")
}
