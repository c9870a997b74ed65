use std::sync::Arc;

use icy_db::Database;
use icy_types::OutreachMessage;
use tracing::debug;
use uuid::Uuid;

use crate::error::{OutreachError, Result};
use crate::store::blocking;

/// Replace the subject and/or body of a message that is still a draft.
/// Sent messages are immutable.
pub async fn edit_draft(
    db: &Arc<Database>,
    message_id: Uuid,
    subject: Option<String>,
    content: Option<String>,
) -> Result<OutreachMessage> {
    let subject = subject.map(|s| s.trim().to_string());
    let content = content.map(|c| c.trim().to_string());
    if subject.as_deref() == Some("") || content.as_deref() == Some("") {
        return Err(OutreachError::Validation("subject and content cannot be blank".into()));
    }
    if subject.is_none() && content.is_none() {
        return Err(OutreachError::Validation("nothing to update".into()));
    }

    let existing = blocking(db, move |db| db.get_message(&message_id))
        .await?
        .ok_or(OutreachError::NotFound("Message"))?;
    if !existing.status()?.is_draft() {
        return Err(OutreachError::Validation("only draft messages can be edited".into()));
    }

    let row = blocking(db, move |db| {
        db.update_message_draft(&message_id, subject.as_deref(), content.as_deref())
    })
    .await?
    .ok_or(OutreachError::NotFound("Message"))?;

    debug!(message_id = %message_id, "Draft updated");
    Ok(row.into_model()?)
}
