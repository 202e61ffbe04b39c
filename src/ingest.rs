use crate::db::DbPool;
use crate::message::{IncomingMessage, ValidationError};
use crate::signature::verify_signature;
use crate::store::{self, InsertOutcome};

/// Terminal outcome of processing one incoming webhook delivery.
///
/// `Created` and `Duplicate` are both successes at the protocol boundary;
/// the distinction exists only for observability. A storage fault is the
/// `Err` arm of [`ingest`] rather than a variant here, so it can never be
/// mistaken for a handled outcome.
#[derive(Debug)]
pub enum IngestOutcome {
    /// Signature missing or wrong; never distinguished further.
    Unauthorized,
    /// Body failed to parse or the payload violated the schema.
    Rejected(ValidationError),
    /// First durable insert for this message_id.
    Created { message_id: String },
    /// A row for this message_id already existed; nothing was written.
    Duplicate { message_id: String },
}

impl IngestOutcome {
    /// Outcome tag for logs and metrics.
    pub fn result_tag(&self) -> &'static str {
        match self {
            IngestOutcome::Unauthorized => "invalid_signature",
            IngestOutcome::Rejected(_) => "validation_error",
            IngestOutcome::Created { .. } => "created",
            IngestOutcome::Duplicate { .. } => "duplicate",
        }
    }

    /// Message identifier, when processing got far enough to know one.
    pub fn message_id(&self) -> Option<&str> {
        match self {
            IngestOutcome::Created { message_id } | IngestOutcome::Duplicate { message_id } => {
                Some(message_id)
            }
            _ => None,
        }
    }
}

/// Sequences signature verification, payload validation, and the idempotent
/// insert for a single delivery.
///
/// Verification runs over the exact body bytes as received. Verifier and
/// validator failures are terminal and local; they never escalate to a
/// storage fault. Only the store can produce `Err`, which the boundary layer
/// reports as a 5xx server error.
pub async fn ingest(
    pool: &DbPool,
    secret: &str,
    body: &[u8],
    signature: Option<&str>,
) -> Result<IngestOutcome, sqlx::Error> {
    if !verify_signature(secret, body, signature) {
        return Ok(IngestOutcome::Unauthorized);
    }

    let incoming: IncomingMessage = match serde_json::from_slice(body) {
        Ok(incoming) => incoming,
        Err(e) => {
            return Ok(IngestOutcome::Rejected(ValidationError::malformed(
                e.to_string(),
            )))
        }
    };

    let message = match incoming.validate() {
        Ok(message) => message,
        Err(e) => return Ok(IngestOutcome::Rejected(e)),
    };

    match store::insert_message(pool, &message).await? {
        InsertOutcome::Created => Ok(IngestOutcome::Created {
            message_id: message.message_id,
        }),
        InsertOutcome::Duplicate => Ok(IngestOutcome::Duplicate {
            message_id: message.message_id,
        }),
    }
}
