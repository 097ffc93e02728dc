//! Outgoing mail boundary.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SecretaryError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivery outcome as reported by the mail provider ("dry-run", "202", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailReceipt {
    pub status: String,
}

pub trait Mailer: Send + Sync {
    fn send(&self, mail: &OutgoingMail) -> Result<MailReceipt>;
}

/// Logs and records mail instead of delivering it.
#[derive(Debug, Default)]
pub struct DryRunMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl DryRunMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Result<Vec<OutgoingMail>> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .map_err(|_| SecretaryError::Mail("outbox lock poisoned".to_string()))
    }
}

impl Mailer for DryRunMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<MailReceipt> {
        info!(to = %mail.to, subject = %mail.subject, "dry-run email");
        self.sent
            .lock()
            .map_err(|_| SecretaryError::Mail("outbox lock poisoned".to_string()))?
            .push(mail.clone());
        Ok(MailReceipt {
            status: "dry-run".to_string(),
        })
    }
}
