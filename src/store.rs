use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Fixed key for the one-time onboarding questionnaire record
pub const QUIZ_KEY: &str = "aura_quiz";

/// Fixed key for the append-only contact message list
pub const MESSAGES_KEY: &str = "aura_messages";

/// Outcome of the onboarding questionnaire.
///
/// Either record keeps the overlay from returning on the next visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizRecord {
    /// The visitor dismissed the questionnaire
    Skipped { date: DateTime<Utc> },
    /// The visitor answered and left their contact details
    Completed {
        /// Question label to selected choice, `None` for unanswered groups
        meta: BTreeMap<String, Option<String>>,
        name: String,
        email: String,
        phone: String,
        saved_at: DateTime<Utc>,
    },
}

/// One contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: DateTime<Utc>,
}

/// Flat local key-value blob backed by a single JSON file.
///
/// The whole map is read on open and rewritten on every mutation, matching
/// the read-append-write pattern of a browser local-storage blob. There is
/// no other persistence in the application.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, serde_json::Value>,
}

impl LocalStore {
    /// Open a store file, treating a missing file as an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(LocalStore { path, entries })
    }

    /// Read and decode one keyed record
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.entries
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(Into::into)
    }

    /// Encode one keyed record and rewrite the backing file
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        self.entries
            .insert(key.to_string(), serde_json::to_value(value)?);
        self.flush()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn flush(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        log::debug!("Store flushed to {}", self.path.display());
        Ok(())
    }

    /// The stored questionnaire outcome, if any
    pub fn quiz(&self) -> Result<Option<QuizRecord>, StoreError> {
        self.get(QUIZ_KEY)
    }

    /// Whether the onboarding overlay should stay closed
    pub fn quiz_answered(&self) -> bool {
        self.contains(QUIZ_KEY)
    }

    /// Persist a completed questionnaire.
    ///
    /// Name, email and phone are required; whitespace-only values are
    /// rejected with [`StoreError::MissingField`] and nothing is written.
    pub fn save_quiz(
        &mut self,
        meta: BTreeMap<String, Option<String>>,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<(), StoreError> {
        let record = QuizRecord::Completed {
            meta,
            name: required(name, "name")?.to_string(),
            email: required(email, "email")?.to_string(),
            phone: required(phone, "phone")?.to_string(),
            saved_at: Utc::now(),
        };
        self.set(QUIZ_KEY, &record)
    }

    /// Record a dismissed questionnaire so the overlay does not return
    pub fn skip_quiz(&mut self) -> Result<(), StoreError> {
        self.set(QUIZ_KEY, &QuizRecord::Skipped { date: Utc::now() })
    }

    /// All stored contact messages, oldest first
    pub fn messages(&self) -> Result<Vec<ContactMessage>, StoreError> {
        Ok(self.get(MESSAGES_KEY)?.unwrap_or_default())
    }

    /// Validate and append one contact message, preserving prior entries
    pub fn append_message(
        &mut self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<(), StoreError> {
        let entry = ContactMessage {
            name: required(name, "name")?.to_string(),
            email: required(email, "email")?.to_string(),
            message: required(message, "message")?.to_string(),
            date: Utc::now(),
        };
        let mut messages = self.messages()?;
        messages.push(entry);
        self.set(MESSAGES_KEY, &messages)
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(StoreError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}
