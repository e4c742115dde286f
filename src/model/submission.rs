//! Form submissions: property inquiries and contact-page messages
//!
//! Both are append-only lists with an admin-managed lifecycle status.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::{Error, Result};
use crate::model::new_id;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Public form payload shared by both submission kinds
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub property_id: Option<String>,
    pub property_title: Option<String>,
}

/// A stored form submission kind
pub trait Submission:
    Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    type Status: FromStr<Err = Error> + Copy + PartialEq + Serialize + Send;

    /// Data file for this kind
    const FILE: &'static str;
    /// Name used in errors and logs
    const KIND: &'static str;

    fn from_input(input: SubmissionInput) -> Result<Self>;
    fn id(&self) -> &str;
    fn status(&self) -> Self::Status;
    fn set_status(&mut self, status: Self::Status);
    fn created_at(&self) -> DateTime<Utc>;
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(value: Option<String>, field: &str) -> Result<String> {
    trimmed(value).ok_or_else(|| Error::validation(format!("{} is required", field)))
}

fn require_email(value: Option<String>) -> Result<String> {
    let email = require(value, "email")?;
    if !EMAIL_RE.is_match(&email) {
        return Err(Error::validation(format!("invalid email address: {}", email)));
    }
    Ok(email)
}

// =============================================================================
// INQUIRY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Seen,
    Responded,
}

impl FromStr for InquiryStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(InquiryStatus::New),
            "seen" => Ok(InquiryStatus::Seen),
            "responded" => Ok(InquiryStatus::Responded),
            other => Err(Error::validation(format!(
                "unknown inquiry status '{}' (expected new, seen or responded)",
                other
            ))),
        }
    }
}

/// Property inquiry from a listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_title: Option<String>,
    pub status: InquiryStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Submission for Inquiry {
    type Status = InquiryStatus;

    const FILE: &'static str = "inquiries.json";
    const KIND: &'static str = "inquiry";

    fn from_input(input: SubmissionInput) -> Result<Self> {
        Ok(Self {
            id: new_id(),
            email: require_email(input.email)?,
            message: require(input.message, "message")?,
            name: trimmed(input.name).unwrap_or_default(),
            phone: trimmed(input.phone),
            property_id: trimmed(input.property_id),
            property_title: trimmed(input.property_title),
            status: InquiryStatus::New,
            created_at: Utc::now(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> InquiryStatus {
        self.status
    }

    fn set_status(&mut self, status: InquiryStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =============================================================================
// CONTACT MESSAGE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageStatus {
    New,
    InProgress,
    Completed,
}

impl FromStr for MessageStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(MessageStatus::New),
            "in-progress" | "in_progress" => Ok(MessageStatus::InProgress),
            "completed" => Ok(MessageStatus::Completed),
            other => Err(Error::validation(format!(
                "unknown message status '{}' (expected new, in-progress or completed)",
                other
            ))),
        }
    }
}

/// General message from the contact page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    pub status: MessageStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Submission for ContactMessage {
    type Status = MessageStatus;

    const FILE: &'static str = "contact-messages.json";
    const KIND: &'static str = "contact message";

    fn from_input(input: SubmissionInput) -> Result<Self> {
        Ok(Self {
            id: new_id(),
            name: require(input.name, "name")?,
            email: require_email(input.email)?,
            message: require(input.message, "message")?,
            phone: trimmed(input.phone),
            subject: trimmed(input.subject),
            status: MessageStatus::New,
            created_at: Utc::now(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> MessageStatus {
        self.status
    }

    fn set_status(&mut self, status: MessageStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
