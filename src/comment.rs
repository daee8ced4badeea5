use std::str::FromStr;

use lettre::Address;
use serde::{Deserialize, Serialize};

use crate::blocklist::Blocklist;
use crate::errors::ValidationError;

pub const MAX_NAME_LENGTH: usize = 31;
pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_CONTENT_LENGTH: usize = 65535;

/// Stored as the author of comments submitted without a name.
pub const DEFAULT_NAME: &str = "Anonymous";

/// Stored as the address of comments submitted without one.
pub const DEFAULT_EMAIL: &str = "nobody@nowhere.net";

/// A comment form as submitted. Absent fields are empty strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentSubmission {
    pub name: String,

    pub email: String,

    pub content: String,

    /// The name of the colour the submitter was asked to pick.
    #[serde(rename = "antispam-question")]
    pub antispam_question: String,

    /// The colour picked, as `#RRGGBB`.
    #[serde(rename = "antispam-answer", alias = "antispam")]
    pub antispam_answer: String,
}

/// A comment that passed validation, ready to be inserted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewComment {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) content: String,
    pub(crate) recording_id: u32,
}

impl NewComment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn recording_id(&self) -> u32 {
        self.recording_id
    }
}

/// The author, address and text of a submission after trimming and
/// defaulting, with the length limits already enforced.
#[derive(Clone, Debug, PartialEq)]
pub struct CommentDraft {
    name: String,
    email: String,
    content: String,
}

impl CommentDraft {
    /// Trims the fields, fills in the defaults and checks the lengths.
    pub fn from_submission(submission: &CommentSubmission) -> Result<Self, ValidationError> {
        let name = or_default(submission.name.trim(), DEFAULT_NAME);
        let email = or_default(submission.email.trim(), DEFAULT_EMAIL);
        let content = submission.content.trim();

        if content.is_empty() {
            return Err(ValidationError::NoContent);
        }

        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::NameTooLong);
        }

        if email.chars().count() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::EmailTooLong);
        }

        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(ValidationError::ContentTooLong);
        }

        Ok(CommentDraft {
            name: name.to_owned(),
            email: email.to_owned(),
            content: content.to_owned(),
        })
    }

    /// Rejects the draft if its content contains a blocklisted word.
    pub fn screen(&self, blocklist: &Blocklist) -> Result<(), ValidationError> {
        match blocklist.find_in(&self.content) {
            Some(word) => Err(ValidationError::ForbiddenWord {
                word: word.to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Rejects the draft if the address is not syntactically valid.
    pub fn verify_email(&self) -> Result<(), ValidationError> {
        verify_email(&self.email)
    }

    pub fn into_comment(self, recording_id: u32) -> NewComment {
        NewComment {
            name: self.name,
            email: self.email,
            content: self.content,
            recording_id,
        }
    }
}

/// Checks the syntax of an e-mail address. Some exotic but valid domains may
/// be refused.
pub fn verify_email(email: &str) -> Result<(), ValidationError> {
    Address::from_str(email)
        .map(|_| ())
        .map_err(|_| ValidationError::MalformedEmail)
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}
