use std::path::PathBuf;

use thiserror::Error;

use crate::comment::{MAX_EMAIL_LENGTH, MAX_NAME_LENGTH};

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The client already voted on this recording.
    #[error("already voted for recording {0}")]
    AlreadyVoted(u32),

    /// The blocklist file could not be read.
    #[error("could not read blocklist {path:?}")]
    BlocklistUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The recording ID in the path is not a valid ID.
    #[error("invalid recording ID: {0}")]
    InvalidId(String),

    /// The comment form was missing or could not be decoded.
    #[error("the comment form could not be read")]
    MalformedForm,

    /// Represents an SQL error.
    #[error("SQLx error")]
    Sqlx { source: sqlx::Error },

    /// The action token is not one of `+`, `-` or `c`.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The submission failed validation. The message is meant for the
    /// person who submitted it.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl BackendError {
    /// Whether the failure lies with the service rather than the request.
    /// The details of such errors are logged but not sent to clients.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            BackendError::BlocklistUnavailable { .. } | BackendError::Sqlx { .. }
        )
    }
}

/// Problems with a comment submission that the submitter can fix.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("The colour you picked was too distinct from {question}. Try again please.")]
    ColourTooDistinct { question: String },

    #[error("No content submitted")]
    NoContent,

    #[error("Name is too long, {} characters is the limit.", MAX_NAME_LENGTH)]
    NameTooLong,

    #[error("E-mail is too long, {} characters is the limit.", MAX_EMAIL_LENGTH)]
    EmailTooLong,

    #[error("Comment is too long, 65,535 characters is the limit.")]
    ContentTooLong,

    #[error("The comment contains a bad word: \"{word}\". If you believe that it's not used as a profanity, contact the moderators.")]
    ForbiddenWord { word: String },

    #[error("E-mail address doesn't seem to be in the correct format. If you are sure that you entered your e-mail address properly, contact the moderators.")]
    MalformedEmail,
}
