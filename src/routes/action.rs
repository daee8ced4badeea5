use std::str::FromStr;

use crate::errors::BackendError;

/// What a request to `{id}/{action}` asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Upvote,
    Downvote,
    Comment,
}

impl FromStr for Action {
    type Err = BackendError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "+" => Ok(Action::Upvote),
            "-" => Ok(Action::Downvote),
            "c" => Ok(Action::Comment),
            _ => Err(BackendError::UnknownAction(token.to_owned())),
        }
    }
}
