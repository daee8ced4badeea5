use serde::Serialize;
use warp::reject;

use crate::errors::BackendError;

const INTERNAL_ERROR_MESSAGE: &str = "internal error";

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: BackendError,
}

impl Rejection {
    pub fn new(context: Context, error: BackendError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            context: self.context.clone(),
            message: if self.error.is_internal() {
                INTERNAL_ERROR_MESSAGE.to_owned()
            } else {
                format!("{}", self.error)
            },
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    #[serde(flatten)]
    pub(crate) context: Context,
    pub(crate) message: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Context {
    Rating { id: String, action: String },
    Retrieve { id: String },
}

impl Context {
    pub fn rating(id: String, action: String) -> Context {
        Context::Rating { id, action }
    }

    pub fn retrieve(id: String) -> Context {
        Context::Retrieve { id }
    }
}
