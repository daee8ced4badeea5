use std::collections::HashMap;
use std::sync::RwLock;

use futures::future::{BoxFuture, FutureExt};

use crate::comment::NewComment;
use crate::errors::BackendError;
use crate::recording::RowData;
use crate::vote::Direction;

/// An in-memory stand-in for the database, for tests.
#[derive(Default)]
pub struct MockDb {
    votes: RwLock<HashMap<u32, (u32, u32)>>,
    comments: RwLock<Vec<NewComment>>,
    rows: RwLock<HashMap<u32, RowData>>,
    unavailable: bool,
}

impl MockDb {
    pub fn new() -> Self {
        MockDb::default()
    }

    /// A database whose every call fails, as if the server were down.
    pub fn unavailable() -> Self {
        MockDb {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn add_row(&self, recording_id: u32, row: RowData) {
        self.rows.write().unwrap().insert(recording_id, row);
    }

    pub fn upvotes(&self, recording_id: u32) -> u32 {
        self.votes.read().unwrap().get(&recording_id).map_or(0, |v| v.0)
    }

    pub fn downvotes(&self, recording_id: u32) -> u32 {
        self.votes.read().unwrap().get(&recording_id).map_or(0, |v| v.1)
    }

    pub fn comments(&self) -> Vec<NewComment> {
        self.comments.read().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), BackendError> {
        if self.unavailable {
            Err(BackendError::Sqlx {
                source: sqlx::Error::PoolTimedOut,
            })
        } else {
            Ok(())
        }
    }
}

impl super::Db for MockDb {
    fn vote(&self, recording_id: u32, direction: Direction) -> BoxFuture<Result<(), BackendError>> {
        async move {
            self.check_available()?;

            let mut votes = self.votes.write().unwrap();
            let counts = votes.entry(recording_id).or_default();

            match direction {
                Direction::Up => counts.0 += 1,
                Direction::Down => counts.1 += 1,
            }

            Ok(())
        }
        .boxed()
    }

    fn insert_comment(&self, comment: NewComment) -> BoxFuture<Result<(), BackendError>> {
        async move {
            self.check_available()?;
            self.comments.write().unwrap().push(comment);

            Ok(())
        }
        .boxed()
    }

    fn retrieve(&self, recording_id: u32) -> BoxFuture<Result<Option<RowData>, BackendError>> {
        async move {
            self.check_available()?;

            Ok(self.rows.read().unwrap().get(&recording_id).cloned())
        }
        .boxed()
    }
}
