use futures::future::BoxFuture;

use crate::comment::NewComment;
use crate::errors::BackendError;
use crate::recording::RowData;
use crate::vote::Direction;

pub mod mock;

/// The writes and reads the ratings service needs. Every write is a single
/// statement; atomicity of the counters is left to the database.
pub trait Db {
    /// Adds one to the up- or downvote counter of a recording.
    fn vote(&self, recording_id: u32, direction: Direction) -> BoxFuture<Result<(), BackendError>>;

    fn insert_comment(&self, comment: NewComment) -> BoxFuture<Result<(), BackendError>>;

    /// Returns the raw row for a recording, if it exists.
    fn retrieve(&self, recording_id: u32) -> BoxFuture<Result<Option<RowData>, BackendError>>;
}

pub use self::mysql::*;

mod mysql {
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use serde_json::Value;
    use sqlx::mysql::{MySqlPool, MySqlRow};
    use sqlx::{Column, Row};

    use crate::comment::NewComment;
    use crate::errors::BackendError;
    use crate::recording::RowData;
    use crate::vote::Direction;

    pub struct MySqlDb {
        pool: MySqlPool,
    }

    impl MySqlDb {
        pub fn new(pool: MySqlPool) -> Self {
            MySqlDb { pool }
        }
    }

    // these can be simplified once async functions in traits are stabilized
    impl super::Db for MySqlDb {
        fn vote(&self, recording_id: u32, direction: Direction) -> BoxFuture<Result<(), BackendError>> {
            async move {
                let query = match direction {
                    Direction::Up => sqlx::query(include_str!("queries/upvote.sql")),
                    Direction::Down => sqlx::query(include_str!("queries/downvote.sql")),
                };

                query
                    .bind(recording_id)
                    .execute(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(())
            }
            .boxed()
        }

        fn insert_comment(&self, comment: NewComment) -> BoxFuture<Result<(), BackendError>> {
            async move {
                let query = sqlx::query(include_str!("queries/insert_comment.sql"));

                query
                    .bind(&comment.name)
                    .bind(&comment.email)
                    .bind(&comment.content)
                    .bind(comment.recording_id)
                    .execute(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(())
            }
            .boxed()
        }

        fn retrieve(&self, recording_id: u32) -> BoxFuture<Result<Option<RowData>, BackendError>> {
            async move {
                let query = sqlx::query(include_str!("queries/retrieve.sql"));

                let row = query
                    .bind(recording_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(row.map(|row| row_data(&row)))
            }
            .boxed()
        }
    }

    /// Turns a row into name/value pairs. Columns that are neither integers
    /// nor text come out as `null`.
    fn row_data(row: &MySqlRow) -> RowData {
        row.columns()
            .iter()
            .map(|column| {
                let i = column.ordinal();
                (column.name().to_owned(), column_value(row, i))
            })
            .collect()
    }

    fn column_value(row: &MySqlRow, i: usize) -> Value {
        if let Ok(value) = row.try_get::<Option<u64>, _>(i) {
            return value.map(Value::from).unwrap_or(Value::Null);
        }

        if let Ok(value) = row.try_get::<Option<i64>, _>(i) {
            return value.map(Value::from).unwrap_or(Value::Null);
        }

        row.try_get::<Option<String>, _>(i)
            .ok()
            .flatten()
            .map(Value::from)
            .unwrap_or(Value::Null)
    }

    fn map_sqlx_error(source: sqlx::Error) -> BackendError {
        BackendError::Sqlx { source }
    }
}
