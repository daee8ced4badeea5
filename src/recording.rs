use std::collections::HashMap;
use std::convert::TryFrom;
use std::path::Path;

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::Value;

use crate::blocklist::Blocklist;
use crate::captcha;
use crate::comment::{CommentDraft, CommentSubmission};
use crate::db::Db;
use crate::errors::BackendError;
use crate::vote::{Direction, VoteMarker};

/// A loosely-typed row: column or key names with their values, in order.
pub type RowData = Vec<(String, Value)>;

/// The attributes a row key can set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Id,
    NpcId,
    QuestId,
    Line,
    File,
    Upvotes,
    Downvotes,
    Comments,
}

/// Every key spelling accepted when loading a recording.
const ALIASES: &[(&str, Field)] = &[
    ("id", Field::Id),
    ("recording_id", Field::Id),
    ("npcId", Field::NpcId),
    ("npc_id", Field::NpcId),
    ("npc", Field::NpcId),
    ("questId", Field::QuestId),
    ("quest_id", Field::QuestId),
    ("quest", Field::QuestId),
    ("line", Field::Line),
    ("number", Field::Line),
    ("line_number", Field::Line),
    ("file", Field::File),
    ("filename", Field::File),
    ("fileName", Field::File),
    ("recording", Field::File),
    ("audio", Field::File),
    ("upvotes", Field::Upvotes),
    ("likes", Field::Upvotes),
    ("downvotes", Field::Downvotes),
    ("dislikes", Field::Downvotes),
    ("comments", Field::Comments),
    ("comment_count", Field::Comments),
    ("commentCount", Field::Comments),
];

lazy_static! {
    static ref FIELDS_BY_ALIAS: HashMap<&'static str, Field> = ALIASES.iter().copied().collect();
}

/// A single voiced line.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Recording {
    id: u32,
    npc_id: u32,
    quest_id: u32,
    line: u32,
    file: String,
    upvotes: u32,
    downvotes: u32,
    comments: u32,
}

impl Recording {
    /// Loads a recording from row data. Unknown keys and values of the
    /// wrong shape are skipped; when several keys name the same field the
    /// last one wins.
    pub fn from_row<K, I>(row: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut recording = Recording::default();

        for (key, value) in row {
            let field = match FIELDS_BY_ALIAS.get(key.as_ref()) {
                Some(field) => *field,
                None => continue,
            };

            match (field, as_count(&value)) {
                (Field::File, _) => {
                    if let Some(file) = value.as_str() {
                        recording.file = file.to_owned();
                    }
                }
                (_, None) => {}
                (Field::Id, Some(n)) => recording.id = n,
                (Field::NpcId, Some(n)) => recording.npc_id = n,
                (Field::QuestId, Some(n)) => recording.quest_id = n,
                (Field::Line, Some(n)) => recording.line = n,
                (Field::Upvotes, Some(n)) => recording.upvotes = n,
                (Field::Downvotes, Some(n)) => recording.downvotes = n,
                (Field::Comments, Some(n)) => recording.comments = n,
            }
        }

        recording
    }

    /// A recording known only by its ID, as addressed by a request.
    pub fn with_id(id: u32) -> Self {
        Recording::from_row(vec![("id", Value::from(id))])
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn npc_id(&self) -> u32 {
        self.npc_id
    }

    pub fn quest_id(&self) -> u32 {
        self.quest_id
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn upvotes(&self) -> u32 {
        self.upvotes
    }

    pub fn downvotes(&self) -> u32 {
        self.downvotes
    }

    pub fn comments(&self) -> u32 {
        self.comments
    }

    pub async fn upvote(&self, db: &(dyn Db + Send + Sync)) -> Result<VoteMarker, BackendError> {
        self.vote(db, Direction::Up).await
    }

    pub async fn downvote(&self, db: &(dyn Db + Send + Sync)) -> Result<VoteMarker, BackendError> {
        self.vote(db, Direction::Down).await
    }

    /// Increments one of the counters in the database and returns the
    /// marker the client should keep. The in-memory counts are untouched.
    async fn vote(
        &self,
        db: &(dyn Db + Send + Sync),
        direction: Direction,
    ) -> Result<VoteMarker, BackendError> {
        db.vote(self.id, direction).await?;

        Ok(VoteMarker::new(self.id))
    }

    /// Validates a comment submission and stores it against this
    /// recording. The first failing check is reported; nothing is written
    /// unless every check passes.
    pub async fn comment(
        &self,
        db: &(dyn Db + Send + Sync),
        blocklist_path: &Path,
        submission: &CommentSubmission,
    ) -> Result<(), BackendError> {
        captcha::verify(&submission.antispam_question, &submission.antispam_answer)?;

        let draft = CommentDraft::from_submission(submission)?;

        let blocklist = Blocklist::load(blocklist_path).await?;
        draft.screen(&blocklist)?;
        draft.verify_email()?;

        db.insert_comment(draft.into_comment(self.id)).await
    }
}

/// Reads a count or ID from a number or a numeric string.
fn as_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::Recording;

    #[test]
    fn every_alias_is_understood() {
        let snake = Recording::from_row(vec![
            ("recording_id", json!(1)),
            ("npc_id", json!(2)),
            ("quest_id", json!(3)),
            ("line_number", json!(4)),
            ("filename", json!("a.ogg")),
            ("likes", json!(5)),
            ("dislikes", json!(6)),
            ("comment_count", json!(7)),
        ]);
        let camel = Recording::from_row(vec![
            ("id", json!(1)),
            ("npcId", json!(2)),
            ("questId", json!(3)),
            ("number", json!(4)),
            ("fileName", json!("a.ogg")),
            ("upvotes", json!(5)),
            ("downvotes", json!(6)),
            ("commentCount", json!(7)),
        ]);
        let short = Recording::from_row(vec![
            ("id", json!(1)),
            ("npc", json!(2)),
            ("quest", json!(3)),
            ("line", json!(4)),
            ("audio", json!("a.ogg")),
            ("upvotes", json!(5)),
            ("downvotes", json!(6)),
            ("comments", json!(7)),
        ]);

        assert_eq!(snake, camel);
        assert_eq!(snake, short);
        assert_eq!(snake.id(), 1);
        assert_eq!(snake.npc_id(), 2);
        assert_eq!(snake.quest_id(), 3);
        assert_eq!(snake.line(), 4);
        assert_eq!(snake.file(), "a.ogg");
        assert_eq!(snake.upvotes(), 5);
        assert_eq!(snake.downvotes(), 6);
        assert_eq!(snake.comments(), 7);

        assert_eq!(Recording::from_row(vec![("file", json!("b.ogg"))]).file(), "b.ogg");
        assert_eq!(Recording::from_row(vec![("recording", json!("c.ogg"))]).file(), "c.ogg");
    }

    #[test]
    fn unknown_keys_and_bad_values_are_skipped() {
        let recording = Recording::from_row(vec![
            ("id", json!(9)),
            ("colour", json!("red")),
            ("npc", json!("not a number")),
            ("quest", json!(-3)),
            ("line", json!(null)),
            ("file", json!(12)),
            ("upvotes", json!("14")),
        ]);

        assert_eq!(
            recording,
            Recording::from_row(vec![("id", json!(9)), ("upvotes", json!(14))])
        );
        assert_eq!(recording.npc_id(), 0);
        assert_eq!(recording.file(), "");
    }

    #[test]
    fn last_alias_wins() {
        let recording = Recording::from_row(vec![("id", json!(1)), ("recording_id", json!(2))]);

        assert_eq!(recording.id(), 2);
    }

    #[test]
    fn with_id_sets_only_the_id() {
        let recording = Recording::with_id(42);

        assert_eq!(recording.id(), 42);
        assert_eq!(recording, Recording::from_row(vec![("id", Value::from(42))]));
        assert_eq!(recording.upvotes(), 0);
    }
}
