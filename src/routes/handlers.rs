use std::time::{Duration, Instant};

use log::{debug, o};
use time::OffsetDateTime;
use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_header, with_status, Reply},
};

use crate::environment::Environment;
use crate::errors::BackendError;
use crate::recording::Recording;
use crate::routes::{
    action::Action,
    context::{FormResult, RequestContext},
    rejection::{Context, Rejection},
};
use crate::vote::VoteMarker;

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($body:tt)+) => {
        let start = Instant::now();

        // TODO when `try` blocks are stabilized, we can wrap the body
        // and return the headers even on errors
        let result = { $($body)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

/// Handles `POST {id}/{action}`: one vote or one comment.
pub async fn rate(
    environment: Environment,
    id: String,
    action: String,
    context: RequestContext,
    submission: FormResult,
) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::rating(id.clone(), action.clone()), e);

        let parsed_action: Action = action.parse().map_err(error_handler)?;
        let recording = Recording::with_id(parse_id(&id).map_err(error_handler)?);

        let logger = environment
            .logger
            .new(o!("recording_id" => recording.id(), "action" => action.clone()));
        let db = environment.db.as_ref();

        match parsed_action {
            Action::Upvote | Action::Downvote => {
                if context.has_marker(&VoteMarker::new(recording.id())) {
                    debug!(logger, "Refusing duplicate vote...");
                    return Err(error_handler(BackendError::AlreadyVoted(recording.id())).into());
                }

                debug!(logger, "Recording vote...");
                let marker = if parsed_action == Action::Upvote {
                    recording.upvote(db).await
                } else {
                    recording.downvote(db).await
                }
                .map_err(error_handler)?;

                Box::new(with_header(
                    StatusCode::NO_CONTENT,
                    "set-cookie",
                    marker.set_cookie(OffsetDateTime::now_utc()),
                )) as Box<dyn Reply>
            }
            Action::Comment => {
                let submission = submission.map_err(error_handler)?;

                debug!(logger, "Validating comment...");
                recording
                    .comment(db, &environment.config.blocklist_path, &submission)
                    .await
                    .map_err(error_handler)?;

                debug!(logger, "Stored comment.");
                Box::new(StatusCode::NO_CONTENT) as Box<dyn Reply>
            }
        }
    }
}

/// Handles `GET {id}`.
pub async fn retrieve(environment: Environment, id: String) -> RouteResult {
    timed! {
        let error_handler = |e: BackendError| Rejection::new(Context::retrieve(id.clone()), e);

        let recording_id = parse_id(&id).map_err(error_handler)?;
        debug!(environment.logger, "Retrieving recording..."; "recording_id" => recording_id);

        let row = environment
            .db
            .retrieve(recording_id)
            .await
            .map_err(error_handler)?;

        match row {
            Some(row) => with_status(json(&Recording::from_row(row)), StatusCode::OK),
            None => with_status(json(&()), StatusCode::NOT_FOUND),
        }
    }
}

fn parse_id(id: &str) -> Result<u32, BackendError> {
    id.parse().map_err(|_| BackendError::InvalidId(id.to_owned()))
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
