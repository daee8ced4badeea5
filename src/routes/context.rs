use std::collections::HashMap;

use cookie::Cookie;
use warp::filters::BoxedFilter;
use warp::{reject, Filter};

use crate::comment::CommentSubmission;
use crate::errors::{BackendError, ValidationError};
use crate::vote::VoteMarker;

/// The per-request client state the handlers may consult. Built from the
/// request itself; nothing is shared between requests.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    cookies: HashMap<String, String>,
}

impl RequestContext {
    /// Parses a `cookie` header. Pairs without a name are ignored; when a
    /// name repeats, the first value is kept.
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        let mut cookies = HashMap::new();

        let parsed = header
            .unwrap_or("")
            .split(';')
            .flat_map(|pair| Cookie::parse(pair.trim()));

        for cookie in parsed {
            cookies
                .entry(cookie.name().to_owned())
                .or_insert_with(|| cookie.value().to_owned());
        }

        RequestContext { cookies }
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Whether the client presented the marker. Only presence counts.
    pub fn has_marker(&self, marker: &VoteMarker) -> bool {
        self.cookie(&marker.cookie_name()).is_some()
    }
}

pub fn request_context() -> BoxedFilter<(RequestContext,)> {
    warp::header::optional::<String>("cookie")
        .map(|header: Option<String>| RequestContext::from_cookie_header(header.as_deref()))
        .boxed()
}

/// The comment form, or why it could not be read.
pub type FormResult = Result<CommentSubmission, BackendError>;

/// Extracts the comment form. Votes carry no form, so a missing or
/// unreadable body is passed on as an error for the handler to raise only
/// when a comment needs it.
pub fn comment_form(max_length: u64) -> BoxedFilter<(FormResult,)> {
    warp::body::content_length_limit(max_length)
        .and(warp::body::form::<CommentSubmission>())
        .map(|submission: CommentSubmission| -> FormResult { Ok(submission) })
        .or_else(|rejection: reject::Rejection| async move {
            let error: FormResult = Err(form_error(&rejection));

            Ok::<_, reject::Rejection>((error,))
        })
        .boxed()
}

fn form_error(rejection: &reject::Rejection) -> BackendError {
    if rejection.find::<reject::PayloadTooLarge>().is_some() {
        BackendError::Validation(ValidationError::ContentTooLong)
    } else {
        BackendError::MalformedForm
    }
}

#[cfg(test)]
mod tests {
    use super::{comment_form, RequestContext};
    use crate::errors::{BackendError, ValidationError};
    use crate::vote::VoteMarker;

    #[test]
    fn parses_cookie_headers() {
        let context =
            RequestContext::from_cookie_header(Some("votedFor7=1; theme=dark ;empty=; =orphan; votedFor7=2"));

        assert_eq!(context.cookie("votedFor7"), Some("1"));
        assert_eq!(context.cookie("theme"), Some("dark"));
        assert_eq!(context.cookie("empty"), Some(""));
        assert_eq!(context.cookie(""), None);
    }

    #[test]
    fn marker_presence() {
        let context = RequestContext::from_cookie_header(Some("votedFor7=1"));

        assert!(context.has_marker(&VoteMarker::new(7)));
        assert!(!context.has_marker(&VoteMarker::new(70)));
        assert!(!RequestContext::from_cookie_header(None).has_marker(&VoteMarker::new(7)));
    }

    #[test]
    fn any_value_counts_as_a_marker() {
        let context = RequestContext::from_cookie_header(Some("votedFor7=0"));

        assert!(context.has_marker(&VoteMarker::new(7)));
    }

    #[tokio::test]
    async fn oversized_forms_are_too_long() {
        let result = warp::test::request()
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(format!("content={}", "x".repeat(64)))
            .filter(&comment_form(32))
            .await
            .expect("extract form result");

        assert!(matches!(
            result,
            Err(BackendError::Validation(ValidationError::ContentTooLong))
        ));
    }

    #[tokio::test]
    async fn other_bodies_are_malformed() {
        let result = warp::test::request()
            .method("POST")
            .header("content-type", "application/json")
            .body(r#"{"content":"hi"}"#)
            .filter(&comment_form(1024))
            .await
            .expect("extract form result");

        assert!(matches!(result, Err(BackendError::MalformedForm)));
    }

    #[tokio::test]
    async fn forms_are_extracted() {
        let submission = warp::test::request()
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("content=caf%C3%A9&antispam-question=red")
            .filter(&comment_form(1024))
            .await
            .expect("extract form result")
            .expect("parse form");

        assert_eq!(submission.content, "café");
        assert_eq!(submission.antispam_question, "red");
    }
}
