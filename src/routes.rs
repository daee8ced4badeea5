use std::sync::Arc;

use log::{error, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Json, WithStatus};

use crate::errors::BackendError;

pub mod action;
pub mod admin;
pub mod context;
mod handlers;
mod rejection;
mod response;

pub use internal::*;

/// The largest comment form to accept: the longest allowed comment with
/// every character taking four percent-encoded bytes, plus room for the
/// other fields.
const MAX_FORM_LENGTH: u64 = 65_535 * 12 + 16 * 1024;

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<WithStatus<Json>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        error!(logger, "Backend error"; "context" => ?r.context, "error" => ?r.error, "status" => %status_code_for(e), "message" => %r.error);
        let flattened = r.flatten();

        return Ok(with_status(json(&flattened), status_code_for(e)));
    }

    Err(rej)
}

fn status_code_for(e: &BackendError) -> StatusCode {
    use BackendError::*;

    match e {
        AlreadyVoted(..) => StatusCode::UNAUTHORIZED,
        InvalidId(..) | MalformedForm | UnknownAction(..) => StatusCode::BAD_REQUEST,
        Validation(..) => StatusCode::IM_A_TEAPOT,
        BlocklistUnavailable { .. } | Sqlx { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

mod internal {
    use warp::filters::BoxedFilter;
    use warp::path::end;
    use warp::Filter;
    use warp::Reply;
    use warp::{get as g, path as p, path::param as par, post};

    use super::{context, handlers, MAX_FORM_LENGTH};
    use crate::environment::Environment;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    macro_rules! route_filter {
    ($route_variable:ident; $first:expr) => (let $route_variable = $route_variable.and($first););
    ($route_variable:ident; $first:expr, $($rest:expr),+) => (
        let $route_variable = $route_variable.and($first);
        route_filter!($route_variable; $($rest),+);
    )
}

    macro_rules! route {
    ($name:ident => $handler:ident, $route_variable:ident; $($filters:expr),+) => (
        pub fn $name(environment: Environment) -> Route {
            let r = environment.config.ratings_path.clone();

            let $route_variable = warp::any()
                .map(move || environment.clone())
                .and(p(r));

            route_filter!($route_variable; $($filters),+);

            $route_variable.and_then(handlers::$handler)
                .boxed()
        }
    );
}

    route!(make_rating_route => rate, rt; par::<String>(), par::<String>(), end(), post(), context::request_context(), context::comment_form(MAX_FORM_LENGTH));
    route!(make_retrieve_route => retrieve, rt; par::<String>(), end(), g());
}
