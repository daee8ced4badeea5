use cookie::Cookie;
use time::{Duration, OffsetDateTime};

/// How long a client keeps its marker: one year.
pub const MARKER_LIFETIME_SECONDS: i64 = 31_536_000;

const COOKIE_PREFIX: &str = "votedFor";

/// Which counter a vote increments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The cookie that marks a client as having voted on a recording.
///
/// This only deters casual repeat votes. Clearing cookies allows another
/// vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteMarker {
    recording_id: u32,
}

impl VoteMarker {
    pub fn new(recording_id: u32) -> Self {
        VoteMarker { recording_id }
    }

    pub fn cookie_name(&self) -> String {
        format!("{}{}", COOKIE_PREFIX, self.recording_id)
    }

    /// The cookie that installs this marker, valid site-wide for a year
    /// from `now`.
    pub fn to_cookie(&self, now: OffsetDateTime) -> Cookie<'static> {
        let lifetime = Duration::seconds(MARKER_LIFETIME_SECONDS);

        Cookie::build(self.cookie_name(), "1")
            .path("/")
            .max_age(lifetime)
            .expires(now + lifetime)
            .finish()
    }

    /// The value of the `set-cookie` header that installs this marker.
    pub fn set_cookie(&self, now: OffsetDateTime) -> String {
        self.to_cookie(now).to_string()
    }
}
