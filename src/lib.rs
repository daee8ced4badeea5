pub mod blocklist;
pub mod captcha;
pub mod comment;
pub mod config;
pub mod db;
pub mod environment;
pub mod errors;
pub mod recording;
pub mod routes;
pub mod vote;
