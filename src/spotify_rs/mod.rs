//! Thin client for the parts of the Spotify Web API the converter needs.
//!
//! Docs: https://developer.spotify.com/documentation/web-api

pub mod auth;
pub mod client;
pub mod error;
pub mod types;
