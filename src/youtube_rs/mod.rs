//! Thin client for the YouTube Data API v3 and Google's installed-app OAuth flow.
//!
//! Docs: https://developers.google.com/youtube/v3/docs

pub mod auth;
pub mod client;
pub mod error;
pub mod token_store;
pub mod types;
