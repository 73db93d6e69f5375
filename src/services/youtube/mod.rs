pub mod client;
pub mod matcher;
pub mod playlist_builder;
