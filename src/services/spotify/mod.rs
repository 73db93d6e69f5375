pub mod client;
pub mod reader;
