pub mod spotify;
pub mod transfer;
pub mod youtube;
