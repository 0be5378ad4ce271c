pub mod animation;
pub mod app;
pub mod completion;
pub mod config;
pub mod constants;
pub mod keyboard;
pub mod message;
pub mod sheet;
pub mod suggestions;
pub mod typing;
