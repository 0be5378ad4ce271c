//! Cutie is a full-screen terminal chat with a curt assistant.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation state machine ([`core::app`]), the
//!   completion client, typing playback, and the keyboard and sheet
//!   animations.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`api`] defines the chat completion payloads sent over the wire.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which resolves settings and dispatches into
//! [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
