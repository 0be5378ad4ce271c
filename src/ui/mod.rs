//! Terminal UI layer for the chat view.
//!
//! - [`chat_loop`]: the interaction loop that turns terminal input into
//!   reducer actions and starts the background work they request.
//! - [`renderer`] and [`layout`]: frame composition and screen geometry.
//! - [`theme`]: the dark and light palettes.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the conversation state machine and the
//! completion client.

pub mod chat_loop;
pub mod layout;
pub mod renderer;
pub mod theme;
