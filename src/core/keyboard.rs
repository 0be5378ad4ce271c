//! Bottom-bar offset tracking for compose focus.
//!
//! The terminal has no on-screen keyboard, so compose focus plays its role:
//! gaining focus raises the input bar above a key-hint panel, losing focus
//! lowers it again. Each transition carries the height and the duration the
//! offset should animate over.

use std::time::{Duration, Instant};

use crate::core::animation::AnimatedValue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardState {
    Hidden,
    Visible { height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardEvent {
    WillShow { height: f32, duration: Duration },
    WillHide { duration: Duration },
}

#[derive(Debug, Clone)]
pub struct KeyboardTracker {
    state: KeyboardState,
    offset: AnimatedValue,
}

impl Default for KeyboardTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardTracker {
    pub fn new() -> Self {
        Self {
            state: KeyboardState::Hidden,
            offset: AnimatedValue::new(0.0),
        }
    }

    pub fn handle(&mut self, event: KeyboardEvent, now: Instant) {
        match event {
            KeyboardEvent::WillShow { height, duration } => {
                self.state = KeyboardState::Visible { height };
                self.offset.animate_to(height, duration, now);
            }
            KeyboardEvent::WillHide { duration } => {
                if self.state == KeyboardState::Hidden && self.offset.target() == 0.0 {
                    return;
                }
                self.state = KeyboardState::Hidden;
                self.offset.animate_to(0.0, duration, now);
            }
        }
    }

    pub fn state(&self) -> KeyboardState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, KeyboardState::Visible { .. })
    }

    /// Bottom-bar offset at `now`.
    pub fn offset_at(&self, now: Instant) -> f32 {
        self.offset.value_at(now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.offset.is_animating(now)
    }

    pub fn settle(&mut self, now: Instant) {
        self.offset.settle(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW: KeyboardEvent = KeyboardEvent::WillShow {
        height: 300.0,
        duration: Duration::from_millis(250),
    };

    #[test]
    fn show_drives_offset_to_height_over_duration() {
        let start = Instant::now();
        let mut tracker = KeyboardTracker::new();
        tracker.handle(SHOW, start);

        assert_eq!(tracker.state(), KeyboardState::Visible { height: 300.0 });
        assert_eq!(tracker.offset_at(start), 0.0);
        assert!(tracker.offset_at(start + Duration::from_millis(125)) > 0.0);
        assert!(tracker.offset_at(start + Duration::from_millis(125)) < 300.0);
        assert_eq!(tracker.offset_at(start + Duration::from_millis(250)), 300.0);
    }

    #[test]
    fn hide_returns_offset_to_zero() {
        let start = Instant::now();
        let mut tracker = KeyboardTracker::new();
        tracker.handle(SHOW, start);

        let shown = start + Duration::from_millis(300);
        tracker.settle(shown);
        tracker.handle(
            KeyboardEvent::WillHide {
                duration: Duration::from_millis(200),
            },
            shown,
        );

        assert_eq!(tracker.state(), KeyboardState::Hidden);
        assert_eq!(tracker.offset_at(shown), 300.0);
        assert_eq!(tracker.offset_at(shown + Duration::from_millis(200)), 0.0);
    }

    #[test]
    fn hide_while_hidden_does_not_start_an_animation() {
        let start = Instant::now();
        let mut tracker = KeyboardTracker::new();
        tracker.handle(
            KeyboardEvent::WillHide {
                duration: Duration::from_millis(250),
            },
            start,
        );
        assert!(!tracker.is_animating(start));
        assert_eq!(tracker.offset_at(start), 0.0);
    }
}
