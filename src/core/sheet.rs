//! Drag-to-dismiss overlay.
//!
//! Gestures are reported as raw vertical positions in gesture units. The
//! controller decides when a press becomes a drag, tracks the finger 1:1,
//! and on release either slides the sheet away or springs it back.

use std::time::Instant;

use crate::core::animation::AnimatedValue;
use crate::core::constants::{
    SHEET_ANIMATION, SHEET_DISMISS_DISTANCE, SHEET_DRAG_THRESHOLD, SHEET_OFFSCREEN_OFFSET,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetPhase {
    Closed,
    Open,
    Dragging { offset: f32 },
    /// Sliding off-screen; becomes `Closed` once the animation finishes.
    Dismissing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Gesture {
    origin: f32,
    displacement: f32,
}

#[derive(Debug, Clone)]
pub struct SheetController {
    phase: SheetPhase,
    offset: AnimatedValue,
    gesture: Option<Gesture>,
}

impl Default for SheetController {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetController {
    pub fn new() -> Self {
        Self {
            phase: SheetPhase::Closed,
            offset: AnimatedValue::new(0.0),
            gesture: None,
        }
    }

    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != SheetPhase::Closed
    }

    pub fn offset_at(&self, now: Instant) -> f32 {
        self.offset.value_at(now)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.offset.is_animating(now)
    }

    pub fn open(&mut self) {
        if self.phase != SheetPhase::Closed {
            return;
        }
        self.offset.set(0.0);
        self.gesture = None;
        self.phase = SheetPhase::Open;
    }

    /// Slide the sheet away without a gesture.
    pub fn dismiss(&mut self, now: Instant) {
        if matches!(self.phase, SheetPhase::Closed | SheetPhase::Dismissing) {
            return;
        }
        self.gesture = None;
        self.offset
            .animate_to(SHEET_OFFSCREEN_OFFSET, SHEET_ANIMATION, now);
        self.phase = SheetPhase::Dismissing;
    }

    pub fn pointer_down(&mut self, y: f32) {
        if self.phase == SheetPhase::Open {
            self.gesture = Some(Gesture {
                origin: y,
                displacement: 0.0,
            });
        }
    }

    pub fn pointer_move(&mut self, y: f32) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        gesture.displacement = y - gesture.origin;
        let displacement = gesture.displacement;

        match self.phase {
            SheetPhase::Open if displacement.abs() > SHEET_DRAG_THRESHOLD => {
                self.offset.set(displacement);
                self.phase = SheetPhase::Dragging {
                    offset: displacement,
                };
            }
            SheetPhase::Dragging { .. } => {
                self.offset.set(displacement);
                self.phase = SheetPhase::Dragging {
                    offset: displacement,
                };
            }
            _ => {}
        }
    }

    pub fn pointer_up(&mut self, now: Instant) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        if !matches!(self.phase, SheetPhase::Dragging { .. }) {
            return;
        }

        if gesture.displacement > SHEET_DISMISS_DISTANCE {
            self.offset
                .animate_to(SHEET_OFFSCREEN_OFFSET, SHEET_ANIMATION, now);
            self.phase = SheetPhase::Dismissing;
        } else {
            self.offset.animate_to(0.0, SHEET_ANIMATION, now);
            self.phase = SheetPhase::Open;
        }
    }

    /// Advance time-driven transitions.
    pub fn tick(&mut self, now: Instant) {
        self.offset.settle(now);
        if self.phase == SheetPhase::Dismissing && !self.offset.is_animating(now) {
            self.phase = SheetPhase::Closed;
        }
    }
}
