//! Time-based interpolation shared by the keyboard offset and the sheet.
//!
//! Nothing here owns a timer. Callers pass the `Instant` they want sampled,
//! which keeps the state machines deterministic under test.

use std::time::{Duration, Instant};

/// Linear transition between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let progress = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * progress
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

/// A value that either rests or is moving along a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimatedValue {
    resting: f32,
    tween: Option<Tween>,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            resting: value,
            tween: None,
        }
    }

    /// Jump to `value`, dropping any running animation.
    pub fn set(&mut self, value: f32) {
        self.resting = value;
        self.tween = None;
    }

    /// Start animating from wherever the value is at `now` towards `target`.
    pub fn animate_to(&mut self, target: f32, duration: Duration, now: Instant) {
        let from = self.value_at(now);
        self.tween = Some(Tween::new(from, target, now, duration));
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        match self.tween {
            Some(tween) => tween.value_at(now),
            None => self.resting,
        }
    }

    /// Value the animation will settle on.
    pub fn target(&self) -> f32 {
        self.tween.map(|t| t.target()).unwrap_or(self.resting)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tween.is_some_and(|t| !t.is_finished(now))
    }

    /// Collapse a finished animation into its resting value.
    pub fn settle(&mut self, now: Instant) {
        if let Some(tween) = self.tween {
            if tween.is_finished(now) {
                self.resting = tween.target();
                self.tween = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_interpolates_linearly_and_clamps() {
        let start = Instant::now();
        let tween = Tween::new(0.0, 100.0, start, Duration::from_millis(200));

        assert_eq!(tween.value_at(start), 0.0);
        assert!((tween.value_at(start + Duration::from_millis(50)) - 25.0).abs() < 0.01);
        assert_eq!(tween.value_at(start + Duration::from_millis(400)), 100.0);
        assert!(tween.is_finished(start + Duration::from_millis(200)));
    }

    #[test]
    fn zero_duration_tween_lands_immediately() {
        let start = Instant::now();
        let tween = Tween::new(3.0, 9.0, start, Duration::ZERO);
        assert_eq!(tween.value_at(start), 9.0);
        assert!(tween.is_finished(start));
    }

    #[test]
    fn retargeting_starts_from_current_position() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(100.0, Duration::from_millis(100), start);

        let midway = start + Duration::from_millis(50);
        value.animate_to(0.0, Duration::from_millis(100), midway);

        assert!((value.value_at(midway) - 50.0).abs() < 0.01);
        assert_eq!(value.target(), 0.0);
        assert_eq!(value.value_at(midway + Duration::from_millis(100)), 0.0);
    }

    #[test]
    fn settle_only_collapses_finished_animations() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(10.0, Duration::from_millis(100), start);

        value.settle(start + Duration::from_millis(10));
        assert!(value.is_animating(start + Duration::from_millis(10)));

        value.settle(start + Duration::from_millis(100));
        assert!(!value.is_animating(start + Duration::from_millis(100)));
        assert_eq!(value.value_at(start), 10.0);
    }
}
