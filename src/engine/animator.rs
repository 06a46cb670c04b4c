use std::time::{Duration, Instant};

use crate::engine::severity::Severity;

pub const ANIMATION_DURATION: Duration = Duration::from_millis(800);

#[derive(Clone, Copy, Debug)]
enum AnimatorState {
    Idle,
    Animating { start: f64, end: f64, t0: Instant },
}

/// What the gauge renders for the current frame. Severity is classified on
/// the rounded value so the color always matches the printed number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayState {
    pub value: Option<u32>,
    pub severity: Severity,
}

/// Time-driven interpolation of the displayed score toward a target.
/// Pollable: callers drive it with `tick(now)` from whatever scheduler they
/// have (the app's tick event, plain `Instant`s in tests). Holds no state
/// beyond the single current interpolation and is never persisted.
pub struct ScoreAnimator {
    display: Option<f64>,
    target: Option<f64>,
    state: AnimatorState,
}

impl ScoreAnimator {
    pub fn new() -> Self {
        Self {
            display: None,
            target: None,
            state: AnimatorState::Idle,
        }
    }

    /// Begin interpolating toward `end`. A retarget mid-animation restarts
    /// from the currently displayed value, not the previous start, so the
    /// gauge never jumps. Equal start and end snaps straight to Idle.
    pub fn set_target(&mut self, end: f64, now: Instant) {
        if self.target == Some(end) && matches!(self.state, AnimatorState::Animating { .. }) {
            return;
        }
        self.target = Some(end);
        let start = self.display.unwrap_or(0.0);
        if (end - start).abs() < f64::EPSILON {
            self.display = Some(end);
            self.state = AnimatorState::Idle;
        } else {
            self.state = AnimatorState::Animating { start, end, t0: now };
        }
    }

    /// Clear the display back to the no-data state.
    pub fn reset(&mut self) {
        self.display = None;
        self.target = None;
        self.state = AnimatorState::Idle;
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating { .. })
    }

    pub fn tick(&mut self, now: Instant) -> DisplayState {
        if let AnimatorState::Animating { start, end, t0 } = self.state {
            let elapsed = now.saturating_duration_since(t0).as_secs_f64();
            let progress = (elapsed / ANIMATION_DURATION.as_secs_f64()).clamp(0.0, 1.0);
            self.display = Some(start + (end - start) * progress);
            if progress >= 1.0 {
                self.display = Some(end);
                self.state = AnimatorState::Idle;
            }
        }
        self.display_state()
    }

    pub fn display_state(&self) -> DisplayState {
        let rounded = self.display.map(|v| v.round());
        DisplayState {
            value: rounded.map(|v| v.max(0.0) as u32),
            severity: Severity::classify(rounded),
        }
    }
}

impl Default for ScoreAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_no_data() {
        let animator = ScoreAnimator::new();
        let state = animator.display_state();
        assert_eq!(state.value, None);
        assert_eq!(state.severity, Severity::NoData);
    }

    #[test]
    fn test_reaches_target_with_matching_severity() {
        let t0 = Instant::now();
        let mut animator = ScoreAnimator::new();
        animator.set_target(92.0, t0);
        assert!(animator.is_animating());

        let state = animator.tick(t0 + ANIMATION_DURATION);
        assert_eq!(state.value, Some(92));
        assert_eq!(state.severity, Severity::classify(Some(92.0)));
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_midpoint_is_between_start_and_end() {
        let t0 = Instant::now();
        let mut animator = ScoreAnimator::new();
        animator.set_target(80.0, t0);

        let state = animator.tick(t0 + ANIMATION_DURATION / 2);
        let value = state.value.unwrap();
        assert!(value > 0 && value < 80, "midpoint value was {value}");
    }

    #[test]
    fn test_retarget_restarts_from_current_display() {
        let t0 = Instant::now();
        let mut animator = ScoreAnimator::new();
        animator.set_target(100.0, t0);
        animator.tick(t0 + ANIMATION_DURATION / 2);
        let mid = animator.display_state().value.unwrap();

        // New target arrives mid-flight; every subsequent frame must stay
        // within [min(mid, 20), max(mid, 20)].
        animator.set_target(20.0, t0 + ANIMATION_DURATION / 2);
        let lo = mid.min(20);
        let hi = mid.max(20);
        for step in 1..=8 {
            let now = t0 + ANIMATION_DURATION / 2 + ANIMATION_DURATION * step / 8;
            let value = animator.tick(now).value.unwrap();
            assert!(value >= lo && value <= hi, "value {value} escaped [{lo}, {hi}]");
        }
        assert_eq!(animator.display_state().value, Some(20));
    }

    #[test]
    fn test_equal_target_snaps_idle() {
        let t0 = Instant::now();
        let mut animator = ScoreAnimator::new();
        animator.set_target(60.0, t0);
        animator.tick(t0 + ANIMATION_DURATION);

        animator.set_target(60.0, t0 + ANIMATION_DURATION);
        assert!(!animator.is_animating());
        assert_eq!(animator.display_state().value, Some(60));
    }

    #[test]
    fn test_repeated_set_target_does_not_restart() {
        let t0 = Instant::now();
        let mut animator = ScoreAnimator::new();
        animator.set_target(80.0, t0);
        animator.tick(t0 + ANIMATION_DURATION / 2);
        let mid = animator.display_state().value.unwrap();

        // Same target again mid-flight must not reset progress to zero.
        animator.set_target(80.0, t0 + ANIMATION_DURATION / 2);
        let value = animator
            .tick(t0 + ANIMATION_DURATION / 2 + Duration::from_millis(1))
            .value
            .unwrap();
        assert!(value >= mid);
    }
}
