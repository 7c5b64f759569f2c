#![forbid(unsafe_code)]

//! Easing curves and the eased progress sweep.
//!
//! Animations here are time-based and produce normalized `f32` values in
//! `[0.0, 1.0]`. They never read a clock: the owner advances them with
//! [`Animation::tick`], which keeps every animation deterministic under test.

use std::time::Duration;

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic ease-out. The default curve of the mutation sweep.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Vertical lift of an element at `progress`: `-K * (1 - 2|p - 0.5|)`.
///
/// Zero at both ends of the sweep, `-height` at the midpoint. Negative values
/// move the element up.
#[inline]
pub fn bump_offset(progress: f32, height: f32) -> i32 {
    let p = progress.clamp(0.0, 1.0);
    let lift = height * (1.0 - 2.0 * (p - 0.5).abs());
    -(lift.round() as i32)
}

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current output value, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Reset the animation to its initial state.
    fn reset(&mut self);
}

/// Eased progress from 0.0 to 1.0 over a fixed duration.
///
/// Elapsed time is tracked as a [`Duration`] so repeated small ticks do not
/// accumulate floating-point drift.
#[derive(Debug, Clone, Copy)]
pub struct Sweep {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Sweep {
    /// A sweep over `duration` with [`ease_out_cubic`] easing.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: ease_out_cubic,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Time since the sweep started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress before easing, in [0.0, 1.0].
    pub fn raw_progress(&self) -> f32 {
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }
}

impl Animation for Sweep {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_500: Duration = Duration::from_millis(500);

    #[test]
    fn easing_endpoints() {
        for f in [linear as EasingFn, ease_out, ease_out_cubic] {
            assert!((f(0.0) - 0.0).abs() < f32::EPSILON);
            assert!((f(1.0) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn easing_clamps_input() {
        assert!((ease_out_cubic(-1.0) - 0.0).abs() < f32::EPSILON);
        assert!((ease_out_cubic(3.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn cubic_decelerates_harder_than_quadratic() {
        assert!(ease_out_cubic(0.3) > ease_out(0.3));
        assert!(ease_out(0.3) > linear(0.3));
    }

    #[test]
    fn bump_peaks_at_midpoint() {
        assert_eq!(bump_offset(0.0, 10.0), 0);
        assert_eq!(bump_offset(1.0, 10.0), 0);
        assert_eq!(bump_offset(0.5, 10.0), -10);
        assert_eq!(bump_offset(0.25, 10.0), -5);
        assert_eq!(bump_offset(0.75, 10.0), -5);
    }

    #[test]
    fn bump_is_symmetric() {
        for i in 0..=50 {
            let p = i as f32 / 100.0;
            assert_eq!(bump_offset(p, 10.0), bump_offset(1.0 - p, 10.0), "p={p}");
        }
    }

    #[test]
    fn sweep_progress() {
        let mut sweep = Sweep::new(MS_500).easing(linear);
        sweep.tick(MS_100);
        assert!((sweep.value() - 0.2).abs() < 0.001);
        assert!(!sweep.is_complete());
        sweep.tick(Duration::from_millis(400));
        assert!(sweep.is_complete());
        assert!((sweep.value() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn sweep_defaults_to_cubic() {
        let mut sweep = Sweep::new(MS_500);
        sweep.tick(Duration::from_millis(250));
        assert!((sweep.value() - ease_out_cubic(0.5)).abs() < f32::EPSILON);
    }

    #[test]
    fn sweep_zero_duration_completes_on_first_tick() {
        let mut sweep = Sweep::new(Duration::ZERO);
        assert!(!sweep.is_complete());
        sweep.tick(Duration::from_nanos(1));
        assert!(sweep.is_complete());
    }

    #[test]
    fn sweep_reset() {
        let mut sweep = Sweep::new(MS_100);
        sweep.tick(MS_500);
        sweep.reset();
        assert_eq!(sweep.elapsed(), Duration::ZERO);
        assert!((sweep.value() - 0.0).abs() < f32::EPSILON);
    }
}
