use std::f64::consts::PI;
use std::time::Duration;

use tracing::debug;

/// Timing curve mapping linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Slow start and end, fast middle. The usual default for view animations.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running,
    Completed,
    /// Stopped before completion, e.g. because its owner was detached.
    Cancelled,
}

/// One-shot interpolation from `from` to `to` over `duration`.
///
/// The animator never reads a clock. The host feeds the elapsed time since
/// start into [`ValueAnimator::tick`] at whatever cadence it renders.
#[derive(Debug, Clone)]
pub struct ValueAnimator {
    from: f32,
    to: f32,
    duration: Duration,
    easing: Easing,
    state: AnimatorState,
}

impl ValueAnimator {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            state: AnimatorState::Idle,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Retargets the start value. Only meaningful before `start`.
    pub fn set_from(&mut self, from: f32) {
        self.from = from;
    }

    /// Idle -> Running. Returns false if the animator was already started.
    pub fn start(&mut self) -> bool {
        if self.state != AnimatorState::Idle {
            return false;
        }
        debug!(from = self.from, to = self.to, duration = ?self.duration, "animation started");
        self.state = AnimatorState::Running;
        true
    }

    pub fn cancel(&mut self) {
        if matches!(self.state, AnimatorState::Idle | AnimatorState::Running) {
            debug!("animation cancelled");
            self.state = AnimatorState::Cancelled;
        }
    }

    fn fraction(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Interpolated value at `elapsed`, without touching the state.
    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let fraction = self.fraction(elapsed);
        if fraction >= 1.0 {
            return self.to;
        }
        let eased = self.easing.apply(fraction);
        (self.from as f64 + (self.to as f64 - self.from as f64) * eased) as f32
    }

    /// Produces the value for this frame, or `None` once the animator is no
    /// longer running. The frame that reaches `duration` yields exactly `to`
    /// and completes the animation.
    pub fn tick(&mut self, elapsed: Duration) -> Option<f32> {
        if self.state != AnimatorState::Running {
            return None;
        }
        let value = self.value_at(elapsed);
        if self.fraction(elapsed) >= 1.0 {
            debug!(value, "animation completed");
            self.state = AnimatorState::Completed;
        }
        Some(value)
    }

    /// Lazy time-indexed sequence of `(elapsed, value)` samples every
    /// `interval`, always ending with the final value at `duration`.
    pub fn frames(&self, interval: Duration) -> Frames<'_> {
        Frames {
            animator: self,
            interval,
            next: Some(Duration::ZERO),
        }
    }
}

pub struct Frames<'a> {
    animator: &'a ValueAnimator,
    interval: Duration,
    next: Option<Duration>,
}

impl Iterator for Frames<'_> {
    type Item = (Duration, f32);

    fn next(&mut self) -> Option<Self::Item> {
        let elapsed = self.next?;
        let duration = self.animator.duration;
        self.next = if elapsed >= duration || self.interval.is_zero() {
            None
        } else {
            Some((elapsed + self.interval).min(duration))
        };
        Some((elapsed, self.animator.value_at(elapsed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> ValueAnimator {
        ValueAnimator::new(0.0, 360.0, Duration::from_millis(1000), Easing::default())
    }

    #[test]
    fn endpoints() {
        let animator = sweep();
        assert_eq!(animator.value_at(Duration::ZERO), 0.0);
        assert_eq!(animator.value_at(Duration::from_millis(1000)), 360.0);
        assert_eq!(animator.value_at(Duration::from_millis(5000)), 360.0);
        assert!((animator.value_at(Duration::from_millis(500)) - 180.0).abs() < 1e-3);
    }

    #[test]
    fn frames_are_monotonic() {
        for easing in [Easing::Linear, Easing::AccelerateDecelerate] {
            let animator = ValueAnimator::new(0.0, 360.0, Duration::from_millis(1000), easing);
            let frames: Vec<_> = animator.frames(Duration::from_millis(16)).collect();
            assert_eq!(frames.first(), Some(&(Duration::ZERO, 0.0)));
            assert_eq!(frames.last(), Some(&(Duration::from_millis(1000), 360.0)));
            assert!(frames.windows(2).all(|w| w[0].1 <= w[1].1));
            assert!(frames.windows(2).all(|w| w[0].0 < w[1].0));
        }
    }

    #[test]
    fn easing_shape() {
        let e = Easing::AccelerateDecelerate;
        assert!(e.apply(0.0).abs() < 1e-12);
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12);
        // Slow start: behind linear in the first half.
        assert!(e.apply(0.25) < 0.25);
        assert!(e.apply(0.75) > 0.75);
        assert_eq!(Easing::Linear.apply(0.3), 0.3);
    }

    #[test]
    fn lifecycle() {
        let mut animator = sweep();
        assert_eq!(animator.tick(Duration::ZERO), None);
        assert!(animator.start());
        assert!(!animator.start());
        assert_eq!(animator.tick(Duration::ZERO), Some(0.0));
        assert!(animator.tick(Duration::from_millis(400)).is_some());
        assert_eq!(animator.tick(Duration::from_millis(1016)), Some(360.0));
        assert_eq!(animator.state(), AnimatorState::Completed);
        assert_eq!(animator.tick(Duration::from_millis(1032)), None);
        assert!(!animator.start());
    }

    #[test]
    fn cancel_stops_ticks() {
        let mut animator = sweep();
        animator.start();
        animator.tick(Duration::from_millis(100));
        animator.cancel();
        assert_eq!(animator.state(), AnimatorState::Cancelled);
        assert_eq!(animator.tick(Duration::from_millis(200)), None);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut animator = ValueAnimator::new(0.0, 360.0, Duration::ZERO, Easing::Linear);
        animator.start();
        assert_eq!(animator.tick(Duration::ZERO), Some(360.0));
        assert_eq!(animator.state(), AnimatorState::Completed);
    }
}
