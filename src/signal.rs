use crate::util::Lerp;

/// Easing curve applied to the normalized phase of a [`Signal`].
pub type Easing = fn(f32) -> f32;

pub fn linear(t: f32) -> f32 {
    t
}

/// Triangle wave, 0 at the start of the period and 1 half way through.
pub fn ping_pong(t: f32) -> f32 {
    1.0 - (2.0 * t - 1.0).abs()
}

/// Periodic oscillation between two values.
///
/// The signal holds no clock of its own; callers pass the time they want the value at, in
/// seconds.
#[derive(Debug, Clone, Copy)]
pub struct Signal<T> {
    period: f64,
    phase: f64,
    begin: T,
    end: T,
    easing: Easing,
}

impl<T: Lerp + Copy> Signal<T> {
    /// Creates a signal that starts its cycle at `now`.
    pub fn new(period: f64, begin: T, end: T, now: f64) -> Self {
        let mut signal = Signal { period, phase: 0.0, begin, end, easing: linear };
        signal.phase = signal.period - fract(now / period) * period;
        signal
    }

    pub fn with_easing(self, easing: Easing) -> Self {
        Signal { easing, ..self }
    }

    /// Returns a copy with a new period, continuing from the fraction of the cycle reached at
    /// `now` so the value does not jump.
    pub fn with_period(self, period: f64, now: f64) -> Self {
        let reached = self.cycle_fraction(now);
        Signal { period, phase: f64::from(reached) * period - now.rem_euclid(period), ..self }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn value(&self, now: f64) -> T {
        let t = (self.easing)(self.cycle_fraction(now));
        self.begin.lerp(&self.end, t)
    }

    fn cycle_fraction(&self, now: f64) -> f32 {
        fract((now + self.phase) / self.period) as f32
    }
}

fn fract(v: f64) -> f64 {
    v - v.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_begin() {
        let signal = Signal::new(4.0, 0.0_f32, 1.0, 13.0);
        assert!(signal.value(13.0).abs() < 1e-4);
        assert!((signal.value(14.0) - 0.25).abs() < 1e-4);
        assert!((signal.value(16.0) - 0.75).abs() < 1e-4);
    }

    #[test]
    fn keeps_resolution_after_days() {
        let start = 5.0 * 86_400.0;
        let signal = Signal::new(4.0, 0.0_f32, 1.0, start);
        let mut prev = signal.value(start);
        for i in 1..120 {
            let value = signal.value(start + i as f64 / 60.0);
            assert!(value > prev, "frame {} did not advance", i);
            prev = value;
        }
    }

    #[test]
    fn is_periodic() {
        let signal = Signal::new(2.5, 10.0_f32, 20.0, 0.0);
        for i in 0..20 {
            let t = i as f64 * 0.1;
            assert!((signal.value(t) - signal.value(t + 2.5)).abs() < 1e-3);
        }
    }

    #[test]
    fn period_change_keeps_value() {
        let signal = Signal::new(4.0, 0.0_f32, 1.0, 0.0);
        let before = signal.value(3.0);
        let faster = signal.with_period(1.0, 3.0);
        assert!((faster.value(3.0) - before).abs() < 1e-4);
        assert_eq!(faster.period(), 1.0);
        // a quarter of the new period later
        assert!((faster.value(3.25) - ((before + 0.25) % 1.0)).abs() < 1e-4);
    }

    #[test]
    fn ping_pong_returns_to_begin() {
        let signal = Signal::new(2.0, 0.0_f32, 1.0, 0.0).with_easing(ping_pong);
        assert!(signal.value(0.0).abs() < 1e-5);
        assert!((signal.value(1.0) - 1.0).abs() < 1e-5);
        assert!((signal.value(0.5) - 0.5).abs() < 1e-5);
    }
}
