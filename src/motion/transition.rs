//! Linear ramp primitive.

/// A linear-in-time ramp from `start` over `[0, duration]`.
///
/// Sampling clamps time into the ramp's bounds, so a transition holds its
/// start value before `0` and its end value after `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    start: f64,
    rate: f64,
    duration: f64,
}

impl Transition {
    /// Create a ramp from `start` to `end` over `duration` seconds.
    ///
    /// A zero-length ramp holds `start` and has a rate of zero.
    pub fn new(start: f64, end: f64, duration: f64) -> Self {
        let rate = if duration > 0.0 {
            (end - start) / duration
        } else {
            0.0
        };

        Self {
            start,
            rate,
            duration: duration.max(0.0),
        }
    }

    /// A flat ramp holding `value` for `duration` seconds.
    pub fn constant(value: f64, duration: f64) -> Self {
        Self::new(value, value, duration)
    }

    /// A flat ramp at zero.
    pub fn zero(duration: f64) -> Self {
        Self::constant(0.0, duration)
    }

    /// Value at `t = 0`.
    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Value at `t = duration`.
    #[inline]
    pub fn end(&self) -> f64 {
        self.start + self.rate * self.duration
    }

    /// Change per second.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Length of the ramp in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    fn clamp_time(&self, t: f64) -> f64 {
        t.clamp(0.0, self.duration)
    }

    /// Sample the ramp at `t`.
    pub fn get(&self, t: f64) -> f64 {
        self.start + self.rate * self.clamp_time(t)
    }

    /// Exact area under the ramp from `0` to `t` (clamped).
    pub fn integrate(&self, t: f64) -> f64 {
        let t = self.clamp_time(t);
        self.start * t + 0.5 * self.rate * t * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_and_clamp() {
        let ramp = Transition::new(2.0, 6.0, 2.0);

        assert_eq!(ramp.rate(), 2.0);
        assert_eq!(ramp.get(1.0), 4.0);
        assert_eq!(ramp.get(-1.0), 2.0);
        assert_eq!(ramp.get(5.0), 6.0);
        assert_eq!(ramp.end(), 6.0);
    }

    #[test]
    fn test_integrate_is_trapezoid_area() {
        let ramp = Transition::new(0.0, 4.0, 2.0);

        assert_eq!(ramp.integrate(2.0), 4.0);
        assert_eq!(ramp.integrate(1.0), 1.0);
        // Clamped past the end
        assert_eq!(ramp.integrate(10.0), 4.0);
    }

    #[test]
    fn test_zero_duration_holds_start() {
        let ramp = Transition::new(3.0, 7.0, 0.0);

        assert_eq!(ramp.rate(), 0.0);
        assert_eq!(ramp.get(1.0), 3.0);
        assert_eq!(ramp.integrate(1.0), 0.0);
    }
}
