//! Motion profile: planned segments plus a time cursor.
//!
//! Provides time-optimal profiles under velocity and asymmetric
//! acceleration/deceleration limits, starting from any kinematic state.

use crate::config::ProfileConstraints;
use crate::error::{ProfileError, Result};

use super::chunk::Chunk;
use super::planner::{self, Segment, Segments};
use super::setpoint::Setpoint;

/// Forward-only position within the segment list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Cursor {
    index: usize,
    start_time: f64,
    end_time: f64,
    /// Distance covered by all segments before `index`.
    distance: f64,
}

/// A planned single-axis move.
///
/// Queries walk a cursor forward through the segments. Querying an earlier
/// time than the previous query rewinds the cursor to the start first, so
/// any query order is answered correctly; increasing order is the cheap
/// path.
#[derive(Debug, Clone)]
pub struct Profile {
    segments: Segments,
    constraints: ProfileConstraints,
    starting_position: f64,
    total_duration: f64,
    total_distance: f64,
    cursor: Cursor,
}

impl Profile {
    /// Plan a move from the current state to `target`.
    ///
    /// # Arguments
    ///
    /// * `velocity` - Current velocity (signed)
    /// * `position` - Current position
    /// * `target` - Target position
    /// * `max_velocity` - Maximum speed
    /// * `max_acceleration` - Maximum rate of speeding up
    /// * `max_deceleration` - Maximum rate of slowing down
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is not strictly positive or an input is
    /// not finite.
    pub fn new(
        velocity: f64,
        position: f64,
        target: f64,
        max_velocity: f64,
        max_acceleration: f64,
        max_deceleration: f64,
    ) -> Result<Self> {
        Self::from_constraints(
            velocity,
            position,
            target,
            &ProfileConstraints::new(max_velocity, max_acceleration, max_deceleration),
        )
    }

    /// Plan a move using a constraint set.
    pub fn from_constraints(
        velocity: f64,
        position: f64,
        target: f64,
        constraints: &ProfileConstraints,
    ) -> Result<Self> {
        constraints.validate()?;
        check_finite("velocity", velocity)?;
        check_finite("position", position)?;
        check_finite("target", target)?;

        let segments = planner::plan(velocity, target - position, constraints)?;

        let total_duration: f64 = segments.iter().map(|s| s.chunk.duration()).sum();
        let covered: f64 = segments.iter().map(|s| s.chunk.distance()).sum();

        let mut profile = Self {
            segments,
            constraints: *constraints,
            starting_position: position,
            total_duration,
            total_distance: position + covered,
            cursor: Cursor::default(),
        };
        profile.reset();
        Ok(profile)
    }

    /// Total time of the move in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.total_duration
    }

    /// Position where the move ends.
    #[inline]
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Position where the move starts.
    #[inline]
    pub fn starting_position(&self) -> f64 {
        self.starting_position
    }

    /// Limits the profile was planned with.
    #[inline]
    pub fn constraints(&self) -> &ProfileConstraints {
        &self.constraints
    }

    /// Planned segments in order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Planned chunks in order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.segments.iter().map(|s| &s.chunk)
    }

    /// Check if the move is over at time `t`.
    #[inline]
    pub fn is_finished(&self, t: f64) -> bool {
        t >= self.total_duration
    }

    /// Rewind the cursor to the first segment.
    pub fn reset(&mut self) {
        self.cursor = Cursor {
            index: 0,
            start_time: 0.0,
            end_time: self.segments.first().map(|s| s.chunk.duration()).unwrap_or(0.0),
            distance: 0.0,
        };
    }

    /// Desired state at time `t` seconds after the start.
    pub fn setpoint(&mut self, t: f64) -> Setpoint {
        if t >= self.total_duration || self.segments.is_empty() {
            return Setpoint::terminal(self.total_distance);
        }

        if t < self.cursor.start_time {
            self.reset();
        }

        while t >= self.cursor.end_time && self.cursor.index + 1 < self.segments.len() {
            let finished = self.segments[self.cursor.index].chunk;
            let next = self.segments[self.cursor.index + 1].chunk;
            self.cursor = Cursor {
                index: self.cursor.index + 1,
                start_time: self.cursor.end_time,
                end_time: self.cursor.end_time + next.duration(),
                distance: self.cursor.distance + finished.distance(),
            };
        }

        let chunk = self.segments[self.cursor.index].chunk;
        let mut sp = chunk.setpoint(t - self.cursor.start_time);
        sp.position += self.starting_position + self.cursor.distance;
        sp
    }

    /// Position at time `t`.
    pub fn position(&mut self, t: f64) -> f64 {
        self.setpoint(t).position
    }

    /// Velocity at time `t`.
    pub fn velocity(&mut self, t: f64) -> f64 {
        self.setpoint(t).velocity
    }

    /// Acceleration at time `t`.
    pub fn acceleration(&mut self, t: f64) -> f64 {
        self.setpoint(t).acceleration
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ProfileError::NonFiniteInput { name, value }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_trapezoid_queries() {
        let mut profile = Profile::new(0.0, 0.0, 16.0, 4.0, 2.0, 1.0).unwrap();

        assert_close(profile.duration(), 7.0);
        assert_close(profile.acceleration(0.0), 2.0);
        assert_close(profile.velocity(1.5), 3.0);
        assert_close(profile.velocity(2.0), 4.0);
        assert_close(profile.position(3.0), 8.0);
        assert_close(profile.acceleration(6.5), -1.0);
    }

    #[test]
    fn test_offset_start_position() {
        let mut profile = Profile::new(0.0, 10.0, 26.0, 4.0, 2.0, 1.0).unwrap();

        assert_close(profile.position(0.0), 10.0);
        assert_close(profile.position(3.0), 18.0);
        assert_close(profile.total_distance(), 26.0);
    }

    #[test]
    fn test_terminal_setpoint() {
        let mut profile = Profile::new(0.0, 0.0, 16.0, 4.0, 2.0, 1.0).unwrap();

        let end = profile.setpoint(7.0);
        assert_eq!(end, Setpoint::terminal(16.0));
        assert_eq!(profile.setpoint(100.0), end);
    }

    #[test]
    fn test_backward_query_rewinds() {
        let mut profile = Profile::new(0.0, 0.0, 16.0, 4.0, 2.0, 1.0).unwrap();

        let late = profile.position(6.0);
        let early = profile.position(1.0);
        assert_close(early, 1.0);
        assert_close(profile.position(6.0), late);
    }

    #[test]
    fn test_negative_target() {
        let mut profile = Profile::new(0.0, 0.0, -16.0, 4.0, 2.0, 1.0).unwrap();

        assert_close(profile.duration(), 7.0);
        assert_close(profile.velocity(2.0), -4.0);
        assert_close(profile.position(3.0), -8.0);
    }

    #[test]
    fn test_empty_profile() {
        let mut profile = Profile::new(0.0, 5.0, 5.0, 4.0, 2.0, 1.0).unwrap();

        assert!(profile.segments().is_empty());
        assert_eq!(profile.duration(), 0.0);
        assert_eq!(profile.setpoint(0.0), Setpoint::terminal(5.0));
    }

    #[test]
    fn test_short_move_ends_at_rest() {
        // Accelerating to cruise covers exactly 4 units
        let mut profile = Profile::new(0.0, 0.0, 4.0, 4.0, 2.0, 1.0).unwrap();
        let duration = profile.duration();

        assert_close(duration, 12.0f64.sqrt());
        assert!(profile.velocity(duration - 0.001).abs() < 0.01);
        assert_close(profile.acceleration(duration - 0.001), -1.0);
        assert_close(profile.position(duration), 4.0);
        assert_eq!(
            profile.chunks().last().map(|c| c.end_velocity()),
            Some(0.0)
        );
    }

    #[test]
    fn test_rejects_bad_constraints() {
        let result = Profile::new(0.0, 0.0, 10.0, 4.0, 0.0, 1.0);
        assert!(matches!(
            result,
            Err(Error::Profile(ProfileError::InvalidConstraint { .. }))
        ));

        let result = Profile::new(f64::NAN, 0.0, 10.0, 4.0, 2.0, 1.0);
        assert!(matches!(
            result,
            Err(Error::Profile(ProfileError::NonFiniteInput { .. }))
        ));
    }
}
