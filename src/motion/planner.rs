//! Segment synthesis for time-optimal single-axis moves.
//!
//! The planner walks from the current kinematic state toward the target,
//! emitting one segment per step until the remaining distance is used up.
//! When a step finds the axis at cruise speed but already too close to stop,
//! the previous segment is popped and replaced by an asymmetric triangle
//! that lands exactly on the target.

use heapless::Vec;

use crate::config::ProfileConstraints;
use crate::error::{ProfileError, Result};
use crate::math::{abs, approx_eq, sign, sqrt, EPSILON};

use super::chunk::Chunk;

/// Upper bound on segments in one profile.
///
/// Plans never exceed five segments (direction correction, accelerate,
/// cruise, decelerate, plus one extra ramp when starting above cruise speed).
pub const MAX_SEGMENTS: usize = 8;

/// Role of a segment within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentKind {
    /// Stopping because the axis moves away from the target.
    DirectionCorrection,
    /// Speeding up toward cruise speed.
    Accelerate,
    /// Holding cruise speed.
    Cruise,
    /// Slowing down, either to cruise speed or to rest.
    Decelerate,
    /// Rising edge of a triangle that peaks below cruise speed.
    TrianglePeak,
}

impl SegmentKind {
    /// Short name for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::DirectionCorrection => "direction-correction",
            SegmentKind::Accelerate => "accelerate",
            SegmentKind::Cruise => "cruise",
            SegmentKind::Decelerate => "decelerate",
            SegmentKind::TrianglePeak => "triangle-peak",
        }
    }
}

/// A planned chunk tagged with its role.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// Role within the plan.
    pub kind: SegmentKind,
    /// Kinematics of the segment.
    pub chunk: Chunk,
}

/// Ordered segments of a plan.
pub type Segments = Vec<Segment, MAX_SEGMENTS>;

/// Kinematic state between segments.
#[derive(Debug, Clone, Copy)]
struct PlanState {
    velocity: f64,
    remaining: f64,
}

impl PlanState {
    /// Signed distance needed to stop at max deceleration.
    fn stopping_distance(&self, max_decel: f64) -> f64 {
        0.5 * (abs(self.velocity) / max_decel) * self.velocity
    }
}

enum Step {
    Emit(SegmentKind, Chunk),
    Backtrack,
}

struct Planner {
    max_velocity: f64,
    max_accel: f64,
    max_decel: f64,
    segments: Segments,
    /// State before each emitted segment, parallel to `segments`.
    history: Vec<PlanState, MAX_SEGMENTS>,
}

/// Plan a move covering the signed `remaining` distance starting at
/// `velocity`. Constraints must already be validated.
pub(crate) fn plan(
    velocity: f64,
    remaining: f64,
    constraints: &ProfileConstraints,
) -> Result<Segments> {
    let mut planner = Planner {
        max_velocity: constraints.max_velocity,
        max_accel: constraints.max_acceleration,
        max_decel: constraints.deceleration(),
        segments: Vec::new(),
        history: Vec::new(),
    };

    let mut state = PlanState {
        velocity,
        remaining,
    };

    if abs(remaining) < EPSILON && abs(velocity) < EPSILON {
        return Ok(planner.segments);
    }

    let mut first = true;
    loop {
        match planner.step(state, first) {
            Step::Emit(kind, chunk) => {
                planner.push(state, kind, chunk)?;
                // A segment that lands on target still moving is reshaped
                // by the at-speed step into a triangle.
                if approx_eq(chunk.distance(), state.remaining)
                    && abs(chunk.end_velocity()) < EPSILON
                {
                    break;
                }
                state = PlanState {
                    velocity: chunk.end_velocity(),
                    remaining: state.remaining - chunk.distance(),
                };
            }
            Step::Backtrack => {
                planner.backtrack(state)?;
                break;
            }
        }
        first = false;
    }

    debug!(
        "planned {} segments for {} units from velocity {}",
        planner.segments.len(),
        remaining,
        velocity
    );

    Ok(planner.segments)
}

impl Planner {
    fn step(&self, state: PlanState, first: bool) -> Step {
        let v = state.velocity;
        let stopping = state.stopping_distance(self.max_decel);
        let target_dir = sign(state.remaining);
        let current_dir = sign(v);

        if first {
            if current_dir != target_dir && v != 0.0 {
                return Step::Emit(SegmentKind::DirectionCorrection, self.ramp(v, 0.0));
            }
            // Cannot stop short of the target even when braking right away.
            if abs(stopping) > abs(state.remaining) {
                return Step::Emit(SegmentKind::Decelerate, self.ramp(v, 0.0));
            }
        }

        let cruise = self.max_velocity * target_dir;
        if abs(v) > self.max_velocity + EPSILON {
            return self.emit_ramp(v, cruise);
        }

        if abs(v) < self.max_velocity - EPSILON {
            // Heading for cruise speed may overshoot; the at-speed step
            // below turns that into a triangle.
            return if abs(stopping) < abs(state.remaining) {
                self.emit_ramp(v, cruise)
            } else {
                self.emit_ramp(v, 0.0)
            };
        }

        let slack = state.remaining - stopping;
        if abs(slack) <= EPSILON {
            Step::Emit(SegmentKind::Decelerate, self.ramp(v, 0.0))
        } else if slack * current_dir > 0.0 {
            match Chunk::constant_velocity(v, slack) {
                Ok(chunk) => Step::Emit(SegmentKind::Cruise, chunk),
                Err(_) => Step::Backtrack,
            }
        } else {
            Step::Backtrack
        }
    }

    fn ramp(&self, v0: f64, v1: f64) -> Chunk {
        Chunk::velocity_transition(v0, v1, self.max_accel, self.max_decel)
    }

    fn emit_ramp(&self, v0: f64, v1: f64) -> Step {
        let kind = if abs(v1) > abs(v0) {
            SegmentKind::Accelerate
        } else {
            SegmentKind::Decelerate
        };
        Step::Emit(kind, self.ramp(v0, v1))
    }

    fn push(&mut self, state: PlanState, kind: SegmentKind, chunk: Chunk) -> Result<()> {
        trace!(
            "segment {}: {} -> {} over {}s, {} units",
            kind.as_str(),
            chunk.start_velocity(),
            chunk.end_velocity(),
            chunk.duration(),
            chunk.distance()
        );

        self.history
            .push(state)
            .map_err(|_| ProfileError::TooManySegments)?;
        self.segments
            .push(Segment { kind, chunk })
            .map_err(|_| ProfileError::TooManySegments)?;
        Ok(())
    }

    /// Replace the last segment with a triangle that peaks below cruise
    /// speed and stops exactly on target.
    fn backtrack(&mut self, current: PlanState) -> Result<()> {
        let restored = match self.history.pop() {
            Some(state) => {
                self.segments.pop();
                state
            }
            None => current,
        };

        let v = restored.velocity;
        let target_dir = sign(restored.remaining);

        // Area of the ramp from rest up to the restored velocity, signed with
        // the direction of travel.
        let preceding_area = 0.5 * v * abs(v) / self.max_accel;
        let full_triangle_distance = abs(restored.remaining + preceding_area);

        let cruise_squared = self.max_velocity * self.max_velocity;
        let accel_area = 0.5 * cruise_squared / self.max_accel;
        let decel_area = 0.5 * cruise_squared / self.max_decel;
        let ratio = accel_area / (accel_area + decel_area);

        let acceleration_distance = ratio * full_triangle_distance;
        let peak = sqrt(2.0 * acceleration_distance * self.max_accel) * target_dir;

        debug!(
            "backtracking into triangle: {} -> {} -> 0 over {} units",
            v,
            peak,
            restored.remaining
        );

        self.push(restored, SegmentKind::TrianglePeak, self.ramp(v, peak))?;
        self.push(restored, SegmentKind::Decelerate, self.ramp(peak, 0.0))?;
        Ok(())
    }
}
