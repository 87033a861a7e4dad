//! Sample enrichment: updates the session baselines and derives geometry.

use crate::geometry;
use crate::lifecycle::Lifecycle;
use crate::sample::{EnrichedSample, RawSample};
use crate::session::{Session, SessionSnapshot};
use serde::{Deserialize, Serialize};

/// Value reported for every velocity field in [`VelocityMode::Placeholder`].
pub const PLACEHOLDER_VELOCITY: f64 = 1.0;

/// How velocity fields are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityMode {
    /// Report [`PLACEHOLDER_VELOCITY`] on every sample.
    #[default]
    Placeholder,
    /// Average velocity over the whole gesture, in pixels per millisecond.
    Overall,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    x: f64,
    y: f64,
    magnitude: f64,
}

impl Velocity {
    fn compute(mode: VelocityMode, delta_time: f64, delta_x: f64, delta_y: f64) -> Self {
        match mode {
            VelocityMode::Placeholder => Self {
                x: PLACEHOLDER_VELOCITY,
                y: PLACEHOLDER_VELOCITY,
                magnitude: PLACEHOLDER_VELOCITY,
            },
            VelocityMode::Overall => {
                let (x, y) = if delta_time > 0.0 {
                    (delta_x / delta_time, delta_y / delta_time)
                } else {
                    (0.0, 0.0)
                };
                let magnitude = if x.abs() > y.abs() { x } else { y };
                Self { x, y, magnitude }
            }
        }
    }
}

/// Update `session` from `input` and derive the enriched sample.
///
/// Never fails: a non-finite scale from a coincident baseline pair is
/// reported as 1.
pub fn enrich(
    session: &mut Session,
    input: RawSample,
    lifecycle: Lifecycle,
    velocity_mode: VelocityMode,
) -> EnrichedSample {
    let pointer_count = input.pointers().len();

    let first_input = session
        .first_input
        .get_or_insert_with(|| SessionSnapshot::capture(&input));
    let (start_time, start_center) = (first_input.timestamp, first_input.center);

    if pointer_count > 1 && session.first_multiple.is_none() {
        session.first_multiple = Some(SessionSnapshot::capture(&input));
    } else if pointer_count == 1 {
        session.first_multiple = None;
    }
    session.max_pointers = session.max_pointers.max(pointer_count);

    let offset_center = session.offset_center().unwrap_or(start_center);
    let center = geometry::center(input.positions());

    let delta_time = input.timestamp() - start_time;
    let delta_x = center.x - offset_center.x;
    let delta_y = center.y - offset_center.y;

    let (scale, rotation) = match (
        session.first_multiple.as_ref().and_then(SessionSnapshot::first_pair),
        input.first_pair(),
    ) {
        (Some(start), Some(end)) => {
            let scale = geometry::scale(start, end);
            let scale = if scale.is_finite() {
                scale
            } else {
                log::trace!("Coincident baseline pair, reporting scale 1");
                1.0
            };
            (scale, geometry::rotation(start, end))
        }
        _ => (1.0, 0.0),
    };

    let velocity = Velocity::compute(velocity_mode, delta_time, delta_x, delta_y);

    EnrichedSample {
        session_id: session.id,
        is_first: lifecycle.is_first,
        is_final: lifecycle.is_final,
        center,
        angle: geometry::angle(offset_center, center),
        distance: geometry::distance(offset_center, center),
        direction: geometry::direction(offset_center, center),
        velocity: velocity.magnitude,
        velocity_x: velocity.x,
        velocity_y: velocity.y,
        delta_time,
        delta_x,
        delta_y,
        scale,
        rotation,
        max_pointers: session.max_pointers,
        input,
    }
}
