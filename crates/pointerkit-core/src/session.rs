//! Per-gesture baseline state.

use crate::geometry::{center, round_point};
use crate::sample::RawSample;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Baseline captured from a sample at a key moment of a gesture.
///
/// Holds owned, rounded copies of the pointer positions so later samples can
/// be compared against it no matter what the adapter does with its buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub timestamp: f64,
    pub pointers: Vec<Point>,
    pub center: Point,
}

impl SessionSnapshot {
    /// Capture a snapshot of `sample`.
    pub fn capture(sample: &RawSample) -> Self {
        let pointers: Vec<Point> = sample.positions().map(round_point).collect();
        let center = center(pointers.iter().copied());
        Self {
            timestamp: sample.timestamp(),
            pointers,
            center,
        }
    }

    /// First two captured positions, if the snapshot holds at least two.
    pub fn first_pair(&self) -> Option<[Point; 2]> {
        match self.pointers.as_slice() {
            [a, b, ..] => Some([*a, *b]),
            _ => None,
        }
    }
}

/// Mutable baselines owned by one gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    /// Set on the first sample of the gesture and kept until it ends.
    pub first_input: Option<SessionSnapshot>,
    /// Set on the first sample with two or more pointers, cleared whenever the
    /// count falls back to one.
    pub first_multiple: Option<SessionSnapshot>,
    /// Largest number of simultaneous pointers seen so far.
    pub max_pointers: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an empty session with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            first_input: None,
            first_multiple: None,
            max_pointers: 0,
        }
    }

    /// Center of the baseline in effect: the multi-pointer one if present.
    pub fn offset_center(&self) -> Option<Point> {
        self.first_multiple
            .as_ref()
            .or(self.first_input.as_ref())
            .map(|snapshot| snapshot.center)
    }
}
