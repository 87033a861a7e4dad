//! Raw and enriched pointer samples.

use crate::geometry::Direction;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;
use thiserror::Error;
use uuid::Uuid;

/// Platform identifier of one contact, stable while it stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(pub u64);

/// Mouse pointers share a single fixed id.
pub const MOUSE_POINTER_ID: PointerId = PointerId(u64::MAX);

/// Kind of device behind a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Touch,
    Pen,
    Mouse,
}

/// One active contact in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPointer {
    pub id: PointerId,
    pub client_x: f64,
    pub client_y: f64,
    pub pointer_type: PointerType,
    /// Normalized pressure in `0..=1`, when the device reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

impl RawPointer {
    pub fn new(id: PointerId, position: Point, pointer_type: PointerType) -> Self {
        Self {
            id,
            client_x: position.x,
            client_y: position.y,
            pointer_type,
            pressure: None,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Client-space position.
    pub fn position(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

/// Kind of input event a sample was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Start = 1,
    Move = 2,
    End = 4,
    Cancel = 8,
}

impl InputKind {
    /// Flag value of this kind.
    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl BitOr for InputKind {
    type Output = InputKindSet;

    fn bitor(self, rhs: Self) -> InputKindSet {
        InputKindSet(self.bits() | rhs.bits())
    }
}

/// A set of [`InputKind`]s stored as flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InputKindSet(u8);

impl InputKindSet {
    pub const EMPTY: Self = Self(0);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, kind: InputKind) -> bool {
        self.0 & kind.bits() != 0
    }
}

impl From<InputKind> for InputKindSet {
    fn from(kind: InputKind) -> Self {
        Self(kind.bits())
    }
}

impl BitOr<InputKind> for InputKindSet {
    type Output = InputKindSet;

    fn bitor(self, rhs: InputKind) -> InputKindSet {
        InputKindSet(self.0 | rhs.bits())
    }
}

impl BitOr for InputKindSet {
    type Output = InputKindSet;

    fn bitor(self, rhs: Self) -> InputKindSet {
        InputKindSet(self.0 | rhs.0)
    }
}

/// Errors raised when assembling a raw sample.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Sample has no active pointers")]
    NoPointers,
    #[error("Changed pointer {0:?} is not among the active pointers")]
    UnknownChangedPointer(PointerId),
}

/// Result type for sample construction.
pub type InputResult<T> = Result<T, InputError>;

/// One observation of every pointer that is down at an instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    kind: InputKind,
    pointers: Vec<RawPointer>,
    changed_pointers: Vec<RawPointer>,
    /// Source timestamp in milliseconds.
    timestamp: f64,
}

impl RawSample {
    /// Assemble a sample, checking that it has at least one pointer and that
    /// every changed pointer is also active.
    pub fn new(
        kind: InputKind,
        pointers: Vec<RawPointer>,
        changed_pointers: Vec<RawPointer>,
        timestamp: f64,
    ) -> InputResult<Self> {
        if pointers.is_empty() {
            return Err(InputError::NoPointers);
        }
        if let Some(unknown) = changed_pointers
            .iter()
            .find(|changed| !pointers.iter().any(|p| p.id == changed.id))
        {
            return Err(InputError::UnknownChangedPointer(unknown.id));
        }

        Ok(Self {
            kind,
            pointers,
            changed_pointers,
            timestamp,
        })
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// All pointers currently down, in caller order.
    pub fn pointers(&self) -> &[RawPointer] {
        &self.pointers
    }

    /// Pointers that changed state with this event.
    pub fn changed_pointers(&self) -> &[RawPointer] {
        &self.changed_pointers
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Device type of the first pointer.
    pub fn pointer_type(&self) -> PointerType {
        self.pointers
            .first()
            .map(|p| p.pointer_type)
            .unwrap_or_default()
    }

    /// Client positions of the active pointers.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.pointers.iter().map(RawPointer::position)
    }

    /// First two active positions, if there are at least two.
    pub fn first_pair(&self) -> Option<[Point; 2]> {
        match self.pointers.as_slice() {
            [a, b, ..] => Some([a.position(), b.position()]),
            _ => None,
        }
    }
}

/// A raw sample with lifecycle flags and derived geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSample {
    #[serde(flatten)]
    pub input: RawSample,
    pub session_id: Uuid,
    pub is_first: bool,
    pub is_final: bool,
    pub center: Point,
    /// Degrees from the baseline center to the current center.
    pub angle: f64,
    pub distance: f64,
    pub direction: Direction,
    pub velocity: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub delta_time: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub scale: f64,
    /// Degrees of rotation since the first multi-pointer sample.
    pub rotation: f64,
    pub max_pointers: usize,
}

impl EnrichedSample {
    pub fn kind(&self) -> InputKind {
        self.input.kind()
    }

    pub fn pointer_count(&self) -> usize {
        self.input.pointers().len()
    }
}
