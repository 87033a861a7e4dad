//! PointerKit Core Library
//!
//! Normalizes touch, pen and mouse input into a single stream of
//! multi-pointer gesture samples enriched with center, distance, angle,
//! direction, scale, rotation and velocity.

pub mod adapter;
pub mod config;
pub mod enrich;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod sample;
pub mod session;

pub use adapter::{Adapter, InputAdapter, create_adapter};
pub use config::{AdapterKind, Capabilities, ConfigError, InputConfig};
pub use enrich::{VelocityMode, enrich};
pub use geometry::Direction;
pub use input::PointerInput;
pub use lifecycle::{GestureTracker, Lifecycle, classify};
pub use sample::{EnrichedSample, InputError, InputKind, InputKindSet, PointerId, PointerType, RawPointer, RawSample};
pub use session::{Session, SessionSnapshot};
