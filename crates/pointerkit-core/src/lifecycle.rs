//! Gesture boundaries and the per-gesture session owner.

use crate::enrich::{VelocityMode, enrich};
use crate::sample::{EnrichedSample, InputKind, RawSample};
use crate::session::Session;

/// Whether a sample opens or closes a gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    pub is_first: bool,
    pub is_final: bool,
}

/// Classify a sample from its kind and pointer counts.
///
/// A start where every active pointer just went down opens a gesture; an end
/// where every active pointer is lifting closes it. Cancel only closes the
/// gesture when `cancel_is_final` is set.
pub fn classify(
    kind: InputKind,
    pointer_count: usize,
    changed_count: usize,
    cancel_is_final: bool,
) -> Lifecycle {
    let all_changed = pointer_count == changed_count;
    let ends = match kind {
        InputKind::End => true,
        InputKind::Cancel => cancel_is_final,
        InputKind::Start | InputKind::Move => false,
    };

    Lifecycle {
        is_first: kind == InputKind::Start && all_changed,
        is_final: ends && all_changed,
    }
}

/// Owns the session of the gesture in progress and feeds samples through
/// classification and enrichment.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    session: Session,
    velocity_mode: VelocityMode,
    cancel_is_final: bool,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(VelocityMode::default(), false)
    }
}

impl GestureTracker {
    pub fn new(velocity_mode: VelocityMode, cancel_is_final: bool) -> Self {
        Self {
            session: Session::new(),
            velocity_mode,
            cancel_is_final,
        }
    }

    /// Session of the current (or most recently finished) gesture.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Classify and enrich one raw sample.
    ///
    /// A gesture start replaces the session; a gesture end leaves it alone.
    pub fn process(&mut self, input: RawSample) -> EnrichedSample {
        let lifecycle = classify(
            input.kind(),
            input.pointers().len(),
            input.changed_pointers().len(),
            self.cancel_is_final,
        );

        if lifecycle.is_first {
            self.session = Session::new();
            log::debug!(
                "Gesture started: session {} with {} pointer(s)",
                self.session.id,
                input.pointers().len()
            );
        }

        let enriched = enrich(&mut self.session, input, lifecycle, self.velocity_mode);

        log::trace!(
            "{:?} sample: center=({}, {}) delta=({}, {}) scale={} rotation={}",
            enriched.kind(),
            enriched.center.x,
            enriched.center.y,
            enriched.delta_x,
            enriched.delta_y,
            enriched.scale,
            enriched.rotation
        );
        if lifecycle.is_final {
            log::debug!(
                "Gesture ended: session {} after {}ms, max {} pointer(s)",
                self.session.id,
                enriched.delta_time,
                self.session.max_pointers
            );
        }

        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;
    use crate::sample::{PointerId, PointerType, RawPointer};
    use kurbo::Point;

    fn touch(id: u64, x: f64, y: f64) -> RawPointer {
        RawPointer::new(PointerId(id), Point::new(x, y), PointerType::Touch)
    }

    fn sample(kind: InputKind, pointers: Vec<RawPointer>, changed: &[u64], timestamp: f64) -> RawSample {
        let changed = pointers
            .iter()
            .filter(|p| changed.contains(&p.id.0))
            .copied()
            .collect();
        RawSample::new(kind, pointers, changed, timestamp).unwrap()
    }

    #[test]
    fn test_classify_first() {
        assert!(classify(InputKind::Start, 1, 1, false).is_first);
        assert!(classify(InputKind::Start, 2, 2, false).is_first);
        // A second finger joining is not a new gesture.
        assert!(!classify(InputKind::Start, 2, 1, false).is_first);
        assert!(!classify(InputKind::Move, 1, 1, false).is_first);
    }

    #[test]
    fn test_classify_final() {
        assert!(classify(InputKind::End, 1, 1, false).is_final);
        assert!(!classify(InputKind::End, 2, 1, false).is_final);
        assert!(!classify(InputKind::Move, 1, 1, false).is_final);
        assert!(!classify(InputKind::Start, 1, 1, false).is_final);
    }

    #[test]
    fn test_classify_cancel() {
        assert!(!classify(InputKind::Cancel, 1, 1, false).is_final);
        assert!(classify(InputKind::Cancel, 1, 1, true).is_final);
        assert!(!classify(InputKind::Cancel, 2, 1, true).is_final);
        assert!(!classify(InputKind::Cancel, 1, 1, true).is_first);
    }

    #[test]
    fn test_single_pointer_gesture() {
        let mut tracker = GestureTracker::default();

        let start = tracker.process(sample(InputKind::Start, vec![touch(1, 0.0, 0.0)], &[1], 0.0));
        assert!(start.is_first);
        assert!(!start.is_final);
        assert!(start.delta_x.abs() < f64::EPSILON);
        assert!(start.delta_y.abs() < f64::EPSILON);
        assert!((start.scale - 1.0).abs() < f64::EPSILON);
        assert!(start.rotation.abs() < f64::EPSILON);

        let moved = tracker.process(sample(InputKind::Move, vec![touch(1, 10.0, 0.0)], &[1], 100.0));
        assert!(!moved.is_first);
        assert!((moved.delta_x - 10.0).abs() < f64::EPSILON);
        assert!((moved.delta_time - 100.0).abs() < f64::EPSILON);
        assert_eq!(moved.direction, Direction::Right);
        assert_eq!(moved.session_id, start.session_id);

        let end = tracker.process(sample(InputKind::End, vec![touch(1, 10.0, 0.0)], &[1], 150.0));
        assert!(end.is_final);
        assert_eq!(end.session_id, start.session_id);
    }

    #[test]
    fn test_final_keeps_session_until_next_start() {
        let mut tracker = GestureTracker::default();
        tracker.process(sample(InputKind::Start, vec![touch(1, 0.0, 0.0)], &[1], 0.0));
        tracker.process(sample(InputKind::End, vec![touch(1, 5.0, 0.0)], &[1], 10.0));

        let ended = tracker.session().clone();
        assert!(ended.first_input.is_some());

        let next = tracker.process(sample(InputKind::Start, vec![touch(2, 50.0, 50.0)], &[2], 500.0));
        assert!(next.is_first);
        assert_ne!(next.session_id, ended.id);
        assert_eq!(tracker.session().first_input.as_ref().unwrap().center, Point::new(50.0, 50.0));
        assert!(next.delta_time.abs() < f64::EPSILON);
    }

    #[test]
    fn test_pinch_gesture() {
        let mut tracker = GestureTracker::default();
        let a = touch(1, 0.0, 0.0);

        tracker.process(sample(InputKind::Start, vec![a], &[1], 0.0));
        let joined = tracker.process(sample(InputKind::Start, vec![a, touch(2, 10.0, 0.0)], &[2], 10.0));
        assert!(!joined.is_first);
        assert!((joined.scale - 1.0).abs() < f64::EPSILON);

        let spread = tracker.process(sample(InputKind::Move, vec![a, touch(2, 20.0, 0.0)], &[2], 20.0));
        assert!((spread.scale - 2.0).abs() < f64::EPSILON);
        assert_eq!(spread.max_pointers, 2);

        let lifted = tracker.process(sample(InputKind::End, vec![a, touch(2, 20.0, 0.0)], &[2], 30.0));
        assert!(!lifted.is_final);
        assert!((lifted.scale - 2.0).abs() < f64::EPSILON);

        let single = tracker.process(sample(InputKind::Move, vec![a], &[1], 40.0));
        assert!((single.scale - 1.0).abs() < f64::EPSILON);
        assert!(tracker.session().first_multiple.is_none());
    }

    #[test]
    fn test_cancel_does_not_reset_session() {
        let mut tracker = GestureTracker::new(VelocityMode::Placeholder, false);
        let start = tracker.process(sample(InputKind::Start, vec![touch(1, 0.0, 0.0)], &[1], 0.0));
        let cancel = tracker.process(sample(InputKind::Cancel, vec![touch(1, 0.0, 0.0)], &[1], 5.0));
        assert!(!cancel.is_final);
        assert_eq!(cancel.session_id, start.session_id);

        let mut tracker = GestureTracker::new(VelocityMode::Placeholder, true);
        tracker.process(sample(InputKind::Start, vec![touch(1, 0.0, 0.0)], &[1], 0.0));
        let cancel = tracker.process(sample(InputKind::Cancel, vec![touch(1, 0.0, 0.0)], &[1], 5.0));
        assert!(cancel.is_final);
    }
}
