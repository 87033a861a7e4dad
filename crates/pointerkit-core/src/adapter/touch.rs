//! Touch adapter, also covering pens reported as touches.

use super::{InputAdapter, build_sample};
use crate::sample::{InputKind, PointerId, PointerType, RawPointer, RawSample};
use kurbo::Point;
use winit::event::{Force, Touch, TouchPhase, WindowEvent};

/// Tracks the touches that are down, in the order they went down.
#[derive(Debug, Clone, Default)]
pub struct TouchAdapter {
    active: bool,
    touches: Vec<RawPointer>,
}

impl TouchAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of touches currently down.
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    fn index_of(&self, id: PointerId) -> Option<usize> {
        self.touches.iter().position(|p| p.id == id)
    }

    fn on_touch(&mut self, touch: &Touch, timestamp: f64) -> Option<RawSample> {
        let pointer = touch_pointer(touch);

        let (kind, index) = match touch.phase {
            TouchPhase::Started => match self.index_of(pointer.id) {
                Some(index) => (InputKind::Start, index),
                None => {
                    self.touches.push(pointer);
                    (InputKind::Start, self.touches.len() - 1)
                }
            },
            TouchPhase::Moved => (InputKind::Move, self.known_index(pointer.id)?),
            TouchPhase::Ended => (InputKind::End, self.known_index(pointer.id)?),
            TouchPhase::Cancelled => (InputKind::Cancel, self.known_index(pointer.id)?),
        };
        self.touches[index] = pointer;

        let sample = build_sample(kind, self.touches.clone(), vec![pointer], timestamp);
        if matches!(kind, InputKind::End | InputKind::Cancel) {
            self.touches.remove(index);
        }
        sample
    }

    fn known_index(&self, id: PointerId) -> Option<usize> {
        let index = self.index_of(id);
        if index.is_none() {
            log::warn!("Ignoring event for unknown touch {:?}", id);
        }
        index
    }
}

fn touch_pointer(touch: &Touch) -> RawPointer {
    let pointer_type = match touch.force {
        Some(Force::Calibrated {
            altitude_angle: Some(_),
            ..
        }) => PointerType::Pen,
        _ => PointerType::Touch,
    };
    let pointer = RawPointer::new(
        PointerId(touch.id),
        Point::new(touch.location.x, touch.location.y),
        pointer_type,
    );
    match touch.force {
        Some(force) => pointer.with_pressure(force.normalized()),
        None => pointer,
    }
}

impl InputAdapter for TouchAdapter {
    fn start(&mut self) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
        self.touches.clear();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn on_event(&mut self, event: &WindowEvent, timestamp: f64) -> Option<RawSample> {
        if !self.active {
            return None;
        }
        match event {
            WindowEvent::Touch(touch) => self.on_touch(touch, timestamp),
            _ => None,
        }
    }
}
