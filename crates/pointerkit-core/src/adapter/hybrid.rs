//! Combined touch and mouse adapter.
//!
//! Platforms that emulate mouse events from touches would otherwise report
//! every tap twice. Mouse presses are dropped while a touch is down, and for
//! a while after one lifts close to where the press lands.

use super::{InputAdapter, MouseAdapter, TouchAdapter};
use crate::sample::{InputKind, RawSample};
use kurbo::Point;
use winit::event::WindowEvent;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Lift {
    position: Point,
    timestamp: f64,
}

#[derive(Debug, Clone)]
pub struct HybridAdapter {
    active: bool,
    touch: TouchAdapter,
    mouse: MouseAdapter,
    dedup_timeout_ms: f64,
    dedup_distance: f64,
    recent_lifts: Vec<Lift>,
}

impl HybridAdapter {
    pub fn new(dedup_timeout_ms: f64, dedup_distance: f64) -> Self {
        Self {
            active: false,
            touch: TouchAdapter::new(),
            mouse: MouseAdapter::new(),
            dedup_timeout_ms,
            dedup_distance,
            recent_lifts: Vec::new(),
        }
    }

    fn record_lifts(&mut self, sample: &RawSample) {
        let timestamp = sample.timestamp();
        self.recent_lifts
            .retain(|lift| timestamp - lift.timestamp <= self.dedup_timeout_ms);
        self.recent_lifts.extend(sample.changed_pointers().iter().map(|p| Lift {
            position: p.position(),
            timestamp,
        }));
    }

    /// Whether a mouse event at `position` is likely emulated from a touch.
    fn is_emulated(&self, position: Point, timestamp: f64) -> bool {
        self.touch.active_touches() > 0
            || self.recent_lifts.iter().any(|lift| {
                timestamp - lift.timestamp <= self.dedup_timeout_ms
                    && lift.position.distance(position) <= self.dedup_distance
            })
    }
}

impl InputAdapter for HybridAdapter {
    fn start(&mut self) {
        self.active = true;
        self.touch.start();
        self.mouse.start();
    }

    fn stop(&mut self) {
        self.active = false;
        self.touch.stop();
        self.mouse.stop();
        self.recent_lifts.clear();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn on_event(&mut self, event: &WindowEvent, timestamp: f64) -> Option<RawSample> {
        if !self.active {
            return None;
        }

        if let WindowEvent::Touch(_) = event {
            let sample = self.touch.on_event(event, timestamp)?;
            if matches!(sample.kind(), InputKind::End | InputKind::Cancel) {
                self.record_lifts(&sample);
            }
            return Some(sample);
        }

        // Only presses are filtered: once a press is accepted, its moves and
        // release always go through.
        let sample = self.mouse.on_event(event, timestamp)?;
        if sample.kind() == InputKind::Start && self.is_emulated(self.mouse.position(), timestamp) {
            log::trace!("Dropping emulated mouse press");
            self.mouse.abandon_press();
            return None;
        }
        Some(sample)
    }
}
