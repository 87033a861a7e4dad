//! Input pipeline: adapter, gesture tracking and the update callback.

use crate::adapter::{Adapter, InputAdapter, create_adapter};
use crate::config::{AdapterKind, Capabilities, InputConfig};
use crate::lifecycle::GestureTracker;
use crate::sample::{EnrichedSample, RawSample};
use winit::event::WindowEvent;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Monotonic millisecond clock starting at creation.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since the clock was created.
    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Callback receiving every enriched sample.
pub type UpdateHandler = Box<dyn FnMut(&EnrichedSample)>;

/// Routes window events through an adapter and the gesture tracker, handing
/// each enriched sample to the update callback as soon as it is produced.
pub struct PointerInput {
    adapter: Adapter,
    tracker: GestureTracker,
    clock: Clock,
    handler: UpdateHandler,
}

impl PointerInput {
    /// Build the pipeline, selecting the adapter from `capabilities` unless
    /// the config forces one. The pipeline starts out stopped.
    pub fn new<F>(config: &InputConfig, capabilities: Capabilities, handler: F) -> Self
    where
        F: FnMut(&EnrichedSample) + 'static,
    {
        let kind = config.adapter_kind(capabilities);
        Self {
            adapter: create_adapter(kind, config),
            tracker: GestureTracker::new(config.velocity, config.cancel_is_final),
            clock: Clock::new(),
            handler: Box::new(handler),
        }
    }

    pub fn adapter_kind(&self) -> AdapterKind {
        self.adapter.kind()
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    /// Begin accepting events.
    pub fn start(&mut self) {
        log::info!("Listening for {:?} input", self.adapter.kind());
        self.adapter.start();
    }

    /// Stop accepting events. Pointers still down are forgotten.
    pub fn stop(&mut self) {
        log::info!("Stopped listening for {:?} input", self.adapter.kind());
        self.adapter.stop();
    }

    pub fn is_active(&self) -> bool {
        self.adapter.is_active()
    }

    /// Handle a window event stamped with the pipeline clock.
    ///
    /// Returns whether a sample was emitted.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        let timestamp = self.clock.now_ms();
        self.handle_window_event_at(event, timestamp)
    }

    /// Handle a window event with an explicit timestamp in milliseconds.
    pub fn handle_window_event_at(&mut self, event: &WindowEvent, timestamp: f64) -> bool {
        match self.adapter.on_event(event, timestamp) {
            Some(sample) => {
                self.handle_sample(sample);
                true
            }
            None => false,
        }
    }

    /// Feed a sample produced outside the built-in adapters.
    pub fn handle_sample(&mut self, sample: RawSample) {
        let enriched = self.tracker.process(sample);
        (self.handler)(&enriched);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::test_events::*;
    use crate::geometry::Direction;
    use crate::sample::{InputKind, PointerId, PointerType, RawPointer};
    use kurbo::Point;
    use std::cell::RefCell;
    use std::rc::Rc;
    use winit::event::{ElementState, TouchPhase};

    fn recording(config: InputConfig) -> (PointerInput, Rc<RefCell<Vec<EnrichedSample>>>) {
        let samples = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&samples);
        let capabilities = Capabilities { touch: true, mouse: true };
        let mut input = PointerInput::new(&config, capabilities, move |sample| {
            sink.borrow_mut().push(sample.clone())
        });
        input.start();
        (input, samples)
    }

    #[test]
    fn test_selects_adapter_from_capabilities() {
        let (input, _) = recording(InputConfig::default());
        assert_eq!(input.adapter_kind(), AdapterKind::Hybrid);

        let forced = InputConfig { adapter: Some(AdapterKind::Touch), ..InputConfig::default() };
        let (input, _) = recording(forced);
        assert_eq!(input.adapter_kind(), AdapterKind::Touch);
    }

    #[test]
    fn test_one_callback_per_event() {
        let (mut input, samples) = recording(InputConfig::default());

        assert!(!input.handle_window_event_at(&cursor(0.0, 0.0), 0.0));
        assert!(input.handle_window_event_at(&left(ElementState::Pressed), 0.0));
        assert!(input.handle_window_event_at(&cursor(10.0, 0.0), 100.0));
        assert!(input.handle_window_event_at(&left(ElementState::Released), 120.0));

        let samples = samples.borrow();
        assert_eq!(samples.len(), 3);
        assert!(samples[0].is_first);
        assert!((samples[1].delta_x - 10.0).abs() < f64::EPSILON);
        assert!((samples[1].delta_time - 100.0).abs() < f64::EPSILON);
        assert_eq!(samples[1].direction, Direction::Right);
        assert!(samples[2].is_final);
    }

    #[test]
    fn test_touch_pinch_end_to_end() {
        let (mut input, samples) = recording(InputConfig::default());

        input.handle_window_event_at(&touch(1, TouchPhase::Started, 0.0, 0.0), 0.0);
        input.handle_window_event_at(&touch(2, TouchPhase::Started, 10.0, 0.0), 10.0);
        input.handle_window_event_at(&touch(2, TouchPhase::Moved, 20.0, 0.0), 20.0);
        input.handle_window_event_at(&touch(2, TouchPhase::Ended, 20.0, 0.0), 30.0);
        input.handle_window_event_at(&touch(1, TouchPhase::Ended, 0.0, 0.0), 40.0);

        let samples = samples.borrow();
        assert_eq!(samples.len(), 5);
        assert!(samples[0].is_first);
        assert!(!samples[1].is_first);
        assert!((samples[2].scale - 2.0).abs() < f64::EPSILON);
        assert!(!samples[3].is_final);
        assert!(samples[4].is_final);
        assert!((samples[4].scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(samples[4].max_pointers, 2);
        assert!(samples.iter().all(|s| s.session_id == samples[0].session_id));
    }

    #[test]
    fn test_stopped_pipeline_emits_nothing() {
        let (mut input, samples) = recording(InputConfig::default());
        input.stop();
        assert!(!input.is_active());
        assert!(!input.handle_window_event_at(&touch(1, TouchPhase::Started, 0.0, 0.0), 0.0));
        assert!(samples.borrow().is_empty());
    }

    #[test]
    fn test_external_samples() {
        let (mut input, samples) = recording(InputConfig::default());
        let pointer = RawPointer::new(PointerId(9), Point::new(3.0, 3.0), PointerType::Pen);
        input.handle_sample(RawSample::new(InputKind::Start, vec![pointer], vec![pointer], 0.0).unwrap());

        assert_eq!(samples.borrow().len(), 1);
        assert!(input.tracker().session().first_input.is_some());
    }

    #[test]
    fn test_mouse_drag_interrupted_by_touch_still_ends() {
        let (mut input, samples) = recording(InputConfig::default());

        input.handle_window_event_at(&cursor(500.0, 500.0), 0.0);
        assert!(input.handle_window_event_at(&left(ElementState::Pressed), 0.0));
        assert!(input.handle_window_event_at(&cursor(510.0, 500.0), 10.0));
        assert!(input.handle_window_event_at(&touch(1, TouchPhase::Started, 50.0, 50.0), 20.0));
        assert!(input.handle_window_event_at(&left(ElementState::Released), 30.0));
        assert!(input.handle_window_event_at(&touch(1, TouchPhase::Ended, 50.0, 50.0), 40.0));

        let samples = samples.borrow();
        let mouse_end = samples
            .iter()
            .find(|s| s.kind() == InputKind::End && s.input.pointer_type() == PointerType::Mouse)
            .expect("mouse release should produce a sample");
        assert!(mouse_end.is_final);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = Clock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
