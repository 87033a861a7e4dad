//! Adapters that turn winit window events into raw samples.
//!
//! Each adapter covers one input modality. They share the small
//! [`InputAdapter`] interface and are picked once through [`create_adapter`].

mod hybrid;
mod mouse;
mod touch;

pub use hybrid::HybridAdapter;
pub use mouse::MouseAdapter;
pub use touch::TouchAdapter;

use crate::config::{AdapterKind, InputConfig};
use crate::sample::{InputKind, RawPointer, RawSample};
use winit::event::WindowEvent;

/// Translates platform events of one modality into raw samples.
pub trait InputAdapter {
    /// Start accepting events.
    fn start(&mut self);

    /// Stop accepting events and forget any pointers still down.
    fn stop(&mut self);

    /// Whether the adapter currently accepts events.
    fn is_active(&self) -> bool;

    /// Translate one window event at `timestamp` (milliseconds).
    ///
    /// Returns `None` for events this adapter ignores.
    fn on_event(&mut self, event: &WindowEvent, timestamp: f64) -> Option<RawSample>;
}

/// The closed set of adapters.
#[derive(Debug, Clone)]
pub enum Adapter {
    Mouse(MouseAdapter),
    Touch(TouchAdapter),
    Hybrid(HybridAdapter),
}

impl Adapter {
    pub fn kind(&self) -> AdapterKind {
        match self {
            Adapter::Mouse(_) => AdapterKind::Mouse,
            Adapter::Touch(_) => AdapterKind::Touch,
            Adapter::Hybrid(_) => AdapterKind::Hybrid,
        }
    }

    fn inner(&self) -> &dyn InputAdapter {
        match self {
            Adapter::Mouse(adapter) => adapter,
            Adapter::Touch(adapter) => adapter,
            Adapter::Hybrid(adapter) => adapter,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn InputAdapter {
        match self {
            Adapter::Mouse(adapter) => adapter,
            Adapter::Touch(adapter) => adapter,
            Adapter::Hybrid(adapter) => adapter,
        }
    }
}

impl InputAdapter for Adapter {
    fn start(&mut self) {
        self.inner_mut().start();
    }

    fn stop(&mut self) {
        self.inner_mut().stop();
    }

    fn is_active(&self) -> bool {
        self.inner().is_active()
    }

    fn on_event(&mut self, event: &WindowEvent, timestamp: f64) -> Option<RawSample> {
        self.inner_mut().on_event(event, timestamp)
    }
}

/// Build the adapter of the given kind. The adapter starts out stopped.
pub fn create_adapter(kind: AdapterKind, config: &InputConfig) -> Adapter {
    log::debug!("Creating {:?} input adapter", kind);
    match kind {
        AdapterKind::Mouse => Adapter::Mouse(MouseAdapter::new()),
        AdapterKind::Touch => Adapter::Touch(TouchAdapter::new()),
        AdapterKind::Hybrid => Adapter::Hybrid(HybridAdapter::new(config.dedup_timeout_ms, config.dedup_distance)),
    }
}

/// Assemble a sample, logging and dropping it if the adapter produced an
/// inconsistent pointer set.
fn build_sample(
    kind: InputKind,
    pointers: Vec<RawPointer>,
    changed: Vec<RawPointer>,
    timestamp: f64,
) -> Option<RawSample> {
    match RawSample::new(kind, pointers, changed, timestamp) {
        Ok(sample) => Some(sample),
        Err(e) => {
            log::warn!("Dropping {:?} event: {}", kind, e);
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_events::*;
    use super::*;
    use winit::event::{ElementState, TouchPhase};

    #[test]
    fn test_factory_builds_requested_kind() {
        let config = InputConfig::default();
        for kind in [AdapterKind::Mouse, AdapterKind::Touch, AdapterKind::Hybrid] {
            let adapter = create_adapter(kind, &config);
            assert_eq!(adapter.kind(), kind);
            assert!(!adapter.is_active());
        }
    }

    #[test]
    fn test_stopped_adapter_ignores_events() {
        let mut adapter = create_adapter(AdapterKind::Touch, &InputConfig::default());
        assert!(adapter.on_event(&touch(1, TouchPhase::Started, 0.0, 0.0), 0.0).is_none());

        adapter.start();
        assert!(adapter.on_event(&touch(1, TouchPhase::Started, 0.0, 0.0), 0.0).is_some());

        adapter.stop();
        assert!(adapter.on_event(&touch(1, TouchPhase::Moved, 5.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn test_enum_dispatch_reaches_mouse() {
        let mut adapter = create_adapter(AdapterKind::Mouse, &InputConfig::default());
        adapter.start();
        adapter.on_event(&cursor(3.0, 4.0), 0.0);
        let sample = adapter.on_event(&left(ElementState::Pressed), 1.0).unwrap();
        assert_eq!(sample.kind(), InputKind::Start);
    }
}
