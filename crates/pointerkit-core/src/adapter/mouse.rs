//! Mouse adapter: the left button acts as a single pointer.

use super::{InputAdapter, build_sample};
use crate::sample::{InputKind, MOUSE_POINTER_ID, PointerType, RawPointer, RawSample};
use kurbo::Point;
use winit::event::{ElementState, MouseButton, WindowEvent};

#[derive(Debug, Clone, Default)]
pub struct MouseAdapter {
    active: bool,
    /// Last known cursor position.
    position: Point,
    pressed: bool,
}

impl MouseAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Forget the current press without emitting an end sample.
    pub(crate) fn abandon_press(&mut self) {
        self.pressed = false;
    }

    fn sample(&self, kind: InputKind, timestamp: f64) -> Option<RawSample> {
        let pointer = RawPointer::new(MOUSE_POINTER_ID, self.position, PointerType::Mouse);
        build_sample(kind, vec![pointer], vec![pointer], timestamp)
    }
}

impl InputAdapter for MouseAdapter {
    fn start(&mut self) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
        self.pressed = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn on_event(&mut self, event: &WindowEvent, timestamp: f64) -> Option<RawSample> {
        if !self.active {
            return None;
        }

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.position = Point::new(position.x, position.y);
                if !self.pressed {
                    return None;
                }
                self.sample(InputKind::Move, timestamp)
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed if !self.pressed => {
                    self.pressed = true;
                    self.sample(InputKind::Start, timestamp)
                }
                ElementState::Released if self.pressed => {
                    self.pressed = false;
                    self.sample(InputKind::End, timestamp)
                }
                _ => None,
            },
            _ => None,
        }
    }
}
