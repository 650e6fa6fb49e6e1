/*!
Input events the viewer reacts to, and their translation from `winit`.

`winit` only reports the cursor position on `CursorMoved`, so [`Translator`]
remembers it and attaches it to wheel and button events.
*/

use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::{screen::Position, viewport::Zoom};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    Wheel { zoom: Zoom, cursor: Position },
    PointerDown(Position),
    PointerMove(Position),
    PointerUp,
    PointerLeave,
}

/// Scrolling up (positive `y`) zooms in, scrolling down zooms out. Purely
/// horizontal scrolling is ignored.
pub fn wheel_zoom(delta: &MouseScrollDelta) -> Option<Zoom> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => *y as f64,
        MouseScrollDelta::PixelDelta(position) => position.y,
    };
    if y > 0.0 {
        Some(Zoom::In)
    } else if y < 0.0 {
        Some(Zoom::Out)
    } else {
        None
    }
}

#[derive(Debug, Default)]
pub struct Translator {
    cursor: Position,
}

impl Translator {
    pub fn translate(&mut self, event: &WindowEvent) -> Option<Input> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Position::new(position.x, position.y);
                Some(Input::PointerMove(self.cursor))
            }
            WindowEvent::MouseWheel { delta, .. } => wheel_zoom(delta).map(|zoom| Input::Wheel {
                zoom,
                cursor: self.cursor,
            }),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(match state {
                ElementState::Pressed => Input::PointerDown(self.cursor),
                ElementState::Released => Input::PointerUp,
            }),
            WindowEvent::CursorLeft { .. } => Some(Input::PointerLeave),
            _ => None,
        }
    }
}
