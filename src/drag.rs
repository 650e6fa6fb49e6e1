use crate::screen::Position;

/// Pointer drag gesture.
///
/// Each move reports the offset from the previous pointer position, not from
/// where the gesture started.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Drag {
    #[default]
    Idle,
    Dragging {
        last: Position,
    },
}

impl Drag {
    pub fn press(&mut self, position: Position) {
        *self = Drag::Dragging { last: position };
    }

    /// Returns the pixel delta `(dx, dy)` since the last recorded position when
    /// dragging.
    pub fn move_to(&mut self, position: Position) -> Option<(f64, f64)> {
        match self {
            Drag::Idle => None,
            Drag::Dragging { last } => {
                let delta = (position.x - last.x, position.y - last.y);
                *last = position;
                Some(delta)
            }
        }
    }

    pub fn release(&mut self) {
        *self = Drag::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Drag::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_are_ignored_when_idle() {
        let mut drag = Drag::default();
        assert_eq!(drag.move_to(Position::new(10.0, 10.0)), None);
        assert_eq!(drag, Drag::Idle);
    }

    #[test]
    fn deltas_are_incremental() {
        let mut drag = Drag::default();
        drag.press(Position::new(100.0, 100.0));
        assert!(drag.is_dragging());
        assert_eq!(drag.move_to(Position::new(110.0, 95.0)), Some((10.0, -5.0)));
        assert_eq!(drag.move_to(Position::new(115.0, 95.0)), Some((5.0, 0.0)));
        assert_eq!(
            drag,
            Drag::Dragging {
                last: Position::new(115.0, 95.0)
            }
        );
    }

    #[test]
    fn release_ends_gesture() {
        let mut drag = Drag::default();
        drag.press(Position::new(1.0, 2.0));
        drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(drag.move_to(Position::new(5.0, 5.0)), None);
    }

    #[test]
    fn pressing_again_restarts_from_new_position() {
        let mut drag = Drag::default();
        drag.press(Position::new(0.0, 0.0));
        drag.press(Position::new(50.0, 50.0));
        assert_eq!(drag.move_to(Position::new(51.0, 50.0)), Some((1.0, 0.0)));
    }
}
