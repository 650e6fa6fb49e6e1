/// Dimensions of the pixel surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Panics when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "surface must have a non-zero area, got {}x{}",
            width,
            height
        );
        Self { width, height }
    }

    /// `None` for a zero-area surface, e.g. a minimised window.
    pub fn try_new(width: u32, height: u32) -> Option<Self> {
        if width > 0 && height > 0 {
            Some(Self { width, height })
        } else {
            None
        }
    }

    pub fn aspect(&self) -> f64 {
        self.height as f64 / self.width as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A position on the surface in pixels, measured from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_height_over_width() {
        let size = Size::new(1280, 720);
        assert_eq!(size.aspect(), 0.5625);
        assert_eq!(size.pixel_count(), 921_600);
    }

    #[test]
    #[should_panic(expected = "non-zero area")]
    fn zero_width_is_rejected() {
        Size::new(0, 720);
    }

    #[test]
    fn minimised_surface_has_no_size() {
        assert_eq!(Size::try_new(0, 0), None);
        assert_eq!(Size::try_new(1, 0), None);
        assert_eq!(Size::try_new(3, 2), Some(Size::new(3, 2)));
    }
}
