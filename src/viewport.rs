/*!
Viewport state and the pixel to complex-plane transform.

A pixel `(x, y)` on a `width × height` surface maps to

```text
cr = (x - width / 2)  * span / (width * zoom)           + offset.real
ci = (y - height / 2) * span * aspect / (height * zoom) + offset.imaginary
```

where `aspect = height / width` keeps pixels square and `span` is the width of
the plane shown at `zoom = 1`.
*/

use crate::{
    pixel::Complex,
    screen::{self, Position},
};

/// Width of the complex plane spanned by the surface at `zoom = 1`.
pub const PLANE_SPAN: f64 = 3.0;

pub const DEFAULT_ZOOM_IN_FACTOR: f64 = 1.1;
pub const DEFAULT_ZOOM_OUT_FACTOR: f64 = 0.9;

/// Which region of the complex plane is on screen.
///
/// `zoom` is always positive and finite: it only ever changes by multiplication
/// with a factor from [`ZoomFactors`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pub offset: Complex,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Complex::new(-0.5, 0.0),
        }
    }
}

/// Surface geometry a viewport is projected onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub size: screen::Size,
    pub plane_span: f64,
}

impl Frame {
    #[cfg(test)]
    pub fn new(size: screen::Size) -> Self {
        Self::with_plane_span(size, PLANE_SPAN)
    }

    pub fn with_plane_span(size: screen::Size, plane_span: f64) -> Self {
        assert!(
            plane_span > 0.0 && plane_span.is_finite(),
            "plane span must be positive, got {}",
            plane_span
        );
        Self { size, plane_span }
    }

    fn centre(&self) -> Position {
        Position::new(
            self.size.width as f64 / 2.0,
            self.size.height as f64 / 2.0,
        )
    }
}

/// Plane units per pixel along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zoom {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomFactors {
    zoom_in: f64,
    zoom_out: f64,
}

impl ZoomFactors {
    /// Panics unless `zoom_in > 1` and `0 < zoom_out < 1`.
    pub fn new(zoom_in: f64, zoom_out: f64) -> Self {
        assert!(
            zoom_in > 1.0 && zoom_in.is_finite(),
            "zoom-in factor must be greater than 1, got {}",
            zoom_in
        );
        assert!(
            zoom_out > 0.0 && zoom_out < 1.0,
            "zoom-out factor must be in (0, 1), got {}",
            zoom_out
        );
        Self { zoom_in, zoom_out }
    }

    pub fn factor(&self, zoom: Zoom) -> f64 {
        match zoom {
            Zoom::In => self.zoom_in,
            Zoom::Out => self.zoom_out,
        }
    }
}

impl Default for ZoomFactors {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_IN_FACTOR, DEFAULT_ZOOM_OUT_FACTOR)
    }
}

impl Viewport {
    pub fn new(zoom: f64, offset: Complex) -> Self {
        assert!(
            zoom > 0.0 && zoom.is_finite(),
            "zoom must be positive, got {}",
            zoom
        );
        Self { zoom, offset }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Whether every pixel of `frame` maps to a finite plane point.
    pub fn is_representable(&self, frame: &Frame) -> bool {
        let scale = self.scale(frame);
        scale.x.is_finite()
            && scale.y.is_finite()
            && self.offset.real.is_finite()
            && self.offset.imaginary.is_finite()
    }

    pub fn scale(&self, frame: &Frame) -> Scale {
        let width = frame.size.width as f64;
        let height = frame.size.height as f64;
        Scale {
            x: frame.plane_span / (width * self.zoom),
            y: frame.plane_span * frame.size.aspect() / (height * self.zoom),
        }
    }

    /// The plane point under the pixel position `position`.
    pub fn to_plane(&self, frame: &Frame, position: Position) -> Complex {
        let scale = self.scale(frame);
        let centre = frame.centre();
        Complex::new(
            (position.x - centre.x) * scale.x + self.offset.real,
            (position.y - centre.y) * scale.y + self.offset.imaginary,
        )
    }

    /**
    Zoom by one step, keeping the plane point under `cursor` where it is.

    If the result would leave the representable range (zoom, per-pixel scale or
    offset overflowing, or zoom underflowing to zero) the viewport is returned
    unchanged.
    */
    pub fn zoom_at(
        &self,
        frame: &Frame,
        cursor: Position,
        zoom: Zoom,
        factors: &ZoomFactors,
    ) -> Viewport {
        let new_zoom = self.zoom * factors.factor(zoom);
        if !(new_zoom > 0.0 && new_zoom.is_finite()) {
            return *self;
        }

        let anchor = self.to_plane(frame, cursor);
        let scale = Viewport {
            zoom: new_zoom,
            offset: Complex::ZERO,
        }
        .scale(frame);
        if !(scale.x.is_finite() && scale.y.is_finite()) {
            return *self;
        }
        let centre = frame.centre();

        let zoomed = Viewport {
            zoom: new_zoom,
            offset: Complex::new(
                anchor.real - (cursor.x - centre.x) * scale.x,
                anchor.imaginary - (cursor.y - centre.y) * scale.y,
            ),
        };
        if zoomed.is_representable(frame) {
            zoomed
        } else {
            *self
        }
    }

    /// Move the view by a pixel-space drag delta at the current scale.
    ///
    /// A pan that would make the offset non-finite leaves the viewport unchanged.
    pub fn pan_by(&self, frame: &Frame, delta_x: f64, delta_y: f64) -> Viewport {
        let scale = self.scale(frame);
        let panned = Viewport {
            zoom: self.zoom,
            offset: Complex::new(
                self.offset.real - delta_x * scale.x,
                self.offset.imaginary + delta_y * scale.y,
            ),
        };
        if panned.is_representable(frame) {
            panned
        } else {
            *self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(screen::Size::new(1280, 720))
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "{} is not within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn default_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.zoom(), 1.0);
        assert_eq!(viewport.offset, Complex::new(-0.5, 0.0));
    }

    #[test]
    fn centre_pixel_maps_to_offset() {
        let point = Viewport::default().to_plane(&frame(), Position::new(640.0, 360.0));
        assert_eq!(point, Complex::new(-0.5, 0.0));
    }

    #[test]
    fn pixels_are_square() {
        let scale = Viewport::default().scale(&frame());
        assert_close(scale.x, 3.0 / 1280.0);
        assert_close(scale.y, scale.x);
    }

    #[test]
    fn corner_pixel_mapping() {
        let point = Viewport::default().to_plane(&frame(), Position::new(0.0, 0.0));
        assert_close(point.real, -2.0);
        assert_close(point.imaginary, -360.0 * 3.0 / 1280.0);
    }

    #[test]
    fn zoom_in_at_centre_only_scales() {
        let viewport = Viewport::default().zoom_at(
            &frame(),
            Position::new(640.0, 360.0),
            Zoom::In,
            &ZoomFactors::default(),
        );
        assert_eq!(viewport.zoom(), 1.1);
        assert_eq!(viewport.offset, Complex::new(-0.5, 0.0));
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let frame = frame();
        let factors = ZoomFactors::default();
        let starts = [
            Viewport::default(),
            Viewport::new(37.5, Complex::new(-0.743643, 0.131825)),
            Viewport::new(0.02, Complex::new(4.0, -3.0)),
        ];
        let cursors = [
            Position::new(0.0, 0.0),
            Position::new(1279.0, 719.0),
            Position::new(100.5, 611.25),
            Position::new(640.0, 0.0),
        ];

        for start in starts {
            for cursor in cursors {
                for zoom in [Zoom::In, Zoom::Out] {
                    let before = start.to_plane(&frame, cursor);
                    let after = start
                        .zoom_at(&frame, cursor, zoom, &factors)
                        .to_plane(&frame, cursor);
                    assert_close(after.real, before.real);
                    assert_close(after.imaginary, before.imaginary);
                }
            }
        }
    }

    #[test]
    fn repeated_zoom_is_monotonic() {
        let frame = frame();
        let factors = ZoomFactors::default();
        let cursor = Position::new(200.0, 100.0);

        let mut viewport = Viewport::default();
        for _ in 0..50 {
            let next = viewport.zoom_at(&frame, cursor, Zoom::In, &factors);
            assert!(next.zoom() > viewport.zoom());
            viewport = next;
        }

        let mut viewport = Viewport::default();
        for _ in 0..50 {
            let next = viewport.zoom_at(&frame, cursor, Zoom::Out, &factors);
            assert!(next.zoom() < viewport.zoom());
            assert!(next.zoom() > 0.0);
            viewport = next;
        }
    }

    #[test]
    fn zoom_never_reaches_zero() {
        let frame = frame();
        let factors = ZoomFactors::default();
        let mut viewport = Viewport::new(1e-300, Complex::ZERO);
        for _ in 0..10_000 {
            viewport = viewport.zoom_at(&frame, Position::new(0.0, 0.0), Zoom::Out, &factors);
            assert!(viewport.zoom() > 0.0);
            assert!(viewport.offset.real.is_finite());
            assert!(viewport.offset.imaginary.is_finite());
        }
    }

    #[test]
    fn drag_right_moves_view_left() {
        let frame = frame();
        let viewport = Viewport::default().pan_by(&frame, 128.0, 0.0);
        assert_close(viewport.offset.real, -0.5 - 128.0 * 3.0 / 1280.0);
        assert_eq!(viewport.offset.imaginary, 0.0);
        assert_eq!(viewport.zoom(), 1.0);
    }

    #[test]
    fn drag_down_increases_imaginary_offset() {
        let viewport = Viewport::default().pan_by(&frame(), 0.0, 64.0);
        assert!(viewport.offset.imaginary > 0.0);
        assert_eq!(viewport.offset.real, -0.5);
    }

    #[test]
    fn pans_compose() {
        let frame = frame();
        let start = Viewport::new(3.0, Complex::new(0.25, -0.1));
        let stepwise = start.pan_by(&frame, 12.0, -7.0).pan_by(&frame, -40.5, 19.0);
        let single = start.pan_by(&frame, 12.0 - 40.5, -7.0 + 19.0);
        assert_close(stepwise.offset.real, single.offset.real);
        assert_close(stepwise.offset.imaginary, single.offset.imaginary);
    }

    #[test]
    fn plane_span_sets_visible_width() {
        let frame = Frame::with_plane_span(screen::Size::new(100, 100), 4.0);
        let viewport = Viewport::new(1.0, Complex::ZERO);
        assert_close(viewport.to_plane(&frame, Position::new(0.0, 50.0)).real, -2.0);
    }

    #[test]
    fn pan_at_overflowing_scale_is_ignored() {
        let frame = frame();
        let viewport = Viewport::new(1e-320, Complex::new(-0.5, 0.0));
        assert!(!viewport.is_representable(&frame));

        let panned = viewport.pan_by(&frame, 1.0, 0.0);
        assert_eq!(panned, viewport);
        assert!(panned.offset.real.is_finite());
        assert!(panned.offset.imaginary.is_finite());
    }

    #[test]
    fn pan_that_overflows_offset_is_ignored() {
        let frame = frame();
        let viewport = Viewport::new(1.0, Complex::new(-f64::MAX, 0.0));
        assert_eq!(viewport.pan_by(&frame, 1e300, 0.0), viewport);
    }

    #[test]
    fn representable_viewports() {
        let frame = frame();
        assert!(Viewport::default().is_representable(&frame));
        assert!(Viewport::new(1e-300, Complex::ZERO).is_representable(&frame));
        assert!(!Viewport::new(1e-320, Complex::ZERO).is_representable(&frame));
    }

    #[test]
    #[should_panic(expected = "zoom-out factor")]
    fn zoom_out_factor_must_shrink() {
        ZoomFactors::new(1.1, 1.0);
    }

    #[test]
    #[should_panic(expected = "zoom must be positive")]
    fn zero_zoom_is_rejected() {
        Viewport::new(0.0, Complex::ZERO);
    }
}
