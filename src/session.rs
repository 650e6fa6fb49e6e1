use std::time::Instant;

use log::{debug, trace};

use crate::{
    drag::Drag,
    input::Input,
    mandelbrot::Mandelbrot,
    pixel::Rgba,
    render, screen,
    sink::Sink,
    viewport::{Frame, Viewport, ZoomFactors},
};

/// A viewing session: the one viewport, the drag gesture acting on it, and the
/// buffer it is rendered into.
pub struct Session {
    viewport: Viewport,
    drag: Drag,
    frame: Frame,
    mandelbrot: Mandelbrot,
    zoom_factors: ZoomFactors,
    pixels: Vec<Rgba>,
}

impl Session {
    pub fn new(
        viewport: Viewport,
        frame: Frame,
        mandelbrot: Mandelbrot,
        zoom_factors: ZoomFactors,
    ) -> Self {
        Self {
            viewport,
            drag: Drag::default(),
            frame,
            mandelbrot,
            zoom_factors,
            pixels: Vec::with_capacity(frame.size.pixel_count()),
        }
    }

    #[cfg(test)]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[cfg(test)]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Apply one input event. Returns `true` when the viewport changed and the
    /// image needs redrawing.
    pub fn handle(&mut self, input: Input) -> bool {
        let viewport = match input {
            Input::Wheel { zoom, cursor } => {
                self.viewport
                    .zoom_at(&self.frame, cursor, zoom, &self.zoom_factors)
            }
            Input::PointerDown(position) => {
                self.drag.press(position);
                return false;
            }
            Input::PointerMove(position) => match self.drag.move_to(position) {
                Some((delta_x, delta_y)) => self.viewport.pan_by(&self.frame, delta_x, delta_y),
                None => return false,
            },
            Input::PointerUp | Input::PointerLeave => {
                self.drag.release();
                return false;
            }
        };

        if viewport == self.viewport {
            return false;
        }
        debug!(
            "viewport: zoom {}, offset ({}, {})",
            viewport.zoom(),
            viewport.offset.real,
            viewport.offset.imaginary
        );
        self.viewport = viewport;
        true
    }

    /// Returns `true` when the size differs from the current one.
    pub fn resize(&mut self, size: screen::Size) -> bool {
        if size == self.frame.size {
            return false;
        }
        debug!("resizing to {}x{}", size.width, size.height);
        self.frame = Frame::with_plane_span(size, self.frame.plane_span);
        true
    }

    /// Render the current viewport and hand the result to `sink`.
    pub fn redraw(&mut self, sink: &mut impl Sink) -> anyhow::Result<()> {
        let start = Instant::now();
        render::render_into(&self.viewport, &self.frame, &self.mandelbrot, &mut self.pixels);
        trace!(
            "rendered {}x{} in {:?}",
            self.frame.size.width,
            self.frame.size.height,
            start.elapsed()
        );
        sink.submit(&self.pixels, self.frame.size)
    }
}
