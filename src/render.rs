use log::trace;

use crate::{
    colour,
    mandelbrot::Mandelbrot,
    pixel::{Complex, Rgba},
    viewport::{Frame, Viewport},
};

/// Fill `pixels` with the image of `viewport`, row-major from the top-left.
///
/// `pixels` is resized to the frame's pixel count, so the same buffer can be
/// reused across frames.
pub fn render_into(
    viewport: &Viewport,
    frame: &Frame,
    mandelbrot: &Mandelbrot,
    pixels: &mut Vec<Rgba>,
) {
    trace!("begin render");

    let size = frame.size;
    pixels.clear();
    pixels.reserve(size.pixel_count());

    // Same mapping as `Viewport::to_plane`, hoisted out of the pixel loop.
    let scale = viewport.scale(frame);
    let half_width = size.width as f64 / 2.0;
    let half_height = size.height as f64 / 2.0;

    for y in 0..size.height {
        let imaginary = (y as f64 - half_height) * scale.y + viewport.offset.imaginary;
        for x in 0..size.width {
            let real = (x as f64 - half_width) * scale.x + viewport.offset.real;
            let escape = mandelbrot.escape(Complex::new(real, imaginary));
            pixels.push(colour::smooth(mandelbrot, &escape));
        }
    }

    debug_assert_eq!(pixels.len(), size.pixel_count());
    trace!("end render");
}

#[cfg(test)]
pub fn render(viewport: &Viewport, frame: &Frame, mandelbrot: &Mandelbrot) -> Vec<Rgba> {
    let mut pixels = Vec::new();
    render_into(viewport, frame, mandelbrot, &mut pixels);
    pixels
}
