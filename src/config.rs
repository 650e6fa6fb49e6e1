use clap::{error::ErrorKind, CommandFactory, Parser};

use crate::{
    mandelbrot::{Mandelbrot, DEFAULT_MAX_ITERATIONS},
    pixel::Complex,
    screen,
    session::Session,
    viewport::{
        Frame, Viewport, ZoomFactors, DEFAULT_ZOOM_IN_FACTOR, DEFAULT_ZOOM_OUT_FACTOR, PLANE_SPAN,
    },
};

/// Pan with the left mouse button, zoom with the wheel.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "mandelbrot-viewer", version)]
pub struct Config {
    /// Initial surface width in pixels.
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Initial surface height in pixels.
    #[arg(long, default_value_t = 720, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Iteration budget per pixel.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_iterations: u32,

    /// Zoom multiplier for one wheel step up.
    #[arg(long, default_value_t = DEFAULT_ZOOM_IN_FACTOR, value_parser = greater_than_one)]
    pub zoom_in_factor: f64,

    /// Zoom multiplier for one wheel step down.
    #[arg(long, default_value_t = DEFAULT_ZOOM_OUT_FACTOR, value_parser = between_zero_and_one)]
    pub zoom_out_factor: f64,

    /// Width of the complex plane shown at zoom 1.
    #[arg(long, default_value_t = PLANE_SPAN, value_parser = positive)]
    pub plane_span: f64,

    /// Initial zoom.
    #[arg(long, default_value_t = 1.0, value_parser = positive)]
    pub zoom: f64,

    /// Initial real coordinate at the centre of the surface.
    #[arg(long, default_value_t = -0.5, allow_hyphen_values = true, value_parser = finite)]
    pub offset_x: f64,

    /// Initial imaginary coordinate at the centre of the surface.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true, value_parser = finite)]
    pub offset_y: f64,
}

impl Config {
    pub fn size(&self) -> screen::Size {
        screen::Size::new(self.width, self.height)
    }

    /// Fails when the initial view cannot be represented, e.g. a zoom so small
    /// that the per-pixel scale overflows.
    pub fn session(&self) -> Result<Session, clap::Error> {
        let viewport = Viewport::new(self.zoom, Complex::new(self.offset_x, self.offset_y));
        let frame = Frame::with_plane_span(self.size(), self.plane_span);
        if !viewport.is_representable(&frame) {
            return Err(Config::command().error(
                ErrorKind::ValueValidation,
                format!(
                    "zoom {} is too small for a {}x{} surface spanning {}",
                    self.zoom, self.width, self.height, self.plane_span
                ),
            ));
        }

        Ok(Session::new(
            viewport,
            frame,
            Mandelbrot::new(self.max_iterations),
            ZoomFactors::new(self.zoom_in_factor, self.zoom_out_factor),
        ))
    }
}

fn finite(value: &str) -> Result<f64, String> {
    let value: f64 = value.parse().map_err(|error| format!("{}", error))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} is not a finite number", value))
    }
}

fn positive(value: &str) -> Result<f64, String> {
    let value = finite(value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{} is not greater than 0", value))
    }
}

fn greater_than_one(value: &str) -> Result<f64, String> {
    let value = finite(value)?;
    if value > 1.0 {
        Ok(value)
    } else {
        Err(format!("{} is not greater than 1", value))
    }
}

fn between_zero_and_one(value: &str) -> Result<f64, String> {
    let value = finite(value)?;
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!("{} is not between 0 and 1", value))
    }
}
