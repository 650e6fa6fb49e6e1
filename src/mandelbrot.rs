//! Escape-time iteration of `z → z² + c`.

use crate::pixel::Complex;

/// A low iteration budget keeps every redraw interactive.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Squared escape radius. Once `|z| > 2` the orbit is guaranteed to diverge.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mandelbrot {
    pub max_iterations: u32,
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Where an orbit stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Escape {
    /// Completed iterations before `z` left the escape radius.
    pub iteration_count: u32,
    /// The first orbit value outside the escape radius, or the last one computed
    /// when the budget ran out.
    pub value: Complex,
}

impl Mandelbrot {
    pub fn new(max_iterations: u32) -> Self {
        assert!(max_iterations > 0, "iteration budget must be positive");
        Self { max_iterations }
    }

    pub fn escape(&self, c: Complex) -> Escape {
        let (mut zr, mut zi) = (c.real, c.imaginary);
        let mut iteration_count = 0;

        while iteration_count < self.max_iterations {
            let (zr2, zi2) = (zr * zr, zi * zi);
            if zr2 + zi2 > ESCAPE_RADIUS_SQR {
                break;
            }
            zi = 2.0 * zr * zi + c.imaginary;
            zr = zr2 - zi2 + c.real;
            iteration_count += 1;
        }

        Escape {
            iteration_count,
            value: Complex::new(zr, zi),
        }
    }

    /// Points that never leave the escape radius within the budget are treated
    /// as members of the set.
    pub fn is_inside(&self, escape: &Escape) -> bool {
        escape.iteration_count == self.max_iterations
    }
}
