//! Colouring algorithms.

use crate::{
    mandelbrot::{Escape, Mandelbrot},
    pixel::Rgba,
};

/**
Smooth (continuous) colouring ([Wikipedia](https://en.wikipedia.org/wiki/Plotting_algorithms_for_the_Mandelbrot_set#Continuous_(smooth)_coloring)).

The integer iteration count is refined into a fractional one using how far past
the escape radius the orbit landed:

```text
log_zn = ln |z|² / 2
nu     = log2(log_zn / ln 2)
t      = (i + 1 - nu) / max_iterations
```

`t` is then shaped per channel: `r = t^0.3`, `g = t^0.6`, `b = 1 - (1 - t)^4`.

Orbits that escape far beyond the radius can push `t` below zero, where the
fractional powers are undefined. Each channel is floored, clamped to `[0, 255]`,
and replaced by `0` when not finite.
*/
pub fn smooth(mandelbrot: &Mandelbrot, escape: &Escape) -> Rgba {
    if mandelbrot.is_inside(escape) {
        return Rgba::BLACK;
    }

    let t = escape_fraction(mandelbrot, escape);
    Rgba::opaque(
        channel(t.powf(0.3)),
        channel(t.powf(0.6)),
        channel(1.0 - (1.0 - t).powi(4)),
    )
}

/// Continuous escape iteration divided by the budget.
pub fn escape_fraction(mandelbrot: &Mandelbrot, escape: &Escape) -> f64 {
    let log_zn = escape.value.norm_sqr().ln() / 2.0;
    let nu = (log_zn / std::f64::consts::LN_2).log2();
    let smooth = escape.iteration_count as f64 + 1.0 - nu;
    smooth / mandelbrot.max_iterations as f64
}

fn channel(intensity: f64) -> u8 {
    let value = (255.0 * intensity).floor();
    if value.is_finite() {
        value.clamp(0.0, 255.0) as u8
    } else {
        0
    }
}
