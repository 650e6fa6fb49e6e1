use crate::{pixel::Rgba, screen};

/// Somewhere to show a finished frame.
pub trait Sink {
    /// `pixels` is row-major from the top-left and holds exactly
    /// `size.pixel_count()` entries.
    fn submit(&mut self, pixels: &[Rgba], size: screen::Size) -> anyhow::Result<()>;
}
