//! Footprint queries answered by the rendering collaborator.
//!
//! A layer's footprint is the width its on-screen representation currently
//! occupies along the sibling axis. It changes as the renderer expands or
//! collapses the layer, so the layout engine never stores it: every packing
//! pass asks a [`FootprintProvider`] again.

use std::collections::HashMap;

use crate::identifier::LayerId;

/// Capability to report a layer's current footprint width.
///
/// Implementations must answer with the width the layer has *right now*,
/// including while it is mid-transition between expanded and collapsed.
pub trait FootprintProvider {
    /// Returns the current footprint width of `layer`.
    fn footprint_width(&self, layer: LayerId) -> f32;
}

impl<F> FootprintProvider for &F
where
    F: FootprintProvider + ?Sized,
{
    fn footprint_width(&self, layer: LayerId) -> f32 {
        (**self).footprint_width(layer)
    }
}

/// Fixed widths keyed by layer; layers without an entry report zero.
impl FootprintProvider for HashMap<LayerId, f32> {
    fn footprint_width(&self, layer: LayerId) -> f32 {
        self.get(&layer).copied().unwrap_or_default()
    }
}

/// Every layer reports the same width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformFootprint(pub f32);

impl FootprintProvider for UniformFootprint {
    fn footprint_width(&self, _layer: LayerId) -> f32 {
        self.0
    }
}
