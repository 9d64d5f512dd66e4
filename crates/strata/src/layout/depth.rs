//! Visual thickness of each layer.
//!
//! Raw depths (channel counts) span several orders of magnitude, so they are
//! scaled against the deepest layer into `[min, max]` rendering units. The
//! result only affects a layer's own thickness, never its rank or position.

use log::debug;

/// Scales raw depths into visual thickness.
///
/// Each value becomes `raw / max(raw) * max_visual`. A result that rounds
/// below `min_visual` is clamped to `min_visual`. If every raw depth is zero
/// all layers get `min_visual`.
///
/// # Examples
///
/// ```
/// # use strata::layout::normalize_depths;
/// let depths = normalize_depths(&[3, 64, 512], 1.0, 20.0);
/// assert_eq!(depths[2], 20.0);
/// assert_eq!(depths[1], 2.5);
/// assert_eq!(depths[0], 1.0);
/// ```
pub fn normalize_depths(raw: &[u32], min_visual: f32, max_visual: f32) -> Vec<f32> {
    let deepest = raw.iter().copied().max().unwrap_or_default();
    if deepest == 0 {
        return vec![min_visual; raw.len()];
    }

    let depths: Vec<f32> = raw
        .iter()
        .map(|&depth| {
            let scaled = depth as f32 / deepest as f32 * max_visual;
            if scaled.round() < min_visual {
                min_visual
            } else {
                scaled
            }
        })
        .collect();

    debug!(layers = depths.len(), deepest; "Normalized depths");
    depths
}
