//! Placement along the main axis and inside a rank.

use log::trace;

use strata_core::{footprint::FootprintProvider, geometry::Point3, identifier::LayerId};

/// Horizontal offsets of the layers sharing one rank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankPacking {
    offsets: Vec<f32>,
    total_width: f32,
}

impl RankPacking {
    /// Center x-offset of each layer, in the order the layers were given.
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// Width of the whole rank: all footprints plus the gaps between them.
    pub fn total_width(&self) -> f32 {
        self.total_width
    }

    /// Left edge of the leftmost layer.
    pub fn left_edge(&self) -> f32 {
        -self.total_width / 2.0
    }
}

/// Packs the layers of one rank left to right, centered on `x = 0`.
///
/// Footprints are queried from `footprints` on every call, never cached, so
/// the result reflects the expanded/collapsed state at call time. Layers keep
/// their given order and never overlap; `interval` separates neighbours.
///
/// # Examples
///
/// ```
/// # use strata::layout::pack_rank;
/// # use strata_core::{footprint::UniformFootprint, identifier::LayerId};
/// let layers = [LayerId::new(0), LayerId::new(1), LayerId::new(2)];
/// let packing = pack_rank(&layers, &UniformFootprint(10.0), 2.0);
///
/// assert_eq!(packing.total_width(), 34.0);
/// assert_eq!(packing.offsets(), &[-12.0, 0.0, 12.0]);
/// ```
pub fn pack_rank<F>(layers: &[LayerId], footprints: &F, interval: f32) -> RankPacking
where
    F: FootprintProvider + ?Sized,
{
    let widths: Vec<f32> = layers
        .iter()
        .map(|&layer| footprints.footprint_width(layer))
        .collect();

    let gaps = layers.len().saturating_sub(1) as f32;
    let total_width = widths.iter().sum::<f32>() + interval * gaps;

    let mut cursor = -total_width / 2.0;
    let offsets = widths
        .iter()
        .map(|width| {
            let offset = cursor + width / 2.0;
            cursor += width + interval;
            offset
        })
        .collect();

    trace!(layers = layers.len(), total_width; "Packed rank");
    RankPacking {
        offsets,
        total_width,
    }
}

/// Evenly spaced rank centers along the main (y) axis, centered on the origin.
///
/// `center[i].y = -((rank_count - 1) / 2) * interval + i * interval`; the x and
/// z components are zero.
pub fn rank_centers(rank_count: usize, interval: f32) -> Vec<Point3> {
    let start = -(rank_count.saturating_sub(1) as f32) / 2.0 * interval;
    (0..rank_count)
        .map(|rank| Point3::default().with_y(start + rank as f32 * interval))
        .collect()
}
