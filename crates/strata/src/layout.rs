//! Placement stages of the layout pipeline.
//!
//! - [`levels`] assigns ranks and groups nodes by rank.
//! - [`depth`] scales raw layer depths into rendered thickness.
//! - [`packing`] spaces ranks along the main axis and packs siblings inside
//!   a rank.

pub mod depth;
pub mod levels;
pub mod packing;

pub use depth::normalize_depths;
pub use levels::{LevelMap, RankLookup, assign_levels};
pub use packing::{RankPacking, pack_rank, rank_centers};
