//! Geometric primitives for network diagram placement.
//!
//! This module provides the 3D position type the layout engine writes and the
//! renderer consumes.
//!
//! # Overview
//!
//! - [`Point3`] - A 3D coordinate in diagram space
//!
//! # Coordinate System
//!
//! Strata places layers in a right-handed coordinate system centered on the
//! origin:
//!
//! ```text
//!          +Y (main axis, one step per rank)
//!           │
//!           │
//!           └──────► +X (siblings within a rank)
//!          ╱
//!         ╱
//!       +Z (layer thickness)
//! ```
//!
//! - **Y-axis**: The main layout axis. Each rank sits at one evenly spaced
//!   position along it, and the set of ranks is centered on `y = 0`.
//! - **X-axis**: Layers sharing a rank are packed side by side along it,
//!   centered on `x = 0`.
//! - **Z-axis**: A layer's own rendered thickness extends along it; layer
//!   centers always sit at `z = 0`.

use serde::{Deserialize, Serialize};

/// A 3D point representing a position in diagram coordinate space.
///
/// See the [module documentation](self) for the axis convention.
///
/// # Examples
///
/// ```
/// # use strata_core::geometry::Point3;
/// let center = Point3::default().with_y(-25.0).with_x(6.0);
/// assert_eq!(center, Point3::new(6.0, -25.0, 0.0));
/// assert_eq!(center.distance(Point3::new(6.0, 25.0, 0.0)), 50.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Point3 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the z-coordinate of the point
    pub fn z(self) -> f32 {
        self.z
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point3) -> f32 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}
