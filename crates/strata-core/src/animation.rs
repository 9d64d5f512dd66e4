//! Hand-off of target positions to the animation collaborator.
//!
//! The layout engine computes where layers should end up; a renderer-side
//! [`Animator`] owns interpolating them there over time. Every hand-off is
//! tagged with the [`Generation`] of the rank it was computed for, so an
//! animator can drop targets that a newer re-layout of the same rank has
//! already superseded.

use std::time::Duration;

use serde::Serialize;

use crate::{geometry::Point3, identifier::LayerId};

/// Monotonic counter of re-layouts performed on one rank.
///
/// Generation zero is the initial layout. Each interactive re-layout of a
/// rank advances that rank's counter by one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Generation(u64);

impl Generation {
    /// Creates a generation with the given counter value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the counter value.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the generation that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A request to move one layer from its current center to a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    layer: LayerId,
    rank: usize,
    generation: Generation,
    from: Point3,
    to: Point3,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    duration: Duration,
}

impl Transition {
    /// Creates a transition for `layer` within `rank`.
    pub fn new(
        layer: LayerId,
        rank: usize,
        generation: Generation,
        from: Point3,
        to: Point3,
        duration: Duration,
    ) -> Self {
        Self {
            layer,
            rank,
            generation,
            from,
            to,
            duration,
        }
    }

    /// The layer being moved.
    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// The rank whose re-layout produced this transition.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// The rank generation this transition belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Center before the transition.
    pub fn from(&self) -> Point3 {
        self.from
    }

    /// Target center.
    pub fn to(&self) -> Point3 {
        self.to
    }

    /// Time the animator should take to reach the target.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Straight-line distance the layer travels.
    pub fn distance(&self) -> f32 {
        self.from.distance(self.to)
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u128(duration.as_millis())
}

/// Capability to animate layers toward target centers.
///
/// Implementations own all interpolation and rendering; the layout engine
/// returns as soon as it has handed every transition over.
pub trait Animator {
    /// Starts moving a layer toward `transition.to()`.
    fn translate_to(&mut self, transition: Transition);
}

impl<A> Animator for &mut A
where
    A: Animator + ?Sized,
{
    fn translate_to(&mut self, transition: Transition) {
        (**self).translate_to(transition)
    }
}

/// Collects every transition it receives, in order.
impl Animator for Vec<Transition> {
    fn translate_to(&mut self, transition: Transition) {
        self.push(transition);
    }
}
