//! Strata Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Strata layout
//! engine and the renderers that consume its output. It includes:
//!
//! - **Identifiers**: Arena handles for declared layers ([`identifier::LayerId`])
//! - **Geometry**: 3D positions in diagram space ([`geometry`] module)
//! - **Footprint**: The width query a renderer answers for the engine ([`footprint`] module)
//! - **Animation**: Transition hand-off to the animation collaborator ([`animation`] module)

pub mod animation;
pub mod footprint;
pub mod geometry;
pub mod identifier;
