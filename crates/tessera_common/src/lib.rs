//! Shared foundational types used across the Tessera placement toolchain.
//!
//! This crate provides the integer geometry used by every placement stage
//! (points and half-open rectangles in site/row units) and placement
//! fingerprints.

#![warn(missing_docs)]

pub mod fingerprint;
pub mod geom;

pub use fingerprint::{Fingerprint, FingerprintBuilder};
pub use geom::{Point, Rect};
