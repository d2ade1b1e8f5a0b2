//! Core data types used throughout Sabq.
//!
//! - **Color**: the [`Color`] struct, [`ColorParseError`] and the
//!   [`perceptual_lightness`] helper used by palette validation.

pub mod color;

pub use color::{perceptual_lightness, Color, ColorParseError};
