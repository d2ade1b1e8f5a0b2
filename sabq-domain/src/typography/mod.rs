//! Typography settings engine.
//!
//! Maps the four enumerated reading preferences to per-element class bundles
//! and to root custom properties. Writing direction is supplied by the caller
//! through [`TextDirection`]; bundles carry both `rtl:` and `ltr:` alignment.

pub mod classes;
pub mod engine;
pub mod types;

#[cfg(test)]
mod engine_tests;

pub use engine::TypographyEngine;
pub use types::{
    ClassList, ElementKind, FontSize, FontWeight, LetterSpacing, LineHeight, TextDirection,
    TypographySettings,
};
