//! Background transparency post-processing.
//!
//! Two independent mechanisms, one per container family:
//!
//! - [`raster`]: color-keying over an RGBA buffer, where pixels brighter
//!   than a fixed threshold on all three channels lose their alpha.
//! - [`vector`]: text substitution over SVG markup, removing white-filled
//!   background shapes and rewriting remaining white fills to `none`.
//!
//! Both transforms are best-effort enhancements: they never fail, and on
//! anything unexpected they leave the artifact unchanged.

pub mod raster;
pub mod vector;

pub use raster::{KEY_THRESHOLD, key_out_light_pixels};
pub use vector::make_transparent;
