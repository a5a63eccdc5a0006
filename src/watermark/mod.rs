//! Watermark module for stamping a logo onto photographs.
//!
//! Each photograph gets the same pre-supplied logo pasted once, centered,
//! with a per-image variant, opacity and scale.
//!
//! # Features
//!
//! - **Two logo variants** (light and dark) held in an immutable asset table
//! - **Opacity scaling** of the logo's own alpha channel
//! - **Proportional sizing** relative to the photograph's width
//! - **Per-image overrides** with an explicit default fallback
//!
//! # Configuration Example
//!
//! ```yaml
//! defaults:
//!   variant: light
//!   opacity: 40
//!   scale: 100
//! overrides:
//!   "IMG_2041.jpg":
//!     variant: dark
//!     opacity: 65
//!     scale: 30
//! ```

pub mod assets;
pub mod compositor;
pub mod config;
pub mod error;
pub mod position;
pub mod resolver;

// Re-export main types for convenience
pub use assets::LogoAssets;
pub use compositor::{
    blend_layer, flatten, prepare_layer, scale_alpha, Compositor, WatermarkLayer,
    DEFAULT_PREVIEW_MAX_DIMENSION,
};
pub use config::{LogoVariant, WatermarkConfig, MAX_OPACITY_PCT, MAX_SCALE_PCT, MIN_SCALE_PCT};
pub use error::{AssetError, CompositeError};
pub use position::{
    centered_position, scaled_dimensions, ImageDimensions, PlacementPosition, WatermarkDimensions,
};
pub use resolver::{resolve, ConfigResolver};
