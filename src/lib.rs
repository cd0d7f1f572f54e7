//! Responsive srcset generation
//!
//! Computes the pixel widths a responsive image should be rendered at and
//! assembles the matching `srcset` attribute value. URL construction is
//! delegated to a [`UrlBuilder`]; this crate only decides *which* widths to
//! ask for and how each width's transform parameters look.
//!
//! # Features
//!
//! - **Width selection**: device catalog widths merged with a uniform screen
//!   sweep, bounded by `min_width`/`max_width`
//! - **Exact matches**: a known display width adds 1x/2x/3x candidates
//! - **Aspect ratio**: a display box (`w` + `h`) scales the height of every
//!   candidate
//! - **Pluggable URLs**: any [`UrlBuilder`] / [`HostnameResolver`]; a signed
//!   query-string builder is included
//!
//! # Example
//!
//! ```
//! use responsive_srcset::{QueryUrlBuilder, SrcsetBuilder, SrcsetOptions, UrlBuilderConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let urls = QueryUrlBuilder::new(UrlBuilderConfig {
//!     host: "assets.example.net".to_string(),
//!     ..Default::default()
//! })?;
//!
//! let options = SrcsetOptions::new().width(400).height(300).param("fit", "crop")?;
//! let srcset = SrcsetBuilder::new(&urls).build("photos/cat.jpg", &options)?;
//! assert!(srcset.contains(" 1200w"));
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod image_url;
pub mod options;
pub mod srcset;
pub mod widths;

pub use catalog::{DeviceGroup, DeviceProfile, ParameterCatalog};
pub use error::{Error, Result};
pub use image_url::{HostnameMap, HostnameResolver, PassThrough, QueryUrlBuilder, UrlBuilder, UrlBuilderConfig};
pub use options::{SrcsetOptions, TransformParams};
pub use srcset::{Descriptor, SrcsetBuilder};
pub use widths::{target_widths, WidthRange};

/// Upper bound on the number of widths a screen sweep may produce
pub const MAX_SWEEP_WIDTHS: u32 = 10_000;

/// Configuration for width selection
///
/// The defaults describe the widest display we target (a 27" 5K panel,
/// 2560 CSS pixels at 2x) and a sweep step that keeps srcsets to a few dozen
/// entries.
///
/// # Examples
///
/// ```
/// let cfg = responsive_srcset::SrcsetConfig::default();
/// assert_eq!(cfg.max_screen_width, 5120);
/// assert_eq!(cfg.screen_step, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrcsetConfig {
    /// Upper bound of the screen sweep and default `max_width`
    pub max_screen_width: u32,
    /// Sweep step and default `min_width`
    pub screen_step: u32,
    /// Re-sort and deduplicate after injecting 1x/2x/3x display widths
    pub dedupe_exact_widths: bool,
}

impl Default for SrcsetConfig {
    fn default() -> Self {
        Self {
            max_screen_width: 2560 * 2,
            screen_step: 100,
            dedupe_exact_widths: true,
        }
    }
}

impl SrcsetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.screen_step == 0 {
            return Err(Error::ConfigError("screen_step must be greater than zero".to_string()));
        }
        if self.max_screen_width == 0 {
            return Err(Error::ConfigError("max_screen_width must be greater than zero".to_string()));
        }
        let sweep = self.max_screen_width / self.screen_step;
        if sweep > MAX_SWEEP_WIDTHS {
            return Err(Error::ConfigError(format!(
                "a sweep of {} by {} yields {} widths (limit {})",
                self.max_screen_width, self.screen_step, sweep, MAX_SWEEP_WIDTHS
            )));
        }
        Ok(())
    }
}

/// Build a srcset with the default configuration, bundled parameter catalog
/// and no hostname rewriting
pub fn build_srcset<B: UrlBuilder>(url_builder: &B, source: &str, options: &SrcsetOptions) -> Result<String> {
    SrcsetBuilder::new(url_builder).build(source, options)
}
