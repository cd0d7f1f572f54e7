//! Srcset assembly
//!
//! One URL per width, each formatted as `"<url> <width>w"` and joined with
//! `", "`. A failing collaborator fails the whole call; there is no partial
//! srcset.

use crate::catalog::ParameterCatalog;
use crate::image_url::{HostnameResolver, PassThrough, UrlBuilder};
use crate::options::SrcsetOptions;
use crate::widths::target_widths;
use crate::{Result, SrcsetConfig};

/// A single `srcset` candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub url: String,
    pub width: u32,
}

impl std::fmt::Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}w", self.url, self.width)
    }
}

/// Builds srcset strings on top of a URL builder.
///
/// The builder holds only shared, read-only state and can be reused across
/// calls and threads.
pub struct SrcsetBuilder<'a, B: UrlBuilder, R: HostnameResolver = PassThrough> {
    url_builder: &'a B,
    resolver: R,
    /// `None` means the bundled catalog
    catalog: Option<&'a ParameterCatalog>,
    config: SrcsetConfig,
}

impl<'a, B: UrlBuilder> SrcsetBuilder<'a, B, PassThrough> {
    /// Builder using the bundled parameter catalog, default configuration and
    /// no hostname rewriting
    pub fn new(url_builder: &'a B) -> Self {
        Self {
            url_builder,
            resolver: PassThrough,
            catalog: None,
            config: SrcsetConfig::default(),
        }
    }
}

impl<'a, B: UrlBuilder, R: HostnameResolver> SrcsetBuilder<'a, B, R> {
    pub fn with_resolver<R2: HostnameResolver>(self, resolver: R2) -> SrcsetBuilder<'a, B, R2> {
        SrcsetBuilder {
            url_builder: self.url_builder,
            resolver,
            catalog: self.catalog,
            config: self.config,
        }
    }

    pub fn with_catalog(mut self, catalog: &'a ParameterCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_config(mut self, config: SrcsetConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &SrcsetConfig {
        &self.config
    }

    /// Widths this builder would render for `options`.
    ///
    /// An explicit `widths` list is returned verbatim, in caller order.
    pub fn widths(&self, options: &SrcsetOptions) -> Vec<u32> {
        match &options.widths {
            Some(widths) => widths.clone(),
            None => target_widths(options.range(), options.w, &self.config),
        }
    }

    /// One descriptor per width, before joining
    pub fn descriptors(&self, source: &str, options: &SrcsetOptions) -> Result<Vec<Descriptor>> {
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => ParameterCatalog::bundled()?,
        };
        let source = self.resolver.resolve(source)?;
        self.widths(options)
            .into_iter()
            .map(|width| {
                let params = options.transform_params(width, catalog);
                let url = self.url_builder.build_url(&source, &params)?;
                Ok(Descriptor { url, width })
            })
            .collect()
    }

    /// The full `srcset` attribute value for `source`
    pub fn build(&self, source: &str, options: &SrcsetOptions) -> Result<String> {
        let descriptors = self.descriptors(source, options)?;
        log::debug!("built srcset for {} with {} candidates", source, descriptors.len());
        Ok(descriptors
            .iter()
            .map(Descriptor::to_string)
            .collect::<Vec<_>>()
            .join(", "))
    }
}
