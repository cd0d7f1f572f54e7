//! Catalog of transform-parameter names the URL builder understands
//!
//! The bundled catalog is embedded at compile time from
//! `vendor/parameters.json` and parsed once on first access. Option keys
//! missing from the catalog are never forwarded to a URL builder.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const BUNDLED_PARAMETERS: &str = include_str!("../../vendor/parameters.json");

static BUNDLED: OnceLock<std::result::Result<ParameterCatalog, String>> = OnceLock::new();

/// Metadata attached to a single parameter entry
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterInfo {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    version: Option<String>,
    parameters: BTreeMap<String, ParameterInfo>,
}

/// A stable, read-only set of recognised transform-parameter names
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCatalog {
    version: Option<String>,
    parameters: BTreeMap<String, ParameterInfo>,
}

impl ParameterCatalog {
    /// The catalog shipped with the crate, shared for the process lifetime.
    ///
    /// Parsed on first access; a parse failure is remembered and reported to
    /// every caller.
    pub fn bundled() -> Result<&'static ParameterCatalog> {
        BUNDLED
            .get_or_init(|| Self::from_json(BUNDLED_PARAMETERS).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| Error::ParameterCatalogError(format!("bundled catalog: {}", e)))
    }

    /// Parse a catalog from its JSON form:
    /// `{"version": "..", "parameters": {"w": {..}, ..}}`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        if file.parameters.is_empty() {
            return Err(Error::ParameterCatalogError("catalog lists no parameters".to_string()));
        }
        // `widths` is reserved for the caller override and never a transform
        let mut parameters = file.parameters;
        parameters.remove("widths");
        Ok(Self { version: file.version, parameters })
    }

    /// Build a catalog from a plain list of names (useful for tests and
    /// custom URL builders)
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parameters = names
            .into_iter()
            .map(Into::into)
            .filter(|n: &String| n != "widths")
            .map(|n| (n, ParameterInfo { display_name: None, category: None }))
            .collect();
        Self { version: None, parameters }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ParameterInfo> {
        self.parameters.get(name)
    }

    /// Recognised names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
