//! Per-call srcset options
//!
//! Reserved keys (`widths`, `w`, `h`, `min_width`, `max_width`) get explicit
//! fields; everything else lands in an open map of transform parameters that
//! is filtered against the parameter catalog before reaching a URL builder.

use crate::catalog::ParameterCatalog;
use crate::widths::WidthRange;
use crate::{Error, Result};
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;

/// Transform parameters handed to a URL builder, ordered by key
pub type TransformParams = BTreeMap<String, String>;

const RESERVED_KEYS: [&str; 5] = ["widths", "w", "h", "min_width", "max_width"];

/// Options for a single srcset generation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SrcsetOptions {
    /// Explicit widths; bypasses width selection entirely
    pub widths: Option<Vec<u32>>,
    /// Intended display width
    pub w: Option<u32>,
    /// Intended display height
    pub h: Option<u32>,
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
    /// Other transform parameters, forwarded only if the catalog knows them
    pub params: TransformParams,
}

impl SrcsetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn widths(mut self, widths: impl Into<Vec<u32>>) -> Self {
        self.widths = Some(widths.into());
        self
    }

    pub fn width(mut self, w: u32) -> Self {
        self.w = Some(w);
        self
    }

    pub fn height(mut self, h: u32) -> Self {
        self.h = Some(h);
        self
    }

    pub fn min_width(mut self, min: u32) -> Self {
        self.min_width = Some(min);
        self
    }

    pub fn max_width(mut self, max: u32) -> Self {
        self.max_width = Some(max);
        self
    }

    /// Set a transform parameter. Reserved keys are routed to their fields.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        self.set(&key.into(), &value.into())?;
        Ok(self)
    }

    pub fn range(&self) -> WidthRange {
        WidthRange::new(self.min_width, self.max_width)
    }

    /// Parse `key=value` pairs, e.g. from the command line.
    ///
    /// `widths` takes a comma-separated list (`widths=300,600`).
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| Error::OptionError {
                key: pair.to_string(),
                reason: "expected key=value".to_string(),
            })?;
            opts.set(key.trim(), value.trim())?;
        }
        Ok(opts)
    }

    /// Parse a loosely typed JSON object.
    ///
    /// Reserved keys must hold non-negative integers (or an array of them for
    /// `widths`); other values are stringified, `null` entries are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| Error::OptionError {
            key: "<options>".to_string(),
            reason: e.to_string(),
        })?;
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::OptionError {
                    key: "<options>".to_string(),
                    reason: format!("expected a JSON object, got {}", other),
                })
            }
        };

        let mut opts = Self::default();
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            if key == "widths" {
                let items = value.as_array().ok_or_else(|| Error::OptionError {
                    key: "widths".to_string(),
                    reason: format!("expected an array of widths, got {}", value),
                })?;
                let widths = items
                    .iter()
                    .map(|v| json_u32("widths", v))
                    .collect::<Result<Vec<_>>>()?;
                opts.widths = Some(widths);
            } else if RESERVED_KEYS.contains(&key.as_str()) {
                let n = json_u32(&key, &value)?;
                opts.set_reserved(&key, n);
            } else {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                opts.params.insert(key, value);
            }
        }
        Ok(opts)
    }

    /// Overlay `other` onto `self`; fields set in `other` win.
    pub fn merge(mut self, other: SrcsetOptions) -> Self {
        if other.widths.is_some() {
            self.widths = other.widths;
        }
        self.w = other.w.or(self.w);
        self.h = other.h.or(self.h);
        self.min_width = other.min_width.or(self.min_width);
        self.max_width = other.max_width.or(self.max_width);
        self.params.extend(other.params);
        self
    }

    /// Transform parameters for one candidate width.
    ///
    /// Keys unknown to `catalog` are dropped. `w` is always set to `width`;
    /// when both a display width and height are known, `h` is scaled to keep
    /// their aspect ratio. A height on its own is only forwarded if the
    /// catalog knows `h`.
    pub fn transform_params(&self, width: u32, catalog: &ParameterCatalog) -> TransformParams {
        let mut params: TransformParams = self
            .params
            .iter()
            .filter(|(k, _)| {
                let known = catalog.contains(k.as_str());
                if !known {
                    debug!("dropping unrecognised transform parameter `{}`", k);
                }
                known
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        params.insert("w".to_string(), width.to_string());
        // without a display width there is no ratio to keep, so a lone
        // height is forwarded like any other catalog parameter
        let height = self
            .scaled_height(width)
            .or_else(|| self.h.filter(|_| catalog.contains("h")));
        if let Some(h) = height {
            params.insert("h".to_string(), h.to_string());
        }
        params
    }

    /// Height matching `width` at the display box's aspect ratio
    pub fn scaled_height(&self, width: u32) -> Option<u32> {
        match (self.w, self.h) {
            (Some(w), Some(h)) if w > 0 => Some((width as f64 * (h as f64 / w as f64)).round() as u32),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "widths" => {
                let widths = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| parse_u32("widths", s))
                    .collect::<Result<Vec<_>>>()?;
                self.widths = Some(widths);
            }
            k if RESERVED_KEYS.contains(&k) => {
                let n = parse_u32(k, value)?;
                self.set_reserved(k, n);
            }
            _ => {
                self.params.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    fn set_reserved(&mut self, key: &str, n: u32) {
        match key {
            "w" => self.w = Some(n),
            "h" => self.h = Some(n),
            "min_width" => self.min_width = Some(n),
            "max_width" => self.max_width = Some(n),
            _ => {}
        }
    }
}

fn parse_u32(key: &str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|e| Error::OptionError {
        key: key.to_string(),
        reason: format!("`{}` is not a pixel count: {}", value, e),
    })
}

fn json_u32(key: &str, value: &Value) -> Result<u32> {
    let n = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    n.and_then(|n| u32::try_from(n).ok()).ok_or_else(|| Error::OptionError {
        key: key.to_string(),
        reason: format!("`{}` is not a pixel count", value),
    })
}
