//! URL collaborators: hostname resolution and per-width URL construction
//!
//! The srcset builder only sees the two traits here. `QueryUrlBuilder` and
//! `HostnameMap` are the implementations shipped with the crate; any other
//! builder (a CDN SDK, a test double) can be plugged in instead.

use crate::options::TransformParams;
use crate::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};
use url::{Position, Url};

/// Characters escaped inside a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped in query keys and values (everything but unreserved)
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds a fully qualified image URL for one set of transform parameters
pub trait UrlBuilder: Send + Sync {
    fn build_url(&self, source: &str, params: &TransformParams) -> Result<String>;
}

impl<F> UrlBuilder for F
where
    F: Fn(&str, &TransformParams) -> Result<String> + Send + Sync,
{
    fn build_url(&self, source: &str, params: &TransformParams) -> Result<String> {
        self(source, params)
    }
}

/// Rewrites a raw source before it reaches the URL builder
pub trait HostnameResolver: Send + Sync {
    fn resolve(&self, source: &str) -> Result<String>;
}

impl<F> HostnameResolver for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn resolve(&self, source: &str) -> Result<String> {
        self(source)
    }
}

/// Resolver that leaves every source untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl HostnameResolver for PassThrough {
    fn resolve(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Replaces the host of absolute source URLs according to a fixed table.
///
/// Relative sources and URLs on hosts not in the table pass through.
#[derive(Debug, Clone, Default)]
pub struct HostnameMap {
    replacements: Vec<(String, String)>,
}

impl HostnameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push((from.into().to_ascii_lowercase(), to.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

impl HostnameResolver for HostnameMap {
    fn resolve(&self, source: &str) -> Result<String> {
        let mut url = match Url::parse(source) {
            Ok(url) if url.has_host() => url,
            _ => return Ok(source.to_string()),
        };
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        let Some((_, to)) = self.replacements.iter().find(|(from, _)| *from == host) else {
            return Ok(source.to_string());
        };
        let (to_host, to_port) = split_port(to);
        url.set_host(Some(to_host))
            .map_err(|e| Error::HostnameError(format!("cannot replace `{}` with `{}`: {}", host, to, e)))?;
        if to_port.is_some() {
            url.set_port(to_port)
                .map_err(|()| Error::HostnameError(format!("`{}` cannot carry a port", url)))?;
        }
        log::debug!("rewrote source host {} -> {}", host, to);
        Ok(url.to_string())
    }
}

/// Split `host:port`; bracketed IPv6 literals without a port stay whole
fn split_port(authority: &str) -> (&str, Option<u16>) {
    match authority.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && !port.contains(']') => match port.parse::<u16>() {
            Ok(port) => (host, Some(port)),
            Err(_) => (authority, None),
        },
        _ => (authority, None),
    }
}

/// Configuration for `QueryUrlBuilder`
#[derive(Debug, Clone)]
pub struct UrlBuilderConfig {
    /// Image host, e.g. `assets.example.net`
    pub host: String,
    pub use_https: bool,
    /// When set, every URL carries an `s` signature derived from this token
    pub secure_url_token: Option<String>,
    /// Append `ixlib=rs-<version>` to identify the generating library
    pub include_library_param: bool,
}

impl Default for UrlBuilderConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            use_https: true,
            secure_url_token: None,
            include_library_param: false,
        }
    }
}

/// Builds `scheme://host/path?params` URLs with sorted, escaped query
/// parameters and optional request signing.
///
/// Absolute `http(s)` sources on a foreign host are proxied: the whole
/// source URL becomes a single escaped path segment. Parameters whose name
/// ends in `64` are base64url-encoded before escaping.
#[derive(Debug, Clone)]
pub struct QueryUrlBuilder {
    config: UrlBuilderConfig,
}

impl QueryUrlBuilder {
    pub fn new(mut config: UrlBuilderConfig) -> Result<Self> {
        config.host = config.host.trim().to_string();
        if config.host.is_empty() {
            return Err(Error::ConfigError("URL builder needs a host".to_string()));
        }
        if config.host.contains('/') {
            return Err(Error::ConfigError(format!("host `{}` must not include a scheme or path", config.host)));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &UrlBuilderConfig {
        &self.config
    }

    fn path_for(&self, source: &str) -> String {
        if source.starts_with("http://") || source.starts_with("https://") {
            if let Ok(url) = Url::parse(source) {
                if url.has_host() && &url[Position::BeforeHost..Position::AfterPort] == self.config.host {
                    return url.path().to_string();
                }
            }
            return format!("/{}", utf8_percent_encode(source, NON_ALPHANUMERIC));
        }

        let trimmed = source.trim_start_matches('/');
        let encoded: Vec<String> = trimmed
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect();
        format!("/{}", encoded.join("/"))
    }

    fn query_for(&self, params: &TransformParams) -> String {
        let mut pairs: Vec<String> = params
            .iter()
            .map(|(key, value)| {
                let value = if key.ends_with("64") {
                    URL_SAFE_NO_PAD.encode(value.as_bytes())
                } else {
                    value.clone()
                };
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_COMPONENT),
                    utf8_percent_encode(&value, QUERY_COMPONENT)
                )
            })
            .collect();
        if self.config.include_library_param {
            pairs.push(format!("ixlib=rs-{}", env!("CARGO_PKG_VERSION")));
        }
        pairs.join("&")
    }

    fn signature(token: &str, path: &str, query: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hasher.update(path.as_bytes());
        if !query.is_empty() {
            hasher.update(b"?");
            hasher.update(query.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

impl UrlBuilder for QueryUrlBuilder {
    fn build_url(&self, source: &str, params: &TransformParams) -> Result<String> {
        let scheme = if self.config.use_https { "https" } else { "http" };
        let path = self.path_for(source);
        let mut query = self.query_for(params);

        if let Some(token) = &self.config.secure_url_token {
            let sig = Self::signature(token, &path, &query);
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str("s=");
            query.push_str(&sig);
        }

        let built = if query.is_empty() {
            format!("{}://{}{}", scheme, self.config.host, path)
        } else {
            format!("{}://{}{}?{}", scheme, self.config.host, path, query)
        };
        Url::parse(&built)?;
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QueryUrlBuilder {
        QueryUrlBuilder::new(UrlBuilderConfig {
            host: "assets.example.net".into(),
            ..Default::default()
        })
        .unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> TransformParams {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn builds_sorted_query() {
        let url = builder().build_url("image.jpg", &params(&[("w", "300"), ("fit", "crop")])).unwrap();
        assert_eq!(url, "https://assets.example.net/image.jpg?fit=crop&w=300");
    }

    #[test]
    fn no_params_means_no_query() {
        let url = builder().build_url("/a/b c.png", &TransformParams::new()).unwrap();
        assert_eq!(url, "https://assets.example.net/a/b%20c.png");
    }

    #[test]
    fn escapes_values_and_encodes_base64_params() {
        let url = builder()
            .build_url("x.jpg", &params(&[("txt", "hi there"), ("txt64", "hi there")]))
            .unwrap();
        assert_eq!(url, "https://assets.example.net/x.jpg?txt=hi%20there&txt64=aGkgdGhlcmU");
    }

    #[test]
    fn proxies_foreign_absolute_sources() {
        let url = builder().build_url("https://other.org/p.jpg", &TransformParams::new()).unwrap();
        assert_eq!(url, "https://assets.example.net/https%3A%2F%2Fother%2Eorg%2Fp%2Ejpg");

        let url = builder().build_url("https://assets.example.net/p.jpg", &TransformParams::new()).unwrap();
        assert_eq!(url, "https://assets.example.net/p.jpg");
    }

    #[test]
    fn signs_path_and_query() {
        let signed = QueryUrlBuilder::new(UrlBuilderConfig {
            host: "assets.example.net".into(),
            use_https: false,
            secure_url_token: Some("secret".into()),
            include_library_param: false,
        })
        .unwrap();
        let url = signed.build_url("image.jpg", &params(&[("w", "100")])).unwrap();
        let expected = QueryUrlBuilder::signature("secret", "/image.jpg", "w=100");
        assert_eq!(url, format!("http://assets.example.net/image.jpg?w=100&s={}", expected));
        assert_eq!(expected.len(), 64);
    }

    #[test]
    fn library_param_is_appended() {
        let b = QueryUrlBuilder::new(UrlBuilderConfig {
            host: "assets.example.net".into(),
            include_library_param: true,
            ..Default::default()
        })
        .unwrap();
        let url = b.build_url("i.jpg", &TransformParams::new()).unwrap();
        assert!(url.ends_with(&format!("?ixlib=rs-{}", env!("CARGO_PKG_VERSION"))));
    }

    #[test]
    fn host_is_required() {
        assert!(matches!(QueryUrlBuilder::new(UrlBuilderConfig::default()), Err(Error::ConfigError(_))));
        let bad = UrlBuilderConfig { host: "https://x.net".into(), ..Default::default() };
        assert!(QueryUrlBuilder::new(bad).is_err());
    }

    #[test]
    fn hostname_map_rewrites_known_hosts_only() {
        let map = HostnameMap::new().replace("Origin.Example.com", "assets.example.net");
        assert_eq!(
            map.resolve("https://origin.example.com/img/a.jpg").unwrap(),
            "https://assets.example.net/img/a.jpg"
        );
        assert_eq!(map.resolve("https://else.org/a.jpg").unwrap(), "https://else.org/a.jpg");
        assert_eq!(map.resolve("img/a.jpg").unwrap(), "img/a.jpg");
        assert_eq!(PassThrough.resolve("img/a.jpg").unwrap(), "img/a.jpg");
    }

    #[test]
    fn hostname_map_carries_ports() {
        let map = HostnameMap::new().replace("origin.example.com", "localhost:8080");
        assert_eq!(
            map.resolve("https://origin.example.com/a.jpg").unwrap(),
            "https://localhost:8080/a.jpg"
        );
        assert_eq!(split_port("localhost:8080"), ("localhost", Some(8080)));
        assert_eq!(split_port("[::1]"), ("[::1]", None));
        assert_eq!(split_port("[::1]:9000"), ("[::1]", Some(9000)));
        assert_eq!(split_port("assets.example.net"), ("assets.example.net", None));
    }

    #[test]
    fn closures_are_url_builders() {
        let b = |source: &str, p: &TransformParams| -> Result<String> {
            Ok(format!("{}#{}", source, p.len()))
        };
        assert_eq!(b.build_url("a", &params(&[("w", "1")])).unwrap(), "a#1");
    }
}
