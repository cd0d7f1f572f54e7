//! End-to-end srcset generation through the public API

use responsive_srcset::{
    build_srcset, Error, HostnameMap, ParameterCatalog, QueryUrlBuilder, Result, SrcsetBuilder, SrcsetOptions,
    TransformParams, UrlBuilderConfig,
};
use std::collections::HashSet;
use std::sync::Mutex;

fn query_builder() -> QueryUrlBuilder {
    QueryUrlBuilder::new(UrlBuilderConfig {
        host: "assets.example.net".to_string(),
        ..Default::default()
    })
    .expect("valid builder config")
}

#[test]
fn srcset_is_comma_space_joined() {
    let urls = query_builder();
    let opts = SrcsetOptions::new().width(100).height(100);
    let srcset = build_srcset(&urls, "image.jpg", &opts).unwrap();

    assert!(!srcset.ends_with(", "));
    assert!(!srcset.ends_with(','));

    let mut seen = HashSet::new();
    for token in srcset.split(", ") {
        let (url, descriptor) = token.rsplit_once(' ').expect("url and descriptor");
        assert!(url.starts_with("https://assets.example.net/image.jpg?"));
        let width: u32 = descriptor.trim_end_matches('w').parse().unwrap();
        assert!(url.contains(&format!("w={}", width)));
        // square display box keeps h == w
        assert!(url.contains(&format!("h={}", width)));
        assert!(seen.insert(width), "duplicate width {}", width);
    }
    for w in [100, 200, 300] {
        assert!(seen.contains(&w));
    }
}

#[test]
fn explicit_widths_produce_exactly_those_descriptors() {
    let urls = query_builder();
    let opts = SrcsetOptions::new().widths(vec![300, 600]);
    let srcset = build_srcset(&urls, "image.jpg", &opts).unwrap();
    assert_eq!(
        srcset,
        "https://assets.example.net/image.jpg?w=300 300w, https://assets.example.net/image.jpg?w=600 600w"
    );
}

#[test]
fn unknown_keys_never_reach_the_url_builder() {
    let seen: Mutex<Vec<TransformParams>> = Mutex::new(Vec::new());
    let record = |_: &str, params: &TransformParams| -> Result<String> {
        seen.lock().unwrap().push(params.clone());
        Ok("u".to_string())
    };
    let opts = SrcsetOptions::from_json(r#"{"banana": 1, "auto": "format", "min_width": 2000}"#).unwrap();
    SrcsetBuilder::new(&record).build("a.jpg", &opts).unwrap();

    let seen = seen.into_inner().unwrap();
    assert!(!seen.is_empty());
    for params in &seen {
        assert!(!params.contains_key("banana"));
        assert!(!params.contains_key("widths"));
        assert!(!params.contains_key("min_width"));
        assert_eq!(params["auto"], "format");
    }
}

#[test]
fn derived_height_follows_display_box() {
    let seen: Mutex<Vec<TransformParams>> = Mutex::new(Vec::new());
    let record = |_: &str, params: &TransformParams| -> Result<String> {
        seen.lock().unwrap().push(params.clone());
        Ok("u".to_string())
    };
    let opts = SrcsetOptions::new().width(200).height(100);
    SrcsetBuilder::new(&record).build("a.jpg", &opts).unwrap();

    let seen = seen.into_inner().unwrap();
    let at_600 = seen.iter().find(|p| p["w"] == "600").expect("600 is a candidate");
    assert_eq!(at_600["h"], "300");
}

#[test]
fn custom_catalog_limits_forwarded_params() {
    let catalog = ParameterCatalog::from_names(["w", "q"]);
    let urls = query_builder();
    let opts = SrcsetOptions::new().widths(vec![500]).param("q", "60").unwrap().param("fit", "crop").unwrap();
    let srcset = SrcsetBuilder::new(&urls).with_catalog(&catalog).build("a.jpg", &opts).unwrap();
    assert_eq!(srcset, "https://assets.example.net/a.jpg?q=60&w=500 500w");
}

#[test]
fn lone_height_needs_a_catalog_entry() {
    let urls = query_builder();
    let opts = SrcsetOptions::new().height(100).widths(vec![500]);

    let without_h = ParameterCatalog::from_names(["w"]);
    let srcset = SrcsetBuilder::new(&urls).with_catalog(&without_h).build("a.jpg", &opts).unwrap();
    assert_eq!(srcset, "https://assets.example.net/a.jpg?w=500 500w");

    let with_h = ParameterCatalog::from_names(["w", "h"]);
    let srcset = SrcsetBuilder::new(&urls).with_catalog(&with_h).build("a.jpg", &opts).unwrap();
    assert_eq!(srcset, "https://assets.example.net/a.jpg?h=100&w=500 500w");
}

#[test]
fn hosts_with_ports_survive_replacement() {
    let urls = QueryUrlBuilder::new(UrlBuilderConfig {
        host: "localhost:8080".to_string(),
        use_https: false,
        ..Default::default()
    })
    .unwrap();
    let builder = SrcsetBuilder::new(&urls)
        .with_resolver(HostnameMap::new().replace("origin.example.com", "localhost:8080"));
    let srcset = builder
        .build("https://origin.example.com/cats/1.jpg", &SrcsetOptions::new().widths(vec![320]))
        .unwrap();
    assert_eq!(srcset, "http://localhost:8080/cats/1.jpg?w=320 320w");
}

#[test]
fn hostnames_are_replaced_before_building() {
    let urls = query_builder();
    let builder = SrcsetBuilder::new(&urls)
        .with_resolver(HostnameMap::new().replace("origin.example.com", "assets.example.net"));
    let srcset = builder
        .build("https://origin.example.com/cats/1.jpg", &SrcsetOptions::new().widths(vec![320]))
        .unwrap();
    assert_eq!(srcset, "https://assets.example.net/cats/1.jpg?w=320 320w");
}

#[test]
fn resolver_failures_propagate() {
    let urls = query_builder();
    let failing = |_: &str| -> Result<String> { Err(Error::HostnameError("unreachable".into())) };
    let err = SrcsetBuilder::new(&urls)
        .with_resolver(failing)
        .build("a.jpg", &SrcsetOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::HostnameError(_)));
}

#[test]
fn builders_are_shareable_across_threads() {
    let urls = query_builder();
    let builder = SrcsetBuilder::new(&urls);
    let opts = SrcsetOptions::new().width(320);
    let expected = builder.build("a.jpg", &opts).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| builder.build("a.jpg", &opts).unwrap())).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
