//! Integration tests for the rbmap command pipeline: file input, both
//! output formats, and fatal-before-output failure behavior.

#![allow(clippy::unwrap_used, clippy::panic)]

use rbmap::cli::{OutputFormat, load_store, read_input, render_model};
use std::io::Write;

const MODEL: &str = r#"
@prefix rbmo: <http://purl.org/rbm/rbmo#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix : <http://example.org/model#> .

:bind rdfs:label "A1 binds A2" ;
    rbmo:lhs [ rbmo:agent :A1 ; rbmo:state [ rbmo:binding rbmo:Nothing ; rbmo:site :x ] ] ;
    rbmo:lhs [ rbmo:agent :A2 ; rbmo:state [ rbmo:binding rbmo:Nothing ; rbmo:site :z ] ] ;
    rbmo:rhs [ rbmo:agent :A1 ; rbmo:state [ rbmo:binding _:p ; rbmo:site :x ] ] ;
    rbmo:rhs [ rbmo:agent :A2 ; rbmo:state [ rbmo:binding _:p ; rbmo:site :z ] ] .
"#;

#[test]
fn file_input_renders_dot() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, "{MODEL}").expect("write model");
    let path = file.path().display().to_string();

    let (text, base) = read_input(&path).expect("read input");
    assert_eq!(base, format!("file://{path}"));

    let store = load_store(&text, &base).expect("load");
    let dot = render_model(&store, OutputFormat::Dot).expect("render");

    assert!(dot.starts_with("graph {\n"));
    assert!(dot.contains("subgraph cluster_A1 {"));
    assert!(dot.contains("x -- z [label=\"b0\"];"));
    assert!(dot.contains("label=\"b0: A1 binds A2\";"));
}

#[test]
fn json_output_round_trips_the_map() {
    let store = load_store(MODEL, "test:").expect("load");
    let json = render_model(&store, OutputFormat::Json).expect("render");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["bindings"][0]["rule_code"], "b0");
    assert_eq!(value["bindings"][0]["site_a"], "x");
    assert_eq!(value["bindings"][0]["site_b"], "z");
    assert_eq!(value["rules"][0]["label"], "A1 binds A2");
    assert_eq!(value["agents"][0]["slug"], "A1");
}

#[test]
fn malformed_input_fails_before_any_rendering() {
    let err = load_store("@prefix broken", "test:").expect_err("should fail");
    assert!(matches!(err, rbmap_core::RbmapError::Parse { .. }));
}

#[test]
fn dot_and_json_see_the_same_events() {
    let store = load_store(MODEL, "test:").expect("load");
    let dot = render_model(&store, OutputFormat::Dot).expect("render dot");
    let json = render_model(&store, OutputFormat::Json).expect("render json");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    let edge_count = value["bindings"].as_array().map(Vec::len).unwrap_or(0);
    assert_eq!(edge_count, dot.matches(" -- ").count());
}
