//! Unit tests for key-path resolution and writing.

use super::*;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde_json::json;

fn object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("expected an object literal, got {other}")),
    }
}

#[test]
fn resolves_nested_leaf() -> Result<()> {
    let root = object(json!({"a": {"b": {"c": 5}}}))?;
    ensure!(resolve(&root, "a.b.c")? == Some(&json!(5)), "expected 5");
    Ok(())
}

#[rstest]
#[case::missing_leaf(json!({"a": {"b": {}}}), "a.b.c")]
#[case::missing_intermediate(json!({"a": {}}), "a.b.c")]
#[case::missing_root(json!({}), "a")]
fn missing_segments_resolve_to_none(#[case] wire: Value, #[case] path: &str) -> Result<()> {
    let root = object(wire)?;
    ensure!(resolve(&root, path)?.is_none(), "expected None for {path}");
    Ok(())
}

#[test]
fn explicit_null_leaf_is_distinct_from_missing() -> Result<()> {
    let root = object(json!({"a": {"b": null}}))?;
    ensure!(resolve(&root, "a.b")? == Some(&Value::Null), "expected null leaf");
    ensure!(resolve(&root, "a.c")?.is_none(), "expected missing leaf");
    Ok(())
}

#[rstest]
#[case::null_intermediate(json!({"a": {"b": null}}), "a.b.c", "c", "a.b", ValueKind::Null)]
#[case::scalar_intermediate(json!({"a": 5}), "a.b.c", "b", "a", ValueKind::Number)]
#[case::array_intermediate(json!({"a": [1]}), "a.b", "b", "a", ValueKind::Array)]
fn non_object_intermediates_fail(
    #[case] wire: Value,
    #[case] path: &str,
    #[case] segment: &str,
    #[case] traversed: &str,
    #[case] found: ValueKind,
) -> Result<()> {
    let root = object(wire)?;
    let err = resolve(&root, path).expect_err("resolution should fail");
    ensure!(
        err == PathError::NotATraversableContainer {
            segment: segment.to_owned(),
            traversed: traversed.to_owned(),
            found,
        },
        "unexpected error {err:?}"
    );
    ensure!(err.segment() == segment, "segment accessor mismatch");
    Ok(())
}

#[test]
fn resolution_does_not_mutate_input() -> Result<()> {
    let root = object(json!({"a": {"b": 1}}))?;
    let before = root.clone();
    let _ = resolve(&root, "a.b.c");
    let _ = resolve(&root, "x.y");
    ensure!(root == before, "input was mutated");
    Ok(())
}

#[rstest]
#[case::empty("", KeyPathError::Empty)]
#[case::double_dot("a..b", KeyPathError::EmptySegment { path: "a..b".to_owned() })]
#[case::leading_dot(".a", KeyPathError::EmptySegment { path: ".a".to_owned() })]
#[case::trailing_dot("a.", KeyPathError::EmptySegment { path: "a.".to_owned() })]
fn parse_rejects_malformed_paths(#[case] raw: &str, #[case] expected: KeyPathError) {
    assert_eq!(KeyPath::parse(raw), Err(expected));
}

#[test]
fn parse_keeps_segments_in_order() -> Result<()> {
    let path: KeyPath = "owner.profile.login".parse()?;
    ensure!(
        path.segments().collect::<Vec<_>>() == ["owner", "profile", "login"],
        "unexpected segments"
    );
    ensure!(!path.is_simple(), "multi-segment path reported simple");
    ensure!(path.to_string() == "owner.profile.login", "display mismatch");
    Ok(())
}

#[test]
fn insert_creates_intermediate_objects() -> Result<()> {
    let mut root = Map::new();
    KeyPath::parse("nested.name")?.insert(&mut root, json!("x"))?;
    KeyPath::parse("nested.count")?.insert(&mut root, json!(2))?;
    KeyPath::parse("top")?.insert(&mut root, Value::Null)?;
    ensure!(
        Value::Object(root) == json!({"nested": {"name": "x", "count": 2}, "top": null}),
        "unexpected wire map"
    );
    Ok(())
}

#[test]
fn insert_refuses_to_descend_through_scalars() -> Result<()> {
    let mut root = object(json!({"nested": 3}))?;
    let err = KeyPath::parse("nested.name")?
        .insert(&mut root, json!("x"))
        .expect_err("insert should fail");
    ensure!(err.segment() == "name", "unexpected segment in {err}");
    Ok(())
}

#[rstest]
#[case("a", "a", true)]
#[case("a", "a.b", true)]
#[case("a.b", "a", true)]
#[case("a.b", "a.c", false)]
#[case("a", "b", false)]
fn overlap_detection(
    #[case] left: &str,
    #[case] right: &str,
    #[case] expected: bool,
) -> Result<()> {
    let (left, right) = (KeyPath::parse(left)?, KeyPath::parse(right)?);
    ensure!(left.overlaps(&right) == expected, "overlap mismatch");
    Ok(())
}
