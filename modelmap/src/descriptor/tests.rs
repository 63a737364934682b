//! Unit tests for descriptor declaration, normalization and caching.

use std::sync::{Arc, Weak};

use super::*;
use crate::Model;
use crate::transform::Transformer;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Base {
    id: u64,
    kind: String,
}

impl Model for Base {
    fn declare(table: &mut TableBuilder<Self>) {
        table
            .field(FieldDescriptor::new(
                "id",
                FieldAccessor::<Self>::stored(|b| &b.id, |b| &mut b.id),
            ))
            .field(FieldDescriptor::new(
                "kind",
                FieldAccessor::<Self>::stored(|b| &b.kind, |b| &mut b.kind),
            ))
            .post_build(|b: &mut Self| b.kind.push_str("+base"));
    }
}

#[derive(Clone, Default)]
struct Derived {
    base: Base,
    label: Option<String>,
    parent: Weak<()>,
}

impl Model for Derived {
    fn declare(table: &mut TableBuilder<Self>) {
        table
            .extend::<Base>(|d| &d.base, |d| &mut d.base)
            .field(FieldDescriptor::new(
                "label",
                FieldAccessor::<Self>::stored(|d| &d.label, |d| &mut d.label),
            ))
            .field(
                FieldDescriptor::new(
                    "kind",
                    FieldAccessor::<Self>::stored(|d| &d.base.kind, |d| &mut d.base.kind),
                )
                .key_path("meta.kind"),
            )
            .field(
                FieldDescriptor::new(
                    "parent",
                    FieldAccessor::<Self>::opaque(|d| &d.parent, |d| &mut d.parent),
                )
                .storage(StoragePolicy::Weak),
            )
            .computed("display")
            .post_build(|d: &mut Self| d.base.kind.push_str("+derived"));
    }
}

#[test]
fn inherited_fields_come_first_and_overrides_keep_position() -> Result<()> {
    let table = describe::<Derived>();
    ensure!(
        table.field_names() == ["id", "kind", "label", "parent"],
        "unexpected order {:?}",
        table.field_names()
    );
    let kind = table.field("kind").ok_or_else(|| anyhow!("missing kind"))?;
    ensure!(
        kind.resolved_key_path().map(crate::KeyPath::as_str) == Some("meta.kind"),
        "override did not replace the inherited descriptor"
    );
    Ok(())
}

#[test]
fn computed_fields_never_reach_the_table() {
    let table = describe::<Derived>();
    assert!(table.field("display").is_none());
    assert_eq!(table.len(), 4);
}

#[test]
fn weak_fields_are_transitory_and_unmapped() -> Result<()> {
    let table = describe::<Derived>();
    let parent = table.field("parent").ok_or_else(|| anyhow!("missing parent"))?;
    ensure!(parent.behavior() == StorageBehavior::Transitory, "weak must be transitory");
    ensure!(!parent.is_mapped(), "weak must not be mapped by default");
    ensure!(
        table.permanent_fields().all(|f| f.name() != "parent"),
        "weak field listed as permanent"
    );
    let mapped: Vec<&str> = table.mapped_fields().map(FieldDescriptor::name).collect();
    ensure!(mapped == ["id", "kind", "label"], "unexpected mapped fields {mapped:?}");
    Ok(())
}

#[test]
fn post_build_hooks_run_parent_first() {
    let table = describe::<Derived>();
    let mut derived = Derived::default();
    table.run_post_build(&mut derived);
    assert_eq!(derived.base.kind, "+base+derived");
}

#[test]
fn describe_returns_the_cached_table() {
    let first = describe::<Base>();
    let second = describe::<Base>();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn lifted_accessors_reach_the_embedded_model() -> Result<()> {
    let table = describe::<Derived>();
    let id = table.field("id").ok_or_else(|| anyhow!("missing id"))?;
    let mut derived = Derived::default();
    id.assign(&mut derived, json!(42))?;
    ensure!(derived.base.id == 42, "lifted setter missed the base");
    ensure!(id.read(&derived)? == json!(42), "lifted getter missed the base");
    Ok(())
}

#[rstest]
#[case::optional_becomes_none("label", Value::Null)]
#[case::plain_becomes_default("id", json!(0))]
fn null_assigns_the_absent_value(#[case] name: &str, #[case] expected: Value) -> Result<()> {
    let table = describe::<Derived>();
    let field = table.field(name).ok_or_else(|| anyhow!("missing {name}"))?;
    let mut derived = Derived {
        base: Base {
            id: 9,
            kind: String::new(),
        },
        label: Some("x".to_owned()),
        parent: Weak::new(),
    };
    field.assign(&mut derived, Value::Null)?;
    ensure!(field.read(&derived)? == expected, "unexpected absent value");
    Ok(())
}

#[test]
fn mismatched_values_fail_assignment() {
    let table = describe::<Base>();
    let id = table.field("id").map(|f| f.assign(&mut Base::default(), json!("seven")));
    assert!(matches!(
        id,
        Some(Err(crate::MappingError::FieldAssignment { ref field, .. })) if field == "id"
    ));
}

#[test]
fn fields_without_setters_refuse_values() {
    let table = describe::<Derived>();
    let outcome = table
        .field("parent")
        .map(|f| f.assign(&mut Derived::default(), json!("garbage")));
    assert!(matches!(
        outcome,
        Some(Err(crate::MappingError::NotSettable { ref field })) if field == "parent"
    ));
}

#[test]
fn custom_accessors_are_persistent_without_storage() -> Result<()> {
    let accessor = FieldAccessor::<Base>::custom(
        |b| Ok(json!(format!("#{}", b.id))),
        |b, value| {
            let text: String = serde_json::from_value(value)?;
            b.id = text.trim_start_matches('#').parse().unwrap_or_default();
            Ok(())
        },
    );
    ensure!(accessor.is_persistent(), "custom accessor must be persistent");
    ensure!(!accessor.has_storage(), "custom accessor has no storage");
    let descriptor = FieldDescriptor::new("tag", accessor);
    let mut base = Base::default();
    descriptor.assign(&mut base, json!("#12"))?;
    ensure!(base.id == 12, "custom setter not used");
    ensure!(descriptor.read(&base)? == json!("#12"), "custom getter not used");
    Ok(())
}

#[test]
fn failed_custom_copies_keep_the_base_value() {
    let descriptor = FieldDescriptor::new(
        "tag",
        FieldAccessor::<Base>::custom(
            |b| {
                if b.id == 0 {
                    serde_json::from_str("not json")
                } else {
                    Ok(json!(b.id))
                }
            },
            |b, value| {
                b.id = serde_json::from_value(value)?;
                Ok(())
            },
        ),
    );
    let mut base = Base {
        id: 5,
        kind: String::new(),
    };
    descriptor.replace(&mut base, &Base::default());
    assert_eq!(base.id, 5);
    let other = Base {
        id: 7,
        kind: String::new(),
    };
    descriptor.replace(&mut base, &other);
    assert_eq!(base.id, 7);
}

fn build<M>(
    declare: impl FnOnce(&mut TableBuilder<M>),
) -> Result<FieldDescriptorTable<M>, TableError> {
    let mut builder = TableBuilder::new();
    declare(&mut builder);
    builder.try_build()
}

fn id_field() -> FieldDescriptor<Base> {
    FieldDescriptor::new("id", FieldAccessor::<Base>::stored(|b| &b.id, |b| &mut b.id))
}

fn kind_field() -> FieldDescriptor<Base> {
    FieldDescriptor::new("kind", FieldAccessor::<Base>::stored(|b| &b.kind, |b| &mut b.kind))
}

#[test]
fn rejects_malformed_key_paths() {
    let err = build(|t| {
        t.field(id_field().key_path("a..b"));
    })
    .expect_err("empty segment");
    assert!(matches!(err, TableError::InvalidKeyPath { ref field, .. } if field == "id"));
}

#[test]
fn rejects_unknown_transformer_names() {
    let err = build(|t| {
        t.field(id_field().transformer_named("tests.descriptor.missing"));
    })
    .expect_err("unregistered name");
    assert_eq!(
        err,
        TableError::UnknownTransformer {
            field: "id".to_owned(),
            name: "tests.descriptor.missing".to_owned(),
        }
    );
}

#[test]
fn mapped_fields_need_reversible_transformers() {
    let forward = Transformer::forward_only(Ok).with_label("one-way");
    let err = build(|t| {
        t.field(id_field().transformer(forward.clone()));
    })
    .expect_err("forward-only on a mapped field");
    assert!(matches!(
        err,
        TableError::MissingReverse { ref transformer, .. } if transformer == "one-way"
    ));

    let unmapped = build(|t| {
        t.field(id_field().transformer(forward).unmapped());
    });
    assert!(unmapped.is_ok(), "unmapped fields may use forward-only transformers");
}

#[test]
fn opaque_fields_cannot_be_mapped() {
    let err = build(|t: &mut TableBuilder<Derived>| {
        t.field(
            FieldDescriptor::new(
                "parent",
                FieldAccessor::<Derived>::opaque(|d| &d.parent, |d| &mut d.parent),
            )
            .key_path("parent"),
        );
    })
    .expect_err("opaque field with a key path");
    assert_eq!(err, TableError::UnmappableField { field: "parent".to_owned() });
}

#[rstest]
#[case::same_path("a", "a")]
#[case::nested_under_leaf("a", "a.b")]
#[case::leaf_over_nested("a.b", "a")]
fn rejects_overlapping_key_paths(#[case] first: &str, #[case] second: &str) {
    let err = build(|t| {
        t.field(id_field().key_path(first)).field(kind_field().key_path(second));
    })
    .expect_err("overlapping paths");
    assert!(matches!(
        err,
        TableError::DuplicateKeyPath {
            ref first,
            ref second,
            ..
        } if first == "id" && second == "kind"
    ));
}

#[test]
fn sibling_key_paths_do_not_overlap() {
    let table = build(|t| {
        t.field(id_field().key_path("meta.id")).field(kind_field().key_path("meta.kind"));
    });
    assert!(table.is_ok());
}

#[derive(Clone, Default)]
struct Broken;

impl Model for Broken {
    fn declare(table: &mut TableBuilder<Self>) {
        table.field(
            FieldDescriptor::new(
                "x",
                FieldAccessor::<Self>::custom(|_| Ok(Value::Null), |_, _| Ok(())),
            )
                .key_path(""),
        );
    }
}

#[test]
fn try_describe_reports_configuration_errors() {
    assert!(matches!(
        try_describe::<Broken>(),
        Err(TableError::InvalidKeyPath { .. })
    ));
}

#[test]
#[should_panic(expected = "invalid model declaration")]
fn describe_panics_on_configuration_errors() {
    let _table = describe::<Broken>();
}
