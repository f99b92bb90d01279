//! Tests for dotted attribute/item access and auto-invocation.

use std::collections::BTreeMap;
use std::fmt::{Formatter, Result as FmtResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use templite::{Context, Function, Object, Record, RenderError, Template, Value, context};

fn render(text: &str, context: &Context) -> Result<String, RenderError> {
    Template::new(text).unwrap().render(context)
}

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect(),
    )
}

/// A host object with one attribute and keyed access to a row of cells.
#[derive(Debug)]
struct Row {
    id: i64,
    cells: BTreeMap<String, Value>,
}

impl Object for Row {
    fn type_name(&self) -> &str {
        "Row"
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        (name == "id").then(|| self.id.into())
    }

    fn item(&self, key: &str) -> Option<Value> {
        self.cells.get(key).cloned()
    }

    fn iterate(&self) -> Option<Vec<Value>> {
        Some(self.cells.values().cloned().collect())
    }

    fn render(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Row#{}", self.id)
    }
}

fn row() -> Value {
    Value::object(Row {
        id: 7,
        cells: BTreeMap::from([
            ("a".to_string(), Value::from("alpha")),
            ("id".to_string(), Value::from("shadowed")),
        ]),
    })
}

// =============================================================================
// Keyed and attribute access
// =============================================================================

#[test]
fn test_map_key_access() {
    let user = map(&[("name", "Ann".into())]);
    assert_eq!(render("{{ user.name }}", &context! { "user" => user }).unwrap(), "Ann");
}

#[test]
fn test_nested_map_access() {
    let user = map(&[("address", map(&[("city", "Oslo".into())]))]);
    assert_eq!(
        render("{{ user.address.city }}", &context! { "user" => user }).unwrap(),
        "Oslo"
    );
}

#[test]
fn test_record_attribute_access() {
    let user = Record::builder().type_name("User").build().with("name", "Ann");
    assert_eq!(render("{{ user.name }}", &context! { "user" => user }).unwrap(), "Ann");
}

#[test]
fn test_list_index_access() {
    let c = context! { "items" => vec!["zero", "one", "two"] };
    assert_eq!(render("{{ items.1 }}", &c).unwrap(), "one");
}

#[test]
fn test_list_index_out_of_range() {
    let c = context! { "items" => vec![1] };
    assert_eq!(
        render("{{ items.5 }}", &c).unwrap_err(),
        RenderError::DotResolution {
            key: "5".into(),
            type_name: "list".into(),
        }
    );
}

#[test]
fn test_missing_map_key() {
    let c = context! { "m" => map(&[("a", 1.into())]) };
    let err = render("{{ m.nope }}", &c).unwrap_err();
    assert_eq!(
        err,
        RenderError::DotResolution {
            key: "nope".into(),
            type_name: "map".into(),
        }
    );
    insta::assert_snapshot!(err.to_string(), @"cannot resolve '.nope' on map");
}

#[test]
fn test_scalar_has_no_items() {
    let err = render("{{ n.x }}", &context! { "n" => 3 }).unwrap_err();
    assert_eq!(
        err,
        RenderError::DotResolution {
            key: "x".into(),
            type_name: "number".into(),
        }
    );
}

// =============================================================================
// Attribute before item
// =============================================================================

#[test]
fn test_attribute_wins_over_item() {
    let c = context! { "r" => row() };
    assert_eq!(render("{{ r.id }}", &c).unwrap(), "7");
    assert_eq!(render("{{ r.a }}", &c).unwrap(), "alpha");
}

#[test]
fn test_object_without_attribute_or_item_fails() {
    let err = render("{{ r.missing }}", &context! { "r" => row() }).unwrap_err();
    assert_eq!(
        err,
        RenderError::DotResolution {
            key: "missing".into(),
            type_name: "Row".into(),
        }
    );
}

#[test]
fn test_map_len_is_size_without_len_key() {
    let m = map(&[("a", 1.into()), ("b", 2.into())]);
    assert_eq!(render("{{ m.len }}", &context! { "m" => m }).unwrap(), "2");
}

#[test]
fn test_stored_len_key_wins_over_map_size() {
    let stats = map(&[("len", 5.into()), ("a", 1.into())]);
    assert_eq!(render("{{ stats.len }}", &context! { "stats" => stats }).unwrap(), "5");
}

#[test]
fn test_map_view_attributes_shadow_map_keys() {
    let m = map(&[("keys", "stored".into()), ("x", 1.into())]);
    assert_eq!(render("{{ m.keys }}", &context! { "m" => m }).unwrap(), "[keys, x]");
}

#[test]
fn test_builtin_string_and_list_attributes() {
    let c = context! { "name" => " Ann ", "xs" => vec![3, 4, 5] };
    assert_eq!(render("{{ name.upper }}", &c).unwrap(), " ANN ");
    assert_eq!(render("{{ name.trim }}", &c).unwrap(), "Ann");
    assert_eq!(render("{{ name.len }}", &c).unwrap(), "5");
    assert_eq!(render("{{ xs.first }}{{ xs.last }}", &c).unwrap(), "35");
}

#[test]
fn test_map_items_attribute() {
    let m = map(&[("a", 1.into()), ("b", 2.into())]);
    let output = render(
        "{% for pair in m.items %}{{ pair.0 }}={{ pair.1 }};{% endfor %}",
        &context! { "m" => m },
    )
    .unwrap();
    assert_eq!(output, "a=1;b=2;");
}

#[test]
fn test_object_iteration_and_display() {
    let c = context! { "r" => row() };
    assert_eq!(
        render("{% for cell in r %}{{ cell }},{% endfor %}", &c).unwrap(),
        "alpha,shadowed,"
    );
    assert_eq!(render("{{ r }}", &c).unwrap(), "Row#7");
}

// =============================================================================
// Auto-invocation
// =============================================================================

#[test]
fn test_zero_argument_callable_is_invoked() {
    let user = map(&[(
        "name",
        Function::thunk("name", || Ok("Ann".into())).into(),
    )]);
    assert_eq!(render("{{ user.name }}", &context! { "user" => user }).unwrap(), "Ann");
}

#[test]
fn test_intermediate_callable_is_invoked() {
    let profile = Function::thunk("profile", || {
        Ok(map(&[("city", "Oslo".into())]))
    });
    let user = Record::builder()
        .type_name("User")
        .build()
        .with("profile", profile);
    assert_eq!(
        render("{{ user.profile.city }}", &context! { "user" => user }).unwrap(),
        "Oslo"
    );
}

#[test]
fn test_final_callable_is_invoked_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let outer = Function::thunk("outer", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Function::thunk("inner", || Ok("deep".into())).into())
    });
    let obj = map(&[("get", outer.into())]);
    let output = render("{{ obj.get }}", &context! { "obj" => obj }).unwrap();
    assert_eq!(output, "<function inner>");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_base_value_is_not_invoked() {
    let f = Function::thunk("f", || Ok("called".into()));
    assert_eq!(
        render("{{ f }}", &context! { "f" => f }).unwrap(),
        "<function f>"
    );
}

#[test]
fn test_callable_needing_arguments_fails() {
    let needs_arg = Function::filter("shout", |v| Ok(format!("{v}!").into()));
    let obj = map(&[("shout", needs_arg.into())]);
    let err = render("{{ obj.shout }}", &context! { "obj" => obj }).unwrap_err();
    assert_eq!(
        err,
        RenderError::ArgumentCount {
            function: "shout".into(),
            expected: 1,
            got: 0,
        }
    );
}

#[test]
fn test_filter_after_dot_chain() {
    let upper = Function::filter("upper", |v| Ok(v.to_string().to_uppercase().into()));
    let user = map(&[("name", "ann".into())]);
    assert_eq!(
        render(
            "{{ user.name|upper }}",
            &context! { "user" => user, "upper" => upper }
        )
        .unwrap(),
        "ANN"
    );
}
