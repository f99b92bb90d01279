//! Tests for the standard filter set.

use templite::{Context, RenderError, Template, Value, context, standard_filters};

fn render(text: &str, overrides: &Context) -> Result<String, RenderError> {
    Template::with_contexts(text, [standard_filters()])
        .unwrap()
        .render(overrides)
}

#[test]
fn test_standard_filter_names() {
    let filters = standard_filters();
    let names: Vec<&str> = filters.names().collect();
    assert_eq!(
        names,
        vec![
            "capitalize",
            "first",
            "join",
            "last",
            "length",
            "lower",
            "reverse",
            "trim",
            "upper",
        ]
    );
    assert!(filters.iter().all(|(_, value)| value.as_function().is_some()));
}

#[test]
fn test_case_filters() {
    let c = context! { "s" => "hELLO wORLD" };
    assert_eq!(render("{{ s|upper }}", &c).unwrap(), "HELLO WORLD");
    assert_eq!(render("{{ s|lower }}", &c).unwrap(), "hello world");
    assert_eq!(render("{{ s|capitalize }}", &c).unwrap(), "Hello world");
}

#[test]
fn test_capitalize_empty_string() {
    assert_eq!(render("[{{ s|capitalize }}]", &context! { "s" => "" }).unwrap(), "[]");
}

#[test]
fn test_upper_stringifies_non_strings() {
    assert_eq!(render("{{ b|upper }}", &context! { "b" => true }).unwrap(), "TRUE");
}

#[test]
fn test_trim() {
    assert_eq!(render("[{{ s|trim }}]", &context! { "s" => "  pad  " }).unwrap(), "[pad]");
}

#[test]
fn test_length() {
    let c = context! { "s" => "héllo", "xs" => vec![1, 2, 3] };
    assert_eq!(render("{{ s|length }}", &c).unwrap(), "5");
    assert_eq!(render("{{ xs|length }}", &c).unwrap(), "3");
}

#[test]
fn test_length_of_number_fails() {
    let err = render("{{ n|length }}", &context! { "n" => 4 }).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"function 'length' failed: unsupported value of type number");
}

#[test]
fn test_reverse() {
    let c = context! { "s" => "abc", "xs" => vec![1, 2, 3] };
    assert_eq!(render("{{ s|reverse }}", &c).unwrap(), "cba");
    assert_eq!(render("{{ xs|reverse }}", &c).unwrap(), "[3, 2, 1]");
}

#[test]
fn test_first_and_last() {
    let c = context! { "s" => "abc", "xs" => vec![1, 2, 3] };
    assert_eq!(render("{{ s|first }}{{ s|last }}", &c).unwrap(), "ac");
    assert_eq!(render("{{ xs|first }}{{ xs|last }}", &c).unwrap(), "13");
}

#[test]
fn test_first_of_empty_list_is_none() {
    let empty: Vec<Value> = Vec::new();
    assert_eq!(
        render("[{{ xs|first }}]", &context! { "xs" => empty }).unwrap(),
        "[]"
    );
}

#[test]
fn test_join() {
    let c = context! { "xs" => vec!["a", "b", "c"] };
    assert_eq!(render("{{ xs|join }}", &c).unwrap(), "a, b, c");
}

#[test]
fn test_filters_compose_with_loops() {
    let c = context! { "names" => vec!["ann", "bob"] };
    assert_eq!(
        render("{% for n in names|reverse %}{{ n|capitalize }} {% endfor %}", &c).unwrap(),
        "Bob Ann "
    );
}

#[test]
fn test_override_can_replace_standard_filter() {
    let shout = templite::Function::filter("upper", |v| Ok(format!("{v}!").into()));
    let c = context! { "s" => "hi", "upper" => shout };
    assert_eq!(render("{{ s|upper }}", &c).unwrap(), "hi!");
}
