//! Name search, path resolution, and method-name normalization.

use rstest::rstest;
use widl_parser::{Construct, IdlType, Parser};

const SOURCE: &str = r#"interface Foo {
    undefined draw(long x, optional long y);
    unsigned long long method(short x, unsigned long long y, optional double inf = Infinity, sequence<Foo>... fooArg);
    const short fortyTwo = 42;
};
interface LinkStyle {
    stringifier attribute DOMString mediaText;
    getter setter object bob (DOMString name);
};
dictionary D : Base {
    required long x;
    DOMString y = "hi";
};
callback C = void (long cbArg);
Window implements WindowInterface;
"#;

fn parser() -> Parser {
    Parser::from_text(SOURCE)
}

#[test]
fn test_find_member_by_path() {
    let parser = parser();
    let bar = parser.find("Foo/draw").expect("found");
    assert_eq!(bar.idl_type(), IdlType::Method);
    assert_eq!(bar.name().as_deref(), Some("draw"));
}

#[rstest]
#[case("Foo/draw", IdlType::Method)]
#[case("Foo.draw", IdlType::Method)]
#[case("Foo/method/y", IdlType::Argument)]
#[case("Foo/fortyTwo", IdlType::Const)]
#[case("Foo(constructor)", IdlType::Interface)]
#[case("LinkStyle/mediaText", IdlType::Attribute)]
#[case("D/x", IdlType::DictMember)]
#[case("C/cbArg", IdlType::Argument)]
#[case("Window", IdlType::Implements)]
#[case("mediaText", IdlType::Attribute)]
#[case("fooArg", IdlType::Argument)]
fn test_find_paths(#[case] path: &str, #[case] expected: IdlType) {
    let parser = parser();
    let found = parser.find(path).unwrap_or_else(|| panic!("{path} not found"));
    assert_eq!(found.idl_type(), expected, "{path}");
}

#[test]
fn test_find_by_idl_type_segment() {
    let parser = parser();
    let found = parser.find("Foo/method").expect("found");
    assert_eq!(found.idl_type(), IdlType::Method);
    // The idl_type tag works as a segment too.
    let found = parser.find("D/dict-member").expect("found");
    assert_eq!(found.name().as_deref(), Some("y"));
}

#[test]
fn test_find_missing_returns_none() {
    let parser = parser();
    assert!(parser.find("Nope").is_none());
    assert!(parser.find("Foo/nope").is_none());
    assert!(parser.find("Foo/draw/nope").is_none());
}

#[test]
fn test_find_prefers_later_declarations() {
    let parser = Parser::from_text("interface A { };\ninterface A { attribute long x; };");
    let found = parser.find("A").expect("found");
    assert_eq!(found.members().len(), 1);
}

#[test]
fn test_find_all_collects_in_source_order() {
    let parser = Parser::from_text(
        "interface A { undefined m(long x); };\ninterface B { undefined m(short y); };",
    );
    let all = parser.find_all("m");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].full_name().as_deref(), Some("A/m(x)"));
    assert_eq!(all[1].full_name().as_deref(), Some("B/m(y)"));
}

#[test]
fn test_method_names_expand_optionals_and_variadics() {
    let parser = parser();
    let draw = parser.find("Foo/draw").expect("found");
    assert_eq!(draw.method_names(), vec!["draw(x, y)", "draw(x)"]);
    let method = parser.find("Foo/method").expect("found");
    assert_eq!(
        method.method_names(),
        vec![
            "method(x, y, inf, ...fooArg)",
            "method(x, y, inf)",
            "method(x, y)",
        ]
    );
    assert_eq!(
        method.method_name().as_deref(),
        Some("method(x, y, inf, ...fooArg)")
    );
}

#[test]
fn test_method_name_canonicality() {
    let parser = parser();
    for path in ["Foo/draw", "Foo/method"] {
        let method = parser.find(path).expect("found");
        assert_eq!(
            method.method_names().first().cloned(),
            method.method_name(),
            "{path}"
        );
    }
}

#[rstest]
#[case("draw", None, "draw(x, y)")]
#[case("draw()", Some("Foo"), "draw()")]
// A match on a shorter variant still normalizes to the full form.
#[case("draw(x)", Some("Foo"), "draw(x, y)")]
#[case("unknown", None, "unknown()")]
#[case("testMethod(short one, double two)", None, "testMethod(one, two)")]
#[case("bob(xxx)", Some("LinkStyle"), "bob(xxx)")]
#[case("bob", None, "bob(name)")]
fn test_normalized_method_name(
    #[case] text: &str,
    #[case] interface: Option<&str>,
    #[case] expected: &str,
) {
    let parser = parser();
    assert_eq!(parser.normalized_method_name(text, interface), expected);
}

#[test]
fn test_normalized_method_names_variants() {
    let parser = parser();
    assert_eq!(
        parser.normalized_method_names("method", Some("Foo")),
        vec![
            "method(x, y, inf, ...fooArg)",
            "method(x, y, inf)",
            "method(x, y)",
        ]
    );
    // A parseable argument list normalizes on its own, without a search.
    assert_eq!(
        parser.normalized_method_names("testMethod(short one, optional double two)", None),
        vec!["testMethod(one, two)", "testMethod(one)"]
    );
    assert_eq!(
        parser.normalized_method_names("unknown", None),
        vec!["unknown()"]
    );
}

#[test]
fn test_normalized_name_first_variant_matches_singular() {
    let parser = parser();
    for text in ["method", "draw", "bob"] {
        let names = parser.normalized_method_names(text, None);
        assert_eq!(names[0], parser.normalized_method_name(text, None), "{text}");
    }
}

#[test]
fn test_full_name_reachability() {
    let parser = parser();
    for path in ["Foo", "Foo/draw", "Foo/fortyTwo", "D/x"] {
        let construct = parser.find(path).expect("found");
        let full_name = construct.full_name().expect("named");
        let again = parser.find(&full_name).expect("reachable by full name");
        assert_eq!(again.idl_type(), construct.idl_type(), "{path}");
        assert_eq!(again.name(), construct.name(), "{path}");
    }
}

#[test]
fn test_constructor_queries() {
    let parser = Parser::from_text(
        "[Constructor, Constructor(long x)] interface Foo { attribute long bar; };",
    );
    let interface = parser.find("Foo").expect("found");
    let constructors = interface.constructors();
    assert_eq!(constructors.len(), 2);
    assert_eq!(constructors[0].normal_name().as_deref(), Some("Foo()"));
    assert_eq!(constructors[1].normal_name().as_deref(), Some("Foo(x)"));
    // Constructors are the head of the member list.
    assert_eq!(interface.members()[0].idl_type(), IdlType::Constructor);
    let constructor = parser.find("Foo/constructor").expect("found");
    assert_eq!(constructor.idl_type(), IdlType::Constructor);
}

#[test]
fn test_has_parent() {
    let parser = parser();
    let top = parser.find("Foo").expect("found");
    assert!(!top.has_parent());
    let member = parser.find("Foo/draw").expect("found");
    assert!(member.has_parent());
    assert_eq!(member.parent().and_then(|p| p.name.as_deref()), Some("Foo"));
}
