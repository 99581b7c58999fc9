//! Markup identity and tagged markup output.

use widl_parser::{Construct, Marker, NullMarker, Parser};

/// Wraps every element in an angle-bracket tag, mirroring how a
/// documentation generator would anchor spans.
struct TagMarker;

impl Marker for TagMarker {
    fn markup_construct(
        &mut self,
        _text: &str,
        construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (
            Some(format!("<c {}>", construct.idl_type())),
            Some("</c>".to_string()),
        )
    }

    fn markup_type(
        &mut self,
        _text: &str,
        _construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (Some("<t>".to_string()), Some("</t>".to_string()))
    }

    fn markup_primitive_type(
        &mut self,
        _text: &str,
        _construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (Some("<p>".to_string()), Some("</p>".to_string()))
    }

    fn markup_string_type(
        &mut self,
        _text: &str,
        _construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (Some("<s>".to_string()), Some("</s>".to_string()))
    }

    fn markup_name(
        &mut self,
        _text: &str,
        _construct: Option<&dyn Construct>,
    ) -> (Option<String>, Option<String>) {
        (Some("<n>".to_string()), Some("</n>".to_string()))
    }

    fn markup_keyword(
        &mut self,
        _text: &str,
        _construct: Option<&dyn Construct>,
    ) -> (Option<String>, Option<String>) {
        (Some("<k>".to_string()), Some("</k>".to_string()))
    }

    fn markup_enum_value(
        &mut self,
        _text: &str,
        _construct: Option<&dyn Construct>,
    ) -> (Option<String>, Option<String>) {
        (Some("<ev>".to_string()), Some("</ev>".to_string()))
    }
}

/// Collects everything routed through `encode`, to prove every byte of the
/// input reaches the marker exactly once.
#[derive(Default)]
struct EncodeRecorder {
    seen: String,
}

impl Marker for EncodeRecorder {
    fn encode(&mut self, text: &str) -> String {
        self.seen.push_str(text);
        text.to_string()
    }
}

#[test]
fn test_null_marker_is_identity() {
    let sources = [
        "interface Foo { attribute long bar; };",
        "dictionary D : Base { required long x; DOMString y = \"hi\"; };",
        "enum bar{\"one\",\"two\",\"three\",}; // tail\n",
        "callback C = void (long x);",
        "interface Foo { garbage; attribute long bar; };",
        "[Constructor(long x)] interface Foo { };",
        "  // leading trivia only\n",
    ];
    for source in sources {
        let parser = Parser::from_text(source);
        assert_eq!(parser.markup(&mut NullMarker), source, "{source:?}");
    }
}

#[test]
fn test_encode_sees_all_unmarked_text() {
    let source = "interface Foo { attribute long bar; };";
    let parser = Parser::from_text(source);
    let mut recorder = EncodeRecorder::default();
    let output = parser.markup(&mut recorder);
    assert_eq!(output, source);
    assert_eq!(recorder.seen, source);
}

#[test]
fn test_tagged_markup_of_attribute() {
    let source = "interface Foo { attribute long bar; };";
    let parser = Parser::from_text(source);
    let marked = parser.markup(&mut TagMarker);
    assert_eq!(
        marked,
        "<c interface><k>interface</k> <n>Foo</n> { \
         <c attribute><k>attribute</k> <t><p><k>long</k></p></t> <n>bar</n>;</c> \
         };</c>"
    );
}

#[test]
fn test_tagged_markup_of_enum() {
    let source = "enum E { \"a\", \"b\" };";
    let parser = Parser::from_text(source);
    let marked = parser.markup(&mut TagMarker);
    assert_eq!(
        marked,
        "<c enum><k>enum</k> <n>E</n> { <ev>\"a\"</ev>, <ev>\"b\"</ev> };</c>"
    );
}

#[test]
fn test_types_nest_inside_types() {
    let source = "typedef sequence<long> S;";
    let parser = Parser::from_text(source);
    let marked = parser.markup(&mut TagMarker);
    // The inner type is its own region inside the outer one.
    assert_eq!(
        marked,
        "<c typedef><k>typedef</k> <t><k>sequence</k><<t><p><k>long</k></p></t>></t> <n>S</n>;</c>"
    );
}

#[test]
fn test_markup_of_single_found_construct() {
    let source = "interface Foo { attribute long bar; };";
    let parser = Parser::from_text(source);
    let bar = parser.find("Foo/bar").expect("member");
    assert_eq!(bar.markup(&mut NullMarker), "attribute long bar;");
    assert_eq!(
        bar.markup(&mut TagMarker),
        "<c attribute><k>attribute</k> <t><p><k>long</k></p></t> <n>bar</n>;</c>"
    );
}

#[test]
fn test_string_type_markup() {
    let source = "typedef DOMString S;";
    let parser = Parser::from_text(source);
    let marked = parser.markup(&mut TagMarker);
    assert_eq!(
        marked,
        "<c typedef><k>typedef</k> <t><s><k>DOMString</k></s></t> <n>S</n>;</c>"
    );
}
