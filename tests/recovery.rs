//! Error recovery and legacy-form acceptance: the parser never aborts, all
//! failures localize to `SyntaxError` constructs, and both are reported
//! through the user-interface callbacks.

use widl_parser::{CollectingUi, Construct, IdlType, Parser};

fn parse_with_ui(source: &str) -> (Parser, CollectingUi) {
    let ui = CollectingUi::new();
    let handle = ui.clone();
    let mut parser = Parser::with_ui(Box::new(ui));
    parser.parse(source);
    (parser, handle)
}

#[test]
fn test_bad_member_becomes_syntax_error_and_parsing_continues() {
    let source = "interface Foo { garbage; attribute long bar; };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);

    let interface = parser.find("Foo").expect("interface survives");
    let members = interface.members();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].idl_type(), IdlType::Unknown);
    assert_eq!(members[1].idl_type(), IdlType::Attribute);
    assert_eq!(members[1].name().as_deref(), Some("bar"));

    assert_eq!(ui.warnings().len(), 1);
    assert!(ui.warnings()[0].contains("SYNTAX ERROR"));
    assert!(ui.warnings()[0].contains("garbage"));
}

#[test]
fn test_top_level_garbage_recovers_at_semicolon() {
    let source = "this is not idl;\ninterface Foo { };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert_eq!(parser.len(), 2);
    assert_eq!(parser[0].idl_type(), IdlType::Unknown);
    assert_eq!(parser[1].idl_type(), IdlType::Interface);
    assert!(!ui.warnings().is_empty());
}

#[test]
fn test_missing_semicolon_keeps_tail_text() {
    let source = "interface Foo { [two] Foo two()bar; };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert!(ui.warnings().iter().any(|w| w.contains("expected \";\"")));
}

#[test]
fn test_unterminated_construct_warns() {
    let source = "interface Foo { attribute long bar;";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert_eq!(parser.len(), 1);
    assert!(!ui.warnings().is_empty());
}

#[test]
fn test_lexically_unknown_bytes_are_absorbed() {
    let source = "interface Foo { @@ nonsense; attribute long ok; };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert!(parser.find("Foo/ok").is_some());
    assert!(!ui.warnings().is_empty());
}

#[test]
fn test_legacy_in_out_keywords_are_noted() {
    let source = "interface Foo { undefined m(in long x, out long y); };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    let method = parser.find("Foo/m").expect("method parses");
    assert_eq!(method.idl_type(), IdlType::Method);
    // The legacy keywords are dropped from the normalized names but kept in
    // the source span.
    assert_eq!(method.method_name().as_deref(), Some("m(x, y)"));
    assert_eq!(ui.notes().len(), 2);
    assert!(ui.notes()[0].contains("IGNORED LEGACY IDL"));
}

#[test]
fn test_legacy_raises_clause_is_noted() {
    let source = "interface Foo { undefined m() raises (hell); };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert!(parser.find("Foo/m").is_some());
    assert!(ui.notes().iter().any(|n| n.contains("raises")));
}

#[test]
fn test_legacy_multiple_inheritance_is_noted() {
    let source = "interface Multi : One, Two, Three { };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert!(parser.find("Multi").is_some());
    assert!(!ui.notes().is_empty());
}

#[test]
fn test_implements_statement_is_noted() {
    let source = "Window implements WindowInterface;";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert_eq!(parser[0].idl_type(), IdlType::Implements);
    assert!(!ui.notes().is_empty());
}

#[test]
fn test_argument_order_errors_are_reported_not_fatal() {
    let source = "interface Foo { undefined m(optional long x, long y); };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert!(ui
        .warnings()
        .iter()
        .any(|w| w.contains("cannot follow optional")));
}

#[test]
fn test_variadic_order_errors_are_reported_not_fatal() {
    let source = "interface Foo { undefined m(long... rest, long y); };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert!(ui
        .warnings()
        .iter()
        .any(|w| w.contains("variadic")));
}

#[test]
fn test_serializer_members_parse() {
    let source = "interface S { serializer; serializer = { foo }; serializer DOMString toJSON(); };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    let interface = parser.find("S").expect("found");
    let members = interface.members();
    assert_eq!(members.len(), 3);
    assert!(members
        .iter()
        .all(|m| m.idl_type() == IdlType::Serializer));
    assert!(ui.warnings().is_empty());
}

#[test]
fn test_legacy_array_suffix_degrades_to_syntax_error() {
    let source = "typedef short [ ] shortarray;\ninterface Foo { };";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert_eq!(parser[0].idl_type(), IdlType::Unknown);
    assert_eq!(parser[1].idl_type(), IdlType::Interface);
    assert!(!ui.warnings().is_empty());
}

#[test]
fn test_diagnostics_carry_line_numbers() {
    let source = "interface Foo {\n    attribute long ok;\n    garbage here;\n};";
    let (parser, ui) = parse_with_ui(source);
    assert_eq!(parser.to_string(), source);
    assert!(ui.warnings().iter().any(|w| w.contains("LINE: 3")));
}
