//! Property-based round-trip checks: whatever the input, parsing never
//! panics and serialization reproduces it byte-for-byte.

use proptest::prelude::*;
use widl_parser::{NullMarker, Parser};

fn check(source: &str) -> Result<(), TestCaseError> {
    let parser = Parser::from_text(source);
    prop_assert_eq!(parser.to_string(), source);
    prop_assert_eq!(parser.markup(&mut NullMarker), source);
    Ok(())
}

prop_compose! {
    /// IDL-shaped fragments: plausible member soup inside an interface,
    /// with a junk line to keep recovery honest.
    fn idl_like()(
        name in "[A-Za-z][A-Za-z0-9]{0,8}",
        ty in prop_oneof![
            Just("long".to_string()),
            Just("unsigned long long".to_string()),
            Just("DOMString".to_string()),
            Just("sequence<long>".to_string()),
            Just("(short or DOMString)".to_string()),
            Just("Promise<any>?".to_string()),
        ],
        member in "[a-z][a-z0-9]{0,8}",
        junk in "[-;,=<>{}a-z]{0,12}",
    ) -> String {
        format!(
            "interface {name} {{\n  attribute {ty} {member};\n  {junk}\n}};\n"
        )
    }
}

proptest! {
    #[test]
    fn prop_arbitrary_ascii_round_trips(source in "[ -~\n\t]{0,200}") {
        check(&source)?;
    }

    #[test]
    fn prop_arbitrary_unicode_round_trips(source in "\\PC{0,80}") {
        check(&source)?;
    }

    #[test]
    fn prop_idl_like_round_trips(source in idl_like()) {
        check(&source)?;
    }
}
