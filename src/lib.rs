//! # widl-parser
//!
//! A lossless parser for the WebIDL interface-definition language, with a
//! handful of legacy compatibility accommodations.
//!
//! The crate is three layers, text flowing down and queries flowing up:
//!
//! 1. [`tokenizer`] — lossless lexing into a rewindable token stream that
//!    keeps whitespace and comments as first-class tokens;
//! 2. [`productions`] — recursive-descent grammar productions that consume
//!    tokens speculatively and re-emit their exact source text;
//! 3. [`constructs`] — named, navigable entities (interfaces, dictionaries,
//!    callbacks, ...) composed of productions.
//!
//! [`Parser`] ties them together: it owns the top-level constructs, answers
//! name and path queries, normalizes method names, drives marker-based
//! markup, and serializes back to the exact input text. Parsing never
//! fails: non-conforming runs become `SyntaxError` constructs, reported
//! through the [`UserInterface`] callbacks, and still round-trip.
//!
//! ```
//! use widl_parser::{Construct, Parser};
//!
//! let source = "interface Foo { attribute long bar; };";
//! let parser = Parser::from_text(source);
//! assert_eq!(parser.to_string(), source);
//!
//! let bar = parser.find("Foo/bar").unwrap();
//! assert_eq!(bar.idl_type().as_str(), "attribute");
//! ```

pub mod constructs;
pub mod diagnostics;
pub mod markup;
pub mod parser;
pub mod productions;
pub mod tokenizer;

pub use constructs::{Construct, IdlType};
pub use diagnostics::{CollectingUi, UserInterface};
pub use markup::{Marker, MarkupGenerator, NullMarker};
pub use parser::{Parser, TopLevel};
pub use productions::Production;
pub use tokenizer::{Token, TokenKind};
