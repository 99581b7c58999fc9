//! Token definitions for WebIDL
//!
//! Raw tokenization is handled entirely by a logos lexer; a single mapping
//! pass folds the raw tokens into [`Token`] values carrying the exact source
//! text and byte offset. Whitespace and comments are real tokens here, not
//! discarded trivia, because the parse tree must reproduce its input
//! byte-for-byte.

use logos::Logos;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

/// Identifier-shaped text that WebIDL reserves as keywords. These tokenize
/// as [`TokenKind::Symbol`] rather than [`TokenKind::Identifier`].
pub static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "any",
        "async",
        "attribute",
        "ArrayBuffer",
        "bigint",
        "boolean",
        "byte",
        "ByteString",
        "callback",
        "const",
        "constructor",
        "creator",
        "DataView",
        "deleter",
        "dictionary",
        "DOMString",
        "double",
        "enum",
        "Error",
        "false",
        "float",
        "Float32Array",
        "Float64Array",
        "FrozenArray",
        "getter",
        "implements",
        "includes",
        "inherit",
        "Int8Array",
        "Int16Array",
        "Int32Array",
        "interface",
        "iterable",
        "legacycaller",
        "legacyiterable",
        "long",
        "maplike",
        "mixin",
        "namespace",
        "null",
        "object",
        "ObservableArray",
        "octet",
        "optional",
        "or",
        "partial",
        "Promise",
        "readonly",
        "record",
        "required",
        "sequence",
        "serializer",
        "setlike",
        "setter",
        "short",
        "static",
        "stringifier",
        "true",
        "typedef",
        "Uint8Array",
        "Uint16Array",
        "Uint32Array",
        "Uint8ClampedArray",
        "undefined",
        "unrestricted",
        "unsigned",
        "USVString",
    ]
    .into_iter()
    .collect()
});

/// Float literals spelled as words. They tokenize as [`TokenKind::Float`]
/// but mark up as keywords.
pub const FLOAT_WORDS: [&str; 3] = ["Infinity", "-Infinity", "NaN"];

/// All possible token kinds in WebIDL source text.
///
/// End of input is not materialized as a token; the stream reports it by
/// returning `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A keyword or punctuator.
    Symbol,
    Identifier,
    Integer,
    Float,
    /// A double-quoted string literal, quotes included.
    String,
    Whitespace,
    Comment,
    /// A byte that matched no rule; kept verbatim so recovery can resume.
    Unknown,
}

/// One lexical unit: kind, exact source text, and byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

impl Token {
    pub fn is_symbol(&self) -> bool {
        self.kind == TokenKind::Symbol
    }

    pub fn is_symbol_eq(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == symbol
    }

    pub fn is_symbol_of(&self, symbols: &[&str]) -> bool {
        self.kind == TokenKind::Symbol && symbols.contains(&self.text.as_str())
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_identifier_eq(&self, identifier: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == identifier
    }

    pub fn is_identifier_of(&self, identifiers: &[&str]) -> bool {
        self.kind == TokenKind::Identifier && identifiers.contains(&self.text.as_str())
    }

    pub fn is_integer(&self) -> bool {
        self.kind == TokenKind::Integer
    }

    pub fn is_float(&self) -> bool {
        self.kind == TokenKind::Float
    }

    pub fn is_string(&self) -> bool {
        self.kind == TokenKind::String
    }

    /// Whitespace and comments are carried for round-trip fidelity but are
    /// invisible to grammar matching.
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn lex_block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    // Non-nesting; an unterminated comment runs to end of input.
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(index) => lex.bump(index + 2),
        None => lex.bump(remainder.len()),
    }
    true
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"-?(([0-9]+\.[0-9]*|[0-9]*\.[0-9]+)([Ee][+-]?[0-9]+)?|[0-9]+[Ee][+-]?[0-9]+)")]
    #[token("Infinity", priority = 100)]
    #[token("-Infinity", priority = 100)]
    #[token("NaN", priority = 100)]
    Float,

    #[regex(r"-?(0[Xx][0-9A-Fa-f]+|0[0-7]*|[1-9][0-9]*)")]
    Integer,

    // Keywords are re-kinded to symbols after the fact; logos only sees
    // identifier-shaped text here.
    #[regex(r"[_-]?[A-Za-z][0-9A-Za-z_-]*")]
    Word,

    #[regex(r#""[^"]*""#)]
    Str,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n\r]*")]
    LineComment,

    #[token("/*", lex_block_comment)]
    BlockComment,

    #[token("...")]
    #[token("=>")]
    #[token("(")]
    #[token(")")]
    #[token("[")]
    #[token("]")]
    #[token("{")]
    #[token("}")]
    #[token(",")]
    #[token(";")]
    #[token(":")]
    #[token("?")]
    #[token("=")]
    #[token("<")]
    #[token(">")]
    #[token("-")]
    #[token(".")]
    Punctuator,
}

/// Tokenize `source` losslessly: every byte of the input lands in exactly
/// one token, in order.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = &source[span.clone()];
        match result {
            Ok(raw) => {
                let kind = match raw {
                    RawToken::Float => TokenKind::Float,
                    RawToken::Integer => TokenKind::Integer,
                    RawToken::Word => {
                        if KEYWORDS.contains(text) {
                            TokenKind::Symbol
                        } else {
                            TokenKind::Identifier
                        }
                    }
                    RawToken::Str => TokenKind::String,
                    RawToken::Whitespace => TokenKind::Whitespace,
                    RawToken::LineComment | RawToken::BlockComment => TokenKind::Comment,
                    RawToken::Punctuator => TokenKind::Symbol,
                };
                tokens.push(Token {
                    kind,
                    text: text.to_string(),
                    offset: span.start,
                });
            }
            Err(()) => {
                // One unknown token per character so recovery can resume at
                // the next recognizable point.
                let mut offset = span.start;
                for ch in text.chars() {
                    tokens.push(Token {
                        kind: TokenKind::Unknown,
                        text: ch.to_string(),
                        offset,
                    });
                    offset += ch.len_utf8();
                }
            }
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_lossless() {
        let source = "interface Foo { attribute long bar; }; // tail\n";
        let joined: String = tokenize(source).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn test_keywords_are_symbols() {
        let tokens = tokenize("interface Foo");
        assert_eq!(tokens[0].kind, TokenKind::Symbol);
        assert_eq!(tokens[0].text, "interface");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].text, "Foo");
    }

    #[test]
    fn test_integer_forms() {
        for (source, text) in [
            ("42", "42"),
            ("-7", "-7"),
            ("0xabcdef09", "0xabcdef09"),
            ("0777", "0777"),
            ("0", "0"),
        ] {
            let tokens = tokenize(source);
            assert_eq!(tokens[0].kind, TokenKind::Integer, "{source}");
            assert_eq!(tokens[0].text, text);
        }
    }

    #[test]
    fn test_float_forms() {
        for source in ["1.5", "-0.25", ".5", "3.", "1e5", "-1.5E-2", "Infinity", "-Infinity", "NaN"] {
            let tokens = tokenize(source);
            assert_eq!(tokens[0].kind, TokenKind::Float, "{source}");
            assert_eq!(tokens[0].text, source);
        }
    }

    #[test]
    fn test_identifier_with_dashes_and_underscore() {
        let tokens = tokenize("_interface foo-bar -foo-bar");
        assert_eq!(
            kinds("_interface foo-bar -foo-bar")
                .iter()
                .filter(|(k, _)| *k == TokenKind::Identifier)
                .count(),
            3
        );
        assert_eq!(tokens[0].text, "_interface");
    }

    #[test]
    fn test_infinity_prefixed_identifier_stays_identifier() {
        let tokens = tokenize("Infinity2");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "Infinity2");
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("// line\n/* block */ /* open");
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "// line");
        assert_eq!(tokens[2].kind, TokenKind::Comment);
        assert_eq!(tokens[2].text, "/* block */");
        // Unterminated block comment extends to end of input.
        assert_eq!(tokens[4].kind, TokenKind::Comment);
        assert_eq!(tokens[4].text, "/* open");
    }

    #[test]
    fn test_punctuator_longest_match() {
        let texts: Vec<String> = tokenize("...=>.=").into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["...", "=>", ".", "="]);
    }

    #[test]
    fn test_string_is_opaque() {
        let tokens = tokenize(r#""one \" two""#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        // No escape processing: the literal ends at the first closing quote.
        assert_eq!(tokens[0].text, r#""one \""#);
    }

    #[test]
    fn test_unknown_bytes() {
        let tokens = tokenize("@#");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Unknown));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("ab  cd");
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 2);
        assert_eq!(tokens[2].offset, 4);
    }
}
