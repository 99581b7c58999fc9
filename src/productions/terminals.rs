//! Terminal productions: single-token leaves of the grammar.

use crate::markup::MarkupGenerator;
use crate::productions::{impl_display_via_production, Frame, Production};
use crate::tokenizer::{TokenStream, FLOAT_WORDS, KEYWORDS};

/// A double-quoted string literal, quotes included.
#[derive(Debug, Clone)]
pub struct StringLiteral {
    frame: Frame,
    value: String,
}

impl StringLiteral {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens.peek().is_some_and(|t| t.is_string());
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let value = tokens.next_required().text;
        frame.did_parse(tokens, true);
        StringLiteral { frame, value }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Production for StringLiteral {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        out.push_str(&self.value);
    }
}

/// One specific keyword or punctuator.
#[derive(Debug, Clone)]
pub struct Symbol {
    frame: Frame,
    symbol: String,
}

impl Symbol {
    pub fn peek_any(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens.peek().is_some_and(|t| t.is_symbol());
        tokens.resolve(mark, matched)
    }

    pub fn peek(tokens: &mut TokenStream, symbol: &str) -> bool {
        let mark = tokens.mark();
        let matched = tokens.peek().is_some_and(|t| t.is_symbol_eq(symbol));
        tokens.resolve(mark, matched)
    }

    pub fn peek_of(tokens: &mut TokenStream, symbols: &[&str]) -> bool {
        let mark = tokens.mark();
        let matched = tokens.peek().is_some_and(|t| t.is_symbol_of(symbols));
        tokens.resolve(mark, matched)
    }

    fn new(tokens: &mut TokenStream, expected: Option<&str>, include_trailing_space: bool) -> Self {
        let mut frame = Frame::begin(tokens);
        let symbol = tokens.next_required().text;
        if let Some(expected) = expected {
            debug_assert_eq!(symbol, expected);
        }
        frame.did_parse(tokens, include_trailing_space);
        Symbol { frame, symbol }
    }

    /// Consume an expected symbol and its trailing trivia.
    pub fn parse(tokens: &mut TokenStream, expected: &str) -> Self {
        Symbol::new(tokens, Some(expected), true)
    }

    /// Consume whatever symbol is next and its trailing trivia.
    pub fn parse_any(tokens: &mut TokenStream) -> Self {
        Symbol::new(tokens, None, true)
    }

    /// Consume an expected symbol, leaving trailing trivia in the stream.
    pub fn parse_tight(tokens: &mut TokenStream, expected: &str) -> Self {
        Symbol::new(tokens, Some(expected), false)
    }

    /// Consume whatever symbol is next, leaving trailing trivia alone.
    pub fn parse_any_tight(tokens: &mut TokenStream) -> Self {
        Symbol::new(tokens, None, false)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

impl Production for Symbol {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        out.push_str(&self.symbol);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if KEYWORDS.contains(self.symbol.as_str()) {
            generator.add_keyword(&self.symbol);
        } else {
            generator.add_text(&self.symbol);
        }
        &self.frame
    }
}

/// An integer literal in any of its decimal, hex, or octal spellings.
#[derive(Debug, Clone)]
pub struct Integer {
    frame: Frame,
    value: String,
}

impl Integer {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens.peek().is_some_and(|t| t.is_integer());
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let value = tokens.next_required().text;
        frame.did_parse(tokens, true);
        Integer { frame, value }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Production for Integer {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        out.push_str(&self.value);
    }
}

/// A float literal, including the word forms `Infinity`, `-Infinity`, `NaN`.
#[derive(Debug, Clone)]
pub struct FloatLiteral {
    frame: Frame,
    value: String,
}

impl FloatLiteral {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens.peek().is_some_and(|t| t.is_float());
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let value = tokens.next_required().text;
        frame.did_parse(tokens, true);
        FloatLiteral { frame, value }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Production for FloatLiteral {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        out.push_str(&self.value);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if FLOAT_WORDS.contains(&self.value.as_str()) {
            generator.add_keyword(&self.value);
        } else {
            generator.add_text(&self.value);
        }
        &self.frame
    }
}

/// An identifier in name position. The token text keeps any leading
/// underscore; the semantic name strips it, per WebIDL identifier escaping.
#[derive(Debug, Clone)]
pub struct Identifier {
    frame: Frame,
    text: String,
}

impl Identifier {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens.peek().is_some_and(|t| t.is_identifier());
        tokens.resolve(mark, matched)
    }

    /// Consume the next token as a name. Callers use this for keyword-named
    /// members too (e.g. an argument called `async`), so the token kind is
    /// deliberately not checked here.
    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let text = tokens.next_required().text;
        frame.did_parse(tokens, false);
        Identifier { frame, text }
    }

    pub fn name(&self) -> &str {
        self.text.strip_prefix('_').unwrap_or(&self.text)
    }
}

impl Production for Identifier {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        out.push_str(&self.text);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_name(&self.text);
        &self.frame
    }
}

/// An identifier in type position; marks up as a type name.
#[derive(Debug, Clone)]
pub struct TypeIdentifier {
    frame: Frame,
    text: String,
}

impl TypeIdentifier {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens.peek().is_some_and(|t| t.is_identifier());
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let text = tokens.next_required().text;
        frame.did_parse(tokens, false);
        TypeIdentifier { frame, text }
    }

    pub fn name(&self) -> &str {
        self.text.strip_prefix('_').unwrap_or(&self.text)
    }

    pub fn type_name(&self) -> &str {
        self.name()
    }
}

impl Production for TypeIdentifier {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        out.push_str(&self.text);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_type_name(&self.text);
        &self.frame
    }
}

impl_display_via_production!(StringLiteral, Symbol, Integer, FloatLiteral, Identifier, TypeIdentifier);

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> TokenStream<'static> {
        TokenStream::new(text, None)
    }

    #[test]
    fn test_symbol_round_trip() {
        let mut tokens = stream("  const /* k */ ");
        assert!(Symbol::peek(&mut tokens, "const"));
        let symbol = Symbol::parse(&mut tokens, "const");
        assert_eq!(symbol.text(), "  const /* k */ ");
        assert_eq!(symbol.symbol(), "const");
    }

    #[test]
    fn test_symbol_tight_leaves_trailing_trivia() {
        let mut tokens = stream("; after");
        let symbol = Symbol::parse_tight(&mut tokens, ";");
        assert_eq!(symbol.text(), ";");
        assert_eq!(tokens.whitespace().unwrap(), " ");
    }

    #[test]
    fn test_identifier_strips_escape_underscore() {
        let mut tokens = stream("_interface");
        let identifier = Identifier::parse(&mut tokens);
        assert_eq!(identifier.name(), "interface");
        assert_eq!(identifier.text(), "_interface");
    }

    #[test]
    fn test_peek_rewinds_on_failure() {
        let mut tokens = stream("notasymbol");
        assert!(!Symbol::peek(&mut tokens, "const"));
        assert!(Identifier::peek(&mut tokens));
    }
}
