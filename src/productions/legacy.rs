//! Legacy productions: pre-standard syntax that is accepted, kept in the
//! source span, and reported through the `note` callback.

use crate::markup::MarkupGenerator;
use crate::productions::terminals::{Symbol, TypeIdentifier};
use crate::productions::{impl_display_via_production, Frame, Production};
use crate::tokenizer::{Token, TokenStream};

/// `"in" | "out"` — legacy argument direction keywords.
#[derive(Debug, Clone)]
pub struct IgnoreInOut {
    frame: Frame,
    text: String,
}

impl IgnoreInOut {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens
            .peek()
            .is_some_and(|t| t.is_identifier_of(&["in", "out"]));
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let text = tokens.next_required().text;
        frame.did_parse(tokens, true);
        tokens.did_ignore(&text);
        IgnoreInOut { frame, text }
    }
}

impl Production for IgnoreInOut {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        out.push_str(&self.text);
    }
}

/// `"inherits" "getter" | ("getraises" | "setraises" | "raises") "(" ... ")"`
#[derive(Debug, Clone)]
pub struct Ignore {
    frame: Frame,
    tokens: Vec<Token>,
}

impl Ignore {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = match tokens.peek() {
            Some(token) if token.is_identifier_eq("inherits") => tokens
                .peek()
                .is_some_and(|t| t.is_symbol_eq("getter")),
            Some(token) if token.is_identifier_of(&["getraises", "setraises", "raises"]) => {
                match tokens.peek() {
                    Some(t) if t.is_symbol_eq("(") => tokens.peek_past(")"),
                    _ => false,
                }
            }
            _ => false,
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let mut consumed = Vec::new();
        let first = tokens.next_required();
        let inherits = first.is_identifier_eq("inherits");
        consumed.push(first);
        if let Some(space) = tokens.whitespace() {
            consumed.push(Token {
                kind: crate::tokenizer::TokenKind::Whitespace,
                text: space,
                offset: 0,
            });
        }
        if inherits {
            consumed.push(tokens.next_required()); // "getter"
        } else {
            consumed.push(tokens.next_required()); // "("
            consumed.extend(tokens.seek_to(&[")"]));
        }
        frame.did_parse(tokens, true);
        let text: String = consumed.iter().map(|t| t.text.as_str()).collect();
        tokens.did_ignore(&text);
        Ignore {
            frame,
            tokens: consumed,
        }
    }
}

impl Production for Ignore {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        for token in &self.tokens {
            out.push_str(&token.text);
        }
    }
}

/// `"," TypeIdentifier ["," TypeIdentifier]...` — legacy multiple
/// inheritance after the first base.
#[derive(Debug, Clone)]
pub struct IgnoreMultipleInheritance {
    frame: Frame,
    comma: Symbol,
    inherit: TypeIdentifier,
    next: Option<Box<IgnoreMultipleInheritance>>,
}

impl IgnoreMultipleInheritance {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Symbol::peek(tokens, ",") && TypeIdentifier::peek(tokens) {
            IgnoreMultipleInheritance::peek(tokens);
            true
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream, continuation: bool) -> Self {
        let mut frame = Frame::begin(tokens);
        let comma = Symbol::parse(tokens, ",");
        let inherit = TypeIdentifier::parse(tokens);
        let next = if IgnoreMultipleInheritance::peek(tokens) {
            Some(Box::new(IgnoreMultipleInheritance::parse(tokens, true)))
        } else {
            None
        };
        frame.did_parse(tokens, true);
        let parsed = IgnoreMultipleInheritance {
            frame,
            comma,
            inherit,
            next,
        };
        if !continuation {
            let text = parsed.text();
            tokens.did_ignore(&text);
        }
        parsed
    }

    pub fn inherit_name(&self) -> &str {
        self.inherit.name()
    }
}

impl Production for IgnoreMultipleInheritance {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.comma.write(out);
        self.inherit.write(out);
        if let Some(next) = &self.next {
            next.write(out);
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_text(&self.comma.text());
        self.inherit.define_markup(generator);
        if let Some(next) = &self.next {
            next.define_markup(generator);
        }
        &self.frame
    }
}

#[derive(Debug, Clone)]
pub enum SerializationPatternKind {
    /// `"{" ... "}"`
    Map {
        open: Symbol,
        body: Vec<Token>,
        close: Symbol,
    },
    /// `"[" ... "]"`
    List {
        open: Symbol,
        body: Vec<Token>,
        close: Symbol,
    },
    /// A bare attribute name.
    Named(TypeIdentifier),
}

/// The body of a legacy `serializer = ...` declaration. The braced and
/// bracketed forms keep their raw tokens; only the shape is classified.
#[derive(Debug, Clone)]
pub struct SerializationPattern {
    frame: Frame,
    kind: SerializationPatternKind,
}

impl SerializationPattern {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = match tokens.peek() {
            Some(token) if token.is_symbol_eq("{") => tokens.peek_past("}"),
            Some(token) if token.is_symbol_eq("[") => tokens.peek_past("]"),
            Some(token) => token.is_identifier(),
            None => false,
        };
        tokens.resolve(mark, matched)
    }

    fn parse_delimited(tokens: &mut TokenStream, open_text: &str, close_text: &str) -> (Symbol, Vec<Token>, Symbol) {
        let open = Symbol::parse(tokens, open_text);
        let mut body = tokens.seek_to(&[close_text]);
        if let Some(last) = body.pop() {
            tokens.restore(last);
        }
        let close = Symbol::parse_tight(tokens, close_text);
        (open, body, close)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let kind = match tokens.sneak_peek() {
            Some(token) if token.is_symbol_eq("{") => {
                let (open, body, close) = Self::parse_delimited(tokens, "{", "}");
                SerializationPatternKind::Map { open, body, close }
            }
            Some(token) if token.is_symbol_eq("[") => {
                let (open, body, close) = Self::parse_delimited(tokens, "[", "]");
                SerializationPatternKind::List { open, body, close }
            }
            _ => SerializationPatternKind::Named(TypeIdentifier::parse(tokens)),
        };
        frame.did_parse(tokens, true);
        SerializationPattern { frame, kind }
    }
}

impl Production for SerializationPattern {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        match &self.kind {
            SerializationPatternKind::Map { open, body, close }
            | SerializationPatternKind::List { open, body, close } => {
                open.write(out);
                for token in body {
                    out.push_str(&token.text);
                }
                close.write(out);
            }
            SerializationPatternKind::Named(name) => name.write(out),
        }
    }
}

impl_display_via_production!(IgnoreInOut, Ignore, IgnoreMultipleInheritance, SerializationPattern);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingUi, UserInterface};

    #[test]
    fn test_ignore_in_out_notes() {
        let mut ui = CollectingUi::new();
        let handle = ui.clone();
        {
            let mut tokens =
                TokenStream::new("in", Some(&mut ui as &mut dyn UserInterface));
            assert!(IgnoreInOut::peek(&mut tokens));
            let ignored = IgnoreInOut::parse(&mut tokens);
            assert_eq!(ignored.text(), "in");
        }
        assert_eq!(handle.notes().len(), 1);
        assert!(handle.notes()[0].contains("IGNORED LEGACY IDL"));
    }

    #[test]
    fn test_raises_clause_round_trip() {
        let mut tokens = TokenStream::new("raises (hell)", None);
        assert!(Ignore::peek(&mut tokens));
        let ignored = Ignore::parse(&mut tokens);
        assert_eq!(ignored.text(), "raises (hell)");
    }

    #[test]
    fn test_serialization_pattern_forms() {
        for source in ["{ foo, bar }", "[ one ]", "attributeName"] {
            let mut tokens = TokenStream::new(source, None);
            assert!(SerializationPattern::peek(&mut tokens), "{source}");
            let mut tokens = TokenStream::new(source, None);
            let pattern = SerializationPattern::parse(&mut tokens);
            assert_eq!(pattern.text(), source);
        }
    }
}
