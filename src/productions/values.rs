//! Literal value productions: const values, defaults, and enum value lists.

use crate::markup::MarkupGenerator;
use crate::productions::terminals::{FloatLiteral, Integer, StringLiteral, Symbol};
use crate::productions::{impl_display_via_production, Frame, Production};
use crate::tokenizer::TokenStream;

#[derive(Debug, Clone)]
pub enum ConstValueKind {
    Float(FloatLiteral),
    /// `"true" | "false" | "null"`
    Boolean(Symbol),
    Integer(Integer),
}

/// `"true" | "false" | FloatLiteral | <integer-token> | "null"`
#[derive(Debug, Clone)]
pub struct ConstValue {
    frame: Frame,
    kind: ConstValueKind,
}

impl ConstValue {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        if FloatLiteral::peek(tokens) {
            return true;
        }
        let mark = tokens.mark();
        let matched = tokens
            .peek()
            .is_some_and(|t| t.is_symbol_of(&["true", "false", "null"]) || t.is_integer());
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let kind = if FloatLiteral::peek(tokens) {
            ConstValueKind::Float(FloatLiteral::parse(tokens))
        } else if Symbol::peek_any(tokens) {
            ConstValueKind::Boolean(Symbol::parse_any_tight(tokens))
        } else {
            ConstValueKind::Integer(Integer::parse(tokens))
        };
        frame.did_parse(tokens, true);
        ConstValue { frame, kind }
    }

    /// The literal text of the value itself.
    pub fn value_text(&self) -> String {
        match &self.kind {
            ConstValueKind::Float(value) => value.value().to_string(),
            ConstValueKind::Boolean(value) => value.symbol().to_string(),
            ConstValueKind::Integer(value) => value.value().to_string(),
        }
    }
}

impl Production for ConstValue {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        match &self.kind {
            ConstValueKind::Float(value) => value.write(out),
            ConstValueKind::Boolean(value) => value.write(out),
            ConstValueKind::Integer(value) => value.write(out),
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        match &self.kind {
            ConstValueKind::Float(value) => value.markup_inner(generator),
            ConstValueKind::Boolean(value) => value.markup_inner(generator),
            ConstValueKind::Integer(value) => value.markup_inner(generator),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DefaultValue {
    Const(ConstValue),
    Str(StringLiteral),
    /// `"[" "]"`
    EmptySequence { open: Symbol, close: Symbol },
    /// `"{" "}"`
    EmptyDictionary { open: Symbol, close: Symbol },
}

/// `"=" ConstValue | "=" String | "=" "[" "]" | "=" "{" "}"`
///
/// Absence of `=` is "no default", not an error; callers peek first.
#[derive(Debug, Clone)]
pub struct Default {
    frame: Frame,
    equals: Symbol,
    value: DefaultValue,
}

impl Default {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Symbol::peek(tokens, "=") {
            if ConstValue::peek(tokens) {
                true
            } else if Symbol::peek(tokens, "[") {
                Symbol::peek(tokens, "]")
            } else if Symbol::peek(tokens, "{") {
                Symbol::peek(tokens, "}")
            } else {
                tokens.peek().is_some_and(|t| t.is_string())
            }
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let equals = Symbol::parse(tokens, "=");
        let value = match tokens.sneak_peek() {
            Some(token) if token.is_string() => DefaultValue::Str(StringLiteral::parse(tokens)),
            Some(token) if token.is_symbol_eq("[") => DefaultValue::EmptySequence {
                open: Symbol::parse(tokens, "["),
                close: Symbol::parse_tight(tokens, "]"),
            },
            Some(token) if token.is_symbol_eq("{") => DefaultValue::EmptyDictionary {
                open: Symbol::parse(tokens, "{"),
                close: Symbol::parse_tight(tokens, "}"),
            },
            _ => DefaultValue::Const(ConstValue::parse(tokens)),
        };
        frame.did_parse(tokens, true);
        Default {
            frame,
            equals,
            value,
        }
    }

    /// The default's literal text: the const value, the string literal, or
    /// `[]` / `{}`.
    pub fn value_text(&self) -> String {
        match &self.value {
            DefaultValue::Const(value) => value.value_text(),
            DefaultValue::Str(value) => value.value().to_string(),
            DefaultValue::EmptySequence { .. } => "[]".to_string(),
            DefaultValue::EmptyDictionary { .. } => "{}".to_string(),
        }
    }

    pub fn value(&self) -> &DefaultValue {
        &self.value
    }
}

impl Production for Default {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.equals.write(out);
        match &self.value {
            DefaultValue::Const(value) => value.write(out),
            DefaultValue::Str(value) => value.write(out),
            DefaultValue::EmptySequence { open, close }
            | DefaultValue::EmptyDictionary { open, close } => {
                open.write(out);
                close.write(out);
            }
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.equals.define_markup(generator);
        match &self.value {
            DefaultValue::Const(value) => value.markup_inner(generator),
            DefaultValue::Str(value) => value.markup_inner(generator),
            DefaultValue::EmptySequence { open, close }
            | DefaultValue::EmptyDictionary { open, close } => {
                open.define_markup(generator);
                close.define_markup(generator);
                &self.frame
            }
        }
    }
}

/// A single enum value: `<string-token>`.
#[derive(Debug, Clone)]
pub struct EnumValue {
    frame: Frame,
    value: String,
}

impl EnumValue {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens.peek().is_some_and(|t| t.is_string());
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let value = tokens.next_required().text;
        frame.did_parse(tokens, true);
        EnumValue { frame, value }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Production for EnumValue {
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
        generator.add_enum_value(&self.value);
        &self.frame
    }
}

/// `EnumValue ["," EnumValue]... [","]` — a trailing comma is accepted when
/// the closing brace follows.
#[derive(Debug, Clone)]
pub struct EnumValueList {
    frame: Frame,
    values: Vec<EnumValue>,
    commas: Vec<Symbol>,
}

impl EnumValueList {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if EnumValue::peek(tokens) {
            let after_value = tokens.mark();
            match tokens.peek() {
                Some(token) if token.is_symbol_eq(",") => {
                    if tokens.sneak_peek().is_some_and(|t| t.is_symbol_eq("}")) {
                        tokens.resolve(after_value, true)
                    } else {
                        let rest = EnumValueList::peek(tokens);
                        tokens.resolve(after_value, rest)
                    }
                }
                _ => {
                    tokens.resolve(after_value, false);
                    true
                }
            }
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let mut values = Vec::new();
        let mut commas = Vec::new();
        while tokens.has_tokens() {
            values.push(EnumValue::parse(tokens));
            if Symbol::peek(tokens, ",") {
                commas.push(Symbol::parse(tokens, ","));
                match tokens.sneak_peek() {
                    Some(token) if !token.is_symbol_eq("}") => continue,
                    _ => break,
                }
            }
            break;
        }
        frame.did_parse(tokens, true);
        EnumValueList {
            frame,
            values,
            commas,
        }
    }

    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }
}

impl Production for EnumValueList {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        for index in 0..self.values.len().max(self.commas.len()) {
            if let Some(value) = self.values.get(index) {
                value.write(out);
            }
            if let Some(comma) = self.commas.get(index) {
                comma.write(out);
            }
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        for index in 0..self.values.len().max(self.commas.len()) {
            if let Some(value) = self.values.get(index) {
                value.define_markup(generator);
            }
            if let Some(comma) = self.commas.get(index) {
                comma.define_markup(generator);
            }
        }
        &self.frame
    }
}

impl_display_via_production!(ConstValue, Default, EnumValue, EnumValueList);

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> TokenStream<'static> {
        TokenStream::new(text, None)
    }

    #[test]
    fn test_const_values() {
        for source in ["42", "-1", "0x1F", "true", "false", "null", "Infinity", "-Infinity", "NaN", "1.5"] {
            let mut tokens = stream(source);
            assert!(ConstValue::peek(&mut tokens), "{source}");
            let mut tokens = stream(source);
            let value = ConstValue::parse(&mut tokens);
            assert_eq!(value.text(), source);
            assert_eq!(value.value_text(), source);
        }
    }

    #[test]
    fn test_default_forms() {
        for (source, value_text) in [
            ("= 1", "1"),
            ("= \"hi\"", "\"hi\""),
            ("= [ ]", "[]"),
            ("= {}", "{}"),
            ("= null", "null"),
        ] {
            let mut tokens = stream(source);
            assert!(Default::peek(&mut tokens), "{source}");
            let mut tokens = stream(source);
            let default = Default::parse(&mut tokens);
            assert_eq!(default.text(), source);
            assert_eq!(default.value_text(), value_text);
        }
    }

    #[test]
    fn test_absent_default_is_not_matched() {
        let mut tokens = stream("; next");
        assert!(!Default::peek(&mut tokens));
    }

    #[test]
    fn test_enum_value_list_with_trailing_comma() {
        let source = "\"one\"  ,    \"two\",    ";
        let mut tokens = stream(format!("{source}}}").as_str());
        assert!(EnumValueList::peek(&mut tokens));
        let mut tokens = stream(format!("{source}}}").as_str());
        let list = EnumValueList::parse(&mut tokens);
        assert_eq!(list.text(), source);
        assert_eq!(list.values().len(), 2);
    }
}
