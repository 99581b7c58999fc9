//! Markup generation
//!
//! The markup driver walks constructs and productions in source order,
//! splitting the original text at syntactic-element boundaries and invoking
//! a caller-supplied [`Marker`]. Each marker method returns a
//! `(prefix, suffix)` pair wrapped around the element's text; elements nest
//! (types inside types), and plain runs between marked elements pass through
//! [`Marker::encode`]. With every method left at its default, the output is
//! the input, byte for byte.

use crate::constructs::Construct;
use crate::productions::Production;

/// Caller-supplied callback bundle invoked during markup. Every method is
/// optional: the defaults mark nothing and encode nothing.
#[allow(unused_variables)]
pub trait Marker {
    fn markup_construct(
        &mut self,
        text: &str,
        construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    fn markup_type(
        &mut self,
        text: &str,
        construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    fn markup_primitive_type(
        &mut self,
        text: &str,
        construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    fn markup_buffer_type(
        &mut self,
        text: &str,
        construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    fn markup_string_type(
        &mut self,
        text: &str,
        construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    fn markup_object_type(
        &mut self,
        text: &str,
        construct: &dyn Construct,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    fn markup_type_name(
        &mut self,
        text: &str,
        construct: Option<&dyn Construct>,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    fn markup_name(
        &mut self,
        text: &str,
        construct: Option<&dyn Construct>,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    fn markup_keyword(
        &mut self,
        text: &str,
        construct: Option<&dyn Construct>,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    fn markup_enum_value(
        &mut self,
        text: &str,
        construct: Option<&dyn Construct>,
    ) -> (Option<String>, Option<String>) {
        (None, None)
    }

    /// Transform plain text between marked elements; identity by default.
    fn encode(&mut self, text: &str) -> String {
        text.to_string()
    }
}

/// A marker that marks nothing; `markup` with it reproduces the input.
#[derive(Debug, Default)]
pub struct NullMarker;

impl Marker for NullMarker {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeneratorKind {
    Root,
    Construct,
    Type,
    PrimitiveType,
    BufferType,
    StringType,
    ObjectType,
}

enum MarkupNode<'a> {
    Generator(MarkupGenerator<'a>),
    Text(String),
    TypeName(String),
    Name(String),
    Keyword(String),
    EnumValue(String),
}

impl<'a> MarkupNode<'a> {
    fn text_into(&self, out: &mut String) {
        match self {
            MarkupNode::Generator(generator) => out.push_str(&generator.text()),
            MarkupNode::Text(text)
            | MarkupNode::TypeName(text)
            | MarkupNode::Name(text)
            | MarkupNode::Keyword(text)
            | MarkupNode::EnumValue(text) => out.push_str(text),
        }
    }

    fn markup(&self, marker: &mut dyn Marker, construct: Option<&dyn Construct>) -> String {
        fn wrap(
            (head, tail): (Option<String>, Option<String>),
            encoded: String,
        ) -> String {
            let mut out = head.unwrap_or_default();
            out.push_str(&encoded);
            if let Some(tail) = tail {
                out.push_str(&tail);
            }
            out
        }
        match self {
            MarkupNode::Generator(generator) => generator.markup(marker),
            MarkupNode::Text(text) => marker.encode(text),
            MarkupNode::TypeName(text) => {
                let pair = marker.markup_type_name(text, construct);
                wrap(pair, marker.encode(text))
            }
            MarkupNode::Name(text) => {
                let pair = marker.markup_name(text, construct);
                wrap(pair, marker.encode(text))
            }
            MarkupNode::Keyword(text) => {
                let pair = marker.markup_keyword(text, construct);
                wrap(pair, marker.encode(text))
            }
            MarkupNode::EnumValue(text) => {
                let pair = marker.markup_enum_value(text, construct);
                wrap(pair, marker.encode(text))
            }
        }
    }
}

/// A tree of marked regions built by walking productions; rendering it with
/// a marker produces the marked-up source.
pub struct MarkupGenerator<'a> {
    kind: GeneratorKind,
    construct: Option<&'a dyn Construct>,
    children: Vec<MarkupNode<'a>>,
}

impl<'a> MarkupGenerator<'a> {
    pub fn root() -> Self {
        MarkupGenerator {
            kind: GeneratorKind::Root,
            construct: None,
            children: Vec::new(),
        }
    }

    pub fn construct(construct: &'a dyn Construct) -> Self {
        MarkupGenerator {
            kind: GeneratorKind::Construct,
            construct: Some(construct),
            children: Vec::new(),
        }
    }

    fn typed(kind: GeneratorKind, construct: Option<&'a dyn Construct>) -> Self {
        MarkupGenerator {
            kind,
            construct,
            children: Vec::new(),
        }
    }

    pub fn add_generator(&mut self, generator: MarkupGenerator<'a>) {
        self.children.push(MarkupNode::Generator(generator));
    }

    /// Append plain text, merging into a trailing text node.
    pub fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(MarkupNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(MarkupNode::Text(text.to_string()));
        }
    }

    pub fn add_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.children.push(MarkupNode::Name(name.to_string()));
        }
    }

    pub fn add_type_name(&mut self, type_name: &str) {
        if !type_name.is_empty() {
            self.children.push(MarkupNode::TypeName(type_name.to_string()));
        }
    }

    pub fn add_keyword(&mut self, keyword: &str) {
        if !keyword.is_empty() {
            self.children.push(MarkupNode::Keyword(keyword.to_string()));
        }
    }

    pub fn add_enum_value(&mut self, value: &str) {
        if !value.is_empty() {
            self.children.push(MarkupNode::EnumValue(value.to_string()));
        }
    }

    /// Nest a full type (frame included) as a marked type region.
    pub fn add_type(&mut self, ty: &'a dyn Production) {
        let frame = ty.frame();
        self.add_text(&frame.leading_space);
        let mut inner = MarkupGenerator::typed(GeneratorKind::Type, self.construct);
        ty.markup_inner(&mut inner);
        self.children.push(MarkupNode::Generator(inner));
        self.add_text(&frame.tail_text());
        if let Some(semicolon) = &frame.semicolon {
            self.add_text(&semicolon.text());
        }
        self.add_text(&frame.trailing_space);
    }

    pub fn add_primitive_type(&mut self, ty: &'a dyn Production) {
        self.add_typed_leaf(GeneratorKind::PrimitiveType, ty);
    }

    pub fn add_buffer_type(&mut self, ty: &'a dyn Production) {
        self.add_typed_leaf(GeneratorKind::BufferType, ty);
    }

    pub fn add_string_type(&mut self, ty: &'a dyn Production) {
        self.add_typed_leaf(GeneratorKind::StringType, ty);
    }

    pub fn add_object_type(&mut self, ty: &'a dyn Production) {
        self.add_typed_leaf(GeneratorKind::ObjectType, ty);
    }

    fn add_typed_leaf(&mut self, kind: GeneratorKind, ty: &'a dyn Production) {
        let mut inner = MarkupGenerator::typed(kind, self.construct);
        ty.markup_inner(&mut inner);
        self.children.push(MarkupNode::Generator(inner));
    }

    /// The unmarked text of everything collected so far.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.text_into(&mut out);
        }
        out
    }

    /// Render with the marker.
    pub fn markup(&self, marker: &mut dyn Marker) -> String {
        let text = self.text();
        let pair = match (self.kind, self.construct) {
            (GeneratorKind::Root, _) | (_, None) => (None, None),
            (GeneratorKind::Construct, Some(construct)) => marker.markup_construct(&text, construct),
            (GeneratorKind::Type, Some(construct)) => marker.markup_type(&text, construct),
            (GeneratorKind::PrimitiveType, Some(construct)) => {
                marker.markup_primitive_type(&text, construct)
            }
            (GeneratorKind::BufferType, Some(construct)) => {
                marker.markup_buffer_type(&text, construct)
            }
            (GeneratorKind::StringType, Some(construct)) => {
                marker.markup_string_type(&text, construct)
            }
            (GeneratorKind::ObjectType, Some(construct)) => {
                marker.markup_object_type(&text, construct)
            }
        };
        let (head, tail) = pair;
        let mut out = head.unwrap_or_default();
        for child in &self.children {
            out.push_str(&child.markup(marker, self.construct));
        }
        if let Some(tail) = tail {
            out.push_str(&tail);
        }
        out
    }
}
