//! Constructs: the named, navigable entities of a WebIDL source.
//!
//! A construct is a production whose identity participates in search: it has
//! an `idl_type` tag, usually a name, optional extended attributes, and
//! member collections that `find`-style queries traverse. Constructs are
//! immutable after parsing except for the parent back-link, which the
//! enclosing construct records at assembly time.

pub mod argument;
pub mod callback;
pub mod definitions;
pub mod dictionary;
pub mod extended_attributes;
pub mod interface;
pub mod namespace;
pub mod statements;

pub use argument::Argument;
pub use callback::Callback;
pub use definitions::{Const, Enum, Typedef};
pub use dictionary::{Dictionary, DictionaryMember};
pub use extended_attributes::ExtendedAttribute;
pub use interface::{Interface, Member, MemberEntry, MemberKind, Mixin};
pub use namespace::Namespace;
pub use statements::{ImplementsStatement, IncludesStatement};

use crate::markup::{Marker, MarkupGenerator};
use crate::productions::{ExtendedAttributeList, ArgumentList, Frame, Production};
use crate::tokenizer::{Token, TokenStream};
use std::fmt;

/// The closed set of construct tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdlType {
    Const,
    Enum,
    Typedef,
    Interface,
    Constructor,
    Attribute,
    Iterable,
    AsyncIterable,
    Maplike,
    Setlike,
    Stringifier,
    Serializer,
    Method,
    Argument,
    Dictionary,
    DictMember,
    Callback,
    Namespace,
    Implements,
    Includes,
    ExtendedAttribute,
    Unknown,
}

impl IdlType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdlType::Const => "const",
            IdlType::Enum => "enum",
            IdlType::Typedef => "typedef",
            IdlType::Interface => "interface",
            IdlType::Constructor => "constructor",
            IdlType::Attribute => "attribute",
            IdlType::Iterable => "iterable",
            IdlType::AsyncIterable => "async-iterable",
            IdlType::Maplike => "maplike",
            IdlType::Setlike => "setlike",
            IdlType::Stringifier => "stringifier",
            IdlType::Serializer => "serializer",
            IdlType::Method => "method",
            IdlType::Argument => "argument",
            IdlType::Dictionary => "dictionary",
            IdlType::DictMember => "dict-member",
            IdlType::Callback => "callback",
            IdlType::Namespace => "namespace",
            IdlType::Implements => "implements",
            IdlType::Includes => "includes",
            IdlType::ExtendedAttribute => "extended-attribute",
            IdlType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-owning record of the enclosing construct, set at assembly time.
/// Carrying the names instead of a reference keeps the tree free of
/// ownership cycles.
#[derive(Debug, Clone, Default)]
pub struct ParentRef {
    pub name: Option<String>,
    pub full_name: Option<String>,
}

/// The shared surface of every construct: identity, search, and markup.
/// Search defaults are driven by `members()` and `arguments()`, so most
/// constructs override only what they own.
pub trait Construct: Production {
    /// Upcast; every implementation is `{ self }`.
    fn as_construct(&self) -> &dyn Construct;

    fn idl_type(&self) -> IdlType;

    /// The declared name, or `None` for anonymous constructs.
    fn name(&self) -> Option<String>;

    fn parent(&self) -> Option<&ParentRef>;

    /// Record the enclosing construct. Containers call this on each child
    /// once their own identity is known, cascading to grandchildren.
    fn adopt(&mut self, parent: ParentRef);

    fn has_parent(&self) -> bool {
        self.parent().is_some()
    }

    fn extended_attributes(&self) -> Option<&ExtendedAttributeList> {
        None
    }

    /// Constructor-flavored extended attributes, in declaration order.
    fn constructors(&self) -> Vec<&dyn Construct> {
        match self.extended_attributes() {
            Some(attributes) => attributes
                .attributes()
                .iter()
                .filter(|a| a.idl_type() == IdlType::Constructor)
                .map(|a| a.as_construct())
                .collect(),
            None => Vec::new(),
        }
    }

    fn method_name(&self) -> Option<String> {
        None
    }

    fn method_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// The method name when there is one, the plain name otherwise.
    fn normal_name(&self) -> Option<String> {
        self.method_name().or_else(|| self.name())
    }

    /// `parent-full-name/normal-name`, or just the normal name at top level.
    fn full_name(&self) -> Option<String> {
        let normal = self.normal_name()?;
        match self.parent().and_then(|p| p.full_name.as_ref()) {
            Some(parent) => Some(format!("{parent}/{normal}")),
            None => Some(normal),
        }
    }

    fn arguments(&self) -> Option<&ArgumentList> {
        None
    }

    /// Child constructs in source order; constructors from extended
    /// attributes come first where applicable.
    fn members(&self) -> Vec<&dyn Construct> {
        Vec::new()
    }

    /// This construct's own weight, before children are added in.
    fn intrinsic_weight(&self) -> usize {
        if self.idl_type() == IdlType::Const {
            0
        } else {
            1
        }
    }

    /// Sum of the children's factors plus this construct's own weight.
    fn complexity_factor(&self) -> usize {
        self.members()
            .iter()
            .map(|member| member.complexity_factor())
            .sum::<usize>()
            + self.intrinsic_weight()
    }

    /// Last member with the given name, or `None`.
    fn find_member(&self, name: &str) -> Option<&dyn Construct> {
        self.members()
            .into_iter()
            .rev()
            .find(|member| member.name().as_deref() == Some(name))
    }

    fn find_members(&self, name: &str) -> Vec<&dyn Construct> {
        self.members()
            .into_iter()
            .filter(|member| member.name().as_deref() == Some(name))
            .collect()
    }

    /// Last method member matching the name and, when given, the argument
    /// names.
    fn find_method(&self, name: &str, argument_names: Option<&[String]>) -> Option<&dyn Construct> {
        self.members().into_iter().rev().find(|member| {
            member.idl_type() == IdlType::Method
                && member.name().as_deref() == Some(name)
                && argument_names.map_or(true, |names| member.matches_argument_names(names))
        })
    }

    fn find_methods(&self, name: &str, argument_names: Option<&[String]>) -> Vec<&dyn Construct> {
        self.members()
            .into_iter()
            .filter(|member| {
                member.idl_type() == IdlType::Method
                    && member.name().as_deref() == Some(name)
                    && argument_names.map_or(true, |names| member.matches_argument_names(names))
            })
            .collect()
    }

    /// Search this construct's own argument list, then (optionally) its
    /// members' argument lists.
    fn find_argument(&self, name: &str, search_members: bool) -> Option<&dyn Construct> {
        if let Some(arguments) = self.arguments() {
            if let Some(argument) = arguments.find(name) {
                return Some(argument.as_construct());
            }
        }
        if search_members {
            for member in self.members().into_iter().rev() {
                if let Some(argument) = member.find_argument(name, true) {
                    return Some(argument);
                }
            }
        }
        None
    }

    fn find_arguments(&self, name: &str, search_members: bool) -> Vec<&dyn Construct> {
        let mut found = Vec::new();
        if let Some(arguments) = self.arguments() {
            found.extend(arguments.find_all(name).into_iter().map(|a| a.as_construct()));
        }
        if search_members {
            for member in self.members() {
                found.extend(member.find_arguments(name, true));
            }
        }
        found
    }

    fn matches_argument_names(&self, argument_names: &[String]) -> bool {
        match self.arguments() {
            Some(arguments) => arguments.matches_names(argument_names),
            None => argument_names.is_empty(),
        }
    }

    /// Generate the marked-up text of this construct alone, without its
    /// leading and trailing trivia.
    fn markup(&self, marker: &mut dyn Marker) -> String {
        let mut generator = MarkupGenerator::construct(self.as_construct());
        if let Some(attributes) = self.extended_attributes() {
            attributes.define_markup(&mut generator);
        }
        let target = self.markup_inner(&mut generator);
        generator.add_text(&target.tail_text());
        if let Some(semicolon) = &target.semicolon {
            generator.add_text(&semicolon.text());
        }
        generator.markup(marker)
    }
}

/// The construct flavor of [`Production::define_markup`]: the construct's
/// body (extended attributes included) lands in its own generator node so
/// markers see it as one element; leading and trailing trivia stay outside.
pub(crate) fn define_construct_markup<'a>(
    construct: &'a dyn Construct,
    generator: &mut MarkupGenerator<'a>,
) {
    let frame = construct.frame();
    generator.add_text(&frame.leading_space);
    let mut inner = MarkupGenerator::construct(construct);
    if let Some(attributes) = construct.extended_attributes() {
        attributes.define_markup(&mut inner);
    }
    let target = construct.markup_inner(&mut inner);
    inner.add_text(&target.tail_text());
    if let Some(semicolon) = &target.semicolon {
        inner.add_text(&semicolon.text());
    }
    generator.add_generator(inner);
    if !std::ptr::eq(frame, target) {
        generator.add_text(&target.trailing_space);
    }
    generator.add_text(&frame.trailing_space);
}

/// Invalid syntax, captured verbatim up to the next `;` at this nesting
/// level (or the enclosing `}`), so the surrounding construct stays
/// well-formed and the input still round-trips.
#[derive(Debug, Clone)]
pub struct SyntaxError {
    frame: Frame,
    parent: Option<ParentRef>,
    tokens: Vec<Token>,
}

impl SyntaxError {
    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let mut skipped = tokens.syntax_error(Some(&[";", "}"]), false);
        if skipped.len() > 1 && skipped.last().is_some_and(|t| t.is_symbol_eq("}")) {
            if let Some(last) = skipped.pop() {
                tokens.restore(last);
            }
        }
        frame.did_parse(tokens, true);
        SyntaxError {
            frame,
            parent: None,
            tokens: skipped,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl Production for SyntaxError {
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

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for SyntaxError {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Unknown
    }

    fn name(&self) -> Option<String> {
        None
    }

    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn adopt(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
