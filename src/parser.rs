//! The parser façade
//!
//! Owns the ordered list of top-level constructs, dispatches top-level
//! parsing with per-construct recovery, and exposes the query surface:
//! name and path lookup, method-name normalization, markup, and exact
//! re-serialization (`serialize(parse(text)) == text`).

use crate::constructs::{
    Callback, Const, Construct, Dictionary, Enum, IdlType, ImplementsStatement, IncludesStatement,
    Interface, Mixin, Namespace, SyntaxError, Typedef,
};
use crate::diagnostics::UserInterface;
use crate::markup::{Marker, MarkupGenerator};
use crate::productions::{ArgumentList, Frame, Production};
use crate::tokenizer::TokenStream;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::ops::Index;

/// A top-level construct.
#[derive(Debug, Clone)]
pub enum TopLevel {
    Callback(Callback),
    Interface(Interface),
    Mixin(Mixin),
    Namespace(Namespace),
    Dictionary(Dictionary),
    Enum(Enum),
    Typedef(Typedef),
    Const(Const),
    Implements(ImplementsStatement),
    Includes(IncludesStatement),
    SyntaxError(SyntaxError),
}

macro_rules! each_top_level {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            TopLevel::Callback($inner) => $body,
            TopLevel::Interface($inner) => $body,
            TopLevel::Mixin($inner) => $body,
            TopLevel::Namespace($inner) => $body,
            TopLevel::Dictionary($inner) => $body,
            TopLevel::Enum($inner) => $body,
            TopLevel::Typedef($inner) => $body,
            TopLevel::Const($inner) => $body,
            TopLevel::Implements($inner) => $body,
            TopLevel::Includes($inner) => $body,
            TopLevel::SyntaxError($inner) => $body,
        }
    };
}

impl Production for TopLevel {
    fn frame(&self) -> &Frame {
        each_top_level!(self, inner => inner.frame())
    }

    fn frame_mut(&mut self) -> &mut Frame {
        each_top_level!(self, inner => inner.frame_mut())
    }

    fn write_inner(&self, out: &mut String) {
        each_top_level!(self, inner => inner.write_inner(out))
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        each_top_level!(self, inner => inner.markup_inner(generator))
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        each_top_level!(self, inner => inner.define_markup(generator))
    }
}

impl Construct for TopLevel {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        each_top_level!(self, inner => inner.idl_type())
    }

    fn name(&self) -> Option<String> {
        each_top_level!(self, inner => Construct::name(inner))
    }

    fn parent(&self) -> Option<&crate::constructs::ParentRef> {
        each_top_level!(self, inner => inner.parent())
    }

    fn adopt(&mut self, parent: crate::constructs::ParentRef) {
        each_top_level!(self, inner => inner.adopt(parent))
    }

    fn extended_attributes(&self) -> Option<&crate::productions::ExtendedAttributeList> {
        each_top_level!(self, inner => inner.extended_attributes())
    }

    fn arguments(&self) -> Option<&ArgumentList> {
        each_top_level!(self, inner => inner.arguments())
    }

    fn members(&self) -> Vec<&dyn Construct> {
        each_top_level!(self, inner => inner.members())
    }
}

impl fmt::Display for TopLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

static METHOD_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\((.*)\)(.*)$").expect("literal pattern"));
static PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\(.*\)(.*)$").expect("literal pattern"));

/// Drop every parenthesized run from a lookup name: `draw(x, y)` → `draw`.
fn strip_parens(name: &str) -> String {
    let mut name = name.to_string();
    while let Some(caps) = PARENS.captures(&name) {
        name = format!("{}{}", &caps[1], &caps[2]);
    }
    name
}

/// A segment matches on name, method name, any method-name variant, or the
/// construct's idl_type tag.
fn segment_matches(construct: &dyn Construct, segment: &str) -> bool {
    construct.name().as_deref() == Some(segment)
        || construct.method_name().as_deref() == Some(segment)
        || construct.method_names().iter().any(|name| name == segment)
        || construct.idl_type().as_str() == segment
}

fn descend<'a>(
    construct: &'a dyn Construct,
    segments: &[&str],
    arguments_searchable: bool,
) -> Option<&'a dyn Construct> {
    let segment = segments[0];
    for member in construct.members().into_iter().rev() {
        if segment_matches(member, segment) {
            if segments.len() == 1 {
                return Some(member);
            }
            if let Some(found) = descend(member, &segments[1..], true) {
                return Some(found);
            }
        }
    }
    if segments.len() == 1 {
        if let Some(argument) = construct.find_argument(segment, arguments_searchable) {
            return Some(argument);
        }
    }
    None
}

fn descend_all<'a>(
    construct: &'a dyn Construct,
    segments: &[&str],
    arguments_searchable: bool,
    found: &mut Vec<&'a dyn Construct>,
) {
    let segment = segments[0];
    for member in construct.members() {
        if segment_matches(member, segment) {
            if segments.len() == 1 {
                found.push(member);
            } else {
                descend_all(member, &segments[1..], true, found);
            }
        }
    }
    if segments.len() == 1 {
        found.extend(construct.find_arguments(segment, arguments_searchable));
    }
}

/// The WebIDL parser: feed it text, then query, mark up, or re-serialize.
///
/// Parsing never fails; non-conforming runs become `SyntaxError` constructs
/// and diagnostics go to the optional [`UserInterface`].
#[derive(Default)]
pub struct Parser {
    ui: Option<Box<dyn UserInterface>>,
    constructs: Vec<TopLevel>,
    residual: String,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            ui: None,
            constructs: Vec::new(),
            residual: String::new(),
        }
    }

    pub fn with_ui(ui: Box<dyn UserInterface>) -> Self {
        Parser {
            ui: Some(ui),
            ..Parser::new()
        }
    }

    /// Parse a complete source text with a fresh parser.
    pub fn from_text(text: &str) -> Self {
        let mut parser = Parser::new();
        parser.parse(text);
        parser
    }

    /// Parse more input, appending to the existing constructs.
    pub fn parse(&mut self, text: &str) {
        let mut tokens = TokenStream::new(text, self.ui.as_deref_mut());
        while tokens.has_tokens() {
            let construct = if Callback::peek(&mut tokens) {
                TopLevel::Callback(Callback::parse(&mut tokens))
            } else if Interface::peek(&mut tokens) {
                TopLevel::Interface(Interface::parse(&mut tokens))
            } else if Mixin::peek(&mut tokens) {
                TopLevel::Mixin(Mixin::parse(&mut tokens))
            } else if Namespace::peek(&mut tokens) {
                TopLevel::Namespace(Namespace::parse(&mut tokens))
            } else if Dictionary::peek(&mut tokens) {
                TopLevel::Dictionary(Dictionary::parse(&mut tokens))
            } else if Enum::peek(&mut tokens) {
                TopLevel::Enum(Enum::parse(&mut tokens))
            } else if Typedef::peek(&mut tokens) {
                TopLevel::Typedef(Typedef::parse(&mut tokens))
            } else if Const::peek(&mut tokens) {
                // Legacy: bare consts appear at top level in old SVG specs.
                TopLevel::Const(Const::parse(&mut tokens))
            } else if ImplementsStatement::peek(&mut tokens) {
                TopLevel::Implements(ImplementsStatement::parse(&mut tokens))
            } else if IncludesStatement::peek(&mut tokens) {
                TopLevel::Includes(IncludesStatement::parse(&mut tokens))
            } else {
                TopLevel::SyntaxError(SyntaxError::parse(&mut tokens))
            };
            self.constructs.push(construct);
        }
        // Trivia no construct claimed still has to round-trip.
        if let Some(trailing) = tokens.take_remaining_text() {
            match self.constructs.last_mut() {
                Some(last) => last.frame_mut().trailing_space.push_str(&trailing),
                None => self.residual.push_str(&trailing),
            }
        }
    }

    /// Drop all parsed constructs.
    pub fn reset(&mut self) {
        self.constructs.clear();
        self.residual.clear();
    }

    pub fn constructs(&self) -> &[TopLevel] {
        &self.constructs
    }

    pub fn len(&self) -> usize {
        self.constructs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructs.is_empty()
    }

    /// Aggregate complexity: the sum over all top-level constructs.
    pub fn complexity_factor(&self) -> usize {
        self.constructs
            .iter()
            .map(|construct| construct.complexity_factor())
            .sum()
    }

    /// First construct with the given name.
    pub fn get(&self, name: &str) -> Option<&dyn Construct> {
        self.constructs
            .iter()
            .find(|construct| construct.name().as_deref() == Some(name))
            .map(|construct| construct.as_construct())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Find a construct by name or `/`- or `.`-separated path. Parenthesized
    /// suffixes are ignored, so `draw(x, y)` finds `draw`. Later
    /// declarations shadow earlier ones.
    pub fn find(&self, path: &str) -> Option<&dyn Construct> {
        let stripped = strip_parens(path);
        let segments: Vec<&str> = if stripped.contains('/') {
            stripped.split('/').collect()
        } else if stripped.contains('.') {
            stripped.split('.').collect()
        } else {
            vec![stripped.as_str()]
        };

        if segments.len() > 1 {
            for construct in self.constructs.iter().rev() {
                let top = construct.as_construct();
                if !segment_matches(top, segments[0]) {
                    continue;
                }
                if let Some(found) = descend(top, &segments[1..], false) {
                    return Some(found);
                }
            }
            return None;
        }

        let name = segments[0];
        for construct in self.constructs.iter().rev() {
            if segment_matches(construct.as_construct(), name) {
                return Some(construct.as_construct());
            }
        }
        for construct in self.constructs.iter().rev() {
            if let Some(member) = construct.find_member(name) {
                return Some(member);
            }
        }
        for construct in self.constructs.iter().rev() {
            if let Some(argument) = construct.find_argument(name, true) {
                return Some(argument);
            }
        }
        None
    }

    /// All constructs matching a name or path, in source order.
    pub fn find_all(&self, path: &str) -> Vec<&dyn Construct> {
        let stripped = strip_parens(path);
        let segments: Vec<&str> = if stripped.contains('/') {
            stripped.split('/').collect()
        } else if stripped.contains('.') {
            stripped.split('.').collect()
        } else {
            vec![stripped.as_str()]
        };

        let mut found = Vec::new();
        if segments.len() > 1 {
            for construct in &self.constructs {
                let top = construct.as_construct();
                if segment_matches(top, segments[0]) {
                    descend_all(top, &segments[1..], false, &mut found);
                }
            }
            return found;
        }

        let name = segments[0];
        for construct in &self.constructs {
            if segment_matches(construct.as_construct(), name) {
                found.push(construct.as_construct());
            }
        }
        for construct in &self.constructs {
            found.extend(construct.find_members(name));
        }
        for construct in &self.constructs {
            found.extend(construct.find_arguments(name, true));
        }
        found
    }

    fn split_method_text(method_text: &str) -> (String, Option<Vec<String>>, Option<Vec<String>>) {
        match METHOD_TEXT.captures(method_text) {
            Some(caps) => {
                // When the parenthesized text parses as an argument list,
                // the description normalizes on its own.
                let mut probe = TokenStream::new(&caps[2], None);
                if ArgumentList::peek(&mut probe) {
                    let mut tokens = TokenStream::new(&caps[2], None);
                    let arguments = ArgumentList::parse(&mut tokens);
                    let variants = arguments
                        .argument_names()
                        .iter()
                        .map(|names| format!("{}({names})", caps[1].trim()))
                        .collect();
                    return (caps[1].trim().to_string(), None, Some(variants));
                }
                let name = format!("{}{}", caps[1].trim(), &caps[3]);
                let names = caps[2]
                    .split(',')
                    .map(|argument| argument.trim().to_string())
                    .collect();
                (name, Some(names), None)
            }
            None => (method_text.to_string(), None, None),
        }
    }

    /// Canonical `name(arg, ...)` for a method description; falls back to
    /// the description's own arguments when no matching method is found.
    pub fn normalized_method_name(
        &self,
        method_text: &str,
        interface_name: Option<&str>,
    ) -> String {
        let (name, argument_names, normalized) = Parser::split_method_text(method_text);
        if let Some(first) = normalized.and_then(|variants| variants.into_iter().next()) {
            return first;
        }

        let fallback = |name: &str, argument_names: &Option<Vec<String>>| {
            format!(
                "{name}({})",
                argument_names
                    .as_ref()
                    .map(|names| names.join(", "))
                    .unwrap_or_default()
            )
        };

        if let Some(interface_name) = interface_name {
            if let Some(interface) = self.find(interface_name) {
                if let Some(method) = interface.find_method(&name, argument_names.as_deref()) {
                    return method.method_name().unwrap_or_default();
                }
            }
            return fallback(&name, &argument_names);
        }

        for construct in &self.constructs {
            if let Some(method) = construct.find_method(&name, argument_names.as_deref()) {
                return method.method_name().unwrap_or_default();
            }
        }
        if let Some(found) = self.find(&name) {
            if found.idl_type() == IdlType::Method {
                return found.method_name().unwrap_or_default();
            }
        }
        fallback(&name, &argument_names)
    }

    /// All normalized variants for a method description, full form first.
    pub fn normalized_method_names(
        &self,
        method_text: &str,
        interface_name: Option<&str>,
    ) -> Vec<String> {
        let (name, argument_names, normalized) = Parser::split_method_text(method_text);
        if let Some(normalized) = normalized {
            return normalized;
        }

        let fallback = |name: &str, argument_names: &Option<Vec<String>>| {
            vec![format!(
                "{name}({})",
                argument_names
                    .as_ref()
                    .map(|names| names.join(", "))
                    .unwrap_or_default()
            )]
        };

        if let Some(interface_name) = interface_name {
            if let Some(interface) = self.find(interface_name) {
                let methods = interface.find_methods(&name, argument_names.as_deref());
                if !methods.is_empty() {
                    return methods
                        .into_iter()
                        .flat_map(|method| method.method_names())
                        .collect();
                }
            }
            return fallback(&name, &argument_names);
        }

        for construct in &self.constructs {
            let methods = construct.find_methods(&name, argument_names.as_deref());
            if !methods.is_empty() {
                return methods
                    .into_iter()
                    .flat_map(|method| method.method_names())
                    .collect();
            }
        }
        if let Some(found) = self.find(&name) {
            if found.idl_type() == IdlType::Method {
                return found.method_names();
            }
        }
        fallback(&name, &argument_names)
    }

    /// The marked-up source: every construct in order, with the marker's
    /// wrappers around each syntactic element.
    pub fn markup(&self, marker: &mut dyn Marker) -> String {
        let mut generator = MarkupGenerator::root();
        generator.add_text(&self.residual);
        for construct in &self.constructs {
            construct.define_markup(&mut generator);
        }
        generator.markup(marker)
    }
}

/// Serialization reproduces the parsed input exactly.
impl fmt::Display for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.residual)?;
        for construct in &self.constructs {
            f.write_str(&construct.text())?;
        }
        Ok(())
    }
}

impl Index<usize> for Parser {
    type Output = TopLevel;

    fn index(&self, index: usize) -> &TopLevel {
        &self.constructs[index]
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("constructs", &self.constructs.len())
            .finish()
    }
}
