//! Member productions: attributes, operations, iterables, stringifiers,
//! serializers, constructors, inheritance, and extended attribute lists.

use crate::constructs::extended_attributes::ExtendedAttribute;
use crate::constructs::{Construct, IdlType, ParentRef};
use crate::markup::MarkupGenerator;
use crate::productions::arguments::ArgumentList;
use crate::productions::legacy::{Ignore, IgnoreMultipleInheritance, SerializationPattern};
use crate::productions::terminals::{Identifier, Symbol, TypeIdentifier};
use crate::productions::types::{Type, TypeWithExtendedAttributes};
use crate::productions::{impl_display_via_production, write_opt, Frame, Production};
use crate::tokenizer::TokenStream;

/// `name(arg1, arg2, ...)` for the full argument-name variant.
pub(crate) fn method_name_text(name: Option<&str>, arguments: Option<&ArgumentList>) -> String {
    let mut out = String::new();
    if let Some(name) = name {
        out.push_str(name);
    }
    out.push('(');
    if let Some(arguments) = arguments {
        if let Some(first) = arguments.argument_names().first() {
            out.push_str(first);
        }
    }
    out.push(')');
    out
}

/// Every normalized method-name variant, full form first.
pub(crate) fn method_names_text(name: Option<&str>, arguments: Option<&ArgumentList>) -> Vec<String> {
    match arguments {
        Some(arguments) => arguments
            .argument_names()
            .iter()
            .map(|variant| format!("{}({variant})", name.unwrap_or("")))
            .collect(),
        None => vec![method_name_text(name, None)],
    }
}

/// `"getter" | "setter" | "creator" | "deleter" | "legacycaller"`
#[derive(Debug, Clone)]
pub struct Special {
    frame: Frame,
    name: String,
}

const SPECIAL_SYMBOLS: [&str; 5] = ["getter", "setter", "creator", "deleter", "legacycaller"];

impl Special {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        Symbol::peek_of(tokens, &SPECIAL_SYMBOLS)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let name = tokens.next_required().text;
        frame.did_parse(tokens, true);
        Special { frame, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Production for Special {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        out.push_str(&self.name);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_keyword(&self.name);
        &self.frame
    }
}

/// `Identifier | "async" | "required"`
#[derive(Debug, Clone)]
pub struct AttributeName {
    frame: Frame,
    name: Identifier,
}

const ATTRIBUTE_NAME_KEYWORDS: [&str; 2] = ["async", "required"];

impl AttributeName {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens
            .peek()
            .is_some_and(|t| t.is_identifier() || t.is_symbol_of(&ATTRIBUTE_NAME_KEYWORDS));
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let name = Identifier::parse(tokens);
        frame.did_parse(tokens, true);
        AttributeName { frame, name }
    }

    pub fn name(&self) -> &str {
        self.name.name()
    }
}

impl Production for AttributeName {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.name.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.name.define_markup(generator);
        &self.frame
    }
}

/// `["readonly"] "attribute" TypeWithExtendedAttributes AttributeName [Ignore] ";"`
#[derive(Debug, Clone)]
pub struct AttributeRest {
    frame: Frame,
    readonly: Option<Symbol>,
    attribute: Symbol,
    ty: TypeWithExtendedAttributes,
    name: AttributeName,
    ignore: Option<Ignore>,
}

impl AttributeRest {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let mut token = tokens.peek();
        if token.as_ref().is_some_and(|t| t.is_symbol_eq("readonly")) {
            token = tokens.peek();
        }
        let matched = token.is_some_and(|t| t.is_symbol_eq("attribute"))
            && TypeWithExtendedAttributes::peek(tokens)
            && AttributeName::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let readonly = if Symbol::peek(tokens, "readonly") {
            Some(Symbol::parse(tokens, "readonly"))
        } else {
            None
        };
        let attribute = Symbol::parse(tokens, "attribute");
        let ty = TypeWithExtendedAttributes::parse(tokens);
        let name = AttributeName::parse(tokens);
        let ignore = if Ignore::peek(tokens) {
            Some(Ignore::parse(tokens))
        } else {
            None
        };
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        AttributeRest {
            frame,
            readonly,
            attribute,
            ty,
            name,
            ignore,
        }
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly.is_some()
    }

    pub fn ty(&self) -> &TypeWithExtendedAttributes {
        &self.ty
    }

    pub fn name(&self) -> Option<String> {
        Some(self.name.name().to_string())
    }
}

impl Production for AttributeRest {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        write_opt(out, &self.readonly);
        self.attribute.write(out);
        self.ty.write(out);
        self.name.write(out);
        write_opt(out, &self.ignore);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(readonly) = &self.readonly {
            readonly.define_markup(generator);
        }
        self.attribute.define_markup(generator);
        generator.add_type(&self.ty);
        self.name.define_markup(generator);
        if let Some(ignore) = &self.ignore {
            ignore.define_markup(generator);
        }
        &self.frame
    }
}

/// `["inherit"] AttributeRest`
#[derive(Debug, Clone)]
pub struct Attribute {
    frame: Frame,
    inherit: Option<Symbol>,
    rest: AttributeRest,
}

impl Attribute {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        Symbol::peek(tokens, "inherit");
        let matched = AttributeRest::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let inherit = if Symbol::peek(tokens, "inherit") {
            Some(Symbol::parse(tokens, "inherit"))
        } else {
            None
        };
        let rest = AttributeRest::parse(tokens);
        frame.did_parse(tokens, true);
        Attribute {
            frame,
            inherit,
            rest,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::Attribute
    }

    pub fn name(&self) -> Option<String> {
        self.rest.name()
    }

    pub fn rest(&self) -> &AttributeRest {
        &self.rest
    }
}

impl Production for Attribute {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        write_opt(out, &self.inherit);
        self.rest.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(inherit) = &self.inherit {
            inherit.define_markup(generator);
        }
        self.rest.markup_inner(generator)
    }
}

/// `AttributeRest` — attributes in mixins never take `inherit`.
#[derive(Debug, Clone)]
pub struct MixinAttribute {
    frame: Frame,
    rest: AttributeRest,
}

impl MixinAttribute {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        AttributeRest::peek(tokens)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let rest = AttributeRest::parse(tokens);
        frame.did_parse(tokens, true);
        MixinAttribute { frame, rest }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::Attribute
    }

    pub fn name(&self) -> Option<String> {
        self.rest.name()
    }
}

impl Production for MixinAttribute {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.rest.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.rest.markup_inner(generator)
    }
}

/// `Identifier | "includes"`
#[derive(Debug, Clone)]
pub struct OperationName {
    frame: Frame,
    name: Identifier,
}

const OPERATION_NAME_KEYWORDS: [&str; 1] = ["includes"];

impl OperationName {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens
            .peek()
            .is_some_and(|t| t.is_identifier() || t.is_symbol_of(&OPERATION_NAME_KEYWORDS));
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let name = Identifier::parse(tokens);
        frame.did_parse(tokens, true);
        OperationName { frame, name }
    }

    pub fn name(&self) -> &str {
        self.name.name()
    }
}

impl Production for OperationName {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.name.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.name.define_markup(generator);
        &self.frame
    }
}

/// `[OperationName] "(" [ArgumentList] ")" [Ignore] ";"`
#[derive(Debug, Clone)]
pub struct OperationRest {
    frame: Frame,
    name: Option<OperationName>,
    open: Symbol,
    arguments: ArgumentList,
    close: Symbol,
    ignore: Option<Ignore>,
}

impl OperationRest {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        OperationName::peek(tokens);
        let matched = match tokens.peek() {
            Some(token) if token.is_symbol_eq("(") => {
                ArgumentList::peek(tokens);
                tokens.peek().is_some_and(|t| t.is_symbol_eq(")"))
            }
            _ => false,
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let name = if OperationName::peek(tokens) {
            Some(OperationName::parse(tokens))
        } else {
            None
        };
        let open = Symbol::parse(tokens, "(");
        let arguments = ArgumentList::parse(tokens);
        let close = Symbol::parse(tokens, ")");
        let ignore = if Ignore::peek(tokens) {
            Some(Ignore::parse(tokens))
        } else {
            None
        };
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        OperationRest {
            frame,
            name,
            open,
            arguments,
            close,
            ignore,
        }
    }

    pub fn name(&self) -> Option<String> {
        self.name.as_ref().map(|n| n.name().to_string())
    }

    pub fn arguments(&self) -> &ArgumentList {
        &self.arguments
    }

    pub(crate) fn arguments_list_mut(&mut self) -> &mut ArgumentList {
        &mut self.arguments
    }
}

impl Production for OperationRest {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        write_opt(out, &self.name);
        self.open.write(out);
        self.arguments.write(out);
        self.close.write(out);
        write_opt(out, &self.ignore);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(name) = &self.name {
            name.define_markup(generator);
        }
        generator.add_text(&self.open.text());
        self.arguments.markup_inner(generator);
        generator.add_text(&self.close.text());
        if let Some(ignore) = &self.ignore {
            ignore.define_markup(generator);
        }
        &self.frame
    }
}

/// `Type OperationRest`
#[derive(Debug, Clone)]
pub struct Operation {
    frame: Frame,
    return_type: Type,
    rest: OperationRest,
}

impl Operation {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = Type::peek(tokens) && OperationRest::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let return_type = Type::parse(tokens);
        let rest = OperationRest::parse(tokens);
        frame.did_parse(tokens, true);
        Operation {
            frame,
            return_type,
            rest,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::Method
    }

    pub fn name(&self) -> Option<String> {
        self.rest.name()
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn arguments(&self) -> &ArgumentList {
        self.rest.arguments()
    }

    pub(crate) fn arguments_list_mut(&mut self) -> &mut ArgumentList {
        self.rest.arguments_list_mut()
    }

    pub fn method_name(&self) -> Option<String> {
        Some(method_name_text(
            self.name().as_deref(),
            Some(self.arguments()),
        ))
    }

    pub fn method_names(&self) -> Vec<String> {
        method_names_text(self.name().as_deref(), Some(self.arguments()))
    }
}

impl Production for Operation {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.return_type.write(out);
        self.rest.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_type(&self.return_type);
        self.rest.markup_inner(generator)
    }
}

/// `Special [Special]... Type OperationRest`
#[derive(Debug, Clone)]
pub struct SpecialOperation {
    frame: Frame,
    specials: Vec<Special>,
    return_type: Type,
    rest: OperationRest,
}

impl SpecialOperation {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Special::peek(tokens) {
            while Special::peek(tokens) {}
            Type::peek(tokens) && OperationRest::peek(tokens)
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let mut specials = Vec::new();
        while Special::peek(tokens) {
            specials.push(Special::parse(tokens));
        }
        let return_type = Type::parse(tokens);
        let rest = OperationRest::parse(tokens);
        frame.did_parse(tokens, true);
        SpecialOperation {
            frame,
            specials,
            return_type,
            rest,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::Method
    }

    pub fn name(&self) -> Option<String> {
        match self.rest.name() {
            Some(name) => Some(name),
            None => self
                .specials
                .first()
                .map(|special| format!("__{}__", special.name())),
        }
    }

    pub fn arguments(&self) -> &ArgumentList {
        self.rest.arguments()
    }

    pub(crate) fn arguments_list_mut(&mut self) -> &mut ArgumentList {
        self.rest.arguments_list_mut()
    }

    pub fn method_name(&self) -> Option<String> {
        Some(method_name_text(
            self.name().as_deref(),
            Some(self.arguments()),
        ))
    }

    pub fn method_names(&self) -> Vec<String> {
        method_names_text(self.name().as_deref(), Some(self.arguments()))
    }
}

impl Production for SpecialOperation {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        for special in &self.specials {
            special.write(out);
        }
        self.return_type.write(out);
        self.rest.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        for special in &self.specials {
            special.define_markup(generator);
        }
        generator.add_type(&self.return_type);
        self.rest.markup_inner(generator)
    }
}

#[derive(Debug, Clone)]
pub enum StringifierRest {
    Operation {
        return_type: Type,
        rest: OperationRest,
    },
    Attribute(AttributeRest),
    Bare,
}

/// `"stringifier" AttributeRest | "stringifier" Type OperationRest | "stringifier" ";"`
#[derive(Debug, Clone)]
pub struct Stringifier {
    frame: Frame,
    stringifier: Symbol,
    rest: StringifierRest,
}

impl Stringifier {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Symbol::peek(tokens, "stringifier") {
            if Type::peek(tokens) {
                OperationRest::peek(tokens)
            } else {
                AttributeRest::peek(tokens);
                true
            }
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let stringifier = Symbol::parse(tokens, "stringifier");
        let rest = if Type::peek(tokens) {
            StringifierRest::Operation {
                return_type: Type::parse(tokens),
                rest: OperationRest::parse(tokens),
            }
        } else if AttributeRest::peek(tokens) {
            StringifierRest::Attribute(AttributeRest::parse(tokens))
        } else {
            frame.consume_semicolon(tokens, true);
            StringifierRest::Bare
        };
        frame.did_parse(tokens, true);
        Stringifier {
            frame,
            stringifier,
            rest,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        match &self.rest {
            StringifierRest::Attribute(_) => IdlType::Attribute,
            _ => IdlType::Stringifier,
        }
    }

    pub fn name(&self) -> Option<String> {
        match &self.rest {
            StringifierRest::Operation { rest, .. } => {
                Some(rest.name().unwrap_or_else(|| "__stringifier__".to_string()))
            }
            StringifierRest::Attribute(attribute) => {
                Some(attribute.name().unwrap_or_else(|| "__stringifier__".to_string()))
            }
            StringifierRest::Bare => Some("__stringifier__".to_string()),
        }
    }

    pub fn arguments(&self) -> Option<&ArgumentList> {
        match &self.rest {
            StringifierRest::Operation { rest, .. } => Some(rest.arguments()),
            _ => None,
        }
    }

    pub(crate) fn arguments_list_mut(&mut self) -> Option<&mut ArgumentList> {
        match &mut self.rest {
            StringifierRest::Operation { rest, .. } => Some(rest.arguments_list_mut()),
            _ => None,
        }
    }

    pub fn method_name(&self) -> Option<String> {
        match &self.rest {
            StringifierRest::Operation { .. } => {
                Some(method_name_text(self.name().as_deref(), self.arguments()))
            }
            _ => None,
        }
    }

    pub fn method_names(&self) -> Vec<String> {
        match &self.rest {
            StringifierRest::Operation { .. } => {
                method_names_text(self.name().as_deref(), self.arguments())
            }
            _ => Vec::new(),
        }
    }
}

impl Production for Stringifier {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.stringifier.write(out);
        match &self.rest {
            StringifierRest::Operation { return_type, rest } => {
                return_type.write(out);
                rest.write(out);
            }
            StringifierRest::Attribute(attribute) => attribute.write(out),
            StringifierRest::Bare => {}
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.stringifier.define_markup(generator);
        match &self.rest {
            StringifierRest::Operation { return_type, rest } => {
                generator.add_type(return_type);
                rest.markup_inner(generator)
            }
            StringifierRest::Attribute(attribute) => attribute.markup_inner(generator),
            StringifierRest::Bare => &self.frame,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SerializerRest {
    Operation {
        return_type: Type,
        rest: OperationRest,
    },
    Pattern {
        equals: Symbol,
        pattern: SerializationPattern,
    },
    Bare,
}

/// `"serializer" Type OperationRest | "serializer" "=" SerializationPattern ";" | "serializer" ";"`
///
/// A pre-standard member kept for compatibility with older IDL corpora.
#[derive(Debug, Clone)]
pub struct Serializer {
    frame: Frame,
    serializer: Symbol,
    rest: SerializerRest,
}

impl Serializer {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Symbol::peek(tokens, "serializer") {
            if Type::peek(tokens) {
                OperationRest::peek(tokens)
            } else if Symbol::peek(tokens, "=") {
                SerializationPattern::peek(tokens)
            } else {
                true
            }
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let serializer = Symbol::parse(tokens, "serializer");
        let rest = if Type::peek(tokens) {
            SerializerRest::Operation {
                return_type: Type::parse(tokens),
                rest: OperationRest::parse(tokens),
            }
        } else if Symbol::peek(tokens, "=") {
            let equals = Symbol::parse(tokens, "=");
            let pattern = SerializationPattern::parse(tokens);
            frame.consume_semicolon(tokens, true);
            SerializerRest::Pattern { equals, pattern }
        } else {
            frame.consume_semicolon(tokens, true);
            SerializerRest::Bare
        };
        frame.did_parse(tokens, true);
        Serializer {
            frame,
            serializer,
            rest,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::Serializer
    }

    pub fn name(&self) -> Option<String> {
        match &self.rest {
            SerializerRest::Operation { rest, .. } => {
                Some(rest.name().unwrap_or_else(|| "__serializer__".to_string()))
            }
            _ => Some("__serializer__".to_string()),
        }
    }

    pub fn arguments(&self) -> Option<&ArgumentList> {
        match &self.rest {
            SerializerRest::Operation { rest, .. } => Some(rest.arguments()),
            _ => None,
        }
    }

    pub(crate) fn arguments_list_mut(&mut self) -> Option<&mut ArgumentList> {
        match &mut self.rest {
            SerializerRest::Operation { rest, .. } => Some(rest.arguments_list_mut()),
            _ => None,
        }
    }

    pub fn method_name(&self) -> Option<String> {
        match &self.rest {
            SerializerRest::Operation { .. } => {
                Some(method_name_text(self.name().as_deref(), self.arguments()))
            }
            _ => None,
        }
    }

    pub fn method_names(&self) -> Vec<String> {
        match &self.rest {
            SerializerRest::Operation { .. } => {
                method_names_text(self.name().as_deref(), self.arguments())
            }
            _ => Vec::new(),
        }
    }
}

impl Production for Serializer {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.serializer.write(out);
        match &self.rest {
            SerializerRest::Operation { return_type, rest } => {
                return_type.write(out);
                rest.write(out);
            }
            SerializerRest::Pattern { equals, pattern } => {
                equals.write(out);
                pattern.write(out);
            }
            SerializerRest::Bare => {}
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.serializer.define_markup(generator);
        match &self.rest {
            SerializerRest::Operation { return_type, rest } => {
                generator.add_type(return_type);
                rest.markup_inner(generator)
            }
            SerializerRest::Pattern { equals, pattern } => {
                equals.define_markup(generator);
                pattern.define_markup(generator);
                &self.frame
            }
            SerializerRest::Bare => &self.frame,
        }
    }
}

#[derive(Debug, Clone)]
pub enum StaticRest {
    Attribute(AttributeRest),
    Operation {
        return_type: Type,
        rest: OperationRest,
    },
}

/// `"static" AttributeRest | "static" Type OperationRest`
#[derive(Debug, Clone)]
pub struct StaticMember {
    frame: Frame,
    static_keyword: Symbol,
    rest: StaticRest,
}

impl StaticMember {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Symbol::peek(tokens, "static") {
            AttributeRest::peek(tokens)
                || (Type::peek(tokens) && OperationRest::peek(tokens))
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let static_keyword = Symbol::parse(tokens, "static");
        let rest = if AttributeRest::peek(tokens) {
            StaticRest::Attribute(AttributeRest::parse(tokens))
        } else {
            StaticRest::Operation {
                return_type: Type::parse(tokens),
                rest: OperationRest::parse(tokens),
            }
        };
        frame.did_parse(tokens, true);
        StaticMember {
            frame,
            static_keyword,
            rest,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        match &self.rest {
            StaticRest::Operation { .. } => IdlType::Method,
            StaticRest::Attribute(_) => IdlType::Attribute,
        }
    }

    pub fn name(&self) -> Option<String> {
        match &self.rest {
            StaticRest::Operation { rest, .. } => rest.name(),
            StaticRest::Attribute(attribute) => attribute.name(),
        }
    }

    pub fn arguments(&self) -> Option<&ArgumentList> {
        match &self.rest {
            StaticRest::Operation { rest, .. } => Some(rest.arguments()),
            StaticRest::Attribute(_) => None,
        }
    }

    pub(crate) fn arguments_list_mut(&mut self) -> Option<&mut ArgumentList> {
        match &mut self.rest {
            StaticRest::Operation { rest, .. } => Some(rest.arguments_list_mut()),
            StaticRest::Attribute(_) => None,
        }
    }

    pub fn method_name(&self) -> Option<String> {
        match &self.rest {
            StaticRest::Operation { .. } => {
                Some(method_name_text(self.name().as_deref(), self.arguments()))
            }
            StaticRest::Attribute(_) => None,
        }
    }

    pub fn method_names(&self) -> Vec<String> {
        match &self.rest {
            StaticRest::Operation { .. } => {
                method_names_text(self.name().as_deref(), self.arguments())
            }
            StaticRest::Attribute(_) => Vec::new(),
        }
    }
}

impl Production for StaticMember {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.static_keyword.write(out);
        match &self.rest {
            StaticRest::Operation { return_type, rest } => {
                return_type.write(out);
                rest.write(out);
            }
            StaticRest::Attribute(attribute) => attribute.write(out),
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.static_keyword.define_markup(generator);
        match &self.rest {
            StaticRest::Operation { return_type, rest } => {
                generator.add_type(return_type);
                rest.markup_inner(generator)
            }
            StaticRest::Attribute(attribute) => attribute.markup_inner(generator),
        }
    }
}

/// `"constructor" "(" [ArgumentList] ")" ";"`
#[derive(Debug, Clone)]
pub struct Constructor {
    frame: Frame,
    name: Identifier,
    open: Symbol,
    arguments: ArgumentList,
    close: Symbol,
}

impl Constructor {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Symbol::peek(tokens, "constructor") && Symbol::peek(tokens, "(") {
            ArgumentList::peek(tokens);
            tokens.peek().is_some_and(|t| t.is_symbol_eq(")"))
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        // The keyword doubles as the member name.
        let name = Identifier::parse(tokens);
        let open = Symbol::parse(tokens, "(");
        let arguments = ArgumentList::parse(tokens);
        let close = Symbol::parse(tokens, ")");
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        Constructor {
            frame,
            name,
            open,
            arguments,
            close,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::Method
    }

    pub fn name(&self) -> Option<String> {
        Some(self.name.name().to_string())
    }

    pub fn arguments(&self) -> &ArgumentList {
        &self.arguments
    }

    pub(crate) fn arguments_list_mut(&mut self) -> &mut ArgumentList {
        &mut self.arguments
    }

    pub fn method_name(&self) -> Option<String> {
        Some(method_name_text(Some("constructor"), Some(&self.arguments)))
    }

    pub fn method_names(&self) -> Vec<String> {
        method_names_text(Some("constructor"), Some(&self.arguments))
    }
}

impl Production for Constructor {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.name.write(out);
        self.open.write(out);
        self.arguments.write(out);
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.name.define_markup(generator);
        generator.add_text(&self.open.text());
        self.arguments.markup_inner(generator);
        generator.add_text(&self.close.text());
        &self.frame
    }
}

#[derive(Debug, Clone)]
pub enum IterableTypes {
    Value(TypeWithExtendedAttributes),
    KeyValue {
        key: TypeWithExtendedAttributes,
        comma: Symbol,
        value: TypeWithExtendedAttributes,
    },
}

impl IterableTypes {
    fn write(&self, out: &mut String) {
        match self {
            IterableTypes::Value(ty) => ty.write(out),
            IterableTypes::KeyValue { key, comma, value } => {
                key.write(out);
                comma.write(out);
                value.write(out);
            }
        }
    }

    fn markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        match self {
            IterableTypes::Value(ty) => generator.add_type(ty),
            IterableTypes::KeyValue { key, comma, value } => {
                generator.add_type(key);
                generator.add_text(&comma.text());
                generator.add_type(value);
            }
        }
    }

    fn parse(tokens: &mut TokenStream) -> Self {
        let first = TypeWithExtendedAttributes::parse(tokens);
        if Symbol::peek(tokens, ",") {
            IterableTypes::KeyValue {
                key: first,
                comma: Symbol::parse(tokens, ","),
                value: TypeWithExtendedAttributes::parse(tokens),
            }
        } else {
            IterableTypes::Value(first)
        }
    }
}

/// `"iterable" "<" TypeWithExtendedAttributes ["," TypeWithExtendedAttributes] ">" ";"`
/// or the legacy `"legacyiterable" "<" Type ">" ";"`.
#[derive(Debug, Clone)]
pub struct Iterable {
    frame: Frame,
    iterable: Symbol,
    open: Symbol,
    types: IterableTypes,
    close: Symbol,
}

impl Iterable {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Symbol::peek(tokens, "iterable") {
            if Symbol::peek(tokens, "<") && TypeWithExtendedAttributes::peek(tokens) {
                if Symbol::peek(tokens, ",") {
                    TypeWithExtendedAttributes::peek(tokens) && Symbol::peek(tokens, ">")
                } else {
                    Symbol::peek(tokens, ">")
                }
            } else {
                false
            }
        } else if Symbol::peek(tokens, "legacyiterable") {
            Symbol::peek(tokens, "<") && Type::peek(tokens) && Symbol::peek(tokens, ">")
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let iterable = Symbol::parse_any(tokens);
        let open = Symbol::parse(tokens, "<");
        let types = IterableTypes::parse(tokens);
        let close = Symbol::parse(tokens, ">");
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        Iterable {
            frame,
            iterable,
            open,
            types,
            close,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::Iterable
    }

    pub fn name(&self) -> Option<String> {
        Some("__iterable__".to_string())
    }
}

impl Production for Iterable {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.iterable.write(out);
        self.open.write(out);
        self.types.write(out);
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.iterable.define_markup(generator);
        generator.add_text(&self.open.text());
        self.types.markup(generator);
        generator.add_text(&self.close.text());
        &self.frame
    }
}

/// `"async" "iterable" "<" ... ">" ["(" [ArgumentList] ")"] ";"`
#[derive(Debug, Clone)]
pub struct AsyncIterable {
    frame: Frame,
    async_keyword: Symbol,
    iterable: Symbol,
    open: Symbol,
    types: IterableTypes,
    close: Symbol,
    open_paren: Option<Symbol>,
    arguments: Option<ArgumentList>,
    close_paren: Option<Symbol>,
}

impl AsyncIterable {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let mut matched = Symbol::peek(tokens, "async")
            && Symbol::peek(tokens, "iterable")
            && Symbol::peek(tokens, "<")
            && TypeWithExtendedAttributes::peek(tokens);
        if matched {
            if Symbol::peek(tokens, ",") {
                matched = TypeWithExtendedAttributes::peek(tokens);
            }
            matched = matched && Symbol::peek(tokens, ">");
            if matched && Symbol::peek(tokens, "(") {
                ArgumentList::peek(tokens);
                matched = Symbol::peek(tokens, ")");
            }
        }
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let async_keyword = Symbol::parse(tokens, "async");
        let iterable = Symbol::parse(tokens, "iterable");
        let open = Symbol::parse(tokens, "<");
        let types = IterableTypes::parse(tokens);
        let close = Symbol::parse(tokens, ">");
        let (open_paren, arguments, close_paren) = if Symbol::peek(tokens, "(") {
            (
                Some(Symbol::parse(tokens, "(")),
                Some(ArgumentList::parse(tokens)),
                Some(Symbol::parse(tokens, ")")),
            )
        } else {
            (None, None, None)
        };
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        AsyncIterable {
            frame,
            async_keyword,
            iterable,
            open,
            types,
            close,
            open_paren,
            arguments,
            close_paren,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::AsyncIterable
    }

    pub fn name(&self) -> Option<String> {
        Some("__async_iterable__".to_string())
    }

    pub fn arguments(&self) -> Option<&ArgumentList> {
        self.arguments.as_ref()
    }

    pub(crate) fn arguments_list_mut(&mut self) -> Option<&mut ArgumentList> {
        self.arguments.as_mut()
    }
}

impl Production for AsyncIterable {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.async_keyword.write(out);
        self.iterable.write(out);
        self.open.write(out);
        self.types.write(out);
        self.close.write(out);
        write_opt(out, &self.open_paren);
        write_opt(out, &self.arguments);
        write_opt(out, &self.close_paren);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.async_keyword.define_markup(generator);
        self.iterable.define_markup(generator);
        generator.add_text(&self.open.text());
        self.types.markup(generator);
        generator.add_text(&self.close.text());
        if let Some(open_paren) = &self.open_paren {
            generator.add_text(&open_paren.text());
        }
        if let Some(arguments) = &self.arguments {
            arguments.markup_inner(generator);
        }
        if let Some(close_paren) = &self.close_paren {
            generator.add_text(&close_paren.text());
        }
        &self.frame
    }
}

/// `["readonly"] "maplike" "<" TypeWithExtendedAttributes "," TypeWithExtendedAttributes ">" ";"`
#[derive(Debug, Clone)]
pub struct Maplike {
    frame: Frame,
    readonly: Option<Symbol>,
    maplike: Symbol,
    open: Symbol,
    key: TypeWithExtendedAttributes,
    comma: Symbol,
    value: TypeWithExtendedAttributes,
    close: Symbol,
}

impl Maplike {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        Symbol::peek(tokens, "readonly");
        let matched = Symbol::peek(tokens, "maplike")
            && Symbol::peek(tokens, "<")
            && TypeWithExtendedAttributes::peek(tokens)
            && Symbol::peek(tokens, ",")
            && TypeWithExtendedAttributes::peek(tokens)
            && Symbol::peek(tokens, ">");
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let readonly = if Symbol::peek(tokens, "readonly") {
            Some(Symbol::parse(tokens, "readonly"))
        } else {
            None
        };
        let maplike = Symbol::parse(tokens, "maplike");
        let open = Symbol::parse(tokens, "<");
        let key = TypeWithExtendedAttributes::parse(tokens);
        let comma = Symbol::parse(tokens, ",");
        let value = TypeWithExtendedAttributes::parse(tokens);
        let close = Symbol::parse(tokens, ">");
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        Maplike {
            frame,
            readonly,
            maplike,
            open,
            key,
            comma,
            value,
            close,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::Maplike
    }

    pub fn name(&self) -> Option<String> {
        Some("__maplike__".to_string())
    }
}

impl Production for Maplike {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        write_opt(out, &self.readonly);
        self.maplike.write(out);
        self.open.write(out);
        self.key.write(out);
        self.comma.write(out);
        self.value.write(out);
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(readonly) = &self.readonly {
            readonly.define_markup(generator);
        }
        self.maplike.define_markup(generator);
        generator.add_text(&self.open.text());
        generator.add_type(&self.key);
        generator.add_text(&self.comma.text());
        generator.add_type(&self.value);
        generator.add_text(&self.close.text());
        &self.frame
    }
}

/// `["readonly"] "setlike" "<" TypeWithExtendedAttributes ">" ";"`
#[derive(Debug, Clone)]
pub struct Setlike {
    frame: Frame,
    readonly: Option<Symbol>,
    setlike: Symbol,
    open: Symbol,
    ty: TypeWithExtendedAttributes,
    close: Symbol,
}

impl Setlike {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        Symbol::peek(tokens, "readonly");
        let matched = Symbol::peek(tokens, "setlike")
            && Symbol::peek(tokens, "<")
            && TypeWithExtendedAttributes::peek(tokens)
            && Symbol::peek(tokens, ">");
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let readonly = if Symbol::peek(tokens, "readonly") {
            Some(Symbol::parse(tokens, "readonly"))
        } else {
            None
        };
        let setlike = Symbol::parse(tokens, "setlike");
        let open = Symbol::parse(tokens, "<");
        let ty = TypeWithExtendedAttributes::parse(tokens);
        let close = Symbol::parse(tokens, ">");
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        Setlike {
            frame,
            readonly,
            setlike,
            open,
            ty,
            close,
        }
    }

    pub fn idl_type(&self) -> IdlType {
        IdlType::Setlike
    }

    pub fn name(&self) -> Option<String> {
        Some("__setlike__".to_string())
    }
}

impl Production for Setlike {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        write_opt(out, &self.readonly);
        self.setlike.write(out);
        self.open.write(out);
        self.ty.write(out);
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(readonly) = &self.readonly {
            readonly.define_markup(generator);
        }
        self.setlike.define_markup(generator);
        generator.add_text(&self.open.text());
        generator.add_type(&self.ty);
        generator.add_text(&self.close.text());
        &self.frame
    }
}

/// `":" TypeIdentifier [IgnoreMultipleInheritance]`
#[derive(Debug, Clone)]
pub struct Inheritance {
    frame: Frame,
    colon: Symbol,
    base: TypeIdentifier,
    ignore: Option<IgnoreMultipleInheritance>,
}

impl Inheritance {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Symbol::peek(tokens, ":") && TypeIdentifier::peek(tokens) {
            IgnoreMultipleInheritance::peek(tokens);
            true
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let colon = Symbol::parse(tokens, ":");
        let base = TypeIdentifier::parse(tokens);
        let ignore = if IgnoreMultipleInheritance::peek(tokens) {
            Some(IgnoreMultipleInheritance::parse(tokens, false))
        } else {
            None
        };
        frame.did_parse(tokens, true);
        Inheritance {
            frame,
            colon,
            base,
            ignore,
        }
    }

    pub fn base_name(&self) -> &str {
        self.base.name()
    }
}

impl Production for Inheritance {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.colon.write(out);
        self.base.write(out);
        write_opt(out, &self.ignore);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_text(&self.colon.text());
        self.base.define_markup(generator);
        if let Some(ignore) = &self.ignore {
            ignore.define_markup(generator);
        }
        &self.frame
    }
}

/// `"," TypeIdentifier ["," TypeIdentifier]...`
#[derive(Debug, Clone)]
pub struct TypeIdentifiers {
    frame: Frame,
    comma: Symbol,
    name: TypeIdentifier,
    next: Option<Box<TypeIdentifiers>>,
}

impl TypeIdentifiers {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Symbol::peek(tokens, ",") && TypeIdentifier::peek(tokens) {
            TypeIdentifiers::peek(tokens);
            true
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let comma = Symbol::parse(tokens, ",");
        let name = TypeIdentifier::parse(tokens);
        let next = if TypeIdentifiers::peek(tokens) {
            Some(Box::new(TypeIdentifiers::parse(tokens)))
        } else {
            None
        };
        frame.did_parse(tokens, true);
        TypeIdentifiers {
            frame,
            comma,
            name,
            next,
        }
    }

    pub fn names(&self) -> Vec<String> {
        let mut names = vec![self.name.name().to_string()];
        let mut next = self.next.as_deref();
        while let Some(link) = next {
            names.push(link.name.name().to_string());
            next = link.next.as_deref();
        }
        names
    }
}

impl Production for TypeIdentifiers {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.comma.write(out);
        self.name.write(out);
        if let Some(next) = &self.next {
            next.write(out);
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_text(&self.comma.text());
        self.name.define_markup(generator);
        if let Some(next) = &self.next {
            next.markup_inner(generator);
        }
        &self.frame
    }
}

/// `"[" ExtendedAttribute ["," ExtendedAttribute]... "]"`
#[derive(Debug, Clone)]
pub struct ExtendedAttributeList {
    frame: Frame,
    open: Symbol,
    attributes: Vec<ExtendedAttribute>,
    commas: Vec<Symbol>,
    close: Symbol,
}

impl ExtendedAttributeList {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = Symbol::peek(tokens, "[") && tokens.peek_past("]");
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let open = Symbol::parse(tokens, "[");
        let mut attributes = Vec::new();
        let mut commas = Vec::new();
        while tokens.has_tokens() {
            attributes.push(ExtendedAttribute::parse(tokens));
            match tokens.sneak_peek() {
                Some(token) if token.is_symbol_eq(",") => {
                    commas.push(Symbol::parse(tokens, ","));
                }
                _ => break,
            }
        }
        let close = Symbol::parse(tokens, "]");
        frame.did_parse(tokens, true);
        ExtendedAttributeList {
            frame,
            open,
            attributes,
            commas,
            close,
        }
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attributes(&self) -> &[ExtendedAttribute] {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&ExtendedAttribute> {
        self.attributes
            .iter()
            .find(|a| a.name().as_deref() == Some(name))
    }

    /// Assembly-time patch: tell every attribute which construct owns the
    /// list, so constructor-flavored attributes can resolve their names.
    pub(crate) fn adopt(&mut self, owner: &ParentRef) {
        for attribute in &mut self.attributes {
            attribute.adopt_owner(owner.clone());
        }
    }
}

impl Production for ExtendedAttributeList {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.open.write(out);
        for index in 0..self.attributes.len().max(self.commas.len()) {
            if let Some(attribute) = self.attributes.get(index) {
                attribute.write(out);
            }
            if let Some(comma) = self.commas.get(index) {
                comma.write(out);
            }
        }
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_text(&self.open.text());
        for index in 0..self.attributes.len().max(self.commas.len()) {
            if let Some(attribute) = self.attributes.get(index) {
                attribute.define_markup(generator);
            }
            if let Some(comma) = self.commas.get(index) {
                generator.add_text(&comma.text());
            }
        }
        generator.add_text(&self.close.text());
        &self.frame
    }
}

impl_display_via_production!(
    Special,
    AttributeName,
    AttributeRest,
    Attribute,
    MixinAttribute,
    OperationName,
    OperationRest,
    Operation,
    SpecialOperation,
    Stringifier,
    Serializer,
    StaticMember,
    Constructor,
    Iterable,
    AsyncIterable,
    Maplike,
    Setlike,
    Inheritance,
    TypeIdentifiers,
    ExtendedAttributeList,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> TokenStream<'static> {
        TokenStream::new(text, None)
    }

    #[test]
    fn test_attribute_round_trip() {
        let source = "readonly attribute long? service;";
        let mut tokens = stream(source);
        assert!(Attribute::peek(&mut tokens));
        let mut tokens = stream(source);
        let attribute = Attribute::parse(&mut tokens);
        assert_eq!(attribute.text(), source);
        assert_eq!(attribute.name().as_deref(), Some("service"));
        assert!(attribute.rest().is_readonly());
    }

    #[test]
    fn test_operation_method_names() {
        let source = "undefined draw(long x, optional long y);";
        let mut tokens = stream(source);
        assert!(Operation::peek(&mut tokens));
        let mut tokens = stream(source);
        let operation = Operation::parse(&mut tokens);
        assert_eq!(operation.text(), source);
        assert_eq!(operation.method_names(), vec!["draw(x, y)", "draw(x)"]);
        assert_eq!(operation.method_name().as_deref(), Some("draw(x, y)"));
    }

    #[test]
    fn test_special_operation_name() {
        let source = "getter object (DOMString name);";
        let mut tokens = stream(source);
        assert!(SpecialOperation::peek(&mut tokens));
        let mut tokens = stream(source);
        let operation = SpecialOperation::parse(&mut tokens);
        assert_eq!(operation.text(), source);
        assert_eq!(operation.name().as_deref(), Some("__getter__"));
    }

    #[test]
    fn test_stringifier_forms() {
        for (source, name) in [
            ("stringifier;", "__stringifier__"),
            ("stringifier attribute DOMString mediaText;", "mediaText"),
            ("stringifier foo me(int x);", "me"),
        ] {
            let mut tokens = stream(source);
            assert!(Stringifier::peek(&mut tokens), "{source}");
            let mut tokens = stream(source);
            let stringifier = Stringifier::parse(&mut tokens);
            assert_eq!(stringifier.text(), source);
            assert_eq!(stringifier.name().as_deref(), Some(name));
        }
    }

    #[test]
    fn test_serializer_forms() {
        for source in [
            "serializer;",
            "serializer = { foo };",
            "serializer cereal(short one);",
        ] {
            let mut tokens = stream(source);
            assert!(Serializer::peek(&mut tokens), "{source}");
            let mut tokens = stream(source);
            let serializer = Serializer::parse(&mut tokens);
            assert_eq!(serializer.text(), source);
            assert_eq!(serializer.idl_type(), IdlType::Serializer);
        }
    }

    #[test]
    fn test_iterables_and_friends() {
        for source in [
            "iterable<Foo>;",
            "iterable<Foo, Bar>;",
            "async iterable<Foo, Bar>(DOMString name);",
            "readonly maplike<Foo, Bar>;",
            "setlike<Uint8ClampedArray>;",
        ] {
            let mut tokens = stream(source);
            let matched = Iterable::peek(&mut tokens)
                || AsyncIterable::peek(&mut tokens)
                || Maplike::peek(&mut tokens)
                || Setlike::peek(&mut tokens);
            assert!(matched, "{source}");
        }
    }

    #[test]
    fn test_inheritance_with_legacy_bases() {
        let source = ": One  ,  Two   ,   Three     ";
        let mut tokens = stream(source);
        assert!(Inheritance::peek(&mut tokens));
        let mut tokens = stream(source);
        let inheritance = Inheritance::parse(&mut tokens);
        assert_eq!(inheritance.text(), source);
        assert_eq!(inheritance.base_name(), "One");
    }

    #[test]
    fn test_extended_attribute_list_round_trip() {
        let source = "[ Constructor , LegacyFactoryFunction = MyConstructor (Foo two , long long longest ) ] ";
        let mut tokens = stream(source);
        assert!(ExtendedAttributeList::peek(&mut tokens));
        let mut tokens = stream(source);
        let list = ExtendedAttributeList::parse(&mut tokens);
        assert_eq!(list.text(), source);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_empty_extended_attribute_list() {
        let source = "[] ";
        let mut tokens = stream(source);
        assert!(ExtendedAttributeList::peek(&mut tokens));
        let mut tokens = stream(source);
        let list = ExtendedAttributeList::parse(&mut tokens);
        assert_eq!(list.text(), source);
    }
}
