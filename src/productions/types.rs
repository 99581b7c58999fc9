//! The WebIDL type grammar
//!
//! `Type` is a single type or a union, with nullability (`?`) parsed once on
//! the outermost type. The non-any alternatives are a tagged variant rather
//! than a class ladder: primitive, string, buffer, object, plain identifier,
//! generic (`sequence` / `FrozenArray` / `ObservableArray`), `Promise`, and
//! `record`.

use crate::markup::MarkupGenerator;
use crate::productions::members::ExtendedAttributeList;
use crate::productions::terminals::{Symbol, TypeIdentifier};
use crate::productions::{impl_display_via_production, write_opt, Frame, Production};
use crate::tokenizer::TokenStream;

pub(crate) const STRING_TYPES: [&str; 3] = ["ByteString", "DOMString", "USVString"];
pub(crate) const OBJECT_TYPES: [&str; 2] = ["object", "Error"];
pub(crate) const BUFFER_RELATED_TYPES: [&str; 11] = [
    "ArrayBuffer",
    "DataView",
    "Int8Array",
    "Int16Array",
    "Int32Array",
    "Uint8Array",
    "Uint16Array",
    "Uint32Array",
    "Uint8ClampedArray",
    "Float32Array",
    "Float64Array",
];

const GENERIC_KEYWORDS: [&str; 3] = ["sequence", "FrozenArray", "ObservableArray"];

/// `"short" | "long" ["long"]`
#[derive(Debug, Clone)]
pub struct IntegerType {
    frame: Frame,
    kind_text: String,
    space: Option<String>,
}

impl IntegerType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = match tokens.peek() {
            Some(token) if token.is_symbol() => {
                if token.text == "long" {
                    let second = tokens.mark();
                    let more = tokens.peek().is_some_and(|t| t.is_symbol_eq("long"));
                    tokens.resolve(second, more);
                    true
                } else {
                    token.text == "short"
                }
            }
            _ => false,
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let mut kind_text = tokens.next_required().text;
        let mut space = None;
        if kind_text == "long" && tokens.sneak_peek().is_some_and(|t| t.is_symbol_eq("long")) {
            space = Some(tokens.whitespace().unwrap_or_default());
            kind_text.push(' ');
            kind_text.push_str(&tokens.next_required().text);
        }
        frame.did_parse(tokens, false);
        IntegerType {
            frame,
            kind_text,
            space,
        }
    }

    pub fn type_text(&self) -> &str {
        &self.kind_text
    }
}

impl Production for IntegerType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        match &self.space {
            Some(space) => {
                let mut words = self.kind_text.splitn(2, ' ');
                out.push_str(words.next().unwrap_or(""));
                out.push_str(space);
                out.push_str(words.next().unwrap_or(""));
            }
            None => out.push_str(&self.kind_text),
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        match &self.space {
            Some(space) => {
                let mut words = self.kind_text.splitn(2, ' ');
                generator.add_keyword(words.next().unwrap_or(""));
                generator.add_text(space);
                generator.add_keyword(words.next().unwrap_or(""));
            }
            None => generator.add_keyword(&self.kind_text),
        }
        &self.frame
    }
}

/// `["unsigned"] IntegerType`
#[derive(Debug, Clone)]
pub struct UnsignedIntegerType {
    frame: Frame,
    unsigned: Option<Symbol>,
    integer: IntegerType,
}

impl UnsignedIntegerType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        if IntegerType::peek(tokens) {
            return true;
        }
        let mark = tokens.mark();
        let matched = Symbol::peek(tokens, "unsigned") && IntegerType::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let unsigned = if Symbol::peek(tokens, "unsigned") {
            Some(Symbol::parse(tokens, "unsigned"))
        } else {
            None
        };
        let integer = IntegerType::parse(tokens);
        frame.did_parse(tokens, false);
        UnsignedIntegerType {
            frame,
            unsigned,
            integer,
        }
    }
}

impl Production for UnsignedIntegerType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        write_opt(out, &self.unsigned);
        self.integer.write_inner(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(unsigned) = &self.unsigned {
            unsigned.define_markup(generator);
        }
        self.integer.markup_inner(generator)
    }
}

/// `"float" | "double"`
#[derive(Debug, Clone)]
pub struct FloatType {
    frame: Frame,
    kind_text: String,
}

impl FloatType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        Symbol::peek_of(tokens, &["float", "double"])
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let kind_text = tokens.next_required().text;
        frame.did_parse(tokens, false);
        FloatType { frame, kind_text }
    }
}

impl Production for FloatType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        out.push_str(&self.kind_text);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_keyword(&self.kind_text);
        &self.frame
    }
}

/// `["unrestricted"] FloatType`
#[derive(Debug, Clone)]
pub struct UnrestrictedFloatType {
    frame: Frame,
    unrestricted: Option<Symbol>,
    float: FloatType,
}

impl UnrestrictedFloatType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        if FloatType::peek(tokens) {
            return true;
        }
        let mark = tokens.mark();
        let matched = Symbol::peek(tokens, "unrestricted") && FloatType::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let unrestricted = if Symbol::peek(tokens, "unrestricted") {
            Some(Symbol::parse(tokens, "unrestricted"))
        } else {
            None
        };
        let float = FloatType::parse(tokens);
        frame.did_parse(tokens, false);
        UnrestrictedFloatType {
            frame,
            unrestricted,
            float,
        }
    }
}

impl Production for UnrestrictedFloatType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        write_opt(out, &self.unrestricted);
        self.float.write_inner(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(unrestricted) = &self.unrestricted {
            unrestricted.define_markup(generator);
        }
        self.float.markup_inner(generator)
    }
}

#[derive(Debug, Clone)]
pub enum PrimitiveTypeKind {
    UnsignedInteger(UnsignedIntegerType),
    UnrestrictedFloat(UnrestrictedFloatType),
    /// `"undefined" | "boolean" | "byte" | "octet" | "bigint"`
    Other(Symbol),
}

/// `UnsignedIntegerType | UnrestrictedFloatType | "undefined" | "boolean"
/// | "byte" | "octet" | "bigint"`
#[derive(Debug, Clone)]
pub struct PrimitiveType {
    frame: Frame,
    kind: PrimitiveTypeKind,
}

impl PrimitiveType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        UnsignedIntegerType::peek(tokens)
            || UnrestrictedFloatType::peek(tokens)
            || Symbol::peek_of(tokens, &["undefined", "boolean", "byte", "octet", "bigint"])
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let kind = if UnsignedIntegerType::peek(tokens) {
            PrimitiveTypeKind::UnsignedInteger(UnsignedIntegerType::parse(tokens))
        } else if UnrestrictedFloatType::peek(tokens) {
            PrimitiveTypeKind::UnrestrictedFloat(UnrestrictedFloatType::parse(tokens))
        } else {
            PrimitiveTypeKind::Other(Symbol::parse_any_tight(tokens))
        };
        frame.did_parse(tokens, false);
        PrimitiveType { frame, kind }
    }

    pub fn type_name(&self) -> String {
        match &self.kind {
            PrimitiveTypeKind::UnsignedInteger(inner) => inner.text(),
            PrimitiveTypeKind::UnrestrictedFloat(inner) => inner.text(),
            PrimitiveTypeKind::Other(symbol) => symbol.symbol().to_string(),
        }
    }
}

impl Production for PrimitiveType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        match &self.kind {
            PrimitiveTypeKind::UnsignedInteger(inner) => inner.write_inner(out),
            PrimitiveTypeKind::UnrestrictedFloat(inner) => inner.write_inner(out),
            PrimitiveTypeKind::Other(symbol) => symbol.write_inner(out),
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        match &self.kind {
            PrimitiveTypeKind::UnsignedInteger(inner) => inner.markup_inner(generator),
            PrimitiveTypeKind::UnrestrictedFloat(inner) => inner.markup_inner(generator),
            PrimitiveTypeKind::Other(symbol) => symbol.markup_inner(generator),
        }
    }
}

/// `"ByteString" | "DOMString" | "USVString"`
#[derive(Debug, Clone)]
pub struct StringType {
    frame: Frame,
    symbol: Symbol,
}

impl StringType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        Symbol::peek_of(tokens, &STRING_TYPES)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let symbol = Symbol::parse_any_tight(tokens);
        frame.did_parse(tokens, false);
        StringType { frame, symbol }
    }

    pub fn type_name(&self) -> &str {
        self.symbol.symbol()
    }
}

impl Production for StringType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.symbol.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.symbol.markup_inner(generator)
    }
}

/// `"object" | "Error"`
#[derive(Debug, Clone)]
pub struct ObjectType {
    frame: Frame,
    symbol: Symbol,
}

impl ObjectType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        Symbol::peek_of(tokens, &OBJECT_TYPES)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let symbol = Symbol::parse_any_tight(tokens);
        frame.did_parse(tokens, false);
        ObjectType { frame, symbol }
    }

    pub fn type_name(&self) -> &str {
        self.symbol.symbol()
    }
}

impl Production for ObjectType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.symbol.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.symbol.markup_inner(generator)
    }
}

/// One of the typed-array / buffer keywords (`ArrayBuffer`, `DataView`,
/// `Int8Array`, ...).
#[derive(Debug, Clone)]
pub struct BufferType {
    frame: Frame,
    symbol: Symbol,
}

impl BufferType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        Symbol::peek_of(tokens, &BUFFER_RELATED_TYPES)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let symbol = Symbol::parse_any_tight(tokens);
        frame.did_parse(tokens, false);
        BufferType { frame, symbol }
    }

    pub fn type_name(&self) -> &str {
        self.symbol.symbol()
    }
}

impl Production for BufferType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.symbol.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.symbol.markup_inner(generator)
    }
}

/// `("sequence" | "FrozenArray" | "ObservableArray") "<" TypeWithExtendedAttributes ">"`
#[derive(Debug, Clone)]
pub struct GenericType {
    frame: Frame,
    keyword: Symbol,
    open: Symbol,
    inner: Box<TypeWithExtendedAttributes>,
    close: Symbol,
}

impl GenericType {
    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let keyword = Symbol::parse_any(tokens);
        let open = Symbol::parse(tokens, "<");
        let inner = Box::new(TypeWithExtendedAttributes::parse(tokens));
        let close = Symbol::parse_tight(tokens, ">");
        frame.did_parse(tokens, false);
        GenericType {
            frame,
            keyword,
            open,
            inner,
            close,
        }
    }

    pub fn keyword(&self) -> &str {
        self.keyword.symbol()
    }

    pub fn inner(&self) -> &TypeWithExtendedAttributes {
        &self.inner
    }
}

impl Production for GenericType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.keyword.write(out);
        self.open.write(out);
        self.inner.write(out);
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.keyword.define_markup(generator);
        generator.add_text(&self.open.text());
        generator.add_type(self.inner.as_ref());
        generator.add_text(&self.close.text());
        &self.frame
    }
}

/// `"Promise" "<" Type ">"`
#[derive(Debug, Clone)]
pub struct PromiseType {
    frame: Frame,
    promise: Symbol,
    open: Symbol,
    inner: Box<Type>,
    close: Symbol,
}

impl PromiseType {
    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let promise = Symbol::parse(tokens, "Promise");
        let open = Symbol::parse(tokens, "<");
        let inner = Box::new(Type::parse(tokens));
        let close = Symbol::parse_tight(tokens, ">");
        frame.did_parse(tokens, false);
        PromiseType {
            frame,
            promise,
            open,
            inner,
            close,
        }
    }

    pub fn inner(&self) -> &Type {
        &self.inner
    }
}

impl Production for PromiseType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.promise.write(out);
        self.open.write(out);
        self.inner.write(out);
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.promise.define_markup(generator);
        generator.add_text(&self.open.text());
        generator.add_type(self.inner.as_ref());
        generator.add_text(&self.close.text());
        &self.frame
    }
}

/// `"record" "<" StringType "," TypeWithExtendedAttributes ">"`
#[derive(Debug, Clone)]
pub struct RecordType {
    frame: Frame,
    record: Symbol,
    open: Symbol,
    key: StringType,
    comma: Symbol,
    value: Box<TypeWithExtendedAttributes>,
    close: Symbol,
}

impl RecordType {
    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let record = Symbol::parse(tokens, "record");
        let open = Symbol::parse(tokens, "<");
        let key = StringType::parse(tokens);
        let comma = Symbol::parse(tokens, ",");
        let value = Box::new(TypeWithExtendedAttributes::parse(tokens));
        let close = Symbol::parse_tight(tokens, ">");
        frame.did_parse(tokens, false);
        RecordType {
            frame,
            record,
            open,
            key,
            comma,
            value,
            close,
        }
    }

    pub fn key(&self) -> &StringType {
        &self.key
    }

    pub fn value(&self) -> &TypeWithExtendedAttributes {
        &self.value
    }
}

impl Production for RecordType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.record.write(out);
        self.open.write(out);
        self.key.write(out);
        self.comma.write(out);
        self.value.write(out);
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.record.define_markup(generator);
        generator.add_text(&self.open.text());
        generator.add_string_type(&self.key);
        generator.add_text(&self.comma.text());
        self.value.define_markup(generator);
        generator.add_text(&self.close.text());
        &self.frame
    }
}

/// `"any"`
#[derive(Debug, Clone)]
pub struct AnyType {
    frame: Frame,
    any: Symbol,
}

impl AnyType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        Symbol::peek(tokens, "any")
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let any = Symbol::parse_tight(tokens, "any");
        frame.did_parse(tokens, false);
        AnyType { frame, any }
    }
}

impl Production for AnyType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.any.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.any.define_markup(generator);
        &self.frame
    }
}

#[derive(Debug, Clone)]
pub enum NonAnyTypeKind {
    Primitive(PrimitiveType),
    String(StringType),
    Object(ObjectType),
    Buffer(BufferType),
    Identifier(TypeIdentifier),
    Generic(GenericType),
    Promise(PromiseType),
    Record(RecordType),
}

/// Every type alternative except `any` and unions.
#[derive(Debug, Clone)]
pub struct NonAnyType {
    frame: Frame,
    kind: NonAnyTypeKind,
}

impl NonAnyType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        if PrimitiveType::peek(tokens) {
            return true;
        }
        let mark = tokens.mark();
        let matched = match tokens.peek() {
            Some(token)
                if token.is_symbol_of(&STRING_TYPES)
                    || token.is_symbol_of(&OBJECT_TYPES)
                    || token.is_identifier() =>
            {
                true
            }
            Some(token) if token.is_symbol_of(&GENERIC_KEYWORDS) => {
                Symbol::peek(tokens, "<")
                    && TypeWithExtendedAttributes::peek(tokens)
                    && Symbol::peek(tokens, ">")
            }
            Some(token) if token.is_symbol_eq("Promise") => {
                Symbol::peek(tokens, "<") && Type::peek(tokens) && Symbol::peek(tokens, ">")
            }
            Some(token) if token.is_symbol_of(&BUFFER_RELATED_TYPES) => true,
            Some(token) if token.is_symbol_eq("record") => {
                Symbol::peek(tokens, "<")
                    && Symbol::peek_of(tokens, &STRING_TYPES)
                    && Symbol::peek(tokens, ",")
                    && TypeWithExtendedAttributes::peek(tokens)
                    && Symbol::peek(tokens, ">")
            }
            _ => false,
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let kind = if PrimitiveType::peek(tokens) {
            NonAnyTypeKind::Primitive(PrimitiveType::parse(tokens))
        } else {
            match tokens.sneak_peek() {
                Some(token) if token.is_identifier() => {
                    NonAnyTypeKind::Identifier(TypeIdentifier::parse(tokens))
                }
                Some(token) if token.is_symbol_of(&GENERIC_KEYWORDS) => {
                    NonAnyTypeKind::Generic(GenericType::parse(tokens))
                }
                Some(token) if token.is_symbol_eq("Promise") => {
                    NonAnyTypeKind::Promise(PromiseType::parse(tokens))
                }
                Some(token) if token.is_symbol_of(&BUFFER_RELATED_TYPES) => {
                    NonAnyTypeKind::Buffer(BufferType::parse(tokens))
                }
                Some(token) if token.is_symbol_eq("record") => {
                    NonAnyTypeKind::Record(RecordType::parse(tokens))
                }
                Some(token) if token.is_symbol_of(&OBJECT_TYPES) => {
                    NonAnyTypeKind::Object(ObjectType::parse(tokens))
                }
                _ => NonAnyTypeKind::String(StringType::parse(tokens)),
            }
        };
        frame.did_parse(tokens, false);
        NonAnyType { frame, kind }
    }

    pub fn kind(&self) -> &NonAnyTypeKind {
        &self.kind
    }

    pub fn type_name(&self) -> Option<String> {
        match &self.kind {
            NonAnyTypeKind::Identifier(identifier) => Some(identifier.type_name().to_string()),
            _ => None,
        }
    }

    pub fn type_names(&self) -> Vec<String> {
        self.type_name().into_iter().collect()
    }
}

impl Production for NonAnyType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        match &self.kind {
            NonAnyTypeKind::Primitive(inner) => inner.write(out),
            NonAnyTypeKind::String(inner) => inner.write(out),
            NonAnyTypeKind::Object(inner) => inner.write(out),
            NonAnyTypeKind::Buffer(inner) => inner.write(out),
            NonAnyTypeKind::Identifier(inner) => inner.write(out),
            NonAnyTypeKind::Generic(inner) => inner.write(out),
            NonAnyTypeKind::Promise(inner) => inner.write(out),
            NonAnyTypeKind::Record(inner) => inner.write(out),
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        match &self.kind {
            NonAnyTypeKind::Primitive(inner) => generator.add_primitive_type(inner),
            NonAnyTypeKind::String(inner) => generator.add_string_type(inner),
            NonAnyTypeKind::Object(inner) => generator.add_object_type(inner),
            NonAnyTypeKind::Buffer(inner) => generator.add_buffer_type(inner),
            NonAnyTypeKind::Identifier(inner) => inner.define_markup(generator),
            NonAnyTypeKind::Generic(inner) => {
                inner.markup_inner(generator);
            }
            NonAnyTypeKind::Promise(inner) => {
                inner.markup_inner(generator);
            }
            NonAnyTypeKind::Record(inner) => {
                inner.markup_inner(generator);
            }
        }
        &self.frame
    }
}

#[derive(Debug, Clone)]
pub enum SingleTypeKind {
    NonAny(NonAnyType),
    Any(AnyType),
}

/// `NonAnyType | AnyType`
#[derive(Debug, Clone)]
pub struct SingleType {
    frame: Frame,
    kind: SingleTypeKind,
}

impl SingleType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        NonAnyType::peek(tokens) || AnyType::peek(tokens)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let kind = if NonAnyType::peek(tokens) {
            SingleTypeKind::NonAny(NonAnyType::parse(tokens))
        } else {
            SingleTypeKind::Any(AnyType::parse(tokens))
        };
        frame.did_parse(tokens, false);
        SingleType { frame, kind }
    }

    pub fn type_name(&self) -> Option<String> {
        match &self.kind {
            SingleTypeKind::NonAny(inner) => inner.type_name(),
            SingleTypeKind::Any(_) => None,
        }
    }

    pub fn type_names(&self) -> Vec<String> {
        match &self.kind {
            SingleTypeKind::NonAny(inner) => inner.type_names(),
            SingleTypeKind::Any(_) => Vec::new(),
        }
    }
}

impl Production for SingleType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        match &self.kind {
            SingleTypeKind::NonAny(inner) => inner.write(out),
            SingleTypeKind::Any(inner) => inner.write(out),
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        match &self.kind {
            SingleTypeKind::NonAny(inner) => {
                inner.markup_inner(generator);
            }
            SingleTypeKind::Any(inner) => {
                inner.markup_inner(generator);
            }
        }
        &self.frame
    }
}

#[derive(Debug, Clone)]
pub enum UnionMemberKind {
    NonAny(NonAnyType),
    Union(UnionType),
    Any(AnyType),
}

/// `[ExtendedAttributeList] NonAnyType | UnionType | AnyType`
#[derive(Debug, Clone)]
pub struct UnionMemberType {
    frame: Frame,
    extended_attributes: Option<ExtendedAttributeList>,
    kind: UnionMemberKind,
}

impl UnionMemberType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        if ExtendedAttributeList::peek(tokens) && NonAnyType::peek(tokens) {
            return true;
        }
        if NonAnyType::peek(tokens) {
            return true;
        }
        if UnionType::peek(tokens) {
            return true;
        }
        AnyType::peek(tokens)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let kind = if NonAnyType::peek(tokens) {
            UnionMemberKind::NonAny(NonAnyType::parse(tokens))
        } else if UnionType::peek(tokens) {
            UnionMemberKind::Union(UnionType::parse(tokens))
        } else {
            UnionMemberKind::Any(AnyType::parse(tokens))
        };
        frame.did_parse(tokens, false);
        UnionMemberType {
            frame,
            extended_attributes,
            kind,
        }
    }

    pub fn extended_attributes(&self) -> Option<&ExtendedAttributeList> {
        self.extended_attributes.as_ref()
    }

    pub fn type_name(&self) -> Option<String> {
        match &self.kind {
            UnionMemberKind::NonAny(inner) => inner.type_name(),
            UnionMemberKind::Union(_) | UnionMemberKind::Any(_) => None,
        }
    }

    pub fn type_names(&self) -> Vec<String> {
        match &self.kind {
            UnionMemberKind::NonAny(inner) => inner.type_names(),
            UnionMemberKind::Union(inner) => inner.type_names(),
            UnionMemberKind::Any(_) => Vec::new(),
        }
    }
}

impl Production for UnionMemberType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        write_opt(out, &self.extended_attributes);
        match &self.kind {
            UnionMemberKind::NonAny(inner) => inner.write(out),
            UnionMemberKind::Union(inner) => inner.write(out),
            UnionMemberKind::Any(inner) => inner.write(out),
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(attributes) = &self.extended_attributes {
            attributes.define_markup(generator);
        }
        match &self.kind {
            UnionMemberKind::NonAny(inner) => inner.define_markup(generator),
            UnionMemberKind::Union(inner) => inner.define_markup(generator),
            UnionMemberKind::Any(inner) => inner.define_markup(generator),
        }
        &self.frame
    }
}

/// `"(" UnionMemberType ["or" UnionMemberType]... ")"`
#[derive(Debug, Clone)]
pub struct UnionType {
    frame: Frame,
    open: Symbol,
    types: Vec<UnionMemberType>,
    ors: Vec<Symbol>,
    close: Symbol,
}

impl UnionType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        if !Symbol::peek(tokens, "(") {
            return tokens.resolve(mark, false);
        }
        loop {
            if !UnionMemberType::peek(tokens) {
                return tokens.resolve(mark, false);
            }
            match tokens.peek() {
                Some(token) if token.is_symbol_eq("or") => continue,
                Some(token) if token.is_symbol_eq(")") => return tokens.resolve(mark, true),
                _ => return tokens.resolve(mark, false),
            }
        }
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let open = Symbol::parse(tokens, "(");
        let mut types = Vec::new();
        let mut ors = Vec::new();
        while tokens.has_tokens() {
            types.push(UnionMemberType::parse(tokens));
            match tokens.sneak_peek() {
                Some(token) if token.is_symbol_eq("or") => {
                    ors.push(Symbol::parse(tokens, "or"));
                }
                _ => break,
            }
        }
        let close = Symbol::parse_tight(tokens, ")");
        frame.did_parse(tokens, false);
        UnionType {
            frame,
            open,
            types,
            ors,
            close,
        }
    }

    pub fn types(&self) -> &[UnionMemberType] {
        &self.types
    }

    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().filter_map(|t| t.type_name()).collect()
    }
}

impl Production for UnionType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.open.write(out);
        for index in 0..self.types.len().max(self.ors.len()) {
            if let Some(member) = self.types.get(index) {
                member.write(out);
            }
            if let Some(or) = self.ors.get(index) {
                or.write(out);
            }
        }
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        generator.add_text(&self.open.text());
        for index in 0..self.types.len().max(self.ors.len()) {
            if let Some(member) = self.types.get(index) {
                generator.add_type(member);
            }
            if let Some(or) = self.ors.get(index) {
                or.define_markup(generator);
            }
        }
        generator.add_text(&self.close.text());
        &self.frame
    }
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    Single(SingleType),
    Union(UnionType),
}

/// `SingleType ["?"] | UnionType ["?"]` — nullability belongs to the
/// outermost type and appears at most once.
#[derive(Debug, Clone)]
pub struct Type {
    frame: Frame,
    kind: TypeKind,
    null: Option<Symbol>,
}

impl Type {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        if SingleType::peek(tokens) {
            Symbol::peek(tokens, "?");
            return true;
        }
        if UnionType::peek(tokens) {
            Symbol::peek(tokens, "?");
            return true;
        }
        false
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let kind = if SingleType::peek(tokens) {
            TypeKind::Single(SingleType::parse(tokens))
        } else {
            TypeKind::Union(UnionType::parse(tokens))
        };
        let null = if Symbol::peek(tokens, "?") {
            Some(Symbol::parse_tight(tokens, "?"))
        } else {
            None
        };
        frame.did_parse(tokens, true);
        Type { frame, kind, null }
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.null.is_some()
    }

    pub fn type_name(&self) -> Option<String> {
        match &self.kind {
            TypeKind::Single(single) => single.type_name(),
            TypeKind::Union(_) => None,
        }
    }

    pub fn type_names(&self) -> Vec<String> {
        match &self.kind {
            TypeKind::Single(single) => single.type_names(),
            TypeKind::Union(union) => union.type_names(),
        }
    }
}

impl Production for Type {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        match &self.kind {
            TypeKind::Single(single) => single.write(out),
            TypeKind::Union(union) => union.write(out),
        }
        write_opt(out, &self.null);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        match &self.kind {
            TypeKind::Single(single) => single.define_markup(generator),
            TypeKind::Union(union) => union.define_markup(generator),
        }
        if let Some(null) = &self.null {
            generator.add_text(&null.text());
        }
        &self.frame
    }
}

/// `[ExtendedAttributeList] SingleType ["?"] | UnionType ["?"]`
#[derive(Debug, Clone)]
pub struct TypeWithExtendedAttributes {
    frame: Frame,
    extended_attributes: Option<ExtendedAttributeList>,
    kind: TypeKind,
    null: Option<Symbol>,
}

impl TypeWithExtendedAttributes {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        ExtendedAttributeList::peek(tokens);
        if SingleType::peek(tokens) {
            Symbol::peek(tokens, "?");
            return true;
        }
        if UnionType::peek(tokens) {
            Symbol::peek(tokens, "?");
            return true;
        }
        false
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let kind = if SingleType::peek(tokens) {
            TypeKind::Single(SingleType::parse(tokens))
        } else {
            TypeKind::Union(UnionType::parse(tokens))
        };
        let null = if Symbol::peek(tokens, "?") {
            Some(Symbol::parse_tight(tokens, "?"))
        } else {
            None
        };
        frame.did_parse(tokens, true);
        TypeWithExtendedAttributes {
            frame,
            extended_attributes,
            kind,
            null,
        }
    }

    pub fn extended_attributes(&self) -> Option<&ExtendedAttributeList> {
        self.extended_attributes.as_ref()
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.null.is_some()
    }

    pub fn type_name(&self) -> Option<String> {
        match &self.kind {
            TypeKind::Single(single) => single.type_name(),
            TypeKind::Union(_) => None,
        }
    }

    pub fn type_names(&self) -> Vec<String> {
        match &self.kind {
            TypeKind::Single(single) => single.type_names(),
            TypeKind::Union(union) => union.type_names(),
        }
    }
}

impl Production for TypeWithExtendedAttributes {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        write_opt(out, &self.extended_attributes);
        match &self.kind {
            TypeKind::Single(single) => single.write(out),
            TypeKind::Union(union) => union.write(out),
        }
        write_opt(out, &self.null);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(attributes) = &self.extended_attributes {
            attributes.define_markup(generator);
        }
        match &self.kind {
            TypeKind::Single(single) => single.define_markup(generator),
            TypeKind::Union(union) => union.define_markup(generator),
        }
        if let Some(null) = &self.null {
            generator.add_text(&null.text());
        }
        &self.frame
    }
}

#[derive(Debug, Clone)]
pub enum ConstTypeKind {
    Primitive(PrimitiveType),
    Identifier(TypeIdentifier),
}

/// `PrimitiveType ["?"] | TypeIdentifier ["?"]`
#[derive(Debug, Clone)]
pub struct ConstType {
    frame: Frame,
    kind: ConstTypeKind,
    null: Option<Symbol>,
}

impl ConstType {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        if PrimitiveType::peek(tokens) {
            Symbol::peek(tokens, "?");
            return true;
        }
        let mark = tokens.mark();
        let matched = TypeIdentifier::peek(tokens);
        if matched {
            Symbol::peek(tokens, "?");
        }
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let kind = if PrimitiveType::peek(tokens) {
            ConstTypeKind::Primitive(PrimitiveType::parse(tokens))
        } else {
            ConstTypeKind::Identifier(TypeIdentifier::parse(tokens))
        };
        let null = if Symbol::peek(tokens, "?") {
            Some(Symbol::parse_tight(tokens, "?"))
        } else {
            None
        };
        frame.did_parse(tokens, true);
        ConstType { frame, kind, null }
    }

    pub fn type_name(&self) -> String {
        match &self.kind {
            ConstTypeKind::Primitive(primitive) => primitive.type_name(),
            ConstTypeKind::Identifier(identifier) => identifier.type_name().to_string(),
        }
    }
}

impl Production for ConstType {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        match &self.kind {
            ConstTypeKind::Primitive(primitive) => primitive.write(out),
            ConstTypeKind::Identifier(identifier) => identifier.write(out),
        }
        write_opt(out, &self.null);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        match &self.kind {
            ConstTypeKind::Primitive(primitive) => {
                generator.add_primitive_type(primitive);
                if let Some(null) = &self.null {
                    null.define_markup(generator);
                }
            }
            ConstTypeKind::Identifier(identifier) => {
                identifier.define_markup(generator);
                if let Some(null) = &self.null {
                    generator.add_text(&null.text());
                }
            }
        }
        &self.frame
    }
}

impl_display_via_production!(
    IntegerType,
    UnsignedIntegerType,
    FloatType,
    UnrestrictedFloatType,
    PrimitiveType,
    StringType,
    ObjectType,
    BufferType,
    GenericType,
    PromiseType,
    RecordType,
    AnyType,
    NonAnyType,
    SingleType,
    UnionMemberType,
    UnionType,
    Type,
    TypeWithExtendedAttributes,
    ConstType,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> TokenStream<'static> {
        TokenStream::new(text, None)
    }

    fn round_trip_type(source: &str) {
        let mut tokens = stream(source);
        assert!(Type::peek(&mut tokens), "peek failed for {source:?}");
        let mut tokens = stream(source);
        let ty = Type::parse(&mut tokens);
        assert_eq!(ty.text(), source, "round trip failed");
        assert!(!tokens.has_tokens(), "{source:?} not fully consumed");
    }

    #[test]
    fn test_simple_types_round_trip() {
        for source in [
            "long",
            "unsigned long long",
            "unrestricted double",
            "DOMString",
            "ArrayBuffer",
            "object",
            "any",
            "Foo",
            "long?",
            "Promise<ReallyISwear>?",
            "sequence<Foo>",
            "FrozenArray<(short or Foo)>",
            "record<DOMString, Foo>",
            "(short or Foo)",
            "(short or (long or double) or long long)",
            "sequence< ( short or double ) > ?",
        ] {
            round_trip_type(source);
        }
    }

    #[test]
    fn test_long_long_with_comment_between() {
        let mut tokens = stream("long /* gap */ long");
        let ty = Type::parse(&mut tokens);
        assert_eq!(ty.text(), "long /* gap */ long");
    }

    #[test]
    fn test_type_names_of_union() {
        let mut tokens = stream("(short or Foo or Bar)");
        let ty = Type::parse(&mut tokens);
        assert_eq!(ty.type_names(), vec!["Foo".to_string(), "Bar".to_string()]);
    }

    #[test]
    fn test_nullability_is_outermost() {
        let mut tokens = stream("sequence<Foo>?");
        let ty = Type::parse(&mut tokens);
        assert!(ty.is_nullable());
    }

    #[test]
    fn test_const_type() {
        let mut tokens = stream("long?");
        assert!(ConstType::peek(&mut tokens));
        let mut tokens = stream("long?");
        let ty = ConstType::parse(&mut tokens);
        assert_eq!(ty.text(), "long?");
        assert_eq!(ty.type_name(), "long");
    }
}
