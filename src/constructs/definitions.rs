//! Simple named definitions: `const`, `enum`, and `typedef`.

use crate::constructs::{define_construct_markup, Construct, IdlType, ParentRef};
use crate::markup::MarkupGenerator;
use crate::productions::{
    ConstType, ConstValue, EnumValue, EnumValueList, ExtendedAttributeList, Frame, Identifier,
    Production, Symbol, TypeWithExtendedAttributes,
};
use crate::tokenizer::TokenStream;
use std::fmt;

/// `"const" ConstType Identifier "=" ConstValue ";"`
///
/// Accepted both as an interface member and (legacy, SVG-era) at top level.
#[derive(Debug, Clone)]
pub struct Const {
    frame: Frame,
    parent: Option<ParentRef>,
    const_keyword: Symbol,
    ty: ConstType,
    name: Identifier,
    equals: Symbol,
    value: ConstValue,
}

impl Const {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = Symbol::peek(tokens, "const")
            && ConstType::peek(tokens)
            && Identifier::peek(tokens)
            && Symbol::peek(tokens, "=")
            && ConstValue::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let const_keyword = Symbol::parse(tokens, "const");
        let ty = ConstType::parse(tokens);
        let name = Identifier::parse(tokens);
        let equals = Symbol::parse(tokens, "=");
        let value = ConstValue::parse(tokens);
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        Const {
            frame,
            parent: None,
            const_keyword,
            ty,
            name,
            equals,
            value,
        }
    }

    pub fn ty(&self) -> &ConstType {
        &self.ty
    }

    pub fn value(&self) -> &ConstValue {
        &self.value
    }
}

impl Production for Const {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.const_keyword.write(out);
        self.ty.write(out);
        self.name.write(out);
        self.equals.write(out);
        self.value.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.const_keyword.define_markup(generator);
        generator.add_type(&self.ty);
        self.name.define_markup(generator);
        generator.add_text(&self.equals.text());
        self.value.define_markup(generator);
        &self.frame
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for Const {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Const
    }

    fn name(&self) -> Option<String> {
        Some(self.name.name().to_string())
    }

    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn adopt(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
    }
}

/// `[ExtendedAttributes] "enum" Identifier "{" EnumValueList "}" ";"`
#[derive(Debug, Clone)]
pub struct Enum {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    enum_keyword: Symbol,
    name: Identifier,
    open: Symbol,
    values: EnumValueList,
    close: Symbol,
}

impl Enum {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        let matched = Symbol::peek(tokens, "enum")
            && Identifier::peek(tokens)
            && Symbol::peek(tokens, "{")
            && EnumValueList::peek(tokens)
            && Symbol::peek(tokens, "}");
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let enum_keyword = Symbol::parse(tokens, "enum");
        let name = Identifier::parse(tokens);
        let open = Symbol::parse(tokens, "{");
        let values = EnumValueList::parse(tokens);
        let close = Symbol::parse(tokens, "}");
        frame.consume_semicolon(tokens, false);
        frame.did_parse(tokens, true);
        let mut parsed = Enum {
            frame,
            parent: None,
            extended_attributes,
            enum_keyword,
            name,
            open,
            values,
            close,
        };
        parsed.claim_children();
        parsed
    }

    pub fn enum_values(&self) -> &[EnumValue] {
        self.values.values()
    }

    fn claim_children(&mut self) {
        let owner = ParentRef {
            name: self.name(),
            full_name: self.full_name(),
        };
        if let Some(attributes) = &mut self.extended_attributes {
            attributes.adopt(&owner);
        }
    }
}

impl Production for Enum {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        if let Some(attributes) = &self.extended_attributes {
            attributes.write(out);
        }
        self.enum_keyword.write(out);
        self.name.write(out);
        self.open.write(out);
        self.values.write(out);
        self.close.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.enum_keyword.define_markup(generator);
        self.name.define_markup(generator);
        generator.add_text(&self.open.text());
        self.values.define_markup(generator);
        generator.add_text(&self.close.text());
        &self.frame
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for Enum {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Enum
    }

    fn name(&self) -> Option<String> {
        Some(self.name.name().to_string())
    }

    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn adopt(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
    }

    fn extended_attributes(&self) -> Option<&ExtendedAttributeList> {
        self.extended_attributes.as_ref()
    }
}

/// `[ExtendedAttributes] "typedef" TypeWithExtendedAttributes Identifier ";"`
#[derive(Debug, Clone)]
pub struct Typedef {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    typedef_keyword: Symbol,
    ty: TypeWithExtendedAttributes,
    name: Identifier,
}

impl Typedef {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        let matched = Symbol::peek(tokens, "typedef")
            && TypeWithExtendedAttributes::peek(tokens)
            && Identifier::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let typedef_keyword = Symbol::parse(tokens, "typedef");
        let ty = TypeWithExtendedAttributes::parse(tokens);
        let name = Identifier::parse(tokens);
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        let mut parsed = Typedef {
            frame,
            parent: None,
            extended_attributes,
            typedef_keyword,
            ty,
            name,
        };
        parsed.claim_children();
        parsed
    }

    pub fn ty(&self) -> &TypeWithExtendedAttributes {
        &self.ty
    }

    fn claim_children(&mut self) {
        let owner = ParentRef {
            name: self.name(),
            full_name: self.full_name(),
        };
        if let Some(attributes) = &mut self.extended_attributes {
            attributes.adopt(&owner);
        }
    }
}

impl Production for Typedef {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        if let Some(attributes) = &self.extended_attributes {
            attributes.write(out);
        }
        self.typedef_keyword.write(out);
        self.ty.write(out);
        self.name.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.typedef_keyword.define_markup(generator);
        generator.add_type(&self.ty);
        self.name.define_markup(generator);
        &self.frame
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for Typedef {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Typedef
    }

    fn name(&self) -> Option<String> {
        Some(self.name.name().to_string())
    }

    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn adopt(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
    }

    fn extended_attributes(&self) -> Option<&ExtendedAttributeList> {
        self.extended_attributes.as_ref()
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Display for Enum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Display for Typedef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> TokenStream<'static> {
        TokenStream::new(text, None)
    }

    #[test]
    fn test_const_round_trip() {
        for source in [
            "const short fortyTwo = 42;",
            "const  long    long   one=   2   ;",
            "const long hex = 0xabcdef09;",
            "const double reallyHigh = Infinity;",
            "const double notANumber = NaN;",
            "const bigint biiig = 42;",
        ] {
            let mut tokens = stream(source);
            assert!(Const::peek(&mut tokens), "{source}");
            let mut tokens = stream(source);
            let parsed = Const::parse(&mut tokens);
            assert_eq!(parsed.text(), source);
            assert_eq!(parsed.complexity_factor(), 0);
        }
    }

    #[test]
    fn test_enum_round_trip() {
        for source in [
            "enum   foo    {\"one\"  ,    \"two\",    }     ;",
            "enum foo { \"one\" };",
            "enum bar{\"one\",\"two\",\"three\",};",
        ] {
            let mut tokens = stream(source);
            assert!(Enum::peek(&mut tokens), "{source}");
            let mut tokens = stream(source);
            let parsed = Enum::parse(&mut tokens);
            assert_eq!(parsed.text(), source);
        }
    }

    #[test]
    fn test_enum_values() {
        let mut tokens = stream("enum foo { \"one\", \"two\" };");
        let parsed = Enum::parse(&mut tokens);
        let values: Vec<&str> = parsed.enum_values().iter().map(|v| v.value()).collect();
        assert_eq!(values, vec!["\"one\"", "\"two\""]);
    }

    #[test]
    fn test_typedef_round_trip() {
        for source in [
            "typedef  short shorttype;",
            "typedef long long longtype;",
            "typedef unrestricted double dubloons;",
            "typedef (short or (long or double)) nestedUnion;",
            "typedef sequence<(short or Foo)> maybeFoos;",
            "typedef record<USVString, any> recordAny;",
        ] {
            let mut tokens = stream(source);
            assert!(Typedef::peek(&mut tokens), "{source}");
            let mut tokens = stream(source);
            let parsed = Typedef::parse(&mut tokens);
            assert_eq!(parsed.text(), source);
        }
    }
}
