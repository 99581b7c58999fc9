//! Dictionaries and dictionary members.

use crate::constructs::{define_construct_markup, Construct, IdlType, ParentRef, SyntaxError};
use crate::markup::MarkupGenerator;
use crate::productions::{
    Default, ExtendedAttributeList, Frame, Identifier, Inheritance, Production, Symbol,
    TypeWithExtendedAttributes,
};
use crate::tokenizer::TokenStream;
use std::fmt;

/// `[ExtendedAttributes] ["required"] TypeWithExtendedAttributes Identifier [Default] ";"`
#[derive(Debug, Clone)]
pub struct DictionaryMember {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    required: Option<Symbol>,
    ty: TypeWithExtendedAttributes,
    name: Identifier,
    default: Option<Default>,
}

impl DictionaryMember {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        Symbol::peek(tokens, "required");
        let matched = if TypeWithExtendedAttributes::peek(tokens) && Identifier::peek(tokens) {
            Default::peek(tokens);
            true
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let required = if Symbol::peek(tokens, "required") {
            Some(Symbol::parse(tokens, "required"))
        } else {
            None
        };
        let ty = TypeWithExtendedAttributes::parse(tokens);
        let name = Identifier::parse(tokens);
        let default = if Default::peek(tokens) {
            Some(Default::parse(tokens))
        } else {
            None
        };
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        DictionaryMember {
            frame,
            parent: None,
            extended_attributes,
            required,
            ty,
            name,
            default,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn ty(&self) -> &TypeWithExtendedAttributes {
        &self.ty
    }

    pub fn default(&self) -> Option<&Default> {
        self.default.as_ref()
    }
}

impl Production for DictionaryMember {
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
        if let Some(required) = &self.required {
            required.write(out);
        }
        self.ty.write(out);
        self.name.write(out);
        if let Some(default) = &self.default {
            default.write(out);
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(required) = &self.required {
            required.define_markup(generator);
        }
        generator.add_type(&self.ty);
        self.name.define_markup(generator);
        if let Some(default) = &self.default {
            default.define_markup(generator);
        }
        &self.frame
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for DictionaryMember {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::DictMember
    }

    fn name(&self) -> Option<String> {
        Some(self.name.name().to_string())
    }

    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn adopt(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
        let own = ParentRef {
            name: Construct::name(self),
            full_name: self.full_name(),
        };
        if let Some(attributes) = &mut self.extended_attributes {
            attributes.adopt(&own);
        }
    }

    fn extended_attributes(&self) -> Option<&ExtendedAttributeList> {
        self.extended_attributes.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum DictionaryEntry {
    Member(DictionaryMember),
    Error(SyntaxError),
}

impl DictionaryEntry {
    fn as_construct_ref(&self) -> &dyn Construct {
        match self {
            DictionaryEntry::Member(member) => member.as_construct(),
            DictionaryEntry::Error(error) => error.as_construct(),
        }
    }

    fn adopt(&mut self, parent: ParentRef) {
        match self {
            DictionaryEntry::Member(member) => member.adopt(parent),
            DictionaryEntry::Error(error) => error.adopt(parent),
        }
    }

    fn write(&self, out: &mut String) {
        match self {
            DictionaryEntry::Member(member) => member.write(out),
            DictionaryEntry::Error(error) => error.write(out),
        }
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        match self {
            DictionaryEntry::Member(member) => member.define_markup(generator),
            DictionaryEntry::Error(error) => error.define_markup(generator),
        }
    }
}

/// `[ExtendedAttributes] ["partial"] "dictionary" Identifier [Inheritance]
/// "{" [DictionaryMember]... "}" ";"`
#[derive(Debug, Clone)]
pub struct Dictionary {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    partial: Option<Symbol>,
    dictionary_keyword: Symbol,
    name: Identifier,
    inheritance: Option<Inheritance>,
    open: Symbol,
    members: Vec<DictionaryEntry>,
    close: Option<Symbol>,
}

impl Dictionary {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        Symbol::peek(tokens, "partial");
        let matched = if Symbol::peek(tokens, "dictionary") && Identifier::peek(tokens) {
            Inheritance::peek(tokens);
            Symbol::peek(tokens, "{")
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let partial = if Symbol::peek(tokens, "partial") {
            Some(Symbol::parse(tokens, "partial"))
        } else {
            None
        };
        let dictionary_keyword = Symbol::parse(tokens, "dictionary");
        let name = Identifier::parse(tokens);
        let inheritance = if Inheritance::peek(tokens) {
            Some(Inheritance::parse(tokens))
        } else {
            None
        };
        let open = Symbol::parse(tokens, "{");
        let mut members = Vec::new();
        let mut close = None;
        while tokens.has_tokens() {
            if Symbol::peek(tokens, "}") {
                close = Some(Symbol::parse(tokens, "}"));
                break;
            }
            if DictionaryMember::peek(tokens) {
                members.push(DictionaryEntry::Member(DictionaryMember::parse(tokens)));
            } else {
                members.push(DictionaryEntry::Error(SyntaxError::parse(tokens)));
            }
        }
        frame.consume_semicolon(tokens, false);
        frame.did_parse(tokens, true);
        let mut parsed = Dictionary {
            frame,
            parent: None,
            extended_attributes,
            partial,
            dictionary_keyword,
            name,
            inheritance,
            open,
            members,
            close,
        };
        parsed.claim_children();
        parsed
    }

    pub fn is_partial(&self) -> bool {
        self.partial.is_some()
    }

    pub fn inheritance(&self) -> Option<&Inheritance> {
        self.inheritance.as_ref()
    }

    /// A dictionary is required when any member is.
    pub fn is_required(&self) -> bool {
        self.members.iter().any(|entry| match entry {
            DictionaryEntry::Member(member) => member.is_required(),
            DictionaryEntry::Error(_) => false,
        })
    }

    fn claim_children(&mut self) {
        let owner = ParentRef {
            name: Construct::name(self),
            full_name: self.full_name(),
        };
        if let Some(attributes) = &mut self.extended_attributes {
            attributes.adopt(&owner);
        }
        for member in &mut self.members {
            member.adopt(owner.clone());
        }
    }
}

impl Production for Dictionary {
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
        if let Some(partial) = &self.partial {
            partial.write(out);
        }
        self.dictionary_keyword.write(out);
        self.name.write(out);
        if let Some(inheritance) = &self.inheritance {
            inheritance.write(out);
        }
        self.open.write(out);
        for member in &self.members {
            member.write(out);
        }
        if let Some(close) = &self.close {
            close.write(out);
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(partial) = &self.partial {
            partial.define_markup(generator);
        }
        self.dictionary_keyword.define_markup(generator);
        self.name.define_markup(generator);
        if let Some(inheritance) = &self.inheritance {
            inheritance.define_markup(generator);
        }
        generator.add_text(&self.open.text());
        for member in &self.members {
            member.define_markup(generator);
        }
        if let Some(close) = &self.close {
            generator.add_text(&close.text());
        }
        &self.frame
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for Dictionary {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Dictionary
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

    fn members(&self) -> Vec<&dyn Construct> {
        let mut members = self.constructors();
        members.extend(self.members.iter().map(|entry| entry.as_construct_ref()));
        members
    }
}

impl fmt::Display for DictionaryMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Display for Dictionary {
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
    fn test_dictionary_round_trip() {
        let source = "dictionary D : Base { required long x; DOMString y = \"hi\"; };";
        let mut tokens = stream(source);
        assert!(Dictionary::peek(&mut tokens));
        let mut tokens = stream(source);
        let dictionary = Dictionary::parse(&mut tokens);
        assert_eq!(dictionary.text(), source);
        assert_eq!(
            dictionary.inheritance().map(|i| i.base_name()),
            Some("Base")
        );
        let members = dictionary.members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].idl_type(), IdlType::DictMember);
    }

    #[test]
    fn test_member_flags() {
        let source = "dictionary D { required long x; DOMString y = \"hi\"; };";
        let mut tokens = stream(source);
        let dictionary = Dictionary::parse(&mut tokens);
        match &dictionary.members[0] {
            DictionaryEntry::Member(member) => {
                assert!(member.is_required());
                assert!(member.default().is_none());
            }
            DictionaryEntry::Error(_) => panic!("expected member"),
        }
        match &dictionary.members[1] {
            DictionaryEntry::Member(member) => {
                assert!(!member.is_required());
                assert_eq!(
                    member.default().map(|d| d.value_text()).as_deref(),
                    Some("\"hi\"")
                );
            }
            DictionaryEntry::Error(_) => panic!("expected member"),
        }
        assert!(dictionary.is_required());
    }

    #[test]
    fn test_partial_dictionary_with_junk_member() {
        let source = "[foo] partial dictionary FooDict:BarDict {\n    [two] sequence<(double or Foo)> foo = \"hello\";\n    required Foo baz;\n}";
        let mut tokens = stream(source);
        let dictionary = Dictionary::parse(&mut tokens);
        assert_eq!(dictionary.text(), source);
        assert!(dictionary.is_partial());
    }
}
