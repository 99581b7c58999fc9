//! Namespaces.

use crate::constructs::interface::{Member, MemberEntry};
use crate::constructs::{define_construct_markup, Construct, IdlType, ParentRef, SyntaxError};
use crate::markup::MarkupGenerator;
use crate::productions::{ExtendedAttributeList, Frame, Identifier, Production, Symbol};
use crate::tokenizer::TokenStream;
use std::fmt;

/// `[ExtendedAttributes] ["partial"] "namespace" Identifier
/// "{" [NamespaceMember]... "}" ";"`
#[derive(Debug, Clone)]
pub struct Namespace {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    partial: Option<Symbol>,
    namespace_keyword: Symbol,
    name: Identifier,
    open: Symbol,
    members: Vec<MemberEntry>,
    close: Option<Symbol>,
}

impl Namespace {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        Symbol::peek(tokens, "partial");
        let matched = Symbol::peek(tokens, "namespace")
            && Identifier::peek(tokens)
            && Symbol::peek(tokens, "{");
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
        let namespace_keyword = Symbol::parse(tokens, "namespace");
        let name = Identifier::parse(tokens);
        let open = Symbol::parse(tokens, "{");
        let mut members = Vec::new();
        let mut close = None;
        while tokens.has_tokens() {
            if Symbol::peek(tokens, "}") {
                close = Some(Symbol::parse(tokens, "}"));
                break;
            }
            if Member::peek_namespace_member(tokens) {
                members.push(MemberEntry::Member(Member::parse_namespace_member(tokens)));
            } else {
                members.push(MemberEntry::Error(SyntaxError::parse(tokens)));
            }
        }
        frame.consume_semicolon(tokens, false);
        frame.did_parse(tokens, true);
        let mut parsed = Namespace {
            frame,
            parent: None,
            extended_attributes,
            partial,
            namespace_keyword,
            name,
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

impl Production for Namespace {
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
        self.namespace_keyword.write(out);
        self.name.write(out);
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
        self.namespace_keyword.define_markup(generator);
        self.name.define_markup(generator);
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

impl Construct for Namespace {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Namespace
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

impl fmt::Display for Namespace {
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
    fn test_namespace_round_trip() {
        let source = "namespace Namespace1 {\n    [One] unsigned long long method([Extended] short x);\n    readonly attribute long? value;\n    const short fortyTwo = 42;\n};";
        let mut tokens = stream(source);
        assert!(Namespace::peek(&mut tokens));
        let mut tokens = stream(source);
        let namespace = Namespace::parse(&mut tokens);
        assert_eq!(namespace.text(), source);
        assert_eq!(namespace.members().len(), 3);
    }

    #[test]
    fn test_partial_namespace() {
        let source = "partial namespace Namespace2 { [One] unsigned long long method(short x); };";
        let mut tokens = stream(source);
        let namespace = Namespace::parse(&mut tokens);
        assert_eq!(namespace.text(), source);
        assert!(namespace.is_partial());
    }
}
