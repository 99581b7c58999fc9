//! Interfaces, interface mixins, and their members.

use crate::constructs::{define_construct_markup, Construct, IdlType, ParentRef, SyntaxError};
use crate::markup::MarkupGenerator;
use crate::productions::{
    ArgumentList, AsyncIterable, Attribute, Constructor, ExtendedAttributeList, Frame, Identifier,
    Inheritance, Iterable, Maplike, MixinAttribute, Operation, Production, Serializer, Setlike,
    SpecialOperation, StaticMember, Stringifier, Symbol,
};
use crate::tokenizer::TokenStream;
use std::fmt;

use crate::constructs::definitions::Const;

/// The member production behind a [`Member`] wrapper.
#[derive(Debug, Clone)]
pub enum MemberKind {
    Constructor(Constructor),
    Const(Const),
    Stringifier(Stringifier),
    Serializer(Serializer),
    Static(StaticMember),
    AsyncIterable(AsyncIterable),
    Iterable(Iterable),
    Maplike(Maplike),
    Setlike(Setlike),
    Attribute(Attribute),
    MixinAttribute(MixinAttribute),
    Special(SpecialOperation),
    Operation(Operation),
}

impl MemberKind {
    fn idl_type(&self) -> IdlType {
        match self {
            MemberKind::Constructor(m) => m.idl_type(),
            MemberKind::Const(m) => m.idl_type(),
            MemberKind::Stringifier(m) => m.idl_type(),
            MemberKind::Serializer(m) => m.idl_type(),
            MemberKind::Static(m) => m.idl_type(),
            MemberKind::AsyncIterable(m) => m.idl_type(),
            MemberKind::Iterable(m) => m.idl_type(),
            MemberKind::Maplike(m) => m.idl_type(),
            MemberKind::Setlike(m) => m.idl_type(),
            MemberKind::Attribute(m) => m.idl_type(),
            MemberKind::MixinAttribute(m) => m.idl_type(),
            MemberKind::Special(m) => m.idl_type(),
            MemberKind::Operation(m) => m.idl_type(),
        }
    }

    fn name(&self) -> Option<String> {
        match self {
            MemberKind::Constructor(m) => m.name(),
            MemberKind::Const(m) => Construct::name(m),
            MemberKind::Stringifier(m) => m.name(),
            MemberKind::Serializer(m) => m.name(),
            MemberKind::Static(m) => m.name(),
            MemberKind::AsyncIterable(m) => m.name(),
            MemberKind::Iterable(m) => m.name(),
            MemberKind::Maplike(m) => m.name(),
            MemberKind::Setlike(m) => m.name(),
            MemberKind::Attribute(m) => m.name(),
            MemberKind::MixinAttribute(m) => m.name(),
            MemberKind::Special(m) => m.name(),
            MemberKind::Operation(m) => m.name(),
        }
    }

    fn method_name(&self) -> Option<String> {
        match self {
            MemberKind::Constructor(m) => m.method_name(),
            MemberKind::Stringifier(m) => m.method_name(),
            MemberKind::Serializer(m) => m.method_name(),
            MemberKind::Static(m) => m.method_name(),
            MemberKind::Special(m) => m.method_name(),
            MemberKind::Operation(m) => m.method_name(),
            _ => None,
        }
    }

    fn method_names(&self) -> Vec<String> {
        match self {
            MemberKind::Constructor(m) => m.method_names(),
            MemberKind::Stringifier(m) => m.method_names(),
            MemberKind::Serializer(m) => m.method_names(),
            MemberKind::Static(m) => m.method_names(),
            MemberKind::Special(m) => m.method_names(),
            MemberKind::Operation(m) => m.method_names(),
            _ => Vec::new(),
        }
    }

    fn arguments(&self) -> Option<&ArgumentList> {
        match self {
            MemberKind::Constructor(m) => Some(m.arguments()),
            MemberKind::Stringifier(m) => m.arguments(),
            MemberKind::Serializer(m) => m.arguments(),
            MemberKind::Static(m) => m.arguments(),
            MemberKind::AsyncIterable(m) => m.arguments(),
            MemberKind::Special(m) => Some(m.arguments()),
            MemberKind::Operation(m) => Some(m.arguments()),
            _ => None,
        }
    }

    fn arguments_mut(&mut self) -> Option<&mut ArgumentList> {
        match self {
            MemberKind::Constructor(m) => Some(m.arguments_list_mut()),
            MemberKind::Stringifier(m) => m.arguments_list_mut(),
            MemberKind::Serializer(m) => m.arguments_list_mut(),
            MemberKind::Static(m) => m.arguments_list_mut(),
            MemberKind::AsyncIterable(m) => m.arguments_list_mut(),
            MemberKind::Special(m) => Some(m.arguments_list_mut()),
            MemberKind::Operation(m) => Some(m.arguments_list_mut()),
            _ => None,
        }
    }

    fn write(&self, out: &mut String) {
        match self {
            MemberKind::Constructor(m) => m.write(out),
            MemberKind::Const(m) => m.write(out),
            MemberKind::Stringifier(m) => m.write(out),
            MemberKind::Serializer(m) => m.write(out),
            MemberKind::Static(m) => m.write(out),
            MemberKind::AsyncIterable(m) => m.write(out),
            MemberKind::Iterable(m) => m.write(out),
            MemberKind::Maplike(m) => m.write(out),
            MemberKind::Setlike(m) => m.write(out),
            MemberKind::Attribute(m) => m.write(out),
            MemberKind::MixinAttribute(m) => m.write(out),
            MemberKind::Special(m) => m.write(out),
            MemberKind::Operation(m) => m.write(out),
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        match self {
            MemberKind::Constructor(m) => m.markup_inner(generator),
            MemberKind::Const(m) => m.markup_inner(generator),
            MemberKind::Stringifier(m) => m.markup_inner(generator),
            MemberKind::Serializer(m) => m.markup_inner(generator),
            MemberKind::Static(m) => m.markup_inner(generator),
            MemberKind::AsyncIterable(m) => m.markup_inner(generator),
            MemberKind::Iterable(m) => m.markup_inner(generator),
            MemberKind::Maplike(m) => m.markup_inner(generator),
            MemberKind::Setlike(m) => m.markup_inner(generator),
            MemberKind::Attribute(m) => m.markup_inner(generator),
            MemberKind::MixinAttribute(m) => m.markup_inner(generator),
            MemberKind::Special(m) => m.markup_inner(generator),
            MemberKind::Operation(m) => m.markup_inner(generator),
        }
    }
}

/// A member of an interface, mixin, or namespace: optional extended
/// attributes plus the member production itself.
#[derive(Debug, Clone)]
pub struct Member {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    member: MemberKind,
}

impl Member {
    pub fn peek_interface_member(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        let matched = Constructor::peek(tokens)
            || Const::peek(tokens)
            || Stringifier::peek(tokens)
            || Serializer::peek(tokens)
            || StaticMember::peek(tokens)
            || AsyncIterable::peek(tokens)
            || Iterable::peek(tokens)
            || Maplike::peek(tokens)
            || Setlike::peek(tokens)
            || Attribute::peek(tokens)
            || SpecialOperation::peek(tokens)
            || Operation::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse_interface_member(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let member = if Constructor::peek(tokens) {
            MemberKind::Constructor(Constructor::parse(tokens))
        } else if Const::peek(tokens) {
            MemberKind::Const(Const::parse(tokens))
        } else if Stringifier::peek(tokens) {
            MemberKind::Stringifier(Stringifier::parse(tokens))
        } else if Serializer::peek(tokens) {
            MemberKind::Serializer(Serializer::parse(tokens))
        } else if StaticMember::peek(tokens) {
            MemberKind::Static(StaticMember::parse(tokens))
        } else if AsyncIterable::peek(tokens) {
            MemberKind::AsyncIterable(AsyncIterable::parse(tokens))
        } else if Iterable::peek(tokens) {
            MemberKind::Iterable(Iterable::parse(tokens))
        } else if Maplike::peek(tokens) {
            MemberKind::Maplike(Maplike::parse(tokens))
        } else if Setlike::peek(tokens) {
            MemberKind::Setlike(Setlike::parse(tokens))
        } else if Attribute::peek(tokens) {
            MemberKind::Attribute(Attribute::parse(tokens))
        } else if SpecialOperation::peek(tokens) {
            MemberKind::Special(SpecialOperation::parse(tokens))
        } else {
            MemberKind::Operation(Operation::parse(tokens))
        };
        frame.did_parse(tokens, true);
        Member {
            frame,
            parent: None,
            extended_attributes,
            member,
        }
    }

    pub fn peek_mixin_member(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        let matched = Const::peek(tokens)
            || Stringifier::peek(tokens)
            || MixinAttribute::peek(tokens)
            || Operation::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse_mixin_member(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let member = if Const::peek(tokens) {
            MemberKind::Const(Const::parse(tokens))
        } else if Stringifier::peek(tokens) {
            MemberKind::Stringifier(Stringifier::parse(tokens))
        } else if MixinAttribute::peek(tokens) {
            MemberKind::MixinAttribute(MixinAttribute::parse(tokens))
        } else {
            MemberKind::Operation(Operation::parse(tokens))
        };
        frame.did_parse(tokens, true);
        Member {
            frame,
            parent: None,
            extended_attributes,
            member,
        }
    }

    pub fn peek_namespace_member(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        let matched = if Symbol::peek(tokens, "readonly") {
            Attribute::peek(tokens)
        } else {
            Operation::peek(tokens) || Const::peek(tokens)
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse_namespace_member(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let member = match tokens.sneak_peek() {
            Some(token) if token.is_symbol_eq("readonly") => {
                MemberKind::Attribute(Attribute::parse(tokens))
            }
            _ => {
                if Const::peek(tokens) {
                    MemberKind::Const(Const::parse(tokens))
                } else {
                    MemberKind::Operation(Operation::parse(tokens))
                }
            }
        };
        frame.did_parse(tokens, true);
        Member {
            frame,
            parent: None,
            extended_attributes,
            member,
        }
    }

    pub fn member(&self) -> &MemberKind {
        &self.member
    }
}

impl Production for Member {
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
        self.member.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.member.markup_inner(generator)
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for Member {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        self.member.idl_type()
    }

    fn name(&self) -> Option<String> {
        self.member.name()
    }

    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn adopt(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
        let own = ParentRef {
            name: self.name(),
            full_name: self.full_name(),
        };
        if let Some(attributes) = &mut self.extended_attributes {
            attributes.adopt(&own);
        }
        if let Some(arguments) = self.member.arguments_mut() {
            for argument in arguments.arguments_mut() {
                argument.adopt(own.clone());
            }
        }
    }

    fn extended_attributes(&self) -> Option<&ExtendedAttributeList> {
        self.extended_attributes.as_ref()
    }

    fn method_name(&self) -> Option<String> {
        self.member.method_name()
    }

    fn method_names(&self) -> Vec<String> {
        self.member.method_names()
    }

    fn arguments(&self) -> Option<&ArgumentList> {
        self.member.arguments()
    }
}

/// One slot in a member list: either a parsed member or recovered junk.
#[derive(Debug, Clone)]
pub enum MemberEntry {
    Member(Member),
    Error(SyntaxError),
}

impl MemberEntry {
    pub(crate) fn as_construct_ref(&self) -> &dyn Construct {
        match self {
            MemberEntry::Member(member) => member.as_construct(),
            MemberEntry::Error(error) => error.as_construct(),
        }
    }

    pub(crate) fn adopt(&mut self, parent: ParentRef) {
        match self {
            MemberEntry::Member(member) => member.adopt(parent),
            MemberEntry::Error(error) => error.adopt(parent),
        }
    }

    pub(crate) fn write(&self, out: &mut String) {
        match self {
            MemberEntry::Member(member) => member.write(out),
            MemberEntry::Error(error) => error.write(out),
        }
    }

    pub(crate) fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        match self {
            MemberEntry::Member(member) => member.define_markup(generator),
            MemberEntry::Error(error) => error.define_markup(generator),
        }
    }
}

/// Parse a brace-delimited member list with per-member recovery: a member
/// that fails to parse is captured as a [`SyntaxError`] entry and parsing
/// continues with the next one.
fn parse_member_list(
    tokens: &mut TokenStream,
    peek_member: fn(&mut TokenStream) -> bool,
    parse_member: fn(&mut TokenStream) -> Member,
) -> (Vec<MemberEntry>, Option<Symbol>) {
    let mut members = Vec::new();
    let mut close = None;
    while tokens.has_tokens() {
        if Symbol::peek(tokens, "}") {
            close = Some(Symbol::parse(tokens, "}"));
            break;
        }
        if peek_member(tokens) {
            members.push(MemberEntry::Member(parse_member(tokens)));
        } else {
            members.push(MemberEntry::Error(SyntaxError::parse(tokens)));
        }
    }
    (members, close)
}

/// `[ExtendedAttributes] ["partial"] "interface" Identifier [Inheritance]
/// "{" [InterfaceMember]... "}" ";"`
#[derive(Debug, Clone)]
pub struct Interface {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    partial: Option<Symbol>,
    interface_keyword: Symbol,
    name: Identifier,
    inheritance: Option<Inheritance>,
    open: Symbol,
    members: Vec<MemberEntry>,
    close: Option<Symbol>,
}

impl Interface {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        Interface::peek_with(tokens, true)
    }

    pub(crate) fn peek_with(tokens: &mut TokenStream, accept_extended_attributes: bool) -> bool {
        let mark = tokens.mark();
        if accept_extended_attributes {
            ExtendedAttributeList::peek(tokens);
        }
        Symbol::peek(tokens, "partial");
        let matched = if Symbol::peek(tokens, "interface") && Identifier::peek(tokens) {
            Inheritance::peek(tokens);
            Symbol::peek(tokens, "{")
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        Interface::parse_with(tokens, true)
    }

    pub(crate) fn parse_with(tokens: &mut TokenStream, parse_extended_attributes: bool) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if parse_extended_attributes && ExtendedAttributeList::peek(tokens)
        {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let partial = if Symbol::peek(tokens, "partial") {
            Some(Symbol::parse(tokens, "partial"))
        } else {
            None
        };
        let interface_keyword = Symbol::parse(tokens, "interface");
        let name = Identifier::parse(tokens);
        let inheritance = if Inheritance::peek(tokens) {
            Some(Inheritance::parse(tokens))
        } else {
            None
        };
        let open = Symbol::parse(tokens, "{");
        let (members, close) = parse_member_list(
            tokens,
            Member::peek_interface_member,
            Member::parse_interface_member,
        );
        frame.consume_semicolon(tokens, false);
        frame.did_parse(tokens, true);
        let mut parsed = Interface {
            frame,
            parent: None,
            extended_attributes,
            partial,
            interface_keyword,
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

    pub fn member_entries(&self) -> &[MemberEntry] {
        &self.members
    }

    pub(crate) fn claim_children(&mut self) {
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

impl Production for Interface {
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
        self.interface_keyword.write(out);
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
        self.interface_keyword.define_markup(generator);
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

impl Construct for Interface {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Interface
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

/// `[ExtendedAttributes] ["partial"] "interface" "mixin" Identifier
/// [Inheritance] "{" [MixinMember]... "}" ";"`
///
/// A mixin's `idl_type` is `interface`, matching how it participates in
/// searches.
#[derive(Debug, Clone)]
pub struct Mixin {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    partial: Option<Symbol>,
    interface_keyword: Symbol,
    mixin_keyword: Symbol,
    name: Identifier,
    inheritance: Option<Inheritance>,
    open: Symbol,
    members: Vec<MemberEntry>,
    close: Option<Symbol>,
}

impl Mixin {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        Mixin::peek_with(tokens, true)
    }

    pub(crate) fn peek_with(tokens: &mut TokenStream, accept_extended_attributes: bool) -> bool {
        let mark = tokens.mark();
        if accept_extended_attributes {
            ExtendedAttributeList::peek(tokens);
        }
        Symbol::peek(tokens, "partial");
        let matched = if Symbol::peek(tokens, "interface")
            && Symbol::peek(tokens, "mixin")
            && Identifier::peek(tokens)
        {
            Inheritance::peek(tokens);
            Symbol::peek(tokens, "{")
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        Mixin::parse_with(tokens, true)
    }

    pub(crate) fn parse_with(tokens: &mut TokenStream, parse_extended_attributes: bool) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if parse_extended_attributes && ExtendedAttributeList::peek(tokens)
        {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let partial = if Symbol::peek(tokens, "partial") {
            Some(Symbol::parse(tokens, "partial"))
        } else {
            None
        };
        let interface_keyword = Symbol::parse(tokens, "interface");
        let mixin_keyword = Symbol::parse(tokens, "mixin");
        let name = Identifier::parse(tokens);
        let inheritance = if Inheritance::peek(tokens) {
            Some(Inheritance::parse(tokens))
        } else {
            None
        };
        let open = Symbol::parse(tokens, "{");
        let (members, close) = parse_member_list(
            tokens,
            Member::peek_mixin_member,
            Member::parse_mixin_member,
        );
        frame.consume_semicolon(tokens, false);
        frame.did_parse(tokens, true);
        let mut parsed = Mixin {
            frame,
            parent: None,
            extended_attributes,
            partial,
            interface_keyword,
            mixin_keyword,
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

    pub(crate) fn claim_children(&mut self) {
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

impl Production for Mixin {
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
        self.interface_keyword.write(out);
        self.mixin_keyword.write(out);
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
        self.interface_keyword.define_markup(generator);
        self.mixin_keyword.define_markup(generator);
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

impl Construct for Mixin {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Interface
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

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Display for Mixin {
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
    fn test_simple_interface() {
        let source = "interface Foo { attribute long bar; };";
        let mut tokens = stream(source);
        assert!(Interface::peek(&mut tokens));
        let mut tokens = stream(source);
        let interface = Interface::parse(&mut tokens);
        assert_eq!(interface.text(), source);
        assert_eq!(Construct::name(&interface).as_deref(), Some("Foo"));
        let members = interface.members();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].idl_type(), IdlType::Attribute);
        assert_eq!(members[0].name().as_deref(), Some("bar"));
    }

    #[test]
    fn test_constructor_attribute_members_come_first() {
        let source = "[Constructor(long x)] interface Foo { attribute long bar; };";
        let mut tokens = stream(source);
        let interface = Interface::parse(&mut tokens);
        assert_eq!(interface.text(), source);
        let constructors = interface.constructors();
        assert_eq!(constructors.len(), 1);
        assert_eq!(constructors[0].idl_type(), IdlType::Constructor);
        assert_eq!(constructors[0].name().as_deref(), Some("Foo"));
        let members = interface.members();
        assert_eq!(members[0].idl_type(), IdlType::Constructor);
        assert!(interface
            .find_argument("x", true)
            .is_some_and(|a| a.idl_type() == IdlType::Argument));
    }

    #[test]
    fn test_recovery_keeps_following_members() {
        let source = "interface Foo { garbage; attribute long bar; };";
        let mut tokens = stream(source);
        let interface = Interface::parse(&mut tokens);
        assert_eq!(interface.text(), source);
        let members = interface.members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].idl_type(), IdlType::Unknown);
        assert_eq!(members[1].name().as_deref(), Some("bar"));
    }

    #[test]
    fn test_full_names() {
        let source = "interface Foo { undefined draw(long x); };";
        let mut tokens = stream(source);
        let interface = Interface::parse(&mut tokens);
        let members = interface.members();
        assert_eq!(members[0].full_name().as_deref(), Some("Foo/draw(x)"));
    }

    #[test]
    fn test_mixin() {
        let source = "interface mixin Mixin { const double c = 10.0; attribute long attributeMember; };";
        let mut tokens = stream(source);
        assert!(Mixin::peek(&mut tokens));
        let mut tokens = stream(source);
        let mixin = Mixin::parse(&mut tokens);
        assert_eq!(mixin.text(), source);
        assert_eq!(mixin.idl_type(), IdlType::Interface);
        // const members weigh nothing; the mixin itself and the attribute
        // weigh one each.
        assert_eq!(mixin.complexity_factor(), 2);
    }

    #[test]
    fn test_unterminated_interface() {
        let source = "interface Foo { attribute long bar;";
        let mut tokens = stream(source);
        let interface = Interface::parse(&mut tokens);
        assert_eq!(interface.text(), source);
        assert_eq!(interface.members().len(), 1);
    }
}
