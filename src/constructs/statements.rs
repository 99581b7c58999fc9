//! `implements` and `includes` statements.

use crate::constructs::{define_construct_markup, Construct, IdlType, ParentRef};
use crate::markup::MarkupGenerator;
use crate::productions::{ExtendedAttributeList, Frame, Production, Symbol, TypeIdentifier};
use crate::tokenizer::TokenStream;
use std::fmt;

/// `[ExtendedAttributes] Identifier "implements" Identifier ";"`
///
/// A pre-standard statement; acceptance is reported through `note`.
/// Extended attributes written before it attach to the statement itself.
#[derive(Debug, Clone)]
pub struct ImplementsStatement {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    name: TypeIdentifier,
    implements_keyword: Symbol,
    implements: TypeIdentifier,
}

impl ImplementsStatement {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        let matched = TypeIdentifier::peek(tokens)
            && Symbol::peek(tokens, "implements")
            && TypeIdentifier::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let extended_attributes = if ExtendedAttributeList::peek(tokens) {
            Some(ExtendedAttributeList::parse(tokens))
        } else {
            None
        };
        let name = TypeIdentifier::parse(tokens);
        let implements_keyword = Symbol::parse(tokens, "implements");
        let implements = TypeIdentifier::parse(tokens);
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        tokens.did_ignore("implements");
        let mut parsed = ImplementsStatement {
            frame,
            parent: None,
            extended_attributes,
            name,
            implements_keyword,
            implements,
        };
        parsed.claim_children();
        parsed
    }

    /// Name of the interface being implemented.
    pub fn implements(&self) -> &str {
        self.implements.name()
    }

    fn claim_children(&mut self) {
        let owner = ParentRef {
            name: Construct::name(self),
            full_name: self.full_name(),
        };
        if let Some(attributes) = &mut self.extended_attributes {
            attributes.adopt(&owner);
        }
    }
}

impl Production for ImplementsStatement {
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
        self.name.write(out);
        self.implements_keyword.write(out);
        self.implements.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.name.define_markup(generator);
        self.implements_keyword.define_markup(generator);
        self.implements.define_markup(generator);
        &self.frame
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for ImplementsStatement {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Implements
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

/// `Identifier "includes" Identifier ";"`
#[derive(Debug, Clone)]
pub struct IncludesStatement {
    frame: Frame,
    parent: Option<ParentRef>,
    name: TypeIdentifier,
    includes_keyword: Symbol,
    includes: TypeIdentifier,
}

impl IncludesStatement {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = TypeIdentifier::peek(tokens)
            && Symbol::peek(tokens, "includes")
            && TypeIdentifier::peek(tokens);
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let name = TypeIdentifier::parse(tokens);
        let includes_keyword = Symbol::parse(tokens, "includes");
        let includes = TypeIdentifier::parse(tokens);
        frame.consume_semicolon(tokens, true);
        frame.did_parse(tokens, true);
        IncludesStatement {
            frame,
            parent: None,
            name,
            includes_keyword,
            includes,
        }
    }

    /// Name of the mixin being included.
    pub fn includes(&self) -> &str {
        self.includes.name()
    }
}

impl Production for IncludesStatement {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.name.write(out);
        self.includes_keyword.write(out);
        self.includes.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.name.define_markup(generator);
        self.includes_keyword.define_markup(generator);
        self.includes.define_markup(generator);
        &self.frame
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for IncludesStatement {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Includes
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

impl fmt::Display for ImplementsStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Display for IncludesStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingUi, UserInterface};

    #[test]
    fn test_implements_statement() {
        let source = " Window   implements     WindowInterface  ;";
        let mut ui = CollectingUi::new();
        let handle = ui.clone();
        {
            let mut tokens = TokenStream::new(source, Some(&mut ui as &mut dyn UserInterface));
            assert!(ImplementsStatement::peek(&mut tokens));
            let mut tokens = TokenStream::new(source, None);
            let statement = ImplementsStatement::parse(&mut tokens);
            assert_eq!(statement.text(), source);
            assert_eq!(Construct::name(&statement).as_deref(), Some("Window"));
            assert_eq!(statement.implements(), "WindowInterface");
        }
        // peek alone never reports; the parse above ran without a UI.
        assert!(handle.notes().is_empty());
    }

    #[test]
    fn test_includes_statement() {
        let source = "Interface includes Mixin;";
        let mut tokens = TokenStream::new(source, None);
        assert!(IncludesStatement::peek(&mut tokens));
        let mut tokens = TokenStream::new(source, None);
        let statement = IncludesStatement::parse(&mut tokens);
        assert_eq!(statement.text(), source);
        assert_eq!(statement.includes(), "Mixin");
    }

    #[test]
    fn test_implements_with_extended_attributes() {
        let source = "[LegacyNoInterfaceObject] Interface implements Mixin;";
        let mut tokens = TokenStream::new(source, None);
        assert!(ImplementsStatement::peek(&mut tokens));
        let mut tokens = TokenStream::new(source, None);
        let statement = ImplementsStatement::parse(&mut tokens);
        assert_eq!(statement.text(), source);
        assert!(statement.extended_attributes().is_some());
    }
}
