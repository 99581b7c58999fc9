//! Extended attributes and their canonical forms.
//!
//! Each attribute is classified by speculative matching into one of the
//! canonical shapes; anything else keeps its raw tokens as an unknown
//! attribute. Attributes named `Constructor`, `LegacyFactoryFunction`, or
//! `NamedConstructor` are constructors: they take the owning construct's
//! identity (patched in at assembly time) and surface through the owner's
//! `constructors()` collection.

use crate::constructs::{define_construct_markup, Construct, IdlType, ParentRef};
use crate::markup::MarkupGenerator;
use crate::productions::{
    ArgumentList, Frame, Identifier, Production, Symbol, Type, TypeIdentifier, TypeIdentifiers,
};
use crate::tokenizer::{Token, TokenStream};
use std::fmt;

const CONSTRUCTOR_NAMED_FORMS: [&str; 2] = ["LegacyFactoryFunction", "NamedConstructor"];

/// `Identifier`
#[derive(Debug, Clone)]
pub struct NoArgsForm {
    attribute: Identifier,
}

impl NoArgsForm {
    fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = Identifier::peek(tokens) && at_attribute_end(tokens);
        tokens.resolve(mark, matched)
    }

    fn parse(tokens: &mut TokenStream) -> Self {
        NoArgsForm {
            attribute: Identifier::parse(tokens),
        }
    }
}

/// `Identifier "(" [ArgumentList] ")"`
#[derive(Debug, Clone)]
pub struct ArgListForm {
    attribute: Identifier,
    open: Symbol,
    arguments: Option<ArgumentList>,
    close: Symbol,
}

impl ArgListForm {
    fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Identifier::peek(tokens) && Symbol::peek(tokens, "(") {
            ArgumentList::peek(tokens);
            Symbol::peek(tokens, ")") && at_attribute_end(tokens)
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    fn parse(tokens: &mut TokenStream) -> Self {
        let attribute = Identifier::parse(tokens);
        let open = Symbol::parse(tokens, "(");
        let arguments = if ArgumentList::peek(tokens) {
            Some(ArgumentList::parse(tokens))
        } else {
            None
        };
        let close = Symbol::parse(tokens, ")");
        ArgListForm {
            attribute,
            open,
            arguments,
            close,
        }
    }
}

/// `Identifier "=" Identifier`
#[derive(Debug, Clone)]
pub struct IdentForm {
    attribute: Identifier,
    equals: Symbol,
    value: TypeIdentifier,
}

impl IdentForm {
    fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = Identifier::peek(tokens)
            && Symbol::peek(tokens, "=")
            && Identifier::peek(tokens)
            && at_attribute_end(tokens);
        tokens.resolve(mark, matched)
    }

    fn parse(tokens: &mut TokenStream) -> Self {
        IdentForm {
            attribute: Identifier::parse(tokens),
            equals: Symbol::parse(tokens, "="),
            value: TypeIdentifier::parse(tokens),
        }
    }
}

/// `Identifier "=" "(" Identifier [Identifiers] ")"`
#[derive(Debug, Clone)]
pub struct IdentListForm {
    attribute: Identifier,
    equals: Symbol,
    open: Symbol,
    value: TypeIdentifier,
    rest: Option<TypeIdentifiers>,
    close: Symbol,
}

impl IdentListForm {
    fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Identifier::peek(tokens)
            && Symbol::peek(tokens, "=")
            && Symbol::peek(tokens, "(")
            && TypeIdentifier::peek(tokens)
        {
            TypeIdentifiers::peek(tokens);
            Symbol::peek(tokens, ")") && at_attribute_end(tokens)
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    fn parse(tokens: &mut TokenStream) -> Self {
        let attribute = Identifier::parse(tokens);
        let equals = Symbol::parse(tokens, "=");
        let open = Symbol::parse(tokens, "(");
        let value = TypeIdentifier::parse(tokens);
        let rest = if TypeIdentifiers::peek(tokens) {
            Some(TypeIdentifiers::parse(tokens))
        } else {
            None
        };
        let close = Symbol::parse(tokens, ")");
        IdentListForm {
            attribute,
            equals,
            open,
            value,
            rest,
            close,
        }
    }
}

/// `Identifier "=" Identifier "(" [ArgumentList] ")"`
#[derive(Debug, Clone)]
pub struct NamedArgListForm {
    attribute: Identifier,
    equals: Symbol,
    value: TypeIdentifier,
    open: Symbol,
    arguments: Option<ArgumentList>,
    close: Symbol,
}

impl NamedArgListForm {
    fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Identifier::peek(tokens)
            && Symbol::peek(tokens, "=")
            && TypeIdentifier::peek(tokens)
            && Symbol::peek(tokens, "(")
        {
            ArgumentList::peek(tokens);
            Symbol::peek(tokens, ")") && at_attribute_end(tokens)
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    fn parse(tokens: &mut TokenStream) -> Self {
        let attribute = Identifier::parse(tokens);
        let equals = Symbol::parse(tokens, "=");
        let value = TypeIdentifier::parse(tokens);
        let open = Symbol::parse(tokens, "(");
        let arguments = if ArgumentList::peek(tokens) {
            Some(ArgumentList::parse(tokens))
        } else {
            None
        };
        let close = Symbol::parse(tokens, ")");
        NamedArgListForm {
            attribute,
            equals,
            value,
            open,
            arguments,
            close,
        }
    }
}

/// `Identifier "(" Type "," Type ")"`
#[derive(Debug, Clone)]
pub struct TypePairForm {
    attribute: Identifier,
    open: Symbol,
    key: Type,
    comma: Symbol,
    value: Type,
    close: Symbol,
}

impl TypePairForm {
    fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = Identifier::peek(tokens)
            && Symbol::peek(tokens, "(")
            && Type::peek(tokens)
            && Symbol::peek(tokens, ",")
            && Type::peek(tokens)
            && Symbol::peek(tokens, ")")
            && at_attribute_end(tokens);
        tokens.resolve(mark, matched)
    }

    fn parse(tokens: &mut TokenStream) -> Self {
        TypePairForm {
            attribute: Identifier::parse(tokens),
            open: Symbol::parse(tokens, "("),
            key: Type::parse(tokens),
            comma: Symbol::parse(tokens, ","),
            value: Type::parse(tokens),
            close: Symbol::parse(tokens, ")"),
        }
    }
}

/// Anything else: raw tokens up to the next `,` or `]` at this level.
#[derive(Debug, Clone)]
pub struct UnknownForm {
    tokens: Vec<Token>,
}

impl UnknownForm {
    fn parse(tokens: &mut TokenStream) -> Self {
        let mut skipped = tokens.seek_to(&[",", "]"]);
        // The terminator stays in the stream; at end of input there is none.
        if skipped.last().is_some_and(|t| t.is_symbol_of(&[",", "]"])) {
            if let Some(last) = skipped.pop() {
                tokens.restore(last);
            }
        }
        UnknownForm { tokens: skipped }
    }
}

/// True when the attribute body ends here: `,`, `]`, or end of input.
fn at_attribute_end(tokens: &mut TokenStream) -> bool {
    match tokens.sneak_peek() {
        Some(token) => token.is_symbol_of(&[",", "]"]),
        None => true,
    }
}

#[derive(Debug, Clone)]
pub enum ExtendedAttributeKind {
    NamedArgList(NamedArgListForm),
    ArgList(ArgListForm),
    Ident(IdentForm),
    TypePair(TypePairForm),
    IdentList(IdentListForm),
    NoArgs(NoArgsForm),
    Unknown(UnknownForm),
}

/// One extended attribute, classified into a canonical form.
#[derive(Debug, Clone)]
pub struct ExtendedAttribute {
    frame: Frame,
    parent: Option<ParentRef>,
    kind: ExtendedAttributeKind,
}

impl ExtendedAttribute {
    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let kind = if NamedArgListForm::peek(tokens) {
            ExtendedAttributeKind::NamedArgList(NamedArgListForm::parse(tokens))
        } else if ArgListForm::peek(tokens) {
            ExtendedAttributeKind::ArgList(ArgListForm::parse(tokens))
        } else if IdentForm::peek(tokens) {
            ExtendedAttributeKind::Ident(IdentForm::parse(tokens))
        } else if TypePairForm::peek(tokens) {
            ExtendedAttributeKind::TypePair(TypePairForm::parse(tokens))
        } else if IdentListForm::peek(tokens) {
            ExtendedAttributeKind::IdentList(IdentListForm::parse(tokens))
        } else if NoArgsForm::peek(tokens) {
            ExtendedAttributeKind::NoArgs(NoArgsForm::parse(tokens))
        } else {
            ExtendedAttributeKind::Unknown(UnknownForm::parse(tokens))
        };
        frame.did_parse(tokens, true);
        ExtendedAttribute {
            frame,
            parent: None,
            kind,
        }
    }

    pub fn kind(&self) -> &ExtendedAttributeKind {
        &self.kind
    }

    /// The attribute's own identifier (`Constructor`, `Exposed`, ...).
    pub fn attribute_name(&self) -> Option<String> {
        match &self.kind {
            ExtendedAttributeKind::NamedArgList(form) => Some(form.attribute.name().to_string()),
            ExtendedAttributeKind::ArgList(form) => Some(form.attribute.name().to_string()),
            ExtendedAttributeKind::Ident(form) => Some(form.attribute.name().to_string()),
            ExtendedAttributeKind::TypePair(form) => Some(form.attribute.name().to_string()),
            ExtendedAttributeKind::IdentList(form) => Some(form.attribute.name().to_string()),
            ExtendedAttributeKind::NoArgs(form) => Some(form.attribute.name().to_string()),
            ExtendedAttributeKind::Unknown(_) => None,
        }
    }

    /// The right-hand identifier of `A = B` style forms.
    pub fn value_name(&self) -> Option<String> {
        match &self.kind {
            ExtendedAttributeKind::NamedArgList(form) => Some(form.value.name().to_string()),
            ExtendedAttributeKind::Ident(form) => Some(form.value.name().to_string()),
            ExtendedAttributeKind::IdentList(form) => Some(form.value.name().to_string()),
            _ => None,
        }
    }

    fn is_constructor(&self) -> bool {
        match &self.kind {
            ExtendedAttributeKind::NoArgs(_) | ExtendedAttributeKind::ArgList(_) => {
                self.attribute_name().as_deref() == Some("Constructor")
            }
            ExtendedAttributeKind::Ident(_)
            | ExtendedAttributeKind::IdentList(_)
            | ExtendedAttributeKind::NamedArgList(_) => self
                .attribute_name()
                .is_some_and(|name| CONSTRUCTOR_NAMED_FORMS.contains(&name.as_str())),
            _ => false,
        }
    }

    /// Assembly-time patch from the owning construct; constructor-flavored
    /// attributes resolve their names against the owner.
    pub(crate) fn adopt_owner(&mut self, owner: ParentRef) {
        self.parent = Some(owner);
        let parent = ParentRef {
            name: self.name(),
            full_name: self.full_name(),
        };
        if let Some(arguments) = self.arguments_mut() {
            for argument in arguments {
                argument.adopt(parent.clone());
            }
        }
    }

    fn arguments_mut(&mut self) -> Option<&mut [crate::constructs::Argument]> {
        match &mut self.kind {
            ExtendedAttributeKind::ArgList(form) => form
                .arguments
                .as_mut()
                .map(|list| list.arguments_mut()),
            ExtendedAttributeKind::NamedArgList(form) => form
                .arguments
                .as_mut()
                .map(|list| list.arguments_mut()),
            _ => None,
        }
    }
}

impl Production for ExtendedAttribute {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        match &self.kind {
            ExtendedAttributeKind::NamedArgList(form) => {
                form.attribute.write(out);
                form.equals.write(out);
                form.value.write(out);
                form.open.write(out);
                if let Some(arguments) = &form.arguments {
                    arguments.write(out);
                }
                form.close.write(out);
            }
            ExtendedAttributeKind::ArgList(form) => {
                form.attribute.write(out);
                form.open.write(out);
                if let Some(arguments) = &form.arguments {
                    arguments.write(out);
                }
                form.close.write(out);
            }
            ExtendedAttributeKind::Ident(form) => {
                form.attribute.write(out);
                form.equals.write(out);
                form.value.write(out);
            }
            ExtendedAttributeKind::TypePair(form) => {
                form.attribute.write(out);
                form.open.write(out);
                form.key.write(out);
                form.comma.write(out);
                form.value.write(out);
                form.close.write(out);
            }
            ExtendedAttributeKind::IdentList(form) => {
                form.attribute.write(out);
                form.equals.write(out);
                form.open.write(out);
                form.value.write(out);
                if let Some(rest) = &form.rest {
                    rest.write(out);
                }
                form.close.write(out);
            }
            ExtendedAttributeKind::NoArgs(form) => form.attribute.write(out),
            ExtendedAttributeKind::Unknown(form) => {
                for token in &form.tokens {
                    out.push_str(&token.text);
                }
            }
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        match &self.kind {
            ExtendedAttributeKind::NamedArgList(form) => {
                form.attribute.define_markup(generator);
                generator.add_text(&form.equals.text());
                form.value.define_markup(generator);
                generator.add_text(&form.open.text());
                if let Some(arguments) = &form.arguments {
                    arguments.define_markup(generator);
                }
                generator.add_text(&form.close.text());
            }
            ExtendedAttributeKind::ArgList(form) => {
                form.attribute.define_markup(generator);
                generator.add_text(&form.open.text());
                if let Some(arguments) = &form.arguments {
                    arguments.define_markup(generator);
                }
                generator.add_text(&form.close.text());
            }
            ExtendedAttributeKind::Ident(form) => {
                form.attribute.define_markup(generator);
                generator.add_text(&form.equals.text());
                form.value.define_markup(generator);
            }
            ExtendedAttributeKind::TypePair(form) => {
                form.attribute.define_markup(generator);
                generator.add_text(&form.open.text());
                form.key.define_markup(generator);
                generator.add_text(&form.comma.text());
                form.value.define_markup(generator);
                generator.add_text(&form.close.text());
            }
            ExtendedAttributeKind::IdentList(form) => {
                form.attribute.define_markup(generator);
                generator.add_text(&form.equals.text());
                generator.add_text(&form.open.text());
                form.value.define_markup(generator);
                if let Some(rest) = &form.rest {
                    rest.markup_inner(generator);
                }
                generator.add_text(&form.close.text());
            }
            ExtendedAttributeKind::NoArgs(form) => {
                form.attribute.define_markup(generator);
            }
            ExtendedAttributeKind::Unknown(form) => {
                let text: String = form.tokens.iter().map(|t| t.text.as_str()).collect();
                generator.add_text(&text);
            }
        }
        &self.frame
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for ExtendedAttribute {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        if self.is_constructor() {
            IdlType::Constructor
        } else {
            IdlType::ExtendedAttribute
        }
    }

    fn name(&self) -> Option<String> {
        if self.is_constructor() {
            match &self.kind {
                // A plain [Constructor] is named after its owner.
                ExtendedAttributeKind::NoArgs(_) | ExtendedAttributeKind::ArgList(_) => {
                    self.parent.as_ref().and_then(|p| p.name.clone())
                }
                _ => self.value_name(),
            }
        } else {
            self.attribute_name()
        }
    }

    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn adopt(&mut self, parent: ParentRef) {
        self.adopt_owner(parent);
    }

    fn normal_name(&self) -> Option<String> {
        if self.is_constructor() {
            let name = self.name().unwrap_or_default();
            let argument_names: Vec<String> = self
                .arguments()
                .map(|list| {
                    list.arguments()
                        .iter()
                        .filter_map(|argument| argument.name())
                        .collect()
                })
                .unwrap_or_default();
            Some(format!("{name}({})", argument_names.join(", ")))
        } else {
            self.attribute_name()
        }
    }

    fn arguments(&self) -> Option<&ArgumentList> {
        match &self.kind {
            ExtendedAttributeKind::ArgList(form) => form.arguments.as_ref(),
            ExtendedAttributeKind::NamedArgList(form) => form.arguments.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for ExtendedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_attribute(source: &str) -> ExtendedAttribute {
        let mut tokens = TokenStream::new(source, None);
        ExtendedAttribute::parse(&mut tokens)
    }

    #[test]
    fn test_form_classification() {
        assert!(matches!(
            parse_attribute("Constructor").kind(),
            ExtendedAttributeKind::NoArgs(_)
        ));
        assert!(matches!(
            parse_attribute("Constructor(Foo one)").kind(),
            ExtendedAttributeKind::ArgList(_)
        ));
        assert!(matches!(
            parse_attribute("PutForwards=name").kind(),
            ExtendedAttributeKind::Ident(_)
        ));
        assert!(matches!(
            parse_attribute("LegacyFactoryFunction = MyConstructor (Foo two)").kind(),
            ExtendedAttributeKind::NamedArgList(_)
        ));
        assert!(matches!(
            parse_attribute("Exposed=(Window, Worker)").kind(),
            ExtendedAttributeKind::IdentList(_)
        ));
        assert!(matches!(
            parse_attribute("MapClass (short, Foo )").kind(),
            ExtendedAttributeKind::TypePair(_)
        ));
        assert!(matches!(
            parse_attribute("hello, my name is").kind(),
            ExtendedAttributeKind::Unknown(_)
        ));
    }

    #[test]
    fn test_constructor_classification() {
        let mut attribute = parse_attribute("Constructor(Foo one)");
        assert_eq!(attribute.idl_type(), IdlType::Constructor);
        attribute.adopt_owner(ParentRef {
            name: Some("Foo".to_string()),
            full_name: Some("Foo".to_string()),
        });
        assert_eq!(attribute.name().as_deref(), Some("Foo"));
        assert_eq!(attribute.normal_name().as_deref(), Some("Foo(one)"));
    }

    #[test]
    fn test_named_constructor_keeps_its_own_name() {
        let attribute = parse_attribute("LegacyFactoryFunction=MyConstructor");
        assert_eq!(attribute.idl_type(), IdlType::Constructor);
        assert_eq!(attribute.name().as_deref(), Some("MyConstructor"));
        assert_eq!(attribute.normal_name().as_deref(), Some("MyConstructor()"));
    }

    #[test]
    fn test_round_trip() {
        for source in [
            "Constructor",
            "Constructor (Foo one)",
            "Exposed=(Window, Worker)",
            "hello \"]\" ( tricky ] test)",
        ] {
            assert_eq!(parse_attribute(source).text(), source);
        }
    }
}
