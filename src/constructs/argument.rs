//! Method arguments.

use crate::constructs::{define_construct_markup, Construct, IdlType, ParentRef};
use crate::markup::MarkupGenerator;
use crate::productions::legacy::IgnoreInOut;
use crate::productions::{
    ArgumentName, Default, ExtendedAttributeList, Frame, Production, Symbol, Type,
    TypeWithExtendedAttributes,
};
use crate::tokenizer::TokenStream;
use std::fmt;

#[derive(Debug, Clone)]
pub enum FormalType {
    Plain(Type),
    Annotated(TypeWithExtendedAttributes),
}

impl FormalType {
    fn write(&self, out: &mut String) {
        match self {
            FormalType::Plain(ty) => ty.write(out),
            FormalType::Annotated(ty) => ty.write(out),
        }
    }

    pub fn type_names(&self) -> Vec<String> {
        match self {
            FormalType::Plain(ty) => ty.type_names(),
            FormalType::Annotated(ty) => ty.type_names(),
        }
    }
}

/// `[ExtendedAttributeList] "optional" [IgnoreInOut] TypeWithExtendedAttributes ArgumentName [Default]`
/// `| [ExtendedAttributeList] [IgnoreInOut] Type ["..."] ArgumentName`
#[derive(Debug, Clone)]
pub struct Argument {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    optional: Option<Symbol>,
    ignore: Option<IgnoreInOut>,
    ty: FormalType,
    variadic: Option<Symbol>,
    name: ArgumentName,
    default: Option<Default>,
}

impl Argument {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        IgnoreInOut::peek(tokens);
        let matched = if Type::peek(tokens) {
            Symbol::peek(tokens, "...");
            ArgumentName::peek(tokens)
        } else if Symbol::peek(tokens, "optional") {
            IgnoreInOut::peek(tokens);
            if TypeWithExtendedAttributes::peek(tokens) && ArgumentName::peek(tokens) {
                Default::peek(tokens);
                true
            } else {
                false
            }
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
        let argument = if Symbol::peek(tokens, "optional") {
            let optional = Some(Symbol::parse(tokens, "optional"));
            let ignore = if IgnoreInOut::peek(tokens) {
                Some(IgnoreInOut::parse(tokens))
            } else {
                None
            };
            let ty = FormalType::Annotated(TypeWithExtendedAttributes::parse(tokens));
            let name = ArgumentName::parse(tokens);
            let default = if Default::peek(tokens) {
                Some(Default::parse(tokens))
            } else {
                None
            };
            Argument {
                frame: Frame::default(),
                parent: None,
                extended_attributes,
                optional,
                ignore,
                ty,
                variadic: None,
                name,
                default,
            }
        } else {
            let ignore = if IgnoreInOut::peek(tokens) {
                Some(IgnoreInOut::parse(tokens))
            } else {
                None
            };
            let ty = FormalType::Plain(Type::parse(tokens));
            let variadic = if Symbol::peek(tokens, "...") {
                Some(Symbol::parse(tokens, "..."))
            } else {
                None
            };
            let name = ArgumentName::parse(tokens);
            Argument {
                frame: Frame::default(),
                parent: None,
                extended_attributes,
                optional: None,
                ignore,
                ty,
                variadic,
                name,
                default: None,
            }
        };
        frame.did_parse(tokens, true);
        Argument { frame, ..argument }
    }

    pub fn is_optional(&self) -> bool {
        self.optional.is_some()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    pub fn is_required(&self) -> bool {
        self.optional.is_none() && self.variadic.is_none()
    }

    pub fn formal_type(&self) -> &FormalType {
        &self.ty
    }

    pub fn default(&self) -> Option<&Default> {
        self.default.as_ref()
    }
}

impl Production for Argument {
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
        if let Some(optional) = &self.optional {
            optional.write(out);
        }
        if let Some(ignore) = &self.ignore {
            ignore.write(out);
        }
        self.ty.write(out);
        if let Some(variadic) = &self.variadic {
            variadic.write(out);
        }
        self.name.write(out);
        if let Some(default) = &self.default {
            default.write(out);
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        if let Some(optional) = &self.optional {
            optional.define_markup(generator);
        }
        if let Some(ignore) = &self.ignore {
            ignore.define_markup(generator);
        }
        match &self.ty {
            FormalType::Plain(ty) => generator.add_type(ty),
            FormalType::Annotated(ty) => generator.add_type(ty),
        }
        if let Some(variadic) = &self.variadic {
            generator.add_text(&variadic.text());
        }
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

impl Construct for Argument {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Argument
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

impl fmt::Display for Argument {
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
    fn test_plain_argument() {
        let source = "long x";
        let mut tokens = stream(source);
        assert!(Argument::peek(&mut tokens));
        let mut tokens = stream(source);
        let argument = Argument::parse(&mut tokens);
        assert_eq!(argument.text(), source);
        assert_eq!(argument.name().as_deref(), Some("x"));
        assert!(argument.is_required());
    }

    #[test]
    fn test_optional_argument_with_default() {
        let source = "optional double inf = Infinity";
        let mut tokens = stream(source);
        let argument = Argument::parse(&mut tokens);
        assert_eq!(argument.text(), source);
        assert!(argument.is_optional());
        assert_eq!(argument.default().map(|d| d.value_text()).as_deref(), Some("Infinity"));
    }

    #[test]
    fn test_variadic_argument() {
        let source = "sequence<Foo>... fooArg";
        let mut tokens = stream(source);
        let argument = Argument::parse(&mut tokens);
        assert_eq!(argument.text(), source);
        assert!(argument.is_variadic());
        assert!(!argument.is_required());
    }

    #[test]
    fn test_legacy_direction_keyword() {
        let source = "in long x";
        let mut tokens = stream(source);
        assert!(Argument::peek(&mut tokens));
        let mut tokens = stream(source);
        let argument = Argument::parse(&mut tokens);
        assert_eq!(argument.text(), source);
        assert_eq!(argument.name().as_deref(), Some("x"));
    }
}
