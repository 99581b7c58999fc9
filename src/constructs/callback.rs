//! Callbacks: function callbacks and callback interfaces.

use crate::constructs::interface::{Interface, Mixin};
use crate::constructs::{define_construct_markup, Construct, IdlType, ParentRef};
use crate::markup::MarkupGenerator;
use crate::productions::{
    ArgumentList, ExtendedAttributeList, Frame, Identifier, Production, Symbol, Type,
};
use crate::tokenizer::TokenStream;
use std::fmt;

#[derive(Debug, Clone)]
pub enum CallbackRest {
    /// `Identifier "=" Type "(" [ArgumentList] ")" ";"`
    Function {
        name: Identifier,
        equals: Symbol,
        return_type: Type,
        open: Symbol,
        arguments: Option<ArgumentList>,
        close: Symbol,
    },
    Interface(Box<Interface>),
    Mixin(Box<Mixin>),
}

/// `[ExtendedAttributes] "callback" ...` — a function callback when an
/// identifier follows, otherwise a callback interface (or mixin).
#[derive(Debug, Clone)]
pub struct Callback {
    frame: Frame,
    parent: Option<ParentRef>,
    extended_attributes: Option<ExtendedAttributeList>,
    callback_keyword: Symbol,
    rest: CallbackRest,
}

impl Callback {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        ExtendedAttributeList::peek(tokens);
        let matched = if Symbol::peek(tokens, "callback") {
            if Mixin::peek_with(tokens, false) || Interface::peek_with(tokens, false) {
                true
            } else if Identifier::peek(tokens)
                && Symbol::peek(tokens, "=")
                && Type::peek(tokens)
                && Symbol::peek(tokens, "(")
            {
                ArgumentList::peek(tokens);
                tokens.peek().is_some_and(|t| t.is_symbol_eq(")"))
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
        let callback_keyword = Symbol::parse(tokens, "callback");
        let rest = match tokens.sneak_peek() {
            Some(token) if token.is_identifier() => {
                let name = Identifier::parse(tokens);
                let equals = Symbol::parse(tokens, "=");
                let return_type = Type::parse(tokens);
                let open = Symbol::parse(tokens, "(");
                let arguments = if ArgumentList::peek(tokens) {
                    Some(ArgumentList::parse(tokens))
                } else {
                    None
                };
                let close = Symbol::parse(tokens, ")");
                frame.consume_semicolon(tokens, true);
                CallbackRest::Function {
                    name,
                    equals,
                    return_type,
                    open,
                    arguments,
                    close,
                }
            }
            _ => {
                if Mixin::peek_with(tokens, false) {
                    CallbackRest::Mixin(Box::new(Mixin::parse_with(tokens, false)))
                } else {
                    CallbackRest::Interface(Box::new(Interface::parse_with(tokens, false)))
                }
            }
        };
        frame.did_parse(tokens, true);
        let mut parsed = Callback {
            frame,
            parent: None,
            extended_attributes,
            callback_keyword,
            rest,
        };
        parsed.claim_children();
        parsed
    }

    /// The callback interface, or `None` for a function callback.
    pub fn interface(&self) -> Option<&dyn Construct> {
        match &self.rest {
            CallbackRest::Interface(interface) => Some(interface.as_construct()),
            CallbackRest::Mixin(mixin) => Some(mixin.as_construct()),
            CallbackRest::Function { .. } => None,
        }
    }

    /// The function callback's return type, or `None` for interfaces.
    pub fn return_type(&self) -> Option<&Type> {
        match &self.rest {
            CallbackRest::Function { return_type, .. } => Some(return_type),
            _ => None,
        }
    }

    fn claim_children(&mut self) {
        let owner = ParentRef {
            name: Construct::name(self),
            full_name: self.full_name(),
        };
        if let Some(attributes) = &mut self.extended_attributes {
            attributes.adopt(&owner);
        }
        match &mut self.rest {
            CallbackRest::Function { arguments, .. } => {
                if let Some(arguments) = arguments {
                    for argument in arguments.arguments_mut() {
                        argument.adopt(owner.clone());
                    }
                }
            }
            CallbackRest::Interface(interface) => interface.adopt(owner),
            CallbackRest::Mixin(mixin) => mixin.adopt(owner),
        }
    }
}

impl Production for Callback {
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
        self.callback_keyword.write(out);
        match &self.rest {
            CallbackRest::Function {
                name,
                equals,
                return_type,
                open,
                arguments,
                close,
            } => {
                name.write(out);
                equals.write(out);
                return_type.write(out);
                open.write(out);
                if let Some(arguments) = arguments {
                    arguments.write(out);
                }
                close.write(out);
            }
            CallbackRest::Interface(interface) => interface.write(out),
            CallbackRest::Mixin(mixin) => mixin.write(out),
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.callback_keyword.define_markup(generator);
        match &self.rest {
            CallbackRest::Function {
                name,
                equals,
                return_type,
                open,
                arguments,
                close,
            } => {
                name.define_markup(generator);
                generator.add_text(&equals.text());
                generator.add_type(return_type);
                generator.add_text(&open.text());
                if let Some(arguments) = arguments {
                    arguments.define_markup(generator);
                }
                generator.add_text(&close.text());
                &self.frame
            }
            CallbackRest::Interface(interface) => interface.markup_inner(generator),
            CallbackRest::Mixin(mixin) => mixin.markup_inner(generator),
        }
    }

    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        define_construct_markup(self, generator);
    }
}

impl Construct for Callback {
    fn as_construct(&self) -> &dyn Construct {
        self
    }

    fn idl_type(&self) -> IdlType {
        IdlType::Callback
    }

    fn name(&self) -> Option<String> {
        match &self.rest {
            CallbackRest::Function { name, .. } => Some(name.name().to_string()),
            CallbackRest::Interface(interface) => Construct::name(interface.as_ref()),
            CallbackRest::Mixin(mixin) => Construct::name(mixin.as_ref()),
        }
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

    fn arguments(&self) -> Option<&ArgumentList> {
        match &self.rest {
            CallbackRest::Function { arguments, .. } => arguments.as_ref(),
            _ => None,
        }
    }

    fn members(&self) -> Vec<&dyn Construct> {
        match &self.rest {
            CallbackRest::Interface(interface) => interface.members(),
            CallbackRest::Mixin(mixin) => mixin.members(),
            CallbackRest::Function { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for Callback {
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
    fn test_function_callback() {
        let source = "callback C = void (long x);";
        let mut tokens = stream(source);
        assert!(Callback::peek(&mut tokens));
        let mut tokens = stream(source);
        let callback = Callback::parse(&mut tokens);
        assert_eq!(callback.text(), source);
        assert!(callback.interface().is_none());
        assert_eq!(
            callback.return_type().and_then(|t| t.type_name()).as_deref(),
            Some("void")
        );
        assert_eq!(Construct::name(&callback).as_deref(), Some("C"));
        assert!(callback.arguments().is_some_and(|a| a.len() == 1));
        assert!(callback.find_argument("x", true).is_some());
    }

    #[test]
    fn test_callback_interface() {
        let source = "callback interface callMe {\n    attribute short round;\n};";
        let mut tokens = stream(source);
        assert!(Callback::peek(&mut tokens));
        let mut tokens = stream(source);
        let callback = Callback::parse(&mut tokens);
        assert_eq!(callback.text(), source);
        assert!(callback.interface().is_some());
        assert_eq!(Construct::name(&callback).as_deref(), Some("callMe"));
        assert_eq!(callback.members().len(), 1);
        assert!(callback.find_member("round").is_some());
    }

    #[test]
    fn test_callback_mixin() {
        let source = "callback interface mixin callMeMixin {\n    long method();\n};";
        let mut tokens = stream(source);
        let callback = Callback::parse(&mut tokens);
        assert_eq!(callback.text(), source);
        assert!(callback.interface().is_some());
    }
}
