//! Grammar productions
//!
//! Each production is a recursive-descent matcher with two duties: recognize
//! itself from the token stream (consuming tokens only on success) and
//! re-emit its exact source text. Matching follows one convention
//! throughout:
//!
//! * a static `peek` does non-destructive lookahead, saving the stream
//!   position with [`TokenStream::mark`] and restoring it through
//!   [`TokenStream::resolve`] on failure;
//! * `parse` is only called after a successful `peek`, so it consumes
//!   unconditionally.
//!
//! Every production owns a [`Frame`]: the leading trivia it absorbed, an
//! optional error tail, an optional terminating semicolon, and trailing
//! trivia. `leading + inner + tail + semicolon + trailing` reproduces the
//! consumed text byte-for-byte.

pub mod arguments;
pub mod legacy;
pub mod members;
pub mod terminals;
pub mod types;
pub mod values;

pub use arguments::{ArgumentList, ArgumentName};
pub use legacy::{Ignore, IgnoreInOut, IgnoreMultipleInheritance, SerializationPattern};
pub use members::{
    AsyncIterable, Attribute, AttributeName, AttributeRest, Constructor, ExtendedAttributeList,
    Inheritance, Iterable, Maplike, MixinAttribute, Operation, OperationName, OperationRest,
    Serializer, Setlike, Special, SpecialOperation, StaticMember, Stringifier, TypeIdentifiers,
};
pub use terminals::{FloatLiteral, Identifier, Integer, StringLiteral, Symbol, TypeIdentifier};
pub use types::{
    AnyType, BufferType, ConstType, FloatType, GenericType, IntegerType, NonAnyType, ObjectType,
    PrimitiveType, PromiseType, RecordType, SingleType, StringType, Type,
    TypeWithExtendedAttributes, UnionMemberType, UnionType, UnrestrictedFloatType,
    UnsignedIntegerType,
};
pub use values::{ConstValue, Default, EnumValue, EnumValueList};

use crate::markup::MarkupGenerator;
use crate::tokenizer::{Token, TokenStream};

/// Source-text bookkeeping shared by every production: leading trivia, the
/// error tail a recovering production absorbed, the terminating semicolon it
/// claimed, and trailing trivia.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub leading_space: String,
    pub tail: Option<Vec<Token>>,
    pub semicolon: Option<Box<Symbol>>,
    pub trailing_space: String,
}

impl Frame {
    /// Start a production: absorb leading trivia.
    pub fn begin(tokens: &mut TokenStream) -> Frame {
        Frame {
            leading_space: tokens.whitespace().unwrap_or_default(),
            ..Frame::default()
        }
    }

    /// Finish a production, optionally absorbing trailing trivia.
    pub fn did_parse(&mut self, tokens: &mut TokenStream, include_trailing_space: bool) {
        if include_trailing_space {
            self.trailing_space = tokens.whitespace().unwrap_or_default();
        }
    }

    /// Claim the terminating `;`. When the grammar went wrong, seek to the
    /// next `;` or `}` instead, keeping the skipped tokens as the tail so
    /// the text survives, and report the span.
    pub fn consume_semicolon(&mut self, tokens: &mut TokenStream, consume_tail: bool) {
        if Symbol::peek(tokens, ";") {
            self.semicolon = Some(Box::new(Symbol::parse_tight(tokens, ";")));
        } else if !Symbol::peek(tokens, "}") {
            if consume_tail {
                let mut skipped = tokens.syntax_error(Some(&[";", "}"]), true);
                if let Some(last) = skipped.pop() {
                    tokens.restore(last);
                    self.tail = Some(skipped);
                    if Symbol::peek(tokens, ";") {
                        self.semicolon = Some(Box::new(Symbol::parse_tight(tokens, ";")));
                    }
                }
            } else {
                tokens.syntax_error(None, true);
            }
        } else {
            tokens.syntax_error(None, true);
        }
    }

    /// Exact text of the error tail, if any.
    pub fn tail_text(&self) -> String {
        match &self.tail {
            Some(tokens) => tokens.iter().map(|t| t.text.as_str()).collect(),
            None => String::new(),
        }
    }
}

/// Common surface of every production: its [`Frame`], body serialization,
/// and the structural markup walk.
pub trait Production {
    fn frame(&self) -> &Frame;

    fn frame_mut(&mut self) -> &mut Frame;

    /// Serialize the body, without the frame's leading/trailing pieces.
    fn write_inner(&self, out: &mut String);

    /// Walk the body into a markup generator. Returns the frame whose tail,
    /// semicolon, and trailing space the caller must flush; delegating
    /// productions return the frame of the production they delegated to.
    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        let mut inner = String::new();
        self.write_inner(&mut inner);
        generator.add_text(&inner);
        self.frame()
    }

    /// Serialize this production exactly as it appeared in the source.
    fn write(&self, out: &mut String) {
        let frame = self.frame();
        out.push_str(&frame.leading_space);
        self.write_inner(out);
        out.push_str(&frame.tail_text());
        if let Some(semicolon) = &frame.semicolon {
            semicolon.write(out);
        }
        out.push_str(&frame.trailing_space);
    }

    fn text(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    /// Walk this production, frame included, into a markup generator.
    fn define_markup<'a>(&'a self, generator: &mut MarkupGenerator<'a>) {
        let frame = self.frame();
        generator.add_text(&frame.leading_space);
        let target = self.markup_inner(generator);
        generator.add_text(&target.tail_text());
        if let Some(semicolon) = &target.semicolon {
            generator.add_text(&semicolon.text());
        }
        if !std::ptr::eq(frame, target) {
            generator.add_text(&target.trailing_space);
        }
        generator.add_text(&frame.trailing_space);
    }
}

/// Write an optional production, full frame included.
pub(crate) fn write_opt(out: &mut String, production: &Option<impl Production>) {
    if let Some(production) = production {
        production.write(out);
    }
}

macro_rules! impl_display_via_production {
    ($($ty:ty),* $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&crate::productions::Production::text(self))
                }
            }
        )*
    };
}
pub(crate) use impl_display_via_production;
