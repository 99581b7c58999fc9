//! Tokenizer layer: lossless WebIDL lexing and the rewindable token stream
//! the production layer parses from.

pub mod stream;
pub mod tokens;

pub use stream::{Mark, TokenStream};
pub use tokens::{tokenize, Token, TokenKind, FLOAT_WORDS, KEYWORDS};
