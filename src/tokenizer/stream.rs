//! Rewindable token stream
//!
//! The production layer parses by speculation: every production first peeks
//! far enough to know it will match, then consumes. The stream therefore
//! keeps two positions: `cursor` (next token to consume) and `lookahead`
//! (next token to peek). Peeking advances `lookahead` only; consuming
//! advances `cursor` and snaps `lookahead` back to it. [`Mark`] values save
//! and restore the lookahead so speculative branches can be abandoned
//! without copying tokens.

use crate::diagnostics::UserInterface;
use crate::tokenizer::tokens::{tokenize, Token};

/// Saved lookahead position; see [`TokenStream::mark`].
#[derive(Debug, Clone, Copy)]
pub struct Mark(usize);

pub struct TokenStream<'u> {
    tokens: Vec<Token>,
    cursor: usize,
    lookahead: usize,
    line: usize,
    ui: Option<&'u mut (dyn UserInterface + 'static)>,
}

fn newlines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}

impl<'u> TokenStream<'u> {
    pub fn new(text: &str, ui: Option<&'u mut (dyn UserInterface + 'static)>) -> Self {
        TokenStream {
            tokens: tokenize(text),
            cursor: 0,
            lookahead: 0,
            line: 1,
            ui,
        }
    }

    /// Line number of the next unconsumed token, for diagnostics.
    pub fn line(&self) -> usize {
        self.line
    }

    /// True while a non-trivia token remains.
    pub fn has_tokens(&self) -> bool {
        self.tokens[self.cursor..].iter().any(|t| !t.is_trivia())
    }

    /// Save the lookahead position.
    pub fn mark(&self) -> Mark {
        Mark(self.lookahead)
    }

    /// Keep the lookahead on a match, rewind it otherwise. Returns `matched`
    /// so peek functions can end with `stream.resolve(mark, condition)`.
    pub fn resolve(&mut self, mark: Mark, matched: bool) -> bool {
        if !matched {
            self.lookahead = mark.0;
        }
        matched
    }

    /// Next non-trivia token without consuming; advances the lookahead past
    /// the returned token.
    pub fn peek(&mut self) -> Option<Token> {
        let mut index = self.lookahead;
        while index < self.tokens.len() && self.tokens[index].is_trivia() {
            index += 1;
        }
        if index < self.tokens.len() {
            self.lookahead = index + 1;
            Some(self.tokens[index].clone())
        } else {
            self.lookahead = self.tokens.len();
            None
        }
    }

    /// Next non-trivia token without consuming or moving the lookahead.
    pub fn sneak_peek(&self) -> Option<Token> {
        self.tokens[self.lookahead..]
            .iter()
            .find(|t| !t.is_trivia())
            .cloned()
    }

    /// Remove and return the next token, optionally discarding leading
    /// trivia first. Consuming resets the lookahead.
    pub fn next_token(&mut self, skip_trivia: bool) -> Option<Token> {
        if skip_trivia {
            while self.cursor < self.tokens.len() && self.tokens[self.cursor].is_trivia() {
                self.line += newlines(&self.tokens[self.cursor].text);
                self.cursor += 1;
            }
        }
        let token = self.tokens.get(self.cursor).cloned();
        if let Some(token) = &token {
            self.line += newlines(&token.text);
            self.cursor += 1;
        }
        self.lookahead = self.cursor;
        token
    }

    /// Consume the next real token; callers peek first, so absence is an
    /// end-of-input edge and degrades to an empty token rather than a panic.
    pub fn next_required(&mut self) -> Token {
        self.next_token(true).unwrap_or(Token {
            kind: crate::tokenizer::tokens::TokenKind::Unknown,
            text: String::new(),
            offset: self.tokens.last().map(|t| t.offset + t.text.len()).unwrap_or(0),
        })
    }

    /// Hand the most recently consumed token back to the stream.
    pub fn restore(&mut self, token: Token) {
        debug_assert!(self.cursor > 0 && self.tokens[self.cursor - 1] == token);
        self.line -= newlines(&token.text);
        self.cursor -= 1;
        self.lookahead = self.cursor;
    }

    /// Consume a run of leading trivia and return its exact text.
    pub fn whitespace(&mut self) -> Option<String> {
        let mut text = String::new();
        while self.cursor < self.tokens.len() && self.tokens[self.cursor].is_trivia() {
            text.push_str(&self.tokens[self.cursor].text);
            self.line += newlines(&self.tokens[self.cursor].text);
            self.cursor += 1;
        }
        self.lookahead = self.cursor;
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// The exact text of everything not yet consumed. Used by the parser to
    /// keep trailing trivia that no construct claimed.
    pub fn take_remaining_text(&mut self) -> Option<String> {
        if self.cursor >= self.tokens.len() {
            return None;
        }
        let mut text = String::new();
        while self.cursor < self.tokens.len() {
            text.push_str(&self.tokens[self.cursor].text);
            self.cursor += 1;
        }
        self.lookahead = self.cursor;
        Some(text)
    }

    /// Advance the lookahead until `symbol` is found, honoring `()`, `{}`,
    /// and `[]` nesting. Returns whether the symbol was found.
    pub fn peek_past(&mut self, symbol: &str) -> bool {
        while let Some(token) = self.peek() {
            if token.is_symbol_eq(symbol) {
                return true;
            }
            if token.is_symbol_eq("(") {
                self.peek_past(")");
            } else if token.is_symbol_eq("{") {
                self.peek_past("}");
            } else if token.is_symbol_eq("[") {
                self.peek_past("]");
            }
        }
        false
    }

    /// Consume and return all tokens up to and including the first of
    /// `symbols`, honoring `()`, `{}`, and `[]` nesting. Trivia is kept.
    pub fn seek_to(&mut self, symbols: &[&str]) -> Vec<Token> {
        let mut skipped = Vec::new();
        while let Some(token) = self.next_token(false) {
            if token.is_symbol_of(symbols) {
                skipped.push(token);
                return skipped;
            }
            let nested_close = if token.is_symbol_eq("(") {
                Some(")")
            } else if token.is_symbol_eq("{") {
                Some("}")
            } else if token.is_symbol_eq("[") {
                Some("]")
            } else {
                None
            };
            skipped.push(token);
            if let Some(close) = nested_close {
                skipped.extend(self.seek_to(&[close]));
            }
        }
        skipped
    }

    /// Seek past `symbols` and report the skipped span as a syntax error.
    pub fn syntax_error(&mut self, symbols: Option<&[&str]>, ending: bool) -> Vec<Token> {
        let line = self.line;
        let skipped = match symbols {
            Some(symbols) => self.seek_to(symbols),
            None => Vec::new(),
        };
        if self.ui.is_some() {
            let mut message = format!("IDL SYNTAX ERROR LINE: {line} - ");
            if ending {
                message.push_str("expected \";\" ");
            }
            let trim_last = match skipped.last() {
                Some(last) => last.is_symbol_eq(";") || (skipped.len() > 1 && last.is_symbol_eq("}")),
                None => false,
            };
            let skip = if trim_last {
                &skipped[..skipped.len() - 1]
            } else {
                &skipped[..]
            };
            match symbols {
                Some(_) => {
                    if !skip.is_empty() {
                        let text: String = skip.iter().map(|t| t.text.as_str()).collect();
                        self.warn(&format!("{message}skipped: \"{text}\"\n"));
                    }
                }
                None => self.warn(&format!("{message}\n")),
            }
        }
        skipped
    }

    /// Report a non-syntax error at the current line.
    pub fn report_error(&mut self, message: &str) {
        let line = self.line;
        self.warn(&format!("IDL ERROR LINE: {line} - {message}\n"));
    }

    /// Report legacy content that was accepted and ignored.
    pub fn did_ignore(&mut self, ignored: &str) {
        let line = self.line;
        self.note(&format!("IGNORED LEGACY IDL LINE: {line} - \"{ignored}\"\n"));
    }

    fn warn(&mut self, message: &str) {
        if let Some(ui) = self.ui.as_deref_mut() {
            ui.warn(message);
        }
    }

    fn note(&mut self, message: &str) {
        if let Some(ui) = self.ui.as_deref_mut() {
            ui.note(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> TokenStream<'static> {
        TokenStream::new(text, None)
    }

    #[test]
    fn test_peek_skips_trivia_without_consuming() {
        let mut tokens = stream("  /* c */ interface Foo");
        let first = tokens.peek().unwrap();
        assert!(first.is_symbol_eq("interface"));
        let second = tokens.peek().unwrap();
        assert!(second.is_identifier_eq("Foo"));
        // Nothing was consumed.
        assert_eq!(tokens.whitespace().unwrap(), "  /* c */ ");
        assert!(tokens.next_token(true).unwrap().is_symbol_eq("interface"));
    }

    #[test]
    fn test_mark_resolve_rewinds() {
        let mut tokens = stream("interface Foo {");
        let mark = tokens.mark();
        assert!(tokens.peek().unwrap().is_symbol_eq("interface"));
        assert!(tokens.peek().unwrap().is_identifier_eq("Foo"));
        assert!(!tokens.resolve(mark, false));
        // The lookahead rewound to the start.
        assert!(tokens.peek().unwrap().is_symbol_eq("interface"));
    }

    #[test]
    fn test_sneak_peek_holds_position() {
        let mut tokens = stream("a b");
        assert!(tokens.sneak_peek().unwrap().is_identifier_eq("a"));
        assert!(tokens.sneak_peek().unwrap().is_identifier_eq("a"));
        assert!(tokens.peek().unwrap().is_identifier_eq("a"));
        assert!(tokens.sneak_peek().unwrap().is_identifier_eq("b"));
    }

    #[test]
    fn test_restore_returns_last_token() {
        let mut tokens = stream("one two");
        let one = tokens.next_token(true).unwrap();
        tokens.restore(one);
        assert!(tokens.next_token(true).unwrap().is_identifier_eq("one"));
    }

    #[test]
    fn test_seek_to_respects_nesting() {
        let mut tokens = stream("a ( ; ) ; rest");
        let skipped = tokens.seek_to(&[";"]);
        let text: String = skipped.iter().map(|t| t.text.as_str()).collect();
        // The semicolon inside the parens does not end the seek.
        assert_eq!(text, "a ( ; ) ;");
        assert!(tokens.next_token(true).unwrap().is_identifier_eq("rest"));
    }

    #[test]
    fn test_peek_past_respects_nesting() {
        let mut tokens = stream("[ a ( ] ) b ] after");
        assert!(tokens.peek().unwrap().is_symbol_eq("["));
        assert!(tokens.peek_past("]"));
        assert!(tokens.peek().unwrap().is_identifier_eq("after"));
    }

    #[test]
    fn test_has_tokens_ignores_trivia() {
        let mut tokens = stream("  // only trivia\n");
        assert!(!tokens.has_tokens());
        assert_eq!(tokens.take_remaining_text().unwrap(), "  // only trivia\n");
        assert!(tokens.take_remaining_text().is_none());
    }

    #[test]
    fn test_line_tracking() {
        let mut tokens = stream("a\nb\nc");
        assert_eq!(tokens.line(), 1);
        tokens.next_token(true);
        tokens.next_token(true);
        assert_eq!(tokens.line(), 2);
        tokens.next_token(true);
        assert_eq!(tokens.line(), 3);
    }
}
