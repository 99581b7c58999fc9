//! Argument lists and the argument-name grammar.

use crate::constructs::argument::Argument;
use crate::constructs::Construct;
use crate::markup::MarkupGenerator;
use crate::productions::terminals::{Identifier, Symbol};
use crate::productions::{impl_display_via_production, Frame, Production};
use crate::tokenizer::TokenStream;

/// Keywords that are nevertheless legal argument names.
const ARGUMENT_NAME_KEYWORDS: [&str; 23] = [
    "async",
    "attribute",
    "callback",
    "const",
    "constructor",
    "deleter",
    "dictionary",
    "enum",
    "getter",
    "includes",
    "inherit",
    "interface",
    "iterable",
    "maplike",
    "namespace",
    "partial",
    "required",
    "setlike",
    "setter",
    "static",
    "stringifier",
    "typedef",
    "unrestricted",
];

/// `Identifier | ArgumentNameKeyword`
#[derive(Debug, Clone)]
pub struct ArgumentName {
    frame: Frame,
    name: Identifier,
}

impl ArgumentName {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = tokens
            .peek()
            .is_some_and(|t| t.is_identifier() || t.is_symbol_of(&ARGUMENT_NAME_KEYWORDS));
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let name = Identifier::parse(tokens);
        frame.did_parse(tokens, true);
        ArgumentName { frame, name }
    }

    pub fn name(&self) -> &str {
        self.name.name()
    }
}

impl Production for ArgumentName {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        self.name.write(out);
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        self.name.define_markup(generator);
        &self.frame
    }
}

/// `Argument ["," Argument]...`
///
/// An `ArgumentList` that matches nothing is empty, not an error.
#[derive(Debug, Clone)]
pub struct ArgumentList {
    frame: Frame,
    arguments: Vec<Argument>,
    commas: Vec<Symbol>,
}

impl ArgumentList {
    pub fn peek(tokens: &mut TokenStream) -> bool {
        let mark = tokens.mark();
        let matched = if Argument::peek(tokens) {
            let after_argument = tokens.mark();
            match tokens.peek() {
                Some(token) if token.is_symbol_eq(",") => {
                    let rest = ArgumentList::peek(tokens);
                    tokens.resolve(after_argument, rest)
                }
                _ => {
                    tokens.resolve(after_argument, false);
                    true
                }
            }
        } else {
            false
        };
        tokens.resolve(mark, matched)
    }

    pub fn parse(tokens: &mut TokenStream) -> Self {
        let mut frame = Frame::begin(tokens);
        let mut arguments: Vec<Argument> = Vec::new();
        let mut commas = Vec::new();
        if !ArgumentList::peek(tokens) {
            return ArgumentList {
                frame,
                arguments,
                commas,
            };
        }
        arguments.push(Argument::parse(tokens));
        while tokens.sneak_peek().is_some_and(|t| t.is_symbol_eq(",")) {
            commas.push(Symbol::parse(tokens, ","));
            let argument = Argument::parse(tokens);
            if let Some(last) = arguments.last() {
                if last.is_variadic() {
                    let message = format!(
                        "Argument \"{}\" not allowed to follow variadic argument \"{}\"",
                        argument.name().unwrap_or_default(),
                        last.name().unwrap_or_default()
                    );
                    tokens.report_error(&message);
                } else if !last.is_required() && argument.is_required() {
                    let message = format!(
                        "Required argument \"{}\" cannot follow optional argument \"{}\"",
                        argument.name().unwrap_or_default(),
                        last.name().unwrap_or_default()
                    );
                    tokens.report_error(&message);
                }
            }
            arguments.push(argument);
        }
        frame.did_parse(tokens, true);
        ArgumentList {
            frame,
            arguments,
            commas,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub(crate) fn arguments_mut(&mut self) -> &mut [Argument] {
        &mut self.arguments
    }

    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&Argument> {
        self.arguments
            .iter()
            .find(|a| a.name().as_deref() == Some(name))
    }

    pub fn find_all(&self, name: &str) -> Vec<&Argument> {
        self.arguments
            .iter()
            .filter(|a| a.name().as_deref() == Some(name))
            .collect()
    }

    /// Every normalized spelling of this argument list, full form first.
    /// The full form joins declared names with `", "` (variadic arguments
    /// prefixed by `...`); shorter forms drop trailing optional or variadic
    /// arguments one at a time.
    pub fn argument_names(&self) -> Vec<String> {
        if self.arguments.is_empty() {
            return vec![String::new()];
        }
        let mut remaining: Vec<&Argument> = self.arguments.iter().collect();
        let mut names = Vec::new();
        let full: Vec<String> = remaining
            .iter()
            .filter_map(|argument| {
                argument.name().map(|name| {
                    if argument.is_variadic() {
                        format!("...{name}")
                    } else {
                        name
                    }
                })
            })
            .collect();
        names.push(full.join(", "));
        while remaining
            .last()
            .is_some_and(|argument| argument.is_optional() || argument.is_variadic())
        {
            remaining.pop();
            let shorter: Vec<String> = remaining
                .iter()
                .filter_map(|argument| argument.name())
                .collect();
            names.push(shorter.join(", "));
        }
        names
    }

    /// Whether the given names could call this argument list: every named
    /// position matches, and every unnamed position is optional.
    pub fn matches_names(&self, argument_names: &[String]) -> bool {
        for index in 0..argument_names.len().max(self.arguments.len()) {
            match (argument_names.get(index), self.arguments.get(index)) {
                (Some(name), argument) if !name.is_empty() => {
                    if argument.and_then(|a| a.name()).as_deref() != Some(name.as_str()) {
                        return false;
                    }
                }
                (_, Some(argument)) => {
                    if argument.is_required() {
                        return false;
                    }
                }
                _ => {}
            }
        }
        true
    }
}

impl Production for ArgumentList {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn write_inner(&self, out: &mut String) {
        for index in 0..self.arguments.len().max(self.commas.len()) {
            if let Some(argument) = self.arguments.get(index) {
                argument.write(out);
            }
            if let Some(comma) = self.commas.get(index) {
                comma.write(out);
            }
        }
    }

    fn markup_inner<'a>(&'a self, generator: &mut MarkupGenerator<'a>) -> &'a Frame {
        for index in 0..self.arguments.len().max(self.commas.len()) {
            if let Some(argument) = self.arguments.get(index) {
                argument.define_markup(generator);
            }
            if let Some(comma) = self.commas.get(index) {
                generator.add_text(&comma.text());
            }
        }
        &self.frame
    }
}

impl_display_via_production!(ArgumentName, ArgumentList);

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(text: &str) -> TokenStream<'static> {
        TokenStream::new(text, None)
    }

    fn parse_list(source: &str) -> ArgumentList {
        let mut tokens = stream(source);
        ArgumentList::parse(&mut tokens)
    }

    #[test]
    fn test_round_trip() {
        let source = "short x, unsigned long long y, optional double inf = Infinity";
        assert_eq!(parse_list(source).text(), source);
    }

    #[test]
    fn test_argument_names_with_optionals() {
        let list = parse_list("long x, optional long y");
        assert_eq!(list.argument_names(), vec!["x, y", "x"]);
    }

    #[test]
    fn test_argument_names_with_variadic() {
        let list = parse_list("short x, optional double y, sequence<Foo>... rest");
        assert_eq!(list.argument_names(), vec!["x, y, ...rest", "x, y", "x"]);
    }

    #[test]
    fn test_keyword_argument_names() {
        let list = parse_list("long async, any constructor");
        assert_eq!(list.argument_names()[0], "async, constructor");
    }

    #[test]
    fn test_matches_names() {
        let list = parse_list("long x, optional long y");
        assert!(list.matches_names(&["x".to_string(), "y".to_string()]));
        assert!(list.matches_names(&["x".to_string()]));
        assert!(!list.matches_names(&["z".to_string()]));
        assert!(!list.matches_names(&[]));
    }

    #[test]
    fn test_empty_list() {
        let list = parse_list("");
        assert!(list.is_empty());
        assert_eq!(list.argument_names(), vec![""]);
        assert!(list.matches_names(&[]));
    }
}
