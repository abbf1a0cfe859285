use winnow::combinator::{alt, preceded};
use winnow::prelude::*;
use winnow::token::rest;

use crate::entry::{Entry, Rule};
use crate::syntax::Syntax;

/// A source line classified by its leading characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// Opens a code block (`if...`, `define...`).
    Open,
    /// Closes a code block (`endif...`, `endef...`).
    Close,
    /// Tab-indented command. The tab is stripped unless the line is
    /// indented further, in which case it is kept whole so rendering
    /// writes it back unchanged.
    Recipe(&'a str),
    /// `#` line, verbatim.
    Comment(&'a str),
    /// Target or variable declaration.
    Declaration(&'a str),
}

impl<'a> Line<'a> {
    /// Classify a single line (without its `\n`).
    ///
    /// Block keywords only count when the line holds no target or variable
    /// separator, so `ifdef: x` stays a target.
    pub(crate) fn classify(line: &'a str, syntax: &Syntax) -> Line<'a> {
        let mut input = line;
        if let Ok(fence) = block_fence.parse_next(&mut input) {
            if !syntax.has_separator(line) {
                return fence;
            }
        }

        let mut input = line;
        line_body
            .parse_next(&mut input)
            .unwrap_or(Line::Declaration(line))
    }
}

// Winnow parsers

fn block_fence(input: &mut &str) -> ModalResult<Line<'static>> {
    alt((
        alt(("endif", "endef")).value(Line::Close),
        alt(("if", "define")).value(Line::Open),
    ))
    .parse_next(input)
}

fn line_body<'s>(input: &mut &'s str) -> ModalResult<Line<'s>> {
    alt((
        ("\t\t", rest).take().map(Line::Recipe),
        preceded('\t', rest).map(Line::Recipe),
        ('#', rest).take().map(Line::Comment),
        rest.map(Line::Declaration),
    ))
    .parse_next(input)
}

/// Split on the first occurrence of `delimiter`.
///
/// Further occurrences stay in the right half; a missing delimiter leaves
/// the right half empty.
pub(crate) fn split_two<'a>(text: &'a str, delimiter: &str) -> (&'a str, &'a str) {
    text.split_once(delimiter).unwrap_or((text, ""))
}

/// Turn a declaration line into a target or variable entry.
///
/// The line is a variable when the part before the comment separator
/// contains the variable separator anywhere, otherwise a target.
pub(crate) fn parse_declaration(line: &str, syntax: &Syntax) -> Entry {
    let (left, comment) = split_two(line, &syntax.comment_separator);
    let is_variable = left.contains(syntax.variable_separator.as_str());
    let separator = if is_variable {
        &syntax.variable_separator
    } else {
        &syntax.target_separator
    };
    let (name, dependents) = split_two(left, separator);

    let rule = Rule {
        name: name.to_string(),
        dependents: dependents.trim().to_string(),
        recipe: Vec::new(),
        comment: comment.trim().to_string(),
    };
    if is_variable {
        Entry::Variable(rule)
    } else {
        Entry::Target(rule)
    }
}
