use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::line::{parse_declaration, Line};
use crate::syntax::{BlockPolicy, Syntax};
use crate::template::Template;

/// An ordered sequence of makefile entries.
///
/// Entry order is declaration order in the rendered text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Makefile {
    pub entries: Vec<Entry>,
}

/// A code block being collected, with the 1-based line it opened on.
struct OpenBlock {
    text: String,
    line: usize,
}

impl Makefile {
    /// Wrap an existing entry list.
    pub fn new(entries: Vec<Entry>) -> Self {
        Makefile { entries }
    }

    /// Parse makefile text using the default [`Syntax`].
    ///
    /// # Examples
    ///
    /// ```
    /// use makefile_generator::{EntryKind, Makefile};
    ///
    /// let input = "\
    /// CC=gcc
    /// build: main.o ## Build the app
    /// \t$(CC) -o app main.o";
    /// let makefile = Makefile::parse(input).unwrap();
    /// assert_eq!(makefile.entries.len(), 2);
    /// assert_eq!(makefile.entries[0].kind(), EntryKind::Variable);
    /// assert_eq!(makefile.entries[1].name(), "build");
    /// assert_eq!(makefile.entries[1].recipe_lines(), ["$(CC) -o app main.o"]);
    /// assert_eq!(makefile.render(), input);
    /// ```
    pub fn parse(input: &str) -> Result<Makefile> {
        Makefile::parse_with(input, &Syntax::default())
    }

    /// Parse makefile text with explicit separators and block policy.
    ///
    /// Lines are split on `\n` and handled in a single forward pass. A
    /// blank line becomes an unnamed target, which renders back as a
    /// blank line.
    pub fn parse_with(input: &str, syntax: &Syntax) -> Result<Makefile> {
        if input.is_empty() {
            return Ok(Makefile::default());
        }

        let mut entries = Vec::new();
        // Receives the recipe lines that follow it.
        let mut current: Option<Entry> = None;
        let mut block: Option<OpenBlock> = None;

        for (index, line) in input.split('\n').enumerate() {
            let number = index + 1;

            let kind = Line::classify(line, syntax);

            if let Some(open) = block.as_mut() {
                open.text.push_str(line);
                if kind == Line::Close {
                    let raw = std::mem::take(&mut open.text);
                    emit(&mut entries, &mut current, Entry::code_block(raw));
                    block = None;
                } else {
                    open.text.push('\n');
                }
                continue;
            }

            match kind {
                Line::Open => {
                    block = Some(OpenBlock {
                        text: format!("{line}\n"),
                        line: number,
                    });
                }
                Line::Recipe(command) => match current.as_mut() {
                    Some(entry) => entry.append_recipe_line(command),
                    None => return Err(Error::OrphanRecipe { line: number }),
                },
                Line::Comment(text) => {
                    emit(&mut entries, &mut current, Entry::comment_line(text));
                }
                // An `endif` with no open block is declared like any other line.
                Line::Close => {
                    emit(&mut entries, &mut current, parse_declaration(line, syntax));
                }
                Line::Declaration(text) => {
                    emit(&mut entries, &mut current, parse_declaration(text, syntax));
                }
            }
        }

        entries.extend(current);

        if let Some(open) = block {
            match syntax.unterminated_block {
                BlockPolicy::Reject => return Err(Error::UnterminatedBlock { line: open.line }),
                BlockPolicy::Discard => {
                    warn!(line = open.line, "discarding unterminated code block");
                }
                BlockPolicy::Keep => {
                    let text = open.text.strip_suffix('\n').unwrap_or(open.text.as_str());
                    entries.push(Entry::code_block(text));
                }
            }
        }

        debug!(entries = entries.len(), "parsed makefile");
        Ok(Makefile { entries })
    }

    /// Render the entries back to makefile text using the default [`Syntax`].
    pub fn render(&self) -> String {
        self.render_with(&Syntax::default())
    }

    /// Render the entries back to makefile text.
    ///
    /// Placeholders (unnamed targets and variables) become blank lines,
    /// recipe included. Recipe lines get their tab back, and a recipe line
    /// holding embedded newlines is emitted as one command per non-empty
    /// line. The result is trimmed.
    pub fn render_with(&self, syntax: &Syntax) -> String {
        let mut out = String::new();

        for entry in &self.entries {
            match entry {
                _ if entry.is_placeholder() => {
                    if !entry.recipe_lines().is_empty() {
                        warn!(
                            lines = entry.recipe_lines().len(),
                            "dropping recipe of unnamed entry"
                        );
                    }
                }
                Entry::Variable(rule) => {
                    out.push_str(&rule.name);
                    out.push_str(&syntax.variable_separator);
                    out.push_str(&rule.dependents);
                    render_comment(&mut out, &rule.comment, syntax);
                }
                Entry::Target(rule) => {
                    out.push_str(&rule.name);
                    out.push_str(&syntax.target_separator);
                    if !rule.dependents.is_empty() {
                        out.push(' ');
                        out.push_str(&rule.dependents);
                    }
                    render_comment(&mut out, &rule.comment, syntax);
                }
                Entry::CodeBlock { raw, .. } => out.push_str(raw),
                Entry::Comment { text, .. } => out.push_str(text),
            }
            if !entry.is_placeholder() {
                render_recipe(&mut out, entry.recipe_lines());
            }
            out.push('\n');
        }

        debug!(entries = self.entries.len(), bytes = out.len(), "rendered makefile");
        out.trim().to_string()
    }

    /// Append an entry at the end.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Append an empty target row.
    pub fn add_blank(&mut self) {
        self.entries.push(Entry::default());
    }

    /// Append the entries of a template.
    pub fn add_template(&mut self, template: Template) {
        self.entries.extend(template.entries());
    }

    /// Prepend `default: help` and a `help` target listing the `##` comments.
    pub fn add_help_target(&mut self) {
        let mut entries = Template::Help.entries();
        entries.append(&mut self.entries);
        self.entries = entries;
    }

    /// Remove and return the entry at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<Entry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Swap the entry at `index` with the one before it.
    ///
    /// Returns `false` when there is nothing to move.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index - 1, index);
        true
    }

    /// Swap the entry at `index` with the one after it.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }
}

/// Push `entry` as the new recipe owner, flushing the previous one.
fn emit(entries: &mut Vec<Entry>, current: &mut Option<Entry>, entry: Entry) {
    entries.extend(current.replace(entry));
}

/// ` ## comment` suffix of a declaration line.
fn render_comment(out: &mut String, comment: &str, syntax: &Syntax) {
    if !comment.is_empty() {
        out.push(' ');
        out.push_str(&syntax.comment_separator);
        out.push(' ');
        out.push_str(comment);
    }
}

/// One tab-indented line per command. Lines already starting with a tab
/// are written as they are.
fn render_recipe(out: &mut String, recipe: &[String]) {
    for command in recipe
        .iter()
        .flat_map(|line| line.split('\n'))
        .filter(|command| !command.is_empty())
    {
        out.push('\n');
        if !command.starts_with('\t') {
            out.push('\t');
        }
        out.push_str(command);
    }
}

impl FromStr for Makefile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Makefile::parse(s)
    }
}

impl fmt::Display for Makefile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Vec<Entry>> for Makefile {
    fn from(entries: Vec<Entry>) -> Self {
        Makefile { entries }
    }
}
