use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The kind of a makefile [`Entry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// `name: dependencies` with an optional recipe.
    #[default]
    Target,
    /// `NAME=value` assignment.
    Variable,
    /// Verbatim `if`/`define` ... `endif`/`endef` span.
    CodeBlock,
    /// A whole `#` line.
    Comment,
}

impl FromStr for EntryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "target" => Ok(EntryKind::Target),
            "variable" => Ok(EntryKind::Variable),
            "code_block" => Ok(EntryKind::CodeBlock),
            "comment" => Ok(EntryKind::Comment),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            EntryKind::Target => "target",
            EntryKind::Variable => "variable",
            EntryKind::CodeBlock => "code_block",
            EntryKind::Comment => "comment",
        };
        f.pad(s)
    }
}

/// Declaration line plus recipe shared by targets and variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    /// Target or variable name.
    pub name: String,
    /// Dependency list of a target, right-hand side of a variable.
    pub dependents: String,
    /// Command lines, stored without their leading tab.
    pub recipe: Vec<String>,
    /// Trailing `## comment` text.
    pub comment: String,
}

impl Rule {
    /// Create a rule with no recipe.
    pub fn new(name: impl Into<String>, dependents: impl Into<String>) -> Self {
        Rule {
            name: name.into(),
            dependents: dependents.into(),
            ..Rule::default()
        }
    }
}

/// One logical unit of a makefile.
///
/// Each variant carries only the fields meaningful for it. The flat
/// accessors ([`Entry::name`], [`Entry::comment`], ...) return an empty
/// value for fields the kind does not have.
///
/// Comments and code blocks may interrupt a recipe. Command lines that
/// follow them are kept on the comment or block so they render back in
/// place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    /// A build target.
    Target(Rule),
    /// A variable assignment.
    Variable(Rule),
    /// A verbatim conditional or macro definition, from the opening line
    /// through the closing line inclusive.
    CodeBlock {
        /// Block text, lines joined with `\n`, no trailing newline.
        raw: String,
        /// Command lines following the closing line.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        recipe: Vec<String>,
    },
    /// A full comment line, including its `#` marker.
    Comment {
        /// The line verbatim.
        text: String,
        /// Command lines following the comment.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        recipe: Vec<String>,
    },
}

impl Default for Entry {
    fn default() -> Self {
        Entry::Target(Rule::default())
    }
}

impl Entry {
    /// Build an entry of the given kind from the flat field view.
    ///
    /// For [`EntryKind::Comment`] the `comment` argument becomes the whole
    /// line; `name` and `dependents` are ignored. A
    /// [`EntryKind::CodeBlock`] starts out empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use makefile_generator::{Entry, EntryKind};
    ///
    /// let entry = Entry::new(EntryKind::Target, "test", "build", "Run tests");
    /// assert_eq!(entry.name(), "test");
    /// assert_eq!(entry.dependents(), "build");
    /// assert_eq!(entry.comment(), "Run tests");
    /// ```
    pub fn new(
        kind: EntryKind,
        name: impl Into<String>,
        dependents: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        match kind {
            EntryKind::Target => Entry::Target(Rule {
                comment: comment.into(),
                ..Rule::new(name, dependents)
            }),
            EntryKind::Variable => Entry::Variable(Rule {
                comment: comment.into(),
                ..Rule::new(name, dependents)
            }),
            EntryKind::CodeBlock => Entry::code_block(""),
            EntryKind::Comment => Entry::comment_line(comment),
        }
    }

    /// A target with no recipe or comment.
    pub fn target(name: impl Into<String>, dependents: impl Into<String>) -> Self {
        Entry::Target(Rule::new(name, dependents))
    }

    /// A variable assignment with no comment.
    pub fn variable(name: impl Into<String>, value: impl Into<String>) -> Self {
        Entry::Variable(Rule::new(name, value))
    }

    /// A comment line; `text` keeps its `#` marker.
    pub fn comment_line(text: impl Into<String>) -> Self {
        Entry::Comment {
            text: text.into(),
            recipe: Vec::new(),
        }
    }

    /// A verbatim block, opening through closing line.
    pub fn code_block(raw: impl Into<String>) -> Self {
        Entry::CodeBlock {
            raw: raw.into(),
            recipe: Vec::new(),
        }
    }

    /// Set the trailing comment of a target or variable.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        if let Some(rule) = self.rule_mut() {
            rule.comment = comment.into();
        }
        self
    }

    /// Append a command line to the recipe.
    ///
    /// Lines accumulate in call order.
    pub fn append_recipe_line(&mut self, line: impl Into<String>) {
        self.recipe_mut().push(line.into());
    }

    /// The command lines attached to this entry.
    pub fn recipe_mut(&mut self) -> &mut Vec<String> {
        match self {
            Entry::Target(rule) | Entry::Variable(rule) => &mut rule.recipe,
            Entry::CodeBlock { recipe, .. } | Entry::Comment { recipe, .. } => recipe,
        }
    }

    /// The variant tag.
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::Target(_) => EntryKind::Target,
            Entry::Variable(_) => EntryKind::Variable,
            Entry::CodeBlock { .. } => EntryKind::CodeBlock,
            Entry::Comment { .. } => EntryKind::Comment,
        }
    }

    /// The rule of a target or variable.
    pub fn rule(&self) -> Option<&Rule> {
        match self {
            Entry::Target(rule) | Entry::Variable(rule) => Some(rule),
            _ => None,
        }
    }

    /// Mutable access to the rule of a target or variable.
    pub fn rule_mut(&mut self) -> Option<&mut Rule> {
        match self {
            Entry::Target(rule) | Entry::Variable(rule) => Some(rule),
            _ => None,
        }
    }

    /// Target or variable name; empty for other kinds.
    pub fn name(&self) -> &str {
        self.rule().map_or("", |r| r.name.as_str())
    }

    /// Dependencies of a target or value of a variable.
    pub fn dependents(&self) -> &str {
        self.rule().map_or("", |r| r.dependents.as_str())
    }

    /// Command lines in order, without their leading tab.
    pub fn recipe_lines(&self) -> &[String] {
        match self {
            Entry::Target(rule) | Entry::Variable(rule) => &rule.recipe,
            Entry::CodeBlock { recipe, .. } | Entry::Comment { recipe, .. } => recipe,
        }
    }

    /// Trailing comment of a rule, or the whole line of a comment entry.
    pub fn comment(&self) -> &str {
        match self {
            Entry::Target(rule) | Entry::Variable(rule) => &rule.comment,
            Entry::Comment { text, .. } => text,
            Entry::CodeBlock { .. } => "",
        }
    }

    /// Verbatim text of a code block; empty for other kinds.
    pub fn raw_block(&self) -> &str {
        match self {
            Entry::CodeBlock { raw, .. } => raw,
            _ => "",
        }
    }

    /// Whether this is an unnamed target or variable.
    ///
    /// Placeholders are editor rows not yet filled in; they render as a
    /// blank line.
    pub fn is_placeholder(&self) -> bool {
        self.rule().is_some_and(|r| r.name.is_empty())
    }
}
