//! Structured Makefile entries and a converter between them and Makefile
//! text.
//!
//! A makefile is modelled as an ordered list of [`Entry`] values: targets,
//! variables, comment lines and verbatim `if`/`define` blocks. This crate
//! parses text into that list and renders the list back, so a form-driven
//! editor can work on records while users import and export plain text.
//!
//! # Overview
//!
//! The converter tokenizes surface syntax only. It does not expand
//! variables, evaluate conditionals or build a dependency graph. Rendering
//! canonicalizes whitespace around separators and re-indents recipes with
//! a tab; otherwise `parse` and `render` are inverses of each other.
//!
//! # Examples
//!
//! Parse and edit a makefile:
//!
//! ```
//! use makefile_generator::{Entry, Makefile};
//!
//! let input = "\
//! # Tooling
//! CC=gcc
//! build: main.c ## Compile
//! \t$(CC) -o app main.c";
//! let mut makefile = Makefile::parse(input).unwrap();
//! assert_eq!(makefile.entries[2].comment(), "Compile");
//!
//! let mut test = Entry::target("test", "build").with_comment("Run tests");
//! test.append_recipe_line("./app --self-test");
//! makefile.push(test);
//!
//! assert_eq!(
//!     makefile.render(),
//!     "# Tooling\nCC=gcc\nbuild: main.c ## Compile\n\t$(CC) -o app main.c\n\
//!      test: build ## Run tests\n\t./app --self-test"
//! );
//! ```

mod entry;
mod error;
mod example;
mod line;
mod makefile;
mod store;
mod syntax;
mod template;

// Re-export public types
pub use entry::{Entry, EntryKind, Rule};
pub use error::{Error, Result};
pub use example::{load_examples, Example};
pub use makefile::Makefile;
pub use store::{export_json, import_json, JsonFileStore, MakefileStore, MemoryStore, SavedMakefile};
pub use syntax::{BlockPolicy, Syntax};
pub use template::Template;
