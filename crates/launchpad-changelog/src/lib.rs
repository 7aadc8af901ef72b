//! Launchpad Changelog - Changelog generation for release management
//!
//! This crate parses conventional commit subjects, groups them into ordered
//! changelog sections and renders them as Markdown or flat release notes.

pub mod aggregator;
pub mod formatter;
pub mod generator;
pub mod parser;
pub mod types;
pub mod writer;

pub use aggregator::ChangelogAggregator;
pub use formatter::{ChangelogFormatter, FormatterRegistry, MarkdownFormatter, ReleaseNotesFormatter};
pub use generator::ChangelogGenerator;
pub use parser::{parse_subject, CommitParser, ConventionalParser, ParserConfig};
pub use types::{Changelog, ChangelogSection, CommitRecord, SectionKind};
pub use writer::prepend_to_file;
