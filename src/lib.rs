//! **cue** - Concept assignment, typicality ranking and representative
//! selection for source code
//!
//! Tree-sitter element location, identifier and comment vocabularies,
//! fuzzy term merging, and kernel density estimates over term vectors.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Analysis engine and CLI handlers
pub mod core {
    /// Engine error taxonomy and exit-code mapping inputs
    pub mod error;
    pub use error::{CueError, CueResult};

    /// Source identities, languages and corpora
    pub mod source;
    pub use source::{Corpus, Lang, Source, SourceId};

    /// Locations and regions (ordered location sets) within one source
    pub mod region;
    pub use region::{Location, Region};

    /// Program elements, identifiers and comments reported by locators
    pub mod outline;
    pub use outline::{ElementKind, ElementLocator, ProgramElement, SourceOutline, locator_for};

    /// Identifier splitting, abbreviation expansion and stop words
    pub mod vocabulary;

    /// Commutative string similarity for merging spelling variants
    pub mod similarity;
    pub use similarity::TermSimilarity;

    /// Weighted term vectors and concept extraction
    pub mod concepts;
    pub use concepts::{ConceptExtractor, TermVector};

    /// Kernel density typicality over a shared term space
    pub mod typicality;
    pub use typicality::{Distance, Kernel, Ranking, TermSpace, TypicalityRanker};

    /// Greedy coverage pick of representative sources
    pub mod representative;
    pub use representative::RepresentativeSelector;

    /// Library entry points
    pub mod introspector;
    pub use introspector::Cue;

    /// CLI handlers and exit codes
    pub mod commands;
    pub use commands::{concepts_run, representative_run, typical_run};
}

/// Language element locators backed by tree-sitter grammars
pub mod parsers {
    /// Shared grammar profile and outline walk
    pub mod grammar;

    /// Java classes, interfaces, enums, records, methods and constructors
    pub mod java_parser;
    pub use java_parser::JavaLocator;

    /// Rust structs, enums, traits and functions
    pub mod rust_parser;
    pub use rust_parser::RustLocator;

    /// Python classes and functions, docstrings as comments
    pub mod python_parser;
    pub use python_parser::PythonLocator;
}

/// Infrastructure - Configuration, I/O, and utilities
pub mod infra {
    /// Configuration management with TOML support and env overrides
    pub mod config;
    pub use config::{AnalysisConfig, Config, init as config_init, load_config};

    /// Memory-mapped file I/O for large files (>1MB threshold)
    pub mod io;
    pub use io::load_source;

    /// CRLF/LF-robust line indexing for line→byte mapping
    pub mod line_index;
    pub use line_index::NewlineIndex;

    /// Gitignore-aware corpus walking
    pub mod walk;
    pub use walk::FileWalker;

    /// Tree-sitter and UTF-8 helpers
    pub mod utils;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use infra::{AnalysisConfig, Config, load_config};

// Core types for external consumers
pub use core::{Corpus, Cue, CueError, CueResult, Lang, Location, Region, Source, SourceId};
