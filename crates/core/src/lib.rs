//! kpl-core: front end for the KPL teaching language.
//!
//! Lexing, single-lookahead recursive-descent parsing with symbol-table
//! semantic actions, and rendering of the resulting object tree. All errors
//! are fatal: the first one anywhere aborts the compilation with a single
//! positioned diagnostic.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`compile_file()`] / [`compile_source()`] -- read, lex and parse
//! - [`Object`] -- a symbol-table entry; the parse result is the Program
//!   object owning the whole declaration tree
//! - [`CompileError`] -- positioned fatal error
//! - [`render_text()`] / [`to_json()`] -- object-tree rendering

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod symtab;

use std::fs;
use std::path::Path;

// ── Convenience re-exports ───────────────────────────────────────────

pub use error::{CompileError, ErrorKind};
pub use lexer::{lex, Token, TokenKind};
pub use parser::parse;
pub use printer::{render_text, to_json};
pub use symtab::{ConstantValue, Object, ObjectKind, Scope, SymTab, Type};

/// Lex and parse a source string, returning the Program object or the
/// first error encountered.
pub fn compile_source(src: &str, filename: &str) -> Result<Object, CompileError> {
    let tokens = lexer::lex(src, filename)?;
    parser::parse(&tokens, filename)
}

/// Read, lex and parse a source file.
pub fn compile_file(path: &Path) -> Result<Object, CompileError> {
    let filename = path.display().to_string();
    let src = fs::read_to_string(path).map_err(|e| CompileError::io(&filename, e.to_string()))?;
    compile_source(&src, &filename)
}
