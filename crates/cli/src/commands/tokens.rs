use std::fs;
use std::path::Path;

use kpl_core::{CompileError, TokenKind};

use crate::OutputFormat;

pub(crate) fn cmd_tokens(file: &Path, output: OutputFormat, quiet: bool) {
    let filename = file.display().to_string();
    let src = match fs::read_to_string(file) {
        Ok(src) => src,
        Err(e) => super::fail(&CompileError::io(&filename, e.to_string()), output, quiet),
    };
    let tokens = match kpl_core::lex(&src, &filename) {
        Ok(tokens) => tokens,
        Err(e) => super::fail(&e, output, quiet),
    };

    match output {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = tokens
                .iter()
                .filter(|t| !matches!(t.kind, TokenKind::Eof))
                .map(|t| {
                    serde_json::json!({
                        "line": t.line,
                        "col": t.col,
                        "token": t.kind.to_string(),
                    })
                })
                .collect();
            let pretty = serde_json::to_string_pretty(&rows)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for t in tokens.iter().filter(|t| !matches!(t.kind, TokenKind::Eof)) {
                println!("{}:{}\t{}", t.line, t.col, t.kind);
            }
        }
    }
}
