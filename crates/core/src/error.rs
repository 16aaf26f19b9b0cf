use serde::Serialize;

/// What went wrong. The parser raises these at the offending token's
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    /// The lookahead did not match the token the grammar requires here.
    #[error("missing token: expected {expected}")]
    MissingToken { expected: String },

    #[error("invalid constant")]
    InvalidConstant,

    #[error("invalid type")]
    InvalidType,

    #[error("invalid basic type")]
    InvalidBasicType,

    #[error("invalid statement")]
    InvalidStatement,

    #[error("invalid comparator")]
    InvalidComparator,

    #[error("invalid factor")]
    InvalidFactor,

    #[error("undeclared identifier '{name}'")]
    UndeclaredIdent { name: String },

    /// Raised by the symbol table when a name is declared twice in one scope.
    #[error("duplicate identifier '{name}'")]
    DuplicateIdent { name: String },

    #[error("{message}")]
    Lex { message: String },

    #[error("{message}")]
    Io { message: String },
}

/// A fatal compilation error with its source position. The first error
/// anywhere aborts the run; there is no recovery or accumulation.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{file}:{line}:{col}: {kind}")]
pub struct CompileError {
    #[serde(flatten)]
    pub kind: ErrorKind,
    pub file: String,
    pub line: u32,
    pub col: u32,
}

impl CompileError {
    pub fn new(kind: ErrorKind, file: &str, line: u32, col: u32) -> Self {
        CompileError {
            kind,
            file: file.to_owned(),
            line,
            col,
        }
    }

    pub fn lex(file: &str, line: u32, col: u32, message: impl Into<String>) -> Self {
        CompileError::new(
            ErrorKind::Lex {
                message: message.into(),
            },
            file,
            line,
            col,
        )
    }

    pub fn io(file: &str, message: impl Into<String>) -> Self {
        CompileError::new(
            ErrorKind::Io {
                message: message.into(),
            },
            file,
            0,
            0,
        )
    }

    /// JSON view for `--output json` callers. Carries the structured kind
    /// fields plus the rendered message.
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "message".to_owned(),
                serde_json::Value::String(self.to_string()),
            );
        }
        value
    }
}
