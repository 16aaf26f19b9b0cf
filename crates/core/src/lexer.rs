use crate::error::CompileError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier — keywords are split off during lexing
    Ident(String),
    /// Unsigned integer literal
    Number(i64),
    /// Character literal (content without quotes)
    CharLit(char),
    // Keywords (recognized case-insensitively)
    Program,
    Const,
    Type,
    Var,
    Function,
    Procedure,
    Begin,
    End,
    Call,
    If,
    Then,
    Else,
    While,
    Do,
    For,
    To,
    Of,
    Array,
    Integer,
    Char,
    // Symbols
    Plus,
    Minus,
    Times,
    Slash,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Assign,
    Period,
    Comma,
    Semicolon,
    Colon,
    // End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Ident(name) => return write!(f, "identifier '{}'", name),
            TokenKind::Number(n) => return write!(f, "number {}", n),
            TokenKind::CharLit(c) => return write!(f, "character '{}'", c),
            TokenKind::Program => "PROGRAM",
            TokenKind::Const => "CONST",
            TokenKind::Type => "TYPE",
            TokenKind::Var => "VAR",
            TokenKind::Function => "FUNCTION",
            TokenKind::Procedure => "PROCEDURE",
            TokenKind::Begin => "BEGIN",
            TokenKind::End => "END",
            TokenKind::Call => "CALL",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::For => "FOR",
            TokenKind::To => "TO",
            TokenKind::Of => "OF",
            TokenKind::Array => "ARRAY",
            TokenKind::Integer => "INTEGER",
            TokenKind::Char => "CHAR",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Times => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Eq => "'='",
            TokenKind::Neq => "'<>'",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Assign => "':='",
            TokenKind::Period => "'.'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(s)
    }
}

/// One lexical token with its 1-based source position.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub col: u32,
}

fn keyword(word: &str) -> Option<TokenKind> {
    match word.to_ascii_uppercase().as_str() {
        "PROGRAM" => Some(TokenKind::Program),
        "CONST" => Some(TokenKind::Const),
        "TYPE" => Some(TokenKind::Type),
        "VAR" => Some(TokenKind::Var),
        "FUNCTION" => Some(TokenKind::Function),
        "PROCEDURE" => Some(TokenKind::Procedure),
        "BEGIN" => Some(TokenKind::Begin),
        "END" => Some(TokenKind::End),
        "CALL" => Some(TokenKind::Call),
        "IF" => Some(TokenKind::If),
        "THEN" => Some(TokenKind::Then),
        "ELSE" => Some(TokenKind::Else),
        "WHILE" => Some(TokenKind::While),
        "DO" => Some(TokenKind::Do),
        "FOR" => Some(TokenKind::For),
        "TO" => Some(TokenKind::To),
        "OF" => Some(TokenKind::Of),
        "ARRAY" => Some(TokenKind::Array),
        "INTEGER" => Some(TokenKind::Integer),
        "CHAR" => Some(TokenKind::Char),
        _ => None,
    }
}

/// Lex a whole source file into a token vector ending with `Eof`.
/// Any lexical problem is fatal and reported at its position.
pub fn lex(src: &str, filename: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = src.chars().collect();
    let mut pos = 0usize;
    let mut line: u32 = 1;
    let mut col: u32 = 1;

    while pos < chars.len() {
        let c = chars[pos];

        // Whitespace
        if c.is_whitespace() {
            if c == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
            pos += 1;
            continue;
        }

        let tok_line = line;
        let tok_col = col;

        // Comment: (* ... *), not nested
        if c == '(' && pos + 1 < chars.len() && chars[pos + 1] == '*' {
            pos += 2;
            col += 2;
            loop {
                if pos >= chars.len() {
                    return Err(CompileError::lex(
                        filename,
                        tok_line,
                        tok_col,
                        "unterminated comment",
                    ));
                }
                if chars[pos] == '*' && pos + 1 < chars.len() && chars[pos + 1] == ')' {
                    pos += 2;
                    col += 2;
                    break;
                }
                if chars[pos] == '\n' {
                    line += 1;
                    col = 1;
                } else {
                    col += 1;
                }
                pos += 1;
            }
            continue;
        }

        // Character literal: 'a'
        if c == '\'' {
            if pos + 2 < chars.len() && chars[pos + 2] == '\'' && chars[pos + 1] != '\n' {
                tokens.push(Token {
                    kind: TokenKind::CharLit(chars[pos + 1]),
                    line: tok_line,
                    col: tok_col,
                });
                pos += 3;
                col += 3;
                continue;
            }
            return Err(CompileError::lex(
                filename,
                tok_line,
                tok_col,
                "malformed character literal",
            ));
        }

        // Number
        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
                col += 1;
            }
            let s: String = chars[start..pos].iter().collect();
            let n: i64 = s.parse().map_err(|_| {
                CompileError::lex(
                    filename,
                    tok_line,
                    tok_col,
                    format!("integer literal '{}' out of range", s),
                )
            })?;
            tokens.push(Token {
                kind: TokenKind::Number(n),
                line: tok_line,
                col: tok_col,
            });
            continue;
        }

        // Identifier / keyword
        if c.is_ascii_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_') {
                pos += 1;
                col += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            let kind = keyword(&word).unwrap_or(TokenKind::Ident(word));
            tokens.push(Token {
                kind,
                line: tok_line,
                col: tok_col,
            });
            continue;
        }

        // Symbols; two-character forms first
        let next = if pos + 1 < chars.len() {
            Some(chars[pos + 1])
        } else {
            None
        };
        let (kind, width) = match (c, next) {
            (':', Some('=')) => (TokenKind::Assign, 2),
            ('<', Some('=')) => (TokenKind::Le, 2),
            ('<', Some('>')) => (TokenKind::Neq, 2),
            ('>', Some('=')) => (TokenKind::Ge, 2),
            ('+', _) => (TokenKind::Plus, 1),
            ('-', _) => (TokenKind::Minus, 1),
            ('*', _) => (TokenKind::Times, 1),
            ('/', _) => (TokenKind::Slash, 1),
            ('=', _) => (TokenKind::Eq, 1),
            ('<', _) => (TokenKind::Lt, 1),
            ('>', _) => (TokenKind::Gt, 1),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            ('[', _) => (TokenKind::LBracket, 1),
            (']', _) => (TokenKind::RBracket, 1),
            (':', _) => (TokenKind::Colon, 1),
            ('.', _) => (TokenKind::Period, 1),
            (',', _) => (TokenKind::Comma, 1),
            (';', _) => (TokenKind::Semicolon, 1),
            _ => {
                return Err(CompileError::lex(
                    filename,
                    tok_line,
                    tok_col,
                    format!("unexpected character '{}'", c),
                ));
            }
        };
        tokens.push(Token {
            kind,
            line: tok_line,
            col: tok_col,
        });
        pos += width;
        col += width as u32;
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        line,
        col,
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src, "test.kpl")
            .expect("lex should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_keywords_case_insensitively() {
        assert_eq!(
            kinds("PROGRAM program Program"),
            vec![
                TokenKind::Program,
                TokenKind::Program,
                TokenKind::Program,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lexes_compound_symbols() {
        assert_eq!(
            kinds(":= <> <= >= < >"),
            vec![
                TokenKind::Assign,
                TokenKind::Neq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn lexes_literals_and_identifiers() {
        assert_eq!(
            kinds("x 42 'a'"),
            vec![
                TokenKind::Ident("x".to_owned()),
                TokenKind::Number(42),
                TokenKind::CharLit('a'),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn skips_comments() {
        assert_eq!(
            kinds("x (* anything\nat all *) y"),
            vec![
                TokenKind::Ident("x".to_owned()),
                TokenKind::Ident("y".to_owned()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = lex("x\n  y", "test.kpl").expect("lex should succeed");
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (2, 3));
    }

    #[test]
    fn unterminated_comment_is_fatal() {
        let err = lex("(* never closed", "test.kpl").unwrap_err();
        assert!(err.to_string().contains("unterminated comment"));
        assert_eq!((err.line, err.col), (1, 1));
    }

    #[test]
    fn rejects_unexpected_character() {
        let err = lex("x ? y", "test.kpl").unwrap_err();
        assert!(err.to_string().contains("unexpected character '?'"));
        assert_eq!((err.line, err.col), (1, 3));
    }

    #[test]
    fn rejects_malformed_char_literal() {
        assert!(lex("'ab'", "test.kpl").is_err());
        assert!(lex("'", "test.kpl").is_err());
    }

    #[test]
    fn lparen_star_is_comment_not_paren() {
        // A call like f(*x) cannot appear in KPL anyway; '(' then '*' always
        // opens a comment.
        assert!(lex("(*)", "test.kpl").is_err());
    }
}
