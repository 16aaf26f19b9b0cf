//! Single-lookahead recursive-descent parser for KPL.
//!
//! One function per grammar rule, no backtracking: every decision is made
//! by inspecting the lookahead token, and input is only ever consumed
//! through [`Parser::expect`] and [`Parser::advance`]. Semantic actions
//! (declaring objects, entering and exiting scopes, resolving constant and
//! type references) run as side effects of parsing, so a successful parse
//! yields the finished Program object. The first error anywhere is fatal.

use crate::error::{CompileError, ErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::symtab::{Object, SymTab, Type};
use std::mem::discriminant;
use std::rc::Rc;

mod declarations;
mod expressions;
mod statements;
mod types;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    filename: String,
    symtab: SymTab,
    // Interned primitive types; named references share these via Rc
    int_type: Rc<Type>,
    char_type: Rc<Type>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], filename: &str) -> Self {
        Parser {
            tokens,
            pos: 0,
            filename: filename.to_owned(),
            symtab: SymTab::new(),
            int_type: Rc::new(Type::Int),
            char_type: Rc::new(Type::Char),
        }
    }

    /// The next unconsumed token. Always defined: the lexer guarantees a
    /// trailing `Eof` and the cursor never moves past it.
    fn lookahead(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn lookahead_pos(&self) -> (u32, u32) {
        let t = self.lookahead();
        (t.line, t.col)
    }

    /// Consume the lookahead. The superseded token stays owned by the
    /// token vector; no release bookkeeping is needed.
    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    /// Kind test on the lookahead, ignoring any payload.
    fn check(&self, kind: &TokenKind) -> bool {
        discriminant(&self.lookahead().kind) == discriminant(kind)
    }

    fn at_ident(&self) -> bool {
        matches!(self.lookahead().kind, TokenKind::Ident(_))
    }

    /// Consume the lookahead if its kind matches, otherwise raise a fatal
    /// MissingToken at the lookahead's position. The only way the grammar
    /// requires a specific token.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), CompileError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(ErrorKind::MissingToken {
                expected: kind.to_string(),
            }))
        }
    }

    fn take_ident(&mut self) -> Result<String, CompileError> {
        if let TokenKind::Ident(name) = &self.lookahead().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.err(ErrorKind::MissingToken {
                expected: "identifier".to_owned(),
            }))
        }
    }

    fn take_number(&mut self) -> Result<i64, CompileError> {
        if let TokenKind::Number(n) = self.lookahead().kind {
            self.advance();
            Ok(n)
        } else {
            Err(self.err(ErrorKind::MissingToken {
                expected: "number".to_owned(),
            }))
        }
    }

    /// A fatal error at the lookahead's position.
    fn err(&self, kind: ErrorKind) -> CompileError {
        let (line, col) = self.lookahead_pos();
        CompileError::new(kind, &self.filename, line, col)
    }

    /// Declare into the current scope, positioning a duplicate-name error
    /// at the declared identifier.
    fn declare(&mut self, object: Object, line: u32, col: u32) -> Result<(), CompileError> {
        self.symtab
            .declare(object)
            .map_err(|kind| CompileError::new(kind, &self.filename, line, col))
    }

    /// `PROGRAM name ;` block `.` — the start symbol. The Program object is
    /// declared into the global scope before its own scope is entered.
    fn compile_program(&mut self) -> Result<(), CompileError> {
        self.expect(&TokenKind::Program)?;
        let (line, col) = self.lookahead_pos();
        let name = self.take_ident()?;
        self.expect(&TokenKind::Semicolon)?;

        self.declare(Object::program(&name), line, col)?;
        self.symtab.enter_scope(&name);

        let body = self.compile_block()?;

        self.symtab.exit_scope(body);
        self.expect(&TokenKind::Period)
    }
}

/// Parse a lexed token stream and return the Program object, or the first
/// error encountered. `tokens` must be lexer output (ending with `Eof`).
pub fn parse(tokens: &[Token], filename: &str) -> Result<Object, CompileError> {
    let mut p = Parser::new(tokens, filename);
    p.compile_program()?;
    Ok(p.symtab
        .into_program()
        .expect("program object present after a successful parse"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Stmt;
    use crate::lexer::lex;
    use crate::symtab::ObjectKind;

    fn parse_src(src: &str) -> Result<Object, CompileError> {
        let tokens = lex(src, "test.kpl")?;
        parse(&tokens, "test.kpl")
    }

    #[test]
    fn empty_program_parses() {
        let program = parse_src("PROGRAM p; BEGIN END.").expect("parse");
        assert_eq!(program.name, "p");
        match program.kind {
            ObjectKind::Program { scope, body } => {
                assert!(scope.objects.is_empty());
                assert!(body.is_empty());
            }
            other => panic!("expected program, got {:?}", other),
        }
    }

    #[test]
    fn missing_period_is_missing_token() {
        let err = parse_src("PROGRAM p; BEGIN END").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::MissingToken {
                expected: "'.'".to_owned()
            }
        );
    }

    #[test]
    fn var_and_assignment() {
        let program = parse_src("PROGRAM p; VAR x: INTEGER; BEGIN x := 1 END.").expect("parse");
        match program.kind {
            ObjectKind::Program { scope, body } => {
                assert_eq!(scope.objects.len(), 1);
                assert_eq!(scope.objects[0].name, "x");
                match &scope.objects[0].kind {
                    ObjectKind::Variable { typ } => assert_eq!(**typ, Type::Int),
                    other => panic!("expected variable, got {:?}", other),
                }
                assert_eq!(body.len(), 1);
                assert!(matches!(body[0], Stmt::Assign { .. }));
            }
            other => panic!("expected program, got {:?}", other),
        }
    }

    #[test]
    fn missing_program_keyword() {
        let err = parse_src("BEGIN END.").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::MissingToken {
                expected: "PROGRAM".to_owned()
            }
        );
        assert_eq!((err.line, err.col), (1, 1));
    }

    #[test]
    fn scope_enters_and_exits_nest_perfectly() {
        // Every scope entered during an accepted parse is exited again;
        // only the global scope remains open afterwards.
        let tokens = lex(
            "PROGRAM p; \
             FUNCTION f(n: INTEGER): INTEGER; \
             VAR r: INTEGER; \
               PROCEDURE inner; BEGIN END; \
             BEGIN r := n END; \
             BEGIN END.",
            "test.kpl",
        )
        .expect("lex");
        let mut p = Parser::new(&tokens, "test.kpl");
        p.compile_program().expect("parse");
        assert_eq!(p.symtab.depth(), 1);
    }

    #[test]
    fn duplicate_declaration_in_one_block() {
        let err = parse_src("PROGRAM p; VAR x: INTEGER; x: CHAR; BEGIN END.").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::DuplicateIdent {
                name: "x".to_owned()
            }
        );
    }
}
