//! Conditions, expressions, terms, factors, call arguments and index
//! expressions. Precedence comes from the rule structure alone: term binds
//! tighter than expression, and there is no precedence table.

use super::Parser;
use crate::ast::{ArithOp, Comparator, Condition, Expr, Sign};
use crate::error::{CompileError, ErrorKind};
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// `expression comparator expression` — exactly one comparator, no
    /// chaining and no boolean connectives.
    pub(super) fn compile_condition(&mut self) -> Result<Condition, CompileError> {
        let left = self.compile_expression()?;
        let op = match self.lookahead().kind {
            TokenKind::Eq => Comparator::Eq,
            TokenKind::Neq => Comparator::Neq,
            TokenKind::Le => Comparator::Le,
            TokenKind::Lt => Comparator::Lt,
            TokenKind::Ge => Comparator::Ge,
            TokenKind::Gt => Comparator::Gt,
            _ => return Err(self.err(ErrorKind::InvalidComparator)),
        };
        self.advance();
        let right = self.compile_expression()?;
        Ok(Condition { left, op, right })
    }

    /// Optional leading sign, then a left-associative `+`/`-` chain of
    /// terms. The sign applies to the first term only.
    pub(super) fn compile_expression(&mut self) -> Result<Expr, CompileError> {
        let sign = match self.lookahead().kind {
            TokenKind::Plus => Some(Sign::Plus),
            TokenKind::Minus => Some(Sign::Minus),
            _ => None,
        };
        if sign.is_some() {
            self.advance();
        }

        let mut expr = self.compile_term()?;
        if let Some(sign) = sign {
            expr = Expr::Unary {
                sign,
                operand: Box::new(expr),
            };
        }

        loop {
            let op = match self.lookahead().kind {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.compile_term()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    /// Left-associative `*`/`/` chain of factors.
    fn compile_term(&mut self) -> Result<Expr, CompileError> {
        let mut expr = self.compile_factor()?;
        loop {
            let op = match self.lookahead().kind {
                TokenKind::Times => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.compile_factor()?;
            expr = Expr::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    /// Number, char literal, or an identifier optionally followed by either
    /// call arguments or index brackets — never both. There is no
    /// parenthesized sub-expression alternative. Factor identifiers are not
    /// resolved against the symbol table.
    fn compile_factor(&mut self) -> Result<Expr, CompileError> {
        match self.lookahead().kind.clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            TokenKind::CharLit(c) => {
                self.advance();
                Ok(Expr::CharLit(c))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(&TokenKind::LParen) {
                    let args = self.compile_arguments()?;
                    Ok(Expr::Call { name, args })
                } else if self.check(&TokenKind::LBracket) {
                    let indexes = self.compile_indexes()?;
                    Ok(Expr::Index { name, indexes })
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            _ => Err(self.err(ErrorKind::InvalidFactor)),
        }
    }

    /// Optional parenthesized, comma-separated argument expressions.
    pub(super) fn compile_arguments(&mut self) -> Result<Vec<Expr>, CompileError> {
        let mut args = Vec::new();
        if self.check(&TokenKind::LParen) {
            self.advance();
            args.push(self.compile_expression()?);
            while self.check(&TokenKind::Comma) {
                self.advance();
                args.push(self.compile_expression()?);
            }
            self.expect(&TokenKind::RParen)?;
        }
        Ok(args)
    }

    /// Zero or more bracketed index expressions.
    pub(super) fn compile_indexes(&mut self) -> Result<Vec<Expr>, CompileError> {
        let mut indexes = Vec::new();
        while self.check(&TokenKind::LBracket) {
            self.advance();
            indexes.push(self.compile_expression()?);
            self.expect(&TokenKind::RBracket)?;
        }
        Ok(indexes)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{ArithOp, Expr, Stmt};
    use crate::error::ErrorKind;
    use crate::lexer::lex;
    use crate::parser::parse;
    use crate::symtab::{Object, ObjectKind};

    fn parse_src(src: &str) -> Result<Object, crate::error::CompileError> {
        let tokens = lex(src, "test.kpl")?;
        parse(&tokens, "test.kpl")
    }

    /// The single assignment value in `BEGIN x := <expr> END.`
    fn parse_value(expr_src: &str) -> Expr {
        let src = format!("PROGRAM p; VAR x: INTEGER; BEGIN x := {} END.", expr_src);
        match parse_src(&src).expect("parse").kind {
            ObjectKind::Program { mut body, .. } => match body.remove(0) {
                Stmt::Assign { mut values, .. } => values.remove(0),
                other => panic!("expected assignment, got {:?}", other),
            },
            other => panic!("expected program, got {:?}", other),
        }
    }

    #[test]
    fn term_binds_tighter_than_expression() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        match parse_value("1 + 2 * 3") {
            Expr::Binary {
                op: ArithOp::Add,
                right,
                ..
            } => assert!(matches!(
                *right,
                Expr::Binary {
                    op: ArithOp::Mul,
                    ..
                }
            )),
            other => panic!("expected addition at the top, got {:?}", other),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        // 5 - 2 - 1 parses as (5 - 2) - 1
        match parse_value("5 - 2 - 1") {
            Expr::Binary {
                op: ArithOp::Sub,
                left,
                ..
            } => assert!(matches!(
                *left,
                Expr::Binary {
                    op: ArithOp::Sub,
                    ..
                }
            )),
            other => panic!("expected subtraction at the top, got {:?}", other),
        }
    }

    #[test]
    fn leading_sign_applies_to_first_term() {
        match parse_value("-x + 1") {
            Expr::Binary {
                op: ArithOp::Add,
                left,
                ..
            } => assert!(matches!(*left, Expr::Unary { .. })),
            other => panic!("expected addition at the top, got {:?}", other),
        }
    }

    #[test]
    fn call_factor_with_arguments() {
        match parse_value("f(1, x)") {
            Expr::Call { name, args } => {
                assert_eq!(name, "f");
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn indexed_factor() {
        match parse_value("a[1][2]") {
            Expr::Index { name, indexes } => {
                assert_eq!(name, "a");
                assert_eq!(indexes.len(), 2);
            }
            other => panic!("expected index, got {:?}", other),
        }
    }

    #[test]
    fn call_then_index_is_rejected() {
        // A factor takes either a call argument list or index brackets,
        // never both; the stray '[' fails in the enclosing rule.
        let err = parse_src("PROGRAM p; VAR x: INTEGER; BEGIN x := f(1,2)[3] END.").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::MissingToken {
                expected: "END".to_owned()
            }
        );
    }

    #[test]
    fn parenthesized_subexpression_is_not_a_factor() {
        // The grammar has no parenthesized alternative in factor.
        let err = parse_src("PROGRAM p; VAR x: INTEGER; BEGIN x := (1 + 2) END.").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidFactor);
    }

    #[test]
    fn condition_requires_a_comparator() {
        let err =
            parse_src("PROGRAM p; VAR x: INTEGER; BEGIN IF x THEN x := 1 END.").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidComparator);
    }

    #[test]
    fn comparators_do_not_chain() {
        let err = parse_src(
            "PROGRAM p; VAR x: INTEGER; BEGIN IF 1 < x < 3 THEN x := 1 END.",
        )
        .unwrap_err();
        // The second '<' is left for THEN's expect to trip over.
        assert_eq!(
            err.kind,
            ErrorKind::MissingToken {
                expected: "THEN".to_owned()
            }
        );
    }
}
