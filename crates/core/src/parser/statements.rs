//! Statement rules. Dispatch is on the lookahead kind alone; an empty
//! statement (before `;`, `END` or `ELSE`) produces no node.

use super::Parser;
use crate::ast::{Stmt, VarRef};
use crate::error::{CompileError, ErrorKind};
use crate::lexer::TokenKind;
use crate::symtab::ObjectKind;

impl<'a> Parser<'a> {
    /// One or more semicolon-separated statements. Empty statements are
    /// legal separators and contribute nothing to the list.
    pub(super) fn compile_statements(&mut self) -> Result<Vec<Stmt>, CompileError> {
        let mut stmts = Vec::new();
        if let Some(s) = self.compile_statement()? {
            stmts.push(s);
        }
        while self.check(&TokenKind::Semicolon) {
            self.advance();
            if let Some(s) = self.compile_statement()? {
                stmts.push(s);
            }
        }
        Ok(stmts)
    }

    fn compile_statement(&mut self) -> Result<Option<Stmt>, CompileError> {
        match self.lookahead().kind {
            TokenKind::Ident(_) => self.compile_assign_st().map(Some),
            TokenKind::Call => self.compile_call_st().map(Some),
            TokenKind::Begin => self.compile_group_st().map(Some),
            TokenKind::If => self.compile_if_st().map(Some),
            TokenKind::While => self.compile_while_st().map(Some),
            TokenKind::For => self.compile_for_st().map(Some),
            // Statement and block terminators mark an empty statement
            TokenKind::Semicolon | TokenKind::End | TokenKind::Else => Ok(None),
            _ => Err(self.err(ErrorKind::InvalidStatement)),
        }
    }

    /// `target {, target} := expr {, expr}` — every target must resolve to
    /// a Variable or Parameter; index expressions are recorded but not
    /// checked. Target and value counts are never compared.
    fn compile_assign_st(&mut self) -> Result<Stmt, CompileError> {
        let mut targets = vec![self.compile_assign_target()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            targets.push(self.compile_assign_target()?);
        }

        self.expect(&TokenKind::Assign)?;

        let mut values = vec![self.compile_expression()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            values.push(self.compile_expression()?);
        }
        Ok(Stmt::Assign { targets, values })
    }

    /// The lookup happens before the identifier is consumed, so the error
    /// position is the identifier itself.
    fn compile_assign_target(&mut self) -> Result<VarRef, CompileError> {
        let name = match &self.lookahead().kind {
            TokenKind::Ident(name) => name.clone(),
            _ => {
                return Err(self.err(ErrorKind::MissingToken {
                    expected: "identifier".to_owned(),
                }))
            }
        };
        match self.symtab.lookup(&name).map(|o| &o.kind) {
            Some(ObjectKind::Variable { .. } | ObjectKind::Parameter { .. }) => {}
            Some(_) => return Err(self.err(ErrorKind::InvalidStatement)),
            None => return Err(self.err(ErrorKind::UndeclaredIdent { name })),
        }
        self.advance();
        let indexes = self.compile_indexes()?;
        Ok(VarRef { name, indexes })
    }

    /// `CALL name [(args)]` — the callee is not resolved; arguments are not
    /// checked against its declared parameters.
    fn compile_call_st(&mut self) -> Result<Stmt, CompileError> {
        self.expect(&TokenKind::Call)?;
        let name = self.take_ident()?;
        let args = self.compile_arguments()?;
        Ok(Stmt::Call { name, args })
    }

    fn compile_group_st(&mut self) -> Result<Stmt, CompileError> {
        self.expect(&TokenKind::Begin)?;
        let stmts = self.compile_statements()?;
        self.expect(&TokenKind::End)?;
        Ok(Stmt::Compound(stmts))
    }

    /// `IF condition THEN statement [ELSE statement]` — the else branch is
    /// consumed immediately, so a dangling ELSE binds to the nearest IF.
    fn compile_if_st(&mut self) -> Result<Stmt, CompileError> {
        self.expect(&TokenKind::If)?;
        let cond = self.compile_condition()?;
        self.expect(&TokenKind::Then)?;
        let then_branch = self.compile_statement()?.map(Box::new);
        let else_branch = if self.check(&TokenKind::Else) {
            self.advance();
            self.compile_statement()?.map(Box::new)
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn compile_while_st(&mut self) -> Result<Stmt, CompileError> {
        self.expect(&TokenKind::While)?;
        let cond = self.compile_condition()?;
        self.expect(&TokenKind::Do)?;
        let body = self.compile_statement()?.map(Box::new);
        Ok(Stmt::While { cond, body })
    }

    /// `FOR ident := expr TO expr DO statement` — the loop identifier is
    /// consumed without a symbol-table lookup, unlike assignment targets.
    fn compile_for_st(&mut self) -> Result<Stmt, CompileError> {
        self.expect(&TokenKind::For)?;
        let var = self.take_ident()?;
        self.expect(&TokenKind::Assign)?;
        let from = self.compile_expression()?;
        self.expect(&TokenKind::To)?;
        let to = self.compile_expression()?;
        self.expect(&TokenKind::Do)?;
        let body = self.compile_statement()?.map(Box::new);
        Ok(Stmt::For {
            var,
            from,
            to,
            body,
        })
    }
}
