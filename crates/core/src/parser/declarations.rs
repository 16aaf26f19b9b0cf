//! Declaration blocks: CONST/TYPE/VAR sections, subroutine declarations,
//! and parameter lists.

use super::Parser;
use crate::ast::{PassMode, Stmt};
use crate::error::CompileError;
use crate::lexer::TokenKind;
use crate::symtab::Object;

impl<'a> Parser<'a> {
    /// A block: each-optional CONST, TYPE and VAR sections in that order,
    /// then subroutine declarations, then the mandatory BEGIN..END body.
    pub(super) fn compile_block(&mut self) -> Result<Vec<Stmt>, CompileError> {
        self.compile_const_section()?;
        self.compile_type_section()?;
        self.compile_var_section()?;
        self.compile_sub_decls()?;

        self.expect(&TokenKind::Begin)?;
        let body = self.compile_statements()?;
        self.expect(&TokenKind::End)?;
        Ok(body)
    }

    // Each section repeats for as long as the token after a completed,
    // semicolon-terminated declaration is an identifier. That is the only
    // termination test; a non-identifier ends the section.

    fn compile_const_section(&mut self) -> Result<(), CompileError> {
        if !self.check(&TokenKind::Const) {
            return Ok(());
        }
        self.advance();
        loop {
            let (line, col) = self.lookahead_pos();
            let name = self.take_ident()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.compile_constant()?;
            self.declare(Object::constant(&name, value), line, col)?;
            self.expect(&TokenKind::Semicolon)?;
            if !self.at_ident() {
                return Ok(());
            }
        }
    }

    fn compile_type_section(&mut self) -> Result<(), CompileError> {
        if !self.check(&TokenKind::Type) {
            return Ok(());
        }
        self.advance();
        loop {
            let (line, col) = self.lookahead_pos();
            let name = self.take_ident()?;
            self.expect(&TokenKind::Eq)?;
            let actual = self.compile_type()?;
            self.declare(Object::type_decl(&name, actual), line, col)?;
            self.expect(&TokenKind::Semicolon)?;
            if !self.at_ident() {
                return Ok(());
            }
        }
    }

    fn compile_var_section(&mut self) -> Result<(), CompileError> {
        if !self.check(&TokenKind::Var) {
            return Ok(());
        }
        self.advance();
        loop {
            let (line, col) = self.lookahead_pos();
            let name = self.take_ident()?;
            self.expect(&TokenKind::Colon)?;
            let typ = self.compile_type()?;
            self.declare(Object::variable(&name, typ), line, col)?;
            self.expect(&TokenKind::Semicolon)?;
            if !self.at_ident() {
                return Ok(());
            }
        }
    }

    fn compile_sub_decls(&mut self) -> Result<(), CompileError> {
        loop {
            if self.check(&TokenKind::Function) {
                self.compile_func_decl()?;
            } else if self.check(&TokenKind::Procedure) {
                self.compile_proc_decl()?;
            } else {
                return Ok(());
            }
        }
    }

    /// `FUNCTION name (params) : type ; block ;` — declared into the
    /// enclosing scope before its own scope is entered, so the function can
    /// call itself recursively.
    fn compile_func_decl(&mut self) -> Result<(), CompileError> {
        self.expect(&TokenKind::Function)?;
        let (line, col) = self.lookahead_pos();
        let name = self.take_ident()?;

        self.declare(Object::function(&name), line, col)?;
        self.symtab.enter_scope(&name);

        self.compile_params()?;
        self.expect(&TokenKind::Colon)?;
        let return_type = self.compile_type()?;
        self.symtab.set_return_type(return_type);
        self.expect(&TokenKind::Semicolon)?;

        let body = self.compile_block()?;
        self.symtab.exit_scope(body);
        self.expect(&TokenKind::Semicolon)
    }

    /// `PROCEDURE name (params) ; block ;`
    fn compile_proc_decl(&mut self) -> Result<(), CompileError> {
        self.expect(&TokenKind::Procedure)?;
        let (line, col) = self.lookahead_pos();
        let name = self.take_ident()?;

        self.declare(Object::procedure(&name), line, col)?;
        self.symtab.enter_scope(&name);

        self.compile_params()?;
        self.expect(&TokenKind::Semicolon)?;

        let body = self.compile_block()?;
        self.symtab.exit_scope(body);
        self.expect(&TokenKind::Semicolon)
    }

    /// Optional parenthesized, semicolon-separated parameter list.
    fn compile_params(&mut self) -> Result<(), CompileError> {
        if !self.check(&TokenKind::LParen) {
            return Ok(());
        }
        self.advance();
        self.compile_param()?;
        while self.check(&TokenKind::Semicolon) {
            self.advance();
            self.compile_param()?;
        }
        self.expect(&TokenKind::RParen)
    }

    /// `[VAR] name : basic_type` — a leading VAR marks pass-by-reference.
    /// Parameter types are restricted to INTEGER and CHAR; the parameter is
    /// declared into the subroutine's own, already-entered scope.
    fn compile_param(&mut self) -> Result<(), CompileError> {
        let mode = if self.check(&TokenKind::Var) {
            self.advance();
            PassMode::ByReference
        } else {
            PassMode::ByValue
        };

        let (line, col) = self.lookahead_pos();
        let name = self.take_ident()?;
        self.expect(&TokenKind::Colon)?;
        let typ = self.compile_basic_type()?;
        self.declare(Object::parameter(&name, mode, typ), line, col)
    }
}
