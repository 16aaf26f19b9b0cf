//! Constant, type and basic-type rules.

use super::Parser;
use crate::error::{CompileError, ErrorKind};
use crate::lexer::TokenKind;
use crate::symtab::{ConstantValue, ObjectKind, Type};
use std::rc::Rc;

impl<'a> Parser<'a> {
    /// Optional sign applied to an unsigned constant. Negation is only
    /// defined for integer payloads; `-` on a char constant is invalid,
    /// reported at the sign.
    pub(super) fn compile_constant(&mut self) -> Result<ConstantValue, CompileError> {
        match self.lookahead().kind {
            TokenKind::Plus => {
                self.advance();
                self.compile_unsigned_constant()
            }
            TokenKind::Minus => {
                let (line, col) = self.lookahead_pos();
                self.advance();
                match self.compile_unsigned_constant()? {
                    ConstantValue::Int(n) => Ok(ConstantValue::Int(-n)),
                    ConstantValue::Char(_) => Err(CompileError::new(
                        ErrorKind::InvalidConstant,
                        &self.filename,
                        line,
                        col,
                    )),
                }
            }
            _ => self.compile_unsigned_constant(),
        }
    }

    /// Number literal, char literal, or a reference to a declared Constant
    /// object whose value is copied. Any other identifier kind is an
    /// invalid constant at the identifier's position.
    fn compile_unsigned_constant(&mut self) -> Result<ConstantValue, CompileError> {
        match self.lookahead().kind.clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(ConstantValue::Int(n))
            }
            TokenKind::CharLit(c) => {
                self.advance();
                Ok(ConstantValue::Char(c))
            }
            TokenKind::Ident(name) => {
                let value = match self.symtab.lookup(&name) {
                    Some(obj) => match obj.kind {
                        ObjectKind::Constant { value } => value,
                        _ => return Err(self.err(ErrorKind::InvalidConstant)),
                    },
                    None => return Err(self.err(ErrorKind::UndeclaredIdent { name })),
                };
                self.advance();
                Ok(value)
            }
            _ => Err(self.err(ErrorKind::InvalidConstant)),
        }
    }

    /// `INTEGER | CHAR | ARRAY [ number ] OF type | type identifier`.
    /// A named reference shares the declared type's structure; arrays nest.
    pub(super) fn compile_type(&mut self) -> Result<Rc<Type>, CompileError> {
        match self.lookahead().kind.clone() {
            TokenKind::Integer => {
                self.advance();
                Ok(self.int_type.clone())
            }
            TokenKind::Char => {
                self.advance();
                Ok(self.char_type.clone())
            }
            TokenKind::Array => {
                self.advance();
                self.expect(&TokenKind::LBracket)?;
                let size = self.take_number()?;
                self.expect(&TokenKind::RBracket)?;
                self.expect(&TokenKind::Of)?;
                let element = self.compile_type()?;
                Ok(Rc::new(Type::Array { size, element }))
            }
            TokenKind::Ident(name) => {
                let actual = match self.symtab.lookup(&name) {
                    Some(obj) => match &obj.kind {
                        ObjectKind::Type { actual } => actual.clone(),
                        _ => return Err(self.err(ErrorKind::InvalidType)),
                    },
                    None => return Err(self.err(ErrorKind::UndeclaredIdent { name })),
                };
                self.advance();
                Ok(actual)
            }
            _ => Err(self.err(ErrorKind::InvalidType)),
        }
    }

    /// `INTEGER | CHAR` only — the parameter type rule.
    pub(super) fn compile_basic_type(&mut self) -> Result<Rc<Type>, CompileError> {
        match self.lookahead().kind {
            TokenKind::Integer => {
                self.advance();
                Ok(self.int_type.clone())
            }
            TokenKind::Char => {
                self.advance();
                Ok(self.char_type.clone())
            }
            _ => Err(self.err(ErrorKind::InvalidBasicType)),
        }
    }
}
