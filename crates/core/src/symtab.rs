//! Symbol table: declared objects grouped into a stack of lexical scopes.
//!
//! The parser declares objects into the current scope as it goes and pushes
//! a fresh scope when it enters a program or subroutine body. On exit the
//! finished scope is attached to its owning object, which was declared into
//! the enclosing scope beforehand, so a successful parse leaves a single
//! Program object owning the whole tree.

use crate::ast::{PassMode, Stmt};
use crate::error::ErrorKind;
use std::rc::Rc;

/// The value of a declared constant. Copied when referenced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantValue {
    Int(i64),
    Char(char),
}

/// A KPL type. Named type references share the referenced structure via
/// `Rc` rather than deep-copying it.
#[derive(Debug, PartialEq)]
pub enum Type {
    Int,
    Char,
    Array { size: i64, element: Rc<Type> },
}

/// The objects declared within one lexical block, in declaration order.
#[derive(Debug, Default)]
pub struct Scope {
    pub objects: Vec<Object>,
}

/// A symbol-table entry: a declared program entity and its kind-specific
/// payload.
#[derive(Debug)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
}

#[derive(Debug)]
pub enum ObjectKind {
    Program {
        scope: Scope,
        body: Vec<Stmt>,
    },
    Constant {
        value: ConstantValue,
    },
    Type {
        actual: Rc<Type>,
    },
    Variable {
        typ: Rc<Type>,
    },
    /// Parameter types are restricted to `Int` and `Char`
    Parameter {
        mode: PassMode,
        typ: Rc<Type>,
    },
    /// `return_type` is `None` only while the declaration is still being
    /// parsed; a finished parse always has it set
    Function {
        return_type: Option<Rc<Type>>,
        scope: Scope,
        body: Vec<Stmt>,
    },
    Procedure {
        scope: Scope,
        body: Vec<Stmt>,
    },
}

impl Object {
    pub fn program(name: &str) -> Self {
        Object {
            name: name.to_owned(),
            kind: ObjectKind::Program {
                scope: Scope::default(),
                body: Vec::new(),
            },
        }
    }

    pub fn constant(name: &str, value: ConstantValue) -> Self {
        Object {
            name: name.to_owned(),
            kind: ObjectKind::Constant { value },
        }
    }

    pub fn type_decl(name: &str, actual: Rc<Type>) -> Self {
        Object {
            name: name.to_owned(),
            kind: ObjectKind::Type { actual },
        }
    }

    pub fn variable(name: &str, typ: Rc<Type>) -> Self {
        Object {
            name: name.to_owned(),
            kind: ObjectKind::Variable { typ },
        }
    }

    pub fn parameter(name: &str, mode: PassMode, typ: Rc<Type>) -> Self {
        Object {
            name: name.to_owned(),
            kind: ObjectKind::Parameter { mode, typ },
        }
    }

    pub fn function(name: &str) -> Self {
        Object {
            name: name.to_owned(),
            kind: ObjectKind::Function {
                return_type: None,
                scope: Scope::default(),
                body: Vec::new(),
            },
        }
    }

    pub fn procedure(name: &str) -> Self {
        Object {
            name: name.to_owned(),
            kind: ObjectKind::Procedure {
                scope: Scope::default(),
                body: Vec::new(),
            },
        }
    }
}

/// A scope still being filled, keyed by the name of its owning object.
#[derive(Debug)]
struct OpenScope {
    owner: String,
    objects: Vec<Object>,
}

/// The scope stack for one compilation unit. Strict stack discipline:
/// enter/exit must nest exactly with block compilation; a mismatch is a
/// programming-contract violation, not a recoverable error.
#[derive(Debug)]
pub struct SymTab {
    stack: Vec<OpenScope>,
}

impl SymTab {
    /// A fresh table holding only the global scope. The global scope has no
    /// owning object; it exists to receive the Program declaration.
    pub fn new() -> Self {
        SymTab {
            stack: vec![OpenScope {
                owner: String::new(),
                objects: Vec::new(),
            }],
        }
    }

    /// Push the scope owned by the named object. The owner must already be
    /// declared in the current scope.
    pub fn enter_scope(&mut self, owner: &str) {
        self.stack.push(OpenScope {
            owner: owner.to_owned(),
            objects: Vec::new(),
        });
    }

    /// Pop the current scope and attach it, together with the block body,
    /// to its owning object in the enclosing scope.
    pub fn exit_scope(&mut self, body: Vec<Stmt>) {
        let closed = self.stack.pop().expect("scope exit without matching enter");
        let parent = self
            .stack
            .last_mut()
            .expect("scope exit popped the global scope");
        let owner = parent
            .objects
            .iter_mut()
            .rev()
            .find(|o| o.name == closed.owner)
            .expect("scope owner not declared in enclosing scope");
        match &mut owner.kind {
            ObjectKind::Program { scope, body: b }
            | ObjectKind::Function { scope, body: b, .. }
            | ObjectKind::Procedure { scope, body: b } => {
                scope.objects = closed.objects;
                *b = body;
            }
            _ => panic!("scope owner is not a program or subroutine"),
        }
    }

    /// Record the return type on the function owning the current scope.
    /// The function declaration parses its parameter list and return type
    /// after its own scope has been entered.
    pub fn set_return_type(&mut self, typ: Rc<Type>) {
        let owner_name = &self.stack.last().expect("empty scope stack").owner;
        let idx = self.stack.len() - 2;
        let owner = self.stack[idx]
            .objects
            .iter()
            .rposition(|o| &o.name == owner_name)
            .expect("scope owner not declared in enclosing scope");
        match &mut self.stack[idx].objects[owner].kind {
            ObjectKind::Function { return_type, .. } => *return_type = Some(typ),
            _ => panic!("return type set on a non-function scope owner"),
        }
    }

    /// Insert into the current scope. Duplicate names within one scope are
    /// rejected here, not by the parser.
    pub fn declare(&mut self, object: Object) -> Result<(), ErrorKind> {
        let current = self.stack.last_mut().expect("empty scope stack");
        if current.objects.iter().any(|o| o.name == object.name) {
            return Err(ErrorKind::DuplicateIdent { name: object.name });
        }
        current.objects.push(object);
        Ok(())
    }

    /// Resolve a name, innermost scope first. The caller turns a miss into
    /// a positioned `UndeclaredIdent` error.
    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.stack
            .iter()
            .rev()
            .find_map(|scope| scope.objects.iter().rev().find(|o| o.name == name))
    }

    /// Number of scopes currently open, the global scope included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consume the table after a successful parse and yield the Program
    /// object from the global scope.
    pub fn into_program(mut self) -> Option<Object> {
        let global = self.stack.pop()?;
        global
            .objects
            .into_iter()
            .find(|o| matches!(o.kind, ObjectKind::Program { .. }))
    }
}

impl Default for SymTab {
    fn default() -> Self {
        SymTab::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_and_lookup_in_current_scope() {
        let mut tab = SymTab::new();
        tab.declare(Object::constant("c", ConstantValue::Int(5)))
            .expect("declare");
        let obj = tab.lookup("c").expect("lookup");
        assert!(matches!(
            obj.kind,
            ObjectKind::Constant {
                value: ConstantValue::Int(5)
            }
        ));
    }

    #[test]
    fn duplicate_in_same_scope_is_rejected() {
        let mut tab = SymTab::new();
        tab.declare(Object::variable("x", Rc::new(Type::Int)))
            .expect("declare");
        let err = tab
            .declare(Object::variable("x", Rc::new(Type::Char)))
            .unwrap_err();
        assert_eq!(err, ErrorKind::DuplicateIdent { name: "x".into() });
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut tab = SymTab::new();
        tab.declare(Object::program("p")).expect("declare");
        tab.enter_scope("p");
        tab.declare(Object::variable("x", Rc::new(Type::Int)))
            .expect("declare");
        tab.declare(Object::procedure("q")).expect("declare");
        tab.enter_scope("q");
        tab.declare(Object::variable("x", Rc::new(Type::Char)))
            .expect("declare");

        match &tab.lookup("x").expect("lookup").kind {
            ObjectKind::Variable { typ } => assert_eq!(**typ, Type::Char),
            other => panic!("expected variable, got {:?}", other),
        }
    }

    #[test]
    fn same_name_in_different_scopes_is_fine() {
        let mut tab = SymTab::new();
        tab.declare(Object::program("p")).expect("declare");
        tab.enter_scope("p");
        tab.declare(Object::variable("x", Rc::new(Type::Int)))
            .expect("declare");
        tab.declare(Object::procedure("q")).expect("declare");
        tab.enter_scope("q");
        assert!(tab
            .declare(Object::variable("x", Rc::new(Type::Int)))
            .is_ok());
    }

    #[test]
    fn exit_attaches_scope_and_body_to_owner() {
        let mut tab = SymTab::new();
        tab.declare(Object::program("p")).expect("declare");
        tab.enter_scope("p");
        tab.declare(Object::variable("x", Rc::new(Type::Int)))
            .expect("declare");
        tab.exit_scope(Vec::new());

        let program = tab.into_program().expect("program object");
        match program.kind {
            ObjectKind::Program { scope, body } => {
                assert_eq!(scope.objects.len(), 1);
                assert_eq!(scope.objects[0].name, "x");
                assert!(body.is_empty());
            }
            other => panic!("expected program, got {:?}", other),
        }
    }

    #[test]
    fn subroutine_is_visible_inside_its_own_scope() {
        // Declared into the enclosing scope before its scope is entered, so
        // recursive references resolve.
        let mut tab = SymTab::new();
        tab.declare(Object::program("p")).expect("declare");
        tab.enter_scope("p");
        tab.declare(Object::function("f")).expect("declare");
        tab.enter_scope("f");
        assert!(matches!(
            tab.lookup("f").expect("lookup").kind,
            ObjectKind::Function { .. }
        ));
    }
}
