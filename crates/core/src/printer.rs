//! Rendering of a parsed Program object: an indented text tree for human
//! eyes and a structured JSON value for tooling. Both walk the object tree
//! the parser produced; nothing here consults the parser.

use crate::ast::{ArithOp, Condition, Expr, PassMode, Sign, Stmt, VarRef};
use crate::symtab::{ConstantValue, Object, ObjectKind, Scope, Type};
use serde_json::{json, Value};

fn type_name(t: &Type) -> String {
    match t {
        Type::Int => "integer".to_owned(),
        Type::Char => "char".to_owned(),
        Type::Array { size, element } => {
            format!("array [{}] of {}", size, type_name(element))
        }
    }
}

fn constant_text(v: ConstantValue) -> String {
    match v {
        ConstantValue::Int(n) => n.to_string(),
        ConstantValue::Char(c) => format!("'{}'", c),
    }
}

// ──────────────────────────────────────────────
// Text tree
// ──────────────────────────────────────────────

/// Indented text rendering of the object tree, declarations only.
pub fn render_text(program: &Object) -> String {
    let mut out = String::new();
    render_object(program, 0, &mut out);
    out
}

fn render_object(obj: &Object, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match &obj.kind {
        ObjectKind::Program { scope, .. } => {
            out.push_str(&format!("{}Program {}\n", pad, obj.name));
            render_scope(scope, depth + 1, out);
        }
        ObjectKind::Constant { value } => {
            out.push_str(&format!(
                "{}Const {} = {}\n",
                pad,
                obj.name,
                constant_text(*value)
            ));
        }
        ObjectKind::Type { actual } => {
            out.push_str(&format!("{}Type {} = {}\n", pad, obj.name, type_name(actual)));
        }
        ObjectKind::Variable { typ } => {
            out.push_str(&format!("{}Var {} : {}\n", pad, obj.name, type_name(typ)));
        }
        ObjectKind::Parameter { mode, typ } => {
            let mode = match mode {
                PassMode::ByValue => "",
                PassMode::ByReference => "var ",
            };
            out.push_str(&format!(
                "{}Param {}{} : {}\n",
                pad,
                mode,
                obj.name,
                type_name(typ)
            ));
        }
        ObjectKind::Function {
            return_type, scope, ..
        } => {
            let ret = return_type
                .as_deref()
                .map(type_name)
                .unwrap_or_else(|| "?".to_owned());
            out.push_str(&format!("{}Function {} : {}\n", pad, obj.name, ret));
            render_scope(scope, depth + 1, out);
        }
        ObjectKind::Procedure { scope, .. } => {
            out.push_str(&format!("{}Procedure {}\n", pad, obj.name));
            render_scope(scope, depth + 1, out);
        }
    }
}

fn render_scope(scope: &Scope, depth: usize, out: &mut String) {
    for obj in &scope.objects {
        render_object(obj, depth, out);
    }
}

// ──────────────────────────────────────────────
// JSON
// ──────────────────────────────────────────────

/// Structured JSON view of the object tree, block bodies included.
pub fn to_json(program: &Object) -> Value {
    object_json(program)
}

fn object_json(obj: &Object) -> Value {
    match &obj.kind {
        ObjectKind::Program { scope, body } => json!({
            "kind": "program",
            "name": obj.name,
            "declarations": scope_json(scope),
            "body": body.iter().map(stmt_json).collect::<Vec<_>>(),
        }),
        ObjectKind::Constant { value } => json!({
            "kind": "constant",
            "name": obj.name,
            "value": constant_json(*value),
        }),
        ObjectKind::Type { actual } => json!({
            "kind": "type",
            "name": obj.name,
            "type": type_json(actual),
        }),
        ObjectKind::Variable { typ } => json!({
            "kind": "variable",
            "name": obj.name,
            "type": type_json(typ),
        }),
        ObjectKind::Parameter { mode, typ } => json!({
            "kind": "parameter",
            "name": obj.name,
            "mode": match mode {
                PassMode::ByValue => "value",
                PassMode::ByReference => "reference",
            },
            "type": type_json(typ),
        }),
        ObjectKind::Function {
            return_type,
            scope,
            body,
        } => json!({
            "kind": "function",
            "name": obj.name,
            "return_type": return_type.as_deref().map(type_json),
            "declarations": scope_json(scope),
            "body": body.iter().map(stmt_json).collect::<Vec<_>>(),
        }),
        ObjectKind::Procedure { scope, body } => json!({
            "kind": "procedure",
            "name": obj.name,
            "declarations": scope_json(scope),
            "body": body.iter().map(stmt_json).collect::<Vec<_>>(),
        }),
    }
}

fn scope_json(scope: &Scope) -> Value {
    Value::Array(scope.objects.iter().map(object_json).collect())
}

fn constant_json(v: ConstantValue) -> Value {
    match v {
        ConstantValue::Int(n) => json!(n),
        ConstantValue::Char(c) => json!(c.to_string()),
    }
}

fn type_json(t: &Type) -> Value {
    match t {
        Type::Int => json!("integer"),
        Type::Char => json!("char"),
        Type::Array { size, element } => json!({
            "array": { "size": size, "of": type_json(element) }
        }),
    }
}

fn stmt_json(stmt: &Stmt) -> Value {
    match stmt {
        Stmt::Assign { targets, values } => json!({
            "stmt": "assign",
            "targets": targets.iter().map(var_ref_json).collect::<Vec<_>>(),
            "values": values.iter().map(expr_json).collect::<Vec<_>>(),
        }),
        Stmt::Call { name, args } => json!({
            "stmt": "call",
            "name": name,
            "args": args.iter().map(expr_json).collect::<Vec<_>>(),
        }),
        Stmt::Compound(stmts) => json!({
            "stmt": "compound",
            "body": stmts.iter().map(stmt_json).collect::<Vec<_>>(),
        }),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => json!({
            "stmt": "if",
            "cond": condition_json(cond),
            "then": then_branch.as_deref().map(stmt_json),
            "else": else_branch.as_deref().map(stmt_json),
        }),
        Stmt::While { cond, body } => json!({
            "stmt": "while",
            "cond": condition_json(cond),
            "body": body.as_deref().map(stmt_json),
        }),
        Stmt::For {
            var,
            from,
            to,
            body,
        } => json!({
            "stmt": "for",
            "var": var,
            "from": expr_json(from),
            "to": expr_json(to),
            "body": body.as_deref().map(stmt_json),
        }),
    }
}

fn var_ref_json(target: &VarRef) -> Value {
    json!({
        "name": target.name,
        "indexes": target.indexes.iter().map(expr_json).collect::<Vec<_>>(),
    })
}

fn condition_json(cond: &Condition) -> Value {
    json!({
        "left": expr_json(&cond.left),
        "op": cond.op.symbol(),
        "right": expr_json(&cond.right),
    })
}

fn expr_json(expr: &Expr) -> Value {
    match expr {
        Expr::Number(n) => json!(n),
        Expr::CharLit(c) => json!({ "char": c.to_string() }),
        Expr::Ident(name) => json!({ "ident": name }),
        Expr::Call { name, args } => json!({
            "call": name,
            "args": args.iter().map(expr_json).collect::<Vec<_>>(),
        }),
        Expr::Index { name, indexes } => json!({
            "index": name,
            "indexes": indexes.iter().map(expr_json).collect::<Vec<_>>(),
        }),
        Expr::Unary { sign, operand } => json!({
            "unary": match sign {
                Sign::Plus => "+",
                Sign::Minus => "-",
            },
            "operand": expr_json(operand),
        }),
        Expr::Binary { op, left, right } => json!({
            "binary": match op {
                ArithOp::Add => "+",
                ArithOp::Sub => "-",
                ArithOp::Mul => "*",
                ArithOp::Div => "/",
            },
            "left": expr_json(left),
            "right": expr_json(right),
        }),
    }
}
