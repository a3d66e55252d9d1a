// Expression stringifier
//
// Turns type and value expressions back into Go-like source text. Total over
// every `Expr` variant: unknown shapes become a `<kind>` placeholder.

use crate::extract::signature;
use crate::parser::{ChanDir, Expr, FieldList};

/// Canonical source text of an expression
pub fn stringify(expr: &Expr) -> String {
    match expr {
        Expr::Ident(name) => name.clone(),
        Expr::Selector { x, sel } => format!("{}.{}", stringify(x), sel),
        Expr::Star(x) => format!("*{}", stringify(x)),
        Expr::Array { len: None, elt } => format!("[]{}", stringify(elt)),
        Expr::Array { len: Some(len), elt } => {
            format!("[{}]{}", stringify(len), stringify(elt))
        }
        Expr::Ellipsis(elt) => match elt {
            Some(elt) => format!("...{}", stringify(elt)),
            None => "...".to_string(),
        },
        Expr::Func(func_type) => signature::func_type(
            &format_field_list(Some(&func_type.params)),
            &format_field_list(func_type.results.as_ref()),
        ),
        Expr::Map { key, value } => format!("map[{}]{}", stringify(key), stringify(value)),
        Expr::Chan { dir, value } => {
            let prefix = match dir {
                ChanDir::Send => "chan<- ",
                ChanDir::Recv => "<-chan ",
                ChanDir::Both => "chan ",
            };
            format!("{}{}", prefix, stringify(value))
        }
        Expr::Interface(methods) if methods.list.is_empty() => "interface{}".to_string(),
        Expr::Interface(_) => "interface{...}".to_string(),
        Expr::Struct(_) => "struct{...}".to_string(),
        Expr::BasicLit(text) => text.clone(),
        Expr::CompositeLit { ty } => {
            let ty = ty.as_deref().map(stringify).unwrap_or_default();
            format!("{}{{...}}", ty)
        }
        Expr::Generic { base, args } => {
            let args: Vec<String> = args.iter().map(stringify).collect();
            format!("{}[{}]", stringify(base), args.join(", "))
        }
        Expr::Paren(x) => format!("({})", stringify(x)),
        Expr::Unary { op, x } => format!("{}{}", op, stringify(x)),
        Expr::Binary { x, op, y } => format!("{} {} {}", stringify(x), op, stringify(y)),
        Expr::Union(terms) => {
            let terms: Vec<String> = terms.iter().map(stringify).collect();
            terms.join(" | ")
        }
        Expr::Unsupported(kind) => format!("<{}>", kind),
    }
}

/// Comma-joined parameter text: bare type when unnamed, `name type` per name otherwise
pub fn format_field_list(list: Option<&FieldList>) -> String {
    let Some(list) = list else {
        return String::new();
    };

    let mut parts = Vec::new();
    for field in &list.list {
        let ty = stringify(&field.ty);
        if field.names.is_empty() {
            parts.push(ty);
        } else {
            for name in &field.names {
                parts.push(format!("{} {}", name, ty));
            }
        }
    }
    parts.join(", ")
}
