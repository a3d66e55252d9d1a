// Signature builder
//
// Every place that prints a result list goes through `result_suffix`, so
// functions, interface methods and function types agree on parentheses.

use crate::model::GlobalKind;

/// Text following the parameter list
///
/// A single unnamed result stays bare; several results, or a named one, are
/// parenthesized.
pub fn result_suffix(results: &str) -> String {
    if results.is_empty() {
        String::new()
    } else if results.contains(',') || results.contains(' ') {
        format!(" ({})", results)
    } else {
        format!(" {}", results)
    }
}

/// `func (recv) Name(params) results`
pub fn function_signature(receiver: &str, name: &str, params: &str, results: &str) -> String {
    let mut sig = String::from("func ");
    if !receiver.is_empty() {
        sig.push('(');
        sig.push_str(receiver);
        sig.push_str(") ");
    }
    sig.push_str(&method_signature(name, params, results));
    sig
}

/// `Name(params) results`, as listed inside an interface
pub fn method_signature(name: &str, params: &str, results: &str) -> String {
    format!("{}({}){}", name, params, result_suffix(results))
}

/// `func(params) results`, the spelling of a function type
pub fn func_type(params: &str, results: &str) -> String {
    format!("func({}){}", params, result_suffix(results))
}

/// `var|const name [type] [= value]`, pairing the name with the initializer at `index`
pub fn variable_declaration(
    kind: GlobalKind,
    name: &str,
    type_str: &str,
    values: &[String],
    index: usize,
) -> String {
    let mut decl = format!("{} {}", kind.keyword(), name);

    if !type_str.is_empty() {
        decl.push(' ');
        decl.push_str(type_str);
    }

    if let Some(value) = values.get(index).filter(|v| !v.is_empty()) {
        decl.push_str(" = ");
        decl.push_str(value);
    }

    decl
}
