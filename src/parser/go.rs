// Go parser using tree-sitter
//
// Lowers the concrete syntax tree into the declaration tree in `syntax`.
// Only top-level declarations are lowered; function bodies are never visited.

use crate::error::{Error, Result};
use crate::parser::syntax::{
    ChanDir, CommentGroup, Decl, Expr, Field, FieldList, FuncDecl, FuncType, GenDecl,
    ImportSpec, SourceFile, Spec, Token, TypeSpec, ValueSpec,
};
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parser for Go source files
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a new Go parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_go::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parser(format!("Failed to set Go language: {}", e)))?;

        Ok(Self { parser })
    }

    /// Parse a Go file
    pub fn parse_file(&mut self, path: &Path) -> Result<SourceFile> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.parse_source(&source, &name)
            .map_err(|e| match e {
                Error::Parse { message, .. } => Error::parse(path, message),
                other => other,
            })
    }

    /// Parse Go source code
    ///
    /// Any syntax error fails the whole file, as does a missing package clause.
    pub fn parse_source(&mut self, source: &str, name: &str) -> Result<SourceFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parser("Failed to parse Go source"))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error(&root)
                .map(|n| n.start_position().row + 1)
                .unwrap_or(1);
            return Err(Error::parse(name, format!("syntax error at line {}", line)));
        }

        let mut package = None;
        let mut decls = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => {
                    // In tree-sitter-go, the package name is a child node, not a field
                    let mut pkg_cursor = child.walk();
                    for pkg_child in child.named_children(&mut pkg_cursor) {
                        if pkg_child.kind() == "package_identifier" {
                            package = Some(text(&pkg_child, source));
                            break;
                        }
                    }
                }
                "function_declaration" | "method_declaration" => {
                    decls.push(Decl::Func(lower_func_decl(&child, source)));
                }
                "import_declaration" => {
                    decls.push(Decl::Gen(lower_gen_decl(&child, Token::Import, source)));
                }
                "const_declaration" => {
                    decls.push(Decl::Gen(lower_gen_decl(&child, Token::Const, source)));
                }
                "var_declaration" => {
                    decls.push(Decl::Gen(lower_gen_decl(&child, Token::Var, source)));
                }
                "type_declaration" => {
                    decls.push(Decl::Gen(lower_gen_decl(&child, Token::Type, source)));
                }
                _ => {}
            }
        }

        let package = package.ok_or_else(|| Error::parse(name, "missing package clause"))?;

        Ok(SourceFile {
            name: name.to_string(),
            package,
            decls,
        })
    }
}

fn text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes())
        .unwrap_or_default()
        .to_string()
}

/// Locate the first error or missing node, depth first
fn first_error<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(*node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = first_error(&child) {
                return Some(found);
            }
        }
    }
    None
}

/// Collect the comments directly above a node
///
/// The run stops at a blank line, at a non-comment sibling, or at a comment
/// that trails code on the same line.
fn doc_comments(node: &Node, source: &str) -> Option<CommentGroup> {
    let mut comments = Vec::new();
    let mut next_row = node.start_position().row;
    let mut current = prev_significant(node);

    while let Some(prev) = current {
        if prev.kind() != "comment" {
            break;
        }
        if prev.end_position().row + 1 < next_row {
            break;
        }
        if is_trailing_comment(&prev) {
            break;
        }
        comments.push(text(&prev, source));
        next_row = prev.start_position().row;
        current = prev_significant(&prev);
    }

    if comments.is_empty() {
        return None;
    }
    comments.reverse();
    Some(CommentGroup { list: comments })
}

/// Previous sibling, skipping statement terminators
///
/// The `"\n"` terminator spans the blank lines after a declaration and ends
/// on the row where the next comment starts.
fn prev_significant<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut current = node.prev_sibling();
    while let Some(prev) = current {
        if prev.is_named() || !matches!(prev.kind(), "\n" | ";") {
            return Some(prev);
        }
        current = prev.prev_sibling();
    }
    None
}

/// A comment is trailing when code ends on the row it starts on
fn is_trailing_comment(comment: &Node) -> bool {
    prev_significant(comment).map_or(false, |p| {
        p.kind() != "comment" && p.end_position().row == comment.start_position().row
    })
}

fn field_names(node: &Node, field: &str, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    let names: Vec<String> = node
        .children_by_field_name(field, &mut cursor)
        .map(|n| text(&n, source))
        .collect();
    names
}

fn has_token(node: &Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| !c.is_named() && c.kind() == token);
    found
}

/// Lower a required child, degrading to a placeholder naming the parent
fn lower_child(node: &Node, field: &str, source: &str) -> Expr {
    match node.child_by_field_name(field) {
        Some(child) => lower_expr(&child, source),
        None => Expr::Unsupported(node.kind().to_string()),
    }
}

fn lower_first_named(node: &Node, source: &str) -> Expr {
    match node.named_child(0) {
        Some(child) => lower_expr(&child, source),
        None => Expr::Unsupported(node.kind().to_string()),
    }
}

fn lower_func_decl(node: &Node, source: &str) -> FuncDecl {
    let recv = node
        .child_by_field_name("receiver")
        .map(|r| lower_parameter_list(&r, source));
    let name = node
        .child_by_field_name("name")
        .map(|n| text(&n, source))
        .unwrap_or_default();

    FuncDecl {
        doc: doc_comments(node, source),
        recv,
        name,
        func_type: lower_signature(node, source),
    }
}

/// Parameters and result of a function declaration, method element or function type
fn lower_signature(node: &Node, source: &str) -> FuncType {
    let params = node
        .child_by_field_name("parameters")
        .map(|p| lower_parameter_list(&p, source))
        .unwrap_or_default();
    let results = node.child_by_field_name("result").map(|r| {
        if r.kind() == "parameter_list" {
            lower_parameter_list(&r, source)
        } else {
            FieldList::new(vec![Field::unnamed(lower_expr(&r, source))])
        }
    });

    FuncType { params, results }
}

fn lower_parameter_list(node: &Node, source: &str) -> FieldList {
    let mut fields = Vec::new();
    let mut cursor = node.walk();

    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "parameter_declaration" => {
                // Can have multiple names for same type: a, b int
                fields.push(Field {
                    names: field_names(&child, "name", source),
                    ty: lower_child(&child, "type", source),
                    tag: None,
                });
            }
            "variadic_parameter_declaration" => {
                let elt = child
                    .child_by_field_name("type")
                    .map(|t| Box::new(lower_expr(&t, source)));
                fields.push(Field {
                    names: field_names(&child, "name", source),
                    ty: Expr::Ellipsis(elt),
                    tag: None,
                });
            }
            _ => {}
        }
    }

    FieldList::new(fields)
}

fn lower_gen_decl(node: &Node, tok: Token, source: &str) -> GenDecl {
    let mut specs = Vec::new();
    collect_specs(node, source, &mut specs);

    GenDecl {
        doc: doc_comments(node, source),
        tok,
        specs,
    }
}

/// Specs sit directly under the declaration, or under a `*_spec_list` when grouped
fn collect_specs(node: &Node, source: &str, specs: &mut Vec<Spec>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => specs.push(Spec::Import(lower_import_spec(&child, source))),
            "const_spec" | "var_spec" => specs.push(Spec::Value(lower_value_spec(&child, source))),
            "type_spec" | "type_alias" => specs.push(Spec::Type(lower_type_spec(&child, source))),
            "import_spec_list" | "var_spec_list" => collect_specs(&child, source, specs),
            _ => {}
        }
    }
}

fn lower_import_spec(node: &Node, source: &str) -> ImportSpec {
    let name = node.child_by_field_name("name").map(|n| text(&n, source));

    let path = node
        .child_by_field_name("path")
        .map(|p| text(&p, source))
        .or_else(|| {
            let mut cursor = node.walk();
            let literal = node
                .named_children(&mut cursor)
                .find(|c| {
                    c.kind() == "interpreted_string_literal" || c.kind() == "raw_string_literal"
                })
                .map(|c| text(&c, source));
            literal
        })
        .unwrap_or_default();

    ImportSpec {
        doc: doc_comments(node, source),
        name,
        path,
    }
}

fn lower_value_spec(node: &Node, source: &str) -> ValueSpec {
    let ty = node
        .child_by_field_name("type")
        .map(|t| lower_expr(&t, source));

    let mut values = Vec::new();
    if let Some(value) = node.child_by_field_name("value") {
        if value.kind() == "expression_list" {
            let mut cursor = value.walk();
            for expr in value.named_children(&mut cursor) {
                if expr.kind() != "comment" {
                    values.push(lower_expr(&expr, source));
                }
            }
        } else {
            values.push(lower_expr(&value, source));
        }
    }

    ValueSpec {
        doc: doc_comments(node, source),
        names: field_names(node, "name", source),
        ty,
        values,
    }
}

fn lower_type_spec(node: &Node, source: &str) -> TypeSpec {
    TypeSpec {
        doc: doc_comments(node, source),
        name: node
            .child_by_field_name("name")
            .map(|n| text(&n, source))
            .unwrap_or_default(),
        ty: lower_child(node, "type", source),
    }
}

/// Lower a type or value expression node
fn lower_expr(node: &Node, source: &str) -> Expr {
    match node.kind() {
        "identifier" | "type_identifier" | "field_identifier" | "package_identifier"
        | "blank_identifier" | "true" | "false" | "nil" | "iota" => Expr::Ident(text(node, source)),

        "int_literal" | "float_literal" | "imaginary_literal" | "rune_literal"
        | "interpreted_string_literal" | "raw_string_literal" => {
            Expr::BasicLit(text(node, source))
        }

        "qualified_type" => Expr::Selector {
            x: Box::new(lower_child(node, "package", source)),
            sel: node
                .child_by_field_name("name")
                .map(|n| text(&n, source))
                .unwrap_or_default(),
        },

        "selector_expression" => Expr::Selector {
            x: Box::new(lower_child(node, "operand", source)),
            sel: node
                .child_by_field_name("field")
                .map(|n| text(&n, source))
                .unwrap_or_default(),
        },

        "pointer_type" => Expr::Star(Box::new(lower_first_named(node, source))),

        "slice_type" => Expr::Array {
            len: None,
            elt: Box::new(lower_child(node, "element", source)),
        },

        "array_type" => Expr::Array {
            len: Some(Box::new(lower_child(node, "length", source))),
            elt: Box::new(lower_child(node, "element", source)),
        },

        "implicit_length_array_type" => Expr::Array {
            len: Some(Box::new(Expr::Ellipsis(None))),
            elt: Box::new(lower_child(node, "element", source)),
        },

        "map_type" => Expr::Map {
            key: Box::new(lower_child(node, "key", source)),
            value: Box::new(lower_child(node, "value", source)),
        },

        "channel_type" => Expr::Chan {
            dir: channel_direction(node),
            value: Box::new(lower_child(node, "value", source)),
        },

        "function_type" => Expr::Func(lower_signature(node, source)),

        "interface_type" => {
            let mut elems = Vec::new();
            collect_interface_elems(node, source, &mut elems);
            Expr::Interface(FieldList::new(elems))
        }

        "struct_type" => Expr::Struct(lower_struct_fields(node, source)),

        "composite_literal" => Expr::CompositeLit {
            ty: node
                .child_by_field_name("type")
                .map(|t| Box::new(lower_expr(&t, source))),
        },

        "generic_type" => {
            let mut args = Vec::new();
            if let Some(type_args) = node.child_by_field_name("type_arguments") {
                let mut cursor = type_args.walk();
                for arg in type_args.named_children(&mut cursor) {
                    args.push(lower_expr(&arg, source));
                }
            }
            Expr::Generic {
                base: Box::new(lower_child(node, "type", source)),
                args,
            }
        }

        "parenthesized_type" | "parenthesized_expression" => {
            Expr::Paren(Box::new(lower_first_named(node, source)))
        }

        "unary_expression" => Expr::Unary {
            op: node
                .child_by_field_name("operator")
                .map(|o| text(&o, source))
                .unwrap_or_default(),
            x: Box::new(lower_child(node, "operand", source)),
        },

        "negated_type" => Expr::Unary {
            op: "~".to_string(),
            x: Box::new(lower_first_named(node, source)),
        },

        "binary_expression" => Expr::Binary {
            x: Box::new(lower_child(node, "left", source)),
            op: node
                .child_by_field_name("operator")
                .map(|o| text(&o, source))
                .unwrap_or_default(),
            y: Box::new(lower_child(node, "right", source)),
        },

        "type_elem" | "constraint_elem" | "interface_type_name" => {
            let mut terms = Vec::new();
            let mut cursor = node.walk();
            for term in node.named_children(&mut cursor) {
                terms.push(lower_expr(&term, source));
            }
            if terms.len() == 1 {
                terms.remove(0)
            } else {
                Expr::Union(terms)
            }
        }

        other => Expr::Unsupported(other.to_string()),
    }
}

/// `<-chan T` receives, `chan<- T` sends, plain `chan T` does both
fn channel_direction(node: &Node) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node
        .children(&mut cursor)
        .filter(|c| !c.is_named())
        .map(|c| c.kind())
        .collect();

    match tokens.as_slice() {
        ["<-", "chan", ..] => ChanDir::Recv,
        ["chan", "<-", ..] => ChanDir::Send,
        _ => ChanDir::Both,
    }
}

fn lower_struct_fields(node: &Node, source: &str) -> FieldList {
    let mut fields = Vec::new();
    let mut cursor = node.walk();

    for list in node.named_children(&mut cursor) {
        if list.kind() != "field_declaration_list" {
            continue;
        }
        let mut list_cursor = list.walk();
        for decl in list.named_children(&mut list_cursor) {
            if decl.kind() != "field_declaration" {
                continue;
            }
            let names = field_names(&decl, "name", source);
            let mut ty = lower_child(&decl, "type", source);
            // Embedded pointer: the star is an anonymous token, not part of the type
            if names.is_empty() && has_token(&decl, "*") {
                ty = Expr::Star(Box::new(ty));
            }
            fields.push(Field {
                names,
                ty,
                tag: decl.child_by_field_name("tag").map(|t| text(&t, source)),
            });
        }
    }

    FieldList::new(fields)
}

/// Interface body: method elements become named func fields, anything else is embedded
fn collect_interface_elems(node: &Node, source: &str, elems: &mut Vec<Field>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "method_elem" | "method_spec" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| text(&n, source))
                    .unwrap_or_default();
                elems.push(Field {
                    names: vec![name],
                    ty: Expr::Func(lower_signature(&child, source)),
                    tag: None,
                });
            }
            "method_spec_list" => collect_interface_elems(&child, source, elems),
            "comment" => {}
            _ => elems.push(Field::unnamed(lower_expr(&child, source))),
        }
    }
}
