// Declaration extractor
//
// One declaration in, zero or more entities out. Never fails: anything the
// stringifier cannot spell degrades to placeholder text.

use crate::extract::signature;
use crate::extract::stringify::{format_field_list, stringify};
use crate::model::{Entity, Function, Global, GlobalKind, Import, Interface, Struct, TypeAlias};
use crate::parser::{
    CommentGroup, Decl, Expr, FieldList, FuncDecl, GenDecl, ImportSpec, Spec, Token, TypeSpec,
    ValueSpec,
};

/// Function name prefixes reserved for the test harness
pub const TEST_PREFIXES: [&str; 3] = ["Test", "Benchmark", "Example"];

/// Whether a function name belongs to the test harness
pub fn is_test_function(name: &str) -> bool {
    TEST_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Extract entities from one top-level declaration
pub fn extract_decl(decl: &Decl) -> Vec<Entity> {
    match decl {
        Decl::Func(func) => extract_func(func).into_iter().collect(),
        Decl::Gen(gen) => extract_gen(gen),
    }
}

/// Comment text with markers stripped, one trimmed non-empty line per comment
pub fn normalize_doc(group: Option<&CommentGroup>) -> String {
    let Some(group) = group else {
        return String::new();
    };

    let lines: Vec<&str> = group
        .list
        .iter()
        .map(|comment| {
            let line = comment.strip_prefix("//").unwrap_or(comment);
            let line = line.strip_prefix("/*").unwrap_or(line);
            let line = line.strip_suffix("*/").unwrap_or(line);
            line.trim()
        })
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

/// Spec-level doc wins over the group's
fn spec_doc(spec_doc: Option<&CommentGroup>, group_doc: Option<&CommentGroup>) -> String {
    normalize_doc(spec_doc.or(group_doc))
}

fn extract_func(func: &FuncDecl) -> Option<Entity> {
    if is_test_function(&func.name) {
        return None;
    }

    let params = format_field_list(Some(&func.func_type.params));
    let results = format_field_list(func.func_type.results.as_ref());
    let receiver = format_field_list(func.recv.as_ref());
    let full_sig = signature::function_signature(&receiver, &func.name, &params, &results);

    Some(Entity::Function(Function {
        name: func.name.clone(),
        params,
        results,
        full_sig,
        doc: normalize_doc(func.doc.as_ref()),
        is_method: !receiver.is_empty(),
        receiver,
    }))
}

fn extract_gen(gen: &GenDecl) -> Vec<Entity> {
    let mut entities = Vec::new();

    for spec in &gen.specs {
        match (gen.tok, spec) {
            (Token::Type, Spec::Type(type_spec)) => {
                entities.push(extract_type(type_spec, gen.doc.as_ref()));
            }
            (Token::Var, Spec::Value(value_spec)) => {
                entities.extend(extract_values(GlobalKind::Var, value_spec, gen.doc.as_ref()));
            }
            (Token::Const, Spec::Value(value_spec)) => {
                entities.extend(extract_values(GlobalKind::Const, value_spec, gen.doc.as_ref()));
            }
            (Token::Import, Spec::Import(import_spec)) => {
                entities.push(extract_import(import_spec));
            }
            // Spec kind does not match the keyword
            _ => {}
        }
    }

    entities
}

fn extract_type(spec: &TypeSpec, group_doc: Option<&CommentGroup>) -> Entity {
    let doc = spec_doc(spec.doc.as_ref(), group_doc);

    match &spec.ty {
        Expr::Struct(fields) => Entity::Struct(Struct {
            name: spec.name.clone(),
            fields: struct_fields(fields),
            doc,
            kind: "struct".to_string(),
        }),
        Expr::Interface(methods) => Entity::Interface(Interface {
            name: spec.name.clone(),
            methods: interface_methods(methods),
            doc,
        }),
        other => Entity::TypeAlias(TypeAlias {
            name: spec.name.clone(),
            type_expr: stringify(other),
            doc,
        }),
    }
}

/// One `name type [tag]` line per bound name; embedded fields print their type alone
fn struct_fields(fields: &FieldList) -> String {
    let mut lines = Vec::new();
    for field in &fields.list {
        let ty = stringify(&field.ty);
        if field.names.is_empty() {
            lines.push(ty);
            continue;
        }
        for name in &field.names {
            let mut line = format!("{} {}", name, ty);
            if let Some(tag) = &field.tag {
                line.push(' ');
                line.push_str(tag);
            }
            lines.push(line);
        }
    }
    lines.join("\n")
}

/// One method signature per line; embedded interfaces and constraints print alone
fn interface_methods(methods: &FieldList) -> String {
    let mut lines = Vec::new();
    for method in &methods.list {
        if method.names.is_empty() {
            lines.push(stringify(&method.ty));
            continue;
        }
        let Expr::Func(func_type) = &method.ty else {
            continue;
        };
        let params = format_field_list(Some(&func_type.params));
        let results = format_field_list(func_type.results.as_ref());
        for name in &method.names {
            lines.push(signature::method_signature(name, &params, &results));
        }
    }
    lines.join("\n")
}

fn extract_values(
    kind: GlobalKind,
    spec: &ValueSpec,
    group_doc: Option<&CommentGroup>,
) -> Vec<Entity> {
    let doc = spec_doc(spec.doc.as_ref(), group_doc);
    let type_str = spec.ty.as_ref().map(stringify).unwrap_or_default();
    let values: Vec<String> = spec.values.iter().map(stringify).collect();

    spec.names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Entity::Global(Global {
                name: name.clone(),
                declaration: signature::variable_declaration(kind, name, &type_str, &values, i),
                doc: doc.clone(),
                kind,
            })
        })
        .collect()
}

fn extract_import(spec: &ImportSpec) -> Entity {
    Entity::Import(Import {
        name: spec.name.clone().unwrap_or_default(),
        path: spec.path.trim_matches(|c| c == '"' || c == '`').to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Field, FuncType};

    fn func_decl(name: &str, recv: Option<FieldList>, func_type: FuncType) -> Decl {
        Decl::Func(FuncDecl {
            doc: None,
            recv,
            name: name.to_string(),
            func_type,
        })
    }

    fn single<T>(mut entities: Vec<T>) -> T {
        assert_eq!(entities.len(), 1);
        entities.remove(0)
    }

    #[test]
    fn test_normalize_doc() {
        let group = CommentGroup::new([
            "// Frobnicate does the thing.",
            "//",
            "/* Block form. */",
            "//   indented  ",
        ]);
        assert_eq!(
            normalize_doc(Some(&group)),
            "Frobnicate does the thing.\nBlock form.\nindented"
        );
        assert_eq!(normalize_doc(None), "");
    }

    #[test]
    fn test_method_extraction() {
        let decl = func_decl(
            "Do",
            Some(FieldList::new(vec![Field::named(
                &["r"],
                Expr::star(Expr::ident("T")),
            )])),
            FuncType {
                params: FieldList::new(vec![Field::named(&["x"], Expr::ident("int"))]),
                results: Some(FieldList::new(vec![
                    Field::unnamed(Expr::ident("int")),
                    Field::unnamed(Expr::ident("error")),
                ])),
            },
        );

        match single(extract_decl(&decl)) {
            Entity::Function(f) => {
                assert_eq!(f.receiver, "r *T");
                assert_eq!(f.params, "x int");
                assert_eq!(f.results, "int, error");
                assert_eq!(f.full_sig, "func (r *T) Do(x int) (int, error)");
                assert!(f.is_method);
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_function_is_not_method() {
        let decl = func_decl("Run", None, FuncType::default());
        match single(extract_decl(&decl)) {
            Entity::Function(f) => {
                assert_eq!(f.full_sig, "func Run()");
                assert!(f.receiver.is_empty());
                assert!(!f.is_method);
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_test_harness_functions_skipped() {
        for name in ["TestFoo", "BenchmarkFoo", "ExampleFoo"] {
            let decl = func_decl(name, None, FuncType::default());
            assert!(extract_decl(&decl).is_empty(), "{} should be skipped", name);
        }
        assert!(!is_test_function("testHelper"));
        assert!(is_test_function("Testify"));
    }

    #[test]
    fn test_var_group_pairs_names_with_values() {
        let decl = Decl::Gen(GenDecl {
            doc: None,
            tok: Token::Var,
            specs: vec![Spec::Value(ValueSpec {
                doc: None,
                names: vec!["a".to_string(), "b".to_string()],
                ty: Some(Expr::ident("int")),
                values: vec![Expr::lit("1")],
            })],
        });

        let entities = extract_decl(&decl);
        assert_eq!(entities.len(), 2);
        match (&entities[0], &entities[1]) {
            (Entity::Global(a), Entity::Global(b)) => {
                assert_eq!(a.declaration, "var a int = 1");
                assert_eq!(b.declaration, "var b int");
                assert_eq!(a.kind, GlobalKind::Var);
            }
            other => panic!("Expected globals, got {:?}", other),
        }
    }

    #[test]
    fn test_const_doc_precedence() {
        let decl = Decl::Gen(GenDecl {
            doc: Some(CommentGroup::new(["// Group doc."])),
            tok: Token::Const,
            specs: vec![
                Spec::Value(ValueSpec {
                    doc: Some(CommentGroup::new(["// Own doc."])),
                    names: vec!["A".to_string()],
                    ty: None,
                    values: vec![Expr::ident("iota")],
                }),
                Spec::Value(ValueSpec {
                    doc: None,
                    names: vec!["B".to_string()],
                    ty: None,
                    values: vec![],
                }),
            ],
        });

        let entities = extract_decl(&decl);
        match (&entities[0], &entities[1]) {
            (Entity::Global(a), Entity::Global(b)) => {
                assert_eq!(a.doc, "Own doc.");
                assert_eq!(a.declaration, "const A = iota");
                assert_eq!(b.doc, "Group doc.");
                assert_eq!(b.declaration, "const B");
                assert_eq!(b.kind, GlobalKind::Const);
            }
            other => panic!("Expected globals, got {:?}", other),
        }
    }

    #[test]
    fn test_const_doc_precedence_from_source() {
        let source = r#"
package limits

// Group doc.
const (
    // A is first.
    A = iota
    // B is second.
    B
    C
)
"#;
        let file = crate::parser::GoParser::new()
            .unwrap()
            .parse_source(source, "limits.go")
            .unwrap();
        let docs: Vec<(String, String)> = file
            .decls
            .iter()
            .flat_map(extract_decl)
            .map(|e| match e {
                Entity::Global(g) => (g.name, g.doc),
                other => panic!("Expected global, got {:?}", other),
            })
            .collect();

        assert_eq!(
            docs,
            vec![
                ("A".to_string(), "A is first.".to_string()),
                ("B".to_string(), "B is second.".to_string()),
                ("C".to_string(), "Group doc.".to_string()),
            ]
        );
    }

    #[test]
    fn test_struct_extraction() {
        let decl = Decl::Gen(GenDecl {
            doc: Some(CommentGroup::new(["// Server handles requests."])),
            tok: Token::Type,
            specs: vec![Spec::Type(TypeSpec {
                doc: None,
                name: "Server".to_string(),
                ty: Expr::Struct(FieldList::new(vec![
                    Field::unnamed(Expr::selector(Expr::ident("sync"), "Mutex")),
                    Field::named(&["Addr"], Expr::ident("string")).with_tag("`json:\"addr\"`"),
                    Field::named(&["in", "out"], Expr::chan(crate::parser::ChanDir::Both, Expr::ident("int"))),
                ])),
            })],
        });

        match single(extract_decl(&decl)) {
            Entity::Struct(s) => {
                assert_eq!(s.name, "Server");
                assert_eq!(s.kind, "struct");
                assert_eq!(s.doc, "Server handles requests.");
                assert_eq!(
                    s.fields,
                    "sync.Mutex\nAddr string `json:\"addr\"`\nin chan int\nout chan int"
                );
            }
            other => panic!("Expected struct, got {:?}", other),
        }
    }

    #[test]
    fn test_interface_extraction() {
        let read = FuncType {
            params: FieldList::new(vec![Field::named(&["p"], Expr::slice(Expr::ident("byte")))]),
            results: Some(FieldList::new(vec![
                Field::named(&["n"], Expr::ident("int")),
                Field::named(&["err"], Expr::ident("error")),
            ])),
        };
        let close = FuncType {
            params: FieldList::default(),
            results: Some(FieldList::new(vec![Field::unnamed(Expr::ident("error"))])),
        };
        let decl = Decl::Gen(GenDecl {
            doc: None,
            tok: Token::Type,
            specs: vec![Spec::Type(TypeSpec {
                doc: Some(CommentGroup::new(["// Stream reads and closes."])),
                name: "Stream".to_string(),
                ty: Expr::Interface(FieldList::new(vec![
                    Field::unnamed(Expr::selector(Expr::ident("fmt"), "Stringer")),
                    Field::named(&["Read"], Expr::Func(read)),
                    Field::named(&["Close"], Expr::Func(close)),
                ])),
            })],
        });

        match single(extract_decl(&decl)) {
            Entity::Interface(i) => {
                assert_eq!(i.doc, "Stream reads and closes.");
                assert_eq!(
                    i.methods,
                    "fmt.Stringer\nRead(p []byte) (n int, err error)\nClose() error"
                );
            }
            other => panic!("Expected interface, got {:?}", other),
        }
    }

    #[test]
    fn test_type_alias_extraction() {
        let decl = Decl::Gen(GenDecl {
            doc: None,
            tok: Token::Type,
            specs: vec![Spec::Type(TypeSpec {
                doc: None,
                name: "Registry".to_string(),
                ty: Expr::map(Expr::ident("string"), Expr::star(Expr::ident("Plugin"))),
            })],
        });

        match single(extract_decl(&decl)) {
            Entity::TypeAlias(t) => {
                assert_eq!(t.name, "Registry");
                assert_eq!(t.type_expr, "map[string]*Plugin");
            }
            other => panic!("Expected type alias, got {:?}", other),
        }
    }

    #[test]
    fn test_import_extraction() {
        let decl = Decl::Gen(GenDecl {
            doc: None,
            tok: Token::Import,
            specs: vec![
                Spec::Import(ImportSpec {
                    doc: None,
                    name: None,
                    path: "\"net/http\"".to_string(),
                }),
                Spec::Import(ImportSpec {
                    doc: None,
                    name: Some("_".to_string()),
                    path: "`embed`".to_string(),
                }),
            ],
        });

        let entities = extract_decl(&decl);
        match (&entities[0], &entities[1]) {
            (Entity::Import(http), Entity::Import(embed)) => {
                assert_eq!(http.path, "net/http");
                assert_eq!(http.name, "");
                assert_eq!(embed.path, "embed");
                assert_eq!(embed.name, "_");
            }
            other => panic!("Expected imports, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_value_degrades() {
        let decl = Decl::Gen(GenDecl {
            doc: None,
            tok: Token::Var,
            specs: vec![Spec::Value(ValueSpec {
                doc: None,
                names: vec!["started".to_string()],
                ty: None,
                values: vec![Expr::Unsupported("call_expression".to_string())],
            })],
        });

        match single(extract_decl(&decl)) {
            Entity::Global(g) => assert_eq!(g.declaration, "var started = <call_expression>"),
            other => panic!("Expected global, got {:?}", other),
        }
    }
}
