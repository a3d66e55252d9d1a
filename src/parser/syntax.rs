// Declaration tree for parsed Go source files
//
// These types mirror the shapes of Go's top-level declarations closely enough
// for documentation extraction. They carry unresolved syntactic spellings only.

/// A parsed Go source file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// File name (no directory)
    pub name: String,
    /// Name from the package clause
    pub package: String,
    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
}

/// A top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

/// A run of comments attached to a declaration, raw text including markers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentGroup {
    pub list: Vec<String>,
}

#[cfg(test)]
impl CommentGroup {
    pub fn new<I, S>(comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            list: comments.into_iter().map(Into::into).collect(),
        }
    }
}

/// A function or method declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub doc: Option<CommentGroup>,
    /// Receiver list, present only for methods
    pub recv: Option<FieldList>,
    pub name: String,
    pub func_type: FuncType,
}

/// Parameters and results of a function
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuncType {
    pub params: FieldList,
    pub results: Option<FieldList>,
}

/// A parenthesized or braced list of fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldList {
    pub list: Vec<Field>,
}

impl FieldList {
    pub fn new(list: Vec<Field>) -> Self {
        Self { list }
    }
}

/// One parameter, result, struct field or interface element
///
/// `names` is empty for unnamed parameters and embedded fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: Expr,
    /// Struct tag literal, quotes included
    pub tag: Option<String>,
}

impl Field {
    /// A field with no bound names
    pub fn unnamed(ty: Expr) -> Self {
        Self {
            names: Vec::new(),
            ty,
            tag: None,
        }
    }
}

#[cfg(test)]
impl Field {
    /// A field binding one or more names to a type
    pub fn named(names: &[&str], ty: Expr) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ty,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }
}

/// Keyword introducing a general declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Import,
    Const,
    Type,
    Var,
}

/// An `import`, `const`, `type` or `var` declaration, grouped or not
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    /// Doc comment above the keyword
    pub doc: Option<CommentGroup>,
    pub tok: Token,
    pub specs: Vec<Spec>,
}

/// One import, value or type spec inside a general declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub doc: Option<CommentGroup>,
    /// Local alias, including `.` and `_`
    pub name: Option<String>,
    /// Path literal as written, quotes included
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub doc: Option<CommentGroup>,
    pub names: Vec<String>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub doc: Option<CommentGroup>,
    pub name: String,
    pub ty: Expr,
}

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Send,
    Recv,
    Both,
}

/// A type or value expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    /// `X.Sel`
    Selector { x: Box<Expr>, sel: String },
    /// `*X`
    Star(Box<Expr>),
    /// `[]Elt` or `[Len]Elt`
    Array {
        len: Option<Box<Expr>>,
        elt: Box<Expr>,
    },
    /// `...Elt`; no element inside `[...]T` lengths
    Ellipsis(Option<Box<Expr>>),
    Func(FuncType),
    Map { key: Box<Expr>, value: Box<Expr> },
    Chan { dir: ChanDir, value: Box<Expr> },
    Interface(FieldList),
    Struct(FieldList),
    /// Literal text verbatim
    BasicLit(String),
    CompositeLit { ty: Option<Box<Expr>> },
    /// `Base[Args]`
    Generic { base: Box<Expr>, args: Vec<Expr> },
    Paren(Box<Expr>),
    Unary { op: String, x: Box<Expr> },
    Binary {
        x: Box<Expr>,
        op: String,
        y: Box<Expr>,
    },
    /// `A | B` constraint element
    Union(Vec<Expr>),
    /// Any node kind the model does not cover, by grammar kind name
    Unsupported(String),
}

#[cfg(test)]
impl Expr {
    pub fn ident(name: &str) -> Self {
        Expr::Ident(name.to_string())
    }

    pub fn selector(x: Expr, sel: &str) -> Self {
        Expr::Selector {
            x: Box::new(x),
            sel: sel.to_string(),
        }
    }

    pub fn star(x: Expr) -> Self {
        Expr::Star(Box::new(x))
    }

    pub fn slice(elt: Expr) -> Self {
        Expr::Array {
            len: None,
            elt: Box::new(elt),
        }
    }

    pub fn array(len: Expr, elt: Expr) -> Self {
        Expr::Array {
            len: Some(Box::new(len)),
            elt: Box::new(elt),
        }
    }

    pub fn ellipsis(elt: Expr) -> Self {
        Expr::Ellipsis(Some(Box::new(elt)))
    }

    pub fn map(key: Expr, value: Expr) -> Self {
        Expr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, value: Expr) -> Self {
        Expr::Chan {
            dir,
            value: Box::new(value),
        }
    }

    pub fn lit(text: &str) -> Self {
        Expr::BasicLit(text.to_string())
    }
}
