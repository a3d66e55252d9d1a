// Documentation page model
//
// Entities are built once by the extractor and owned by the page that
// holds them. Everything here serializes so it can be handed to templates.

use serde::Serialize;

/// A function or method declaration
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: String,
    pub results: String,
    pub full_sig: String,
    pub doc: String,
    /// Formatted receiver, empty for plain functions
    pub receiver: String,
    pub is_method: bool,
}

/// A struct type declaration
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Struct {
    pub name: String,
    /// One `name type [tag]` line per field
    pub fields: String,
    pub doc: String,
    pub kind: String,
}

/// An interface type declaration
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Interface {
    pub name: String,
    /// One method signature or embedded type per line
    pub methods: String,
    pub doc: String,
}

/// Any other named type
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    #[serde(rename = "type")]
    pub type_expr: String,
    pub doc: String,
}

/// Keyword a global was declared with
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GlobalKind {
    Var,
    Const,
}

impl GlobalKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            GlobalKind::Var => "var",
            GlobalKind::Const => "const",
        }
    }
}

/// A top-level variable or constant
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Global {
    pub name: String,
    /// `var|const name [type] [= value]`
    pub declaration: String,
    pub doc: String,
    pub kind: GlobalKind,
}

/// An import declaration
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Import {
    /// Local alias, empty if none
    pub name: String,
    pub path: String,
}

/// One extracted documentable item
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Function(Function),
    Struct(Struct),
    Interface(Interface),
    TypeAlias(TypeAlias),
    Global(Global),
    Import(Import),
}

/// A generated page, as linked from the index or a parent package
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IndexEntry {
    pub package_name: String,
    pub doc_file: String,
}

impl IndexEntry {
    pub fn new(package_name: &str, doc_file: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            doc_file: doc_file.to_string(),
        }
    }
}

/// Everything rendered on one package page
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PageModel {
    pub package_name: String,
    pub functions: Vec<Function>,
    pub structs: Vec<Struct>,
    pub interfaces: Vec<Interface>,
    pub types: Vec<TypeAlias>,
    pub globals: Vec<Global>,
    pub imports: Vec<Import>,
    pub subpackages: Vec<IndexEntry>,
}

impl PageModel {
    pub fn new(package_name: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            ..Default::default()
        }
    }

    /// File an entity under its variant's collection
    pub fn push(&mut self, entity: Entity) {
        match entity {
            Entity::Function(f) => self.functions.push(f),
            Entity::Struct(s) => self.structs.push(s),
            Entity::Interface(i) => self.interfaces.push(i),
            Entity::TypeAlias(t) => self.types.push(t),
            Entity::Global(g) => self.globals.push(g),
            Entity::Import(i) => self.imports.push(i),
        }
    }

    /// Sort every collection into its stable output order
    ///
    /// Declarations order by name; imports by path, then alias.
    pub fn sort(&mut self) {
        self.functions.sort_by(|a, b| a.name.cmp(&b.name));
        self.structs.sort_by(|a, b| a.name.cmp(&b.name));
        self.interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        self.types.sort_by(|a, b| a.name.cmp(&b.name));
        self.globals.sort_by(|a, b| a.name.cmp(&b.name));
        self.imports
            .sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.name.cmp(&b.name)));
        self.subpackages
            .sort_by(|a, b| a.package_name.cmp(&b.package_name));
    }

    /// Number of documented declarations, imports excluded
    pub fn entity_count(&self) -> usize {
        self.functions.len()
            + self.structs.len()
            + self.interfaces.len()
            + self.types.len()
            + self.globals.len()
    }

    pub fn methods(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(|f| f.is_method)
    }
}
