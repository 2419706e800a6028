use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentId(pub u32);

impl fmt::Display for IdentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeClass {
    Local,
    Param,
    Global,
}

impl fmt::Display for ScopeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeClass::Local => write!(f, "local"),
            ScopeClass::Param => write!(f, "param"),
            ScopeClass::Global => write!(f, "global"),
        }
    }
}

/// A resolved program variable, as supplied by the host's name resolution.
#[derive(Debug, Clone, Eq)]
pub struct Ident {
    pub id: IdentId,
    pub name: String,
    pub scope: ScopeClass,
    pub ty: Type,
}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident [{}] {} ({})", self.id, self.name, self.scope)
    }
}

#[derive(Debug, Default)]
pub struct IdentTable {
    idents: Vec<Ident>,
}

impl IdentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, scope: ScopeClass, ty: Type) -> IdentId {
        let id = IdentId(self.idents.len() as u32);
        self.idents.push(Ident {
            id,
            name: name.into(),
            scope,
            ty,
        });
        id
    }

    pub fn get(&self, id: IdentId) -> Option<&Ident> {
        self.idents.get(id.0 as usize)
    }

    pub fn idents(&self) -> &[Ident] {
        &self.idents
    }
}

/// Name-to-identifier bindings of a function scope.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    names: HashMap<String, IdentId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, id: IdentId) {
        self.names.insert(name.into(), id);
    }

    pub fn lookup(&self, name: &str) -> Option<IdentId> {
        self.names.get(name).copied()
    }
}

/// Fully-qualified name for module-scoped lookups. Names already carrying a
/// module path pass through unchanged.
pub fn make_full_name(module: &str, name: &str) -> String {
    if module.is_empty() || name.contains("::") {
        name.to_string()
    } else {
        format!("{module}::{name}")
    }
}
