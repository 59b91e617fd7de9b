use crate::*;
use Type::*;
use std::fmt::Debug;
use std::sync::Arc;

/// Hierarchy of user (object) types, supporting both flat and hierarchical typing.
#[derive(Clone, Debug)]
pub struct UserTypes {
    top_type: Sym,
    parents: hashbrown::HashMap<Sym, Vec<Sym>>,
}

impl Default for UserTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl UserTypes {
    pub fn new() -> Self {
        Self {
            top_type: Sym::from("object"),
            parents: Default::default(),
        }
    }

    pub fn top(&self) -> &Sym {
        &self.top_type
    }

    pub fn is_subtype_of(&self, a: &Sym, b: &Sym) -> bool {
        if a == b {
            true
        } else if let Some(parents) = self.parents.get(a) {
            parents.iter().any(|parent| self.is_subtype_of(parent, b))
        } else {
            false
        }
    }

    pub fn contains(&self, name: &Sym) -> bool {
        name == &self.top_type || self.parents.contains_key(name)
    }

    /// Declares a user type, optionally as a subtype of an already-declared one.
    pub fn add_type(&mut self, tpe: impl Into<Sym>, parent: Option<Sym>) {
        let tpe = tpe.into();
        let parent = parent.unwrap_or_else(|| self.top_type.clone());
        self.parents.entry(parent.clone()).or_default();
        self.parents.entry(tpe).or_default().push(parent);
    }
}

/// A type in the model: booleans (used for fluents and monitoring atoms), integers, or a
/// user-declared object type with a finite domain.
#[derive(Clone)]
pub enum Type {
    Bool,
    Int,
    User(Sym, Arc<UserTypes>),
}

impl Debug for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bool => write!(f, "bool"),
            Int => write!(f, "int"),
            User(name, _) => write!(f, "{name}"),
        }
    }
}
impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Type {
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        match (self, other) {
            (Bool, Bool) => true,
            (Int, Int) => true,
            (User(left, types), User(right, _)) => types.is_subtype_of(left, right),
            _ => false,
        }
    }

    /// Returns true if two types are overlapping
    pub fn overlaps(&self, other: &Type) -> bool {
        self.is_subtype_of(other) || other.is_subtype_of(self)
    }
}
