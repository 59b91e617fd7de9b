use derive_more::derive::Display;
use thiserror::Error;

use crate::*;

#[derive(Clone, Display, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("{}", name)]
pub struct Object {
    name: Sym,
    tpe: Sym,
}

impl Object {
    pub fn new(name: impl Into<Sym>, tpe: impl Into<Sym>) -> Self {
        Self {
            name: name.into(),
            tpe: tpe.into(),
        }
    }

    pub fn name(&self) -> &Sym {
        &self.name
    }

    pub fn tpe(&self) -> &Sym {
        &self.tpe
    }
}

#[derive(Error, Debug)]
pub enum ObjectError {
    #[error("duplicate object : {0} and {1}")]
    DuplicateObjectDeclaration(Sym, Sym),
    #[error("unknown object {0}")]
    UnknownObject(Sym),
    #[error("unknown type {0}")]
    UnknownType(Sym),
}

/// The finite set of objects declared in a problem, indexed by their declared type.
#[derive(Clone, Debug, Default)]
pub struct Objects {
    objects: hashbrown::HashMap<Sym, Sym>,
    types: UserTypes,
}

impl Display for Objects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Objects:")?;
        for o in self.iter() {
            write!(f, "\n  {}: {}", o.name(), o.tpe())?;
        }
        writeln!(f)
    }
}

impl Objects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(&self) -> &UserTypes {
        &self.types
    }

    pub fn declare_type(&mut self, tpe: impl Into<Sym>, parent: Option<Sym>) {
        self.types.add_type(tpe, parent);
    }

    pub fn add_object(&mut self, name: impl Into<Sym>, tpe: impl Into<Sym>) -> Result<(), ObjectError> {
        let name = name.into();
        let tpe = tpe.into();
        if let Some((previous, previous_tpe)) = self.objects.get_key_value(&name) {
            if previous_tpe == &tpe {
                // objects are exactly the same, ignore as some domain definitions contain such patterns
                Ok(())
            } else {
                Err(ObjectError::DuplicateObjectDeclaration(name, previous.clone()))
            }
        } else {
            self.objects.insert(name, tpe);
            Ok(())
        }
    }

    pub fn get(&self, name: impl Into<Sym>) -> Result<Object, ObjectError> {
        let name = name.into();
        match self.objects.get(&name) {
            Some(tpe) => Ok(Object::new(name, tpe.clone())),
            None => Err(ObjectError::UnknownObject(name)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Object> + '_ {
        self.objects.iter().map(|(k, v)| Object::new(k.clone(), v.clone()))
    }

    /// All objects whose declared type is a subtype of (or equal to) `tpe`. Used to enumerate
    /// the finite domain of a parameter or universally-quantified variable.
    pub fn domain_of(&self, tpe: &Sym) -> Vec<Object> {
        self.iter().filter(|o| self.types.is_subtype_of(o.tpe(), tpe)).collect()
    }
}
