use derive_more::derive::Display;
use thiserror::Error;

use crate::{utils::disp_iter, *};

#[derive(Error, Debug)]
pub enum FluentError {
    #[error("duplicate fluent declaration: {0} (previous declaration: {1})")]
    DuplicateFluent(Sym, Sym),
    #[error("unknown fluent {0}")]
    UnknownFluent(Sym),
}

#[derive(Debug, PartialEq, PartialOrd, Ord, Eq, Clone, Copy, Hash)]
pub struct FluentId(pub(crate) u32);

impl idmap::intid::IntegerId for FluentId {
    idmap::intid::impl_newtype_id_body!(for FluentId(u32));
}

#[derive(Clone, Debug, Default)]
pub struct Fluents {
    fluents: idmap::DirectIdMap<FluentId, Fluent>,
    next_fluent_id: u32,
}

impl Display for Fluents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fluents:\n  ")?;
        disp_iter(f, &self.iter().collect::<Vec<_>>(), "\n  ")
    }
}

impl Fluents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: FluentId) -> &Fluent {
        self.fluents.get(id).unwrap()
    }

    pub fn get_by_name(&self, name: &str) -> Option<FluentId> {
        self.fluents.iter().find(|&(_id, f)| name == f.name.as_str()).map(|(id, _)| id)
    }

    pub fn add_fluent(&mut self, name: impl Into<Sym>, parameters: Vec<Param>, return_type: Type) -> Result<FluentId, FluentError> {
        let fluent = Fluent {
            name: name.into(),
            parameters,
            return_type,
        };
        if let Some(other) = self.get_by_name(fluent.name().as_str()) {
            let other_sym = self.fluents.get(other).unwrap().name().clone();
            Err(FluentError::DuplicateFluent(fluent.name.clone(), other_sym))
        } else {
            let id = FluentId(self.next_fluent_id);
            self.next_fluent_id += 1;
            let prev = self.fluents.insert(id, fluent);
            debug_assert!(prev.is_none());
            Ok(id)
        }
    }

    /// Allocates a fresh fluent with a name guaranteed not to collide with an existing one.
    /// Used by the monitoring-atom allocator, which mints boolean fluents on the fly.
    pub fn add_fresh_boolean(&mut self, name: impl Into<Sym>) -> FluentId {
        self.add_fluent(name, Vec::new(), Type::Bool)
            .expect("monitoring atom name collided with an existing fluent")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fluent> + '_ {
        self.fluents.iter().map(|(_k, v)| v)
    }
    pub fn iter_with_id(&self) -> impl Iterator<Item = (FluentId, &Fluent)> + '_ {
        self.fluents.iter()
    }
}

#[derive(Clone, Debug, Display)]
#[display("{}{:?} -> {}", name, parameters, return_type)]
pub struct Fluent {
    pub name: Sym,
    pub parameters: Vec<Param>,
    pub return_type: Type,
}

impl Fluent {
    pub fn name(&self) -> &Sym {
        &self.name
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.return_type, Type::Bool)
    }
}
