use arcstr::ArcStr;
use std::fmt::{Debug, Display};

/// A cheaply-clonable name (object, fluent, action, type, ...).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sym(ArcStr);

impl Sym {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Sym {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::borrow::Borrow<str> for Sym {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Sym {
    fn from(value: &str) -> Self {
        Sym(ArcStr::from(value))
    }
}

impl From<String> for Sym {
    fn from(value: String) -> Self {
        Sym(ArcStr::from(value))
    }
}

impl From<&Sym> for Sym {
    fn from(value: &Sym) -> Self {
        value.clone()
    }
}

impl Debug for Sym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Sym {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
