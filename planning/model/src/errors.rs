use thiserror::Error;

use crate::{FluentError, ObjectError};

/// Top-level error for anything that can go wrong while building or grounding a [`crate::Problem`].
#[derive(Error, Debug)]
pub enum ModelError {
    #[error(transparent)]
    Fluent(#[from] FluentError),
    #[error(transparent)]
    Object(#[from] ObjectError),
    #[error("unbound parameter ?{0} in formula")]
    UnboundParameter(crate::Sym),
    #[error("duplicate action declaration: {0}")]
    DuplicateAction(crate::Sym),
    #[error("unknown action {0}")]
    UnknownAction(crate::Sym),
}
