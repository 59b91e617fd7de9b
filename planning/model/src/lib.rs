mod actions;
mod effects;
mod env;
pub mod errors;
mod expressions;
mod fluents;
mod goals;
mod grounder;
mod model;
mod objects;
mod params;
mod sym;
mod types;
pub(crate) mod utils;

use std::fmt::{Debug, Display};

pub use actions::*;
pub use effects::*;
pub use env::*;
pub use errors::ModelError;
pub use expressions::*;
pub use fluents::*;
pub use goals::*;
pub use grounder::*;
pub use model::*;
pub use objects::*;
pub use params::*;
pub use sym::*;
pub use types::*;
