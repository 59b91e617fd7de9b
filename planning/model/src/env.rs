use crate::Fluents;

/// Minimal display context: gives a [`Formula`](crate::Formula) access to the fluent
/// registry so it can print fluent names instead of bare ids.
#[derive(Copy, Clone)]
pub struct Env<'a> {
    pub fluents: &'a Fluents,
}

impl<'a> Env<'a> {
    pub fn new(fluents: &'a Fluents) -> Self {
        Self { fluents }
    }
}

/// Pairs a value with the [`Env`] needed to display it, following the same indirection the
/// rest of the model uses to avoid storing back-pointers inside immutable data.
#[derive(Copy, Clone)]
pub struct In<'a, T> {
    pub elem: T,
    pub env: Env<'a>,
}

impl<'a, T> std::ops::Div<T> for Env<'a> {
    type Output = In<'a, T>;
    fn div(self, rhs: T) -> Self::Output {
        In { elem: rhs, env: self }
    }
}
