use descent_core::{Shape, SparsityError, check::CheckError};

/// Errors that can occur when evaluating the brachistochrone ODE.
///
/// The rate equations are defined for every real input, so these only report
/// inputs whose layout disagrees with the node count or gravity shape the ODE
/// was constructed with.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("`{name}` has {actual} values, expected one per node ({expected})")]
    Length {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("gravity is {actual:?}, but the ODE was built for {expected:?} gravity")]
    GravityShape { expected: Shape, actual: Shape },

    #[error("partials do not fit their sparsity pattern")]
    Sparsity(#[from] SparsityError),

    #[error("partials check failed")]
    Check(#[from] CheckError),
}
