use std::sync::Arc;

use descent_core::{Shape, SparseBlock, Sparsity};

/// Closed-form partial derivatives of the brachistochrone rates.
///
/// Every block is diagonal in the node index except `vdot_g` under scalar
/// gravity, which is a single column broadcast to every node.
#[derive(Debug, Clone, PartialEq)]
pub struct Partials {
    pub vdot_g: SparseBlock,
    pub vdot_theta: SparseBlock,
    pub xdot_v: SparseBlock,
    pub xdot_theta: SparseBlock,
    pub ydot_v: SparseBlock,
    pub ydot_theta: SparseBlock,
}

impl Partials {
    /// Returns the block for `∂of/∂wrt`, if it is structurally nonzero.
    #[must_use]
    pub fn get(&self, of: &str, wrt: &str) -> Option<&SparseBlock> {
        self.blocks()
            .find(|(o, w, _)| *o == of && *w == wrt)
            .map(|(_, _, block)| block)
    }

    /// Iterates over `(of, wrt, block)` for every declared block.
    pub fn blocks(&self) -> impl Iterator<Item = (&'static str, &'static str, &SparseBlock)> {
        [
            ("vdot", "g", &self.vdot_g),
            ("vdot", "theta", &self.vdot_theta),
            ("xdot", "v", &self.xdot_v),
            ("xdot", "theta", &self.xdot_theta),
            ("ydot", "v", &self.ydot_v),
            ("ydot", "theta", &self.ydot_theta),
        ]
        .into_iter()
    }
}

/// Sparsity patterns fixed by the node count and gravity shape.
#[derive(Debug, Clone)]
pub(super) struct Layout {
    pub(super) diagonal: Arc<Sparsity>,
    pub(super) gravity: Arc<Sparsity>,
}

impl Layout {
    pub(super) fn new(num_nodes: usize, gravity: Shape) -> Self {
        let diagonal = Arc::new(Sparsity::diagonal(num_nodes));
        let gravity = match gravity {
            Shape::Scalar => Arc::new(Sparsity::column(num_nodes)),
            Shape::PerNode => Arc::clone(&diagonal),
        };
        Self { diagonal, gravity }
    }
}
