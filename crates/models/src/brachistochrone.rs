//! Rates of a frictionless bead sliding along a wire under gravity.
//!
//! With the wire angle `theta` measured from the downward vertical, the bead
//! obeys
//!
//! ```text
//! xdot =  v sin(theta)
//! ydot = -v cos(theta)
//! vdot =  g cos(theta)
//! ```
//!
//! [`BrachistochroneOde`] evaluates these rates at every node of a fixed-size
//! discretization and provides their exact partial derivatives as explicitly
//! indexed sparse blocks.

mod check;
mod error;
mod input;
mod partials;

pub use check::PartialCheck;
pub use error::Error;
pub use input::{Gravity, Input, Rates, STANDARD_GRAVITY};
pub use partials::Partials;

use descent_core::{Differentiable, Model, Shape, Signature, SparseBlock, Variable};
use tracing::trace;

use partials::Layout;

const INPUTS_SCALAR_G: [Variable; 3] = [
    Variable::per_node("v", "m/s", "velocity"),
    Variable::scalar("g", "m/s**2", "acceleration of gravity"),
    Variable::per_node("theta", "rad", "angle of wire"),
];

const INPUTS_PER_NODE_G: [Variable; 3] = [
    Variable::per_node("v", "m/s", "velocity"),
    Variable::per_node("g", "m/s**2", "acceleration of gravity"),
    Variable::per_node("theta", "rad", "angle of wire"),
];

const OUTPUTS: [Variable; 3] = [
    Variable::per_node("xdot", "m/s", "horizontal velocity"),
    Variable::per_node("ydot", "m/s", "vertical velocity"),
    Variable::per_node("vdot", "m/s**2", "acceleration mag."),
];

/// The brachistochrone equations of motion over a fixed number of nodes.
///
/// The node count and gravity shape are fixed at construction, which fixes the
/// sparsity of every partial block. Evaluations only refill values.
#[derive(Debug, Clone)]
pub struct BrachistochroneOde {
    num_nodes: usize,
    gravity: Shape,
    layout: Layout,
}

impl BrachistochroneOde {
    /// Creates an ODE over `num_nodes` nodes with one gravity value shared by
    /// every node.
    #[must_use]
    pub fn new(num_nodes: usize) -> Self {
        Self::with_gravity_shape(num_nodes, Shape::Scalar)
    }

    /// Creates an ODE over `num_nodes` nodes with a gravity value per node.
    #[must_use]
    pub fn with_per_node_gravity(num_nodes: usize) -> Self {
        Self::with_gravity_shape(num_nodes, Shape::PerNode)
    }

    fn with_gravity_shape(num_nodes: usize, gravity: Shape) -> Self {
        Self {
            num_nodes,
            gravity,
            layout: Layout::new(num_nodes, gravity),
        }
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[must_use]
    pub fn gravity_shape(&self) -> Shape {
        self.gravity
    }

    fn validate(&self, input: &Input) -> Result<(), Error> {
        let expect_len = |name, actual| {
            if actual == self.num_nodes {
                Ok(())
            } else {
                Err(Error::Length {
                    name,
                    expected: self.num_nodes,
                    actual,
                })
            }
        };

        expect_len("v", input.v.len())?;
        expect_len("theta", input.theta.len())?;

        if input.g.shape() != self.gravity {
            return Err(Error::GravityShape {
                expected: self.gravity,
                actual: input.g.shape(),
            });
        }
        if let Gravity::PerNode(g) = &input.g {
            expect_len("g", g.len())?;
        }

        Ok(())
    }
}

impl Model for BrachistochroneOde {
    type Input = Input;
    type Output = Rates;
    type Error = Error;

    fn call(&self, input: &Input) -> Result<Rates, Error> {
        self.validate(input)?;
        trace!(num_nodes = self.num_nodes, "evaluating brachistochrone rates");

        let mut rates = Rates {
            xdot: Vec::with_capacity(self.num_nodes),
            ydot: Vec::with_capacity(self.num_nodes),
            vdot: Vec::with_capacity(self.num_nodes),
        };

        for (i, (&v, &theta)) in input.v.iter().zip(&input.theta).enumerate() {
            let (sin_theta, cos_theta) = theta.sin_cos();
            rates.vdot.push(input.g.at(i) * cos_theta);
            rates.xdot.push(v * sin_theta);
            rates.ydot.push(-v * cos_theta);
        }

        Ok(rates)
    }
}

impl Differentiable for BrachistochroneOde {
    type Partials = Partials;

    fn partials(&self, input: &Input) -> Result<Partials, Error> {
        self.validate(input)?;
        trace!(num_nodes = self.num_nodes, "evaluating brachistochrone partials");

        let n = self.num_nodes;
        let mut vdot_g = Vec::with_capacity(n);
        let mut vdot_theta = Vec::with_capacity(n);
        let mut xdot_v = Vec::with_capacity(n);
        let mut xdot_theta = Vec::with_capacity(n);
        let mut ydot_v = Vec::with_capacity(n);
        let mut ydot_theta = Vec::with_capacity(n);

        for (i, (&v, &theta)) in input.v.iter().zip(&input.theta).enumerate() {
            let (sin_theta, cos_theta) = theta.sin_cos();

            vdot_g.push(cos_theta);
            vdot_theta.push(-input.g.at(i) * sin_theta);

            xdot_v.push(sin_theta);
            xdot_theta.push(v * cos_theta);

            ydot_v.push(-cos_theta);
            ydot_theta.push(v * sin_theta);
        }

        let diagonal = |values| SparseBlock::new(self.layout.diagonal.clone(), values);

        Ok(Partials {
            vdot_g: SparseBlock::new(self.layout.gravity.clone(), vdot_g)?,
            vdot_theta: diagonal(vdot_theta)?,
            xdot_v: diagonal(xdot_v)?,
            xdot_theta: diagonal(xdot_theta)?,
            ydot_v: diagonal(ydot_v)?,
            ydot_theta: diagonal(ydot_theta)?,
        })
    }
}

impl Signature for BrachistochroneOde {
    fn inputs(&self) -> &[Variable] {
        match self.gravity {
            Shape::Scalar => &INPUTS_SCALAR_G,
            Shape::PerNode => &INPUTS_PER_NODE_G,
        }
    }

    fn outputs(&self) -> &[Variable] {
        &OUTPUTS
    }
}
