//! Static metadata describing a model's named inputs and outputs.

use serde::Serialize;

/// How a variable is laid out across discretization nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// One value per node.
    PerNode,

    /// A single value shared by every node.
    Scalar,
}

/// A named model variable with its units and a short description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: &'static str,
    pub units: &'static str,
    pub description: &'static str,
    pub shape: Shape,
}

impl Variable {
    /// Declares a per-node variable.
    #[must_use]
    pub const fn per_node(
        name: &'static str,
        units: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            units,
            description,
            shape: Shape::PerNode,
        }
    }

    /// Declares a scalar variable shared by every node.
    #[must_use]
    pub const fn scalar(
        name: &'static str,
        units: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            units,
            description,
            shape: Shape::Scalar,
        }
    }
}

/// Exposes a model's input and output variables by name.
///
/// Setup code uses the signature to check that the names it wires together
/// actually exist on the model.
pub trait Signature {
    /// Returns the model's input variables.
    fn inputs(&self) -> &[Variable];

    /// Returns the model's output variables.
    fn outputs(&self) -> &[Variable];

    /// Looks up an input variable by name.
    fn input(&self, name: &str) -> Option<&Variable> {
        self.inputs().iter().find(|var| var.name == name)
    }

    /// Looks up an output variable by name.
    fn output(&self, name: &str) -> Option<&Variable> {
        self.outputs().iter().find(|var| var.name == name)
    }
}
