use descent_core::Shape;

/// Standard gravitational acceleration, in m/s².
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Gravitational acceleration, either shared by every node or given per node.
#[derive(Debug, Clone, PartialEq)]
pub enum Gravity {
    Scalar(f64),
    PerNode(Vec<f64>),
}

impl Gravity {
    /// Returns the gravity acting at `node`.
    ///
    /// # Panics
    ///
    /// Panics if per-node gravity has no value at `node`.
    #[must_use]
    pub fn at(&self, node: usize) -> f64 {
        match self {
            Self::Scalar(g) => *g,
            Self::PerNode(g) => g[node],
        }
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        match self {
            Self::Scalar(_) => Shape::Scalar,
            Self::PerNode(_) => Shape::PerNode,
        }
    }

    /// Returns the gravity values as a flat slice.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Scalar(g) => std::slice::from_ref(g),
            Self::PerNode(g) => g,
        }
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::Scalar(STANDARD_GRAVITY)
    }
}

/// Node-indexed inputs to the brachistochrone ODE.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    /// Speed of the bead at each node, in m/s.
    pub v: Vec<f64>,

    /// Angle of the wire at each node, in radians.
    pub theta: Vec<f64>,

    /// Gravitational acceleration, in m/s².
    pub g: Gravity,
}

impl Input {
    /// Creates an input under standard gravity.
    #[must_use]
    pub fn new(v: Vec<f64>, theta: Vec<f64>) -> Self {
        Self {
            v,
            theta,
            g: Gravity::default(),
        }
    }

    /// Replaces the gravity.
    #[must_use]
    pub fn with_gravity(mut self, g: Gravity) -> Self {
        self.g = g;
        self
    }
}

/// Time derivatives of the bead's position and speed at each node.
#[derive(Debug, Clone, PartialEq)]
pub struct Rates {
    /// Horizontal velocity, in m/s.
    pub xdot: Vec<f64>,

    /// Vertical velocity, in m/s.
    pub ydot: Vec<f64>,

    /// Rate of change of speed, in m/s².
    pub vdot: Vec<f64>,
}
