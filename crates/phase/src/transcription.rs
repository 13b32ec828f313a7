//! Gauss–Lobatto node grids.
//!
//! A phase is split into equally sized segments on the normalized phase time
//! `tau ∈ [-1, 1]`. Each segment holds `order` Legendre–Gauss–Lobatto nodes,
//! so adjacent segments share (duplicate) their boundary node. Even local
//! indices are state discretization nodes and odd local indices are
//! collocation nodes.

use std::f64::consts::PI;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when constructing a [`GaussLobatto`] grid.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("a phase needs at least one segment")]
    NoSegments,

    #[error("order must be odd and at least 3, got {0}")]
    Order(usize),
}

/// Gauss–Lobatto transcription settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GaussLobatto {
    num_segments: usize,
    order: usize,
}

impl Default for GaussLobatto {
    fn default() -> Self {
        Self {
            num_segments: 10,
            order: 3,
        }
    }
}

impl GaussLobatto {
    /// Creates validated transcription settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_segments` is zero or `order` is not an odd
    /// number of at least 3.
    pub fn new(num_segments: usize, order: usize) -> Result<Self, TranscriptionError> {
        if num_segments == 0 {
            return Err(TranscriptionError::NoSegments);
        }
        if order < 3 || order % 2 == 0 {
            return Err(TranscriptionError::Order(order));
        }
        Ok(Self {
            num_segments,
            order,
        })
    }

    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the `num_segments + 1` segment boundaries in phase tau.
    #[must_use]
    pub fn segment_ends(&self) -> Vec<f64> {
        let width = 2.0 / self.num_segments as f64;
        (0..=self.num_segments)
            .map(|i| if i == self.num_segments { 1.0 } else { -1.0 + width * i as f64 })
            .collect()
    }

    /// Lays out every node of the phase.
    #[must_use]
    pub fn grid(&self) -> Grid {
        let ends = self.segment_ends();
        let local_tau = lgl_nodes(self.order);
        let num_nodes = self.num_segments * self.order;

        let mut nodes = Vec::with_capacity(num_nodes);
        for (segment, bounds) in ends.windows(2).enumerate() {
            let (start, end) = (bounds[0], bounds[1]);
            for (local, stau) in local_tau.iter().enumerate() {
                nodes.push(Node {
                    ptau: start + (stau + 1.0) / 2.0 * (end - start),
                    segment,
                    local,
                });
            }
        }

        Grid {
            order: self.order,
            nodes,
        }
    }
}

/// Groups of nodes that phase variables are defined on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSubset {
    /// Every node, with segment boundaries duplicated.
    All,

    /// State discretization nodes, with segment boundaries duplicated.
    StateDisc,

    /// Collocation nodes.
    Col,

    /// First and last node of every segment.
    SegmentEnds,

    /// Nodes at which state values are design variables.
    StateInput,

    /// Nodes at which control values are design variables.
    ControlInput,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    ptau: f64,
    segment: usize,
    local: usize,
}

/// The nodes of a Gauss–Lobatto phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    order: usize,
    nodes: Vec<Node>,
}

impl Grid {
    /// Returns the total node count, including duplicated segment boundaries.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the indices of the nodes in `subset`, in phase order.
    #[must_use]
    pub fn indices(&self, subset: NodeSubset) -> Vec<usize> {
        let last = self.order - 1;
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                let duplicate = node.segment > 0 && node.local == 0;
                match subset {
                    NodeSubset::All => true,
                    NodeSubset::StateDisc => node.local % 2 == 0,
                    NodeSubset::Col => node.local % 2 == 1,
                    NodeSubset::SegmentEnds => node.local == 0 || node.local == last,
                    NodeSubset::StateInput => node.local % 2 == 0 && !duplicate,
                    NodeSubset::ControlInput => !duplicate,
                }
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns the phase tau of the nodes in `subset`.
    #[must_use]
    pub fn ptau(&self, subset: NodeSubset) -> Vec<f64> {
        self.indices(subset)
            .into_iter()
            .map(|i| self.nodes[i].ptau)
            .collect()
    }

    /// Returns the segment each node of `subset` belongs to.
    #[must_use]
    pub fn segments(&self, subset: NodeSubset) -> Vec<usize> {
        self.indices(subset)
            .into_iter()
            .map(|i| self.nodes[i].segment)
            .collect()
    }
}

/// Legendre–Gauss–Lobatto points on `[-1, 1]`, in ascending order.
///
/// The interior points are the roots of `P'_{n-1}`, found by Newton iteration
/// from the Chebyshev–Gauss–Lobatto points.
fn lgl_nodes(n: usize) -> Vec<f64> {
    let degree = n - 1;
    let mut x: Vec<f64> = (0..n)
        .map(|i| -(PI * i as f64 / degree as f64).cos())
        .collect();

    for _ in 0..100 {
        let mut max_change: f64 = 0.0;
        for xi in &mut x {
            let (p_prev, p) = legendre_pair(degree, *xi);
            let next = *xi - (*xi * p - p_prev) / (n as f64 * p);
            max_change = max_change.max((next - *xi).abs());
            *xi = next;
        }
        if max_change < f64::EPSILON {
            break;
        }
    }

    x[0] = -1.0;
    x[degree] = 1.0;
    x
}

/// Returns `(P_{k-1}(x), P_k(x))` by the three-term recurrence.
fn legendre_pair(k: usize, x: f64) -> (f64, f64) {
    let (mut p_prev, mut p) = (1.0, x);
    for j in 2..=k {
        let j = j as f64;
        let next = ((2.0 * j - 1.0) * x * p - (j - 1.0) * p_prev) / j;
        p_prev = p;
        p = next;
    }
    (p_prev, p)
}
