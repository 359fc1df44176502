//! Small dimension-tagged vector algebra used by constant folding.
//!
//! A [`Vector`] always carries four lanes; `dim` says how many are live.
//! Dimension 0 is the void value. It is never inferred from the lane
//! contents: an all-zero `v2` is a real value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest supported dimension.
pub const MAX_DIM: u8 = 4;

/// Four `f32` lanes plus the active lane count.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    lanes: [f32; 4],
    dim: u8,
}

impl Vector {
    /// The void value (dimension 0).
    pub const VOID: Vector = Vector {
        lanes: [0.0; 4],
        dim: 0,
    };

    /// Build a vector from lanes and a dimension; lanes past `dim` are zeroed.
    pub fn new(lanes: [f32; 4], dim: u8) -> Self {
        let dim = dim.min(MAX_DIM);
        let mut out = [0.0; 4];
        out[..dim as usize].copy_from_slice(&lanes[..dim as usize]);
        Self { lanes: out, dim }
    }

    /// A dimension-1 value.
    pub fn scalar(x: f32) -> Self {
        Self::new([x, 0.0, 0.0, 0.0], 1)
    }

    /// Build from up to four components. Returns `None` for more than four.
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        if values.len() > MAX_DIM as usize {
            return None;
        }
        let mut lanes = [0.0; 4];
        lanes[..values.len()].copy_from_slice(values);
        Some(Self::new(lanes, values.len() as u8))
    }

    pub fn dim(&self) -> u8 {
        self.dim
    }

    pub fn is_void(&self) -> bool {
        self.dim == 0
    }

    /// All four lanes, including inactive ones.
    pub fn lanes(&self) -> [f32; 4] {
        self.lanes
    }

    /// The active lanes.
    pub fn components(&self) -> &[f32] {
        &self.lanes[..self.dim as usize]
    }

    /// First lane; the value of a scalar.
    pub fn x(&self) -> f32 {
        self.lanes[0]
    }

    /// Component-wise sum. The caller checks dimensions; the result keeps `self.dim`.
    pub fn add(self, other: Vector) -> Vector {
        self.zip(other, |a, b| a + b)
    }

    /// Component-wise difference. The result keeps `self.dim`.
    pub fn sub(self, other: Vector) -> Vector {
        self.zip(other, |a, b| a - b)
    }

    /// Multiply every active lane by `factor`.
    pub fn scale(self, factor: f32) -> Vector {
        let mut lanes = self.lanes;
        for lane in lanes.iter_mut().take(self.dim as usize) {
            *lane *= factor;
        }
        Vector::new(lanes, self.dim)
    }

    /// Negate every active lane.
    pub fn neg(self) -> Vector {
        self.scale(-1.0)
    }

    /// Dot product over the active lanes of `self`.
    pub fn dot(self, other: Vector) -> f32 {
        self.components()
            .iter()
            .zip(other.lanes.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Pack `self`'s lanes then `other`'s. `None` when the result would exceed four lanes.
    pub fn concat(self, other: Vector) -> Option<Vector> {
        let dim = self.dim + other.dim;
        if dim > MAX_DIM {
            return None;
        }
        let mut lanes = [0.0; 4];
        lanes[..self.dim as usize].copy_from_slice(self.components());
        lanes[self.dim as usize..dim as usize].copy_from_slice(other.components());
        Some(Vector::new(lanes, dim))
    }

    fn zip(self, other: Vector, f: impl Fn(f32, f32) -> f32) -> Vector {
        let mut lanes = [0.0; 4];
        for (i, lane) in lanes.iter_mut().enumerate().take(self.dim as usize) {
            *lane = f(self.lanes[i], other.lanes[i]);
        }
        Vector::new(lanes, self.dim)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.lanes;
        match self.dim {
            1 => write!(f, "{x:.4}"),
            2 => write!(f, "v2 {x:.4} {y:.4}"),
            3 => write!(f, "v3 {x:.4} {y:.4} {z:.4}"),
            4 => write!(f, "v4 {x:.4} {y:.4} {z:.4} {w:.4}"),
            _ => f.write_str("null"),
        }
    }
}
