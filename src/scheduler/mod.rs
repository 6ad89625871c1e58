//! Quantum policies: each maps the remaining burst times of the eligible
//! processes to a single time quantum.

pub mod arithmetic;
pub mod geometric;
pub mod harmonic;

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{core::Ticks, error::DomainError};
pub use arithmetic::ArithmeticMean;
pub use geometric::GeometricMean;
pub use harmonic::HarmonicMean;

/// Smallest quantum ever handed out, so every slice makes progress.
pub const MIN_QUANTUM: Ticks = 1;

pub trait QuantumStrategy {
    fn name(&self) -> &'static str;

    /// Raw mean over a non-empty set of positive values.
    fn mean(&self, remaining: &[Ticks]) -> f64;

    fn quantum(&self, remaining: &[Ticks]) -> Result<Ticks, DomainError> {
        if remaining.is_empty() {
            return Err(DomainError::EmptyRemainingSet);
        }
        if let Some(pos) = remaining.iter().position(|&r| r == 0) {
            return Err(DomainError::ZeroRemaining(pos));
        }
        // A lone process runs to completion.
        if let [only] = remaining {
            return Ok(*only);
        }

        let mean = self.mean(remaining);
        if !mean.is_finite() {
            return Err(DomainError::NonFinite(remaining.to_vec()));
        }
        Ok((mean.round() as Ticks).max(MIN_QUANTUM))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantumMode {
    #[default]
    Arithmetic,
    Geometric,
    Harmonic,
}

impl QuantumMode {
    pub const ALL: [QuantumMode; 3] = [Self::Arithmetic, Self::Geometric, Self::Harmonic];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arithmetic => "arithmetic",
            Self::Geometric => "geometric",
            Self::Harmonic => "harmonic",
        }
    }
}

impl QuantumStrategy for QuantumMode {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn mean(&self, remaining: &[Ticks]) -> f64 {
        match self {
            Self::Arithmetic => ArithmeticMean.mean(remaining),
            Self::Geometric => GeometricMean.mean(remaining),
            Self::Harmonic => HarmonicMean.mean(remaining),
        }
    }
}

impl FromStr for QuantumMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arithmetic" | "am" | "a" => Ok(Self::Arithmetic),
            "geometric" | "gm" | "g" => Ok(Self::Geometric),
            "harmonic" | "hm" | "h" => Ok(Self::Harmonic),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for QuantumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn compute_quantum(remaining: &[Ticks], mode: QuantumMode) -> Result<Ticks, DomainError> {
    mode.quantum(remaining)
}
