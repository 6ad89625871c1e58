use super::QuantumStrategy;
use crate::core::Ticks;

pub struct ArithmeticMean;

impl QuantumStrategy for ArithmeticMean {
    fn name(&self) -> &'static str {
        "arithmetic"
    }

    fn mean(&self, remaining: &[Ticks]) -> f64 {
        let sum: u128 = remaining.iter().map(|&r| r as u128).sum();
        sum as f64 / remaining.len() as f64
    }
}
