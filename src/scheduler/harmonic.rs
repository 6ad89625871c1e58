use super::QuantumStrategy;
use crate::core::Ticks;

pub struct HarmonicMean;

impl QuantumStrategy for HarmonicMean {
    fn name(&self) -> &'static str {
        "harmonic"
    }

    fn mean(&self, remaining: &[Ticks]) -> f64 {
        let reciprocal_sum: f64 = remaining.iter().map(|&r| 1.0 / r as f64).sum();
        remaining.len() as f64 / reciprocal_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_closed_form() {
        // 2 / (1/2 + 1/8) = 3.2
        assert_eq!(HarmonicMean.quantum(&[2, 8]), Ok(3));
        assert_eq!(HarmonicMean.quantum(&[3, 6]), Ok(4));
    }

    #[test]
    fn all_ones() {
        assert_eq!(HarmonicMean.quantum(&[1, 1, 1]), Ok(1));
    }
}
