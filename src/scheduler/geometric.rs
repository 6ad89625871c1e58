use super::QuantumStrategy;
use crate::core::Ticks;

pub struct GeometricMean;

impl QuantumStrategy for GeometricMean {
    fn name(&self) -> &'static str {
        "geometric"
    }

    // exp(mean(ln x)) instead of the n-th root of the product, which
    // overflows after a handful of values.
    fn mean(&self, remaining: &[Ticks]) -> f64 {
        let log_sum: f64 = remaining.iter().map(|&r| (r as f64).ln()).sum();
        (log_sum / remaining.len() as f64).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_closed_form() {
        assert_eq!(GeometricMean.quantum(&[2, 8]), Ok(4));
        assert_eq!(GeometricMean.quantum(&[1, 3, 9]), Ok(3));
    }

    #[test]
    fn many_large_values_stay_finite() {
        let remaining = vec![1_000_000_000u64; 64];
        assert_eq!(GeometricMean.quantum(&remaining), Ok(1_000_000_000));
    }
}
