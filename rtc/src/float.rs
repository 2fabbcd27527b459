use float_cmp::approx_eq;

/// Offset used to keep secondary rays (shadows, reflections, refractions)
/// clear of the surface that spawned them, and the default comparison
/// tolerance.
pub const EPSILON: f64 = 1e-4;

/// Looser tolerance for values that only carry four significant digits,
/// like colors after shading.
pub const LOW_EPSILON: f64 = 1e-3;

pub trait ApproxEq<Rhs = Self> {
    fn approx_eq(self, other: Rhs) -> bool;
    fn approx_eq_low_precision(self, other: Rhs) -> bool;
    fn approx_eq_epsilon(self, other: Rhs, epsilon: f64) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(self, other: Self) -> bool {
        self.approx_eq_epsilon(other, EPSILON)
    }

    fn approx_eq_low_precision(self, other: Self) -> bool {
        self.approx_eq_epsilon(other, LOW_EPSILON)
    }

    fn approx_eq_epsilon(self, other: Self, epsilon: f64) -> bool {
        approx_eq!(f64, self, other, epsilon = epsilon)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn values_within_epsilon_compare_equal() {
        assert!(1.0.approx_eq(1.0 + EPSILON / 2.0));
        assert!(!1.0.approx_eq(1.0 + EPSILON * 2.0));
    }

    #[test]
    fn low_precision_is_looser() {
        assert!(0.2857.approx_eq_low_precision(0.285714));
        assert!(!0.28.approx_eq_low_precision(0.29));
    }
}
