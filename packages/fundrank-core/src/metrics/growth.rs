//! Compounded growth.

use super::finite;

/// Compound annual growth rate of a NAV series.
///
/// The number of years is the observation count divided by `trading_days`,
/// so the exponent reflects how many NAVs were observed rather than elapsed
/// calendar time.
///
/// # Returns
///
/// `None` for fewer than two NAVs, or when the result is not finite
/// (overflow of very short, fast-growing series).
///
/// # Example
///
/// ```rust
/// use fundrank_core::cagr;
///
/// // 252 observations cover exactly one year
/// let mut navs = vec![100.0; 252];
/// navs[251] = 110.0;
/// assert!((cagr(&navs, 252).unwrap() - 0.10).abs() < 1e-12);
/// ```
pub fn cagr(navs: &[f64], trading_days: u32) -> Option<f64> {
    let (&first, &last) = match navs {
        [first, .., last] => (first, last),
        _ => return None,
    };

    let years = navs.len() as f64 / f64::from(trading_days);
    finite((last / first).powf(1.0 / years) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cagr_uses_observation_count() {
        let navs = [100.0, 110.0, 121.0];
        let expected = 1.21_f64.powf(252.0 / 3.0) - 1.0;

        assert_relative_eq!(cagr(&navs, 252).unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_cagr_two_years() {
        // 504 observations at 252 per year = 2 years, 21% total growth = 10% a year
        let mut navs = vec![100.0; 504];
        navs[503] = 121.0;

        assert_relative_eq!(cagr(&navs, 252).unwrap(), 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_cagr_loss() {
        let mut navs = vec![100.0; 252];
        navs[251] = 80.0;

        assert_relative_eq!(cagr(&navs, 252).unwrap(), -0.20, epsilon = 1e-12);
    }

    #[test]
    fn test_cagr_insufficient_data() {
        assert_eq!(cagr(&[], 252), None);
        assert_eq!(cagr(&[100.0], 252), None);
    }

    #[test]
    fn test_cagr_overflow_is_undefined() {
        // 1000x growth over two observations, annualized, overflows
        assert_eq!(cagr(&[1.0, 1000.0], 252), None);
    }

    #[test]
    fn test_cagr_negative_ratio_is_undefined() {
        assert_eq!(cagr(&[100.0, -50.0, -40.0, -30.0, -40.0], 252), None);
    }
}
