//! Rational coefficients and their common integer scale.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};

use crate::error::{Error, Result};

/// Shorthand for the rational `numer / denom`.
///
/// # Panics
///
/// Panics if `denom == 0`.
pub fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(numer.into(), denom.into())
}

/// Least common multiple of the denominators of `values` (1 for an empty slice).
pub fn get_lcm(values: &[BigRational]) -> BigInt {
    values.iter().fold(BigInt::one(), |acc, value| acc.lcm(value.denom()))
}

/// [`get_lcm`] of `weights` and `bias`, as a `δ_k` index.
pub fn scale_of(weights: &[BigRational], bias: &BigRational) -> Result<u32> {
    let mut values = weights.to_vec();
    values.push(bias.clone());
    let lcm = get_lcm(&values);
    lcm.to_u32().ok_or(Error::ScaleOverflow(lcm))
}

/// `value * scale`, which must be an integer.
///
/// # Panics
///
/// Panics if the denominator of `value` does not divide `scale`.
pub fn scaled(value: &BigRational, scale: u32) -> BigInt {
    let product = value * BigRational::from_integer(scale.into());
    assert!(product.is_integer(), "{} is not a multiple of 1/{}", value, scale);
    product.to_integer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_lcm() {
        assert_eq!(get_lcm(&[]), BigInt::from(1));
        assert_eq!(get_lcm(&[ratio(1, 2), ratio(1, 3)]), BigInt::from(6));
        assert_eq!(get_lcm(&[ratio(3, 4), ratio(1, 6), ratio(-5, 1)]), BigInt::from(12));
        // Normalized first: 2/4 = 1/2.
        assert_eq!(get_lcm(&[ratio(2, 4)]), BigInt::from(2));
    }

    #[test]
    fn test_scale_of() {
        assert_eq!(scale_of(&[ratio(1, 2), ratio(-2, 3)], &ratio(1, 4)), Ok(12));
        assert_eq!(scale_of(&[], &ratio(2, 1)), Ok(1));
        let huge = BigRational::new(BigInt::one(), BigInt::from(u64::MAX));
        assert!(matches!(scale_of(&[huge], &ratio(0, 1)), Err(Error::ScaleOverflow(_))));
    }

    #[test]
    fn test_scaled() {
        assert_eq!(scaled(&ratio(2, 3), 6), BigInt::from(4));
        assert_eq!(scaled(&ratio(-1, 2), 2), BigInt::from(-1));
    }

    #[test]
    #[should_panic(expected = "is not a multiple")]
    fn test_scaled_not_integer() {
        scaled(&ratio(1, 3), 2);
    }
}
