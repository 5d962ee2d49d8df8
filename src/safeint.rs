//! Integer arithmetic that reports overflow and division by zero instead of wrapping.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticError {
    Overflow { op: &'static str, lhs: i64, rhs: i64 },
    DivisionByZero { base: i64, exp: i64 },
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::Overflow { op, lhs, rhs } => {
                write!(f, "integer overflow occurred: {lhs} {op} {rhs}")
            }
            ArithmeticError::DivisionByZero { base, exp } => {
                write!(f, "division by zero: {base} ** {exp}")
            }
        }
    }
}

impl std::error::Error for ArithmeticError {}

/// Returns `x * y`, or an error when the product does not fit in an `i64`.
pub fn mul_i64(x: i64, y: i64) -> Result<i64, ArithmeticError> {
    x.checked_mul(y).ok_or(ArithmeticError::Overflow { op: "*", lhs: x, rhs: y })
}

/// Returns `b ** k` by binary exponentiation.
///
/// Negative exponents follow integer division semantics: `1 / b**(-k)` truncates
/// to zero for `|b| > 1`.
pub fn pow_i64(b: i64, k: i64) -> Result<i64, ArithmeticError> {
    if k < 0 {
        return match b {
            0 => Err(ArithmeticError::DivisionByZero { base: b, exp: k }),
            1 => Ok(1),
            -1 => Ok(if k & 1 == 1 { -1 } else { 1 }),
            _ => Ok(0),
        };
    }

    let mut result = 1i64;
    let mut x = b;
    let mut k = k;
    loop {
        if k & 1 == 1 {
            result = mul_i64(result, x)?;
        }
        k >>= 1;
        if k == 0 {
            break;
        }
        x = mul_i64(x, x)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_cases() {
        let cases: &[(i64, i64, Option<i64>)] = &[
            (-1, -1, Some(1)),
            (-1, 0, Some(0)),
            (0, -1, Some(0)),
            (0, 0, Some(0)),
            (1, -1, Some(-1)),
            (-4, 1 << 61, Some(i64::MIN)),
            (-8, 1 << 61, None),
            (2, 1 << 61, Some(1 << 62)),
            (8, 1 << 61, None),
            (i64::MIN, -1, None),
            (i64::MAX, 0, Some(0)),
        ];
        for &(x, y, want) in cases {
            assert_eq!(mul_i64(x, y).ok(), want, "{x} * {y}");
        }
    }

    #[test]
    fn mul_error_names_operands() {
        let err = mul_i64(8, 1 << 61).unwrap_err();
        assert_eq!(err, ArithmeticError::Overflow { op: "*", lhs: 8, rhs: 1 << 61 });
        assert!(err.to_string().starts_with("integer overflow occurred"));
    }

    #[test]
    fn pow_cases() {
        let cases: &[(i64, i64, Option<i64>)] = &[
            (-2, -1, Some(0)),
            (-1, -2, Some(1)),
            (-1, -1, Some(-1)),
            (-1, 0, Some(1)),
            (-1, 1, Some(-1)),
            (0, 0, Some(1)),
            (0, 1, Some(0)),
            (1, -2, Some(1)),
            (1, -1, Some(1)),
            (2, -1, Some(0)),
            (-2, -64, Some(0)),
            (-2, 63, Some(i64::MIN)),
            (-2, 64, None),
            (2, -63, Some(0)),
            (2, 62, Some(1 << 62)),
            (2, 63, None),
            (1024, 6, Some(1 << 60)),
            (1024, 7, None),
            (1000, 6, Some(1_000_000_000_000_000_000)),
        ];
        for &(b, k, want) in cases {
            assert_eq!(pow_i64(b, k).ok(), want, "{b} ** {k}");
        }
    }

    #[test]
    fn pow_zero_negative_exponent_is_division_by_zero() {
        assert_eq!(
            pow_i64(0, -1),
            Err(ArithmeticError::DivisionByZero { base: 0, exp: -1 })
        );
    }

    #[test]
    fn mul_matches_wide_arithmetic() {
        use proptest::prelude::*;

        proptest!(|(x in any::<i64>(), y in any::<i64>())| {
            let wide = x as i128 * y as i128;
            let fits = wide >= i64::MIN as i128 && wide <= i64::MAX as i128;
            match mul_i64(x, y) {
                Ok(z) => prop_assert!(fits && z as i128 == wide),
                Err(_) => prop_assert!(!fits),
            }
        });
    }

    #[test]
    fn pow_matches_exact_exponentiation() {
        use proptest::prelude::*;

        proptest!(|(b in -40i64..=40, k in 0i64..=70)| {
            let exact = (b as i128)
                .checked_pow(k as u32)
                .filter(|v| *v >= i64::MIN as i128 && *v <= i64::MAX as i128);
            match pow_i64(b, k) {
                Ok(v) => prop_assert_eq!(Some(v as i128), exact),
                Err(_) => prop_assert!(exact.is_none()),
            }
        });
    }
}
