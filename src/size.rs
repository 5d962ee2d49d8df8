// Human-readable byte counts ("10K", "2MiB", "5GB", "4b").

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorKind, Result, SplitError};
use crate::safeint::{mul_i64, pow_i64};

const BLOCK_SIZE: i64 = 512;

fn size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9]+)(?:(b)(?:iB|B)?|([KkMmGTPEZYQR])(iB|B)?)?$")
            .expect("size pattern is valid")
    })
}

fn unit_exponent(unit: &str) -> Option<i64> {
    let exp = match unit {
        "K" | "k" => 1,
        "M" | "m" => 2,
        "G" => 3,
        "T" => 4,
        "P" => 5,
        "E" => 6,
        "Z" => 7,
        "Y" => 8,
        "R" => 9,
        "Q" => 10,
        _ => return None,
    };
    Some(exp)
}

/// Converts a size string to a positive byte count, e.g. `"10K"` -> `10 * 1024`.
///
/// A unit without scale or with `iB` is binary (powers of 1024); `B` makes it
/// decimal (powers of 1000). `b` is a 512-byte block.
pub fn parse_size(text: &str) -> Result<i64> {
    let invalid = || format!("invalid number of bytes: {:?}", text);
    let too_large = || format!("{}: value too large for defined data type", invalid());

    let Some(caps) = size_re().captures(text) else {
        return Err(SplitError::new(ErrorKind::Syntax, invalid()));
    };

    let digits = &caps[1];
    let x: i64 = digits
        .parse()
        .map_err(|e| SplitError::with_cause(ErrorKind::ArithmeticOverflow, too_large(), e))?;

    let multiplier = if caps.get(2).is_some() {
        BLOCK_SIZE
    } else if let Some(unit) = caps.get(3) {
        let base = match caps.get(4).map(|m| m.as_str()) {
            Some("B") => 1000,
            _ => 1024,
        };
        let exp = unit_exponent(unit.as_str())
            .ok_or_else(|| SplitError::new(ErrorKind::Syntax, invalid()))?;
        pow_i64(base, exp)
            .map_err(|e| SplitError::with_cause(ErrorKind::ArithmeticOverflow, too_large(), e))?
    } else {
        1
    };

    let n = mul_i64(x, multiplier)
        .map_err(|e| SplitError::with_cause(ErrorKind::ArithmeticOverflow, too_large(), e))?;
    if n <= 0 {
        return Err(SplitError::invalid_argument(format!(
            "{}: numerical result out of range",
            invalid()
        )));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: i64 = 1 << 60;

    #[test]
    fn accepted_sizes() {
        let cases: &[(&str, i64)] = &[
            ("2", 2),
            ("007", 7),
            ("2b", 2 * 512),
            ("2bB", 2 * 512),
            ("2biB", 2 * 512),
            ("2K", 2 * 1024),
            ("2k", 2 * 1024),
            ("2KiB", 2 * 1024),
            ("2KB", 2 * 1000),
            ("3m", 3 * 1024 * 1024),
            ("3MB", 3_000_000),
            ("1G", 1 << 30),
            ("1T", 1 << 40),
            ("1PB", 1_000_000_000_000_000),
            ("7E", 7 * E),
            ("9EB", 9_000_000_000_000_000_000),
        ];
        for &(input, want) in cases {
            assert_eq!(parse_size(input).unwrap(), want, "{input}");
        }
    }

    #[test]
    fn syntax_errors() {
        for input in ["", "1.5", "1.5K", "-1", "+1", "2iB", "2B", "X", "2X", "2KX", "K", " 2", "2 K", "２"] {
            let err = parse_size(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax, "{input:?}");
        }
    }

    #[test]
    fn overflow_errors_keep_cause() {
        for input in ["8E", "10EB", "1Z", "1ZB", "1Y", "1R", "1Q", "99999999999999999999"] {
            let err = parse_size(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArithmeticOverflow, "{input}");
            assert!(std::error::Error::source(&err).is_some(), "{input}");
            assert!(err.to_string().contains("value too large"), "{input}");
        }
    }

    #[test]
    fn zero_is_rejected() {
        for input in ["0", "0K", "00b"] {
            let err = parse_size(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{input}");
        }
    }
}
