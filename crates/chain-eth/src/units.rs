//! Exact conversion between human decimal strings and integer base units.
//!
//! Input grammar is `digits[.digits]`: ASCII digits only, no sign, exponent,
//! whitespace, or bare leading/trailing point. Output is the minimal form:
//! trailing fractional zeros are trimmed and whole values carry no point.
//! All arithmetic is done in `U256`; no floating point is involved.

use alloy_primitives::U256;

use crate::error::EthError;

/// Precision of the native currency (wei per ether).
pub const ETHER_DECIMALS: u8 = 18;

/// Largest precision whose scale factor `10^p` fits in a uint256.
pub const MAX_DECIMALS: u8 = 77;

/// A syntactically valid decimal amount that has not yet been scaled.
///
/// Splitting parsing from scaling lets callers reject malformed input before
/// the precision is known (e.g. before a token's `decimals()` is fetched).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalAmount {
    integer: String,
    fraction: String,
}

impl DecimalAmount {
    pub fn parse(input: &str) -> Result<Self, EthError> {
        let (integer, fraction) = match input.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (input, ""),
        };

        if integer.is_empty() {
            return Err(EthError::InvalidAmount(format!(
                "{input:?} has no integer digits"
            )));
        }
        if input.contains('.') && fraction.is_empty() {
            return Err(EthError::InvalidAmount(format!(
                "{input:?} has no fractional digits after the point"
            )));
        }
        if let Some(bad) = integer.chars().chain(fraction.chars()).find(|c| !c.is_ascii_digit()) {
            return Err(EthError::InvalidAmount(format!(
                "{input:?} contains {bad:?}; expected digits[.digits]"
            )));
        }

        Ok(Self {
            integer: integer.to_string(),
            fraction: fraction.to_string(),
        })
    }

    /// Number of fractional digits as written, trailing zeros included.
    pub fn fraction_digits(&self) -> usize {
        self.fraction.len()
    }

    /// Scales the amount by `10^precision`.
    ///
    /// Fails if the amount has more fractional digits than `precision`, or if
    /// the result does not fit in a uint256.
    pub fn to_base_units(&self, precision: u8) -> Result<U256, EthError> {
        let scale = scale_factor(precision)?;

        if self.fraction.len() > usize::from(precision) {
            return Err(EthError::InvalidAmount(format!(
                "{} fractional digits exceed precision {precision}",
                self.fraction.len()
            )));
        }

        let overflow = || EthError::InvalidAmount("amount does not fit in uint256".into());

        let whole = U256::from_str_radix(&self.integer, 10).map_err(|_| overflow())?;

        // Right-pad the fraction to exactly `precision` digits.
        let mut fraction = self.fraction.clone();
        fraction.extend(std::iter::repeat('0').take(usize::from(precision) - self.fraction.len()));
        let fractional = if fraction.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(&fraction, 10).map_err(|_| overflow())?
        };

        whole
            .checked_mul(scale)
            .and_then(|scaled| scaled.checked_add(fractional))
            .ok_or_else(overflow)
    }
}

/// Parses `input` and scales it to base units at `precision`.
pub fn to_base_units(input: &str, precision: u8) -> Result<U256, EthError> {
    DecimalAmount::parse(input)?.to_base_units(precision)
}

/// Renders a base-unit value as a minimal decimal string at `precision`.
pub fn to_decimal_string(value: U256, precision: u8) -> String {
    let digits = value.to_string();
    let precision = usize::from(precision);

    if precision == 0 {
        return digits;
    }

    let padded = format!("{digits:0>width$}", width = precision + 1);
    let (integer, fraction) = padded.split_at(padded.len() - precision);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

fn scale_factor(precision: u8) -> Result<U256, EthError> {
    if precision > MAX_DECIMALS {
        return Err(EthError::InvalidAmount(format!(
            "precision {precision} exceeds the maximum of {MAX_DECIMALS}"
        )));
    }
    Ok(U256::from(10u8).pow(U256::from(precision)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(value: u128) -> U256 {
        U256::from(value)
    }

    #[test]
    fn milli_ether_to_wei() {
        assert_eq!(to_base_units("0.001", 18).unwrap(), u(1_000_000_000_000_000));
    }

    #[test]
    fn six_decimal_token() {
        assert_eq!(to_base_units("10.5", 6).unwrap(), u(10_500_000));
        assert_eq!(to_base_units("10", 6).unwrap(), u(10_000_000));
    }

    #[test]
    fn fraction_at_zero_precision_is_rejected() {
        assert!(matches!(
            to_base_units("10.5", 0),
            Err(EthError::InvalidAmount(_))
        ));
        assert_eq!(to_base_units("10", 0).unwrap(), u(10));
    }

    #[test]
    fn over_precision_is_rejected_even_with_trailing_zeros() {
        assert!(to_base_units("1.0000001", 6).is_err());
        assert!(to_base_units("1.1230", 3).is_err());
        assert_eq!(to_base_units("1.123", 3).unwrap(), u(1123));
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for input in [
            "", ".", ".5", "5.", "-1", "+1", "1e18", "1E3", " 1", "1 ", "1,5", "0x10", "1.2.3",
            "١", "NaN",
        ] {
            assert!(
                matches!(to_base_units(input, 18), Err(EthError::InvalidAmount(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn leading_zeros_are_accepted() {
        assert_eq!(to_base_units("007.50", 2).unwrap(), u(750));
    }

    #[test]
    fn precision_above_uint256_range_is_rejected() {
        assert!(to_base_units("1", 78).is_err());
        assert!(to_base_units("1", MAX_DECIMALS).is_ok());
    }

    #[test]
    fn overflowing_amount_is_rejected() {
        // U256::MAX is roughly 1.16e77.
        assert!(to_base_units("200", 75).is_err());
        let max = U256::MAX.to_string();
        assert_eq!(to_base_units(&max, 0).unwrap(), U256::MAX);
        assert!(to_base_units(&format!("{max}0"), 0).is_err());
    }

    #[test]
    fn renders_minimal_form() {
        assert_eq!(to_decimal_string(u(1_000_000_000_000_000_000), 18), "1");
        assert_eq!(to_decimal_string(u(1_500_000_000_000_000_000), 18), "1.5");
        assert_eq!(to_decimal_string(u(1_000_000_000_000_000), 18), "0.001");
        assert_eq!(to_decimal_string(u(1), 18), "0.000000000000000001");
        assert_eq!(to_decimal_string(U256::ZERO, 18), "0");
        assert_eq!(to_decimal_string(u(10_500_000), 6), "10.5");
        assert_eq!(to_decimal_string(u(1000), 0), "1000");
        assert_eq!(to_decimal_string(u(102_000_000), 6), "102");
    }

    #[test]
    fn roundtrip_over_all_precisions() {
        let samples = [
            "0", "1", "10", "0.1", "0.01", "123.456", "999999999", "0.000000000000000001",
            "42.000000000000000042", "3.14159",
        ];

        for precision in 0..=18u8 {
            for sample in samples {
                let Ok(parsed) = DecimalAmount::parse(sample) else {
                    panic!("{sample} should parse");
                };
                if parsed.fraction_digits() > usize::from(precision) {
                    continue;
                }
                let base = to_base_units(sample, precision).unwrap();
                let rendered = to_decimal_string(base, precision);
                assert_eq!(
                    to_base_units(&rendered, precision).unwrap(),
                    base,
                    "{sample} at precision {precision} rendered as {rendered}"
                );
            }
        }
    }

    #[test]
    fn rendering_inverts_for_large_values() {
        for precision in [0u8, 6, 18, 30] {
            let value = U256::MAX;
            let rendered = to_decimal_string(value, precision);
            assert_eq!(to_base_units(&rendered, precision).unwrap(), value);
        }
    }

}
