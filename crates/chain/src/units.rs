//! Scaling of integer base-unit amounts into decimal strings.

use alloy::primitives::U256;
use alloy::primitives::utils::format_units;

use crate::ChainError;

/// Render `amount` base units with `decimals` places of precision.
///
/// Trailing fractional zeros are dropped but one fractional digit is always
/// kept, so `1_000_000` at 6 decimals renders as `"1.0"`.
pub fn scale_units(amount: U256, decimals: u8) -> Result<String, ChainError> {
    let formatted =
        format_units(amount, decimals).map_err(|e| ChainError::Units(e.to_string()))?;

    let Some((int_part, frac_part)) = formatted.split_once('.') else {
        return Ok(format!("{}.0", formatted));
    };

    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        Ok(format!("{}.0", int_part))
    } else {
        Ok(format!("{}.{}", int_part, frac))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_units() {
        let one_eth = U256::from(10u64).pow(U256::from(18));
        assert_eq!(scale_units(one_eth, 18).unwrap(), "1.0");
        assert_eq!(scale_units(U256::from(1_000_000u64), 6).unwrap(), "1.0");
    }

    #[test]
    fn test_fractional_units() {
        assert_eq!(scale_units(U256::from(1_234_500u64), 6).unwrap(), "1.2345");
        assert_eq!(scale_units(U256::from(50_000_000u64), 8).unwrap(), "0.5");
        assert_eq!(scale_units(U256::from(1u64), 18).unwrap(), "0.000000000000000001");
    }

    #[test]
    fn test_zero() {
        assert_eq!(scale_units(U256::ZERO, 18).unwrap(), "0.0");
        assert_eq!(scale_units(U256::ZERO, 6).unwrap(), "0.0");
    }

    #[test]
    fn test_large_amount() {
        // 123,456.789 USDT
        assert_eq!(
            scale_units(U256::from(123_456_789_000u64), 6).unwrap(),
            "123456.789"
        );
    }
}
