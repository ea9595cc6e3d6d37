use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use cosmwasm_std::{Decimal, Uint128};

use crate::errors::RewardsError;

pub const BPS_DENOMINATOR: u64 = 10_000;
/// Number of fractional digits kept at the engine's boundary.
pub const BOUNDARY_SCALE: i64 = 2;

pub fn parse_decimal(field: &str, value: &str) -> Result<BigDecimal, RewardsError> {
    BigDecimal::from_str(value.trim()).map_err(|_| RewardsError::InvalidAmount {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parses a non-negative decimal amount.
pub fn parse_amount(field: &str, value: &str) -> Result<BigDecimal, RewardsError> {
    let amount = parse_decimal(field, value)?;
    if amount < BigDecimal::zero() {
        return Err(RewardsError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(amount)
}

pub fn from_decimal(field: &str, value: Decimal) -> Result<BigDecimal, RewardsError> {
    parse_decimal(field, &value.to_string())
}

pub fn from_uint128(field: &str, value: Uint128) -> Result<BigDecimal, RewardsError> {
    parse_decimal(field, &value.to_string())
}

pub fn bps_to_rate(field: &str, bps: u64) -> Result<BigDecimal, RewardsError> {
    if bps > BPS_DENOMINATOR {
        return Err(RewardsError::InvalidCommission {
            field: field.to_string(),
            bps,
        });
    }
    Ok(BigDecimal::from(bps) / BigDecimal::from(BPS_DENOMINATOR))
}

/// Divides two high precision values, refusing a zero denominator.
pub fn checked_ratio(
    numerator: &BigDecimal,
    denominator: &BigDecimal,
) -> Result<BigDecimal, RewardsError> {
    if denominator.is_zero() {
        return Err(RewardsError::CustomError {
            msg: "Division by zero in voting power calculation".to_string(),
        });
    }
    Ok(numerator / denominator)
}

pub fn round_to_boundary(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(BOUNDARY_SCALE, RoundingMode::HalfUp)
}

/// Renders an amount rounded half-up to two fractional digits, always in plain notation.
pub fn format_amount(value: &BigDecimal) -> String {
    let (digits, _) = round_to_boundary(value).as_bigint_and_exponent();
    let digits = digits.to_string();
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(abs) => ("-", abs),
        None => ("", digits.as_str()),
    };
    let padded = format!("{:0>width$}", digits, width = BOUNDARY_SCALE as usize + 1);
    let (integer, fraction) = padded.split_at(padded.len() - BOUNDARY_SCALE as usize);
    format!("{sign}{integer}.{fraction}")
}

/// Scales an on-chain base-unit amount to display units.
pub fn scale_down(value: BigDecimal, exponent: u32) -> BigDecimal {
    let (digits, scale) = value.into_bigint_and_exponent();
    BigDecimal::new(digits, scale + i64::from(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn rounds_half_up_at_two_digits() {
        assert_eq!(format_amount(&dec("0.005")), "0.01");
        assert_eq!(format_amount(&dec("0.004999")), "0.00");
        assert_eq!(format_amount(&dec("2.675")), "2.68");
        assert_eq!(format_amount(&dec("855")), "855.00");
        assert_eq!(format_amount(&dec("0")), "0.00");
        assert_eq!(format_amount(&dec("-1.235")), "-1.24");
        assert_eq!(format_amount(&dec("1234567.891")), "1234567.89");
    }

    #[test]
    fn parse_amount_rejects_negative_and_garbage() {
        assert_eq!(parse_amount("locked_amount", "100").unwrap(), dec("100"));
        assert_eq!(
            parse_amount("locked_amount", "-1"),
            Err(RewardsError::InvalidAmount {
                field: "locked_amount".to_string(),
                value: "-1".to_string(),
            })
        );
        assert!(parse_amount("tribute", "ten").is_err());
        assert_eq!(parse_decimal("delta", "-3.5").unwrap(), dec("-3.5"));
    }

    #[test]
    fn bps_conversion() {
        assert_eq!(bps_to_rate("protocol", 1000).unwrap(), dec("0.1"));
        assert_eq!(bps_to_rate("protocol", 0).unwrap(), dec("0"));
        assert_eq!(bps_to_rate("protocol", 10_000).unwrap(), dec("1"));
        assert_eq!(
            bps_to_rate("hydromancer", 10_001),
            Err(RewardsError::InvalidCommission {
                field: "hydromancer".to_string(),
                bps: 10_001,
            })
        );
    }

    #[test]
    fn cosmwasm_values_convert_exactly() {
        assert_eq!(
            from_decimal("ratio", Decimal::permille(1150)).unwrap(),
            dec("1.15")
        );
        assert_eq!(
            from_uint128("balance", Uint128::new(1_500_000)).unwrap(),
            dec("1500000")
        );
        assert_eq!(scale_down(dec("1500000"), 6), dec("1.5"));
    }

    #[test]
    fn ratio_keeps_high_precision() {
        let third = checked_ratio(&dec("1"), &dec("3")).unwrap();
        assert!(third.digits() >= 50);
        assert!(checked_ratio(&dec("1"), &dec("0")).is_err());
    }
}
