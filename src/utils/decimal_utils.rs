use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a stored TEXT amount into a Decimal, falling back to an f64 parse
/// for scientific notation. Unparseable values normalize to zero.
pub fn parse_decimal_or_zero(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(dec_val) => dec_val,
                None => {
                    log::error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name,
                        value_str,
                        f_val
                    );
                    Decimal::ZERO
                }
            },
            Err(e_f64) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name,
                    value_str,
                    e_decimal,
                    e_f64
                );
                Decimal::ZERO
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(parse_decimal_or_zero("1200", "rate"), dec!(1200));
        assert_eq!(parse_decimal_or_zero("0.35", "rate"), dec!(0.35));
    }

    #[test]
    fn scientific_notation_falls_back_to_f64() {
        assert_eq!(parse_decimal_or_zero("1e2", "rate"), dec!(100));
    }

    #[test]
    fn garbage_normalizes_to_zero() {
        assert_eq!(parse_decimal_or_zero("n/a", "rate"), Decimal::ZERO);
        assert_eq!(parse_decimal_or_zero("", "rate"), Decimal::ZERO);
    }
}
