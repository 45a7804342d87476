use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{PAYMENT_CURRENCY, PAYMENT_METHODS_ALLOWED};

/// Payment intent as referenced by the ledger. Owned by the gateway; only
/// the id and the requested amount are kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub id: String,
    /// Amount in minor currency units (centavos).
    pub amount: i64,
    pub currency: String,
}

/// Converts a major-unit amount to minor units (x100), rounding half away
/// from zero. Returns None if the result does not fit in an i64.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(dec!(100))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

#[derive(Debug, Serialize)]
pub(super) struct PaymentIntentRequest {
    pub data: PaymentIntentRequestData,
}

#[derive(Debug, Serialize)]
pub(super) struct PaymentIntentRequestData {
    pub attributes: PaymentIntentAttributes,
}

#[derive(Debug, Serialize)]
pub(super) struct PaymentIntentAttributes {
    pub amount: i64,
    pub currency: String,
    pub payment_method_allowed: Vec<String>,
    pub description: String,
}

impl PaymentIntentRequest {
    pub fn new(amount_minor: i64, description: &str) -> Self {
        PaymentIntentRequest {
            data: PaymentIntentRequestData {
                attributes: PaymentIntentAttributes {
                    amount: amount_minor,
                    currency: PAYMENT_CURRENCY.to_string(),
                    payment_method_allowed: PAYMENT_METHODS_ALLOWED
                        .iter()
                        .map(|m| m.to_string())
                        .collect(),
                    description: description.to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PaymentIntentResponse {
    pub data: PaymentIntentResponseData,
}

#[derive(Debug, Deserialize)]
pub(super) struct PaymentIntentResponseData {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_unit_conversion_rounds_half_away_from_zero() {
        assert_eq!(to_minor_units(dec!(250.005)), Some(25001));
        assert_eq!(to_minor_units(dec!(250)), Some(25000));
        assert_eq!(to_minor_units(dec!(2.344)), Some(234));
        assert_eq!(to_minor_units(dec!(2.345)), Some(235));
        assert_eq!(to_minor_units(dec!(0.004)), Some(0));
    }

    #[test]
    fn amounts_too_large_for_minor_units_are_rejected() {
        assert_eq!(to_minor_units(Decimal::MAX), None);
        assert_eq!(to_minor_units(Decimal::MIN), None);
    }

    #[test]
    fn request_body_matches_the_gateway_wire_format() {
        let request = PaymentIntentRequest::new(25001, "rent");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["data"]["attributes"]["amount"], 25001);
        assert_eq!(json["data"]["attributes"]["currency"], "PHP");
        assert_eq!(
            json["data"]["attributes"]["payment_method_allowed"],
            serde_json::json!(["card", "paymaya", "gcash"])
        );
        assert_eq!(json["data"]["attributes"]["description"], "rent");
    }
}
