use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;

use crate::constants::{PAYMENT_CURRENCY, PAYMENT_GATEWAY_BASE_URL, PAYMENT_SECRET_KEY_ENV};
use crate::payments::payments_errors::PaymentError;
use crate::payments::payments_model::{
    to_minor_units, PaymentIntent, PaymentIntentRequest, PaymentIntentResponse,
};
use crate::payments::payments_traits::PaymentGatewayTrait;

/// PayMongo client. Authenticates with a basic-auth header built from the
/// secret key (key as username, empty password).
pub struct PayMongoGateway {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl PayMongoGateway {
    pub fn new(secret_key: String) -> Self {
        Self::with_base_url(secret_key, PAYMENT_GATEWAY_BASE_URL.to_string())
    }

    pub fn with_base_url(secret_key: String, base_url: String) -> Self {
        PayMongoGateway {
            client: Client::new(),
            secret_key,
            base_url,
        }
    }

    /// Builds a gateway from the `PAYMONGO_SECRET_KEY` environment variable.
    pub fn from_env() -> Result<Self, PaymentError> {
        std::env::var(PAYMENT_SECRET_KEY_ENV)
            .map(Self::new)
            .map_err(|_| PaymentError::MissingSecretKey)
    }
}

#[async_trait]
impl PaymentGatewayTrait for PayMongoGateway {
    async fn create_intent(
        &self,
        amount: Decimal,
        description: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if amount <= Decimal::ZERO {
            return Err(PaymentError::Validation(format!(
                "payment amount must be positive, got {}",
                amount
            )));
        }

        let amount_minor = to_minor_units(amount).ok_or_else(|| {
            PaymentError::Validation(format!("amount {} does not fit in minor units", amount))
        })?;

        let url = format!("{}/payment_intents", self.base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.secret_key, None::<&str>)
            .json(&PaymentIntentRequest::new(amount_minor, description))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PaymentError::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PaymentIntentResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::InvalidResponse(e.to_string()))?;

        debug!("Payment intent created: {}", parsed.data.id);
        Ok(PaymentIntent {
            id: parsed.data.id,
            amount: amount_minor,
            currency: PAYMENT_CURRENCY.to_string(),
        })
    }
}
