use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::payments::payments_errors::PaymentError;
use crate::payments::payments_model::PaymentIntent;

/// Trait for the payment gateway collaborator.
#[async_trait]
pub trait PaymentGatewayTrait: Send + Sync {
    /// Creates a payment intent for a positive major-unit amount. The
    /// gateway assigns the intent id.
    async fn create_intent(
        &self,
        amount: Decimal,
        description: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}
