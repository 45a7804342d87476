use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid payment request: {0}")]
    Validation(String),

    #[error("Payment gateway request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx gateway response; carries the upstream payload verbatim.
    #[error("Payment gateway returned {status}: {body}")]
    Gateway { status: u16, body: String },

    #[error("Unexpected payment gateway response: {0}")]
    InvalidResponse(String),

    #[error("PAYMONGO_SECRET_KEY is not set")]
    MissingSecretKey,
}
