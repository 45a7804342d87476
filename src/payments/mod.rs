mod payments_errors;
mod payments_model;
mod payments_provider;
mod payments_traits;

pub use payments_errors::PaymentError;
pub use payments_model::{to_minor_units, PaymentIntent};
pub use payments_provider::PayMongoGateway;
pub use payments_traits::PaymentGatewayTrait;
