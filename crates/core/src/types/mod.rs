//! Shared domain types for orders and FBR tax scenarios.

mod order;
mod rate;
mod scenario;

pub use order::{BuyerRegistrationType, InvoiceType, Order, OrderAddon, OrderItem};
pub use rate::{FbrPrecision, RateLabel, format_rate, parse_rate, round_fbr};
pub use scenario::ScenarioId;
