mod address;
mod coordinates;
pub mod coupon;
pub mod currency;
mod quote;
mod route;
mod vehicle;

pub use address::Address;
pub use coordinates::Coordinates;
pub use quote::{eta_days, FormattedQuote, Quote, QuoteRequest, RATE_PER_KM};
pub use route::RouteSummary;
pub use vehicle::VehicleType;
