//! Client side of the quote flow: the wizard's state, its per-step rules and
//! the calls it makes to the quote service. Nothing here touches a DOM; a
//! front end feeds user events in and renders what comes out.

pub mod client;
pub mod controller;
pub mod masks;
pub mod state;
pub mod validation;
pub mod view;

pub use client::{HttpQuoteClient, QuoteClient};
pub use controller::{FormController, Modal, SubmitControl, SubmitOutcome};
pub use state::{Field, FormState};
pub use validation::{validate_step, FieldError, ValidationResult};
pub use view::{CouponFeedback, QuoteView};
