//! Client side of the contact form.
//!
//! [`ContactForm`] is a pure state machine: it consumes [`Event`]s produced by
//! the page and returns [`Effect`]s for the host to perform. The
//! [`FormController`] performs the network effect through a
//! [`ContactApiService`](portfolio_extern_contracts::contact::ContactApiService).

pub use controller::{FormController, NETWORK_ERROR};
pub use field::{FieldState, Indicator};
pub use form::{Banner, BannerKind, ContactForm, Effect, Event, SubmitButton, BANNER_DURATION};

mod controller;
mod field;
mod form;

/// Id of the form element.
pub const FORM_ELEMENT_ID: &str = "contact-form";

/// Id of the element showing the result banner.
pub const BANNER_ELEMENT_ID: &str = "form-message";
