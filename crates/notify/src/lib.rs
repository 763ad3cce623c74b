//! Platform notifications: the in-process event bus and email delivery.
//!
//! - [`EventBus`] -- publish/subscribe hub backed by
//!   `tokio::sync::broadcast`. Handlers publish a [`DomainEvent`] whenever
//!   something notable happens (film submitted, purchase recorded,
//!   application received); the API binary runs a logging subscriber, and
//!   future delivery channels attach here.
//! - [`EmailDelivery`] -- async SMTP sender used to notify the review inbox
//!   when a distributor application arrives. Email failures are always
//!   non-fatal to the operation that triggered them.

pub mod bus;
pub mod email;

pub use bus::{DomainEvent, EventBus};
pub use email::{application_email, ApplicationNotification, EmailConfig, EmailDelivery, EmailError};
