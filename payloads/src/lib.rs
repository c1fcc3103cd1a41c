//! Wire types for the envdesk backend bridge.
//!
//! The native backend owns environment resolution, shims, the package cache
//! and git plumbing. This crate only describes the commands it accepts and
//! the JSON it returns, plus a typed [`APIClient`] that routes every command
//! through a [`Transport`].

pub mod api_client;
pub mod error;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError, HttpTransport, Transport};
pub use error::{BackendErrorBody, ErrorKind, classify_message};
pub use requests::{Validate, ValidationError};
pub use responses::*;
