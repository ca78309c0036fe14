//! Outbound email transports

mod capture;
mod smtp;
mod traits;

#[cfg(test)]
pub mod mock;

pub use capture::CaptureTransport;
pub use smtp::SmtpTransport;
pub use traits::*;

#[cfg(test)]
pub use mock::MockTransport;
