//! Submission client module for the spreadsheet web app

mod client;
mod traits;

pub use client::{SheetsClient, TransportError};
pub use traits::SubmissionClient;

#[cfg(test)]
pub use traits::MockSubmissionClient;
