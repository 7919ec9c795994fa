//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`] — the caller's question, treated as opaque text

pub mod question;
