//! Outbound adapters implementing the domain ports.
//!
//! Only HTTP is supported; both ports talk to the same API origin.

pub mod http;
