//! Inbound adapters: transports that drive the domain.

pub mod http;
