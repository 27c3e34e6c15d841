//! Upstream orchestration: request building, calls to the operations backend,
//! concurrent fan-out with per-call settlement, and response normalization.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod fanout;
pub mod payload;
pub mod request;

pub use client::UpstreamClient;
pub use error::UpstreamError;
pub use fanout::{settle_all, Settled};
pub use payload::{Payload, Section};
pub use request::{ListParams, ListQuery, OutboundRequest};
