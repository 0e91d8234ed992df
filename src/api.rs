mod client;
mod transport;

pub use client::{HttpClient, USER_AGENT};
pub use transport::{Body, Method, Request, Response, Transport, TransportError, TransportResult};
