pub mod client;

pub use client::{DEFAULT_TIMEOUT, HttpTransport, USER_AGENT};
