//! HTTP implementation of the completion backend boundary.

pub mod http;

pub use http::HttpCompletionBackend;
