//! HTTP middleware.

pub mod request_log;

pub use request_log::RequestLog;
