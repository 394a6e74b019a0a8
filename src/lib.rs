//! xmlecho - XML request/response timeout sample
//!
//! A dispatcher endpoint posts an XML envelope to a responder endpoint in the
//! same process. The responder waits as long as the envelope asks before
//! replying, and the dispatcher's HTTP client gives up once its read timeout
//! elapses.

pub mod api;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod responder;
pub mod xml;
