//! Typed Easemob operations, exposed as inherent methods on [`Client`](crate::client::Client).
//!
//! Every operation resolves a resource path, performs one authenticated exchange, and decodes
//! the `entities` or `data` payload of the [`CommonReply`](crate::reply::CommonReply) envelope
//! into an operation-specific shape.

pub mod group;
pub mod media;
pub mod message;
pub mod user;

pub use media::*;
pub use message::*;
pub use user::*;
