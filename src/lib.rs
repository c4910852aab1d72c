//! Builders for Discord message payloads.
//!
//! The [`builder`] module holds the generic engine: declarative field
//! conversions, builder types with their dispatch tables, and serialisation
//! into JSON or multipart request bodies. [`message`] declares the message
//! builders on top of it, and [`types`] the Discord entities they accept.

pub mod builder;
pub mod message;
pub mod types;
