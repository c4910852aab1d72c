//! Message builders.
//!
//! ```
//! use hata_builder::builder::Value;
//! use hata_builder::message::{create_configuration, MESSAGE_BUILDER_CREATE};
//!
//! let builder = MESSAGE_BUILDER_CREATE
//!     .instantiate([Value::from("hello")], [("tts", Value::Bool(true))])
//!     .unwrap();
//! let payload = builder.serialise(&create_configuration(false).unwrap()).unwrap();
//! assert_eq!(payload.into_json().unwrap()["content"], "hello");
//! ```

pub mod builders;
pub mod conversions;

pub use builders::{
    create_configuration, edit_configuration, interaction_response_configuration,
    MESSAGE_BUILDER_BASE, MESSAGE_BUILDER_CREATE, MESSAGE_BUILDER_EDIT,
    MESSAGE_BUILDER_INTERACTION_RESPONSE,
};
