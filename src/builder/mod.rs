//! The builder engine.
//!
//! Builder types declare conversions, one per field. Each builder type turns
//! its conversions into dispatch tables once, at creation. Builders then
//! classify loosely typed positional and keyword input against those tables
//! and serialise the collected fields into a request [`Payload`].

pub mod builder_base;
pub mod builder_fielded;
pub mod builder_type;
pub mod conversion;
pub mod descriptor;
pub mod error;
pub mod payload;
pub mod serialization_configuration;
pub mod value;

#[cfg(test)]
pub(crate) mod test;

pub use builder_base::{Builder, BUILDER_BASE};
pub use builder_fielded::BUILDER_FIELDED;
pub use builder_type::{Attribute, BuilderType, Namespace};
pub use conversion::{Conversion, ConversionKind};
pub use descriptor::ConversionDescriptor;
pub use error::BuilderError;
pub use payload::{EncodedForm, FilePart, JsonMap, MultipartForm, Payload};
pub use serialization_configuration::SerializationConfiguration;
pub use value::{Value, ValueType};
