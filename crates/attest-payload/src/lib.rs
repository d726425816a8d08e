//! Attest Payload — From document image to attribute record.
//!
//! Two stages: a remote decode service turns the image into a raw string
//! (opaque call, [`decode`]), and the parser turns the raw string into an
//! [`attest_core::AttributeRecord`] under either supported encoding
//! ([`parser`]).

pub mod decode;
pub mod error;
pub mod parser;

pub use decode::{HttpQrDecoder, QrDecoder, StaticDecoder};
pub use error::PayloadError;
pub use parser::{parse_attribute_record, ParsedPayload};
