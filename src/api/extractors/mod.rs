//! Custom extractors for request handling.

mod validated_json;

pub use validated_json::{not_blank, validation_messages, FieldOrder, ValidatedJson};
