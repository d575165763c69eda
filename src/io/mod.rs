//! Binary stream input for tree models.
//!
//! Models are stored as a flat sequence of fixed-width primitives with no
//! framing, so decoding is a single forward pass over a [`ModelReader`].

mod reader;

pub use reader::{ModelReader, PRIMITIVE_SIZE};
