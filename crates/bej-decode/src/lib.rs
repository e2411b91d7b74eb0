//! Decodes DSP0218 Binary Encoded JSON (BEJ) payloads into pretty-printed
//! JSON, driven by a schema dictionary.
//!
//! The crate is split by concern the way a hand-rolled binary codec usually
//! is: [`reader`] and [`constants`] are the wire primitives, [`dictionary`] and
//! [`scope`] hold the schema model, [`value`] decodes scalars, and
//! [`dispatcher`] / [`container`] / [`decoder`] together implement the
//! recursive SFLV walk. [`driver`] is the single public entry point that
//! wires all of it together; [`diagnostics`] carries non-fatal warnings out
//! without the library ever touching stderr itself.

pub mod constants;
pub mod container;
pub mod decoder;
pub mod diagnostics;
pub mod dictionary;
pub mod dispatcher;
pub mod driver;
pub mod error;
pub mod reader;
pub mod scope;
pub mod value;

pub use decoder::Decoder;
pub use diagnostics::{Diagnostics, NullDiagnostics, VecDiagnostics};
pub use dictionary::{Dictionary, Entry};
pub use driver::decode;
pub use error::{BejError, BejResult};
pub use scope::Scope;
