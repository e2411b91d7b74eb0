//! Diagnostic (warning) sink.
//!
//! The decode core never writes to stderr directly — it reports through this
//! trait so the crate stays embeddable (a caller can collect warnings instead
//! of inheriting process-wide stderr). [`crate::error::BejError`] remains the
//! channel for fatal failures; this is only for the warning-grade conditions
//! treated as non-fatal (container length mismatch, unknown format code,
//! reserved header bits set, advisory `dictionary_size` mismatch).

/// Receives non-fatal warnings produced during a decode call.
pub trait Diagnostics {
    /// `offset` is the payload byte offset the warning pertains to.
    fn warn(&mut self, offset: usize, message: &str);
}

/// Discards every warning. Useful when a caller only cares about the result.
#[derive(Debug, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn warn(&mut self, _offset: usize, _message: &str) {}
}

/// Collects warnings into a `Vec<String>`, formatted `"offset {n}: {msg}"`.
///
/// Used by tests that need to assert a warning fired without capturing
/// stderr.
#[derive(Debug, Default)]
pub struct VecDiagnostics(pub Vec<String>);

impl Diagnostics for VecDiagnostics {
    fn warn(&mut self, offset: usize, message: &str) {
        self.0.push(format!("offset {offset}: {message}"));
    }
}
