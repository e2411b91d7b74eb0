//! Set and array traversal (component C5).
//!
//! Mirrors the DMTF reference decoder's `decode_set`/`decode_array` —
//! identical shape apart from brackets and the `with_name` flag passed to
//! each recursive element decode.

use std::io::Write;

use crate::decoder::Decoder;
use crate::diagnostics::Diagnostics;
use crate::error::BejError;
use crate::reader::read_nnint;

impl<'a> Decoder<'a> {
    /// Decodes a Set (`is_set = true`, JSON object) or Array (`is_set =
    /// false`, JSON array) value that spans `[cursor, value_end)`. The
    /// caller has already pushed the container's own child scope.
    pub(crate) fn decode_container<W: Write, D: Diagnostics>(
        &mut self,
        out: &mut W,
        diag: &mut D,
        value_end: usize,
        is_set: bool,
    ) -> Result<(), BejError> {
        out.write_all(if is_set { b"{\n" } else { b"[\n" })?;
        self.indent_in();

        let payload = self.payload_bytes();
        let count = read_nnint(payload, &mut self.cursor, value_end)?;

        for i in 0..count {
            if self.cursor >= value_end {
                break;
            }
            self.write_indent(out)?;
            self.decode_sflv(out, diag, is_set)?;
            if i + 1 < count {
                out.write_all(b",")?;
            }
            out.write_all(b"\n")?;
        }

        self.indent_out();
        self.write_indent(out)?;
        out.write_all(if is_set { b"}" } else { b"]" })?;

        if self.cursor != value_end {
            diag.warn(
                self.cursor,
                &format!(
                    "{} length mismatch: expected cursor at {value_end}, got {}; snapping forward",
                    if is_set { "set" } else { "array" },
                    self.cursor
                ),
            );
            self.cursor = value_end;
        }

        Ok(())
    }
}
