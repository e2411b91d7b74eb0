//! SFLV dispatcher (component C6) — the recursive core.
//!
//! Mirrors the DMTF reference decoder's `decode_bej_sflv`. Reads one
//! Sequence–Format–Length–Value record, resolves its dictionary
//! entry, and either hands off to a scalar value decoder
//! ([`crate::value`]), to the enum decoder below, or to the container
//! decoder ([`crate::container`]).

use std::io::Write;

use crate::constants::BejFormat;
use crate::decoder::Decoder;
use crate::diagnostics::Diagnostics;
use crate::error::BejError;
use crate::reader::{read_format, read_nnint, read_sequence};
use crate::scope::Scope;
use crate::value::{decode_boolean, decode_integer, decode_null, decode_string};

impl<'a> Decoder<'a> {
    /// Reads and decodes one SFLV record at the current cursor.
    ///
    /// `with_name` controls whether the resolved property name (or its
    /// `unknown_<seq>` fallback) is emitted ahead of the value — false for
    /// the root SFLV and array elements, true for set elements.
    pub fn decode_sflv<W: Write, D: Diagnostics>(
        &mut self,
        out: &mut W,
        diag: &mut D,
        with_name: bool,
    ) -> Result<(), BejError> {
        let payload = self.payload_bytes();
        let end = self.payload_len();
        let (seq_key, selector) = read_sequence(payload, &mut self.cursor, end)?;
        let (format_code, _flags) = read_format(payload, &mut self.cursor, end)?;
        let length = read_nnint(payload, &mut self.cursor, end)? as usize;

        let value_start = self.cursor;
        let value_end = value_start
            .checked_add(length)
            .filter(|&e| e <= end)
            .ok_or(BejError::Truncated {
                offset: value_start,
            })?;

        let entry = self.resolve_entry(selector, seq_key)?;
        self.emit_name(out, with_name, selector, seq_key, entry.as_ref())?;

        let format = BejFormat::from_code(format_code);
        let child_scope = entry.map(|e| e.child_scope()).unwrap_or(Scope {
            child_offset: 0,
            child_count: 0,
        });

        match format {
            BejFormat::Set | BejFormat::Array => {
                self.push_scope(selector, child_scope)?;
                let is_set = matches!(format, BejFormat::Set);
                let result = self.decode_container(out, diag, value_end, is_set);
                self.pop_scope(selector);
                result?;
            }
            BejFormat::Enum => {
                self.cursor = value_end;
                let value = self.payload_slice(value_start, value_end);
                self.push_scope(selector, child_scope)?;
                let result = self.decode_enum_member(out, selector, value, value_start);
                self.pop_scope(selector);
                result?;
            }
            BejFormat::Integer => {
                self.cursor = value_end;
                let value = self.payload_slice(value_start, value_end);
                decode_integer(out, value_start, value)?;
            }
            BejFormat::String => {
                self.cursor = value_end;
                let value = self.payload_slice(value_start, value_end);
                decode_string(out, value)?;
            }
            BejFormat::Boolean => {
                self.cursor = value_end;
                let value = self.payload_slice(value_start, value_end);
                decode_boolean(out, value)?;
            }
            BejFormat::Null => {
                self.cursor = value_end;
                if length != 0 {
                    return Err(BejError::MalformedValue {
                        offset: value_start,
                        reason: "NULL value must have zero length",
                    });
                }
                decode_null(out)?;
            }
            BejFormat::Real
            | BejFormat::ByteString
            | BejFormat::Choice
            | BejFormat::PropertyAnnotation
            | BejFormat::ResourceLink
            | BejFormat::ResourceLinkExpansion => {
                self.cursor = value_end;
                diag.warn(
                    value_start,
                    &format!(
                        "BEJ format 0x{format_code:02x} is recognized but not implemented; emitting null"
                    ),
                );
                decode_null(out)?;
            }
            BejFormat::Unknown(code) => {
                self.cursor = value_end;
                diag.warn(value_start, &format!("unknown BEJ format code 0x{code:02x}"));
                decode_null(out)?;
            }
        }

        Ok(())
    }

    /// Decodes a BEJ `ENUM` value: `value` is a single NNINT
    /// naming the chosen member by its sequence number within the enum
    /// property's own child scope, which the caller has already pushed.
    /// Falls back to the bare numeric sequence if the member is absent from
    /// the dictionary.
    fn decode_enum_member<W: Write>(
        &mut self,
        out: &mut W,
        selector: u8,
        value: &'a [u8],
        value_start: usize,
    ) -> Result<(), BejError> {
        let mut enum_cursor = 0usize;
        let enum_end = value.len();
        let member_seq = read_nnint(value, &mut enum_cursor, enum_end).map_err(|_| {
            BejError::MalformedValue {
                offset: value_start,
                reason: "enum value is not a valid NNINT",
            }
        })?;

        let member_entry = self.resolve_entry(selector, member_seq)?;
        let member_name = member_entry.and_then(|e| self.entry_name(selector, &e));
        match member_name {
            Some(name) => decode_string(out, name)?,
            None => write!(out, "{member_seq}")?,
        }
        Ok(())
    }
}
