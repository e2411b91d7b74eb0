//! Decode context (struct backing components C3/C6/C7): the payload byte
//! range, cursor, dictionaries, and the two scope stacks that track which
//! dictionary's child-range the next SFLV resolves against.
//!
//! Split from [`crate::dispatcher`] (the SFLV recursion, C6) and
//! [`crate::container`] (Set/Array traversal, C5); all three impl blocks
//! share this one struct rather than threading cursor/scope/indent state
//! through every function signature separately.

use crate::constants::DICT_HEADER_LEN;
use crate::dictionary::{Dictionary, Entry};
use crate::error::BejError;
use crate::scope::{Scope, ScopeStack};
use crate::value::decode_string;
use std::io::Write;

/// Holds everything a decode call needs except the output sink and the
/// diagnostics sink, which are threaded through method calls instead of
/// stored here (see [`crate::dispatcher::Decoder::decode_sflv`]) so this
/// struct stays free of the `W`/`D` type parameters.
pub struct Decoder<'a> {
    payload: &'a [u8],
    dict: &'a Dictionary<'a>,
    annotation_dict: Option<&'a Dictionary<'a>>,
    schema_scopes: ScopeStack,
    annotation_scopes: ScopeStack,
    pub(crate) cursor: usize,
    indent: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(
        payload: &'a [u8],
        dict: &'a Dictionary<'a>,
        annotation_dict: Option<&'a Dictionary<'a>>,
        start_cursor: usize,
    ) -> Self {
        let annotation_root = match annotation_dict {
            Some(ad) => ad.root_scope(),
            None => Scope {
                child_offset: DICT_HEADER_LEN as u16,
                child_count: 0,
            },
        };
        Self {
            payload,
            dict,
            annotation_dict,
            schema_scopes: ScopeStack::rooted_at(dict.root_scope()),
            annotation_scopes: ScopeStack::rooted_at(annotation_root),
            cursor: start_cursor,
            indent: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Returns the whole payload slice, decoupled from `&self`'s borrow
    /// (the returned slice carries the decoder's own `'a`, not `&self`'s),
    /// so callers can hold it alongside a `&mut self.cursor` borrow.
    pub(crate) fn payload_bytes(&self) -> &'a [u8] {
        self.payload
    }

    pub(crate) fn payload_slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.payload[start..end]
    }

    pub(crate) fn write_indent<W: Write>(&self, out: &mut W) -> Result<(), BejError> {
        for _ in 0..self.indent {
            out.write_all(b"\t")?;
        }
        Ok(())
    }

    pub(crate) fn indent_in(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn indent_out(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Looks up `seq_key` in the scope the given dictionary selector
    /// currently points at.
    pub(crate) fn resolve_entry(&self, selector: u8, seq_key: u32) -> Result<Option<Entry>, BejError> {
        if selector == 0 {
            self.dict.find_entry(self.schema_scopes.top(), seq_key)
        } else {
            match self.annotation_dict {
                Some(ad) => ad.find_entry(self.annotation_scopes.top(), seq_key),
                None => Ok(None),
            }
        }
    }

    /// Resolves and formats an entry's name as UTF-8 bytes, for callers that
    /// need the raw name rather than the quoted-and-escaped JSON emission.
    pub(crate) fn entry_name(&self, selector: u8, entry: &Entry) -> Option<&'a [u8]> {
        if selector == 0 {
            self.dict.entry_name(entry)
        } else {
            self.annotation_dict.and_then(|ad| ad.entry_name(entry))
        }
    }

    /// Pushes the given scope onto the stack for `selector`'s dictionary.
    pub(crate) fn push_scope(&mut self, selector: u8, scope: Scope) -> Result<(), BejError> {
        if selector == 0 {
            self.schema_scopes.push(scope)
        } else {
            self.annotation_scopes.push(scope)
        }
    }

    pub(crate) fn pop_scope(&mut self, selector: u8) {
        if selector == 0 {
            self.schema_scopes.pop();
        } else {
            self.annotation_scopes.pop();
        }
    }

    /// Scope-stack depth invariant check, exposed for tests.
    pub fn scope_depth(&self) -> (usize, usize) {
        (self.schema_scopes.depth(), self.annotation_scopes.depth())
    }

    /// Emits `"<name>": ` ahead of a value when `with_name` is set and the
    /// dictionary entry was found and carries a name; `"unknown_<seq>": `
    /// when the entry was not found at all; nothing when `with_name` is
    /// false, *and* nothing when the entry was found but has no name
    /// (`name_offset == 0`) — a dictionary-known property without a name is
    /// not the same as an unresolved sequence number, so it gets no key at
    /// all rather than being folded into the `unknown_*` fallback.
    pub(crate) fn emit_name<W: Write>(
        &self,
        out: &mut W,
        with_name: bool,
        selector: u8,
        seq_key: u32,
        entry: Option<&Entry>,
    ) -> Result<(), BejError> {
        if !with_name {
            return Ok(());
        }
        match entry {
            Some(e) => {
                if let Some(name) = self.entry_name(selector, e) {
                    decode_string(out, name)?;
                    out.write_all(b": ")?;
                }
            }
            None => {
                decode_string(out, format!("unknown_{seq_key}").as_bytes())?;
                out.write_all(b": ")?;
            }
        }
        Ok(())
    }
}
