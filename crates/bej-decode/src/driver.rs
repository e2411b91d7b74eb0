//! Top-level driver (component C7).
//!
//! Mirrors the DMTF reference decoder's `bej_decode`/`bej_init_context`
//! sequence: validates the 7-byte payload header, primes the root scope,
//! and invokes the dispatcher once for the root SFLV.

use std::io::Write;

use crate::constants::{PAYLOAD_HEADER_LEN, SCHEMA_CLASS_COLLECTION_MEMBER};
use crate::decoder::Decoder;
use crate::diagnostics::Diagnostics;
use crate::dictionary::Dictionary;
use crate::error::BejError;

/// Decodes `payload` against `dict` (and, optionally, `annotation_dict`),
/// writing pretty-printed JSON to `out`. Non-fatal conditions are reported
/// through `diag` rather than failing the call.
pub fn decode<W: Write, D: Diagnostics>(
    payload: &[u8],
    dict_data: &[u8],
    annotation_dict_data: Option<&[u8]>,
    out: &mut W,
    diag: &mut D,
) -> Result<(), BejError> {
    if payload.len() < PAYLOAD_HEADER_LEN {
        return Err(BejError::Truncated { offset: 0 });
    }

    validate_version(payload)?;
    if payload[4] != 0 || payload[5] != 0 {
        diag.warn(4, "reserved payload header flags are non-zero");
    }
    validate_schema_class(payload[6])?;

    let dict = Dictionary::parse(dict_data)?;
    if dict.size_mismatch() {
        diag.warn(0, "dictionary_size header field disagrees with buffer length");
    }
    let annotation_dict = annotation_dict_data.map(Dictionary::parse).transpose()?;
    if let Some(ref ad) = annotation_dict {
        if ad.size_mismatch() {
            diag.warn(0, "annotation dictionary_size header field disagrees with buffer length");
        }
    }

    let mut decoder = Decoder::new(payload, &dict, annotation_dict.as_ref(), PAYLOAD_HEADER_LEN);
    decoder.decode_sflv(out, diag, false)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Bytes 0–3 must spell version 1.0.0 or 1.1.0.
fn validate_version(payload: &[u8]) -> Result<(), BejError> {
    let ok = payload[0] == 0x00
        && payload[1] == 0xF0
        && (payload[2] == 0xF0 || payload[2] == 0xF1)
        && payload[3] == 0xF1;
    if ok {
        Ok(())
    } else {
        Err(BejError::UnsupportedVersion)
    }
}

/// Byte 6 is the schema class. Accept 0x00..=0x03, reject 0x04 (`ERROR`) and
/// anything else.
fn validate_schema_class(class: u8) -> Result<(), BejError> {
    if class <= SCHEMA_CLASS_COLLECTION_MEMBER {
        Ok(())
    } else {
        Err(BejError::UnsupportedSchemaClass(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NullDiagnostics;

    fn header(class: u8) -> Vec<u8> {
        vec![0x00, 0xF0, 0xF1, 0xF1, 0x00, 0x00, class]
    }

    fn dict_with_one_integer(name: &str) -> Vec<u8> {
        let mut d = vec![0x01u8, 0x00];
        d.extend_from_slice(&1u16.to_le_bytes());
        d.extend_from_slice(&0u32.to_le_bytes());
        d.extend_from_slice(&0u32.to_le_bytes());
        let name_offset = (12 + 10) as u16;
        let mut entry = vec![0x03u8 << 4];
        entry.extend_from_slice(&0u16.to_le_bytes());
        entry.extend_from_slice(&0u16.to_le_bytes());
        entry.extend_from_slice(&0u16.to_le_bytes());
        entry.push(name.len() as u8);
        entry.extend_from_slice(&name_offset.to_le_bytes());
        d.extend_from_slice(&entry);
        d.extend_from_slice(name.as_bytes());
        let size = d.len() as u32;
        d[8..12].copy_from_slice(&size.to_le_bytes());
        d
    }

    #[test]
    fn s1_single_integer_scenario() {
        let dict = dict_with_one_integer("Value");
        let mut payload = header(0x00);
        // seq=0 (NNINT k=0), format=INTEGER(0x30), length=1 (NNINT k=1,val=1), value=42
        payload.extend_from_slice(&[0x00, 0x30, 0x01, 0x01, 0x2A]);
        let mut out = Vec::new();
        let mut diag = NullDiagnostics;
        decode(&payload, &dict, None, &mut out, &mut diag).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "42\n");
    }

    #[test]
    fn rejects_too_short_payload() {
        let dict = dict_with_one_integer("Value");
        let mut out = Vec::new();
        let mut diag = NullDiagnostics;
        let err = decode(&[0u8; 3], &dict, None, &mut out, &mut diag).unwrap_err();
        assert!(matches!(err, BejError::Truncated { offset: 0 }));
    }

    #[test]
    fn rejects_bad_version() {
        let dict = dict_with_one_integer("Value");
        let mut payload = vec![0x00, 0xF0, 0x00, 0xF1, 0x00, 0x00, 0x00];
        payload.extend_from_slice(&[0x00, 0x02, 0x00, 0x00]);
        let mut out = Vec::new();
        let mut diag = NullDiagnostics;
        assert!(matches!(
            decode(&payload, &dict, None, &mut out, &mut diag),
            Err(BejError::UnsupportedVersion)
        ));
    }

    #[test]
    fn rejects_error_schema_class() {
        let dict = dict_with_one_integer("Value");
        let mut payload = header(0x04);
        payload.extend_from_slice(&[0x00, 0x30, 0x01, 0x01, 0x2A]);
        let mut out = Vec::new();
        let mut diag = NullDiagnostics;
        assert!(matches!(
            decode(&payload, &dict, None, &mut out, &mut diag),
            Err(BejError::UnsupportedSchemaClass(0x04))
        ));
    }

    #[test]
    fn accepts_event_and_collection_member_classes() {
        let dict = dict_with_one_integer("Value");
        for class in [0x01u8, 0x02, 0x03] {
            let mut payload = header(class);
            payload.extend_from_slice(&[0x00, 0x30, 0x01, 0x01, 0x2A]);
            let mut out = Vec::new();
            let mut diag = NullDiagnostics;
            decode(&payload, &dict, None, &mut out, &mut diag).unwrap();
        }
    }
}
