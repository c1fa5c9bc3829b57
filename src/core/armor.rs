//! OpenPGP ASCII armor.
//!
//! Wraps arbitrary bytes in the text envelope of RFC 4880 section 6:
//! a BEGIN line, optional `Key: Value` headers, a blank line, base64 in
//! 64-column lines, a `=`-prefixed CRC-24 checksum and an END line.
//! This is an encoding only; the bytes are never interpreted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ArmorError;

const LINE_WIDTH: usize = 64;
const CRC24_INIT: u32 = 0x00B7_04CE;
const CRC24_POLY: u32 = 0x0186_4CFB;

/// A decoded armor block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Armored {
    /// Block type from the BEGIN line, e.g. `PGP MESSAGE`.
    pub kind: String,
    pub headers: Vec<(String, String)>,
    pub data: Vec<u8>,
}

/// CRC-24 as used by the armor checksum.
pub fn crc24(data: &[u8]) -> u32 {
    let mut crc = CRC24_INIT;
    for &byte in data {
        crc ^= u32::from(byte) << 16;
        for _ in 0..8 {
            crc <<= 1;
            if crc & 0x0100_0000 != 0 {
                crc ^= CRC24_POLY;
            }
        }
    }
    crc & 0x00FF_FFFF
}

/// Armor `data` as a block of type `kind` with no headers.
pub fn encode(kind: &str, data: &[u8]) -> String {
    encode_with_headers(kind, &[], data)
}

/// Armor `data` as a block of type `kind` with the given headers.
pub fn encode_with_headers(kind: &str, headers: &[(&str, &str)], data: &[u8]) -> String {
    let body = STANDARD.encode(data);
    let mut out = String::with_capacity(body.len() + body.len() / LINE_WIDTH + 2 * kind.len() + 48);

    out.push_str("-----BEGIN ");
    out.push_str(kind);
    out.push_str("-----\n");
    for (key, value) in headers {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out.push('\n');

    // base64 output is ASCII, so byte offsets are char boundaries
    let mut start = 0;
    while start < body.len() {
        let end = (start + LINE_WIDTH).min(body.len());
        out.push_str(&body[start..end]);
        out.push('\n');
        start = end;
    }

    let crc = crc24(data).to_be_bytes();
    out.push('=');
    out.push_str(&STANDARD.encode(&crc[1..]));
    out.push('\n');

    out.push_str("-----END ");
    out.push_str(kind);
    out.push_str("-----\n");
    out
}

/// Decode the first armor block in `text`.
///
/// Text before the BEGIN line is ignored. The checksum is verified when
/// present.
pub fn decode(text: &str) -> Result<Armored, ArmorError> {
    let mut lines = text.lines();

    let kind = loop {
        let Some(line) = lines.next() else {
            return Err(ArmorError::MissingBegin);
        };
        if let Some(kind) = marker(line, "-----BEGIN ") {
            break kind.to_string();
        }
    };

    let mut headers = Vec::new();
    let mut body = String::new();
    let mut checksum = None;
    let mut in_headers = true;

    let end = loop {
        let Some(line) = lines.next() else {
            return Err(ArmorError::MissingEnd(kind));
        };
        let line = line.trim();
        if let Some(end) = marker(line, "-----END ") {
            break end.to_string();
        }
        if in_headers {
            if line.is_empty() {
                in_headers = false;
                continue;
            }
            if let Some((key, value)) = line.split_once(": ") {
                headers.push((key.to_string(), value.to_string()));
                continue;
            }
            in_headers = false;
        }
        if line.is_empty() {
            continue;
        }
        match line.strip_prefix('=') {
            Some(sum) => checksum = Some(sum.to_string()),
            None => body.push_str(line),
        }
    };

    if end != kind {
        return Err(ArmorError::TypeMismatch { begin: kind, end });
    }

    let data = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| ArmorError::Base64(e.to_string()))?;

    if let Some(sum) = checksum {
        let bytes = STANDARD
            .decode(sum.as_bytes())
            .map_err(|e| ArmorError::Base64(e.to_string()))?;
        let &[a, b, c] = bytes.as_slice() else {
            return Err(ArmorError::Base64(format!(
                "checksum is {} bytes, expected 3",
                bytes.len()
            )));
        };
        let expected = u32::from_be_bytes([0, a, b, c]);
        let actual = crc24(&data);
        if expected != actual {
            return Err(ArmorError::Checksum { expected, actual });
        }
    }

    Ok(Armored {
        kind,
        headers,
        data,
    })
}

fn marker<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.trim_end()
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix("-----"))
}
