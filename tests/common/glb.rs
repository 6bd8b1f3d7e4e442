//! Writer for well-formed glb files of a chosen size. Shared by the unit tests in
//! `src/` and the integration tests.

use std::{fs, path::Path};

const JSON: &[u8] = br#"{"asset":{"version":"2.0"}}"#;
const JSON_CHUNK: usize = JSON.len().next_multiple_of(4);

/// Header, padded JSON chunk and a four byte BIN chunk.
pub const MIN_LEN: usize = 12 + 8 + JSON_CHUNK + 8 + 4;

/// Well-formed glb of `len` bytes, rounded down to a multiple of four.
pub fn glb_bytes(len: usize) -> Vec<u8> {
    let len = len.max(MIN_LEN) & !3;
    let bin_len = len - 12 - 8 - JSON_CHUNK - 8;

    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(len as u32).to_le_bytes());
    out.extend_from_slice(&(JSON_CHUNK as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(JSON);
    out.resize(12 + 8 + JSON_CHUNK, b' ');
    out.extend_from_slice(&(bin_len as u32).to_le_bytes());
    out.extend_from_slice(b"BIN\0");
    out.resize(len, 0);
    out
}

pub fn write_glb(path: &Path, len: usize) {
    fs::write(path, glb_bytes(len)).unwrap();
}
