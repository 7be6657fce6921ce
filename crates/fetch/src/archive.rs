//! Archive extraction for downloaded boundary payloads.
//!
//! Payloads are sniffed by magic bytes: gzip members are decompressed
//! via `flate2`, anything else passes through unchanged.

use crate::error::{FetchError, Result};
use flate2::read::GzDecoder;
use std::io::Read;

/// Magic bytes identifying a gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Unpack a downloaded payload into raw document bytes.
pub fn unpack(data: &[u8]) -> Result<Vec<u8>> {
    if data.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzDecoder::new(data);
        let mut out = Vec::with_capacity(data.len() * 4);
        decoder
            .read_to_end(&mut out)
            .map_err(|e| FetchError::Unpack(format!("gzip: {e}")))?;
        Ok(out)
    } else {
        Ok(data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn plain_payload_passes_through() {
        let data = br#"{"type":"FeatureCollection","features":[]}"#;
        assert_eq!(unpack(data).unwrap(), data.to_vec());
    }

    #[test]
    fn gzip_payload_is_decompressed() {
        let original = br#"{"type":"FeatureCollection","features":[]}"#;
        let compressed = gzip(original);
        assert_eq!(unpack(&compressed).unwrap(), original.to_vec());
    }

    #[test]
    fn truncated_gzip_is_an_error() {
        let compressed = gzip(b"0123456789012345678901234567890123456789");
        let err = unpack(&compressed[..compressed.len() / 2]).unwrap_err();
        assert!(matches!(err, FetchError::Unpack(_)));
    }
}
