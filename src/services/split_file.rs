//! Binary split file reading and writing
//!
//! Layout, all little-endian:
//!
//! | field    | type        |
//! |----------|-------------|
//! | magic    | `b"BSPL"`   |
//! | version  | `u16`       |
//! | saved_at | `i64` unix ms |
//! | count    | `u32`       |
//! | splits   | `count` x `f64` |

use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    error::{SplitError, SplitResult},
    state::SplitList,
};

pub const SPLIT_FILE_EXTENSION: &str = "split";

const MAGIC: &[u8; 4] = b"BSPL";
const VERSION: u16 = 1;
const HEADER_LEN: usize = 4 + 2 + 8 + 4;

/// Split list as read back from disk
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSplits {
    pub splits: SplitList,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Encode a split list stamped with `saved_at`
pub fn encode_splits(splits: &SplitList, saved_at: DateTime<Utc>) -> SplitResult<Vec<u8>> {
    let count = record_count(splits.len())?;
    let mut buf = Vec::with_capacity(HEADER_LEN + splits.len() * 8);
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&saved_at.timestamp_millis().to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    for split in splits.iter() {
        buf.extend_from_slice(&split.to_le_bytes());
    }
    Ok(buf)
}

/// The header count field is a `u32`
fn record_count(len: usize) -> SplitResult<u32> {
    u32::try_from(len).map_err(|_| malformed(format!("{} splits do not fit in one file", len)))
}

/// Decode a split list, rejecting anything that is not exactly one valid record set
pub fn decode_splits(bytes: &[u8]) -> SplitResult<SavedSplits> {
    if bytes.len() < HEADER_LEN {
        return Err(malformed(format!(
            "file is {} bytes, shorter than the {} byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }
    let (header, body) = bytes.split_at(HEADER_LEN);

    if &header[0..4] != MAGIC {
        return Err(malformed("not a split file (bad magic)"));
    }
    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != VERSION {
        return Err(malformed(format!("unsupported version {}", version)));
    }
    let saved_at_ms = i64::from_le_bytes(take_array(&header[6..14]));
    let count = u32::from_le_bytes(take_array(&header[14..18])) as usize;

    let expected = count
        .checked_mul(8)
        .ok_or_else(|| malformed("record count overflows"))?;
    if body.len() != expected {
        return Err(malformed(format!(
            "header declares {} splits ({} bytes) but {} bytes follow",
            count,
            expected,
            body.len()
        )));
    }

    let mut splits = SplitList::new();
    for (i, chunk) in body.chunks_exact(8).enumerate() {
        let split = f64::from_le_bytes(take_array(chunk));
        if !split.is_finite() || split < 0.0 {
            return Err(malformed(format!("split {} has invalid value {}", i + 1, split)));
        }
        splits.push(split);
    }

    Ok(SavedSplits {
        splits,
        saved_at: DateTime::from_timestamp_millis(saved_at_ms),
    })
}

/// Write `splits` to `path`, replacing any existing file
pub fn save_splits(path: &Path, splits: &SplitList) -> SplitResult<()> {
    let bytes = encode_splits(splits, Utc::now())?;
    fs::write(path, &bytes).map_err(|e| SplitError::io(path, e))?;
    info!("Saved {} splits to {}", splits.len(), path.display());
    Ok(())
}

/// Read a split file from `path`
pub fn load_splits(path: &Path) -> SplitResult<SavedSplits> {
    let bytes = fs::read(path).map_err(|e| SplitError::io(path, e))?;
    let saved = decode_splits(&bytes)?;
    debug!("Loaded {} splits from {}", saved.splits.len(), path.display());
    Ok(saved)
}

fn take_array<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    out
}

fn malformed(reason: impl Into<String>) -> SplitError {
    SplitError::MalformedSplitFile(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SplitList {
        SplitList::from(vec![0.0, 1.0 / 3.0, 65.256, 3725.000_000_1])
    }

    #[test]
    fn test_round_trip_is_bit_exact() {
        let splits = sample();
        let decoded = decode_splits(&encode_splits(&splits, Utc::now()).unwrap()).unwrap();
        let before: Vec<u64> = splits.iter().map(f64::to_bits).collect();
        let after: Vec<u64> = decoded.splits.iter().map(f64::to_bits).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_saved_at_survives_to_the_millisecond() {
        let stamp = DateTime::from_timestamp_millis(1_700_000_123_456).unwrap();
        let decoded = decode_splits(&encode_splits(&SplitList::new(), stamp).unwrap()).unwrap();
        assert_eq!(decoded.saved_at, Some(stamp));
        assert!(decoded.splits.is_empty());
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = encode_splits(&sample(), Utc::now()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(decode_splits(&bytes), Err(SplitError::MalformedSplitFile(_))));
    }

    #[test]
    fn test_rejects_truncated_and_trailing_data() {
        let bytes = encode_splits(&sample(), Utc::now()).unwrap();
        assert!(decode_splits(&bytes[..bytes.len() - 1]).is_err());
        assert!(decode_splits(&bytes[..10]).is_err());

        let mut longer = bytes.clone();
        longer.push(0);
        assert!(decode_splits(&longer).is_err());
    }

    #[test]
    fn test_rejects_negative_and_nan_splits() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let mut bytes = encode_splits(&SplitList::from(vec![1.0]), Utc::now()).unwrap();
            let len = bytes.len();
            bytes[len - 8..].copy_from_slice(&f64::to_le_bytes(bad));
            assert!(decode_splits(&bytes).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut bytes = encode_splits(&sample(), Utc::now()).unwrap();
        bytes[4] = 9;
        let err = decode_splits(&bytes).unwrap_err();
        assert!(err.to_string().contains("unsupported version 9"));
    }

    #[test]
    fn test_record_count_refuses_to_truncate() {
        assert_eq!(record_count(3).unwrap(), 3);
        assert_eq!(record_count(u32::MAX as usize).unwrap(), u32::MAX);

        #[cfg(target_pointer_width = "64")]
        {
            let err = record_count(u32::MAX as usize + 1).unwrap_err();
            assert!(matches!(err, SplitError::MalformedSplitFile(_)));
            assert!(err.to_string().contains("4294967296 splits"));
        }
    }
}
