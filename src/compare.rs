//! Paired cross-stream comparison
//!
//! The four pairings in [`PAIRINGS`] encode the expected protocol symmetry:
//! bytes one side queued for encryption must come out of the other side's
//! decryption unchanged, and the ciphertext leaving one side must be the
//! ciphertext the other side queued. Each pair is compared byte-by-byte over
//! the full `[0, max(len_a, len_b))` range. Every divergent index is
//! reported, not just the first, so a single run shows the whole damage.

use crate::streams::{SourceSpan, StreamSet};
use crate::tag::{Tag, PAIRINGS};

/// One diverging byte position between a stream pair.
///
/// A `None` byte means that stream is shorter than its partner at this
/// position; the matching origin is `None` as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch<'a> {
    pub position: usize,
    pub tag_a: Tag,
    pub tag_b: Tag,
    pub byte_a: Option<u8>,
    pub byte_b: Option<u8>,
    pub origin_a: Option<&'a SourceSpan>,
    pub origin_b: Option<&'a SourceSpan>,
}

/// Compare all four stream pairings. Mismatches come back ordered by pair
/// (in `PAIRINGS` order), then by ascending position; re-running on the same
/// set yields the identical list.
pub fn compare(set: &StreamSet) -> Vec<Mismatch<'_>> {
    let mut mismatches = Vec::new();

    for (tag_a, tag_b) in PAIRINGS {
        let stream_a = set.stream(tag_a);
        let stream_b = set.stream(tag_b);
        let max_len = stream_a.len().max(stream_b.len());

        for position in 0..max_len {
            let byte_a = stream_a.byte_at(position);
            let byte_b = stream_b.byte_at(position);
            if byte_a != byte_b {
                mismatches.push(Mismatch {
                    position,
                    tag_a,
                    tag_b,
                    byte_a,
                    byte_b,
                    origin_a: stream_a.span_at(position),
                    origin_b: stream_b.span_at(position),
                });
            }
        }
    }

    mismatches
}
