//! Nucleotide helpers shared by seeding and extension

/// Symbol every non-ACGT base is mapped to by [`complement_nucleotide`].
pub const WILDCARD: u8 = b'N';

/// Encode a nucleotide to 2-bit representation
pub fn encode_nucleotide(nucleotide: u8) -> Option<u64> {
    match nucleotide.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Anything outside {A,C,G,T} neither matches nor mismatches.
pub fn is_wildcard(nucleotide: u8) -> bool {
    encode_nucleotide(nucleotide).is_none()
}

/// Get complement of a single nucleotide; wildcards become [`WILDCARD`]
pub fn complement_nucleotide(nucleotide: u8) -> u8 {
    match nucleotide.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => WILDCARD,
    }
}

/// Generate reverse complement of a sequence
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence
        .iter()
        .rev()
        .map(|&nucleotide| complement_nucleotide(nucleotide))
        .collect()
}

/// Outcome of comparing one query base with one reference base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseCall {
    Match,
    Mismatch,
    Wildcard,
}

pub fn compare_bases(query_base: u8, ref_base: u8) -> BaseCall {
    if is_wildcard(query_base) || is_wildcard(ref_base) {
        BaseCall::Wildcard
    } else if query_base.eq_ignore_ascii_case(&ref_base) {
        BaseCall::Match
    } else {
        BaseCall::Mismatch
    }
}
