//! Text rendering of region lists
//!
//! `[(q_start,q_end,r_start,r_end), ...]` with a line break after every
//! third tuple.

use std::fmt::Write;

use crate::types::Region;

const TUPLES_PER_LINE: usize = 3;

pub fn format_regions(regions: &[Region]) -> String {
    let mut out = String::with_capacity(regions.len() * 24 + 2);
    out.push('[');
    for (i, region) in regions.iter().enumerate() {
        let (qs, qe, rs, re) = region.as_tuple();
        // Writing into a String cannot fail.
        let _ = write!(out, "({},{},{},{})", qs, qe, rs, re);
        if i + 1 != regions.len() {
            out.push(',');
            if i % TUPLES_PER_LINE == TUPLES_PER_LINE - 1 {
                out.push_str("\n ");
            } else {
                out.push(' ');
            }
        }
    }
    out.push(']');
    out
}
