//! Sequence file loading
//!
//! Inputs are plain text files holding a single sequence on their first line.

use crate::error::{CliError, CliResult};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Read the first line of `path` as an uppercase nucleotide sequence.
///
/// Trailing whitespace (including a `\r` from CRLF files) is stripped. An
/// empty file yields an empty sequence.
pub fn read_sequence(path: &Path) -> CliResult<Vec<u8>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CliError::file_not_found(path.to_path_buf()),
        _ => CliError::io(path.to_path_buf(), e.to_string()),
    })?;

    let mut line = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut line)
        .map_err(|e| CliError::io(path.to_path_buf(), e.to_string()))?;

    while line.last().is_some_and(|b| b.is_ascii_whitespace()) {
        line.pop();
    }
    line.make_ascii_uppercase();

    log::debug!("Read {} bases from {}", line.len(), path.display());
    Ok(line)
}
