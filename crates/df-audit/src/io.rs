//! Newline-delimited integer lists.
//!
//! One decimal integer per line, of any length. Surrounding whitespace is
//! trimmed and blank lines are skipped on read.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use num_bigint::BigUint;

use crate::error::{AuditError, Result};

/// Read every integer in `path`.
pub fn read_numbers(path: &Path) -> Result<Vec<BigUint>> {
    read_numbers_limit(path, usize::MAX)
}

/// Read at most `limit` integers from `path`, stopping early once reached.
pub fn read_numbers_limit(path: &Path, limit: usize) -> Result<Vec<BigUint>> {
    let io_error = |source| AuditError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);

    let mut numbers = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if numbers.len() >= limit {
            break;
        }
        let line = line.map_err(io_error)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = parse_line(trimmed).ok_or_else(|| AuditError::Parse {
            path: path.to_path_buf(),
            line: index + 1,
            content: trimmed.to_string(),
        })?;
        numbers.push(value);
    }

    tracing::debug!(path = %path.display(), count = numbers.len(), "read number list");
    Ok(numbers)
}

fn parse_line(text: &str) -> Option<BigUint> {
    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
}

/// Write `numbers` to `path`, one per line, replacing any existing file.
pub fn write_numbers<'a, I>(path: &Path, numbers: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a BigUint>,
{
    let io_error = |source| AuditError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);

    let mut written = 0;
    for n in numbers {
        writeln!(writer, "{}", n).map_err(io_error)?;
        written += 1;
    }
    writer.flush().map_err(io_error)?;

    tracing::debug!(path = %path.display(), count = written, "wrote number list");
    Ok(written)
}
