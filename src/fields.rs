//! Fixed-column field extraction.
//!
//! RINEX is a column oriented format: every value sits at a fixed byte offset.
//! Lines are often trimmed on the right, so reading past the end of a line
//! returns a blank field instead of failing.
use std::str::FromStr;

use crate::error::ParsingError;

/// Returns `line[start..start + width]`, clamped to the line length.
/// Non ASCII content that would break a char boundary yields a blank field.
pub(crate) fn field(line: &str, start: usize, width: usize) -> &str {
    let end = (start + width).min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

/// Returns everything from `start`, possibly blank.
pub(crate) fn tail(line: &str, start: usize) -> &str {
    if start >= line.len() {
        return "";
    }
    line.get(start..).unwrap_or("")
}

/// Returns the character at column `col`, if any.
pub(crate) fn column(line: &str, col: usize) -> Option<char> {
    line.as_bytes().get(col).map(|b| *b as char)
}

/// Parses a RINEX floating point field.
/// Fortran `D` exponents are accepted, a blank field reads as zero.
pub(crate) fn parse_float(content: &str) -> Result<f64, ParsingError> {
    Ok(parse_opt_float(content)?.unwrap_or(0.0))
}

/// Parses a RINEX floating point field, a blank field is [None].
pub(crate) fn parse_opt_float(content: &str) -> Result<Option<f64>, ParsingError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let normalized = trimmed.replace(['D', 'd'], "E");
    let value = f64::from_str(&normalized).map_err(|_| ParsingError::Float(trimmed.to_string()))?;
    Ok(Some(value))
}

/// Parses an integer field, a blank field reads as zero.
pub(crate) fn parse_int<T: FromStr + Default>(content: &str) -> Result<T, ParsingError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    T::from_str(trimmed).map_err(|_| ParsingError::Integer(trimmed.to_string()))
}

/// Parses an integer field, a blank field is [None].
pub(crate) fn parse_opt_int<T: FromStr>(content: &str) -> Result<Option<T>, ParsingError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    T::from_str(trimmed)
        .map(Some)
        .map_err(|_| ParsingError::Integer(trimmed.to_string()))
}

/// Parses a single digit flag (LLI, SNR). Blank reads as zero.
pub(crate) fn parse_flag(content: &str) -> Result<u8, ParsingError> {
    parse_int::<u8>(content)
}

/// Splits `content` in consecutive fields of `width` characters,
/// returning the trimmed non blank ones.
pub(crate) fn words(content: &str, width: usize) -> Vec<&str> {
    let mut ret = Vec::with_capacity(content.len() / width + 1);
    let mut start = 0;
    while start < content.len() {
        let item = field(content, start, width).trim();
        if !item.is_empty() {
            ret.push(item);
        }
        start += width;
    }
    ret
}
