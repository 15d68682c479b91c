//! Lenient and strict `.cube` parsing.
//!
//! The format is line oriented. Blank lines and `#` comments are skipped,
//! header directives are recorded, and every remaining line is reduced to
//! its numeric tokens:
//! - one number sets the cube size (truncated; the last such line wins),
//! - three numbers append one RGB entry in file order,
//! - anything else is skipped, or rejected in [`ParseMode::Strict`].
//!
//! `LUT_3D_SIZE 33` is the usual spelling of a size line, but a bare `33`
//! is accepted too.

use std::path::Path;

use crate::cube::keyword;
use crate::error::ParseError;
use crate::transform::lut::{Lut3D, cube_len};

/// How to treat lines that are neither a size, an entry, nor a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Skip them, dropping tokens that are not numbers.
    #[default]
    Lenient,
    /// Fail with [`ParseError::MalformedLine`].
    Strict,
}

/// Parse `.cube` text, skipping lines that cannot be interpreted.
pub fn parse(text: &str) -> Result<Lut3D, ParseError> {
    parse_with(text, ParseMode::Lenient)
}

/// Read and leniently parse a `.cube` file.
pub fn load_cube(path: &Path) -> Result<Lut3D, ParseError> {
    let text = std::fs::read_to_string(path)?;
    let lut = parse(&text)?;
    tracing::debug!("loaded cube {} (size {})", path.display(), lut.size());
    Ok(lut)
}

/// Parse `.cube` text with an explicit [`ParseMode`].
pub fn parse_with(text: &str, mode: ParseMode) -> Result<Lut3D, ParseError> {
    let mut header = Header::default();
    let mut size: Option<f32> = None;
    let mut entries: Vec<[f32; 3]> = Vec::new();
    let mut skipped = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace().peekable();
        let first = tokens.peek().copied();
        match first {
            Some(keyword::TITLE) => {
                header.title = Some(parse_title(line));
                continue;
            }
            Some(kw @ (keyword::DOMAIN_MIN | keyword::DOMAIN_MAX)) => {
                tokens.next();
                match parse_triple(tokens) {
                    Some(v) if kw == keyword::DOMAIN_MIN => header.domain_min = v,
                    Some(v) => header.domain_max = v,
                    None => reject(mode, idx, raw, &mut skipped)?,
                }
                continue;
            }
            Some(kw) if keyword::IGNORED.contains(&kw) => {
                tracing::trace!("ignoring {kw} directive on line {}", idx + 1);
                continue;
            }
            Some(keyword::LUT_3D_SIZE) => {
                tokens.next();
            }
            _ => {}
        }

        let mut values = [0.0_f32; 3];
        let mut count = 0usize;
        let mut dropped = false;
        for token in tokens {
            match token.parse::<f32>() {
                Ok(v) => {
                    if count < 3 {
                        values[count] = v;
                    }
                    count += 1;
                }
                Err(_) => dropped = true,
            }
        }

        if dropped && mode == ParseMode::Strict {
            return Err(malformed(idx, raw));
        }
        match count {
            1 => size = Some(values[0]),
            3 => entries.push(values),
            _ => reject(mode, idx, raw, &mut skipped)?,
        }
    }

    let size = resolve_size(size)?;
    let expected = size * size * size;
    if entries.len() < expected {
        return Err(ParseError::TruncatedData {
            expected,
            found: entries.len(),
        });
    }
    if entries.len() > expected {
        tracing::warn!(
            "cube has {} entries, ignoring {} past size {size}",
            entries.len(),
            entries.len() - expected
        );
    }

    let mut lut = Lut3D::new(size, entries)?;
    lut.title = header.title;
    lut.domain_min = header.domain_min;
    lut.domain_max = header.domain_max;

    if lut.has_custom_domain() {
        tracing::debug!(
            "cube domain {:?}..{:?} recorded but not applied",
            lut.domain_min,
            lut.domain_max
        );
    }
    tracing::debug!("parsed cube: size {size}, {} entries, {skipped} lines skipped", lut.len());
    Ok(lut)
}

#[derive(Debug)]
struct Header {
    title: Option<String>,
    domain_min: [f32; 3],
    domain_max: [f32; 3],
}

impl Default for Header {
    fn default() -> Self {
        Self {
            title: None,
            domain_min: Lut3D::DEFAULT_DOMAIN_MIN,
            domain_max: Lut3D::DEFAULT_DOMAIN_MAX,
        }
    }
}

/// Truncate the last size value seen and check it addresses a table.
fn resolve_size(size: Option<f32>) -> Result<usize, ParseError> {
    let Some(value) = size else {
        return Err(ParseError::InvalidSize { found: None });
    };
    let invalid = || ParseError::InvalidSize {
        found: Some(f64::from(value)),
    };
    if !value.is_finite() {
        return Err(invalid());
    }
    let truncated = value.trunc();
    if truncated < 1.0 || truncated > usize::MAX as f32 {
        return Err(invalid());
    }
    let size = truncated as usize;
    cube_len(size).ok_or_else(invalid)?;
    Ok(size)
}

/// `TITLE "Some Name"` → `Some Name`. Unquoted titles are taken verbatim.
fn parse_title(line: &str) -> String {
    let rest = line[keyword::TITLE.len()..].trim();
    rest.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(rest)
        .to_string()
}

fn parse_triple<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<[f32; 3]> {
    let values: Vec<f32> = tokens.map(str::parse::<f32>).collect::<Result<_, _>>().ok()?;
    <[f32; 3]>::try_from(values).ok()
}

fn reject(mode: ParseMode, idx: usize, raw: &str, skipped: &mut usize) -> Result<(), ParseError> {
    match mode {
        ParseMode::Strict => Err(malformed(idx, raw)),
        ParseMode::Lenient => {
            tracing::trace!("skipping line {}: {raw:?}", idx + 1);
            *skipped += 1;
            Ok(())
        }
    }
}

fn malformed(idx: usize, raw: &str) -> ParseError {
    ParseError::MalformedLine {
        line: idx + 1,
        content: raw.to_string(),
    }
}
