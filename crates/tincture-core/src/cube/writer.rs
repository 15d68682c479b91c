//! `.cube` serialization.

use std::fmt;
use std::path::Path;

use crate::cube::keyword;
use crate::error::ParseError;
use crate::transform::lut::Lut3D;

/// Render `lut` as `.cube` text.
///
/// Values use Rust's shortest round-trip float formatting, so parsing the
/// output reproduces the table bit-for-bit. Domain directives are only
/// written when they differ from `[0, 1]`. Line breaks in the title are
/// written as spaces, since the format has no way to escape them.
pub fn to_cube_string(lut: &Lut3D) -> String {
    CubeText(lut).to_string()
}

struct CubeText<'a>(&'a Lut3D);

impl fmt::Display for CubeText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lut = self.0;
        if let Some(title) = &lut.title {
            writeln!(f, "{} \"{}\"", keyword::TITLE, single_line(title))?;
        }
        if lut.has_custom_domain() {
            let [r, g, b] = lut.domain_min;
            writeln!(f, "{} {r} {g} {b}", keyword::DOMAIN_MIN)?;
            let [r, g, b] = lut.domain_max;
            writeln!(f, "{} {r} {g} {b}", keyword::DOMAIN_MAX)?;
        }
        writeln!(f, "{} {}", keyword::LUT_3D_SIZE, lut.size())?;
        writeln!(f)?;
        for &[r, g, b] in lut.table() {
            writeln!(f, "{r} {g} {b}")?;
        }
        Ok(())
    }
}

fn single_line(title: &str) -> String {
    title.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Write `lut` to a `.cube` file.
pub fn save_cube(lut: &Lut3D, path: &Path) -> Result<(), ParseError> {
    std::fs::write(path, to_cube_string(lut))?;
    tracing::debug!("saved cube {} (size {})", path.display(), lut.size());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::parser::{ParseMode, load_cube, parse_with};

    #[test]
    fn test_writer_layout() {
        let text = to_cube_string(&Lut3D::identity(2));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "LUT_3D_SIZE 2");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "0 0 0");
        assert_eq!(lines[3], "1 0 0");
        assert_eq!(lines[9], "1 1 1");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_written_cube_parses_strictly() {
        let mut lut = Lut3D::identity(3).with_title("Identity");
        lut.domain_max = [2.0, 2.0, 2.0];
        let parsed = parse_with(&to_cube_string(&lut), ParseMode::Strict).unwrap();
        assert_eq!(parsed, lut);
    }

    #[test]
    fn test_awkward_floats_survive() {
        let table = vec![[0.1, 1.0 / 3.0, 1e-7], [-0.0, 123.456, f32::MIN_POSITIVE]]
            .into_iter()
            .cycle()
            .take(8)
            .collect();
        let lut = Lut3D::new(2, table).unwrap();
        let parsed = parse_with(&to_cube_string(&lut), ParseMode::Strict).unwrap();
        assert_eq!(parsed.table(), lut.table());
    }

    #[test]
    fn test_title_line_breaks_become_spaces() {
        let lut = Lut3D::identity(2).with_title("Warm\nFilm\r\nStock");
        let text = to_cube_string(&lut);
        assert!(text.starts_with("TITLE \"Warm Film Stock\"\n"));

        let parsed = parse_with(&text, ParseMode::Strict).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Warm Film Stock"));
        assert_eq!(parsed.table(), lut.table());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("tincture-save-{}.cube", std::process::id()));
        let mut lut = Lut3D::identity(5).with_title("Saved");
        lut.domain_min = [-0.5, 0.0, 0.0];

        save_cube(&lut, &path).unwrap();
        let loaded = load_cube(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), lut);
    }

    #[test]
    fn test_save_to_missing_directory_is_io_error() {
        let path = Path::new("/nonexistent/tincture/out.cube");
        let err = save_cube(&Lut3D::identity(2), path).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
