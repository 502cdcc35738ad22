//! JSON rendering for outline results.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline result to JSON.
///
/// Keys keep declaration order and non-ASCII text is written verbatim.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write an outline result as JSON to a file.
pub fn write_json<P: AsRef<Path>>(
    result: &OutlineResult,
    path: P,
    format: JsonFormat,
) -> Result<()> {
    let json = to_json(result, format)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingEntry, HeadingLevel};

    fn sample() -> OutlineResult {
        OutlineResult::new(
            "Über die Natur",
            vec![
                HeadingEntry::new(HeadingLevel::H1, "Einleitung", 1),
                HeadingEntry::new(HeadingLevel::H2, "研究方法", 2),
            ],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let expected = r#"{
  "title": "Über die Natur",
  "outline": [
    {
      "level": "H1",
      "text": "Einleitung",
      "page": 1
    },
    {
      "level": "H2",
      "text": "研究方法",
      "page": 2
    }
  ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"{"title":"Über die Natur","outline":["#));
    }

    #[test]
    fn test_empty_outline() {
        let json = to_json(&OutlineResult::default(), JsonFormat::Pretty).unwrap();
        assert_eq!(json, "{\n  \"title\": \"\",\n  \"outline\": []\n}");
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&sample(), &path, JsonFormat::Compact).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: OutlineResult = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, sample());
    }
}
