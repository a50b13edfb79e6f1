//! crates/logging-config/src/parse.rs
//!
//! Line parser for the `key = value` configuration file format.

use std::io::BufRead;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// Reads every `key = value` entry from `reader`.
///
/// `origin` is only used to label read errors. Malformed lines are skipped;
/// the first read error aborts parsing.
pub(crate) fn parse_entries<R: BufRead>(
    reader: R,
    origin: &Path,
) -> ConfigResult<Vec<(String, String)>> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ConfigError::read(origin, source))?;
        match parse_line(&line) {
            Some((key, value)) => entries.push((key.to_owned(), value.to_owned())),
            None => {
                crate::trace::skipped_line(origin, index + 1);
            }
        }
    }
    Ok(entries)
}

/// Parses a single line, returning `None` for blanks, comments and malformed input.
pub(crate) fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start_matches([' ', '\t']);
    if trimmed.trim_end_matches(['\r', '\n', ' ', '\t']).is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let line = line.trim_end_matches(['\r', '\n']);
    let eq = line.find('=')?;
    if eq == 0 || eq + 1 == line.len() {
        return None;
    }

    let key = line[..eq].trim_matches([' ', '\t']);
    let value = line[eq + 1..].trim_matches([' ', '\t']);
    if key.is_empty() || value.is_empty() {
        return None;
    }
    // `key = ""` yields an empty value.
    Some((key, strip_quotes(value)))
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_simple_entry() {
        assert_eq!(parse_line("a=b"), Some(("a", "b")));
    }

    #[test]
    fn trims_spaces_and_tabs() {
        assert_eq!(
            parse_line("\t root_logger_level \t=  info\t"),
            Some(("root_logger_level", "info"))
        );
    }

    #[test]
    fn skips_comments_and_blanks() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("# a=b"), None);
        assert_eq!(parse_line("   # a=b"), None);
    }

    #[test]
    fn skips_equals_at_edges() {
        assert_eq!(parse_line("=value"), None);
        assert_eq!(parse_line("key="), None);
        assert_eq!(parse_line("novalue"), None);
    }

    #[test]
    fn skips_empty_key_or_value_after_trim() {
        assert_eq!(parse_line("  = value"), None);
        assert_eq!(parse_line("key =   "), None);
    }

    #[test]
    fn strips_one_pair_of_quotes() {
        assert_eq!(parse_line("fmt = \"%v\""), Some(("fmt", "%v")));
        assert_eq!(parse_line("fmt = \"\"%v\"\""), Some(("fmt", "\"%v\"")));
        assert_eq!(parse_line("fmt = \"open"), Some(("fmt", "\"open")));
    }

    #[test]
    fn quoted_empty_value_is_kept() {
        assert_eq!(parse_line("root_logger_sinks = \"\""), Some(("root_logger_sinks", "")));
        assert_eq!(parse_line("k =\t\"\"  "), Some(("k", "")));
    }

    #[test]
    fn value_may_contain_equals() {
        assert_eq!(parse_line("k = a=b"), Some(("k", "a=b")));
    }

    #[test]
    fn handles_crlf_line_endings() {
        assert_eq!(parse_line("k = v\r"), Some(("k", "v")));
    }

    #[test]
    fn parse_entries_keeps_order() {
        let input = "# header\nb = 2\n\na = 1\nbad line\n";
        let entries = parse_entries(Cursor::new(input), Path::new("<memory>")).unwrap();
        assert_eq!(
            entries,
            vec![
                ("b".to_owned(), "2".to_owned()),
                ("a".to_owned(), "1".to_owned())
            ]
        );
    }

    #[test]
    fn parse_entries_rejects_invalid_utf8() {
        let input: &[u8] = b"a = \xff\xfe\n";
        let err = parse_entries(Cursor::new(input), Path::new("<memory>")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
