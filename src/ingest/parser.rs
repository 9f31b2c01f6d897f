use serde::Serialize;
use tracing::debug;

use crate::types::RawRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordParser {
    delimiter: char,
    quote: char,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedText {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub dropped_lines: usize,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn parse(&self, text: &str) -> Vec<RawRow> {
        self.parse_text(text).rows
    }

    pub fn parse_text(&self, text: &str) -> ParsedText {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = split_lines(text);
        let Some(header_line) = lines.next() else {
            return ParsedText::default();
        };
        let headers = self.split_fields(header_line);

        let mut rows = Vec::new();
        let mut dropped_lines = 0;
        for (offset, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let values = self.split_fields(line);
            if values.len() != headers.len() {
                debug!(
                    "dropping line {}: expected {} fields, found {}",
                    offset + 2,
                    headers.len(),
                    values.len()
                );
                dropped_lines += 1;
                continue;
            }
            let fields = headers.iter().cloned().zip(values).collect();
            rows.push(RawRow::new(fields));
        }

        ParsedText {
            headers,
            rows,
            dropped_lines,
        }
    }

    pub fn split_fields(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == self.quote {
                if in_quotes && chars.peek() == Some(&self.quote) {
                    current.push(self.quote);
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            } else if ch == self.delimiter && !in_quotes {
                fields.push(std::mem::take(&mut current));
            } else {
                current.push(ch);
            }
        }
        fields.push(current);
        fields
    }
}

pub fn parse(text: &str) -> Vec<RawRow> {
    RecordParser::default().parse(text)
}

/// Splits on `\r\n` or `\n`. A lone `\r` stays part of the line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_field_keeps_embedded_delimiter() {
        let parser = RecordParser::default();
        assert_eq!(parser.split_fields(r#""a,b",c"#), vec!["a,b", "c"]);
    }

    #[test]
    fn quote_state_toggles_mid_field() {
        let parser = RecordParser::default();
        assert_eq!(parser.split_fields(r#"a"b,c"d,e"#), vec!["ab,cd", "e"]);
    }

    #[test]
    fn leading_byte_order_mark_is_not_part_of_header() {
        let parsed = RecordParser::default().parse_text("\u{feff}Number - Name,b\nA,1\n");
        assert_eq!(parsed.headers, vec!["Number - Name", "b"]);
        assert_eq!(parsed.rows[0].get("Number - Name"), Some("A"));
    }

    #[test]
    fn doubled_quote_inside_quotes_is_literal() {
        let parser = RecordParser::default();
        assert_eq!(
            parser.split_fields(r#""she said ""hi""""#),
            vec![r#"she said "hi""#]
        );
    }

    #[test]
    fn mismatched_lines_are_dropped_and_header_is_not_data() {
        let text = "a,b\n1,2\n1,2,3\nonly\n3,4\n";
        let parsed = RecordParser::default().parse_text(text);
        assert_eq!(parsed.headers, vec!["a", "b"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.dropped_lines, 2);
        assert_eq!(parsed.rows[0].get("a"), Some("1"));
        assert_eq!(parsed.rows[1].get("b"), Some("4"));
    }

    #[test]
    fn handles_crlf_and_blank_lines() {
        let text = "x,y\r\n\r\n  \r\n1,\"2\r\n";
        let rows = parse(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("x"), Some("1"));
        // The unterminated quote swallows the rest of the line.
        assert_eq!(rows[0].get("y"), Some("2"));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse("").is_empty());
        assert!(parse("only,a,header").is_empty());
    }

    #[test]
    fn custom_delimiter_and_quote() {
        let parser = RecordParser::new().with_delimiter(';').with_quote('\'');
        let rows = parser.parse("k;v\n'a;b';'it''s'\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("k"), Some("a;b"));
        assert_eq!(rows[0].get("v"), Some("it's"));
    }

    #[test]
    fn preserves_row_order_without_dedup() {
        let rows = parse("n\nb\na\nb\n");
        let values: Vec<_> = rows.iter().filter_map(|r| r.get("n")).collect();
        assert_eq!(values, vec!["b", "a", "b"]);
    }
}
