//! SPICE netlist lexer.
//!
//! Splits the input into logical lines: comments are dropped, `+`
//! continuation lines are folded into the line they continue, and each line
//! is split into whitespace-separated fields.

/// One logical netlist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Physical line number (1-based) where the logical line starts.
    pub line: usize,
    /// Whitespace-separated fields, continuation lines included.
    pub fields: Vec<String>,
}

impl LogicalLine {
    /// First field, lower-cased (element name or dot command).
    pub fn keyword(&self) -> String {
        self.fields
            .first()
            .map(|f| f.to_lowercase())
            .unwrap_or_default()
    }
}

/// Lexer for SPICE netlists.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Produce all logical lines of the input.
    pub fn logical_lines(&self) -> Vec<LogicalLine> {
        let mut lines: Vec<LogicalLine> = Vec::new();

        for (idx, raw) in self.input.lines().enumerate() {
            let text = strip_inline_comment(raw).trim();
            if text.is_empty() || text.starts_with('*') {
                continue;
            }

            if let Some(rest) = text.strip_prefix('+') {
                let fields = split_fields(rest);
                match lines.last_mut() {
                    Some(prev) => prev.fields.extend(fields),
                    None => {
                        // Nothing to continue; keep the content as its own line
                        if !fields.is_empty() {
                            lines.push(LogicalLine {
                                line: idx + 1,
                                fields,
                            });
                        }
                    }
                }
                continue;
            }

            lines.push(LogicalLine {
                line: idx + 1,
                fields: split_fields(text),
            });
        }

        lines
    }
}

fn strip_inline_comment(line: &str) -> &str {
    match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn split_fields(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(line: &LogicalLine) -> Vec<&str> {
        line.fields.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_simple_lines() {
        let lines = Lexer::new("r1 1 2 100\nc1 2 0 1f\n").logical_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(fields(&lines[0]), vec!["r1", "1", "2", "100"]);
        assert_eq!(lines[1].line, 2);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let input = "* header\n\n   \nr1 a b 1k ; trailing comment\n  * indented comment\n";
        let lines = Lexer::new(input).logical_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(fields(&lines[0]), vec!["r1", "a", "b", "1k"]);
        assert_eq!(lines[0].line, 4);
    }

    #[test]
    fn test_continuation_lines() {
        let input = ".subckt test 1 2 3\n+ 4 5 6\n* comment in between\n+7\nr1 1 2 100\n";
        let lines = Lexer::new(input).logical_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            fields(&lines[0]),
            vec![".subckt", "test", "1", "2", "3", "4", "5", "6", "7"]
        );
        assert_eq!(lines[0].line, 1);
        assert_eq!(lines[1].line, 5);
    }

    #[test]
    fn test_leading_continuation_becomes_line() {
        let lines = Lexer::new("+ r1 a b 1\n").logical_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(fields(&lines[0]), vec!["r1", "a", "b", "1"]);
    }

    #[test]
    fn test_crlf_input() {
        let lines = Lexer::new("r1 a b 1\r\n+ extra\r\n").logical_lines();
        assert_eq!(fields(&lines[0]), vec!["r1", "a", "b", "1", "extra"]);
    }

    #[test]
    fn test_keyword_lowercase() {
        let lines = Lexer::new(".SUBCKT Foo a").logical_lines();
        assert_eq!(lines[0].keyword(), ".subckt");
    }
}
