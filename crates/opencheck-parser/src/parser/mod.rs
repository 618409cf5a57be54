//! Netlist parser.

use std::path::Path;

use log::{debug, warn};
use opencheck_core::{HierarchicalNetlist, SubcircuitBuilder};

use crate::error::Result;
use crate::lexer::{Lexer, LogicalLine};

mod elements;
mod subcircuit;
pub mod types;

pub use types::{ParseResult, ParseWarning};

/// Parse a netlist string.
pub fn parse(input: &str) -> Result<ParseResult> {
    let lines = Lexer::new(input).logical_lines();
    Parser::new().parse_all(&lines)
}

/// Read and parse a netlist file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseResult> {
    let input = std::fs::read_to_string(path.as_ref())?;
    debug!("read {} bytes from {}", input.len(), path.as_ref().display());
    parse(&input)
}

/// Parser state.
pub(crate) struct Parser {
    pub(crate) netlist: HierarchicalNetlist,
    /// Template being read (None at top level).
    pub(crate) current_subckt: Option<SubcircuitBuilder>,
    /// Line of the `.SUBCKT` that opened `current_subckt`.
    pub(crate) current_subckt_line: usize,
    pub(crate) warnings: Vec<ParseWarning>,
}

impl Parser {
    fn new() -> Self {
        Self {
            netlist: HierarchicalNetlist::new(),
            current_subckt: None,
            current_subckt_line: 0,
            warnings: Vec::new(),
        }
    }

    fn parse_all(mut self, lines: &[LogicalLine]) -> Result<ParseResult> {
        for line in lines {
            self.parse_line(line)?;
        }

        if let Some(builder) = self.current_subckt.take() {
            let warning = ParseWarning::UnterminatedSubcircuit {
                name: builder.name().to_string(),
                line: self.current_subckt_line,
            };
            warn!("{}", warning);
            self.warnings.push(warning);
            self.finish_subcircuit(builder, self.current_subckt_line);
        }

        debug!(
            "parsed {} subcircuits, {} instances, {} top-level elements",
            self.netlist.num_subcircuits(),
            self.netlist.instances.len(),
            self.netlist.top_level_elements.len()
        );

        Ok(ParseResult {
            netlist: self.netlist,
            warnings: self.warnings,
        })
    }

    fn parse_line(&mut self, line: &LogicalLine) -> Result<()> {
        let keyword = line.keyword();
        if keyword.is_empty() {
            return Ok(());
        }

        if let Some(cmd) = keyword.strip_prefix('.') {
            return match cmd {
                "subckt" => self.parse_subckt_command(line),
                "ends" => self.parse_ends_command(line),
                _ => {
                    debug!("line {}: ignoring .{} command", line.line, cmd);
                    Ok(())
                }
            };
        }

        if self.current_subckt.is_some() {
            self.parse_subckt_element(line)
        } else {
            self.parse_top_level_line(line)
        }
    }
}
