//! Subcircuit definitions (.SUBCKT/.ENDS).

use log::{debug, warn};
use opencheck_core::SubcircuitBuilder;

use crate::error::{Error, Result};
use crate::lexer::LogicalLine;

use super::{ParseWarning, Parser};

impl Parser {
    /// Parse .SUBCKT name port1 port2 ... [PARAMS: ...]
    pub(super) fn parse_subckt_command(&mut self, line: &LogicalLine) -> Result<()> {
        let name = line.fields.get(1).ok_or_else(|| Error::ParseError {
            line: line.line,
            message: "expected subcircuit name after .SUBCKT".to_string(),
        })?;

        if self.current_subckt.is_some() {
            return Err(Error::NestedSubcircuit {
                line: line.line,
                name: name.clone(),
            });
        }

        // Parameter defaults carry no connectivity
        let ports: Vec<String> = line.fields[2..]
            .iter()
            .take_while(|f| !is_param_field(f))
            .cloned()
            .collect();

        self.current_subckt = Some(SubcircuitBuilder::open(name.clone(), ports));
        self.current_subckt_line = line.line;
        Ok(())
    }

    /// Parse .ENDS [name]
    pub(super) fn parse_ends_command(&mut self, line: &LogicalLine) -> Result<()> {
        let builder = self
            .current_subckt
            .take()
            .ok_or(Error::UnmatchedEnds { line: line.line })?;

        let end_name = line.fields.get(1);
        if let Some(end_name) = end_name.filter(|n| !n.eq_ignore_ascii_case(builder.name())) {
            debug!(
                "line {}: .ENDS {} closes subcircuit {}",
                line.line,
                end_name,
                builder.name()
            );
        }

        self.finish_subcircuit(builder, self.current_subckt_line);
        Ok(())
    }

    /// Close a template and register it with the netlist.
    pub(super) fn finish_subcircuit(&mut self, builder: SubcircuitBuilder, opened_at: usize) {
        let subckt = builder.close();
        debug!(
            "subcircuit {}: {} ports, {} elements, {} internal nodes",
            subckt.name,
            subckt.num_ports(),
            subckt.elements.len(),
            subckt.internal_nodes.len()
        );

        let name = subckt.name.clone();
        if self.netlist.add_subcircuit(subckt).is_some() {
            let warning = ParseWarning::RedefinedSubcircuit {
                name,
                line: opened_at,
            };
            warn!("{}", warning);
            self.warnings.push(warning);
        }
    }
}

/// Is this field the start of a `PARAMS:` section or a `name=value` pair?
pub(super) fn is_param_field(field: &str) -> bool {
    field.to_ascii_lowercase().starts_with("params:") || field.contains('=')
}
