//! Element and instance line parsing.

use log::{debug, warn};
use opencheck_core::units::parse_value;
use opencheck_core::{Element, ElementKind, Instance};

use crate::error::{Error, Result};
use crate::lexer::LogicalLine;

use super::subcircuit::is_param_field;
use super::{ParseWarning, Parser};

impl Parser {
    /// Parse a line inside a `.SUBCKT` block. Only R, C and CC are allowed.
    pub(super) fn parse_subckt_element(&mut self, line: &LogicalLine) -> Result<()> {
        let name = &line.fields[0];

        if name.to_ascii_lowercase().starts_with('x') {
            return Err(Error::ParseError {
                line: line.line,
                message: format!(
                    "subcircuit instance {} inside .SUBCKT is not supported",
                    name
                ),
            });
        }

        let element = match ElementKind::from_name(name) {
            Some(kind) if kind.is_resistive() || kind.is_capacitive() => {
                parse_two_terminal(line, kind)?
            }
            _ => {
                return Err(Error::UnknownElement {
                    line: line.line,
                    name: name.clone(),
                });
            }
        };

        if let Some(builder) = self.current_subckt.as_mut() {
            builder.push(element);
        }
        Ok(())
    }

    /// Parse a line outside any `.SUBCKT` block.
    pub(super) fn parse_top_level_line(&mut self, line: &LogicalLine) -> Result<()> {
        let name = &line.fields[0];

        if name.to_ascii_lowercase().starts_with('x') {
            self.parse_instance(line);
            return Ok(());
        }

        match ElementKind::from_name(name) {
            Some(kind) if kind.is_resistive() || kind.is_capacitive() => {
                let element = parse_two_terminal(line, kind)?;
                self.netlist.add_element(element);
            }
            _ => debug!("line {}: ignoring top-level line {}", line.line, name),
        }
        Ok(())
    }

    /// Parse Xname conn1 conn2 ... template [PARAMS: ...]
    fn parse_instance(&mut self, line: &LogicalLine) {
        let name = &line.fields[0];
        let rest: Vec<&String> = line.fields[1..]
            .iter()
            .take_while(|f| !is_param_field(f))
            .collect();

        // Need at least one connection plus the template name
        let Some((template, connections)) = rest.split_last().filter(|_| rest.len() >= 2) else {
            let warning = ParseWarning::MalformedInstance {
                name: name.clone(),
                line: line.line,
            };
            warn!("{}", warning);
            self.warnings.push(warning);
            return;
        };

        self.netlist.add_instance(Instance::new(
            name.clone(),
            template.as_str(),
            connections.iter().map(|c| c.to_string()).collect(),
        ));
    }
}

/// Parse NAME N1 N2 VALUE [...] into an element of the given kind.
fn parse_two_terminal(line: &LogicalLine, kind: ElementKind) -> Result<Element> {
    let [name, node1, node2, value, ..] = line.fields.as_slice() else {
        return Err(Error::ParseError {
            line: line.line,
            message: format!(
                "{} {} requires two nodes and a value",
                kind,
                line.fields[0]
            ),
        });
    };

    let value = parse_value(value).ok_or_else(|| Error::InvalidValue {
        line: line.line,
        value: value.clone(),
    })?;

    Ok(Element::new(
        kind,
        name.as_str(),
        node1.as_str(),
        node2.as_str(),
        value,
    ))
}
