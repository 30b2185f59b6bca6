//! Expression tree to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Leaves** (literals and variables) are placed at the bottom (sink rank)
//! - **Connectives** (`!`, `&`, `|`) are rendered as circles
//! - **Edges** go from a connective to its operands, left operand first
//! - The **root** is marked with a rectangle at the top (source rank)
//!
//! Shared subtrees are not merged: every node of the tree gets its own
//! graph node, numbered in pre-order.
//!
//! # Examples
//!
//! ```
//! use logic_rs::parser::parse_expr;
//!
//! let e = parse_expr("x & !y").unwrap();
//! let dot = e.to_dot().unwrap();
//! assert!(dot.starts_with("graph {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use crate::expr::Expr;

/// Configuration options for DOT output generation.
///
/// ```
/// use logic_rs::dot::DotConfig;
/// use logic_rs::expr::Expr;
///
/// let config = DotConfig {
///     leaf_shape: "box",
///     ..DotConfig::default()
/// };
/// let dot = Expr::var("x").to_dot_with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for connective nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for literal and variable nodes (default: "square")
    pub leaf_shape: &'static str,
    /// Shape for the root marker (default: "rect")
    pub root_shape: &'static str,
    /// Style for edges into negated operands (default: "dashed")
    pub negated_edge_style: &'static str,
    /// Render literals as `1`/`0` instead of `true`/`false` (default: false)
    pub binary_literals: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            leaf_shape: "square",
            root_shape: "rect",
            negated_edge_style: "dashed",
            binary_literals: false,
        }
    }
}

impl Expr {
    /// Converts the tree to DOT format with the default configuration.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the tree to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        collect(self, &mut nodes, &mut edges);

        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        writeln!(dot, "{{ rank=sink")?;
        for (id, node) in nodes.iter().enumerate() {
            match node {
                Expr::Literal(b) => {
                    let label = if config.binary_literals {
                        (*b as u8).to_string()
                    } else {
                        b.to_string()
                    };
                    writeln!(dot, "{} [shape={}, label=\"{}\"];", id, config.leaf_shape, label)?;
                }
                Expr::Variable(name) => {
                    writeln!(dot, "{} [shape={}, label=\"{}\"];", id, config.leaf_shape, name)?;
                }
                _ => {}
            }
        }
        writeln!(dot, "}}")?;

        for (id, node) in nodes.iter().enumerate() {
            let label = match node {
                Expr::Not(_) => "!",
                Expr::And(_, _) => "&",
                Expr::Or(_, _) => "|",
                _ => continue,
            };
            writeln!(dot, "{} [label=\"{}\"];", id, label)?;
        }

        for &(parent, child) in &edges {
            if matches!(nodes[parent], Expr::Not(_)) {
                writeln!(dot, "{} -- {} [style={}];", parent, child, config.negated_edge_style)?;
            } else {
                writeln!(dot, "{} -- {};", parent, child)?;
            }
        }

        writeln!(dot, "{{ rank=source")?;
        writeln!(dot, "r [shape={}, label=\"{}\"];", config.root_shape, escape(&self.to_string()))?;
        writeln!(dot, "}}")?;
        writeln!(dot, "r -- 0;")?;

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

/// Pre-order numbering of all nodes, plus parent-child edges.
fn collect<'a>(expr: &'a Expr, nodes: &mut Vec<&'a Expr>, edges: &mut Vec<(usize, usize)>) -> usize {
    let id = nodes.len();
    nodes.push(expr);
    match expr {
        Expr::Literal(_) | Expr::Variable(_) => {}
        Expr::Not(x) => {
            let child = collect(x, nodes, edges);
            edges.push((id, child));
        }
        Expr::And(a, b) | Expr::Or(a, b) => {
            let left = collect(a, nodes, edges);
            edges.push((id, left));
            let right = collect(b, nodes, edges);
            edges.push((id, right));
        }
    }
    id
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::parser::parse_expr;

    #[test]
    fn test_to_dot_basic() {
        let e = parse_expr("x & !y | z").unwrap();
        let dot = e.to_dot().unwrap();
        assert!(dot.starts_with("graph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("label=\"x\""));
        assert!(dot.contains("label=\"|\""));
        assert!(dot.contains("[style=dashed]"));
        assert!(dot.contains("label=\"x & !y | z\""));
    }

    #[test]
    fn test_to_dot_edges() {
        let e = parse_expr("a & b").unwrap();
        let dot = e.to_dot().unwrap();
        // Root `&` is node 0, its operands are 1 and 2.
        assert!(dot.contains("0 -- 1;"));
        assert!(dot.contains("0 -- 2;"));
        assert!(dot.contains("r -- 0;"));
    }

    #[test]
    fn test_to_dot_with_config() {
        let config = DotConfig {
            binary_literals: true,
            ..DotConfig::default()
        };
        let dot = Expr::constant(true).to_dot_with_config(&config).unwrap();
        assert!(dot.contains("label=\"1\""));
    }

    #[test]
    #[ignore]
    fn test_write_dot_file() {
        let e = parse_expr("(a | b) & !(c & d)").unwrap();
        let dot = e.to_dot().unwrap();
        std::fs::write("test_output.dot", &dot).unwrap();
        println!("DOT output:\n{}", dot);
    }
}
