//! Command-line front end for the expression engine.
//!
//! Run with:
//! ```bash
//! cargo run --example logic -- minimize "x & y | x & z" x y z
//! cargo run --example logic -- dnf "x & (y | z)"
//! cargo run --example logic -- gate xor 1 0 --mode binary
//! ```

use std::collections::HashMap;

use clap::{Parser, Subcommand};

use logic_rs::engine::{self, Output, ParseConfig, Parsed};
use logic_rs::karnaugh::KarnaughMap;
use logic_rs::parser::parse_expr;
use logic_rs::value::{Mode, Value};

#[derive(Debug, Parser)]
#[command(author, version, about = "Boolean expression engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging.
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simplify an expression, or evaluate it with `--set name=value`.
    Parse {
        expr: String,
        /// Variable assignment, e.g. `x=1` or `y=false`.
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, Value)>,
        /// Print the simplified tree as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the Karnaugh map over 2, 3 or 4 variables.
    Karnaugh { expr: String, variables: Vec<String> },
    /// List prime implicants.
    Implicants { expr: String, variables: Vec<String> },
    /// Minimize over 2, 3 or 4 variables.
    Minimize { expr: String, variables: Vec<String> },
    /// Conjunctive normal form.
    Cnf { expr: String },
    /// Disjunctive normal form.
    Dnf { expr: String },
    /// Check whether two expressions are equivalent.
    Equal { lhs: String, rhs: String },
    /// Print the truth table over the free variables.
    Table { expr: String },
    /// Render the simplified tree as Graphviz DOT.
    Dot { expr: String },
    /// Apply a gate (AND, NAND, XOR, COND, ...) to values.
    Gate {
        name: String,
        #[arg(value_parser = parse_value)]
        inputs: Vec<Value>,
        #[arg(long, value_name = "MODE", default_value = "boolean")]
        mode: Mode,
    },
}

fn parse_value(s: &str) -> Result<Value, String> {
    match s {
        "0" => Ok(Value::Bit(0)),
        "1" => Ok(Value::Bit(1)),
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(format!("invalid truth value: {:?}", s)),
    }
}

fn parse_assignment(s: &str) -> Result<(String, Value), String> {
    let (name, value) = s.split_once('=').ok_or_else(|| format!("expected NAME=VALUE, got {:?}", s))?;
    Ok((name.to_string(), parse_value(value)?))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        if cli.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    match cli.command {
        Command::Parse { expr, values, json } => {
            let config = if !values.is_empty() {
                ParseConfig::with_values(values.into_iter().collect::<HashMap<_, _>>())
            } else if json {
                ParseConfig::with_output(Output::Json)
            } else {
                ParseConfig::default()
            };
            match engine::parse(&expr, &config)? {
                Parsed::Text(s) | Parsed::Json(s) => println!("{}", s),
                Parsed::Value(v) => println!("{}", v),
                Parsed::Ast(e) => println!("{:?}", e),
            }
        }
        Command::Karnaugh { expr, variables } => {
            let map = KarnaughMap::new(&parse_expr(&expr)?, &variables)?;
            print!("{}", map);
        }
        Command::Implicants { expr, variables } => {
            for term in engine::prime_implicants(&expr, &variables)? {
                println!("{}", term);
            }
        }
        Command::Minimize { expr, variables } => {
            println!("{}", engine::minimize(&expr, &variables)?);
        }
        Command::Cnf { expr } => println!("{}", engine::to_cnf(&expr)?),
        Command::Dnf { expr } => println!("{}", engine::to_dnf(&expr)?),
        Command::Equal { lhs, rhs } => println!("{}", engine::is_equal(&lhs, &rhs)?),
        Command::Table { expr } => {
            let variables = parse_expr(&expr)?.variables();
            let table = engine::truth_table(&expr, &variables)?;
            println!("{} | {}", variables.join(" "), expr);
            for (inputs, outputs) in table.inputs().iter().zip(table.outputs()) {
                let row: Vec<String> = inputs.iter().map(|&b| (b as u8).to_string()).collect();
                println!("{} | {}", row.join(" "), outputs[0] as u8);
            }
        }
        Command::Dot { expr } => {
            let e = engine::parse_to_ast(&expr)?;
            print!("{}", e.to_dot()?);
        }
        Command::Gate { name, inputs, mode } => {
            println!("{}", engine::apply_gate(&name, mode, &inputs)?);
        }
    }

    Ok(())
}
