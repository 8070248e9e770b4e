//! Eval command implementation
//!
//! Evaluates one spreadsheet function. Tokens are positional arguments
//! unless written `name=value`; `_` leaves a cell blank.

use std::collections::BTreeMap;
use std::io::Write;

use pricer_models::functions::{FunctionRegistry, HostValue};
use tracing::debug;

use crate::Result;

/// Splits command-line tokens into positional and named arguments.
pub fn parse_tokens(tokens: &[String]) -> (Vec<HostValue>, BTreeMap<String, HostValue>) {
    let mut args = Vec::new();
    let mut named = BTreeMap::new();

    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) if is_param_name(key) => {
                named.insert(key.to_string(), HostValue::from_token(value));
            }
            _ => args.push(HostValue::from_token(token)),
        }
    }
    (args, named)
}

fn is_param_name(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic())
}

/// Run the eval command, writing the bare value
pub fn run(
    registry: &FunctionRegistry,
    function: &str,
    tokens: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let (args, named) = parse_tokens(tokens);
    debug!(function, args = args.len(), named = named.len(), "evaluating");

    let value = registry.evaluate_with(function, &args, &named)?;
    writeln!(out, "{}", value)?;
    Ok(())
}
