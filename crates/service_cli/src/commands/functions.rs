//! Functions command implementation
//!
//! Lists every registered function with its signature, e.g.
//! `bsm(S, K, T=1, r=0, q=0, sigma=0.16, CP=call)`.

use std::io::Write;

use pricer_models::functions::{FunctionId, FunctionRegistry, ParamDefault, ParamSpec};
use serde::Serialize;

use super::OutputFormat;
use crate::Result;

#[derive(Serialize)]
struct Listing {
    name: String,
    signature: String,
}

fn param_text(spec: &ParamSpec) -> String {
    match spec.default {
        ParamDefault::Required => spec.name.to_string(),
        ParamDefault::Number(value) => format!("{}={}", spec.name, value),
        ParamDefault::OptionType(option_type) => format!("{}={}", spec.name, option_type),
    }
}

/// Human-readable signature of a function
pub fn signature(id: FunctionId) -> String {
    let params: Vec<String> = id.params().iter().map(param_text).collect();
    format!("{}({})", id, params.join(", "))
}

/// Run the functions command
pub fn run(registry: &FunctionRegistry, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let listings: Vec<Listing> = registry
        .functions()
        .map(|id| Listing {
            name: id.name(),
            signature: signature(id),
        })
        .collect();

    match format {
        OutputFormat::Table => {
            for listing in &listings {
                writeln!(out, "{:<15} {}", listing.name, listing.signature)?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for listing in &listings {
                writer.serialize(listing)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &listings)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
