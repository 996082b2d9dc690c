//! Interactive parameter input
//!
//! Any run parameter not supplied as a flag is read from stdin after a
//! prompt. Prompts go to stderr so stdout carries only the report.

use super::RankArgs;
use crate::error::{RankError, RankResult};
use crate::models::RunParameters;
use std::io::{BufRead, Write};

/// Resolve the four run parameters from flags, prompting for the rest
pub fn collect_parameters<R: BufRead, W: Write>(
    args: &RankArgs,
    input: &mut R,
    prompt_out: &mut W,
) -> RankResult<RunParameters> {
    let required_yield = value_or_prompt(
        args.required_yield,
        "required_yield",
        "Required Yield Strength (MPa): ",
        input,
        prompt_out,
    )?;
    // Fail fast before asking for the weights
    if !required_yield.is_finite() || required_yield <= 0.0 {
        return Err(RankError::invalid(
            "required_yield",
            format!("must be greater than 0, got {required_yield}"),
        ));
    }

    let thermal = value_or_prompt(args.thermal, "thermal_weight", "Thermal importance (0–1): ", input, prompt_out)?;
    let electrical = value_or_prompt(
        args.electrical,
        "electrical_weight",
        "Electrical importance (0–1): ",
        input,
        prompt_out,
    )?;
    let cost = value_or_prompt(args.cost, "cost_weight", "Cost importance (0–1): ", input, prompt_out)?;

    RunParameters::new(required_yield, thermal, electrical, cost)
}

fn value_or_prompt<R: BufRead, W: Write>(
    given: Option<f64>,
    name: &str,
    prompt: &str,
    input: &mut R,
    prompt_out: &mut W,
) -> RankResult<f64> {
    if let Some(value) = given {
        return Ok(value);
    }

    // A failed prompt write is not fatal; the value can still be read
    let _ = write!(prompt_out, "{prompt}");
    let _ = prompt_out.flush();

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| RankError::invalid(name, format!("could not read input: {e}")))?;
    if read == 0 {
        return Err(RankError::invalid(name, "no value given (end of input)"));
    }

    let text = line.trim();
    text.parse::<f64>()
        .map_err(|_| RankError::invalid(name, format!("'{text}' is not a number")))
}
