//! Solver output profiles
//!
//! The solver writes its final solution as whitespace-separated `x y` lines.
//! Anything that is not exactly two numbers is skipped.

use std::error::Error;
use std::fs;
use std::path::Path;

/// Parse `x y` pairs from text, skipping malformed lines
pub fn parse_xy_profile(text: &str) -> Vec<(f64, f64)> {
    text.lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let x = fields.next()?.parse::<f64>().ok()?;
            let y = fields.next()?.parse::<f64>().ok()?;
            fields.next().is_none().then_some((x, y))
        })
        .collect()
}

/// Read a profile file (e.g. `u_serial.out`)
pub fn read_xy_profile(path: impl AsRef<Path>) -> Result<Vec<(f64, f64)>, Box<dyn Error>> {
    let text = fs::read_to_string(path.as_ref())?;
    Ok(parse_xy_profile(&text))
}
