//! Conversion of raw option strings into typed, checked values.

use log::warn;
use crate::{
    error::{Error, Result},
    mpl::Axis,
};

/// Parse `value`, given to `option`, as a floating-point number.
pub fn parse_float(option: &'static str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| Error::ArgumentType {
        option,
        value: value.to_string(),
        reason: "not a number",
    })
}

/// Parse the comma-separated list of numbers `value`, whose length
/// must be one of `arities`.
pub fn parse_list(option: &'static str, value: &str, arities: &[usize])
                  -> Result<Vec<f64>> {
    let items: Vec<&str> = value.split(',').collect();
    if !arities.contains(&items.len()) {
        let expected: Vec<String> =
            arities.iter().map(|n| n.to_string()).collect();
        return Err(Error::ArgumentCount {
            option,
            value: value.to_string(),
            expected: expected.join(" or "),
            count: items.len(),
        });
    }
    items.into_iter().map(|v| parse_float(option, v)).collect()
}

/// Parse a comma-separated list of axis letters.  Letters other than
/// `x` and `y` are ignored, each axis is listed once.
pub fn parse_axes(option: &'static str, value: &str) -> Vec<Axis> {
    let mut axes = Vec::with_capacity(2);
    for item in value.split(',').map(str::trim) {
        let axis = match item {
            "x" => Axis::X,
            "y" => Axis::Y,
            _ => {
                warn!("{}: ignoring {:?}, not an axis", option, item);
                continue
            }
        };
        if !axes.contains(&axis) {
            axes.push(axis);
        }
    }
    axes
}

/// Style of the plotted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    /// Map the line mode `value` (1 to 4, "2.0" reads as 2) to a style.
    /// Other integers give `None`, leaving the style to the backend.
    pub fn from_mode(option: &'static str, value: &str)
                     -> Result<Option<LineStyle>> {
        let mode = parse_float(option, value)?;
        if mode.fract() != 0. {
            return Err(Error::ArgumentType {
                option,
                value: value.to_string(),
                reason: "not an integer",
            });
        }
        let style = match mode as i64 {
            1 => LineStyle::Solid,
            2 => LineStyle::Dashed,
            3 => LineStyle::DashDot,
            4 => LineStyle::Dotted,
            _ => return Ok(None),
        };
        Ok(Some(style))
    }

    /// Matplotlib's name of the style.
    pub fn as_str(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::DashDot => "dashdot",
            LineStyle::Dotted => "dotted",
        }
    }
}
