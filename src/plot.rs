//! The plot configuration record, built once from the command line.

use log::debug;
use crate::{
    cli::Args,
    error::{Error, Result},
    mpl::Axis,
    options::{parse_axes, parse_float, parse_list, LineStyle},
};

/// Most ticks an axis may get from a limits option; Matplotlib's
/// `Locator.MAXTICKS`.
pub const MAX_TICKS: usize = 1000;

/// Padding, in font-size units, used by `--tight`.
pub const TIGHT_PAD: f64 = 0.1;

/// Placement of the ticks of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ticks {
    /// Left to the backend.
    #[default]
    Auto,
    /// This many evenly spaced ticks within the limits.
    Even(usize),
    /// No ticks at all.
    None,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisSpec {
    pub log: bool,
    pub limits: Option<(f64, f64)>,
    pub ticks: Ticks,
    pub label: Option<String>,
}

/// Appearance of the plotted line; `None` keeps the backend default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineSpec {
    pub width: Option<f64>,
    pub style: Option<LineStyle>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    /// Figure (width, height) in inches.
    pub size: Option<(f64, f64)>,
    pub line: LineSpec,
    pub grid: bool,
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub title: Option<String>,
    pub tick_length: Option<f64>,
    /// Size of the tick and axis labels.
    pub font_size: Option<f64>,
    pub title_font_size: Option<f64>,
    /// Padding of the tight layout, if requested.
    pub tight: Option<f64>,
    pub format: String,
    pub dpi: Option<f64>,
}

impl PlotSpec {
    /// Check and convert the options of `args`.
    pub fn build(args: &Args) -> Result<PlotSpec> {
        let size = args.size_of_plot.as_deref()
            .map(|v| parse_list("--size-of-plot", v, &[2]))
            .transpose()?
            .map(|v| (v[0], v[1]));
        let line = LineSpec {
            width: float("--line-width", &args.line_width)?,
            style: LineStyle::from_mode("--line-mode", &args.line_mode)?,
            color: args.color.clone(),
        };

        let mut x = AxisSpec { label: args.x_label.clone(),
                               ..AxisSpec::default() };
        let mut y = AxisSpec { label: args.y_label.clone(),
                               ..AxisSpec::default() };
        if let Some(v) = &args.toggle_log_axis {
            for axis in parse_axes("--toggle-log-axis", v) {
                match axis {
                    Axis::X => x.log = true,
                    Axis::Y => y.log = true,
                }
            }
        }
        limits(&mut x, "--x-limits", &args.x_limits)?;
        limits(&mut y, "--y-limits", &args.y_limits)?;
        // Removing the ticks wins over any tick count given with the limits.
        if let Some(v) = &args.toggle_no_ticks {
            for axis in parse_axes("--toggle-no-ticks", v) {
                match axis {
                    Axis::X => x.ticks = Ticks::None,
                    Axis::Y => y.ticks = Ticks::None,
                }
            }
        }

        let spec = PlotSpec {
            size,
            line,
            grid: args.grid,
            x,
            y,
            title: args.top_label.clone(),
            tick_length: float("--tick-size", &args.tick_size)?,
            font_size: float("--font-size", &args.font_size)?,
            title_font_size: float("--title-font-size",
                                   &args.title_font_size)?,
            tight: args.tight.then_some(TIGHT_PAD),
            format: args.output_format.clone(),
            dpi: float("--dpi", &args.dpi)?,
        };
        debug!("{:?}", spec);
        Ok(spec)
    }

    /// The two axes with their settings.
    pub fn axes(&self) -> [(Axis, &AxisSpec); 2] {
        [(Axis::X, &self.x), (Axis::Y, &self.y)]
    }
}

fn float(option: &'static str, value: &Option<String>) -> Result<Option<f64>> {
    value.as_deref().map(|v| parse_float(option, v)).transpose()
}

/// Parse "min,max" or "min,max,n" into `axis`.  With `n`, `n - 1`
/// ticks are evenly spaced between the limits.
fn limits(axis: &mut AxisSpec, option: &'static str, value: &Option<String>)
          -> Result<()> {
    let Some(value) = value else { return Ok(()) };
    let v = parse_list(option, value, &[2, 3])?;
    axis.limits = Some((v[0], v[1]));
    if let Some(&n) = v.get(2) {
        if n.fract() != 0. || n < 2. || n > (MAX_TICKS + 1) as f64 {
            return Err(Error::ArgumentType {
                option,
                value: value.clone(),
                reason: "the tick count must be an integer from 2 to 1001",
            });
        }
        axis.ticks = Ticks::Even(n as usize - 1);
    }
    Ok(())
}
