//! Command-line arguments.
//!
//! Numeric options are kept as strings: they are checked by
//! [`PlotSpec::build`](crate::plot::PlotSpec::build) so that a bad value
//! ends the process with the exit code of its error category.

use clap::{Parser, ValueEnum};

/// Plot x-y data read from a text or HDF5 file; the figure is written
/// to the standard output.
#[derive(Parser, Debug, Clone)]
#[command(name = "xyplot", version, about, long_about = None)]
pub struct Args {
    /// Input file of whitespace-separated numbers, or
    /// `container.h5:/path/to/dataset`
    pub file: String,

    /// Plot the samples against their index instead of reading x-y pairs
    #[arg(short = 'a', long)]
    pub auto_abscissa: bool,

    /// Output file type
    #[arg(short = 'T', long, default_value = "pdf")]
    pub output_format: String,

    /// Font size of the tick and axis labels
    #[arg(short = 'f', long)]
    pub font_size: Option<String>,

    /// Draw a grid
    #[arg(short = 'g', long)]
    pub grid: bool,

    /// Line width
    #[arg(short = 'W', long)]
    pub line_width: Option<String>,

    /// Line mode: 1 solid, 2 dashed, 3 dash-dot, 4 dotted
    #[arg(short = 'm', long, default_value = "1")]
    pub line_mode: String,

    /// Length of the ticks
    #[arg(short = 'k', long)]
    pub tick_size: Option<String>,

    /// Comma-separated axes to draw on a log scale, e.g. "x,y"
    #[arg(short = 'l', long)]
    pub toggle_log_axis: Option<String>,

    /// Size of the plot in inches: "width,height"
    #[arg(short = 's', long, allow_hyphen_values = true)]
    pub size_of_plot: Option<String>,

    /// Comma-separated axes to draw without ticks
    #[arg(short = 'N', long)]
    pub toggle_no_ticks: Option<String>,

    /// Line color
    #[arg(short = 'C', long)]
    pub color: Option<String>,

    /// Title of the plot
    #[arg(short = 'L', long)]
    pub top_label: Option<String>,

    /// Limits of the x axis: "min,max" or "min,max,n" to also place
    /// n-1 evenly spaced ticks
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    pub x_limits: Option<String>,

    /// Limits of the y axis: "min,max" or "min,max,n"
    #[arg(short = 'y', long, allow_hyphen_values = true)]
    pub y_limits: Option<String>,

    /// Label of the x axis
    #[arg(short = 'X', long)]
    pub x_label: Option<String>,

    /// Label of the y axis
    #[arg(short = 'Y', long)]
    pub y_label: Option<String>,

    /// Font size of the title
    #[arg(long)]
    pub title_font_size: Option<String>,

    /// Trim the margins around the plot
    #[arg(long)]
    pub tight: bool,

    /// Resolution of raster formats, in dots per inch
    #[arg(long)]
    pub dpi: Option<String>,

    /// Log verbosity (overrides RUST_LOG)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["xyplot", "data.txt"]).unwrap();
        assert_eq!(args.file, "data.txt");
        assert_eq!(args.output_format, "pdf");
        assert_eq!(args.line_mode, "1");
        assert!(!args.auto_abscissa && !args.grid && !args.tight);
        assert!(args.x_limits.is_none() && args.log_level.is_none());
    }

    #[test]
    fn short_and_long_flags() {
        let args = Args::try_parse_from([
            "xyplot", "-a", "-T", "png", "-g", "-W", "2", "-m", "3",
            "-l", "y", "-s", "4,3", "-N", "x", "-C", "red", "-L", "Title",
            "-x", "-1,10,6", "--y-limits=0,1", "-X", "time", "-Y", "value",
            "--title-font-size", "20", "--tight", "--log-level", "debug",
            "run.h5:/data",
        ]).unwrap();
        assert!(args.auto_abscissa && args.grid && args.tight);
        assert_eq!(args.output_format, "png");
        assert_eq!(args.x_limits.as_deref(), Some("-1,10,6"));
        assert_eq!(args.y_limits.as_deref(), Some("0,1"));
        assert_eq!(args.toggle_no_ticks.as_deref(), Some("x"));
        assert_eq!(args.top_label.as_deref(), Some("Title"));
        assert_eq!(args.file, "run.h5:/data");
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }

    #[test]
    fn file_is_required() {
        assert!(Args::try_parse_from(["xyplot", "-g"]).is_err());
    }
}
