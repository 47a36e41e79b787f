//! Plot x-y data read from a text or [HDF5][] file with [Matplotlib][].
//!
//! Usage
//! -----
//!
//! The `xyplot` program reads numbers from its input, validates the
//! formatting options given on the command line, draws a single line
//! plot and writes the figure to the standard output:
//!
//! ```text
//! xyplot -T png -X time -Y energy --x-limits=0,10,6 run.txt > run.png
//! xyplot -a -l y results.h5:/energy > energy.pdf
//! ```
//!
//! The library exposes each step of that pipeline, see [`run`].
//!
//! [HDF5]: https://www.hdfgroup.org/solutions/hdf5/
//! [Matplotlib]: https://matplotlib.org/

use std::io::Write;
use log::debug;

pub mod cli;
pub mod data;
pub mod error;
pub mod mpl;
pub mod options;
pub mod plot;
pub mod render;

pub use cli::Args;
pub use data::{Samples, Series, Source};
pub use error::{Error, Result};
pub use plot::PlotSpec;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// Plot the input described by `args` and write the figure to `out`.
///
/// Errors come out in the order the steps run: missing Python libraries,
/// then the input, then the options, then the output format.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    mpl::check()?;
    let source = Source::parse(&args.file);
    let samples = source.load()?;
    let series = samples.series(args.auto_abscissa);
    let spec = PlotSpec::build(args)?;
    debug!("plotting {} points", series.x.len());
    let bytes = render::render(&spec, &series)?;
    render::emit(&bytes, out)
}
