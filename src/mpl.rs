//! Bindings to the parts of [Matplotlib][] needed to draw a single line
//! plot, and to [h5py][] to read HDF5 datasets.
//!
//! The interface stays close to Matplotlib's explicit one (a
//! [`Figure`] holding an [`Axes`]) while keeping a Rust flavor: every
//! call into Python returns a [`Result`].
//!
//! [Matplotlib]: https://matplotlib.org/
//! [h5py]: https://www.h5py.org/

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    path::Path,
};
use lazy_static::lazy_static;
use log::{debug, warn};
use ndarray::ArrayD;
use numpy::{PyArray1, PyArrayDyn, PyArrayMethods};
use pyo3::{
    prelude::*,
    intern,
    types::{IntoPyDict, PyBytes, PyDict},
};

/// Call the method `$m` of the Python object `$obj` (a `Py<_>`),
/// discarding its return value.
macro_rules! meth {
    ($obj: expr, $m: ident, $args: expr, $kwargs: expr) => {
        Python::with_gil(|py| {
            let kwargs = $kwargs.into_py_dict_bound(py);
            $obj.bind(py)
                .call_method(intern!(py, stringify!($m)), $args, Some(&kwargs))
                .map(|_| ())
                .map_err(Error::Python)
        })
    };
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| {
            $obj.bind(py)
                .call_method1(intern!(py, stringify!($m)), $args)
                .map(|_| ())
                .map_err(Error::Python)
        })
    };
}

/// Possible errors of the Python side.
#[derive(Debug)]
pub enum Error {
    /// The Python library "matplotlib" (or "numpy") was not found.
    NoMatplotlib,
    /// The Python library "h5py" was not found.
    NoH5py,
    /// Other Python errors.
    Python(PyErr),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::NoMatplotlib =>
                write!(f, "The matplotlib and numpy libraries have not been \
                           found.\nPlease install them.  See \
                           https://matplotlib.org/\n\
If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554"),
            Error::NoH5py =>
                write!(f, "Reading HDF5 datasets requires the h5py library.\n\
                           Please install it.  See https://www.h5py.org/"),
            Error::Python(e) =>
                write!(f, "Python error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<PyErr> for Error {
    fn from(e: PyErr) -> Self { Error::Python(e) }
}

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(Bound::unbind))
}}

lazy_static! {
    static ref FIGURE: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.figure")
    };
    static ref TICKER: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.ticker")
    };
    static ref NUMPY: Result<Py<PyModule>, PyErr> = {
        pyimport!("numpy")
    };
    static ref IO: Result<Py<PyModule>, PyErr> = {
        pyimport!("io")
    };
    // Only needed for `file:/dataset` inputs.
    static ref H5PY: Result<Py<PyModule>, PyErr> = {
        pyimport!("h5py")
    };
}

/// Return a handle to the module `$m`, or the error `Error::$e` if it
/// could not be imported.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod {
    ($m: ident) => { pymod!($m, NoMatplotlib) };
    ($m: ident, $e: ident) => { $m.as_ref().map_err(|_| Error::$e) };
}

/// Check that the Python libraries needed to draw are present.
pub fn check() -> Result<(), Error> {
    pymod!(FIGURE)?;
    pymod!(TICKER)?;
    pymod!(NUMPY)?;
    pymod!(IO)?;
    Ok(())
}

/// One of the two axes of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis { X, Y }

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    /// The letter naming the axis on the command line.
    pub fn letter(self) -> char {
        match self { Axis::X => 'x', Axis::Y => 'y' }
    }

    // Attribute of `matplotlib.axes.Axes` holding the `Axis` object.
    fn attr(self) -> &'static str {
        match self { Axis::X => "xaxis", Axis::Y => "yaxis" }
    }
}

/// Rule placing the major ticks of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// `n` evenly spaced ticks spanning the view limits.
    Linear(usize),
    /// No ticks at all, major or minor.
    Null,
}

/// Trait expressing that `Self` can be converted to a numpy.ndarray.
/// The data is copied so that the array owns its memory for as long
/// as Matplotlib keeps a reference to it.
pub trait Data {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>>;
}

impl<T> Data for T where T: AsRef<[f64]> + ?Sized {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self.as_ref())
    }
}

#[derive(Debug)]
pub struct Axes {
    ax: PyObject, // instance of matplotlib.axes.Axes
}

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

impl Figure {
    /// Return a new `Figure`.  It is not attached to pyplot, hence
    /// does not require a GUI backend.
    pub fn new() -> Result<Figure, Error> {
        let figure = pymod!(FIGURE)?;
        Python::with_gil(|py| {
            let fig = figure.bind(py)
                .getattr(intern!(py, "Figure"))?
                .call0()?;
            Ok(Self { fig: fig.unbind() })
        })
    }

    /// Add a single subplot filling the figure and return it.
    pub fn axes(&self) -> Result<Axes, Error> {
        Python::with_gil(|py| {
            let ax = self.fig.bind(py)
                .call_method0(intern!(py, "add_subplot"))?;
            Ok(Axes { ax: ax.unbind() })
        })
    }

    pub fn set_size_inches(&mut self, width: f64, height: f64)
                           -> Result<&mut Self, Error> {
        meth!(self.fig, set_size_inches, (width, height))?;
        Ok(self)
    }

    /// Adjust the padding between and around subplots.  `pad` is a
    /// fraction of the font size.
    pub fn tight_layout(&mut self, pad: f64) -> Result<&mut Self, Error> {
        meth!(self.fig, tight_layout, (), [("pad", pad)])?;
        Ok(self)
    }

    /// Formats the figure canvas can be saved to, mapped to their
    /// description (e.g. "pdf" → "Portable Document Format").
    pub fn supported_formats(&self)
                             -> Result<BTreeMap<String, String>, Error> {
        Python::with_gil(|py| {
            let canvas = self.fig.bind(py).getattr(intern!(py, "canvas"))?;
            let types = canvas
                .call_method0(intern!(py, "get_supported_filetypes"))?;
            Ok(types.extract()?)
        })
    }

    pub fn save(&self) -> Savefig<'_> {
        Savefig { fig: self, format: None, dpi: None }
    }
}

pub struct Savefig<'a> {
    fig: &'a Figure,
    format: Option<&'a str>,
    dpi: Option<f64>,
}

impl<'a> Savefig<'a> {
    pub fn format(&mut self, format: &'a str) -> &mut Self {
        self.format = Some(format);
        self
    }

    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            self.dpi = None;
        }
        self
    }

    /// Render the figure and return the encoded file content.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let io = pymod!(IO)?;
        Python::with_gil(|py| {
            let buf = io.bind(py).getattr(intern!(py, "BytesIO"))?.call0()?;
            let kwargs = PyDict::new_bound(py);
            if let Some(format) = self.format {
                kwargs.set_item("format", format)?
            }
            if let Some(dpi) = self.dpi {
                kwargs.set_item("dpi", dpi)?
            }
            self.fig.fig.bind(py).call_method(
                intern!(py, "savefig"), (buf.clone(),), Some(&kwargs))?;
            let value = buf.call_method0(intern!(py, "getvalue"))?;
            let bytes = value.downcast::<PyBytes>().map_err(PyErr::from)?;
            Ok(bytes.as_bytes().to_vec())
        })
    }
}

impl Axes {
    /// Plot `y` versus `x` as lines.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use xyplot::mpl::Figure;
    /// let fig = Figure::new()?;
    /// let mut ax = fig.axes()?;
    /// ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).color("r").plot()?;
    /// let pdf = fig.save().to_bytes()?;
    /// # Ok::<(), xyplot::mpl::Error>(())
    /// ```
    // The plot starts with the data so that options may be chained.
    // `self` is mutably borrowed to reflect that the final `.plot()`
    // mutates the underlying Python object.
    #[must_use]
    pub fn xy<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> XY<'a, D>
    where D: Data + ?Sized {
        XY { axes: self, options: PlotOptions::default(), x, y }
    }

    /// Set the axis' scale.  Possible values for `scale` are "linear",
    /// "log", "symlog", "logit",...
    pub fn set_scale(&mut self, axis: Axis, scale: &str)
                     -> Result<&mut Self, Error> {
        match axis {
            Axis::X => meth!(self.ax, set_xscale, (scale,))?,
            Axis::Y => meth!(self.ax, set_yscale, (scale,))?,
        }
        Ok(self)
    }

    pub fn grid(&mut self, on: bool) -> Result<&mut Self, Error> {
        meth!(self.ax, grid, (on,))?;
        Ok(self)
    }

    pub fn set_label(&mut self, axis: Axis, label: &str)
                     -> Result<&mut Self, Error> {
        match axis {
            Axis::X => meth!(self.ax, set_xlabel, (label,))?,
            Axis::Y => meth!(self.ax, set_ylabel, (label,))?,
        }
        Ok(self)
    }

    pub fn set_title(&mut self, title: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_title, (title,))?;
        Ok(self)
    }

    pub fn set_lim(&mut self, axis: Axis, min: f64, max: f64)
                   -> Result<&mut Self, Error> {
        match axis {
            Axis::X => meth!(self.ax, set_xlim, (min, max))?,
            Axis::Y => meth!(self.ax, set_ylim, (min, max))?,
        }
        Ok(self)
    }

    /// Install `locator` on `axis`, replacing the current one.
    pub fn set_locator(&mut self, axis: Axis, locator: Locator)
                       -> Result<&mut Self, Error> {
        let ticker = pymod!(TICKER)?;
        Python::with_gil(|py| -> PyResult<()> {
            let ticker = ticker.bind(py);
            let axis = self.ax.bind(py).getattr(axis.attr())?;
            match locator {
                Locator::Linear(n) => {
                    let loc = ticker.getattr(intern!(py, "LinearLocator"))?
                        .call1((n,))?;
                    axis.call_method1(intern!(py, "set_major_locator"),
                                      (loc,))?;
                }
                Locator::Null => {
                    let null = ticker.getattr(intern!(py, "NullLocator"))?;
                    axis.call_method1(intern!(py, "set_major_locator"),
                                      (null.call0()?,))?;
                    axis.call_method1(intern!(py, "set_minor_locator"),
                                      (null.call0()?,))?;
                }
            }
            Ok(())
        })?;
        Ok(self)
    }

    /// Change the appearance of the ticks of both axes.  `None` leaves
    /// the corresponding parameter untouched.
    pub fn tick_params(&mut self, length: Option<f64>,
                       labelsize: Option<f64>) -> Result<&mut Self, Error> {
        Python::with_gil(|py| -> PyResult<()> {
            let kwargs = PyDict::new_bound(py);
            kwargs.set_item("axis", "both")?;
            if let Some(l) = length {
                kwargs.set_item("length", l)?
            }
            if let Some(s) = labelsize {
                kwargs.set_item("labelsize", s)?
            }
            self.ax.bind(py)
                .call_method(intern!(py, "tick_params"), (), Some(&kwargs))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Set the font size of the label of `axis`.
    pub fn set_label_fontsize(&mut self, axis: Axis, size: f64)
                              -> Result<&mut Self, Error> {
        Python::with_gil(|py| -> PyResult<()> {
            self.ax.bind(py)
                .getattr(axis.attr())?
                .getattr(intern!(py, "label"))?
                .call_method1(intern!(py, "set_fontsize"), (size,))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Set the font size of the title.
    pub fn set_title_fontsize(&mut self, size: f64)
                              -> Result<&mut Self, Error> {
        Python::with_gil(|py| -> PyResult<()> {
            self.ax.bind(py)
                .getattr(intern!(py, "title"))?
                .call_method1(intern!(py, "set_fontsize"), (size,))?;
            Ok(())
        })?;
        Ok(self)
    }
}

#[derive(Clone, Default)]
struct PlotOptions<'a> {
    linewidth: Option<f64>,
    linestyle: Option<&'a str>,
    color: Option<&'a str>,
}

impl<'a> PlotOptions<'a> {
    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if let Some(w) = self.linewidth {
            kwargs.set_item("linewidth", w)?
        }
        if let Some(s) = self.linestyle {
            kwargs.set_item("linestyle", s)?
        }
        if let Some(c) = self.color {
            kwargs.set_item("color", c)?
        }
        Ok(kwargs)
    }
}

pub struct XY<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    options: PlotOptions<'a>,
    x: &'a D,
    y: &'a D,
}

impl<'a, D> XY<'a, D>
where D: Data + ?Sized {
    #[must_use]
    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.linewidth = Some(w);
        self
    }

    /// Matplotlib line style: "solid", "dashed", "dashdot", "dotted",...
    #[must_use]
    pub fn linestyle(mut self, style: &'a str) -> Self {
        self.options.linestyle = Some(style);
        self
    }

    /// Any color Matplotlib understands ("r", "tab:blue", "#ff8800",...).
    #[must_use]
    pub fn color(mut self, color: &'a str) -> Self {
        self.options.color = Some(color);
        self
    }

    /// Plot the data with the options specified in [`XY`].
    pub fn plot(self) -> Result<(), Error> {
        Python::with_gil(|py| {
            let xn = self.x.to_numpy(py);
            let yn = self.y.to_numpy(py);
            let kwargs = self.options.kwargs(py)?;
            self.axes.ax.bind(py)
                .call_method(intern!(py, "plot"), (xn, yn), Some(&kwargs))?;
            Ok(())
        })
    }
}

/// Wraps an open `h5py.File` and closes it when dropped.
struct H5File<'py>(Bound<'py, PyAny>);

impl Drop for H5File<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.0.call_method0("close") {
            warn!("could not close the HDF5 file: {}", e);
        }
    }
}

/// Read the whole `dataset` of the HDF5 file `path` as floats.
///
/// The file is opened read-only and is closed before this function
/// returns, whatever the outcome.
pub fn read_dataset(path: &Path, dataset: &str) -> Result<ArrayD<f64>, Error> {
    let h5py = pymod!(H5PY, NoH5py)?;
    let numpy = pymod!(NUMPY)?;
    Python::with_gil(|py| {
        let file = H5File(h5py.bind(py)
                          .getattr(intern!(py, "File"))?
                          .call1((path, "r"))?);
        let ds = file.0.get_item(dataset)?;
        let kwargs = [("dtype", "float64")].into_py_dict_bound(py);
        let data = numpy.bind(py)
            .getattr(intern!(py, "asarray"))?
            .call((ds,), Some(&kwargs))?;
        let data = data.downcast::<PyArrayDyn<f64>>().map_err(PyErr::from)?;
        let data = data.readonly().as_array().to_owned();
        debug!("read {:?} of shape {:?} from {}",
               dataset, data.shape(), path.display());
        Ok(data)
    })
}


/// Write `data` as the dataset `name` of the HDF5 file `path`,
/// truncating it.
#[cfg(test)]
pub(crate) fn write_dataset(path: &Path, name: &str, data: &ArrayD<f64>)
                            -> Result<(), Error> {
    let h5py = pymod!(H5PY, NoH5py)?;
    Python::with_gil(|py| {
        let file = H5File(h5py.bind(py)
                          .getattr(intern!(py, "File"))?
                          .call1((path, "w"))?);
        let kwargs = PyDict::new_bound(py);
        kwargs.set_item("data", PyArrayDyn::from_array_bound(py, data))?;
        file.0.call_method(intern!(py, "create_dataset"), (name,),
                           Some(&kwargs))?;
        Ok(())
    })
}
