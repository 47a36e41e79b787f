//! Reading the samples to plot and deriving the (x, y) series.

use std::{
    fs,
    path::{Path, PathBuf},
};
use log::{debug, warn};
use ndarray::ArrayViewD;
use crate::{
    error::{Error, Result},
    mpl,
};

/// Separates the container file from the dataset in an input argument.
const DATASET_MARKER: &str = ":/";

/// Where the samples come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Whitespace-separated numbers in a text file.
    Text(PathBuf),
    /// A dataset inside an HDF5 container.
    Dataset { container: PathBuf, dataset: String },
}

impl Source {
    /// Interpret the input argument: `container:/path/to/dataset` or a
    /// plain file path.
    pub fn parse(arg: &str) -> Source {
        match arg.split_once(DATASET_MARKER) {
            Some((container, dataset)) => Source::Dataset {
                container: PathBuf::from(container),
                dataset: format!("/{}", dataset),
            },
            None => Source::Text(PathBuf::from(arg)),
        }
    }

    /// Read all the samples.
    pub fn load(&self) -> Result<Samples> {
        let values = match self {
            Source::Text(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| input_error(path, e))?;
                parse_text(path, &text)?
            }
            Source::Dataset { container, dataset } => {
                let data = mpl::read_dataset(container, dataset)
                    .map_err(|e| match e {
                        mpl::Error::Python(e) => input_error(container, e),
                        e => Error::from(e),
                    })?;
                interleave(data.view())
            }
        };
        debug!("loaded {} samples from {:?}", values.len(), self);
        Ok(Samples(values))
    }
}

fn input_error(path: &Path, reason: impl ToString) -> Error {
    Error::InputFile {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Parse every whitespace-separated token of `text` as a number.
fn parse_text(path: &Path, text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|tok| tok.parse().map_err(|_| {
            input_error(path, format!("{:?} is not a number", tok))
        }))
        .collect()
}

/// Flatten `data`.  A 2-D dataset holds one coordinate per row, its
/// columns are laid out one after the other: x₀, y₀, x₁, y₁,...
pub fn interleave(data: ArrayViewD<'_, f64>) -> Vec<f64> {
    if data.ndim() == 2 {
        data.t().iter().copied().collect()
    } else {
        data.iter().copied().collect()
    }
}

/// The flat sequence of numbers read from the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples(pub Vec<f64>);

/// Abscissas and ordinates of the plotted points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Samples {
    /// With `auto_abscissa`, plot every sample against its index.
    /// Otherwise consecutive samples are (x, y) pairs; an unmatched
    /// last sample is dropped.
    pub fn series(&self, auto_abscissa: bool) -> Series {
        let s = &self.0;
        if auto_abscissa {
            return Series {
                x: (0 .. s.len()).map(|i| i as f64).collect(),
                y: s.clone(),
            }
        }
        if s.len() % 2 != 0 {
            warn!("odd number of samples, dropping the last one ({})",
                  s[s.len() - 1]);
        }
        Series {
            x: s.chunks_exact(2).map(|p| p[0]).collect(),
            y: s.chunks_exact(2).map(|p| p[1]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};
    use crate::error::EXIT_INPUT_FILE;

    fn samples(v: &[f64]) -> Samples { Samples(v.to_vec()) }

    #[test]
    fn sources() {
        assert_eq!(Source::parse("data.txt"),
                   Source::Text(PathBuf::from("data.txt")));
        assert_eq!(Source::parse("run.h5:/results/energy"),
                   Source::Dataset {
                       container: PathBuf::from("run.h5"),
                       dataset: "/results/energy".into() });
    }

    #[test]
    fn text_tokens() -> Result<()> {
        let v = parse_text(Path::new("t"), "0 0\n1\t1  2 4\n")?;
        assert_eq!(v, vec![0., 0., 1., 1., 2., 4.]);
        assert!(parse_text(Path::new("t"), " \n")?.is_empty());
        Ok(())
    }

    #[test]
    fn text_not_a_number() {
        let e = parse_text(Path::new("t"), "0 1 two 3").unwrap_err();
        assert_eq!(e.exit_code(), EXIT_INPUT_FILE);
        assert!(e.to_string().contains("\"two\""));
    }

    #[test]
    fn pairs() {
        let s = samples(&[0., 0., 1., 1., 2., 4.]).series(false);
        assert_eq!(s, Series { x: vec![0., 1., 2.], y: vec![0., 1., 4.] });
    }

    #[test]
    fn pairs_drop_unmatched() {
        let s = samples(&[0., 0., 1., 1., 2.]).series(false);
        assert_eq!(s, Series { x: vec![0., 1.], y: vec![0., 1.] });
        let s = samples(&[7.]).series(false);
        assert!(s.x.is_empty() && s.y.is_empty());
    }

    #[test]
    fn auto_abscissa() {
        let s = samples(&[0., 0., 1., 1., 2., 4.]).series(true);
        assert_eq!(s.x, vec![0., 1., 2., 3., 4., 5.]);
        assert_eq!(s.y, vec![0., 0., 1., 1., 2., 4.]);
    }

    #[test]
    fn interleave_rows() {
        let d = array![[0., 1., 2.], [0., 1., 4.]].into_dyn();
        assert_eq!(interleave(d.view()), vec![0., 0., 1., 1., 2., 4.]);
        let d = Array1::from(vec![3., 1., 2.]).into_dyn();
        assert_eq!(interleave(d.view()), vec![3., 1., 2.]);
    }

    #[test]
    fn load_text_file() -> Result<()> {
        let path = std::env::temp_dir()
            .join(format!("xyplot-load-{}.txt", std::process::id()));
        fs::write(&path, "0 0 1 1 2 4\n").map_err(Error::Io)?;
        let loaded = Source::Text(path.clone()).load();
        fs::remove_file(&path).ok();
        assert_eq!(loaded?, samples(&[0., 0., 1., 1., 2., 4.]));
        Ok(())
    }

    fn h5_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("xyplot-data-{}-{}.h5", std::process::id(), name))
    }

    #[test]
    #[cfg_attr(not(feature = "python-tests"),
               ignore = "needs h5py, enable the python-tests feature")]
    fn load_two_row_dataset() -> Result<()> {
        let path = h5_path("rows");
        mpl::write_dataset(&path, "xy",
                           &array![[0., 1., 2.], [0., 1., 4.]].into_dyn())?;
        let arg = format!("{}:/xy", path.display());
        let loaded = Source::parse(&arg).load();
        fs::remove_file(&path).ok();
        let s = loaded?.series(false);
        assert_eq!(s, Series { x: vec![0., 1., 2.], y: vec![0., 1., 4.] });
        Ok(())
    }

    #[test]
    #[cfg_attr(not(feature = "python-tests"),
               ignore = "needs h5py, enable the python-tests feature")]
    fn load_flat_dataset() -> Result<()> {
        let path = h5_path("flat");
        let flat = Array1::from(vec![0., 0., 1., 1., 2., 4.]).into_dyn();
        mpl::write_dataset(&path, "energy", &flat)?;
        let arg = format!("{}:/energy", path.display());
        let loaded = Source::parse(&arg).load();
        fs::remove_file(&path).ok();
        assert_eq!(loaded?, samples(&[0., 0., 1., 1., 2., 4.]));
        Ok(())
    }

    #[test]
    #[cfg_attr(not(feature = "python-tests"),
               ignore = "needs h5py, enable the python-tests feature")]
    fn missing_dataset() -> Result<()> {
        let path = h5_path("missing");
        let data = Array1::from(vec![1., 2.]).into_dyn();
        mpl::write_dataset(&path, "data", &data)?;
        let arg = format!("{}:/nothing", path.display());
        let e = Source::parse(&arg).load().unwrap_err();
        assert_eq!(e.exit_code(), EXIT_INPUT_FILE);
        // The container has been released: it can be truncated.
        mpl::write_dataset(&path, "data", &data)?;
        fs::remove_file(&path).ok();
        let e = Source::parse(&arg).load().unwrap_err();
        assert_eq!(e.exit_code(), EXIT_INPUT_FILE);
        Ok(())
    }

    #[test]
    fn load_missing_file() {
        let e = Source::parse("target/no/such/file.txt").load().unwrap_err();
        assert_eq!(e.exit_code(), EXIT_INPUT_FILE);
        assert!(e.to_string().contains("file.txt"));
    }
}
