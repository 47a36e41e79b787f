//! Applying a [`PlotSpec`] to a drawing surface, and writing the result.

use std::{collections::BTreeMap, io::Write};
use log::info;
use crate::{
    data::Series,
    error::{Error, Result},
    mpl::{Axes, Axis, Figure, Locator},
    plot::{LineSpec, PlotSpec, Ticks},
};

/// The configuration calls a plot is made of.
pub trait Canvas {
    fn set_size(&mut self, width: f64, height: f64) -> Result<()>;
    fn plot(&mut self, series: &Series, line: &LineSpec) -> Result<()>;
    fn set_log(&mut self, axis: Axis) -> Result<()>;
    fn grid(&mut self) -> Result<()>;
    fn set_label(&mut self, axis: Axis, label: &str) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    fn set_limits(&mut self, axis: Axis, min: f64, max: f64) -> Result<()>;
    fn set_locator(&mut self, axis: Axis, locator: Locator) -> Result<()>;
    fn set_ticks(&mut self, length: Option<f64>, label_size: Option<f64>)
                 -> Result<()>;
    fn set_label_size(&mut self, axis: Axis, size: f64) -> Result<()>;
    fn set_title_size(&mut self, size: f64) -> Result<()>;
    fn tight_layout(&mut self, pad: f64) -> Result<()>;
}

/// Draw `series` on `canvas` and configure it according to `spec`.
pub fn configure<C: Canvas>(spec: &PlotSpec, series: &Series, canvas: &mut C)
                            -> Result<()> {
    if let Some((width, height)) = spec.size {
        canvas.set_size(width, height)?;
    }
    canvas.plot(series, &spec.line)?;
    for (axis, a) in spec.axes() {
        if a.log {
            canvas.set_log(axis)?;
        }
    }
    if spec.grid {
        canvas.grid()?;
    }
    for (axis, a) in spec.axes() {
        if let Some(label) = &a.label {
            canvas.set_label(axis, label)?;
        }
    }
    if let Some(title) = &spec.title {
        canvas.set_title(title)?;
    }
    for (axis, a) in spec.axes() {
        if let Some((min, max)) = a.limits {
            canvas.set_limits(axis, min, max)?;
        }
        match a.ticks {
            Ticks::Auto => (),
            Ticks::Even(n) => canvas.set_locator(axis, Locator::Linear(n))?,
            Ticks::None => canvas.set_locator(axis, Locator::Null)?,
        }
    }
    if spec.tick_length.is_some() || spec.font_size.is_some() {
        canvas.set_ticks(spec.tick_length, spec.font_size)?;
    }
    if let Some(size) = spec.font_size {
        for axis in Axis::BOTH {
            canvas.set_label_size(axis, size)?;
        }
    }
    if let Some(size) = spec.title_font_size {
        canvas.set_title_size(size)?;
    }
    if let Some(pad) = spec.tight {
        canvas.tight_layout(pad)?;
    }
    Ok(())
}

/// Return an error unless `format` is one of `supported`.
pub fn check_format(format: &str, supported: &BTreeMap<String, String>)
                    -> Result<()> {
    if supported.contains_key(format) {
        Ok(())
    } else {
        Err(Error::OutputType {
            format: format.to_string(),
            supported: supported.keys().cloned().collect(),
        })
    }
}

/// A Matplotlib figure with a single subplot.
pub struct MplCanvas {
    fig: Figure,
    ax: Axes,
}

impl MplCanvas {
    pub fn new() -> Result<MplCanvas> {
        let fig = Figure::new()?;
        let ax = fig.axes()?;
        Ok(MplCanvas { fig, ax })
    }

    /// Encode the figure in `format`.
    pub fn to_bytes(&self, format: &str, dpi: Option<f64>) -> Result<Vec<u8>> {
        let mut save = self.fig.save();
        save.format(format);
        if let Some(dpi) = dpi {
            save.dpi(dpi);
        }
        Ok(save.to_bytes()?)
    }
}

impl Canvas for MplCanvas {
    fn set_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.fig.set_size_inches(width, height)?;
        Ok(())
    }

    fn plot(&mut self, series: &Series, line: &LineSpec) -> Result<()> {
        let mut xy = self.ax.xy(&series.x, &series.y);
        if let Some(w) = line.width {
            xy = xy.linewidth(w);
        }
        if let Some(style) = line.style {
            xy = xy.linestyle(style.as_str());
        }
        if let Some(color) = &line.color {
            xy = xy.color(color);
        }
        Ok(xy.plot()?)
    }

    fn set_log(&mut self, axis: Axis) -> Result<()> {
        self.ax.set_scale(axis, "log")?;
        Ok(())
    }

    fn grid(&mut self) -> Result<()> {
        self.ax.grid(true)?;
        Ok(())
    }

    fn set_label(&mut self, axis: Axis, label: &str) -> Result<()> {
        self.ax.set_label(axis, label)?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.ax.set_title(title)?;
        Ok(())
    }

    fn set_limits(&mut self, axis: Axis, min: f64, max: f64) -> Result<()> {
        self.ax.set_lim(axis, min, max)?;
        Ok(())
    }

    fn set_locator(&mut self, axis: Axis, locator: Locator) -> Result<()> {
        self.ax.set_locator(axis, locator)?;
        Ok(())
    }

    fn set_ticks(&mut self, length: Option<f64>, label_size: Option<f64>)
                 -> Result<()> {
        self.ax.tick_params(length, label_size)?;
        Ok(())
    }

    fn set_label_size(&mut self, axis: Axis, size: f64) -> Result<()> {
        self.ax.set_label_fontsize(axis, size)?;
        Ok(())
    }

    fn set_title_size(&mut self, size: f64) -> Result<()> {
        self.ax.set_title_fontsize(size)?;
        Ok(())
    }

    fn tight_layout(&mut self, pad: f64) -> Result<()> {
        self.fig.tight_layout(pad)?;
        Ok(())
    }
}

/// Draw the plot with Matplotlib and return the encoded figure.
pub fn render(spec: &PlotSpec, series: &Series) -> Result<Vec<u8>> {
    let mut canvas = MplCanvas::new()?;
    check_format(&spec.format, &canvas.fig.supported_formats()?)?;
    configure(spec, series, &mut canvas)?;
    let bytes = canvas.to_bytes(&spec.format, spec.dpi)?;
    info!("rendered {} points as {} ({} bytes)",
          series.x.len(), spec.format, bytes.len());
    Ok(bytes)
}

/// Write the encoded figure to `out`.
pub fn emit<W: Write>(bytes: &[u8], out: &mut W) -> Result<()> {
    out.write_all(bytes)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crate::{cli::Args, error::EXIT_OUTPUT_TYPE};

    /// Records the calls made to draw a plot.
    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Canvas for Recorder {
        fn set_size(&mut self, w: f64, h: f64) -> Result<()> {
            self.0.push(format!("size {} {}", w, h));
            Ok(())
        }
        fn plot(&mut self, s: &Series, line: &LineSpec) -> Result<()> {
            self.0.push(format!("plot {:?} {:?} {:?} {:?} {:?}", s.x, s.y,
                                line.width, line.style.map(|s| s.as_str()),
                                line.color));
            Ok(())
        }
        fn set_log(&mut self, axis: Axis) -> Result<()> {
            self.0.push(format!("log {}", axis.letter()));
            Ok(())
        }
        fn grid(&mut self) -> Result<()> {
            self.0.push("grid".into());
            Ok(())
        }
        fn set_label(&mut self, axis: Axis, label: &str) -> Result<()> {
            self.0.push(format!("label {} {}", axis.letter(), label));
            Ok(())
        }
        fn set_title(&mut self, title: &str) -> Result<()> {
            self.0.push(format!("title {}", title));
            Ok(())
        }
        fn set_limits(&mut self, axis: Axis, min: f64, max: f64)
                      -> Result<()> {
            self.0.push(format!("lim {} {} {}", axis.letter(), min, max));
            Ok(())
        }
        fn set_locator(&mut self, axis: Axis, locator: Locator)
                       -> Result<()> {
            self.0.push(format!("locator {} {:?}", axis.letter(), locator));
            Ok(())
        }
        fn set_ticks(&mut self, length: Option<f64>, size: Option<f64>)
                     -> Result<()> {
            self.0.push(format!("ticks {:?} {:?}", length, size));
            Ok(())
        }
        fn set_label_size(&mut self, axis: Axis, size: f64) -> Result<()> {
            self.0.push(format!("label size {} {}", axis.letter(), size));
            Ok(())
        }
        fn set_title_size(&mut self, size: f64) -> Result<()> {
            self.0.push(format!("title size {}", size));
            Ok(())
        }
        fn tight_layout(&mut self, pad: f64) -> Result<()> {
            self.0.push(format!("tight {}", pad));
            Ok(())
        }
    }

    fn calls(flags: &[&str]) -> Vec<String> {
        let argv = ["xyplot"].iter().chain(flags).chain(&["data.txt"]);
        let spec = PlotSpec::build(&Args::try_parse_from(argv).unwrap())
            .unwrap();
        let series = Series { x: vec![0., 1.], y: vec![1., 2.] };
        let mut rec = Recorder::default();
        configure(&spec, &series, &mut rec).unwrap();
        rec.0
    }

    #[test]
    fn minimal_plot() {
        assert_eq!(calls(&[]), ["plot [0.0, 1.0] [1.0, 2.0] None \
                                 Some(\"solid\") None"]);
        assert_eq!(calls(&["-m", "9"]), ["plot [0.0, 1.0] [1.0, 2.0] None \
                                          None None"]);
    }

    #[test]
    fn calls_are_ordered() {
        let c = calls(&["--tight", "--title-font-size", "20", "-f", "9",
                        "-k", "3", "-y", "0,5,3", "-x", "0,1", "-L", "T",
                        "-Y", "v", "-X", "t", "-g", "-l", "y,x", "-C", "b",
                        "-W", "2", "-s", "4,3"]);
        assert_eq!(c, [
            "size 4 3",
            "plot [0.0, 1.0] [1.0, 2.0] Some(2.0) Some(\"solid\") Some(\"b\")",
            "log x",
            "log y",
            "grid",
            "label x t",
            "label y v",
            "title T",
            "lim x 0 1",
            "lim y 0 5",
            "locator y Linear(2)",
            "ticks Some(3.0) Some(9.0)",
            "label size x 9",
            "label size y 9",
            "title size 20",
            "tight 0.1",
        ]);
    }

    #[test]
    fn even_ticks() {
        let c = calls(&["-x", "0,10,6"]);
        assert_eq!(&c[1..], ["lim x 0 10", "locator x Linear(5)"]);
    }

    #[test]
    fn no_ticks_replace_even_ticks() {
        let c = calls(&["-N", "x", "-x", "0,10,6"]);
        assert_eq!(&c[1..], ["lim x 0 10", "locator x Null"]);
        assert!(!c.iter().any(|s| s.contains("Linear")));
    }

    #[test]
    fn formats() {
        let supported: BTreeMap<String, String> =
            [("pdf", "Portable Document Format"),
             ("png", "Portable Network Graphics")]
            .into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        assert!(check_format("pdf", &supported).is_ok());
        let e = check_format("PDF", &supported).unwrap_err();
        assert_eq!(e.exit_code(), EXIT_OUTPUT_TYPE);
        assert!(e.to_string().ends_with("pdf, png"));
    }

    #[test]
    fn emit_writes_everything() -> Result<()> {
        let mut out = Vec::new();
        emit(b"%PDF-1.4 figure", &mut out)?;
        assert_eq!(out, b"%PDF-1.4 figure");
        Ok(())
    }
}
