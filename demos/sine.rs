/// Plot a sine wave with the library API and save it to
/// target/sine.svg.

use std::error::Error;
use xyplot::{
    plot::{AxisSpec, LineSpec, PlotSpec, Ticks},
    render::{configure, MplCanvas},
    Series,
};

fn main() -> Result<(), Box<dyn Error>> {
    let x: Vec<_> = (0 .. 1000).map(|i| i as f64 / 100.).collect();
    let y: Vec<_> = x.iter().map(|x| x.sin()).collect();
    let spec = PlotSpec {
        size: Some((6., 3.)),
        line: LineSpec { color: Some("r".into()), ..LineSpec::default() },
        grid: true,
        x: AxisSpec { limits: Some((0., 10.)), ticks: Ticks::Even(11),
                      label: Some("x".into()), ..AxisSpec::default() },
        y: AxisSpec { label: Some("sin x".into()), ..AxisSpec::default() },
        title: Some("A simple example".into()),
        tick_length: None,
        font_size: None,
        title_font_size: None,
        tight: Some(0.1),
        format: "svg".into(),
        dpi: None,
    };
    let mut canvas = MplCanvas::new()?;
    configure(&spec, &Series { x, y }, &mut canvas)?;
    std::fs::write("target/sine.svg", canvas.to_bytes(&spec.format, None)?)?;
    Ok(())
}
