use std::f64::consts::TAU;

use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};

use gpui_sciplot::{
    Canvas, Color, ContourGrid, Dataset2d, GpuiCanvasView, HistogramBins, LineDash, MarkerShape,
    Palette, Placement, Plot, Plot2d, PlotContour, PlotEventKind, PlotHistogram, PlotPolar,
    PlotResult, Point, TextAnnotation,
};

fn line_plot() -> PlotResult<Plot> {
    let xs: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
    let sine = Dataset2d::new(xs.clone(), xs.iter().map(|x| x.sin()).collect())?
        .with_name("sin")
        .with_color(Color::new(0.2, 0.5, 0.9, 1.0));
    let mut damped = Dataset2d::new(
        xs.clone(),
        xs.iter().map(|x| (-0.3 * x).exp() * (2.0 * x).cos()).collect(),
    )?
    .with_name("damped");
    damped.set_line_dash(LineDash::LongDashShortGap);

    let sample_x: Vec<f64> = (0..10).map(|i| i as f64 + 0.5).collect();
    let sample_y: Vec<f64> = sample_x.iter().map(|x| 0.8 * x.sin()).collect();
    let mut samples = Dataset2d::new(sample_x, sample_y.clone())?
        .with_name("samples")
        .with_color(Color::RED)
        .with_y_errors(
            sample_y.iter().map(|y| y - 0.15).collect(),
            sample_y.iter().map(|y| y + 0.15).collect(),
        )?;
    samples.hide_line();
    samples.set_marker(MarkerShape::Cross, Color::RED);

    let mut kind = Plot2d::with_dataset(sine);
    kind.add_dataset(damped)?;
    kind.add_dataset(samples)?;
    kind.add_annotation(TextAnnotation::new("drag to zoom", Point::new(5.0, 0.8)));
    Ok(Plot::new(kind)
        .with_title("Signals")
        .with_axis_titles("t", "amplitude")
        .with_placement(Placement::new(0.0, 0.0, 0.5, 0.5)?))
}

fn polar_plot() -> PlotResult<Plot> {
    let theta: Vec<f64> = (0..=360).map(|i| i as f64 * TAU / 360.0).collect();
    let rose = Dataset2d::new(
        theta.iter().map(|t| 1.0 + (3.0 * t).cos().abs()).collect(),
        theta,
    )?
    .with_name("rose");
    Ok(Plot::new(PlotPolar::with_dataset(rose)?).with_placement(Placement::new(0.5, 0.0, 0.5, 0.5)?))
}

fn histogram_plot() -> PlotResult<Plot> {
    let edges: Vec<f64> = (0..=12).map(|i| i as f64 * 0.5).collect();
    let counts = vec![1.0, 3.0, 7.0, 12.0, 18.0, 22.0, 19.0, 13.0, 8.0, 4.0, 2.0, 1.0];
    Ok(Plot::new(PlotHistogram::new(HistogramBins::new(edges, counts)?))
        .with_title("Histogram")
        .with_placement(Placement::new(0.0, 0.5, 0.5, 0.5)?))
}

fn contour_plot() -> PlotResult<Plot> {
    let x: Vec<f64> = (0..40).map(|i| -2.0 + i as f64 * 0.1).collect();
    let y = x.clone();
    let z = y
        .iter()
        .map(|y| x.iter().map(|x| (-(x * x + y * y)).exp()).collect())
        .collect();
    let mut grid = ContourGrid::new(x, y, z, 8)?;
    grid.set_palette(Palette::BlueYellow);
    Ok(Plot::new(PlotContour::new(grid))
        .with_title("Gaussian")
        .with_placement(Placement::new(0.5, 0.5, 0.5, 0.5)?))
}

fn build_canvas() -> PlotResult<Canvas> {
    let mut canvas = Canvas::new();
    canvas.add_plot(line_plot()?);
    canvas.add_plot(polar_plot()?);
    canvas.add_plot(histogram_plot()?);
    canvas.add_plot(contour_plot()?);
    canvas.subscribe(|event| {
        if let PlotEventKind::RegionChanged(region) = event.kind {
            println!(
                "{}: x [{:.3}, {:.3}] y [{:.3}, {:.3}]",
                event.plot, region.x_min, region.x_max, region.y_min, region.y_max
            );
        }
        Ok(())
    });
    Ok(canvas)
}

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(1000.0), px(760.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let canvas = build_canvas().expect("demo data is valid");
            cx.new(|cx| GpuiCanvasView::new(canvas, window, cx))
        })
        .unwrap();
    });
}
