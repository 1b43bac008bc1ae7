//! Chart rendering
//!
//! Both charts use a 2x2 grid of panels, one per [`Channel`]. Rendering needs
//! the `plot` feature; without it every entry point returns
//! [`Error::MissingDependency`].

use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::series::Series;
use std::path::Path;

/// Hint printed when charts are requested from a build without plotters
pub const INSTALL_HINT: &str =
    "chart rendering is not compiled in; rebuild with `cargo install tegraplot --features plot`";

/// Whether this build can render charts
pub fn is_available() -> bool {
    cfg!(feature = "plot")
}

/// Render the 2x2 chart of a single series to a PNG file
pub fn render_series(series: &Series, config: &ChartConfig, out: &Path) -> Result<()> {
    #[cfg(feature = "plot")]
    {
        backend::render_series(series, config, out)
    }
    #[cfg(not(feature = "plot"))]
    {
        let _ = (series, config, out);
        Err(Error::MissingDependency(INSTALL_HINT.to_string()))
    }
}

/// Render all series into one comparison chart; empty series are skipped
pub fn render_combined(series: &[Series], config: &ChartConfig, out: &Path) -> Result<()> {
    #[cfg(feature = "plot")]
    {
        backend::render_combined(series, config, out)
    }
    #[cfg(not(feature = "plot"))]
    {
        let _ = (series, config, out);
        Err(Error::MissingDependency(INSTALL_HINT.to_string()))
    }
}

#[cfg(feature = "plot")]
mod backend {
    use super::*;
    use crate::series::Channel;
    use plotters::prelude::*;
    use std::ops::Range;
    use std::path::Path;

    /// matplotlib's tab10 palette
    const PALETTE: [RGBColor; 10] = [
        RGBColor(31, 119, 180),
        RGBColor(255, 127, 14),
        RGBColor(44, 160, 44),
        RGBColor(214, 39, 40),
        RGBColor(148, 103, 189),
        RGBColor(140, 86, 75),
        RGBColor(227, 119, 194),
        RGBColor(127, 127, 127),
        RGBColor(188, 189, 34),
        RGBColor(23, 190, 207),
    ];

    const ORANGE: RGBColor = RGBColor(255, 165, 0);

    fn chart_err<E: std::fmt::Display>(e: E) -> Error {
        Error::Chart(e.to_string())
    }

    fn channel_color(channel: Channel) -> RGBColor {
        match channel {
            Channel::CpuAvg => BLUE,
            Channel::GpuUsage => GREEN,
            Channel::RamPercent => RED,
            Channel::TempCpu => ORANGE,
        }
    }

    fn x_range(max_seconds: f64) -> Range<f64> {
        0.0..max_seconds.max(1.0)
    }

    /// Percentages use a fixed 0..100 axis; temperatures are padded around the data
    fn y_range(channel: Channel, values: impl Iterator<Item = f64>) -> Range<f64> {
        if channel.is_percentage() {
            return 0.0..100.0;
        }
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            return 0.0..100.0;
        }
        let pad = ((max - min) * 0.1).max(1.0);
        (min - pad)..(max + pad)
    }

    pub(super) fn render_series(series: &Series, config: &ChartConfig, out: &Path) -> Result<()> {
        let elapsed = series.elapsed_seconds();
        let x_max = elapsed.last().copied().unwrap_or(0.0);

        let root = BitMapBackend::new(out, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;
        let root = root
            .titled(
                &format!("Resource usage - {}", series.name()),
                ("sans-serif", 32).into_font().style(FontStyle::Bold),
            )
            .map_err(chart_err)?;

        for (panel, channel) in root.split_evenly((2, 2)).iter().zip(Channel::ALL) {
            let values = series.values(channel);
            let color = channel_color(channel);

            let mut chart = ChartBuilder::on(panel)
                .caption(channel.label(), ("sans-serif", 22))
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(x_range(x_max), y_range(channel, values.iter().copied()))
                .map_err(chart_err)?;

            chart
                .configure_mesh()
                .light_line_style(BLACK.mix(0.05))
                .x_desc("Time (s)")
                .y_desc(channel.to_string())
                .draw()
                .map_err(chart_err)?;

            let points = elapsed.iter().copied().zip(values.iter().copied());
            if channel.is_percentage() {
                chart
                    .draw_series(AreaSeries::new(points.clone(), 0.0, color.mix(0.3)))
                    .map_err(chart_err)?;
            }
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(chart_err)?
                .label(channel.label())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.5))
                .draw()
                .map_err(chart_err)?;
        }

        root.present().map_err(chart_err)?;
        Ok(())
    }

    pub(super) fn render_combined(series: &[Series], config: &ChartConfig, out: &Path) -> Result<()> {
        let series: Vec<&Series> = series.iter().filter(|s| !s.is_empty()).collect();
        let elapsed: Vec<Vec<f64>> = series.iter().map(|s| s.elapsed_seconds()).collect();
        let x_max = elapsed
            .iter()
            .filter_map(|e| e.last().copied())
            .fold(0.0, f64::max);

        let root = BitMapBackend::new(out, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;
        let root = root
            .titled(
                "Resource usage - all runs",
                ("sans-serif", 32).into_font().style(FontStyle::Bold),
            )
            .map_err(chart_err)?;

        for (panel, channel) in root.split_evenly((2, 2)).iter().zip(Channel::ALL) {
            let values: Vec<Vec<f64>> = series.iter().map(|s| s.values(channel)).collect();

            let mut chart = ChartBuilder::on(panel)
                .caption(channel.to_string(), ("sans-serif", 22))
                .margin(15)
                .x_label_area_size(40)
                .y_label_area_size(60)
                .build_cartesian_2d(
                    x_range(x_max),
                    y_range(channel, values.iter().flatten().copied()),
                )
                .map_err(chart_err)?;

            chart
                .configure_mesh()
                .light_line_style(BLACK.mix(0.05))
                .x_desc("Time (s)")
                .y_desc(channel.to_string())
                .draw()
                .map_err(chart_err)?;

            for (i, (s, (times, vals))) in series.iter().zip(elapsed.iter().zip(&values)).enumerate() {
                let color = PALETTE[i % PALETTE.len()];
                let points = times.iter().copied().zip(vals.iter().copied());
                chart
                    .draw_series(LineSeries::new(points, color.mix(0.7).stroke_width(2)))
                    .map_err(chart_err)?
                    .label(s.name())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
            }

            if !series.is_empty() {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .label_font(("sans-serif", 14))
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK.mix(0.5))
                    .draw()
                    .map_err(chart_err)?;
            }
        }

        root.present().map_err(chart_err)?;
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_matches_feature() {
        assert_eq!(is_available(), cfg!(feature = "plot"));
    }

    #[cfg(not(feature = "plot"))]
    #[test]
    fn test_missing_backend() {
        let series = Series::from_lines(
            "run",
            ["CPU@40C"],
            chrono::Local::now(),
            chrono::Duration::milliseconds(500),
        )
        .unwrap();
        let result = render_series(&series, &ChartConfig::default(), Path::new("unused.png"));
        assert!(matches!(result, Err(Error::MissingDependency(_))));
    }
}
