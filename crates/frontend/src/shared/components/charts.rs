//! Small SVG charts for the statistics pages.

use crate::shared::format::group_thousands;
use contracts::dashboards::d400_car_statistics::ChartSeries;
use leptos::prelude::*;

const PALETTE: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16",
];

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PAD_X: f64 = 40.0;
const PAD_Y: f64 = 24.0;

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Horizontal bars, one row per point.
#[component]
pub fn BarChart(series: ChartSeries) -> impl IntoView {
    let ratios = series.ratios();
    let rows = series
        .points
        .into_iter()
        .zip(ratios)
        .enumerate()
        .map(|(i, (point, ratio))| {
            let width = format!("{:.1}%", ratio * 100.0);
            view! {
                <div class="bar-chart__row">
                    <span class="bar-chart__label" title=point.label.clone()>{point.label.clone()}</span>
                    <div class="bar-chart__track">
                        <div
                            class="bar-chart__bar"
                            style:width=width
                            style:background-color=color(i)
                        ></div>
                    </div>
                    <span class="bar-chart__value">{group_thousands(point.value)}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <figure class="chart bar-chart">
            <figcaption class="chart__title">{series.title}</figcaption>
            {rows}
        </figure>
    }
}

/// Plot coordinates for a line chart inside a `width` x `height` box.
///
/// The lowest value sits on the bottom edge and the highest on the top edge;
/// a flat series is drawn through the middle.
pub fn line_points(values: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if values.len() > 1 { step * i as f64 } else { width / 2.0 };
            let y = if span > 0.0 {
                height - (v - min) / span * height
            } else {
                height / 2.0
            };
            (x, y)
        })
        .collect()
}

#[component]
pub fn LineChart(series: ChartSeries) -> impl IntoView {
    let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
    let plot_w = WIDTH - 2.0 * PAD_X;
    let plot_h = HEIGHT - 2.0 * PAD_Y;
    let coords: Vec<(f64, f64)> = line_points(&values, plot_w, plot_h)
        .into_iter()
        .map(|(x, y)| (x + PAD_X, y + PAD_Y))
        .collect();

    let polyline = coords
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");

    let markers = coords
        .iter()
        .zip(series.points.iter())
        .map(|((x, y), point)| {
            let value_y = format!("{:.1}", y - 8.0);
            view! {
                <circle cx=format!("{:.1}", x) cy=format!("{:.1}", y) r="4" class="line-chart__dot"></circle>
                <text x=format!("{:.1}", x) y=value_y class="line-chart__value-label">
                    {group_thousands(point.value.round())}
                </text>
                <text x=format!("{:.1}", x) y=format!("{:.1}", HEIGHT - 4.0) class="line-chart__axis-label">
                    {point.label.clone()}
                </text>
            }
        })
        .collect_view();

    view! {
        <figure class="chart line-chart">
            <figcaption class="chart__title">{series.title}</figcaption>
            <svg viewBox=format!("0 0 {} {}", WIDTH, HEIGHT) class="line-chart__svg" role="img">
                <line
                    x1=PAD_X.to_string() y1=(HEIGHT - PAD_Y).to_string()
                    x2=(WIDTH - PAD_X).to_string() y2=(HEIGHT - PAD_Y).to_string()
                    class="line-chart__axis"
                />
                <polyline points=polyline class="line-chart__line" fill="none" stroke=color(0) stroke-width="2"/>
                {markers}
            </svg>
        </figure>
    }
}

/// "no data" placeholder used by every chart widget
#[component]
pub fn ChartPlaceholder(title: &'static str) -> impl IntoView {
    view! {
        <figure class="chart chart--empty">
            <figcaption class="chart__title">{title}</figcaption>
            <div class="chart__empty">"Brak danych do wyświetlenia."</div>
        </figure>
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// Renders the series, or the placeholder when the payload had no data for it.
#[component]
pub fn SeriesChart(title: &'static str, series: Option<ChartSeries>, kind: ChartKind) -> impl IntoView {
    match (series, kind) {
        (Some(series), ChartKind::Bar) => view! { <BarChart series=series /> }.into_any(),
        (Some(series), ChartKind::Line) => view! { <LineChart series=series /> }.into_any(),
        (None, _) => view! { <ChartPlaceholder title=title /> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_spans_the_box() {
        let pts = line_points(&[10.0, 30.0, 20.0], 100.0, 50.0);
        assert_eq!(pts, vec![(0.0, 50.0), (50.0, 0.0), (100.0, 25.0)]);
    }

    #[test]
    fn flat_and_single_series() {
        assert_eq!(line_points(&[5.0, 5.0], 100.0, 50.0), vec![(0.0, 25.0), (100.0, 25.0)]);
        assert_eq!(line_points(&[7.0], 100.0, 50.0), vec![(50.0, 25.0)]);
        assert!(line_points(&[], 100.0, 50.0).is_empty());
    }
}
