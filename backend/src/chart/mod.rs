//! Scatter chart rendering.
//!
//! Draws an [`EvidenceMap`] as an SVG document with plotters: one marker per
//! study row at (outcome, intervention), colored by confidence level, plus a
//! dotted separator wherever a new intervention group begins. Each marker
//! has a `<title>` tooltip with the study details.
//!
//! Both axes are categorical. Category `i` sits at coordinate `i`, so the
//! first vertical label is at the bottom. A separator lies on `k - 0.5`,
//! between the last row of one group and the first row of the next.

use plotters::prelude::*;
use std::collections::HashMap;

use crate::api::logs::log_warning;
use crate::error::{RenderError, RenderResult};
use crate::models::{AxisEntry, ConfidenceLevel, StudyRow};
use crate::transform::EvidenceMap;

/// Marker color for confidence values outside the fixed vocabulary.
const UNMAPPED_COLOR: RGBColor = RGBColor(0x99, 0x99, 0x99);
const SEPARATOR_COLOR: RGBColor = RGBColor(0x80, 0x80, 0x80);
/// Dot and gap length of the separator lines, in category units.
const SEPARATOR_DASH: f64 = 0.08;

/// Chart dimensions and marker size.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub marker_radius: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 900,
            marker_radius: 10,
        }
    }
}

/// SVG output and what was drawn.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub svg: String,
    pub points: usize,
    pub separators: usize,
    /// Confidence values drawn with the fallback color.
    pub unmapped: Vec<String>,
}

/// Marker color for a normalized confidence value.
pub fn marker_color(confidence: &str) -> RGBColor {
    match ConfidenceLevel::from_label(confidence) {
        Some(level) => {
            let (r, g, b) = level.rgb();
            RGBColor(r, g, b)
        }
        None => UNMAPPED_COLOR,
    }
}

/// Render the map as an SVG scatter plot.
///
/// Every marker carries an SVG `<title>` with the study details, shown by
/// browsers on hover. An empty map produces an empty chart, not an error.
pub fn render(map: &EvidenceMap, options: &ChartOptions) -> RenderResult<RenderedChart> {
    let markers = place_markers(map);
    let series = confidence_series(&markers);
    let separator_rows = separator_rows(&map.vertical);

    let nx = map.horizontal_order.len().max(1);
    let ny = map.vertical_order.len().max(1);
    let x_max = nx as f64 - 0.5;
    let radius = options.marker_radius as i32;

    let mut svg = String::new();
    let hover_targets: Vec<String>;
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(40)
            .x_label_area_size(180)
            .y_label_area_size(280)
            .build_cartesian_2d(-0.5..x_max, -0.5..(ny as f64 - 0.5))
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(nx + 1)
            .y_labels(ny + 1)
            .x_label_formatter(&|v| category_label(&map.horizontal_order, *v))
            .y_label_formatter(&|v| category_label(&map.vertical_order, *v))
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_style(("sans-serif", 12))
            .x_desc("Outcomes (grouped)")
            .y_desc("Intervention groups | Interventions")
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(drawing_error)?;

        for (label, points) in &series {
            let color = marker_color(label);
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), radius, color.mix(0.85).filled())),
                )
                .map_err(drawing_error)?
                .label(label.clone())
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        for &y in &separator_rows {
            chart
                .draw_series(dotted_line(y, -0.5, x_max))
                .map_err(drawing_error)?;
        }

        if !series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(&BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()
                .map_err(drawing_error)?;
        }

        hover_targets = markers
            .iter()
            .map(|m| {
                let (cx, cy) = chart.backend_coord(&(m.x, m.y));
                format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="transparent" pointer-events="all"><title>{}</title></circle>"#,
                    cx,
                    cy,
                    radius,
                    escape_xml(&m.tooltip)
                )
            })
            .collect();

        root.present().map_err(drawing_error)?;
    }

    let svg = with_hover_targets(svg, &hover_targets);

    let unmapped: Vec<String> = series
        .iter()
        .map(|(label, _)| label)
        .filter(|label| ConfidenceLevel::from_label(label).is_none())
        .cloned()
        .collect();
    if !unmapped.is_empty() {
        log_warning(format!("Drawn without legend color: {}", unmapped.join(", ")));
    }

    Ok(RenderedChart {
        svg,
        points: markers.len(),
        separators: separator_rows.len(),
        unmapped,
    })
}

fn drawing_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// A study row placed on the grid.
#[derive(Debug, Clone, PartialEq)]
struct Marker {
    x: f64,
    y: f64,
    confidence: String,
    tooltip: String,
}

/// Place every row at (outcome, (group, intervention)).
///
/// Rows are located by their group and label together, so a label listed
/// under two groups lands on the right row. Rows missing an axis value are
/// not drawn.
fn place_markers(map: &EvidenceMap) -> Vec<Marker> {
    let mut x_index: HashMap<&str, usize> = HashMap::new();
    for (i, outcome) in map.horizontal_order.iter().enumerate() {
        x_index.entry(outcome.as_str()).or_insert(i);
    }
    let y_index: HashMap<(&str, &str), usize> = map
        .vertical
        .iter()
        .enumerate()
        .map(|(i, e)| ((e.group.as_str(), e.label.as_str()), i))
        .collect();

    map.rows
        .iter()
        .filter_map(|row| {
            let x = x_index.get(row.outcome.as_deref()?)?;
            let y = y_index.get(&(
                row.intervention_group.as_deref()?,
                row.ordered_intervention.as_deref()?,
            ))?;
            Some(Marker {
                x: *x as f64,
                y: *y as f64,
                confidence: row.confidence.clone(),
                tooltip: tooltip(row),
            })
        })
        .collect()
}

/// Hover text for a marker.
fn tooltip(row: &StudyRow) -> String {
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    [
        format!("{} × {}", text(&row.ordered_intervention), text(&row.outcome)),
        format!("Intervention group: {}", text(&row.intervention_group)),
        format!("Outcome group: {}", text(&row.outcome_group)),
        format!("Title: {}", text(&row.title)),
        format!(
            "Year: {}",
            row.year.map_or_else(|| "-".to_string(), |y| y.to_string())
        ),
        format!("Effect result: {}", text(&row.effect_result)),
        format!("Confidence: {}", row.confidence),
    ]
    .join("\n")
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Append the hover targets as the topmost layer of the document.
fn with_hover_targets(mut svg: String, targets: &[String]) -> String {
    if targets.is_empty() {
        return svg;
    }
    let Some(end) = svg.rfind("</svg>") else {
        return svg;
    };
    let layer = format!(r#"<g class="hover-targets">{}</g>"#, targets.concat());
    svg.insert_str(end, &layer);
    svg
}

/// Axis text for a key point: the category at an integer coordinate.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Points grouped by confidence value.
///
/// Known levels come first in ascending order, unmapped values follow in
/// first-seen order.
fn confidence_series(markers: &[Marker]) -> Vec<(String, Vec<(f64, f64)>)> {
    let mut series: Vec<(String, Vec<(f64, f64)>)> = Vec::new();

    for m in markers {
        match series.iter_mut().find(|(label, _)| *label == m.confidence) {
            Some((_, points)) => points.push((m.x, m.y)),
            None => series.push((m.confidence.clone(), vec![(m.x, m.y)])),
        }
    }

    series.sort_by_key(|(label, _)| ConfidenceLevel::from_label(label).map_or(5, |l| l as usize));
    series
}

/// Separator heights: between the last row of a group and the first row of
/// the next, one per group change.
fn separator_rows(vertical: &[AxisEntry]) -> Vec<f64> {
    vertical
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].group != pair[1].group)
        .map(|(i, _)| i as f64 + 0.5)
        .collect()
}

/// Short horizontal segments forming a dotted line at height `y`.
fn dotted_line(y: f64, x_start: f64, x_end: f64) -> Vec<PathElement<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut x = x_start;
    while x < x_end {
        let end = (x + SEPARATOR_DASH).min(x_end);
        segments.push(PathElement::new(
            vec![(x, y), (end, y)],
            SEPARATOR_COLOR.stroke_width(1),
        ));
        x += SEPARATOR_DASH * 2.0;
    }
    segments
}
