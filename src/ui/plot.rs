use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{EmptyChart, Figure, PieChart, ScatterChart};
use crate::color::Rgb;

const CHART_HEIGHT: f32 = 340.0;

/// Wedges wider than this are split so every polygon stays convex.
const MAX_WEDGE: f64 = FRAC_PI_2;

fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

// ---------------------------------------------------------------------------
// Figure dispatch
// ---------------------------------------------------------------------------

/// Draw one chart description under its title.
pub fn figure(ui: &mut Ui, id: &str, figure: &Figure) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(figure.title());
    });
    match figure {
        Figure::Pie(pie) => pie_chart(ui, id, pie),
        Figure::Scatter(scatter) => scatter_chart(ui, id, scatter),
        Figure::Empty(empty) => empty_chart(ui, empty),
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Points of a unit-circle wedge from `start` to `end` (radians), centre first.
fn wedge(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU) * 96.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = start + (end - start) * i as f64 / steps as f64;
        points.push([a.cos(), a.sin()]);
    }
    points
}

fn pie_chart(ui: &mut Ui, id: &str, pie: &PieChart) {
    let total = pie.total();
    if total == 0 {
        ui.label("No launches to show.");
        return;
    }

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            // Start at twelve o'clock and go clockwise.
            let mut angle = FRAC_PI_2;
            for slice in &pie.slices {
                let share = slice.value as f64 / total as f64;
                let sweep = share * TAU;
                let end = angle - sweep;
                let color = color32(slice.color);

                let mut seg_start = angle;
                while seg_start > end + f64::EPSILON {
                    let seg_end = (seg_start - MAX_WEDGE).max(end);
                    let points: PlotPoints = wedge(seg_end, seg_start).into_iter().collect();
                    plot_ui.polygon(
                        Polygon::new(points)
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                    seg_start = seg_end;
                }

                let mid = angle - sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{:.1}%", share * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
                angle = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, id: &str, scatter: &ScatterChart) {
    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(&scatter.x_label)
        .y_axis_label(&scatter.y_label)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &scatter.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .color(color32(series.color))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });

    if scatter.point_count() == 0 {
        ui.label("No launches in the selected payload range.");
    }
}

// ---------------------------------------------------------------------------
// Empty state
// ---------------------------------------------------------------------------

fn empty_chart(ui: &mut Ui, empty: &EmptyChart) {
    ui.add_space(8.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&empty.message).color(Color32::RED));
    });
    ui.add_space(8.0);
}
