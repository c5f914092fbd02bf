use std::f64::consts::PI;

use gtk4 as gtk;
use gtk4::cairo;
use gtk4::prelude::*;

use outreach_dashboard::metrics::{BarGroup, OPENED_COLOR, PieSegment, REPLIED_COLOR, Rgb, SENT_COLOR};

const CHART_HEIGHT: i32 = 300;
const AXIS_MARGIN: f64 = 36.0;
const LABEL_BAND: f64 = 28.0;

fn set_color(cr: &cairo::Context, color: Rgb) {
    cr.set_source_rgb(color.0, color.1, color.2);
}

fn area() -> gtk::DrawingArea {
    let area = gtk::DrawingArea::new();
    area.set_content_height(CHART_HEIGHT);
    area.set_hexpand(true);
    area
}

/// Grouped bars per campaign: sent, opened, replied.
pub fn bar_chart(groups: Vec<BarGroup>) -> gtk::DrawingArea {
    let area = area();
    area.set_draw_func(move |_, cr, width, height| {
        if let Err(err) = draw_bars(cr, &groups, f64::from(width), f64::from(height)) {
            log::warn!("bar chart draw failed: {err}");
        }
    });
    area
}

fn draw_bars(cr: &cairo::Context, groups: &[BarGroup], width: f64, height: f64) -> Result<(), cairo::Error> {
    let plot_h = height - LABEL_BAND - 8.0;
    let plot_w = width - AXIS_MARGIN;
    cr.set_source_rgba(0.5, 0.5, 0.5, 0.6);
    cr.set_line_width(1.0);
    cr.move_to(AXIS_MARGIN, 8.0);
    cr.line_to(AXIS_MARGIN, 8.0 + plot_h);
    cr.line_to(width, 8.0 + plot_h);
    cr.stroke()?;

    if groups.is_empty() {
        return Ok(());
    }

    let max = groups
        .iter()
        .flat_map(|g| [g.sent, g.opened, g.replied])
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    cr.set_font_size(10.0);
    cr.move_to(4.0, 16.0);
    cr.show_text(&format!("{max}"))?;

    let slot = plot_w / groups.len() as f64;
    let bar_w = (slot * 0.8) / 3.0;
    for (idx, group) in groups.iter().enumerate() {
        let x0 = AXIS_MARGIN + slot * idx as f64 + slot * 0.1;
        for (n, (value, color)) in [
            (group.sent, SENT_COLOR),
            (group.opened, OPENED_COLOR),
            (group.replied, REPLIED_COLOR),
        ]
        .into_iter()
        .enumerate()
        {
            let h = plot_h * value as f64 / max;
            set_color(cr, color);
            cr.rectangle(x0 + bar_w * n as f64, 8.0 + plot_h - h, bar_w, h);
            cr.fill()?;
        }

        cr.set_source_rgb(0.4, 0.4, 0.4);
        let extents = cr.text_extents(&group.label)?;
        cr.move_to(x0 + (slot * 0.8 - extents.width()) / 2.0, height - 8.0);
        cr.show_text(&group.label)?;
    }
    Ok(())
}

/// Status distribution pie; draws nothing when every segment is zero.
pub fn pie_chart(segments: Vec<PieSegment>) -> gtk::DrawingArea {
    let area = area();
    area.set_draw_func(move |_, cr, width, height| {
        if let Err(err) = draw_pie(cr, &segments, f64::from(width), f64::from(height)) {
            log::warn!("pie chart draw failed: {err}");
        }
    });
    area
}

fn draw_pie(cr: &cairo::Context, segments: &[PieSegment], width: f64, height: f64) -> Result<(), cairo::Error> {
    let total: u64 = segments.iter().map(|s| s.value).sum();
    if total == 0 {
        return Ok(());
    }
    let (cx, cy) = (width / 2.0, height / 2.0);
    let radius = (width.min(height) / 2.0 - 24.0).max(8.0);

    let mut angle = -PI / 2.0;
    for segment in segments {
        let sweep = 2.0 * PI * segment.value as f64 / total as f64;
        set_color(cr, segment.color);
        cr.move_to(cx, cy);
        cr.arc(cx, cy, radius, angle, angle + sweep);
        cr.close_path();
        cr.fill()?;

        let mid = angle + sweep / 2.0;
        let label = format!("{} {:.0}%", segment.label, 100.0 * segment.value as f64 / total as f64);
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.set_font_size(11.0);
        let extents = cr.text_extents(&label)?;
        cr.move_to(
            cx + radius * 0.6 * mid.cos() - extents.width() / 2.0,
            cy + radius * 0.6 * mid.sin(),
        );
        cr.show_text(&label)?;
        angle += sweep;
    }
    Ok(())
}

/// Colour key shown under a chart.
pub fn legend(entries: &[(&str, Rgb)]) -> gtk::Box {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 16);
    row.set_halign(gtk::Align::Center);
    for (label, color) in entries {
        let item = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let swatch = gtk::DrawingArea::new();
        swatch.set_content_width(12);
        swatch.set_content_height(12);
        let color = *color;
        swatch.set_draw_func(move |_, cr, w, h| {
            set_color(cr, color);
            cr.rectangle(0.0, 0.0, f64::from(w), f64::from(h));
            let _ = cr.fill();
        });
        item.append(&swatch);
        item.append(&gtk::Label::new(Some(label)));
        row.append(&item);
    }
    row
}

pub fn bar_legend() -> gtk::Box {
    legend(&[("Sent", SENT_COLOR), ("Opened", OPENED_COLOR), ("Replied", REPLIED_COLOR)])
}
