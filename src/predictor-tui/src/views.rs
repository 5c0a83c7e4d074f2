//! Rendering of the prediction screen.
//!
//! The form column is drawn first, then the result panel and the footer, and
//! the open popups last so they overlay whatever lies below them. Click zones
//! are registered while drawing so they always describe the current frame.

use predictor_engine::display::{
    Tone, capitalize, confidence_badge, confidence_tone, factor_tone, format_factor_weight,
    format_probability, humanize_factor, interpretation, prediction_label, probability_tone,
};
use predictor_engine::{Outcome, RequestError};
use predictor_protocol::{PredictionResult, ReferenceKind};
use predictor_tui_components::combobox::ComboboxLayout;
use predictor_tui_components::multi_select::MultiSelectLayout;
use predictor_tui_components::prelude::*;
use predictor_tui_components::style::{
    ACCENT, ACCENT_DIM, BORDER, ERROR, NEUTRAL, ROUNDED_BORDER, SUCCESS, SURFACE_0, TEXT,
    TEXT_DIM, TEXT_MUTED, WARNING, border_style,
};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::app::{App, Field};
use crate::zones::{Z_AFFORDANCE, Z_PANEL, Z_PANEL_ROW, ZoneId};

pub const TITLE: &str = "Startup Success Predictor";
pub const SUBMIT_LABEL: &str = "Predict Success";
pub const SUBMITTING_LABEL: &str = "Analyzing...";
pub const IDLE_PLACEHOLDER: &str =
    "Fill in the company details and press Predict Success to see the analysis.";

/// Colour used for a tone.
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Good => SUCCESS,
        Tone::Moderate => WARNING,
        Tone::Poor => ERROR,
        Tone::Neutral => NEUTRAL,
    }
}

/// Areas of the form column.
struct FormAreas {
    country: Rect,
    region: Rect,
    region_status: Rect,
    city: Rect,
    city_status: Rect,
    categories: Rect,
    founded_year: Rect,
    submit: Rect,
}

fn form_areas(area: Rect) -> FormAreas {
    let inner = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };
    let [country, region, region_status, city, city_status, categories, founded_year, _, submit, _] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(inner);
    FormAreas {
        country,
        region,
        region_status,
        city,
        city_status,
        categories,
        founded_year,
        submit,
    }
}

/// Draw the whole screen and rebuild the click zones.
pub fn render(frame: &mut Frame, app: &mut App) {
    let screen = frame.area();
    let buf = frame.buffer_mut();
    app.zones.clear();

    buf.set_style(screen, Style::default().bg(SURFACE_0));
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(screen);
    let [form_area, result_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);

    render_header(header, buf);
    let popups = render_form(app, form_area, screen, buf);
    render_result(app, result_area, buf);
    render_footer(app, footer, buf);
    render_popups(app, &popups, buf);
}

fn render_header(area: Rect, buf: &mut Buffer) {
    buf.set_string(
        area.x + 2,
        area.y,
        TITLE,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    );
    if area.height > 1 {
        buf.set_stringn(
            area.x + 2,
            area.y + 1,
            "Machine-learning estimate of a startup's chance of success",
            area.width.saturating_sub(4) as usize,
            Style::default().fg(TEXT_DIM),
        );
    }
}

/// Layouts of the popups, drawn after everything else.
struct Popups {
    region: ComboboxLayout,
    city: ComboboxLayout,
    categories: MultiSelectLayout,
}

fn render_form(app: &mut App, area: Rect, screen: Rect, buf: &mut Buffer) -> Popups {
    let areas = form_areas(area);

    app.country.render(areas.country, buf);
    app.zones.register(ZoneId::Field(Field::Country), areas.country);
    if areas.country.width > 4 {
        let y = areas.country.y + 1;
        app.zones.register_with_z_order(
            ZoneId::CountryPrev,
            Rect::new(areas.country.x + 1, y, 1, 1),
            Z_AFFORDANCE,
        );
        app.zones.register_with_z_order(
            ZoneId::CountryNext,
            Rect::new(areas.country.right().saturating_sub(2), y, 1, 1),
            Z_AFFORDANCE,
        );
    }

    let region = layout_combo(app, Field::Region, areas.region, screen);
    app.region.render(areas.region, buf);
    render_status(app, ReferenceKind::Regions, areas.region_status, buf);

    let city = layout_combo(app, Field::City, areas.city, screen);
    app.city.render(areas.city, buf);
    render_status(app, ReferenceKind::Cities, areas.city_status, buf);

    let categories = app.categories.layout(areas.categories, screen);
    app.categories.render(areas.categories, buf);
    app.zones.register(ZoneId::Field(Field::Categories), categories.trigger);
    for (position, (_, chip)) in categories.chips.iter().enumerate() {
        app.zones.register_with_z_order(ZoneId::Chip(position), *chip, Z_AFFORDANCE);
    }
    if let Some(panel) = categories.panel {
        app.zones.register_with_z_order(ZoneId::CategoryPanel, panel, Z_PANEL);
        for (index, row) in &categories.rows {
            app.zones.register_with_z_order(ZoneId::CategoryRow(*index), *row, Z_PANEL_ROW);
        }
    }

    app.founded_year.render(areas.founded_year, buf);
    app.zones.register(ZoneId::Field(Field::FoundedYear), areas.founded_year);

    render_submit(app, areas.submit, buf);
    app.zones.register(ZoneId::Field(Field::Submit), areas.submit);

    Popups {
        region,
        city,
        categories,
    }
}

fn layout_combo(app: &mut App, field: Field, area: Rect, screen: Rect) -> ComboboxLayout {
    let combo = match field {
        Field::City => &app.city,
        _ => &app.region,
    };
    let layout = combo.layout(area, screen);
    combo.update_pointer_regions(&layout);

    app.zones.register(ZoneId::Field(field), layout.input);
    if let Some(clear) = layout.clear {
        app.zones.register_with_z_order(ZoneId::ComboClear(field), clear, Z_AFFORDANCE);
    }
    if let Some(panel) = layout.panel {
        app.zones.register_with_z_order(ZoneId::ComboPanel(field), panel, Z_PANEL);
        for (position, row) in &layout.rows {
            app.zones.register_with_z_order(ZoneId::ComboRow(field, *position), *row, Z_PANEL_ROW);
        }
    }
    layout
}

fn render_status(app: &App, kind: ReferenceKind, area: Rect, buf: &mut Buffer) {
    let list = app.references.list(kind);
    buf.set_stringn(
        area.x + 2,
        area.y,
        list.status_line(kind),
        area.width.saturating_sub(2) as usize,
        Style::default().fg(TEXT_MUTED),
    );
}

fn render_submit(app: &App, area: Rect, buf: &mut Buffer) {
    if area.height < 3 || area.width < 8 {
        return;
    }
    let focused = app.focus.is_focused(Field::Submit);
    let submitting = app.form.is_submitting();
    let style = if submitting {
        Style::default().fg(TEXT_DIM)
    } else if focused {
        Style::default().fg(SURFACE_0).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDER)
        .border_style(border_style(focused))
        .style(style);
    let inner = block.inner(area);
    block.render(area, buf);

    let label = if submitting { SUBMITTING_LABEL } else { SUBMIT_LABEL };
    // Spinner frame plus a space precede the label while submitting.
    let width = label.chars().count() as u16 + if submitting { 2 } else { 0 };
    let x = inner.x + inner.width.saturating_sub(width) / 2;
    if submitting {
        buf.set_string(x, inner.y, app.spinner.current_frame(), Style::default().fg(ACCENT));
        buf.set_string(x + 2, inner.y, label, style);
    } else {
        buf.set_string(x, inner.y, label, style);
    }
}

fn render_result(app: &App, area: Rect, buf: &mut Buffer) {
    let area = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };
    if area.height < 3 || area.width < 10 {
        return;
    }

    if let Some(Outcome::Error(err)) = app.form.outcome() {
        render_error(err, area, buf);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDER)
        .border_style(Style::default().fg(BORDER))
        .title(" Prediction ");
    let inner = block.inner(area);
    block.render(area, buf);
    let inner = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };

    match app.form.outcome() {
        Some(Outcome::Prediction(result)) => {
            Paragraph::new(result_lines(result))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
        }
        _ if app.form.is_submitting() => {
            let mut spinner = app.spinner.clone();
            spinner.set_label("Analyzing startup...");
            (&spinner).render(inner, buf);
        }
        _ => {
            Paragraph::new(IDLE_PLACEHOLDER)
                .style(Style::default().fg(TEXT_DIM))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
        }
    }
}

fn render_error(err: &RequestError, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDER)
        .border_style(Style::default().fg(ERROR))
        .title(Span::styled(" Error ", Style::default().fg(ERROR)));
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(err.message.as_str())
        .style(Style::default().fg(ERROR))
        .wrap(Wrap { trim: true })
        .render(
            Rect {
                x: inner.x + 1,
                width: inner.width.saturating_sub(2),
                ..inner
            },
            buf,
        );
}

/// Text of the result panel.
pub fn result_lines(result: &PredictionResult) -> Vec<Line<'static>> {
    let heading = Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD);
    let probability_color = tone_color(probability_tone(result.success_probability));
    let badge_color = tone_color(confidence_tone(result.confidence));

    let mut lines = vec![
        Line::styled("Success Probability", heading),
        Line::from(vec![
            Span::styled(
                format_probability(result.success_probability),
                Style::default()
                    .fg(probability_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", confidence_badge(result.confidence)),
                Style::default().fg(badge_color),
            ),
        ]),
        Line::from(vec![
            Span::styled("Model: ", Style::default().fg(TEXT_DIM)),
            Span::styled(capitalize(&result.model_name), Style::default().fg(TEXT)),
        ]),
        Line::from(vec![
            Span::styled("Prediction: ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                prediction_label(result.predicted_label),
                Style::default().fg(probability_color),
            ),
        ]),
        Line::default(),
        Line::styled("Key Factors", heading),
    ];

    if result.top_factors.is_empty() {
        lines.push(Line::styled("No factors reported", Style::default().fg(TEXT_MUTED)));
    }
    for factor in &result.top_factors {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<28}", humanize_factor(&factor.label)),
                Style::default().fg(TEXT),
            ),
            Span::styled(
                format_factor_weight(factor),
                Style::default().fg(tone_color(factor_tone(factor.impact))),
            ),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::styled("Interpretation", heading));
    lines.push(Line::styled(
        interpretation(result.success_probability),
        Style::default().fg(TEXT),
    ));
    lines
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let mut spans = Vec::new();
    for (key, description) in app.key_hints() {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(SURFACE_0).bg(ACCENT_DIM),
        ));
        spans.push(Span::styled(
            format!(" {description}  "),
            Style::default().fg(TEXT_DIM),
        ));
    }
    Line::from(spans).render(area, buf);
}

fn render_popups(app: &App, popups: &Popups, buf: &mut Buffer) {
    app.categories.render_overlay(&popups.categories, buf);
    app.region.render_panel(&popups.region, buf);
    app.city.render_panel(&popups.city, buf);
}
