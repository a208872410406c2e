//! Drawing helpers for the canvas decorations and the text overlays.

use calma_background::Canvas;
use calma_config::Config;
use calma_core::{CircleStyle, Rgb, lerp_color};
use calma_page::{Exercise, Page, Particle};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
};

use crate::session::Visual;

/// Canvas pixels per CSS pixel; a terminal column is roughly 8 px wide.
const PX_PER_CSS: f64 = 1.0 / 8.0;

/// Circle radius at rest, relative to the smaller canvas side.
const CIRCLE_RADIUS_RATIO: f64 = 0.16;

/// Text color fading in from the backdrop as `opacity` goes to 1.
pub fn fade(background: Rgb, text: Rgb, opacity: f64) -> Color {
    lerp_color(background, text, opacity).into()
}

/// Plot each live particle as a single pulsing pixel.
pub fn draw_particles(canvas: &mut Canvas, particles: &[Particle], color: Rgb, now_ms: u64) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    for particle in particles {
        let x = (particle.left_pct / 100.0 * w) as u32;
        let y = (particle.top_pct / 100.0 * h) as u32;
        canvas.blend(x, y, color, particle.pulse_alpha(now_ms));
    }
}

/// Center and resting radius of the breathing circle on `canvas`.
pub fn circle_geometry(canvas: &Canvas) -> ((f64, f64), f64) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ((w / 2.0, h / 2.0), w.min(h) * CIRCLE_RADIUS_RATIO)
}

/// Draw the exercise visual. Breathing exercises need the circle style.
pub fn draw_visual(canvas: &mut Canvas, visual: &Visual<'_>, style: Option<&CircleStyle>) {
    match visual {
        Visual::Breathing { .. } => {
            if let Some(style) = style {
                let (center, radius) = circle_geometry(canvas);
                canvas.draw_breathing_circle(style, center, radius, PX_PER_CSS);
            }
        }
        Visual::Waves {
            frame,
            wave_count,
            time_s,
        } => canvas.draw_waves(frame, *wave_count, *time_s, PX_PER_CSS),
    }
}

/// Vertically centered welcome text.
pub fn render_welcome(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let [_, line, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let text = Line::from(text).style(Style::new().fg(color).bold());
    frame.render_widget(text.centered(), line);
}

/// The exercise menu: a row of anchor links and the scrolled sections.
pub fn render_menu(
    frame: &mut Frame,
    area: Rect,
    page: &Page,
    selected: Exercise,
    config: &Config,
) {
    let theme = &config.theme;
    let [nav, _, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let mut links = Vec::new();
    for (i, section) in page.sections().iter().enumerate() {
        if i > 0 {
            links.push(Span::styled("  ·  ", Style::new().fg(theme.dim_text.into())));
        }
        let label = format!("{} {}", i + 1, section.exercise.title());
        let style = if section.exercise == selected {
            Style::new().fg(section.exercise.color(config).into()).bold().underlined()
        } else {
            Style::new().fg(theme.text.into())
        };
        links.push(Span::styled(label, style));
    }
    frame.render_widget(Line::from(links).centered(), nav);

    let top = body.height as f64 / 4.0;
    let scroll = page.scroll_position();
    let doc = page.document();
    for section in page.sections() {
        let Some(el) = doc.element(section.element) else {
            continue;
        };
        let row = (top + el.offset_top() - scroll).round();
        if row < 0.0 || row + 2.0 > body.height as f64 {
            continue;
        }
        let y = body.y + row as u16;
        let marker = if section.exercise == selected { "› " } else { "  " };
        let color: Color = section.exercise.color(config).into();
        let title = Line::from(vec![
            Span::styled(marker, Style::new().fg(color)),
            Span::styled(section.exercise.title(), Style::new().fg(color).bold()),
        ])
        .centered();
        frame.render_widget(title, Rect::new(body.x, y, body.width, 1));
        let description = Line::from(el.text())
            .style(Style::new().fg(theme.dim_text.into()))
            .centered();
        frame.render_widget(description, Rect::new(body.x, y + 1, body.width, 1));
    }
}

/// Exercise guidance near the bottom of the screen.
pub fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let [_, line, _] = Layout::vertical([
        Constraint::Fill(4),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let message = Line::from(message).style(Style::new().fg(color).bold());
    frame.render_widget(message.centered(), line);
}

/// Key hints: pairs of key and description.
pub fn render_help(frame: &mut Frame, area: Rect, keys: &[(&str, &str)], color: Color) {
    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (key, description) in keys {
        spans.push((*key).bold().fg(color));
        spans.push(format!(" {description}  ").dark_gray());
    }
    frame.render_widget(Line::from(spans).centered(), area);
}
