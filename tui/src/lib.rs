//! TUI rendering for macterm using ratatui.

mod input;
mod theme;

pub use input::{InputPump, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};

use macterm_engine::{App, Gesture, WindowFrame};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(app.style(), options);
    let glyphs = glyphs(options);
    let area = frame.area();

    frame.render_widget(Clear, area);
    if area.height > 0 {
        let hint_area = Rect {
            y: area.bottom() - 1,
            height: 1,
            ..area
        };
        draw_hint_bar(frame, app, hint_area, &palette);
    }

    let window = window_rect(app.window(), area);
    // Border alone needs two cells each way.
    if window.width >= 2 && window.height >= 2 {
        draw_window(frame, app, window, &palette, &glyphs);
    }
}

/// Screen rectangle of the window, clipped to `area`.
#[must_use]
pub fn window_rect(window: WindowFrame, area: Rect) -> Rect {
    Rect::new(
        window.position.x,
        window.position.y,
        window.size.width,
        window.size.height,
    )
    .intersection(area)
}

fn draw_window(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let border = if app.gesture() == Gesture::Idle {
        palette.border
    } else {
        palette.border_active
    };

    let mut lights = vec![Span::raw(" ")];
    for color in palette.traffic_lights {
        lights.push(Span::styled(glyphs.traffic_light, Style::default().fg(color)));
        lights.push(Span::raw(" "));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Line::from(lights))
        .style(styles::window(palette))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let content = app.frame();
    let (prompt, output) = content.split_prompt();
    let caret = app
        .caret_visible()
        .then(|| Span::styled(glyphs.caret, Style::default().fg(palette.prompt)));
    let lines = content_lines(prompt, output, palette, caret);

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    // Keep the tail visible once the text overflows.
    let total = paragraph.line_count(inner.width);
    let overflow = total.saturating_sub(usize::from(inner.height));
    let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);
    frame.render_widget(paragraph.scroll((scroll, 0)), inner);

    let corner = (area.right() - 1, area.bottom() - 1);
    if let Some(cell) = frame.buffer_mut().cell_mut(corner) {
        cell.set_symbol(glyphs.resize_handle).set_fg(border);
    }
}

/// Split the displayed text into styled lines: prompt text first, then output.
fn content_lines<'a>(
    prompt: &'a str,
    output: &'a str,
    palette: &Palette,
    caret: Option<Span<'a>>,
) -> Vec<Line<'a>> {
    let mut lines = vec![Line::default()];
    for (text, style) in [
        (prompt, styles::prompt(palette)),
        (output, styles::output(palette)),
    ] {
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !segment.is_empty()
                && let Some(last) = lines.last_mut()
            {
                last.push_span(Span::styled(segment, style));
            }
        }
    }
    if let Some(caret) = caret
        && let Some(last) = lines.last_mut()
    {
        last.push_span(caret);
    }
    lines
}

fn draw_hint_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let key = styles::prompt(palette);
    let hint = styles::hint(palette);
    let line = Line::from(vec![
        Span::styled(" q", key),
        Span::styled(" quit  ", hint),
        Span::styled("t", key),
        Span::styled(format!(" theme ({})  ", app.style().as_str()), hint),
        Span::styled("r", key),
        Span::styled(" restart  ", hint),
        Span::styled("drag the title bar to move, the corner to resize", hint),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
