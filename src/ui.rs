pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget},
};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

use pixeltype::{
    engine::{KeyHint, ViewModel},
    session::{Phase, TimeLimit},
    typing_policy::CharClass,
};

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
/// Rows of target text kept visible around the cursor.
const PROMPT_LINES: u16 = 5;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.engine.view();
        match self.state {
            AppState::Typing => render_typing(self, &view, area, buf),
            AppState::Results => render_results(self, &view, area, buf),
        }
    }
}

fn render_typing(app: &App, view: &ViewModel, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2),
            Constraint::Length(PROMPT_LINES),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(hud_line(view))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(prompt_lines(view, chunks[2].width as usize)).render(chunks[2], buf);

    Paragraph::new(key_hint_line(view))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        settings_text(app),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);
}

fn hud_line(view: &ViewModel) -> Line<'static> {
    let dim_bold_style = bold().add_modifier(Modifier::DIM);

    if view.phase == Phase::Idle {
        return Line::from(Span::styled(
            "START TYPING",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ));
    }

    let clock = match view.time_limit {
        TimeLimit::Unbounded => format!("{}s elapsed", view.remaining_or_elapsed),
        _ => format!("{}s left", view.remaining_or_elapsed),
    };
    let mut spans = vec![Span::styled(
        format!("{clock}   {} wpm   {}% acc", view.live.wpm, view.live.accuracy),
        dim_bold_style,
    )];
    if let Some(last) = view.last_keystroke {
        let (mark, color) = if last.correct {
            ("  ✓", Color::Green)
        } else {
            ("  ✗", Color::Red)
        };
        spans.push(Span::styled(mark, bold().fg(color)));
    }
    Line::from(spans)
}

/// Greedy word wrap of `target` into char ranges that each fit in `width`
/// columns. A word keeps its trailing space on the same line; words wider
/// than a whole line are split.
fn wrap_ranges(target: &[char], width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let col = |c: &char| c.width().unwrap_or(0);
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut line_width = 0;
    let mut idx = 0;

    while idx < target.len() {
        let seg_end = target[idx..]
            .iter()
            .position(|&c| c == ' ')
            .map_or(target.len(), |p| idx + p + 1);
        let seg_width: usize = target[idx..seg_end].iter().map(col).sum();

        if line_width > 0 && line_width + seg_width > width {
            lines.push(line_start..idx);
            line_start = idx;
            line_width = 0;
        }
        if seg_width > width {
            for i in idx..seg_end {
                let w = col(&target[i]);
                if line_width > 0 && line_width + w > width {
                    lines.push(line_start..i);
                    line_start = i;
                    line_width = 0;
                }
                line_width += w;
            }
        } else {
            line_width += seg_width;
        }
        idx = seg_end;
    }
    if line_start < target.len() {
        lines.push(line_start..target.len());
    }
    lines
}

/// The visible window of wrapped prompt lines, starting one line above the
/// cursor's line.
fn prompt_lines<'a>(view: &ViewModel<'a>, width: usize) -> Vec<Line<'a>> {
    let spans = prompt_spans(view);
    let ranges = wrap_ranges(view.target, width);
    let cursor_line = ranges
        .iter()
        .position(|r| r.contains(&view.cursor))
        .unwrap_or(ranges.len().saturating_sub(1));

    ranges
        .into_iter()
        .skip(cursor_line.saturating_sub(1))
        .take(PROMPT_LINES as usize)
        .map(|r| Line::from(spans[r].to_vec()))
        .collect()
}

fn prompt_spans<'a>(view: &ViewModel<'a>) -> Vec<Span<'a>> {
    let green_bold_style = bold().fg(Color::Green);
    let red_bold_style = bold().fg(Color::Red);
    let dim_bold_style = bold().add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = dim_bold_style.add_modifier(Modifier::UNDERLINED);

    view.target
        .iter()
        .zip(view.classification.iter())
        .enumerate()
        .map(|(idx, (&expected, class))| {
            let text = match (class, expected) {
                (CharClass::Incorrect, ' ') => "·".to_string(),
                _ => expected.to_string(),
            };
            let style = match class {
                CharClass::Correct => green_bold_style,
                CharClass::Incorrect => red_bold_style,
                CharClass::Untyped if idx == view.cursor => underlined_dim_bold_style,
                CharClass::Untyped => dim_bold_style,
            };
            Span::styled(text, style)
        })
        .collect()
}

fn key_hint_line(view: &ViewModel) -> Line<'static> {
    let Some(next) = view.next_expected else {
        return Line::default();
    };
    let shown = match next {
        ' ' => "space".to_string(),
        c if c.width().unwrap_or(0) == 0 => format!("{:?}", c),
        c => c.to_string(),
    };
    let hint = match view.key_hint {
        Some(KeyHint {
            finger,
            label,
            position,
        }) => format!(
            "next: {shown}   key: {label} (row {}, col {})   finger: {finger}",
            position.row + 1,
            position.col + 1
        ),
        None => format!("next: {shown}   no key on this layout"),
    };
    Line::from(Span::styled(hint, Style::default().fg(Color::Cyan)))
}

fn settings_text(app: &App) -> String {
    let config = app.engine.config();
    format!(
        "F1 {} | F2 {} | F3 {} | F4 bin {} | tab restart | esc {}",
        config.time_limit,
        config.mode,
        config.language.display_name(),
        if config.binary { "on" } else { "off" },
        if app.engine.session().phase() == Phase::Active {
            "stop"
        } else {
            "quit"
        }
    )
}

fn render_results(app: &App, view: &ViewModel, area: Rect, buf: &mut Buffer) {
    let bold_style = bold();
    let magenta_style = Style::default().fg(Color::Magenta);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // stats
            Constraint::Length(1), // counts
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(view.wpm_series, view.time_limit.seconds());

    let tuples = view.wpm_series.as_tuples();
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&tuples)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(charting::format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        )
        .render(chunks[0], buf);

    let Some(result) = view.final_result.or(app.last_result) else {
        return;
    };

    Paragraph::new(Span::styled(
        format!("{} wpm   {}% acc", result.wpm, result.accuracy),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} correct / {} incorrect / {} typed",
            result.correct_chars, result.incorrect_chars, result.total_chars
        ),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(tab) new session / (F1-F4) settings / (esc)ape",
        italic_style,
    ))
    .render(chunks[4], buf);
}
