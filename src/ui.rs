use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use crate::app::App;

pub const GET_FACT_LABEL: &str = "Get new fact!";
pub const SAVE_FACT_LABEL: &str = "Save that fact";
pub const CURRENT_FACT_TITLE: &str = "Currently displayed random fact";
pub const LOADING_TEXT: &str = "Loading...";

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let [fact_area, controls_area, saved_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(body_area);

    render_header(app, frame, header_area);
    render_fact(app, frame, fact_area);
    render_controls(app, frame, controls_area);
    render_saved_facts(app, frame, saved_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let saved_count = app.state.saved_count();
    let saved_indicator = if saved_count > 0 {
        format!(" [{} saved]", saved_count)
    } else {
        String::new()
    };

    let title = Line::from(vec![
        Span::styled(" Number Facts ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(" {} ", app.category.display_name()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(saved_indicator, Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_fact(app: &App, frame: &mut Frame, area: Rect) {
    let state = &app.state;

    if state.is_loading {
        let loading = Paragraph::new(Line::from(vec![
            Span::styled(app.spinner(), Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(LOADING_TEXT, Style::default().fg(Color::Yellow)),
        ]))
        .block(Block::default().borders(Borders::ALL).title(" Fact "));
        frame.render_widget(loading, area);
        return;
    }

    let error_line = state.last_error.as_ref().map(|err| {
        Line::from(Span::styled(format!("! {}", err), Style::default().fg(Color::Red)))
    });

    match state.displayed_fact() {
        Some(fact) => {
            let mut lines = vec![Line::from(fact.to_string())];
            if let Some(line) = error_line {
                lines.push(Line::default());
                lines.push(line);
            }

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} ", CURRENT_FACT_TITLE));
            let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        None => {
            // Neutral state: no fact region and no save control
            let line = error_line.unwrap_or_else(|| {
                Line::from(Span::styled(
                    "No fact yet. Press Enter to fetch one.",
                    Style::default().fg(Color::DarkGray),
                ))
            });
            let paragraph = Paragraph::new(line)
                .block(Block::default().borders(Borders::ALL).title(" Fact "))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
    }
}

fn button(label: &str, style: Style) -> Paragraph<'_> {
    Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style))
}

fn button_width(label: &str) -> u16 {
    label.chars().count() as u16 + 4
}

fn render_controls(app: &mut App, frame: &mut Frame, area: Rect) {
    let [get_area, _, save_area, _] = Layout::horizontal([
        Constraint::Length(button_width(GET_FACT_LABEL)),
        Constraint::Length(1),
        Constraint::Length(button_width(SAVE_FACT_LABEL)),
        Constraint::Min(0),
    ])
    .areas(area);

    let get_style = if app.state.is_loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    frame.render_widget(button(GET_FACT_LABEL, get_style), get_area);
    app.get_button_area = Some(get_area);

    if app.state.can_save() {
        let save_style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        frame.render_widget(button(SAVE_FACT_LABEL, save_style), save_area);
        app.save_button_area = Some(save_area);
    } else {
        app.save_button_area = None;
    }
}

/// Width of the `"  1. "` prefix in front of each saved fact.
const SAVED_PREFIX_WIDTH: usize = 5;

/// Greedy word wrap. Words longer than `width` are split.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let line_len = line.chars().count();
        if !line.is_empty() && line_len + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn saved_fact_item(index: usize, fact: &str, width: usize) -> ListItem<'static> {
    let number_style = Style::default().fg(Color::DarkGray);
    let lines: Vec<Line> = wrap_words(fact, width)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let prefix = if i == 0 {
                format!("{:>3}. ", index + 1)
            } else {
                " ".repeat(SAVED_PREFIX_WIDTH)
            };
            Line::from(vec![Span::styled(prefix, number_style), Span::raw(text)])
        })
        .collect();
    ListItem::new(lines)
}

fn render_saved_facts(app: &mut App, frame: &mut Frame, area: Rect) {
    let saved = &app.state.saved_facts;
    if saved.is_empty() {
        return;
    }

    // Inside the borders, after the number prefix
    let text_width = (area.width as usize).saturating_sub(2 + SAVED_PREFIX_WIDTH);
    let items: Vec<ListItem> = saved
        .iter()
        .enumerate()
        .map(|(i, fact)| saved_fact_item(i, fact, text_width))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Saved facts ({}) ", saved.len())),
        )
        .highlight_style(Style::default().fg(Color::Cyan));
    frame.render_stateful_widget(list, area, &mut app.saved_state);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" new fact ", label_style),
    ];
    if app.state.can_save() {
        hints.extend(vec![
            Span::styled(" s ", key_style),
            Span::styled(" save ", label_style),
        ]);
    }
    hints.extend(vec![
        Span::styled(" c ", key_style),
        Span::styled(" category ", label_style),
    ]);
    if app.state.saved_count() > 1 {
        hints.extend(vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" scroll saved ", label_style),
        ]);
    }
    hints.extend(vec![
        Span::styled(" q ", key_style),
        Span::styled(" quit ", label_style),
    ]);

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Arc;
    use numfacts_core::testing::ScriptedProvider;
    use numfacts_core::AppState;
    use ratatui::{backend::TestBackend, Terminal};

    pub fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_in(state: AppState) -> App {
        App::with_provider(Arc::new(ScriptedProvider::default()), state)
    }

    #[test]
    fn test_initial_screen() {
        let mut app = app_in(AppState::default());
        let screen = draw(&mut app);
        assert!(screen.contains(GET_FACT_LABEL));
        assert!(!screen.contains(SAVE_FACT_LABEL));
        assert!(!screen.contains(CURRENT_FACT_TITLE));
        assert!(!screen.contains("Saved facts"));
        assert!(app.get_button_area.is_some());
        assert!(app.save_button_area.is_none());
    }

    #[test]
    fn test_current_fact_is_labeled_with_save_control() {
        let mut app = app_in(AppState::with_current_fact("Random fact"));
        let screen = draw(&mut app);
        assert!(screen.contains(CURRENT_FACT_TITLE));
        assert!(screen.contains("Random fact"));
        assert!(screen.contains(SAVE_FACT_LABEL));
        assert!(app.save_button_area.is_some());
    }

    #[test]
    fn test_loading_hides_fact_and_save_control() {
        let mut state = AppState::with_current_fact("Random fact");
        state.is_loading = true;
        let mut app = app_in(state);
        let screen = draw(&mut app);
        assert!(screen.contains(LOADING_TEXT));
        assert!(!screen.contains("Random fact"));
        assert!(!screen.contains(SAVE_FACT_LABEL));
        assert!(screen.contains(GET_FACT_LABEL));
    }

    #[test]
    fn test_saved_facts_render_in_order() {
        let mut state = AppState::default();
        state.saved_facts = vec!["First random fact".into(), "Second random fact".into()];
        let mut app = app_in(state);
        let screen = draw(&mut app);

        let first = screen.find("First random fact").unwrap();
        let second = screen.find("Second random fact").unwrap();
        assert!(first < second);
        assert!(screen.contains("Saved facts (2)"));
        assert!(screen.contains("[2 saved]"));
    }

    #[test]
    fn test_long_saved_fact_wraps() {
        let fact = "42 is the number of spots (or pips, circular patches or pits) on a pair of standard six-sided dice.";
        let mut state = AppState::default();
        state.saved_facts = vec![fact.to_string()];
        let mut app = app_in(state);
        let screen = draw(&mut app);

        assert!(screen.contains("  1. 42 is the number of spots"));
        assert!(screen.contains("six-sided dice."));
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap_words("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_words("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
        assert_eq!(wrap_words("", 10), vec![""]);
        assert_eq!(wrap_words("short", 0), vec!["s", "h", "o", "r", "t"]);
    }

    #[test]
    fn test_error_renders_neutral_state() {
        let mut state = AppState::default();
        state.last_error = Some("failed to fetch fact: offline".into());
        let mut app = app_in(state);
        let screen = draw(&mut app);
        assert!(screen.contains("failed to fetch fact: offline"));
        assert!(!screen.contains(SAVE_FACT_LABEL));
        assert!(!screen.contains(LOADING_TEXT));
    }
}
