use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use time_humanize::{Accuracy, HumanTime, Tense};
use unicode_width::UnicodeWidthStr;

use crate::game::{FlashKind, Game, Rejection, TICK_RATE_MS};
use crate::session::SessionSummary;
use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

const ACCEPT_COLOR: Color = Color::LightGreen;
const REJECT_COLOR: Color = Color::LightRed;
const CHALLENGE_COLOR: Color = Color::LightBlue;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Playing => render_playing(&self.game, area, buf),
            AppState::Summary => render_summary(self, area, buf),
        }
    }
}

fn render_playing(game: &Game, area: Rect, buf: &mut Buffer) {
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let mut input_lines =
        ((game.buffer.width() as f64 / max_chars_per_line as f64).ceil()) as u16;
    if input_lines < 1 {
        input_lines = 1;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),                // top padding
                Constraint::Length(3),             // challenge box
                Constraint::Length(input_lines),   // input line
                Constraint::Length(1),             // score float / reject hint
                Constraint::Min(1),                // bottom padding
                Constraint::Length(1),             // goal gauge
            ]
            .as_ref(),
        )
        .split(area);

    if let Some(ref challenge) = game.current_challenge {
        let challenge_box = Paragraph::new(Span::styled(
            challenge.clone(),
            Style::default()
                .fg(Color::Black)
                .bg(CHALLENGE_COLOR)
                .add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(CHALLENGE_COLOR))
                .title("challenge"),
        )
        .alignment(Alignment::Center);
        challenge_box.render(chunks[1], buf);
    }

    let mut input_style = Style::default().add_modifier(Modifier::BOLD);
    if let Some(flash) = game.flash {
        if flash.is_lit() {
            let bg = match flash.kind {
                FlashKind::Accept => ACCEPT_COLOR,
                FlashKind::Reject => REJECT_COLOR,
            };
            input_style = input_style.bg(bg).fg(Color::Black);
        }
    }

    let mut spans = vec![Span::styled(game.buffer.clone(), input_style)];
    if !game.is_locked() {
        spans.push(Span::styled(
            "█",
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    let input = Paragraph::new(Line::from(spans))
        .style(input_style)
        .alignment(if input_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: false });
    input.render(chunks[2], buf);

    if let Some(float) = game.score_float {
        let indicator = Paragraph::new(Span::styled(
            format!("+{:.0}", float.amount),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        indicator.render(chunks[3], buf);
    } else if game.is_locked() {
        if let Some(ref rejection) = game.last_rejection {
            let hint = match rejection {
                Rejection::EmptySentence => "empty sentence".to_string(),
                Rejection::UnknownWord(word) => format!("unknown word: {}", word),
                Rejection::ChallengeMissed(phrase) => {
                    format!("challenge missed: {}", phrase)
                }
            };
            let hint = Paragraph::new(Span::styled(
                hint,
                Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
            ))
            .alignment(Alignment::Center);
            hint.render(chunks[3], buf);
        }
    }

    let percent = game.progress() * 100.0;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCEPT_COLOR).bg(Color::DarkGray))
        .ratio(game.progress())
        .label(Span::styled(
            format!("{:.2}%", percent),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    gauge.render(chunks[5], buf);
}

fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    let game = &app.game;
    let summary = SessionSummary::from_sentences(&game.accepted);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1), // title
                Constraint::Length(1), // padding
                Constraint::Length(5), // stats
                Constraint::Min(1),    // sentence list
                Constraint::Length(1), // countdown
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Blastoff!",
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    title.render(chunks[0], buf);

    let elapsed = HumanTime::from(std::time::Duration::from_secs_f64(
        game.elapsed_secs().max(1.0),
    ))
    .to_text_en(Accuracy::Rough, Tense::Present);

    let stats_lines = vec![
        Line::from(format!("number of sentences: {}", summary.sentence_count)),
        Line::from(format!(
            "longest sentence: {} words",
            summary.longest_words
        )),
        Line::from(format!(
            "average sentence: {:.1} words",
            summary.average_words
        )),
        Line::from(format!("total score: {:.0}", game.total_score)),
        Line::from(format!("session time: {}", elapsed)),
    ];
    let stats = Paragraph::new(stats_lines).alignment(Alignment::Center);
    stats.render(chunks[2], buf);

    let sentence_list = game
        .accepted
        .iter()
        .map(|sentence| format!("- {}", sentence))
        .join("\n");
    let sentences = Paragraph::new(sentence_list)
        .style(Style::default().add_modifier(Modifier::DIM))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    sentences.render(chunks[3], buf);

    let seconds_left =
        (app.summary_ticks_remaining as u64 * TICK_RATE_MS).div_ceil(1000);
    let countdown = Paragraph::new(Span::styled(
        format!("new round in {}s  (r)estart now  (esc)ape", seconds_left),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    countdown.render(chunks[4], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{App, AppState, SUMMARY_RESTART_TICKS};
    use ratatui::{buffer::Buffer, layout::Rect};

    fn buffer_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.cell((x, y)).unwrap().symbol());
            }
            text.push('\n');
        }
        text
    }

    fn test_app() -> App {
        App::with_config(crate::config::Config::default()).unwrap()
    }

    #[test]
    fn typing_view_shows_buffer_and_gauge() {
        let mut app = test_app();
        for c in "en fin katt".chars() {
            app.game.type_char(c);
        }

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains("en fin katt"));
        assert!(text.contains("0.00%"));
    }

    #[test]
    fn typing_view_shows_active_challenge() {
        let mut app = test_app();
        app.game.current_challenge = Some("god morgen".to_string());

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains("god morgen"));
        assert!(text.contains("challenge"));
    }

    #[test]
    fn typing_view_shows_reject_hint() {
        let mut app = test_app();
        app.game.current_challenge = Some("god morgen".to_string());
        for c in "katt".chars() {
            app.game.type_char(c);
        }
        app.game.commit();

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains("challenge missed: god morgen"));
    }

    #[test]
    fn summary_view_lists_results() {
        let mut app = test_app();
        app.game.accepted = vec!["en fin katt".to_string(), "hund".to_string()];
        app.game.total_score = 100.0;
        app.state = AppState::Summary;
        app.summary_ticks_remaining = SUMMARY_RESTART_TICKS;

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains("Blastoff!"));
        assert!(text.contains("number of sentences: 2"));
        assert!(text.contains("longest sentence: 3 words"));
        assert!(text.contains("en fin katt"));
        assert!(text.contains("new round in 10s"));
    }
}
