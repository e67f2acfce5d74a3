/// Word Garden renderer - draws the game, never changes it
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::renderer::GameRenderer;
use crate::games::garden::art::{self, Image};
use crate::games::garden::GardenGame;

pub struct GardenRenderer;

impl GameRenderer<GardenGame> for GardenRenderer {
    fn render(&self, frame: &mut Frame, game: &GardenGame) {
        let chunks = Layout::vertical([
            Constraint::Length(2), // counters
            Constraint::Length(4), // status
            Constraint::Length(2), // revealed word
            Constraint::Length(3), // input or play-again button
            Constraint::Length(1), // key help
            Constraint::Min(0),    // flower
        ])
        .margin(1)
        .split(frame.area());

        render_counters(frame, game, chunks[0]);

        frame.render_widget(
            Paragraph::new(game.status())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().add_modifier(Modifier::BOLD)),
            chunks[1],
        );

        frame.render_widget(
            Paragraph::new(game.state().revealed_word())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            chunks[2],
        );

        render_controls(frame, game, chunks[3], chunks[4]);
        render_flower(frame, game.image_key(), chunks[5]);
    }
}

fn render_counters(frame: &mut Frame, game: &GardenGame, area: Rect) {
    let state = game.state();
    let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    frame.render_widget(
        Paragraph::new(format!(
            "Words Guessed: {}\nWords Missed: {}",
            state.words_guessed(),
            state.words_missed()
        )),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(format!(
            "Words to Guess: {}\nWords in Game: {}",
            state.words_left(),
            state.word_list().len()
        ))
        .alignment(Alignment::Right),
        halves[1],
    );
}

fn render_controls(frame: &mut Frame, game: &GardenGame, area: Rect, help_area: Rect) {
    let centred = Layout::horizontal([Constraint::Min(0), Constraint::Length(24), Constraint::Min(0)]).split(area)[1];

    let (control, help) = if game.is_awaiting_advance() {
        let button = Paragraph::new(game.button_label())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Black).bg(Color::Green));
        (button, "[Enter] Continue  [Esc] Quit")
    } else {
        let letter = game.input().map(String::from).unwrap_or_default();
        let field = Paragraph::new(Line::from(vec![
            Span::raw("Guess a Letter: "),
            Span::styled(letter, Style::default().add_modifier(Modifier::BOLD)),
        ]))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Gray)));
        (field, "[A-Z] Type  [Enter] Guess  [Backspace] Clear  [Esc] Quit")
    };

    frame.render_widget(control, centred);
    frame.render_widget(
        Paragraph::new(help)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn render_flower(frame: &mut Frame, image_key: &str, area: Rect) {
    let image = Image::from_key(image_key);
    let colour = if image.is_wilting() {
        Color::Yellow
    } else if image == Image::Flower(0) {
        Color::Red
    } else {
        Color::Green
    };

    // pad to a common width so centring keeps the stem in one column
    let lines = art::render(image);
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let text: Text = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(format!("{l:<width$}"), Style::default().fg(colour))))
        .collect::<Vec<_>>()
        .into();

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}
