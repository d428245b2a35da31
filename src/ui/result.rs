use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::engine::ResultSummary;

use super::grade_color;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(summary) = app.summary() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], summary);
    render_mistakes(frame, chunks[2], summary, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &ResultSummary) {
    let color = grade_color(&summary.grade_color);

    let content = vec![
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(summary.grade.as_str(), Style::default().fg(color).bold()),
            Span::styled(
                format!("  {}", summary.percentage()),
                Style::default().fg(color),
            ),
        ]),
        Line::from(Span::styled(
            summary.grade_label.as_str(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} questions", summary.total_questions),
                Style::default().fg(Color::Gray),
            ),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} correct", summary.correct_count),
                Style::default().fg(Color::Green),
            ),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} wrong", summary.incorrect_count),
                Style::default().fg(Color::Red),
            ),
        ]),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_mistakes(frame: &mut Frame, area: Rect, summary: &ResultSummary, scroll: usize) {
    let mut lines: Vec<Line> = Vec::new();

    if summary.mistakes().next().is_none() {
        lines.push(Line::from(Span::styled(
            "No mistakes to review.",
            Style::default().fg(Color::Green),
        )));
    }

    for record in summary.mistakes() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Q{:<3}", record.question_index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate_question(&record.question.prompt),
                Style::default().fg(Color::Gray),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!("your answer: {}", record.user_answer),
                Style::default().fg(Color::Red),
            ),
            Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("correct: {}", record.question.correct_answer),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Review ")
                .padding(Padding::horizontal(1)),
        )
        .scroll(((scroll * 2) as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r retry  ·  h home  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");

        let long = "x".repeat(QUESTION_PREVIEW_LENGTH + 5);
        let truncated = truncate_question(&long);
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert!(truncated.ends_with("..."));
    }
}
