use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::{App, StepMark};
use crate::models::{Question, QuestionKind};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_steps(frame, chunks[1], app.steps(), app.session().current_index());

    let Some(question) = app.current_question() else {
        render_question_text(frame, chunks[3], "This quiz has no questions.");
        render_controls(frame, chunks[6], true);
        return;
    };

    render_question_text(frame, chunks[3], &question.prompt);
    render_options(frame, chunks[4], question, app);
    render_feedback(frame, chunks[5], app);
    render_controls(frame, chunks[6], app.is_last_question());
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let [gauge_area, counter_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(9)]).areas(area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(app.session().progress() as u16)
        .label("");
    frame.render_widget(gauge, gauge_area);

    let counter = format!(
        "{}/{}",
        app.current_question_number().min(app.total_questions()),
        app.total_questions()
    );
    let widget = Paragraph::new(counter)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, counter_area);
}

fn render_steps(frame: &mut Frame, area: Rect, steps: &[StepMark], current: usize) {
    let spans: Vec<Span> = steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let color = match step {
                StepMark::Correct => Color::Green,
                StepMark::Incorrect => Color::Red,
                StepMark::Pending if index == current => Color::Cyan,
                StepMark::Pending => Color::DarkGray,
            };
            let symbol = if index == current { "◆ " } else { "● " };
            Span::styled(symbol, Style::default().fg(color))
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn option_label(question: &Question, index: usize) -> String {
    match question.kind() {
        QuestionKind::Binary => String::new(),
        QuestionKind::MultipleChoice => match OPTION_LABELS.get(index) {
            Some(label) => format!("{}. ", label),
            None => format!("{}. ", index + 1),
        },
    }
}

fn render_options(frame: &mut Frame, area: Rect, question: &Question, app: &App) {
    let answers = question.answer_options();
    let revealed = app.feedback();
    let correct_index = question.correct_index();
    let mut lines: Vec<Line> = Vec::with_capacity(answers.len() * 2);

    for (index, answer) in answers.iter().enumerate() {
        let is_selected = app.selected_option() == Some(index);
        let style = match revealed {
            Some(_) if Some(index) == correct_index => Style::default().fg(Color::Green).bold(),
            Some(record) if is_selected && !record.is_correct => {
                Style::default().fg(Color::Red).bold()
            }
            Some(_) => Style::default().fg(Color::DarkGray),
            None if is_selected => Style::default().fg(Color::Cyan).bold(),
            None => Style::default().fg(Color::Gray),
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(option_label(question, index), style),
            Span::styled(answer.to_string(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(notice) = app.notice() {
        let widget = Paragraph::new(notice).fg(Color::Yellow);
        frame.render_widget(widget, area);
        return;
    }

    let Some(record) = app.feedback() else {
        return;
    };

    let (verdict, color) = if record.is_correct {
        ("Correct!", Color::Green)
    } else {
        ("Wrong.", Color::Red)
    };
    let mut lines = vec![Line::from(Span::styled(
        verdict,
        Style::default().fg(color).bold(),
    ))];
    if let Some(explanation) = &record.question.explanation {
        lines.push(Line::from(Span::styled(
            explanation.as_str(),
            Style::default().fg(Color::Gray),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, is_last: bool) {
    let action = if is_last { "see results" } else { "next" };
    let widget = Paragraph::new(format!(
        "j/k navigate  ·  enter select / {}  ·  q quit",
        action
    ))
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mark;

    #[test]
    fn test_option_labels() {
        let question = Question::multiple_choice("Q", ["a", "b", "c", "d", "e"], "a");
        assert_eq!(option_label(&question, 0), "A. ");
        assert_eq!(option_label(&question, 4), "5. ");
        assert_eq!(option_label(&Question::binary("Q", Mark::O), 0), "");
    }
}
