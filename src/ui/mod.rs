mod quiz;
mod result;
mod welcome;

use std::str::FromStr;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Welcome => welcome::render(frame, area, app),
        AppState::Quiz => quiz::render(frame, area, app),
        AppState::Result => result::render(frame, area, app),
    }
}

/// Terminal colour for a `#RRGGBB` grade colour, white if it doesn't parse.
pub(crate) fn grade_color(tag: &str) -> Color {
    Color::from_str(tag).unwrap_or(Color::White)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_color() {
        assert_eq!(grade_color("#FFD700"), Color::Rgb(0xFF, 0xD7, 0x00));
        assert_eq!(grade_color("not a colour"), Color::White);
    }
}
