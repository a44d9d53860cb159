pub mod ballot;
pub mod voting;

use crossterm::event::Event;
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::config::Theme;

pub use ballot::BallotPanel;

pub trait Component {
    fn handle_event(&mut self, event: &Event) -> Option<Action>;

    fn update(&mut self, action: &Action);

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme);
}
