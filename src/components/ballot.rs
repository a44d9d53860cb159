use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
    Frame,
};

use crate::action::Action;
use crate::components::voting::{self, BallotState, VotingProps, VotingView};
use crate::components::Component;
use crate::config::Theme;

/// Hosts the voting widget: remembers the last props and the view derived from them,
/// the keyboard cursor, and where the buttons were last laid out.
///
/// New props only produce a new view when they differ by value from the previous
/// ones, so a rebuilt pair holding the same candidates leaves the view untouched.
pub struct BallotPanel {
    props: VotingProps,
    view: VotingView,
    /// Number of times the view has been rebuilt since construction.
    revision: u64,
    selected: usize,
    area: Rect,
}

impl BallotPanel {
    pub fn new(props: VotingProps) -> Self {
        let view = voting::view(&props);
        Self {
            props,
            view,
            revision: 0,
            selected: 0,
            area: Rect::default(),
        }
    }

    pub fn props(&self) -> &VotingProps {
        &self.props
    }

    pub fn state(&self) -> BallotState {
        self.props.state()
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Supplies the next props. Returns true when the view changed and needs drawing.
    pub fn set_props(&mut self, next: VotingProps) -> bool {
        if !voting::should_update(&self.props, &next) {
            tracing::trace!("ballot props unchanged, keeping view");
            self.props = next;
            return false;
        }

        self.view = voting::view(&next);
        self.props = next;
        self.revision += 1;

        let count = self.view.controls().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }

        tracing::debug!(
            state = ?self.props.state(),
            revision = self.revision,
            "ballot view rebuilt"
        );
        true
    }

    fn block(focused: bool, theme: &Theme) -> Block<'static> {
        Block::default()
            .title(" Vote ")
            .title_style(theme.title_style(focused))
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused))
    }

    fn control_rects(&self) -> Vec<Rect> {
        let inner = Block::default().borders(Borders::ALL).inner(self.area);
        voting::control_areas(inner, self.view.controls().len())
    }

    fn select_next(&mut self) {
        let count = self.view.controls().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    fn select_prev(&mut self) {
        let count = self.view.controls().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::BallotSelectPrev),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Some(Action::BallotSelectNext),
            KeyCode::Enter | KeyCode::Char(' ') => self.view.vote_for(self.selected),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.view.vote_for(index)
            }
            _ => None,
        }
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        let position = (mouse.column, mouse.row).into();
        self.control_rects()
            .iter()
            .position(|rect| rect.contains(position))
            .and_then(|index| self.view.vote_for(index))
    }
}

impl Component for BallotPanel {
    fn handle_event(&mut self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::BallotSelectNext => self.select_next(),
            Action::BallotSelectPrev => self.select_prev(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let block = Self::block(focused, theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let selected = (focused && self.state().is_interactive()).then_some(self.selected);
        voting::render_view(frame, inner, &self.view, selected, theme);
    }
}
