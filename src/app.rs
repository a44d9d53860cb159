use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Terminal,
};

use crate::action::Action;
use crate::components::voting::VotingProps;
use crate::components::{BallotPanel, Component};
use crate::config::Theme;
use crate::error::{Result, VoteError};

const POLL_INTERVAL_MS: u64 = 16;
const HELP_TEXT: &str = "←/→ select  Enter/1/2 vote  r clear  w declare winner  s swap  q quit";

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    should_quit: bool,
    needs_redraw: bool,
    ballot: BallotPanel,
    theme: Theme,
}

impl App {
    pub fn new(props: VotingProps, theme: Theme) -> Result<Self> {
        enable_raw_mode().map_err(|e| VoteError::Terminal(e.to_string()))?;
        let terminal = undo_on_error(
            || -> io::Result<_> {
                let mut stdout = io::stdout();
                execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
                Terminal::new(CrosstermBackend::new(stdout))
            },
            restore_terminal,
        )
        .map_err(|e| VoteError::Terminal(e.to_string()))?;

        tracing::info!(state = ?props.state(), "starting ballot");

        Ok(Self {
            terminal,
            should_quit: false,
            needs_redraw: true,
            ballot: BallotPanel::new(props),
            theme,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.needs_redraw {
                self.draw()?;
                self.needs_redraw = false;
            }

            if event::poll(Duration::from_millis(POLL_INTERVAL_MS)).map_err(|e| VoteError::Terminal(e.to_string()))? {
                let event = event::read().map_err(|e| VoteError::Terminal(e.to_string()))?;

                if let Some(action) = self.handle_event(event) {
                    self.dispatch(action);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    fn draw(&mut self) -> Result<()> {
        let ballot = &mut self.ballot;
        let theme = &self.theme;

        self.terminal
            .draw(|frame| {
                let [main, footer] = Layout::vertical([Constraint::Min(5), Constraint::Length(1)])
                    .areas(frame.area());

                ballot.set_area(main);
                ballot.render(frame, main, true, theme);

                let help = Paragraph::new(Line::from(HELP_TEXT))
                    .style(Style::default().fg(theme.colors.muted.to_color()));
                frame.render_widget(help, footer);
            })
            .map_err(|e| VoteError::Terminal(e.to_string()))?;

        Ok(())
    }

    fn handle_event(&mut self, event: CrosstermEvent) -> Option<Action> {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(key),
            CrosstermEvent::Mouse(_) => self.ballot.handle_event(&event),
            CrosstermEvent::Resize(_, _) => Some(Action::Render),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::ClearVote),
            KeyCode::Char('w') => Some(Action::DeclareWinner),
            KeyCode::Char('s') => Some(Action::SwapPair),
            _ => self.ballot.handle_event(&CrosstermEvent::Key(key)),
        }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Render => self.mark_dirty(),
            Action::BallotSelectNext | Action::BallotSelectPrev => {
                self.ballot.update(&action);
                self.mark_dirty();
            }
            Action::Vote(ref candidate) => {
                tracing::info!(%candidate, "vote cast");
                self.supply_next(&action);
            }
            Action::ClearVote | Action::DeclareWinner | Action::SwapPair => {
                self.supply_next(&action);
            }
        }
    }

    fn supply_next(&mut self, action: &Action) {
        match next_props(self.ballot.props(), action) {
            Some(props) => {
                if self.ballot.set_props(props) {
                    self.mark_dirty();
                }
            }
            None => tracing::debug!(?action, "nothing to change"),
        }
    }
}

/// Props the host hands the ballot after `action`, or `None` when the action does
/// not apply in the current state.
pub fn next_props(props: &VotingProps, action: &Action) -> Option<VotingProps> {
    match action {
        Action::Vote(candidate) => Some(props.clone().with_has_voted(candidate.clone())),
        Action::ClearVote if props.winner.is_none() => Some(VotingProps {
            has_voted: None,
            ..props.clone()
        }),
        Action::DeclareWinner if props.winner.is_none() => {
            let winner = props.has_voted.clone()?;
            Some(props.clone().with_winner(winner))
        }
        Action::SwapPair if props.winner.is_none() => {
            let pair = props.pair.as_ref()?.reversed();
            Some(props.clone().with_pair(pair))
        }
        _ => None,
    }
}

/// Runs `setup`, calling `undo` only if it fails.
fn undo_on_error<T, E>(
    setup: impl FnOnce() -> std::result::Result<T, E>,
    undo: impl FnOnce(),
) -> std::result::Result<T, E> {
    setup().inspect_err(|_| undo())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

impl Drop for App {
    fn drop(&mut self) {
        restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::voting::BallotState;
    use crate::pair::{CandidatePair, SharedPair};
    use std::cell::Cell;

    fn open() -> VotingProps {
        VotingProps::new().with_pair(["Trainspotting", "28 Days Later"])
    }

    #[test]
    fn test_vote_moves_open_to_voted() {
        let next = next_props(&open(), &Action::Vote("Trainspotting".to_string())).unwrap();
        assert_eq!(next.state(), BallotState::Voted);
        assert_eq!(next.has_voted.as_deref(), Some("Trainspotting"));
    }

    #[test]
    fn test_declare_winner_needs_a_vote() {
        assert!(next_props(&open(), &Action::DeclareWinner).is_none());

        let voted = open().with_has_voted("28 Days Later");
        let decided = next_props(&voted, &Action::DeclareWinner).unwrap();
        assert_eq!(decided.state(), BallotState::Decided);
        assert_eq!(decided.winner.as_deref(), Some("28 Days Later"));
    }

    #[test]
    fn test_decided_is_terminal() {
        let decided = open().with_winner("Trainspotting");
        assert!(next_props(&decided, &Action::ClearVote).is_none());
        assert!(next_props(&decided, &Action::SwapPair).is_none());
        assert!(next_props(&decided, &Action::DeclareWinner).is_none());
    }

    #[test]
    fn test_clear_vote_reopens() {
        let voted = open().with_has_voted("Trainspotting");
        let reopened = next_props(&voted, &Action::ClearVote).unwrap();
        assert_eq!(reopened.state(), BallotState::Open);
    }

    #[test]
    fn test_swap_keeps_shared_representation() {
        let props = VotingProps::new().with_pair(SharedPair::of("A", "B"));
        let swapped = next_props(&props, &Action::SwapPair).unwrap();
        let pair = swapped.pair.unwrap();
        assert_eq!(pair.get(0), Some("B"));
        assert!(pair.root_id().is_some());
    }

    #[test]
    fn test_failed_setup_is_undone() {
        let undone = Cell::new(false);
        let result: std::result::Result<(), io::Error> =
            undo_on_error(|| Err(io::Error::other("no tty")), || undone.set(true));
        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn test_successful_setup_is_kept() {
        let undone = Cell::new(false);
        let result: std::result::Result<u8, io::Error> = undo_on_error(|| Ok(7), || undone.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }

    #[test]
    fn test_swap_without_pair_does_nothing() {
        assert!(next_props(&VotingProps::new(), &Action::SwapPair).is_none());
    }
}
