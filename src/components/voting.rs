//! The two-option voting widget.
//!
//! [`view`] is a pure mapping from [`VotingProps`] to a [`VotingView`]; nothing here
//! keeps state between calls. Priority is winner, then pair, then empty. Drawing a
//! view into a ratatui frame is [`render_view`], and [`control_areas`] is the layout
//! shared by drawing and mouse hit-testing.
//!
//! Inputs outside the usual shape are not rejected:
//! - a pair with more than two candidates shows only the first two
//! - an empty pair is treated as no pair
//! - a `has_voted` that matches neither candidate disables both buttons, unmarked
//! - a `winner` that is not in the pair is announced anyway

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::Action;
use crate::config::Theme;
use crate::pair::{pairs_equal, CandidatePair, PairInput};

pub const MAX_CONTROLS: usize = 2;
pub const VOTED_LABEL: &str = "✓ Voted";
const WINNER_SUFFIX: &str = " gets my vote";
const EMPTY_MESSAGE: &str = "Nothing to vote on yet";

/// Everything the widget draws from. Supplied whole on every pass.
#[derive(Debug, Clone, Default)]
pub struct VotingProps {
    pub pair: Option<PairInput>,
    pub has_voted: Option<String>,
    pub winner: Option<String>,
}

impl VotingProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(mut self, pair: impl Into<PairInput>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn with_has_voted(mut self, candidate: impl Into<String>) -> Self {
        self.has_voted = Some(candidate.into());
        self
    }

    pub fn with_winner(mut self, candidate: impl Into<String>) -> Self {
        self.winner = Some(candidate.into());
        self
    }

    pub fn state(&self) -> BallotState {
        BallotState::of(self)
    }

    fn visible_pair(&self) -> Option<&PairInput> {
        self.pair.as_ref().filter(|pair| !pair.is_empty())
    }
}

/// Where the ballot stands, derived from props alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallotState {
    Empty,
    Open,
    Voted,
    Decided,
}

impl BallotState {
    pub fn of(props: &VotingProps) -> Self {
        if props.winner.is_some() {
            BallotState::Decided
        } else if props.visible_pair().is_none() {
            BallotState::Empty
        } else if props.has_voted.is_some() {
            BallotState::Voted
        } else {
            BallotState::Open
        }
    }

    pub fn is_interactive(self) -> bool {
        self == BallotState::Open
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteButton {
    pub candidate: String,
    pub voted: bool,
    pub enabled: bool,
}

impl VoteButton {
    pub fn label(&self) -> String {
        if self.voted {
            format!("{} {}", self.candidate, VOTED_LABEL)
        } else {
            self.candidate.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VotingView {
    Empty,
    Winner { winner: String },
    Controls(Vec<VoteButton>),
}

impl VotingView {
    pub fn controls(&self) -> &[VoteButton] {
        match self {
            VotingView::Controls(buttons) => buttons,
            _ => &[],
        }
    }

    pub fn winner_text(&self) -> Option<String> {
        match self {
            VotingView::Winner { winner } => Some(format!("{}{}", winner, WINNER_SUFFIX)),
            _ => None,
        }
    }

    /// The vote a click on control `index` produces, if that control is enabled.
    pub fn vote_for(&self, index: usize) -> Option<Action> {
        self.controls()
            .get(index)
            .filter(|button| button.enabled)
            .map(|button| Action::Vote(button.candidate.clone()))
    }
}

pub fn view(props: &VotingProps) -> VotingView {
    if let Some(winner) = &props.winner {
        return VotingView::Winner {
            winner: winner.clone(),
        };
    }

    let Some(pair) = props.visible_pair() else {
        return VotingView::Empty;
    };

    let has_voted = props.has_voted.as_deref();
    let buttons = pair
        .candidates()
        .take(MAX_CONTROLS)
        .map(|candidate| VoteButton {
            candidate: candidate.to_string(),
            voted: has_voted == Some(candidate),
            enabled: has_voted.is_none(),
        })
        .collect();

    VotingView::Controls(buttons)
}

/// Value equality of props. Pairs go through [`pairs_equal`].
pub fn props_equal(prev: &VotingProps, next: &VotingProps) -> bool {
    let pairs_match = match (&prev.pair, &next.pair) {
        (Some(a), Some(b)) => pairs_equal(a, b),
        (None, None) => true,
        _ => false,
    };

    pairs_match && prev.has_voted == next.has_voted && prev.winner == next.winner
}

pub fn should_update(prev: &VotingProps, next: &VotingProps) -> bool {
    !props_equal(prev, next)
}

/// Button rectangles for `count` controls laid out side by side in `area`.
pub fn control_areas(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }

    let row = middle_row(area, 3);
    let constraints = (0..count).map(|_| Constraint::Ratio(1, count as u32));
    Layout::horizontal(constraints)
        .spacing(1)
        .split(row)
        .to_vec()
}

fn middle_row(area: Rect, height: u16) -> Rect {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    row
}

pub fn render_view(
    frame: &mut Frame,
    area: Rect,
    view: &VotingView,
    selected: Option<usize>,
    theme: &Theme,
) {
    match view {
        VotingView::Winner { winner } => {
            if let Some(text) = view.winner_text() {
                render_winner(frame, area, &text, winner.len(), theme);
            }
        }
        VotingView::Controls(buttons) => {
            for (i, (button, rect)) in buttons
                .iter()
                .zip(control_areas(area, buttons.len()))
                .enumerate()
            {
                render_button(frame, rect, button, selected == Some(i), theme);
            }
        }
        VotingView::Empty => {
            let empty = Paragraph::new(Line::from(Span::styled(
                EMPTY_MESSAGE,
                Style::default()
                    .fg(theme.colors.muted.to_color())
                    .add_modifier(Modifier::ITALIC),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(empty, middle_row(area, 1));
        }
    }
}

/// `text` is the full announcement; its first `winner_len` bytes are the winner.
fn render_winner(frame: &mut Frame, area: Rect, text: &str, winner_len: usize, theme: &Theme) {
    let block = Block::default()
        .title(" Winner ")
        .title_style(theme.winner_style())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.ballot.winner_border.to_color()));

    let (winner, suffix) = text.split_at(winner_len);
    let line = Line::from(vec![
        Span::styled(winner, theme.winner_style()),
        Span::styled(suffix, Style::default().fg(theme.colors.foreground.to_color())),
    ]);

    let announcement = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(announcement, middle_row(area, 3));
}

fn render_button(frame: &mut Frame, area: Rect, button: &VoteButton, selected: bool, theme: &Theme) {
    let style = theme.button_style(button.enabled, selected);

    let label = button.label();
    let (name, marker) = label.split_at(button.candidate.len());
    let spans = vec![
        Span::raw(name),
        Span::styled(
            marker,
            Style::default()
                .fg(theme.ballot.voted_fg.to_color())
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let block = Block::default().borders(Borders::ALL).border_style(style);
    let paragraph = Paragraph::new(Line::from(spans))
        .style(style)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::SharedPair;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use rstest::rstest;

    const A: &str = "Trainspotting";
    const B: &str = "28 Days Later";

    fn open() -> VotingProps {
        VotingProps::new().with_pair([A, B])
    }

    fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    fn enabled_count(view: &VotingView) -> usize {
        view.controls().iter().filter(|b| b.enabled).count()
    }

    fn draw(view: &VotingView) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(64, 9)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_view(frame, area, view, None, &theme);
            })
            .unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    #[test]
    fn test_open_pair_renders_two_enabled_controls_in_order() {
        let view = view(&open());
        let labels: Vec<String> = view.controls().iter().map(VoteButton::label).collect();
        assert_eq!(labels, vec![A.to_string(), B.to_string()]);
        assert_eq!(enabled_count(&view), 2);
    }

    #[test]
    fn test_click_votes_for_that_candidate_only() {
        let view = view(&open());
        assert_eq!(view.vote_for(0), Some(Action::Vote(A.to_string())));
        assert_eq!(view.vote_for(1), Some(Action::Vote(B.to_string())));
        assert_eq!(view.vote_for(2), None);
    }

    #[test]
    fn test_has_voted_disables_both_and_marks_one() {
        let view = view(&open().with_has_voted(A));
        let controls = view.controls();

        assert_eq!(controls.len(), 2);
        assert!(controls.iter().all(|b| !b.enabled));
        assert!(controls[0].label().contains("Voted"));
        assert!(!controls[1].label().contains("Voted"));
        assert_eq!(view.vote_for(0), None);
        assert_eq!(view.vote_for(1), None);
    }

    #[test]
    fn test_winner_replaces_controls() {
        let view = view(&open().with_has_voted(B).with_winner(A));
        assert_eq!(view.controls().len(), 0);
        assert_eq!(enabled_count(&view), 0);
        assert_eq!(view.winner_text(), Some(format!("{} gets my vote", A)));
        assert_eq!(view.vote_for(0), None);
    }

    #[test]
    fn test_no_pair_no_winner_is_empty() {
        assert_eq!(view(&VotingProps::new()), VotingView::Empty);
        assert_eq!(view(&VotingProps::new().with_has_voted(A)), VotingView::Empty);
    }

    #[rstest]
    #[case::empty(VotingProps::new(), BallotState::Empty)]
    #[case::open(open(), BallotState::Open)]
    #[case::voted(open().with_has_voted(A), BallotState::Voted)]
    #[case::decided(open().with_has_voted(A).with_winner(B), BallotState::Decided)]
    #[case::decided_without_pair(VotingProps::new().with_winner(B), BallotState::Decided)]
    #[case::empty_pair(VotingProps::new().with_pair(Vec::<String>::new()), BallotState::Empty)]
    fn test_ballot_state(#[case] props: VotingProps, #[case] expected: BallotState) {
        assert_eq!(props.state(), expected);
        assert_eq!(expected.is_interactive(), enabled_count(&view(&props)) > 0);
    }

    #[test]
    fn test_extra_candidates_are_not_rendered() {
        let props = VotingProps::new().with_pair(vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
        ]);
        let view = view(&props);
        assert_eq!(view.controls().len(), MAX_CONTROLS);
        assert_eq!(view.controls()[1].candidate, "B");
    }

    #[test]
    fn test_single_candidate_renders_one_control() {
        let props = VotingProps::new().with_pair(vec!["A".to_string()]);
        assert_eq!(view(&props).controls().len(), 1);
    }

    #[test]
    fn test_unknown_has_voted_disables_without_marker() {
        let view = view(&open().with_has_voted("Sunshine"));
        assert_eq!(enabled_count(&view), 0);
        assert!(view.controls().iter().all(|b| !b.voted));
    }

    #[test]
    fn test_view_is_pure() {
        let props = open();
        assert_eq!(view(&props), view(&props));
        assert_eq!(draw(&view(&props)), draw(&view(&props)));
    }

    #[rstest]
    #[case::same_values(VotingProps::new().with_pair([A, B]), false)]
    #[case::same_values_shared(VotingProps::new().with_pair(SharedPair::of(A, B)), false)]
    #[case::first_changed(VotingProps::new().with_pair(["Sunshine", B]), true)]
    #[case::order_changed(VotingProps::new().with_pair([B, A]), true)]
    #[case::voted(open().with_has_voted(A), true)]
    #[case::winner(open().with_winner(A), true)]
    #[case::pair_removed(VotingProps::new(), true)]
    fn test_should_update(#[case] next: VotingProps, #[case] expected: bool) {
        assert_eq!(should_update(&open(), &next), expected);
    }

    #[test]
    fn test_shared_root_shortcut_agrees_with_values() {
        let pair = SharedPair::of(A, B);
        let prev = VotingProps::new().with_pair(pair.clone());

        let same_root = VotingProps::new().with_pair(pair.clone());
        let unchanged_set = VotingProps::new().with_pair(pair.set(0, A));
        let changed = VotingProps::new().with_pair(pair.set(0, "Sunshine"));

        assert!(!should_update(&prev, &same_root));
        assert!(!should_update(&prev, &unchanged_set));
        assert!(should_update(&prev, &changed));
        assert_eq!(view(&prev), view(&same_root));
    }

    #[test]
    fn test_draw_open_pair() {
        let lines = draw(&view(&open()));
        let label_row = lines
            .iter()
            .find(|line| line.contains(A))
            .expect("first candidate drawn");
        assert!(label_row.contains(B));
        assert!(label_row.find(A) < label_row.find(B));
    }

    #[test]
    fn test_draw_voted_marker() {
        let view = view(&open().with_has_voted(B));
        let lines = draw(&view);
        let label_row = lines.iter().find(|line| line.contains(A)).unwrap();
        assert_eq!(view.controls()[1].label(), format!("{} {}", B, VOTED_LABEL));
        assert!(label_row.contains(&view.controls()[1].label()));
        assert_eq!(label_row.matches("Voted").count(), 1);
    }

    #[test]
    fn test_draw_winner() {
        let view = view(&open().with_winner(A));
        let text = view.winner_text().unwrap();
        let lines = draw(&view);
        assert_eq!(text, "Trainspotting gets my vote");
        assert!(lines.iter().any(|line| line.contains(&text)));
        assert!(!lines.iter().any(|line| line.contains(B)));
    }

    #[test]
    fn test_draw_empty() {
        let lines = draw(&VotingView::Empty);
        assert!(lines.iter().any(|line| line.contains(EMPTY_MESSAGE)));
    }

    #[test]
    fn test_control_areas_split_side_by_side() {
        let area = Rect::new(0, 0, 41, 9);
        let rects = control_areas(area, 2);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].height, 3);
        assert!(rects[0].right() <= rects[1].x);
        assert!(control_areas(area, 0).is_empty());
    }
}
