#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Render,

    /// The viewer picked a candidate. Fire-and-forget, no acknowledgement.
    Vote(String),
    ClearVote,
    DeclareWinner,
    SwapPair,

    BallotSelectNext,
    BallotSelectPrev,
}
