use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    deck::{Card, CardSource, InfiniteShoe},
    hand::{compute_score, Hand, Role},
    outcome::{check_winner, Outcome, DEALER_STANDS_ON},
};

fn default_auto_start() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_auto_start")]
    pub auto_start: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        RoundConfig {
            seed: None,
            debug: false,
            auto_start: default_auto_start(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    NotStarted,
    PlayerTurn,
    DealerTurn,
    RoundOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::NotStarted => "not started",
            Phase::PlayerTurn => "player turn",
            Phase::DealerTurn => "dealer turn",
            Phase::RoundOver => "round over",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Hit,
    Stand,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Start => "start",
            Action::Hit => "hit",
            Action::Stand => "stand",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundError {
    InvalidAction { action: Action, phase: Phase },
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundError::InvalidAction { action, phase } => {
                write!(f, "cannot {action} during {phase}")
            }
        }
    }
}

impl Error for RoundError {}

/// Everything one round needs. Scores are cached next to their hands and
/// refreshed on every draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    phase: Phase,
    player: Hand,
    dealer: Hand,
    player_score: u32,
    dealer_score: u32,
    dealer_revealed: bool,
    outcome: Option<Outcome>,
    round_number: u32,
}

impl RoundState {
    fn new(round_number: u32) -> Self {
        RoundState {
            phase: Phase::NotStarted,
            player: Hand::new(Role::Player),
            dealer: Hand::new(Role::Dealer),
            player_score: 0,
            dealer_score: 0,
            dealer_revealed: false,
            outcome: None,
            round_number,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    /// Full dealer total, hole card included.
    pub fn dealer_score(&self) -> u32 {
        self.dealer_score
    }

    pub fn dealer_revealed(&self) -> bool {
        self.dealer_revealed
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Dealer cards as the table shows them: the hole card is `None` until
    /// the player stands.
    pub fn visible_dealer_cards(&self) -> Vec<Option<Card>> {
        self.dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(i, card)| {
                if self.dealer_revealed || i == 0 {
                    Some(*card)
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn visible_dealer_score(&self) -> u32 {
        if self.dealer_revealed {
            self.dealer_score
        } else {
            compute_score(&self.dealer.cards()[..self.dealer.len().min(1)])
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            player_cards: self.player.cards().to_vec(),
            dealer_cards: self.visible_dealer_cards(),
            player_score: self.player_score,
            player_soft: self.player.is_soft(),
            dealer_score: self.visible_dealer_score(),
            dealer_revealed: self.dealer_revealed,
            outcome: self.outcome.map(|o| o.label()).unwrap_or(""),
            round_number: self.round_number,
        }
    }
}

/// What the page renders after each action.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Option<Card>>,
    pub player_score: u32,
    pub player_soft: bool,
    pub dealer_score: u32,
    pub dealer_revealed: bool,
    pub outcome: &'static str,
    pub round_number: u32,
}

impl RoundSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn soft_suffix(hand: &Hand) -> &'static str {
    if hand.is_soft() {
        " (soft)"
    } else {
        ""
    }
}

pub struct RoundEngine<S: CardSource = InfiniteShoe> {
    source: S,
    state: RoundState,
    debug: bool,
}

impl RoundEngine<InfiniteShoe> {
    pub fn from_config(config: &RoundConfig) -> Self {
        let mut engine = RoundEngine::with_source(InfiniteShoe::new(config.seed));
        engine.debug = config.debug;
        if config.auto_start {
            engine.deal();
        }
        engine
    }
}

impl<S: CardSource> RoundEngine<S> {
    pub fn with_source(source: S) -> Self {
        RoundEngine {
            source,
            state: RoundState::new(0),
            debug: false,
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Deals the first round. Once a round is dealt and still untouched
    /// (as right after `restart`) this leaves it as it is.
    pub fn start_round(&mut self) -> Result<&RoundState, RoundError> {
        if self.state.phase == Phase::PlayerTurn
            && self.state.outcome.is_none()
            && self.state.player.len() == 2
        {
            return Ok(&self.state);
        }
        self.require(Action::Start, &[Phase::NotStarted])?;
        self.deal();
        Ok(&self.state)
    }

    pub fn player_hit(&mut self) -> Result<&RoundState, RoundError> {
        self.require(Action::Hit, &[Phase::PlayerTurn])?;

        let card = self.source.draw_card();
        self.state.player.push(card);
        self.state.player_score = self.state.player.score();
        self.state.outcome = check_winner(self.state.player_score, self.state.dealer_score);
        if self.debug {
            console_log!(
                "round {}: player hits {card}, score {}",
                self.state.round_number,
                self.state.player_score
            );
        }

        if self.state.outcome.is_some() {
            self.finish();
        }
        Ok(&self.state)
    }

    pub fn dealer_play(&mut self) -> Result<&RoundState, RoundError> {
        self.require(Action::Stand, &[Phase::PlayerTurn, Phase::DealerTurn])?;

        self.state.phase = Phase::DealerTurn;
        self.state.dealer_revealed = true;
        if self.debug {
            console_log!(
                "round {}: player stands on {}{}, dealer shows {}{}",
                self.state.round_number,
                self.state.player_score,
                soft_suffix(&self.state.player),
                self.state.dealer_score,
                soft_suffix(&self.state.dealer)
            );
        }

        // Stands on every 17, soft or hard.
        while self.state.dealer_score < DEALER_STANDS_ON {
            let card = self.source.draw_card();
            self.state.dealer.push(card);
            self.state.dealer_score = self.state.dealer.score();
            if self.debug {
                console_log!(
                    "round {}: dealer draws {card}, score {}{}",
                    self.state.round_number,
                    self.state.dealer_score,
                    soft_suffix(&self.state.dealer)
                );
            }
        }

        self.state.outcome = check_winner(self.state.player_score, self.state.dealer_score);
        self.finish();
        Ok(&self.state)
    }

    /// Throws the current round away, whatever phase it is in, and deals a
    /// new one.
    pub fn restart(&mut self) -> &RoundState {
        self.state = RoundState::new(self.state.round_number);
        self.deal();
        &self.state
    }

    fn require(&self, action: Action, allowed: &[Phase]) -> Result<(), RoundError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(RoundError::InvalidAction {
                action,
                phase: self.state.phase,
            })
        }
    }

    fn deal(&mut self) {
        let round_number = self.state.round_number + 1;
        let mut state = RoundState::new(round_number);

        for _ in 0..2 {
            state.player.push(self.source.draw_card());
        }
        // Second dealer card is the hole card.
        for _ in 0..2 {
            state.dealer.push(self.source.draw_card());
        }
        state.player_score = state.player.score();
        state.dealer_score = state.dealer.score();
        state.phase = Phase::PlayerTurn;
        self.state = state;

        if self.debug {
            let player: Vec<String> = self.state.player.cards().iter().map(Card::to_string).collect();
            console_log!(
                "round {}: player dealt {} ({}), dealer shows {}",
                round_number,
                player.join(" "),
                self.state.player_score,
                self.state.dealer.cards()[0]
            );
        }
    }

    fn finish(&mut self) {
        self.state.phase = Phase::RoundOver;
        if self.debug {
            if let Some(outcome) = self.state.outcome {
                console_log!("round {}: {outcome}", self.state.round_number);
            }
        }
    }
}
