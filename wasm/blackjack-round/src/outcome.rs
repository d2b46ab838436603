use std::fmt;

use serde::{Serialize, Serializer};

use crate::hand::BLACKJACK;

/// The dealer stops drawing at this total, and comparisons only settle a
/// round once the dealer has reached it.
pub const DEALER_STANDS_ON: u32 = 17;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    PlayerBusts,
    DealerBusts,
    PlayerBlackjack,
    DealerBlackjack,
    PlayerWins,
    DealerWins,
    Tie,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::PlayerBusts => "Player Busts! Dealer Wins!",
            Outcome::DealerBusts => "Dealer Busts! Player Wins!",
            Outcome::PlayerBlackjack => "Blackjack! Player Wins!",
            Outcome::DealerBlackjack => "Blackjack! Dealer Wins!",
            Outcome::PlayerWins => "Player Wins!",
            Outcome::DealerWins => "Dealer Wins!",
            Outcome::Tie => "It's a Tie!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// First matching rule wins. Runs after every player hit as well as after
/// the dealer finishes, so the threshold guard on the comparisons keeps an
/// unfinished dealer hand from settling the round, except when the dealer's
/// opening two cards already total 17 or more.
pub fn check_winner(player_score: u32, dealer_score: u32) -> Option<Outcome> {
    let dealer_done = dealer_score >= DEALER_STANDS_ON;

    if player_score > BLACKJACK {
        Some(Outcome::PlayerBusts)
    } else if dealer_score > BLACKJACK {
        Some(Outcome::DealerBusts)
    } else if player_score == BLACKJACK {
        Some(Outcome::PlayerBlackjack)
    } else if dealer_score == BLACKJACK {
        Some(Outcome::DealerBlackjack)
    } else if player_score > dealer_score && dealer_done {
        Some(Outcome::PlayerWins)
    } else if dealer_score > player_score && dealer_done {
        Some(Outcome::DealerWins)
    } else if dealer_score == player_score && dealer_done {
        Some(Outcome::Tie)
    } else {
        None
    }
}
