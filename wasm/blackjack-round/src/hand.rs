use crate::deck::Card;

pub const BLACKJACK: u32 = 21;

/// Returns the best total for `cards` and whether an ace is still counted
/// as 11 in it.
pub fn hand_value(cards: &[Card]) -> (u32, bool) {
    let mut total: u32 = 0;
    let mut aces = 0;

    for card in cards {
        total += u32::from(card.value());
        if card.is_ace() {
            aces += 1;
        }
    }

    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    (total, aces > 0)
}

pub fn compute_score(cards: &[Card]) -> u32 {
    hand_value(cards).0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Player,
    Dealer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hand {
    pub role: Role,
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(role: Role) -> Self {
        Hand {
            role,
            cards: Vec::new(),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> u32 {
        compute_score(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        hand_value(&self.cards).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&r| Card::new(r, Suit::Clubs)).collect()
    }

    #[test]
    fn empty_hand_scores_zero() {
        assert_eq!(compute_score(&[]), 0);
        assert_eq!(hand_value(&[]), (0, false));
    }

    #[test]
    fn ace_and_ten_value_is_blackjack() {
        for ten in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(compute_score(&cards(&[Rank::Ace, ten])), 21);
            assert_eq!(compute_score(&cards(&[ten, Rank::Ace])), 21);
        }
    }

    #[test]
    fn two_aces_score_twelve() {
        assert_eq!(hand_value(&cards(&[Rank::Ace, Rank::Ace])), (12, true));
    }

    #[test]
    fn four_aces_score_fourteen() {
        let hand = cards(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace]);
        assert_eq!(compute_score(&hand), 14);
    }

    #[test]
    fn aces_downgrade_only_when_needed() {
        assert_eq!(hand_value(&cards(&[Rank::Ace, Rank::Six])), (17, true));
        assert_eq!(hand_value(&cards(&[Rank::Ace, Rank::Six, Rank::Nine])), (16, false));
        assert_eq!(compute_score(&cards(&[Rank::King, Rank::Queen, Rank::Five])), 25);
    }

    #[test]
    fn large_hands_are_not_clamped() {
        let kings = vec![Card::new(Rank::King, Suit::Hearts); 30];
        assert_eq!(compute_score(&kings), 300);

        let aces = vec![Card::new(Rank::Ace, Suit::Spades); 24];
        assert_eq!(hand_value(&aces), (24, false));
    }

    #[test]
    fn hand_tracks_role_and_growth() {
        let mut hand = Hand::new(Role::Dealer);
        assert!(hand.is_empty());
        hand.push(Card::new(Rank::King, Suit::Hearts));
        hand.push(Card::new(Rank::Queen, Suit::Hearts));
        hand.push(Card::new(Rank::Two, Suit::Hearts));
        assert_eq!(hand.len(), 3);
        assert_eq!(hand.role, Role::Dealer);
        assert_eq!(hand.score(), 22);
        assert!(!hand.is_soft());

        let mut soft = Hand::new(Role::Dealer);
        soft.push(Card::new(Rank::Ace, Suit::Clubs));
        soft.push(Card::new(Rank::Six, Suit::Clubs));
        assert!(soft.is_soft());
    }
}
