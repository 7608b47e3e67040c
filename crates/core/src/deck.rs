use crate::{Card, CardError, CardIds, CardKind, RngState, Suit, TableConfig, MAX_RANK, MIN_RANK};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DeckKind {
    Regular,
    Arithmetic,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("{0:?} deck is empty")]
    Empty(DeckKind),
}

/// Draw pile plus discard pile. Cards are drawn from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    kind: DeckKind,
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn empty(kind: DeckKind) -> Self {
        Self {
            kind,
            draw: Vec::new(),
            discard: Vec::new(),
        }
    }

    pub fn initialize(
        kind: DeckKind,
        config: &TableConfig,
        ids: &mut CardIds,
    ) -> Result<Self, CardError> {
        match kind {
            DeckKind::Regular => Self::standard52(ids),
            DeckKind::Arithmetic => Self::arithmetic(config, ids),
        }
    }

    pub fn standard52(ids: &mut CardIds) -> Result<Self, CardError> {
        let mut draw = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in MIN_RANK..=MAX_RANK {
                draw.push(Card::new(ids.alloc(), CardKind::regular(suit, rank)?));
            }
        }
        Ok(Self {
            kind: DeckKind::Regular,
            draw,
            discard: Vec::new(),
        })
    }

    pub fn arithmetic(config: &TableConfig, ids: &mut CardIds) -> Result<Self, CardError> {
        let mut draw = Vec::with_capacity(config.arithmetic_deck_len());
        for entry in &config.arithmetic_deck {
            let kind = CardKind::arithmetic(entry.op, entry.operand)?;
            for _ in 0..entry.count {
                draw.push(Card::new(ids.alloc(), kind));
            }
        }
        Ok(Self {
            kind: DeckKind::Arithmetic,
            draw,
            discard: Vec::new(),
        })
    }

    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        if self.draw.is_empty() {
            return Err(DeckError::Empty(self.kind));
        }
        Ok(self.draw.remove(0))
    }

    /// Draws until `count` cards are taken or the draw pile runs out.
    pub fn draw_up_to(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.draw.len());
        self.draw.drain(..take).collect()
    }

    pub fn discard(&mut self, mut cards: Vec<Card>) {
        self.discard.append(&mut cards);
    }

    pub fn reshuffle_discard(&mut self, rng: &mut RngState) -> usize {
        if self.discard.is_empty() {
            return 0;
        }
        let moved = self.discard.len();
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_every_suit_rank_pair_once() {
        let mut ids = CardIds::default();
        let deck = Deck::standard52(&mut ids).unwrap();
        assert_eq!(deck.len(), 52);
        let faces: HashSet<(Suit, u8)> = deck
            .draw
            .iter()
            .filter_map(|card| Some((card.suit()?, card.rank()?)))
            .collect();
        assert_eq!(faces.len(), 52);
    }

    #[test]
    fn arithmetic_deck_follows_config() {
        let mut ids = CardIds::default();
        let deck = Deck::initialize(DeckKind::Arithmetic, &TableConfig::default(), &mut ids)
            .unwrap();
        assert_eq!(deck.len(), 15);
        assert!(deck.draw.iter().all(Card::is_arithmetic));
    }

    #[test]
    fn draw_takes_front_and_fails_when_empty() {
        let mut ids = CardIds::default();
        let mut deck = Deck::standard52(&mut ids).unwrap();
        let front = deck.draw[0];
        assert_eq!(deck.draw(), Ok(front));
        assert_eq!(deck.len(), 51);
        deck.draw_up_to(100);
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), Err(DeckError::Empty(DeckKind::Regular)));
    }

    #[test]
    fn reshuffle_moves_discards_back() {
        let mut ids = CardIds::default();
        let mut rng = RngState::from_seed(3);
        let mut deck = Deck::standard52(&mut ids).unwrap();
        let drawn = deck.draw_up_to(5);
        deck.discard(drawn);
        assert_eq!(deck.reshuffle_discard(&mut rng), 5);
        assert_eq!(deck.len(), 52);
        assert!(deck.discard.is_empty());
    }
}
