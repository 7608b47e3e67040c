use super::*;
use crate::{CardKind, RefillReport};
use log::{debug, warn};

impl HandManager {
    /// Starts a fresh game: both decks are rebuilt and shuffled, the hand is
    /// dealt to its target size and the arithmetic holder is filled.
    pub fn start(&mut self, observer: &mut impl TableObserver) -> Result<(), HandError> {
        self.ids = CardIds::default();
        let mut deck = Deck::initialize(DeckKind::Regular, &self.config, &mut self.ids)?;
        deck.shuffle(&mut self.rng);
        let mut arithmetic = Deck::initialize(DeckKind::Arithmetic, &self.config, &mut self.ids)?;
        arithmetic.shuffle(&mut self.rng);
        self.begin(deck, arithmetic, observer);
        Ok(())
    }

    /// Starts a game with both decks in the given order, top card first. No
    /// shuffle happens, which makes replays and scripted tables reproducible.
    /// Every entry is checked before the table is touched.
    pub fn start_stacked(
        &mut self,
        regular: Vec<CardKind>,
        arithmetic: Vec<CardKind>,
        observer: &mut impl TableObserver,
    ) -> Result<(), HandError> {
        let regular = checked_kinds(DeckKind::Regular, regular)?;
        let arithmetic = checked_kinds(DeckKind::Arithmetic, arithmetic)?;
        self.ids = CardIds::default();
        let mut deck = Deck::empty(DeckKind::Regular);
        for kind in regular {
            deck.draw.push(Card::new(self.ids.alloc(), kind));
        }
        let mut ops = Deck::empty(DeckKind::Arithmetic);
        for kind in arithmetic {
            ops.draw.push(Card::new(self.ids.alloc(), kind));
        }
        self.begin(deck, ops, observer);
        Ok(())
    }

    fn begin(&mut self, deck: Deck, arithmetic: Deck, observer: &mut impl TableObserver) {
        self.deck = deck;
        self.slots.clear();
        self.arithmetic.reset(arithmetic);
        self.phase = HandPhase::Idle;
        self.hovered = None;
        self.pending = None;
        self.last_played.clear();

        self.fill_hand(observer);
        self.refill_arithmetic(observer);
    }

    /// Draws until the hand reaches its target size or the deck runs dry.
    pub(super) fn fill_hand(&mut self, observer: &mut impl TableObserver) -> RefillReport {
        let needed = self.config.hand_size.saturating_sub(self.slots.len());
        let mut remaining = needed;
        let mut recycled = 0;
        while remaining > 0 {
            if self.deck.is_empty() && self.config.reshuffle_discards {
                let moved = self.deck.reshuffle_discard(&mut self.rng);
                if moved > 0 && !self.last_played.is_empty() {
                    // the played area only ever holds cards out of circulation
                    debug!("recycled {moved} discards, clearing played area");
                    self.last_played.clear();
                }
                recycled += moved;
            }
            let drawn = self.deck.draw_up_to(remaining);
            if drawn.is_empty() {
                break;
            }
            remaining -= drawn.len();
            for card in drawn {
                debug!("drew {card} ({})", card.id);
                let index = self.slots.len();
                self.slots.push(HandSlot::new(card, index));
            }
        }
        let report = RefillReport {
            deck: DeckKind::Regular,
            drawn: needed - remaining,
            short_by: remaining,
            recycled,
        };
        if report.exhausted() {
            warn!(
                "regular deck exhausted, hand is {} short of {}",
                report.short_by, self.config.hand_size
            );
            observer.report_deck_empty(DeckKind::Regular);
        }
        self.publish_hand(observer);
        report
    }

    pub(super) fn refill_arithmetic(&mut self, observer: &mut impl TableObserver) -> RefillReport {
        let report = self.arithmetic.refill();
        if report.exhausted() {
            warn!("arithmetic deck exhausted");
            observer.report_deck_empty(DeckKind::Arithmetic);
        }
        observer.on_arithmetic_changed(self.arithmetic.slots());
        report
    }
}

/// Rebuilds each kind through its validating constructor and rejects cards
/// that belong to the other deck.
fn checked_kinds(deck: DeckKind, kinds: Vec<CardKind>) -> Result<Vec<CardKind>, HandError> {
    kinds
        .into_iter()
        .enumerate()
        .map(|(index, kind)| match (deck, kind) {
            (DeckKind::Regular, CardKind::Regular { suit, rank }) => {
                Ok(CardKind::regular(suit, rank)?)
            }
            (DeckKind::Arithmetic, CardKind::Arithmetic { op, operand }) => {
                Ok(CardKind::arithmetic(op, operand)?)
            }
            _ => Err(HandError::MisplacedCard { deck, index }),
        })
        .collect()
}
