use crate::{Card, CardId, CardKind, Deck, DeckKind, HandSlot, MAX_RANK, MIN_RANK};
use log::debug;
use serde::{Deserialize, Serialize};

/// Maps any integer onto the cyclic rank space: 14 becomes 1, 0 becomes 13.
pub fn normalize_rank(value: i64) -> u8 {
    let span = i128::from(MAX_RANK - MIN_RANK + 1);
    let wrapped = (i128::from(value) - i128::from(MIN_RANK)).rem_euclid(span);
    // wrapped < 13, so this always fits
    (wrapped as u8) + MIN_RANK
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankChange {
    pub card: CardId,
    pub from: u8,
    pub raw: i64,
    pub to: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformReport {
    pub operator: Option<Card>,
    pub changes: Vec<RankChange>,
    pub skipped: Vec<CardId>,
}

/// Applies an arithmetic card to every regular target. Targets that are not
/// regular cards are skipped; a non-arithmetic operator changes nothing.
pub fn apply_arithmetic<'a, I>(operator: &Card, targets: I) -> TransformReport
where
    I: IntoIterator<Item = &'a mut Card>,
{
    let CardKind::Arithmetic { op, operand } = operator.kind else {
        return TransformReport::default();
    };
    let mut report = TransformReport {
        operator: Some(*operator),
        ..TransformReport::default()
    };
    for target in targets {
        let id = target.id;
        let CardKind::Regular { rank, .. } = &mut target.kind else {
            debug!("skipping non-regular arithmetic target {id}");
            report.skipped.push(id);
            continue;
        };
        let raw = op.apply(i64::from(*rank), i64::from(operand));
        let to = normalize_rank(raw);
        report.changes.push(RankChange {
            card: id,
            from: *rank,
            raw,
            to,
        });
        *rank = to;
    }
    report
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefillReport {
    pub deck: DeckKind,
    pub drawn: usize,
    pub short_by: usize,
    pub recycled: usize,
}

impl RefillReport {
    pub fn exhausted(&self) -> bool {
        self.short_by > 0
    }
}

/// The face-up arithmetic cards and the deck that feeds them.
#[derive(Debug, Clone)]
pub struct ArithmeticHolder {
    deck: Deck,
    slots: Vec<HandSlot>,
    capacity: usize,
}

impl ArithmeticHolder {
    pub fn new(capacity: usize) -> Self {
        Self {
            deck: Deck::empty(DeckKind::Arithmetic),
            slots: Vec::new(),
            capacity,
        }
    }

    pub fn reset(&mut self, deck: Deck) {
        self.deck = deck;
        self.slots.clear();
    }

    pub fn slots(&self) -> &[HandSlot] {
        &self.slots
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.slots.iter().any(|slot| slot.card.id == id)
    }

    pub fn selected(&self) -> Option<&HandSlot> {
        self.slots.iter().find(|slot| slot.selected)
    }

    /// Flips selection of one card and clears the others, so at most one
    /// arithmetic card is ever selected.
    pub fn toggle(&mut self, id: CardId) -> Option<bool> {
        let position = self.slots.iter().position(|slot| slot.card.id == id)?;
        let selected = !self.slots[position].selected;
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            slot.selected = idx == position && selected;
        }
        Some(selected)
    }

    pub fn deselect_all(&mut self) {
        for slot in &mut self.slots {
            slot.selected = false;
        }
    }

    pub fn consume(&mut self, id: CardId) -> Option<Card> {
        let position = self.slots.iter().position(|slot| slot.card.id == id)?;
        let slot = self.slots.remove(position);
        self.reindex();
        Some(slot.card)
    }

    pub fn refill(&mut self) -> RefillReport {
        let needed = self.capacity.saturating_sub(self.slots.len());
        let drawn = self.deck.draw_up_to(needed);
        let count = drawn.len();
        for card in drawn {
            let index = self.slots.len();
            self.slots.push(HandSlot::new(card, index));
        }
        RefillReport {
            deck: DeckKind::Arithmetic,
            drawn: count,
            short_by: needed - count,
            recycled: 0,
        }
    }

    fn reindex(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.visual_index = index;
        }
    }
}
