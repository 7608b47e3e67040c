use crate::{Card, CardId, DeckKind, HandSlot, RankChange, SequenceSet, Settle, SwapDirection, Tier};
use serde::{Deserialize, Serialize};

/// What the text layer is told after a play attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Sequence(SequenceSet),
    Invalid,
    TooFew { selected: usize, required: usize },
}

/// Boundary to the presentation layer. Every hook defaults to a no-op so a
/// collaborator only implements what it renders.
pub trait TableObserver {
    fn on_hand_changed(&mut self, _slots: &[HandSlot]) {}

    fn on_arithmetic_changed(&mut self, _slots: &[HandSlot]) {}

    fn on_swap_cue(&mut self, _card: CardId, _direction: SwapDirection) {}

    fn on_slot_settled(&mut self, _card: CardId, _settle: Settle) {}

    fn on_rank_changed(&mut self, _change: &RankChange) {}

    fn emit_visual_effect(&mut self, _card: &Card, _tier: Tier) {}

    fn report_outcome(&mut self, _outcome: &Outcome) {}

    fn report_deck_empty(&mut self, _deck: DeckKind) {}
}

impl TableObserver for () {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    HandChanged { cards: Vec<CardId> },
    ArithmeticChanged { cards: Vec<CardId> },
    SwapCue { card: CardId, direction: SwapDirection },
    SlotSettled { card: CardId, settle: Settle },
    RankChanged(RankChange),
    VisualEffect { card: CardId, tier: Tier },
    Outcome(Outcome),
    DeckEmpty { deck: DeckKind },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn events(&self) -> &[Event] {
        &self.queue
    }
}

impl TableObserver for EventBus {
    fn on_hand_changed(&mut self, slots: &[HandSlot]) {
        let cards = slots.iter().map(|slot| slot.card.id).collect();
        self.push(Event::HandChanged { cards });
    }

    fn on_arithmetic_changed(&mut self, slots: &[HandSlot]) {
        let cards = slots.iter().map(|slot| slot.card.id).collect();
        self.push(Event::ArithmeticChanged { cards });
    }

    fn on_swap_cue(&mut self, card: CardId, direction: SwapDirection) {
        self.push(Event::SwapCue { card, direction });
    }

    fn on_slot_settled(&mut self, card: CardId, settle: Settle) {
        self.push(Event::SlotSettled { card, settle });
    }

    fn on_rank_changed(&mut self, change: &RankChange) {
        self.push(Event::RankChanged(*change));
    }

    fn emit_visual_effect(&mut self, card: &Card, tier: Tier) {
        self.push(Event::VisualEffect { card: card.id, tier });
    }

    fn report_outcome(&mut self, outcome: &Outcome) {
        self.push(Event::Outcome(outcome.clone()));
    }

    fn report_deck_empty(&mut self, deck: DeckKind) {
        self.push(Event::DeckEmpty { deck });
    }
}
