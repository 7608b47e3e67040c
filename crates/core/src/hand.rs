use crate::{
    ArithmeticHolder, Card, CardError, CardId, CardIds, ConfigError, Deck, DeckError, DeckKind,
    RngState, TableConfig, TableObserver,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

mod deal;
mod drag;
mod play;
mod select;

pub use drag::SwapReport;
pub use play::{PlayOutcome, SequencePlay};

#[derive(Debug, Error)]
pub enum HandError {
    #[error("select at least {required} cards (got {selected})")]
    InsufficientSelection { selected: usize, required: usize },
    #[error("selected cards do not form any sequence")]
    InvalidPattern,
    #[error("a play is already resolving")]
    ConcurrentPlayRejected,
    #[error("invalid phase: {0:?}")]
    InvalidPhase(HandPhase),
    #[error("entry {index} does not belong in the {deck:?} deck")]
    MisplacedCard { deck: DeckKind, index: usize },
    #[error("card {0} is not on the table")]
    UnknownCard(CardId),
    #[error("nothing is pending")]
    NothingPending,
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("card error: {0}")]
    Card(#[from] CardError),
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandPhase {
    Idle,
    Dragging { focus: CardId },
    Resolving,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SwapDirection {
    Left,
    Right,
}

/// Where a released slot comes to rest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Settle {
    Base,
    Raised,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSlot {
    pub card: Card,
    pub selected: bool,
    pub visual_index: usize,
}

impl HandSlot {
    pub fn new(card: Card, visual_index: usize) -> Self {
        Self {
            card,
            selected: false,
            visual_index,
        }
    }

    pub fn settle(&self) -> Settle {
        if self.selected {
            Settle::Raised
        } else {
            Settle::Base
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    Replenish { played: Vec<CardId> },
    RefillArithmetic,
}

/// Follow-up work committed by a play. The delay is cosmetic; the
/// continuation runs to completion once resumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub delay: Duration,
    pub continuation: Continuation,
}

#[derive(Debug)]
pub struct HandManager {
    config: TableConfig,
    rng: RngState,
    ids: CardIds,
    deck: Deck,
    slots: Vec<HandSlot>,
    arithmetic: ArithmeticHolder,
    phase: HandPhase,
    hovered: Option<CardId>,
    pending: Option<ScheduledTask>,
    last_played: Vec<Card>,
}

impl HandManager {
    pub fn new(config: TableConfig, seed: u64) -> Result<Self, HandError> {
        config.validate()?;
        let arithmetic = ArithmeticHolder::new(config.arithmetic_slots);
        Ok(Self {
            config,
            rng: RngState::from_seed(seed),
            ids: CardIds::default(),
            deck: Deck::empty(DeckKind::Regular),
            slots: Vec::new(),
            arithmetic,
            phase: HandPhase::Idle,
            hovered: None,
            pending: None,
            last_played: Vec::new(),
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn slots(&self) -> &[HandSlot] {
        &self.slots
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn arithmetic(&self) -> &ArithmeticHolder {
        &self.arithmetic
    }

    pub fn phase(&self) -> HandPhase {
        self.phase
    }

    pub fn pending(&self) -> Option<&ScheduledTask> {
        self.pending.as_ref()
    }

    pub fn hovered(&self) -> Option<CardId> {
        self.hovered
    }

    pub fn last_played(&self) -> &[Card] {
        &self.last_played
    }

    pub fn slot(&self, id: CardId) -> Option<&HandSlot> {
        self.slots.iter().find(|slot| slot.card.id == id)
    }

    /// Selected hand slots in board order, left to right.
    pub fn selected_slots(&self) -> Vec<HandSlot> {
        let mut selected: Vec<HandSlot> =
            self.slots.iter().filter(|slot| slot.selected).copied().collect();
        selected.sort_by_key(|slot| slot.visual_index);
        selected
    }

    fn position_of(&self, id: CardId) -> Result<usize, HandError> {
        self.slots
            .iter()
            .position(|slot| slot.card.id == id)
            .ok_or(HandError::UnknownCard(id))
    }

    fn ensure_accepting_input(&self) -> Result<(), HandError> {
        if self.phase == HandPhase::Resolving {
            return Err(HandError::InvalidPhase(self.phase));
        }
        Ok(())
    }

    fn refresh_visual_indices(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.visual_index = index;
        }
    }

    fn publish_hand(&mut self, observer: &mut impl TableObserver) {
        self.refresh_visual_indices();
        observer.on_hand_changed(&self.slots);
    }
}
