use crate::{ArithmeticOp, MIN_SEQUENCE_LEN};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("hand size must be at least 1")]
    ZeroHandSize,
    #[error("minimum play must be at least {required} (got {min_play})")]
    MinPlayTooSmall { min_play: usize, required: usize },
    #[error("medium tier threshold must be at least 1")]
    ZeroTierThreshold,
    #[error("arithmetic holder needs at least one slot")]
    ZeroArithmeticSlots,
    #[error("arithmetic deck entry {index} has a zero operand")]
    ZeroOperand { index: usize },
    #[error("arithmetic deck entry {index} has a zero count")]
    ZeroCount { index: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArithmeticEntry {
    pub op: ArithmeticOp,
    pub operand: u8,
    pub count: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub hand_size: usize,
    pub min_play: usize,
    pub medium_tier_threshold: usize,
    pub arithmetic_slots: usize,
    pub arithmetic_deck: Vec<ArithmeticEntry>,
    pub replenish_delay_ms: u64,
    pub arithmetic_settle_ms: u64,
    pub reshuffle_discards: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            hand_size: 10,
            min_play: 3,
            medium_tier_threshold: 3,
            arithmetic_slots: 1,
            arithmetic_deck: vec![
                ArithmeticEntry {
                    op: ArithmeticOp::Multiply,
                    operand: 2,
                    count: 5,
                },
                ArithmeticEntry {
                    op: ArithmeticOp::Add,
                    operand: 3,
                    count: 5,
                },
                ArithmeticEntry {
                    op: ArithmeticOp::Subtract,
                    operand: 2,
                    count: 5,
                },
            ],
            replenish_delay_ms: 200,
            arithmetic_settle_ms: 500,
            reshuffle_discards: false,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::ZeroHandSize);
        }
        // shorter plays would reach the classifier and read as invalid patterns
        if self.min_play < MIN_SEQUENCE_LEN {
            return Err(ConfigError::MinPlayTooSmall {
                min_play: self.min_play,
                required: MIN_SEQUENCE_LEN,
            });
        }
        if self.medium_tier_threshold == 0 {
            return Err(ConfigError::ZeroTierThreshold);
        }
        if self.arithmetic_slots == 0 {
            return Err(ConfigError::ZeroArithmeticSlots);
        }
        for (index, entry) in self.arithmetic_deck.iter().enumerate() {
            if entry.operand == 0 {
                return Err(ConfigError::ZeroOperand { index });
            }
            if entry.count == 0 {
                return Err(ConfigError::ZeroCount { index });
            }
        }
        Ok(())
    }

    pub fn replenish_delay(&self) -> Duration {
        Duration::from_millis(self.replenish_delay_ms)
    }

    pub fn arithmetic_settle(&self) -> Duration {
        Duration::from_millis(self.arithmetic_settle_ms)
    }

    pub fn arithmetic_deck_len(&self) -> usize {
        self.arithmetic_deck
            .iter()
            .map(|entry| usize::from(entry.count))
            .sum()
    }
}
