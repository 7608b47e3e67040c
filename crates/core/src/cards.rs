use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MIN_RANK: u8 = 1;
pub const MAX_RANK: u8 = 13;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("rank {0} out of range 1..=13")]
    RankOutOfRange(i64),
    #[error("operand must be positive")]
    ZeroOperand,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
}

impl ArithmeticOp {
    pub fn apply(self, value: i64, operand: i64) -> i64 {
        match self {
            ArithmeticOp::Add => value.saturating_add(operand),
            ArithmeticOp::Subtract => value.saturating_sub(operand),
            ArithmeticOp::Multiply => value.saturating_mul(operand),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            ArithmeticOp::Add => '+',
            ArithmeticOp::Subtract => '-',
            ArithmeticOp::Multiply => 'x',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out session-unique card ids. Both decks draw from one allocator so
/// no id is ever shared between them.
#[derive(Debug, Clone)]
pub struct CardIds {
    next: u32,
}

impl Default for CardIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl CardIds {
    pub fn alloc(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardKind {
    Regular { suit: Suit, rank: u8 },
    Arithmetic { op: ArithmeticOp, operand: u8 },
}

impl CardKind {
    pub fn regular(suit: Suit, rank: u8) -> Result<Self, CardError> {
        check_rank(i64::from(rank))?;
        Ok(CardKind::Regular { suit, rank })
    }

    pub fn arithmetic(op: ArithmeticOp, operand: u8) -> Result<Self, CardError> {
        if operand == 0 {
            return Err(CardError::ZeroOperand);
        }
        Ok(CardKind::Arithmetic { op, operand })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
}

impl Card {
    pub fn new(id: CardId, kind: CardKind) -> Self {
        Self { id, kind }
    }

    pub fn rank(&self) -> Option<u8> {
        match self.kind {
            CardKind::Regular { rank, .. } => Some(rank),
            CardKind::Arithmetic { .. } => None,
        }
    }

    pub fn suit(&self) -> Option<Suit> {
        match self.kind {
            CardKind::Regular { suit, .. } => Some(suit),
            CardKind::Arithmetic { .. } => None,
        }
    }

    pub fn is_regular(&self) -> bool {
        matches!(self.kind, CardKind::Regular { .. })
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self.kind, CardKind::Arithmetic { .. })
    }

    /// Replaces the rank of a regular card. Arithmetic cards have no rank and
    /// are left untouched.
    pub fn set_rank(&mut self, value: u8) -> Result<bool, CardError> {
        check_rank(i64::from(value))?;
        match &mut self.kind {
            CardKind::Regular { rank, .. } => {
                *rank = value;
                Ok(true)
            }
            CardKind::Arithmetic { .. } => Ok(false),
        }
    }

    pub fn name(&self) -> String {
        match self.kind {
            CardKind::Regular { suit, rank } => format!("{suit} {}", rank_label(rank)),
            CardKind::Arithmetic { op, operand } => format!("{}{operand}", op.symbol()),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

pub fn rank_label(rank: u8) -> String {
    match rank {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        other => other.to_string(),
    }
}

fn check_rank(rank: i64) -> Result<(), CardError> {
    if (i64::from(MIN_RANK)..=i64::from(MAX_RANK)).contains(&rank) {
        Ok(())
    } else {
        Err(CardError::RankOutOfRange(rank))
    }
}
