//! Rule engine for the sequence card table. Keep this crate free of IO and
//! platform concerns; presentation talks to it through [`TableObserver`].

pub mod arithmetic;
pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod hand;
pub mod rng;
pub mod sequence;

pub use arithmetic::*;
pub use cards::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use hand::*;
pub use rng::*;
pub use sequence::*;
