//! Loading and validation of table configuration and scripted decks.

pub mod load;

pub use load::*;
