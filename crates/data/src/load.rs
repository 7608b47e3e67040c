use anyhow::{bail, Context};
use seqdeck_core::{ArithmeticOp, CardKind, Suit, TableConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const TABLE_CONFIG_FILE: &str = "table.json";

/// Loads `table.json` from `dir`. A missing file means the stock table.
pub fn load_table_config(dir: &Path) -> anyhow::Result<TableConfig> {
    let path = dir.join(TABLE_CONFIG_FILE);
    if !path.exists() {
        return Ok(TableConfig::default());
    }
    let config: TableConfig = load_json(&path)?;
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn parse_table_config(raw: &str) -> anyhow::Result<TableConfig> {
    let config: TableConfig = serde_json::from_str(raw).context("parse table config")?;
    config.validate().context("validate table config")?;
    Ok(config)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawCard {
    Regular { suit: Suit, rank: u8 },
    Arithmetic { op: ArithmeticOp, operand: u8 },
}

#[derive(Debug, Clone, Deserialize)]
struct RawStackedDeck {
    #[serde(default)]
    regular: Vec<RawCard>,
    #[serde(default)]
    arithmetic: Vec<RawCard>,
}

/// Deck order for a scripted table, top card first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackedDeck {
    pub regular: Vec<CardKind>,
    pub arithmetic: Vec<CardKind>,
}

pub fn load_stacked_deck(path: &Path) -> anyhow::Result<StackedDeck> {
    let raw: RawStackedDeck = load_json(path)?;
    stacked_from_raw(raw).with_context(|| format!("validate {}", path.display()))
}

pub fn parse_stacked_deck(raw: &str) -> anyhow::Result<StackedDeck> {
    let raw: RawStackedDeck = serde_json::from_str(raw).context("parse stacked deck")?;
    stacked_from_raw(raw)
}

fn stacked_from_raw(raw: RawStackedDeck) -> anyhow::Result<StackedDeck> {
    let mut deck = StackedDeck::default();
    for (index, card) in raw.regular.into_iter().enumerate() {
        match card {
            RawCard::Regular { suit, rank } => deck.regular.push(
                CardKind::regular(suit, rank).with_context(|| format!("regular[{index}]"))?,
            ),
            RawCard::Arithmetic { .. } => bail!("regular[{index}] is an arithmetic card"),
        }
    }
    for (index, card) in raw.arithmetic.into_iter().enumerate() {
        match card {
            RawCard::Arithmetic { op, operand } => deck.arithmetic.push(
                CardKind::arithmetic(op, operand)
                    .with_context(|| format!("arithmetic[{index}]"))?,
            ),
            RawCard::Regular { .. } => bail!("arithmetic[{index}] is a regular card"),
        }
    }
    Ok(deck)
}

pub fn normalize_locale(locale: Option<&str>) -> String {
    let raw = locale.unwrap_or("en_US").trim();
    if raw.is_empty() {
        return "en_US".to_string();
    }
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "zh" | "zh_cn" | "zh_hans" | "zh_hans_cn" => "zh_CN".to_string(),
        "en" | "en_us" => "en_US".to_string(),
        _ => raw.replace('-', "_"),
    }
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_table_config(r#"{ "hand_size": 8 }"#).expect("parse");
        assert_eq!(config.hand_size, 8);
        assert_eq!(config.min_play, 3);
        assert_eq!(config.arithmetic_deck_len(), 15);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = parse_table_config(r#"{ "min_play": 0 }"#).unwrap_err();
        assert!(format!("{err:#}").contains("minimum play"));
    }

    #[test]
    fn stacked_deck_checks_card_kinds() {
        let deck = parse_stacked_deck(
            r#"{
                "regular": [{ "suit": "Hearts", "rank": 12 }],
                "arithmetic": [{ "op": "add", "operand": 3 }]
            }"#,
        )
        .expect("parse");
        assert_eq!(deck.regular, vec![CardKind::Regular { suit: Suit::Hearts, rank: 12 }]);
        assert_eq!(
            deck.arithmetic,
            vec![CardKind::Arithmetic { op: ArithmeticOp::Add, operand: 3 }]
        );

        let err = parse_stacked_deck(r#"{ "regular": [{ "suit": "Clubs", "rank": 14 }] }"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("regular[0]"));
        assert!(parse_stacked_deck(r#"{ "regular": [{ "op": "multiply", "operand": 2 }] }"#)
            .is_err());
    }

    #[test]
    fn locale_aliases() {
        assert_eq!(normalize_locale(Some("zh-cn")), "zh_CN");
        assert_eq!(normalize_locale(None), "en_US");
        assert_eq!(normalize_locale(Some("  ")), "en_US");
    }
}
