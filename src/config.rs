// Board configuration, read from the environment at startup.
//
// `.env` is loaded by main before this runs. Every variable is optional;
// unset ones fall back to the defaults of the chosen board kind.

use crate::core::filter::{LeetTable, DEFAULT_BANNED_WORDS};
use crate::core::moderation::ModerationConfig;
use crate::core::voting::{BallotKind, ListOrder, PercentPolicy, VotingConfig};
use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use std::fmt::Display;
use std::str::FromStr;

const IDEA_SEEDS: &[&str] = &[
    "Safe bike routes to schools, groceries, and work; not just recreational greenways",
    "Littleton should not have any bike lanes unless they are warranted",
];

const FOOD_SEEDS: &[&str] = &[
    "Angelo's Taverna - Littleton",
    "ViewHouse",
    "Smokin Fins - Littleton",
    "Manning's Steaks & Spirits",
    "Farm House Restaurant at Breckenridge Brewery",
    "Grande Station",
    "Cafe Terracotta",
    "Ninja Sushi",
];

/// Which board this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    Ideas,
    Food,
}

impl BoardKind {
    pub fn default_port(&self) -> u16 {
        match self {
            BoardKind::Ideas => 3000,
            BoardKind::Food => 3001,
        }
    }

    pub fn default_order(&self) -> ListOrder {
        match self {
            BoardKind::Ideas => ListOrder::Insertion,
            BoardKind::Food => ListOrder::MostVotes,
        }
    }

    pub fn seeds(&self) -> &'static [&'static str] {
        match self {
            BoardKind::Ideas => IDEA_SEEDS,
            BoardKind::Food => FOOD_SEEDS,
        }
    }

    /// Route for listing and submitting items.
    pub fn items_path(&self) -> &'static str {
        match self {
            BoardKind::Ideas => "/api/ideas",
            BoardKind::Food => "/api/food",
        }
    }

    pub fn vote_path(&self) -> &'static str {
        match self {
            BoardKind::Ideas => "/api/vote",
            BoardKind::Food => "/api/food/vote",
        }
    }

    pub fn reset_personal_path(&self) -> &'static str {
        match self {
            BoardKind::Ideas => "/api/resetPersonal",
            BoardKind::Food => "/api/food/resetPersonal",
        }
    }

    pub fn reset_all_path(&self) -> &'static str {
        match self {
            BoardKind::Ideas => "/api/reset",
            BoardKind::Food => "/api/food/reset",
        }
    }

    /// What an item is called in error messages.
    pub fn item_noun(&self) -> &'static str {
        match self {
            BoardKind::Ideas => "idea",
            BoardKind::Food => "suggestion",
        }
    }
}

impl FromStr for BoardKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ideas" => Ok(BoardKind::Ideas),
            "food" => Ok(BoardKind::Food),
            other => Err(anyhow!("expected `ideas` or `food`, got {other:?}")),
        }
    }
}

pub struct BoardConfig {
    pub kind: BoardKind,
    pub port: u16,
    pub moderation: ModerationConfig,
    pub voting: VotingConfig,
    pub banned_words: Vec<String>,
    pub leet_table: LeetTable,
    pub admin_reset_enabled: bool,
}

impl BoardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind: BoardKind = load(&lookup, "BOARD_KIND", BoardKind::Ideas)?;
        let port = load(&lookup, "PORT", kind.default_port())?;

        let ban_window_secs: u32 = load(&lookup, "BAN_WINDOW_SECS", 600)?;
        let moderation = ModerationConfig {
            ban_window: Duration::seconds(i64::from(ban_window_secs)),
        };

        let voting = VotingConfig {
            ballot: load(&lookup, "BALLOT", BallotKind::WithPass)?,
            percent: load(&lookup, "PERCENT_POLICY", PercentPolicy::Independent)?,
            order: load(&lookup, "LIST_ORDER", kind.default_order())?,
        };

        let banned_words = match lookup("BANNED_WORDS") {
            Some(raw) => raw
                .split(',')
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
            None => DEFAULT_BANNED_WORDS.iter().map(|w| w.to_string()).collect(),
        };

        let leet_table = match lookup("LEET_TABLE_FILE") {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read leet table from {path}"))?;
                LeetTable::from_json(&raw)
                    .with_context(|| format!("Failed to parse leet table in {path}"))?
            }
            None => LeetTable::default(),
        };

        let admin_reset_enabled = load(
            &lookup,
            "ADMIN_RESET_ENABLED",
            kind == BoardKind::Ideas,
        )?;

        Ok(Self {
            kind,
            port,
            moderation,
            voting,
            banned_words,
            leet_table,
            admin_reset_enabled,
        })
    }
}

fn load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow!("Invalid {key} value {raw:?}: {e}")),
        None => {
            tracing::info!("{key} not set, using default: {default:?}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BoardConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BoardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_are_ideas_board() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.kind, BoardKind::Ideas);
        assert_eq!(config.port, 3000);
        assert_eq!(config.moderation.ban_window, Duration::minutes(10));
        assert_eq!(config.voting.ballot, BallotKind::WithPass);
        assert_eq!(config.voting.percent, PercentPolicy::Independent);
        assert_eq!(config.voting.order, ListOrder::Insertion);
        assert_eq!(config.banned_words.len(), DEFAULT_BANNED_WORDS.len());
        assert!(config.admin_reset_enabled);
    }

    #[test]
    fn test_food_board_defaults() {
        let config = config_from(&[("BOARD_KIND", "food")]).unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.voting.order, ListOrder::MostVotes);
        assert!(!config.admin_reset_enabled);
        assert_eq!(config.kind.seeds().len(), 8);
        assert_eq!(config.kind.vote_path(), "/api/food/vote");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("BAN_WINDOW_SECS", "30"),
            ("BALLOT", "agree_disagree"),
            ("PERCENT_POLICY", "complement"),
            ("LIST_ORDER", "ranked"),
            ("BANNED_WORDS", "heck, darn ,,"),
            ("ADMIN_RESET_ENABLED", "false"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.moderation.ban_window, Duration::seconds(30));
        assert_eq!(config.voting.ballot, BallotKind::AgreeDisagree);
        assert_eq!(config.voting.percent, PercentPolicy::Complement);
        assert_eq!(config.voting.order, ListOrder::Ranked);
        assert_eq!(config.banned_words, vec!["heck", "darn"]);
        assert!(!config.admin_reset_enabled);
    }

    #[test]
    fn test_bad_values_fail() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("BOARD_KIND", "movies")]).is_err());
        assert!(config_from(&[("LIST_ORDER", "random")]).is_err());
        assert!(config_from(&[("LEET_TABLE_FILE", "/definitely/not/here.json")]).is_err());
    }
}
