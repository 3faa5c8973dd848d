// Voting domain models - items, ledgers, and the stats derived from them.
//
// Counts are never stored. Every number here is computed from a ledger.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Per-item map from identity to the vote they cast.
pub type Ledger = HashMap<String, VoteType>;

/// A single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteType {
    Agree,
    Disagree,
    Pass,
}

impl VoteType {
    /// Parse the wire name of a vote. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "agree" => Some(VoteType::Agree),
            "disagree" => Some(VoteType::Disagree),
            "pass" => Some(VoteType::Pass),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Agree => "agree",
            VoteType::Disagree => "disagree",
            VoteType::Pass => "pass",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suggestion on the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub text: String,
    pub votes: Ledger,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            votes: Ledger::new(),
        }
    }
}

// ============================================================================
// DEPLOYMENT POLICIES
// ============================================================================

/// Error for policy names that don't match any variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} {value:?}")]
pub struct UnknownPolicy {
    pub kind: &'static str,
    pub value: String,
}

/// Which votes a board accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallotKind {
    /// agree, disagree, pass
    #[default]
    WithPass,
    /// agree, disagree
    AgreeDisagree,
}

impl BallotKind {
    pub fn supports(&self, vote: VoteType) -> bool {
        match self {
            BallotKind::WithPass => true,
            BallotKind::AgreeDisagree => vote != VoteType::Pass,
        }
    }
}

impl FromStr for BallotKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "with_pass" => Ok(BallotKind::WithPass),
            "agree_disagree" => Ok(BallotKind::AgreeDisagree),
            _ => Err(UnknownPolicy {
                kind: "ballot",
                value: s.to_string(),
            }),
        }
    }
}

/// How disagree percentages are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentPolicy {
    /// Round agree and disagree shares separately. The two may not sum to 100.
    #[default]
    Independent,
    /// Disagree is `100 - agree`.
    Complement,
}

impl FromStr for PercentPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "independent" => Ok(PercentPolicy::Independent),
            "complement" => Ok(PercentPolicy::Complement),
            _ => Err(UnknownPolicy {
                kind: "percent policy",
                value: s.to_string(),
            }),
        }
    }
}

/// Order of items returned by a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Submission order
    #[default]
    Insertion,
    /// Most total votes first, ties in submission order
    MostVotes,
    /// Most agrees, then fewest disagrees, then text, then submission order
    Ranked,
}

impl FromStr for ListOrder {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" => Ok(ListOrder::Insertion),
            "most_votes" => Ok(ListOrder::MostVotes),
            "ranked" => Ok(ListOrder::Ranked),
            _ => Err(UnknownPolicy {
                kind: "list order",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// STATS
// ============================================================================

/// Aggregate view of one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteStats {
    pub agree_count: u64,
    pub disagree_count: u64,
    pub pass_count: u64,
    pub total: u64,
    pub agree_pct: u8,
    pub disagree_pct: u8,
}

impl VoteStats {
    /// Count a ledger and derive percentages under `policy`.
    pub fn from_ledger(ledger: &Ledger, policy: PercentPolicy) -> Self {
        let mut stats = Self::default();

        for vote in ledger.values() {
            match vote {
                VoteType::Agree => stats.agree_count += 1,
                VoteType::Disagree => stats.disagree_count += 1,
                VoteType::Pass => stats.pass_count += 1,
            }
        }

        stats.total = stats.agree_count + stats.disagree_count + stats.pass_count;
        stats.agree_pct = percent(stats.agree_count, stats.total);
        stats.disagree_pct = match policy {
            PercentPolicy::Independent => percent(stats.disagree_count, stats.total),
            PercentPolicy::Complement if stats.total > 0 => 100 - stats.agree_pct,
            PercentPolicy::Complement => 0,
        };

        stats
    }
}

/// `count / total * 100`, rounded half up. Zero when there are no votes.
fn percent(count: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    // integer form of round(count * 100 / total)
    ((count * 200 + total) / (total * 2)) as u8
}

/// An item as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    /// Position in the store, used as the vote target
    pub index: usize,
    pub text: String,
    pub stats: VoteStats,
}
