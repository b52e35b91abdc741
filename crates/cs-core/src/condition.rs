use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ItemId;
use crate::value::Value;

/// Comparison operator used by stat and game-state conditions.
///
/// Unrecognized operator strings deserialize to [`Operator::Unsupported`]
/// so that a typo in content hides one choice instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// `===`
    #[default]
    Eq,
    /// `!==`
    Ne,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// Anything else, kept verbatim for diagnostics.
    Unsupported(String),
}

impl Operator {
    /// The operator as written in content files.
    pub fn symbol(&self) -> &str {
        match self {
            Self::Eq => "===",
            Self::Ne => "!==",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Unsupported(raw) => raw,
        }
    }

    /// Whether the operator only tests equality.
    pub fn is_equality(&self) -> bool {
        matches!(self, Self::Eq | Self::Ne)
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "===" => Self::Eq,
            "!==" => Self::Ne,
            ">=" => Self::Ge,
            "<=" => Self::Le,
            ">" => Self::Gt,
            "<" => Self::Lt,
            _ => Self::Unsupported(raw),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.symbol().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Visibility condition attached to a dialogue choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Condition {
    /// Compare a player stat against a value.
    PlayerStat {
        /// Stat name.
        stat: String,
        /// Comparison operator.
        #[serde(default)]
        operator: Operator,
        /// Right-hand operand.
        value: Value,
    },
    /// Compare a game-state flag against a value. Only `===` and `!==`.
    GameState {
        /// Flag name.
        variable: String,
        /// Comparison operator.
        #[serde(default)]
        operator: Operator,
        /// Right-hand operand.
        value: Value,
    },
    /// The player carries an item with this id.
    HasItem {
        /// Required item.
        #[serde(rename = "itemId")]
        item_id: ItemId,
    },
    /// A quest is recorded with exactly this status.
    QuestStatus {
        /// Quest identifier.
        #[serde(rename = "questId")]
        quest_id: String,
        /// Expected status.
        status: String,
    },
    /// Any condition type this engine does not know. Never satisfied.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerStat {
                stat,
                operator,
                value,
            } => write!(f, "stat {stat} {operator} {value}"),
            Self::GameState {
                variable,
                operator,
                value,
            } => write!(f, "flag {variable} {operator} {value}"),
            Self::HasItem { item_id } => write!(f, "has {item_id}"),
            Self::QuestStatus { quest_id, status } => write!(f, "quest {quest_id} is {status}"),
            Self::Unknown => f.write_str("unknown condition"),
        }
    }
}
