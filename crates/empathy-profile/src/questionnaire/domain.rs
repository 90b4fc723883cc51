use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a catalogue item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u16);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Latent dimension an item measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[serde(rename = "self")]
    Oneself,
    Others,
    Object,
    Situation,
}

impl Category {
    pub const fn ordered() -> [Self; 4] {
        [Self::Oneself, Self::Others, Self::Object, Self::Situation]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Oneself => "self",
            Self::Others => "others",
            Self::Object => "object",
            Self::Situation => "situation",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Oneself => "Self",
            Self::Others => "Others",
            Self::Object => "Object",
            Self::Situation => "Situation",
        }
    }
}

/// One scorable prompt of the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub text: &'static str,
    pub category: Category,
    pub is_reversed: bool,
}

impl Item {
    pub const fn new(id: u16, text: &'static str, category: Category) -> Self {
        Self {
            id: ItemId(id),
            text,
            category,
            is_reversed: false,
        }
    }

    /// Item whose raw answer is inverted before aggregation.
    pub const fn reversed(id: u16, text: &'static str, category: Category) -> Self {
        Self {
            id: ItemId(id),
            text,
            category,
            is_reversed: true,
        }
    }
}

/// A single answer on the five-point agreement scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Likert(u8);

impl Likert {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const NEUTRAL: Likert = Likert(3);

    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub const fn all() -> [Self; 5] {
        [Self(1), Self(2), Self(3), Self(4), Self(5)]
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Mirror the answer around the midpoint (1<->5, 2<->4, 3<->3).
    pub const fn reversed(self) -> Self {
        Self(Self::MIN + Self::MAX - self.0)
    }

    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "Strongly disagree",
            2 => "Disagree",
            3 => "Neutral",
            4 => "Agree",
            _ => "Strongly agree",
        }
    }
}

impl fmt::Display for Likert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is outside the 1-5 answer scale")]
pub struct OutOfScale(pub i64);

impl TryFrom<i64> for Likert {
    type Error = OutOfScale;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(OutOfScale(value))
    }
}

impl From<Likert> for u8 {
    fn from(value: Likert) -> Self {
        value.0
    }
}

/// Answer option as presented to respondents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikertOption {
    pub value: u8,
    pub label: &'static str,
}

pub fn likert_options() -> Vec<LikertOption> {
    Likert::all()
        .into_iter()
        .map(|answer| LikertOption {
            value: answer.value(),
            label: answer.label(),
        })
        .collect()
}

/// Inclusive range a category or composite total can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBounds {
    pub min: u16,
    pub max: u16,
}

impl ScoreBounds {
    pub const fn for_items(count: u16) -> Self {
        Self {
            min: count.saturating_mul(Likert::MIN as u16),
            max: count.saturating_mul(Likert::MAX as u16),
        }
    }

    pub const fn contains(&self, value: u16) -> bool {
        value >= self.min && value <= self.max
    }

    pub const fn combine(self, other: Self) -> Self {
        Self {
            min: self.min.saturating_add(other.min),
            max: self.max.saturating_add(other.max),
        }
    }
}
