use std::fmt;

use serde::Deserialize;

use crate::JokeShapeError;

pub type JokeId = u64;

/// Batch size used when the caller does not ask for a specific amount.
pub const DEFAULT_AMOUNT: u32 = 20;

/// Content-advisory flags reported by the provider. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Flags {
    pub nsfw: bool,
    pub religious: bool,
    pub political: bool,
    pub racist: bool,
    pub sexist: bool,
    pub explicit: bool,
}

impl Flags {
    /// Names of the flags that are set, in wire order.
    pub fn active(&self) -> Vec<&'static str> {
        [
            ("nsfw", self.nsfw),
            ("religious", self.religious),
            ("political", self.political),
            ("racist", self.racist),
            ("sexist", self.sexist),
            ("explicit", self.explicit),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JokeBody {
    Single {
        text: String,
    },
    /// At least one of the two parts is present.
    TwoPart {
        setup: Option<String>,
        delivery: Option<String>,
    },
}

/// One joke as returned by the provider. Values are copied, never shared.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireJoke")]
pub struct Joke {
    pub id: JokeId,
    pub category: String,
    pub body: JokeBody,
    pub flags: Flags,
    pub safe: bool,
    pub lang: String,
}

impl Joke {
    pub fn single(id: JokeId, category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            category: category.into(),
            body: JokeBody::Single { text: text.into() },
            flags: Flags::default(),
            safe: true,
            lang: "en".to_string(),
        }
    }

    pub fn two_part(
        id: JokeId,
        category: impl Into<String>,
        setup: impl Into<String>,
        delivery: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            body: JokeBody::TwoPart {
                setup: Some(setup.into()),
                delivery: Some(delivery.into()),
            },
            flags: Flags::default(),
            safe: true,
            lang: "en".to_string(),
        }
    }

    /// The wire `type` value this joke was decoded from.
    pub fn kind(&self) -> &'static str {
        match self.body {
            JokeBody::Single { .. } => "single",
            JokeBody::TwoPart { .. } => "twopart",
        }
    }

    /// Content as plain text lines: the single text, or setup then delivery.
    pub fn lines(&self) -> Vec<&str> {
        match &self.body {
            JokeBody::Single { text } => text.lines().collect(),
            JokeBody::TwoPart { setup, delivery } => [setup, delivery]
                .into_iter()
                .flatten()
                .flat_map(|part| part.lines())
                .collect(),
        }
    }

    pub fn display_text(&self) -> String {
        self.lines().join("\n")
    }

    /// First non-empty content line, used for list rows.
    pub fn headline(&self) -> &str {
        self.lines()
            .into_iter()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("")
    }

    pub fn share_text(&self) -> String {
        format!("[{}] {}", self.category, self.display_text())
    }
}

/// Wire shape of a joke: content fields are optional and validated against `type`.
#[derive(Deserialize)]
struct WireJoke {
    id: JokeId,
    category: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, alias = "text")]
    joke: Option<String>,
    #[serde(default)]
    setup: Option<String>,
    #[serde(default)]
    delivery: Option<String>,
    flags: Flags,
    safe: bool,
    lang: String,
}

impl TryFrom<WireJoke> for Joke {
    type Error = JokeShapeError;

    fn try_from(wire: WireJoke) -> Result<Self, Self::Error> {
        let id = wire.id;
        let body = match wire.kind.as_str() {
            "single" => JokeBody::Single {
                text: wire.joke.ok_or(JokeShapeError::MissingText { id })?,
            },
            "twopart" => {
                if wire.setup.is_none() && wire.delivery.is_none() {
                    return Err(JokeShapeError::MissingParts { id });
                }
                JokeBody::TwoPart {
                    setup: wire.setup,
                    delivery: wire.delivery,
                }
            }
            _ => {
                return Err(JokeShapeError::UnknownType {
                    id,
                    kind: wire.kind,
                })
            }
        };

        Ok(Self {
            id,
            category: wire.category,
            body,
            flags: wire.flags,
            safe: wire.safe,
            lang: wire.lang,
        })
    }
}

/// Wire envelope for a batch of jokes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JokeResponse {
    pub error: bool,
    pub amount: usize,
    pub jokes: Vec<Joke>,
}

impl JokeResponse {
    pub fn from_jokes(jokes: Vec<Joke>) -> Self {
        Self {
            error: false,
            amount: jokes.len(),
            jokes,
        }
    }
}

/// Ephemeral per-session thumbs annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rating {
    Up,
    Down,
    #[default]
    None,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Up => write!(f, "up"),
            Rating::Down => write!(f, "down"),
            Rating::None => write!(f, "none"),
        }
    }
}
