//! Dominant emotion selection over expression probabilities.

use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Returned when no expression scores above zero
pub const FALLBACK_EMOTION: &str = "Neutral";

/// Expression labels produced by the expression network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Neutral,
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgusted,
    Surprised,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fearful,
        Emotion::Disgusted,
        Emotion::Surprised,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fearful => "fearful",
            Emotion::Disgusted => "disgusted",
            Emotion::Surprised => "surprised",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Emotion> for String {
    fn from(emotion: Emotion) -> Self {
        emotion.as_str().to_string()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown emotion label: {0}")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}

/// Pick the label with the strictly greatest probability.
///
/// Ties keep the earliest entry. Scores must beat zero to count, so an
/// empty or all-zero input (or an empty label) yields [`FALLBACK_EMOTION`].
pub fn dominant_emotion<S: AsRef<str>>(expressions: &[(S, f64)]) -> &str {
    let mut best: Option<&str> = None;
    let mut max = 0.0;
    for (label, value) in expressions {
        if *value > max {
            max = *value;
            best = Some(label.as_ref());
        }
    }
    match best {
        Some(label) if !label.is_empty() => label,
        _ => FALLBACK_EMOTION,
    }
}

/// Expression probabilities in the order the detector reported them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expressions {
    entries: Vec<(String, f64)>,
}

impl Expressions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, probability: f64) {
        self.entries.push((label.into(), probability));
    }

    /// Set a label's probability; a repeated label keeps its first position
    pub fn insert(&mut self, label: impl Into<String>, probability: f64) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = probability,
            None => self.entries.push((label, probability)),
        }
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn dominant(&self) -> &str {
        dominant_emotion(&self.entries)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Expressions {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(l, v)| (l.into(), v)).collect(),
        }
    }
}

impl From<Vec<(String, f64)>> for Expressions {
    fn from(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }
}

impl Serialize for Expressions {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

struct ExpressionsVisitor;

impl<'de> Visitor<'de> for ExpressionsVisitor {
    type Value = Expressions;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of expression label to probability")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Expressions, A::Error> {
        let mut expressions = Expressions {
            entries: Vec::with_capacity(access.size_hint().unwrap_or(7)),
        };
        while let Some((label, value)) = access.next_entry::<String, f64>()? {
            expressions.insert(label, value);
        }
        Ok(expressions)
    }
}

// Map types would lose document order, which decides ties
impl<'de> Deserialize<'de> for Expressions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ExpressionsVisitor)
    }
}
