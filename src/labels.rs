use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// The class of a news text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "usize", try_from = "usize")]
pub enum Label {
    /// Reliable news, class id 0
    Reliable,

    /// Unreliable (fake) news, class id 1
    Unreliable,
}

impl Label {
    /// Every label, ordered by class id
    pub const ALL: [Label; 2] = [Label::Reliable, Label::Unreliable];

    /// The class id used by the classifier
    pub fn id(&self) -> usize {
        match self {
            Label::Reliable => 0,
            Label::Unreliable => 1,
        }
    }

    /// The human-readable class name
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Reliable => "Reliable",
            Label::Unreliable => "Unreliable",
        }
    }

    /// A map from stringified class ids to class names, as exposed by the service
    pub fn id2label() -> BTreeMap<String, String> {
        Self::ALL
            .iter()
            .map(|label| (label.id().to_string(), label.as_str().to_string()))
            .collect()
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Label> for usize {
    fn from(label: Label) -> Self {
        label.id()
    }
}

impl TryFrom<usize> for Label {
    type Error = LabelError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Reliable),
            1 => Ok(Label::Unreliable),
            _ => Err(LabelError::Unknown(value)),
        }
    }
}

/// Label Error
#[derive(thiserror::Error, Debug)]
pub enum LabelError {
    /// No label for the given class id
    #[error("no label found for class id {0}")]
    Unknown(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ids_and_names() {
        assert_eq!(Label::Reliable.id(), 0);
        assert_eq!(Label::Unreliable.id(), 1);
        assert_eq!(Label::Unreliable.to_string(), "Unreliable");
    }

    #[test]
    fn test_try_from_id() {
        assert_eq!(Label::try_from(0).unwrap(), Label::Reliable);
        assert_eq!(Label::try_from(1).unwrap(), Label::Unreliable);
        assert!(matches!(Label::try_from(2), Err(LabelError::Unknown(2))));
    }

    #[test]
    fn test_id2label() {
        let map = Label::id2label();

        assert_eq!(map.get("0").map(String::as_str), Some("Reliable"));
        assert_eq!(map.get("1").map(String::as_str), Some("Unreliable"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_serializes_as_id() {
        assert_eq!(serde_json::to_string(&Label::Unreliable).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Label>("0").unwrap(), Label::Reliable);
        assert!(serde_json::from_str::<Label>("7").is_err());
    }
}
