use serde::{Deserialize, Serialize};

/// Classification of one diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present in both texts.
    Equal,
    /// Present only in the revised text.
    Added,
    /// Present only in the original text.
    Removed,
}

/// One contiguous run of the diff, in original-to-revised order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: DiffKind,
    pub value: String,
}

impl DiffSegment {
    pub fn equal(value: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Equal,
            value: value.into(),
        }
    }

    pub fn added(value: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Added,
            value: value.into(),
        }
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Removed,
            value: value.into(),
        }
    }
}

/// Copy-out reconstruction of the revised text: equal + added segments.
pub fn revised_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != DiffKind::Removed)
        .map(|s| s.value.as_str())
        .collect()
}

/// Copy-out reconstruction of the original text: equal + removed segments.
pub fn original_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != DiffKind::Added)
        .map(|s| s.value.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revised_text_skips_removed() {
        let segments = vec![
            DiffSegment::equal("I "),
            DiffSegment::removed("has"),
            DiffSegment::added("have"),
            DiffSegment::equal(" apples"),
        ];
        assert_eq!(revised_text(&segments), "I have apples");
    }

    #[test]
    fn test_original_text_skips_added() {
        let segments = vec![
            DiffSegment::equal("I "),
            DiffSegment::removed("has"),
            DiffSegment::added("have"),
            DiffSegment::equal(" apples"),
        ];
        assert_eq!(original_text(&segments), "I has apples");
    }

    #[test]
    fn test_empty_segments() {
        assert_eq!(revised_text(&[]), "");
        assert_eq!(original_text(&[]), "");
    }

    #[test]
    fn test_segment_serialization() {
        let seg = DiffSegment::added("word");
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["kind"], "added");
        assert_eq!(json["value"], "word");
    }
}
