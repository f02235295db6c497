use serde::{Deserialize, Serialize};

/// One row of a trade sheet: what the trader wants on the left, what they
/// offer in exchange on the right.
///
/// Identifiers are free-form display names; they double as asset lookup keys.
/// Order within each side is preserved when drawing (left to right).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeRow {
    #[serde(default)]
    pub want: Vec<String>,
    #[serde(default)]
    pub offer: Vec<String>,
}

impl TradeRow {
    pub fn new<W, O>(want: W, offer: O) -> Self
    where
        W: IntoIterator,
        W::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            want: want.into_iter().map(Into::into).collect(),
            offer: offer.into_iter().map(Into::into).collect(),
        }
    }

    /// True when neither side names anything.
    pub fn is_empty(&self) -> bool {
        self.want.is_empty() && self.offer.is_empty()
    }

    /// Want side joined as `"a, b"`.
    pub fn want_joined(&self) -> String {
        self.want.join(", ")
    }

    /// Offer side joined as `"a, b"`.
    pub fn offer_joined(&self) -> String {
        self.offer.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_side_order() {
        let row = TradeRow::new(["Sheepie"], ["Molti", "Slime"]);
        assert_eq!(row.want, vec!["Sheepie"]);
        assert_eq!(row.offer, vec!["Molti", "Slime"]);
    }

    #[test]
    fn test_joined_sides() {
        let row = TradeRow::new(["King Doot", "Frog"], Vec::<String>::new());
        assert_eq!(row.want_joined(), "King Doot, Frog");
        assert_eq!(row.offer_joined(), "");
        assert!(!row.is_empty());
        assert!(TradeRow::default().is_empty());
    }

    #[test]
    fn test_deserialize_missing_side_defaults_empty() {
        let row: TradeRow = serde_json::from_str(r#"{"offer": ["Frog"]}"#).unwrap();
        assert!(row.want.is_empty());
        assert_eq!(row.offer, vec!["Frog".to_string()]);
    }
}
