//! Worksheet data model

use chrono::NaiveDate;
use serde::Serialize;

/// One vocabulary entry: a source-language term and its translation.
///
/// Either side may be empty, but never both once a pair has passed
/// through [`crate::worksheet::pair_terms`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordPair {
    front: String,
    back: String,
}

impl WordPair {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Source term (English in the usual use case)
    pub fn front(&self) -> &str {
        &self.front
    }

    /// Translated term (Korean in the usual use case)
    pub fn back(&self) -> &str {
        &self.back
    }

    /// True when neither side carries any text
    pub fn is_blank(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }
}

/// Which column is left blank on the practice sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HideMode {
    /// Show the front term, blank the back column
    #[default]
    HideBack,
    /// Blank the front column, show the back term
    HideFront,
}

impl HideMode {
    /// Parse the `hide_mode` form value.
    ///
    /// Accepts `hide-back`/`hide-front` as well as the older form's
    /// `korean`/`english` (naming the hidden language). Anything else,
    /// including a missing field, selects [`HideMode::HideBack`].
    pub fn from_form_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("hide-front") | Some("english") => HideMode::HideFront,
            _ => HideMode::HideBack,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HideMode::HideBack => "hide-back",
            HideMode::HideFront => "hide-front",
        }
    }
}

/// Cell policy for one sheet: which sides of each pair are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    FrontOnly,
    BackOnly,
    Both,
}

impl Reveal {
    /// The (front, back) cell texts for `pair` under this policy
    pub fn cells<'a>(&self, pair: &'a WordPair) -> (&'a str, &'a str) {
        match self {
            Reveal::FrontOnly => (pair.front(), ""),
            Reveal::BackOnly => ("", pair.back()),
            Reveal::Both => (pair.front(), pair.back()),
        }
    }
}

impl From<HideMode> for Reveal {
    fn from(mode: HideMode) -> Self {
        match mode {
            HideMode::HideBack => Reveal::FrontOnly,
            HideMode::HideFront => Reveal::BackOnly,
        }
    }
}

/// Everything the document builder needs for one worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// Final row order, shared by the practice and answer sheets
    pub pairs: Vec<WordPair>,
    pub hide_mode: HideMode,
    /// Shown in the header line; `None` prints a blank to fill in by hand
    pub display_name: Option<String>,
    /// Printed as `YYYY-MM-DD`
    pub date: NaiveDate,
}

impl RenderRequest {
    pub fn new(
        pairs: Vec<WordPair>,
        hide_mode: HideMode,
        display_name: Option<String>,
        date: NaiveDate,
    ) -> Self {
        let display_name = display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Self {
            pairs,
            hide_mode,
            display_name,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, HideMode::HideBack)]
    #[case(Some("hide-back"), HideMode::HideBack)]
    #[case(Some("hide-front"), HideMode::HideFront)]
    #[case(Some("korean"), HideMode::HideBack)]
    #[case(Some("english"), HideMode::HideFront)]
    #[case(Some(" hide-front "), HideMode::HideFront)]
    #[case(Some("both"), HideMode::HideBack)]
    #[case(Some(""), HideMode::HideBack)]
    fn test_hide_mode_from_form_value(#[case] value: Option<&str>, #[case] expected: HideMode) {
        assert_eq!(HideMode::from_form_value(value), expected);
    }

    #[test]
    fn test_reveal_cells() {
        let pair = WordPair::new("apple", "사과");
        assert_eq!(Reveal::FrontOnly.cells(&pair), ("apple", ""));
        assert_eq!(Reveal::BackOnly.cells(&pair), ("", "사과"));
        assert_eq!(Reveal::Both.cells(&pair), ("apple", "사과"));
    }

    #[test]
    fn test_reveal_from_hide_mode() {
        assert_eq!(Reveal::from(HideMode::HideBack), Reveal::FrontOnly);
        assert_eq!(Reveal::from(HideMode::HideFront), Reveal::BackOnly);
    }

    #[test]
    fn test_reveal_keeps_missing_side_empty() {
        let pair = WordPair::new("", "고양이");
        assert_eq!(Reveal::FrontOnly.cells(&pair), ("", ""));
        assert_eq!(Reveal::Both.cells(&pair), ("", "고양이"));
    }

    #[test]
    fn test_render_request_blank_name_is_absent() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let request = RenderRequest::new(vec![], HideMode::HideBack, Some("   ".to_string()), date);
        assert_eq!(request.display_name, None);

        let request = RenderRequest::new(vec![], HideMode::HideBack, Some(" 민수 ".to_string()), date);
        assert_eq!(request.display_name.as_deref(), Some("민수"));
    }

    #[test]
    fn test_hide_mode_serializes_as_wire_value() {
        assert_eq!(
            serde_json::to_string(&HideMode::HideFront).unwrap(),
            "\"hide-front\""
        );
        assert_eq!(HideMode::HideBack.as_str(), "hide-back");
    }
}
