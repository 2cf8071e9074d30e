//! Element selectors for step targets.
//!
//! The client marks tourable elements with data attributes, so every target
//! in the catalog is an attribute selector like `[data-test="joinAudio"]`.
//! The parsed form lets a DOM backend match without a CSS engine.

use std::sync::LazyLock;

use regex::Regex;

static ATTR_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\[([A-Za-z][A-Za-z0-9-]*)="([^"]*)"\]$"#).unwrap());

/// A selector for the element a step attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    raw: String,
}

impl Selector {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The selector as written in the catalog.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The `(attribute, value)` pair for `[attr="value"]` selectors.
    pub fn attribute(&self) -> Option<(&str, &str)> {
        let caps = ATTR_SELECTOR.captures(&self.raw)?;
        Some((
            caps.get(1).map(|m| m.as_str())?,
            caps.get(2).map(|m| m.as_str())?,
        ))
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_attribute_selector() {
        let sel = Selector::new(r#"[data-test="muteMicButton"]"#);
        assert_eq!(sel.attribute(), Some(("data-test", "muteMicButton")));
    }

    #[test]
    fn parses_id_and_class_attribute_forms() {
        assert_eq!(
            Selector::new(r#"[id="interactionsButton"]"#).attribute(),
            Some(("id", "interactionsButton"))
        );
        assert_eq!(
            Selector::new(r#"[class="tlui-toolbar__inner"]"#).attribute(),
            Some(("class", "tlui-toolbar__inner"))
        );
    }

    #[test]
    fn non_attribute_selector_has_no_parse() {
        assert_eq!(Selector::new("#whiteboard").attribute(), None);
        assert_eq!(Selector::new(r#"[unclosed="x""#).attribute(), None);
    }

    #[test]
    fn raw_round_trips_through_display() {
        let sel = Selector::new(r#"[data-key="joinAudio"]"#);
        assert_eq!(sel.to_string(), sel.raw());
    }
}
