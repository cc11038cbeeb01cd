//! Rule splitting
//!
//! Live rule lists are updated one rule at a time, so substituted text is cut
//! back into standalone rule strings. Every `}` ends a rule.

use serde::Serialize;

/// One CSS rule's text, selector plus declaration block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rule(String);

impl Rule {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the rule holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Rule text with line breaks removed and outer whitespace trimmed
    pub fn normalized(&self) -> String {
        self.0
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl From<&str> for Rule {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Split substituted text into rules, each ending with its `}`.
///
/// Text after the last `}` is kept as a final rule unless it is only
/// whitespace. Joining the rules gives back the input, less that trailing
/// whitespace.
pub fn split_rules(text: &str) -> Vec<Rule> {
    let mut rules: Vec<Rule> = text.split_inclusive('}').map(Rule::from).collect();
    if rules.last().is_some_and(|rule| !rule.as_str().ends_with('}') && rule.is_blank()) {
        rules.pop();
    }
    rules
}

/// Prepare rules for a live rule list: blank rules dropped, the rest
/// normalized.
pub fn bindable_rules(rules: &[Rule]) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| !rule.is_blank())
        .map(Rule::normalized)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_single_rule() {
        let rules = split_rules("a { color: red; }");
        assert_eq!(rules, vec![Rule::from("a { color: red; }")]);
    }

    #[test]
    fn test_split_keeps_order() {
        let rules = split_rules("a { x: 1; }\nb { y: 2; }\nc { z: 3; }");
        let texts: Vec<&str> = rules.iter().map(Rule::as_str).collect();
        assert_eq!(texts, vec!["a { x: 1; }", "\nb { y: 2; }", "\nc { z: 3; }"]);
    }

    #[test]
    fn test_trailing_whitespace_dropped() {
        let rules = split_rules("a {}\n  \n");
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_trailing_text_kept() {
        let rules = split_rules("a {} b { color: red;");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].as_str(), " b { color: red;");
    }

    #[test]
    fn test_rejoin_reconstructs_input() {
        let css = "\n@media print { a { x: 1; } }\nb { y: 2; }\n\n";
        let joined: String = split_rules(css).iter().map(Rule::as_str).collect();
        assert_eq!(joined, css.trim_end());
    }

    #[test]
    fn test_empty_input() {
        assert!(split_rules("").is_empty());
        assert!(split_rules("   ").is_empty());
    }

    #[test]
    fn test_bindable_rules() {
        let rules = split_rules(" a {\n  color: red;\n}\n}\nb { x: 1; }");
        assert_eq!(
            bindable_rules(&rules),
            vec!["a {  color: red;}", "}", "b { x: 1; }"]
        );
    }

    #[test]
    fn test_bindable_skips_blank() {
        let rules = vec![Rule::from("  "), Rule::from("a {}")];
        assert_eq!(bindable_rules(&rules), vec!["a {}"]);
    }
}
