//! Macro declaration parser
//!
//! Turns a directive body (`name: value; name: value;`) into a [`MacroMap`].

use log::trace;

use crate::map::MacroMap;

/// Parse a directive body into a macro map.
///
/// Segments without a `:` are skipped, which also absorbs the empty segment
/// after a trailing `;`. A later definition of the same name replaces an
/// earlier one.
pub fn parse_macros(body: &str) -> MacroMap {
    let mut macros = MacroMap::new();

    for declaration in body.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            if !declaration.trim().is_empty() {
                trace!("Skipping malformed macro declaration '{}'", declaration.trim());
            }
            continue;
        };

        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        macros.insert(name, value.trim());
    }

    macros
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_body() {
        let macros = parse_macros(" accent: #f00; gap: 4px; ");
        assert_eq!(macros.len(), 2);
        assert_eq!(macros.get("accent"), Some("#f00"));
        assert_eq!(macros.get("gap"), Some("4px"));
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_macros("").is_empty());
        assert!(parse_macros("   ").is_empty());
        assert!(parse_macros(";;").is_empty());
    }

    #[test]
    fn test_last_definition_wins() {
        let macros = parse_macros("accent: red; accent: blue;");
        assert_eq!(macros.len(), 1);
        assert_eq!(macros.get("accent"), Some("blue"));
    }

    #[test]
    fn test_malformed_segments_skipped() {
        let macros = parse_macros("accent red; gap: 4px; : orphan;");
        assert_eq!(macros.len(), 1);
        assert_eq!(macros.get("gap"), Some("4px"));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let macros = parse_macros("logo: url(http://example.com/a.png);");
        assert_eq!(macros.get("logo"), Some("url(http://example.com/a.png)"));
    }

    #[test]
    fn test_missing_final_semicolon() {
        let macros = parse_macros("a: 1px; b: solid");
        assert_eq!(macros.get("b"), Some("solid"));
    }
}
