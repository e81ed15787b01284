//! Selector Parser
//!
//! Parses the small CSS selector subset the widgets use against [`MemoryPage`].
//!
//! # Supported Syntax
//!
//! ```text
//! div
//! #modalOverlay
//! .modal.active
//! button.primary#send
//! .card, .subject-card, .note-card
//! ```
//!
//! Combinators (descendant, child, sibling) and attribute selectors are not
//! supported; none of the markup contracts need them.
//!
//! [`MemoryPage`]: super::MemoryPage

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{map, opt},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded},
    IResult,
};
use thiserror::Error;

/// Selector parse failure
#[derive(Error, Debug, PartialEq)]
#[error("Invalid selector '{selector}': {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

/// One compound selector such as `div.modal.active`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl CompoundSelector {
    /// Check an element's tag, id and class list against this selector
    pub fn matches(&self, tag: &str, id: &str, classes: &[String]) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(expected) = &self.id {
            if expected != id {
                return false;
            }
        }
        self.classes.iter().all(|c| classes.iter().any(|have| have == c))
    }
}

/// Comma-separated selector list; an element matches if any entry does
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<CompoundSelector>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();

        match parse_selector_list(trimmed) {
            Ok((remaining, selectors)) if remaining.trim().is_empty() => Ok(Self { selectors }),
            Ok((remaining, _)) => Err(SelectorError {
                selector: input.to_string(),
                reason: format!("unexpected input '{}'", remaining.trim()),
            }),
            Err(e) => Err(SelectorError {
                selector: input.to_string(),
                reason: format!("{:?}", e),
            }),
        }
    }

    pub fn matches(&self, tag: &str, id: &str, classes: &[String]) -> bool {
        self.selectors.iter().any(|s| s.matches(tag, id, classes))
    }
}

enum SimplePart {
    Class(String),
    Id(String),
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)
}

fn parse_simple_part(input: &str) -> IResult<&str, SimplePart> {
    alt((
        map(preceded(char('.'), identifier), |s: &str| {
            SimplePart::Class(s.to_string())
        }),
        map(preceded(char('#'), identifier), |s: &str| {
            SimplePart::Id(s.to_string())
        }),
    ))(input)
}

fn parse_compound(input: &str) -> IResult<&str, CompoundSelector> {
    let (rest, tag) = opt(identifier)(input)?;
    let (rest, parts) = many0(parse_simple_part)(rest)?;

    if tag.is_none() && parts.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    let mut selector = CompoundSelector {
        tag: tag.map(|t| t.to_string()),
        ..Default::default()
    };
    for part in parts {
        match part {
            SimplePart::Class(c) => selector.classes.push(c),
            SimplePart::Id(id) => selector.id = Some(id),
        }
    }

    Ok((rest, selector))
}

fn parse_selector_list(input: &str) -> IResult<&str, Vec<CompoundSelector>> {
    separated_list1(delimited(multispace0, char(','), multispace0), parse_compound)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_compound_classes() {
        let list = SelectorList::parse(".modal.active").unwrap();
        assert_eq!(list.selectors.len(), 1);
        assert_eq!(list.selectors[0].classes, vec!["modal", "active"]);
        assert!(list.selectors[0].tag.is_none());
    }

    #[test]
    fn test_parse_selector_list() {
        let list = SelectorList::parse(".card, .subject-card,.note-card , .suggestion-card").unwrap();
        assert_eq!(list.selectors.len(), 4);
        assert_eq!(list.selectors[3].classes, vec!["suggestion-card"]);
    }

    #[test]
    fn test_parse_tag_and_id() {
        let list = SelectorList::parse("button#chatSend.primary").unwrap();
        let sel = &list.selectors[0];
        assert_eq!(sel.tag.as_deref(), Some("button"));
        assert_eq!(sel.id.as_deref(), Some("chatSend"));
        assert_eq!(sel.classes, vec!["primary"]);
    }

    #[test]
    fn test_matching() {
        let list = SelectorList::parse(".modal.active").unwrap();
        assert!(list.matches("div", "x", &classes(&["modal", "active", "wide"])));
        assert!(!list.matches("div", "x", &classes(&["modal"])));

        let list = SelectorList::parse("DIV").unwrap();
        assert!(list.matches("div", "", &[]));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(SelectorList::parse("").is_err());
        assert!(SelectorList::parse(".modal > .body").is_err());
        assert!(SelectorList::parse(".card,").is_err());
    }
}
