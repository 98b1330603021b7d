//! Accessible queries over rendered HTML.
//!
//! Elements are located the way assistive technology sees them: by role and
//! accessible name, or by the text they display. Queries are scoped to
//! `<body>` when the document has one.

use std::fmt;

use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html};
use thiserror::Error;

use crate::view::{Node, render_html};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unable to find an element with {what}")]
    NotFound { what: String },
    #[error("found {count} elements with {what}, expected exactly one")]
    Multiple { what: String, count: usize },
    #[error("invalid text pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Accessible roles understood by [`Screen::get_by_role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Heading,
    Paragraph,
    Link,
    Button,
    Main,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Heading => "heading",
            Role::Paragraph => "paragraph",
            Role::Link => "link",
            Role::Button => "button",
            Role::Main => "main",
        }
    }

    fn from_attr(value: &str) -> Option<Role> {
        // First recognised token wins, as with ARIA fallback roles.
        value.split_whitespace().find_map(|token| match token {
            "heading" => Some(Role::Heading),
            "paragraph" => Some(Role::Paragraph),
            "link" => Some(Role::Link),
            "button" => Some(Role::Button),
            "main" => Some(Role::Main),
            _ => None,
        })
    }

    fn implicit(el: &ElementRef<'_>) -> Option<Role> {
        match el.value().name() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(Role::Heading),
            "p" => Some(Role::Paragraph),
            "a" if el.value().attr("href").is_some() => Some(Role::Link),
            "button" => Some(Role::Button),
            "main" => Some(Role::Main),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a name or text is matched.
///
/// `Exact` compares against the whitespace-normalized text. `Pattern` is a
/// regex search, so it matches substrings unless anchored.
#[derive(Debug, Clone)]
pub enum TextMatch {
    Exact(String),
    Pattern(Regex),
}

impl TextMatch {
    /// Case-insensitive pattern, the equivalent of `/pattern/i`.
    pub fn pattern_ci(pattern: &str) -> Result<Self, QueryError> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(TextMatch::Pattern(re))
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            TextMatch::Exact(s) => normalize(s) == text,
            TextMatch::Pattern(re) => re.is_match(text),
        }
    }
}

impl From<&str> for TextMatch {
    fn from(s: &str) -> Self {
        TextMatch::Exact(s.to_owned())
    }
}

impl From<Regex> for TextMatch {
    fn from(re: Regex) -> Self {
        TextMatch::Pattern(re)
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMatch::Exact(s) => write!(f, "\"{s}\""),
            TextMatch::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// An element returned by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub tag: String,
    pub role: Option<Role>,
    /// Accessible name: `aria-label`, else normalized text content.
    pub name: String,
    pub outer_html: String,
}

impl Found {
    fn from_element(el: &ElementRef<'_>) -> Self {
        Self {
            tag: el.value().name().to_owned(),
            role: role_of(el),
            name: accessible_name(el),
            outer_html: el.html(),
        }
    }
}

/// A parsed document to run queries against.
pub struct Screen {
    document: Html,
}

impl Screen {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Renders a view and parses the result.
    pub fn render(node: &Node) -> Self {
        Self::parse(&render_html(node))
    }

    fn scope(&self) -> ElementRef<'_> {
        let root = self.document.root_element();
        root.descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "body")
            .unwrap_or(root)
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.scope().descendants().filter_map(ElementRef::wrap)
    }

    pub fn query_all_by_role(&self, role: Role, name: &TextMatch) -> Vec<Found> {
        self.elements()
            .filter(|el| role_of(el) == Some(role))
            .filter(|el| name.matches(&accessible_name(el)))
            .map(|el| Found::from_element(&el))
            .collect()
    }

    pub fn get_by_role(&self, role: Role, name: &TextMatch) -> Result<Found, QueryError> {
        single(
            self.query_all_by_role(role, name),
            format_args!("role \"{role}\" and name {name}"),
        )
    }

    /// Elements whose own text (direct text children) matches.
    pub fn query_all_by_text(&self, text: &TextMatch) -> Vec<Found> {
        self.elements()
            .filter(|el| !matches!(el.value().name(), "script" | "style"))
            .filter(|el| {
                let own = own_text(el);
                !own.is_empty() && text.matches(&own)
            })
            .map(|el| Found::from_element(&el))
            .collect()
    }

    pub fn get_by_text(&self, text: &TextMatch) -> Result<Found, QueryError> {
        single(self.query_all_by_text(text), format_args!("text {text}"))
    }
}

fn single(mut found: Vec<Found>, what: fmt::Arguments<'_>) -> Result<Found, QueryError> {
    match found.len() {
        1 => Ok(found.remove(0)),
        0 => Err(QueryError::NotFound {
            what: what.to_string(),
        }),
        count => Err(QueryError::Multiple {
            what: what.to_string(),
            count,
        }),
    }
}

fn role_of(el: &ElementRef<'_>) -> Option<Role> {
    el.value()
        .attr("role")
        .and_then(Role::from_attr)
        .or_else(|| Role::implicit(el))
}

fn accessible_name(el: &ElementRef<'_>) -> String {
    if let Some(label) = el.value().attr("aria-label") {
        let label = normalize(label);
        if !label.is_empty() {
            return label;
        }
    }
    let text: String = el
        .descendants()
        .filter(|n| {
            n.parent()
                .and_then(ElementRef::wrap)
                .is_none_or(|p| !matches!(p.value().name(), "script" | "style"))
        })
        .filter_map(|n| n.value().as_text().map(|t| &**t))
        .collect();
    normalize(&text)
}

fn own_text(el: &ElementRef<'_>) -> String {
    let text: String = el
        .children()
        .filter_map(|n| n.value().as_text().map(|t| &**t))
        .collect();
    normalize(&text)
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Element, landing};

    fn ci(p: &str) -> TextMatch {
        TextMatch::pattern_ci(p).unwrap()
    }

    #[test]
    fn test_heading_by_role_and_name() {
        let screen = Screen::render(&landing());
        let heading = screen
            .get_by_role(Role::Heading, &ci("habit tracker"))
            .unwrap();
        assert_eq!(heading.tag, "h1");
        assert_eq!(heading.name, "Habit Tracker");
        assert_eq!(heading.role, Some(Role::Heading));
    }

    #[test]
    fn test_welcome_by_text() {
        let screen = Screen::render(&landing());
        let message = screen
            .get_by_text(&ci("welcome to your habit tracking journey"))
            .unwrap();
        assert_eq!(message.tag, "p");
        assert_eq!(message.outer_html, "<p>Welcome to your habit tracking journey!</p>");
    }

    #[test]
    fn test_exact_match_is_whole_text() {
        let screen = Screen::render(&landing());
        assert!(
            screen
                .get_by_role(Role::Heading, &"Habit Tracker".into())
                .is_ok()
        );
        assert!(screen.query_all_by_role(Role::Heading, &"Habit".into()).is_empty());
    }

    #[test]
    fn test_not_found_error() {
        let screen = Screen::render(&landing());
        let err = screen
            .get_by_role(Role::Button, &ci("habit tracker"))
            .unwrap_err();
        assert!(matches!(err, QueryError::NotFound { .. }));
        assert_eq!(
            err.to_string(),
            "unable to find an element with role \"button\" and name /habit tracker/"
        );
    }

    #[test]
    fn test_multiple_error() {
        let node: Node = Element::new("div")
            .child(Element::new("h2").text("Today"))
            .child(Element::new("h3").text("today"))
            .into();
        let screen = Screen::render(&node);
        let err = screen.get_by_role(Role::Heading, &ci("today")).unwrap_err();
        assert!(matches!(err, QueryError::Multiple { count: 2, .. }));
        assert_eq!(screen.query_all_by_role(Role::Heading, &ci("^today$")).len(), 2);
    }

    #[test]
    fn test_explicit_role_and_aria_label() {
        let node: Node = Element::new("div")
            .child(
                Element::new("div")
                    .attr("role", "heading")
                    .attr("aria-label", "Streaks")
                    .text("ignored"),
            )
            .child(Element::new("a").text("no href"))
            .into();
        let screen = Screen::render(&node);
        let found = screen.get_by_role(Role::Heading, &"Streaks".into()).unwrap();
        assert_eq!(found.tag, "div");
        assert!(screen.query_all_by_role(Role::Link, &ci(".")).is_empty());
    }

    #[test]
    fn test_text_ignores_script_and_head() {
        let html = "<html><head><title>Habit Tracker</title></head>\
                    <body><script>var t = 'Habit Tracker';</script><h1>Habit Tracker</h1></body></html>";
        let screen = Screen::parse(html);
        let found = screen.get_by_text(&ci("habit tracker")).unwrap();
        assert_eq!(found.tag, "h1");
    }

    #[test]
    fn test_text_matches_own_text_only() {
        let node: Node = Element::new("div")
            .child(Element::new("span").text("  Drink \n water "))
            .into();
        let screen = Screen::render(&node);
        let found = screen.get_by_text(&"Drink water".into()).unwrap();
        assert_eq!(found.tag, "span");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = TextMatch::pattern_ci("(unclosed").unwrap_err();
        assert!(matches!(err, QueryError::Pattern(_)));
    }
}
