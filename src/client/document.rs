//! Parsed XML response and the path queries used to read it.
//!
//! Paths are absolute, slash-separated element names with an optional
//! 1-based positional predicate per step and an optional trailing `text()`:
//! `/result/firm/PKDs/PKD[2]/code/text()`. Namespace prefixes are kept as
//! part of the element name.

use std::iter::FusedIterator;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use quick_xml::Reader;
use quick_xml::events::Event;
use rust_decimal::Decimal;

use crate::core::Nip24Error;

/// One element: its name, its direct text content and its child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated direct text content, untrimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

/// An XML document held as an element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    // unnamed document node; its single child is the root element
    node: Element,
}

impl Document {
    /// Parse `xml` into a tree.
    ///
    /// # Errors
    ///
    /// Returns [`Nip24Error::Xml`] on malformed XML or a document without a
    /// root element.
    pub fn parse(xml: &str) -> Result<Self, Nip24Error> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack = vec![Element::default()];

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    stack.push(Element::new(element_name(e.name().as_ref())?));
                }
                Ok(Event::Empty(ref e)) => {
                    let el = Element::new(element_name(e.name().as_ref())?);
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(el);
                    }
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| Nip24Error::Xml(format!("XML text error: {e}")))?;
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&text);
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Ok(Event::End(_)) => {
                    if stack.len() < 2 {
                        return Err(Nip24Error::Xml("unexpected closing tag".into()));
                    }
                    if let Some(el) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(el);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Nip24Error::Xml(format!("XML parse error: {e}")));
                }
                _ => {}
            }
        }

        if stack.len() != 1 {
            return Err(Nip24Error::Xml("unclosed element at end of document".into()));
        }
        let node = stack.pop().unwrap_or_default();
        if node.children.is_empty() {
            return Err(Nip24Error::Xml("document has no root element".into()));
        }
        Ok(Self { node })
    }

    /// Root element.
    pub fn root(&self) -> Option<&Element> {
        self.node.children.first()
    }

    /// All elements matching `path`, in document order.
    pub fn select(&self, path: &str) -> Vec<&Element> {
        let Some(steps) = parse_path(path) else {
            return Vec::new();
        };

        let mut context = vec![&self.node];
        for step in steps {
            let mut next = Vec::new();
            for el in context {
                let mut matching = el.children.iter().filter(|c| c.name == step.name);
                match step.position {
                    Some(pos) => next.extend(matching.nth(pos - 1)),
                    None => next.extend(matching),
                }
            }
            if next.is_empty() {
                return next;
            }
            context = next;
        }
        context
    }

    /// Whether exactly one element matches `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.select(path).len() == 1
    }

    /// Trimmed text of the single element matching `path`.
    ///
    /// Zero or several matches, or empty text, yield `None`.
    pub fn string(&self, path: &str) -> Option<String> {
        let nodes = self.select(path);
        if nodes.len() != 1 {
            return None;
        }
        let text = nodes[0].text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    pub fn int(&self, path: &str) -> Option<i64> {
        self.string(path)?.parse().ok()
    }

    /// Decimal number; plain and scientific notation are accepted.
    pub fn decimal(&self, path: &str) -> Option<Decimal> {
        let s = self.string(path)?;
        Decimal::from_str(&s)
            .or_else(|_| Decimal::from_scientific(&s))
            .ok()
    }

    /// `true` only for the literal text `true`.
    pub fn boolean(&self, path: &str) -> bool {
        self.string(path).as_deref() == Some("true")
    }

    /// Date from the first ten characters (`yyyy-mm-dd`), so both dates and
    /// timestamps are accepted.
    pub fn date(&self, path: &str) -> Option<NaiveDate> {
        let s = self.string(path)?;
        NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
    }

    /// Full RFC 3339 timestamp.
    pub fn datetime(&self, path: &str) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.string(path)?).ok()
    }

    /// Iterate `{base}[1]`, `{base}[2]`, … while `{base}[i]/{probe}` has text.
    ///
    /// With `probe = None` iteration continues while the element itself exists.
    /// Items are path prefixes for reading the element's sub-fields.
    pub fn repeated<'d>(&'d self, base: &str, probe: Option<&'d str>) -> Repeated<'d> {
        Repeated {
            doc: self,
            base: base.to_string(),
            probe,
            position: 1,
            done: false,
        }
    }
}

impl FromStr for Document {
    type Err = Nip24Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Lazy iterator over positionally indexed sibling elements.
///
/// Stops at the first absent position; no count field in the document is
/// consulted.
#[derive(Debug, Clone)]
pub struct Repeated<'d> {
    doc: &'d Document,
    base: String,
    probe: Option<&'d str>,
    position: usize,
    done: bool,
}

impl Iterator for Repeated<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let prefix = format!("{}[{}]", self.base, self.position);
        let present = match self.probe {
            Some(probe) => self.doc.string(&format!("{prefix}/{probe}")).is_some(),
            None => self.doc.exists(&prefix),
        };
        if !present {
            self.done = true;
            return None;
        }
        self.position += 1;
        Some(prefix)
    }
}

impl FusedIterator for Repeated<'_> {}

struct Step<'p> {
    name: &'p str,
    position: Option<usize>,
}

fn parse_path(path: &str) -> Option<Vec<Step<'_>>> {
    let path = path.strip_prefix('/')?;
    let path = path.strip_suffix("/text()").unwrap_or(path);

    path.split('/')
        .map(|seg| match seg.split_once('[') {
            Some((name, rest)) => {
                let pos: usize = rest.strip_suffix(']')?.parse().ok()?;
                (pos >= 1 && !name.is_empty()).then_some(Step {
                    name,
                    position: Some(pos),
                })
            }
            None => (!seg.is_empty()).then_some(Step {
                name: seg,
                position: None,
            }),
        })
        .collect()
}

fn element_name(raw: &[u8]) -> Result<String, Nip24Error> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| Nip24Error::Xml(format!("XML UTF-8 error: {e}")))
}
