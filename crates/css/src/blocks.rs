//! Rule block scanning
//!
//! Splits stylesheet text into `selector { declarations }` blocks and the
//! text between them. Matching is a flat regular expression, not a
//! tokenizer: a block body runs to the first `}`, so nested blocks, comments
//! and braces inside strings are not understood. Everything that needs rule
//! blocks goes through [`scan`] so the matcher can be replaced in one place.

use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use smallvec::SmallVec;

fn rule_block_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([^{]+)\{([^}]+)\}").unwrap())
}

/// A matched rule block, borrowed from the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// The whole match, selector through closing brace
    source: &'a str,
    /// Byte range of the selector within `source`
    selector: Range<usize>,
    /// Byte range of the body within `source`
    body: Range<usize>,
}

impl<'a> RawBlock<'a> {
    /// Selector text as written, including surrounding whitespace
    pub fn selector(&self) -> &'a str {
        &self.source[self.selector.clone()]
    }

    /// Body text between the braces
    pub fn body(&self) -> &'a str {
        &self.source[self.body.clone()]
    }

    /// Everything before the body (selector and opening brace)
    pub fn head(&self) -> &'a str {
        &self.source[..self.body.start]
    }

    /// Everything after the body (the closing brace)
    pub fn tail(&self) -> &'a str {
        &self.source[self.body.end..]
    }

    pub fn as_str(&self) -> &'a str {
        self.source
    }
}

/// A piece of scanned stylesheet text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text that is not part of any recognized block
    Text(&'a str),
    Block(RawBlock<'a>),
}

/// Split text into blocks and the text around them.
///
/// Concatenating the segments reproduces the input exactly.
pub fn scan(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in rule_block_pattern().captures_iter(text) {
        let (Some(whole), Some(selector), Some(body)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        if whole.start() > last {
            segments.push(Segment::Text(&text[last..whole.start()]));
        }

        let base = whole.start();
        segments.push(Segment::Block(RawBlock {
            source: whole.as_str(),
            selector: (selector.start() - base)..(selector.end() - base),
            body: (body.start() - base)..(body.end() - base),
        }));
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }

    segments
}

/// A single `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    /// Split on the first `:`; a declaration without one has an empty value
    pub fn parse(text: &str) -> Self {
        match text.split_once(':') {
            Some((property, value)) => Self {
                property: property.trim().to_string(),
                value: value.trim().to_string(),
            },
            None => Self {
                property: text.trim().to_string(),
                value: String::new(),
            },
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            f.write_str(&self.property)
        } else {
            write!(f, "{}: {}", self.property, self.value)
        }
    }
}

/// A selector with its declarations in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
    pub selector: String,
    pub declarations: SmallVec<[Declaration; 8]>,
}

impl RuleBlock {
    /// Build from a scanned block, splitting the body on `;`
    pub fn from_raw(raw: &RawBlock<'_>) -> Self {
        let declarations = raw
            .body()
            .split(';')
            .filter(|part| !part.trim().is_empty())
            .map(Declaration::parse)
            .collect();

        Self {
            selector: raw.selector().trim().to_string(),
            declarations,
        }
    }

    /// Keep only the declarations matching the predicate
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Declaration) -> bool,
    {
        self.declarations.retain(|decl| keep(decl));
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for RuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selector)?;
        for (i, decl) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", decl)?;
        }
        f.write_str("}")
    }
}
