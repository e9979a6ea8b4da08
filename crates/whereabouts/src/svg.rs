//! Constrained SVG parsing - extract named outlines line by line.
//!
//! This is deliberately not a general SVG parser. Region-map drawings use
//! a narrow dialect - one `<svg>` root with a single viewBox, flat
//! `<path>` elements with an `id` and a `d` attribute holding absolute
//! coordinate pairs, `Z` closes and a self-closing `/>` - and this module
//! implements exactly that dialect as a single-pass scanner. Curves, arcs,
//! relative commands, transforms and nested groups are undefined input,
//! not a guaranteed error.
//!
//! The scanner is a finite-state machine over lines: states gate each
//! other in order, and a line carrying several transitions (`<path` and
//! `id="` together, say) is consumed transition by transition without
//! dropping the remainder. Only the viewBox check and coordinate
//! consumption are revisited once the root tag has been seen.

use std::fmt;

use crate::geometry::{Frame, Point};

/// Error type for SVG extraction. Both variants are fatal: no partial
/// region table survives a failed parse.
#[derive(Debug)]
pub enum SvgError {
    /// A later viewBox declaration disagrees with the first one.
    ViewBoxMismatch { found: Frame, expected: Frame },
    /// The source never declared a viewBox.
    MissingViewBox,
}

impl fmt::Display for SvgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgError::ViewBoxMismatch { found, expected } => write!(
                f,
                "view box declarations don't correspond: found {}; expected {}",
                found, expected
            ),
            SvgError::MissingViewBox => write!(f, "no viewBox declaration found in source"),
        }
    }
}

impl std::error::Error for SvgError {}

/// A named element's raw outlines, untransformed, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRegion {
    pub name: String,
    pub outlines: Vec<Vec<Point>>,
}

/// Everything a source yields: the frame plus each named element's
/// outlines, still in drawing coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub view_box: Frame,
    pub regions: Vec<RawRegion>,
}

/// Scanner states, in the order they gate each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitRoot,
    AwaitViewBox,
    AwaitElement,
    AwaitName,
    AwaitCoords,
    Coords,
}

/// Incremental extractor: feed lines, then call [`PathExtractor::finish`].
///
/// Every extractor owns its own accumulators - nothing is shared between
/// instances.
#[derive(Debug)]
pub struct PathExtractor {
    state: State,
    view_box: Option<Frame>,
    regions: Vec<RawRegion>,
    /// Current element's id, captured verbatim.
    name: String,
    /// Current element's finished outlines.
    outlines: Vec<Vec<Point>>,
    /// Point accumulator for the outline being read.
    points: Vec<Point>,
}

impl PathExtractor {
    pub fn new() -> Self {
        Self {
            state: State::AwaitRoot,
            view_box: None,
            regions: Vec::new(),
            name: String::new(),
            outlines: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Parse a complete source in one call.
    pub fn extract(source: &str) -> Result<Drawing, SvgError> {
        let mut extractor = PathExtractor::new();
        for line in source.lines() {
            extractor.feed_line(line)?;
        }
        extractor.finish()
    }

    /// Consume one line of source text.
    pub fn feed_line(&mut self, line: &str) -> Result<(), SvgError> {
        let mut rest = line;
        // Token-level skip state is per line, not per element.
        let mut skip_next = false;
        let mut last_token: Option<&str> = None;

        loop {
            match self.state {
                State::AwaitRoot => match rest.find("<svg") {
                    Some(at) => {
                        rest = &rest[at + 4..];
                        self.state = State::AwaitViewBox;
                    }
                    None => return Ok(()),
                },
                State::AwaitViewBox => match find_view_box(rest) {
                    Some((frame, after)) => {
                        self.reconcile_view_box(frame)?;
                        rest = &rest[after..];
                        self.state = State::AwaitElement;
                    }
                    None => return Ok(()),
                },
                State::AwaitElement => {
                    // A later, conflicting frame declaration must not slip
                    // through between elements.
                    if let Some((frame, after)) = find_view_box(rest) {
                        self.reconcile_view_box(frame)?;
                        rest = &rest[after..];
                        continue;
                    }
                    match rest.find("<path") {
                        Some(at) => {
                            rest = &rest[at + 5..];
                            self.state = State::AwaitName;
                        }
                        None => return Ok(()),
                    }
                }
                State::AwaitName => match find_quoted_attr(rest, "id=\"") {
                    Some((value, after)) => {
                        self.name = value.to_string();
                        rest = &rest[after..];
                        self.state = State::AwaitCoords;
                    }
                    None => return Ok(()),
                },
                State::AwaitCoords => match rest.find("d=\"") {
                    Some(at) => {
                        rest = &rest[at + 3..];
                        self.state = State::Coords;
                    }
                    None => return Ok(()),
                },
                State::Coords => {
                    match self.consume_tokens(rest, &mut skip_next, &mut last_token) {
                        // Element closed mid-line: keep scanning the rest
                        // of the line for the next one.
                        Some(after) => rest = after,
                        None => return Ok(()),
                    }
                }
            }
        }
    }

    /// Finish parsing. Fails if the source never declared its frame -
    /// an undefined frame must not leak into the transform step.
    pub fn finish(self) -> Result<Drawing, SvgError> {
        match self.view_box {
            Some(view_box) => Ok(Drawing { view_box, regions: self.regions }),
            None => Err(SvgError::MissingViewBox),
        }
    }

    fn reconcile_view_box(&mut self, found: Frame) -> Result<(), SvgError> {
        match self.view_box {
            None => {
                self.view_box = Some(found);
                Ok(())
            }
            Some(expected) if expected == found => Ok(()),
            Some(expected) => Err(SvgError::ViewBoxMismatch { found, expected }),
        }
    }

    /// Walk whitespace-delimited tokens of the line fragment.
    ///
    /// Returns `Some(rest)` when the element's self-closing marker was hit
    /// and scanning should continue on the same line, `None` when the line
    /// ran out mid-element.
    fn consume_tokens<'a>(
        &mut self,
        fragment: &'a str,
        skip_next: &mut bool,
        last_token: &mut Option<&'a str>,
    ) -> Option<&'a str> {
        let mut rest = fragment;
        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                return None;
            }
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let (token, after) = rest.split_at(end);
            rest = after;

            // The pair right after a move marker is implied by the move;
            // a token repeating the previous one is accidental
            // duplication in the source. Both are dropped.
            if *skip_next || *last_token == Some(token) {
                *skip_next = false;
                continue;
            }
            *last_token = Some(token);

            if token.starts_with('M') {
                *skip_next = true;
            } else if token.starts_with('Z') {
                let outline = std::mem::take(&mut self.points);
                self.outlines.push(outline);
            } else if let Some(point) = parse_coordinate_pair(token) {
                self.points.push(point);
            } else if token.contains("/>") {
                self.finish_element();
                return Some(rest);
            }
        }
    }

    /// Commit the current element to the table and reset per-element
    /// state. Re-declaring a name overwrites the earlier entry in place:
    /// last declaration wins, original table position kept.
    fn finish_element(&mut self) {
        let name = std::mem::take(&mut self.name);
        let outlines = std::mem::take(&mut self.outlines);
        self.points.clear();
        match self.regions.iter_mut().find(|region| region.name == name) {
            Some(existing) => existing.outlines = outlines,
            None => self.regions.push(RawRegion { name, outlines }),
        }
        self.state = State::AwaitElement;
    }
}

impl Default for PathExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate a viewBox attribute in the line fragment and parse its four
/// whitespace-separated non-negative integers. Returns the frame and the
/// offset just past the closing quote. A malformed declaration is ignored,
/// like any other unparseable input.
fn find_view_box(fragment: &str) -> Option<(Frame, usize)> {
    let (raw, after) = find_quoted_attr(fragment, "viewBox=\"")?;
    let mut values = [0.0f64; 4];
    let mut count = 0;
    for token in raw.split_whitespace() {
        if count == 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        values[count] = token.parse().ok()?;
        count += 1;
    }
    if count != 4 {
        return None;
    }
    Some((Frame::new(values[0], values[1], values[2], values[3]), after))
}

/// Find `marker` (ending in a quote) and return the value up to the next
/// quote, plus the offset just past it.
fn find_quoted_attr<'a>(fragment: &'a str, marker: &str) -> Option<(&'a str, usize)> {
    let at = fragment.find(marker)?;
    let start = at + marker.len();
    let end = start + fragment[start..].find('"')?;
    Some((&fragment[start..end], end + 1))
}

/// Parse a `<number>,<number>` token. Components are unsigned decimals
/// with an optional fractional part - no sign, no exponent. Integer-only
/// components are accepted; not every drawing tool emits decimals.
fn parse_coordinate_pair(token: &str) -> Option<Point> {
    let (x, y) = token.split_once(',')?;
    Some(Point::new(parse_coordinate(x)?, parse_coordinate(y)?))
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    let (int, frac) = match raw.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (raw, ""),
    };
    if int.is_empty()
        || !int.bytes().all(|b| b.is_ascii_digit())
        || !frac.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    raw.parse().ok()
}
