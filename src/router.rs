use crate::models::{AccessRequirement, RouteParams, ViewId};
use thiserror::Error;

/// RouteTableError
///
/// Raised while building a `RouteTable`. The table is built once at startup, so any
/// of these means the route definitions themselves are wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: &'static str },
    #[error("route pattern `{0}` is declared more than once")]
    DuplicatePattern(String),
    #[error("route patterns `{first}` and `{second}` can match the same path")]
    AmbiguousPattern { first: String, second: String },
}

/// NotFound
///
/// A request path matched no route pattern. Surfaced to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route matches `{path}`")]
pub struct NotFound {
    pub path: String,
}

// --- Patterns ---

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// RoutePattern
///
/// A parsed path template such as `/admin/subjects/:subjectId/chapters`.
/// Empty segments are ignored, so `/subjects/` and `/subjects` are the same pattern.
/// Static segments match ASCII case-insensitively; captured values are percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses an absolute pattern (must start with `/`).
    pub fn parse(raw: &str) -> Result<Self, RouteTableError> {
        if !raw.starts_with('/') {
            return Err(RouteTableError::InvalidPattern {
                pattern: raw.to_string(),
                reason: "top-level patterns must start with '/'",
            });
        }
        Self::empty().join(raw)
    }

    fn empty() -> Self {
        Self {
            raw: String::new(),
            segments: Vec::new(),
        }
    }

    /// Appends `child` (relative, or absolute for the root) to this pattern.
    fn join(&self, child: &str) -> Result<Self, RouteTableError> {
        let mut segments = self.segments.clone();

        for part in child.split('/').filter(|part| !part.is_empty()) {
            let segment = match part.strip_prefix(':') {
                Some("") => {
                    return Err(RouteTableError::InvalidPattern {
                        pattern: child.to_string(),
                        reason: "parameter segment has no name",
                    });
                }
                Some(name) => {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name))
                    {
                        return Err(RouteTableError::InvalidPattern {
                            pattern: child.to_string(),
                            reason: "parameter name is used twice",
                        });
                    }
                    Segment::Param(name.to_string())
                }
                None => Segment::Static(part.to_string()),
            };
            segments.push(segment);
        }

        let raw = render(&segments);
        Ok(Self { raw, segments })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Matches already-split request segments, returning the extracted parameters.
    fn captures(&self, parts: &[&str]) -> Option<RouteParams> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected.eq_ignore_ascii_case(part) => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), decode_segment(part));
                }
            }
        }
        Some(params)
    }

    /// True when some concrete path could match both patterns.
    fn overlaps(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a.eq_ignore_ascii_case(b),
                    _ => true,
                })
    }
}

// A segment that does not decode to UTF-8 is kept as written.
fn decode_segment(part: &str) -> String {
    match urlencoding::decode(part) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => part.to_string(),
    }
}

fn render(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Static(s) => format!("/{s}"),
            Segment::Param(name) => format!("/:{name}"),
        })
        .collect()
}

// --- Records ---

/// What a route resolves to: a view, or a static redirect that bypasses the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RouteTarget {
    View(ViewId),
    Redirect(String),
}

/// RouteRecord
///
/// One navigable path as authored in the route table. Children use patterns
/// relative to their parent and form parent/child layout chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pattern: String,
    target: RouteTarget,
    access: AccessRequirement,
    children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn view(pattern: impl Into<String>, view: ViewId, access: AccessRequirement) -> Self {
        Self {
            pattern: pattern.into(),
            target: RouteTarget::View(view),
            access,
            children: Vec::new(),
        }
    }

    /// A static redirect. Always public: it is applied before the guard runs.
    pub fn redirect(pattern: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: RouteTarget::Redirect(to.into()),
            access: AccessRequirement::Public,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }

    /// The pattern as authored (relative for children).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn view_id(&self) -> Option<ViewId> {
        match self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }

    pub fn redirect_to(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Redirect(to) => Some(to),
            RouteTarget::View(_) => None,
        }
    }

    pub fn access(&self) -> AccessRequirement {
        self.access
    }
}

// --- Table ---

/// A fully-qualified pattern plus the chain of record indices (outermost first).
#[derive(Debug)]
struct CompiledRoute {
    pattern: RoutePattern,
    chain: Vec<usize>,
}

/// RouteTable
///
/// Immutable after construction. Nested records are flattened into one compiled
/// entry per record, and construction rejects any two entries that could match the
/// same concrete path, so resolution never depends on declaration order.
#[derive(Debug)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    routes: Vec<CompiledRoute>,
}

/// RouteMatch
///
/// The result of a successful `resolve`: the matched chain (outermost to innermost),
/// the fully-qualified pattern of the innermost record and the extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub path: String,
    pub pattern: &'a str,
    pub chain: Vec<&'a RouteRecord>,
    pub params: RouteParams,
}

impl<'a> RouteMatch<'a> {
    pub fn leaf(&self) -> &'a RouteRecord {
        // `resolve` never builds an empty chain.
        self.chain[self.chain.len() - 1]
    }

    pub fn view_id(&self) -> Option<ViewId> {
        self.leaf().view_id()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

impl RouteTable {
    pub fn new(records: Vec<RouteRecord>) -> Result<Self, RouteTableError> {
        let mut table = Self {
            records: Vec::new(),
            routes: Vec::new(),
        };

        for record in records {
            let pattern = RoutePattern::parse(&record.pattern)?;
            table.insert(record, pattern, Vec::new())?;
        }

        Ok(table)
    }

    fn insert(
        &mut self,
        mut record: RouteRecord,
        pattern: RoutePattern,
        mut chain: Vec<usize>,
    ) -> Result<(), RouteTableError> {
        if let Some(existing) = self.routes.iter().find(|route| route.pattern.overlaps(&pattern)) {
            return Err(if existing.pattern == pattern {
                RouteTableError::DuplicatePattern(pattern.raw)
            } else {
                RouteTableError::AmbiguousPattern {
                    first: existing.pattern.raw.clone(),
                    second: pattern.raw,
                }
            });
        }

        let children = std::mem::take(&mut record.children);
        chain.push(self.records.len());
        self.records.push(record);
        self.routes.push(CompiledRoute {
            pattern: pattern.clone(),
            chain: chain.clone(),
        });

        for child in children {
            if child.pattern.starts_with('/') {
                return Err(RouteTableError::InvalidPattern {
                    pattern: child.pattern,
                    reason: "child patterns must be relative to their parent",
                });
            }
            let child_pattern = pattern.join(&child.pattern)?;
            self.insert(child, child_pattern, chain.clone())?;
        }

        Ok(())
    }

    /// Resolves a concrete request path. Query strings and fragments are ignored.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch<'_>, NotFound> {
        let path = strip_query(path);
        let parts: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();

        self.routes
            .iter()
            .find_map(|route| {
                route.pattern.captures(&parts).map(|params| RouteMatch {
                    path: path.to_string(),
                    pattern: route.pattern.as_str(),
                    chain: route.chain.iter().map(|&index| &self.records[index]).collect(),
                    params,
                })
            })
            .ok_or_else(|| NotFound {
                path: path.to_string(),
            })
    }

    /// Every fully-qualified pattern in the table, in declaration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

// --- URL Mode ---

/// HistoryMode
///
/// Where the route path lives in a browser location. `Hash` keeps it in the
/// fragment (`/#/quiz/42`), `History` uses the URL path itself (`/quiz/42`).
/// This is a deployment choice; the route table is the same in both modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryMode {
    #[default]
    Hash,
    History,
}

impl HistoryMode {
    /// Extracts the route path from a browser location (path, path + fragment, or
    /// a full URL). In hash mode a location without a fragment is taken as a route
    /// path already.
    pub fn route_path<'a>(self, location: &'a str) -> &'a str {
        let location = strip_origin(location);
        let path = match self {
            HistoryMode::Hash => match location.split_once('#') {
                Some((_, fragment)) => fragment,
                None => location,
            },
            HistoryMode::History => strip_query(location),
        };
        if path.is_empty() { "/" } else { path }
    }
}

fn strip_origin(location: &str) -> &str {
    match location.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |index| &rest[index..]),
        None => location,
    }
}
