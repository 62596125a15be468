use serde_json::Value;
use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Field name within a record
    Key(String),

    /// Entry index within a repeater
    Index(usize),
}

/// A fully-qualified, dot-separated location inside a record, e.g.
/// `blocks.0.title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The empty path, addressing the root record itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dot-separated path. Segments that are canonical unsigned
    /// integers (`0`, `12`, not `07`) are entry indices.
    pub fn parse(src: &str) -> Self {
        let segments = src
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.parse::<usize>() {
                Ok(index) if index.to_string() == segment => Segment::Index(index),
                _ => Segment::Key(segment.to_string()),
            })
            .collect();

        Self { segments }
    }

    pub fn child(&self, name: &str) -> Self {
        let mut ret = self.clone();
        ret.segments.push(Segment::Key(name.to_string()));
        ret
    }

    pub fn index(&self, index: usize) -> Self {
        let mut ret = self.clone();
        ret.segments.push(Segment::Index(index));
        ret
    }

    pub fn join(&self, other: &FieldPath) -> Self {
        let mut ret = self.clone();
        ret.segments.extend(other.segments.iter().cloned());
        ret
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Proper, non-root prefixes of this path, shortest first.
    pub fn ancestors(&self) -> impl Iterator<Item = FieldPath> {
        let segments = self.segments.clone();

        (1..segments.len()).map(move |len| FieldPath {
            segments: segments[..len].to_vec(),
        })
    }

    /// The value at this path, if every step exists.
    ///
    /// An index step into an object reads the key of the same digits, so
    /// fields with all-digit names resolve.
    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(record, |value, segment| match (segment, value) {
                (Segment::Key(name), Value::Object(fields)) => fields.get(name),
                (Segment::Index(index), Value::Array(entries)) => entries.get(*index),
                (Segment::Index(index), Value::Object(fields)) => fields.get(&index.to_string()),
                _ => None,
            })
    }

    pub fn lookup_mut<'a>(&self, record: &'a mut Value) -> Option<&'a mut Value> {
        self.segments
            .iter()
            .try_fold(record, |value, segment| match (segment, value) {
                (Segment::Key(name), Value::Object(fields)) => fields.get_mut(name),
                (Segment::Index(index), Value::Array(entries)) => entries.get_mut(*index),
                (Segment::Index(index), Value::Object(fields)) => {
                    fields.get_mut(&index.to_string())
                }
                _ => None,
            })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }

            match segment {
                Segment::Key(name) => f.write_str(name)?,
                Segment::Index(index) => write!(f, "{index}")?,
            }
        }

        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(src: &str) -> Self {
        Self::parse(src)
    }
}

/// A field reference inside a conditional-logic expression.
///
/// As written, references are relative to the record holding the field; each
/// leading `../` steps out to the enclosing record. The resolver rewrites
/// them into absolute paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reference {
    /// `up` levels out of the current record, then `path`
    Relative { up: usize, path: FieldPath },

    /// Fully qualified from the root record
    Absolute(FieldPath),

    /// A relative reference that steps out past the root record
    Unreachable(String),
}

impl Reference {
    pub fn parse(src: &str) -> Self {
        let mut rest = src;
        let mut up = 0;

        while let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
            up += 1;
        }

        Reference::Relative {
            up,
            path: FieldPath::parse(rest),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }

    /// Rewrites a relative reference against the chain of enclosing records.
    ///
    /// `scopes` lists the paths of the enclosing records from the root
    /// (always the empty path) to the record holding the field.
    pub fn rewrite(&self, scopes: &[FieldPath]) -> Reference {
        let Reference::Relative { up, path } = self else {
            return self.clone();
        };

        let depth = scopes.len().saturating_sub(1);
        if *up > depth || scopes.is_empty() {
            log::warn!(
                "conditional logic reference `{self}` escapes the root record; treating it as inactive"
            );
            return Reference::Unreachable(self.to_string());
        }

        Reference::Absolute(scopes[depth - up].join(path))
    }

    /// The value this reference points at, for absolute references.
    ///
    /// Relative references are looked up from the root; unreachable ones
    /// never resolve.
    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        match self {
            Reference::Absolute(path) | Reference::Relative { up: 0, path } => path.lookup(record),
            _ => None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Relative { up, path } => {
                for _ in 0..*up {
                    f.write_str("../")?;
                }
                path.fmt(f)
            }
            Reference::Absolute(path) => path.fmt(f),
            Reference::Unreachable(src) => f.write_str(src),
        }
    }
}
