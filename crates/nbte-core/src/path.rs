use std::fmt;

/// One path segment: a compound key or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSeg {
    Key(String),
    Index(usize),
}

/// Ordered sequence of segments addressing a node from the document root.
///
/// Paths are derived, not stored pointers: a path captured before a
/// structural mutation is not guaranteed valid after it; re-resolve from a
/// fresh snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segs: Vec<PathSeg>,
}

impl NodePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    pub fn segments(&self) -> &[PathSeg] {
        &self.segs
    }

    pub fn child(&self, seg: PathSeg) -> NodePath {
        let mut segs = self.segs.clone();
        segs.push(seg);
        NodePath { segs }
    }

    pub fn join_key(&self, key: &str) -> NodePath {
        self.child(PathSeg::Key(key.to_string()))
    }

    pub fn join_index(&self, index: usize) -> NodePath {
        self.child(PathSeg::Index(index))
    }

    /// Prefix path and final segment; `None` for the root.
    pub fn split_last(&self) -> Option<(NodePath, &PathSeg)> {
        let (last, rest) = self.segs.split_last()?;
        Some((
            NodePath {
                segs: rest.to_vec(),
            },
            last,
        ))
    }

    /// Parse the `Display` form back into a path: `/`-separated segments,
    /// an all-digit segment is a list index. `/` alone (or "") is the root.
    /// Keys use the `~0`/`~1` escapes for literal `~` and `/`.
    pub fn parse(s: &str) -> NodePath {
        let mut segs = Vec::new();
        for tok in s.split('/') {
            if tok.is_empty() {
                continue;
            }
            if tok.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(i) = tok.parse::<usize>() {
                    segs.push(PathSeg::Index(i));
                    continue;
                }
            }
            segs.push(PathSeg::Key(unescape_token(tok)));
        }
        NodePath { segs }
    }
}

impl FromIterator<PathSeg> for NodePath {
    fn from_iter<T: IntoIterator<Item = PathSeg>>(iter: T) -> Self {
        NodePath {
            segs: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segs.is_empty() {
            return f.write_str("/");
        }
        for seg in &self.segs {
            match seg {
                PathSeg::Key(k) => write!(f, "/{}", escape_token(k))?,
                PathSeg::Index(i) => write!(f, "/{}", i)?,
            }
        }
        Ok(())
    }
}

fn escape_token(tok: &str) -> String {
    let s = tok.replace('~', "~0");
    s.replace('/', "~1")
}

fn unescape_token(tok: &str) -> String {
    let s = tok.replace("~1", "/");
    s.replace("~0", "~")
}
