use std::fs;
use std::path::{Path, PathBuf};

use crate::binfmt::{self, Compression};
use crate::binfmt_write;
use crate::coerce;
use crate::error::{NbtError, PathError, Result};
use crate::path::{NodePath, PathSeg};
use crate::tag::{Compound, Tag};

/// One open document: the owned root tag plus its source location,
/// envelope, and a dirty flag (true after any mutation since last save).
///
/// Every mutation is all-or-nothing: on any failure the tree is left
/// exactly as before the call.
#[derive(Debug, Clone)]
pub struct Document {
    root_name: String,
    root: Tag,
    source: Option<PathBuf>,
    compression: Compression,
    dirty: bool,
}

/// One row of the rendering snapshot handed to the presentation layer.
#[derive(Debug, Clone)]
pub struct NodeEntry {
    pub path: NodePath,
    pub name: String,
    pub kind_label: String,
    pub value_text: String,
    pub is_container: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Fresh document: empty unnamed root compound, raw envelope.
    pub fn new() -> Self {
        Self {
            root_name: String::new(),
            root: Tag::Compound(Compound::new()),
            source: None,
            compression: Compression::None,
            dirty: false,
        }
    }

    pub fn load(path: &Path) -> Result<Document> {
        let data = fs::read(path)?;
        let mut doc = Self::load_bytes(&data)?;
        doc.source = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Decode a document from bytes, auto-detecting the envelope.
    pub fn load_bytes(data: &[u8]) -> Result<Document> {
        let (compression, root_name, root) = binfmt::parse_document(data)?;
        Ok(Document {
            root_name,
            root: Tag::Compound(root),
            source: None,
            compression,
            dirty: false,
        })
    }

    /// Serialize the live tree with the envelope the document was loaded
    /// with (raw stays raw, compressed stays compressed).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let Tag::Compound(root) = &self.root else {
            return Err(NbtError::Type("document root must be a compound".to_string()));
        };
        binfmt_write::encode_document(&self.root_name, root, self.compression)
    }

    /// Write back to the source path; clears the dirty flag.
    pub fn save(&mut self) -> Result<PathBuf> {
        let Some(target) = self.source.clone() else {
            return Err(NbtError::Validation(
                "document has no source path; use save_to".to_string(),
            ));
        };
        self.save_to(&target)?;
        Ok(target)
    }

    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        self.source = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    pub fn root(&self) -> &Tag {
        &self.root
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn set_compression(&mut self, compression: Compression) {
        self.compression = compression;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Walk segments from the root. `NotFound` for an absent key or an
    /// index out of bounds; `TypeMismatch` when a segment descends into a
    /// node with no addressable children of that shape.
    pub fn resolve(&self, path: &NodePath) -> Result<&Tag> {
        let mut cur = &self.root;
        let mut walked = NodePath::root();
        for seg in path.segments() {
            let here = walked.child(seg.clone());
            cur = match (cur, seg) {
                (Tag::Compound(c), PathSeg::Key(k)) => c
                    .get(k)
                    .ok_or_else(|| PathError::NotFound(here.to_string()))?,
                (Tag::List(l), PathSeg::Index(i)) => l
                    .get(*i)
                    .ok_or_else(|| PathError::NotFound(here.to_string()))?,
                (other, _) => {
                    return Err(PathError::TypeMismatch {
                        path: walked.to_string(),
                        kind: other.kind().label(),
                    }
                    .into());
                }
            };
            walked = here;
        }
        Ok(cur)
    }

    fn resolve_mut(&mut self, path: &NodePath) -> Result<&mut Tag> {
        let mut cur = &mut self.root;
        let mut walked = NodePath::root();
        for seg in path.segments() {
            let here = walked.child(seg.clone());
            cur = match (cur, seg) {
                (Tag::Compound(c), PathSeg::Key(k)) => c
                    .get_mut(k)
                    .ok_or_else(|| PathError::NotFound(here.to_string()))?,
                (Tag::List(l), PathSeg::Index(i)) => l
                    .get_mut(*i)
                    .ok_or_else(|| PathError::NotFound(here.to_string()))?,
                (other, _) => {
                    return Err(PathError::TypeMismatch {
                        path: walked.to_string(),
                        kind: other.kind().label(),
                    }
                    .into());
                }
            };
            walked = here;
        }
        Ok(cur)
    }

    /// Replace the scalar at `path` with a value of the same kind.
    pub fn set_value(&mut self, path: &NodePath, value: Tag) -> Result<()> {
        let existing = self.resolve(path)?;
        if !existing.is_scalar() {
            return Err(NbtError::Type(format!(
                "cannot set value of {} node at {path}",
                existing.kind_label()
            )));
        }
        if existing.kind() != value.kind() {
            return Err(NbtError::Type(format!(
                "expected {} at {path}, got {}",
                existing.kind().label(),
                value.kind().label()
            )));
        }
        let slot = self.resolve_mut(path)?;
        *slot = value;
        self.dirty = true;
        Ok(())
    }

    /// Insert-or-replace a keyed child under the compound at `parent`.
    pub fn insert_child(&mut self, parent: &NodePath, key: &str, value: Tag) -> Result<()> {
        if key.is_empty() {
            return Err(NbtError::Validation("key must not be empty".to_string()));
        }
        match self.resolve_mut(parent)? {
            Tag::Compound(c) => {
                c.insert(key, value);
                self.dirty = true;
                Ok(())
            }
            other => Err(NbtError::Type(format!(
                "cannot add a child to {} node at {parent}",
                other.kind_label()
            ))),
        }
    }

    /// Append to the list at `list_path`; returns the new element's index.
    pub fn insert_element(&mut self, list_path: &NodePath, value: Tag) -> Result<usize> {
        match self.resolve_mut(list_path)? {
            Tag::List(l) => {
                let index = l.push(value)?;
                self.dirty = true;
                Ok(index)
            }
            other => Err(PathError::TypeMismatch {
                path: list_path.to_string(),
                kind: other.kind().label(),
            }
            .into()),
        }
    }

    /// Remove the node at `path` from its parent container. The root can
    /// never be deleted. Deleting a list element shifts the indices of its
    /// successors; previously captured paths into that list must be
    /// recomputed from a fresh snapshot.
    pub fn delete_node(&mut self, path: &NodePath) -> Result<()> {
        let (parent, last) = path.split_last().ok_or(PathError::IsRoot)?;
        self.resolve(path)?;
        let removed = match (self.resolve_mut(&parent)?, last) {
            (Tag::Compound(c), PathSeg::Key(k)) => c.remove(k),
            (Tag::List(l), PathSeg::Index(i)) => l.remove(*i),
            _ => None,
        };
        if removed.is_none() {
            return Err(PathError::NotFound(path.to_string()).into());
        }
        self.dirty = true;
        Ok(())
    }

    /// Ordered pre-order snapshot of the whole tree for rendering:
    /// compound entries in insertion order, list elements by index.
    pub fn snapshot(&self) -> Vec<NodeEntry> {
        let mut out = Vec::new();
        out.push(entry(NodePath::root(), self.display_root_name(), &self.root));
        walk(&self.root, &NodePath::root(), &mut out);
        out
    }

    fn display_root_name(&self) -> String {
        if !self.root_name.is_empty() {
            return self.root_name.clone();
        }
        self.source
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "(root)".to_string())
    }
}

fn walk(tag: &Tag, path: &NodePath, out: &mut Vec<NodeEntry>) {
    match tag {
        Tag::Compound(c) => {
            for (key, value) in c.iter() {
                let child = path.join_key(key);
                out.push(entry(child.clone(), key.to_string(), value));
                walk(value, &child, out);
            }
        }
        Tag::List(l) => {
            for (i, value) in l.iter().enumerate() {
                let child = path.join_index(i);
                out.push(entry(child.clone(), format!("[{i}]"), value));
                walk(value, &child, out);
            }
        }
        _ => {}
    }
}

fn entry(path: NodePath, name: String, tag: &Tag) -> NodeEntry {
    let value_text = coerce::format_tag(tag)
        .unwrap_or_else(|| format!("{} entries", tag.child_count()));
    NodeEntry {
        path,
        name,
        kind_label: tag.kind_label(),
        value_text,
        is_container: tag.is_container(),
    }
}
