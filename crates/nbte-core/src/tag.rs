use crate::error::NbtError;
use std::fmt;

/// Tag kind enumeration, numbered as on the wire.
///
/// `End` (id 0) terminates compound payloads and marks the undetermined
/// element type of an empty list; it never appears as a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    End,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
    LongArray,
}

impl TagKind {
    pub fn id(self) -> u8 {
        match self {
            TagKind::End => 0,
            TagKind::Byte => 1,
            TagKind::Short => 2,
            TagKind::Int => 3,
            TagKind::Long => 4,
            TagKind::Float => 5,
            TagKind::Double => 6,
            TagKind::ByteArray => 7,
            TagKind::String => 8,
            TagKind::List => 9,
            TagKind::Compound => 10,
            TagKind::IntArray => 11,
            TagKind::LongArray => 12,
        }
    }

    pub fn from_id(id: u8) -> Option<TagKind> {
        let k = match id {
            0 => TagKind::End,
            1 => TagKind::Byte,
            2 => TagKind::Short,
            3 => TagKind::Int,
            4 => TagKind::Long,
            5 => TagKind::Float,
            6 => TagKind::Double,
            7 => TagKind::ByteArray,
            8 => TagKind::String,
            9 => TagKind::List,
            10 => TagKind::Compound,
            11 => TagKind::IntArray,
            12 => TagKind::LongArray,
            _ => return None,
        };
        Some(k)
    }

    pub fn label(self) -> &'static str {
        match self {
            TagKind::End => "End",
            TagKind::Byte => "Byte",
            TagKind::Short => "Short",
            TagKind::Int => "Int",
            TagKind::Long => "Long",
            TagKind::Float => "Float",
            TagKind::Double => "Double",
            TagKind::ByteArray => "ByteArray",
            TagKind::String => "String",
            TagKind::List => "List",
            TagKind::Compound => "Compound",
            TagKind::IntArray => "IntArray",
            TagKind::LongArray => "LongArray",
        }
    }

    pub fn from_label(s: &str) -> Option<TagKind> {
        let k = match s {
            "Byte" => TagKind::Byte,
            "Short" => TagKind::Short,
            "Int" => TagKind::Int,
            "Long" => TagKind::Long,
            "Float" => TagKind::Float,
            "Double" => TagKind::Double,
            "ByteArray" => TagKind::ByteArray,
            "String" => TagKind::String,
            "List" => TagKind::List,
            "Compound" => TagKind::Compound,
            "IntArray" => TagKind::IntArray,
            "LongArray" => TagKind::LongArray,
            _ => return None,
        };
        Some(k)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One typed node of a document: scalar, array, list, or compound.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    List(NbtList),
    Compound(Compound),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Byte(_) => TagKind::Byte,
            Tag::Short(_) => TagKind::Short,
            Tag::Int(_) => TagKind::Int,
            Tag::Long(_) => TagKind::Long,
            Tag::Float(_) => TagKind::Float,
            Tag::Double(_) => TagKind::Double,
            Tag::String(_) => TagKind::String,
            Tag::ByteArray(_) => TagKind::ByteArray,
            Tag::IntArray(_) => TagKind::IntArray,
            Tag::LongArray(_) => TagKind::LongArray,
            Tag::List(_) => TagKind::List,
            Tag::Compound(_) => TagKind::Compound,
        }
    }

    /// Human label; lists include their element kind, e.g. `List[Int]`.
    pub fn kind_label(&self) -> String {
        match self {
            Tag::List(l) => match l.elem() {
                TagKind::End => "List".to_string(),
                k => format!("List[{}]", k.label()),
            },
            other => other.kind().label().to_string(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Tag::Byte(_)
                | Tag::Short(_)
                | Tag::Int(_)
                | Tag::Long(_)
                | Tag::Float(_)
                | Tag::Double(_)
                | Tag::String(_)
        )
    }

    /// Lists and compounds hold addressable child tags; arrays do not.
    pub fn is_container(&self) -> bool {
        matches!(self, Tag::List(_) | Tag::Compound(_))
    }

    /// Entry count for compounds/lists, element count for arrays, 0 for scalars.
    pub fn child_count(&self) -> usize {
        match self {
            Tag::Compound(c) => c.len(),
            Tag::List(l) => l.len(),
            Tag::ByteArray(v) => v.len(),
            Tag::IntArray(v) => v.len(),
            Tag::LongArray(v) => v.len(),
            _ => 0,
        }
    }
}

/// Ordered mapping of unique string keys to tags.
///
/// Insertion order is preserved and re-serialized as-is; inserting an
/// existing key replaces the value in place without moving the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: Vec<(String, Tag)>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Insert-or-replace; returns the prior value when the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: Tag) -> Option<Tag> {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Ordered, homogeneous sequence of tags sharing one element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtList {
    elem: TagKind,
    items: Vec<Tag>,
}

impl Default for NbtList {
    fn default() -> Self {
        Self::new()
    }
}

impl NbtList {
    /// Empty list with undetermined element kind; the first push fixes it.
    pub fn new() -> Self {
        Self {
            elem: TagKind::End,
            items: Vec::new(),
        }
    }

    /// Empty list with a declared element kind (as read from the wire).
    pub fn with_elem(elem: TagKind) -> Self {
        Self {
            elem,
            items: Vec::new(),
        }
    }

    pub fn elem(&self) -> TagKind {
        self.elem
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tag> {
        self.items.get_mut(index)
    }

    /// Append, returning the new element's index. Rejects a kind that
    /// differs from the established element kind; an undetermined list
    /// adopts the kind of the first element.
    pub fn push(&mut self, value: Tag) -> Result<usize, NbtError> {
        if self.elem == TagKind::End {
            self.elem = value.kind();
        } else if value.kind() != self.elem {
            return Err(NbtError::Type(format!(
                "cannot insert {} into List[{}]",
                value.kind().label(),
                self.elem.label()
            )));
        }
        self.items.push(value);
        Ok(self.items.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Option<Tag> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }
}
