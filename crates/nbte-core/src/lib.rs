//! nbte-core: data model, codec, and editing engine for NBT documents
//!
//! This crate focuses on a small, well-factored surface:
//! - Tag model: scalars, arrays, homogeneous lists, order-preserving compounds
//! - Binary reader/writer with transparent gzip/zlib envelope detection
//! - Path-addressed document engine (resolve, set, insert, delete, snapshots)
//! - Canonical text coercion (`format_tag`/`parse_tag` round trip)
//! - Ordered search index with circular forward/backward navigation
//!
pub mod binfmt;
pub mod binfmt_write;
pub mod coerce;
pub mod edit;
pub mod editor;
pub mod error;
pub mod json;
pub mod path;
pub mod search;
pub mod tag;

pub use binfmt::Compression;
pub use coerce::{format_tag, parse_tag};
pub use edit::{Document, NodeEntry};
pub use error::{NbtError, ParseError, PathError, Result};
pub use path::{NodePath, PathSeg};
pub use search::{SearchIndex, SearchQuery};
pub use tag::{Compound, NbtList, Tag, TagKind};
