use nbte_core::{
    Compound, Compression, Document, NbtError, NbtList, NodePath, ParseError, PathError, Tag,
    TagKind, format_tag, parse_tag,
};

fn sample_doc() -> Document {
    let mut doc = Document::new();
    doc.insert_child(&NodePath::root(), "Level", Tag::Compound(Compound::new()))
        .unwrap();
    let level = NodePath::parse("/Level");
    doc.insert_child(&level, "Name", Tag::String("World".into()))
        .unwrap();
    doc.insert_child(&level, "Health", Tag::Int(20)).unwrap();
    doc
}

#[test]
fn roundtrip_raw_envelope() {
    let mut doc = Document::new();
    let root = NodePath::root();
    doc.insert_child(&root, "b", Tag::Byte(-7)).unwrap();
    doc.insert_child(&root, "s", Tag::Short(-300)).unwrap();
    doc.insert_child(&root, "i", Tag::Int(123456)).unwrap();
    doc.insert_child(&root, "l", Tag::Long(i64::MIN)).unwrap();
    doc.insert_child(&root, "f", Tag::Float(3.5)).unwrap();
    doc.insert_child(&root, "d", Tag::Double(-0.25)).unwrap();
    doc.insert_child(&root, "str", Tag::String("hello".into()))
        .unwrap();
    doc.insert_child(&root, "ba", Tag::ByteArray(vec![-1, 0, 127]))
        .unwrap();
    doc.insert_child(&root, "ia", Tag::IntArray(vec![1, -2, 3]))
        .unwrap();
    doc.insert_child(&root, "la", Tag::LongArray(vec![i64::MAX]))
        .unwrap();
    doc.insert_child(&root, "empty", Tag::List(NbtList::new()))
        .unwrap();
    doc.insert_child(&root, "empty_int", Tag::List(NbtList::with_elem(TagKind::Int)))
        .unwrap();
    doc.insert_child(&root, "lst", Tag::List(NbtList::new()))
        .unwrap();
    let lst = NodePath::parse("/lst");
    let mut inner = Compound::new();
    inner.insert("x", Tag::Int(1));
    doc.insert_element(&lst, Tag::Compound(inner)).unwrap();

    let bytes = doc.to_bytes().unwrap();
    assert_eq!(bytes[0], 0x0a);
    let back = Document::load_bytes(&bytes).unwrap();
    assert_eq!(back.compression(), Compression::None);
    assert_eq!(back.root(), doc.root());

    // an empty list's declared element kind survives the wire
    let t = back.resolve(&NodePath::parse("/empty_int")).unwrap();
    assert_eq!(t.kind_label(), "List[Int]");
    assert_eq!(t.child_count(), 0);
    let t = back.resolve(&NodePath::parse("/empty")).unwrap();
    assert_eq!(t.kind_label(), "List");
}

#[test]
fn roundtrip_gzip_and_zlib_envelopes() {
    let mut doc = sample_doc();

    doc.set_compression(Compression::Gzip);
    let gz = doc.to_bytes().unwrap();
    assert_eq!(&gz[..2], &[0x1f, 0x8b]);
    let back = Document::load_bytes(&gz).unwrap();
    assert_eq!(back.compression(), Compression::Gzip);
    assert_eq!(back.root(), doc.root());

    doc.set_compression(Compression::Zlib);
    let zl = doc.to_bytes().unwrap();
    assert_eq!(zl[0], 0x78);
    let back = Document::load_bytes(&zl).unwrap();
    assert_eq!(back.compression(), Compression::Zlib);
    assert_eq!(back.root(), doc.root());
}

#[test]
fn save_and_load_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("level.dat");
    let mut doc = sample_doc();
    assert!(doc.is_dirty());
    doc.save_to(&p).unwrap();
    assert!(!doc.is_dirty());

    let back = Document::load(&p).unwrap();
    assert_eq!(back.source(), Some(p.as_path()));
    assert_eq!(back.root(), doc.root());
    assert!(!back.is_dirty());
}

#[test]
fn unrecognized_header_is_a_format_error() {
    let err = Document::load_bytes(&[0xff, 0x00, 0x01]).unwrap_err();
    assert!(matches!(err, NbtError::Format(_)), "got {err:?}");
    let err = Document::load_bytes(&[]).unwrap_err();
    assert!(matches!(err, NbtError::Format(_)));
}

#[test]
fn truncated_stream_is_a_format_error() {
    let bytes = sample_doc().to_bytes().unwrap();
    let err = Document::load_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err, NbtError::Format(_)), "got {err:?}");
}

#[test]
fn numeric_coercion_boundaries() {
    for (kind, min, max, above) in [
        (TagKind::Byte, "-128", "127", "128"),
        (TagKind::Short, "-32768", "32767", "32768"),
        (TagKind::Int, "-2147483648", "2147483647", "2147483648"),
        (
            TagKind::Long,
            "-9223372036854775808",
            "9223372036854775807",
            "9223372036854775808",
        ),
    ] {
        let lo = parse_tag(kind, min).unwrap();
        assert_eq!(format_tag(&lo).unwrap(), min);
        let hi = parse_tag(kind, max).unwrap();
        assert_eq!(format_tag(&hi).unwrap(), max);
        assert!(matches!(
            parse_tag(kind, above),
            Err(ParseError::OutOfRange { .. })
        ));
    }
    assert!(matches!(
        parse_tag(TagKind::Int, "12x"),
        Err(ParseError::InvalidNumber { .. })
    ));

    // float kinds: the largest Float survives the canonical text form,
    // anything beyond the kind's width is a range failure
    let fmax = Tag::Float(f32::MAX);
    let text = format_tag(&fmax).unwrap();
    assert_eq!(parse_tag(TagKind::Float, &text).unwrap(), fmax);
    assert!(matches!(
        parse_tag(TagKind::Float, "3.5e38"),
        Err(ParseError::OutOfRange { .. })
    ));
    assert!(matches!(
        parse_tag(TagKind::Double, "1e999"),
        Err(ParseError::OutOfRange { .. })
    ));
    assert!(matches!(
        parse_tag(TagKind::Double, "NaN"),
        Err(ParseError::InvalidNumber { .. })
    ));
}

#[test]
fn float_and_string_coercion() {
    let f = parse_tag(TagKind::Float, "3.5").unwrap();
    assert_eq!(f, Tag::Float(3.5));
    assert_eq!(format_tag(&f).unwrap(), "3.500000");
    assert_eq!(parse_tag(TagKind::Float, "3.500000").unwrap(), f);

    let d = parse_tag(TagKind::Double, "-0.25").unwrap();
    assert_eq!(format_tag(&d).unwrap(), "-0.250000");

    // quotes are optional on input, stripped when paired
    assert_eq!(
        parse_tag(TagKind::String, "\"hi\"").unwrap(),
        Tag::String("hi".into())
    );
    assert_eq!(
        parse_tag(TagKind::String, "hi").unwrap(),
        Tag::String("hi".into())
    );
    assert_eq!(format_tag(&Tag::String("hi".into())).unwrap(), "\"hi\"");

    assert_eq!(
        format_tag(&Tag::ByteArray(vec![1, 2, 3])).unwrap(),
        "ByteArray[3]"
    );
    assert!(format_tag(&Tag::Compound(Compound::new())).is_none());
}

#[test]
fn insert_then_resolve() {
    let mut doc = sample_doc();
    let level = NodePath::parse("/Level");
    doc.insert_child(&level, "Seed", Tag::Long(42)).unwrap();
    assert_eq!(
        doc.resolve(&NodePath::parse("/Level/Seed")).unwrap(),
        &Tag::Long(42)
    );
}

#[test]
fn insert_replaces_existing_key_in_place() {
    let mut doc = sample_doc();
    let level = NodePath::parse("/Level");
    doc.insert_child(&level, "Name", Tag::String("Other".into()))
        .unwrap();
    assert_eq!(
        doc.resolve(&NodePath::parse("/Level/Name")).unwrap(),
        &Tag::String("Other".into())
    );
    // entry kept its position and no duplicate appeared
    let names: Vec<String> = doc
        .snapshot()
        .into_iter()
        .filter(|e| e.path.len() == 2)
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Name", "Health"]);
}

#[test]
fn insert_child_validation_and_type_errors() {
    let mut doc = sample_doc();
    let err = doc
        .insert_child(&NodePath::parse("/Level"), "", Tag::Int(1))
        .unwrap_err();
    assert!(matches!(err, NbtError::Validation(_)));

    let err = doc
        .insert_child(&NodePath::parse("/Level/Health"), "k", Tag::Int(1))
        .unwrap_err();
    assert!(matches!(err, NbtError::Type(_)), "got {err:?}");
}

#[test]
fn set_value_scenario() {
    let mut doc = sample_doc();
    let health = NodePath::parse("/Level/Health");
    let parsed = parse_tag(TagKind::Int, "15").unwrap();
    doc.set_value(&health, parsed).unwrap();
    assert_eq!(doc.resolve(&health).unwrap(), &Tag::Int(15));
    assert!(doc.is_dirty());

    // kind changes are rejected and leave the node alone
    let err = doc.set_value(&health, Tag::String("x".into())).unwrap_err();
    assert!(matches!(err, NbtError::Type(_)));
    assert_eq!(doc.resolve(&health).unwrap(), &Tag::Int(15));

    // containers have no scalar value
    let err = doc
        .set_value(&NodePath::parse("/Level"), Tag::Int(0))
        .unwrap_err();
    assert!(matches!(err, NbtError::Type(_)));
}

#[test]
fn resolve_failures() {
    let doc = sample_doc();
    let err = doc.resolve(&NodePath::parse("/Level/Missing")).unwrap_err();
    assert!(matches!(err, NbtError::Path(PathError::NotFound(_))));

    // descending into a scalar
    let err = doc
        .resolve(&NodePath::parse("/Level/Health/x"))
        .unwrap_err();
    assert!(matches!(err, NbtError::Path(PathError::TypeMismatch { .. })));

    // indexing a compound
    let err = doc.resolve(&NodePath::parse("/Level/0")).unwrap_err();
    assert!(matches!(err, NbtError::Path(PathError::TypeMismatch { .. })));
}

#[test]
fn delete_node_semantics() {
    let mut doc = sample_doc();
    let name = NodePath::parse("/Level/Name");
    doc.delete_node(&name).unwrap();
    let err = doc.resolve(&name).unwrap_err();
    assert!(matches!(err, NbtError::Path(PathError::NotFound(_))));
    assert_eq!(
        doc.resolve(&NodePath::parse("/Level")).unwrap().child_count(),
        1
    );

    let err = doc.delete_node(&NodePath::root()).unwrap_err();
    assert!(matches!(err, NbtError::Path(PathError::IsRoot)));

    let err = doc.delete_node(&NodePath::parse("/Nope")).unwrap_err();
    assert!(matches!(err, NbtError::Path(PathError::NotFound(_))));
}

#[test]
fn list_subtype_rules() {
    let mut doc = Document::new();
    doc.insert_child(&NodePath::root(), "lst", Tag::List(NbtList::new()))
        .unwrap();
    let lst = NodePath::parse("/lst");

    // empty list adopts the first element's kind
    assert_eq!(doc.insert_element(&lst, Tag::Int(1)).unwrap(), 0);
    assert_eq!(doc.insert_element(&lst, Tag::Int(2)).unwrap(), 1);

    // a differing kind is rejected and the list is unchanged
    let err = doc
        .insert_element(&lst, Tag::String("no".into()))
        .unwrap_err();
    assert!(matches!(err, NbtError::Type(_)), "got {err:?}");
    assert_eq!(doc.resolve(&lst).unwrap().child_count(), 2);

    // appending to a non-list is a path type mismatch
    let err = doc
        .insert_element(&NodePath::root(), Tag::Int(1))
        .unwrap_err();
    assert!(matches!(err, NbtError::Path(PathError::TypeMismatch { .. })));
}

#[test]
fn snapshot_is_preorder_with_render_fields() {
    let doc = sample_doc();
    let snap = doc.snapshot();
    let paths: Vec<String> = snap.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["/", "/Level", "/Level/Name", "/Level/Health"]);

    let root = &snap[0];
    assert!(root.is_container);
    assert_eq!(root.kind_label, "Compound");
    assert_eq!(root.name, "(root)");

    let health = &snap[3];
    assert_eq!(health.kind_label, "Int");
    assert_eq!(health.value_text, "20");
    assert!(!health.is_container);

    let name = &snap[2];
    assert_eq!(name.value_text, "\"World\"");
}

#[test]
fn zip_backup_of_document_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("level.dat");
    let mut doc = sample_doc();
    doc.save_to(&p).unwrap();
    let zip = nbte_core::editor::zip_backup_file(&p).unwrap();
    assert!(zip.exists());
    assert!(zip.extension().is_some_and(|e| e == "zip"));
}

#[test]
fn path_display_and_parse() {
    let p = NodePath::parse("/Level/Pos/1");
    assert_eq!(p.to_string(), "/Level/Pos/1");
    assert_eq!(p.len(), 3);
    assert_eq!(NodePath::parse("/").to_string(), "/");
    assert!(NodePath::parse("").is_root());

    let weird = NodePath::root().join_key("a/b~c");
    assert_eq!(weird.to_string(), "/a~1b~0c");
    assert_eq!(NodePath::parse("/a~1b~0c"), weird);
}
