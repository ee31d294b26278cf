use labwire_data::{parse_type_tag, TagError, Type};

fn list(elem: Type, depth: usize) -> Type {
    Type::List {
        elem: Some(Box::new(elem)),
        depth,
    }
}

#[test]
fn tag_parse_matrix() {
    let cases: Vec<(&str, Type)> = vec![
        ("_", Type::None),
        ("b", Type::Bool),
        ("i", Type::Int),
        ("w", Type::UInt),
        ("s", Type::Str),
        ("t", Type::Time),
        ("y", Type::Bytes),
        // clusters
        ("ii", Type::Cluster(vec![Type::Int, Type::Int])),
        (
            "b(t)",
            Type::Cluster(vec![Type::Bool, Type::Cluster(vec![Type::Time])]),
        ),
        ("(ss)", Type::Cluster(vec![Type::Str, Type::Str])),
        ("(s)", Type::Cluster(vec![Type::Str])),
        (
            "((siw))",
            Type::Cluster(vec![Type::Cluster(vec![
                Type::Str,
                Type::Int,
                Type::UInt,
            ])]),
        ),
        // lists
        ("*b", list(Type::Bool, 1)),
        ("*_", Type::empty_list(1)),
        ("*2b", list(Type::Bool, 2)),
        ("*2_", Type::empty_list(2)),
        ("*2v[Hz]", list(Type::Value(Some("Hz".into())), 2)),
        ("*3v", list(Type::Value(None), 3)),
        ("*v[]", list(Type::Value(Some(String::new())), 1)),
        // unit types
        ("v", Type::Value(None)),
        ("v[]", Type::Value(Some(String::new()))),
        ("v[m/s]", Type::Value(Some("m/s".into()))),
        ("c", Type::Complex(None)),
        ("c[]", Type::Complex(Some(String::new()))),
        ("c[m/s]", Type::Complex(Some("m/s".into()))),
        // errors
        ("E", Type::Error(None)),
        ("Ew", Type::Error(Some(Box::new(Type::UInt)))),
        (
            "E(w)",
            Type::Error(Some(Box::new(Type::Cluster(vec![Type::UInt])))),
        ),
        // adjacency of composite expressions
        (
            "*b*i",
            Type::Cluster(vec![list(Type::Bool, 1), list(Type::Int, 1)]),
        ),
    ];
    for (tag, expected) in cases {
        let parsed = parse_type_tag(tag).unwrap();
        assert_eq!(parsed, expected, "parse of {tag:?}");
        // Canonical printing: clusters gain surrounding parentheses, every
        // other form prints back exactly.
        let printed = parsed.to_string();
        if matches!(parsed, Type::Cluster(_)) && !tag.starts_with('(') {
            assert_eq!(printed, format!("({tag})"));
        } else {
            assert_eq!(printed, tag);
        }
        assert_eq!(parse_type_tag(&printed).unwrap(), parsed, "reparse of {printed:?}");
    }
}

#[test]
fn tag_comment_matrix() {
    let cases: Vec<(&str, Type)> = vec![
        ("", Type::None),
        (" ", Type::None),
        (": this is a test", Type::None),
        ("  : this is a test", Type::None),
        ("   i  ", Type::Int),
        ("   i  :", Type::Int),
        ("   i  : blah", Type::Int),
    ];
    for (tag, expected) in cases {
        assert_eq!(parse_type_tag(tag).unwrap(), expected, "parse of {tag:?}");
    }
}

#[test]
fn tag_error_matrix() {
    let cases: Vec<(&str, TagError)> = vec![
        ("()", TagError::EmptyCluster),
        ("(si", TagError::UnterminatedCluster),
        ("b)", TagError::UnmatchedParen),
        ("v[m/s", TagError::UnterminatedUnit),
        ("*0i", TagError::ZeroListDepth),
        ("q", TagError::UnknownToken('q')),
        ("(bq)", TagError::UnknownToken('q')),
    ];
    for (tag, expected) in cases {
        assert_eq!(parse_type_tag(tag), Err(expected), "parse of {tag:?}");
    }
}

#[test]
fn canonical_tag_roundtrip() {
    // parse(print(parse(tag))) == parse(tag) across the grammar.
    let tags = [
        "_", "b", "i", "w", "s", "t", "y", "?", "v", "v[]", "v[m/s]", "c[GHz]", "ii", "(s)",
        "b(t)", "((siw))", "*b", "*_", "*2_", "*2v[Hz]", "*3v", "*(v, v)", "E", "Ew", "E(w)",
        "E*s", "*b*i", "si*b", "((s(si*b)) (s(si*b)b))",
    ];
    for tag in tags {
        let parsed = parse_type_tag(tag).unwrap();
        let reparsed = parse_type_tag(&parsed.to_string()).unwrap();
        assert_eq!(reparsed, parsed, "canonical roundtrip of {tag:?}");
    }
}
