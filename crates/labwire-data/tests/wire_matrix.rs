use labwire_data::{
    flatten, flatten_tagged, unflatten, unflatten_tagged, Array, Complex64, Data, Timestamp,
    UnflattenError,
};

#[test]
fn scalar_wire_matrix() {
    // Byte-exact vectors: this layout is the interoperability contract.
    let cases: Vec<(Data, &str, Vec<u8>)> = vec![
        (Data::None, "_", vec![]),
        (Data::Bool(false), "b", vec![0]),
        (Data::Bool(true), "b", vec![1]),
        (Data::Int(5), "i", vec![0x00, 0x00, 0x00, 0x05]),
        (Data::Int(-5), "i", vec![0xff, 0xff, 0xff, 0xfb]),
        (Data::UInt(5), "w", vec![0x00, 0x00, 0x00, 0x05]),
        (
            Data::UInt(0xffff_ffff),
            "w",
            vec![0xff, 0xff, 0xff, 0xff],
        ),
        (
            Data::from("foo bar"),
            "s",
            vec![0, 0, 0, 7, b'f', b'o', b'o', b' ', b'b', b'a', b'r'],
        ),
        // UTF-8 length counts bytes, not characters
        (Data::from("λ"), "s", vec![0, 0, 0, 2, 0xce, 0xbb]),
        (
            Data::Bytes(vec![0x00, 0xff]),
            "y",
            vec![0, 0, 0, 2, 0x00, 0xff],
        ),
        (
            Data::Float(1.0),
            "v[]",
            vec![0x3f, 0xf0, 0, 0, 0, 0, 0, 0],
        ),
        (
            Data::value(1.0, "m"),
            "v[m]",
            vec![0x3f, 0xf0, 0, 0, 0, 0, 0, 0],
        ),
        (
            Data::Complex(Complex64::new(1.0, -2.0)),
            "c[]",
            vec![
                0x3f, 0xf0, 0, 0, 0, 0, 0, 0, 0xc0, 0x00, 0, 0, 0, 0, 0, 0,
            ],
        ),
        (
            Data::Time(Timestamp::new(1, 0x8000_0000_0000_0000)),
            "t",
            vec![0, 0, 0, 0, 0, 0, 0, 1, 0x80, 0, 0, 0, 0, 0, 0, 0],
        ),
    ];
    for (data, tag, bytes) in cases {
        let flat = flatten(&data).unwrap();
        assert_eq!(flat.tag_string(), tag, "tag for {data:?}");
        assert_eq!(flat.bytes(), &bytes[..], "bytes for {data:?}");
        assert_eq!(unflatten(&bytes, flat.tag()).unwrap(), data);
    }
}

#[test]
fn cluster_concatenates_elements_without_delimiters() {
    let data = Data::Cluster(vec![Data::from("a"), Data::UInt(1)]);
    let flat = flatten(&data).unwrap();
    assert_eq!(flat.tag_string(), "(sw)");
    assert_eq!(flat.bytes(), &[0, 0, 0, 1, b'a', 0, 0, 0, 1]);
}

#[test]
fn list_dimensions_come_first_outer_to_inner() {
    let nested = Data::List(vec![
        Data::List(vec![Data::Int(1), Data::Int(2), Data::Int(3)]),
        Data::List(vec![Data::Int(4), Data::Int(5), Data::Int(6)]),
    ]);
    let flat = flatten(&nested).unwrap();
    assert_eq!(flat.tag_string(), "*2i");
    let mut expected = vec![0, 0, 0, 2, 0, 0, 0, 3];
    for n in 1..=6u8 {
        expected.extend_from_slice(&[0, 0, 0, n]);
    }
    assert_eq!(flat.bytes(), &expected[..]);
}

#[test]
fn empty_lists_write_only_dimensions() {
    let flat = flatten(&Data::List(vec![])).unwrap();
    assert_eq!(flat.tag_string(), "*_");
    assert_eq!(flat.bytes(), &[0, 0, 0, 0]);

    let flat = flatten(&Data::List(vec![Data::List(vec![])])).unwrap();
    assert_eq!(flat.tag_string(), "*2_");
    assert_eq!(flat.bytes(), &[0, 0, 0, 1, 0, 0, 0, 0]);
}

#[test]
fn error_records_carry_code_message_then_payload() {
    let data = Data::error_with(-7, "bad", Data::from(1u32));
    let flat = flatten(&data).unwrap();
    assert_eq!(flat.tag_string(), "Ew");
    assert_eq!(
        flat.bytes(),
        &[
            0xff, 0xff, 0xff, 0xf9, // code
            0, 0, 0, 3, b'b', b'a', b'd', // message
            0, 0, 0, 1, // payload
        ]
    );
    assert_eq!(unflatten_tagged(flat.bytes(), "Ew").unwrap(), data);
}

#[test]
fn ragged_nested_lists_are_rejected() {
    let ragged = Data::List(vec![
        Data::List(vec![Data::Int(1), Data::Int(2)]),
        Data::List(vec![Data::Int(3)]),
    ]);
    assert!(flatten(&ragged).is_err());
}

#[test]
fn ragged_data_fits_a_list_of_lists_type() {
    // `**i` keeps each row self-contained, so raggedness is fine there.
    let ragged = Data::List(vec![
        Data::List(vec![Data::Int(1), Data::Int(2)]),
        Data::List(vec![Data::Int(3)]),
    ]);
    let flat = flatten_tagged(&ragged, &["**i"]).unwrap();
    assert_eq!(flat.tag_string(), "**i");
    assert_eq!(
        flat.bytes(),
        &[
            0, 0, 0, 2, // outer dimension
            0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 2, // first row
            0, 0, 0, 1, 0, 0, 0, 3, // second row
        ]
    );
    let back = unflatten(flat.bytes(), flat.tag()).unwrap();
    assert_eq!(
        back,
        Data::List(vec![
            Data::Array(Array::ints(vec![1, 2])),
            Data::Array(Array::ints(vec![3])),
        ])
    );
}

#[test]
fn declared_lengths_must_fit_the_buffer() {
    // A two-element `*i` body with only one element present.
    assert!(matches!(
        unflatten_tagged(&[0, 0, 0, 2, 0, 0, 0, 1], "*i"),
        Err(UnflattenError::Buffer(_))
    ));
    // Unknown-element lists must be empty.
    assert!(matches!(
        unflatten_tagged(&[0, 0, 0, 1], "*_"),
        Err(UnflattenError::ElementsWithoutType(1))
    ));
}
