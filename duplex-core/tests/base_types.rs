//! Scalars written as node text and as an attribute, then read back.

use core::fmt::Debug;

use duplex_core::{Document, Error, Scalar, Session};

/// Write `text` and `attrib` to `<value attrib="..">..</value>`, read them
/// into `stale` copies and return what was read.
fn round_trip<V: Scalar + Debug>(text: V, attrib: V, stale: V) -> (V, V) {
    let mut doc = Document::new();
    {
        let session = Session::writer_with_root(&mut doc, "TestSerializeBaseTypes");
        let node = session.serializer().child("value");
        node.text(&mut text.clone()).unwrap();
        node.attribute("attrib", &mut attrib.clone()).unwrap();
    }

    let session = Session::reader(&doc);
    let node = session.serializer().child("value");
    let (mut read_text, mut read_attrib) = (stale.clone(), stale);
    node.text(&mut read_text).unwrap();
    node.attribute("attrib", &mut read_attrib).unwrap();
    (read_text, read_attrib)
}

macro_rules! seventeen {
    ($($name:ident: $ty:ty),* $(,)?) => {$(
        #[test]
        fn $name() {
            duplex_testhelpers::setup();
            let seventeen: $ty = 17 as $ty;
            assert_eq!(round_trip(seventeen, seventeen, 0 as $ty), (seventeen, seventeen));
        }
    )*};
}

seventeen! {
    seventeen_i32: i32,
    seventeen_u32: u32,
    seventeen_i64: i64,
    seventeen_u64: u64,
    seventeen_f32: f32,
    seventeen_f64: f64,
}

#[test]
fn signed_values() {
    duplex_testhelpers::setup();
    assert_eq!(round_trip(-171i32, -1917, 10001), (-171, -1917));
    assert_eq!(round_trip(-171i64, -1917, 10001), (-171, -1917));
    assert_eq!(round_trip(i64::MIN, i64::MAX, 0), (i64::MIN, i64::MAX));
}

#[test]
fn unsigned_values() {
    duplex_testhelpers::setup();
    assert_eq!(round_trip(5566u32, 9988, 10001), (5566, 9988));
    assert_eq!(round_trip(5566u64, u64::MAX, 101), (5566, u64::MAX));
}

#[test]
fn float_values() {
    duplex_testhelpers::setup();
    assert_eq!(round_trip(-1.0304f32, 198.456, -1.0), (-1.0304, 198.456));
    assert_eq!(round_trip(-1.0304f64, 198.456, -2.0), (-1.0304, 198.456));
}

#[test]
fn bool_values() {
    duplex_testhelpers::setup();
    assert_eq!(round_trip(true, false, false), (true, false));
    assert_eq!(round_trip(false, true, true), (false, true));
}

#[test]
fn string_values() {
    duplex_testhelpers::setup();
    let (text, attrib) = round_trip(
        "Noddy & Big Ears".to_owned(),
        " spaced ".to_owned(),
        "stale".to_owned(),
    );
    assert_eq!(text, "Noddy & Big Ears");
    assert_eq!(attrib, " spaced ");
}

#[test]
fn rendered_forms() {
    duplex_testhelpers::setup();

    let mut doc = Document::new();
    {
        let session = Session::writer_with_root(&mut doc, "doc");
        let ser = session.serializer();
        ser.child("int").text(&mut 17i32).unwrap();
        ser.child("float").text(&mut 17.0f64).unwrap();
        ser.child("bool").text(&mut true).unwrap();
    }
    let root = doc.document_element().unwrap();
    let text_of = |name: &str| doc.text(doc.child(root, name).unwrap());
    assert_eq!(text_of("int"), Some("17"));
    assert_eq!(text_of("float"), Some("17"));
    assert_eq!(text_of("bool"), Some("true"));
}

#[test]
fn malformed_text_is_an_error() {
    duplex_testhelpers::setup();

    let (mut doc, root) = Document::with_element("doc");
    let node = doc.append_child(root, "count");
    doc.set_text(node, "seventeen");
    doc.set_attribute(node, "ratio", "1/2");

    let session = Session::reader(&doc);
    let count = session.serializer().child("count");

    let mut value = 0i32;
    let err = count.text_or(&mut value, 3).unwrap_err();
    let Error::Parse {
        node,
        attribute,
        source,
    } = &err
    else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(node, "count");
    assert_eq!(attribute, &None);
    assert_eq!(source.kind, "i32");
    assert_eq!(source.text, "seventeen");

    let mut ratio = 0.0f64;
    let err = count.attribute("ratio", &mut ratio).unwrap_err();
    assert!(
        err.to_string()
            .starts_with("cannot read attribute `ratio` of <count>: invalid f64 `1/2`"),
        "{err}"
    );
    assert!(std::error::Error::source(&err).is_some());
}
