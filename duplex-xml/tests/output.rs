use duplex_core::{Result, Serializable, Serializer, serialize_container};
use duplex_xml::{SerializeOptions, WriteOptions, from_str, to_string_value};
use insta::assert_snapshot;

#[derive(Debug, Default, PartialEq)]
struct Book {
    title: String,
    year: i32,
}

impl Serializable for Book {
    fn serialize(&mut self, ser: Serializer<'_, '_>) -> Result<()> {
        ser.attribute("year", &mut self.year)?;
        ser.child("title").text(&mut self.title)
    }
}

#[derive(Debug, Default, PartialEq)]
struct Library {
    name: String,
    books: Vec<Book>,
}

impl Serializable for Library {
    fn serialize(&mut self, ser: Serializer<'_, '_>) -> Result<()> {
        ser.attribute("name", &mut self.name)?;
        serialize_container(ser, &mut self.books, "book")
    }
}

fn library() -> Library {
    Library {
        name: "Central".into(),
        books: vec![
            Book {
                title: "Moby Dick".into(),
                year: 1851,
            },
            Book {
                title: "War & Peace".into(),
                year: 1869,
            },
        ],
    }
}

#[test]
fn pretty_library() {
    duplex_testhelpers::setup();

    let options = WriteOptions::new().format(SerializeOptions::new().pretty());
    let xml = to_string_value(&mut library(), "library", &options).unwrap();
    assert_snapshot!(xml.trim_end(), @r#"
    <library name="Central">
      <book year="1851">
        <title>Moby Dick</title>
      </book>
      <book year="1869">
        <title>War &amp; Peace</title>
      </book>
    </library>
    "#);

    let back: Library = from_str(&xml).unwrap();
    assert_eq!(back, library());
}

#[test]
fn compact_library() {
    duplex_testhelpers::setup();

    let xml = to_string_value(&mut library(), "library", &WriteOptions::new()).unwrap();
    assert_snapshot!(
        xml,
        @r#"<library name="Central"><book year="1851"><title>Moby Dick</title></book><book year="1869"><title>War &amp; Peace</title></book></library>"#
    );
}
