use std::io;

use duplex_core::{Result, Serializable, Serializer};
use duplex_xml::{Error, WriteOptions, XmlError, from_str, to_writer_value};

#[derive(Debug, Default, PartialEq)]
struct Reading {
    sensor: String,
    value: f64,
}

impl Serializable for Reading {
    fn serialize(&mut self, ser: Serializer<'_, '_>) -> Result<()> {
        ser.attribute("sensor", &mut self.sensor)?;
        ser.child("value").text(&mut self.value)
    }
}

#[test]
fn malformed_xml() {
    duplex_testhelpers::setup();

    let err = from_str::<Reading>("<reading><value>").unwrap_err();
    assert!(matches!(err, Error::Xml(XmlError::UnexpectedEof)), "{err:?}");

    let err = from_str::<Reading>("<reading/><reading/>").unwrap_err();
    assert!(matches!(err, Error::Xml(XmlError::MultipleRoots)), "{err:?}");
}

#[test]
fn malformed_value() {
    duplex_testhelpers::setup();

    let err = from_str::<Reading>(r#"<reading sensor="t1"><value>warm</value></reading>"#)
        .unwrap_err();
    let Error::Serialize(duplex_core::Error::Parse {
        node, attribute, ..
    }) = &err
    else {
        panic!("expected a value error, got {err:?}");
    };
    assert_eq!(node, "value");
    assert_eq!(attribute, &None);
    assert!(
        err.to_string().starts_with("cannot read text of <value>: "),
        "{err}"
    );
}

#[test]
fn empty_input_reads_defaults() {
    duplex_testhelpers::setup();

    let reading: Reading = from_str("<?xml version=\"1.0\"?>\n").unwrap();
    assert_eq!(reading, Reading::default());
}

struct Broken;

impl io::Write for Broken {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failure() {
    duplex_testhelpers::setup();

    let mut reading = Reading {
        sensor: "t1".into(),
        value: 21.5,
    };
    let err = to_writer_value(&mut Broken, &mut reading, "reading", &WriteOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err:?}");
    assert_eq!(err.to_string(), "IO error: disk full");
}
