//! Benchmark parsing, printing and serializing a generated catalog.
//!
//! Run with:
//!   cargo bench -p duplex-xml --bench roundtrip

use divan::{Bencher, black_box};
use duplex_core::{
    Document, Result, Serializable, Serializer, from_document, serialize_container,
    serialize_string_array, to_document,
};
use duplex_xml::{parse, to_string};
use std::sync::LazyLock;

fn main() {
    divan::main();
}

#[derive(Debug, Default, Clone)]
struct Catalog {
    products: Vec<Product>,
}

#[derive(Debug, Default, Clone)]
struct Product {
    sku: u64,
    name: String,
    price: f64,
    stock: u32,
    discontinued: bool,
    tags: Vec<String>,
}

impl Serializable for Catalog {
    fn serialize(&mut self, ser: Serializer<'_, '_>) -> Result<()> {
        serialize_container(ser, &mut self.products, "product")
    }
}

impl Serializable for Product {
    fn serialize(&mut self, ser: Serializer<'_, '_>) -> Result<()> {
        ser.attribute("sku", &mut self.sku)?;
        ser.attribute("price", &mut self.price)?;
        ser.attribute_or("discontinued", &mut self.discontinued, false)?;
        ser.child("name").text(&mut self.name)?;
        ser.child_with_text("stock", &mut self.stock, 0u32)?;
        serialize_string_array(ser.child("tags"), &mut self.tags, "tag")
    }
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    products: (0..2_000u64)
        .map(|i| Product {
            sku: 100_000 + i,
            name: format!("Product #{i} <deluxe & co>"),
            price: i as f64 * 1.25,
            stock: (i % 7) as u32,
            discontinued: i % 11 == 0,
            tags: (0..i % 4).map(|t| format!("tag{t}")).collect(),
        })
        .collect(),
});

static DOCUMENT: LazyLock<Document> =
    LazyLock::new(|| to_document(&mut CATALOG.clone(), "catalog", true).unwrap());

static XML: LazyLock<String> = LazyLock::new(|| to_string(&DOCUMENT));

#[divan::bench]
fn parse_xml(bencher: Bencher) {
    let xml = &*XML;
    bencher.bench(|| black_box(parse(black_box(xml)).unwrap()));
}

#[divan::bench]
fn print_xml(bencher: Bencher) {
    let doc = &*DOCUMENT;
    bencher.bench(|| black_box(to_string(black_box(doc))));
}

#[divan::bench]
fn read_values(bencher: Bencher) {
    let doc = &*DOCUMENT;
    bencher.bench(|| black_box(from_document::<Catalog>(black_box(doc)).unwrap()));
}

#[divan::bench(args = [true, false])]
fn write_values(bencher: Bencher, write_default_values: bool) {
    let mut catalog = CATALOG.clone();
    bencher.bench_local(|| {
        black_box(to_document(&mut catalog, "catalog", write_default_values).unwrap())
    });
}
