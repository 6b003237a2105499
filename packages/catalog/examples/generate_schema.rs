use aid_catalog::CatalogDocument;
use schemars::schema_for;

fn main() {
    let schema = schema_for!(CatalogDocument);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}
