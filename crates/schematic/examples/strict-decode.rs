//! Strict decode example — shows which payloads a schema decoder accepts.
//!
//! Run with:
//!   cargo run --example strict-decode

use serde::{Deserialize, Serialize};

use schematic::schema::{SchemaDecoder, SchemaError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Address {
    city: String,
    zip: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Customer {
    id: u64,
    name: String,
    vip: bool,
    address: Address,
}

fn main() -> Result<(), SchemaError> {
    let decoder = SchemaDecoder::<Customer>::try_new()?;

    let payloads: [&[u8]; 4] = [
        br#"{"id":1,"name":"Ada","vip":true,"address":{"city":"Oslo","zip":"0150"}}"#,
        br#"{"id":2,"name":"Bob","vip":false,"address":{"city":"Rome"}}"#,
        br#"{"id":3,"name":"Cy","vip":false,"address":{"city":"Lima","zip":"15001"},"notes":""}"#,
        br#"{"id":"4","name":"Di","vip":false,"address":{"city":"Kyiv","zip":"01001"}}"#,
    ];

    for raw in payloads {
        match decoder.try_decode(raw) {
            Ok(customer) => eprintln!("[accepted] {customer:?}"),
            Err(err) => eprintln!("[rejected] {err}"),
        }
    }

    Ok(())
}
