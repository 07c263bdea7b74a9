// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Demonstrates wrapping a failure through service layers and extracting
//! the diagnostic fields a logging middleware would attach.

use mishap::{Error, Kind, Severity};

fn fetch_row(order_id: &str) -> Result<String, Error> {
    Err(Error::wrap("store.fetch_row", format!("no row for key {order_id}")))
}

fn read_order(order_id: &str) -> Result<String, Error> {
    fetch_row(order_id).map_err(|e| Error::wrap("orders.read", e))
}

fn load_order(customer_id: &str, order_id: &str) -> Result<String, Error> {
    read_order(order_id).map_err(|e| {
        Error::builder()
            .op("orders.load")
            .kind(Kind::NotFound)
            .severity(Severity::Info)
            .customer_id(customer_id)
            .order_id(order_id)
            .cause(e)
            .build()
    })
}

#[expect(clippy::unwrap_used, reason = "Example code")]
fn main() {
    let err = load_order("cust-42", "o-7").unwrap_err();

    println!("message     = {err}");
    println!("kind        = {}", err.kind_text());
    println!("http status = {}", err.kind().status());
    println!("severity    = {}", err.severity());
    println!("ops         = {}", err.ops_text());
    println!("customer_id = {}", err.customer_id().unwrap());
    println!("order_id    = {}", err.order_id().unwrap());
    println!();
    println!("with stack: {err:#}");
}
