// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Demonstrates the wire-status bridge: a layer that tags an error with a
//! gRPC code and message gives the transport a ready-made status, while an
//! untagged error falls back to the transport's default conversion.

use mishap::{classify, Error, Kind};
use tonic::{Code, Status};

fn storage_failure() -> Error {
    Error::wrap("store.get", "connection reset")
}

fn tagged(err: Error) -> Error {
    Error::builder()
        .op("orders.get")
        .kind(Kind::NotFound)
        .grpc_code(Code::NotFound)
        .grpc_msg("order does not exist")
        .cause(err)
        .build()
}

// what an RPC error-encoding path would do with any boundary error
fn encode(err: &Error) -> Status {
    classify::grpc_status(err).unwrap_or_else(|| Status::unknown(err.to_string()))
}

fn main() {
    let plain = storage_failure();
    let status = encode(&plain);
    println!("untagged -> {:?} {:?}", status.code(), status.message());

    let status = encode(&tagged(storage_failure()));
    println!("tagged   -> {:?} {:?}", status.code(), status.message());
}
