// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Wire-status bridge behavior.

use mishap::{classify, Error, Kind};
use tonic::Code;

#[test]
fn no_status_when_nothing_set() {
    let err = Error::wrap("load", "boom");
    assert!(err.grpc_status().is_none());
}

#[test]
fn no_status_from_code_alone() {
    let err = Error::builder().op("load").grpc_code(Code::NotFound).cause("boom").build();
    assert!(err.grpc_status().is_none());
}

#[test]
fn no_status_from_message_alone() {
    let err = Error::builder().op("load").grpc_msg("order gone").cause("boom").build();
    assert!(err.grpc_status().is_none());
}

#[test]
fn status_from_complete_pair() {
    let err = Error::builder()
        .op("load")
        .grpc_code(Code::NotFound)
        .grpc_msg("order does not exist")
        .cause("row missing")
        .build();

    let status = err.grpc_status().expect("code and message are both set");
    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "order does not exist");
}

#[test]
fn outer_pair_wins() {
    let inner = Error::builder()
        .op("read")
        .grpc_code(Code::Internal)
        .grpc_msg("storage failed")
        .cause("boom")
        .build();
    let outer = Error::builder()
        .op("load")
        .grpc_code(Code::NotFound)
        .grpc_msg("order does not exist")
        .cause(inner)
        .build();

    let status = outer.grpc_status().expect("both links carry a pair");
    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "order does not exist");
}

#[test]
fn pair_resolves_across_links() {
    // code and message resolve independently, so a deep message can pair
    // with a shallower code
    let inner = Error::builder().op("read").grpc_msg("storage failed").cause("boom").build();
    let outer = Error::builder().op("load").grpc_code(Code::Unavailable).cause(inner).build();

    let status = outer.grpc_status().expect("fields resolve independently");
    assert_eq!(status.code(), Code::Unavailable);
    assert_eq!(status.message(), "storage failed");
}

#[test]
fn status_survives_untagged_wraps() {
    let tagged = Error::builder()
        .op("read")
        .grpc_code(Code::ResourceExhausted)
        .grpc_msg("quota exceeded")
        .cause("limiter tripped")
        .build();
    let outer = Error::wrap("load", Error::wrap("fetch", tagged));

    let status = outer.grpc_status().expect("pair set deeper in the chain");
    assert_eq!(status.code(), Code::ResourceExhausted);
    assert_eq!(status.message(), "quota exceeded");
}

#[test]
fn classify_bridge_matches_method() {
    let err = Error::builder()
        .op("load")
        .kind(Kind::RateLimit)
        .grpc_code(Code::ResourceExhausted)
        .grpc_msg("quota exceeded")
        .cause("limiter tripped")
        .build();

    let status = classify::grpc_status(&err).expect("pair is set");
    assert_eq!(status.code(), Code::ResourceExhausted);
    assert_eq!(classify::grpc_code(&err), Some(Code::ResourceExhausted));
    assert_eq!(classify::grpc_msg(&err), Some("quota exceeded"));

    let foreign = std::io::Error::other("boom");
    assert!(classify::grpc_status(&foreign).is_none());
}
