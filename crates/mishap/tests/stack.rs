// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Stack capture across realistic call chains.

use mishap::{Error, Stack};

fn level_three() -> Error {
    Error::wrap("level_three", "base failure")
}

fn level_two() -> Error {
    Error::wrap("level_two", level_three())
}

fn level_one() -> Error {
    Error::wrap("level_one", level_two())
}

#[test]
fn retained_stack_is_the_deepest_capture() {
    let err = level_one();
    assert_eq!(err.ops_text(), "level_one: level_two: level_three");

    let middle = err.cause().as_chained().expect("level_two link");
    let origin = middle.cause().as_chained().expect("level_three link");

    assert_eq!(err.stack(), origin.stack());
    assert_eq!(middle.stack(), origin.stack());
}

#[test]
fn capture_has_frames_with_printable_forms() {
    let err = level_three();
    let stack = err.stack();
    assert!(!stack.is_empty());
    assert!(stack.len() <= 32);

    for frame in stack.frames() {
        assert!(!frame.short().is_empty());
        assert!(!frame.full().is_empty());
    }
}

#[test]
fn empty_fallback_renders_nothing() {
    let stack = Stack::empty();
    assert!(stack.is_empty());
    assert_eq!(stack.to_string(), "");

    let err = Error::builder().op("load").cause("boom").no_stack().build();
    assert!(err.stack().is_empty());
    // alternate display omits the stack section when nothing was captured
    assert_eq!(format!("{err:#}"), "boom");
}

#[test]
fn alternate_display_includes_frames() {
    let err = level_three();
    let rendered = format!("{err:#}");
    assert!(rendered.starts_with("base failure"));
    if !err.stack().is_empty() {
        assert!(rendered.contains("Stack:"));
    }
}

#[test]
fn stacks_are_shared_not_copied() {
    let origin = level_three();
    let wrapped = Error::wrap("caller", origin.clone());

    // equality is by captured instruction pointers
    assert_eq!(wrapped.stack(), origin.stack());
    assert_eq!(wrapped.stack().len(), origin.stack().len());
}
