// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bounded call-stack snapshots for failure-site diagnostics.
//!
//! Capture records raw instruction pointers only; symbol resolution happens
//! lazily when a frame is formatted. When symbols are unavailable the
//! formatters degrade to placeholder text, so capture is never load-bearing
//! for correctness.

use std::ffi::c_void;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Upper bound on captured frames per snapshot.
const MAX_DEPTH: usize = 32;

/// Frames belonging to the capture machinery itself, skipped at capture time.
const SKIP_FRAMES: usize = 3;

/// A bounded snapshot of the call stack, innermost frame first.
///
/// Snapshots are immutable and cheap to clone; cloning shares the captured
/// frames. Two snapshots compare equal when they captured the same
/// instruction pointers, which lets callers verify that wrapping an error
/// retained the original failure site's capture.
#[derive(Clone, PartialEq, Eq)]
pub struct Stack {
    ips: Arc<[usize]>,
}

impl Stack {
    /// Captures the current call stack up to a fixed depth, skipping the
    /// capture machinery's own frames.
    pub(crate) fn capture() -> Self {
        let mut ips = Vec::with_capacity(MAX_DEPTH);
        let mut depth = 0usize;
        backtrace::trace(|frame| {
            depth += 1;
            if depth <= SKIP_FRAMES {
                return true;
            }
            ips.push(frame.ip() as usize);
            ips.len() < MAX_DEPTH
        });
        Self { ips: ips.into() }
    }

    /// Returns a snapshot with no frames, the no-op fallback used when
    /// capture is suppressed.
    #[must_use]
    pub fn empty() -> Self {
        Self { ips: Vec::new().into() }
    }

    /// Returns `true` if no frames were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    /// Returns the number of captured frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ips.len()
    }

    /// Iterates the captured frames, innermost first.
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        self.ips.iter().map(|&ip| Frame(ip))
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("frames", &self.ips.len()).finish()
    }
}

impl fmt::Display for Stack {
    /// Renders every frame in capture order, one [`Frame::full`] form per
    /// line, each preceded by a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.frames() {
            write!(f, "\n{}", frame.full())?;
        }
        Ok(())
    }
}

/// A single captured stack frame, identified by its instruction pointer.
///
/// Symbol data is resolved on demand by the formatting methods.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame(usize);

/// Symbol data for one frame. Any field may be missing when debug info is
/// stripped or symbolization is unsupported on the platform.
#[derive(Default)]
struct Symbol {
    name: Option<String>,
    file: Option<String>,
    line: Option<u32>,
}

impl Frame {
    fn resolve(self) -> Symbol {
        let mut symbol = Symbol::default();
        backtrace::resolve(self.0 as *mut c_void, |sym| {
            // resolve may report several inlined frames per ip; keep the first
            if symbol.name.is_none()
                && let Some(name) = sym.name()
            {
                symbol.name = Some(format!("{name:#}"));
            }
            if symbol.file.is_none()
                && let Some(file) = sym.filename()
            {
                symbol.file = Some(file.display().to_string());
                symbol.line = sym.lineno();
            }
        });
        symbol
    }

    /// Returns the fully qualified, demangled function name, if resolvable.
    #[must_use]
    pub fn name(self) -> Option<String> {
        self.resolve().name
    }

    /// Returns the trailing path segment of the function name, if
    /// resolvable: `svc::orders::load` becomes `load`.
    #[must_use]
    pub fn function(self) -> Option<String> {
        let name = self.resolve().name?;
        let short = name.rsplit("::").next().unwrap_or(&name);
        Some(short.to_owned())
    }

    /// Short form: source file basename and line, `orders.rs:42`.
    #[must_use]
    pub fn short(self) -> String {
        let symbol = self.resolve();
        match (symbol.file, symbol.line) {
            (Some(file), Some(line)) => {
                let base = Path::new(&file)
                    .file_name()
                    .map_or_else(|| file.clone(), |name| name.to_string_lossy().into_owned());
                format!("{base}:{line}")
            }
            _ => String::from("unknown"),
        }
    }

    /// Full form: function name, then full path and line on an indented
    /// continuation line.
    #[must_use]
    pub fn full(self) -> String {
        let symbol = self.resolve();
        let name = symbol.name.as_deref().unwrap_or("unknown");
        match (symbol.file, symbol.line) {
            (Some(file), Some(line)) => format!("{name}\n\t{file}:{line}"),
            _ => format!("{name}\n\tunknown"),
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame").field(&self.short()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_is_bounded() {
        let stack = Stack::capture();
        assert!(stack.len() <= MAX_DEPTH);
        assert_eq!(stack.frames().count(), stack.len());
    }

    #[test]
    fn empty_stack() {
        let stack = Stack::empty();
        assert!(stack.is_empty());
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.to_string(), "");
    }

    #[test]
    fn clones_compare_equal() {
        let stack = Stack::capture();
        assert_eq!(stack, stack.clone());
    }

    #[test]
    fn distinct_captures_differ() {
        let a = Stack::capture();
        let b = Stack::empty();
        assert_ne!(a, b);
    }

    #[test]
    fn frame_formats_never_panic() {
        let stack = Stack::capture();
        for frame in stack.frames() {
            // symbol data is best-effort; formats must produce something
            assert!(!frame.short().is_empty());
            assert!(!frame.full().is_empty());
        }
    }

    #[test]
    fn display_lists_one_line_per_frame() {
        let stack = Stack::capture();
        let rendered = stack.to_string();
        if !stack.is_empty() {
            assert!(rendered.starts_with('\n'));
        }
    }
}
