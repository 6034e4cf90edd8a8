//! Start/end/cost reporting around a call.
//!
//! A [`TimeStamp`] prints three lines to stdout:
//!
//! ```text
//! [my_func] Start at Fri Oct 16 09:05:01 2026
//! [my_func] End at Fri Oct 16 09:05:03 2026
//! Time cost: 2.000
//! ```
//!
//! The free functions below are thin wrappers that pick a [`TimingStyle`]
//! and take the label from the wrapped callable's type name.

use crate::format::{format_duration, DEFAULT_DECIMALS};
use chrono::{DateTime, Local};
use std::io::{self, Write};
use std::time::Instant;

/// How the cost line is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingStyle {
    /// `[label] Cost: 2.000 sec`
    CostSeconds,
    /// `Time cost: 2.000`
    TimeCost,
    /// `Time cost: 2.000`, with a blank line before and after the block.
    Padded,
}

/// Times a single call and reports it.
#[derive(Debug, Clone)]
pub struct TimeStamp {
    label: String,
    style: TimingStyle,
    decimal: usize,
}

impl TimeStamp {
    pub fn new(label: impl Into<String>, style: TimingStyle) -> Self {
        Self {
            label: label.into(),
            style,
            decimal: DEFAULT_DECIMALS,
        }
    }

    /// Override the number of fractional digits in the cost line.
    pub fn decimal(mut self, decimal: usize) -> Self {
        self.decimal = decimal;
        self
    }

    /// Run `f`, reporting to stdout.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        self.run_to(&mut io::stdout(), f)
    }

    /// Run `f`, reporting to `out`. Write failures are logged, not returned.
    pub fn run_to<W: Write, R>(&self, out: &mut W, f: impl FnOnce() -> R) -> R {
        let label = &self.label;

        if self.style == TimingStyle::Padded {
            emit(out, format_args!(""));
        }
        let started = Instant::now();
        emit(out, format_args!("[{label}] Start at {}", asctime(&Local::now())));

        let result = f();

        let elapsed = started.elapsed();
        emit(out, format_args!("[{label}] End at {}", asctime(&Local::now())));

        let cost = format_duration(elapsed, self.decimal);
        match self.style {
            TimingStyle::CostSeconds => emit(out, format_args!("[{label}] Cost: {cost} sec")),
            TimingStyle::TimeCost | TimingStyle::Padded => {
                emit(out, format_args!("Time cost: {cost}"))
            }
        }
        if self.style == TimingStyle::Padded {
            emit(out, format_args!(""));
        }

        tracing::debug!(
            label = %label,
            elapsed_us = elapsed.as_micros() as u64,
            "timed call finished"
        );
        result
    }
}

fn emit<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{line}") {
        tracing::warn!(error = %e, "failed to write timing line");
    }
}

/// Local time in C `asctime` layout, e.g. `Fri Oct  2 09:05:01 2026`.
fn asctime(t: &DateTime<Local>) -> String {
    t.format("%a %b %e %H:%M:%S %Y").to_string()
}

/// Derive a short label for callable type `F`.
///
/// Module paths are dropped. A trailing `Type::method` pair is kept when the
/// second-to-last segment looks like a type name. Closures resolve to the
/// item that defines them.
pub fn label_of<F: ?Sized>() -> String {
    let full = strip_generics(std::any::type_name::<F>());
    let mut segments: Vec<&str> = full.split("::").collect();
    while segments.len() > 1 && segments.last() == Some(&"{{closure}}") {
        segments.pop();
    }

    match segments.as_slice() {
        [.., owner, name] if owner.starts_with(|c: char| c.is_ascii_uppercase()) => {
            format!("{owner}::{name}")
        }
        [.., name] => (*name).to_string(),
        [] => String::new(),
    }
}

/// Remove `<...>` argument lists, keeping nesting balanced.
fn strip_generics(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Time a no-argument call. The return value is discarded.
pub fn function_time_stamp<F: FnOnce()>(f: F) {
    function_time_stamp_to(&mut io::stdout(), f)
}

/// Time a method that only takes its receiver. The cost line carries the
/// label and a `sec` unit.
pub fn method_time_stamp_self_only<T: ?Sized, F: FnOnce(&mut T)>(this: &mut T, f: F) {
    method_time_stamp_self_only_to(&mut io::stdout(), this, f)
}

/// Time a method taking its receiver plus arguments. The return value is
/// discarded.
pub fn method_time_stamp<T: ?Sized, A, F: FnOnce(&mut T, A)>(this: &mut T, args: A, f: F) {
    method_time_stamp_to(&mut io::stdout(), this, args, f)
}

/// Time a plain call and hand its result back.
pub fn print_time_stamp<A, R, F: FnOnce(A) -> R>(args: A, f: F) -> R {
    print_time_stamp_to(&mut io::stdout(), args, f)
}

fn function_time_stamp_to<W: Write, F: FnOnce()>(out: &mut W, f: F) {
    TimeStamp::new(label_of::<F>(), TimingStyle::TimeCost).run_to(out, f)
}

fn method_time_stamp_self_only_to<W: Write, T: ?Sized, F: FnOnce(&mut T)>(
    out: &mut W,
    this: &mut T,
    f: F,
) {
    TimeStamp::new(label_of::<F>(), TimingStyle::CostSeconds).run_to(out, || f(this))
}

fn method_time_stamp_to<W: Write, T: ?Sized, A, F: FnOnce(&mut T, A)>(
    out: &mut W,
    this: &mut T,
    args: A,
    f: F,
) {
    TimeStamp::new(label_of::<F>(), TimingStyle::TimeCost).run_to(out, || f(this, args))
}

fn print_time_stamp_to<W: Write, A, R, F: FnOnce(A) -> R>(out: &mut W, args: A, f: F) -> R {
    TimeStamp::new(label_of::<F>(), TimingStyle::Padded).run_to(out, || f(args))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        hits: u32,
    }

    impl Counter {
        fn bump(&mut self) {
            self.hits += 1;
        }

        fn add(&mut self, n: u32) {
            self.hits += n;
        }
    }

    fn sum_pair((a, b): (u32, u32)) -> u32 {
        a + b
    }

    fn lines_of(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn run_lines(stamp: &TimeStamp) -> Vec<String> {
        let mut out = Vec::new();
        stamp.run_to(&mut out, || ());
        lines_of(out)
    }

    fn fetch_all() {}

    fn assert_cost_digits(cost: &str, digits: usize) {
        let (int, frac) = cost.split_once('.').expect("cost has a dot");
        assert!(int.chars().all(|c| c.is_ascii_digit()), "bad cost: {cost}");
        assert_eq!(frac.len(), digits, "bad cost: {cost}");
    }

    #[test]
    fn test_time_cost_lines() {
        let lines = run_lines(&TimeStamp::new("my_func", TimingStyle::TimeCost));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[my_func] Start at "));
        assert!(lines[1].starts_with("[my_func] End at "));
        let cost = lines[2].strip_prefix("Time cost: ").unwrap();
        assert_cost_digits(cost, 3);
    }

    #[test]
    fn test_cost_seconds_lines() {
        let lines = run_lines(&TimeStamp::new("Worker::run", TimingStyle::CostSeconds));
        assert_eq!(lines.len(), 3);
        let cost = lines[2]
            .strip_prefix("[Worker::run] Cost: ")
            .and_then(|s| s.strip_suffix(" sec"))
            .unwrap();
        assert_cost_digits(cost, 3);
    }

    #[test]
    fn test_padded_lines() {
        let lines = run_lines(&TimeStamp::new("job", TimingStyle::Padded).decimal(5));
        assert_eq!(lines.len(), 5);
        assert!(lines[0].is_empty());
        assert!(lines[1].starts_with("[job] Start at "));
        assert_cost_digits(lines[3].strip_prefix("Time cost: ").unwrap(), 5);
        assert!(lines[4].is_empty());
    }

    #[test]
    fn test_asctime_layout() {
        let t = DateTime::parse_from_rfc3339("2026-10-02T09:05:01+00:00")
            .unwrap()
            .with_timezone(&Local);
        let text = asctime(&t);
        // Weekday, month, space-padded day, time, year.
        let parts: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[0].len(), 3);
        assert_eq!(parts[1].len(), 3);
        assert_eq!(parts[4], t.format("%Y").to_string());
        assert_eq!(text.len(), 24);
    }

    #[test]
    fn test_run_forwards_result() {
        let mut out = Vec::new();
        let value = TimeStamp::new("x", TimingStyle::TimeCost).run_to(&mut out, || 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_label_of_function() {
        assert_eq!(label_of_val(&sum_pair), "sum_pair");
    }

    #[test]
    fn test_label_of_method() {
        assert_eq!(label_of_val(&Counter::bump), "Counter::bump");
    }

    #[test]
    fn test_label_of_closure() {
        let f = || ();
        assert_eq!(label_of_val(&f), "test_label_of_closure");
    }

    #[test]
    fn test_strip_generics() {
        assert_eq!(strip_generics("alloc::vec::Vec<u8>::len"), "alloc::vec::Vec::len");
        assert_eq!(strip_generics("a::b<c<d>, e>::f"), "a::b::f");
    }

    #[test]
    fn test_wrappers_call_through() {
        let mut counter = Counter { hits: 0 };
        method_time_stamp_self_only(&mut counter, Counter::bump);
        method_time_stamp(&mut counter, 5, Counter::add);
        assert_eq!(counter.hits, 6);

        let mut called = false;
        function_time_stamp(|| called = true);
        assert!(called);

        assert_eq!(print_time_stamp((2, 3), sum_pair), 5);
    }

    #[test]
    fn test_function_wrapper_output() {
        let mut out = Vec::new();
        function_time_stamp_to(&mut out, fetch_all);
        let lines = lines_of(out);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[fetch_all] Start at "));
        assert!(lines[1].starts_with("[fetch_all] End at "));
        assert_cost_digits(lines[2].strip_prefix("Time cost: ").unwrap(), 3);
    }

    #[test]
    fn test_self_only_wrapper_output() {
        let mut counter = Counter { hits: 0 };
        let mut out = Vec::new();
        method_time_stamp_self_only_to(&mut out, &mut counter, Counter::bump);
        assert_eq!(counter.hits, 1);
        let lines = lines_of(out);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[Counter::bump] Start at "));
        let cost = lines[2]
            .strip_prefix("[Counter::bump] Cost: ")
            .and_then(|s| s.strip_suffix(" sec"))
            .unwrap();
        assert_cost_digits(cost, 3);
    }

    #[test]
    fn test_method_wrapper_output() {
        let mut counter = Counter { hits: 0 };
        let mut out = Vec::new();
        method_time_stamp_to(&mut out, &mut counter, 4, Counter::add);
        assert_eq!(counter.hits, 4);
        let lines = lines_of(out);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[Counter::add] Start at "));
        assert!(lines[1].starts_with("[Counter::add] End at "));
        assert_cost_digits(lines[2].strip_prefix("Time cost: ").unwrap(), 3);
    }

    #[test]
    fn test_print_wrapper_output() {
        let mut out = Vec::new();
        let sum = print_time_stamp_to(&mut out, (20, 22), sum_pair);
        assert_eq!(sum, 42);
        let lines = lines_of(out);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].is_empty());
        assert!(lines[1].starts_with("[sum_pair] Start at "));
        assert!(lines[2].starts_with("[sum_pair] End at "));
        assert_cost_digits(lines[3].strip_prefix("Time cost: ").unwrap(), 3);
        assert!(lines[4].is_empty());
    }

    fn label_of_val<F>(_: &F) -> String {
        label_of::<F>()
    }
}
