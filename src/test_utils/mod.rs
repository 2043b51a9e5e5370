//! Shared test utilities for semlayer.

use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe, catch_unwind};
use std::time::Instant;

pub mod embedder;
pub mod fixtures;

/// One row of a table-driven test.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
    pub should_panic: bool,
}

/// Run every case and report all failures together.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: Debug + Clone + RefUnwindSafe,
    E: Debug + PartialEq,
    F: Fn(I) -> E + UnwindSafe + RefUnwindSafe,
{
    let total = cases.len();
    let mut failures = Vec::new();

    for case in cases {
        let started = Instant::now();
        let outcome = catch_unwind(|| test_fn(case.input.clone()));
        let verdict = match (outcome, case.should_panic) {
            (Err(_), true) => Ok(()),
            (Ok(_), true) => Err("expected a panic".to_string()),
            (Err(_), false) => Err("panicked".to_string()),
            (Ok(actual), false) if actual == case.expected => Ok(()),
            (Ok(actual), false) => Err(format!(
                "expected {:?}, got {actual:?}",
                case.expected
            )),
        };

        match verdict {
            Ok(()) => println!("[CASE] ok   {} ({:?})", case.name, started.elapsed()),
            Err(reason) => {
                println!("[CASE] FAIL {} input={:?}: {reason}", case.name, case.input);
                failures.push(format!("{}: {reason}", case.name));
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} of {total} cases failed:\n{}",
            failures.len(),
            failures.join("\n")
        ))
    }
}
