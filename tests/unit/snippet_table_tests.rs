use semlayer::search::snippet::extract;
use semlayer::test_utils::{TestCase, run_table_tests};

#[test]
fn snippet_table() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "fits_unchanged",
            input: ("Submit receipts weekly.", 200),
            expected: "Submit receipts weekly.".to_string(),
            should_panic: false,
        },
        TestCase {
            name: "sentence_boundary",
            input: (
                "Receipts are required for every purchase. Managers approve them later on.",
                60,
            ),
            expected: "Receipts are required for every purchase.".to_string(),
            should_panic: false,
        },
        TestCase {
            name: "word_boundary_with_ellipsis",
            input: ("alpha beta gamma delta epsilon", 13),
            expected: "alpha beta...".to_string(),
            should_panic: false,
        },
        TestCase {
            name: "counts_chars_not_bytes",
            input: ("héllo wörld", 11),
            expected: "héllo wörld".to_string(),
            should_panic: false,
        },
    ];

    run_table_tests(cases, |(content, max)| extract(content, max))?;
    Ok(())
}
