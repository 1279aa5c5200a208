//! Shared test macros: run a snippet of source through the full pipeline
//! and assert on what it printed, or on the diagnostic it produced.
//!
//! Fixtures are inlined as string literals rather than loaded from
//! external files, so a test and the behavior it checks stay next to each
//! other.

#[macro_export]
macro_rules! run_ok {
    ($name:ident, $source:expr, [$($line:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            let mut sink = glint::error::CollectingSink::new();
            let mut lines: Vec<String> = Vec::new();
            let mut print = |line: &str| lines.push(line.to_string());
            let outcome = glint::run($source, &mut glint::interpreter::Interpreter::new(), &mut sink, &mut print);
            assert_eq!(outcome, glint::Outcome::Ok, "diagnostics: {:?}", sink.diagnostics);
            let expected: Vec<String> = vec![$($line.to_string()),*];
            assert_eq!(lines, expected);
        }
    };
}

#[macro_export]
macro_rules! run_static_err {
    ($name:ident, $source:expr, $needle:expr) => {
        #[test]
        fn $name() {
            let mut sink = glint::error::CollectingSink::new();
            let mut print = |_: &str| {};
            let outcome = glint::run($source, &mut glint::interpreter::Interpreter::new(), &mut sink, &mut print);
            assert_eq!(outcome, glint::Outcome::StaticError);
            assert!(
                sink.diagnostics.iter().any(|d| d.message.contains($needle)),
                "expected a diagnostic containing {:?}, got: {:?}",
                $needle,
                sink.diagnostics
            );
        }
    };
}

#[macro_export]
macro_rules! run_runtime_err {
    ($name:ident, $source:expr, $needle:expr) => {
        #[test]
        fn $name() {
            let mut sink = glint::error::CollectingSink::new();
            let mut print = |_: &str| {};
            let outcome = glint::run($source, &mut glint::interpreter::Interpreter::new(), &mut sink, &mut print);
            assert_eq!(outcome, glint::Outcome::RuntimeError);
            assert!(
                sink.diagnostics.iter().any(|d| d.message.contains($needle)),
                "expected a diagnostic containing {:?}, got: {:?}",
                $needle,
                sink.diagnostics
            );
        }
    };
}
