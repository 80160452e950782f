use indoc::indoc;
use repodoc::analysis::structure::analyze_with_sources;
use repodoc::complexity::{estimate, ComplexityEstimator};
use repodoc::fetch::LocalCheckout;
use repodoc::{calculate_average_complexity, find_most_complex_file};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_class_methods_and_async_functions() {
    let metrics = estimate(indoc! {"
        import asyncio

        class Store:
            def __init__(self):
                self.items = {}

            @property
            def size(self):
                return len(self.items)

            async def load(self, keys):
                for key in keys:
                    if key in self.items:
                        continue
                    self.items[key] = await asyncio.sleep(0)

        class Empty:
            pass
    "});

    assert_eq!(metrics.class_count, Some(2));
    assert_eq!(metrics.function_count, Some(3));
    // __init__: 1, size: 1, load: 1 + for + if
    assert_eq!(metrics.cyclomatic_complexity, Some(5));
    assert_eq!(metrics.max_nesting, Some(0));
    assert_eq!(metrics.avg_function_length, Some(1.0));
}

#[test]
fn test_syntax_error_yields_empty_record() {
    let metrics = estimate("class Broken(:\n    def\n");
    assert!(metrics.is_empty());
    assert_eq!(serde_json::to_string(&metrics).unwrap(), "{}");
}

#[test]
fn test_empty_file_has_zero_counts() {
    let metrics = estimate("");
    assert_eq!(metrics.function_count, Some(0));
    assert_eq!(metrics.cyclomatic_complexity, Some(0));
    assert_eq!(metrics.avg_function_length, Some(0.0));
}

#[test]
fn test_checkout_sources_feed_structure_analysis() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("pkg")).unwrap();
    fs::write(
        dir.path().join("pkg/simple.py"),
        "def one():\n    return 1\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("pkg/branchy.py"),
        indoc! {"
            def pick(x):
                if x:
                    return 1
                elif x is None:
                    return 2
                return 3
        "},
    )
    .unwrap();
    fs::write(dir.path().join("pkg/bad.py"), "def (\n").unwrap();
    fs::write(dir.path().join("index.js"), "console.log(1)\n").unwrap();

    let checkout = LocalCheckout::open(dir.path()).unwrap();
    let files = checkout.list_files().unwrap();
    let mut estimator = ComplexityEstimator::new().unwrap();

    let summary = analyze_with_sources(&files, &checkout, &mut estimator);

    assert_eq!(summary.total_files, 4);
    assert_eq!(summary.complexity.len(), 3);
    assert!(summary.complexity["pkg/bad.py"].is_empty());
    assert!(!summary.complexity.contains_key("index.js"));

    assert_eq!(
        find_most_complex_file(&summary.complexity),
        Some(("pkg/branchy.py", 3))
    );

    // Unparsed files are excluded from the average
    assert_eq!(calculate_average_complexity(&summary.complexity), 2.0);
}
