//! Heuristic complexity for Python sources via tree-sitter.
//!
//! The counting rule is deliberately coarse:
//!
//! - every `def` (at any depth, including methods and nested functions)
//!   contributes `1 + branches`, where `branches` counts every `if`, `elif`,
//!   `for`, `while` and `except` node inside the function's subtree. A branch
//!   inside a nested function is therefore counted once for the inner
//!   function and again for each enclosing one;
//! - branches outside any function contribute nothing;
//! - `max_nesting` is always zero because the walk keeps no parent chain.
//!
//! The tree is walked with a single [`TreeCursor`] pass, so stack usage does
//! not grow with nesting depth.

use crate::core::ComplexityMetrics;
use crate::errors::Result;
use tree_sitter::{Node, Parser, TreeCursor};

const FUNCTION_KIND: &str = "function_definition";
const CLASS_KIND: &str = "class_definition";
const BRANCH_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "for_statement",
    "while_statement",
    "except_clause",
    "except_group_clause",
];

pub struct PythonComplexityEstimator {
    parser: Parser,
}

impl PythonComplexityEstimator {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_python::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Estimate metrics for one Python file.
    ///
    /// Returns the empty record when the source does not parse cleanly.
    pub fn estimate(&mut self, source: &str) -> ComplexityMetrics {
        let Some(tree) = self.parser.parse(source, None) else {
            return ComplexityMetrics::empty();
        };

        let root = tree.root_node();
        if root.has_error() {
            return ComplexityMetrics::empty();
        }

        let mut tally = Tally::default();
        walk(&mut root.walk(), &mut tally);
        tally.into_metrics()
    }
}

/// A function whose subtree the walk is still inside.
struct OpenFunction {
    depth: usize,
    branches: u32,
}

#[derive(Default)]
struct Tally {
    open: Vec<OpenFunction>,
    functions: usize,
    classes: usize,
    statements: usize,
    cyclomatic: u32,
}

impl Tally {
    fn visit(&mut self, node: Node, depth: usize) {
        // Pre-order: functions at this depth or deeper are no longer ancestors
        while self.open.last().is_some_and(|f| f.depth >= depth) {
            self.close_innermost();
        }

        match node.kind() {
            FUNCTION_KIND => {
                self.functions += 1;
                self.statements += body_statement_count(node);
                self.open.push(OpenFunction { depth, branches: 0 });
            }
            CLASS_KIND => self.classes += 1,
            kind if BRANCH_KINDS.contains(&kind) => {
                if let Some(innermost) = self.open.last_mut() {
                    innermost.branches += 1;
                }
            }
            _ => {}
        }
    }

    /// Score the innermost open function and hand its branches to the
    /// enclosing one, whose subtree contains them too.
    fn close_innermost(&mut self) {
        if let Some(func) = self.open.pop() {
            self.cyclomatic += 1 + func.branches;
            if let Some(parent) = self.open.last_mut() {
                parent.branches += func.branches;
            }
        }
    }

    fn into_metrics(mut self) -> ComplexityMetrics {
        while !self.open.is_empty() {
            self.close_innermost();
        }

        let avg_function_length = if self.functions == 0 {
            0.0
        } else {
            self.statements as f64 / self.functions as f64
        };

        ComplexityMetrics {
            cyclomatic_complexity: Some(self.cyclomatic),
            function_count: Some(self.functions),
            class_count: Some(self.classes),
            max_nesting: Some(0),
            avg_function_length: Some(avg_function_length),
        }
    }
}

/// Visit every node below the cursor's position in pre-order.
fn walk(cursor: &mut TreeCursor, tally: &mut Tally) {
    let mut depth = 0usize;
    loop {
        tally.visit(cursor.node(), depth);

        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }

        while !cursor.goto_next_sibling() {
            if depth == 0 || !cursor.goto_parent() {
                return;
            }
            depth -= 1;
        }
    }
}

/// Statements directly inside the function body, comments excluded.
fn body_statement_count(func: Node) -> usize {
    let Some(body) = func.child_by_field_name("body") else {
        return 0;
    };
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter(|stmt| !stmt.is_extra())
        .count()
}
