#![allow(dead_code)]

use core::ops::ControlFlow;

use rusqlite::Connection;
use winq_core::syntax::{from_fn, Identifier, NodeKind, Phase};

/// Tables every acceptance test can reference.
pub const FIXTURE: &str = "
    CREATE TABLE testTable(id INTEGER PRIMARY KEY, content TEXT, score REAL);
    CREATE TABLE other(id INTEGER PRIMARY KEY, testId INTEGER, label TEXT);
    CREATE TABLE audit(id INTEGER, action TEXT);
    CREATE TABLE tag(name TEXT);
";

pub fn connection() -> Connection {
    let connection = Connection::open_in_memory()
        .unwrap_or_else(|e| panic!("Failed to open in-memory database: {e}"));
    connection
        .execute_batch(FIXTURE)
        .unwrap_or_else(|e| panic!("Failed to create fixture tables: {e}"));
    connection
}

/// Renders through the validated entry point, failing the test on error.
pub fn sql<T: Identifier + ?Sized>(node: &T) -> String {
    node.to_sql()
        .unwrap_or_else(|e| panic!("Failed to render {:?}: {e}", node.node().kind()))
}

/// Checks that SQLite compiles the rendered statement.
pub fn assert_prepares<T: Identifier + ?Sized>(node: &T) {
    let sql = sql(node);
    let connection = connection();
    let prepared = connection.prepare(&sql).map(drop);
    if let Err(e) = prepared {
        panic!("SQLite rejected: {sql}\nError: {e}");
    }
}

/// Checks that SQLite runs the rendered statement against the fixture.
pub fn assert_executes<T: Identifier + ?Sized>(node: &T) {
    let sql = sql(node);
    let connection = connection();
    if let Err(e) = connection.execute_batch(&sql) {
        panic!("SQLite failed to run: {sql}\nError: {e}");
    }
}

/// Runs a query on `connection` and counts the rows it returns.
pub fn row_count<T: Identifier + ?Sized>(connection: &Connection, node: &T) -> usize {
    let sql = sql(node);
    let mut statement = connection
        .prepare(&sql)
        .unwrap_or_else(|e| panic!("SQLite rejected: {sql}\nError: {e}"));
    let mut rows = statement
        .query([])
        .unwrap_or_else(|e| panic!("SQLite failed to query: {sql}\nError: {e}"));
    let mut count = 0;
    while rows
        .next()
        .unwrap_or_else(|e| panic!("SQLite failed to step: {sql}\nError: {e}"))
        .is_some()
    {
        count += 1;
    }
    count
}

/// Runs a statement on `connection`, failing the test on error.
pub fn run<T: Identifier + ?Sized>(connection: &Connection, node: &T) {
    let sql = sql(node);
    if let Err(e) = connection.execute_batch(&sql) {
        panic!("SQLite failed to run: {sql}\nError: {e}");
    }
}

/// Kinds of every node, in the order they are entered.
pub fn entered_kinds<T: Identifier + ?Sized>(node: &T) -> Vec<NodeKind> {
    let mut kinds = Vec::new();
    let _ = node.iterate(&mut from_fn(|node, phase| {
        if phase == Phase::Enter {
            kinds.push(node.kind());
        }
        ControlFlow::Continue(())
    }));
    kinds
}

/// Rendered text of every node of `kind`, in the order they are entered.
pub fn collect_rendered<T: Identifier + ?Sized>(node: &T, kind: NodeKind) -> Vec<String> {
    let mut rendered = Vec::new();
    let _ = node.iterate(&mut from_fn(|node, phase| {
        if phase == Phase::Enter && node.kind() == kind {
            rendered.push(node.identifier().to_string());
        }
        ControlFlow::Continue(())
    }));
    rendered
}
