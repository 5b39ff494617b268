//! Tests for INSERT, UPDATE and DELETE statements, upserts and the
//! multi-row write classification.

mod common;
use common::*;

use winq_core::syntax::statement::InsertSource;
use winq_core::{
    BindParameter, Column, CommonTableExpression, ConflictAction, DeleteStatement, Expression,
    ExpressionOperable, Identifier, IndexedColumn, InsertStatement, NodeKind, QualifiedTableName,
    SelectStatement, Statement, SyntaxError, UpdateStatement, Upsert,
};

fn select_ids() -> SelectStatement {
    SelectStatement::new().select(["id"]).from("other")
}

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_values() {
    let insert = InsertStatement::new()
        .insert_into("testTable")
        .columns(["id", "content"])
        .values([Expression::from(1), Expression::from("a")])
        .values([Expression::from(2), Expression::from("b")]);
    assert_eq!(
        sql(&insert),
        "INSERT INTO testTable(id, content) VALUES(1, 'a'), (2, 'b')"
    );
}

#[test]
fn insert_conflict_actions() {
    for (action, keyword) in [
        (ConflictAction::Replace, "REPLACE"),
        (ConflictAction::Rollback, "ROLLBACK"),
        (ConflictAction::Abort, "ABORT"),
        (ConflictAction::Fail, "FAIL"),
        (ConflictAction::Ignore, "IGNORE"),
    ] {
        let insert = InsertStatement::new()
            .or(action)
            .insert_into("testTable")
            .values([BindParameter::anonymous()]);
        assert_eq!(
            sql(&insert),
            format!("INSERT OR {keyword} INTO testTable VALUES(?)")
        );
    }
}

#[test]
fn insert_schema_alias_and_default_values() {
    let insert = InsertStatement::new()
        .insert_into("testTable")
        .schema("main")
        .alias("t")
        .default_values();
    assert_eq!(sql(&insert), "INSERT INTO main.testTable AS t DEFAULT VALUES");
    assert_eq!(
        insert.without_schema().to_string(),
        "INSERT INTO testTable AS t DEFAULT VALUES"
    );
}

#[test]
fn insert_from_select_with_cte() {
    let insert = InsertStatement::new()
        .with(CommonTableExpression::new("ids", select_ids()))
        .insert_into("audit")
        .columns(["id"])
        .select(SelectStatement::new().select(["id"]).from("ids"));
    assert_eq!(
        sql(&insert),
        "WITH ids AS (SELECT id FROM other) INSERT INTO audit(id) SELECT id FROM ids"
    );
}

#[test]
fn insert_without_rows_is_refused() {
    let insert = InsertStatement::new().insert_into("testTable");
    assert_eq!(insert.to_string(), "INSERT INTO testTable VALUES");
    assert_eq!(
        insert.to_sql(),
        Err(SyntaxError::Invalid(NodeKind::InsertStatement))
    );
    let insert = InsertStatement::new().values([1]);
    assert!(insert.to_sql().is_err());
}

#[test]
fn default_values_rejects_upsert() {
    let insert = InsertStatement::new()
        .insert_into("testTable")
        .default_values()
        .upsert(Upsert::new());
    assert!(!insert.is_valid());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "VALUES")]
fn values_after_select_panics_in_debug() {
    let _ = InsertStatement::new()
        .insert_into("testTable")
        .select(select_ids())
        .values([1]);
}

#[test]
fn source_setters_replace_each_other() {
    let insert = InsertStatement::new()
        .insert_into("testTable")
        .values([1])
        .default_values();
    assert_eq!(insert.source, InsertSource::DefaultValues);
}

// ===================================================================
// Upsert
// ===================================================================

#[test]
fn upsert_do_nothing() {
    let insert = InsertStatement::new()
        .insert_into("testTable")
        .values([1])
        .upsert(Upsert::new().indexed_columns(["id"]).do_nothing());
    assert_eq!(
        sql(&insert),
        "INSERT INTO testTable VALUES(1) ON CONFLICT(id) DO NOTHING"
    );
}

#[test]
fn upsert_do_update() {
    let upsert = Upsert::new()
        .indexed_columns([IndexedColumn::column("id")])
        .target_condition(Column::new("id").gt(0))
        .set(["content"], Column::new("content").table("excluded"))
        .set(["score", "id"], Expression::list([0, 1]))
        .update_condition(Column::new("score").is_null());
    assert_eq!(
        upsert.to_string(),
        "ON CONFLICT(id) WHERE id > 0 DO UPDATE SET content = excluded.content, \
         (score, id) = (0, 1) WHERE score ISNULL"
    );
}

#[test]
fn upsert_without_target_skips_target_condition() {
    let upsert = Upsert::new().target_condition(true);
    assert_eq!(upsert.to_string(), "ON CONFLICT DO NOTHING");
}

// ===================================================================
// UPDATE
// ===================================================================

#[test]
fn update_with_order_and_limit() {
    let update = UpdateStatement::new("testTable")
        .set(["content"], BindParameter::new(1))
        .where_clause(Column::new("id").gt(0))
        .order_by([Column::new("id").asc()])
        .limit(1)
        .offset(1);
    assert_eq!(
        sql(&update),
        "UPDATE testTable SET content = ?1 WHERE id > 0 ORDER BY id ASC LIMIT 1 OFFSET 1"
    );
}

#[test]
fn update_or_action_and_qualified_table() {
    let table = QualifiedTableName::new("testTable")
        .schema("main")
        .alias("t")
        .not_indexed();
    let update = UpdateStatement::new(table)
        .or_ignore()
        .set(["score"], Column::new("score").multiply(2))
        .from(select_ids_source());
    assert_eq!(
        sql(&update),
        "UPDATE OR IGNORE main.testTable AS t NOT INDEXED SET score = score * 2 \
         FROM (SELECT id FROM other) AS o"
    );
    assert_eq!(
        update.without_schema().to_string(),
        "UPDATE OR IGNORE testTable AS t NOT INDEXED SET score = score * 2 \
         FROM (SELECT id FROM other) AS o"
    );
}

fn select_ids_source() -> winq_core::TableOrSubquery {
    winq_core::TableOrSubquery::select(select_ids()).alias("o")
}

#[test]
fn update_without_assignments_is_refused() {
    let update = UpdateStatement::new("testTable");
    assert_eq!(
        update.to_sql(),
        Err(SyntaxError::Invalid(NodeKind::UpdateStatement))
    );
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn delete_forms() {
    assert_eq!(sql(&DeleteStatement::new("testTable")), "DELETE FROM testTable");
    let delete = DeleteStatement::new("testTable")
        .schema("main")
        .where_clause(Column::new("id").in_select(select_ids(), true));
    assert_eq!(
        sql(&delete),
        "DELETE FROM main.testTable WHERE id NOT IN(SELECT id FROM other)"
    );
    assert_eq!(
        delete.without_schema().to_string(),
        "DELETE FROM testTable WHERE id NOT IN(SELECT id FROM other)"
    );
}

#[test]
fn empty_table_name_is_refused() {
    let delete = DeleteStatement::new("");
    assert_eq!(
        delete.to_sql(),
        Err(SyntaxError::Invalid(NodeKind::QualifiedTableName))
    );
}

// ===================================================================
// Multi-row writes
// ===================================================================

#[test]
fn insert_multi_write_classification() {
    let base = InsertStatement::new().insert_into("testTable");
    let cases = [
        (base.clone().values([1]), false),
        (base.clone().values([1]).values([2]), true),
        (base.clone().default_values(), false),
        (base.clone().select(select_ids()), true),
        (base.clone().select(select_ids().limit(1)), false),
        (base.clone().select(select_ids().limit(2)), true),
        (base.clone().select(select_ids().limit(0)), true),
        (base.clone().select(select_ids().limit(1).offset(1)), true),
        (base.clone().select(select_ids().limit_range(1, 1)), true),
        (base.select(select_ids().limit(BindParameter::new(1))), true),
    ];
    for (insert, expected) in cases {
        assert_eq!(insert.is_multi_write(), expected, "{insert}");
    }
}

#[test]
fn update_multi_write_classification() {
    let base = UpdateStatement::new("testTable").set(["score"], 0);
    assert!(base.is_multi_write());
    assert!(!base.clone().limit(1).is_multi_write());
    assert!(base.clone().limit(2).is_multi_write());
    assert!(base.limit(1).offset(3).is_multi_write());
}

#[test]
fn other_statements_are_not_multi_write() {
    let delete = Statement::from(DeleteStatement::new("testTable"));
    assert!(!delete.is_multi_write());
    let select = Statement::from(select_ids());
    assert!(!select.is_multi_write());
}

// ===================================================================
// Target comparison
// ===================================================================

#[test]
fn unqualified_table_is_main() {
    let plain = InsertStatement::new().insert_into("testTable").values([1]);
    let main = plain.clone().schema("main");
    let temp = plain.clone().schema("temp");
    assert!(plain.is_targeting_same_table(&main));
    assert!(!plain.is_targeting_same_table(&temp));
    assert!(!plain.is_targeting_same_table(&InsertStatement::new().insert_into("other")));

    let update = UpdateStatement::new("testTable").set(["score"], 0);
    assert!(update.is_targeting_same_table(&update.clone().schema("main")));
    let delete = DeleteStatement::new("testTable").schema("temp");
    assert!(!delete.is_targeting_same_table(&DeleteStatement::new("testTable")));
}
