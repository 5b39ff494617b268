//! Tests for schema statements: CREATE TABLE, CREATE INDEX, CREATE
//! TRIGGER, DROP, PRAGMA and transaction control.

mod common;
use common::*;

use winq_core::syntax::enums::{ForeignKeyAction, TriggerTiming};
use winq_core::{
    BeginStatement, Column, ColumnConstraint, ColumnDef, ColumnType, CommitStatement,
    ConflictAction, CreateIndexStatement, CreateTableStatement, CreateTriggerStatement,
    DeleteStatement, DropStatement, Expression, ExpressionOperable, ForeignKeyClause, Identifier,
    IndexedColumn, InsertStatement, LiteralValue, NodeKind, Order, Pragma, PragmaStatement,
    RaiseFunction, RollbackStatement, SelectStatement, Statement, SyntaxError, TableConstraint,
    UpdateStatement,
};

// ===================================================================
// CREATE TABLE
// ===================================================================

#[test]
fn create_table_with_column_constraints() {
    let create = CreateTableStatement::new("item")
        .column(
            ColumnDef::new("id", ColumnType::Integer)
                .constraint(ColumnConstraint::primary_key().order(Order::Asc).auto_increment()),
        )
        .column(ColumnDef::new("name", ColumnType::Text).not_null().unique())
        .column(ColumnDef::new("price", ColumnType::Float).default(0))
        .column(ColumnDef::new("created", ColumnType::Integer).default(
            Expression::function("unixepoch"),
        ))
        .column(
            ColumnDef::untyped("owner").constraint(ColumnConstraint::foreign_key(
                ForeignKeyClause::new("testTable")
                    .column("id")
                    .on_delete(ForeignKeyAction::Cascade),
            )),
        );
    assert_eq!(
        sql(&create),
        "CREATE TABLE item(id INTEGER PRIMARY KEY ASC AUTOINCREMENT, \
         name TEXT NOT NULL UNIQUE, price REAL DEFAULT 0, \
         created INTEGER DEFAULT (unixepoch()), \
         owner REFERENCES testTable(id) ON DELETE CASCADE)"
    );
}

#[test]
fn create_table_with_table_constraints() {
    let create = CreateTableStatement::new("pair")
        .temp()
        .if_not_exists()
        .column(ColumnDef::new("a", ColumnType::Integer))
        .column(ColumnDef::new("b", ColumnType::Integer))
        .constraint(
            TableConstraint::primary_key(["a", "b"])
                .named("pk")
                .conflict(ConflictAction::Replace),
        )
        .constraint(TableConstraint::check(Column::new("a").lt(Column::new("b"))))
        .without_rowid();
    assert_eq!(
        sql(&create),
        "CREATE TEMP TABLE IF NOT EXISTS pair(a INTEGER, b INTEGER, \
         CONSTRAINT pk PRIMARY KEY(a, b) ON CONFLICT REPLACE, CHECK(a < b)) WITHOUT ROWID"
    );
}

#[test]
fn create_table_as_select() {
    let create = CreateTableStatement::new("copy")
        .schema("main")
        .as_select(SelectStatement::new().select([Column::all()]).from("testTable"));
    assert_eq!(
        sql(&create),
        "CREATE TABLE main.copy AS SELECT * FROM testTable"
    );
}

#[test]
fn create_table_without_columns_is_refused() {
    let create = CreateTableStatement::new("empty");
    assert_eq!(
        create.to_sql(),
        Err(SyntaxError::Invalid(NodeKind::CreateTableStatement))
    );
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "WITHOUT ROWID applied to CREATE TABLE AS")]
fn without_rowid_on_select_panics_in_debug() {
    let _ = CreateTableStatement::new("copy")
        .as_select(SelectStatement::new().select([1]))
        .without_rowid();
}

#[test]
fn column_def_queries() {
    let column = ColumnDef::new("id", ColumnType::Integer)
        .constraint(ColumnConstraint::primary_key().auto_increment());
    assert!(column.is_primary_key());
    assert!(column.is_auto_increment());
    assert!(!column.is_unique());
    assert!(ColumnDef::untyped("x").unique().is_unique());
}

// ===================================================================
// CREATE INDEX
// ===================================================================

#[test]
fn create_index_forms() {
    let index = CreateIndexStatement::new("idx_content", "testTable")
        .columns(["content"]);
    assert_eq!(sql(&index), "CREATE INDEX idx_content ON testTable(content)");

    let index = CreateIndexStatement::new("idx_partial", "testTable")
        .unique()
        .if_not_exists()
        .schema("main")
        .columns([
            IndexedColumn::column("content").collate("NOCASE").order(Order::Desc),
            IndexedColumn::expression(Column::new("score").multiply(2)),
        ])
        .where_clause(Column::new("content").is_not_null());
    assert_eq!(
        sql(&index),
        "CREATE UNIQUE INDEX IF NOT EXISTS main.idx_partial ON testTable\
         (content COLLATE NOCASE DESC, score * 2) WHERE content NOTNULL"
    );
}

#[test]
fn create_index_without_columns_is_refused() {
    let index = CreateIndexStatement::new("idx", "testTable");
    assert!(index.to_sql().is_err());
}

// ===================================================================
// CREATE TRIGGER
// ===================================================================

#[test]
fn trigger_with_several_body_statements() {
    let trigger = CreateTriggerStatement::new("audit_insert")
        .after()
        .insert()
        .on("testTable")
        .for_each_row()
        .when(Column::new("content").table("new").is_not_null())
        .execute(
            InsertStatement::new()
                .insert_into("audit")
                .schema("main")
                .columns(["id", "action"])
                .values([Expression::from(Column::new("id").table("new")), "insert".into()]),
        )
        .execute(
            UpdateStatement::new("other")
                .schema("main")
                .set(["label"], "touched")
                .where_clause(Column::new("testId").eq(Column::new("id").table("new"))),
        );
    assert_eq!(
        sql(&trigger),
        "CREATE TRIGGER audit_insert AFTER INSERT ON testTable FOR EACH ROW \
         WHEN new.content NOTNULL BEGIN \
         INSERT INTO audit(id, action) VALUES(new.id, 'insert'); \
         UPDATE other SET label = 'touched' WHERE testId == new.id; END"
    );
}

#[test]
fn trigger_events_and_timings() {
    let body = DeleteStatement::new("audit");
    let cases = [
        (
            CreateTriggerStatement::new("t").before().delete(),
            "CREATE TRIGGER t BEFORE DELETE ON testTable BEGIN DELETE FROM audit; END",
        ),
        (
            CreateTriggerStatement::new("t").instead_of().update(),
            "CREATE TRIGGER t INSTEAD OF UPDATE ON testTable BEGIN DELETE FROM audit; END",
        ),
        (
            CreateTriggerStatement::new("t")
                .timing(TriggerTiming::After)
                .update_of(["content", "score"]),
            "CREATE TRIGGER t AFTER UPDATE OF content, score ON testTable \
             BEGIN DELETE FROM audit; END",
        ),
        (
            CreateTriggerStatement::new("t").insert(),
            "CREATE TRIGGER t INSERT ON testTable BEGIN DELETE FROM audit; END",
        ),
    ];
    for (trigger, expected) in cases {
        let trigger = trigger.on("testTable").execute(body.clone());
        assert_eq!(sql(&trigger), expected);
    }
}

#[test]
fn trigger_raise_in_select_body() {
    let trigger = CreateTriggerStatement::new("guard")
        .temp()
        .if_not_exists()
        .before()
        .delete()
        .on("testTable")
        .execute(SelectStatement::new().select([Expression::from(
            RaiseFunction::abort("protected"),
        )]));
    assert_eq!(
        sql(&trigger),
        "CREATE TEMP TRIGGER IF NOT EXISTS guard BEFORE DELETE ON testTable \
         BEGIN SELECT RAISE(ABORT, 'protected'); END"
    );
}

#[test]
fn incomplete_triggers_are_refused() {
    let no_body = CreateTriggerStatement::new("t").delete().on("testTable");
    assert_eq!(
        no_body.to_sql(),
        Err(SyntaxError::Invalid(NodeKind::CreateTriggerStatement))
    );
    let no_event = CreateTriggerStatement::new("t")
        .on("testTable")
        .execute(DeleteStatement::new("audit"));
    assert!(no_event.to_sql().is_err());
    let no_table = CreateTriggerStatement::new("t")
        .delete()
        .execute(DeleteStatement::new("audit"));
    assert!(no_table.to_sql().is_err());
}

// ===================================================================
// DROP and transactions
// ===================================================================

#[test]
fn drop_statements() {
    assert_eq!(sql(&DropStatement::table("testTable")), "DROP TABLE testTable");
    assert_eq!(
        sql(&DropStatement::index("idx").if_exists().schema("main")),
        "DROP INDEX IF EXISTS main.idx"
    );
    assert_eq!(sql(&DropStatement::view("v")), "DROP VIEW v");
    assert_eq!(
        sql(&DropStatement::trigger("audit_insert").if_exists()),
        "DROP TRIGGER IF EXISTS audit_insert"
    );
    assert!(DropStatement::table("").to_sql().is_err());
}

#[test]
fn transaction_statements() {
    assert_eq!(sql(&BeginStatement::new()), "BEGIN");
    assert_eq!(sql(&BeginStatement::deferred()), "BEGIN DEFERRED");
    assert_eq!(sql(&BeginStatement::immediate()), "BEGIN IMMEDIATE");
    assert_eq!(sql(&BeginStatement::exclusive()), "BEGIN EXCLUSIVE");
    assert_eq!(sql(&CommitStatement), "COMMIT");
    assert_eq!(sql(&RollbackStatement::new()), "ROLLBACK");
    assert_eq!(sql(&RollbackStatement::to("sp")), "ROLLBACK TO sp");
    assert!(RollbackStatement::to("").to_sql().is_err());
}

// ===================================================================
// PRAGMA
// ===================================================================

#[test]
fn pragma_forms() {
    let query = PragmaStatement::new().pragma(Pragma::user_version());
    assert_eq!(sql(&query), "PRAGMA user_version");

    let assign = PragmaStatement::from(Pragma::user_version()).to_value(123);
    assert_eq!(sql(&assign), "PRAGMA user_version = 123");

    let qualified = PragmaStatement::from(Pragma::journal_mode())
        .schema("main")
        .to_value("WAL");
    assert_eq!(sql(&qualified), "PRAGMA main.journal_mode = 'WAL'");

    let call = PragmaStatement::from(Pragma::table_info())
        .with("testTable");
    assert_eq!(sql(&call), "PRAGMA table_info('testTable')");

    let custom = PragmaStatement::from(Pragma::new("compile_options"));
    assert_eq!(sql(&custom), "PRAGMA compile_options");
}

#[test]
fn pragma_statement_is_a_statement() {
    let statement = Statement::from(
        PragmaStatement::from(Pragma::index_list())
            .schema("main")
            .with("testTable"),
    );
    assert_eq!(sql(&statement), "PRAGMA main.index_list('testTable')");
    assert_eq!(
        entered_kinds(&statement),
        [
            NodeKind::PragmaStatement,
            NodeKind::Schema,
            NodeKind::Pragma,
            NodeKind::LiteralValue,
        ]
    );
    assert!(!statement.is_multi_write());
}

#[test]
fn incomplete_pragmas_are_refused() {
    assert_eq!(
        PragmaStatement::new().to_sql(),
        Err(SyntaxError::Invalid(NodeKind::PragmaStatement))
    );
    assert_eq!(
        PragmaStatement::new().pragma(Pragma::new("")).to_sql(),
        Err(SyntaxError::Invalid(NodeKind::Pragma))
    );
    let blob = PragmaStatement::from(Pragma::key())
        .to_value(LiteralValue::Blob(vec![0xAB]));
    assert!(blob.to_sql().is_err());
    let null = PragmaStatement::from(Pragma::user_version())
        .with(LiteralValue::Null);
    assert!(null.to_sql().is_err());
}
