//! Acceptance tests: rendered SQL is compiled and run by SQLite.

mod common;
use common::*;

use winq_core::{
    BeginStatement, BindParameter, Column, ColumnDef, ColumnType, CommitStatement,
    CommonTableExpression, CreateIndexStatement, CreateTableStatement, CreateTriggerStatement,
    DeleteStatement, DropStatement, Expression, ExpressionOperable, FrameEnd, FrameSpec,
    FrameStart, IndexedColumn, InsertStatement, JoinClause, LiteralValue, Order, Pragma,
    PragmaStatement, RaiseFunction, RollbackStatement, SelectStatement, TableConstraint,
    TableOrSubquery, UpdateStatement, Upsert, WindowDef,
};

fn seed(connection: &rusqlite::Connection) {
    let insert = InsertStatement::new()
        .insert_into("testTable")
        .columns(["id", "content", "score"])
        .values([Expression::from(1), "alpha".into(), 1.5.into()])
        .values([Expression::from(2), "beta".into(), 2.5.into()])
        .values([Expression::from(3), Expression::null(), 0.into()]);
    run(connection, &insert);
    let insert = InsertStatement::new()
        .insert_into("other")
        .columns(["id", "testId", "label"])
        .values([Expression::from(10), 1.into(), "x".into()])
        .values([Expression::from(11), 2.into(), "y".into()]);
    run(connection, &insert);
}

fn all_from(table: &str) -> SelectStatement {
    SelectStatement::new().select([Column::all()]).from(table)
}

// ===================================================================
// Expressions
// ===================================================================

#[test]
fn expression_forms_prepare() {
    let column = || Column::new("content");
    let expressions: Vec<Expression> = vec![
        Column::new("id").plus(1).multiply(Column::new("score").minus(2)),
        Column::new("id").negative().negative(),
        Expression::from(-1).negative(),
        Column::new("id").bit_not().bit_and(3).bit_or(4),
        Column::new("id").left_shift(1).right_shift(1).modulo(2),
        column().concat("!"),
        column().is(Expression::null()).or(column().is_not(Expression::null())),
        column().is_null().and(column().is_not_null().not()),
        column().like("a%").escape("!"),
        column().not_like("b%"),
        column().glob("a*").and(column().not_glob("z*")),
        column().collate("NOCASE").eq("ALPHA"),
        Column::new("score").between(1, 2),
        Column::new("score").not_between(Column::new("id").minus(1), 10),
        Column::new("id").in_empty(false).into(),
        Column::new("id").in_list([1, 2]).into(),
        Column::new("id").not_in_list([3]).into(),
        Column::new("id")
            .in_select(SelectStatement::new().select(["testId"]).from("other"), false)
            .into(),
        column().in_table("tag", false).into(),
        column().in_table("tag", true).schema("main").into(),
        Expression::exists(all_from("other")),
        Expression::not_exists(all_from("audit")),
        Expression::select(SelectStatement::new().select([Expression::count_all()]).from("other")),
        Expression::case_with(Column::new("id"))
            .when_then(1, "one")
            .otherwise("many")
            .into(),
        Expression::case()
            .when_then(Column::new("score").gt(1), true)
            .into(),
        Expression::cast(column()).as_type(ColumnType::Blob),
        Expression::list([1, 2]).eq(Expression::list([Column::new("id"), Column::new("id")])),
        Expression::from(vec![0xCA_u8, 0xFE]).eq(Expression::hex(column())),
        Expression::from(f64::INFINITY).gt(Column::new("score")),
        Expression::from(1.1).lt(2),
        Expression::from(LiteralValue::CurrentTimestamp).is_not_null(),
        Expression::coalesce([Expression::from(column()), Expression::from("none")]).into(),
        Expression::substr(column(), 1, 2).into(),
        Expression::if_null(column(), "").into(),
        Expression::upper(column()).concat(Expression::lower(column())),
        Expression::abs(Column::new("score")).plus(Expression::round(Column::new("score"))),
        Expression::length(column()).into(),
    ];
    let connection = connection();
    seed(&connection);
    for expression in expressions {
        let select = SelectStatement::new()
            .select([expression.alias("value")])
            .from("testTable");
        assert_eq!(row_count(&connection, &select), 3, "{select}");
    }
}

#[test]
fn bind_parameters_prepare() {
    let select = all_from("testTable").where_clause(
        Column::new("id")
            .eq(BindParameter::new(1))
            .or(Column::new("id").eq(BindParameter::anonymous()))
            .or(Column::new("content").eq(BindParameter::colon("c")))
            .or(Column::new("content").eq(BindParameter::dollar("d")))
            .or(Column::new("content").eq(BindParameter::at("e"))),
    );
    assert_prepares(&select);
}

#[test]
fn aggregates_and_windows_run() {
    let connection = connection();
    seed(&connection);
    let select = SelectStatement::new()
        .select([
            Expression::from(Column::new("id")).alias("id"),
            Expression::window_function("row_number")
                .over(WindowDef::new().order_by([Column::new("id").desc()]))
                .alias("position"),
            Expression::window_function("sum")
                .argument(Column::new("score"))
                .filter(Column::new("score").gt(0))
                .over_window("w")
                .alias("running"),
            Expression::window_function("count")
                .wildcard()
                .over(WindowDef::new().base("w").frame(
                    FrameSpec::rows(FrameStart::UnboundedPreceding).and(FrameEnd::CurrentRow),
                ))
                .alias("seen"),
        ])
        .from("testTable")
        .window(
            "w",
            WindowDef::new()
                .partition([Column::new("content").is_null()])
                .order_by([Column::new("id").asc()]),
        );
    assert_eq!(row_count(&connection, &select), 3);

    let select = SelectStatement::new()
        .select([
            Expression::from(Expression::count(Column::new("content")).distinct()),
            Expression::from(Expression::avg(Column::new("score"))),
            Expression::from(Expression::total(Column::new("score"))),
            Expression::from(Expression::max(Column::new("id"))),
            Expression::from(Expression::min(Column::new("id"))),
            Expression::from(Expression::group_concat(Column::new("content"))),
        ])
        .from("testTable")
        .group_by([Column::new("score").gt(1)])
        .having(Expression::sum(Column::new("id")).gt(0));
    assert_eq!(row_count(&connection, &select), 2);
}

// ===================================================================
// SELECT statements
// ===================================================================

#[test]
fn joins_run() {
    let connection = connection();
    seed(&connection);
    let join = JoinClause::new(TableOrSubquery::table("testTable").alias("t"))
        .inner_join(TableOrSubquery::table("other").alias("o"))
        .on(Column::new("testId").table("o").eq(Column::new("id").table("t")));
    let select = SelectStatement::new()
        .select([Column::new("label").table("o")])
        .from(join);
    assert_eq!(row_count(&connection, &select), 2);

    let join = JoinClause::new(TableOrSubquery::table("testTable").alias("t"))
        .left_outer_join(TableOrSubquery::table("other").alias("o"))
        .on(Column::new("testId").table("o").eq(Column::new("id").table("t")));
    let select = SelectStatement::new().select([Column::all()]).from(join);
    assert_eq!(row_count(&connection, &select), 3);

    let join = JoinClause::new("testTable").natural_join("audit");
    assert_eq!(row_count(&connection, &all_from("testTable").from(join)), 0);

    let join = JoinClause::new("testTable").cross_join("other").comma("audit");
    assert_prepares(&SelectStatement::new().select([1]).from(join));

    let join = JoinClause::new("testTable")
        .join("other")
        .using([Column::new("id")]);
    assert_prepares(&SelectStatement::new().select([1]).from(join));
}

#[test]
fn compound_and_recursive_selects_run() {
    let connection = connection();
    seed(&connection);
    let select = SelectStatement::new()
        .select(["id"])
        .from("testTable")
        .union()
        .select(["testId"])
        .from("other")
        .order_by([Column::new("id").desc()])
        .limit(10);
    assert_eq!(row_count(&connection, &select), 3);

    let counter = SelectStatement::new()
        .values([1])
        .union_all()
        .select([Column::new("n").plus(1)])
        .from("counter")
        .where_clause(Column::new("n").lt(5));
    let select = SelectStatement::new()
        .with_recursive(CommonTableExpression::new("counter", counter).columns(["n"]))
        .select(["n"])
        .from("counter");
    assert_eq!(row_count(&connection, &select), 5);

    let select = SelectStatement::new()
        .select(["id"])
        .from("testTable")
        .except()
        .select(["testId"])
        .from("other")
        .limit_range(0, 5);
    assert_eq!(row_count(&connection, &select), 1);
}

#[test]
fn subquery_sources_run() {
    let connection = connection();
    seed(&connection);
    let select = SelectStatement::new()
        .select([Column::new("id").table("s")])
        .from(TableOrSubquery::select(all_from("testTable").limit(2)).alias("s"));
    assert_eq!(row_count(&connection, &select), 2);

    let select = SelectStatement::new()
        .select([Column::new("value")])
        .from(TableOrSubquery::function("json_each", ["[1, 2, 3, 4]"]));
    assert_eq!(row_count(&connection, &select), 4);
}

// ===================================================================
// DML
// ===================================================================

#[test]
fn upserts_run() {
    let connection = connection();
    seed(&connection);
    let insert = InsertStatement::new()
        .insert_into("testTable")
        .columns(["id", "content"])
        .values([Expression::from(1), "again".into()])
        .upsert(Upsert::new().indexed_columns(["id"]).do_nothing());
    run(&connection, &insert);

    let insert = InsertStatement::new()
        .insert_into("testTable")
        .alias("t")
        .columns(["id", "content"])
        .values([Expression::from(2), "gamma".into()])
        .upsert(
            Upsert::new()
                .indexed_columns([IndexedColumn::column("id")])
                .set(["content"], Column::new("content").table("excluded"))
                .update_condition(Column::new("content").table("t").is_not_null()),
        );
    run(&connection, &insert);

    let select = all_from("testTable").where_clause(Column::new("content").eq("gamma"));
    assert_eq!(row_count(&connection, &select), 1);
    let select = all_from("testTable").where_clause(Column::new("content").eq("again"));
    assert_eq!(row_count(&connection, &select), 0);
}

#[test]
fn insert_sources_run() {
    let connection = connection();
    seed(&connection);
    run(
        &connection,
        &InsertStatement::new()
            .insert_into("testTable")
            .schema("main")
            .default_values(),
    );
    run(
        &connection,
        &InsertStatement::new()
            .or_ignore()
            .insert_into("audit")
            .columns(["id", "action"])
            .select(
                SelectStatement::new()
                    .select([Expression::from(Column::new("id")), Expression::from("copied")])
                    .from("testTable")
                    .where_clause(Column::new("content").is_not_null()),
            ),
    );
    assert_eq!(row_count(&connection, &all_from("testTable")), 4);
    assert_eq!(row_count(&connection, &all_from("audit")), 2);
}

#[test]
fn update_and_delete_run() {
    let connection = connection();
    seed(&connection);
    let update = UpdateStatement::new("testTable")
        .set(["content"], Column::new("label").table("o"))
        .from(TableOrSubquery::table("other").alias("o"))
        .where_clause(Column::new("testId").table("o").eq(Column::new("id").table("testTable")));
    run(&connection, &update);
    let select = all_from("testTable").where_clause(Column::new("content").in_list(["x", "y"]));
    assert_eq!(row_count(&connection, &select), 2);

    let update = UpdateStatement::new("testTable")
        .or_replace()
        .set(["score", "content"], Expression::list([Expression::from(9), "z".into()]))
        .where_clause(Column::new("id").eq(3));
    run(&connection, &update);

    let delete = DeleteStatement::new("testTable").where_clause(
        Column::new("id").in_select(SelectStatement::new().select(["testId"]).from("other"), true),
    );
    run(&connection, &delete);
    assert_eq!(row_count(&connection, &all_from("testTable")), 2);
}

// ===================================================================
// Schema statements
// ===================================================================

#[test]
fn schema_statements_run() {
    let connection = connection();
    let create = CreateTableStatement::new("item")
        .if_not_exists()
        .column(ColumnDef::new("id", ColumnType::Integer).primary_key())
        .column(ColumnDef::new("name", ColumnType::Text).not_null().unique())
        .column(
            ColumnDef::new("created", ColumnType::Integer)
                .default(Expression::function("unixepoch")),
        )
        .column(ColumnDef::new("price", ColumnType::Float).default(0));
    run(&connection, &create);

    let create = CreateTableStatement::new("pair")
        .column(ColumnDef::new("a", ColumnType::Integer))
        .column(ColumnDef::new("b", ColumnType::Integer))
        .constraint(TableConstraint::primary_key(["a", "b"]))
        .constraint(TableConstraint::check(Column::new("a").lt(Column::new("b"))))
        .without_rowid();
    run(&connection, &create);

    let create = CreateTableStatement::new("snapshot").as_select(all_from("testTable"));
    run(&connection, &create);

    let index = CreateIndexStatement::new("idx_item_name", "item")
        .unique()
        .columns([IndexedColumn::column("name").collate("NOCASE").order(Order::Desc)])
        .where_clause(Column::new("price").gt(0));
    run(&connection, &index);

    run(&connection, &DropStatement::index("idx_item_name").if_exists());
    run(&connection, &DropStatement::table("snapshot"));
    run(&connection, &DropStatement::table("snapshot").if_exists());
}

#[test]
fn triggers_run() {
    let connection = connection();
    let trigger = CreateTriggerStatement::new("audit_insert")
        .after()
        .insert()
        .on("testTable")
        .for_each_row()
        .execute(
            InsertStatement::new()
                .insert_into("audit")
                .schema("main")
                .columns(["id", "action"])
                .values([Expression::from(Column::new("id").table("new")), "insert".into()]),
        );
    run(&connection, &trigger);

    let guard = CreateTriggerStatement::new("guard")
        .before()
        .delete()
        .on("audit")
        .execute(SelectStatement::new().select([Expression::from(RaiseFunction::abort(
            "audit is append-only",
        ))]));
    run(&connection, &guard);

    seed(&connection);
    assert_eq!(row_count(&connection, &all_from("audit")), 3);

    let sql = sql(&DeleteStatement::new("audit"));
    let error = connection
        .execute_batch(&sql)
        .expect_err("the guard trigger must abort the delete");
    assert!(error.to_string().contains("audit is append-only"));

    run(&connection, &DropStatement::trigger("guard"));
    run(&connection, &DeleteStatement::new("audit"));
    assert_eq!(row_count(&connection, &all_from("audit")), 0);
}

#[test]
fn transactions_run() {
    let connection = connection();
    run(&connection, &BeginStatement::immediate());
    seed(&connection);
    run(&connection, &RollbackStatement::new());
    assert_eq!(row_count(&connection, &all_from("testTable")), 0);

    run(&connection, &BeginStatement::new());
    connection
        .execute_batch("SAVEPOINT sp")
        .unwrap_or_else(|e| panic!("Failed to open savepoint: {e}"));
    seed(&connection);
    run(&connection, &RollbackStatement::to("sp"));
    run(&connection, &CommitStatement);
    assert_eq!(row_count(&connection, &all_from("testTable")), 0);
}

#[test]
fn pragmas_run() {
    let connection = connection();
    let read = |pragma: Pragma| {
        let query = sql(&PragmaStatement::from(pragma));
        connection
            .query_row(&query, [], |row| row.get::<_, i64>(0))
            .unwrap_or_else(|e| panic!("SQLite failed to query: {query}\nError: {e}"))
    };

    let version = PragmaStatement::from(Pragma::user_version()).to_value(123);
    run(&connection, &version);
    assert_eq!(read(Pragma::user_version()), 123);

    let foreign_keys = PragmaStatement::from(Pragma::foreign_keys()).to_value(true);
    run(&connection, &foreign_keys);
    assert_eq!(read(Pragma::foreign_keys()), 1);

    let table_info = PragmaStatement::from(Pragma::table_info())
        .schema("main")
        .with("testTable");
    assert_eq!(row_count(&connection, &table_info), 3);
}
