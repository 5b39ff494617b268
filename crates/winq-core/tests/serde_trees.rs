//! Syntax trees survive a JSON round trip and render the same SQL.
#![cfg(feature = "serde")]

mod common;
use common::*;

use winq_core::{
    Column, CommonTableExpression, Expression, ExpressionOperable, InsertStatement,
    SelectStatement, Statement, Upsert, WindowDef,
};

fn sample_select() -> SelectStatement {
    let recent = SelectStatement::new()
        .select(["id"])
        .from("testTable")
        .where_clause(Column::new("score").between(1, 2.5));
    SelectStatement::new()
        .with(CommonTableExpression::new("recent", recent))
        .select([
            Expression::from(Column::new("content")).alias("c"),
            Expression::window_function("rank")
                .over(WindowDef::new().order_by([Column::new("score").desc()]))
                .alias("r"),
        ])
        .from("testTable")
        .where_clause(
            Column::new("id")
                .in_table("recent", false)
                .and(Column::new("content").like("a%").escape("\\")),
        )
        .limit(5)
}

#[test]
fn select_round_trip() {
    let select = sample_select();
    let json = serde_json::to_string(&select).expect("serialize");
    let back: SelectStatement = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, select);
    assert_eq!(sql(&back), sql(&select));
}

#[test]
fn statement_round_trip() {
    let insert = InsertStatement::new()
        .insert_into("testTable")
        .columns(["id", "content"])
        .values([Expression::from(1), Expression::from(vec![0x01_u8, 0xFF])])
        .upsert(Upsert::new().indexed_columns(["id"]).do_nothing());
    let statement = Statement::from(insert);
    let json = serde_json::to_value(&statement).expect("serialize");
    let back: Statement = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, statement);
    assert_eq!(
        sql(&back),
        "INSERT INTO testTable(id, content) VALUES(1, X'01FF') ON CONFLICT(id) DO NOTHING"
    );
}
