mod common;

use common::{Call, MockConnector, ints};
use kwilorm::prelude::*;
use kwilorm::Session;
use serde::Deserialize;
use std::sync::Arc;

fn users(mock: &Arc<MockConnector>) -> TableQuery {
    TableQuery::new(Session::new(mock.clone(), false), "users")
}

#[tokio::test]
async fn insert_renders_multi_row_statement() {
    let mock = MockConnector::new();
    mock.reply_affected(2);

    let result = users(&mock)
        .insert([
            record! { "a" => 1, "b" => 2 },
            record! { "a" => 3, "b" => 4 },
        ])
        .await
        .unwrap();

    assert_eq!(result, Affected { affected_rows: 2 });
    assert_eq!(
        mock.last_call(),
        Call {
            sql: "INSERT INTO users (a,b) VALUES ($1,$2),($3,$4)".into(),
            params: Some(ints(&[1, 2, 3, 4])),
            sync: false,
        }
    );
}

#[tokio::test]
async fn insert_ignores_accumulated_conditions() {
    let mock = MockConnector::new();
    users(&mock)
        .and_eq("id", 9)
        .insert([record! { "name" => "x" }])
        .await
        .unwrap();
    assert_eq!(mock.last_call().sql, "INSERT INTO users (name) VALUES ($1)");
}

#[tokio::test]
async fn update_continues_numbering_after_set() {
    let mock = MockConnector::new();
    mock.reply_affected(1);

    let result = users(&mock)
        .and_where("id", "=", 7)
        .update(record! { "x" => 5 })
        .await
        .unwrap();

    assert_eq!(result.affected_rows, 1);
    let call = mock.last_call();
    assert_eq!(call.sql, "UPDATE users SET x=$1 WHERE id = $2");
    assert_eq!(call.params, Some(ints(&[5, 7])));
}

#[tokio::test]
async fn delete_with_limit() {
    let mock = MockConnector::new();
    mock.reply_affected(3);

    let result = users(&mock)
        .and_null("email")
        .and_lt("age", 10)
        .limit(3)
        .delete()
        .await
        .unwrap();

    assert_eq!(result.affected_rows, 3);
    let call = mock.last_call();
    assert_eq!(
        call.sql,
        "DELETE FROM users WHERE email IS NULL AND age < $1 LIMIT 3"
    );
    assert_eq!(call.params, Some(ints(&[10])));
}

#[tokio::test]
async fn truncate_sends_no_params() {
    let mock = MockConnector::new();
    users(&mock).truncate().await.unwrap();
    assert_eq!(mock.last_call().sql, "TRUNCATE users");
    assert_eq!(mock.last_call().params, Some(vec![]));
}

#[tokio::test]
async fn get_returns_rows_in_order() {
    let mock = MockConnector::new();
    mock.reply_rows(vec![
        record! { "id" => 2, "name" => "b" },
        record! { "id" => 1, "name" => "a" },
    ]);

    let rows = users(&mock)
        .select(["id", "name"])
        .and_in("id", [1, 2])
        .order_by("id", Order::Desc)
        .limit(2)
        .get()
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], Value::Int(2));
    let call = mock.last_call();
    assert_eq!(
        call.sql,
        "SELECT id,name FROM users WHERE id IN ($1,$2) ORDER BY id DESC LIMIT 2"
    );
    assert_eq!(call.params, Some(ints(&[1, 2])));
}

#[tokio::test]
async fn get_without_modifiers_selects_everything() {
    let mock = MockConnector::new();
    let rows = users(&mock).get().await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(mock.last_call().sql, "SELECT * FROM users");
}

#[tokio::test]
async fn first_forces_limit_one() {
    let mock = MockConnector::new();
    mock.reply_rows(vec![record! { "id" => 1 }]);
    mock.reply_rows(vec![]);

    let query = users(&mock).and_gt("age", 30).limit(50);
    let row = query.first().await.unwrap();
    assert_eq!(row, Some(record! { "id" => 1 }));
    assert_eq!(
        mock.last_call().sql,
        "SELECT * FROM users WHERE age > $1 LIMIT 1"
    );

    assert_eq!(query.first().await.unwrap(), None);

    // The query keeps its own limit for later calls.
    query.get().await.unwrap();
    assert_eq!(
        mock.last_call().sql,
        "SELECT * FROM users WHERE age > $1 LIMIT 50"
    );
}

#[tokio::test]
async fn find_bypasses_conditions() {
    let mock = MockConnector::new();
    mock.reply_rows(vec![record! { "id" => 42, "name" => "z" }]);

    let row = users(&mock)
        .and_eq("name", "ignored")
        .select(["name"])
        .find(42)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(row["name"], Value::from("z"));
    let call = mock.last_call();
    assert_eq!(call.sql, "SELECT * FROM users WHERE id = $1");
    assert_eq!(call.params, Some(ints(&[42])));

    assert_eq!(users(&mock).find("missing").await.unwrap(), None);
}

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: i64,
    name: String,
}

#[tokio::test]
async fn typed_reads_map_records() {
    let mock = MockConnector::new();
    mock.reply_rows(vec![record! { "id" => 1, "name" => "a" }]);
    mock.reply_rows(vec![record! { "id" => 2, "name" => "b" }]);
    mock.reply_rows(vec![record! { "id" => 3 }]);

    let all: Vec<User> = users(&mock).get_as().await.unwrap();
    assert_eq!(all, vec![User { id: 1, name: "a".into() }]);

    let first: Option<User> = users(&mock).first_as().await.unwrap();
    assert_eq!(first, Some(User { id: 2, name: "b".into() }));

    let err = users(&mock).find_as::<User>(3).await.unwrap_err();
    assert!(matches!(err, OrmError::Decode { .. }));
}

#[tokio::test]
async fn count_parses_integer_cell() {
    let mock = MockConnector::new();
    mock.reply_rows(vec![record! { "count" => "12" }]);

    let count = users(&mock).and_eq("active", 1).count().await.unwrap();
    assert_eq!(count, 12);
    let call = mock.last_call();
    assert_eq!(call.sql, "SELECT COUNT(*) FROM users WHERE active = $1");
    assert_eq!(call.params, Some(ints(&[1])));
}

#[tokio::test]
async fn count_accepts_integral_decimal_text() {
    let mock = MockConnector::new();
    mock.reply_rows(vec![record! { "count" => "12.0" }]);
    mock.reply_rows(vec![record! { "count" => "12.5" }]);

    assert_eq!(users(&mock).count().await.unwrap(), 12);
    let err = users(&mock).count().await.unwrap_err();
    assert!(matches!(err, OrmError::Decode { .. }));
}

#[tokio::test]
async fn count_rejects_non_integer() {
    let mock = MockConnector::new();
    mock.reply_rows(vec![record! { "count" => "many" }]);
    let err = users(&mock).count().await.unwrap_err();
    assert!(matches!(err, OrmError::Decode { .. }));
}

#[tokio::test]
async fn float_aggregates() {
    let mock = MockConnector::new();
    mock.reply_rows(vec![record! { "max" => 9.5 }]);
    mock.reply_rows(vec![record! { "min" => "1.25" }]);
    mock.reply_rows(vec![record! { "sum" => 30 }]);
    mock.reply_rows(vec![record! { "avg" => "n/a" }]);
    mock.reply_rows(vec![record! { "avg" => None::<f64> }]);

    let q = users(&mock).and_between("age", 18, 30);
    assert_eq!(q.max("score").await.unwrap(), 9.5);
    assert_eq!(
        mock.last_call().sql,
        "SELECT MAX(score) FROM users WHERE age BETWEEN $1 AND $2"
    );
    assert_eq!(q.min("score").await.unwrap(), 1.25);
    assert_eq!(q.sum("score").await.unwrap(), 30.0);
    assert!(q.avg("score").await.unwrap().is_nan());
    assert!(q.avg("score").await.unwrap().is_nan());
    assert_eq!(
        mock.last_call().sql,
        "SELECT AVG(score) FROM users WHERE age BETWEEN $1 AND $2"
    );
}

#[tokio::test]
async fn aggregate_falls_back_to_first_column() {
    let mock = MockConnector::new();
    mock.reply_rows(vec![record! { "total" => 4 }]);
    assert_eq!(users(&mock).count().await.unwrap(), 4);
}

#[tokio::test]
async fn connector_error_string_fails_every_terminal() {
    let mock = MockConnector::new();
    mock.fail_all("permission denied");
    let q = users(&mock).and_eq("id", 1);

    let errors = vec![
        q.insert([record! { "a" => 1 }]).await.unwrap_err(),
        q.update(record! { "a" => 1 }).await.unwrap_err(),
        q.delete().await.unwrap_err(),
        q.truncate().await.unwrap_err(),
        q.get().await.unwrap_err(),
        q.first().await.unwrap_err(),
        q.find(1).await.unwrap_err(),
        q.count().await.unwrap_err(),
        q.max("a").await.unwrap_err(),
        q.min("a").await.unwrap_err(),
        q.sum("a").await.unwrap_err(),
        q.avg("a").await.unwrap_err(),
        q.raw_query("SELECT 1").await.unwrap_err(),
        q.raw_prepared_statement("SELECT $1", &[Value::Int(1)])
            .await
            .unwrap_err(),
    ];

    for err in errors {
        assert_eq!(err.execution_message(), Some("permission denied"));
    }
}

#[tokio::test]
async fn invalid_state_never_reaches_connector() {
    let mock = MockConnector::new();

    let empty: Vec<Record> = Vec::new();
    assert!(users(&mock).insert(empty).await.unwrap_err().is_validation());
    assert!(
        users(&mock)
            .update(Record::new())
            .await
            .unwrap_err()
            .is_validation()
    );
    assert!(
        users(&mock)
            .and_in("id", Vec::<i64>::new())
            .get()
            .await
            .unwrap_err()
            .is_validation()
    );
    assert!(
        users(&mock)
            .and_where("id", "===", 1)
            .delete()
            .await
            .unwrap_err()
            .is_validation()
    );
    assert!(
        users(&mock)
            .insert([record! { "a" => 1 }, record! { "b" => 2 }])
            .await
            .unwrap_err()
            .is_validation()
    );

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn raw_passthrough() {
    let mock = MockConnector::new();
    mock.reply(QueryOutput::new(5, vec![]));

    let output = users(&mock).raw_query("SELECT now()").await.unwrap();
    assert_eq!(output.row_count, 5);
    assert_eq!(
        mock.last_call(),
        Call {
            sql: "SELECT now()".into(),
            params: None,
            sync: false,
        }
    );

    users(&mock)
        .raw_prepared_statement("SELECT * FROM t WHERE a = $1", &[Value::from("x")])
        .await
        .unwrap();
    assert_eq!(mock.last_call().params, Some(vec![Value::from("x")]));
}

#[tokio::test]
async fn sync_flag_is_forwarded() {
    let mock = MockConnector::new();
    let q = TableQuery::new(Session::new(mock.clone(), true), "users");
    assert!(q.is_syncing());

    q.get().await.unwrap();
    q.raw_query("SELECT 1").await.unwrap();
    assert!(mock.calls().iter().all(|call| call.sync));
}
