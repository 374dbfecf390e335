//! Walks through the table query API against an in-memory connector that
//! prints every statement it receives.
//!
//! Run with: `cargo run --example basic -p kwilorm`

use async_trait::async_trait;
use kwilorm::prelude::*;
use kwilorm::{ConnectorFactory, MoatDebit, MoatFunding};
use std::sync::Arc;

struct EchoConnector;

#[async_trait]
impl Connector for EchoConnector {
    async fn prepared_statement(&self, sql: &str, params: &[Value], sync: bool) -> ConnectorReply {
        let params: Vec<String> = params.iter().map(ToString::to_string).collect();
        println!("[sync={sync}] {sql}  -- [{}]", params.join(", "));

        if sql.starts_with("SELECT COUNT") {
            return QueryOutput::from_rows(vec![record! { "count" => "2" }]).into();
        }
        if sql.starts_with("SELECT") {
            return QueryOutput::from_rows(vec![record! { "id" => 1, "name" => "alice" }]).into();
        }
        if sql.starts_with("DROP") {
            return ConnectorReply::error("permission denied");
        }
        QueryOutput::affected(1).into()
    }

    async fn query(&self, sql: &str, sync: bool) -> ConnectorReply {
        println!("[sync={sync}] {sql}");
        QueryOutput::default().into()
    }

    async fn moat_funding(&self) -> OrmResult<MoatFunding> {
        Ok(MoatFunding {
            funding: "1000".to_string(),
        })
    }

    async fn moat_debit(&self) -> OrmResult<MoatDebit> {
        Ok(MoatDebit {
            debit: "12".to_string(),
        })
    }
}

struct EchoFactory;

impl ConnectorFactory for EchoFactory {
    fn create(&self, config: &ConnectorConfig, _secret_key: &str) -> OrmResult<Arc<dyn Connector>> {
        println!(
            "connecting to {}://{} (moat {})",
            config.protocol(),
            config.host(),
            config.moat
        );
        Ok(Arc::new(EchoConnector))
    }
}

#[tokio::main]
async fn main() -> OrmResult<()> {
    let mut db = Database::new("secret", EchoFactory);
    db.connect_default(&ConnectorConfig::new("demo-moat", "private-key"))?;

    println!("funding: {}", db.moat_funding().await?);

    db.create_table(
        "users",
        &[("id", "INT"), ("name", "TEXT"), ("age", "INT")],
        &["PRIMARY KEY (id)"],
    )
    .await?;

    let inserted = db
        .table("users")?
        .insert([
            record! { "id" => 1, "name" => "alice", "age" => 31 },
            record! { "id" => 2, "name" => "bob", "age" => 27 },
        ])
        .await?;
    println!("inserted {} rows", inserted.affected_rows);

    db.table("users")?
        .and_where("name", "=", "alice")
        .update(record! { "age" => 32 })
        .await?;

    let rows = db
        .table("users")?
        .select(["id", "name"])
        .and_between("age", 18, 40)
        .and_not_null("name")
        .order_by("age", Order::Desc)
        .limit(10)
        .get()
        .await?;
    println!("rows: {rows:?}");

    let total = db.table("users")?.and_in("id", [1, 2]).count().await?;
    println!("count: {total}");

    db.set_sync(true);
    let found = db.table("users")?.find(1).await?;
    println!("found: {found:?}");

    if let Err(err) = db.drop_table("users").await {
        println!("drop failed: {err}");
    }

    Ok(())
}
