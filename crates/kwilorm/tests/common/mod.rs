#![allow(dead_code)]

use async_trait::async_trait;
use kwilorm::{
    Connector, ConnectorConfig, ConnectorReply, MoatDebit, MoatFunding, OrmResult, QueryOutput,
    Record, Value,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One call received by [`MockConnector`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub sql: String,
    /// `None` for `query`, `Some` for `prepared_statement`.
    pub params: Option<Vec<Value>>,
    pub sync: bool,
}

/// In-memory connector that records every call and answers from a queue.
///
/// When the queue is empty it answers with an empty successful output.
#[derive(Default)]
pub struct MockConnector {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<ConnectorReply>>,
    pub funding: String,
    pub debit: String,
}

impl MockConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            funding: "100".to_string(),
            debit: "7".to_string(),
            ..Self::default()
        })
    }

    pub fn reply(&self, reply: impl Into<ConnectorReply>) {
        self.replies.lock().unwrap().push_back(reply.into());
    }

    pub fn reply_rows(&self, rows: Vec<Record>) {
        self.reply(QueryOutput::from_rows(rows));
    }

    pub fn reply_affected(&self, row_count: u64) {
        self.reply(QueryOutput::affected(row_count));
    }

    pub fn reply_error(&self, message: &str) {
        self.reply(ConnectorReply::error(message));
    }

    /// Answer every future call with the same error.
    pub fn fail_all(&self, message: &str) {
        let mut replies = self.replies.lock().unwrap();
        replies.clear();
        for _ in 0..64 {
            replies.push_back(ConnectorReply::error(message));
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no call recorded")
    }

    fn next_reply(&self) -> ConnectorReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| QueryOutput::default().into())
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn prepared_statement(&self, sql: &str, params: &[Value], sync: bool) -> ConnectorReply {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            params: Some(params.to_vec()),
            sync,
        });
        self.next_reply()
    }

    async fn query(&self, sql: &str, sync: bool) -> ConnectorReply {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            params: None,
            sync,
        });
        self.next_reply()
    }

    async fn moat_funding(&self) -> OrmResult<MoatFunding> {
        Ok(MoatFunding {
            funding: self.funding.clone(),
        })
    }

    async fn moat_debit(&self) -> OrmResult<MoatDebit> {
        Ok(MoatDebit {
            debit: self.debit.clone(),
        })
    }
}

/// Factory handing out one shared [`MockConnector`] and remembering the
/// configs and secret keys it was called with.
#[derive(Clone, Default)]
pub struct MockFactory {
    pub connector: Arc<MockConnector>,
    pub created: Arc<Mutex<Vec<(ConnectorConfig, String)>>>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self {
            connector: MockConnector::new(),
            created: Arc::default(),
        }
    }

    pub fn created(&self) -> Vec<(ConnectorConfig, String)> {
        self.created.lock().unwrap().clone()
    }
}

impl kwilorm::ConnectorFactory for MockFactory {
    fn create(&self, config: &ConnectorConfig, secret_key: &str) -> OrmResult<Arc<dyn Connector>> {
        self.created
            .lock()
            .unwrap()
            .push((config.clone(), secret_key.to_string()));
        Ok(self.connector.clone())
    }
}

pub fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}
