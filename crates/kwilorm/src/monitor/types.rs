use std::fmt;

/// The type of SQL operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    /// SELECT query (including aggregates)
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
    /// TRUNCATE statement
    Truncate,
    /// CREATE / DROP
    Ddl,
    /// Other SQL
    Other,
}

impl QueryType {
    /// Detect query type from the leading keyword of a SQL string.
    pub fn from_sql(sql: &str) -> Self {
        let keyword = sql
            .trim_start()
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("");

        match keyword.to_ascii_uppercase().as_str() {
            "SELECT" => QueryType::Select,
            "INSERT" => QueryType::Insert,
            "UPDATE" => QueryType::Update,
            "DELETE" => QueryType::Delete,
            "TRUNCATE" => QueryType::Truncate,
            "CREATE" | "DROP" | "ALTER" => QueryType::Ddl,
            _ => QueryType::Other,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryType::Select => "SELECT",
            QueryType::Insert => "INSERT",
            QueryType::Update => "UPDATE",
            QueryType::Delete => "DELETE",
            QueryType::Truncate => "TRUNCATE",
            QueryType::Ddl => "DDL",
            QueryType::Other => "OTHER",
        };
        f.write_str(s)
    }
}

/// Context information about the statement about to be sent to the connector.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// The SQL statement as sent.
    pub sql: String,
    /// Number of positional parameters.
    pub param_count: usize,
    /// Detected query type.
    pub query_type: QueryType,
    /// Table the statement was built for, when it came from a table query.
    pub table: Option<String>,
    /// Sync flag forwarded to the connector.
    pub sync: bool,
}

impl QueryContext {
    /// Create a new query context.
    pub fn new(sql: &str, param_count: usize) -> Self {
        Self {
            sql: sql.to_string(),
            param_count,
            query_type: QueryType::from_sql(sql),
            table: None,
            sync: false,
        }
    }

    pub fn with_table(mut self, table: Option<&str>) -> Self {
        self.table = table.map(str::to_string);
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

/// Action to take after a hook inspects a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookAction {
    /// Send the statement.
    Continue,
    /// Do not send the statement; the call fails with this message.
    Abort(String),
}

/// Hook called before every statement reaches the connector.
pub trait QueryHook: Send + Sync {
    fn before_query(&self, ctx: &QueryContext) -> HookAction;
}
