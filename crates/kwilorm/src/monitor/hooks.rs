use super::types::{HookAction, QueryContext, QueryHook};

/// Runs several hooks in order; the first abort wins.
#[derive(Default)]
pub struct CompositeHook {
    hooks: Vec<Box<dyn QueryHook>>,
}

impl CompositeHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook.
    pub fn add<H: QueryHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl QueryHook for CompositeHook {
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        for hook in &self.hooks {
            if let HookAction::Abort(reason) = hook.before_query(ctx) {
                return HookAction::Abort(reason);
            }
        }
        HookAction::Continue
    }
}

/// Refuses DELETE and UPDATE statements that carry no WHERE clause.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireWhereHook;

impl QueryHook for RequireWhereHook {
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        use super::types::QueryType;

        let guarded = matches!(ctx.query_type, QueryType::Delete | QueryType::Update);
        if guarded && !ctx.sql.contains(" WHERE ") {
            return HookAction::Abort(format!("{} without WHERE is not allowed", ctx.query_type));
        }
        HookAction::Continue
    }
}
