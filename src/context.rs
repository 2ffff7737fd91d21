use crate::scope::with_chain;
use serde::Serialize;

/// Ambient identity of the active logical call chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    pub request_id: Option<String>,
    pub user_id: Option<String>,
}

impl Context {
    pub fn new(request_id: Option<&str>, user_id: Option<&str>) -> Self {
        Context {
            request_id: non_empty(request_id),
            user_id: non_empty(user_id),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Update the active chain's context. Only non-empty arguments replace the
/// stored values; `None` or `""` leaves the field as it was.
///
/// Outside a [`scope`](crate::scope::scope) this writes the thread's chain,
/// which plain `tokio::spawn` tasks on the same worker share. Start
/// request tasks with [`scope::spawn`](crate::scope::spawn) instead.
pub fn set(request_id: Option<&str>, user_id: Option<&str>) {
    let request_id = non_empty(request_id);
    let user_id = non_empty(user_id);
    with_chain(|chain| {
        if let Some(id) = request_id {
            chain.context.request_id = Some(id);
        }
        if let Some(id) = user_id {
            chain.context.user_id = Some(id);
        }
    });
}

/// Snapshot of the active chain's context.
pub fn current() -> Context {
    with_chain(|chain| chain.context.clone())
}

/// Reset both identity fields of the active chain.
pub fn clear() {
    with_chain(|chain| chain.context = Context::default());
}
