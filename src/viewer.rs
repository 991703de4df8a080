use uuid::Uuid;

/// Request-scoped verified caller identity. Handlers only ever see one of
/// these after the authentication middleware has resolved a valid bearer
/// token; the user id is never taken from a request body.
#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub user_id: i64,
    pub username: String,
    pub request_id: String,
}

impl ViewerContext {
    pub fn new(user_id: i64, username: String) -> Self {
        ViewerContext {
            user_id,
            username,
            request_id: format!("req-{}", Uuid::new_v4()),
        }
    }
}
