//! Keys under which the application state is persisted

/// Currently signed-in user (without credentials)
pub const USER_KEY: &str = "user";

/// Every registered account
pub const USERS_KEY: &str = "users";

pub fn user_chats_key(user_id: &str) -> String {
    format!("user_chats_{user_id}")
}

pub fn user_documents_key(user_id: &str) -> String {
    format!("user_documents_{user_id}")
}

pub fn user_plan_key(user_id: &str) -> String {
    format!("user_plan_{user_id}")
}
