pub mod common {
    pub mod collections;
    pub mod common_traits;
}

pub mod models {
    pub mod chat_session;
    pub mod document;
    pub mod message;
    pub mod pricing;
    pub mod user;
}

pub mod storage {
    pub mod file_store;
    pub mod key_value;
    pub mod memory_store;
    pub mod storage_keys;
}

pub mod stores {
    pub mod auth_store;
    pub mod chat_store;
    pub mod document_store;
    pub mod subscription_store;
}
