pub mod chat;
pub mod documents;
pub mod json_error;
pub mod knowledge;
pub mod pricing;
pub mod sign_in;
