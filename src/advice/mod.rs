pub mod chat;
pub mod recommend;
