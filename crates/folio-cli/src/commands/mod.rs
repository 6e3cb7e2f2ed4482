pub mod ask;
pub mod chat;
pub mod profile;
pub mod status;
