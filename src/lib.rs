pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod models {
    pub mod article;
}
pub mod content {
    pub mod normalize;
    pub mod seed;
    pub mod slug;
    pub mod store;
}
pub mod db {
    pub mod json_store;
    pub mod repository;
}
pub mod chat {
    pub mod client;
    pub mod session;
}
pub mod api {
    pub mod articles;
    pub mod chat;
    pub mod cors;
    pub mod errors;
}
