pub mod message_service;
pub mod status_service;
