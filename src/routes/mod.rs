pub mod health;
pub mod home;
pub mod inbound_sms;
