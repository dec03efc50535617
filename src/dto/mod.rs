pub mod sms_dto;
