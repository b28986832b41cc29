pub mod po;
pub mod dto;
