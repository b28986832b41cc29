pub mod server;
pub mod system_api;
pub mod led_api;
pub mod music_api;
pub mod alarm_api;
pub mod routine_api;
pub mod qr_api;
