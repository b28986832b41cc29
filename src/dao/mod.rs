pub mod led_dao;
pub mod music_dao;
pub mod alarm_dao;
pub mod routine_dao;
