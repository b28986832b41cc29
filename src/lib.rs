//! smart home state service: led, music, alarms and routines over http,
//! backed by sqlite, plus a matching http client

pub mod common;
pub mod entity;
pub mod dao;
pub mod service;
pub mod http_server;
pub mod client;
pub mod util;
