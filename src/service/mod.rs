pub mod validator;
pub mod state_projector;
pub mod routine_codec;
