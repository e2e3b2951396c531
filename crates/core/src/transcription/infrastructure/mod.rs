pub mod system_info;
pub mod whisper_engine;
