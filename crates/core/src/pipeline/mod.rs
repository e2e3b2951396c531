pub mod dictation_stream;
pub mod transcribe_file_use_case;
