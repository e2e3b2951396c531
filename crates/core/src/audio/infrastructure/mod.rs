pub mod symphonia_reader;
