// src/data_input/mod.rs

pub mod stream_data;
pub mod stream_parser;
