pub mod cli;
pub mod domain;
pub mod mappers;
pub mod repository;
pub mod services;
pub mod utils;
