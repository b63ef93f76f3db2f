pub mod check_config;
pub mod last_row;
pub mod run;
