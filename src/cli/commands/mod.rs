pub mod add_folder;
pub mod add_pass;
pub mod completions;
pub mod export;
pub mod generate;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod remove;
pub mod rotate;
pub mod search;
