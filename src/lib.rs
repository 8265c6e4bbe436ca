// Library API shared by the CLI and the auxiliary binaries
pub mod candidates;
pub mod cluster;
mod constraint_char;
pub mod errors;
pub mod links;
pub mod log;
pub mod matcher;
pub mod solver;
pub mod word_list;
