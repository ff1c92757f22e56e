pub mod compare;
pub mod init;
pub mod list;
pub mod run;
pub mod stats;
pub mod validate;
