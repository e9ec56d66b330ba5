pub mod init_config;
pub mod new_engagement;
pub mod plan;
pub mod scaffold;
