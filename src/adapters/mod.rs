pub mod assets;
pub mod filesystem;
pub mod git2_repository;
pub mod gitlab_client;

pub use git2_repository::Git2Repository;
pub use gitlab_client::GitLabClient;
