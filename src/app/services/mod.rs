pub mod repo_publisher;

pub use repo_publisher::RepoPublisher;
