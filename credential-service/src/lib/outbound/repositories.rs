pub mod credential;
pub mod memory;

pub use credential::PostgresCredentialRepository;
pub use memory::MemoryCredentialRepository;
