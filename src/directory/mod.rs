//! The three directories the [`crate::coordinator::LobbyCoordinator`] owns
//! behind one mutex: [`PortPool`], [`ClientDirectory`], [`GameDirectory`]
//! (spec §4.1-§4.3).

pub mod client_directory;
pub mod game_directory;
pub mod port_pool;

pub use client_directory::ClientDirectory;
pub use game_directory::GameDirectory;
pub use port_pool::PortPool;
