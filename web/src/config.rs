//! Command-line and environment configuration for the server binary.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use todo_core::{StoreResult, TodoStore};

/// Value of `--database` that selects a throwaway in-memory store.
pub const IN_MEMORY: &str = ":memory:";

/// Server-rendered todo list.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-web", version)]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "TODO_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file, or `:memory:` for a store that is lost on exit.
    #[arg(long, env = "TODO_DATABASE", default_value = "todo.sqlite3")]
    pub database: PathBuf,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn open_store(&self) -> StoreResult<TodoStore> {
        if self.database.as_os_str() == IN_MEMORY {
            TodoStore::open_in_memory()
        } else {
            TodoStore::open(&self.database)
        }
    }
}
