// StashFS
// Copyright (C) 2025 StashFS Contributors

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! StashFS CLI Tool
//!
//! Command-line interface for driving a local StashFS store.

use clap::{Parser, Subcommand};
use stashfs_core::{ListHandle, LocalConfig, Reply, ReplyHandle, Store};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "stashfs")]
#[command(about = "StashFS - File Store CLI")]
#[command(version = "0.1.0")]
struct Cli {
    /// Base directory for stored files
    #[arg(long, short = 'b', global = true, default_value = "/tmp/stashfs-data")]
    base_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a file with the given text content
    Write {
        /// Store-relative file path
        path: String,
        /// File content
        content: String,
    },
    /// Read a file and print its content
    Read {
        /// Store-relative file path
        path: String,
    },
    /// Print path, last-modified, etag, content type and size of a file
    Stat {
        /// Store-relative file path
        path: String,
    },
    /// List stored files below a prefix
    List {
        /// Store-relative prefix, empty for the whole store
        #[arg(default_value = "")]
        prefix: String,
        /// Only direct children instead of the whole subtree
        #[arg(long)]
        flat: bool,
    },
    /// Move a file to a new path
    Move {
        /// Current store-relative path
        src: String,
        /// New store-relative path
        dst: String,
    },
    /// Delete a file
    Delete {
        /// Store-relative file path
        path: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store = match Store::local(LocalConfig {
        base_path: cli.base_path,
    }) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize store: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Write { path, content } => handle_write(&store, &path, &content),
        Commands::Read { path } => handle_read(&store, &path),
        Commands::Stat { path } => handle_stat(&store, &path),
        Commands::List { prefix, flat } => handle_list(&store, &prefix, !flat),
        Commands::Move { src, dst } => handle_move(&store, &src, &dst),
        Commands::Delete { path } => handle_delete(&store, &path),
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn handle_write(store: &Store, path: &str, content: &str) -> anyhow::Result<()> {
    store.write_str(path, content)?;
    println!("File {path} written");
    info!("Wrote {} bytes to {}", content.len(), path);
    Ok(())
}

fn handle_read(store: &Store, path: &str) -> anyhow::Result<()> {
    let reply = store.read_reply(path);
    println!("read returned with code: {}", reply.code());
    println!("{}", String::from_utf8_lossy(reply.get(0)));
    Ok(())
}

fn handle_stat(store: &Store, path: &str) -> anyhow::Result<()> {
    let reply = store.stat_reply(path);
    println!("stat returned with code: {}", reply.code());
    print_entries(&reply);
    Ok(())
}

fn handle_list(store: &Store, prefix: &str, recursive: bool) -> anyhow::Result<()> {
    let reply = store.list_reply(prefix, recursive);
    if reply.is_none() {
        anyhow::bail!("unable to list files below {prefix:?}");
    }
    println!("list returned with code: {}", reply.code());
    print_entries(&reply);
    Ok(())
}

fn handle_move(store: &Store, src: &str, dst: &str) -> anyhow::Result<()> {
    store.rename(src, dst)?;
    println!("File {src} moved to {dst}");
    info!("Moved {} to {}", src, dst);
    Ok(())
}

fn handle_delete(store: &Store, path: &str) -> anyhow::Result<()> {
    store.delete(path)?;
    println!("File {path} deleted");
    info!("Deleted {}", path);
    Ok(())
}

/// Prints reply entries as numbered lines, bytes rendered lossily as text.
fn print_entries(reply: &Option<Reply>) {
    for i in 0..reply.count() {
        let index = i as i64;
        println!("{:>3}: {}", i + 1, String::from_utf8_lossy(reply.get(index)));
    }
}
