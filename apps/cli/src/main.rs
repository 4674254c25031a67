//! # Stockroom Entry Point
//!
//! ## Usage
//! ```bash
//! # Start with the demo catalog
//! cargo run -p stockroom-cli
//!
//! # Start empty, with a custom config
//! cargo run -p stockroom-cli -- --no-seed --config ./stockroom.toml
//!
//! # Scripted session
//! printf 'list\nvalue\nquit\n' | cargo run -p stockroom-cli
//! ```

fn main() -> Result<(), Box<dyn std::error::Error>> {
    stockroom_cli::run(std::env::args().collect())?;
    Ok(())
}
