//! pass-site - Publish a pass password store as a static folder.
//!
//! The indexer copies every secret of a pass store into a target
//! directory as an ASCII-armored file and adds `index.asc`, a JSON index
//! of the secrets encrypted to the store's recipients. Any static web
//! server can then host the folder. The proxy lets the legacy browser
//! client read such a folder.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── bin/
//! │   ├── pass_indexer  # Publish a store
//! │   └── pass_proxy    # Legacy client shim
//! ├── cli/              # Command-line interface
//! │   ├── indexer       # pass-indexer flags and summary
//! │   ├── proxy         # pass-proxy flags and runtime
//! │   └── output        # Terminal helpers
//! ├── core/             # Core library components
//! │   ├── config        # Flags, TOML file and defaults
//! │   ├── cipher/       # OpenPGP backends
//! │   │   ├── mod       # Cipher trait
//! │   │   └── gpg       # gpg CLI implementation
//! │   ├── domain/       # Recipient, secret types
//! │   ├── recipient     # .gpg-id reading and key resolution
//! │   ├── walk          # Secret enumeration
//! │   ├── index         # Index rows and JSON
//! │   ├── armor         # OpenPGP ASCII armor
//! │   ├── publish       # Target tree writers
//! │   └── pipeline      # Stage ordering
//! └── proxy/            # HTTP compatibility proxy
//!     ├── route         # Endpoints and request validation
//!     └── upstream      # Static file fetches
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod proxy;
