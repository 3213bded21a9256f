//! goseal - generate Kubernetes secret files, optionally sealed with kubeseal.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── secret        # yaml / file commands, stage overrides
//! │   ├── config        # config print / add
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal formatting
//! └── core/             # Library components
//!     ├── config        # .goseal stage store (global + local)
//!     ├── secret        # Secret maps and kubectl/kubeseal commands
//!     ├── pipeline      # Process execution and piping
//!     └── constants     # File names, env vars, program names
//! ```
//!
//! # Flow
//!
//! Input file -> secret map -> `kubectl create secret generic --dry-run`
//! -> (optionally) `kubeseal --format yaml --cert <cert>` -> file or stdout.

pub mod cli;
pub mod core;
pub mod error;
