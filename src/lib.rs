//! Parser and configuration tree for HOCON (Human-Optimized Config Object
//! Notation), a JSON superset with unquoted keys, comments, `${path}`
//! substitutions, `include` directives, path-expression keys, duration
//! literals and value concatenation.
//!
//! Parsing produces a fully resolved [`Config`] that is addressed with
//! dotted paths through typed accessors:
//!
//! ```
//! use hocon_cfg::Config;
//!
//! let config = Config::from_str(r#"
//!     server {
//!         host: localhost
//!         port: 8080
//!         timeout: 30s
//!     }
//!     url: ${server.host}
//! "#)?;
//!
//! assert_eq!(config.get_string("server.host"), "localhost");
//! assert_eq!(config.get_int("server.port"), 8080);
//! assert_eq!(config.get_duration("server.timeout").as_secs(), 30);
//! assert_eq!(config.get_string("url"), "localhost");
//! # Ok::<(), hocon_cfg::HoconError>(())
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod value;

mod resolver;

pub use config::Config;
pub use error::HoconError;
pub use value::{Object, Substitution, Value};
