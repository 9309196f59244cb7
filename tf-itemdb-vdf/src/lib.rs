//! Decoder for Valve's KeyValues ("VDF") text format.
//!
//! Only the subset used by the TF2 resource files is supported: quoted keys,
//! quoted values, and brace-delimited sub-objects. Unquoted tokens and
//! conditionals (`[$WIN32]`) are skipped rather than rejected.
//!
//! Decoding runs in three stages that can be used independently:
//! [`normalize`] strips BOMs, directives and comments, [`tokenize`] splits the
//! result into [`Token`]s, and [`decode`] builds the [`ParseNode`] tree.

pub mod decode;
pub mod error;
pub mod node;
pub mod token;

pub use decode::{build, decode};
pub use error::FormatError;
pub use node::{Mapping, ParseNode};
pub use token::{Token, TokenKind, normalize, tokenize};
