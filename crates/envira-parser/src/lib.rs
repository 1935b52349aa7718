//! Envira grid file reader and writer.
//!
//! Envira grids are plain text: a header block of `key: value` fields and
//! `#` comments, followed by `y_number` rows of `x_number` levels.
//!
//! ```text
//! # MER2015 - Doc29 - Lden y1974
//! x_min: 80000
//! x_max: 150000
//! y_min: 430000
//! y_max: 500000
//! x_number: 141
//! y_number: 141
//! unit: Lden
//! 41.2 41.5 ...
//! ```
//!
//! The extent of each axis is given by its maximum (`x_max`), its cell size
//! (`x_step`), or both. Rows are stored in ascending y, columns in ascending
//! x. Unknown fields and comments are kept verbatim so that
//! `decode(encode(header, array))` reproduces both exactly.

pub mod error;
pub mod header;
pub mod reader;
pub mod writer;

pub use error::{EnviraError, EnviraResult};
pub use header::{fields, EnviraHeader, HeaderEntry};
pub use reader::{decode, decode_str};
pub use writer::{encode, encode_to_string};
