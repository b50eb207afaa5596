//! Fixed-point scalars and geometry for glyph synthesis.
//!
//! The coordinate conventions follow FreeType: outline coordinates and
//! metrics are in 26.6 pixels ([`F26Dot6`]), scale factors and transform
//! coefficients are in 16.16 ([`Fixed`]).

#![cfg_attr(not(feature = "bytemuck"), forbid(unsafe_code))]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod bbox;
mod fixed;
mod matrix;
mod point;


pub use bbox::BoundingBox;
pub use fixed::{F26Dot6, Fixed};
pub use matrix::Matrix;
pub use point::Point;
