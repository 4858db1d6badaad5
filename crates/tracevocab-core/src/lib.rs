//! # tracevocab-core: Identifier Primitives
//!
//! The leaf crate of the tracevocab workspace. It defines the GS1 party and
//! location identifier newtype ([`Pgln`]), the GS1 mod-10 check digit used to
//! verify it, and the validation error types shared by every other crate.
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes.** A [`Pgln`] can only be obtained through a
//!    validating constructor (or a validating `Deserialize`). Once you hold
//!    one, it satisfies exactly one of the accepted grammars.
//!
//! 2. **Case-insensitive identity.** Equality, hashing and ordering all work
//!    on the ASCII-lowercased projection of the stored string. Ordering is a
//!    plain lexicographic comparison of that projection.
//!
//! 3. **Typed checksum input.** [`checksum::check_digit`] takes `&[u8; 12]`,
//!    so a wrong-length payload cannot reach the arithmetic.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tracevocab-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod checksum;
pub mod error;
pub mod identity;

pub use checksum::{check_digit, check_digit_str, verify_gln13};
pub use error::{PglnIssue, ValidationError};
pub use identity::Pgln;
