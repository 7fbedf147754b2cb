//! Testing harness for the Roster people widget.
//!
//! No browser needed: the harness mounts a widget on in-memory surfaces and
//! a transport the test answers by hand.
//!
//! ```
//! use roster_test::{describe_and_assert, Harness};
//!
//! describe_and_assert("submit", Harness::new, |suite| {
//!     suite.it("rejects a blank username", |h| {
//!         h.type_username("   ");
//!         assert!(h.submit().is_err());
//!         h.assert_no_requests();
//!     });
//! });
//! ```

mod harness;
pub mod suite;

pub use harness::{Harness, DEFAULT_URL};
pub use suite::{describe, describe_and_assert, Suite};
