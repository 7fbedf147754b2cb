//! Describe/it suites with a fresh fixture per case.
//!
//! Every `it` builds its own fixture from the suite's factory, so cases
//! never see each other's rows, inputs or pending requests.
//!
//! ```rust
//! use roster_test::suite::describe;
//!
//! let suite = describe("counter", || std::cell::Cell::new(0), |s| {
//!     s.it("starts at zero", |c| assert_eq!(c.get(), 0));
//!     s.describe("after one bump", |s| {
//!         s.it("is one", |c| {
//!             c.set(c.get() + 1);
//!             assert_eq!(c.get(), 1);
//!         });
//!     });
//! });
//! assert!(suite.all_passed());
//! assert_eq!(suite.passed(), 2);
//! ```

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

#[derive(Default)]
struct Tally {
    passed: u32,
    failures: Vec<String>,
}

/// A named group of cases sharing a fixture factory.
pub struct Suite<F> {
    description: String,
    fixture: Rc<dyn Fn() -> F>,
    tally: Rc<RefCell<Tally>>,
}

impl<F> Suite<F> {
    fn new(description: &str, fixture: Rc<dyn Fn() -> F>, tally: Rc<RefCell<Tally>>) -> Self {
        Self {
            description: description.to_string(),
            fixture,
            tally,
        }
    }

    /// Suite path, e.g. `Person > removePerson`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run one case against a fresh fixture, recording a panic as a
    /// failure instead of unwinding.
    pub fn it<T>(&self, description: &str, test: T)
    where
        T: FnOnce(&F),
    {
        let fixture = (self.fixture)();
        let result = catch_unwind(AssertUnwindSafe(|| test(&fixture)));

        let mut tally = self.tally.borrow_mut();
        match result {
            Ok(()) => tally.passed += 1,
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "test panicked".to_string());
                tally
                    .failures
                    .push(format!("{} - {}: {}", self.description, description, reason));
            }
        }
    }

    /// Nest a group under this one, sharing fixture factory and results.
    pub fn describe<B>(&self, description: &str, body: B)
    where
        B: FnOnce(&Self),
    {
        let nested = Self::new(
            &format!("{} > {}", self.description, description),
            Rc::clone(&self.fixture),
            Rc::clone(&self.tally),
        );
        body(&nested);
    }

    /// Cases that passed.
    pub fn passed(&self) -> u32 {
        self.tally.borrow().passed
    }

    /// Cases that failed.
    pub fn failed(&self) -> usize {
        self.tally.borrow().failures.len()
    }

    /// Failure messages, one per failed case.
    pub fn failures(&self) -> Vec<String> {
        self.tally.borrow().failures.clone()
    }

    /// Check if every case passed.
    pub fn all_passed(&self) -> bool {
        self.tally.borrow().failures.is_empty()
    }
}

/// Run a suite and return its results.
pub fn describe<F, M, B>(description: &str, fixture: M, body: B) -> Suite<F>
where
    M: Fn() -> F + 'static,
    B: FnOnce(&Suite<F>),
{
    let suite = Suite::new(
        description,
        Rc::new(fixture),
        Rc::new(RefCell::new(Tally::default())),
    );
    body(&suite);
    suite
}

/// Run a suite and panic with every failure message if any case failed.
pub fn describe_and_assert<F, M, B>(description: &str, fixture: M, body: B)
where
    M: Fn() -> F + 'static,
    B: FnOnce(&Suite<F>),
{
    let suite = describe(description, fixture, body);
    assert!(
        suite.all_passed(),
        "Test suite '{}' failed: {} passed, {} failed\n{}",
        description,
        suite.passed(),
        suite.failed(),
        suite.failures().join("\n")
    );
}
