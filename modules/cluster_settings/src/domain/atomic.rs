//! Atomically stored, validated value with a post-change hook
//!
//! Every scalar kind is kept as a single signed 64-bit word in an
//! `AtomicI64`. Reads are one `Acquire` load. Writes validate first, then
//! `swap` the new word in, and the word handed back by the swap decides
//! whether the value actually changed.

use super::notifier::ChangeNotifier;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Boxed validator. `Err` carries the human-readable reason.
pub type ValidateFn<T> = Box<dyn Fn(T) -> Result<(), String> + Send + Sync>;

/// A value whose bit pattern fits in one `i64`
pub trait AtomicWord: Copy + Send + Sync + 'static {
    /// Bit pattern of `self`, or `None` if it has no `i64` representation
    fn to_word(self) -> Option<i64>;

    /// Inverse of [`AtomicWord::to_word`]
    fn from_word(word: i64) -> Self;
}

impl AtomicWord for bool {
    fn to_word(self) -> Option<i64> {
        Some(i64::from(self))
    }

    fn from_word(word: i64) -> Self {
        word != 0
    }
}

impl AtomicWord for i64 {
    fn to_word(self) -> Option<i64> {
        Some(self)
    }

    fn from_word(word: i64) -> Self {
        word
    }
}

impl AtomicWord for f64 {
    fn to_word(self) -> Option<i64> {
        Some(self.to_bits() as i64)
    }

    fn from_word(word: i64) -> Self {
        f64::from_bits(word as u64)
    }
}

/// Durations are stored as a signed count of nanoseconds.
impl AtomicWord for chrono::Duration {
    fn to_word(self) -> Option<i64> {
        self.num_nanoseconds()
    }

    fn from_word(word: i64) -> Self {
        chrono::Duration::nanoseconds(word)
    }
}

/// Outcome of a successful [`ValidatedAtomicValue::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The stored word differs from the one it replaced; the hook ran
    Changed,
    /// The stored word equals the one it replaced; the hook did not run
    Unchanged,
}

/// One word of shared state, guarded by a validator and a change hook
pub struct ValidatedAtomicValue<T: AtomicWord> {
    word: AtomicI64,
    validate_fn: Option<ValidateFn<T>>,
    notifier: ChangeNotifier,
}

impl<T: AtomicWord> ValidatedAtomicValue<T> {
    /// Create a value holding `initial`, which must pass `validate_fn`
    pub fn new(initial: T, validate_fn: Option<ValidateFn<T>>) -> Result<Self, String> {
        let value = Self {
            word: AtomicI64::new(0),
            validate_fn,
            notifier: ChangeNotifier::new(),
        };
        let word = value.check(initial)?;
        value.word.store(word, Ordering::Release);
        Ok(value)
    }

    /// Current value
    #[inline]
    pub fn get(&self) -> T {
        T::from_word(self.word.load(Ordering::Acquire))
    }

    /// Check `v` against the validator without touching stored state
    pub fn validate(&self, v: T) -> Result<(), String> {
        self.check(v).map(|_| ())
    }

    /// Validate `v`, store it, and fire the hook if the stored word changed
    ///
    /// On `Err` the stored value is untouched and the hook does not run.
    pub fn set(&self, v: T) -> Result<SetOutcome, String> {
        let word = self.check(v)?;
        if self.word.swap(word, Ordering::AcqRel) == word {
            return Ok(SetOutcome::Unchanged);
        }
        self.notifier.notify();
        Ok(SetOutcome::Changed)
    }

    /// The hook fired by [`ValidatedAtomicValue::set`]
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    fn check(&self, v: T) -> Result<i64, String> {
        let word = v.to_word().ok_or_else(|| "value out of range".to_string())?;
        if let Some(validate_fn) = &self.validate_fn {
            validate_fn(v)?;
        }
        Ok(word)
    }
}

impl<T: AtomicWord + fmt::Debug> fmt::Debug for ValidatedAtomicValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedAtomicValue")
            .field("value", &self.get())
            .field("validated", &self.validate_fn.is_some())
            .field("notifier", &self.notifier)
            .finish()
    }
}
