//! Optional record fields that keep "never set" apart from "set to an empty value".
//!
//! A [`Nullable`] is either absent or present. A present value may itself be
//! empty (an empty note, the zero date) and still counts as present. Storage
//! writes an absent value as `NULL` so the distinction survives a round trip.

use chrono::NaiveDate;

pub type Note = Nullable<String>;
pub type BeatenOn = Nullable<NaiveDate>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nullable<T> {
    value: Option<T>,
}

impl<T> Nullable<T> {
    /// Builds a wrapper from a value and a presence flag. The value is dropped
    /// when `present` is false.
    pub fn wrap(value: T, present: bool) -> Self {
        Self {
            value: present.then_some(value),
        }
    }

    pub fn present(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn absent() -> Self {
        Self { value: None }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Returns a reference to the wrapped value.
    ///
    /// # Panics
    ///
    /// Panics if the value is absent. Check [`Nullable::is_present`] first, or
    /// use [`Nullable::as_option`].
    pub fn get(&self) -> &T {
        match &self.value {
            Some(value) => value,
            None => panic!("called `Nullable::get()` on an absent value"),
        }
    }

    /// Consumes the wrapper and returns the wrapped value.
    ///
    /// # Panics
    ///
    /// Panics if the value is absent.
    pub fn unwrap(self) -> T {
        match self.value {
            Some(value) => value,
            None => panic!("called `Nullable::unwrap()` on an absent value"),
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Self { value }
    }
}

/// Stored when a full add is submitted with an empty date field.
pub const ZERO_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1, 1, 1) {
    Some(date) => date,
    None => panic!("0001-01-01 is a valid date"),
};

impl BeatenOn {
    pub fn zero() -> Self {
        Self::present(ZERO_DATE)
    }
}
