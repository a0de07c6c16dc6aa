//! Transactional command execution.
//!
//! Every mutation runs inside one `SQLite` transaction. A failed statement
//! rolls the whole transaction back and the underlying error is classified
//! into a [`ReturnValue`] code; no error escapes to the caller.

use rusqlite::{Connection, ErrorCode, Transaction, ffi};
use serde::Serialize;
use std::fmt;

/// Outcome code of a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[must_use]
pub enum ReturnValue {
    /// The operation committed.
    Ok,
    /// A CHECK or NOT NULL constraint rejected the input.
    BadParams,
    /// A referenced row does not exist, or nothing matched a delete.
    NotExists,
    /// A row with the same key already exists.
    AlreadyExists,
    /// Any other failure.
    Error,
}

impl ReturnValue {
    /// Returns true for [`ReturnValue::Ok`].
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Upper-case name of the code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadParams => "BAD_PARAMS",
            Self::NotExists => "NOT_EXISTS",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extended constraint code of a failed statement, if it was a constraint
/// violation at all.
fn constraint_code(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            Some(e.extended_code)
        }
        _ => None,
    }
}

/// Maps a database error to a result code.
///
/// CHECK and NOT NULL violations are bad input, foreign key violations mean
/// a referenced row is missing, and UNIQUE or PRIMARY KEY violations mean a
/// duplicate.
pub fn classify(err: &rusqlite::Error) -> ReturnValue {
    match constraint_code(err) {
        Some(ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL) => {
            ReturnValue::BadParams
        }
        Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => ReturnValue::NotExists,
        Some(ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => {
            ReturnValue::AlreadyExists
        }
        _ => ReturnValue::Error,
    }
}

/// Classification for photo placement.
///
/// The placement insert resolves both keys through sub-selects, so a missing
/// photo or disk shows up as a NULL key rather than a foreign key failure.
pub fn classify_placement(err: &rusqlite::Error) -> ReturnValue {
    match constraint_code(err) {
        Some(ffi::SQLITE_CONSTRAINT_NOTNULL) => ReturnValue::NotExists,
        _ => classify(err),
    }
}

/// Runs `op` in a transaction and commits it, classifying failures with
/// [`classify`].
pub fn execute<F>(conn: &mut Connection, name: &str, op: F) -> ReturnValue
where
    F: FnOnce(&Transaction<'_>) -> rusqlite::Result<()>,
{
    execute_with(conn, name, classify, op)
}

/// Runs `op` in a transaction with a custom error classification.
pub fn execute_with<C, F>(conn: &mut Connection, name: &str, classifier: C, op: F) -> ReturnValue
where
    C: Fn(&rusqlite::Error) -> ReturnValue,
    F: FnOnce(&Transaction<'_>) -> rusqlite::Result<()>,
{
    // Dropping an uncommitted transaction rolls it back.
    let result = conn.transaction().and_then(|tx| {
        op(&tx)?;
        tx.commit()
    });

    match result {
        Ok(()) => {
            tracing::debug!(operation = name, "committed");
            ReturnValue::Ok
        }
        Err(err) => {
            let code = classifier(&err);
            tracing::warn!(operation = name, result = %code, error = %err, "rolled back");
            code
        }
    }
}

/// Runs a delete in a transaction.
///
/// `op` returns the number of rows removed by its decisive statement. When
/// nothing was removed the transaction is rolled back, and the result is
/// [`ReturnValue::NotExists`] if `expect_row_affected` is set, otherwise
/// [`ReturnValue::Ok`]. Any database error yields [`ReturnValue::Error`].
pub fn execute_delete<F>(
    conn: &mut Connection,
    name: &str,
    expect_row_affected: bool,
    op: F,
) -> ReturnValue
where
    F: FnOnce(&Transaction<'_>) -> rusqlite::Result<usize>,
{
    let result = conn.transaction().and_then(|tx| {
        let affected = op(&tx)?;
        if affected > 0 {
            tx.commit()?;
        }
        Ok(affected)
    });

    match result {
        Ok(0) if expect_row_affected => {
            tracing::debug!(operation = name, "no rows affected");
            ReturnValue::NotExists
        }
        Ok(affected) => {
            tracing::debug!(operation = name, affected, "committed");
            ReturnValue::Ok
        }
        Err(err) => {
            tracing::warn!(operation = name, error = %err, "rolled back");
            ReturnValue::Error
        }
    }
}
