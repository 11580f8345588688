//! # Clone Contract
//!
//! Every protocol value can be cloned and handed to another task. A clone
//! must be structurally equal to its source, but must not alias any buffer
//! the source owns: mutating one copy may never be observable through the
//! other. Fields that are deliberately shared (an `Arc` to an immutable
//! value) are the only exception.
//!
//! Each type lists its backing buffers through [`CloneContract::buffers`],
//! annotating every entry with its [`Sharing`] mode in the type's own impl.
//! [`check_clone`] compares two such listings.

use crate::channel::{Allocation, ChannelParams, State, SubAllocation};
use crate::funding::FundingRequest;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// How a field's buffer relates to the buffer of a clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sharing {
    /// The clone gets its own buffer.
    Owned,
    /// The clone points at the same buffer.
    Shared,
}

/// Location of one field's backing buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBuffer {
    /// Field path, e.g. `allocation.balances[1]`.
    pub field: String,
    /// Address of the buffer.
    pub addr: usize,
    /// Number of elements in the buffer.
    pub len: usize,
    /// Expected relation to the clone's buffer.
    pub sharing: Sharing,
}

impl FieldBuffer {
    /// An owned slice-backed field.
    pub fn owned<T>(field: impl Into<String>, buf: &[T]) -> Self {
        Self {
            field: field.into(),
            addr: buf.as_ptr() as usize,
            len: buf.len(),
            sharing: Sharing::Owned,
        }
    }

    /// A field shared by reference.
    pub fn shared<T: ?Sized>(field: impl Into<String>, value: &Arc<T>) -> Self {
        Self {
            field: field.into(),
            addr: Arc::as_ptr(value).cast::<()>() as usize,
            len: 1,
            sharing: Sharing::Shared,
        }
    }

    fn nested(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

/// Violation of the clone contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CloneError {
    #[error("clone is not equal to its source")]
    NotEqual,

    #[error("clone has a different buffer layout at {0}")]
    LayoutMismatch(String),

    #[error("owned field {0} aliases the source")]
    Aliased(String),

    #[error("shared field {0} was deep-copied")]
    NotShared(String),
}

/// A value whose clones honour the clone contract.
pub trait CloneContract: Clone + PartialEq + Debug {
    /// Backing buffers of every field, in a fixed order.
    fn buffers(&self) -> Vec<FieldBuffer>;
}

/// Check that `clone` is a valid clone of `original`.
pub fn check_clone<T: CloneContract>(original: &T, clone: &T) -> Result<(), CloneError> {
    if original != clone {
        return Err(CloneError::NotEqual);
    }

    let ours = original.buffers();
    let theirs = clone.buffers();
    if ours.len() != theirs.len() {
        return Err(CloneError::LayoutMismatch(format!(
            "{} vs {} buffers",
            ours.len(),
            theirs.len()
        )));
    }

    for (a, b) in ours.iter().zip(&theirs) {
        if a.field != b.field || a.sharing != b.sharing || a.len != b.len {
            return Err(CloneError::LayoutMismatch(a.field.clone()));
        }
        match a.sharing {
            // Empty buffers own no memory.
            Sharing::Owned if a.len > 0 && a.addr == b.addr => {
                return Err(CloneError::Aliased(a.field.clone()));
            }
            Sharing::Shared if a.addr != b.addr => {
                return Err(CloneError::NotShared(a.field.clone()));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Clone `value` and check the result.
pub fn verify_clone<T: CloneContract>(value: &T) -> Result<(), CloneError> {
    check_clone(value, &value.clone())
}

// =============================================================================
// Data model impls
// =============================================================================

impl CloneContract for ChannelParams {
    fn buffers(&self) -> Vec<FieldBuffer> {
        vec![FieldBuffer::owned("participants", &self.participants)]
    }
}

impl CloneContract for SubAllocation {
    fn buffers(&self) -> Vec<FieldBuffer> {
        vec![FieldBuffer::owned("balances", &self.balances)]
    }
}

impl CloneContract for Allocation {
    fn buffers(&self) -> Vec<FieldBuffer> {
        let mut bufs = vec![
            FieldBuffer::owned("assets", &self.assets),
            FieldBuffer::owned("balances", &self.balances),
            FieldBuffer::owned("locked", &self.locked),
        ];
        for (i, row) in self.balances.iter().enumerate() {
            bufs.push(FieldBuffer::owned(format!("balances[{i}]"), row));
        }
        for (i, sub) in self.locked.iter().enumerate() {
            let prefix = format!("locked[{i}]");
            bufs.extend(sub.buffers().into_iter().map(|b| b.nested(&prefix)));
        }
        bufs
    }
}

impl CloneContract for State {
    fn buffers(&self) -> Vec<FieldBuffer> {
        let mut bufs: Vec<_> = self
            .allocation
            .buffers()
            .into_iter()
            .map(|b| b.nested("allocation"))
            .collect();
        bufs.push(FieldBuffer::owned("app_data", &self.app_data));
        bufs
    }
}

impl CloneContract for FundingRequest {
    fn buffers(&self) -> Vec<FieldBuffer> {
        vec![
            FieldBuffer::shared("params", &self.params),
            FieldBuffer::shared("allocation", &self.allocation),
        ]
    }
}
