//! Crate-level dispatcher and behaviour tests.

pub(crate) mod support;
