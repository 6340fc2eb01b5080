//! Rollcall CLI library - command implementations used by the `rollcall` binary

pub mod commands;
