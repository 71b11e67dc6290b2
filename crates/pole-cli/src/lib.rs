//! Command implementations behind the `polenum` binary.
//!
//! Every command reads a [`drawing::DrawingSnapshot`], runs the engine and
//! writes its reports to an output directory.

pub mod commands;
pub mod drawing;
