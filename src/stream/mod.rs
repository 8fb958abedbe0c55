//! Byte stream plumbing: the log producer and line reassembly

pub mod reassembler;
pub mod scripted;
pub mod source;

pub use reassembler::{LineReassembler, LogLine};
pub use scripted::{ScriptStep, ScriptedSource};
pub use source::{
    clear_log, ChildLogSource, LogSource, ReadOutcome, SourceCommand, SourceCommandBuilder,
};
