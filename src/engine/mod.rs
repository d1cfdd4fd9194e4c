pub mod varisat;

use crate::wire::{Lit, SolveStatus};

/// Surface the session state machine needs from a solving engine. Any
/// backend that can be driven incrementally fits behind this; the solving
/// algorithm itself is opaque.
///
/// Variables are numbered from 1, matching the wire encoding. `value_of`
/// is meaningful only after a `solve` call returned [`SolveStatus::Sat`].
pub trait SolverEngine {
    fn new_var(&mut self) -> u32;
    fn num_vars(&self) -> u32;
    fn add_clause(&mut self, clause: Vec<Lit>);
    fn set_frozen(&mut self, var: u32, frozen: bool);
    fn solve(&mut self) -> SolveStatus;
    fn value_of(&self, var: u32) -> Option<bool>;
    fn reset(&mut self);
}
