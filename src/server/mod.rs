//! Solver-side session state machine.
//!
//! A session alternates between a clause-ingestion phase and a command
//! phase, forever. The engine instance persists across rounds, so clauses
//! and frozen-variable hints accumulate until the process dies; the only
//! exit path is a fatal transport or protocol error.

use std::io::{Read, Write};

use crate::engine::SolverEngine;
use crate::error::Result;
use crate::transport::{WordReader, WordWriter};
use crate::wire::{encode_response, Command, Lit, SolveStatus};

pub struct Session<R, W, E> {
    reader: WordReader<R>,
    writer: WordWriter<W>,
    engine: E,
}

impl<R: Read, W: Write, E: SolverEngine> Session<R, W, E> {
    pub fn new(input: R, output: W, engine: E) -> Self {
        Self {
            reader: WordReader::new(input),
            writer: WordWriter::new(output),
            engine,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Serves rounds until the transport fails or a protocol violation
    /// arrives. Never returns `Ok`.
    pub fn run(&mut self) -> Result<std::convert::Infallible> {
        loop {
            self.run_round()?;
        }
    }

    /// One full round: ingest clauses until the empty-clause marker, then
    /// execute commands until RUN_SOLVER has been answered.
    pub fn run_round(&mut self) -> Result<()> {
        self.ingest_clauses()?;
        self.process_commands()
    }

    fn ingest_clauses(&mut self) -> Result<()> {
        let mut clause: Vec<Lit> = Vec::new();
        loop {
            let word = self.reader.read_word()?;
            match Lit::from_word(word) {
                Some(lit) => {
                    self.grow_vars(lit.var);
                    clause.push(lit);
                }
                None if !clause.is_empty() => {
                    self.engine.add_clause(std::mem::take(&mut clause));
                }
                None => return Ok(()),
            }
        }
    }

    fn process_commands(&mut self) -> Result<()> {
        loop {
            let word = self.reader.read_word()?;
            match Command::decode(word)? {
                Command::Freeze => {
                    // FREEZE always consumes exactly the next word.
                    let var = self.reader.read_word()?.unsigned_abs();
                    self.grow_vars(var);
                    self.engine.set_frozen(var, true);
                }
                Command::RunSolver => {
                    self.answer_solve()?;
                    return Ok(());
                }
            }
        }
    }

    fn answer_solve(&mut self) -> Result<()> {
        let status = self.engine.solve();
        let words = match status {
            SolveStatus::Sat => {
                let nvars = self.engine.num_vars();
                let bits = (1..=nvars)
                    .map(|v| self.engine.value_of(v).unwrap_or(false))
                    .collect::<Vec<_>>();
                encode_response(status, Some(&bits))?
            }
            _ => encode_response(status, None)?,
        };
        for w in words {
            self.writer.write_word(w)?;
        }
        self.writer.flush()
    }

    /// Seeing a literal (or FREEZE operand) naming an unknown variable
    /// grows the engine's variable count by the minimum amount needed.
    fn grow_vars(&mut self, var: u32) {
        while self.engine.num_vars() < var {
            self.engine.new_var();
        }
    }
}
