//! Client-side supervisor: owns one child solver process and presents a
//! synchronous add/freeze/solve interface over it.
//!
//! One round on the wire is `(literal* 0)* 0 FREEZE-commands* RUN_SOLVER`,
//! answered by a single response. The supervisor tracks where in a round
//! the caller is so that an out-of-order call surfaces as a framing error
//! before anything hits the pipe.

pub mod process;

use std::process::{ChildStdin, ChildStdout};

use crate::error::{ProtocolError, Result};
use crate::transport::{WordReader, WordWriter};
use crate::wire::{Command, Lit, SolveStatus, TERMINATOR};

use self::process::{SolverConfig, SolverProcess};

pub struct SolverClient {
    config: SolverConfig,
    process: SolverProcess,
    writer: WordWriter<ChildStdin>,
    reader: WordReader<ChildStdout>,
    /// Model retained from the most recent SAT response.
    model: Option<Vec<bool>>,
    /// A clause has been started with `add_literal` but not finished.
    mid_clause: bool,
    /// This round's end-of-clauses marker has already been written.
    clauses_closed: bool,
}

impl SolverClient {
    pub fn create(config: SolverConfig) -> Result<Self> {
        let (process, stdin, stdout) = SolverProcess::spawn(&config)?;
        Ok(Self {
            config,
            process,
            writer: WordWriter::new(stdin),
            reader: WordReader::new(stdout),
            model: None,
            mid_clause: false,
            clauses_closed: false,
        })
    }

    /// Buffers one literal of the clause under construction. The caller is
    /// responsible for eventually calling `finish_clause`.
    pub fn add_literal(&mut self, lit: Lit) -> Result<()> {
        if self.clauses_closed {
            return Err(ProtocolError::Framing(
                "clause added after this round's command phase began",
            ));
        }
        if lit.var == 0 {
            return Err(ProtocolError::Framing(
                "variable 0 would encode as the clause terminator",
            ));
        }
        self.mid_clause = true;
        self.writer.write_word(lit.to_word())
    }

    pub fn finish_clause(&mut self) -> Result<()> {
        if !self.mid_clause {
            return Err(ProtocolError::Framing("finish_clause with no open clause"));
        }
        self.mid_clause = false;
        self.writer.write_word(TERMINATOR)
    }

    /// Hints that `var`'s assignment must stay meaningful across solver
    /// simplification. Enters this round's command phase if the clause
    /// stream is still open.
    pub fn freeze(&mut self, var: u32) -> Result<()> {
        if var == 0 {
            return Err(ProtocolError::Framing("variable 0 cannot be frozen"));
        }
        self.close_clauses()?;
        self.writer.write_word(Command::Freeze.code())?;
        self.writer.write_word(var as crate::wire::Word)
    }

    /// Ends the round, blocks until the solver responds, and returns the
    /// outcome. On SAT the full model is retained for `get_value`.
    pub fn solve(&mut self) -> Result<SolveStatus> {
        self.close_clauses()?;
        self.writer.write_word(Command::RunSolver.code())?;
        self.writer.flush()?;

        let status = SolveStatus::from_code(self.reader.read_word()?)?;
        if status == SolveStatus::Sat {
            let nvars = self.reader.read_word()?.unsigned_abs();
            let _reserved = self.reader.read_word()?;
            let mut bits = Vec::with_capacity(nvars as usize);
            for _ in 0..nvars {
                bits.push(self.reader.read_word()? != 0);
            }
            self.model = Some(bits);
        }
        // Next round starts with a fresh clause stream.
        self.clauses_closed = false;
        Ok(status)
    }

    /// Reads `var`'s truth value out of the last SAT model.
    pub fn get_value(&self, var: u32) -> Result<bool> {
        let model = self.model.as_ref().ok_or(ProtocolError::NoModelAvailable)?;
        let nvars = model.len() as u32;
        if var == 0 || var > nvars {
            return Err(ProtocolError::VariableOutOfRange(var, nvars));
        }
        Ok(model[var as usize - 1])
    }

    /// Discards the entire session: kills the child, drops all accumulated
    /// clauses and the retained model, and spawns a fresh solver.
    pub fn reset(&mut self) -> Result<()> {
        self.process.kill();
        let (process, stdin, stdout) = SolverProcess::spawn(&self.config)?;
        self.process = process;
        self.writer = WordWriter::new(stdin);
        self.reader = WordReader::new(stdout);
        self.model = None;
        self.mid_clause = false;
        self.clauses_closed = false;
        Ok(())
    }

    fn close_clauses(&mut self) -> Result<()> {
        if self.mid_clause {
            return Err(ProtocolError::Framing(
                "command issued while a clause is still open",
            ));
        }
        if !self.clauses_closed {
            self.writer.write_word(TERMINATOR)?;
            self.clauses_closed = true;
        }
        Ok(())
    }
}
