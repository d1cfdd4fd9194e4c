//! Pure wire codec for the incremental solving protocol. No I/O here; the
//! transport layer moves the words this module gives meaning to.
//!
//! Everything on the wire is a signed 32-bit word in native byte order.
//! Literals use 1-based DIMACS-style variable numbering with the sign as
//! polarity; the word 0 is reserved as the clause (and round) terminator.

use crate::error::ProtocolError;

pub type Word = i32;

/// Clause terminator; doubles as the end-of-round marker when it follows
/// an empty clause body.
pub const TERMINATOR: Word = 0;

/// Protocol code space shared by responses and commands. Each code is
/// distinct so that a word can never be both a valid response and a valid
/// command.
pub const UNSAT_CODE: Word = 0;
pub const SAT_CODE: Word = 1;
pub const INDETERMINATE_CODE: Word = 2;
pub const RUN_SOLVER_CODE: Word = 3;
pub const FREEZE_CODE: Word = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit {
    pub var: u32,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: u32, sign: bool) -> Self {
        Self { var, sign }
    }

    pub fn neg(self) -> Self {
        Self {
            var: self.var,
            sign: !self.sign,
        }
    }

    pub fn to_word(self) -> Word {
        let w = self.var as Word;
        if self.sign { w } else { -w }
    }

    /// Decodes a nonzero wire word. Returns `None` for the terminator,
    /// which is not a literal.
    pub fn from_word(w: Word) -> Option<Self> {
        if w == TERMINATOR {
            return None;
        }
        Some(Self {
            var: w.unsigned_abs(),
            sign: w > 0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Freeze,
    RunSolver,
}

impl Command {
    pub fn code(self) -> Word {
        match self {
            Command::Freeze => FREEZE_CODE,
            Command::RunSolver => RUN_SOLVER_CODE,
        }
    }

    pub fn decode(w: Word) -> Result<Self, ProtocolError> {
        match w {
            FREEZE_CODE => Ok(Command::Freeze),
            RUN_SOLVER_CODE => Ok(Command::RunSolver),
            other => Err(ProtocolError::UnrecognizedCommand(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Unsat,
    Sat,
    Indeterminate,
}

impl SolveStatus {
    pub fn code(self) -> Word {
        match self {
            SolveStatus::Unsat => UNSAT_CODE,
            SolveStatus::Sat => SAT_CODE,
            SolveStatus::Indeterminate => INDETERMINATE_CODE,
        }
    }

    pub fn from_code(w: Word) -> Result<Self, ProtocolError> {
        match w {
            UNSAT_CODE => Ok(SolveStatus::Unsat),
            SAT_CODE => Ok(SolveStatus::Sat),
            INDETERMINATE_CODE => Ok(SolveStatus::Indeterminate),
            other => Err(ProtocolError::UnrecognizedCommand(other)),
        }
    }
}

/// Serializes a solve response as the word sequence sent back to the client.
///
/// A SAT response carries the status code, the variable count, one reserved
/// word, then one 0/1 word per variable in index order. The reserved word
/// lets a client that slurps the tail into a single array index it directly
/// by 1-based variable number. UNSAT and INDETERMINATE are the bare code;
/// SAT without a model has no wire form and is rejected.
pub fn encode_response(
    status: SolveStatus,
    model: Option<&[bool]>,
) -> Result<Vec<Word>, ProtocolError> {
    match (status, model) {
        (SolveStatus::Sat, Some(bits)) => {
            let mut words = Vec::with_capacity(bits.len() + 3);
            words.push(SAT_CODE);
            words.push(bits.len() as Word);
            words.push(0);
            words.extend(bits.iter().map(|&b| Word::from(b)));
            Ok(words)
        }
        (SolveStatus::Sat, None) => Err(ProtocolError::Framing(
            "SAT response requires a model to serialize",
        )),
        (status, _) => Ok(vec![status.code()]),
    }
}
