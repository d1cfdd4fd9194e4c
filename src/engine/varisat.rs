use std::collections::HashSet;

use varisat::ExtendFormula;

use crate::engine::SolverEngine;
use crate::wire::{Lit, SolveStatus};

pub struct VarisatEngine {
    inner: varisat::Solver<'static>,
    vars: Vec<varisat::Var>,
    frozen: HashSet<u32>,
    last_model: Option<Vec<varisat::Lit>>,
}

impl VarisatEngine {
    pub fn new() -> Self {
        Self {
            inner: varisat::Solver::new(),
            vars: Vec::new(),
            frozen: HashSet::new(),
            last_model: None,
        }
    }

    fn to_var(&self, v: u32) -> Option<varisat::Var> {
        if v == 0 {
            return None;
        }
        self.vars.get(v as usize - 1).copied()
    }

    fn to_lit(&self, lit: Lit) -> Option<varisat::Lit> {
        let var = self.to_var(lit.var)?;
        Some(varisat::Lit::from_var(var, lit.sign))
    }
}

impl Default for VarisatEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverEngine for VarisatEngine {
    fn new_var(&mut self) -> u32 {
        let v = self.inner.new_var();
        self.vars.push(v);
        self.vars.len() as u32
    }

    fn num_vars(&self) -> u32 {
        self.vars.len() as u32
    }

    fn add_clause(&mut self, clause: Vec<Lit>) {
        let lits = clause
            .into_iter()
            .filter_map(|x| self.to_lit(x))
            .collect::<Vec<_>>();
        self.inner.add_clause(&lits);
    }

    fn set_frozen(&mut self, var: u32, frozen: bool) {
        // varisat never eliminates variables, so the retention hint only
        // needs to be remembered, not forwarded.
        if frozen {
            self.frozen.insert(var);
        } else {
            self.frozen.remove(&var);
        }
    }

    fn solve(&mut self) -> SolveStatus {
        match self.inner.solve() {
            Ok(true) => {
                self.last_model = self.inner.model();
                SolveStatus::Sat
            }
            Ok(false) => {
                self.last_model = None;
                SolveStatus::Unsat
            }
            Err(_) => {
                self.last_model = None;
                SolveStatus::Indeterminate
            }
        }
    }

    fn value_of(&self, var: u32) -> Option<bool> {
        let v = self.to_var(var)?;
        let model = self.last_model.as_ref()?;
        let pos = v.lit(true);
        let neg = v.lit(false);
        if model.contains(&pos) {
            Some(true)
        } else if model.contains(&neg) {
            Some(false)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
