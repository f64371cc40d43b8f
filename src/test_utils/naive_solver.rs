//! A brute-force reference solver for small programs.
//!
//! The generated programs contain no default negation, so the answer sets are exactly the
//! subset-minimal models of the program, where a choice `{a}.` acts as the fact `a.` in
//! models that contain `a`. The solver checks every subset of atoms, which is only
//! feasible for a handful of atoms.

use crate::program::{LogicProgram, Statement};
use crate::solver::{
    AnswerSetSolver, SolverConfig, SolverError, SolverOutcome, SolverResult, Witness,
};
use std::collections::HashMap;

const MAX_ATOMS: usize = 20;

enum Clause {
    Rule { head: u32, body: u32 },
    Constraint(u32),
    Choice(u32),
}

pub struct NaiveSolver;

struct CompiledProgram {
    atoms: Vec<String>,
    shown: u32,
    clauses: Vec<Clause>,
}

impl CompiledProgram {
    fn new(program: &LogicProgram) -> CompiledProgram {
        let mut atoms: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut mask_of = |names: &[String]| {
            let mut mask = 0u32;
            for name in names {
                let next = index.len();
                let bit = *index.entry(name.clone()).or_insert_with(|| {
                    atoms.push(name.clone());
                    next
                });
                mask |= 1 << bit;
            }
            mask
        };

        let mut shown = 0u32;
        let mut clauses = Vec::new();
        for statement in program.statements() {
            match statement {
                Statement::Show(atom) => shown |= mask_of(std::slice::from_ref(atom)),
                Statement::Fact(head) => clauses.push(Clause::Rule {
                    head: mask_of(head),
                    body: 0,
                }),
                Statement::Rule { head, body } => clauses.push(Clause::Rule {
                    head: mask_of(head),
                    body: mask_of(body),
                }),
                Statement::Constraint(body) => clauses.push(Clause::Constraint(mask_of(body))),
                Statement::Choice(atom) => {
                    clauses.push(Clause::Choice(mask_of(std::slice::from_ref(atom))))
                }
            }
        }
        assert!(atoms.len() <= MAX_ATOMS, "Too many atoms for the naive solver.");

        CompiledProgram {
            atoms,
            shown,
            clauses,
        }
    }

    /// Check that `candidate` is a model of the reduct of the program w.r.t. `reference`.
    fn is_model(&self, candidate: u32, reference: u32) -> bool {
        self.clauses.iter().all(|clause| match clause {
            Clause::Rule { head, body } => candidate & body != *body || candidate & head != 0,
            Clause::Constraint(body) => candidate & body != *body,
            Clause::Choice(atom) => reference & atom == 0 || candidate & atom != 0,
        })
    }

    fn is_answer_set(&self, candidate: u32) -> bool {
        if !self.is_model(candidate, candidate) {
            return false;
        }
        if candidate == 0 {
            return true;
        }
        // Iterate over all proper subsets of `candidate`.
        let mut subset = (candidate - 1) & candidate;
        loop {
            if self.is_model(subset, candidate) {
                return false;
            }
            if subset == 0 {
                return true;
            }
            subset = (subset - 1) & candidate;
        }
    }

    fn witness(&self, answer: u32) -> Witness {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(bit, _)| (answer & self.shown) & (1 << bit) != 0)
            .map(|(_, atom)| atom.clone())
            .collect()
    }
}

impl AnswerSetSolver for NaiveSolver {
    fn solve(
        &self,
        program: &LogicProgram,
        config: &SolverConfig,
    ) -> Result<SolverResult, SolverError> {
        let compiled = CompiledProgram::new(program);
        let mut witnesses = Vec::new();
        for candidate in 0u32..(1u32 << compiled.atoms.len()) {
            if !compiled.is_answer_set(candidate) {
                continue;
            }
            witnesses.push(compiled.witness(candidate));
            if config.max_results > 0 && witnesses.len() == config.max_results {
                return Ok(SolverResult {
                    outcome: SolverOutcome::SatTruncatedByCount,
                    witnesses,
                });
            }
        }

        if witnesses.is_empty() {
            Ok(SolverResult::unsatisfiable())
        } else {
            Ok(SolverResult {
                outcome: SolverOutcome::AllSatEnumerated,
                witnesses,
            })
        }
    }
}

/// A solver that always returns the same result, used to feed hand-made witnesses
/// into the pipeline.
pub struct FixedSolver(pub SolverResult);

impl AnswerSetSolver for FixedSolver {
    fn solve(
        &self,
        _program: &LogicProgram,
        _config: &SolverConfig,
    ) -> Result<SolverResult, SolverError> {
        Ok(self.0.clone())
    }
}
