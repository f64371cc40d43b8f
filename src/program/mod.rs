//! Assembly of the complete logic program for a [`PlaceTable`].

mod encoding;


use crate::network::{PlaceTable, atom_name};
use log::{info, trace};
use std::fmt::{Display, Formatter};
use std::io::Write;

pub use encoding::{Encoding, EncodingError};

/// One line of a logic program.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Statement {
    /// `#show atom/0.`
    Show(String),
    /// `a.`, or a disjunctive fact `a; b.` if there is more than one atom.
    Fact(Vec<String>),
    /// `h1; h2 :- b1, b2.`
    Rule { head: Vec<String>, body: Vec<String> },
    /// `:- b1, b2.`
    Constraint(Vec<String>),
    /// `{atom}.`
    Choice(String),
}

impl Statement {
    pub fn fact(atom: &str) -> Statement {
        Statement::Fact(vec![atom.to_string()])
    }

    /// A rule with a single head atom.
    pub fn rule(head: &str, body: Vec<String>) -> Statement {
        Statement::Rule {
            head: vec![head.to_string()],
            body,
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Show(atom) => write!(f, "#show {}/0.", atom),
            Statement::Fact(atoms) => write!(f, "{}.", atoms.join("; ")),
            Statement::Rule { head, body } => {
                write!(f, "{} :- {}.", head.join("; "), body.join(", "))
            }
            Statement::Constraint(body) => write!(f, ":- {}.", body.join(", ")),
            Statement::Choice(atom) => write!(f, "{{{}}}.", atom),
        }
    }
}

/// An ordered list of [`Statement`] objects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogicProgram {
    statements: Vec<Statement>,
}

impl LogicProgram {
    /// Build the fixed-point program of `places` using the given `encoding`.
    ///
    /// Every place is shown. Every variable gets a coherence constraint (`:- px, nx.`) and a
    /// totality fact (`px; nx.`), so that each answer assigns exactly one value to each
    /// variable. Under [`Encoding::Source`], source variables are not compiled at all;
    /// both their atoms are freely choosable instead.
    pub fn assemble(places: &PlaceTable, encoding: Encoding) -> LogicProgram {
        let mut program = LogicProgram::default();
        let mode = encoding.compiler_mode();
        let mut counter = 1;

        for place in places.places() {
            let variable = place.variable();
            let is_free = encoding == Encoding::Source && places.is_source(variable);

            if is_free {
                if !place.is_negation() {
                    program.push_free_variable(variable);
                }
                continue;
            }

            program.push(Statement::Show(place.atom()));
            if !place.is_negation() {
                program.push_coherence(variable);
            }
            let (statements, next) = mode.compile(place.function(), &place.atom(), counter);
            counter = next;
            program.statements.extend(statements);
        }

        info!(
            "Assembled `{}` program with {} statements ({} auxiliary atoms).",
            encoding,
            program.len(),
            counter - 1
        );
        trace!("Program:\n{}", program);

        program
    }

    fn push_coherence(&mut self, variable: &str) {
        let (positive, negative) = (atom_name(variable, false), atom_name(variable, true));
        self.push(Statement::Constraint(vec![positive.clone(), negative.clone()]));
        self.push(Statement::Fact(vec![positive, negative]));
    }

    fn push_free_variable(&mut self, variable: &str) {
        let (positive, negative) = (atom_name(variable, false), atom_name(variable, true));
        self.push(Statement::Choice(positive.clone()));
        self.push(Statement::Choice(negative.clone()));
        self.push_coherence(variable);
        self.push(Statement::Show(positive));
        self.push(Statement::Show(negative));
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Atoms mentioned in `#show` directives, in program order.
    pub fn shown_atoms(&self) -> impl Iterator<Item = &str> {
        self.statements.iter().filter_map(|it| match it {
            Statement::Show(atom) => Some(atom.as_str()),
            _ => None,
        })
    }

    /// Write the program text, one statement per line.
    pub fn write_to<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        for statement in &self.statements {
            writeln!(output, "{}", statement)?;
        }
        output.flush()
    }
}

impl Display for LogicProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}
