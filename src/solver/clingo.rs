use crate::program::{Encoding, LogicProgram};
use crate::solver::{
    AnswerSetSolver, SolverConfig, SolverError, SolverOutcome, SolverResult, Witness,
};
use cancel_this::is_cancelled;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs the `clingo` executable on a temporary program file and reads its JSON output.
///
/// Exit codes follow the ASP competition convention: `10` (satisfiable, search not
/// exhausted), `20` (unsatisfiable), `30` (satisfiable, all answers enumerated), plus the
/// interrupt bit `1` that clingo sets when the time limit is hit.
///
/// The wait for the solver process is a cancellation point: if the surrounding
/// `cancel_this` trigger fires, the process is killed and the result is reported as
/// [`SolverOutcome::SatTruncatedByTime`] without witnesses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clingo {
    executable: String,
}

impl Default for Clingo {
    fn default() -> Self {
        Clingo::with_executable("clingo")
    }
}

impl Clingo {
    pub fn new() -> Clingo {
        Clingo::default()
    }

    pub fn with_executable(executable: &str) -> Clingo {
        Clingo {
            executable: executable.to_string(),
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    fn build_command(&self, config: &SolverConfig, program_path: &std::path::Path) -> Command {
        let mut command = Command::new(&self.executable);
        command.arg(config.max_results.to_string());
        command.args(heuristic_arguments(config.encoding));
        command
            .arg("--outf=2")
            .arg(format!("--time-limit={}", config.time_limit))
            .arg(program_path);
        command
    }
}

/// Enumeration heuristics per encoding. Disjunctive and source programs are enumerated
/// as subset-minimal answers w.r.t. the shown atoms.
fn heuristic_arguments(encoding: Encoding) -> &'static [&'static str] {
    match encoding {
        Encoding::Conjunctive => &[],
        Encoding::Disjunctive => &[
            "--heuristic=Domain",
            "--enum-mod=domRec",
            "--dom-mod=3,16",
            "--no-gamma",
        ],
        Encoding::Source => &["--heuristic=Domain", "--enum-mod=domRec", "--dom-mod=3,16"],
    }
}

pub(crate) fn outcome_for_exit_code(code: i32) -> Option<SolverOutcome> {
    match code {
        30 => Some(SolverOutcome::AllSatEnumerated),
        10 => Some(SolverOutcome::SatTruncatedByCount),
        1 | 11 => Some(SolverOutcome::SatTruncatedByTime),
        20 => Some(SolverOutcome::Unsatisfiable),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClingoOutput {
    #[serde(default)]
    call: Vec<ClingoCall>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClingoCall {
    #[serde(default)]
    witnesses: Vec<ClingoWitness>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClingoWitness {
    #[serde(default)]
    value: Vec<String>,
}

/// Extract witnesses of the first solver call from clingo's `--outf=2` output.
pub(crate) fn parse_witnesses(output: &str) -> Result<Vec<Witness>, SolverError> {
    let output: ClingoOutput = serde_json::from_str(output)?;
    let witnesses = output
        .call
        .into_iter()
        .next()
        .map(|call| call.witnesses)
        .unwrap_or_default();
    Ok(witnesses
        .into_iter()
        .map(|it| it.value.into_iter().collect())
        .collect())
}

fn read_from_start(file: &mut File) -> std::io::Result<String> {
    let mut content = String::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_string(&mut content)?;
    Ok(content)
}

impl AnswerSetSolver for Clingo {
    fn solve(
        &self,
        program: &LogicProgram,
        config: &SolverConfig,
    ) -> Result<SolverResult, SolverError> {
        // Both files are removed when dropped, on every exit path.
        let mut program_file = tempfile::Builder::new()
            .prefix("fixed-points-")
            .suffix(".lp")
            .tempfile()?;
        program.write_to(program_file.as_file_mut())?;
        let mut stdout = tempfile::tempfile()?;
        let mut stderr = tempfile::tempfile()?;

        let mut command = self.build_command(config, program_file.path());
        command
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout.try_clone()?))
            .stderr(Stdio::from(stderr.try_clone()?));
        debug!("Starting solver: {:?}", command);

        let start = Instant::now();
        let mut child = command.spawn().map_err(|source| SolverError::Spawn {
            executable: self.executable.clone(),
            source,
        })?;

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if let Err(cancelled) = is_cancelled!() {
                warn!("Solver cancelled after {:?} ({}).", start.elapsed(), cancelled);
                child.kill()?;
                child.wait()?;
                return Ok(SolverResult {
                    outcome: SolverOutcome::SatTruncatedByTime,
                    witnesses: Vec::new(),
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        };

        let output = read_from_start(&mut stdout)?;
        let Some(outcome) = status.code().and_then(outcome_for_exit_code) else {
            let diagnostic = read_from_start(&mut stderr)?;
            return Err(SolverError::UnexpectedExit {
                code: status.code(),
                diagnostic: format!("{}{}", diagnostic, output),
            });
        };

        info!(
            "Solver finished in {:?} with {:?}.",
            start.elapsed(),
            outcome
        );

        let witnesses = match outcome {
            SolverOutcome::Unsatisfiable => Vec::new(),
            // An interrupted run without any answer may not print a complete JSON document.
            SolverOutcome::SatTruncatedByTime if output.trim().is_empty() => Vec::new(),
            _ => parse_witnesses(&output)?,
        };

        Ok(SolverResult {
            outcome,
            witnesses,
        })
    }
}
