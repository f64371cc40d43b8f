use crate::program::{Encoding, LogicProgram, Statement};
use crate::solver::clingo::{outcome_for_exit_code, parse_witnesses};
use crate::solver::{
    AnswerSetSolver, Clingo, SolverConfig, SolverError, SolverOutcome, Witness,
};

fn mk_program() -> LogicProgram {
    let mut program = LogicProgram::default();
    program.push(Statement::Show("pA".to_string()));
    program.push(Statement::fact("pA"));
    program
}

#[test]
fn test_exit_codes() {
    assert_eq!(outcome_for_exit_code(30), Some(SolverOutcome::AllSatEnumerated));
    assert_eq!(outcome_for_exit_code(10), Some(SolverOutcome::SatTruncatedByCount));
    assert_eq!(outcome_for_exit_code(11), Some(SolverOutcome::SatTruncatedByTime));
    assert_eq!(outcome_for_exit_code(1), Some(SolverOutcome::SatTruncatedByTime));
    assert_eq!(outcome_for_exit_code(20), Some(SolverOutcome::Unsatisfiable));
    assert_eq!(outcome_for_exit_code(0), None);
    assert_eq!(outcome_for_exit_code(65), None);

    assert!(SolverOutcome::AllSatEnumerated.is_complete());
    assert!(SolverOutcome::Unsatisfiable.is_complete());
    assert!(!SolverOutcome::SatTruncatedByCount.is_complete());
    assert!(!SolverOutcome::SatTruncatedByTime.is_complete());
}

#[test]
fn test_parse_witnesses() {
    let output = r#"{
      "Solver": "clingo version 5.6.2",
      "Input": ["program.lp"],
      "Call": [
        {
          "Witnesses": [
            { "Value": ["pA", "nB"] },
            { "Value": ["nA", "pB"] }
          ]
        }
      ],
      "Result": "SATISFIABLE",
      "Models": { "Number": 2, "More": "no" }
    }"#;
    let witnesses = parse_witnesses(output).unwrap();
    assert_eq!(
        witnesses,
        vec![
            Witness::from_iter(["pA", "nB"]),
            Witness::from_iter(["nA", "pB"]),
        ]
    );
    assert!(witnesses[0].contains("nB"));
    assert!(!witnesses[0].contains("pB"));
    assert_eq!(witnesses[1].atoms().collect::<Vec<_>>(), vec!["nA", "pB"]);
}

#[test]
fn test_parse_witnesses_without_answers() {
    let output = r#"{ "Call": [ { } ], "Result": "UNKNOWN" }"#;
    assert!(parse_witnesses(output).unwrap().is_empty());

    let output = r#"{ "Result": "UNKNOWN" }"#;
    assert!(parse_witnesses(output).unwrap().is_empty());

    // An empty answer is still an answer.
    let output = r#"{ "Call": [ { "Witnesses": [ { "Value": [] } ] } ] }"#;
    let witnesses = parse_witnesses(output).unwrap();
    assert_eq!(witnesses.len(), 1);
    assert!(witnesses[0].is_empty());
}

#[test]
fn test_parse_malformed_output() {
    let error = parse_witnesses("clingo: error").unwrap_err();
    assert!(matches!(error, SolverError::MalformedOutput(_)));
}

#[test]
fn test_missing_executable() {
    let solver = Clingo::with_executable("/this/path/does/not/exist/clingo");
    let config = SolverConfig::new(Encoding::Conjunctive);
    let error = solver.solve(&mk_program(), &config).unwrap_err();
    match error {
        SolverError::Spawn { executable, .. } => {
            assert_eq!(executable, "/this/path/does/not/exist/clingo")
        }
        other => panic!("Unexpected error: {}", other),
    }
}

#[test]
fn test_default_executable() {
    assert_eq!(Clingo::new().executable(), "clingo");
}

#[cfg(unix)]
mod fake_clingo {
    use super::mk_program;
    use crate::program::Encoding;
    use crate::solver::{
        AnswerSetSolver, Clingo, SolverConfig, SolverError, SolverOutcome, Witness,
    };
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// Create an executable shell script standing in for `clingo`.
    fn mk_script(body: &str) -> (TempDir, Clingo) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clingo");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        let solver = Clingo::with_executable(path.to_str().unwrap());
        (dir, solver)
    }

    #[test]
    fn test_reads_witnesses() {
        let (_dir, solver) = mk_script(
            "echo '{\"Call\": [{\"Witnesses\": [{\"Value\": [\"pA\"]}]}]}'\nexit 30",
        );
        let config = SolverConfig::new(Encoding::Conjunctive);
        let result = solver.solve(&mk_program(), &config).unwrap();
        assert_eq!(result.outcome, SolverOutcome::AllSatEnumerated);
        assert_eq!(result.witnesses, vec![Witness::from_iter(["pA"])]);
    }

    #[test]
    fn test_passes_arguments() {
        // The script fails unless it receives the expected argument list.
        let (_dir, solver) = mk_script(
            "[ \"$1\" = 5 ] || exit 2\n\
             [ \"$2\" = --heuristic=Domain ] || exit 2\n\
             [ \"$5\" = --no-gamma ] || exit 2\n\
             [ \"$6\" = --outf=2 ] || exit 2\n\
             [ \"$7\" = --time-limit=7 ] || exit 2\n\
             grep -q 'pA.' \"$8\" || exit 2\n\
             exit 20",
        );
        let mut config = SolverConfig::new(Encoding::Disjunctive);
        config.max_results = 5;
        config.time_limit = 7;
        let result = solver.solve(&mk_program(), &config).unwrap();
        assert_eq!(result.outcome, SolverOutcome::Unsatisfiable);
        assert!(result.witnesses.is_empty());
    }

    #[test]
    fn test_unexpected_exit() {
        let (_dir, solver) = mk_script("echo 'parsing failed' >&2\nexit 65");
        let config = SolverConfig::new(Encoding::Conjunctive);
        let error = solver.solve(&mk_program(), &config).unwrap_err();
        match error {
            SolverError::UnexpectedExit { code, diagnostic } => {
                assert_eq!(code, Some(65));
                assert!(diagnostic.contains("parsing failed"));
            }
            other => panic!("Unexpected error: {}", other),
        }
    }

    #[test]
    fn test_interrupted_without_output() {
        let (_dir, solver) = mk_script("exit 1");
        let config = SolverConfig::new(Encoding::Source);
        let result = solver.solve(&mk_program(), &config).unwrap();
        assert_eq!(result.outcome, SolverOutcome::SatTruncatedByTime);
        assert!(result.witnesses.is_empty());
    }

    #[test]
    fn test_cancellation_kills_solver() {
        let (_dir, solver) = mk_script("sleep 30\nexit 30");
        let config = SolverConfig::new(Encoding::Conjunctive);
        let start = std::time::Instant::now();
        let result = cancel_this::on_timeout(std::time::Duration::from_millis(200), || {
            Ok::<_, cancel_this::Cancelled>(solver.solve(&mk_program(), &config))
        })
        .unwrap()
        .unwrap();
        assert_eq!(result.outcome, SolverOutcome::SatTruncatedByTime);
        assert!(result.witnesses.is_empty());
        assert!(start.elapsed() < std::time::Duration::from_secs(10));
    }

    #[test]
    fn test_malformed_output() {
        let (_dir, solver) = mk_script("echo 'not json'\nexit 10");
        let config = SolverConfig::new(Encoding::Conjunctive);
        let error = solver.solve(&mk_program(), &config).unwrap_err();
        assert!(matches!(error, SolverError::MalformedOutput(_)));
    }
}
