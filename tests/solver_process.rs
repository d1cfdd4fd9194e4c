use satpipe::client::process::SolverConfig;
use satpipe::client::SolverClient;
use satpipe::error::ProtocolError;
use satpipe::wire::{Lit, SolveStatus};

fn spawn_client() -> SolverClient {
    let config = SolverConfig {
        program: env!("CARGO_BIN_EXE_satpipe").to_string(),
        args: vec!["serve".to_string()],
    };
    SolverClient::create(config).expect("spawn solver child")
}

#[test]
fn three_round_incremental_scenario() {
    let mut client = spawn_client();

    // Round 1: (1 or 2), both variables frozen.
    client.add_literal(Lit::new(1, true)).expect("lit 1");
    client.add_literal(Lit::new(2, true)).expect("lit 2");
    client.finish_clause().expect("terminate clause");
    client.freeze(1).expect("freeze 1");
    client.freeze(2).expect("freeze 2");
    assert_eq!(client.solve().expect("solve 1"), SolveStatus::Sat);
    let v1 = client.get_value(1).expect("value 1");
    let v2 = client.get_value(2).expect("value 2");
    assert!(v1 || v2);

    // Round 2: additionally force variable 1 false.
    client.add_literal(Lit::new(1, false)).expect("lit -1");
    client.finish_clause().expect("terminate clause");
    assert_eq!(client.solve().expect("solve 2"), SolveStatus::Sat);
    assert!(!client.get_value(1).expect("value 1"));
    assert!(client.get_value(2).expect("value 2"));

    // Round 3: forcing variable 2 false as well is jointly unsatisfiable.
    client.add_literal(Lit::new(2, false)).expect("lit -2");
    client.finish_clause().expect("terminate clause");
    assert_eq!(client.solve().expect("solve 3"), SolveStatus::Unsat);
}

#[test]
fn empty_rounds_are_idempotent() {
    let mut client = spawn_client();
    let first = client.solve().expect("solve with no clauses");
    let second = client.solve().expect("solve again");
    assert_eq!(first, second);
}

#[test]
fn get_value_contract_violations_are_checked() {
    let mut client = spawn_client();

    match client.get_value(1) {
        Err(ProtocolError::NoModelAvailable) => {}
        other => panic!("expected NoModelAvailable, got {:?}", other),
    }

    client.add_literal(Lit::new(1, true)).expect("lit 1");
    client.finish_clause().expect("terminate clause");
    assert_eq!(client.solve().expect("solve"), SolveStatus::Sat);
    assert!(client.get_value(1).expect("value 1"));

    match client.get_value(7) {
        Err(ProtocolError::VariableOutOfRange(7, 1)) => {}
        other => panic!("expected VariableOutOfRange, got {:?}", other),
    }
}

#[test]
fn reset_discards_the_session() {
    let mut client = spawn_client();

    client.add_literal(Lit::new(1, true)).expect("lit 1");
    client.finish_clause().expect("terminate clause");
    client.add_literal(Lit::new(1, false)).expect("lit -1");
    client.finish_clause().expect("terminate clause");
    assert_eq!(client.solve().expect("solve"), SolveStatus::Unsat);

    client.reset().expect("reset");

    // The contradiction is gone and the variable count starts over.
    client.add_literal(Lit::new(1, true)).expect("lit 1");
    client.finish_clause().expect("terminate clause");
    assert_eq!(client.solve().expect("solve fresh"), SolveStatus::Sat);
    assert!(client.get_value(1).expect("value 1"));
    match client.get_value(2) {
        Err(ProtocolError::VariableOutOfRange(2, 1)) => {}
        other => panic!("expected VariableOutOfRange, got {:?}", other),
    }
}

#[test]
fn freeze_rejects_variable_zero() {
    let mut client = spawn_client();
    match client.freeze(0) {
        Err(ProtocolError::Framing(_)) => {}
        other => panic!("expected framing error, got {:?}", other),
    }
    // Nothing reached the wire; the round is still usable.
    client.add_literal(Lit::new(1, true)).expect("lit 1");
    client.finish_clause().expect("terminate clause");
    assert_eq!(client.solve().expect("solve"), SolveStatus::Sat);
}

#[test]
fn demo_subcommand_runs_all_three_rounds() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_satpipe"))
        .arg("demo")
        .output()
        .expect("run demo");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let solutions: Vec<&str> = stdout
        .lines()
        .filter(|l| l.starts_with("solution="))
        .collect();
    assert_eq!(solutions, vec!["solution=Sat", "solution=Sat", "solution=Unsat"]);
}

#[test]
fn out_of_order_calls_fail_before_touching_the_wire() {
    let mut client = spawn_client();

    client.add_literal(Lit::new(1, true)).expect("lit 1");
    match client.freeze(1) {
        Err(ProtocolError::Framing(_)) => {}
        other => panic!("expected framing error, got {:?}", other),
    }
    match client.solve() {
        Err(ProtocolError::Framing(_)) => {}
        other => panic!("expected framing error, got {:?}", other),
    }

    // Closing the clause makes the round legal again.
    client.finish_clause().expect("terminate clause");
    assert_eq!(client.solve().expect("solve"), SolveStatus::Sat);
}
