use dpda_sim_lib::{
    automaton::{
        Language,
        dpda::{Dpda, builder::DpdaBuilder},
        transition::Transition,
    },
    serialization,
};

fn t(
    from: &str,
    input: Option<&str>,
    stack_top: Option<&str>,
    to: &str,
    push: &[&str],
) -> Transition<String, String> {
    Transition::new(
        from.to_string(),
        input.map(str::to_string),
        stack_top.map(str::to_string),
        to.to_string(),
        push.iter().map(|s| s.to_string()).collect(),
    )
}

/// Accepts exactly { 0^n 1^n | n >= 1 }, over string symbols.
fn zeros_then_ones() -> Dpda<String, String> {
    DpdaBuilder::new()
        .with_states(["q0", "q1", "q2"].map(String::from))
        .with_input_alphabet(["0", "1"].map(String::from))
        .with_stack_alphabet(["Z", "X"].map(String::from))
        .with_initial_state("q0".to_string())
        .with_initial_stack_symbol("Z".to_string())
        .with_accept_states(["q2"].map(String::from))
        .with_transition(t("q0", Some("0"), Some("Z"), "q0", &["X", "Z"]))
        .with_transition(t("q0", Some("0"), Some("X"), "q0", &["X", "X"]))
        .with_transition(t("q0", Some("1"), Some("X"), "q1", &[]))
        .with_transition(t("q1", Some("1"), Some("X"), "q1", &[]))
        .with_transition(t("q1", None, Some("Z"), "q2", &["Z"]))
        .build()
        .unwrap()
}

fn word(input: &str) -> Vec<String> {
    input.chars().map(|c| c.to_string()).collect()
}

#[test]
fn test_loaded_definition_behaves_like_the_original() {
    let dpda = zeros_then_ones();

    let json = serialization::to_json(&dpda).unwrap();
    let loaded: Dpda<String, String> = serialization::from_json(&json).unwrap();

    assert_eq!(loaded.initial_state(), "q0");
    assert_eq!(loaded.transitions(), dpda.transitions());
    assert!(loaded.accepts(&word("0011")));
    assert!(!loaded.accepts(&word("001")));
}

#[test]
fn test_envelope_carries_the_format_version() {
    let json = serialization::to_json(&zeros_then_ones()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["version"], serialization::CURRENT_VERSION);
    // Sets come out as sorted arrays for stable output.
    assert_eq!(value["dpda"]["states"][0], "q0");
    assert_eq!(value["dpda"]["states"][2], "q2");
}

#[test]
fn test_unsupported_version_is_rejected() {
    let json = serialization::to_json(&zeros_then_ones()).unwrap();
    let tampered = json.replace("\"version\": \"1.0\"", "\"version\": \"9.7\"");

    let result: anyhow::Result<Dpda<String, String>> = serialization::from_json(&tampered);
    let error = result.unwrap_err();
    assert!(error.to_string().contains("unsupported format version"));
}

#[test]
fn test_broken_invariants_fail_on_load() {
    // Structurally fine JSON whose initial state is not in the state set
    // must be refused, not handed to the engine.
    let json = r#"{
        "version": "1.0",
        "dpda": {
            "states": ["q0"],
            "input_alphabet": ["0"],
            "stack_alphabet": ["Z"],
            "initial_state": "q9",
            "initial_stack_symbol": "Z",
            "accept_states": [],
            "transitions": []
        }
    }"#;

    let result: anyhow::Result<Dpda<String, String>> = serialization::from_json(json);
    let error = result.unwrap_err();
    assert!(error.to_string().contains("initial state"));
}

#[test]
fn test_missing_field_is_a_parse_error() {
    let json = r#"{ "version": "1.0", "dpda": { "states": ["q0"] } }"#;

    let result: anyhow::Result<Dpda<String, String>> = serialization::from_json(json);
    assert!(result.is_err());
}

#[test]
fn test_file_round_trip() {
    let dpda = zeros_then_ones();
    let path = std::env::temp_dir().join("dpda_sim_serialize_test.json");

    serialization::save_to_file(&dpda, &path).unwrap();
    let loaded: Dpda<String, String> = serialization::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(loaded.accepts(&word("000111")));
    assert!(!loaded.accepts(&word("0110")));
}

#[test]
fn test_load_missing_file() {
    let result: anyhow::Result<Dpda<String, String>> =
        serialization::load_from_file("/nonexistent/dpda.json");
    assert!(result.is_err());
}
