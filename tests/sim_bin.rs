use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "sim", "--", "1"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["seed"], 1);
    assert_eq!(v["game_over"], true);
    let black = v["black"].as_u64().unwrap();
    let white = v["white"].as_u64().unwrap();
    let moves = v["moves"].as_u64().unwrap();
    assert_eq!(black + white, 4 + moves);
    assert!(v["winner"].is_string() || (v["winner"].is_null() && black == white));
}
