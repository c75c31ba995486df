mod common;

use common::TestEnv;
use predicates::str::contains;

#[test]
fn check_reports_each_rule() {
    let env = TestEnv::new();
    env.cmd()
        .args([
            "check",
            "--title",
            "Spring set",
            "--caption",
            "Nail tips!",
            "--hashtag",
            "nails",
            "--cta",
            "Book now",
            "--media",
            "https://cdn.example.com/nails.jpg",
        ])
        .assert()
        .success()
        .stdout(contains("PASS\tBrand voice"))
        .stdout(contains("PASS\tHashtags"))
        .stdout(contains("verdict: PASS score: 100 readiness: READY"));
}

#[test]
fn risky_claims_fail_compliance() {
    let env = TestEnv::new();
    env.cmd()
        .args(["check", "--caption", "Guaranteed results!"])
        .assert()
        .success()
        .stdout(contains("FAIL\tCompliance"))
        .stdout(contains("\"guaranteed\""))
        .stdout(contains("verdict: FAIL"));
}

#[test]
fn theme_defaults_to_light() {
    let env = TestEnv::new();
    env.cmd()
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(contains("light"));
}

#[test]
fn whoami_without_sign_in_is_guest() {
    let env = TestEnv::new();
    env.cmd()
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(contains("guest (reviewer)"));
}

#[test]
fn errors_go_to_stderr_without_json() {
    let env = TestEnv::new();
    env.cmd()
        .args(["post", "show", "nope"])
        .assert()
        .failure()
        .stderr(contains("post not found: nope"));
}

#[test]
fn text_output_uses_wire_names_for_states() {
    let env = TestEnv::new();
    let id = env.create_draft("Nail tips!");
    env.cmd()
        .args(["post", "show", &id])
        .assert()
        .success()
        .stdout(contains("readiness: READY"))
        .stdout(contains("health: STRONG 100"))
        .stdout(contains("media: image https://cdn.example.com/nails.jpg"));
    env.cmd()
        .args(["draft", "list"])
        .assert()
        .success()
        .stdout(contains("DRAFT\tREADY\t100\tSpring set"));
}
