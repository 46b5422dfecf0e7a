mod helpers;

use helpers::{listed_stacks, run_cli};

#[test]
fn quitting_ends_the_session_after_the_hand() {
    let res = run_cli(&["play", "--seats", "3", "--seed", "42"], "q\n");
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("play: seats=3 ai=baseline seed=42"));
    assert!(res.stdout.contains("=== Hand 1 ==="));
    assert!(res.stdout.contains("Your cards:"));
    assert!(res.stdout.contains("You fold"), "{}", res.stdout);
    assert!(res.stdout.contains("Session ended"));
    assert!(!res.stdout.contains("=== Hand 2 ==="));
    assert!(res.stdout.contains("Hands played: 1"));
    assert_eq!(listed_stacks(&res.stdout, "Hands played:"), 3 * 1500);
}

#[test]
fn end_of_input_behaves_like_quit() {
    let res = run_cli(&["play", "--seats", "2", "--seed", "3"], "");
    assert_eq!(res.code, 0);
    assert!(res.stdout.contains("Session ended"));
    assert!(res.stdout.contains("Hands played: 1"));
}

#[test]
fn invalid_input_is_reported_and_asked_again() {
    let res = run_cli(
        &["play", "--seats", "2", "--seed", "8", "--hands", "1"],
        "dance\nf\n",
    );
    assert_eq!(res.code, 0);
    assert!(
        res.stderr.contains("Error: Unrecognized action"),
        "stderr: {}",
        res.stderr
    );
    assert!(res.stdout.contains("You fold"));
    assert!(!res.stdout.contains("(forced)"));
}

#[test]
fn repeated_invalid_input_folds_the_seat() {
    let res = run_cli(
        &["play", "--seats", "2", "--seed", "8", "--hands", "1"],
        "x\ny\nz\n",
    );
    assert_eq!(res.code, 0);
    let rejections = res.stderr.lines().filter(|l| l.starts_with("Error:")).count();
    assert_eq!(rejections, 3, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("You fold (forced)"), "{}", res.stdout);
}

#[test]
fn hand_limit_stops_the_session() {
    let calls = "c\n".repeat(200);
    let res = run_cli(
        &["play", "--seats", "3", "--seed", "5", "--hands", "2"],
        &calls,
    );
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(
        res.stdout.contains("Hands played: 2") || res.stdout.contains("You are out of chips"),
        "{}",
        res.stdout
    );
    assert!(!res.stdout.contains("=== Hand 3 ==="));
    assert!(res.stdout.contains("Showdown"));
}

#[test]
fn bad_arguments_fail() {
    let res = run_cli(&["play", "--seats", "1"], "");
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("seats must be between 2 and 23"));

    let res = run_cli(&["play", "--hands", "0"], "");
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("hands must be >= 1"));

    let res = run_cli(&["play", "--ai", "genius"], "");
    assert_eq!(res.code, 2);
}
