mod helpers;

use helpers::run_cli;

#[test]
fn eval_accepts_separate_or_joined_cards() {
    let split = run_cli(&["eval", "Ah", "Ad", "Ac", "Kd", "Kh", "2s", "3s"], "");
    let joined = run_cli(&["eval", "Ah Ad Ac Kd Kh 2s 3s"], "");
    assert_eq!(split.code, 0, "stderr: {}", split.stderr);
    assert_eq!(split.stdout, joined.stdout);
    assert!(split.stdout.contains("Combination: Full house"));
}

#[test]
fn eval_compares_hands() {
    let res = run_cli(
        &["eval", "As Ks Qs Js 9s", "--vs", "Ah Kh Qh Jh 8h"],
        "",
    );
    assert_eq!(res.code, 0);
    assert!(res.stdout.contains("Result: first hand wins"));

    let res = run_cli(
        &["eval", "As Kd Qs Jc 9h", "--vs", "Ah Kc Qh Js 9d"],
        "",
    );
    assert!(res.stdout.contains("Result: tie"));
}

#[test]
fn eval_rejects_bad_cards() {
    let res = run_cli(&["eval", "As Ks Qs Js 1s"], "");
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Invalid card"));

    let res = run_cli(&["eval"], "");
    assert_eq!(res.code, 2);
}

#[test]
fn deal_is_reproducible() {
    let a = run_cli(&["deal", "--seats", "5", "--seed", "2024"], "");
    let b = run_cli(&["deal", "--seats", "5", "--seed", "2024"], "");
    assert_eq!(a.code, 0, "stderr: {}", a.stderr);
    assert_eq!(a.stdout, b.stdout);
    assert!(a.stdout.contains("Seat 4:"));
    assert!(a.stdout.contains("Board: ["));
}
