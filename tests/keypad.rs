use zcalc::keys::Key;
use zcalc::{Session, evaluate};

fn run(keys: &str) -> Session {
    let mut session = Session::new();
    session.press_all(Key::parse_sequence(keys).unwrap());
    session
}

fn primary(keys: &str) -> String {
    run(keys).display().primary.clone()
}

#[test]
fn test_typed_number_evaluates_to_itself() {
    for number in ["7", "42", "1234", "3.25", "0.5", "999999999999"] {
        let session = run(&format!("{number} ="));
        assert_eq!(session.display().primary, evaluate(number), "{number}");
        assert_eq!(session.display().primary, number);
    }
}

#[test]
fn test_percent_keys() {
    assert_eq!(primary("100+10%="), "110");
    assert_eq!(primary("50-10%="), "45");
    assert_eq!(primary("20%="), "0.2");
}

#[test]
fn test_operator_replacement() {
    let session = run("5+-");
    assert_eq!(session.manager().expression(), "5-");
    assert_eq!(session.display().primary, "5-");
}

#[test]
fn test_leading_zero_guard() {
    let session = run("0");
    assert_eq!(session.display().primary, "0");
    assert_eq!(session.manager().expression(), "");
}

#[test]
fn test_sign_toggle_round_trip() {
    let session = run("12+7.5 neg neg");
    assert_eq!(session.manager().expression(), "12+7.5");
}

#[test]
fn test_negative_operand() {
    assert_eq!(primary("8 neg × 2 ="), "-16");
    assert_eq!(primary("8 neg 2 ="), "-16");
}

#[test]
fn test_backspace_removes_sign_wrapper() {
    let session = run("5 neg bs");
    assert_eq!(session.display().primary, "5");
}

#[test]
fn test_division_by_zero_then_fresh_start() {
    let mut session = run("5÷0=");
    assert_eq!(session.display().primary, "Error");
    assert_eq!(session.display().history, "");
    session.press(Key::Digit('3'));
    assert_eq!(session.display().primary, "3");
}

#[test]
fn test_result_continues_with_operator() {
    let session = run("2+3 = × 4 =");
    assert_eq!(session.display().primary, "20");
    assert_eq!(session.display().history, "5×4");
}

#[test]
fn test_result_display_history() {
    let session = run("0.1+0.2=");
    assert_eq!(session.display().primary, "0.3");
    assert_eq!(session.display().history, "0.1+0.2");
}

#[test]
fn test_large_result_scientific() {
    assert_eq!(primary("1000000×1000000="), "1.000000e+12");
}

#[test]
fn test_clear_all_twice() {
    let mut session = run("123");
    assert!(session.press(Key::Clear));
    assert_eq!(session.display().primary, "0");
    assert!(!session.press(Key::Clear));
}
