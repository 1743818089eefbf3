use peg_ex::{parse_and_execute, Error, PegEx};
use rstest::rstest;

#[rstest]
#[case::empty("", 0, r#""v""#)]
#[case::missing_semicolon("v=T", 3, r#"";""#)]
#[case::missing_equals("vT;", 1, r#""=""#)]
#[case::digit("v=T;v=1;", 6, "[A-Za-z]")]
#[case::two_letters("v=TH;", 3, r#"";""#)]
#[case::trailing_separator("v=T;|", 5, r#""v""#)]
#[case::empty_group("v=T;||v=H;", 5, r#""v""#)]
#[case::leading_separator("|v=T;", 0, r#""v""#)]
#[case::trailing_garbage("v=T;x", 4, r#"one of "v", "|", EOF"#)]
#[case::non_ascii("v=é;", 2, "[A-Za-z]")]
fn reports_furthest_failure(#[case] input: &str, #[case] offset: usize, #[case] expected: &str) {
    let err = match parse_and_execute(input) {
        Err(Error::Parse(err)) => err,
        other => panic!("expected a parse error, got {other:?}"),
    };
    assert_eq!(err.location.offset, offset);
    assert_eq!(err.location.line, 1);
    assert_eq!(err.expected.to_string(), expected);
}

#[test]
fn error_display() {
    let err = parse_and_execute("v=T;v=H;\nv=E;").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"parse error: error at 1:9: expected one of "v", "|", EOF"#
    );
    assert_eq!(err.location().map(|l| l.column), Some(9));
}

#[test]
fn uninitialized() {
    let mut parser = PegEx::new("v=T;");
    assert_eq!(parser.parse(), Err(Error::Uninitialized));

    parser.init();
    assert_eq!(parser.parse(), Ok(()));
}

#[test]
fn parser_recovers_after_failure() {
    let mut parser = PegEx::new("v=T;|");
    parser.init();
    assert!(parser.parse().is_err());

    parser.reset("v=T;");
    parser.parse().unwrap();
    assert_eq!(parser.tokens().len(), 7);
}
