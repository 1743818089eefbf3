use peg_ex::{parse_and_execute, repeat_pattern, run, PegEx, EXAMPLE};
use proptest::prelude::*;

#[test]
fn repeat_pattern_reaches_size() {
    assert_eq!(repeat_pattern(0), EXAMPLE);
    assert_eq!(repeat_pattern(EXAMPLE.len()), EXAMPLE);

    let input = repeat_pattern(100);
    assert!(input.len() >= 100);
    assert!(input.len() < 100 + 34);
    assert_eq!((input.len() - EXAMPLE.len()) % 34, 0);
}

#[test]
fn every_benchmark_size_parses() {
    let sizes = [
        100,
        200,
        500,
        1024,
        10 * 1024,
        20 * 1024,
        50 * 1024,
        100 * 1024,
        200 * 1024,
        500 * 1024,
        1024 * 1024,
        2 * 1024 * 1024,
        4 * 1024 * 1024,
    ];

    let mut parser = PegEx::new("");
    for size in sizes {
        let input = repeat_pattern(size);
        parser.reset(&input);
        parser.parse().unwrap_or_else(|e| panic!("size {size}: {e}"));
        peg_ex::Execute::execute(&mut parser);

        let repeats = (input.len() - EXAMPLE.len()) / 34 + 1;
        let words = parser.words();
        assert_eq!(words.len(), repeats * 2, "size {size}");
        assert!(words.chunks(2).all(|pair| pair == ["THE", "MAGIC"]), "size {size}");
    }
}

#[test]
fn fresh_parser_per_iteration() {
    let input = repeat_pattern(10 * 1024);
    for _ in 0..3 {
        let mut parser = PegEx::new(input.as_str());
        assert!(run(&mut parser).unwrap());
        assert_eq!(parser.words().first().map(String::as_str), Some("THE"));
    }
}

fn input_for(groups: &[String]) -> String {
    groups
        .iter()
        .map(|word| word.chars().map(|c| format!("v={c};")).collect::<String>())
        .collect::<Vec<_>>()
        .join("|")
}

proptest! {
    #[test]
    fn groups_become_words(groups in prop::collection::vec("[A-Za-z]{1,8}", 1..16)) {
        let input = input_for(&groups);
        prop_assert_eq!(parse_and_execute(&input).unwrap(), groups);
    }
}
