use super::*;

#[test]
fn file_name_strips_collapses_and_truncates() {
    assert_eq!(
        export_file_name("I love the smell of napalm!"),
        "I_love_the-info-card.png"
    );
}

#[test]
fn file_name_collapses_whitespace_left_by_stripping() {
    assert_eq!(export_file_name("a ! b"), "a_b-info-card.png");
    assert_eq!(export_file_name("a!b"), "ab-info-card.png");
    assert_eq!(export_file_name("  lead\t\ttab"), "_lead_tab-info-card.png");
}

#[test]
fn file_name_of_empty_or_symbol_only_prompt_is_just_suffix() {
    assert_eq!(export_file_name(""), "-info-card.png");
    assert_eq!(export_file_name("?!#%"), "-info-card.png");
}

#[test]
fn file_name_drops_non_ascii_letters() {
    assert_eq!(export_file_name("caf\u{e9} au lait"), "caf_au_lai-info-card.png");
    assert_eq!(export_file_name("\u{1F525} hot"), "_hot-info-card.png");
}

#[test]
fn file_name_whitespace_matches_ecmascript_set() {
    assert_eq!(export_file_name("a\u{feff}b"), "a_b-info-card.png");
    assert_eq!(export_file_name("a\u{85}b"), "ab-info-card.png");
    assert_eq!(export_file_name("a\u{a0}\u{3000}b"), "a_b-info-card.png");
}

#[test]
fn parse_prompts_skips_blank_lines_and_keeps_order() {
    let input = "First prompt\n\n   \nSecond one\r\nThird\n";
    assert_eq!(
        parse_prompts(input),
        vec!["First prompt", "Second one", "Third"]
    );
    assert!(parse_prompts("\n \n").is_empty());
}
