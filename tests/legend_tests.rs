use kletype::error::KleError;
use kletype::layout::legend::{
    is_blank, normalize_legends, primary_legend, BLANK_LEGEND, LEGEND_SLOTS,
};
use rstest::rstest;

const TWELVE: &str = "a\nb\nc\nd\ne\nf\ng\nh\ni\nj\nk\nl";

#[test]
fn test_alignment_zero_permutes_every_slot() {
    let legends = normalize_legends(TWELVE, 0).unwrap();
    let expected = ["a", "i", "c", "g", "j", "h", "b", "k", "d", "e", "l", "f"];
    assert_eq!(legends, expected.map(String::from));
}

// A single-line legend lands where each alignment puts the top-left source slot.
#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 3)]
#[case(3, 4)]
#[case(4, 0)] // Default
#[case(5, 1)]
#[case(6, 3)]
#[case(7, 4)]
fn test_single_legend_destination(#[case] alignment: u8, #[case] slot: usize) {
    let legends = normalize_legends("X", alignment).unwrap();
    assert_eq!(legends[slot], "X", "alignment {}", alignment);
    assert_eq!(legends.iter().filter(|l| l.as_str() == "X").count(), 1);
}

#[test]
fn test_default_alignment_places_second_line_bottom_left() {
    let legends = normalize_legends("!\n1", 4).unwrap();
    assert_eq!(legends[0], "!");
    assert_eq!(legends[6], "1");
}

#[test]
fn test_blank_lines_become_placeholder() {
    let legends = normalize_legends("  \nfoo", 4).unwrap();
    assert_eq!(legends[0], BLANK_LEGEND);
    assert_eq!(legends[6], "foo");
}

#[test]
fn test_lines_are_trimmed() {
    let legends = normalize_legends("  Shift  ", 4).unwrap();
    assert_eq!(legends[0], "Shift");
}

#[test]
fn test_unreached_slots_stay_empty() {
    // Alignment 7 only keeps source slots 0 and 4.
    let legends = normalize_legends(TWELVE, 7).unwrap();
    assert_eq!(legends[4], "a");
    assert_eq!(legends[10], "e");
    for (slot, text) in legends.iter().enumerate() {
        if slot != 4 && slot != 10 {
            assert_eq!(text, "", "slot {}", slot);
        }
    }
}

#[test]
fn test_too_many_lines_is_an_invariant_error() {
    let raw = vec!["x"; LEGEND_SLOTS + 1].join("\n");
    match normalize_legends(&raw, 4) {
        Err(KleError::Invariant(msg)) => assert!(msg.contains("13 lines")),
        other => panic!("expected invariant error, got {:?}", other),
    }
}

#[test]
fn test_exactly_twelve_lines_is_accepted() {
    assert!(normalize_legends(TWELVE, 4).is_ok());
}

#[test]
fn test_unknown_alignment_is_rejected() {
    assert!(matches!(
        normalize_legends("A", 8),
        Err(KleError::Invariant(_))
    ));
}

#[rstest]
#[case("", true)]
#[case(BLANK_LEGEND, true)]
#[case(" ", false)]
#[case("A", false)]
fn test_is_blank(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_blank(text), expected);
}

#[test]
fn test_primary_legend_skips_blank_slots() {
    let legends = normalize_legends("\nShift", 4).unwrap();
    assert_eq!(primary_legend(&legends), Some("Shift"));

    let empty = normalize_legends("", 4).unwrap();
    assert_eq!(primary_legend(&empty), None);
}

#[rstest]
fn test_blank_first_line_is_placeholder_for_every_alignment(
    #[values(0, 1, 2, 3, 4, 5, 6, 7)] alignment: u8,
) {
    let legends = normalize_legends("  \nX", alignment).unwrap();
    let dest = kletype::layout::legend::LABEL_MAP[alignment as usize][0] as usize;
    assert_eq!(legends[dest], BLANK_LEGEND);
}
