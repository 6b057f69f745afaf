use crossterm::style::Color;
use kletype::layout::kle::decode;
use kletype::layout::LayoutModel;
use kletype::render::style::{is_special, parse_color, KeyClass, StyleConfig};
use kletype::render::{
    classify, key_cell_width, panel_width, render_key, render_keyboard, rows_that_fit, Viewport,
    KEY_ROW_HEIGHT, MAX_KEY_COLUMNS,
};
use rstest::rstest;
use std::collections::HashSet;

fn layout(doc: &str) -> LayoutModel {
    decode(doc).expect("Failed to parse KLE")
}

fn pressed(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn plain_key(doc: &str, style: &StyleConfig) -> Vec<String> {
    let model = layout(doc);
    let key = &model.keys[0];
    render_key(key, KeyClass::Normal, style)
        .lines
        .iter()
        .map(|l| l.plain())
        .collect()
}

#[rstest]
#[case(1.0, 4)]
#[case(1.25, 5)]
#[case(1.5, 6)]
#[case(1.75, 7)]
#[case(2.0, 8)]
#[case(2.25, 9)]
#[case(6.25, 25)]
#[case(0.5, 4)] // Never narrower than one unit
#[case(0.0, 4)]
#[case(-3.0, 4)]
#[case(f64::NAN, 4)]
#[case(1e8, MAX_KEY_COLUMNS)]
#[case(1e300, MAX_KEY_COLUMNS)]
#[case(f64::INFINITY, MAX_KEY_COLUMNS)]
fn test_key_cell_width(#[case] units: f64, #[case] columns: usize) {
    assert_eq!(key_cell_width(units), columns);
}

#[rstest]
#[case(60, 40, 20)]
#[case(24, 16, 8)]
#[case(10, 6, 4)]
#[case(0, 0, 0)]
fn test_viewport_budgets(#[case] height: usize, #[case] prompt: usize, #[case] keyboard: usize) {
    let viewport = Viewport::new(100, height);
    assert_eq!(viewport.prompt_budget(), prompt);
    assert_eq!(viewport.keyboard_budget(), keyboard);
}

#[rstest]
#[case(20, false, 4)]
#[case(20, true, 3)]
#[case(5, false, 1)]
#[case(5, true, 0)]
#[case(0, true, 0)]
fn test_rows_that_fit(#[case] budget: usize, #[case] captioned: bool, #[case] rows: usize) {
    assert_eq!(rows_that_fit(budget, captioned), rows);
}

#[test]
fn test_single_key_drawing() {
    let lines = plain_key(r#"[["Q"]]"#, &StyleConfig::default());
    assert_eq!(
        lines,
        vec!["╭────╮", "│Q   │", "│    │", "│    │", "╰────╯"]
    );
}

#[test]
fn test_two_line_legend_uses_top_and_bottom_lines() {
    let lines = plain_key(r#"[["!\n1"]]"#, &StyleConfig::default());
    assert_eq!(lines[1], "│!   │");
    assert_eq!(lines[3], "│1   │");
}

#[test]
fn test_long_legend_is_truncated_to_key_width() {
    let lines = plain_key(r#"[["Backspace"]]"#, &StyleConfig::default());
    assert_eq!(lines[1], "│Back│");

    let wide = plain_key(r#"[[{w:2}, "Backspace"]]"#, &StyleConfig::default());
    assert_eq!(wide[1], "│Backspac│");
}

#[test]
fn test_blank_glyph_replaces_placeholder() {
    let style = StyleConfig {
        blank_glyph: ".".to_string(),
        ..StyleConfig::default()
    };
    let lines = plain_key(r#"[["Q"]]"#, &style);
    assert_eq!(lines[1], "│Q.. │");
    assert_eq!(lines[2], "│... │");
}

#[test]
fn test_rows_beyond_budget_are_omitted() {
    let model = layout(r#"[["1"], ["2"], ["3"], ["4"], ["5"], ["6"]]"#);
    let block = render_keyboard(
        &model,
        &HashSet::new(),
        Viewport::new(120, 60),
        &StyleConfig::default(),
    );
    assert_eq!(block.height(), 4 * KEY_ROW_HEIGHT);
    let text = block.plain();
    assert!(text.contains("│4   │"));
    assert!(!text.contains("│5   │"));
}

#[test]
fn test_caption_consumes_a_line() {
    let model = layout(r#"[{name: "Test", author: "me"}, ["1"], ["2"], ["3"], ["4"]]"#);
    let block = render_keyboard(
        &model,
        &HashSet::new(),
        Viewport::new(120, 60),
        &StyleConfig::default(),
    );
    assert_eq!(block.lines[0].plain(), "Keyboard: Test by me");
    assert_eq!(block.height(), 1 + 3 * KEY_ROW_HEIGHT);
}

#[test]
fn test_tiny_viewport_draws_nothing() {
    let model = layout(r#"[["A"]]"#);
    let block = render_keyboard(
        &model,
        &HashSet::new(),
        Viewport::new(120, 6),
        &StyleConfig::default(),
    );
    assert!(block.is_empty());
}

#[test]
fn test_rows_are_centered_against_widest() {
    let model = layout(r#"[["A", "B"], ["C"]]"#);
    let block = render_keyboard(
        &model,
        &HashSet::new(),
        Viewport::new(120, 60),
        &StyleConfig::default(),
    );
    assert!(block.lines[0].plain().starts_with("╭────╮╭────╮"));
    assert_eq!(block.lines[KEY_ROW_HEIGHT].plain(), "   ╭────╮");
    assert_eq!(panel_width(&model), 12);
}

#[rstest]
#[case(r#"[["Q"]]"#, &["Q"], KeyClass::Pressed)]
#[case(r#"[["q"]]"#, &["Q"], KeyClass::Pressed)]
#[case(r#"[["Shift"]]"#, &["SHIFT"], KeyClass::Pressed)] // Pressed wins over special
#[case(r#"[["Shift"]]"#, &[], KeyClass::Special)]
#[case(r#"[["Left Shift"]]"#, &[], KeyClass::Special)]
#[case(r#"[["tab"]]"#, &[], KeyClass::Special)]
#[case(r#"[["Caps Lock"]]"#, &[], KeyClass::Special)]
#[case(r#"[["!\nFn"]]"#, &[], KeyClass::Special)] // Any visible legend counts
#[case(r#"[["!\n1"]]"#, &["1"], KeyClass::Pressed)] // Any visible legend lights the key
#[case(r#"[[">\n."]]"#, &["."], KeyClass::Pressed)]
#[case(r#"[[{a: 7, w: 6.25}, ""]]"#, &["SPACE"], KeyClass::Pressed)] // Blank space bar
#[case(r#"[[""]]"#, &["SPACE"], KeyClass::Normal)] // Too narrow for a space bar
#[case(r#"[["A"]]"#, &["Q"], KeyClass::Normal)]
#[case(r#"[[""]]"#, &[], KeyClass::Normal)]
fn test_classify(#[case] doc: &str, #[case] ids: &[&str], #[case] class: KeyClass) {
    let model = layout(doc);
    assert_eq!(classify(&model.keys[0], &pressed(ids)), class);
}

#[rstest]
#[case("Space", true)]
#[case("CMD", true)]
#[case("menü", true)]
#[case("Esc", true)]
#[case("A", false)]
#[case("1", false)]
fn test_is_special(#[case] label: &str, #[case] expected: bool) {
    assert_eq!(is_special(label), expected);
}

#[test]
fn test_extreme_widths_render_within_bounds() {
    let model = layout(r#"[[{w: 1e300}, "A", {w: -3}, "B"], [{w: 1e8}, "C"]]"#);
    let widest = MAX_KEY_COLUMNS + 2;
    assert_eq!(panel_width(&model), widest + 6);

    let block = render_keyboard(
        &model,
        &HashSet::new(),
        Viewport::new(120, 60),
        &StyleConfig::default(),
    );
    assert_eq!(block.height(), 2 * KEY_ROW_HEIGHT);
    assert_eq!(block.width(), widest + 6);
}

#[test]
fn test_pressed_key_uses_pressed_style() {
    let model = layout(r#"[["A", "B"]]"#);
    let style = StyleConfig::default();
    let block = render_keyboard(&model, &pressed(&["B"]), Viewport::new(120, 60), &style);

    let face_styles: Vec<_> = block.lines[1]
        .spans
        .iter()
        .filter(|s| s.text != "│")
        .map(|s| s.style)
        .collect();
    assert_eq!(face_styles, vec![style.normal.face, style.pressed.face]);
}

#[test]
fn test_key_colours_override_face() {
    let model = layout(r##"[[{c: "#ff0000", t: "#00ff00"}, "A"]]"##);
    let block = render_key(&model.keys[0], KeyClass::Normal, &StyleConfig::default());
    let face = block.lines[1].spans[1].style;
    assert_eq!(face.bg, Some(Color::Rgb { r: 255, g: 0, b: 0 }));
    assert_eq!(face.fg, Some(Color::Rgb { r: 0, g: 255, b: 0 }));
}

#[test]
fn test_unparseable_key_colour_keeps_class_style() {
    let model = layout(r#"[[{c: "not-a-colour"}, "A"]]"#);
    let style = StyleConfig::default();
    let block = render_key(&model.keys[0], KeyClass::Normal, &style);
    assert_eq!(block.lines[1].spans[1].style, style.normal.face);
}

#[rstest]
#[case("46", Some(Color::AnsiValue(46)))]
#[case("#fff", Some(Color::Rgb { r: 255, g: 255, b: 255 }))]
#[case("#102030", Some(Color::Rgb { r: 16, g: 32, b: 48 }))]
#[case("red", Some(Color::Red))]
#[case("#12345", None)]
#[case("#ggg", None)]
#[case("nonsense", None)]
fn test_parse_color(#[case] text: &str, #[case] expected: Option<Color>) {
    assert_eq!(parse_color(text), expected);
}

#[test]
fn test_rendering_is_deterministic() {
    let model = layout(r#"[{name: "Det"}, ["Esc", {w:2}, "Backspace"], [{w:1.5}, "Tab", "Q"]]"#);
    let set = pressed(&["Q"]);
    let viewport = Viewport::new(100, 60);
    let style = StyleConfig::default();
    let first = render_keyboard(&model, &set, viewport, &style);
    let second = render_keyboard(&model, &set, viewport, &style);
    assert_eq!(first, second);
    assert_eq!(first.to_ansi(), second.to_ansi());
}

#[test]
fn test_ansi_output_carries_escape_codes() {
    let model = layout(r#"[["A"]]"#);
    let block = render_keyboard(
        &model,
        &HashSet::new(),
        Viewport::new(100, 60),
        &StyleConfig::default(),
    );
    assert!(block.to_ansi().contains("\u{1b}["));
    assert!(!block.plain().contains('\u{1b}'));
}
