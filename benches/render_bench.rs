use criterion::{criterion_group, criterion_main, Criterion};
use kletype::layout::kle::decode;
use kletype::practice::PracticeSession;
use kletype::render::screen::{render_screen, ScreenState};
use kletype::render::style::StyleConfig;
use kletype::render::{render_keyboard, Viewport};
use std::collections::HashSet;
use std::hint::black_box;

// A full-size ANSI 104 board, written out the way the editor exports it.
const ANSI_104: &str = r##"[
    {name: "ANSI 104", author: "bench"},
    ["Esc", {x: 1}, "F1", "F2", "F3", "F4", {x: 0.5}, "F5", "F6", "F7", "F8", {x: 0.5}, "F9", "F10", "F11", "F12"],
    [{y: 0.5}, "~\n`", "!\n1", "@\n2", "#\n3", "$\n4", "%\n5", "^\n6", "&\n7", "*\n8", "(\n9", ")\n0", "_\n-", "+\n=", {w: 2}, "Backspace"],
    [{w: 1.5}, "Tab", "Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "{\n[", "}\n]", {w: 1.5}, "|\n\\"],
    [{w: 1.75}, "Caps Lock", "A", "S", "D", "F", "G", "H", "J", "K", "L", ":\n;", "\"\n'", {w: 2.25}, "Enter"],
    [{w: 2.25}, "Shift", "Z", "X", "C", "V", "B", "N", "M", "<\n,", ">\n.", "?\n/", {w: 2.75}, "Shift"],
    [{w: 1.25}, "Ctrl", {w: 1.25}, "Win", {w: 1.25}, "Alt", {a: 7, w: 6.25}, "", {a: 4, w: 1.25}, "Alt", {w: 1.25}, "Win", {w: 1.25}, "Menu", {w: 1.25}, "Ctrl"]
]"##;

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_ansi_104", |b| {
        b.iter(|| decode(black_box(ANSI_104)).unwrap())
    });
}

fn bench_render(c: &mut Criterion) {
    let layout = decode(ANSI_104).unwrap();
    let style = StyleConfig::default();
    let pressed: HashSet<String> = ["Q", "SHIFT"].iter().map(|s| s.to_string()).collect();
    let viewport = Viewport::new(160, 120);

    c.bench_function("render_keyboard", |b| {
        b.iter(|| render_keyboard(black_box(&layout), black_box(&pressed), viewport, &style))
    });

    let session = PracticeSession::new(&Default::default());
    c.bench_function("render_screen_ansi", |b| {
        b.iter(|| {
            let frame = render_screen(
                &ScreenState {
                    layout: &layout,
                    session: &session,
                    viewport,
                    min_size: Viewport::new(80, 24),
                },
                &style,
            );
            black_box(frame.to_ansi())
        })
    });
}

criterion_group!(benches, bench_decode, bench_render);
criterion_main!(benches);
