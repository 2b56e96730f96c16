use itertools::Itertools;
use score_segment::{
    primitives::{Element, ElementKind, Pitch},
    Chord, ElementList, Settings,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn note(time: u64, duration: u64, midi: u8) -> Element {
    Element::note(time, duration, Pitch::from_midi(midi))
}

#[test]
fn chord_from_any_note() {
    init();
    let mut list = ElementList::new();
    list.insert(note(0, 96, 55));
    let notes = [(67, 96), (60, 192), (64, 48), (72, 96)]
        .into_iter()
        .map(|(midi, duration)| list.insert(note(96, duration, midi)))
        .collect_vec();
    list.insert(Element::new(ElementKind::Clef, 192, 0));
    list.insert(note(192, 96, 60));

    for seed in notes.iter().copied() {
        let chord = Chord::new(&list, seed, false);
        assert!(chord.contains(seed));
        assert_eq!(chord.len(), 4);
        assert!(chord
            .elements()
            .tuple_windows()
            .all(|((_, a), (_, b))| a.pitch() <= b.pitch()));
        assert_eq!(chord.lowest_note(), Some(notes[1]));
        assert_eq!(chord.highest_note(), Some(notes[3]));
        assert_eq!(chord.initial_note(), Some(notes[0]));
        assert_eq!(chord.final_note(), Some(notes[3]));
        assert_eq!(chord.longest_note(), Some(notes[1]));
        assert_eq!(chord.shortest_note(), Some(notes[2]));
    }
    assert!(list.has_succeeding_chord_elements(notes[1]));
    assert!(!list.has_succeeding_chord_elements(notes[3]));
}

#[test]
fn lonely_note() {
    init();
    let mut list = ElementList::new();
    let seed = list.insert(note(0, 96, 60));
    list.insert(Element::rest(96, 96));
    let chord = Chord::new(&list, seed, false);
    assert_eq!(chord.len(), 1);
    assert_eq!(chord.highest_note(), Some(seed));
    assert_eq!(chord.lowest_note(), Some(seed));
    assert_eq!(chord.longest_note(), Some(seed));
    assert_eq!(chord.shortest_note(), Some(seed));
}

#[test]
fn quantized_chord_in_fine_grid() {
    init();
    let mut list = ElementList::with_settings(
        Settings::default()
            .with_ticks_per_crotchet(960)
            .with_quantize_unit(120),
    );
    let a = list.insert(note(950, 960, 60));
    let b = list.insert(note(1010, 960, 67));
    let c = list.insert(note(1015, 960, 64));
    assert_eq!(Chord::new(&list, b, false).len(), 1);
    let chord = Chord::new(&list, b, true);
    assert_eq!(chord.as_slice(), &[a, c, b]);
}

#[test]
fn chord_after_erase() {
    init();
    let mut list = ElementList::new();
    let c = list.insert(note(0, 96, 60));
    let e = list.insert(note(0, 96, 64));
    let g = list.insert(note(0, 96, 67));
    list.erase(g);
    let chord = Chord::new(&list, c, false);
    assert_eq!(chord.as_slice(), &[c, e]);
    assert!(!list.has_succeeding_chord_elements(e));
}
