use fraction::Fraction;
use itertools::Itertools;
use score_segment::{
    primitives::{
        Element, Length, NoteType, NoteValue, Pitch, TieFlags, TieRole,
        TupletId, TupletMembership, TupletRatio,
    },
    ElementList, PerformanceHelper,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn tied_minim_and_rest() {
    init();
    let c = Pitch::from_midi(60);
    let mut list = ElementList::new();
    let a = list.insert(Element::note(0, 96, c).with_ties(TieFlags::start()));
    let b = list
        .insert(Element::note(96, 96, c).with_ties(TieFlags::continuation()));
    let rest = list.insert(Element::rest(192, 96));

    let helper = PerformanceHelper::new(&list);
    helper
        .sounding_durations()
        .zip_eq([(a, 192), (b, 0)])
        .for_each(|((id, length), (expected_id, ticks))| {
            assert_eq!(id, expected_id);
            assert_eq!(length, Length::from_ticks(ticks));
        });
    assert_eq!(helper.sounding_duration(rest), Length::from_ticks(96));
    assert_eq!(helper.sounding_end(a), Some(Length::from_ticks(192)));
    assert_eq!(helper.sounding_end(b), Some(Length::from_ticks(96)));
}

#[test]
fn long_chain() {
    init();
    let c = Pitch::from_midi(60);
    let mut list = ElementList::new();
    let count = 8;
    let ids = (0..count)
        .map(|index| {
            let ties = match index {
                0 => TieFlags::start(),
                x if x == count - 1 => TieFlags::continuation(),
                _ => TieFlags::both(),
            };
            list.insert(Element::note(index * 24, 24, c).with_ties(ties))
        })
        .collect_vec();
    let helper = PerformanceHelper::new(&list);
    assert_eq!(
        helper.sounding_duration(ids[0]),
        Length::from_ticks(24 * count)
    );
    for id in &ids[1..] {
        assert_eq!(list.get(*id).map(|e| e.tie_role()), Some(TieRole::TieContinuation));
        assert_eq!(helper.sounding_duration(*id), Length::zero());
    }
}

#[test]
fn triplet_quavers() {
    init();
    let mut list = ElementList::new();
    let membership =
        TupletMembership::new(TupletId(0), TupletRatio::triplet());
    let ids = [60, 62, 64]
        .into_iter()
        .enumerate()
        .map(|(index, midi)| {
            list.insert(
                Element::note(index as u64 * 32, 48, Pitch::from_midi(midi))
                    .with_tuplet(membership),
            )
        })
        .collect_vec();
    let helper = PerformanceHelper::new(&list);
    for id in ids.iter().copied() {
        assert_eq!(helper.sounding_duration(id), Length::from_ticks(32));
    }
    let total: Length = helper.sounding_durations().map(|(_, l)| l).sum();
    assert_eq!(total, Length::from_ticks(96));
}

#[test]
fn quintuplet_gives_exact_fraction() {
    init();
    let mut list = ElementList::new();
    let ratio = TupletRatio::new(5, 4).expect("valid ratio");
    let id = list.insert(
        Element::note(0, 25, Pitch::from_midi(60))
            .with_tuplet(TupletMembership::new(TupletId(3), ratio)),
    );
    let helper = PerformanceHelper::new(&list);
    assert_eq!(helper.sounding_duration(id), Length::from_ticks(20));

    list.set_note_value(id, NoteValue::new(NoteType::SemiQuaver, 0))
        .expect("can not set note value");
    let helper = PerformanceHelper::new(&list);
    assert_eq!(
        helper.sounding_duration(id).get(),
        Fraction::new(96_u64, 5_u64)
    );
    assert_eq!(helper.sounding_duration(id).ticks(), None);
}

#[test]
fn tied_chord() {
    init();
    let mut list = ElementList::new();
    let pitches = [60, 64, 67];
    let starts = pitches
        .iter()
        .map(|midi| {
            list.insert(
                Element::note(0, 96, Pitch::from_midi(*midi))
                    .with_ties(TieFlags::start()),
            )
        })
        .collect_vec();
    // only the upper two notes are held
    list.insert(Element::note(96, 48, Pitch::from_midi(60)));
    for midi in [67, 64] {
        list.insert(
            Element::note(96, 48, Pitch::from_midi(midi))
                .with_ties(TieFlags::continuation()),
        );
    }
    let helper = PerformanceHelper::new(&list);
    starts
        .iter()
        .map(|id| helper.sounding_duration(*id))
        .zip_eq([96, 144, 144])
        .for_each(|(got, ticks)| assert_eq!(got, Length::from_ticks(ticks)));
}
