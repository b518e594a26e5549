use crate::prelude::*;

#[doc = r#"
Merges tracks into a single absolute-time track.

Tracks are converted to absolute time and merged pairwise in order, so on equal
times events of earlier tracks come first and the order within a track is kept.
A combined stream has one terminator: every end-of-track event except one sitting
at the very end is dropped.

Combining no tracks yields an empty absolute track.

```rust
# use miditrack::prelude::*;
# use miditrack::file::combine;
let a = Track::new(vec![TrackEvent::new(5, MetaMessage::EndOfTrack)], TimeDomain::Delta);
let b = Track::new(vec![TrackEvent::new(3, MetaMessage::EndOfTrack)], TimeDomain::Delta);

let combined = combine([a, b]);
assert_eq!(combined.len(), 1);
assert_eq!(combined.events()[0].time(), 5);
```
"#]
pub fn combine<I>(tracks: I) -> Track
where
    I: IntoIterator<Item = Track>,
{
    let mut combined = tracks
        .into_iter()
        .fold(Track::new(alloc::vec::Vec::new(), TimeDomain::Absolute), Track::merge);
    combined.retain_final_end_of_track();
    combined
}

#[cfg(test)]
fn note_on(time: u64, channel: Channel) -> TrackEvent {
    TrackEvent::new(
        time,
        ChannelVoiceMessage::new(channel, VoiceEvent::NoteOn { key: 60, velocity: 90 }),
    )
}

#[test]
fn single_terminator_survives_last() {
    use pretty_assertions::assert_eq;
    let a = Track::new(
        alloc::vec![note_on(0, Channel::One), TrackEvent::new(5, MetaMessage::EndOfTrack)],
        TimeDomain::Delta,
    );
    let b = Track::new(
        alloc::vec![note_on(0, Channel::Two), TrackEvent::new(3, MetaMessage::EndOfTrack)],
        TimeDomain::Delta,
    );

    let combined = combine([a, b]);
    assert_eq!(combined.domain(), TimeDomain::Absolute);
    assert_eq!(
        combined.events(),
        &[
            note_on(0, Channel::One),
            note_on(0, Channel::Two),
            TrackEvent::new(5, MetaMessage::EndOfTrack),
        ]
    );
}

#[test]
fn terminators_dropped_when_not_last() {
    use pretty_assertions::assert_eq;
    let a = Track::new(
        alloc::vec![TrackEvent::new(2, MetaMessage::EndOfTrack)],
        TimeDomain::Delta,
    );
    let b = Track::new(alloc::vec![note_on(9, Channel::Three)], TimeDomain::Delta);

    let combined = combine([a, b]);
    assert_eq!(combined.events(), &[note_on(9, Channel::Three)]);
}

#[test]
fn combine_three_tracks_keeps_track_order_on_ties() {
    use pretty_assertions::assert_eq;
    let tracks = [Channel::One, Channel::Two, Channel::Three]
        .map(|channel| Track::new(alloc::vec![note_on(4, channel)], TimeDomain::Delta));

    let combined = combine(tracks);
    let channels: alloc::vec::Vec<_> = combined.events().iter().filter_map(TrackEvent::channel).collect();
    assert_eq!(channels, [Channel::One, Channel::Two, Channel::Three]);
}

#[test]
fn combine_nothing() {
    use pretty_assertions::assert_eq;
    let combined = combine([]);
    assert!(combined.is_empty());
    assert_eq!(combined.domain(), TimeDomain::Absolute);
}
