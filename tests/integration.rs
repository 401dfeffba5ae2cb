//! Integration tests for delimframe.
//!
//! These tests verify the integration between different modules.

use delimframe::protocol::{build_frames, DecodeEvent, DecoderConfig, DelimitedFrameDecoder};
use delimframe::transport::{ChannelSink, FrameReader, TooLongPolicy};
use delimframe::{Frame, TooLongLength};
use proptest::prelude::*;

/// Feed `stream` split at the given cut points, collecting every event.
fn decode_chunked(
    decoder: &mut DelimitedFrameDecoder,
    stream: &[u8],
    cuts: &[usize],
) -> Vec<DecodeEvent> {
    let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (stream.len() + 1)).collect();
    cuts.sort_unstable();

    let mut events = Vec::new();
    let mut start = 0;
    for cut in cuts.into_iter().chain(std::iter::once(stream.len())) {
        events.extend(decoder.push(&stream[start..cut]));
        start = cut;
    }
    events
}

fn frames_of(events: &[DecodeEvent]) -> Vec<Vec<u8>> {
    events
        .iter()
        .filter_map(|e| match e {
            DecodeEvent::Frame(f) => Some(f.payload().to_vec()),
            DecodeEvent::TooLong(_) => None,
        })
        .collect()
}

/// Encode then decode several payloads through the public API.
#[test]
fn test_build_and_decode_sequence() {
    let payloads: Vec<String> = (1..=5).map(|i| format!("message_{}", i)).collect();
    let wire = build_frames(&payloads, b'*').unwrap();

    let mut decoder = DelimitedFrameDecoder::new();
    let (frames, errors) = decoder.push(&wire).into_parts();

    assert!(errors.is_empty());
    assert_eq!(frames.len(), 5);
    for (frame, payload) in frames.iter().zip(&payloads) {
        assert_eq!(frame.payload(), payload.as_bytes());
    }
}

/// Oversize frame followed by normal traffic, delivered in two reads.
#[test]
fn test_discard_scenario_across_reads() {
    let mut decoder = DelimitedFrameDecoder::with_max_length(3).unwrap();

    let (frames, errors) = decoder.push(b"abcdef").into_parts();
    assert!(frames.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].length, TooLongLength::Discarded(6));

    let (frames, errors) = decoder.push(b"ghi*").into_parts();
    assert!(frames.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].observed_len(), 9);
    assert!(!decoder.is_discarding());

    let (frames, _) = decoder.push(b"xyz*").into_parts();
    assert_eq!(frames, vec![Frame::from_slice(b"xyz")]);
}

/// Newline-delimited records through the async reader.
#[tokio::test]
async fn test_reader_with_channel_sink() {
    let config = DecoderConfig::default()
        .with_delimiter(b'\n')
        .with_max_length(8);
    let decoder = DelimitedFrameDecoder::with_config(config).unwrap();
    let (mut sink, mut rx) = ChannelSink::new(TooLongPolicy::Continue);
    let input: &[u8] = b"short\nthis one is far too long\nfine\n";

    let summary = FrameReader::with_decoder(input, decoder)
        .with_read_buffer_size(4)
        .run(&mut sink)
        .await
        .unwrap();
    drop(sink);

    assert_eq!(summary.frames, 2);
    assert!(summary.errors >= 1);

    let mut received = Vec::new();
    while let Some(frame) = rx.recv().await {
        received.push(frame.payload().to_vec());
    }
    assert_eq!(received, vec![b"short".to_vec(), b"fine".to_vec()]);
}

proptest! {
    /// Chunking never changes the decoded frames, and they rebuild the stream.
    #[test]
    fn prop_chunking_invariant(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>().prop_filter("no delimiter", |b| *b != b'*'), 0..16), 0..12),
        cuts in prop::collection::vec(any::<usize>(), 0..20),
    ) {
        let stream = build_frames(&payloads, b'*').unwrap();

        let mut whole = DelimitedFrameDecoder::with_max_length(16).unwrap();
        let whole_events = decode_chunked(&mut whole, &stream, &[]);

        let mut chunked = DelimitedFrameDecoder::with_max_length(16).unwrap();
        let chunked_events = decode_chunked(&mut chunked, &stream, &cuts);

        let mut bytewise = DelimitedFrameDecoder::with_max_length(16).unwrap();
        let mut bytewise_events = Vec::new();
        for byte in &stream {
            bytewise_events.extend(bytewise.push(std::slice::from_ref(byte)));
        }

        prop_assert_eq!(&whole_events, &chunked_events);
        prop_assert_eq!(&whole_events, &bytewise_events);

        let frames = frames_of(&chunked_events);
        prop_assert_eq!(&frames, &payloads);
        prop_assert!(chunked.is_empty());
    }

    /// Oversize segments never leak out, and decoding resumes after them.
    #[test]
    fn prop_oversize_never_emitted(
        oversize in 5usize..64,
        tail in prop::collection::vec(prop::collection::vec(b'a'..=b'z', 0..5), 0..6),
        cuts in prop::collection::vec(any::<usize>(), 0..10),
    ) {
        let mut stream = vec![b'#'; oversize];
        stream.push(b'*');
        stream.extend(build_frames(&tail, b'*').unwrap());

        let mut decoder = DelimitedFrameDecoder::with_max_length(4).unwrap();
        let events = decode_chunked(&mut decoder, &stream, &cuts);

        let errors: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                DecodeEvent::TooLong(err) => Some(*err),
                DecodeEvent::Frame(_) => None,
            })
            .collect();
        prop_assert!(!errors.is_empty());
        prop_assert_eq!(errors.last().map(|e| e.observed_len()), Some(oversize));

        let frames = frames_of(&events);
        prop_assert_eq!(&frames, &tail);
    }
}
