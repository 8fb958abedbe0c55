//! Property tests for line reassembly
//!
//! However the byte stream is chunked, the same lines come out in the same
//! order, and nothing read is ever lost.

use logcat_lens::stream::LineReassembler;
use proptest::prelude::*;

fn collect_lines(stream: &[u8], cuts: &[usize]) -> (Vec<Vec<u8>>, Vec<u8>) {
    let mut reassembler = LineReassembler::new();
    let mut lines = Vec::new();
    let mut start = 0;

    let mut boundaries: Vec<usize> = cuts.iter().map(|c| c % (stream.len() + 1)).collect();
    boundaries.sort_unstable();
    boundaries.push(stream.len());

    for end in boundaries {
        for line in reassembler.feed(&stream[start..end]) {
            lines.push(line.into_bytes());
        }
        start = end;
    }
    (lines, reassembler.pending().to_vec())
}

fn log_stream() -> impl Strategy<Value = Vec<u8>> {
    let lines = prop::collection::vec(
        prop_oneof![
            4 => "[A-Za-z0-9 /():.!]{0,40}".prop_map(String::into_bytes),
            1 => Just(Vec::new()),
        ],
        0..20,
    );
    (lines, any::<bool>()).prop_map(|(lines, terminated)| {
        let mut bytes = lines.join(&b'\n');
        if terminated {
            bytes.push(b'\n');
        }
        bytes
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_chunking_does_not_change_lines(
        stream in log_stream(),
        cuts in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        let whole = collect_lines(&stream, &[]);
        let split = collect_lines(&stream, &cuts);
        prop_assert_eq!(whole, split);
    }

    #[test]
    fn test_lines_and_tail_rebuild_the_stream(
        stream in log_stream(),
        cuts in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        let (lines, tail) = collect_lines(&stream, &cuts);

        let mut rebuilt = Vec::new();
        for line in &lines {
            prop_assert!(!line.contains(&b'\n'));
            rebuilt.extend_from_slice(line);
            rebuilt.push(b'\n');
        }
        prop_assert!(!tail.contains(&b'\n'));
        rebuilt.extend_from_slice(&tail);

        prop_assert_eq!(rebuilt, stream);
    }

    #[test]
    fn test_one_byte_at_a_time(stream in log_stream()) {
        let cuts: Vec<usize> = (0..stream.len()).collect();
        let whole = collect_lines(&stream, &[]);
        prop_assert_eq!(collect_lines(&stream, &cuts), whole);
    }
}
