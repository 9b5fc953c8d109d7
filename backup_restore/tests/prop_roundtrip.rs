//! Property-based tests for backup/restore over random nested values.

use backup_restore::{
    BackupError, Fletcher64, HostOrder, ParticipantIdentity, backup, backup_to_writer, restore,
    restore_from_reader,
};
use proptest::prelude::*;
use std::collections::VecDeque;
use tempfile::tempdir;

type State = Vec<Vec<[f64; 3]>>;

fn block_strategy() -> impl Strategy<Value = [f64; 3]> {
    // NaN would break the equality check, not the codec
    prop::array::uniform3(-1e12f64..1e12)
}

fn state_strategy() -> impl Strategy<Value = State> {
    prop::collection::vec(prop::collection::vec(block_strategy(), 0..12), 0..12)
}

fn encode<T: backup_restore::Codec>(value: &T) -> Vec<u8> {
    let (bytes, _) = backup_to_writer::<Fletcher64, HostOrder, _, _>(value, Vec::new()).unwrap();
    bytes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_file_roundtrip(state in state_strategy()) {
        let dir = tempdir().unwrap();
        let base = dir.path().join("state");

        backup(&state, &base, ParticipantIdentity::SERIAL).unwrap();

        let mut restored = State::new();
        restore(&mut restored, &base, ParticipantIdentity::SERIAL).unwrap();
        prop_assert_eq!(restored, state);
    }

    #[test]
    fn prop_integer_containers_roundtrip(
        value in prop::collection::vec(
            prop::collection::vec_deque(any::<[u16; 3]>(), 0..8),
            0..8,
        ),
    ) {
        let bytes = encode(&value);

        let mut restored: Vec<VecDeque<[u16; 3]>> = Vec::new();
        restore_from_reader::<Fletcher64, HostOrder, _, _>(&mut restored, bytes.as_slice()).unwrap();
        prop_assert_eq!(restored, value);
    }

    #[test]
    fn prop_encoded_size_matches_shape(state in state_strategy()) {
        let expected = 8 + state.iter().map(|inner| 8 + inner.len() * 24).sum::<usize>() + 8;
        prop_assert_eq!(encode(&state).len(), expected);
    }

    // Payload and trailer bytes of a fixed-shape value; length prefix excluded
    // since a changed length alters the traversal before the checksum is read.
    #[test]
    fn prop_single_byte_flip_is_a_checksum_mismatch(
        blocks in prop::collection::vec(block_strategy(), 1..32),
        pos in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut bytes = encode(&blocks);
        let at = 8 + pos.index(bytes.len() - 8);
        bytes[at] ^= flip;

        let mut restored: Vec<[f64; 3]> = Vec::new();
        let result = restore_from_reader::<Fletcher64, HostOrder, _, _>(&mut restored, bytes.as_slice());
        let mismatch = matches!(result, Err(BackupError::ChecksumMismatch { .. }));
        prop_assert!(mismatch, "flip at byte {} not reported as a mismatch", at);
    }
}
