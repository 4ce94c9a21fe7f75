//! Property-based round-trip laws for the core codecs

use super::constants::HEADER_SIZE;
use super::*;
use proptest::prelude::*;

fn arb_version() -> impl Strategy<Value = ChainwebVersion> {
    prop_oneof![
        Just(ChainwebVersion::Test),
        Just(ChainwebVersion::Simulation),
        Just(ChainwebVersion::Testnet00),
    ]
}

fn arb_header() -> impl Strategy<Value = BlockHeader> {
    (
        any::<u64>(),
        any::<u64>(),
        prop::array::uniform32(any::<u8>()),
        prop::array::uniform4(any::<u64>()),
        prop::array::uniform32(any::<u8>()),
        any::<u32>(),
        prop::array::uniform32(any::<u8>()),
        any::<u64>(),
        arb_version(),
    )
        .prop_map(
            |(nonce, time, parent, target, payload, chain, weight, height, version)| {
                BlockHeaderBuilder::new()
                    .nonce(Nonce::new(nonce))
                    .creation_time(time)
                    .parent(parent)
                    .target(HashTarget::new(target))
                    .payload_hash(payload)
                    .chain_id(ChainId::new(chain))
                    .weight(weight)
                    .height(BlockHeight::new(height))
                    .version(version)
                    .build()
            },
        )
}

proptest! {
    #[test]
    fn nonce_byte_roundtrip(value in any::<u64>()) {
        let nonce = Nonce::new(value);
        prop_assert_eq!(Nonce::from_le_bytes(nonce.to_le_bytes()), nonce);
    }

    #[test]
    fn target_byte_roundtrip(words in prop::array::uniform4(any::<u64>())) {
        let target = HashTarget::new(words);
        prop_assert_eq!(
            HashTarget::from_le_bytes(&target.to_le_bytes()).unwrap(),
            target
        );
    }

    #[test]
    fn target_hex_roundtrip(words in prop::array::uniform4(any::<u64>())) {
        let target = HashTarget::new(words);
        prop_assert_eq!(target.to_hex_be().parse::<HashTarget>().unwrap(), target);
    }

    #[test]
    fn target_meets_itself(words in prop::array::uniform4(any::<u64>())) {
        // The bound is inclusive.
        let target = HashTarget::new(words);
        prop_assert!(target.meets(&target.to_le_bytes()));
    }

    #[test]
    fn version_wire_roundtrip(version in arb_version()) {
        prop_assert_eq!(
            ChainwebVersion::from_le_bytes(version.to_le_bytes()).unwrap(),
            version
        );
    }

    #[test]
    fn version_text_roundtrip(version in arb_version()) {
        prop_assert_eq!(
            version.to_string().parse::<ChainwebVersion>().unwrap(),
            version
        );
    }

    #[test]
    fn header_encode_decode_roundtrip(header in arb_header()) {
        let decoded = BlockHeader::decode(&header.encode()).unwrap();
        prop_assert_eq!(decoded, header);
    }

    #[test]
    fn header_nonce_time_mutation_law(
        header in arb_header(),
        nonce in any::<u64>(),
        time in any::<u64>(),
    ) {
        // Mutating only the nonce and creation-time bytes of an encoded
        // header decodes to the same header with those fields replaced.
        let mut work = header.encode();
        work.set_nonce(Nonce::new(nonce));
        work.set_creation_time(time);

        let decoded = BlockHeader::decode(&work).unwrap();
        prop_assert_eq!(decoded.nonce(), Nonce::new(nonce));
        prop_assert_eq!(decoded.creation_time(), time);
        prop_assert_eq!(decoded.parent(), header.parent());
        prop_assert_eq!(decoded.target(), header.target());
        prop_assert_eq!(decoded.payload_hash(), header.payload_hash());
        prop_assert_eq!(decoded.chain_id(), header.chain_id());
        prop_assert_eq!(decoded.weight(), header.weight());
        prop_assert_eq!(decoded.height(), header.height());
        prop_assert_eq!(decoded.version(), header.version());
    }

    #[test]
    fn work_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), HEADER_SIZE)) {
        let work = Work::from_slice(&bytes).unwrap();
        prop_assert_eq!(Work::from_hex(&work.to_hex()).unwrap(), work);
    }
}
