use cred_harness::domain::bounded::{BoundedBytes, BoundedText};
use cred_harness::domain::seed::{self, CANONICAL_ENCODED_LEN};
use cred_harness::{
    ByteMutator, CodecError, ParamSet, SeededMutator, StructureMutator, CDH_LEN, MAX_BLOB, MAX_STR,
};
use proptest::prelude::*;
use proptest::sample::Index;

fn blob<const N: usize>(max: usize) -> impl Strategy<Value = BoundedBytes<N>> {
    prop::collection::vec(any::<u8>(), 0..=max)
        .prop_map(|v| BoundedBytes::from_slice(&v).unwrap())
}

fn text() -> impl Strategy<Value = BoundedText<MAX_STR>> {
    prop::collection::vec(1u8..=u8::MAX, 0..=MAX_STR - 1)
        .prop_map(|v| BoundedText::from_bytes(&v).unwrap())
}

prop_compose! {
    fn params(max_blob: usize)(
        selectors in any::<[bool; 4]>(),
        cdh in blob::<CDH_LEN>(CDH_LEN),
        rp_id in text(),
        rp_name in text(),
        authdata in blob::<MAX_BLOB>(max_blob),
        ext in any::<i32>(),
        x509 in blob::<MAX_BLOB>(max_blob),
        sig in blob::<MAX_BLOB>(max_blob),
    ) -> ParamSet {
        let [es256, rk, uv, packed] = selectors;
        ParamSet { es256, cdh, rp_id, rp_name, authdata, ext, rk, uv, x509, sig, packed }
    }
}

proptest! {
    #[test]
    fn roundtrip(p in params(512)) {
        let bytes = p.to_vec().unwrap();
        prop_assert_eq!(bytes.len(), p.encoded_len());
        prop_assert_eq!(ParamSet::decode(&bytes).unwrap(), p);
    }

    #[test]
    fn trailing_bytes_ignored(p in params(64), tail in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut bytes = p.to_vec().unwrap();
        bytes.extend_from_slice(&tail);
        prop_assert_eq!(ParamSet::decode(&bytes).unwrap(), p);
    }

    #[test]
    fn truncation_fails(p in params(128), cut in any::<Index>()) {
        let bytes = p.to_vec().unwrap();
        let cut = cut.index(bytes.len());
        prop_assert_eq!(ParamSet::decode(&bytes[..cut]), Err(CodecError::MalformedInput));
    }

    #[test]
    fn short_buffer_overflows(p in params(128), cut in any::<Index>()) {
        let len = p.encoded_len();
        let mut out = vec![0u8; cut.index(len)];
        prop_assert_eq!(p.encode(&mut out), Err(CodecError::EncodeOverflow));
    }

    #[test]
    fn oversized_cdh_prefix_rejected(len in (CDH_LEN as u16 + 1)..=512u16) {
        let mut bytes = vec![0x01, 0x01, 0x02];
        bytes.extend_from_slice(&len.to_le_bytes());
        bytes.resize(bytes.len() + usize::from(len) + 4096, 0x03);
        prop_assert_eq!(ParamSet::decode(&bytes), Err(CodecError::MalformedInput));
    }

    #[test]
    fn oversized_field_refused(extra in 1usize..64) {
        let cdh = vec![0u8; CDH_LEN + extra];
        prop_assert_eq!(
            BoundedBytes::<CDH_LEN>::from_slice(&cdh),
            Err(CodecError::EncodeOverflow)
        );
        let rp = vec![b'a'; MAX_STR - 1 + extra];
        prop_assert_eq!(
            BoundedText::<MAX_STR>::from_bytes(&rp),
            Err(CodecError::EncodeOverflow)
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn mutator_output_decodes(
        input in prop::collection::vec(any::<u8>(), 0..1500),
        use_seed in any::<bool>(),
        max_size in CANONICAL_ENCODED_LEN..4096usize,
        rounds in 1usize..8,
        rng_seed in any::<u32>(),
    ) {
        let mut m = StructureMutator::new(4096);
        let mut bytes = SeededMutator::new(0);
        let mut data = vec![0u8; 4096];
        let mut size = if use_seed {
            let s = seed::canonical().to_vec().unwrap();
            data[..s.len()].copy_from_slice(&s);
            s.len()
        } else {
            data[..input.len()].copy_from_slice(&input);
            input.len()
        };

        for round in 0..rounds {
            bytes.reseed(rng_seed.wrapping_add(round as u32));
            let n = m.mutate(&mut data, size, max_size, &mut bytes, |_| true);
            prop_assert!(n <= max_size);
            if n > 0 {
                prop_assert!(ParamSet::decode(&data[..n]).is_ok());
                size = n;
            }
        }
    }

    #[test]
    fn mutator_output_decodes_from_any_params(
        start in params(256),
        rounds in 1usize..8,
        rng_seed in any::<u32>(),
    ) {
        let mut m = StructureMutator::new(4096);
        let mut bytes = SeededMutator::new(0);
        let mut data = vec![0u8; 4096];
        let mut size = start.encode(&mut data).unwrap();

        for round in 0..rounds {
            bytes.reseed(rng_seed.wrapping_add(round as u32));
            let n = m.mutate(&mut data, size, 4096, &mut bytes, |_| true);
            if n > 0 {
                prop_assert!(ParamSet::decode(&data[..n]).is_ok());
                size = n;
            }
        }
    }

    #[test]
    fn mutator_never_writes_past_max_size(
        input in prop::collection::vec(any::<u8>(), 0..1500),
        max_size in 0usize..2048,
        rng_seed in any::<u32>(),
    ) {
        const GUARD: u8 = 0xa5;
        let mut m = StructureMutator::new(4096);
        let mut bytes = SeededMutator::new(u64::from(rng_seed));
        let mut data = vec![GUARD; 4096];
        let size = input.len().min(max_size);
        data[..size].copy_from_slice(&input[..size]);

        let n = m.mutate(&mut data, size, max_size, &mut bytes, |_| true);
        prop_assert!(n <= max_size);
        prop_assert!(data[max_size..].iter().all(|&b| b == GUARD));
    }
}

#[test]
fn full_capacity_fields_roundtrip() {
    let p = ParamSet {
        cdh: BoundedBytes::from_slice(&[0xff; CDH_LEN]).unwrap(),
        rp_id: BoundedText::from_bytes(&[b'x'; MAX_STR - 1]).unwrap(),
        authdata: BoundedBytes::from_slice(&[0x5a; MAX_BLOB]).unwrap(),
        ..ParamSet::default()
    };
    let bytes = p.to_vec().unwrap();
    assert_eq!(ParamSet::decode(&bytes).unwrap(), p);
}

#[test]
fn canonical_seed_roundtrip() {
    let bytes = seed::canonical().to_vec().unwrap();
    assert_eq!(bytes.len(), CANONICAL_ENCODED_LEN);
    assert_eq!(ParamSet::decode(&bytes).unwrap(), seed::canonical());
}

#[test]
fn canonical_seed_header() {
    let bytes = seed::canonical().to_vec().unwrap();
    // Type true, then the 32-byte client data hash, then the rp id length.
    assert_eq!(hex::encode(&bytes[..8]), "0101022000f96457");
    assert_eq!(hex::encode(&bytes[37..43]), "0309006c6f63");
    // Format selector closes the record.
    assert_eq!(hex::encode(&bytes[bytes.len() - 2..]), "0b01");
}
