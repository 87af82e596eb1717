use proptest::prelude::*;
use enumsafe::{EnumerationPolicy, IterTraversal, SafeEnumerable, SliceTraversal};

fn any_policy() -> impl Strategy<Value = EnumerationPolicy> {
    prop_oneof![
        Just(EnumerationPolicy::Normal),
        Just(EnumerationPolicy::Safe),
        Just(EnumerationPolicy::Strict),
    ]
}

proptest! {
    #[test]
    fn normal_enumerators_never_share_position(
        items in proptest::collection::vec(any::<u32>(), 0..48),
        steps in proptest::collection::vec(0usize..3, 0..96),
    ) {
        let collection = SafeEnumerable::new(SliceTraversal::new(items.clone()), EnumerationPolicy::Normal);
        let mut enumerators: Vec<_> = (0..3)
            .map(|_| collection.request().expect("normal never fails"))
            .collect();
        let mut positions = [0usize; 3];

        // Random interleaving of advances across the three enumerators
        for which in steps {
            let advanced = enumerators[which].advance();
            prop_assert_eq!(advanced, positions[which] < items.len());
            if advanced {
                prop_assert_eq!(enumerators[which].current(), Some(&items[positions[which]]));
                positions[which] += 1;
            }
        }

        for (enumerator, &position) in enumerators.iter_mut().zip(positions.iter()) {
            let rest: Vec<u32> = enumerator.by_ref().collect();
            let start = position.min(items.len());
            prop_assert_eq!(&rest[..], &items[start..]);
        }
    }

    #[test]
    fn rewind_replays_the_same_sequence(
        items in proptest::collection::vec(any::<i64>(), 0..64),
        partial in 0usize..80,
        policy in any_policy(),
    ) {
        let collection = SafeEnumerable::new(SliceTraversal::new(items.clone()), policy);
        let mut enumerator = collection.request().expect("first request on origin succeeds");

        let first: Vec<i64> = enumerator.by_ref().collect();
        prop_assert_eq!(&first, &items);

        enumerator.rewind().expect("slices rewind");
        for _ in 0..partial {
            enumerator.advance();
        }
        enumerator.rewind().expect("slices rewind");

        let second: Vec<i64> = enumerator.by_ref().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn iterator_backed_collections_replay_after_release(
        len in 0u16..200,
        policy in any_policy(),
    ) {
        let collection = SafeEnumerable::new(IterTraversal::new(0..len), policy);

        let first: Vec<u16> = collection.request().expect("idle root").collect();
        let second: Vec<u16> = collection.request().expect("released root").collect();

        prop_assert_eq!(first.len(), usize::from(len));
        prop_assert_eq!(first, second);
    }
}
