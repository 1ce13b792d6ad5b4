//! # Routing Integration Flows
//!
//! Cut / loupe / ownership flows end-to-end through the dispatcher:
//! batch atomicity under rollback, swap-removal consistency, initializer
//! semantics, and the audit-log behavior of routing changes.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        env, init_tracing, test_sig, InitFacet, InitMarker, PingFacet, BUYER, DISPATCHER, OWNER,
    };
    use prism_dispatch::abi;
    use prism_dispatch::prelude::*;
    use prism_types::{Address, CutAction, Event, Selector};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;
    use std::sync::Arc;

    const PING_V1: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xB0, 0x01]);
    const PING_V2: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xB0, 0x02]);
    const INIT_ADDR: Address = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xB0, 0x03]);

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn setup() -> (Dispatcher, Arc<RecordingEventSink>) {
        init_tracing();
        let sink = Arc::new(RecordingEventSink::new());
        let dispatcher = Dispatcher::new(
            DispatcherConfig {
                address: DISPATCHER,
                owner: OWNER,
            },
            sink.clone(),
        )
        .expect("dispatcher construction");
        (dispatcher, sink)
    }

    fn ping_selector() -> Selector {
        abi::selector(test_sig::PING)
    }

    fn call_ping(dispatcher: &mut Dispatcher) -> Result<u64, DispatchError> {
        let (selector, payload) = abi::encode_call(test_sig::PING, &())?;
        let output = dispatcher.execute(env(BUYER), selector, payload.as_slice())?;
        abi::decode_ret(&output)
    }

    /// Installs ping v1 and routes its selector.
    fn add_ping_v1(dispatcher: &mut Dispatcher) {
        dispatcher
            .install_facet(PING_V1, Arc::new(PingFacet { reply: 1 }))
            .unwrap();
        dispatcher
            .cut(
                env(OWNER),
                vec![CutEntry::add(PING_V1, vec![ping_selector()])],
                None,
            )
            .unwrap();
    }

    // =============================================================================
    // CUT: ADD / REPLACE / REMOVE
    // =============================================================================

    #[test]
    fn test_add_routes_new_facet() {
        let (mut dispatcher, _sink) = setup();
        add_ping_v1(&mut dispatcher);

        assert_eq!(call_ping(&mut dispatcher).unwrap(), 1);
        assert_eq!(
            dispatcher.facet_address_of(env(BUYER), ping_selector()).unwrap(),
            PING_V1
        );
        assert!(dispatcher
            .facet_addresses(env(BUYER))
            .unwrap()
            .contains(&PING_V1));
    }

    #[test]
    fn test_failed_batch_applies_nothing() {
        let (mut dispatcher, sink) = setup();
        dispatcher
            .install_facet(PING_V1, Arc::new(PingFacet { reply: 1 }))
            .unwrap();
        dispatcher
            .install_facet(PING_V2, Arc::new(PingFacet { reply: 2 }))
            .unwrap();

        let before = dispatcher.facets(env(BUYER)).unwrap();

        // Second entry collides with the first: the whole batch must abort
        let err = dispatcher
            .cut(
                env(OWNER),
                vec![
                    CutEntry::add(PING_V1, vec![ping_selector()]),
                    CutEntry::add(PING_V2, vec![ping_selector()]),
                ],
                None,
            )
            .unwrap_err();
        assert!(matches!(err, DispatchError::DuplicateSelector { .. }));

        // Snapshot comparison: table identical to before the call
        assert_eq!(dispatcher.facets(env(BUYER)).unwrap(), before);
        assert_eq!(
            dispatcher.facet_address_of(env(BUYER), ping_selector()).unwrap(),
            Address::ZERO
        );
        assert!(sink.is_empty(), "failed cut must publish nothing");
    }

    #[test]
    fn test_replace_reroutes_selector() {
        let (mut dispatcher, _sink) = setup();
        add_ping_v1(&mut dispatcher);
        dispatcher
            .install_facet(PING_V2, Arc::new(PingFacet { reply: 2 }))
            .unwrap();

        dispatcher
            .cut(
                env(OWNER),
                vec![CutEntry::replace(PING_V2, vec![ping_selector()])],
                None,
            )
            .unwrap();

        assert_eq!(call_ping(&mut dispatcher).unwrap(), 2);
        // v1 lost its only selector and must vanish from the facet list
        let addresses = dispatcher.facet_addresses(env(BUYER)).unwrap();
        assert!(!addresses.contains(&PING_V1));
        assert!(addresses.contains(&PING_V2));
    }

    #[test]
    fn test_replace_with_same_facet_rejected() {
        let (mut dispatcher, _sink) = setup();
        add_ping_v1(&mut dispatcher);

        let err = dispatcher
            .cut(
                env(OWNER),
                vec![CutEntry::replace(PING_V1, vec![ping_selector()])],
                None,
            )
            .unwrap_err();
        assert!(matches!(err, DispatchError::RedundantReplace { .. }));
        // No state change
        assert_eq!(call_ping(&mut dispatcher).unwrap(), 1);
    }

    #[test]
    fn test_remove_unroutes_selector() {
        let (mut dispatcher, _sink) = setup();
        add_ping_v1(&mut dispatcher);

        dispatcher
            .cut(
                env(OWNER),
                vec![CutEntry::remove(vec![ping_selector()])],
                None,
            )
            .unwrap();

        let err = call_ping(&mut dispatcher).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownFunction { .. }));
        assert_eq!(
            dispatcher.facet_address_of(env(BUYER), ping_selector()).unwrap(),
            Address::ZERO
        );
        assert!(!dispatcher
            .facet_addresses(env(BUYER))
            .unwrap()
            .contains(&PING_V1));
    }

    #[test]
    fn test_remove_entry_must_not_name_a_facet() {
        let (mut dispatcher, _sink) = setup();
        add_ping_v1(&mut dispatcher);

        let mut entry = CutEntry::remove(vec![ping_selector()]);
        entry.facet = PING_V1;
        let err = dispatcher.cut(env(OWNER), vec![entry], None).unwrap_err();
        assert!(matches!(err, DispatchError::RemoveTargetMustBeEmpty { .. }));
        assert_eq!(call_ping(&mut dispatcher).unwrap(), 1);
    }

    #[test]
    fn test_cut_is_owner_only() {
        let (mut dispatcher, _sink) = setup();
        dispatcher
            .install_facet(PING_V1, Arc::new(PingFacet { reply: 1 }))
            .unwrap();

        let err = dispatcher
            .cut(
                env(BUYER),
                vec![CutEntry::add(PING_V1, vec![ping_selector()])],
                None,
            )
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotAuthorized { .. }));
    }

    #[test]
    fn test_add_requires_registered_code() {
        let (mut dispatcher, _sink) = setup();
        let err = dispatcher
            .cut(
                env(OWNER),
                vec![CutEntry::add(PING_V1, vec![ping_selector()])],
                None,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::NoCodeAtTarget { target } if target == PING_V1
        ));
    }

    // =============================================================================
    // CUT: INITIALIZER
    // =============================================================================

    #[test]
    fn test_initializer_runs_after_table_mutation() {
        let (mut dispatcher, sink) = setup();
        dispatcher
            .install_facet(PING_V1, Arc::new(PingFacet { reply: 1 }))
            .unwrap();
        dispatcher.install_facet(INIT_ADDR, Arc::new(InitFacet)).unwrap();

        dispatcher
            .cut(
                env(OWNER),
                vec![CutEntry::add(PING_V1, vec![ping_selector()])],
                Some(Initializer {
                    target: INIT_ADDR,
                    selector: abi::selector(test_sig::INIT_MARK),
                    args: abi::encode_args(&42u64).unwrap(),
                }),
            )
            .unwrap();

        assert_eq!(call_ping(&mut dispatcher).unwrap(), 1);
        assert_eq!(
            dispatcher.store().read(|m: &InitMarker| m.value),
            42,
            "initializer must have written its marker"
        );

        let events = sink.events();
        assert!(matches!(
            &events[0],
            Event::RoutingChanged { initializer: Some(target), .. } if *target == INIT_ADDR
        ));
    }

    #[test]
    fn test_initializer_failure_rolls_back_whole_cut() {
        let (mut dispatcher, sink) = setup();
        dispatcher
            .install_facet(PING_V1, Arc::new(PingFacet { reply: 1 }))
            .unwrap();
        dispatcher.install_facet(INIT_ADDR, Arc::new(InitFacet)).unwrap();

        let err = dispatcher
            .cut(
                env(OWNER),
                vec![CutEntry::add(PING_V1, vec![ping_selector()])],
                Some(Initializer {
                    target: INIT_ADDR,
                    selector: abi::selector(test_sig::INIT_FAIL),
                    args: abi::encode_args(&()).unwrap(),
                }),
            )
            .unwrap_err();
        assert!(matches!(err, DispatchError::InitializationFailed { .. }));

        // Already-applied table mutations are discarded with the call
        assert_eq!(
            dispatcher.facet_address_of(env(BUYER), ping_selector()).unwrap(),
            Address::ZERO
        );
        assert_eq!(dispatcher.store().read(|m: &InitMarker| m.value), 0);
        assert!(sink.is_empty(), "rolled-back cut must publish nothing");
    }

    // =============================================================================
    // SWAP-REMOVAL CONSISTENCY
    // =============================================================================

    #[test]
    fn test_swap_removal_leaves_consistent_positions() {
        let (mut dispatcher, _sink) = setup();
        dispatcher
            .install_facet(PING_V1, Arc::new(PingFacet { reply: 1 }))
            .unwrap();
        dispatcher
            .install_facet(PING_V2, Arc::new(PingFacet { reply: 2 }))
            .unwrap();

        // Route [A, B, S, C] to one facet and a sentinel to another
        let (a, b, s, c) = (
            Selector::new([0x10, 0, 0, 1]),
            Selector::new([0x10, 0, 0, 2]),
            Selector::new([0x10, 0, 0, 3]),
            Selector::new([0x10, 0, 0, 4]),
        );
        let other = Selector::new([0x20, 0, 0, 1]);
        dispatcher
            .cut(
                env(OWNER),
                vec![
                    CutEntry::add(PING_V1, vec![a, b, s, c]),
                    CutEntry::add(PING_V2, vec![other]),
                ],
                None,
            )
            .unwrap();

        dispatcher
            .cut(env(OWNER), vec![CutEntry::remove(vec![s])], None)
            .unwrap();

        // Remaining set is {A, B, C} in some order, positions consistent
        let remaining = dispatcher.facet_selectors(env(BUYER), PING_V1).unwrap();
        assert_eq!(remaining.len(), 3);
        for expected in [a, b, c] {
            assert!(remaining.contains(&expected));
        }
        dispatcher
            .store()
            .read(|table: &RouteTable| assert!(table_is_consistent(table)));

        // The other facet is undisturbed
        assert_eq!(
            dispatcher.facet_selectors(env(BUYER), PING_V2).unwrap(),
            vec![other]
        );
    }

    #[test]
    fn test_random_cut_sequences_stay_consistent() {
        let (mut dispatcher, _sink) = setup();
        dispatcher
            .install_facet(PING_V1, Arc::new(PingFacet { reply: 1 }))
            .unwrap();
        dispatcher
            .install_facet(PING_V2, Arc::new(PingFacet { reply: 2 }))
            .unwrap();

        let facet_pool = [PING_V1, PING_V2];
        let mut model: HashMap<Selector, Address> = HashMap::new();
        let mut rng = StdRng::seed_from_u64(0xFACE7);

        for round in 0u32..80 {
            let mapped: Vec<Selector> = model.keys().copied().collect();
            let remove_candidate = (!mapped.is_empty()).then(|| mapped[rng.gen_range(0..mapped.len())]);

            if remove_candidate.is_some() && rng.gen_bool(0.4) {
                let selector = remove_candidate.unwrap();
                dispatcher
                    .cut(env(OWNER), vec![CutEntry::remove(vec![selector])], None)
                    .unwrap();
                model.remove(&selector);
            } else {
                let selector = Selector::new([0x30, 0, (round >> 8) as u8, round as u8]);
                let facet = facet_pool[rng.gen_range(0..facet_pool.len())];
                dispatcher
                    .cut(env(OWNER), vec![CutEntry::add(facet, vec![selector])], None)
                    .unwrap();
                model.insert(selector, facet);
            }

            dispatcher
                .store()
                .read(|table: &RouteTable| assert!(table_is_consistent(table)));
        }

        // Final model agreement, including unmapped selectors
        for (selector, facet) in &model {
            assert_eq!(
                dispatcher.facet_address_of(env(BUYER), *selector).unwrap(),
                *facet
            );
        }
    }

    // =============================================================================
    // LOUPE & EVENTS
    // =============================================================================

    #[test]
    fn test_loupe_inventory_matches_per_facet_queries() {
        let (mut dispatcher, _sink) = setup();
        add_ping_v1(&mut dispatcher);

        let inventory = dispatcher.facets(env(BUYER)).unwrap();
        let addresses = dispatcher.facet_addresses(env(BUYER)).unwrap();
        assert_eq!(
            inventory.iter().map(|f| f.address).collect::<Vec<_>>(),
            addresses
        );
        for info in inventory {
            assert_eq!(
                dispatcher.facet_selectors(env(BUYER), info.address).unwrap(),
                info.selectors
            );
        }
    }

    #[test]
    fn test_cut_event_carries_full_batch() {
        let (mut dispatcher, sink) = setup();
        dispatcher
            .install_facet(PING_V1, Arc::new(PingFacet { reply: 1 }))
            .unwrap();

        dispatcher
            .cut(
                env(OWNER),
                vec![CutEntry::add(PING_V1, vec![ping_selector()])],
                None,
            )
            .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            Event::RoutingChanged { changes, initializer } => {
                assert_eq!(initializer, &None);
                assert_eq!(changes.len(), 1);
                assert_eq!(changes[0].facet, PING_V1);
                assert_eq!(changes[0].action, CutAction::Add);
                assert_eq!(changes[0].selectors, vec![ping_selector()]);
            }
            other => panic!("expected RoutingChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_control_transfer_revokes_old_owner() {
        let (mut dispatcher, sink) = setup();
        dispatcher
            .install_facet(PING_V1, Arc::new(PingFacet { reply: 1 }))
            .unwrap();

        let successor = Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xA0, 0xFF]);
        dispatcher.transfer_control(env(OWNER), successor).unwrap();
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, Event::OwnershipTransferred { .. })));

        let err = dispatcher
            .cut(
                env(OWNER),
                vec![CutEntry::add(PING_V1, vec![ping_selector()])],
                None,
            )
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotAuthorized { .. }));

        // The successor holds the rights now
        dispatcher
            .cut(
                env(successor),
                vec![CutEntry::add(PING_V1, vec![ping_selector()])],
                None,
            )
            .unwrap();
    }
}
