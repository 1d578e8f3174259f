//! Property tests over random operation sequences
//!
//! A shadow table fed only by notifications must always match the registry's
//! net-id view, and the registry's views must stay consistent.

use std::collections::BTreeMap;

use netsync_foundation::{ControllerId, LocalId, NetId};
use netsync_storage::{ObjectData, ObjectRegistry, SyncListener};
use proptest::prelude::*;

#[derive(Default)]
struct Shadow {
    holders: BTreeMap<NetId, LocalId>,
}

impl SyncListener for Shadow {
    fn on_net_id_changed(&mut self, object: &ObjectData, previous: Option<NetId>) {
        if let Some(previous) = previous {
            if self.holders.get(&previous) == Some(&object.local_id()) {
                self.holders.remove(&previous);
            }
        }
        if let Some(net_id) = object.net_id() {
            self.holders.insert(net_id, object.local_id());
        }
    }
}

#[derive(Clone, Debug)]
enum Step {
    Spawn,
    Despawn(usize),
    Register(usize),
    Assign(usize, u32),
    Unregister(usize),
    Control(usize, Option<u64>),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::Spawn),
        1 => any::<usize>().prop_map(Step::Despawn),
        2 => any::<usize>().prop_map(Step::Register),
        2 => (any::<usize>(), 0u32..24).prop_map(|(n, net)| Step::Assign(n, net)),
        1 => any::<usize>().prop_map(Step::Unregister),
        1 => (any::<usize>(), proptest::option::of(0u64..8))
            .prop_map(|(n, c)| Step::Control(n, c)),
    ]
}

fn pick(live: &[LocalId], n: usize) -> Option<LocalId> {
    (!live.is_empty()).then(|| live[n % live.len()])
}

fn registry_holders(registry: &ObjectRegistry) -> BTreeMap<NetId, LocalId> {
    registry
        .objects_by_net_id()
        .enumerate()
        .filter_map(|(slot, object)| {
            let net_id = NetId(u32::try_from(slot).ok()?);
            Some((net_id, object?.local_id()))
        })
        .collect()
}

proptest! {
    #[test]
    fn notifications_mirror_registry(steps in proptest::collection::vec(step(), 1..120)) {
        let mut registry = ObjectRegistry::new();
        let mut shadow = Shadow::default();
        let mut live: Vec<LocalId> = Vec::new();
        let mut capacity = 0;

        for step in steps {
            match step {
                Step::Spawn => live.push(registry.allocate()),
                Step::Despawn(n) => {
                    if let Some(id) = pick(&live, n) {
                        registry.set_net_id(id, None, &mut shadow).unwrap();
                        registry.deallocate(id).unwrap();
                        live.retain(|other| *other != id);
                    }
                }
                Step::Register(n) => {
                    if let Some(id) = pick(&live, n) {
                        if registry.get(id).unwrap().net_id().is_none() {
                            let net_id = registry.generate_net_id();
                            prop_assert!(registry.get_net(net_id).is_none());
                            registry.set_net_id(id, Some(net_id), &mut shadow).unwrap();
                        }
                    }
                }
                Step::Assign(n, net) => {
                    if let Some(id) = pick(&live, n) {
                        registry.set_net_id(id, Some(NetId(net)), &mut shadow).unwrap();
                        prop_assert_eq!(registry.get_net(NetId(net)).unwrap().local_id(), id);
                    }
                }
                Step::Unregister(n) => {
                    if let Some(id) = pick(&live, n) {
                        let before = registry.get(id).unwrap().net_id();
                        registry.set_net_id(id, None, &mut shadow).unwrap();
                        prop_assert_eq!(registry.get(id).unwrap().net_id(), None);
                        if let Some(before) = before {
                            prop_assert!(registry.get_net(before).is_none());
                        }
                    }
                }
                Step::Control(n, controller) => {
                    if let Some(id) = pick(&live, n) {
                        registry
                            .get_mut(id)
                            .unwrap()
                            .set_controller(controller.map(ControllerId));
                        registry.notify_controller_changed(id).unwrap();
                    }
                }
            }

            prop_assert!(registry.check_consistency().is_ok());
            prop_assert_eq!(&shadow.holders, &registry_holders(&registry));
            prop_assert!(registry.net_id_capacity() >= capacity);
            capacity = registry.net_id_capacity();

            for object in registry.iter() {
                let indexed = registry
                    .controller_objects()
                    .any(|other| other.local_id() == object.local_id());
                prop_assert_eq!(indexed, object.controller().is_some());
            }
        }
    }
}
