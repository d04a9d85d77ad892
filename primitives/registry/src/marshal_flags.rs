//! Marshal flag propagation
//!
//! Client code sends method inputs and receives method outputs, so every input type
//! must be serializable and every output type deserializable. Encoding a message also
//! encodes its message-typed fields, so both capabilities spread from a model to the
//! models its fields reference, transitively.
//!
//! Propagation runs one frontier at a time: a model enters the next frontier only
//! when its flag flips from false to true. Each flag flips at most once per model,
//! which bounds the number of rounds by the number of models and makes cyclic field
//! graphs terminate.

use ir::Model;
use tracing::{debug, info};

use crate::{ApiContext, ModelId};

/// One of the two capability flags carried by a [`Model`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarshalFlag {
    /// `can_marshal`: the model is sent by the client
    Marshal,
    /// `can_unmarshal`: the model is received by the client
    Unmarshal,
}

impl MarshalFlag {
    /// Both flags, in the order they are propagated
    pub const ALL: [MarshalFlag; 2] = [MarshalFlag::Marshal, MarshalFlag::Unmarshal];

    /// Whether the flag is set on `model`
    pub fn is_set(self, model: &Model) -> bool {
        match self {
            MarshalFlag::Marshal => model.can_marshal,
            MarshalFlag::Unmarshal => model.can_unmarshal,
        }
    }

    /// Set the flag; returns `true` if it was previously clear
    fn set(self, model: &mut Model) -> bool {
        let slot = match self {
            MarshalFlag::Marshal => &mut model.can_marshal,
            MarshalFlag::Unmarshal => &mut model.can_unmarshal,
        };
        let changed = !*slot;
        *slot = true;
        changed
    }
}

impl ApiContext {
    /// Seed capability flags from service methods and propagate them along
    /// message-typed fields until a fixed point is reached.
    ///
    /// Method types and field types that do not name a registered model are skipped.
    /// Flags are only ever set, never cleared, so a second call changes nothing.
    pub fn apply_marshal_flags(&mut self) {
        let seeded = self.seed_from_services();
        let mut propagated = 0;
        for flag in MarshalFlag::ALL {
            propagated += self.propagate(flag);
        }
        info!(models = self.models.len(), seeded, propagated, "applied marshal flags");
    }

    fn seed_from_services(&mut self) -> usize {
        let mut seeds = Vec::new();
        for service in &self.services {
            for method in &service.methods {
                let ends = [
                    (&method.input_type, MarshalFlag::Marshal),
                    (&method.output_type, MarshalFlag::Unmarshal),
                ];
                for (type_name, flag) in ends {
                    match self.model_id(type_name) {
                        Some(id) => seeds.push((id, flag)),
                        None => debug!(
                            service = %service.full_name(),
                            method = %method.name,
                            type_name = %type_name,
                            "method type is not a registered model, skipping"
                        ),
                    }
                }
            }
        }

        let mut changed = 0;
        for (id, flag) in seeds {
            if flag.set(self.model_mut(id)) {
                changed += 1;
            }
        }
        changed
    }

    /// Spread `flag` from every model that has it; returns how many models gained it.
    fn propagate(&mut self, flag: MarshalFlag) -> usize {
        let mut frontier: Vec<ModelId> = (0..self.models.len())
            .map(ModelId)
            .filter(|&id| flag.is_set(self.model(id)))
            .collect();
        let mut marked = 0;

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for id in frontier {
                let children: Vec<ModelId> = self
                    .model(id)
                    .message_fields()
                    .filter_map(|field| self.model_id(&field.type_name))
                    .collect();
                for child in children {
                    if flag.set(self.model_mut(child)) {
                        debug!(
                            flag = ?flag,
                            model = %self.model(child).name,
                            via = %self.model(id).name,
                            "flag propagated"
                        );
                        marked += 1;
                        next.push(child);
                    }
                }
            }
            frontier = next;
        }

        marked
    }
}
