//! The closed set of primitive ACTs and their canonical slot schemas.
//!
//! `primitives!` expands one declaration per primitive into the
//! [`Primitive`] tag, a typed record holding that primitive's slots, and the
//! [`SlotRecord`] sum type over all records. Slot access by name goes through
//! the record so the iteration order always follows the schema order.

use std::fmt;
use std::str::FromStr;

use crate::node::Filler;
use crate::state::StateType;

macro_rules! primitives {
    ($(
        $(#[$meta:meta])*
        $variant:ident($record:ident) => $label:literal, $desc:literal { $($slot:ident),+ $(,)? }
    )+) => {
        /// Primitive ACT identity.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Primitive {
            $( $(#[$meta])* $variant, )+
        }

        impl Primitive {
            /// Every primitive, in declaration order.
            pub const ALL: &'static [Primitive] = &[$(Primitive::$variant),+];

            /// The label an ACT of this primitive carries (used as rule key).
            pub fn label(self) -> &'static str {
                match self {
                    $(Primitive::$variant => $label,)+
                }
            }

            /// Short human description of the primitive.
            pub fn description(self) -> &'static str {
                match self {
                    $(Primitive::$variant => $desc,)+
                }
            }

            /// Canonical slot names in schema order.
            pub fn slot_names(self) -> &'static [&'static str] {
                match self {
                    $(Primitive::$variant => &[$(stringify!($slot)),+],)+
                }
            }

            /// A record with every canonical slot unfilled.
            pub fn empty_slots(self) -> SlotRecord {
                match self {
                    $(Primitive::$variant => SlotRecord::$variant($record::default()),)+
                }
            }
        }

        $(
            #[doc = concat!("Canonical slots of ", $label, " (", $desc, ").")]
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct $record {
                $(pub $slot: Option<Filler>,)+
            }

            impl $record {
                fn slot(&self, name: &str) -> Option<&Option<Filler>> {
                    match name {
                        $(stringify!($slot) => Some(&self.$slot),)+
                        _ => None,
                    }
                }

                fn slot_mut(&mut self, name: &str) -> Option<&mut Option<Filler>> {
                    match name {
                        $(stringify!($slot) => Some(&mut self.$slot),)+
                        _ => None,
                    }
                }
            }
        )+

        /// Typed canonical slots, tagged by primitive.
        #[derive(Debug, Clone, PartialEq)]
        pub enum SlotRecord {
            $($variant($record),)+
        }

        impl SlotRecord {
            pub fn primitive(&self) -> Primitive {
                match self {
                    $(SlotRecord::$variant(_) => Primitive::$variant,)+
                }
            }

            /// `None` when `name` is not a canonical slot; `Some(None)` when it
            /// is canonical but unfilled.
            pub fn get(&self, name: &str) -> Option<&Option<Filler>> {
                match self {
                    $(SlotRecord::$variant(record) => record.slot(name),)+
                }
            }

            pub fn get_mut(&mut self, name: &str) -> Option<&mut Option<Filler>> {
                match self {
                    $(SlotRecord::$variant(record) => record.slot_mut(name),)+
                }
            }
        }
    };
}

primitives! {
    /// Transfer of ownership, possession or control.
    Atrans(AtransSlots) => "ATRANS", "transfer of ownership" { agent, object, recipient }
    /// Transfer of physical location.
    Ptrans(PtransSlots) => "PTRANS", "physical transfer" { agent, object }
    /// Application of physical force.
    Propel(PropelSlots) => "PROPEL", "apply force" { agent, object, force, direction }
    /// Transfer of information.
    Mtrans(MtransSlots) => "MTRANS", "transfer of information" { sender, receiver, content }
    /// Construction of new information from old.
    Mbuild(MbuildSlots) => "MBUILD", "mental construction" { builder, content, source }
    Ingest(IngestSlots) => "INGEST", "consume/taking into oneself" { agent, consumed }
    Expel(ExpelSlots) => "EXPEL", "expel something out of oneself" { agent, object }
    Speak(SpeakSlots) => "SPEAK", "verbal output" { speaker, utterance }
    Attend(AttendSlots) => "ATTEND", "focus attention" { agent, focus }
    Grasp(GraspSlots) => "GRASP", "take hold of" { agent, object }
    /// Movement of a body part by its owner.
    Move(MoveSlots) => "MOVE", "move body part" { agent, body_part }
    Do(DoSlots) => "DO", "generic action" { agent, object }
    /// Placeholder for an action whose primitive is not yet known.
    ActGeneric(ActGenericSlots) => "ACT", "abstract action" { agent, recipient, instrument }
    Cause(CauseSlots) => "CAUSE", "causative action" { agent, effect }
}

impl Primitive {
    /// The state dimension this primitive conventionally changes.
    pub fn characteristic_state_type(self) -> Option<StateType> {
        match self {
            Primitive::Atrans => Some(StateType::Ownership),
            Primitive::Ptrans | Primitive::Expel => Some(StateType::Location),
            Primitive::Propel | Primitive::Move => Some(StateType::Physical),
            Primitive::Mtrans | Primitive::Mbuild => Some(StateType::Mental),
            Primitive::Ingest => Some(StateType::Internal),
            Primitive::Grasp => Some(StateType::Control),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Primitive {
    type Err = String;

    /// Accepts the ACT label (case-insensitive), plus `ACT_GENERIC`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if upper == "ACT_GENERIC" {
            return Ok(Primitive::ActGeneric);
        }
        Primitive::ALL
            .iter()
            .copied()
            .find(|p| p.label() == upper)
            .ok_or_else(|| format!("unknown primitive ACT: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_match_the_primitive_table() {
        let expected: &[(Primitive, &[&str])] = &[
            (Primitive::Atrans, &["agent", "object", "recipient"]),
            (Primitive::Ptrans, &["agent", "object"]),
            (Primitive::Propel, &["agent", "object", "force", "direction"]),
            (Primitive::Mtrans, &["sender", "receiver", "content"]),
            (Primitive::Mbuild, &["builder", "content", "source"]),
            (Primitive::Ingest, &["agent", "consumed"]),
            (Primitive::Expel, &["agent", "object"]),
            (Primitive::Speak, &["speaker", "utterance"]),
            (Primitive::Attend, &["agent", "focus"]),
            (Primitive::Grasp, &["agent", "object"]),
            (Primitive::Move, &["agent", "body_part"]),
            (Primitive::Do, &["agent", "object"]),
            (Primitive::ActGeneric, &["agent", "recipient", "instrument"]),
            (Primitive::Cause, &["agent", "effect"]),
        ];
        assert_eq!(expected.len(), Primitive::ALL.len());
        for (primitive, slots) in expected {
            assert_eq!(primitive.slot_names(), *slots, "{primitive}");
        }
    }

    #[test]
    fn empty_record_has_every_slot_unfilled() {
        for &primitive in Primitive::ALL {
            let record = primitive.empty_slots();
            assert_eq!(record.primitive(), primitive);
            for name in primitive.slot_names() {
                assert_eq!(record.get(name), Some(&None), "{primitive}.{name}");
            }
            assert_eq!(record.get("to_location"), None);
        }
    }

    #[test]
    fn record_slots_are_addressable_by_name() {
        let mut record = Primitive::Move.empty_slots();
        *record.get_mut("body_part").unwrap() = Some(Filler::from("hand"));
        match &record {
            SlotRecord::Move(slots) => assert_eq!(slots.body_part, Some(Filler::from("hand"))),
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn labels_parse_back() {
        assert_eq!("ptrans".parse::<Primitive>(), Ok(Primitive::Ptrans));
        assert_eq!("ACT".parse::<Primitive>(), Ok(Primitive::ActGeneric));
        assert_eq!("ACT_GENERIC".parse::<Primitive>(), Ok(Primitive::ActGeneric));
        assert!("WALK".parse::<Primitive>().is_err());
    }

    #[test]
    fn characteristic_dimensions() {
        assert_eq!(
            Primitive::Grasp.characteristic_state_type(),
            Some(StateType::Control)
        );
        assert_eq!(Primitive::Speak.characteristic_state_type(), None);
    }
}
