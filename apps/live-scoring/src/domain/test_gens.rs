// Proptest generators for domain types.
// Deliveries are generated as commands so they can be applied and journaled.

use proptest::prelude::*;

use crate::domain::commands::MatchCommand;
use crate::domain::rules::ExtraKind;

pub fn extra_kind() -> impl Strategy<Value = ExtraKind> {
    prop_oneof![
        Just(ExtraKind::Wide),
        Just(ExtraKind::NoBall),
        Just(ExtraKind::Bye),
        Just(ExtraKind::LegBye),
    ]
}

/// One delivery, weighted toward runs off the bat.
pub fn delivery() -> impl Strategy<Value = MatchCommand> {
    prop_oneof![
        6 => (0u8..=6).prop_map(|runs| MatchCommand::RecordRun { runs }),
        2 => extra_kind().prop_map(|kind| MatchCommand::RecordExtra { kind }),
        1 => Just(MatchCommand::RecordWicket),
    ]
}

pub fn deliveries(max: usize) -> impl Strategy<Value = Vec<MatchCommand>> {
    prop::collection::vec(delivery(), 0..max)
}
