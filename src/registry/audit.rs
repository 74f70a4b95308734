use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::models::{Gift, Person};

/// A record that breaks the invariants tying the gift list to the
/// reservation records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inconsistency {
    /// Two gifts share an id.
    DuplicateGiftId { gift_id: String },
    /// `reservado` is set but nobody is named.
    ReservedWithoutGuest { gift_id: String },
    /// A guest is named but `reservado` is not set.
    GuestWithoutReservation { gift_id: String, guest: String },
    /// The gift is reserved but no reservation record backs it.
    MissingReservationRecord { gift_id: String, guest: String },
    /// A reservation record points at a gift that does not exist.
    UnknownGift { person_id: String, gift_id: String },
    /// A reservation record's gift is free or held by someone else.
    NotReservedByGuest {
        person_id: String,
        gift_id: String,
        guest: String,
    },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGiftId { gift_id } => write!(f, "gift id {gift_id} appears more than once"),
            Self::ReservedWithoutGuest { gift_id } => {
                write!(f, "gift {gift_id} is reserved but names no guest")
            }
            Self::GuestWithoutReservation { gift_id, guest } => {
                write!(f, "gift {gift_id} names {guest} but is not reserved")
            }
            Self::MissingReservationRecord { gift_id, guest } => write!(
                f,
                "gift {gift_id} is reserved by {guest} but has no reservation record"
            ),
            Self::UnknownGift { person_id, gift_id } => write!(
                f,
                "reservation {person_id} points at unknown gift {gift_id}"
            ),
            Self::NotReservedByGuest {
                person_id,
                gift_id,
                guest,
            } => write!(
                f,
                "reservation {person_id} says {guest} holds gift {gift_id}, but the gift disagrees"
            ),
        }
    }
}

pub(super) fn check(gifts: &[Gift], people: &[Person]) -> Vec<Inconsistency> {
    let mut found = Vec::new();

    let mut seen = HashSet::new();
    for gift in gifts {
        if !seen.insert(gift.id.as_str()) {
            found.push(Inconsistency::DuplicateGiftId {
                gift_id: gift.id.clone(),
            });
        }

        match (gift.reservado, gift.reservado_por.as_deref()) {
            (true, None) => found.push(Inconsistency::ReservedWithoutGuest {
                gift_id: gift.id.clone(),
            }),
            (false, Some(guest)) => found.push(Inconsistency::GuestWithoutReservation {
                gift_id: gift.id.clone(),
                guest: guest.to_string(),
            }),
            (true, Some(guest)) => {
                if !people.iter().any(|p| p.matches(guest, &gift.id)) {
                    found.push(Inconsistency::MissingReservationRecord {
                        gift_id: gift.id.clone(),
                        guest: guest.to_string(),
                    });
                }
            }
            (false, None) => {}
        }
    }

    for person in people {
        match gifts.iter().find(|g| g.id == person.presente_id) {
            None => found.push(Inconsistency::UnknownGift {
                person_id: person.id.clone(),
                gift_id: person.presente_id.clone(),
            }),
            Some(gift) if !gift.is_reserved_by(&person.nome) => {
                found.push(Inconsistency::NotReservedByGuest {
                    person_id: person.id.clone(),
                    gift_id: person.presente_id.clone(),
                    guest: person.nome.clone(),
                })
            }
            Some(_) => {}
        }
    }

    found
}
