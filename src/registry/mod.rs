//! Reservation service coordinating the gift and person stores.

mod audit;
mod error;
mod name;

pub use audit::Inconsistency;
pub use error::{ErrorKind, RegistryError, Result};
pub use name::{GuestName, NameError, MAX_NAME_LEN, MIN_NAME_LEN};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::config::RegistryConfig;
use crate::models::*;
use crate::store::{GiftStore, PersonStore};

/// Result of a reservation attempt that reached the gift list.
#[derive(Debug, Clone, PartialEq)]
pub enum ReserveOutcome {
    /// The gift is now reserved by the requesting guest.
    Reserved(Gift),
    /// Someone already holds the gift. Nothing was written.
    AlreadyReserved(Gift),
}

impl ReserveOutcome {
    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved(_))
    }

    pub fn gift(&self) -> &Gift {
        match self {
            Self::Reserved(gift) | Self::AlreadyReserved(gift) => gift,
        }
    }
}

/// Reserve and cancel gifts on behalf of named guests.
///
/// Every mutation re-reads both snapshots from disk, applies the change in
/// memory and writes both files back. Mutations through the same `Registry`
/// (and its clones) are serialized, so two guests racing for one gift cannot
/// both win. Separate processes writing the same files are not coordinated.
///
/// The two files are written one after the other. If the second write fails
/// the first one stays applied and the stores disagree until an operator runs
/// [`Registry::audit`] and repairs them.
#[derive(Debug, Clone)]
pub struct Registry {
    gifts: GiftStore,
    people: PersonStore,
    write_lock: Arc<Mutex<()>>,
}

impl Registry {
    pub fn new(gifts: GiftStore, people: PersonStore) -> Self {
        Self {
            gifts,
            people,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(
            GiftStore::new(config.gifts_path()),
            PersonStore::new(config.people_path()),
        )
    }

    pub fn gift_store(&self) -> &GiftStore {
        &self.gifts
    }

    pub fn person_store(&self) -> &PersonStore {
        &self.people
    }

    /// Current gift list snapshot.
    pub fn gifts(&self) -> Result<Vec<Gift>> {
        Ok(self.gifts.load()?)
    }

    /// Current reservation records snapshot.
    pub fn people(&self) -> Result<Vec<Person>> {
        Ok(self.people.load()?)
    }

    /// Reserve `input.id_presente` for `input.nome_usuario`.
    pub fn reserve(&self, input: ReserveInput) -> Result<ReserveOutcome> {
        let gift_id = input
            .id_presente
            .filter(|id| !id.is_empty())
            .ok_or(RegistryError::MissingField("idPresente"))?;
        let raw_name = input
            .nome_usuario
            .filter(|name| !name.is_empty())
            .ok_or(RegistryError::MissingField("nomeUsuario"))?;
        let guest = GuestName::parse(&raw_name)?;

        let _guard = self.lock();
        let (mut gifts, mut people) = self.load_checked()?;

        let gift = gifts
            .iter_mut()
            .find(|g| g.id == gift_id)
            .ok_or_else(|| RegistryError::GiftNotFound(gift_id.clone()))?;

        if gift.reservado {
            tracing::warn!(
                gift_id = %gift.id,
                guest = %guest,
                "gift already reserved by {:?}",
                gift.reservado_por
            );
            return Ok(ReserveOutcome::AlreadyReserved(gift.clone()));
        }

        let now = Utc::now();
        gift.reserve(guest.as_str(), now);
        let reserved = gift.clone();

        let id = Person::next_id(&people, now);
        people.push(Person {
            id,
            nome: guest.into_inner(),
            presente_id: reserved.id.clone(),
            presente_nome: reserved.nome.clone(),
            data_reserva: now,
        });

        self.persist(&gifts, &people)?;

        tracing::info!(gift_id = %reserved.id, guest = ?reserved.reservado_por, "gift reserved");
        Ok(ReserveOutcome::Reserved(reserved))
    }

    /// Cancel `input.nome_usuario`'s reservation of `input.presente_id`.
    ///
    /// Returns the released gift, or `None` when the reservation pointed at a
    /// gift that no longer exists (the record is removed either way).
    pub fn cancel(&self, input: CancelInput) -> Result<Option<Gift>> {
        let guest = GuestName::parse(input.nome_usuario.as_deref().unwrap_or_default())?;
        let gift_id = input.presente_id.unwrap_or_default();

        let _guard = self.lock();
        let (mut gifts, mut people) = self.load_checked()?;

        let index = people
            .iter()
            .position(|p| p.matches(guest.as_str(), &gift_id))
            .ok_or(RegistryError::ReservationNotFound)?;
        let record = people.remove(index);

        let released = gifts
            .iter_mut()
            .find(|g| g.id == record.presente_id)
            .map(|gift| {
                gift.release();
                gift.clone()
            });
        if released.is_none() {
            tracing::warn!(
                gift_id = %record.presente_id,
                "reservation pointed at a gift missing from the list"
            );
        }

        self.persist(&gifts, &people)?;

        tracing::info!(gift_id = %record.presente_id, guest = %guest, "reservation cancelled");
        Ok(released)
    }

    /// Counters for `guest`: available gifts, gifts they hold, and how many
    /// of those are confirmed.
    pub fn summary(&self, guest: &str) -> Result<GuestSummary> {
        let guest = GuestName::parse(guest)?;
        let gifts = self.gifts.load()?;

        let mut summary = GuestSummary::default();
        for gift in &gifts {
            if !gift.reservado {
                summary.disponiveis += 1;
            } else if gift.is_reserved_by(guest.as_str()) {
                summary.reservados += 1;
                if gift.is_confirmed() {
                    summary.confirmados += 1;
                }
            }
        }
        Ok(summary)
    }

    /// Cross-check both stores and report every record that breaks the
    /// gift/person invariants. Read-only.
    pub fn audit(&self) -> Result<Vec<Inconsistency>> {
        let gifts = self.gifts.load()?;
        let people = self.people.load()?;
        Ok(audit::check(&gifts, &people))
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // Guards no data, poisoning is harmless.
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Load both snapshots, warning about every invariant they break.
    fn load_checked(&self) -> Result<(Vec<Gift>, Vec<Person>)> {
        let gifts = self.gifts.load()?;
        let people = self.people.load()?;
        for problem in audit::check(&gifts, &people) {
            tracing::warn!("inconsistent registry data: {}", problem);
        }
        Ok((gifts, people))
    }

    fn persist(&self, gifts: &[Gift], people: &[Person]) -> Result<()> {
        if let Err(e) = self.gifts.save(gifts) {
            tracing::error!("failed to save gift list: {}", e);
            return Err(e.into());
        }
        if let Err(e) = self.people.save(people) {
            tracing::error!(
                "failed to save reservation records, gift list already updated: {}",
                e
            );
            return Err(e.into());
        }
        Ok(())
    }
}
