use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reservation record: who reserved which gift, and when.
///
/// `nome` is a free-text display name, not an account, so several records may
/// share it. `presente_nome` is a denormalized copy of the gift's name at the
/// time of reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Millisecond timestamp token, unique within the person list.
    pub id: String,
    pub nome: String,
    pub presente_id: String,
    pub presente_nome: String,
    pub data_reserva: DateTime<Utc>,
}

impl Person {
    /// Whether this record is `guest`'s reservation of `gift_id`.
    pub fn matches(&self, guest: &str, gift_id: &str) -> bool {
        self.presente_id == gift_id && same_guest(&self.nome, guest)
    }

    /// Derive a record id from `at` that is not already used in `existing`.
    pub fn next_id(existing: &[Person], at: DateTime<Utc>) -> String {
        let mut token = at.timestamp_millis();
        while existing.iter().any(|p| p.id == token.to_string()) {
            token += 1;
        }
        token.to_string()
    }
}

/// Guest names are display text, not accounts: two names refer to the same
/// guest when they are equal ignoring case.
pub fn same_guest(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str) -> Person {
        Person {
            id: id.to_string(),
            nome: "Ana Silva".to_string(),
            presente_id: "g1".to_string(),
            presente_nome: "Panela".to_string(),
            data_reserva: Utc::now(),
        }
    }

    #[test]
    fn next_id_skips_taken_tokens() {
        let now = Utc::now();
        let millis = now.timestamp_millis();
        let existing = vec![person(&millis.to_string()), person(&(millis + 1).to_string())];

        assert_eq!(Person::next_id(&existing, now), (millis + 2).to_string());
        assert_eq!(Person::next_id(&[], now), millis.to_string());
    }

    #[test]
    fn matches_requires_exact_gift_id() {
        let record = person("1");
        assert!(record.matches("ANA SILVA", "g1"));
        assert!(!record.matches("Ana Silva", "G1"));
        assert!(!record.matches("Ana", "g1"));
    }

    #[test]
    fn same_guest_ignores_case_but_not_spacing() {
        assert!(same_guest("ana silva", "Ana Silva"));
        assert!(same_guest("JOÃO", "joão"));
        assert!(!same_guest("Ana  Silva", "Ana Silva"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(person("1")).unwrap();
        assert!(value.get("presenteId").is_some());
        assert!(value.get("presenteNome").is_some());
        assert!(value.get("dataReserva").is_some());
    }
}
