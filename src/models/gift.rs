use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::person::same_guest;

/// An item on the registry that a guest can reserve.
///
/// Identity is `id`, unique within the gift list. A gift is reserved when
/// `reservado` is set, in which case `reservado_por` names the guest and
/// `data_reserva` records when it happened. Cancelling removes both fields
/// from the record entirely.
///
/// Keys the registry does not know about are kept in `extra` so that rewriting
/// a seeded file never drops data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: String,
    pub nome: String,
    pub categoria: GiftCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preco: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_options: Option<Vec<String>>,
    #[serde(default)]
    pub reservado: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservado_por: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_reserva: Option<DateTime<Utc>>,
    /// Shown by the presentation layer as "open to several guests". The
    /// record still holds a single `reservado_por`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permite_multiplos: Option<bool>,
    /// Set by the couple once a reserved gift has actually been delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmado: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Gift {
    /// Create an unreserved gift with no optional fields.
    pub fn new(id: impl Into<String>, nome: impl Into<String>, categoria: GiftCategory) -> Self {
        Self {
            id: id.into(),
            nome: nome.into(),
            categoria,
            preco: None,
            color_options: None,
            reservado: false,
            reservado_por: None,
            data_reserva: None,
            permite_multiplos: None,
            confirmado: None,
            extra: BTreeMap::new(),
        }
    }

    /// Mark the gift as reserved by `guest` at `at`.
    pub fn reserve(&mut self, guest: &str, at: DateTime<Utc>) {
        self.reservado = true;
        self.reservado_por = Some(guest.to_string());
        self.data_reserva = Some(at);
    }

    /// Return the gift to the available pool.
    pub fn release(&mut self) {
        self.reservado = false;
        self.reservado_por = None;
        self.data_reserva = None;
    }

    /// Whether the gift is reserved by `guest` (names compared case-insensitively).
    pub fn is_reserved_by(&self, guest: &str) -> bool {
        self.reservado
            && self
                .reservado_por
                .as_deref()
                .is_some_and(|name| same_guest(name, guest))
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmado.unwrap_or(false)
    }
}

/// Section of the registry a gift is listed under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GiftCategory {
    #[serde(rename = "cozinha")]
    Kitchen,
    #[serde(rename = "lavanderia")]
    Laundry,
    #[serde(rename = "quarto")]
    Bedroom,
    #[serde(rename = "utilidades domésticas")]
    Household,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn released_gift_serializes_without_reservation_fields() {
        let mut gift = Gift::new("g1", "Liquidificador", GiftCategory::Kitchen);
        gift.reserve("Ana Silva", Utc::now());
        gift.release();

        let value = serde_json::to_value(&gift).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object["reservado"], json!(false));
        assert!(!object.contains_key("reservadoPor"));
        assert!(!object.contains_key("dataReserva"));
    }

    #[test]
    fn unknown_keys_survive_a_rewrite() {
        let raw = json!({
            "id": "g7",
            "nome": "Jogo de toalhas",
            "categoria": "utilidades domésticas",
            "colorOptions": ["Branco", "Bege"],
            "imagem": "toalhas.png"
        });

        let gift: Gift = serde_json::from_value(raw).unwrap();
        assert_eq!(gift.categoria, GiftCategory::Household);
        assert!(!gift.reservado);
        assert_eq!(gift.color_options.as_deref().map(<[String]>::len), Some(2));

        let back = serde_json::to_value(&gift).unwrap();
        assert_eq!(back["imagem"], json!("toalhas.png"));
        assert_eq!(back["colorOptions"], json!(["Branco", "Bege"]));
    }

    #[test]
    fn rejects_unknown_category() {
        let raw = json!({ "id": "g1", "nome": "Sofá", "categoria": "sala" });
        assert!(serde_json::from_value::<Gift>(raw).is_err());
    }

    #[test]
    fn reserved_by_ignores_case() {
        let mut gift = Gift::new("g1", "Panela", GiftCategory::Kitchen);
        gift.reserve("Ana Silva", Utc::now());
        assert!(gift.is_reserved_by("ana silva"));
        assert!(!gift.is_reserved_by("Ana"));
    }
}
