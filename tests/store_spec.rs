use gift_registry::models::*;
use gift_registry::store::{GiftStore, PersonStore, StoreError};
use speculate2::speculate;

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let gifts = GiftStore::new(dir.path().join("presentes.json"));
        let people = PersonStore::new(dir.path().join("pessoas.json"));
    }

    describe "load" {
        it "returns an empty list when the file does not exist" {
            assert!(gifts.load().expect("Load failed").is_empty());
            assert!(people.load().expect("Load failed").is_empty());
        }

        it "returns an empty list for a blank file" {
            std::fs::write(gifts.path(), "  \n").expect("Write failed");
            assert!(gifts.load().expect("Load failed").is_empty());
        }

        it "reads a seeded gift list" {
            std::fs::write(
                gifts.path(),
                r#"[
                    {"id": "1", "nome": "Jogo de panelas", "categoria": "cozinha", "preco": "R$ 350,00"},
                    {"id": "2", "nome": "Varal", "categoria": "lavanderia", "reservado": true,
                     "reservadoPor": "Ana Silva", "dataReserva": "2024-05-01T12:30:00.000Z"}
                ]"#,
            ).expect("Write failed");

            let loaded = gifts.load().expect("Load failed");
            assert_eq!(loaded.len(), 2);
            assert_eq!(loaded[0].preco.as_deref(), Some("R$ 350,00"));
            assert!(!loaded[0].reservado);
            assert_eq!(loaded[1].categoria, GiftCategory::Laundry);
            assert_eq!(loaded[1].reservado_por.as_deref(), Some("Ana Silva"));
            assert!(loaded[1].data_reserva.is_some());
        }

        it "fails on malformed JSON" {
            std::fs::write(gifts.path(), "[{\"id\": ").expect("Write failed");
            assert!(matches!(gifts.load(), Err(StoreError::Parse { .. })));
        }

        it "fails on records missing required fields" {
            std::fs::write(people.path(), r#"[{"id": "1", "nome": "Ana"}]"#).expect("Write failed");
            assert!(matches!(people.load(), Err(StoreError::Parse { .. })));
        }
    }

    describe "save" {
        it "writes a snapshot that loads back unchanged" {
            let mut panela = Gift::new("1", "Panela de pressão", GiftCategory::Kitchen);
            panela.color_options = Some(vec!["Vermelho".to_string(), "Preto".to_string()]);
            let records = vec![panela, Gift::new("2", "Edredom", GiftCategory::Bedroom)];

            gifts.save(&records).expect("Save failed");

            assert_eq!(gifts.load().expect("Load failed"), records);
        }

        it "replaces the previous snapshot" {
            gifts.save(&[Gift::new("1", "Ferro de passar", GiftCategory::Laundry)]).expect("Save failed");
            gifts.save(&[]).expect("Save failed");

            assert!(gifts.load().expect("Load failed").is_empty());
        }

        it "pretty prints with two space indentation" {
            gifts.save(&[Gift::new("1", "Toalhas", GiftCategory::Household)]).expect("Save failed");

            let content = std::fs::read_to_string(gifts.path()).expect("Read failed");
            assert!(content.starts_with("[\n  {\n    \"id\": \"1\""));
            assert!(content.contains("\"categoria\": \"utilidades domésticas\""));
        }

        it "leaves no temporary file behind" {
            gifts.save(&[Gift::new("1", "Toalhas", GiftCategory::Household)]).expect("Save failed");

            let entries: Vec<_> = std::fs::read_dir(dir.path())
                .expect("Read dir failed")
                .map(|e| e.expect("Bad entry").file_name())
                .collect();
            assert_eq!(entries, vec![std::ffi::OsString::from("presentes.json")]);
        }

        it "keeps the previous snapshot when the temporary file cannot be written" {
            let original = vec![Gift::new("1", "Ferro de passar", GiftCategory::Laundry)];
            gifts.save(&original).expect("Save failed");
            let blocked = dir.path().join("presentes.json.tmp");
            std::fs::create_dir(&blocked).expect("Create dir failed");
            std::fs::write(blocked.join("conteudo"), "x").expect("Write failed");

            let result = gifts.save(&[]);

            assert!(matches!(result, Err(StoreError::Write { .. })));
            assert_eq!(gifts.load().expect("Load failed"), original);
        }

        it "creates missing parent directories" {
            let nested = PersonStore::new(dir.path().join("dados").join("pessoas.json"));
            nested.save(&[]).expect("Save failed");
            assert!(nested.path().exists());
        }

        it "reports a write failure when the target is a directory" {
            let target = dir.path().join("bloqueado");
            std::fs::create_dir(&target).expect("Create dir failed");
            std::fs::write(target.join("conteudo"), "x").expect("Write failed");

            let blocked = GiftStore::new(target);
            let result = blocked.save(&[]);
            assert!(matches!(result, Err(StoreError::Write { .. })));
            assert!(!dir.path().join("bloqueado.tmp").exists());
        }
    }
}
