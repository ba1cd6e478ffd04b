// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

pub const DEFAULT_LANG: &str = "en";

// Catálogos embutidos no binário: não dependem do diretório de execução.
const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("pt", include_str!("../../locales/pt.json")),
];

/// Armazena as mensagens traduzidas, indexadas por idioma e chave.
#[derive(Clone, Debug)]
pub struct I18nStore {
    catalogs: Arc<HashMap<String, HashMap<String, String>>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)
                .map_err(|e| anyhow::anyhow!("Catálogo '{}' inválido: {}", lang, e))?;
            catalogs.insert(lang.to_string(), messages);
        }
        Ok(Self { catalogs: Arc::new(catalogs) })
    }

    /// Traduz `key` para `lang`, com fallback para o inglês e, por fim, para a própria chave.
    /// Os parâmetros substituem os marcadores `{nome}` da mensagem.
    pub fn translate(&self, lang: &str, key: &str, args: &[(&str, String)]) -> String {
        let template = self
            .catalogs
            .get(lang)
            .and_then(|messages| messages.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|m| m.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string());

        args.iter().fold(template, |message, (name, value)| {
            message.replace(&format!("{{{}}}", name), value)
        })
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.catalogs.contains_key(lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_share_the_same_keys() {
        let store = I18nStore::load().unwrap();
        let en = &store.catalogs["en"];
        let pt = &store.catalogs["pt"];
        for key in en.keys() {
            assert!(pt.contains_key(key), "chave ausente em pt: {key}");
        }
        assert_eq!(en.len(), pt.len());
    }

    #[test]
    fn translate_fills_placeholders() {
        let store = I18nStore::load().unwrap();
        let msg = store.translate(
            "en",
            "barcode.already_marked",
            &[
                ("name", "John Doe".to_string()),
                ("date", "2025-06-01".to_string()),
                ("status", "Present".to_string()),
            ],
        );
        assert_eq!(msg, "Attendance already marked for John Doe on 2025-06-01 (status: Present).");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::load().unwrap();
        assert!(!store.supports("de"));
        assert_eq!(
            store.translate("de", "barcode.not_found", &[]),
            "Employee not found or inactive."
        );
        assert_eq!(store.translate("pt", "chave.inexistente", &[]), "chave.inexistente");
    }
}
