// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

// Extractor de idioma: castellano por defecto, inglés si el cliente lo pide.
pub struct Locale(pub String);

impl Locale {
    pub fn castellano() -> Self {
        Locale("es".to_string())
    }

    pub fn es_ingles(&self) -> bool {
        self.0 == "en"
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let default_lang = "es".to_string();

        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first()
                    .map(|tag_string| {
                        // "es-AR" -> "es"; "en" -> "en"
                        tag_string.split('-').next().unwrap_or(tag_string).to_string()
                    })
            })
            .unwrap_or(default_lang);

        Ok(Locale(lang))
    }
}
