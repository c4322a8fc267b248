//! Message dictionaries for user-facing text
//!
//! Spanish is the primary language of the portal; English is the fallback
//! for integrations. Messages are looked up by [`MessageKey`] so error
//! responses can be produced once and localized per request.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Pick the best supported locale from an `Accept-Language` header value.
    ///
    /// Tags are ordered by quality value (ties keep header order); the first
    /// supported primary language wins.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut tags: Vec<(f32, usize, &str)> = header
            .split(',')
            .enumerate()
            .filter_map(|(idx, part)| {
                let mut pieces = part.trim().split(';');
                let tag = pieces.next()?.trim();
                if tag.is_empty() {
                    return None;
                }
                let quality = pieces
                    .find_map(|p| p.trim().strip_prefix("q="))
                    .and_then(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);
                Some((quality, idx, tag))
            })
            .collect();

        tags.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

        tags.into_iter()
            .filter(|(q, _, _)| *q > 0.0)
            .find_map(|(_, _, tag)| tag.parse().ok())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let primary = s.split(['-', '_']).next().unwrap_or("").to_lowercase();
        match primary.as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys of every user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    MissingToken,
    InvalidToken,
    SessionExpired,
    InvalidCredentials,
    ValidationFailed,
    BadRequest,
    Forbidden,
    NotFound,
    Conflict,
    BackendUnavailable,
    BackendTimeout,
    InternalError,
    LoggedIn,
    LoggedOut,
    Created,
    Updated,
    Deleted,
}

lazy_static! {
    static ref SPANISH: HashMap<MessageKey, &'static str> = {
        use MessageKey::*;
        HashMap::from([
            (MissingToken, "Falta el token de autorización"),
            (InvalidToken, "Token inválido o expirado"),
            (SessionExpired, "La sesión ha expirado, inicie sesión nuevamente"),
            (InvalidCredentials, "Credenciales inválidas"),
            (ValidationFailed, "Los datos enviados no son válidos"),
            (BadRequest, "Solicitud inválida"),
            (Forbidden, "Acceso denegado"),
            (NotFound, "Recurso no encontrado"),
            (Conflict, "El recurso ya existe"),
            (BackendUnavailable, "No se pudo conectar con el servidor"),
            (BackendTimeout, "El servidor tardó demasiado en responder"),
            (InternalError, "Ocurrió un error inesperado"),
            (LoggedIn, "Sesión iniciada correctamente"),
            (LoggedOut, "Sesión cerrada correctamente"),
            (Created, "creado correctamente"),
            (Updated, "actualizado correctamente"),
            (Deleted, "eliminado correctamente"),
        ])
    };
    static ref ENGLISH: HashMap<MessageKey, &'static str> = {
        use MessageKey::*;
        HashMap::from([
            (MissingToken, "Missing authorization token"),
            (InvalidToken, "Invalid or expired token"),
            (SessionExpired, "Session expired, please sign in again"),
            (InvalidCredentials, "Invalid credentials"),
            (ValidationFailed, "The submitted data is invalid"),
            (BadRequest, "Invalid request"),
            (Forbidden, "Access denied"),
            (NotFound, "Resource not found"),
            (Conflict, "Resource already exists"),
            (BackendUnavailable, "Could not reach the server"),
            (BackendTimeout, "The server took too long to respond"),
            (InternalError, "An unexpected error occurred"),
            (LoggedIn, "Signed in successfully"),
            (LoggedOut, "Signed out successfully"),
            (Created, "created successfully"),
            (Updated, "updated successfully"),
            (Deleted, "deleted successfully"),
        ])
    };
}

/// Translate a message key
pub fn t(locale: Locale, key: MessageKey) -> &'static str {
    let dictionary = match locale {
        Locale::Es => &*SPANISH,
        Locale::En => &*ENGLISH,
    };
    dictionary
        .get(&key)
        .or_else(|| ENGLISH.get(&key))
        .copied()
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: &[MessageKey] = &[
        MessageKey::MissingToken,
        MessageKey::InvalidToken,
        MessageKey::SessionExpired,
        MessageKey::InvalidCredentials,
        MessageKey::ValidationFailed,
        MessageKey::BadRequest,
        MessageKey::Forbidden,
        MessageKey::NotFound,
        MessageKey::Conflict,
        MessageKey::BackendUnavailable,
        MessageKey::BackendTimeout,
        MessageKey::InternalError,
        MessageKey::LoggedIn,
        MessageKey::LoggedOut,
        MessageKey::Created,
        MessageKey::Updated,
        MessageKey::Deleted,
    ];

    #[test]
    fn test_every_key_has_both_translations() {
        for key in ALL_KEYS {
            assert!(!t(Locale::Es, *key).is_empty(), "missing es for {:?}", key);
            assert!(!t(Locale::En, *key).is_empty(), "missing en for {:?}", key);
        }
    }

    #[test]
    fn test_translation_lookup() {
        assert_eq!(
            t(Locale::Es, MessageKey::MissingToken),
            "Falta el token de autorización"
        );
        assert_eq!(
            t(Locale::En, MessageKey::MissingToken),
            "Missing authorization token"
        );
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("es-AR".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("EN_us".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_accept_language_picks_highest_quality() {
        assert_eq!(
            Locale::from_accept_language("fr-FR, en;q=0.8, es;q=0.9"),
            Some(Locale::Es)
        );
        assert_eq!(
            Locale::from_accept_language("en-GB,en;q=0.9"),
            Some(Locale::En)
        );
    }

    #[test]
    fn test_accept_language_unsupported_or_refused() {
        assert_eq!(Locale::from_accept_language("fr, de"), None);
        assert_eq!(Locale::from_accept_language("en;q=0"), None);
        assert_eq!(Locale::from_accept_language(""), None);
    }
}
