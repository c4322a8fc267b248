//! Common types for domain models

use crate::i18n::Locale;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;
use utoipa::ToSchema;
use validator::Validate;

/// Identifier assigned by the backend's relational store
pub type EntityId = i64;

/// The nine club-management entities exposed through the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Club,
    User,
    Member,
    Sponsor,
    Payment,
    Role,
    Permission,
    Property,
    Activity,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Club,
        ResourceKind::User,
        ResourceKind::Member,
        ResourceKind::Sponsor,
        ResourceKind::Payment,
        ResourceKind::Role,
        ResourceKind::Permission,
        ResourceKind::Property,
        ResourceKind::Activity,
    ];

    /// URL path segment used by both the backend and the proxy
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Club => "clubs",
            ResourceKind::User => "users",
            ResourceKind::Member => "members",
            ResourceKind::Sponsor => "sponsors",
            ResourceKind::Payment => "payments",
            ResourceKind::Role => "roles",
            ResourceKind::Permission => "permissions",
            ResourceKind::Property => "properties",
            ResourceKind::Activity => "activities",
        }
    }

    fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Club => "club",
            ResourceKind::User => "user",
            ResourceKind::Member => "member",
            ResourceKind::Sponsor => "sponsor",
            ResourceKind::Payment => "payment",
            ResourceKind::Role => "role",
            ResourceKind::Permission => "permission",
            ResourceKind::Property => "property",
            ResourceKind::Activity => "activity",
        }
    }

    /// Human-readable entity name
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Es, ResourceKind::Club) => "Club",
            (Locale::Es, ResourceKind::User) => "Usuario",
            (Locale::Es, ResourceKind::Member) => "Socio",
            (Locale::Es, ResourceKind::Sponsor) => "Patrocinador",
            (Locale::Es, ResourceKind::Payment) => "Pago",
            (Locale::Es, ResourceKind::Role) => "Rol",
            (Locale::Es, ResourceKind::Permission) => "Permiso",
            (Locale::Es, ResourceKind::Property) => "Instalación",
            (Locale::Es, ResourceKind::Activity) => "Actividad",
            (Locale::En, ResourceKind::Club) => "Club",
            (Locale::En, ResourceKind::User) => "User",
            (Locale::En, ResourceKind::Member) => "Member",
            (Locale::En, ResourceKind::Sponsor) => "Sponsor",
            (Locale::En, ResourceKind::Payment) => "Payment",
            (Locale::En, ResourceKind::Role) => "Role",
            (Locale::En, ResourceKind::Permission) => "Permission",
            (Locale::En, ResourceKind::Property) => "Property",
            (Locale::En, ResourceKind::Activity) => "Activity",
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    /// Accepts the plural path segment or the singular name
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.path() == needle || kind.singular() == needle)
            .ok_or_else(|| format!("Unknown resource: {}", s))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A CRUD entity served by the backend under `/{KIND.path()}`.
///
/// Every entity follows the same pattern, so clients and proxy handlers are
/// written once and instantiated per entity.
pub trait Resource:
    Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static
{
    type Create: Serialize + DeserializeOwned + Validate + Debug + Send + Sync + 'static;
    type Update: Serialize + DeserializeOwned + Validate + Debug + Send + Sync + 'static;

    const KIND: ResourceKind;

    fn id(&self) -> EntityId;
}

/// List payload returned by the backend: either a bare array or `{ "data": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Wrapped { data: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Wrapped { data } => data,
            ListPayload::Plain(items) => items,
        }
    }
}

/// Single-record payload: either bare or `{ "data": {...} }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Plain(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Plain(item) => item,
        }
    }
}

lazy_static::lazy_static! {
    /// Loose international phone format: optional +, digits, spaces, dashes, parentheses
    pub static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9][0-9 ()\-]{5,19}$").unwrap();
    /// ISO-4217 currency code
    pub static ref CURRENCY_REGEX: regex::Regex = regex::Regex::new(r"^[A-Z]{3}$").unwrap();
}

/// Validate phone number format
pub(crate) fn validate_phone(phone: &str) -> Result<(), validator::ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_phone"))
    }
}

/// Validate currency code format
pub(crate) fn validate_currency(code: &str) -> Result<(), validator::ValidationError> {
    if CURRENCY_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_currency"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_parse_plural_and_singular() {
        assert_eq!("clubs".parse::<ResourceKind>().unwrap(), ResourceKind::Club);
        assert_eq!(
            "Property".parse::<ResourceKind>().unwrap(),
            ResourceKind::Property
        );
        assert_eq!(
            "activities".parse::<ResourceKind>().unwrap(),
            ResourceKind::Activity
        );
        assert!("teams".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_resource_paths_are_unique() {
        let mut paths: Vec<_> = ResourceKind::ALL.iter().map(|k| k.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), ResourceKind::ALL.len());
    }

    #[test]
    fn test_labels() {
        assert_eq!(ResourceKind::Member.label(Locale::Es), "Socio");
        assert_eq!(ResourceKind::Member.label(Locale::En), "Member");
    }

    #[test]
    fn test_list_payload_accepts_both_shapes() {
        let plain: ListPayload<i32> = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(plain.into_vec(), vec![1, 2, 3]);

        let wrapped: ListPayload<i32> =
            serde_json::from_str(r#"{"data":[4,5],"total":2}"#).unwrap();
        assert_eq!(wrapped.into_vec(), vec![4, 5]);
    }

    #[test]
    fn test_envelope_accepts_both_shapes() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Item {
            id: i64,
        }
        let plain: Envelope<Item> = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(plain.into_inner(), Item { id: 1 });
        let wrapped: Envelope<Item> = serde_json::from_str(r#"{"data":{"id":2}}"#).unwrap();
        assert_eq!(wrapped.into_inner(), Item { id: 2 });
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+54 11 5555-1234"));
        assert!(PHONE_REGEX.is_match("(011) 4444 2222"));
        assert!(!PHONE_REGEX.is_match("call me"));
        assert!(!PHONE_REGEX.is_match("123"));
    }

    #[test]
    fn test_currency_regex() {
        assert!(CURRENCY_REGEX.is_match("ARS"));
        assert!(!CURRENCY_REGEX.is_match("ars"));
        assert!(!CURRENCY_REGEX.is_match("EURO"));
    }
}
