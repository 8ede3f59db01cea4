//! Custom profile fields and their definitions.

use crate::{Error, SharedString};
use profile_fields_core::extension::TomlTableExt;
use std::{collections::BTreeMap, fmt, str::FromStr};
use toml::Table;

/// Kind of a custom profile field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FieldKind {
    /// Short text.
    #[default]
    ShortText,
    /// Long text.
    LongText,
    /// List of options.
    Select,
    /// Date picker.
    Date,
    /// Link.
    Url,
    /// Person picker.
    User,
    /// External account.
    ExternalAccount,
    /// Pronouns.
    Pronouns,
}

impl FieldKind {
    /// Returns the kind corresponding to the wire type id.
    pub fn from_type_id(type_id: u8) -> Option<Self> {
        let kind = match type_id {
            1 => Self::ShortText,
            2 => Self::LongText,
            3 => Self::Select,
            4 => Self::Date,
            5 => Self::Url,
            6 => Self::User,
            7 => Self::ExternalAccount,
            8 => Self::Pronouns,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the wire type id.
    pub fn type_id(self) -> u8 {
        match self {
            Self::ShortText => 1,
            Self::LongText => 2,
            Self::Select => 3,
            Self::Date => 4,
            Self::Url => 5,
            Self::User => 6,
            Self::ExternalAccount => 7,
            Self::Pronouns => 8,
        }
    }

    /// Returns `self` as `&'static str`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortText => "short-text",
            Self::LongText => "long-text",
            Self::Select => "select",
            Self::Date => "date",
            Self::Url => "url",
            Self::User => "user",
            Self::ExternalAccount => "external-account",
            Self::Pronouns => "pronouns",
        }
    }

    /// Returns `true` if the field is edited with a date picker.
    #[inline]
    pub fn is_date(self) -> bool {
        matches!(self, Self::Date)
    }
}

impl fmt::Display for FieldKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "short-text" => Self::ShortText,
            "long-text" => Self::LongText,
            "select" => Self::Select,
            "date" => Self::Date,
            "url" => Self::Url,
            "user" => Self::User,
            "external-account" => Self::ExternalAccount,
            "pronouns" => Self::Pronouns,
            _ => return Err(Error::new(format!("unknown profile field kind `{s}`"))),
        };
        Ok(kind)
    }
}

/// A custom profile field being edited in the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomProfileField {
    /// Field ID.
    id: i64,
    /// Field kind.
    kind: FieldKind,
    /// Raw value.
    value: String,
}

impl CustomProfileField {
    /// Creates a new instance.
    #[inline]
    pub fn new(id: i64, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            value: value.into(),
        }
    }

    /// Returns the field ID.
    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the field kind.
    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the raw value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value with a user edit.
    #[inline]
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// Definition of a custom profile field in the realm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Field ID.
    id: i64,
    /// Display name.
    name: SharedString,
    /// Field kind.
    kind: FieldKind,
    /// Hint shown below the input.
    hint: SharedString,
}

impl FieldDefinition {
    /// Creates a new instance.
    pub fn new(id: i64, name: impl Into<SharedString>, kind: FieldKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            hint: SharedString::Borrowed(""),
        }
    }

    /// Sets the hint.
    #[inline]
    pub fn with_hint(mut self, hint: impl Into<SharedString>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Parses a definition from a `[[profile-fields.field]]` table.
    ///
    /// The kind is read from `kind` as a name or from `type` as a wire type id.
    pub fn try_from_table(table: &Table) -> Result<Self, Error> {
        let id = table
            .get_i64("id")
            .ok_or_else(|| Error::new("the `id` of a profile field should be an integer"))?;
        let kind = if let Some(kind) = table.get_str("kind") {
            kind.parse()?
        } else {
            table
                .get_u64("type")
                .and_then(|type_id| u8::try_from(type_id).ok())
                .and_then(FieldKind::from_type_id)
                .ok_or_else(|| Error::new(format!("the profile field `{id}` has no valid kind")))?
        };
        let name = table.get_str("name").unwrap_or_default().to_owned();
        let hint = table.get_str("hint").unwrap_or_default().to_owned();
        Ok(Self::new(id, name, kind).with_hint(hint))
    }

    /// Returns the field ID.
    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field kind.
    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the hint.
    #[inline]
    pub fn hint(&self) -> &str {
        &self.hint
    }
}

/// A registry of the field definitions in a settings form.
#[derive(Debug, Default, Clone)]
pub struct FieldRegistry {
    definitions: BTreeMap<i64, FieldDefinition>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the definitions from the `[profile-fields]` table of the config.
    pub fn from_config(config: &Table) -> Result<Self, Error> {
        let mut registry = Self::new();
        if let Some(config) = config.get_table("profile-fields") {
            for table in config.get_tables("field") {
                registry.register(FieldDefinition::try_from_table(table)?);
            }
        }
        Ok(registry)
    }

    /// Registers a definition, returning the previous one with the same ID.
    pub fn register(&mut self, definition: FieldDefinition) -> Option<FieldDefinition> {
        self.definitions.insert(definition.id(), definition)
    }

    /// Returns the definition for the field ID.
    #[inline]
    pub fn get(&self, id: i64) -> Option<&FieldDefinition> {
        self.definitions.get(&id)
    }

    /// Returns an iterator over the definitions ordered by ID.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.definitions.values()
    }

    /// Resolves a raw edit into a [`CustomProfileField`].
    pub fn resolve(&self, id: i64, value: impl Into<String>) -> Result<CustomProfileField, Error> {
        let definition = self
            .get(id)
            .ok_or_else(|| Error::new(format!("unknown profile field `{id}`")))?;
        Ok(CustomProfileField::new(id, definition.kind(), value))
    }
}
