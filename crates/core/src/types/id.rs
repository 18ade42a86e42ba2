//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Ids are stored on
//! disk as prefixed UUID strings (`pl-…`, `proj-…`, `owner-…`).

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `generate()` producing `<prefix>-<uuid v4>`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use roadmap_core::define_id;
/// define_id!(TeamId, "team");
/// define_id!(SprintId, "sprint");
///
/// let team_id = TeamId::generate();
/// assert!(team_id.as_str().starts_with("team-"));
///
/// // These are different types, so this won't compile:
/// // let _: TeamId = SprintId::generate();
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix placed in front of generated ids.
            pub const PREFIX: &'static str = $prefix;

            /// Generate a fresh random id.
            #[must_use]
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, $crate::uuid::Uuid::new_v4()))
            }

            /// Wrap an existing id value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the id and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Returns `true` if the id is empty or whitespace only.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductLineId, "pl");
define_id!(ProjectId, "proj");
define_id!(OwnerId, "owner");

impl OwnerId {
    /// Id of the reserved "unassigned" owner created by the owner migration.
    pub const DEFAULT: &'static str = "owner-default";

    /// The reserved default owner id.
    #[must_use]
    pub fn default_owner() -> Self {
        Self::new(Self::DEFAULT)
    }

    /// Returns `true` if this is the reserved default owner.
    #[must_use]
    pub fn is_default_owner(&self) -> bool {
        self.as_str() == Self::DEFAULT
    }
}
