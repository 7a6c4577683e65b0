//! Shallow-merge support for setting groups.
//!
//! [`settings_group!`] declares a settings record together with its patch
//! type. The record's `Default` is its neutral configuration; the patch holds
//! one `Option` per field and `apply` overwrites exactly the fields that
//! are present. Nested values (vectors, records) are replaced whole, never
//! merged recursively.

/// Declare a settings record and its `<Name>Patch` counterpart.
///
/// ```ignore
/// settings_group! {
///     /// Doc for the record.
///     pub struct LightingSettings, patch LightingPatch {
///         /// Doc for the field.
///         pub sun_intensity: u8 = 50,
///     }
/// }
/// ```
macro_rules! settings_group {
    (
        $(#[$meta:meta])*
        pub struct $name:ident, patch $patch:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty = $default:expr,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )*
                }
            }
        }

        #[doc = concat!("Partial update for [`", stringify!($name), "`]; absent fields are left unchanged.")]
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        pub struct $patch {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $patch {
            /// `true` when the patch carries no fields at all.
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }
        }

        impl $name {
            /// Shallow-merge `patch` into `self`.
            pub fn apply(&mut self, patch: $patch) {
                $(
                    if let Some(value) = patch.$field {
                        self.$field = value;
                    }
                )*
            }

            /// Return a copy of `self` with `patch` applied.
            pub fn merged(&self, patch: $patch) -> Self {
                let mut next = self.clone();
                next.apply(patch);
                next
            }
        }
    };
}

pub(crate) use settings_group;
