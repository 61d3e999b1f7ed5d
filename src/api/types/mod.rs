//
//  pyramid-api
//  api/types/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Typed Records
//!
//! Hand-maintained mirrors of the vendor types the client sends and
//! receives. Field names follow Rust conventions; the wire names are
//! restored by `#[serde(rename_all = "camelCase")]`.
//!
//! Enumerations travel as bare integers. [`int_enum!`](crate::int_enum)
//! declares such an enum together with its integer (de)serialization.

mod enums;
mod objects;

pub use enums::*;
pub use objects::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type that can be wrapped into a record file.
///
/// `CLASS_NAME` is the vendor's type name, written into the `className`
/// field of a wrapped record and checked when unwrapping.
pub trait ApiRecord: Serialize + DeserializeOwned {
    const CLASS_NAME: &'static str;
}

/// Declares an enum whose values travel on the wire as integers.
///
/// Generates `value()`, `from_value()`, and `Serialize`/`Deserialize`
/// impls over `i64`. Unknown integers fail to deserialize.
///
/// ```rust
/// pyramid_api::int_enum! {
///     #[derive(Default)]
///     pub enum Access {
///         #[default]
///         None = 0,
///         Read = 1,
///     }
/// }
///
/// assert_eq!(Access::Read.value(), 1);
/// assert_eq!(Access::from_value(0), Some(Access::None));
/// assert_eq!(serde_json::to_string(&Access::Read).unwrap(), "1");
/// ```
#[macro_export]
macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// The integer sent on the wire.
            pub const fn value(self) -> i64 {
                match self {
                    $( Self::$variant => $value, )*
                }
            }

            /// Looks up the member with the given wire value.
            pub fn from_value(value: i64) -> ::std::option::Option<Self> {
                match value {
                    $( $value => ::std::option::Option::Some(Self::$variant), )*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_i64(self.value())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <i64 as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_value(value).ok_or_else(|| {
                    <D::Error as ::serde::de::Error>::custom(format!(
                        "invalid {} value {}",
                        stringify!($name),
                        value
                    ))
                })
            }
        }
    };
}

/// Implements [`ApiRecord`] with the type's own name as class name.
macro_rules! api_record {
    ($($ty:ident),* $(,)?) => {
        $(
            impl $crate::api::types::ApiRecord for $ty {
                const CLASS_NAME: &'static str = stringify!($ty);
            }
        )*
    };
}

pub(crate) use api_record;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_value(AccessType::Admin).unwrap(), 4);
        assert_eq!(
            serde_json::from_value::<ContentType>(serde_json::json!(8)).unwrap(),
            ContentType::Storyboard
        );
        assert!(serde_json::from_value::<ContentType>(serde_json::json!(7)).is_err());
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(UserStatusId::default(), UserStatusId::Enabled);
        assert_eq!(RoleAssignmentType::default(), RoleAssignmentType::UseDefaultBehavior);
        assert_eq!(SearchMatchType::default(), SearchMatchType::Contains);
    }

    #[test]
    fn test_class_names() {
        assert_eq!(NewTenant::CLASS_NAME, "NewTenant");
        assert_eq!(PieApiObject::CLASS_NAME, "PieApiObject");
    }
}
