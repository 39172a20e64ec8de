/// Defines a newtype ID wrapper around a store-assigned [`bson::oid::ObjectId`]
/// and generates:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)
/// - `Display` and `FromStr` using the 24-character hex form
/// - `Serialize` / `Deserialize` as a plain hex string
/// - `From<ObjectId> for $name` and `From<$name> for ObjectId`
///
/// Usage:
///   define_id_type!(LessonId);
#[macro_export]
macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub ::bson::oid::ObjectId);

        impl $name {
            /// Generate a fresh identifier.
            pub fn generate() -> Self {
                $name(::bson::oid::ObjectId::new())
            }

            /// Parse the 24-character hex representation.
            pub fn parse_str(value: &str) -> ::std::result::Result<Self, ::bson::oid::Error> {
                ::bson::oid::ObjectId::parse_str(value).map($name)
            }

            pub fn value(&self) -> ::bson::oid::ObjectId {
                self.0
            }

            pub fn to_hex(&self) -> String {
                self.0.to_hex()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0.to_hex())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::bson::oid::Error;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $name::parse_str(s)
            }
        }

        impl ::std::convert::From<::bson::oid::ObjectId> for $name {
            fn from(v: ::bson::oid::ObjectId) -> Self {
                $name(v)
            }
        }

        impl ::std::convert::From<$name> for ::bson::oid::ObjectId {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(&self.0.to_hex())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                $name::parse_str(&raw).map_err(::serde::de::Error::custom)
            }
        }
    };
}
