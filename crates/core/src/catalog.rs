//! Variation catalog: every closed string set in the domain.
//!
//! Stage, color, size, storage location, and inventory status are flat
//! enumerations persisted as TEXT. They all live in this one module so that
//! adding a value is a one-place change. The database stores the canonical
//! SCREAMING_SNAKE_CASE string; these enums are the source of truth for
//! which strings are valid.

use std::str::FromStr;

use crate::error::CoreError;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $str:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member of the set, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// The canonical string stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $str ),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $str => Ok($name::$variant), )+
                    other => Err(crate::error::CoreError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        $label,
                        other,
                        $name::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use string_enum;

string_enum! {
    /// Production maturity of a sample.
    SampleStage, "stage" {
        Prototype => "PROTOTYPE",
        Development => "DEVELOPMENT",
        Production => "PRODUCTION",
        Archived => "ARCHIVED",
    }
}

string_enum! {
    /// Named colorways a sample variation can carry.
    ///
    /// `None` on a sample item is itself a valid, distinguishable variant;
    /// it is not represented here.
    SampleColor, "color" {
        Black => "BLACK",
        White => "WHITE",
        Ivory => "IVORY",
        Cream => "CREAM",
        Beige => "BEIGE",
        Tan => "TAN",
        Brown => "BROWN",
        Chocolate => "CHOCOLATE",
        Navy => "NAVY",
        Blue => "BLUE",
        SkyBlue => "SKY_BLUE",
        Teal => "TEAL",
        Green => "GREEN",
        Olive => "OLIVE",
        Sage => "SAGE",
        Yellow => "YELLOW",
        Mustard => "MUSTARD",
        Gold => "GOLD",
        Orange => "ORANGE",
        Rust => "RUST",
        Red => "RED",
        Burgundy => "BURGUNDY",
        Maroon => "MAROON",
        Pink => "PINK",
        Blush => "BLUSH",
        Purple => "PURPLE",
        Lavender => "LAVENDER",
        Gray => "GRAY",
        Charcoal => "CHARCOAL",
    }
}

string_enum! {
    /// Named garment sizes, alpha and numeric waist sizes.
    SampleSize, "size" {
        Xxs => "XXS",
        Xs => "XS",
        S => "S",
        M => "M",
        L => "L",
        Xl => "XL",
        Xxl => "XXL",
        Xxxl => "XXXL",
        OneSize => "ONE_SIZE",
        W28 => "W28",
        W30 => "W30",
        W32 => "W32",
        W34 => "W34",
        W36 => "W36",
        W38 => "W38",
    }
}

string_enum! {
    /// Physical locations an inventory unit can sit at.
    StorageLocation, "location" {
        StudioA => "STUDIO_A",
        StudioB => "STUDIO_B",
        WarehouseMain => "WAREHOUSE_MAIN",
        WarehouseOverflow => "WAREHOUSE_OVERFLOW",
        Showroom => "SHOWROOM",
        PhotoStudio => "PHOTO_STUDIO",
        FactoryFloor => "FACTORY_FLOOR",
        Offsite => "OFFSITE",
    }
}

string_enum! {
    /// Status of one physical inventory unit.
    InventoryStatus, "inventory status" {
        Available => "AVAILABLE",
        InUse => "IN_USE",
        Reserved => "RESERVED",
        Damaged => "DAMAGED",
        Archived => "ARCHIVED",
    }
}

/// Parse an optional string field into an optional catalog value.
///
/// `None` passes through untouched; `Some(s)` must be a member of the set.
pub fn parse_optional<T: FromStr<Err = CoreError>>(
    value: Option<&str>,
) -> Result<Option<T>, CoreError> {
    value.map(T::from_str).transpose()
}
