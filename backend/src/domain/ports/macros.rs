//! Helper macro for declaring port error enums.
//!
//! Each generated enum derives `thiserror::Error`, gains one snake_case
//! constructor per variant accepting `impl Into<_>` fields, and converts into
//! an internal [`crate::domain::DomainError`] so services can use `?` directly.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $(
                    #[doc = concat!("The `", stringify!($field), "` detail.")]
                    $field : $ty
                ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }

        impl From<$name> for $crate::domain::DomainError {
            fn from(value: $name) -> Self {
                ::tracing::error!(error = %value, "port failure surfaced as internal error");
                $crate::domain::DomainError::internal(value.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::{DomainError, ErrorCode};

    define_port_error! {
        pub enum StorePortError {
            Unavailable => "store unavailable",
            Locked { collection: String } => "collection {collection} is locked",
            Rejected { collection: String, count: u32 } => "{collection} rejected {count} documents",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(StorePortError::unavailable().to_string(), "store unavailable");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StorePortError::locked("User");
        assert_eq!(err.to_string(), "collection User is locked");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StorePortError::rejected("User", 3_u32);
        assert_eq!(err.to_string(), "User rejected 3 documents");
    }

    #[test]
    fn converts_into_internal_domain_error() {
        let err: DomainError = StorePortError::locked("User").into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "collection User is locked");
    }
}
