//! `define_port_error!` declares a port's error enum together with one
//! snake_case constructor per variant.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum UserRepositoryError {
//!         Connection { message: String } => "user store connection failed: {message}",
//!         DuplicateEmail => "email already registered",
//!     }
//! }
//!
//! let err = UserRepositoryError::connection("pool exhausted");
//! ```
//!
//! Constructor parameters take `impl Into<FieldType>` in field order, so
//! adapters can pass `&str` or a formatted `String` alike.

macro_rules! define_port_error {
    (@constructor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$enum_attr:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_attr:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$enum_attr])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_attr])*
                #[error($message)]
                $variant $( { $($field: $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field: $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;
