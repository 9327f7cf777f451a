//! `define_port_error!`: the error enums every driven port returns.
//!
//! Each variant carries named fields and a display message. The macro derives
//! `thiserror::Error` and adds a snake_case constructor per variant whose
//! parameters accept `impl Into<Field>`, so adapters can write
//! `BookingRepositoryError::query("pool timed out")` or
//! `BookingRepositoryError::slot_unavailable(key)`.

macro_rules! define_port_error {
    (@constructor $variant:ident ($($params:tt)*) ($($inits:tt)*)) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (
        @constructor $variant:ident ($($params:tt)*) ($($inits:tt)*)
        $field:ident : $ty:ty, $($rest:tt)*
    ) => {
        define_port_error!(
            @constructor $variant
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
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant () () $($field : $ty,)*);
            )*
        }
    };
}

pub(crate) use define_port_error;
