//! Macros for ergonomic state machine construction.

/// Declare a fieldless state enum that is its own lookup key.
///
/// Also generates `final_states()`, listing the variants named under
/// `final:`, and `name()`.
///
/// # Example
///
/// ```
/// use waymark::state_enum;
///
/// state_enum! {
///     pub enum WorkflowState {
///         Start,
///         Processing,
///         Done,
///         Failed,
///     }
///     final: [Done, Failed]
/// }
///
/// assert_eq!(WorkflowState::final_states(), vec![WorkflowState::Done, WorkflowState::Failed]);
/// assert_eq!(WorkflowState::Processing.name(), "Processing");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            type Key = Self;

            fn key(&self) -> Self {
                *self
            }
        }

        impl $name {
            #[allow(dead_code)]
            $vis fn final_states() -> ::std::vec::Vec<Self> {
                ::std::vec![$($(Self::$final),*)?]
            }

            #[allow(dead_code)]
            $vis fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Declare a fieldless event enum that is its own lookup key.
///
/// # Example
///
/// ```
/// use waymark::event_enum;
///
/// event_enum! {
///     pub enum WorkflowEvent {
///         Begin,
///         Finish,
///     }
/// }
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            type Key = Self;

            fn key(&self) -> Self {
                *self
            }
        }
    };
}
