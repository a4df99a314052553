//! Macros for declaring transition tables.

/// Declare a [`TableBuilder`](crate::transition::TableBuilder) as a block of
/// per-state outcome mappings.
///
/// Rows are emitted in the order written, which is also lookup order.
///
/// # Example
///
/// ```
/// use switchyard::transitions;
/// use switchyard::{Outcome, RegistryBuilder};
///
/// let registry = RegistryBuilder::new()
///     .state("entry", || Outcome::Ok)?
///     .state("foo", || Outcome::Ok)?
///     .terminal("end", || Outcome::Ok)?
///     .build()?;
///
/// let table = transitions! {
///     entry => { Ok => foo, Fail => end },
///     foo => { Ok => end, Fail => end, Repeat => foo },
/// }
/// .build(&registry)?;
///
/// assert_eq!(table.len(), 5);
/// # Ok::<(), switchyard::ConfigError>(())
/// ```
#[macro_export]
macro_rules! transitions {
    (
        $(
            $source:ident => {
                $( $outcome:ident => $destination:ident ),* $(,)?
            }
        ),* $(,)?
    ) => {{
        let builder = $crate::transition::TableBuilder::new();
        $(
            $(
                let builder = builder.row(
                    stringify!($source),
                    $crate::Outcome::$outcome,
                    stringify!($destination),
                );
            )*
        )*
        builder
    }};
}
