/// Declaratively construct a [`Forest`](crate::Forest) from a list of edges.
///
/// Every entry is `(source, destination)` or `(source, destination, weight)`;
/// entries without a weight use [`DEFAULT_WEIGHT`](crate::DEFAULT_WEIGHT). The
/// edges are added in order and the macro evaluates to the
/// `Result<Forest, DuplicateParentError>` of adding them.
///
/// ```
/// # use rooted_forest::forest;
/// let forest = forest![
///     ((0, 0), (1, 1), 2.0),
///     ((1, 1), (2, 2)),
/// ]
/// .unwrap();
///
/// assert_eq!(forest.edge_weight((1, 1), (2, 2)), Ok(1.0));
/// assert!(forest![((0, 0), (1, 1)), ((2, 2), (1, 1))].is_err());
/// ```
#[macro_export]
macro_rules! forest {
    (@weight) => {
        $crate::DEFAULT_WEIGHT
    };
    (@weight $weight:expr) => {
        $weight
    };
    (
        $(
            ($source:expr, $destination:expr $(, $weight:expr)?)
        ),*
        $(,)?
    ) => {{
        (|| -> ::std::result::Result<$crate::Forest, $crate::DuplicateParentError> {
            #[allow(unused_mut)]
            let mut forest = $crate::Forest::new();
            $(
                forest.add_edge($source, $destination, $crate::forest!(@weight $($weight)?))?;
            )*
            ::std::result::Result::Ok(forest)
        })()
    }};
}
