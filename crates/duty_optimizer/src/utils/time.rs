/// Runs `$block` and logs how long it took at debug level.
///
/// ```ignore
/// let solution = timer_debug!(construct_solution(&problem), "construction of {} legs", n);
/// ```
#[macro_export]
macro_rules! timer_debug {
    ($block:expr, $($arg:tt)+) => {{
        let started_at = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(started_at);

        tracing::debug!("{}: took {:#}", format_args!($($arg)+), elapsed);

        result
    }};
}
