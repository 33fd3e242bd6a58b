use duty_optimizer::solver::solver_params::Threads;

/// `auto`, or a positive number of threads.
pub fn parse_threads(input: &str) -> Result<Threads, String> {
    if input.eq_ignore_ascii_case("auto") {
        return Ok(Threads::Auto);
    }

    match input.parse::<usize>() {
        Ok(0) | Err(_) => Err(String::from("Invalid number of threads")),
        Ok(1) => Ok(Threads::Single),
        Ok(threads) => Ok(Threads::Multi(threads)),
    }
}
