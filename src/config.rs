use std::env;
use std::str::FromStr;

/// Returns the value of the named environment variable if it exists or panics.
pub fn get_variable(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("must define {} environment variable", name))
}

/// Returns the named environment variable parsed as `T`, or panics.
pub fn parse_variable<T: FromStr>(name: &str) -> T {
    get_variable(name)
        .parse()
        .unwrap_or_else(|_| panic!("could not parse {} environment variable", name))
}
