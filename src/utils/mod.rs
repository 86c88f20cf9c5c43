mod time;

pub(crate) use time::*;

#[cfg(test)]
mod time_test;
