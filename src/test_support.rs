//! Test-only logging setup, so stress tests can surface `warn!`/`debug!`
//! output from the filter under `cargo test -- --nocapture`.

#[cfg(test)]
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
