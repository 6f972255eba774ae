//! Build-time configuration
//!
//! Reads an optional `.env` next to this crate and forwards the sampler
//! override to the firmware as a compile-time environment variable.

const FORWARDED: &[&str] = &["GASMETER_SAMPLE_INTERVAL_MS"];

fn main() {
    println!("cargo:rerun-if-changed=.env");

    for key in FORWARDED {
        println!("cargo:rerun-if-env-changed={key}");

        // `dotenvy::var` falls back to the process environment when `.env` lacks the key
        if let Ok(value) = dotenvy::var(key) {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}
