#![deny(clippy::pedantic)]

fn main() {
    println!("cargo:rerun-if-env-changed=SETPACE_AUDIO_CONFIG_URL");
}
