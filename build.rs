fn main() {
    // Re-emits the ESP-IDF build environment for dependent crates.
    // On host builds (no espidf feature / toolchain) this is a no-op.
    embuild::espidf::sysenv::output();
}
