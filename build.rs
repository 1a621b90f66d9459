fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PYTHON");

    // The `quillmark` Python module is loaded into an existing interpreter, so
    // on macOS libpython symbols are resolved at import time instead of link time.
    let python_module = std::env::var_os("CARGO_FEATURE_PYTHON").is_some();
    let macos = std::env::var("CARGO_CFG_TARGET_OS").is_ok_and(|os| os == "macos");
    if python_module && macos {
        for arg in ["-undefined", "dynamic_lookup"] {
            println!("cargo:rustc-cdylib-link-arg={arg}");
        }
    }
}
